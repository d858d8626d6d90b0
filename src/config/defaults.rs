// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Gallery**: asset host location and folder discovery
//! - **Overlay**: slide animation timing
//! - **Loader**: request concurrency and timeouts
//! - **Layout**: grid breakpoint

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Asset host used when neither CLI nor config name one (a local directory).
pub const DEFAULT_SOURCE: &str = "public";

/// Directory below the host root that holds the numbered folders.
pub const DEFAULT_SUBMISSIONS_ROOT: &str = "submissions";

/// Highest folder number probed when no explicit folder list is configured.
pub const DEFAULT_SCAN_LIMIT: u32 = 20;

/// Upper bound accepted for the scan limit.
pub const MAX_SCAN_LIMIT: u32 = 999;

/// Maximum number of `imageN.jpg` files probed per folder.
pub const DEFAULT_MAX_ADDITIONAL_IMAGES: usize = 10;

/// Upper bound accepted for additional images.
pub const MAX_ADDITIONAL_IMAGES: usize = 50;

/// Intake form opened by the "Submit" link.
pub const DEFAULT_SUBMIT_URL: &str = "https://docs.google.com/forms/d/e/1FAIpQLSc9X6MrclQflyqp6KKIOCXFyXNzbqfmoF5_CBOWAhOJaR7gpQ/viewform?usp=sharing&ouid=109988493284976014984";

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Duration of the overlay slide in and out (in milliseconds).
pub const DEFAULT_TRANSITION_MS: u64 = 600;

/// Minimum transition duration (in milliseconds).
pub const MIN_TRANSITION_MS: u64 = 0;

/// Maximum transition duration (in milliseconds).
pub const MAX_TRANSITION_MS: u64 = 5_000;

// ==========================================================================
// Loader Defaults
// ==========================================================================

/// Folders processed at the same time.
pub const DEFAULT_MAX_CONCURRENT_FOLDERS: usize = 4;

/// Minimum concurrent folders (sequential loading).
pub const MIN_CONCURRENT_FOLDERS: usize = 1;

/// Maximum concurrent folders.
pub const MAX_CONCURRENT_FOLDERS: usize = 32;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Windows wider than this (logical px) get the three-column grid.
pub const WIDE_LAYOUT_MIN_WIDTH: f32 = 1040.0;

/// Columns in the wide grid.
pub const WIDE_COLUMNS: usize = 3;

/// Columns in the narrow grid.
pub const NARROW_COLUMNS: usize = 1;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Gallery validation
    assert!(DEFAULT_SCAN_LIMIT > 0);
    assert!(DEFAULT_SCAN_LIMIT <= MAX_SCAN_LIMIT);
    assert!(DEFAULT_MAX_ADDITIONAL_IMAGES <= MAX_ADDITIONAL_IMAGES);

    // Overlay validation
    assert!(MAX_TRANSITION_MS > MIN_TRANSITION_MS);
    assert!(DEFAULT_TRANSITION_MS <= MAX_TRANSITION_MS);

    // Loader validation
    assert!(MIN_CONCURRENT_FOLDERS > 0);
    assert!(DEFAULT_MAX_CONCURRENT_FOLDERS >= MIN_CONCURRENT_FOLDERS);
    assert!(DEFAULT_MAX_CONCURRENT_FOLDERS <= MAX_CONCURRENT_FOLDERS);

    // Layout validation
    assert!(WIDE_COLUMNS > NARROW_COLUMNS);
};
