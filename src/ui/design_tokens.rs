// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

This module defines all of the gallery's design tokens, following the W3C Design Tokens standard.

## Organization

- **Palette**: Base colors
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Border**: Border width scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use iced_gallery::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

// Backdrop behind the detail overlay
let backdrop = Color {
    a: opacity::BACKDROP,
    ..palette::WHITE
};

// Use the spacing scale
let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.067, 0.094, 0.153); // #111827
    pub const GRAY_700: Color = Color::from_rgb(0.216, 0.255, 0.318); // #374151
    pub const GRAY_500: Color = Color::from_rgb(0.420, 0.447, 0.502); // #6B7280
    pub const GRAY_400: Color = Color::from_rgb(0.612, 0.639, 0.686); // #9CA3AF
    pub const GRAY_200: Color = Color::from_rgb(0.898, 0.906, 0.922); // #E5E7EB
    pub const GRAY_100: Color = Color::from_rgb(0.953, 0.957, 0.965); // #F3F4F6

    // Brand blue used for the "Submit" link and accents (#1250C4)
    pub const BRAND_500: Color = Color::from_rgb(0.071, 0.314, 0.769);
    pub const BRAND_400: Color = Color::from_rgb(0.235, 0.467, 0.878);
    pub const BRAND_600: Color = Color::from_rgb(0.055, 0.243, 0.600);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;

    /// Page backdrop behind the detail overlay
    pub const BACKDROP: f32 = 0.75;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
    pub const XL: f32 = 32.0; // 4 units
    pub const XXL: f32 = 48.0; // 6 units
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    // Icon sizes
    pub const ICON_MD: f32 = 24.0;
    pub const ICON_XL: f32 = 48.0;

    /// Maximum width of the landing header text column
    pub const HEADER_MAX_WIDTH: f32 = 500.0;

    /// Height of one tile preview
    pub const TILE_PREVIEW_HEIGHT: f32 = 320.0;

    /// Diameter of the play badge on video and audio tiles
    pub const PLAY_BADGE: f32 = 56.0;

    /// Height of the static waveform drawn for audio without cover art
    pub const WAVEFORM_HEIGHT: f32 = 96.0;

    /// Fraction of the window height taken by the overlay panel
    pub const OVERLAY_HEIGHT_RATIO: f32 = 0.95;

    /// Fraction of the window width taken by the overlay panel on wide layouts
    pub const OVERLAY_WIDTH_RATIO: f32 = 0.75;

    /// Height of the primary media in the overlay
    pub const OVERLAY_MEDIA_HEIGHT: f32 = 520.0;

    /// Height of one additional image in the overlay
    pub const OVERLAY_EXTRA_IMAGE_HEIGHT: f32 = 360.0;

    /// Label column of the overlay detail rows
    pub const DETAIL_LABEL_WIDTH: f32 = 140.0;

    pub const TOAST_WIDTH: f32 = 320.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    //! Font size scale for the gallery's light, text-forward look.

    /// Overlay title
    pub const TITLE_LG: f32 = 30.0;

    /// Gallery title
    pub const TITLE_MD: f32 = 20.0;

    /// Section headers
    pub const TITLE_SM: f32 = 18.0;

    /// Statement paragraph
    pub const BODY_LG: f32 = 16.0;

    /// Standard body - Most UI text, labels, descriptions
    pub const BODY: f32 = 14.0;

    /// Small body - Hints, secondary labels
    pub const BODY_SM: f32 = 13.0;

    /// Caption - Detail labels, tile captions
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    /// Thin border - Subtle separators
    pub const WIDTH_SM: f32 = 1.0;

    /// Medium border - Emphasis borders, toast accents
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    /// Top corners of the overlay panel
    pub const XL: f32 = 16.0;
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const MD: Shadow = Shadow {
        color: Color {
            a: 0.15,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };

    /// Overlay panel lift
    pub const XL: Shadow = Shadow {
        color: Color {
            a: 0.25,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: -8.0 },
        blur_radius: 32.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    // Spacing validation
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    // Opacity validation
    assert!(opacity::OVERLAY_MEDIUM > opacity::OVERLAY_SUBTLE);
    assert!(opacity::BACKDROP > 0.0 && opacity::BACKDROP < 1.0);

    // Sizing validation
    assert!(sizing::ICON_XL > sizing::ICON_MD);
    assert!(sizing::OVERLAY_HEIGHT_RATIO > 0.0 && sizing::OVERLAY_HEIGHT_RATIO <= 1.0);
    assert!(sizing::OVERLAY_WIDTH_RATIO > 0.0 && sizing::OVERLAY_WIDTH_RATIO <= 1.0);

    // Typography validation
    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY_LG);
    assert!(typography::BODY > typography::BODY_SM);
    assert!(typography::BODY_SM > typography::CAPTION);

    // Border validation
    assert!(border::WIDTH_MD > border::WIDTH_SM);
};
