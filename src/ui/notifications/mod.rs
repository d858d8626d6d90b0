// SPDX-License-Identifier: MPL-2.0
//! Toasts reporting failures that happen outside the gallery grid.
//!
//! Opening a link, launching a media file, or reaching the submission source
//! can fail without anything in the page to show it. These failures surface
//! as short-lived toasts in the bottom-right corner.
//!
//! ```ignore
//! use crate::ui::notifications::{Manager, Notification};
//!
//! let mut manager = Manager::new();
//! manager.push(Notification::error("notification-open-link-error").with_arg("url", url));
//! let overlay = Toast::view_overlay(&manager, &i18n).map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
