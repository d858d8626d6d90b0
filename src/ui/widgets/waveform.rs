// SPDX-License-Identifier: MPL-2.0
//! Static waveform shown on audio tiles that have no cover art.
//!
//! The bars are decorative: every audio submission gets the same fixed
//! profile, bottom-aligned and centred in the available space.

use crate::ui::design_tokens::palette;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Size, Theme};

/// Bar heights, in half-pixels at natural scale.
pub const PROFILE: [u8; 60] = [
    2, 4, 6, 8, 12, 16, 20, 18, 15, 12, 8, 6, 4, 2, 3, 5, 7, 9, 11, 14, 17, 19, 16, 13, 10, 7, 5,
    3, 1, 2, 4, 6, 8, 10, 12, 14, 16, 18, 15, 12, 9, 6, 4, 2, 1, 3, 5, 7, 9, 11, 13, 15, 17, 14,
    11, 8, 6, 4, 2, 1,
];

const BAR_WIDTH: f32 = 2.0;
const BAR_GAP: f32 = 2.0;
const HEIGHT_SCALE: f32 = 2.0;

/// Bar color over the light placeholder.
const BAR_COLOR: Color = Color::from_rgb(0.294, 0.333, 0.388); // #4B5563

/// Canvas program drawing [`PROFILE`].
#[derive(Default)]
pub struct Waveform {
    cache: Cache,
}

impl Waveform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_element<Message: 'static>(self, height: f32) -> iced::Element<'static, Message> {
        Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .into()
    }
}

/// Rectangles for every bar inside a canvas of `size`.
///
/// At natural scale the profile is 238 by 40 pixels. Smaller canvases shrink
/// it uniformly; larger ones keep the natural size.
#[must_use]
pub fn bar_rects(size: Size) -> Vec<Rectangle> {
    let count = PROFILE.len() as f32;
    let natural_width = count * BAR_WIDTH + (count - 1.0) * BAR_GAP;
    let tallest = f32::from(PROFILE.iter().copied().max().unwrap_or(1));
    let natural_height = tallest * HEIGHT_SCALE;

    let scale = (size.width / natural_width)
        .min(size.height / natural_height)
        .clamp(0.0, 1.0);

    let total_width = natural_width * scale;
    let left = (size.width - total_width) / 2.0;
    let baseline = (size.height + natural_height * scale) / 2.0;

    PROFILE
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let height = f32::from(value) * HEIGHT_SCALE * scale;
            let x = left + index as f32 * (BAR_WIDTH + BAR_GAP) * scale;
            Rectangle::new(
                Point::new(x, baseline - height),
                Size::new(BAR_WIDTH * scale, height),
            )
        })
        .collect()
}

impl<Message> canvas::Program<Message> for Waveform {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                frame.fill_rectangle(Point::ORIGIN, frame.size(), palette::GRAY_100);
                for bar in bar_rects(frame.size()) {
                    frame.fill(
                        &Path::rounded_rectangle(
                            bar.position(),
                            bar.size(),
                            (bar.width / 2.0).into(),
                        ),
                        BAR_COLOR,
                    );
                }
            });

        vec![geometry]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_has_sixty_bars() {
        assert_eq!(PROFILE.len(), 60);
        assert_eq!(PROFILE.iter().max(), Some(&20));
    }

    #[test]
    fn bars_fit_inside_large_canvas_at_natural_size() {
        let size = Size::new(400.0, 96.0);
        let bars = bar_rects(size);
        assert_eq!(bars.len(), 60);
        assert!(bars.iter().all(|bar| (bar.width - BAR_WIDTH).abs() < f32::EPSILON));
        for bar in &bars {
            assert!(bar.x >= 0.0 && bar.x + bar.width <= size.width);
            assert!(bar.y >= 0.0 && bar.y + bar.height <= size.height);
        }
    }

    #[test]
    fn bars_share_a_baseline() {
        let bars = bar_rects(Size::new(400.0, 96.0));
        let baseline = bars[0].y + bars[0].height;
        assert!(bars
            .iter()
            .all(|bar| (bar.y + bar.height - baseline).abs() < 1e-3));
    }

    #[test]
    fn tallest_bar_is_forty_pixels() {
        let bars = bar_rects(Size::new(400.0, 96.0));
        let tallest = bars.iter().map(|bar| bar.height).fold(0.0, f32::max);
        assert!((tallest - 40.0).abs() < 1e-3);
    }

    #[test]
    fn narrow_canvas_shrinks_uniformly() {
        let size = Size::new(119.0, 96.0);
        let bars = bar_rects(size);
        assert!((bars[0].width - 1.0).abs() < 1e-3);
        let last = bars[bars.len() - 1];
        assert!(last.x + last.width <= size.width + 1e-3);
    }
}
