// SPDX-License-Identifier: MPL-2.0
//! Play triangle for time-based media.

use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};

/// Vertices of the play triangle in a 24 by 24 view box.
const TRIANGLE: [(f32, f32); 3] = [(8.0, 5.0), (8.0, 19.0), (19.0, 12.0)];
const VIEW_BOX: f32 = 24.0;

/// Right-pointing triangle filled with a single color.
#[derive(Debug, Clone, Copy)]
pub struct PlayGlyph {
    color: Color,
}

impl PlayGlyph {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn into_element<Message: 'static>(self, size: f32) -> iced::Element<'static, Message> {
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

/// Triangle vertices scaled into a square of side `side`.
#[must_use]
pub fn triangle_points(side: f32) -> [Point; 3] {
    let scale = side / VIEW_BOX;
    TRIANGLE.map(|(x, y)| Point::new(x * scale, y * scale))
}

impl<Message> canvas::Program<Message> for PlayGlyph {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let side = bounds.width.min(bounds.height);
        let [a, b, c] = triangle_points(side);
        let triangle = Path::new(|builder| {
            builder.move_to(a);
            builder.line_to(b);
            builder.line_to(c);
            builder.close();
        });
        frame.fill(&triangle, self.color);
        vec![frame.into_geometry()]
    }
}
