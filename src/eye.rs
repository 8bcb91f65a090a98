// One eye of the face: a pink eye-white with a black pupil that looks at the cursor.

use crate::draw::{fill_ellipse, BLACK};
use crate::faces::EyeGeometry;
use crate::types::{FrameBuffer, Point, Size};

/// Bounding box of the pupil ellipse.
pub const PUPIL_SIZE: Size = Size::new(5.0, 5.0);
/// Cursor distance beyond which the pupil stops moving further out.
pub const EYESIGHT_RADIUS: f32 = 100.0;
/// Light pink eye-white.
pub const EYE_WHITE: u32 = 0xFF_FD_F2_F5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eye {
    pub center: Point, // window-local center of the eye
    pub size: Size,    // total width/height of the eye-white
}

impl Eye {
    pub fn new(center: Point, size: Size) -> Self {
        Self { center, size }
    }

    /// Where the pupil sits when the cursor is at `pointer` (window-local).
    ///
    /// The offset toward the pointer is clamped to [`EYESIGHT_RADIUS`] and then
    /// mapped linearly onto half the travel left between eye-white and pupil.
    pub fn pupil_center(&self, pointer: Point) -> Point {
        let mut offset = pointer - self.center;

        let distance = offset.length();
        if distance > EYESIGHT_RADIUS {
            offset = offset.scale(EYESIGHT_RADIUS / distance);
        }

        let travel_x = (self.size.width - PUPIL_SIZE.width) / 2.0;
        let travel_y = (self.size.height - PUPIL_SIZE.height) / 2.0;

        Point::new(
            self.center.x + offset.x / EYESIGHT_RADIUS * travel_x,
            self.center.y + offset.y / EYESIGHT_RADIUS * travel_y,
        )
    }

    /// Draw eye-white then pupil onto `fb`.
    pub fn render(&self, pointer: Point, fb: &mut FrameBuffer) {
        fill_ellipse(fb, self.center, self.size, EYE_WHITE);
        fill_ellipse(fb, self.pupil_center(pointer), PUPIL_SIZE, BLACK);
    }
}

impl From<EyeGeometry> for Eye {
    fn from(g: EyeGeometry) -> Self {
        Eye::new(
            Point::new(g.x as f32, g.y as f32),
            Size::new(g.w as f32, g.h as f32),
        )
    }
}
