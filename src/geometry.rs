//! Screen geometry in the host's logical coordinate space.

/// Logical canvas width every layout is computed against.
pub const CANVAS_WIDTH: i32 = 1280;
/// Logical canvas height every layout is computed against.
pub const CANVAS_HEIGHT: i32 = 720;

/// Axis-aligned screen rectangle. Positions may be negative (off-screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole canvas.
    #[must_use]
    pub const fn full_screen() -> Self {
        Self::new(0, 0, CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// Whether the rectangle lies entirely inside the canvas.
    #[must_use]
    pub const fn is_on_screen(&self) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x + self.width <= CANVAS_WIDTH
            && self.y + self.height <= CANVAS_HEIGHT
    }
}

fn usable_aspect(aspect_ratio: f64) -> f64 {
    if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        1.0
    }
}

/// Height of an image of `width` at the given aspect ratio, rounded to the
/// nearest pixel.
#[must_use]
pub fn height_for_width(width: i32, aspect_ratio: f64) -> i32 {
    (f64::from(width) / usable_aspect(aspect_ratio)).round() as i32
}

/// Widest image whose [`height_for_width`] still fits in `height`.
#[must_use]
pub fn max_width_for_height(height: i32, aspect_ratio: f64) -> i32 {
    (f64::from(height) * usable_aspect(aspect_ratio)).floor() as i32
}
