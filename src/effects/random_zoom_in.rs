//! Full-screen images growing out of a random point.

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;

use super::{DEFAULT_BACKGROUND, EffectStrategy, Layout, Profile};
use crate::animation::{AnimationDescriptor, Center, Effect, EffectSpec, Tween};
use crate::config::Mode;
use crate::geometry::{CANVAS_HEIGHT, CANVAS_WIDTH, Rect};
use crate::slots::Slot;
use crate::source::ImageLocator;

const ZOOM_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomZoomIn;

impl EffectStrategy for RandomZoomIn {
    fn mode(&self) -> Mode {
        Mode::RandomZoomIn
    }

    fn profile(&self) -> Profile {
        Profile {
            slot_count: 7,
            fast_start: 0,
            pace: Duration::from_millis(2000),
            background: DEFAULT_BACKGROUND,
            fixed_paint_order: false,
        }
    }

    fn layout(
        &self,
        _slot: &Slot,
        _image: &ImageLocator,
        _aspect_ratio: f64,
        rng: &mut StdRng,
    ) -> Layout {
        let cx = rng.random_range(0..=CANVAS_WIDTH);
        let cy = rng.random_range(0..=CANVAS_HEIGHT);
        let animation = AnimationDescriptor::new().with(
            EffectSpec::new(Effect::Zoom { start: 1, end: 100 }, ZOOM_MS)
                .center(Center::Point(cx, cy))
                .tween(Tween::Quadratic),
        );
        Layout::placed(Rect::full_screen(), animation)
    }
}
