//! Photos dropped onto a table: each lands at a random spot, slightly rotated,
//! on top of the pile.

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;

use super::{EffectStrategy, Layout, Profile};
use crate::animation::{AnimationDescriptor, Center, Effect, EffectSpec, Tween};
use crate::config::Mode;
use crate::geometry::{
    CANVAS_HEIGHT, CANVAS_WIDTH, Rect, height_for_width, max_width_for_height,
};
use crate::slots::Slot;
use crate::source::ImageLocator;

const MIN_WIDTH: i32 = 500;
const MAX_WIDTH: i32 = 700;
const MIN_DROP_HEIGHT: u32 = 400;
const MAX_DROP_HEIGHT: u32 = 800;
const MAX_ROTATION_DEG: f64 = 20.0;
const FADE_MS: u32 = 200;

#[derive(Debug, Clone, Copy, Default)]
pub struct TableDrop;

impl EffectStrategy for TableDrop {
    fn mode(&self) -> Mode {
        Mode::TableDrop
    }

    fn profile(&self) -> Profile {
        Profile {
            slot_count: 20,
            fast_start: 0,
            pace: Duration::from_millis(1500),
            background: "table.jpg",
            fixed_paint_order: false,
        }
    }

    fn layout(
        &self,
        _slot: &Slot,
        _image: &ImageLocator,
        aspect_ratio: f64,
        rng: &mut StdRng,
    ) -> Layout {
        // Tall images are narrowed until they fit the canvas height.
        let max_width = MAX_WIDTH.min(max_width_for_height(CANVAS_HEIGHT, aspect_ratio));
        let width = rng.random_range(MIN_WIDTH.min(max_width)..=max_width);
        let height = height_for_width(width, aspect_ratio);
        let x = rng.random_range(0..=(CANVAS_WIDTH - width).max(0));
        let y = rng.random_range(0..=(CANVAS_HEIGHT - height).max(0));

        // The drop is a zoom from `drop_height` percent down to 100; the
        // rotation settles over the same span.
        let drop_height = rng.random_range(MIN_DROP_HEIGHT..=MAX_DROP_HEIGHT);
        let drop_ms = drop_height * 3 / 2;
        let degrees = rng.random_range(-MAX_ROTATION_DEG..=MAX_ROTATION_DEG).trunc() as i32;

        let animation = AnimationDescriptor::new()
            .with(EffectSpec::new(Effect::Fade { start: 0, end: 100 }, FADE_MS))
            .with(
                EffectSpec::new(
                    Effect::Rotate {
                        start: 0,
                        end: degrees,
                    },
                    drop_ms,
                )
                .center(Center::Auto)
                .delay(0)
                .tween(Tween::Circle),
            )
            .with(
                EffectSpec::new(
                    Effect::Zoom {
                        start: drop_height,
                        end: 100,
                    },
                    drop_ms,
                )
                .center(Center::Auto)
                .delay(0)
                .tween(Tween::Circle),
            );

        Layout {
            geometry: Some(Rect::new(x, y, width, height)),
            animation,
            clear_while_hidden: true,
        }
    }
}
