//! Opening-crawl style: tilted full-width images scrolling away upwards.

use std::time::Duration;

use rand::rngs::StdRng;

use super::{DEFAULT_BACKGROUND, EffectStrategy, Layout, Profile};
use crate::animation::{AnimationDescriptor, Center, Effect, EffectSpec, Tween};
use crate::config::Mode;
use crate::geometry::{CANVAS_HEIGHT, CANVAS_WIDTH, Rect};
use crate::slots::Slot;
use crate::source::ImageLocator;

const BAND_Y: i32 = 510;
const TILT_DEG: i32 = 50;
const TRAVEL: i32 = 1100;
const CRAWL_MS: u32 = 10_400;

#[derive(Debug, Clone, Copy, Default)]
pub struct StarWars;

impl EffectStrategy for StarWars {
    fn mode(&self) -> Mode {
        Mode::StarWars
    }

    fn profile(&self) -> Profile {
        Profile {
            slot_count: 6,
            fast_start: 0,
            pace: Duration::from_millis(2800),
            background: DEFAULT_BACKGROUND,
            fixed_paint_order: false,
        }
    }

    fn layout(
        &self,
        _slot: &Slot,
        _image: &ImageLocator,
        _aspect_ratio: f64,
        _rng: &mut StdRng,
    ) -> Layout {
        let animation = AnimationDescriptor::new()
            .with(
                EffectSpec::new(
                    Effect::RotateX {
                        start: 0,
                        end: TILT_DEG,
                    },
                    0,
                )
                .center(Center::Auto),
            )
            .with(
                EffectSpec::new(
                    Effect::Slide {
                        start: (0, TRAVEL),
                        end: (0, -TRAVEL),
                    },
                    CRAWL_MS,
                )
                .center(Center::Auto)
                .tween(Tween::Linear),
            );
        Layout::placed(
            Rect::new(0, BAND_Y, CANVAS_WIDTH, CANVAS_HEIGHT),
            animation,
        )
    }
}
