//! Depth-sorted parallax: many images of random size drifting upwards, the
//! bigger (nearer) ones faster and always painted above the smaller ones.

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use super::{DEFAULT_BACKGROUND, EffectStrategy, Layout, Profile};
use crate::animation::{AnimationDescriptor, Center, Effect, EffectSpec, Tween};
use crate::config::Mode;
use crate::geometry::{CANVAS_HEIGHT, CANVAS_WIDTH, Rect, height_for_width};
use crate::slots::{Slot, SlotPool};
use crate::source::ImageLocator;
use crate::window::Window;

/// Travel time of a slot at 100% zoom; smaller slots take proportionally longer.
const TOTAL_TIME_MS: u32 = 15_000;
const MIN_ZOOM_PERCENT: i32 = 10;
const MAX_ZOOM_PERCENT: i32 = 70;
/// Right bound of the left edge before the half-width overhang is added.
const X_SPAN: i32 = 1080;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppleTvLike;

impl AppleTvLike {
    /// Zoom percent in `[10, 70]`, Beta(2,2)-distributed so mid sizes dominate.
    pub fn sample_zoom_percent<R: Rng + ?Sized>(rng: &mut R) -> i32 {
        let span = f64::from(MAX_ZOOM_PERCENT - MIN_ZOOM_PERCENT);
        MIN_ZOOM_PERCENT + (beta_2_2(rng) * span) as i32
    }

    /// Slide duration for a slot of `width`: `TOTAL_TIME / zoom * 100` in
    /// integer arithmetic, where `zoom` is the width as a percentage of the canvas.
    #[must_use]
    pub fn travel_ms(width: i32) -> u32 {
        let zoom = (width * 100 / CANVAS_WIDTH).max(1) as u32;
        TOTAL_TIME_MS / zoom * 100
    }
}

/// Beta(2,2) sample: the median of three independent uniforms.
fn beta_2_2<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let mut u = [
        rng.random::<f64>(),
        rng.random::<f64>(),
        rng.random::<f64>(),
    ];
    u.sort_by(f64::total_cmp);
    u[1]
}

impl EffectStrategy for AppleTvLike {
    fn mode(&self) -> Mode {
        Mode::AppleTvLike
    }

    fn profile(&self) -> Profile {
        Profile {
            slot_count: 35,
            fast_start: 3,
            pace: Duration::from_millis(4500),
            background: DEFAULT_BACKGROUND,
            fixed_paint_order: true,
        }
    }

    /// Sizes are sampled once per session and never change again: paint
    /// order is sorted by width here, so resizing later would break depth.
    fn arrange(&self, pool: &mut SlotPool, rng: &mut StdRng, window: &mut dyn Window) {
        for index in 0..pool.len() {
            let zoom = Self::sample_zoom_percent(rng);
            let width = CANVAS_WIDTH * zoom / 100;
            pool.set_geometry(index, Rect::new(0, 0, width, 0), window);
        }
        pool.sort_paint_order_by_key(|slot| slot.geometry.width);
        pool.restack(window);
        pool.shuffle_selection(rng);
        debug!(
            smallest = pool.slots().first().map(|s| s.geometry.width),
            largest = pool.slots().last().map(|s| s.geometry.width),
            "parallax depth fixed"
        );
    }

    fn layout(
        &self,
        slot: &Slot,
        _image: &ImageLocator,
        aspect_ratio: f64,
        rng: &mut StdRng,
    ) -> Layout {
        let width = slot.geometry.width;
        let height = height_for_width(width, aspect_ratio);
        // Images may hang over either edge by up to half their width.
        let x = rng.random_range(-width / 2..=X_SPAN + width / 2);
        let animation = AnimationDescriptor::new().with(
            EffectSpec::new(
                Effect::Slide {
                    start: (0, CANVAS_HEIGHT),
                    end: (0, -CANVAS_HEIGHT),
                },
                Self::travel_ms(width),
            )
            .center(Center::Auto)
            .tween(Tween::Linear)
            .delay(0),
        );
        Layout::placed(Rect::new(x, 0, width, height), animation)
    }
}
