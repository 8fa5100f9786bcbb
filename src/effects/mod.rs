//! Effect strategies, one per [`Mode`].
//!
//! A strategy is stateless: it decides slot geometry and the animation
//! descriptor for each (slot, image) pair, and may fix the pool's paint and
//! selection order once per session in [`EffectStrategy::arrange`].

use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;

use crate::animation::AnimationDescriptor;
use crate::config::Mode;
use crate::geometry::Rect;
use crate::slots::{Slot, SlotPool};
use crate::source::ImageLocator;
use crate::window::Window;

mod apple_tv;
mod grid_switch;
mod random_zoom_in;
mod star_wars;
mod table_drop;

pub use apple_tv::AppleTvLike;
pub use grid_switch::GridSwitch;
pub use random_zoom_in::RandomZoomIn;
pub use star_wars::StarWars;
pub use table_drop::TableDrop;

/// Background used by every mode that doesn't name its own.
pub const DEFAULT_BACKGROUND: &str = "black.jpg";

/// Fixed per-mode session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// Slots allocated for the whole session.
    pub slot_count: usize,
    /// Images placed back-to-back before pacing starts.
    pub fast_start: usize,
    /// Wait between two images once pacing has started.
    pub pace: Duration,
    /// File name of the full-screen backdrop under the media directory.
    pub background: &'static str,
    /// Paint order is fixed by `arrange`; slots are never raised per image.
    pub fixed_paint_order: bool,
}

/// What to do with one slot for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// New geometry, or `None` to keep the slot where it is.
    pub geometry: Option<Rect>,
    pub animation: AnimationDescriptor,
    /// Clear the old image while the slot is hidden.
    pub clear_while_hidden: bool,
}

impl Layout {
    #[must_use]
    pub fn placed(geometry: Rect, animation: AnimationDescriptor) -> Self {
        Self {
            geometry: Some(geometry),
            animation,
            clear_while_hidden: false,
        }
    }

    #[must_use]
    pub fn in_place(animation: AnimationDescriptor) -> Self {
        Self {
            geometry: None,
            animation,
            clear_while_hidden: false,
        }
    }
}

pub trait EffectStrategy: Send + fmt::Debug {
    fn mode(&self) -> Mode;

    fn profile(&self) -> Profile;

    /// One-time session setup before the first image. The default attaches
    /// the slots in their natural order.
    fn arrange(&self, pool: &mut SlotPool, _rng: &mut StdRng, window: &mut dyn Window) {
        pool.restack(window);
    }

    fn layout(
        &self,
        slot: &Slot,
        image: &ImageLocator,
        aspect_ratio: f64,
        rng: &mut StdRng,
    ) -> Layout;
}

/// Explicit mode → strategy table.
#[must_use]
pub fn strategy_for(mode: Mode) -> Box<dyn EffectStrategy> {
    match mode {
        Mode::TableDrop => Box::new(TableDrop),
        Mode::StarWars => Box::new(StarWars),
        Mode::RandomZoomIn => Box::new(RandomZoomIn),
        Mode::AppleTvLike => Box::new(AppleTvLike),
        Mode::GridSwitch => Box::new(GridSwitch),
    }
}
