//! Grid wall: a fixed 4×4 layout where cells cross-fade in place.

use std::time::Duration;

use rand::rngs::StdRng;

use super::{DEFAULT_BACKGROUND, EffectStrategy, Layout, Profile};
use crate::animation::{AnimationDescriptor, Center, Effect, EffectSpec};
use crate::config::Mode;
use crate::geometry::{CANVAS_HEIGHT, CANVAS_WIDTH, Rect};
use crate::slots::{Slot, SlotPool};
use crate::source::ImageLocator;
use crate::window::Window;

pub const ROWS_AND_COLUMNS: usize = 4;
const FADE_MS: u32 = 1000;

/// Cells are picked in a shuffled order that stays fixed for the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridSwitch;

impl GridSwitch {
    /// Canvas rectangle of the cell at `(row, col)`.
    #[must_use]
    pub fn cell(row: usize, col: usize) -> Rect {
        let width = CANVAS_WIDTH / ROWS_AND_COLUMNS as i32;
        let height = CANVAS_HEIGHT / ROWS_AND_COLUMNS as i32;
        Rect::new(width * col as i32, height * row as i32, width, height)
    }
}

impl EffectStrategy for GridSwitch {
    fn mode(&self) -> Mode {
        Mode::GridSwitch
    }

    fn profile(&self) -> Profile {
        let cells = ROWS_AND_COLUMNS * ROWS_AND_COLUMNS;
        Profile {
            slot_count: cells,
            fast_start: cells,
            pace: Duration::from_millis(1000),
            background: DEFAULT_BACKGROUND,
            fixed_paint_order: true,
        }
    }

    /// Cells are assigned by original index before the selection shuffle.
    fn arrange(&self, pool: &mut SlotPool, rng: &mut StdRng, window: &mut dyn Window) {
        pool.restack(window);
        for index in 0..pool.len() {
            let (row, col) = (index / ROWS_AND_COLUMNS, index % ROWS_AND_COLUMNS);
            pool.set_geometry(index, Self::cell(row, col), window);
        }
        pool.shuffle_selection(rng);
    }

    fn layout(
        &self,
        _slot: &Slot,
        _image: &ImageLocator,
        _aspect_ratio: f64,
        _rng: &mut StdRng,
    ) -> Layout {
        Layout::in_place(
            AnimationDescriptor::new().with(
                EffectSpec::new(Effect::Fade { start: 0, end: 100 }, FADE_MS).center(Center::Auto),
            ),
        )
    }
}
