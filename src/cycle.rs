//! Endless replay of a once-shuffled image list.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::source::{ImageList, ImageLocator};

/// Cursor over a shuffled image list that wraps forever.
///
/// The list is shuffled exactly once, at construction. Every later lap
/// replays the first lap's order.
#[derive(Debug, Clone)]
pub struct ImageCycle {
    items: ImageList,
    idx: usize,
}

impl ImageCycle {
    /// Shuffle `items` with `rng` and start at the first element.
    pub fn shuffled<R: Rng + ?Sized>(mut items: ImageList, rng: &mut R) -> Self {
        items.shuffle(rng);
        Self::in_order(items)
    }

    /// Cycle over `items` exactly as given.
    #[must_use]
    pub fn in_order(items: ImageList) -> Self {
        Self { items, idx: 0 }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the next item without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<&ImageLocator> {
        self.items.get(self.idx)
    }

    /// Return the next item and advance, wrapping at the end. `None` only when
    /// the list is empty.
    pub fn advance(&mut self) -> Option<&ImageLocator> {
        let out = self.items.get(self.idx)?;
        self.idx = (self.idx + 1) % self.items.len();
        Some(out)
    }

    /// Restart from the first element of the shuffled order.
    pub fn reset(&mut self) {
        self.idx = 0;
    }
}

impl Iterator for ImageCycle {
    type Item = ImageLocator;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().cloned()
    }
}
