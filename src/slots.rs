//! Fixed pool of reusable image slots.
//!
//! The pool keeps two orders. *Paint order* is the order of `slots` and the
//! order they are attached to the window in. *Selection order* is the
//! round-robin order `next_slot` hands them out in. Strategies may shuffle
//! selection without disturbing paint order.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::animation::AnimationDescriptor;
use crate::effects::Layout;
use crate::geometry::Rect;
use crate::source::ImageLocator;
use crate::window::{SlotId, Window};

/// Local mirror of one host image control. The id stays fixed for the
/// slot's lifetime; the rest is whatever was last pushed to the host.
#[derive(Debug, Clone)]
pub struct Slot {
    id: SlotId,
    pub geometry: Rect,
    pub image: Option<ImageLocator>,
    pub visible: bool,
    pub animation: AnimationDescriptor,
}

impl Slot {
    fn new(id: SlotId) -> Self {
        Self {
            id,
            geometry: Rect::default(),
            image: None,
            visible: true,
            animation: AnimationDescriptor::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> SlotId {
        self.id
    }

    #[cfg(test)]
    pub(crate) fn detached(id: SlotId) -> Self {
        Self::new(id)
    }
}

/// Fixed set of slots allocated once per session and reused round-robin.
#[derive(Debug, Default)]
pub struct SlotPool {
    slots: Vec<Slot>,
    selection: Vec<usize>,
    cursor: usize,
}

impl SlotPool {
    /// Create `count` detached, empty slots on the window.
    pub fn allocate(count: usize, window: &mut dyn Window) -> Self {
        let slots: Vec<Slot> = (0..count)
            .map(|_| Slot::new(window.create_slot(Rect::default(), None)))
            .collect();
        debug!(count, "slot pool allocated");
        Self {
            selection: (0..slots.len()).collect(),
            slots,
            cursor: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in paint order, bottom first.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[must_use]
    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Slot ids in paint order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<SlotId> {
        self.slots.iter().map(Slot::id).collect()
    }

    /// Slot ids in the order `next_slot` yields them within one lap.
    #[must_use]
    pub fn selection_order(&self) -> Vec<SlotId> {
        self.selection.iter().map(|&i| self.slots[i].id).collect()
    }

    /// Round-robin over the selection order, restarting forever.
    pub fn next_slot(&mut self) -> Option<SlotId> {
        let idx = *self.selection.get(self.cursor)?;
        self.cursor = (self.cursor + 1) % self.selection.len();
        Some(self.slots[idx].id)
    }

    /// Stable-sort paint order by `key`, ascending. Selection order is reset
    /// to the new paint order.
    pub fn sort_paint_order_by_key<K, F>(&mut self, key: F)
    where
        K: Ord,
        F: FnMut(&Slot) -> K,
    {
        self.slots.sort_by_key(key);
        self.selection = (0..self.slots.len()).collect();
        self.cursor = 0;
    }

    /// Shuffle which slot is reused next without touching paint order.
    pub fn shuffle_selection<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.selection.shuffle(rng);
        self.cursor = 0;
    }

    /// Set a slot's geometry by paint-order index and push it to the host.
    pub fn set_geometry(&mut self, index: usize, geometry: Rect, window: &mut dyn Window) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.geometry = geometry;
            window.set_position(slot.id, geometry.x, geometry.y);
            window.set_size(slot.id, geometry.width, geometry.height);
        }
    }

    /// Detach every slot and re-attach in paint order (last on top).
    pub fn restack(&self, window: &mut dyn Window) {
        let ids = self.paint_order();
        window.detach_all(&ids);
        window.attach_all(&ids);
        trace!(count = ids.len(), "slots restacked");
    }

    /// Show `image` in slot `id` with the strategy's layout.
    ///
    /// A layout with geometry hides the slot, optionally raises it to the top,
    /// reconfigures it and shows it again. A layout without geometry swaps the
    /// image and animation in place.
    pub fn apply(
        &mut self,
        id: SlotId,
        image: &ImageLocator,
        layout: &Layout,
        raise: bool,
        window: &mut dyn Window,
    ) {
        let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) else {
            return;
        };

        if let Some(geometry) = layout.geometry {
            window.set_visible(id, false);
            slot.visible = false;
            if layout.clear_while_hidden {
                window.set_image(id, None);
                slot.image = None;
            }
            if raise {
                window.detach(id);
                window.attach(id);
            }
            window.set_image(id, Some(image));
            window.set_position(id, geometry.x, geometry.y);
            window.set_size(id, geometry.width, geometry.height);
            window.set_animations(id, &layout.animation);
            window.set_visible(id, true);
            slot.geometry = geometry;
            slot.visible = true;
        } else {
            if raise {
                window.detach(id);
                window.attach(id);
            }
            window.set_image(id, Some(image));
            window.set_animations(id, &layout.animation);
        }
        slot.image = Some(image.clone());
        slot.animation = layout.animation.clone();
    }

    /// Detach and destroy every slot. Safe to call more than once.
    pub fn release(&mut self, window: &mut dyn Window) {
        if self.slots.is_empty() {
            return;
        }
        let ids = self.paint_order();
        window.detach_all(&ids);
        for id in ids {
            window.destroy_slot(id);
        }
        debug!(count = self.slots.len(), "slot pool released");
        self.slots.clear();
        self.selection.clear();
        self.cursor = 0;
    }
}
