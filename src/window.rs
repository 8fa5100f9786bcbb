//! Boundary to the host's window/rendering system.
//!
//! Slots are created, attached and mutated through [`Window`]; the host owns
//! decoding, painting and running the attached animations. Attach order is
//! paint order: a slot attached later paints above every slot attached before it.

use tracing::{debug, trace};

use crate::animation::AnimationDescriptor;
use crate::geometry::Rect;
use crate::source::ImageLocator;

/// Host-side handle of one image control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

pub trait Window: Send {
    fn show(&mut self);
    /// Release the window itself. Called once, after every slot is destroyed.
    fn close(&mut self);

    /// Create a detached image control.
    fn create_slot(&mut self, geometry: Rect, image: Option<&ImageLocator>) -> SlotId;
    fn destroy_slot(&mut self, id: SlotId);

    /// Attach on top of everything currently attached.
    fn attach(&mut self, id: SlotId);
    fn detach(&mut self, id: SlotId);

    /// Attach in order; the last id ends up on top.
    fn attach_all(&mut self, ids: &[SlotId]) {
        for id in ids {
            self.attach(*id);
        }
    }

    fn detach_all(&mut self, ids: &[SlotId]) {
        for id in ids {
            self.detach(*id);
        }
    }

    /// Set (or with `None`, clear) the slot's image. The host loads it
    /// asynchronously; this never waits for the load.
    fn set_image(&mut self, id: SlotId, image: Option<&ImageLocator>);
    fn set_position(&mut self, id: SlotId, x: i32, y: i32);
    fn set_size(&mut self, id: SlotId, width: i32, height: i32);
    fn set_visible(&mut self, id: SlotId, visible: bool);
    fn set_animations(&mut self, id: SlotId, animations: &AnimationDescriptor);
}

/// Headless window that only logs what a real host would render.
#[derive(Debug, Default)]
pub struct LogWindow {
    next_id: u32,
    attached: Vec<SlotId>,
}

impl LogWindow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently attached slots, bottom first.
    #[must_use]
    pub fn paint_order(&self) -> &[SlotId] {
        &self.attached
    }
}

impl Window for LogWindow {
    fn show(&mut self) {
        debug!("window shown");
    }

    fn close(&mut self) {
        debug!(attached = self.attached.len(), "window closed");
        self.attached.clear();
    }

    fn create_slot(&mut self, geometry: Rect, image: Option<&ImageLocator>) -> SlotId {
        let id = SlotId(self.next_id);
        self.next_id += 1;
        trace!(slot = id.0, ?geometry, image = ?image.map(ImageLocator::as_str), "create");
        id
    }

    fn destroy_slot(&mut self, id: SlotId) {
        self.attached.retain(|s| *s != id);
        trace!(slot = id.0, "destroy");
    }

    fn attach(&mut self, id: SlotId) {
        self.attached.retain(|s| *s != id);
        self.attached.push(id);
        trace!(slot = id.0, "attach");
    }

    fn detach(&mut self, id: SlotId) {
        self.attached.retain(|s| *s != id);
        trace!(slot = id.0, "detach");
    }

    fn set_image(&mut self, id: SlotId, image: Option<&ImageLocator>) {
        trace!(slot = id.0, image = ?image.map(ImageLocator::as_str), "set image");
    }

    fn set_position(&mut self, id: SlotId, x: i32, y: i32) {
        trace!(slot = id.0, x, y, "set position");
    }

    fn set_size(&mut self, id: SlotId, width: i32, height: i32) {
        trace!(slot = id.0, width, height, "set size");
    }

    fn set_visible(&mut self, id: SlotId, visible: bool) {
        trace!(slot = id.0, visible, "set visible");
    }

    fn set_animations(&mut self, id: SlotId, animations: &AnimationDescriptor) {
        for (trigger, spec) in animations.iter() {
            trace!(slot = id.0, %trigger, %spec, "set animation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reattach_moves_slot_to_top() {
        let mut window = LogWindow::new();
        let a = window.create_slot(Rect::default(), None);
        let b = window.create_slot(Rect::default(), None);
        window.attach_all(&[a, b]);
        window.detach(a);
        window.attach(a);
        assert_eq!(window.paint_order(), &[b, a]);
    }
}
