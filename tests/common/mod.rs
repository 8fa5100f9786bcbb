#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use fanart_screensaver::animation::AnimationDescriptor;
use fanart_screensaver::config::{Configuration, Mode, SourceKind};
use fanart_screensaver::geometry::Rect;
use fanart_screensaver::source::{DirectoryListing, ImageLocator, ImageSource, JsonRpc};
use fanart_screensaver::window::{SlotId, Window};
use serde_json::json;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Show,
    Close,
    Create(SlotId, Rect, Option<String>),
    Destroy(SlotId),
    Attach(SlotId),
    Detach(SlotId),
    Image(SlotId, Option<String>),
    Position(SlotId, i32, i32),
    Size(SlotId, i32, i32),
    Visible(SlotId, bool),
    Animations(SlotId, Vec<(String, String)>),
}

/// One image put on screen: when, where, what.
#[derive(Debug, Clone)]
pub struct Placement {
    pub at: Instant,
    pub slot: SlotId,
    pub image: String,
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<(Instant, Op)>>>);

impl Journal {
    pub fn ops(&self) -> Vec<Op> {
        self.0.lock().unwrap().iter().map(|(_, op)| op.clone()).collect()
    }

    fn push(&self, op: Op) {
        self.0.lock().unwrap().push((Instant::now(), op));
    }

    /// Background is the first slot created, the preload slot the second.
    pub fn background(&self) -> SlotId {
        self.created()[0]
    }

    pub fn preload(&self) -> SlotId {
        self.created()[1]
    }

    pub fn created(&self) -> Vec<SlotId> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Create(id, _, _) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn destroyed(&self) -> Vec<SlotId> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Destroy(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Every animation attach on a pool slot, paired with the slot's image.
    pub fn placements(&self) -> Vec<Placement> {
        let guard = self.0.lock().unwrap();
        let mut images: HashMap<SlotId, String> = HashMap::new();
        let mut out = Vec::new();
        for (at, op) in guard.iter() {
            match op {
                Op::Image(id, Some(image)) => {
                    images.insert(*id, image.clone());
                }
                Op::Animations(id, _) => out.push(Placement {
                    at: *at,
                    slot: *id,
                    image: images.get(id).cloned().unwrap_or_default(),
                }),
                _ => {}
            }
        }
        out
    }

    pub fn placement_count(&self) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, op)| matches!(op, Op::Animations(..)))
            .count()
    }

    /// Images handed to the preload slot, in order.
    pub fn preloaded(&self) -> Vec<String> {
        let preload = self.preload();
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Image(id, Some(image)) if id == preload => Some(image),
                _ => None,
            })
            .collect()
    }
}

/// Window that journals every call.
#[derive(Debug, Default)]
pub struct RecordingWindow {
    journal: Journal,
    next_id: u32,
    pub attached: Vec<SlotId>,
    pub closed: bool,
}

impl RecordingWindow {
    pub fn new() -> (Self, Journal) {
        let window = Self::default();
        let journal = window.journal.clone();
        (window, journal)
    }
}

impl Window for RecordingWindow {
    fn show(&mut self) {
        self.journal.push(Op::Show);
    }

    fn close(&mut self) {
        self.closed = true;
        self.journal.push(Op::Close);
    }

    fn create_slot(&mut self, geometry: Rect, image: Option<&ImageLocator>) -> SlotId {
        let id = SlotId(self.next_id);
        self.next_id += 1;
        self.journal.push(Op::Create(
            id,
            geometry,
            image.map(|i| i.as_str().to_string()),
        ));
        id
    }

    fn destroy_slot(&mut self, id: SlotId) {
        self.attached.retain(|s| *s != id);
        self.journal.push(Op::Destroy(id));
    }

    fn attach(&mut self, id: SlotId) {
        self.attached.retain(|s| *s != id);
        self.attached.push(id);
        self.journal.push(Op::Attach(id));
    }

    fn detach(&mut self, id: SlotId) {
        self.attached.retain(|s| *s != id);
        self.journal.push(Op::Detach(id));
    }

    fn set_image(&mut self, id: SlotId, image: Option<&ImageLocator>) {
        self.journal
            .push(Op::Image(id, image.map(|i| i.as_str().to_string())));
    }

    fn set_position(&mut self, id: SlotId, x: i32, y: i32) {
        self.journal.push(Op::Position(id, x, y));
    }

    fn set_size(&mut self, id: SlotId, width: i32, height: i32) {
        self.journal.push(Op::Size(id, width, height));
    }

    fn set_visible(&mut self, id: SlotId, visible: bool) {
        self.journal.push(Op::Visible(id, visible));
    }

    fn set_animations(&mut self, id: SlotId, animations: &AnimationDescriptor) {
        self.journal
            .push(Op::Animations(id, animations.to_host_pairs()));
    }
}

/// Library that answers every query with the same movie list and records
/// the requests it saw.
#[derive(Debug, Default)]
pub struct StaticLibrary {
    pub fanart: Vec<String>,
    pub requests: Mutex<Vec<String>>,
    pub fail: bool,
}

impl StaticLibrary {
    pub fn with_images(n: usize) -> Self {
        Self {
            fanart: (0..n).map(|i| format!("image://fanart-{i}.jpg/")).collect(),
            ..Self::default()
        }
    }
}

impl JsonRpc for StaticLibrary {
    fn execute_json_rpc(&self, request: &str) -> Result<String> {
        self.requests.lock().unwrap().push(request.to_string());
        if self.fail {
            bail!("library unavailable");
        }
        let entries: Vec<_> = self.fanart.iter().map(|f| json!({ "fanart": f })).collect();
        Ok(json!({
            "id": 0,
            "jsonrpc": "2.0",
            "result": { "movies": entries, "artists": entries, "albums": entries }
        })
        .to_string())
    }
}

/// Listing that always fails.
#[derive(Debug, Default)]
pub struct NoListing;

impl DirectoryListing for NoListing {
    fn list_directory(&self, path: &Path) -> Result<(Vec<String>, Vec<String>)> {
        bail!("no listing for {}", path.display())
    }
}

pub fn config(mode: Mode) -> Configuration {
    Configuration {
        mode,
        source: SourceKind::MovieFanart,
        shuffle_seed: Some(7),
        ..Configuration::default()
    }
}

pub fn movie_source(library: Arc<StaticLibrary>) -> ImageSource {
    ImageSource::new(SourceKind::MovieFanart, None, library, Arc::new(NoListing))
}
