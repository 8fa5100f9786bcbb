#![deny(unsafe_code)]

//! Fanart screensaver engine.
//!
//! Cycles a pool of artwork images through a fixed set of on-screen slots,
//! animating each entrance with one of five effect modes. The host owns the
//! window, image decoding and animation playback; this crate decides which
//! image goes into which slot, with what geometry and animation, and when.

/// Declarative animation descriptors for the host's animation engine.
pub mod animation;
/// Configuration types and loading/validation helpers.
pub mod config;
/// Session controller: main loop, pacing, teardown.
pub mod controller;
/// Endless replay of the shuffled image list.
pub mod cycle;
/// Per-mode effect strategies.
pub mod effects;
/// Library error type used across modules.
pub mod error;
/// Logical screen geometry.
pub mod geometry;
/// Reusable display slots.
pub mod slots;
/// Image discovery from the media library or a folder.
pub mod source;
/// Boundary to the host's window system.
pub mod window;

pub use config::{Configuration, Mode, SourceKind};
pub use controller::{Screensaver, SessionState, StopHandle};
pub use error::Error;
