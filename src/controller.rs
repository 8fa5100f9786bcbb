//! Screensaver session: image cycling, slot rotation, pacing and teardown.

use std::fmt;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::select;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{Configuration, MAX_WAIT_CHUNK};
use crate::cycle::ImageCycle;
use crate::effects::{EffectStrategy, Profile, strategy_for};
use crate::error::Error;
use crate::geometry::Rect;
use crate::slots::SlotPool;
use crate::source::{ImageLocator, ImageSource};
use crate::window::{SlotId, Window};

/// Lifecycle of one session. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Stopping,
    Terminated,
}

impl SessionState {
    fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Stopping => "stopping",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deactivation callback handed to the host. Stopping is idempotent and
/// can't be undone.
#[derive(Debug, Clone)]
pub struct StopHandle {
    cancel: CancellationToken,
}

impl StopHandle {
    /// Request deactivation. The running loop notices within one wait chunk.
    pub fn stop(&self) {
        if !self.cancel.is_cancelled() {
            info!("screensaver deactivation requested");
        }
        self.cancel.cancel();
    }
}

/// One screensaver activation.
///
/// Construction shows the window with the mode's background and the hidden
/// preload slot. [`Screensaver::run`] fetches images, allocates and arranges
/// the slot pool, then cycles until stopped. Every slot is released when
/// the run ends, on [`Screensaver::close`], or on drop.
pub struct Screensaver<W: Window> {
    window: W,
    strategy: Box<dyn EffectStrategy>,
    profile: Profile,
    source: ImageSource,
    pool: SlotPool,
    background: Option<SlotId>,
    preload: Option<SlotId>,
    aspect_ratio: f64,
    wait_chunk: Duration,
    rng: StdRng,
    cancel: CancellationToken,
    state: SessionState,
    shown: usize,
}

impl<W: Window> fmt::Debug for Screensaver<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screensaver")
            .field("mode", &self.strategy.mode())
            .field("state", &self.state)
            .field("slots", &self.pool.len())
            .field("shown", &self.shown)
            .finish_non_exhaustive()
    }
}

impl<W: Window> Screensaver<W> {
    /// Session for `cfg.mode`, using its strategy from [`strategy_for`].
    pub fn new(cfg: &Configuration, source: ImageSource, window: W) -> Self {
        Self::with_strategy(cfg, strategy_for(cfg.mode), source, window)
    }

    /// Session driven by a caller-supplied strategy. Shows the window and
    /// attaches the background and preload slots.
    pub fn with_strategy(
        cfg: &Configuration,
        strategy: Box<dyn EffectStrategy>,
        source: ImageSource,
        mut window: W,
    ) -> Self {
        let profile = strategy.profile();
        let rng = match cfg.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let wait_chunk = if cfg.wait_chunk.is_zero() {
            MAX_WAIT_CHUNK
        } else {
            cfg.wait_chunk.min(MAX_WAIT_CHUNK)
        };

        window.show();
        let backdrop = ImageLocator::new(
            cfg.media_dir
                .join(profile.background)
                .to_string_lossy()
                .into_owned(),
        );
        let background = window.create_slot(Rect::full_screen(), Some(&backdrop));
        window.attach(background);
        // Off-screen 1×1 control used only to warm the host's image cache.
        let preload = window.create_slot(Rect::new(-1, -1, 1, 1), None);
        window.attach(preload);

        info!(
            mode = %strategy.mode(),
            source = %source.kind(),
            slots = profile.slot_count,
            pace_ms = profile.pace.as_millis() as u64,
            "screensaver initialised"
        );

        Self {
            window,
            strategy,
            profile,
            source,
            pool: SlotPool::default(),
            background: Some(background),
            preload: Some(preload),
            aspect_ratio: cfg.image_aspect_ratio,
            wait_chunk,
            rng,
            cancel: CancellationToken::new(),
            state: SessionState::Idle,
            shown: 0,
        }
    }

    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            cancel: self.cancel.clone(),
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn window(&self) -> &W {
        &self.window
    }

    #[must_use]
    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    /// Images placed on screen so far.
    #[must_use]
    pub fn images_shown(&self) -> usize {
        self.shown
    }

    /// Run the session until stopped, then tear it down.
    ///
    /// # Errors
    /// Returns [`Error::InvalidState`] if the session was already started.
    pub async fn run(&mut self) -> Result<(), Error> {
        if self.state != SessionState::Idle {
            return Err(Error::InvalidState {
                action: "start",
                state: self.state.as_str(),
            });
        }
        self.transition(SessionState::Active);

        let source = self.source.clone();
        let images = match tokio::task::spawn_blocking(move || source.fetch()).await {
            Ok(images) => images,
            Err(err) => {
                warn!("image source task failed: {err}");
                Vec::new()
            }
        };
        let mut cycle = ImageCycle::shuffled(images, &mut self.rng);

        self.pool = SlotPool::allocate(self.profile.slot_count, &mut self.window);
        self.strategy
            .arrange(&mut self.pool, &mut self.rng, &mut self.window);

        self.cycle_images(&mut cycle).await;
        self.close();
        Ok(())
    }

    async fn cycle_images(&mut self, cycle: &mut ImageCycle) {
        let Some(mut image) = cycle.advance().cloned() else {
            warn!("no images available; leaving immediately");
            return;
        };
        info!(images = cycle.len(), "cycling images");

        while !self.cancel.is_cancelled() {
            let Some(slot_id) = self.pool.next_slot() else {
                warn!("no slots allocated; leaving immediately");
                break;
            };
            let Some(slot) = self.pool.get(slot_id) else {
                break;
            };
            let layout = self
                .strategy
                .layout(slot, &image, self.aspect_ratio, &mut self.rng);
            debug!(slot = slot_id.0, image = %image, geometry = ?layout.geometry, "placing image");
            self.pool.apply(
                slot_id,
                &image,
                &layout,
                !self.profile.fixed_paint_order,
                &mut self.window,
            );
            self.shown += 1;

            if let Some(next) = cycle.advance() {
                image = next.clone();
                self.preload(&image);
            }

            if self.shown <= self.profile.fast_start {
                continue;
            }
            if !pace(&self.cancel, self.profile.pace, self.wait_chunk).await {
                break;
            }
        }
        self.transition(SessionState::Stopping);
    }

    /// Hand the next image to the hidden preload slot; the host loads it in
    /// the background.
    fn preload(&mut self, image: &ImageLocator) {
        if let Some(id) = self.preload {
            self.window.set_image(id, Some(image));
        }
    }

    /// Release every slot and the window. Safe to call more than once.
    pub fn close(&mut self) {
        if self.state == SessionState::Terminated {
            return;
        }
        self.cancel.cancel();
        if self.state != SessionState::Stopping {
            self.transition(SessionState::Stopping);
        }
        self.pool.release(&mut self.window);
        for id in [self.preload.take(), self.background.take()]
            .into_iter()
            .flatten()
        {
            self.window.detach(id);
            self.window.destroy_slot(id);
        }
        self.window.close();
        self.transition(SessionState::Terminated);
        info!(shown = self.shown, "screensaver terminated");
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = %self.state, to = %next, "session state");
        self.state = next;
    }
}

/// Wait `total` in increments of at most `chunk`. Returns `false` as soon as
/// stop is requested, `true` once the full wait has elapsed.
pub async fn pace(cancel: &CancellationToken, total: Duration, chunk: Duration) -> bool {
    let chunk = if chunk.is_zero() { MAX_WAIT_CHUNK } else { chunk };
    let mut remaining = total;
    while !remaining.is_zero() {
        if cancel.is_cancelled() {
            debug!("wait aborted");
            return false;
        }
        let step = remaining.min(chunk);
        select! {
            _ = cancel.cancelled() => {
                debug!("wait aborted");
                return false;
            }
            _ = sleep(step) => {}
        }
        remaining -= step;
    }
    !cancel.is_cancelled()
}

impl<W: Window> Drop for Screensaver<W> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn pace_waits_the_full_duration_in_chunks() {
        let cancel = CancellationToken::new();
        let started = Instant::now();
        assert!(pace(&cancel, Duration::from_millis(1200), Duration::from_millis(500)).await);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1200), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1210), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn pace_returns_early_once_cancelled() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(700)).await;
            trigger.cancel();
        });
        let started = Instant::now();
        assert!(!pace(&cancel, Duration::from_secs(10), Duration::from_millis(500)).await);
        assert!(started.elapsed() < Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn zero_pace_completes_immediately() {
        let cancel = CancellationToken::new();
        assert!(pace(&cancel, Duration::ZERO, MAX_WAIT_CHUNK).await);
        cancel.cancel();
        assert!(!pace(&cancel, Duration::ZERO, MAX_WAIT_CHUNK).await);
    }
}
