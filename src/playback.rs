//! Frame playback driver.
//!
//! A [`Playback`] owns the current frame counter of one view. While playing,
//! a tokio task advances the counter at a fixed period and wraps back to the
//! first frame after the last one. The task lives inside a [`Ticker`] guard,
//! so pausing, dropping the driver or dropping the runtime all stop it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Playing,
}

/// Frame that follows `frame` in a looping sequence of `total` frames.
#[inline]
pub fn next_frame(frame: u32, total: u32) -> u32 {
    if frame >= total.saturating_sub(1) {
        0
    } else {
        frame + 1
    }
}

/// Owns the periodic task; stops it when dropped.
struct Ticker {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Ticker {
    fn spawn(frame: Arc<watch::Sender<u32>>, total: u32, period: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        frame.send_modify(|f| *f = next_frame(*f, total));
                        debug!("tick -> frame {}", *frame.borrow());
                    }
                }
            }
        });

        Self { shutdown, handle }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
        self.handle.abort();
    }
}

pub struct Playback {
    frame: Arc<watch::Sender<u32>>,
    total_frames: u32,
    period: Duration,
    ticker: Option<Ticker>,
}

impl Playback {
    /// A paused driver at frame 0. `total_frames` is raised to at least 1
    /// and `period` to at least 1 ms.
    pub fn new(total_frames: u32, period: Duration) -> Self {
        let (frame, _) = watch::channel(0);

        Self {
            frame: Arc::new(frame),
            total_frames: total_frames.max(1),
            period: period.max(Duration::from_millis(1)),
            ticker: None,
        }
    }

    #[inline]
    pub fn frame(&self) -> u32 {
        *self.frame.borrow()
    }

    #[inline]
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        if self.ticker.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.ticker.is_some()
    }

    /// Receiver notified on every frame change.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.frame.subscribe()
    }

    /// Starts ticking. Must be called within a tokio runtime; no-op while
    /// already playing.
    pub fn play(&mut self) {
        if self.ticker.is_some() {
            return;
        }

        info!("playback started at frame {} ({:?}/frame)", self.frame(), self.period);
        self.ticker = Some(Ticker::spawn(
            Arc::clone(&self.frame),
            self.total_frames,
            self.period,
        ));
    }

    pub fn pause(&mut self) {
        if self.ticker.take().is_some() {
            info!("playback paused at frame {}", self.frame());
        }
    }

    pub fn toggle(&mut self) -> PlaybackState {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }

        self.state()
    }

    /// Moves to `frame`, clamped to the sequence.
    pub fn seek(&self, frame: u32) -> u32 {
        let frame = frame.min(self.total_frames - 1);
        self.frame.send_replace(frame);

        frame
    }

    pub fn step_forward(&self) -> u32 {
        self.seek(self.frame().saturating_add(1))
    }

    pub fn step_back(&self) -> u32 {
        self.seek(self.frame().saturating_sub(1))
    }
}

impl Drop for Playback {
    fn drop(&mut self) {
        self.pause();
    }
}
