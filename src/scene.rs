use rand::Rng;
use tracing::debug;

use crate::config::SceneConfig;
use crate::error::Error;
use crate::math;
use crate::{Detection, Frame, Track};

/// Box width jitter range, percent of frame
const BOX_W: (f32, f32) = (6.0, 2.0);
/// Box height jitter range, percent of frame
const BOX_H: (f32, f32) = (4.0, 2.0);
/// Full width of the symmetric confidence jitter
const CONFIDENCE_JITTER: f32 = 0.08;

/// The simulated sequence: every track and its trajectory, built once and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct Scene {
    tracks: Vec<Track>,
    total_frames: u32,
    fps: f32,
}

impl Scene {
    pub fn new(tracks: Vec<Track>, total_frames: u32, fps: f32) -> Self {
        Self {
            tracks,
            total_frames,
            fps,
        }
    }

    /// Generates the trajectories described by `cfg`, seeded when
    /// `cfg.seed` is set. Per-frame jitter is drawn separately, see
    /// [`Scene::detections_at_with`].
    pub fn generate(cfg: &SceneConfig) -> Result<Self, Error> {
        Self::generate_with(cfg, &mut math::run_rng(cfg.seed))
    }

    pub fn generate_with<R: Rng>(cfg: &SceneConfig, rng: &mut R) -> Result<Self, Error> {
        if cfg.total_frames == 0 {
            return Err(Error::Config("scene.total_frames must be at least 1".into()));
        }

        if !cfg.fps.is_finite() || cfg.fps <= 0.0 {
            return Err(Error::Config("scene.fps must be positive".into()));
        }

        let mut tracks = Vec::with_capacity(cfg.tracks.len());
        for spec in &cfg.tracks {
            spec.validate()?;
            tracks.push(spec.build(rng, cfg.total_frames));
        }

        debug!(
            "generated {} tracks over {} frames",
            tracks.len(),
            cfg.total_frames
        );

        Ok(Self::new(tracks, cfg.total_frames, cfg.fps))
    }

    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[inline]
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    #[inline]
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    #[inline]
    pub fn timestamp(&self, frame: u32) -> f32 {
        frame as f32 / self.fps
    }

    pub fn active_tracks(&self, frame: u32) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(move |t| t.is_active(frame))
    }

    /// Detections of every track active at `frame`, with fresh jitter.
    pub fn detections_at(&self, frame: u32) -> Vec<Detection> {
        self.detections_at_with(frame, &mut rand::rng())
    }

    pub fn detections_at_with<R: Rng>(&self, frame: u32, rng: &mut R) -> Vec<Detection> {
        self.active_tracks(frame)
            .filter_map(|t| {
                let pt = t.sample_at(frame)?;

                Some(Detection {
                    id: t.id.clone(),
                    label: t.label.clone(),
                    x: pt.x,
                    y: pt.y,
                    w: math::spread(rng, BOX_W.0, BOX_W.1),
                    h: math::spread(rng, BOX_H.0, BOX_H.1),
                    confidence: t.avg_confidence + math::centered(rng, CONFIDENCE_JITTER),
                    color: t.color.clone(),
                })
            })
            .collect()
    }

    pub fn frame(&self, index: u32) -> Frame {
        self.frame_with(index, &mut rand::rng())
    }

    pub fn frame_with<R: Rng>(&self, index: u32, rng: &mut R) -> Frame {
        Frame {
            index,
            detections: self.detections_at_with(index, rng),
            timestamp: self.timestamp(index),
        }
    }
}
