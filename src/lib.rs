pub mod bbox;
pub mod config;
pub mod detection;
pub mod error;
pub mod export;
pub mod frame;
pub mod math;
pub mod metrics;
pub mod playback;
pub mod render;
pub mod scene;
pub mod stage;
pub mod trajectory;

mod track;

pub use detection::Detection;
pub use frame::Frame;
pub use playback::{Playback, PlaybackState};
pub use scene::Scene;
pub use track::{default_specs, Track, TrackSpec, LABELS, OBJECT_COLORS};
pub use trajectory::TrajectoryPoint;

/// Read side of a simulated sequence, as consumed by views.
pub trait Tracking {
    fn total_frames(&self) -> u32;
    fn detections(&self, frame: u32) -> Vec<Detection>;
    fn tracks(&self) -> &[Track];
}

impl crate::Tracking for Scene {
    #[inline]
    fn total_frames(&self) -> u32 {
        Scene::total_frames(self)
    }

    #[inline]
    fn detections(&self, frame: u32) -> Vec<Detection> {
        self.detections_at(frame)
    }

    #[inline]
    fn tracks(&self) -> &[Track] {
        Scene::tracks(self)
    }
}
