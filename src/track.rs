use nalgebra as na;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use crate::error::Error;
use crate::trajectory::{self, TrajectoryPoint};

pub const OBJECT_COLORS: [&str; 6] = [
    "hsl(199, 89%, 48%)", // cyan
    "hsl(162, 63%, 41%)", // green
    "hsl(38, 92%, 50%)",  // amber
    "hsl(0, 84%, 60%)",   // red
    "hsl(270, 70%, 60%)", // purple
    "hsl(330, 80%, 55%)", // pink
];

pub const LABELS: [&str; 5] = ["Vehicle", "Aircraft", "Ship", "Building", "Person"];

/// Simulated object with a stable identity over `[first_frame, last_frame]`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Track {
    pub id: String,
    pub label: String,
    pub color: String,
    pub trajectory: Vec<TrajectoryPoint>,
    pub avg_confidence: f32,
    pub first_frame: u32,
    pub last_frame: u32,
}

impl Track {
    #[inline]
    pub fn is_active(&self, frame: u32) -> bool {
        frame >= self.first_frame && frame <= self.last_frame
    }

    /// Frames in `[first_frame, last_frame]`; 0 for an inverted range.
    #[inline]
    pub fn track_length(&self) -> u32 {
        match self.last_frame.checked_sub(self.first_frame) {
            Some(span) => span.saturating_add(1),
            None => 0,
        }
    }

    /// Trajectory sample for a global frame.
    ///
    /// Offsets past the end of the trajectory (or before the first frame)
    /// fall back to the first sample; `None` only for an empty trajectory.
    pub fn sample_at(&self, frame: u32) -> Option<&TrajectoryPoint> {
        frame
            .checked_sub(self.first_frame)
            .and_then(|offset| self.trajectory.get(offset as usize))
            .or_else(|| self.trajectory.first())
    }

    /// Index of the newest sample drawn for `frame`, clamped to the
    /// trajectory. `None` before the track starts.
    pub fn head_index(&self, frame: u32) -> Option<usize> {
        let offset = frame.checked_sub(self.first_frame)? as usize;
        let last = self.trajectory.len().checked_sub(1)?;

        Some(offset.min(last))
    }
}

/// Recipe for one simulated track; the trajectory is generated from it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackSpec {
    pub id: String,
    pub label: String,
    pub color: String,
    pub start: (f32, f32),
    pub speed: f32,
    pub avg_confidence: f32,
    pub first_frame: u32,
    pub last_frame: u32,
}

impl TrackSpec {
    pub fn validate(&self) -> Result<(), Error> {
        if self.first_frame > self.last_frame {
            return Err(Error::InvalidTrack {
                id: self.id.clone(),
                first: self.first_frame,
                last: self.last_frame,
            });
        }

        Ok(())
    }

    pub fn build<R: Rng>(&self, rng: &mut R, total_frames: u32) -> Track {
        let start = na::Point2::new(self.start.0, self.start.1);

        Track {
            id: self.id.clone(),
            label: self.label.clone(),
            color: self.color.clone(),
            trajectory: trajectory::generate(rng, start, total_frames, self.speed),
            avg_confidence: self.avg_confidence,
            first_frame: self.first_frame,
            last_frame: self.last_frame,
        }
    }
}

fn spec(
    n: usize,
    label: &str,
    start: (f32, f32),
    speed: f32,
    avg_confidence: f32,
    range: (u32, u32),
) -> TrackSpec {
    TrackSpec {
        id: format!("OBJ-{:03}", n + 1),
        label: label.to_string(),
        color: OBJECT_COLORS[n % OBJECT_COLORS.len()].to_string(),
        start,
        speed,
        avg_confidence,
        first_frame: range.0,
        last_frame: range.1,
    }
}

/// The six tracks of the demo scene.
pub fn default_specs() -> Vec<TrackSpec> {
    vec![
        spec(0, "Vehicle", (20.0, 30.0), 1.2, 0.94, (0, 119)),
        spec(1, "Vehicle", (70.0, 60.0), 0.8, 0.91, (5, 115)),
        spec(2, "Aircraft", (50.0, 20.0), 2.0, 0.87, (10, 119)),
        spec(3, "Ship", (30.0, 75.0), 0.5, 0.92, (0, 100)),
        spec(4, "Vehicle", (80.0, 40.0), 1.0, 0.88, (20, 119)),
        spec(5, "Person", (45.0, 55.0), 0.6, 0.82, (15, 110)),
    ]
}
