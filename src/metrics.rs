//! Display-only evaluation figures. None of these are computed from the
//! scene except the per-track summaries and feature rows.

use rand::Rng;
use serde_derive::Serialize;

use crate::math;
use crate::track::{LABELS, OBJECT_COLORS};
use crate::{Scene, Track};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TrackingMetrics {
    pub mota: f32,
    pub motp: f32,
    pub id_switches: u32,
    pub track_continuity: f32,
    pub fps: u32,
    pub total_frames: u32,
    /// seconds
    pub processing_time: f32,
}

impl TrackingMetrics {
    pub fn for_scene(scene: &Scene) -> Self {
        Self {
            mota: 78.4,
            motp: 82.1,
            id_switches: 3,
            track_continuity: 96.2,
            fps: 24,
            total_frames: scene.total_frames(),
            processing_time: 4.8,
        }
    }

    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("MOTA", format!("{}%", self.mota)),
            ("MOTP", format!("{}%", self.motp)),
            ("ID Switches", self.id_switches.to_string()),
            ("Track Continuity", format!("{}%", self.track_continuity)),
            ("Processing FPS", self.fps.to_string()),
        ]
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClassCount {
    pub name: &'static str,
    pub count: u32,
    pub color: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DetectionStats {
    pub total_detections: u32,
    pub avg_confidence: f32,
    pub class_distribution: Vec<ClassCount>,
}

impl Default for DetectionStats {
    fn default() -> Self {
        let class = |name, count, color: usize| ClassCount {
            name,
            count,
            color: OBJECT_COLORS[color],
        };

        Self {
            total_detections: 684,
            avg_confidence: 0.89,
            class_distribution: vec![
                class(LABELS[0], 312, 0),
                class(LABELS[1], 98, 2),
                class(LABELS[2], 105, 3),
                class(LABELS[3], 89, 1),
                class(LABELS[4], 80, 5),
            ],
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub metric: &'static str,
    pub deep_sort: f32,
    pub byte_track: f32,
}

pub fn algorithm_comparison() -> [Comparison; 5] {
    let row = |metric, deep_sort, byte_track| Comparison {
        metric,
        deep_sort,
        byte_track,
    };

    [
        row("MOTA (%)", 78.4, 81.2),
        row("MOTP (%)", 82.1, 79.8),
        row("ID Switches", 3.0, 2.0),
        row("FPS", 24.0, 30.0),
        row("Track Continuity (%)", 96.2, 97.1),
    ]
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PerformanceSample {
    pub frame: u32,
    pub accuracy: f32,
    /// ms per frame
    pub processing_time: f32,
    pub object_count: u32,
}

/// Twelve samples, one every ten frames.
pub fn performance_over_frames<R: Rng>(rng: &mut R) -> Vec<PerformanceSample> {
    (1..=12)
        .map(|i| PerformanceSample {
            frame: i * 10,
            accuracy: math::spread(rng, 85.0, 10.0),
            processing_time: math::spread(rng, 30.0, 20.0),
            object_count: rng.random_range(3..=6),
        })
        .collect()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TrackSummary {
    pub id: String,
    pub label: String,
    pub first_frame: u32,
    pub last_frame: u32,
    pub track_length: u32,
    pub avg_confidence: f32,
}

impl From<&Track> for TrackSummary {
    fn from(t: &Track) -> Self {
        Self {
            id: t.id.clone(),
            label: t.label.clone(),
            first_frame: t.first_frame,
            last_frame: t.last_frame,
            track_length: t.track_length(),
            avg_confidence: t.avg_confidence,
        }
    }
}

pub fn summarize(scene: &Scene) -> Vec<TrackSummary> {
    scene.tracks().iter().map(TrackSummary::from).collect()
}

/// Appearance and motion features of one track at the end of its
/// trajectory.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub id: String,
    pub label: String,
    pub color: String,
    pub position: (f32, f32),
    /// Displacement between the last two samples, percent per frame
    pub velocity: (f32, f32),
    pub embedding_norm: f32,
    pub avg_confidence: f32,
}

impl FeatureRow {
    /// `None` for a track without samples. A single sample has zero
    /// velocity.
    pub fn from_track<R: Rng>(track: &Track, rng: &mut R) -> Option<Self> {
        let n = track.trajectory.len();
        let last = track.trajectory.last()?.point();
        let prev = track.trajectory[n.saturating_sub(2)].point();
        let v = last - prev;

        Some(Self {
            id: track.id.clone(),
            label: track.label.clone(),
            color: track.color.clone(),
            position: (last.x, last.y),
            velocity: (v.x, v.y),
            embedding_norm: math::spread(rng, 0.8, 0.15),
            avg_confidence: track.avg_confidence,
        })
    }
}

pub fn features<R: Rng>(scene: &Scene, rng: &mut R) -> Vec<FeatureRow> {
    scene
        .tracks()
        .iter()
        .filter_map(|t| FeatureRow::from_track(t, rng))
        .collect()
}
