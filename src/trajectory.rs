use nalgebra as na;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use crate::math;

/// Per-step velocity perturbation range.
const ACCEL_SCALE: f32 = 0.5;

/// One position sample, `frame` is relative to the track's first frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub frame: u32,
    pub x: f32,
    pub y: f32,
}

impl TrajectoryPoint {
    #[inline]
    pub fn new(frame: u32, pos: na::Point2<f32>) -> Self {
        Self {
            frame,
            x: pos.x,
            y: pos.y,
        }
    }

    #[inline(always)]
    pub fn point(&self) -> na::Point2<f32> {
        na::Point2::new(self.x, self.y)
    }
}

/// Random-acceleration walk starting at `start`, one sample per frame.
///
/// The velocity starts as a uniform draw scaled by `speed` and is nudged by a
/// small uniform delta on each step; positions are clamped into the visible
/// margin after every step, so paths bounce off the edges.
pub fn generate<R: Rng>(
    rng: &mut R,
    start: na::Point2<f32>,
    frames: u32,
    speed: f32,
) -> Vec<TrajectoryPoint> {
    let mut pos = start;
    let mut vel = math::random_vector(rng, speed);

    (0..frames)
        .map(|i| {
            vel += math::random_vector(rng, ACCEL_SCALE);
            pos = math::clamp_to_margin(pos + vel);

            TrajectoryPoint::new(i, pos)
        })
        .collect()
}
