use serde_derive::Serialize;
use std::fmt;

/// Dashboard views, in pipeline order.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Overview,
    VideoInput,
    Detection,
    FeatureExtraction,
    Tracking,
    Results,
    Architecture,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Overview,
        Stage::VideoInput,
        Stage::Detection,
        Stage::FeatureExtraction,
        Stage::Tracking,
        Stage::Results,
        Stage::Architecture,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Stage::Overview => "/",
            Stage::VideoInput => "/video-input",
            Stage::Detection => "/detection",
            Stage::FeatureExtraction => "/features",
            Stage::Tracking => "/tracking",
            Stage::Results => "/results",
            Stage::Architecture => "/architecture",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Stage::Overview => "Remote Sensing Video Tracking",
            Stage::VideoInput => "Video Input Module",
            Stage::Detection => "Object Detection Module",
            Stage::FeatureExtraction => "Feature Extraction & Fusion",
            Stage::Tracking => "Multi-Object Tracking",
            Stage::Results => "Results & Export",
            Stage::Architecture => "System Architecture",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_unique() {
        for (i, a) in Stage::ALL.iter().enumerate() {
            for b in &Stage::ALL[i + 1..] {
                assert_ne!(a.path(), b.path());
            }
        }
        assert_eq!(Stage::Tracking.to_string(), "Multi-Object Tracking");
    }
}
