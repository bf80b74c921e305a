use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltwh, Xywh};

/// Synthesized per-frame record of one visible track.
///
/// Contains (x,y) of the center and (width,height) of bbox, all in percent of
/// the frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Detection {
    pub id: String,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(rename = "p")]
    pub confidence: f32,
    pub color: String,
}

impl Detection {
    #[inline(always)]
    pub fn bbox(&self) -> BBox<Xywh> {
        BBox::xywh(self.x, self.y, self.w, self.h)
    }

    #[inline]
    pub fn corner_bbox(&self) -> BBox<Ltwh> {
        self.bbox().as_ltwh()
    }

    /// Overlay caption, e.g. `Vehicle 94%`.
    pub fn caption(&self) -> String {
        format!("{} {:.0}%", self.label, self.confidence * 100.0)
    }
}
