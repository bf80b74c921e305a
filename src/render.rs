//! Pure renderers from scene state to drawing commands.
//!
//! Nothing here touches a graphics API: a front end replays the returned
//! [`DrawCommand`]s in order on its own canvas.

use serde_derive::Serialize;

use crate::bbox::{BBox, Ltwh};
use crate::config::CanvasConfig;
use crate::math::to_pixels;
use crate::{Detection, Scene};

pub const BACKGROUND: &str = "hsl(222, 22%, 11%)";
pub const GRID: &str = "hsl(220, 18%, 16%)";
pub const LABEL_TEXT: &str = "#fff";
pub const LABEL_FONT: &str = "9px monospace";
/// Smallest grid spacing drawn, in px.
pub const MIN_GRID_STEP: f32 = 1.0;

const GRID_WIDTH: f32 = 0.5;
const TRAIL_WIDTH: f32 = 2.0;
const TRAIL_ALPHA: f32 = 0.6;
const BOX_WIDTH: f32 = 2.0;
const TRACK_BOX: (f32, f32) = (30.0, 20.0);
const PLATE: (f32, f32) = (40.0, 12.0);

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    FillRect {
        rect: BBox<Ltwh>,
        color: String,
    },
    StrokeRect {
        rect: BBox<Ltwh>,
        color: String,
        line_width: f32,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: String,
        line_width: f32,
    },
    Polyline {
        points: Vec<(f32, f32)>,
        color: String,
        line_width: f32,
        alpha: f32,
    },
    Text {
        at: (f32, f32),
        text: String,
        color: String,
        font: String,
    },
}

/// Bird's-eye tracking canvas for `frame`: background, grid, then for every
/// track that has started a fading trail, its box and an id plate.
pub fn tracking_view(scene: &Scene, frame: u32, canvas: &CanvasConfig) -> Vec<DrawCommand> {
    let (w, h) = (canvas.width, canvas.height);
    let mut cmds = vec![
        DrawCommand::Clear {
            width: w,
            height: h,
        },
        DrawCommand::FillRect {
            rect: BBox::ltwh(0.0, 0.0, w, h),
            color: BACKGROUND.into(),
        },
    ];

    grid(&mut cmds, canvas);

    for track in scene.tracks() {
        let end = match track.head_index(frame) {
            Some(end) => end,
            None => continue,
        };
        let start = end.saturating_sub(canvas.trail_len);

        let points = track.trajectory[start..=end]
            .iter()
            .map(|pt| (to_pixels(pt.x, w), to_pixels(pt.y, h)))
            .collect::<Vec<_>>();
        let (cx, cy) = points[points.len() - 1];

        cmds.push(DrawCommand::Polyline {
            points,
            color: track.color.clone(),
            line_width: TRAIL_WIDTH,
            alpha: TRAIL_ALPHA,
        });

        cmds.push(DrawCommand::StrokeRect {
            rect: BBox::xywh(cx, cy, TRACK_BOX.0, TRACK_BOX.1).as_ltwh(),
            color: track.color.clone(),
            line_width: BOX_WIDTH,
        });

        let plate_top = cy - TRACK_BOX.1 / 2.0 - PLATE.1;
        cmds.push(DrawCommand::FillRect {
            rect: BBox::ltwh(cx - TRACK_BOX.0 / 2.0, plate_top, PLATE.0, PLATE.1),
            color: track.color.clone(),
        });

        cmds.push(DrawCommand::Text {
            at: (cx - TRACK_BOX.0 / 2.0 + 2.0, plate_top + 9.0),
            text: track.id.clone(),
            color: LABEL_TEXT.into(),
            font: LABEL_FONT.into(),
        });
    }

    cmds
}

fn grid(cmds: &mut Vec<DrawCommand>, canvas: &CanvasConfig) {
    let (w, h) = (canvas.width, canvas.height);
    let step = canvas.grid_step.max(MIN_GRID_STEP);
    let lines = |len: f32| (0..(len / step).ceil() as usize).map(move |i| i as f32 * step);

    for x in lines(w) {
        cmds.push(DrawCommand::Line {
            from: (x, 0.0),
            to: (x, h),
            color: GRID.into(),
            line_width: GRID_WIDTH,
        });
    }

    for y in lines(h) {
        cmds.push(DrawCommand::Line {
            from: (0.0, y),
            to: (w, y),
            color: GRID.into(),
            line_width: GRID_WIDTH,
        });
    }
}

/// Bounding-box overlay in percent units, one box and caption per detection.
pub fn detection_view(detections: &[Detection]) -> Vec<DrawCommand> {
    let mut cmds = Vec::with_capacity(detections.len() * 2);

    for det in detections {
        let rect = det.corner_bbox();

        cmds.push(DrawCommand::StrokeRect {
            rect,
            color: det.color.clone(),
            line_width: BOX_WIDTH,
        });
        cmds.push(DrawCommand::Text {
            at: (rect.left(), rect.top()),
            text: det.caption(),
            color: LABEL_TEXT.into(),
            font: LABEL_FONT.into(),
        });
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;

    fn scene() -> Scene {
        Scene::generate(&SceneConfig::default()).unwrap()
    }

    fn count(cmds: &[DrawCommand], pred: impl Fn(&DrawCommand) -> bool) -> usize {
        cmds.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn starts_with_background_and_grid() {
        let canvas = CanvasConfig::default();
        let cmds = tracking_view(&scene(), 0, &canvas);

        assert!(matches!(cmds[0], DrawCommand::Clear { .. }));
        assert!(matches!(&cmds[1], DrawCommand::FillRect { color, .. } if color == BACKGROUND));

        // 640 / 30 -> 22 vertical lines, 400 / 30 -> 14 horizontal
        assert_eq!(count(&cmds, |c| matches!(c, DrawCommand::Line { .. })), 36);
    }

    #[test]
    fn grid_line_count_is_bounded() {
        let s = scene();
        let exact = CanvasConfig {
            width: 600.0,
            height: 300.0,
            ..CanvasConfig::default()
        };
        let is_line = |c: &DrawCommand| matches!(c, DrawCommand::Line { .. });

        assert_eq!(count(&tracking_view(&s, 0, &exact), is_line), 20 + 10);

        let tiny = CanvasConfig {
            width: 40.0,
            height: 40.0,
            grid_step: 1e-6,
            ..CanvasConfig::default()
        };
        assert_eq!(count(&tracking_view(&s, 0, &tiny), is_line), 80);
    }

    #[test]
    fn draws_only_started_tracks() {
        let s = scene();
        let canvas = CanvasConfig::default();

        // OBJ-001 and OBJ-004 start at frame 0
        let cmds = tracking_view(&s, 0, &canvas);
        assert_eq!(count(&cmds, |c| matches!(c, DrawCommand::StrokeRect { .. })), 2);

        let cmds = tracking_view(&s, 119, &canvas);
        assert_eq!(count(&cmds, |c| matches!(c, DrawCommand::StrokeRect { .. })), 6);
    }

    #[test]
    fn trail_is_bounded() {
        let s = scene();
        let canvas = CanvasConfig::default();

        for frame in [0, 5, 31, 80, 119] {
            for cmd in tracking_view(&s, frame, &canvas) {
                if let DrawCommand::Polyline { points, alpha, .. } = cmd {
                    assert!(!points.is_empty());
                    assert!(points.len() <= canvas.trail_len + 1);
                    assert_eq!(alpha, TRAIL_ALPHA);
                }
            }
        }
    }

    #[test]
    fn box_is_centered_on_current_sample() {
        let s = scene();
        let canvas = CanvasConfig::default();
        let t = s.track("OBJ-001").unwrap();
        let pt = t.trajectory[60];

        let rect = tracking_view(&s, 60, &canvas)
            .into_iter()
            .find_map(|c| match c {
                DrawCommand::StrokeRect { rect, color, .. } if color == t.color => Some(rect),
                _ => None,
            })
            .unwrap();

        let center = rect.as_xywh();
        assert!((center.cx() - to_pixels(pt.x, canvas.width)).abs() < 1e-3);
        assert!((center.cy() - to_pixels(pt.y, canvas.height)).abs() < 1e-3);
        assert_eq!((rect.width(), rect.height()), TRACK_BOX);
    }

    #[test]
    fn detection_overlay_has_box_and_caption_per_detection() {
        let s = scene();
        let dets = s.detections_at(50);
        let cmds = detection_view(&dets);

        assert_eq!(cmds.len(), dets.len() * 2);
        for (det, pair) in dets.iter().zip(cmds.chunks(2)) {
            match &pair[0] {
                DrawCommand::StrokeRect { rect, .. } => {
                    assert!((rect.left() - (det.x - det.w / 2.0)).abs() < 1e-4);
                    assert!((rect.top() - (det.y - det.h / 2.0)).abs() < 1e-4);
                }
                other => panic!("unexpected {:?}", other),
            }
            assert!(matches!(
                &pair[1],
                DrawCommand::Text { text, .. } if text.starts_with(&det.label)
            ));
        }
    }

    #[test]
    fn commands_serialize_with_op_tag() {
        let cmds = tracking_view(&scene(), 10, &CanvasConfig::default());
        let json = serde_json::to_value(&cmds).unwrap();
        assert_eq!(json[0]["op"], "clear");
        assert_eq!(json[1]["op"], "fill_rect");
    }
}
