use std::io::Write;

use tracing::info;

use crate::error::Error;
use crate::Track;

pub const CSV_HEADER: &str = "ObjectID,Label,FrameStart,FrameEnd,AvgConfidence";

/// Writes one row per track under [`CSV_HEADER`], confidence with three
/// decimals.
pub fn write_csv<W: Write>(tracks: &[Track], mut out: W) -> Result<(), Error> {
    writeln!(out, "{}", CSV_HEADER)?;

    for t in tracks {
        writeln!(
            out,
            "{},{},{},{},{:.3}",
            t.id, t.label, t.first_frame, t.last_frame, t.avg_confidence
        )?;
    }

    out.flush()?;
    Ok(())
}

pub fn to_csv(tracks: &[Track]) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_csv(tracks, &mut buf);

    String::from_utf8_lossy(&buf).into_owned()
}

/// Full track list including trajectories.
pub fn write_json<W: Write>(tracks: &[Track], out: W) -> Result<(), Error> {
    serde_json::to_writer_pretty(out, tracks)?;
    Ok(())
}

pub fn export_file(tracks: &[Track], path: &std::path::Path, json: bool) -> Result<(), Error> {
    let file = std::io::BufWriter::new(std::fs::File::create(path)?);

    if json {
        write_json(tracks, file)?;
    } else {
        write_csv(tracks, file)?;
    }

    info!("exported {} tracks to {}", tracks.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::Scene;

    fn tracks() -> Vec<Track> {
        Scene::generate(&SceneConfig::default())
            .unwrap()
            .tracks()
            .to_vec()
    }

    #[test]
    fn six_tracks_make_seven_lines() {
        let csv = to_csv(&tracks());
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "OBJ-001,Vehicle,0,119,0.940");
        assert_eq!(lines[4], "OBJ-004,Ship,0,100,0.920");
    }

    #[test]
    fn confidence_has_three_decimals() {
        for line in to_csv(&tracks()).lines().skip(1) {
            let conf = line.rsplit(',').next().unwrap();
            let (_, frac) = conf.split_once('.').unwrap();
            assert_eq!(frac.len(), 3, "{}", line);
        }
    }

    #[test]
    fn empty_list_is_header_only() {
        assert_eq!(to_csv(&[]), format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn json_round_trips_ids() {
        let tracks = tracks();
        let mut buf = Vec::new();
        write_json(&tracks, &mut buf).unwrap();

        let back: Vec<Track> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back.len(), tracks.len());
        assert_eq!(back[2].id, "OBJ-003");
        assert_eq!(back[2].trajectory.len(), 120);
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracking_results.csv");
        export_file(&tracks(), &path, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 7);
    }
}
