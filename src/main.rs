use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use simtrack::config;
use simtrack::math;
use simtrack::metrics::{self, DetectionStats, TrackingMetrics};
use simtrack::stage::Stage;
use simtrack::{export, render, Playback, Scene};

#[derive(Parser)]
#[command(name = "simtrack", version)]
#[command(about = "Simulated detection and multi-object tracking playback")]
struct Cli {
    /// Config file (defaults to ./simtrack.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for trajectories and jitter
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play the detection view and log each frame's boxes
    Detect {
        #[arg(short, long, default_value = "120")]
        frames: u32,
        #[arg(long, default_value = "0")]
        from: u32,
    },

    /// Play the tracking view and emit drawing commands
    Track {
        #[arg(short, long, default_value = "120")]
        frames: u32,
        #[arg(long)]
        json: bool,
    },

    /// Write the track list to CSV (or JSON)
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },

    /// Print the results table, track features and metrics
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("simtrack=info,warn")),
        )
        .compact()
        .init();

    let cli = Cli::parse();
    let mut cfg = config::load_or_default(cli.config.as_deref());
    if let Some(seed) = cli.seed {
        cfg.scene.seed = Some(seed);
    }

    // one stream for trajectories, jitter and display samples
    let mut rng = math::run_rng(cfg.scene.seed);
    let scene = Arc::new(Scene::generate_with(&cfg.scene, &mut rng)?);
    info!(
        "scene ready: {} tracks, {} frames",
        scene.tracks().len(),
        scene.total_frames()
    );

    match cli.command {
        Command::Detect { frames, from } => {
            info!("{} [{}]", Stage::Detection, Stage::Detection.path());
            let period = cfg.playback.detection_interval();
            play(&scene, period, from, frames, |index| {
                let frame = scene.frame_with(index, &mut rng);
                if frame.is_empty() {
                    info!("frame {} @ {:.2}s: no objects", index, frame.timestamp);
                    return Ok(());
                }

                info!(
                    "frame {} @ {:.2}s: {} objects",
                    index,
                    frame.timestamp,
                    frame.len()
                );
                for d in frame.iter() {
                    info!(
                        "  {} {:<8} ({:5.1}, {:5.1}) {:.1}x{:.1} {:.0}%",
                        d.id, d.label, d.x, d.y, d.w, d.h, d.confidence * 100.0
                    );
                }
                Ok(())
            })
            .await?;
        }

        Command::Track { frames, json } => {
            info!("{} [{}]", Stage::Tracking, Stage::Tracking.path());
            let period = cfg.playback.tracking_interval();
            let canvas = cfg.canvas;
            play(&scene, period, 0, frames, |frame| {
                let cmds = render::tracking_view(&scene, frame, &canvas);
                if json {
                    println!("{}", serde_json::to_string(&cmds)?);
                } else {
                    let active = scene.active_tracks(frame).count();
                    println!(
                        "frame {:>3}: {} commands, {} active tracks",
                        frame,
                        cmds.len(),
                        active
                    );
                }
                Ok(())
            })
            .await?;
        }

        Command::Export { output, json } => {
            let path = output.unwrap_or_else(|| PathBuf::from(&cfg.export.path));
            export::export_file(scene.tracks(), &path, json)?;
            println!("Saved {} tracks → {}", scene.tracks().len(), path.display());
        }

        Command::Summary => print_summary(&scene, &mut rng),
    }

    Ok(())
}

/// Plays `count` frame changes starting at `from`, calling `on_frame` for
/// the start frame and each change. Stops early on Ctrl-C.
async fn play<F>(
    scene: &Scene,
    period: Duration,
    from: u32,
    count: u32,
    mut on_frame: F,
) -> Result<()>
where
    F: FnMut(u32) -> Result<()>,
{
    let mut playback = Playback::new(scene.total_frames(), period);
    on_frame(playback.seek(from))?;

    // subscribed after the seek, so only ticks are seen as changes
    let mut rx = playback.subscribe();
    playback.play();

    for _ in 0..count {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = *rx.borrow_and_update();
                on_frame(frame)?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    playback.pause();
    Ok(())
}

fn print_summary<R: Rng>(scene: &Scene, rng: &mut R) {
    let tm = TrackingMetrics::for_scene(scene);
    let ds = DetectionStats::default();

    println!("{}", Stage::Results);
    println!(
        "  Total Objects: {}  Total Frames: {}  MOTA: {}%  Processing Time: {}s",
        scene.tracks().len(),
        tm.total_frames,
        tm.mota,
        tm.processing_time
    );
    println!();

    println!(
        "{:<10} {:<10} {:>11} {:>10} {:>12} {:>14}",
        "Object ID", "Class", "First Frame", "Last Frame", "Track Length", "Avg Confidence"
    );
    println!("{}", "─".repeat(72));
    for row in metrics::summarize(scene) {
        println!(
            "{:<10} {:<10} {:>11} {:>10} {:>12} {:>13.1}%",
            row.id,
            row.label,
            row.first_frame,
            row.last_frame,
            row.track_length,
            row.avg_confidence * 100.0
        );
    }
    println!();

    println!("{}", Stage::FeatureExtraction);
    println!(
        "{:<10} {:<10} {:>14} {:>14} {:>9} {:>10}",
        "ID", "Class", "Position", "Velocity", "Emb Norm", "Confidence"
    );
    for f in metrics::features(scene, rng) {
        println!(
            "{:<10} {:<10} {:>14} {:>14} {:>9.3} {:>9.1}%",
            f.id,
            f.label,
            format!("({:.1}, {:.1})", f.position.0, f.position.1),
            format!("({:.1}, {:.1})", f.velocity.0, f.velocity.1),
            f.embedding_norm,
            f.avg_confidence * 100.0
        );
    }
    println!();

    println!("Tracking Metrics");
    for (label, value) in tm.rows() {
        println!("  {:<18} {}", label, value);
    }
    println!();

    println!(
        "Detections: {} (avg confidence {:.1}%)",
        ds.total_detections,
        ds.avg_confidence * 100.0
    );
    for class in &ds.class_distribution {
        println!("  {:<10} {:>4}", class.name, class.count);
    }
    println!();

    println!("{:<22} {:>10} {:>10}", "Metric", "Deep SORT", "ByteTrack");
    for row in metrics::algorithm_comparison() {
        println!("{:<22} {:>10} {:>10}", row.metric, row.deep_sort, row.byte_track);
    }
    println!();

    println!("{:>6} {:>9} {:>8} {:>8}", "Frame", "Accuracy", "ms/frame", "Objects");
    for s in metrics::performance_over_frames(rng) {
        println!(
            "{:>6} {:>8.1}% {:>8.1} {:>8}",
            s.frame, s.accuracy, s.processing_time, s.object_count
        );
    }
}
