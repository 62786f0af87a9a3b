//! CLI tool for inspecting, exporting and replaying cloud logs.
//!
//! # Usage
//!
//! ```bash
//! cloudlog info capture.cloudlog
//! cloudlog info --verbose --strict capture.cloudlog
//! cloudlog export capture.cloudlog --output points.csv
//! cloudlog replay capture.cloudlog --speed 1.0
//! cloudlog synth ring.cloudlog --frames 50 --points 360 --period-ms 100
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use cloudlog::synthetic::ring_cloud;
use cloudlog::{
    CloudLogConfig, CloudPlayer, CloudRecorder, LogInfo, ManualClock, Point3D, TruncationPolicy,
};

#[derive(Parser)]
#[command(name = "cloudlog")]
#[command(about = "Inspect, export and replay point-cloud logs")]
struct Args {
    /// Configuration file (default: ./cloudlog.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Display information about a log file
    Info {
        /// Log file
        file: PathBuf,

        /// Show the first frames
        #[arg(short, long)]
        verbose: bool,

        /// Fail on a truncated trailing frame
        #[arg(long)]
        strict: bool,
    },
    /// Export every point to CSV (frame,timestamp_ms,x,y,z)
    Export {
        /// Log file
        file: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Fail on a truncated trailing frame
        #[arg(long)]
        strict: bool,
    },
    /// Replay a log, printing one line per frame
    Replay {
        /// Log file
        file: PathBuf,

        /// Playback speed (0 = as fast as possible, 1 = real time)
        #[arg(short, long)]
        speed: Option<f32>,

        /// Fail on a truncated trailing frame
        #[arg(long)]
        strict: bool,
    },
    /// Record a synthetic rotating ring scan
    Synth {
        /// Output log file
        file: PathBuf,

        /// Number of frames
        #[arg(long, default_value = "50")]
        frames: usize,

        /// Points per frame
        #[arg(long, default_value = "360")]
        points: usize,

        /// Time between frames in milliseconds
        #[arg(long, default_value = "100")]
        period_ms: u64,
    },
}

fn main() {
    let args = Args::parse();

    let config = match CloudLogConfig::discover(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if let Err(e) = run(args.command, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command, config: &CloudLogConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Info {
            file,
            verbose,
            strict,
        } => info(&file, verbose, policy(strict, config)),
        Command::Export {
            file,
            output,
            strict,
        } => export(&file, &output, policy(strict, config)),
        Command::Replay {
            file,
            speed,
            strict,
        } => replay(
            &file,
            speed.unwrap_or(config.replay.speed),
            policy(strict, config),
        ),
        Command::Synth {
            file,
            frames,
            points,
            period_ms,
        } => synth(&file, frames, points, Duration::from_millis(period_ms)),
    }
}

/// `--strict` overrides the configured truncation policy.
fn policy(strict: bool, config: &CloudLogConfig) -> TruncationPolicy {
    if strict {
        TruncationPolicy::Error
    } else {
        config.replay.truncation
    }
}

fn load(path: &Path, policy: TruncationPolicy) -> cloudlog::Result<CloudPlayer> {
    let mut player = CloudPlayer::new().with_truncation_policy(policy);
    player.load(path)?;
    Ok(player)
}

fn info(
    path: &Path,
    verbose: bool,
    policy: TruncationPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let player = load(path, policy)?;
    let info = player.info();

    println!("Cloud Log Information");
    println!("=====================");
    println!("File: {}", path.display());
    println!();
    print_summary(&info);

    if let Some((min, max)) = player.frames().iter().map(|f| f.points.len()).fold(
        None,
        |acc: Option<(usize, usize)>, n| match acc {
            Some((min, max)) => Some((min.min(n), max.max(n))),
            None => Some((n, n)),
        },
    ) {
        println!(
            "  Points per frame: min {}, max {}, mean {:.1}",
            min,
            max,
            info.mean_points_per_frame()
        );
    }

    if info.is_truncated() {
        println!(
            "  Truncated trailing frame discarded: {} bytes",
            info.discarded_bytes
        );
    }

    if verbose && !player.is_empty() {
        println!();
        println!("First 5 frames:");
        for (i, frame) in player.frames().iter().take(5).enumerate() {
            let max_range = frame
                .points
                .iter()
                .map(Point3D::norm)
                .fold(0.0f32, f32::max);
            println!(
                "  [{:>3}] {:>10} ms  {:>6} points  max range {:.3}",
                i,
                frame.timestamp_ms,
                frame.points.len(),
                max_range
            );
        }
    }

    Ok(())
}

fn print_summary(info: &LogInfo) {
    println!("  Frames: {}", info.frame_count);
    println!("  Points: {}", info.point_count);
    println!("  Duration: {:.3} seconds", info.duration_secs());
    println!("  Frame rate: {:.1} Hz", info.frame_rate_hz());
    println!(
        "  Size: {} bytes ({:.2} KB, {:.2} MB)",
        info.file_size_bytes,
        info.file_size_bytes as f64 / 1024.0,
        info.file_size_bytes as f64 / 1_048_576.0
    );
}

fn export(
    path: &Path,
    output: &Path,
    policy: TruncationPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let player = load(path, policy)?;

    let mut writer = BufWriter::new(File::create(output)?);
    writeln!(writer, "frame,timestamp_ms,x,y,z")?;
    let mut rows = 0u64;
    for (i, frame) in player.frames().iter().enumerate() {
        for p in &frame.points {
            writeln!(
                writer,
                "{},{},{},{},{}",
                i, frame.timestamp_ms, p.x, p.y, p.z
            )?;
            rows += 1;
        }
    }
    writer.flush()?;

    log::info!(
        "Exported {} points from {} frames to {}",
        rows,
        player.frame_count(),
        output.display()
    );
    Ok(())
}

fn replay(
    path: &Path,
    speed: f32,
    policy: TruncationPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let player = load(path, policy)?;
    let origin = player.origin();

    log::info!(
        "Replaying {} frames from {} (speed {})",
        player.frame_count(),
        path.display(),
        if speed > 0.0 {
            format!("{:.2}x", speed)
        } else {
            "max".to_string()
        }
    );

    let started = Instant::now();
    let mut index = 0usize;
    player.play_paced(
        &mut |stamp: Instant, cloud: &[Point3D]| {
            println!(
                "[{:>5}] t={:>10.3}s  {:>6} points",
                index,
                (stamp - origin).as_secs_f64(),
                cloud.len()
            );
            index += 1;
        },
        speed,
    );

    log::info!(
        "Replayed {} frames in {:.3}s",
        player.frame_count(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

fn synth(
    path: &Path,
    frames: usize,
    points: usize,
    period: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let clock = ManualClock::new();
    let mut recorder = CloudRecorder::with_clock(path, clock.clone());

    for i in 0..frames {
        if i > 0 {
            clock.advance(period);
        }
        recorder.log_owned(ring_cloud(points, 2.0, i as f32 * 0.05));
    }

    let info = recorder.flush()?;
    println!("Wrote {}", path.display());
    print_summary(&info);
    Ok(())
}
