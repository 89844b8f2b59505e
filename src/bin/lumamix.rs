use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lumamix", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a show offline and print one JSON line per frame.
    Render(RenderArgs),
    /// Print the bounding box of a patch sheet.
    Bounds(BoundsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Show config JSON.
    #[arg(long)]
    show: PathBuf,

    /// Patch sheet JSON.
    #[arg(long)]
    patch: PathBuf,

    /// Number of frames to render.
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Scene time of frame 0, in milliseconds.
    #[arg(long, default_value_t = 0)]
    start_millis: i64,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BoundsArgs {
    /// Patch sheet JSON.
    #[arg(long)]
    patch: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Bounds(args) => cmd_bounds(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = lumamix::ShowConfig::load(&args.show)?;
    let devices = lumamix::load_patch_sheet(&args.patch)?;
    let patch = lumamix::Patch::new(devices)?;
    let mut show = config.build(patch)?;

    let sink: Box<dyn Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = std::fs::File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Box::new(f)
        }
        None => Box::new(std::io::stdout().lock()),
    };
    let mut sink = BufWriter::new(sink);

    for frame in 0..args.frames {
        let time = lumamix::TimePoint::at_frame(frame, show.fps(), args.start_millis)?;
        let routed = show
            .tick(time)
            .with_context(|| format!("render frame {frame}"))?;
        let devices: Vec<_> = routed
            .iter()
            .map(|d| serde_json::json!([d.address, d.color]))
            .collect();
        let line = serde_json::json!({
            "frame": frame,
            "millis": time.scene_time_millis(),
            "devices": devices,
        });
        serde_json::to_writer(&mut sink, &line).context("write frame")?;
        sink.write_all(b"\n").context("write frame")?;
    }
    sink.flush().context("flush output")?;

    if let Some(path) = &args.out {
        eprintln!("wrote {} frames to {}", args.frames, path.display());
    }
    Ok(())
}

fn cmd_bounds(args: BoundsArgs) -> anyhow::Result<()> {
    let devices = lumamix::load_patch_sheet(&args.patch)?;
    let patch = lumamix::Patch::new(devices)?;
    match patch.bounds() {
        Some(bounds) => {
            let max = bounds.max();
            println!(
                "{} devices, min ({}, {}, {}), max ({}, {}, {})",
                patch.len(),
                bounds.min.x,
                bounds.min.y,
                bounds.min.z,
                max.x,
                max.y,
                max.z
            );
        }
        None => println!("0 devices"),
    }
    Ok(())
}
