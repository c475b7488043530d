use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rawavi::{
    AviSink, EncodeJob, FrameIndex, FrameSink, RgbaFrame, Session, Settings, SinkConfig,
};

#[derive(Parser, Debug)]
#[command(name = "rawavi", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode image files as one uncompressed video stream.
    Images(ImagesArgs),
    /// Encode a JSON job manifest (one or more streams).
    Encode(EncodeArgs),
    /// Print the file layout a JSON job manifest would produce.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct ImagesArgs {
    /// Frames per second.
    #[arg(long, default_value_t = 25)]
    fps: u32,

    /// Output AVI path.
    #[arg(long)]
    out: PathBuf,

    /// Input images in frame order; all must share the first image's dimensions.
    #[arg(required = true)]
    frames: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Input job manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output AVI path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input job manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Images(args) => cmd_images(args),
        Command::Encode(args) => cmd_encode(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn load_rgba(path: &Path) -> anyhow::Result<RgbaFrame> {
    let img = image::open(path)
        .with_context(|| format!("decode image '{}'", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(RgbaFrame {
        width,
        height,
        data: img.into_raw(),
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write avi '{}'", path.display()))?;
    eprintln!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn cmd_images(args: ImagesArgs) -> anyhow::Result<()> {
    let mut sink = AviSink::new();
    for (i, path) in args.frames.iter().enumerate() {
        let frame = load_rgba(path)?;
        if i == 0 {
            sink.begin(SinkConfig {
                width: frame.width,
                height: frame.height,
                fps: args.fps,
            })?;
        }
        sink.push_frame(FrameIndex(i as u64), &frame)
            .with_context(|| format!("append frame '{}'", path.display()))?;
    }
    sink.end()?;

    let blob = sink.take_blob().context("avi sink finished without output")?;
    write_output(&args.out, blob.as_bytes())
}

fn build_session(in_path: &Path) -> anyhow::Result<Session> {
    let job = EncodeJob::from_path(in_path)?;
    let root = in_path.parent().unwrap_or_else(|| Path::new("."));

    let mut session = Session::new();
    for (i, stream) in job.streams.iter().enumerate() {
        let mut id = stream
            .dimensions()
            .map(|(w, h)| session.add_stream(stream.fps, w, h))
            .transpose()
            .with_context(|| format!("stream {i}"))?;

        for path in stream.frame_paths(root) {
            let frame = load_rgba(&path)?;
            let sid = match id {
                Some(sid) => sid,
                None => *id.insert(
                    session
                        .add_stream(stream.fps, frame.width, frame.height)
                        .with_context(|| format!("stream {i}"))?,
                ),
            };
            let s = session.container().stream(sid)?;
            anyhow::ensure!(
                (s.width(), s.height()) == (frame.width, frame.height),
                "stream {i}: '{}' is {}x{}, expected {}x{}",
                path.display(),
                frame.width,
                frame.height,
                s.width(),
                s.height()
            );
            session.add_frame(sid, &frame.data)?;
        }
    }

    if let Some(first) = session.container().streams().first() {
        let fallback = Settings {
            width: first.width(),
            height: first.height(),
        };
        session.configure(job.settings_or(fallback))?;
    } else if let Some(settings) = job.settings {
        session.configure(settings)?;
    }

    let layout = session.layout()?;
    tracing::info!(
        streams = layout.streams.len(),
        frames = layout.total_frames,
        bytes = layout.total_len,
        "job loaded"
    );
    Ok(session)
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let mut session = build_session(&args.in_path)?;
    let blob = session.finish()?;
    write_output(&args.out, blob.as_bytes())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let session = build_session(&args.in_path)?;
    let layout = session.layout()?;
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}
