use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ripplefx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate frames 0..=N and write frame N as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct EffectArgs {
    /// Source image decorated with the ripple effect. Repeat to decorate several elements,
    /// laid out left to right in client space, each with its own ripple buffer.
    #[arg(long = "image", required = true)]
    images: Vec<PathBuf>,

    /// Effect configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pointer track JSON (client pixel coordinates). Defaults to a synthetic swipe.
    #[arg(long)]
    pointer: Option<PathBuf>,

    /// Use a viewport-sized ripple raster with a larger radius.
    #[arg(long)]
    debug: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    effect: EffectArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 8)]
    frame: u64,

    /// Output PNG path. With several images, `_<n>` is appended to the file stem.
    #[arg(long)]
    out: PathBuf,

    /// Also write the ripple raster of the same frame.
    #[arg(long)]
    ripple_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    effect: EffectArgs,

    /// Number of frames to render.
    #[arg(long, default_value_t = 90)]
    frames: u64,

    /// Output directory for the PNG sequence. With several images, each element writes into
    /// an `element_<n>` subdirectory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Also write every ripple raster as `ripple_<idx>.png`.
    #[arg(long)]
    dump_ripple: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn build_effects(
    args: &EffectArgs,
    sweep_frames: u64,
) -> anyhow::Result<(Vec<ripplefx::RippleEffect>, ripplefx::PointerTrack)> {
    let mut cfg = match &args.config {
        Some(path) => ripplefx::EffectConfig::from_path(path)?,
        None => ripplefx::EffectConfig::default(),
    };
    cfg.debug |= args.debug;

    let mut effects = Vec::with_capacity(args.images.len());
    let mut left = 0.0;
    let mut row_height = 0;
    for path in &args.images {
        let source = ripplefx::load_image(path)
            .with_context(|| format!("load source image '{}'", path.display()))?;
        let mut effect = ripplefx::RippleEffect::new(source, &cfg)?;
        let element = effect.element();
        effect.set_rect(ripplefx::ElementRect {
            left,
            top: 0.0,
            width: f64::from(element.width),
            height: f64::from(element.height),
        });
        left += f64::from(element.width);
        row_height = row_height.max(element.height);
        effects.push(effect);
    }

    let track = match &args.pointer {
        Some(path) => ripplefx::PointerTrack::from_path(path)?,
        None => {
            let row = ripplefx::Canvas {
                width: u32::try_from(left as u64).context("element row too wide")?,
                height: row_height,
            };
            ripplefx::PointerTrack::sweep(row, sweep_frames)?
        }
    };
    Ok((effects, track))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let end = args
        .frame
        .checked_add(1)
        .context("--frame is too large")?;
    let (mut effects, track) = build_effects(&args.effect, end)?;
    let range = ripplefx::FrameRange::new(ripplefx::FrameIndex(0), ripplefx::FrameIndex(end))?;
    let count = effects.len();

    for (n, effect) in effects.iter_mut().enumerate() {
        let mut sink = LastFrameSink::default();
        ripplefx::render_range(effect, &track, range, &mut sink)?;

        let frame = sink
            .last
            .context("no frame rendered (empty frame range)")?;
        let out = element_file(&args.out, n, count);
        ripplefx::write_png(&out, &frame)?;
        eprintln!("wrote {}", out.display());

        if let Some(path) = &args.ripple_out {
            let path = element_file(path, n, count);
            ripplefx::write_png(&path, &effect.ripple_frame())?;
            eprintln!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (mut effects, track) = build_effects(&args.effect, args.frames)?;

    let range =
        ripplefx::FrameRange::new(ripplefx::FrameIndex(0), ripplefx::FrameIndex(args.frames))?;
    let count = effects.len();
    let dump_ripple = args.dump_ripple;

    for (n, effect) in effects.iter_mut().enumerate() {
        let out_dir = if count == 1 {
            args.out_dir.clone()
        } else {
            args.out_dir.join(format!("element_{n}"))
        };
        let mut sink = ripplefx::PngSequenceSink::new(&out_dir, "frame");
        let stats = ripplefx::render_range_with(effect, &track, range, &mut sink, |idx, effect| {
            if dump_ripple {
                let path = ripple_path(&out_dir, idx);
                ripplefx::write_png(&path, &effect.ripple_frame())?;
            }
            Ok(())
        })?;

        eprintln!(
            "wrote {} frames to {} ({} pointer samples ingested)",
            stats.frames_rendered,
            out_dir.display(),
            stats.samples_ingested
        );
    }
    Ok(())
}

/// `out.png` for a single element, `out_<n>.png` otherwise.
fn element_file(path: &Path, n: usize, count: usize) -> PathBuf {
    if count == 1 {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{n}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{n}"),
    };
    path.with_file_name(name)
}

fn ripple_path(dir: &Path, idx: ripplefx::FrameIndex) -> PathBuf {
    dir.join(format!("ripple_{:05}.png", idx.0))
}

#[derive(Default)]
struct LastFrameSink {
    last: Option<ripplefx::FrameRGBA>,
}

impl ripplefx::FrameSink for LastFrameSink {
    fn begin(&mut self, _cfg: ripplefx::SinkConfig) -> ripplefx::RippleResult<()> {
        self.last = None;
        Ok(())
    }

    fn push_frame(
        &mut self,
        _idx: ripplefx::FrameIndex,
        frame: &ripplefx::FrameRGBA,
    ) -> ripplefx::RippleResult<()> {
        self.last = Some(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> ripplefx::RippleResult<()> {
        Ok(())
    }
}
