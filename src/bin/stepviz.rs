use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "stepviz", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the response summary and the shape of every step.
    Inspect(InspectArgs),
    /// Render a single step as SVG or PNG.
    Frame(FrameArgs),
    /// Render every step into a directory.
    Render(RenderArgs),
    /// Drive playback from the first step to the end, writing one frame per transition.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input response JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct OutputArgs {
    /// Visualization config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raster scale for PNG output.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Omit the caption strip.
    #[arg(long)]
    no_caption: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input response JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Step index (0-based); clamped into the trace.
    #[arg(long, default_value_t = 0)]
    step: usize,

    /// Output path; `.png` rasterizes, anything else writes SVG.
    #[arg(long)]
    out: PathBuf,

    /// Freeze the step's motion this many milliseconds after it appears.
    #[arg(long)]
    at_ms: Option<u64>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input response JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input response JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Override the auto-advance interval.
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Sleep through each interval instead of simulating the clock.
    #[arg(long)]
    realtime: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Png,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Self::Png,
            _ => Self::Svg,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn read_response(path: &Path) -> anyhow::Result<stepviz::AlgorithmResponse> {
    stepviz::AlgorithmResponse::from_path(path)
        .with_context(|| format!("load response '{}'", path.display()))
}

fn read_config(path: Option<&Path>) -> anyhow::Result<stepviz::VizConfig> {
    match path {
        Some(p) => stepviz::VizConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(stepviz::VizConfig::default()),
    }
}

fn svg_opts(output: &OutputArgs) -> stepviz::SvgOpts {
    stepviz::SvgOpts {
        caption: !output.no_caption,
        animate: true,
    }
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create output dir '{}'", dir.display()))
}

/// Lazily created so SVG-only runs never load system fonts.
struct Writer {
    scale: f32,
    rasterizer: Option<stepviz::Rasterizer>,
}

impl Writer {
    fn new(scale: f32) -> Self {
        Self {
            scale,
            rasterizer: None,
        }
    }

    fn write(&mut self, svg: &str, format: Format, path: &Path) -> anyhow::Result<()> {
        match format {
            Format::Svg => std::fs::write(path, svg)
                .with_context(|| format!("write svg '{}'", path.display()))?,
            Format::Png => self
                .rasterizer
                .get_or_insert_with(stepviz::Rasterizer::new)
                .save_png(svg, self.scale, path)?,
        }
        tracing::info!(path = %path.display(), "wrote frame");
        Ok(())
    }
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let response = read_response(&args.in_path)?;
    println!("title: {}", response.title);
    if !response.complexity.is_empty() {
        println!("complexity: {}", response.complexity);
    }
    println!("steps: {}", response.len());
    if let Some(sample) = &response.sample_data {
        println!("sample data: {}", stepviz::classify(sample).kind());
    }
    for (i, step) in response.steps.iter().enumerate() {
        let kind = response
            .snapshot_at(i)
            .map_or_else(|| "none".to_owned(), |v| stepviz::classify(v).kind().to_string());
        let action = step.action.as_deref().unwrap_or("-");
        println!("{i:>4}  {kind:<10} {action:<10} {}", step.title);
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let response = read_response(&args.in_path)?;
    let config = read_config(args.output.config.as_deref())?;
    let builder = stepviz::FrameBuilder::new(config);

    let mut frame = builder.build(&response, args.step);
    if let Some(reason) = &frame.degraded {
        eprintln!("warning: step {} degraded: {reason}", frame.step_index);
    }
    let mut opts = svg_opts(&args.output);
    if let Some(t) = args.at_ms {
        frame.display = frame.display.sample_at(t);
        opts.animate = false;
    }
    let svg = stepviz::render_svg(&frame, &opts);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    Writer::new(args.output.scale).write(&svg, Format::from_path(&args.out), &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let response = read_response(&args.in_path)?;
    let config = read_config(args.output.config.as_deref())?;
    let builder = stepviz::FrameBuilder::new(config);
    let opts = svg_opts(&args.output);
    ensure_dir(&args.out_dir)?;

    let mut writer = Writer::new(args.output.scale);
    let count = response.len().max(1);
    for i in 0..count {
        let frame = builder.build(&response, i);
        let path = args
            .out_dir
            .join(format!("step_{i:03}.{}", args.format.extension()));
        writer.write(&stepviz::render_svg(&frame, &opts), args.format, &path)?;
    }

    eprintln!("wrote {count} frame(s) to {}", args.out_dir.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let response = read_response(&args.in_path)?;
    let mut config = read_config(args.output.config.as_deref())?;
    if let Some(ms) = args.interval_ms {
        config.playback.interval_ms = ms;
    }
    config.validate()?;
    ensure_dir(&args.out_dir)?;

    let builder = stepviz::FrameBuilder::new(config);
    let sink = stepviz::SvgSink::new(svg_opts(&args.output));
    let mut controller = stepviz::PlaybackController::new(&response, builder, sink);

    controller.play();
    while let Some(wait) = controller.time_until_tick() {
        if args.realtime {
            std::thread::sleep(wait);
        }
        controller.advance(wait.max(Duration::from_millis(1)));
    }

    let documents = controller.sink_mut().take_documents();
    let mut writer = Writer::new(args.output.scale);
    for (seq, doc) in documents.iter().enumerate() {
        let path = args.out_dir.join(format!(
            "frame_{seq:04}_step_{:03}.{}",
            doc.step_index,
            args.format.extension()
        ));
        writer.write(&doc.svg, args.format, &path)?;
    }

    eprintln!(
        "wrote {} frame(s) to {}",
        documents.len(),
        args.out_dir.display()
    );
    Ok(())
}
