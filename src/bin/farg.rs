use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use farg::{
    BodyRegion, CaptureSource as _, Canvas, CpuSurface, Driver, HistogramSampler, Installation,
    InstallationConfig, Phase, ReplayEstimator, StillCapture, Swatch,
};

#[derive(Parser, Debug)]
#[command(name = "farg", version)]
struct Cli {
    /// Log at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the installation against a still image and recorded poses.
    Run(RunArgs),
    /// Sample the six region palettes of a single frame and pose.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Image served as the camera feed.
    #[arg(long)]
    frame: PathBuf,

    /// Recorded pose estimates (JSON), replayed in order.
    #[arg(long)]
    poses: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 280)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 280)]
    height: u32,

    /// Installation config (JSON). Defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Frames to run before giving up.
    #[arg(long, default_value_t = 1200)]
    ticks: u64,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Stop after this many completed cycles.
    #[arg(long, default_value_t = 1)]
    cycles: usize,

    /// Write rendered frames as PNGs into this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Write every Nth frame when `--out-dir` is set.
    #[arg(long, default_value_t = 10)]
    every: u64,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print the swatch as JSON instead of hex.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<InstallationConfig> {
    let config = match path {
        Some(path) => InstallationConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => InstallationConfig::default(),
    };
    let config = config.with_env_overrides();
    config.validate().with_context(|| "validate config")?;
    Ok(config)
}

fn open_sources(
    args: &SourceArgs,
) -> anyhow::Result<(Canvas, StillCapture, ReplayEstimator, InstallationConfig)> {
    let canvas = Canvas::new(args.width, args.height)?;
    let capture = StillCapture::open(&args.frame)
        .with_context(|| format!("open frame '{}'", args.frame.display()))?;
    let estimator = ReplayEstimator::load(&args.poses)
        .with_context(|| format!("load poses '{}'", args.poses.display()))?;
    let config = read_config(args.config.as_deref())?;
    Ok((canvas, capture, estimator, config))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let (canvas, capture, estimator, config) = open_sources(&args.source)?;

    let results: Rc<RefCell<Vec<Swatch>>> = Rc::default();
    let sink = results.clone();
    let mut installation = Installation::new(
        canvas,
        config,
        capture,
        estimator,
        HistogramSampler::default(),
    )?
    .on_status(|status| eprintln!("status: {status}"))
    .on_result(move |swatch| {
        println!("{swatch}");
        sink.borrow_mut().push(*swatch);
    });

    let mut surface = CpuSurface::new(canvas)?;
    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
    }

    let every = args.every.max(1);
    let mut driver = Driver::new(args.fps);
    let mut last = Phase::Idle;
    while driver.frame() < args.ticks && results.borrow().len() < args.cycles {
        let Some(phase) = driver.step(&mut installation, &mut surface) else {
            continue;
        };
        if phase != last {
            tracing::debug!(frame = driver.frame(), %phase, "phase changed");
            last = phase;
        }
        if let Some(dir) = &args.out_dir
            && driver.frame() % every == 0
        {
            let path = dir.join(format!("frame_{:05}.png", driver.frame()));
            surface
                .snapshot()?
                .to_image()?
                .save_with_format(&path, image::ImageFormat::Png)
                .with_context(|| format!("write png '{}'", path.display()))?;
        }
    }

    let completed = results.borrow().len();
    eprintln!(
        "ran {} frames, {completed} cycle(s) completed, ending in {}",
        driver.frame(),
        installation.phase()
    );
    if completed < args.cycles {
        anyhow::bail!(
            "only {completed} of {} cycle(s) completed in {} frames",
            args.cycles,
            args.ticks
        );
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let (canvas, mut capture, mut estimator, config) = open_sources(&args.source)?;

    let frame = pollster::block_on(capture.capture_frame(canvas))?;
    let pose = pollster::block_on(farg::pose::estimate_pose(
        &mut estimator,
        &frame,
        config.min_score,
    ))?;
    let boxes = farg::region_boxes(&pose).with_context(|| "locate body regions")?;
    let samples = farg::sample_regions(&HistogramSampler::default(), &frame, &boxes)?;
    let swatch = Swatch::from_samples(&samples);

    if args.json {
        println!("{}", swatch.to_json()?);
    } else {
        for (region, sample) in BodyRegion::ALL.iter().zip(&samples) {
            let palette: Vec<String> = sample.palette().iter().map(|c| c.to_hex()).collect();
            eprintln!("{region:?}: {}", palette.join(" "));
        }
        println!("{swatch}");
    }
    Ok(())
}
