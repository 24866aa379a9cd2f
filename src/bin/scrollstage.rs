use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollstage::{
    ElementId, MemoryHost, MemoryStore, Point, RuntimeConfig, RuntimeEnv, ScrollRuntime,
    StageEvent, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "scrollstage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an input trace against a page fixture and print stage events as JSON lines.
    Simulate(SimulateArgs),
    /// Hold the pointer still over a follower container and print where the markers settle.
    Follow(FollowArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page fixture JSON.
    #[arg(long)]
    page: PathBuf,

    /// Input trace JSON (array of steps).
    #[arg(long)]
    trace: PathBuf,

    /// Runtime configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame rate of the simulated display.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

#[derive(Parser, Debug)]
struct FollowArgs {
    /// Page fixture JSON.
    #[arg(long)]
    page: PathBuf,

    /// Follower container element.
    #[arg(long)]
    container: u32,

    /// Pointer x, container-local.
    #[arg(long)]
    x: f64,

    /// Pointer y, container-local.
    #[arg(long)]
    y: f64,

    /// Simulated time in seconds.
    #[arg(long, default_value_t = 2.0)]
    seconds: f64,
}

/// One step of an input trace.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum TraceStep {
    Wheel {
        delta: f64,
    },
    NativeScroll {
        offset: f64,
    },
    Seek {
        offset: f64,
        #[serde(default)]
        animate: bool,
    },
    Frames {
        count: u32,
    },
    Resize {
        width: f64,
        height: f64,
    },
    Hidden,
    Visible,
    PageShow {
        #[serde(default)]
        persisted: bool,
    },
    PointerMove {
        container: u32,
        x: f64,
        y: f64,
    },
    PointerLeave {
        container: u32,
    },
    PointerDown {
        container: u32,
        x: f64,
        y: f64,
    },
    RouteChange,
}

#[derive(serde::Serialize)]
struct EventLine {
    t: f64,
    offset: f64,
    #[serde(flatten)]
    event: StageEvent,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Follow(args) => cmd_follow(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))?;
    Ok(value)
}

fn read_page(path: &Path) -> anyhow::Result<MemoryHost> {
    Ok(MemoryHost::from_path(path)?)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be a positive number, got {}", args.fps);
    }
    let host = read_page(&args.page)?;
    let config = match &args.config {
        Some(path) => read_json::<RuntimeConfig>(path, "config")?,
        None => RuntimeConfig::default(),
    };
    let trace: Vec<TraceStep> = read_json(&args.trace, "trace")?;

    let env = RuntimeEnv::new();
    let mut runtime = ScrollRuntime::new(&env, host, MemoryStore::default(), config);
    let frame_s = 1.0 / args.fps;
    let mut now = 0.0;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for step in trace {
        match step {
            TraceStep::Wheel { delta } => runtime.on_wheel(delta),
            TraceStep::NativeScroll { offset } => runtime.on_native_scroll(offset),
            TraceStep::Seek { offset, animate } => runtime.seek(offset, animate),
            TraceStep::Frames { count } => {
                for _ in 0..count {
                    let events = runtime.frame(now);
                    for event in events {
                        let line = EventLine {
                            t: now,
                            offset: runtime.offset(),
                            event,
                        };
                        serde_json::to_writer(&mut out, &line).context("serialize event")?;
                        writeln!(out).context("write event")?;
                    }
                    now += frame_s;
                }
            }
            TraceStep::Resize { width, height } => {
                runtime.host_mut().viewport = Viewport::new(width, height);
                runtime.on_resize(now);
            }
            TraceStep::Hidden => runtime.on_visibility_change(true),
            TraceStep::Visible => runtime.on_visibility_change(false),
            TraceStep::PageShow { persisted } => runtime.on_page_show(persisted),
            TraceStep::PointerMove { container, x, y } => {
                runtime.on_pointer_move(ElementId(container), Point::new(x, y))
            }
            TraceStep::PointerLeave { container } => runtime.on_pointer_leave(ElementId(container)),
            TraceStep::PointerDown { container, x, y } => {
                if let Some(key) = runtime.on_pointer_down(ElementId(container), Point::new(x, y)) {
                    tracing::info!(%key, "spawned follower");
                }
            }
            TraceStep::RouteChange => runtime.on_route_change(),
        }
    }

    runtime.teardown();
    eprintln!("simulated {now:.3}s, final offset {:.1}", runtime.offset());
    Ok(())
}

fn cmd_follow(args: FollowArgs) -> anyhow::Result<()> {
    let host = read_page(&args.page)?;
    let container = ElementId(args.container);
    if !host.tagged.iter().any(|t| t.element == container) {
        anyhow::bail!("element {container} carries no directives");
    }

    let env = RuntimeEnv::new();
    let mut runtime = ScrollRuntime::new(&env, host, MemoryStore::default(), RuntimeConfig::default());
    runtime.on_pointer_move(container, Point::new(args.x, args.y));

    let frames = (args.seconds.max(0.0) * 60.0).ceil() as u32;
    for i in 0..=frames {
        runtime.frame(f64::from(i) / 60.0);
    }

    let offsets = runtime.follower_offsets(container);
    let json = serde_json::to_string_pretty(&offsets).context("serialize follower offsets")?;
    println!("{json}");
    Ok(())
}
