use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

const FRAME_MS: u64 = 16;

#[derive(Parser, Debug)]
#[command(name = "scrollfx", version)]
struct Cli {
    /// Log session events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a page description (and optional layout).
    Validate(PageArgs),
    /// Print the styles of every tracked element at one scroll offset.
    Frame(FrameArgs),
    /// Replay a scroll trace and print every DOM write as a JSON line.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Page description JSON. Defaults to the built-in portfolio page.
    #[arg(long)]
    page: Option<PathBuf>,

    /// Static layout JSON. Defaults to the built-in portfolio layout.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Viewport height used by the built-in layout.
    #[arg(long, default_value_t = 800.0)]
    viewport: f64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Scroll offset in pixels.
    #[arg(long)]
    offset: f64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Trace JSON: an array of timestamped events.
    #[arg(long)]
    trace: PathBuf,

    /// Keep ticking this long after the last event so pending timers fire.
    #[arg(long, default_value_t = 5_000)]
    settle_ms: u64,
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum TraceEvent {
    Scroll { at_ms: u64, offset: f64 },
    Tick { at_ms: u64 },
    Nav { at_ms: u64, section: String },
    ImageError { at_ms: u64 },
    Rerender { at_ms: u64 },
}

impl TraceEvent {
    fn at(&self) -> scrollfx::Millis {
        let ms = match self {
            Self::Scroll { at_ms, .. }
            | Self::Tick { at_ms }
            | Self::Nav { at_ms, .. }
            | Self::ImageError { at_ms }
            | Self::Rerender { at_ms } => *at_ms,
        };
        scrollfx::Millis(ms)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_page(args: &PageArgs) -> anyhow::Result<scrollfx::PageDef> {
    let page = match &args.page {
        Some(path) => scrollfx::PageDef::from_path(path)
            .with_context(|| format!("load page '{}'", path.display()))?,
        None => scrollfx::PageDef::portfolio(),
    };
    page.validate().with_context(|| "validate page")?;
    Ok(page)
}

fn read_layout(args: &PageArgs) -> anyhow::Result<scrollfx::StaticLayout> {
    let layout = match &args.layout {
        Some(path) => read_json::<scrollfx::StaticLayout>(path, "layout")?,
        None => scrollfx::StaticLayout::portfolio(args.viewport),
    };
    layout.validate().with_context(|| "validate layout")?;
    Ok(layout)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn cmd_validate(args: PageArgs) -> anyhow::Result<()> {
    let page = read_page(&args)?;
    let layout = read_layout(&args)?;

    let geometry = layout.geometry_at(0.0);
    let unplaced: Vec<&str> = page
        .tracked
        .iter()
        .map(|t| &t.id)
        .chain(page.sections.iter().map(|s| &s.id))
        .filter(|id| geometry.rect(id).is_none())
        .map(|id| id.as_str())
        .collect();
    if !unplaced.is_empty() {
        eprintln!("warning: not in layout: {}", unplaced.join(", "));
    }

    println!(
        "ok: {} tracked, {} sections, max scroll {}",
        page.tracked.len(),
        page.sections.len(),
        layout.max_scroll()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let page = read_page(&args.page)?;
    let layout = read_layout(&args.page)?;

    let mut session = scrollfx::PageSession::mount(page, scrollfx::Millis(0))?;
    let mut sink = scrollfx::InMemoryDomSink::new();
    session.on_scroll(layout.metrics_at(args.offset)?, &mut sink)?;
    let offset = session.scroll_state().offset;
    let report = session
        .on_frame(&layout.geometry_at(offset), &mut sink)?
        .with_context(|| "frame was not scheduled")?;

    let mut out = std::io::stdout().lock();
    for w in sink.writes() {
        match w {
            scrollfx::DomWrite::Style { target, style } => {
                writeln!(out, "#{target} {{ {} }}", style.to_css())?;
            }
            scrollfx::DomWrite::ProgressBar { percent } => {
                writeln!(out, "/* progress {percent:.2}% */")?;
            }
            _ => {}
        }
    }
    writeln!(
        out,
        "/* offset {offset}, active section {}, styled {}, skipped {} */",
        report.active.as_signed(),
        report.styled,
        report.skipped
    )?;
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let page = read_page(&args.page)?;
    let layout = read_layout(&args.page)?;
    let mut trace: Vec<TraceEvent> = read_json(&args.trace, "trace")?;
    trace.sort_by_key(|e| e.at());

    let stdout = std::io::stdout().lock();
    let mut sink = scrollfx::JsonLinesSink::new(BufWriter::new(stdout));
    let mut session = scrollfx::PageSession::mount(page, scrollfx::Millis(0))?;
    let mut offset = 0.0;

    let settle = trace
        .last()
        .map_or(scrollfx::Millis(0), |e| e.at())
        .after(args.settle_ms);
    for event in &trace {
        let now = event.at();
        if let Some(y) = session.tick(now, &mut sink)? {
            offset = y;
            scroll_to(&mut session, &layout, offset, now, &mut sink)?;
        }
        match event {
            TraceEvent::Scroll { offset: y, .. } => {
                offset = *y;
                scroll_to(&mut session, &layout, offset, now, &mut sink)?;
            }
            TraceEvent::Tick { .. } => {}
            TraceEvent::Nav { section, .. } => {
                let id = scrollfx::ElementId::new(section.as_str());
                let metrics = layout.metrics_at(offset)?;
                session.scroll_to_section(&id, &layout.geometry_at(offset), metrics, now)?;
            }
            TraceEvent::ImageError { .. } => {
                session.on_image_error(&mut sink)?;
            }
            TraceEvent::Rerender { .. } => {
                session.rerender(now);
            }
        }
    }

    // Keep producing frames so pending timers and any navigation still in flight finish.
    let mut now = trace.last().map_or(scrollfx::Millis(0), |e| e.at());
    while now < settle {
        now = now.after(FRAME_MS).min(settle);
        if let Some(y) = session.tick(now, &mut sink)? {
            offset = y;
            scroll_to(&mut session, &layout, offset, now, &mut sink)?;
        }
    }

    let cancelled = session.unmount();
    let written = sink.written();
    sink.finish()?;
    eprintln!("wrote {written} writes ({cancelled} timers cancelled at unmount)");
    Ok(())
}

fn scroll_to(
    session: &mut scrollfx::PageSession,
    layout: &scrollfx::StaticLayout,
    offset: f64,
    now: scrollfx::Millis,
    sink: &mut dyn scrollfx::DomSink,
) -> anyhow::Result<()> {
    let metrics = layout.metrics_at(offset)?;
    let geometry = layout.geometry_at(metrics.offset);
    if session.on_scroll(metrics, sink)? {
        session.on_frame(&geometry, sink)?;
    }
    session.observe_all(&geometry, now, sink)?;
    Ok(())
}
