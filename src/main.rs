use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use validator_dashboard::events::Wake;
use validator_dashboard::view::html;
use validator_dashboard::{
    events, ui, App, DashboardView, DriverEvent, Overrides, PollDriver, Poller, Settings,
    SnapshotSource,
};

#[derive(Parser, Debug)]
#[command(name = "validator-dashboard")]
#[command(about = "Status dashboard for a set of network validator nodes")]
struct Args {
    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dashboard server page URL; `data` and `config` are resolved against it
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Read validator snapshots from a JSON file instead of a server
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Explorer page prefix for validator links
    #[arg(long)]
    explorer_url: Option<String>,

    /// Run one cycle, print the page as HTML and exit
    #[arg(long, conflicts_with = "headless")]
    once: bool,

    /// Poll without a terminal UI, rewriting --output after every cycle
    #[arg(long, requires = "output")]
    headless: bool,

    /// HTML output path (stdout for --once when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write logs to this file (the terminal UI owns stdout and stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args)?;

    let overrides = Overrides {
        base_url: args.url.clone(),
        data_file: args.file.clone(),
        explorer_url: args.explorer_url.clone(),
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)?;
    let source = settings.open_source()?;
    info!(source = source.description(), "starting dashboard");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let poller = Poller::new(settings.render_options());

    if args.once {
        return rt.block_on(run_once(source, poller, args.output.as_deref()));
    }

    if args.headless {
        let output = args
            .output
            .context("--headless requires --output")?;
        return rt.block_on(run_headless(source, poller, &output));
    }

    rt.block_on(run_tui(source, poller))
}

/// Install the tracing subscriber.
///
/// The terminal UI draws on stdout, so logs only go to stderr in the
/// non-interactive modes. With `--log-file` they always go to the file.
fn init_tracing(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(ref path) = args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.once || args.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}

/// Run a single cycle and emit the page.
async fn run_once(
    source: Arc<dyn SnapshotSource>,
    mut poller: Poller,
    output: Option<&Path>,
) -> Result<()> {
    let mut view = DashboardView::new();
    let outcome = poller.poll_once(source.as_ref(), &mut view).await;
    info!(?outcome, "cycle finished");

    let page = html::render_page(&view);
    match output {
        Some(path) => write_page(path, &page)?,
        None => print!("{}", page),
    }
    Ok(())
}

/// Poll on the server's schedule, rewriting `output` after every cycle.
async fn run_headless(source: Arc<dyn SnapshotSource>, poller: Poller, output: &Path) -> Result<()> {
    let mut view = DashboardView::new();
    let mut driver = PollDriver::new(source, poller);
    driver.trigger(&mut view);

    loop {
        tokio::select! {
            event = driver.step(&mut view) => {
                if let DriverEvent::CycleCompleted(_, outcome) = event {
                    if let Err(e) = write_page(output, &html::render_page(&view)) {
                        warn!(error = %e, ?outcome, "failed to write page");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, shutting down");
                return Ok(());
            }
        }
    }
}

fn write_page(path: &Path, page: &str) -> Result<()> {
    std::fs::write(path, page).with_context(|| format!("failed to write {}", path.display()))
}

/// Run the terminal UI
async fn run_tui(source: Arc<dyn SnapshotSource>, poller: Poller) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(source.description(), ui::Theme::auto_detect());
    let mut driver = PollDriver::new(source, poller);
    driver.trigger(&mut app.view);

    let result = run_app(&mut terminal, &mut app, &mut driver).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    driver: &mut PollDriver,
) -> Result<()> {
    let mut input = EventStream::new();
    let mut redraw = events::redraw_ticker();

    while app.running {
        terminal.draw(|frame| ui::render(frame, &mut *app))?;

        let wake = events::wait_for_update(app, driver, &mut input, &mut redraw).await?;
        if wake == Wake::InputClosed {
            break;
        }

        if app.take_refresh_request() {
            driver.trigger(&mut app.view);
        }
    }

    Ok(())
}
