//! devdash - terminal developer dashboard
//!
//! 1. Key event -> `Dashboard::handle_event` -> actions
//! 2. Actions dispatched to the effect store (logged by `LoggingMiddleware`)
//! 3. Reducer updates state and returns effects
//! 4. Effects spawn keyed tasks; their results come back as actions
//! 5. Re-render when state changed
//!
//! ```sh
//! devdash --username torvalds --city Kigali
//! devdash --locate --lat 48.85 --lon 2.35
//! DEVDASH_LOG=debug devdash --log-file /tmp/devdash.log
//! ```

use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use devdash::action::Action;
use devdash::api::{ApiClient, Endpoints};
use devdash::components::{Component, Dashboard, DashboardProps};
use devdash::effect::{handle_effect, Services};
use devdash::location::{Coordinates, Geolocator};
use devdash::reducer::reducer;
use devdash::state::{AppState, LOADING_ANIM_TICK_MS};
use devdash::theme::{system_preference, ThemeContext, ThemeStore};
use devdash_core::{EffectRuntime, EffectStoreWithMiddleware, EventOutcome, LoggingMiddleware};

/// Environment variable holding the log filter
const LOG_ENV: &str = "DEVDASH_LOG";

/// Terminal dashboard with a GitHub profile card and a weather card
#[derive(Parser, Debug)]
#[command(name = "devdash", version)]
#[command(about = "GitHub profile and city weather in your terminal")]
struct Args {
    /// GitHub username to show (empty starts the card idle)
    #[arg(long, short, default_value = "octocat")]
    username: String,

    /// City for the weather card (empty starts the card idle)
    #[arg(long, short, default_value = "San Francisco")]
    city: String,

    /// Start the weather card on the device location instead of the city
    #[arg(long)]
    locate: bool,

    /// Device latitude used by --locate and the `l` key
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Device longitude used by --locate and the `l` key
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Auto-refresh interval in seconds (0 disables)
    #[arg(long, short, default_value = "300")]
    refresh_interval: u64,

    /// Settings file (defaults to <config dir>/devdash/settings.json)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log file (defaults to <data dir>/devdash/devdash.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.clone());

    let api = ApiClient::new(Endpoints::default()).map_err(io::Error::other)?;
    let store = args.settings.clone().or_else(ThemeStore::default_path).map(ThemeStore::new);
    let theme = ThemeContext::load(store, system_preference());
    let configured = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
        _ => None,
    };
    let services = Services {
        api,
        theme,
        geolocator: Geolocator::new(configured),
    };
    tracing::info!(username = %args.username, city = %args.city, locate = args.locate, "Starting devdash");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &args, services).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "devdash exited with an error");
    }
    result
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(path: Option<PathBuf>) {
    let Some(path) = path.or_else(|| dirs::data_dir().map(|dir| dir.join("devdash").join("devdash.log")))
    else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    args: &Args,
    services: Services,
) -> io::Result<()> {
    let store = EffectStoreWithMiddleware::new(
        AppState::new(services.theme.theme()),
        reducer,
        LoggingMiddleware::new(),
    );
    let mut runtime = EffectRuntime::from_store(store);

    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(LOADING_ANIM_TICK_MS), || {
            Action::Tick
        });
    runtime
        .subscriptions()
        .interval_immediate("clock", Duration::from_secs(1), || {
            Action::ClockTick(Local::now())
        });
    if args.refresh_interval > 0 {
        runtime
            .subscriptions()
            .interval("refresh", Duration::from_secs(args.refresh_interval), || {
                Action::Refresh
            });
    }

    // Initial triggers: the cards activate with whatever was configured
    runtime.enqueue(Action::GithubUsernameSet(args.username.clone()));
    if args.locate {
        runtime.enqueue(Action::WeatherLocate);
    } else {
        runtime.enqueue(Action::WeatherCitySet(args.city.clone()));
    }

    let ui = RefCell::new(Dashboard::new());
    let mut services = services;

    runtime
        .run(
            terminal,
            |frame, area, state| {
                ui.borrow_mut().render(frame, area, DashboardProps { state });
            },
            |event, state| {
                EventOutcome::from_actions(
                    ui.borrow_mut().handle_event(event, DashboardProps { state }),
                )
            },
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(effect, ctx, &mut services),
        )
        .await
}
