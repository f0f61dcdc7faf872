use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::OpenOptions,
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Mutex,
};
use timeme::{
    app::{App, Flow},
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
};
use tracing_subscriber::EnvFilter;

/// type a random word against the clock
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A tiny typing-speed widget: a random word from your list is shown, the clock starts on your first keystroke and stops the moment the word is typed exactly."
)]
pub struct Cli {
    /// comma-separated word list file (created with defaults if missing)
    #[clap(short = 'f', long)]
    words_file: Option<PathBuf>,

    /// seed for reproducible word picks
    #[clap(long)]
    seed: Option<u64>,

    /// refresh interval of the timer label in milliseconds (10-100)
    #[clap(short = 't', long)]
    tick_ms: Option<u64>,

    /// write logs to this file (the terminal is owned by the UI)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Command line flags take precedence over the stored config.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(path) = &self.words_file {
            config.words_file = Some(path.clone());
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(ms) = self.tick_ms {
            config.tick_rate_ms = ms;
        }
        config
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.apply(FileConfigStore::new().load());
    tracing::info!(words_file = %config.words_path().display(), "starting timeme");

    let mut app = App::from_config(&config);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(config.tick_interval()),
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step(app.timer()) {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.handle_key(key) == Flow::Quit {
                    break;
                }
            }
            AppEvent::Closed => break,
        }
    }

    tracing::info!("exiting");
    Ok(())
}
