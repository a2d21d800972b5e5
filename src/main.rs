use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use guessword::{
    app::{Action, App},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    ui::screen::current_screen,
    ExhaustionPolicy, Vocabulary,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

/// guess the word on screen before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A party word game for the terminal. Act out or describe the word on screen, mark it correct when your team guesses it or skip it for a penalty. The round ends when the clock runs out or the words do."
)]
pub struct Cli {
    /// length of a round in seconds
    #[clap(short = 's', long, conflicts_with = "untimed")]
    secs: Option<u64>,

    /// play without a clock; the round ends when the words run out
    #[clap(long)]
    untimed: bool,

    /// countdown tick interval in milliseconds
    #[clap(long)]
    interval_ms: Option<u64>,

    /// what to do once every word has been shown
    #[clap(long, value_enum)]
    on_exhaustion: Option<ExhaustionPolicy>,

    /// store these settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn apply(&self, mut cfg: Config) -> Config {
        if self.untimed {
            cfg.round_secs = None;
        } else if let Some(secs) = self.secs {
            cfg.round_secs = Some(secs);
        }
        if let Some(ms) = self.interval_ms {
            cfg.interval_ms = ms;
        }
        if let Some(policy) = self.on_exhaustion {
            cfg.exhaustion = policy;
        }
        cfg
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = AppDirs::log_path() {
        // logging is best effort; the game runs without it
        if let Err(err) = logging::init_file(&path) {
            eprintln!("guessword: logging disabled, cannot open {}: {err}", path.display());
        }
    }

    let store = FileConfigStore::new();
    let cfg = cli.apply(store.load());
    let session_config = match cfg.session_config() {
        Ok(sc) => sc,
        Err(err) => Cli::command().error(ErrorKind::ValueValidation, err).exit(),
    };
    if cli.save_config {
        store.save(&cfg)?;
        tracing::info!(path = %store.path().display(), "saved config");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let vocabulary = Vocabulary::embedded()?;
    let mut app = App::new(vocabulary, session_config)?;
    let ticker = FixedTicker::from_millis(cfg.interval_ms);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, ticker);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    ticker: FixedTicker,
) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), ticker);

    while !app.should_quit {
        app.sync_ticks(&mut runner);
        terminal.draw(|f| current_screen(app.state).render(app, f))?;

        match runner.step() {
            GameEvent::Tick => app.handle_action(Action::Tick),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if let Some(action) = Action::from_key(app.state, &key) {
                    app.handle_action(action);
                }
            }
            GameEvent::Closed => app.handle_action(Action::Quit),
        }
    }

    Ok(())
}
