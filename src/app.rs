use crate::error::ConfigError;
use crate::runtime::{GameEventSource, Runner, Ticker};
use crate::session::{FinishReason, RoundSession, SessionConfig, SessionEvent};
use crate::vocabulary::Vocabulary;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum AppState {
    Playing,
    Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Correct,
    Skip,
    Tick,
    PlayAgain,
    Quit,
}

impl Action {
    pub fn from_key(state: AppState, key: &KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match (state, key.code) {
            (_, KeyCode::Esc) | (_, KeyCode::Char('q')) => Some(Action::Quit),
            (AppState::Playing, KeyCode::Char('c') | KeyCode::Enter | KeyCode::Right) => {
                Some(Action::Correct)
            }
            (AppState::Playing, KeyCode::Char('s') | KeyCode::Char(' ') | KeyCode::Left) => {
                Some(Action::Skip)
            }
            (AppState::Score, KeyCode::Char('r') | KeyCode::Enter) => Some(Action::PlayAgain),
            _ => None,
        }
    }
}

/// What the observer last heard from the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundView {
    pub word: Option<String>,
    pub score: i32,
    pub remaining_ms: u64,
}

/// Owns the current round and reacts to what it publishes
#[derive(Debug)]
pub struct App {
    vocabulary: Vocabulary,
    config: SessionConfig,
    session: RoundSession,
    events: Receiver<SessionEvent>,
    finished_seen: bool,
    pub state: AppState,
    pub view: RoundView,
    pub final_score: Option<i32>,
    pub finish_reason: Option<FinishReason>,
    pub rounds_played: u32,
    pub should_quit: bool,
}

impl App {
    pub fn new(vocabulary: Vocabulary, config: SessionConfig) -> Result<Self, ConfigError> {
        let mut session = RoundSession::new(&vocabulary, config)?;
        let events = session.subscribe();
        session.start();

        let mut app = Self {
            vocabulary,
            config,
            session,
            events,
            finished_seen: false,
            state: AppState::Playing,
            view: RoundView::default(),
            final_score: None,
            finish_reason: None,
            rounds_played: 0,
            should_quit: false,
        };
        app.pump_events();
        Ok(app)
    }

    pub fn session(&self) -> &RoundSession {
        &self.session
    }

    pub fn wants_ticks(&self) -> bool {
        self.session.is_ticking()
    }

    pub fn handle_action(&mut self, action: Action) {
        match (self.state, action) {
            (_, Action::Quit) => {
                self.session.teardown();
                self.should_quit = true;
            }
            (AppState::Playing, Action::Correct) => self.session.mark_correct(),
            (AppState::Playing, Action::Skip) => self.session.mark_skip(),
            (AppState::Playing, Action::Tick) => {
                self.session.tick();
            }
            (AppState::Score, Action::PlayAgain) => self.play_again(),
            (state, action) => tracing::trace!(%state, ?action, "action ignored"),
        }
        self.pump_events();
    }

    /// Arm the runner while the round's clock runs, release it otherwise
    pub fn sync_ticks<E: GameEventSource, T: Ticker>(&self, runner: &mut Runner<E, T>) {
        match (self.wants_ticks(), runner.is_armed()) {
            (true, false) => runner.arm(),
            (false, true) => runner.disarm(),
            _ => {}
        }
    }

    /// Drop the current subscription and attach a fresh one, as a redrawn
    /// screen would. Only a finish that has not been acknowledged replays.
    pub fn reattach(&mut self) {
        self.events = self.session.subscribe();
        self.finished_seen = false;
        self.pump_events();
    }

    pub fn pump_events(&mut self) {
        loop {
            let pending: Vec<SessionEvent> = self.events.try_iter().collect();
            if pending.is_empty() {
                break;
            }
            for event in pending {
                self.on_event(event);
            }
        }
    }

    fn on_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::WordChanged(word) => self.view.word = word,
            SessionEvent::ScoreChanged(score) => self.view.score = score,
            SessionEvent::TimeChanged(ms) => self.view.remaining_ms = ms,
            SessionEvent::FinishedChanged(finished) => {
                let rising = finished && !self.finished_seen;
                self.finished_seen = finished;
                if rising {
                    self.game_finished();
                }
            }
        }
    }

    fn game_finished(&mut self) {
        self.final_score = Some(self.view.score);
        self.finish_reason = self.session.finish_reason();
        self.rounds_played += 1;
        self.state = AppState::Score;
        tracing::info!(score = self.view.score, rounds = self.rounds_played, "showing score");
        self.session.acknowledge_finished();
    }

    fn play_again(&mut self) {
        self.session.teardown();

        let mut session = match RoundSession::new(&self.vocabulary, self.config) {
            Ok(session) => session,
            Err(err) => {
                // config was validated when the first round was built
                tracing::error!(%err, "cannot start another round");
                return;
            }
        };
        self.events = session.subscribe();
        session.start();
        self.session = session;

        self.finished_seen = false;
        self.state = AppState::Playing;
        self.view = RoundView::default();
        self.final_score = None;
        self.finish_reason = None;
        self.pump_events();
    }
}
