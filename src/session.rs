use crate::error::ConfigError;
use crate::round_timer::{RoundTimer, Tick, TimerConfig};
use crate::vocabulary::Vocabulary;
use crate::word_supply::{ExhaustionPolicy, WordSupply};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// `None` plays an untimed round that can only end by running out of words
    pub timer: Option<TimerConfig>,
    pub exhaustion: ExhaustionPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timer: Some(TimerConfig::default()),
            exhaustion: ExhaustionPolicy::Finish,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.timer {
            Some(timer) => timer.validate(),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum FinishReason {
    #[strum(serialize = "time's up")]
    TimeUp,
    #[strum(serialize = "out of words")]
    OutOfWords,
}

/// Pushed to subscribers whenever an observable field changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    WordChanged(Option<String>),
    ScoreChanged(i32),
    TimeChanged(u64),
    FinishedChanged(bool),
}

/// Read-only copy of everything an observer may look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_word: Option<String>,
    pub score: i32,
    pub remaining_ms: u64,
    pub finished: bool,
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    NotStarted,
    Playing,
    Over,
    TornDown,
}

/// State of one round of play. All fields are private; observers read them
/// through accessors, `snapshot()` or `subscribe()`.
#[derive(Debug)]
pub struct RoundSession<R: Rng = ThreadRng> {
    config: SessionConfig,
    supply: WordSupply<R>,
    timer: Option<RoundTimer>,
    current_word: Option<String>,
    score: i32,
    finished: bool,
    finish_reason: Option<FinishReason>,
    phase: Phase,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl RoundSession<ThreadRng> {
    pub fn new(vocabulary: &Vocabulary, config: SessionConfig) -> Result<Self, ConfigError> {
        Self::with_rng(vocabulary, config, rand::thread_rng())
    }
}

impl<R: Rng> RoundSession<R> {
    pub fn with_rng(
        vocabulary: &Vocabulary,
        config: SessionConfig,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            supply: WordSupply::with_rng(vocabulary, config.exhaustion, rng),
            timer: None,
            current_word: None,
            score: 0,
            finished: false,
            finish_reason: None,
            phase: Phase::NotStarted,
            subscribers: Vec::new(),
        })
    }

    pub fn start(&mut self) {
        if self.phase != Phase::NotStarted {
            tracing::warn!(phase = ?self.phase, "start called on a session that already ran");
            return;
        }

        self.supply.reset();
        self.timer = self.config.timer.map(RoundTimer::new);
        self.score = 0;
        self.finished = false;
        self.finish_reason = None;
        self.phase = Phase::Playing;
        tracing::info!(
            timed = self.timer.is_some(),
            exhaustion = %self.config.exhaustion,
            "round started"
        );

        self.publish(SessionEvent::ScoreChanged(self.score));
        self.publish(SessionEvent::TimeChanged(self.remaining_ms()));
        self.publish(SessionEvent::FinishedChanged(false));
        self.advance();
    }

    pub fn mark_correct(&mut self) {
        self.mark(1);
    }

    pub fn mark_skip(&mut self) {
        self.mark(-1);
    }

    /// Deliver one tick from the host's scheduler
    pub fn tick(&mut self) -> Tick {
        if self.phase != Phase::Playing {
            return Tick::Ignored;
        }
        let Some(timer) = self.timer.as_mut() else {
            return Tick::Ignored;
        };

        let tick = timer.tick();
        match tick {
            Tick::Remaining(ms) => self.publish(SessionEvent::TimeChanged(ms)),
            Tick::Expired => {
                self.publish(SessionEvent::TimeChanged(0));
                self.on_timer_expired();
            }
            Tick::Ignored => {}
        }
        tick
    }

    /// Ends the round because time ran out. A round that already ended stays
    /// ended with its original reason.
    pub fn on_timer_expired(&mut self) {
        match self.phase {
            Phase::Playing => self.finish(FinishReason::TimeUp),
            Phase::Over => tracing::debug!("timer expiry after round already ended"),
            phase => tracing::warn!(?phase, "timer expiry on an inactive session"),
        }
    }

    /// Consumer has reacted to `finished == true`; stop reporting it
    pub fn acknowledge_finished(&mut self) {
        if !self.finished {
            return;
        }
        self.finished = false;
        tracing::debug!("finish acknowledged");
        self.publish(SessionEvent::FinishedChanged(false));
    }

    /// Stop the round without finishing it and release the tick schedule
    pub fn teardown(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.cancel();
        }
        self.phase = Phase::TornDown;
        self.subscribers.clear();
        tracing::debug!("session torn down");
    }

    /// Receiver that gets the current value of every field right away, then
    /// each change as it happens
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        if self.phase == Phase::TornDown {
            return rx;
        }

        let replay = [
            SessionEvent::WordChanged(self.current_word.clone()),
            SessionEvent::ScoreChanged(self.score),
            SessionEvent::TimeChanged(self.remaining_ms()),
            SessionEvent::FinishedChanged(self.finished),
        ];
        if replay.into_iter().all(|ev| tx.send(ev).is_ok()) {
            self.subscribers.push(tx);
        }
        rx
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Milliseconds left on the clock, 0 for untimed rounds
    pub fn remaining_ms(&self) -> u64 {
        self.timer.as_ref().map_or(0, RoundTimer::remaining_ms)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    /// True while the host should keep delivering ticks
    pub fn is_ticking(&self) -> bool {
        self.phase == Phase::Playing && self.timer.as_ref().is_some_and(RoundTimer::is_running)
    }

    /// True once a terminal condition has happened, acknowledged or not
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_word: self.current_word.clone(),
            score: self.score,
            remaining_ms: self.remaining_ms(),
            finished: self.finished,
            finish_reason: self.finish_reason,
        }
    }

    fn mark(&mut self, delta: i32) {
        match self.phase {
            Phase::Playing => {}
            Phase::Over => {
                tracing::debug!(delta, "mark ignored, round is over");
                return;
            }
            phase => {
                tracing::warn!(?phase, delta, "mark on an inactive session");
                return;
            }
        }
        if self.current_word.is_none() {
            return;
        }

        self.score += delta;
        self.publish(SessionEvent::ScoreChanged(self.score));
        self.advance();
    }

    fn advance(&mut self) {
        match self.supply.draw() {
            Some(word) => {
                self.current_word = Some(word);
                self.publish(SessionEvent::WordChanged(self.current_word.clone()));
            }
            None => {
                self.current_word = None;
                self.publish(SessionEvent::WordChanged(None));
                self.finish(FinishReason::OutOfWords);
            }
        }
    }

    fn finish(&mut self, reason: FinishReason) {
        if self.phase == Phase::Over {
            return;
        }

        self.phase = Phase::Over;
        self.finish_reason = Some(reason);
        self.finished = true;
        if let Some(timer) = self.timer.as_mut().filter(|t| t.is_running()) {
            timer.cancel();
        }
        tracing::info!(score = self.score, %reason, "round finished");
        self.publish(SessionEvent::FinishedChanged(true));
    }

    fn publish(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
