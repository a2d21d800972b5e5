// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod logging;
pub mod round_timer;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod vocabulary;
pub mod word_supply;

pub use error::{ConfigError, VocabularyError};
pub use round_timer::{RoundTimer, Tick, TimerConfig};
pub use session::{FinishReason, RoundSession, SessionConfig, SessionEvent, SessionSnapshot};
pub use vocabulary::Vocabulary;
pub use word_supply::{ExhaustionPolicy, WordSupply};
