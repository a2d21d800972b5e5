use thiserror::Error;

/// Errors raised while turning user settings into a playable round
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("round duration must be greater than zero")]
    ZeroDuration,

    #[error("tick interval must be greater than zero")]
    ZeroInterval,

    #[error("tick interval of {interval_ms}ms exceeds the round duration of {total_ms}ms")]
    IntervalExceedsDuration { interval_ms: u64, total_ms: u64 },
}

/// Errors while loading the word list a round draws from
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("vocabulary file {0} is not embedded in this build")]
    NotFound(String),

    #[error("vocabulary file {0} is not valid UTF-8")]
    NotUtf8(String),

    #[error("failed to parse vocabulary json")]
    Parse(#[from] serde_json::Error),

    #[error("vocabulary {0} contains no words")]
    Empty(String),

    #[error("vocabulary {name} lists {word:?} more than once")]
    Duplicate { name: String, word: String },
}
