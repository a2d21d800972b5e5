use crate::vocabulary::Vocabulary;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What happens when every word of the shuffled cycle has been drawn
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExhaustionPolicy {
    /// Running out of words ends the round
    #[default]
    Finish,
    /// Reshuffle the full vocabulary and keep going
    Reshuffle,
}

/// Shuffled queue of words consumed from the front
#[derive(Debug)]
pub struct WordSupply<R: Rng = ThreadRng> {
    source: Vec<String>,
    remaining: VecDeque<String>,
    policy: ExhaustionPolicy,
    rng: R,
}

impl<R: Rng> WordSupply<R> {
    pub fn with_rng(vocabulary: &Vocabulary, policy: ExhaustionPolicy, rng: R) -> Self {
        Self {
            source: vocabulary.words.clone(),
            remaining: VecDeque::new(),
            policy,
            rng,
        }
    }

    /// Replace whatever is left with a fresh permutation of the full vocabulary
    pub fn reset(&mut self) {
        let mut words = self.source.clone();
        words.shuffle(&mut self.rng);
        self.remaining = words.into();
        tracing::debug!(words = self.remaining.len(), "word supply reshuffled");
    }

    /// Next word, or `None` once a `Finish` supply has run dry
    pub fn draw(&mut self) -> Option<String> {
        if self.remaining.is_empty() {
            match self.policy {
                ExhaustionPolicy::Finish => {
                    tracing::debug!("word supply exhausted");
                    return None;
                }
                ExhaustionPolicy::Reshuffle => self.reset(),
            }
        }

        let word = self.remaining.pop_front();
        tracing::debug!(word = ?word, left = self.remaining.len(), "drew word");
        word
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn cycle_len(&self) -> usize {
        self.source.len()
    }
}
