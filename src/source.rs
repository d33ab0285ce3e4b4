use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Result, TtypeError};
use crate::language::Language;
use crate::ledger::{Ledger, StreamLedger, WordLedger};

/// Observed typing pace used to size generated sessions
pub const DEFAULT_WORDS_PER_SECOND: usize = 4;
pub const MAX_WORDS_PER_SECOND: usize = 20;
pub const MAX_DURATION_SECS: u64 = 3600;

/// Accepts whole session lengths from one second up to an hour
pub fn check_duration(secs: u64) -> Result<u64> {
    if (1..=MAX_DURATION_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(TtypeError::InvalidDuration(secs.to_string()))
    }
}

pub fn check_words_per_second(wps: usize) -> Result<usize> {
    if (1..=MAX_WORDS_PER_SECOND).contains(&wps) {
        Ok(wps)
    } else {
        Err(TtypeError::InvalidWordsPerSecond(wps.to_string()))
    }
}

/// Text to type for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Compared word by word
    Words(Vec<String>),
    /// Compared char by char, e.g. the contents of a file
    Stream(String),
}

impl Target {
    pub fn into_ledger(self) -> Result<Box<dyn Ledger>> {
        Ok(match self {
            Target::Words(words) => Box::new(WordLedger::new(words)?),
            Target::Stream(text) => Box::new(StreamLedger::new(&text)?),
        })
    }
}

/// Produces a fresh target every time a session (re)starts
pub trait TargetSource: fmt::Debug {
    fn next_target(&mut self) -> Result<Target>;
}

/// `duration × words_per_second` random words from a language list
#[derive(Debug, Clone)]
pub struct RandomWords {
    language: Language,
    count: usize,
}

impl RandomWords {
    pub fn new(language: Language, duration_secs: u64, words_per_second: usize) -> Result<Self> {
        Ok(Self {
            language,
            count: word_count(duration_secs, words_per_second)?,
        })
    }
}

pub fn word_count(duration_secs: u64, words_per_second: usize) -> Result<usize> {
    usize::try_from(duration_secs)
        .ok()
        .and_then(|secs| secs.checked_mul(words_per_second))
        .ok_or_else(|| TtypeError::InvalidDuration(duration_secs.to_string()))
}

impl TargetSource for RandomWords {
    fn next_target(&mut self) -> Result<Target> {
        let words = self.language.get_random(self.count, &mut rand::thread_rng());
        if words.is_empty() {
            return Err(TtypeError::EmptyTarget);
        }
        Ok(Target::Words(words))
    }
}

/// Whole file read as one character stream; re-read on every restart
#[derive(Debug, Clone)]
pub struct FileText {
    path: PathBuf,
}

impl FileText {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TargetSource for FileText {
    fn next_target(&mut self) -> Result<Target> {
        let text = fs::read_to_string(&self.path).map_err(|source| TtypeError::UnreadableFile {
            path: self.path.clone(),
            source,
        })?;

        if text.trim().is_empty() {
            return Err(TtypeError::EmptyTarget);
        }

        info!("loaded {} chars from {}", text.len(), self.path.display());
        Ok(Target::Stream(text))
    }
}

/// Constant prompt compared word by word
#[derive(Debug, Clone)]
pub struct FixedText {
    text: String,
}

impl FixedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TargetSource for FixedText {
    fn next_target(&mut self) -> Result<Target> {
        let words: Vec<String> = self.text.split_whitespace().map(str::to_string).collect();
        if words.is_empty() {
            return Err(TtypeError::EmptyTarget);
        }
        Ok(Target::Words(words))
    }
}
