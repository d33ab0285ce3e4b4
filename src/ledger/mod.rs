//! Target vs. typed text bookkeeping.
//!
//! A ledger is the only owner of correctness state for a session. Two
//! granularities exist: [`WordLedger`] keeps one buffer per target word, and
//! [`StreamLedger`] compares one long character stream. Both apply the same
//! rules (one-step correction of incorrect words, speed credit for words
//! confirmed correct, partial credit for a correct in-progress word).

pub mod stream;
pub mod words;

use std::fmt;

pub use stream::StreamLedger;
pub use words::WordLedger;

/// Granularity at which target and input are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ComparisonUnit {
    Word,
    Char,
}

/// How a single target unit has been typed so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Untyped,
    Correct,
    Incorrect,
}

/// A target unit (word or character) together with its mark, for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub text: String,
    pub mark: Mark,
}

impl Classified {
    pub fn new(text: impl Into<String>, mark: Mark) -> Self {
        Self {
            text: text.into(),
            mark,
        }
    }
}

/// Result of a single ledger mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// A character was added to the live text
    Appended,
    /// The cursor moved to another unit or a character was removed
    Changed,
    Unchanged,
}

pub trait Ledger: fmt::Debug + Send {
    fn unit(&self) -> ComparisonUnit;

    /// Number of target units (words or characters)
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the unit currently being typed
    fn current_unit(&self) -> usize;

    /// Cursor position inside the live text, in chars
    fn cursor(&self) -> usize;

    /// Reopen the previous unit for correction. Returns false, leaving the
    /// ledger untouched, when the previous unit may not be reopened.
    fn retreat(&mut self) -> bool;

    fn delete_char(&mut self) -> Edit;

    /// Finalize the current word and move on (the space key)
    fn advance(&mut self) -> Edit;

    fn insert_char(&mut self, c: char) -> Edit;

    /// Whether the last char of the live text matches the target at the same index
    fn last_char_correct(&self) -> bool;

    fn is_complete(&self) -> bool;

    /// Speed accumulator: `len + 1` of every word finalized as correct
    fn correct_char_length(&self) -> usize;

    /// Length of the live word while it is a correct prefix of its target, else 0
    fn partial_credit(&self) -> usize;

    fn classify(&self) -> Vec<Classified>;
}
