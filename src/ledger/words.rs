use log::debug;

use super::{Classified, ComparisonUnit, Edit, Ledger, Mark};
use crate::error::{Result, TtypeError};

/// Word-indexed ledger: `inputs[i]` is the user's attempt at `targets[i]`
#[derive(Debug, Clone)]
pub struct WordLedger {
    targets: Vec<String>,
    inputs: Vec<String>,
    current: usize,
    cursor: usize,
    correct_char_length: usize,
}

impl WordLedger {
    /// Build a ledger from target words. Words are lowercased and split on
    /// whitespace; an empty sequence is rejected.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets: Vec<String> = words
            .into_iter()
            .flat_map(|w| {
                w.as_ref()
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>()
            })
            .collect();

        if targets.is_empty() {
            return Err(TtypeError::EmptyTarget);
        }

        Ok(Self {
            inputs: vec![String::new(); targets.len()],
            targets,
            current: 0,
            cursor: 0,
            correct_char_length: 0,
        })
    }

    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(text.split_whitespace())
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Live text of the word being typed
    pub fn current_word(&self) -> &str {
        &self.inputs[self.current]
    }

    pub fn is_on_last_word(&self) -> bool {
        self.current + 1 == self.targets.len()
    }

    pub fn is_word_correct(&self, idx: usize) -> bool {
        match (self.inputs.get(idx), self.targets.get(idx)) {
            (Some(input), Some(target)) => input == target,
            _ => false,
        }
    }

    /// True while the live word matches the start of its target
    pub fn is_correct_prefix(&self) -> bool {
        self.targets[self.current].starts_with(self.current_word())
    }

    pub fn can_retreat(&self) -> bool {
        self.current_word().is_empty() && self.current > 0 && !self.is_word_correct(self.current - 1)
    }

    /// Finalize the current word and move to the next one. Does nothing on
    /// the last word, which completes by length instead.
    pub fn advance_word(&mut self) -> bool {
        if self.is_on_last_word() {
            return false;
        }

        if self.is_word_correct(self.current) {
            self.correct_char_length += self.targets[self.current].chars().count() + 1;
        }

        self.current += 1;
        self.inputs[self.current].clear();
        self.cursor = 0;
        debug!("advanced to word {}", self.current);
        true
    }

    /// Step back into the previous word when it was typed incorrectly
    pub fn retreat_word(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }

        self.current -= 1;
        self.cursor = self.inputs[self.current].chars().count();
        debug!("reopened word {}", self.current);
        true
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        let word = self.current_word();
        word.char_indices()
            .nth(char_pos)
            .map_or(word.len(), |(i, _)| i)
    }

    pub fn push_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.inputs[self.current].insert(at, c);
        self.cursor += 1;
    }

    pub fn pop_char(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        let at = self.byte_offset(self.cursor - 1);
        self.inputs[self.current].remove(at);
        self.cursor -= 1;
        true
    }

    fn mark_of(&self, idx: usize) -> Mark {
        use std::cmp::Ordering;

        match idx.cmp(&self.current) {
            Ordering::Less if self.is_word_correct(idx) => Mark::Correct,
            Ordering::Less => Mark::Incorrect,
            Ordering::Equal if self.current_word().is_empty() => Mark::Untyped,
            Ordering::Equal if self.is_correct_prefix() => Mark::Correct,
            Ordering::Equal => Mark::Incorrect,
            Ordering::Greater => Mark::Untyped,
        }
    }
}

impl Ledger for WordLedger {
    fn unit(&self) -> ComparisonUnit {
        ComparisonUnit::Word
    }

    fn len(&self) -> usize {
        self.targets.len()
    }

    fn current_unit(&self) -> usize {
        self.current
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn retreat(&mut self) -> bool {
        self.retreat_word()
    }

    fn delete_char(&mut self) -> Edit {
        if self.pop_char() {
            Edit::Changed
        } else {
            Edit::Unchanged
        }
    }

    fn advance(&mut self) -> Edit {
        if self.advance_word() {
            Edit::Changed
        } else {
            Edit::Unchanged
        }
    }

    fn insert_char(&mut self, c: char) -> Edit {
        // space is the advance key and never lands in a buffer
        if c.is_whitespace() {
            return Edit::Unchanged;
        }
        self.push_char(c);
        Edit::Appended
    }

    fn last_char_correct(&self) -> bool {
        let live = self.current_word();
        let len = live.chars().count();
        match (live.chars().last(), len.checked_sub(1)) {
            (Some(typed), Some(idx)) => self.targets[self.current].chars().nth(idx) == Some(typed),
            _ => false,
        }
    }

    fn is_complete(&self) -> bool {
        self.is_on_last_word()
            && self.current_word().chars().count() >= self.targets[self.current].chars().count()
    }

    fn correct_char_length(&self) -> usize {
        self.correct_char_length
    }

    fn partial_credit(&self) -> usize {
        if self.is_correct_prefix() {
            self.current_word().chars().count()
        } else {
            0
        }
    }

    fn classify(&self) -> Vec<Classified> {
        self.targets
            .iter()
            .enumerate()
            .map(|(idx, target)| Classified::new(target.as_str(), self.mark_of(idx)))
            .collect()
    }
}
