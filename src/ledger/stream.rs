use itertools::Itertools;
use log::debug;

use super::{Classified, ComparisonUnit, Edit, Ledger, Mark};
use crate::error::{Result, TtypeError};

/// Character-indexed ledger over one long target string (file text).
///
/// Word boundaries are the spaces of the target. A word finalized as correct
/// raises the backspace floor past it, so it can no longer be edited.
#[derive(Debug, Clone)]
pub struct StreamLedger {
    target: Vec<char>,
    input: Vec<char>,
    word_start: usize,
    backspace_floor: usize,
    correct_char_length: usize,
}

impl StreamLedger {
    /// Whitespace runs collapse to one space and the text is lowercased
    pub fn new(text: &str) -> Result<Self> {
        let normalized = text.split_whitespace().join(" ").to_lowercase();
        if normalized.is_empty() {
            return Err(TtypeError::EmptyTarget);
        }

        Ok(Self {
            target: normalized.chars().collect(),
            input: Vec::new(),
            word_start: 0,
            backspace_floor: 0,
            correct_char_length: 0,
        })
    }

    pub fn input_text(&self) -> String {
        self.input.iter().collect()
    }

    /// Chars typed since the last word boundary
    pub fn current_word(&self) -> String {
        self.input[self.word_start..].iter().collect()
    }

    /// The live word must begin where a target word begins and match the
    /// target from there up to `end`
    fn matches_target_word(&self, start: usize, end: usize) -> bool {
        let aligned = start == 0 || self.target.get(start - 1) == Some(&' ');
        aligned && end <= self.target.len() && self.input[start..end] == self.target[start..end]
    }

    fn recompute_word_start(&mut self) {
        self.word_start = self
            .input
            .iter()
            .rposition(|&c| c == ' ')
            .map_or(0, |i| i + 1);
    }
}

impl Ledger for StreamLedger {
    fn unit(&self) -> ComparisonUnit {
        ComparisonUnit::Char
    }

    fn len(&self) -> usize {
        self.target.len()
    }

    fn current_unit(&self) -> usize {
        self.input.len()
    }

    fn cursor(&self) -> usize {
        self.input.len()
    }

    // Word boundaries are enforced by the backspace floor in `delete_char`
    fn retreat(&mut self) -> bool {
        false
    }

    fn delete_char(&mut self) -> Edit {
        if self.input.len() <= self.backspace_floor {
            return Edit::Unchanged;
        }

        self.input.pop();
        self.recompute_word_start();
        Edit::Changed
    }

    fn advance(&mut self) -> Edit {
        if self.input.len() >= self.target.len() {
            return Edit::Unchanged;
        }

        self.input.push(' ');
        let end = self.input.len();
        // the word counts together with its trailing space
        if self.matches_target_word(self.word_start, end) {
            self.correct_char_length += end - self.word_start;
            self.backspace_floor = end;
            debug!("stream word confirmed at {end}");
        }
        self.word_start = end;
        Edit::Appended
    }

    fn insert_char(&mut self, c: char) -> Edit {
        if c == ' ' {
            return self.advance();
        }
        if self.input.len() >= self.target.len() {
            return Edit::Unchanged;
        }

        self.input.push(c);
        Edit::Appended
    }

    fn last_char_correct(&self) -> bool {
        match self.input.len().checked_sub(1) {
            Some(idx) => self.target.get(idx) == self.input.get(idx),
            None => false,
        }
    }

    fn is_complete(&self) -> bool {
        self.input.len() >= self.target.len()
    }

    fn correct_char_length(&self) -> usize {
        self.correct_char_length
    }

    fn partial_credit(&self) -> usize {
        if self.matches_target_word(self.word_start, self.input.len()) {
            self.input.len() - self.word_start
        } else {
            0
        }
    }

    fn classify(&self) -> Vec<Classified> {
        self.target
            .iter()
            .enumerate()
            .map(|(idx, expected)| {
                let mark = match self.input.get(idx) {
                    Some(typed) if typed == expected => Mark::Correct,
                    Some(_) => Mark::Incorrect,
                    None => Mark::Untyped,
                };
                Classified::new(expected.to_string(), mark)
            })
            .collect()
    }
}
