use crate::ledger::Ledger;

/// Keystrokes counted toward accuracy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccuracyCounters {
    attempts: u64,
    correct: u64,
}

impl AccuracyCounters {
    pub fn record(&mut self, was_correct: bool) {
        self.attempts += 1;
        if was_correct {
            self.correct += 1;
        }
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn correct(&self) -> u64 {
        self.correct
    }
}

/// Whole-number percentage of correct attempts, 0 before any attempt
pub fn accuracy(counters: &AccuracyCounters) -> u64 {
    if counters.attempts == 0 {
        return 0;
    }
    counters.correct * 100 / counters.attempts
}

/// Words per minute with a word counted as five chars. Integer arithmetic,
/// evaluated left to right; 0 until a full second has elapsed.
pub fn wpm(correct_char_length: usize, partial_credit: usize, seconds_elapsed: u64) -> u64 {
    if seconds_elapsed == 0 {
        return 0;
    }
    let chars = (correct_char_length + partial_credit) as u64;
    chars / 5 * 60 / seconds_elapsed
}

/// Live figures shown in the header and on the results page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub wpm: u64,
    pub accuracy: u64,
}

impl Metrics {
    pub fn compute(ledger: &dyn Ledger, counters: &AccuracyCounters, seconds_elapsed: u64) -> Self {
        Self {
            wpm: wpm(
                ledger.correct_char_length(),
                ledger.partial_credit(),
                seconds_elapsed,
            ),
            accuracy: accuracy(counters),
        }
    }
}
