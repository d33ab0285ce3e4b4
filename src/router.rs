use crate::ledger::{Edit, Ledger};
use crate::metrics::AccuracyCounters;

/// What a routed key did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Ignored,
    Edited,
    /// The final unit reached its target length
    Completed,
}

/// Backspace reopens the previous word when allowed, otherwise deletes one
/// char of the live word. Accuracy counters are never touched.
pub fn apply_backspace(ledger: &mut dyn Ledger) -> Routed {
    if ledger.retreat() {
        return Routed::Edited;
    }

    match ledger.delete_char() {
        Edit::Unchanged => Routed::Ignored,
        _ => Routed::Edited,
    }
}

/// Space advances to the next word; any other printable char is appended.
pub fn apply_char(ledger: &mut dyn Ledger, counters: &mut AccuracyCounters, c: char) -> Routed {
    if c.is_control() {
        return Routed::Ignored;
    }

    let edit = if c == ' ' {
        ledger.advance()
    } else {
        ledger.insert_char(c)
    };

    if edit == Edit::Appended {
        update_accuracy_stats(ledger, counters);
    }

    if ledger.is_complete() {
        return Routed::Completed;
    }

    match edit {
        Edit::Unchanged => Routed::Ignored,
        _ => Routed::Edited,
    }
}

fn update_accuracy_stats(ledger: &dyn Ledger, counters: &mut AccuracyCounters) {
    counters.record(ledger.last_char_correct());
}
