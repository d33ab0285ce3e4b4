use ttype::language::Language;
use ttype::ledger::{ComparisonUnit, Ledger, Mark, StreamLedger, WordLedger};
use ttype::metrics::{self, AccuracyCounters};
use ttype::router;
use ttype::session::{Command, Event, KeyPress, Page, Session};
use ttype::source::{RandomWords, Target, TargetSource};

fn key(c: char) -> Event {
    Event::KeyPress(KeyPress::Char(c))
}

fn type_str(session: &mut Session, s: &str) {
    for c in s.chars() {
        session.update(key(c));
    }
}

fn words_session(text: &str) -> Session {
    let words = text.split_whitespace().map(str::to_string).collect();
    Session::new(Target::Words(words), 30).unwrap()
}

#[test]
fn thirty_seconds_of_random_words_has_120_targets() {
    let mut source = RandomWords::new(Language::load("english").unwrap(), 30, 4).unwrap();
    let mut session = Session::new(source.next_target().unwrap(), 30).unwrap();
    assert_eq!(session.ledger().len(), 120);

    let first = session.ledger().classify()[0].text.clone();
    type_str(&mut session, &first);
    session.update(key(' '));

    let ledger = session.ledger();
    assert_eq!(ledger.current_unit(), 1);
    assert_eq!(ledger.correct_char_length(), first.chars().count() + 1);
    assert_eq!(ledger.cursor(), 0);
    assert_eq!(ledger.partial_credit(), 0);
}

#[test]
fn wrong_word_still_advances_without_credit() {
    let mut session = words_session("hello world");
    type_str(&mut session, "hexlo ");

    let ledger = session.ledger();
    assert_eq!(ledger.current_unit(), 1);
    assert_eq!(ledger.correct_char_length(), 0);
    assert_eq!(ledger.classify()[0].mark, Mark::Incorrect);
    assert_eq!(ledger.classify()[1].mark, Mark::Untyped);
}

#[test]
fn zero_divisors_report_zero() {
    assert_eq!(metrics::accuracy(&AccuracyCounters::default()), 0);
    assert_eq!(metrics::wpm(50, 3, 0), 0);
}

#[test]
fn restart_produces_fresh_independent_session() {
    let mut source = RandomWords::new(Language::load("english").unwrap(), 10, 4).unwrap();
    let mut session = Session::new(source.next_target().unwrap(), 10).unwrap();
    let first = session.ledger().classify()[0].text.clone();
    type_str(&mut session, &format!("{first} zz"));
    assert!(session.counters().attempts() > 0);

    let effects = session.update(Event::KeyPress(KeyPress::Command(Command::Restart)));
    assert!(effects.contains(&ttype::session::Effect::Restart));

    let fresh = Session::new(source.next_target().unwrap(), 10).unwrap();
    assert_eq!(fresh.page(), Page::InProgress);
    assert_eq!(fresh.counters().attempts(), 0);
    assert_eq!(fresh.counters().correct(), 0);
    assert_eq!(fresh.ledger().correct_char_length(), 0);
    assert_eq!(fresh.ledger().current_unit(), 0);
    assert_eq!(fresh.ledger().len(), 40);
}

#[test]
fn correct_never_exceeds_attempts() {
    let mut session = words_session("the quick brown fox jumps");
    let keys = "thw quick\u{8}k brwn fox jum";
    for c in keys.chars() {
        let event = if c == '\u{8}' {
            Event::KeyPress(KeyPress::Command(Command::Backspace))
        } else {
            key(c)
        };
        session.update(event);
        let counters = session.counters();
        assert!(counters.correct() <= counters.attempts());
        assert!(session.metrics().accuracy <= 100);
    }
}

#[test]
fn backspace_reopens_only_incorrect_words() {
    let mut ledger = WordLedger::from_text("one two three").unwrap();
    let mut counters = AccuracyCounters::default();

    for c in "one ".chars() {
        router::apply_char(&mut ledger, &mut counters, c);
    }
    router::apply_backspace(&mut ledger);
    assert_eq!(ledger.current_unit(), 1, "a correct word stays finalized");

    for c in "twx ".chars() {
        router::apply_char(&mut ledger, &mut counters, c);
    }
    let credit = ledger.correct_char_length();
    router::apply_backspace(&mut ledger);
    assert_eq!(ledger.current_unit(), 1, "an incorrect word can be reopened");
    assert_eq!(ledger.current_word(), "twx");
    assert_eq!(ledger.correct_char_length(), credit);

    router::apply_backspace(&mut ledger);
    router::apply_char(&mut ledger, &mut counters, 'o');
    router::apply_char(&mut ledger, &mut counters, ' ');
    assert_eq!(ledger.correct_char_length(), credit + 4);
}

#[test]
fn stream_backspace_cannot_cross_a_credited_word() {
    let mut ledger = StreamLedger::new("ab cd").unwrap();
    let mut counters = AccuracyCounters::default();
    assert_eq!(ledger.unit(), ComparisonUnit::Char);

    for c in "ab ".chars() {
        router::apply_char(&mut ledger, &mut counters, c);
    }
    assert_eq!(ledger.correct_char_length(), 3);

    router::apply_backspace(&mut ledger);
    assert_eq!(ledger.input_text(), "ab ");
}

#[test]
fn timeout_moves_to_results() {
    let mut session = words_session("hello world");
    type_str(&mut session, "hel");
    session.update(Event::Timeout);

    assert_eq!(session.page(), Page::Results);
    assert_eq!(session.clock().seconds_elapsed(), 30);
    // 3 partial chars over 30s round down to zero words
    assert_eq!(session.metrics().wpm, 0);
}
