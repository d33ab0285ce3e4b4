use std::sync::mpsc;
use std::time::Duration;

use ttype::app::App;
use ttype::runtime::{FixedTicker, Runner, TestEventSource};
use ttype::session::{Command, Event, KeyPress, Page};
use ttype::source::FixedText;

// Drives an App through Runner/TestEventSource without a TTY
#[test]
fn headless_typing_flow_completes() {
    let mut app = App::new(Box::new(FixedText::new("hi there")), 30).unwrap();

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for c in "hi there".chars() {
        tx.send(Event::KeyPress(KeyPress::Char(c))).unwrap();
    }

    for _ in 0..100u32 {
        app.handle(runner.step()).unwrap();
        if app.session().unwrap().is_finished() {
            break;
        }
    }

    let session = app.session().unwrap();
    assert_eq!(session.page(), Page::Results);
    assert_eq!(session.metrics().accuracy, 100);
}

#[test]
fn headless_timed_session_finishes_by_time() {
    let mut app = App::new(Box::new(FixedText::new("hello")), 1).unwrap();

    let (_tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(20)),
    );

    // one second of ticks with plenty of headroom
    for _ in 0..200u32 {
        app.handle(runner.step()).unwrap();
        if app.session().unwrap().is_finished() {
            break;
        }
    }

    let session = app.session().unwrap();
    assert!(session.is_finished(), "timed session should finish by timeout");
    assert_eq!(session.clock().seconds_remaining(), 0);
    assert_eq!(session.metrics().wpm, 0);
}

#[test]
fn headless_results_page_ignores_typing_until_restart() {
    let mut app = App::new(Box::new(FixedText::new("ab")), 30).unwrap();
    for c in "ab".chars() {
        app.handle(Event::KeyPress(KeyPress::Char(c))).unwrap();
    }
    assert!(app.session().unwrap().is_finished());

    assert!(!app.handle(Event::KeyPress(KeyPress::Char('x'))).unwrap());
    assert_eq!(app.session().unwrap().counters().attempts(), 2);

    app.handle(Event::KeyPress(KeyPress::Command(Command::Restart)))
        .unwrap();
    assert_eq!(app.session().unwrap().page(), Page::InProgress);

    app.handle(Event::KeyPress(KeyPress::Command(Command::Quit)))
        .unwrap();
    assert!(app.should_quit());
}
