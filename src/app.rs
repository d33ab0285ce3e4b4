use std::path::PathBuf;

use log::{info, warn};

use crate::error::Result;
use crate::picker::FilePicker;
use crate::session::{Command, Effect, Event, KeyPress, Session};
use crate::source::{FileText, TargetSource};

#[derive(Debug)]
pub enum Screen {
    Picker(FilePicker),
    Typing(Session),
}

/// Owns the target source and the current screen, and applies session effects
#[derive(Debug)]
pub struct App {
    screen: Screen,
    source: Option<Box<dyn TargetSource>>,
    duration_secs: u64,
    pick_dir: Option<PathBuf>,
    should_quit: bool,
}

impl App {
    pub fn new(mut source: Box<dyn TargetSource>, duration_secs: u64) -> Result<Self> {
        let session = Session::new(source.next_target()?, duration_secs)?;
        Ok(Self {
            screen: Screen::Typing(session),
            source: Some(source),
            duration_secs,
            pick_dir: None,
            should_quit: false,
        })
    }

    pub fn with_picker(picker: FilePicker, duration_secs: u64) -> Self {
        Self {
            pick_dir: Some(picker.dir().to_path_buf()),
            screen: Screen::Picker(picker),
            source: None,
            duration_secs,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.screen {
            Screen::Typing(session) => Some(session),
            Screen::Picker(_) => None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle one event; returns whether the screen needs redrawing
    pub fn handle(&mut self, event: Event) -> Result<bool> {
        if matches!(self.screen, Screen::Picker(_)) {
            return Ok(self.handle_picker(event));
        }

        let effects = match &mut self.screen {
            Screen::Typing(session) => session.update(event),
            Screen::Picker(_) => return Ok(false),
        };

        let mut redraw = false;
        for effect in effects {
            match effect {
                Effect::Render => redraw = true,
                Effect::Finished => {}
                Effect::Restart => {
                    self.restart()?;
                    redraw = true;
                }
                Effect::Quit => self.should_quit = true,
            }
        }
        Ok(redraw)
    }

    /// Replace the session with a fresh one from the same source. A file
    /// that became unreadable sends the user back to the picker.
    pub fn restart(&mut self) -> Result<()> {
        let Some(source) = self.source.as_mut() else {
            return Ok(());
        };

        let next = source
            .next_target()
            .and_then(|target| Session::new(target, self.duration_secs));

        match (next, &self.pick_dir) {
            (Ok(session), _) => {
                info!("session restarted");
                self.screen = Screen::Typing(session);
                Ok(())
            }
            (Err(e), Some(dir)) => {
                warn!("restart failed, back to picker: {e}");
                let mut picker = FilePicker::open(dir)?;
                picker.set_error(e.to_string());
                self.source = None;
                self.screen = Screen::Picker(picker);
                Ok(())
            }
            (Err(e), None) => Err(e),
        }
    }

    fn handle_picker(&mut self, event: Event) -> bool {
        let Screen::Picker(picker) = &mut self.screen else {
            return false;
        };

        match event {
            Event::KeyPress(KeyPress::Command(Command::Quit)) => {
                self.should_quit = true;
                false
            }
            Event::KeyPress(KeyPress::Command(Command::Up)) => {
                picker.select_previous();
                true
            }
            Event::KeyPress(KeyPress::Command(Command::Down)) => {
                picker.select_next();
                true
            }
            Event::KeyPress(KeyPress::Command(Command::Confirm)) => {
                let Some(path) = picker.selected_path().map(|p| p.to_path_buf()) else {
                    return false;
                };

                let mut source = FileText::new(&path);
                match source
                    .next_target()
                    .and_then(|target| Session::new(target, self.duration_secs))
                {
                    Ok(session) => {
                        self.source = Some(Box::new(source));
                        self.screen = Screen::Typing(session);
                    }
                    Err(e) => {
                        warn!("cannot start session from {}: {e}", path.display());
                        picker.set_error(e.to_string());
                    }
                }
                true
            }
            Event::Resize(..) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Page;
    use crate::source::FixedText;
    use std::fs;
    use tempfile::tempdir;

    fn key(c: char) -> Event {
        Event::KeyPress(KeyPress::Char(c))
    }

    fn command(cmd: Command) -> Event {
        Event::KeyPress(KeyPress::Command(cmd))
    }

    #[test]
    fn test_app_new_starts_typing() {
        let app = App::new(Box::new(FixedText::new("hello world")), 30).unwrap();
        let session = app.session().unwrap();
        assert_eq!(session.page(), Page::InProgress);
        assert_eq!(session.ledger().len(), 2);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_app_new_rejects_empty_prompt() {
        assert!(App::new(Box::new(FixedText::new("")), 30).is_err());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut app = App::new(Box::new(FixedText::new("ab cd")), 30).unwrap();
        for c in "ab c".chars() {
            app.handle(key(c)).unwrap();
        }
        assert!(app.session().unwrap().counters().attempts() > 0);

        assert!(app.handle(command(Command::Restart)).unwrap());
        let session = app.session().unwrap();
        assert_eq!(session.counters().attempts(), 0);
        assert_eq!(session.ledger().current_unit(), 0);
        assert_eq!(session.ledger().correct_char_length(), 0);
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut app = App::new(Box::new(FixedText::new("ab")), 30).unwrap();
        app.handle(command(Command::Quit)).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_picker_starts_stream_session() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "some text").unwrap();

        let mut app = App::with_picker(FilePicker::open(dir.path()).unwrap(), 30);
        assert!(app.session().is_none());

        app.handle(command(Command::Confirm)).unwrap();
        let session = app.session().unwrap();
        assert_eq!(session.ledger().len(), "some text".len());
    }

    #[test]
    fn test_picker_reprompts_on_unreadable_file() {
        let dir = tempdir().unwrap();
        // not valid UTF-8, so reading it as text fails
        fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0x00]).unwrap();

        let mut app = App::with_picker(FilePicker::open(dir.path()).unwrap(), 30);
        app.handle(command(Command::Confirm)).unwrap();

        match app.screen() {
            Screen::Picker(picker) => assert!(picker.error().unwrap().contains("unable to read")),
            Screen::Typing(_) => panic!("unreadable file must not start a session"),
        }
    }

    #[test]
    fn test_restart_rereads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "first").unwrap();

        let mut app = App::with_picker(FilePicker::open(dir.path()).unwrap(), 30);
        app.handle(command(Command::Confirm)).unwrap();
        fs::write(&path, "second text").unwrap();
        app.handle(command(Command::Restart)).unwrap();

        assert_eq!(app.session().unwrap().ledger().len(), "second text".len());
    }

    #[test]
    fn test_restart_falls_back_to_picker_when_file_vanishes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "first").unwrap();
        fs::write(dir.path().join("b.txt"), "other").unwrap();

        let mut app = App::with_picker(FilePicker::open(dir.path()).unwrap(), 30);
        app.handle(command(Command::Confirm)).unwrap();
        fs::remove_file(&path).unwrap();
        app.handle(command(Command::Restart)).unwrap();

        assert!(matches!(app.screen(), Screen::Picker(p) if p.error().is_some()));
    }
}
