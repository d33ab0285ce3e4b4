use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use ttype::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    error::{Result as TtypeResult, TtypeError},
    language::Language,
    logging,
    picker::FilePicker,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    source::{
        check_duration, check_words_per_second, FileText, FixedText, RandomWords, TargetSource,
    },
    ui::{self, Theme},
};

/// minimal typing speed test with live wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// session duration in whole seconds
    #[clap(value_parser = parse_duration)]
    duration: Option<u64>,

    /// type the contents of a .txt or .md file instead of random words
    #[clap(short = 'f', long, conflicts_with_all = ["pick", "prompt"])]
    file: Option<PathBuf>,

    /// pick a .txt or .md file to type from this directory
    #[clap(short = 'd', long, conflicts_with = "prompt")]
    pick: Option<PathBuf>,

    /// custom prompt to use
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// number of random words generated per second of session
    #[clap(long, value_parser = parse_words_per_second)]
    words_per_second: Option<usize>,
}

fn parse_duration(s: &str) -> TtypeResult<u64> {
    s.parse::<u64>()
        .map_err(|_| TtypeError::InvalidDuration(s.to_string()))
        .and_then(check_duration)
}

fn parse_words_per_second(s: &str) -> TtypeResult<usize> {
    s.parse::<usize>()
        .map_err(|_| TtypeError::InvalidWordsPerSecond(s.to_string()))
        .and_then(check_words_per_second)
}

impl Cli {
    fn build_app(&self, config: &Config) -> TtypeResult<App> {
        // config values get the same bounds as the command line
        let duration = check_duration(self.duration.unwrap_or(config.duration_secs))?;

        if let Some(dir) = &self.pick {
            return Ok(App::with_picker(FilePicker::open(dir)?, duration));
        }

        let source: Box<dyn TargetSource> = if let Some(path) = &self.file {
            Box::new(FileText::new(path))
        } else if let Some(prompt) = &self.prompt {
            Box::new(FixedText::new(prompt.clone()))
        } else {
            let wps =
                check_words_per_second(self.words_per_second.unwrap_or(config.words_per_second))?;
            Box::new(RandomWords::new(
                Language::load(&config.language)?,
                duration,
                wps,
            )?)
        };

        App::new(source, duration)
    }
}

fn init_logging(config: &Config) {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Err(e) = logging::init(&path, logging::parse_level(&config.log_level)) {
        eprintln!("ttype: logging disabled: {e}");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = FileConfigStore::new().load();
    init_logging(&config);

    let mut app = match cli.build_app(&config) {
        Ok(app) => app,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, e).exit();
        }
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(
        &mut terminal,
        &mut app,
        Duration::from_millis(config.tick_rate_ms),
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<(), Box<dyn Error>> {
    let theme = Theme::default();
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(tick_rate));

    terminal.draw(|f| ui::draw(app, &theme, f))?;

    while !app.should_quit() {
        let event = runner.step();
        if app.handle(event)? {
            terminal.draw(|f| ui::draw(app, &theme, f))?;
        }
    }

    info!("exiting");
    Ok(())
}
