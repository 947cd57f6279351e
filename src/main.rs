use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use quizcade::app::App;
use quizcade::config::Config;
use quizcade::event::{Event, EventHandler};
use quizcade::games::GameKind;
use quizcade::progress::{LedgerSink, ProgressReporter};
use quizcade::{logging, ui, Error, Result};

const TICK_RATE: Duration = Duration::from_millis(16); // ~60 FPS
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

struct Args {
    config: Option<PathBuf>,
    game: Option<GameKind>,
}

enum Command {
    Play(Args),
    List,
    Help,
}

fn usage() -> String {
    let slugs: Vec<&str> = GameKind::all().iter().map(|k| k.slug()).collect();
    format!(
        "Usage: quizcade [--config PATH] [GAME]\n       quizcade list\n\nGames: {}",
        slugs.join(", ")
    )
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let mut parsed = Args { config: None, game: None };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "list" if parsed.game.is_none() => return Ok(Command::List),
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| Error::Usage(format!("--config needs a path\n\n{}", usage())))?;
                parsed.config = Some(PathBuf::from(path));
            }
            slug if parsed.game.is_none() => {
                let kind = GameKind::from_slug(slug)
                    .ok_or_else(|| Error::Usage(format!("unknown game '{slug}'\n\n{}", usage())))?;
                parsed.game = Some(kind);
            }
            other => return Err(Error::Usage(format!("unexpected argument '{other}'\n\n{}", usage()))),
        }
    }
    Ok(Command::Play(parsed))
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = match parse_args(env::args().skip(1))? {
        Command::Help => {
            println!("{}", usage());
            return Ok(());
        }
        Command::List => {
            for kind in GameKind::all() {
                println!("{:<16}{}", kind.slug(), kind.description().replace('\n', " "));
            }
            return Ok(());
        }
        Command::Play(args) => args,
    };

    let config = Config::load(args.config.as_deref())?;
    logging::init(&config.log, &config.log_path())?;

    let reporter = if config.progress.enabled {
        let ledger = config.ledger_path();
        log::info!("recording progress in {}", ledger.display());
        ProgressReporter::spawn(LedgerSink::new(ledger), config.player.clone())
    } else {
        ProgressReporter::disabled(config.player.clone())
    };

    let mut app = App::new(config, reporter.clone());
    if let Some(kind) = args.game {
        app.open(kind);
    }

    enable_raw_mode()?;
    let result = run_tui(&mut app);
    let restored = restore_terminal();

    // Screens hold reporter clones; drop them so the worker can drain.
    drop(app);
    reporter.shutdown(SHUTDOWN_GRACE);

    log::info!("bye");
    result.and(restored)
}

fn run_tui(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    run_loop(&mut terminal, app)
}

// Runs after any partial setup, so each step is attempted even if one fails.
fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;
    raw?;
    Ok(())
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let event_handler = EventHandler::new(TICK_RATE);

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            Event::Tick(elapsed) => app.on_tick(elapsed),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
