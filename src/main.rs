use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Builder, Env, Target};
use log::{error, info};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use termarcade::app::App;
use termarcade::cli::Cli;
use termarcade::config::Settings;
use termarcade::event::{Event, EventHandler};
use termarcade::games::hangman::console;
use termarcade::games::hangman::drawings::AssetDrawings;
use termarcade::games::hangman::round::Round;
use termarcade::games::hangman::words::WordSource;
use termarcade::rng::GameRng;
use termarcade::ui;

type Backend = CrosstermBackend<io::Stdout>;

fn init_logging(cli: &Cli, plain: bool) -> Result<()> {
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        // Writing to stderr would tear the full-screen UI
        None if plain => {
            Builder::from_env(Env::default().default_filter_or("warn")).init();
        }
        None => {
            Builder::from_env(Env::default().default_filter_or("off")).init();
        }
    }
    Ok(())
}

fn play_plain(settings: &Settings) -> Result<()> {
    let mut rng = GameRng::from_seed_or_entropy(settings.seed);
    info!("plain hangman, seed {}", rng.seed());
    let dictionary = settings.hangman.dictionary().context("loading word list")?;
    let drawings = AssetDrawings::new(&settings.hangman.assets);
    let mut round = Round::new(dictionary.choose(&mut rng));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    console::play(&mut round, &drawings, &mut input, &mut out)?;
    Ok(())
}

/// Runs `rollback` when `step` failed, keeping the step's error.
fn rollback_on_error<T>(step: Result<T>, rollback: impl FnOnce() -> Result<()>) -> Result<T> {
    if step.is_err() {
        if let Err(e) = rollback() {
            error!("undoing terminal setup failed: {:#}", e);
        }
    }
    step
}

/// The session's own error wins over a failed restore.
fn session_result(run: Result<()>, restore: Result<()>) -> Result<()> {
    match (run, restore) {
        (Err(e), Err(restore_err)) => {
            error!("restoring the terminal failed: {:#}", restore_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restore) => restore,
    }
}

fn enter_screen() -> Result<Terminal<Backend>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn leave_screen() -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode().context("enabling raw mode")?;
    rollback_on_error(enter_screen(), leave_screen)
}

fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(terminal: &mut Terminal<Backend>, app: &mut App) -> Result<()> {
    let mut events = EventHandler::new(app.tick_rate());

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        events.set_tick_rate(app.tick_rate());
        match events.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
            Event::Resize(_, _) => terminal.autoresize()?,
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;
    init_logging(&cli, settings.plain)?;

    if settings.plain {
        return play_plain(&settings);
    }

    let mut app = App::new(&settings)?;
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app);
    let restored = restore_terminal(&mut terminal);
    info!("session over");
    session_result(result, restored)
}
