use anzan::{
    app::App,
    config::{ConfigStore, FileConfigStore},
    runtime::{CrosstermEventSource, QuizEvent, Runner},
    TICK_RATE_MS,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

/// tiny mental-arithmetic quiz for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A tiny mental-arithmetic quiz: four questions per round (two additions, two subtractions), typed answers, cue bells, confetti, and an accuracy score."
)]
pub struct Cli {
    /// seed for the problem generator, for reproducible sessions
    #[clap(long)]
    seed: Option<u64>,

    /// disable the terminal bell cues
    #[clap(long)]
    no_sound: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut config = FileConfigStore::new().load();
    if cli.no_sound {
        config.sound = false;
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, cli.seed);
    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let events = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    let size = terminal.size()?;
    app.view.term_size = (size.width, size.height);
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match events.step() {
            QuizEvent::Tick => {
                app.on_tick();
                // Only redraw when something is actually moving.
                if app.is_animating() {
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
            }
            QuizEvent::Resize => {
                let size = terminal.size()?;
                app.view.term_size = (size.width, size.height);
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            QuizEvent::Input(intent) => {
                if !app.handle(intent) {
                    break;
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}
