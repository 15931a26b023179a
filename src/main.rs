use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use cube_dash::audio::JumpSound;
use cube_dash::config::{self, AppPaths, CliCommand, Settings};
use cube_dash::game::{process_input, tick_dash, GameState, InputEffect};
use cube_dash::input::{map_key, KeyAction};
use cube_dash::{build_info, logging, ui, TICK_INTERVAL_MICROS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let options = match config::parse_args(std::env::args().skip(1)) {
        Ok(CliCommand::Play(options)) => options,
        Ok(CliCommand::Help) => {
            println!("{}", config::USAGE);
            return Ok(());
        }
        Ok(CliCommand::Version) => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'cube-dash --help' for usage.");
            std::process::exit(1);
        }
    };

    let paths = AppPaths::new()?;
    let settings_path = paths.settings_path();
    let (mut settings, settings_error) = match Settings::load_or_init(&settings_path) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    settings.apply_cli(&options);

    if let Err(e) = paths
        .log_path()
        .and_then(|path| logging::init_file_logger(&path, &settings.log_level))
    {
        eprintln!("Logging disabled: {}", e);
    }

    log::info!("Starting {}", build_info::version_line());
    if let Some(e) = settings_error {
        log::warn!(
            "Could not load {}, using defaults: {}",
            settings_path.display(),
            e
        );
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let sound = if settings.sound_enabled {
        JumpSound::load(&settings.jump_sound)
    } else {
        JumpSound::silent()
    };
    log::info!(
        "Jump sound {}",
        if sound.is_available() {
            "enabled"
        } else {
            "off"
        }
    );

    let mut terminal = setup_terminal()?;
    let result = run_game(&mut terminal, &mut rng, &sound);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Raw mode plus alternate screen. If any step after enabling raw mode
/// fails, the terminal is put back before the error is returned.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;

    let setup = || -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        Ok(terminal)
    };

    undo_on_error(setup(), || {
        let _ = io::stdout().execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
}

/// Run `undo` only when `result` is an error, then pass the result through.
fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// Fixed-rate loop: draw, drain input until the next frame is due, then
/// advance physics by the elapsed time. Input always lands before the
/// physics steps of the same frame.
fn run_game<B: Backend>(
    terminal: &mut Terminal<B>,
    rng: &mut StdRng,
    sound: &JumpSound,
) -> io::Result<()> {
    let mut game = GameState::new();
    let frame_budget = Duration::from_micros(TICK_INTERVAL_MICROS);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, &game))?;

        let deadline = last_frame + frame_budget;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match map_key(key) {
                KeyAction::Quit => {
                    log::info!("Quit with score {}", game.score);
                    return Ok(());
                }
                KeyAction::Game(input) => {
                    if process_input(&mut game, input, rng) == InputEffect::Jumped {
                        sound.play();
                    }
                }
            }
        }

        let now = Instant::now();
        let dt_us = now.duration_since(last_frame).as_micros() as u64;
        last_frame = now;
        tick_dash(&mut game, dt_us, rng);
    }
}
