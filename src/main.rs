//! Cat Disaster - terminal entry point

use std::io::{BufWriter, Write, stdout};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal,
};

use cat_disaster::consts::TICK_RATE;
use cat_disaster::platform::{KeyTracker, storage};
use cat_disaster::renderer::terminal::{HudInfo, render_frame, render_menu, render_options};
use cat_disaster::sim::GameEvent;
use cat_disaster::ui::{MainMenu, MenuItem, OptionsMenu};
use cat_disaster::{Game, HighScore, Settings, Tuning};

/// Target frame time: one simulation tick per frame
const FRAME: Duration = Duration::from_millis(20);

/// Send log output to a file, since the terminal is busy drawing the game
fn init_logging() {
    let dir = storage::data_dir();
    let _ = std::fs::create_dir_all(&dir);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(storage::log_path());

    if let Ok(file) = file {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}

fn main() -> std::io::Result<()> {
    init_logging();
    log::info!("Cat Disaster starting...");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key release events where the terminal supports them
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = run(&mut out);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("Terminal error: {}", err);
    }
    log::info!("Bye");
    result
}

/// Blocking read of the next key press
fn next_key() -> std::io::Result<KeyCode> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(key.code);
            }
        }
    }
}

fn run<W: Write>(out: &mut W) -> std::io::Result<()> {
    let mut settings = Settings::load();
    let base_tuning = Tuning::load(&storage::tuning_path());
    let mut menu = MainMenu::default();
    let mut keys = KeyTracker::default();

    loop {
        render_menu(out, &menu, HighScore::load().highscore)?;
        match next_key()? {
            KeyCode::Up | KeyCode::Char('w') => menu.up(),
            KeyCode::Down | KeyCode::Char('s') => menu.down(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
            KeyCode::Enter | KeyCode::Char(' ') => match menu.selected() {
                MenuItem::Start => {
                    let tuning = settings.session_tuning(&base_tuning);
                    let mut game = Game::new(new_seed(), tuning, storage::highscore_path());
                    keys.reset();
                    if play(out, &mut game, &mut keys, &settings)? {
                        break;
                    }
                }
                MenuItem::Options => options(out, &mut settings)?,
                MenuItem::Quit => break,
            },
            _ => {}
        }
    }
    Ok(())
}

fn options<W: Write>(out: &mut W, settings: &mut Settings) -> std::io::Result<()> {
    let mut menu = OptionsMenu::default();
    loop {
        render_options(out, &menu, settings)?;
        match next_key()? {
            KeyCode::Up | KeyCode::Char('w') => menu.up(),
            KeyCode::Down | KeyCode::Char('s') => menu.down(),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                if menu.activate(settings) {
                    break;
                }
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => break,
            _ => {}
        }
    }
    settings.save();
    Ok(())
}

/// Run one session. Returns `true` to quit the program, `false` for the menu.
fn play<W: Write>(
    out: &mut W,
    game: &mut Game,
    keys: &mut KeyTracker,
    settings: &Settings,
) -> std::io::Result<bool> {
    let mut last_frame = Instant::now();
    let mut fps = FpsCounter::default();

    loop {
        let frame_start = Instant::now();
        keys.begin_frame();

        // Drain pending input without blocking
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                keys.handle(&key);
            }
        }
        if keys.quit_requested() {
            return Ok(true);
        }
        let restart = keys.take_restart();
        if restart && game.state.is_over() {
            return Ok(false);
        }

        game.input = keys.tick_input();
        let dt = last_frame.elapsed().as_secs_f32();
        last_frame = frame_start;
        game.update(dt);

        if settings.bell_on_hit
            && game
                .events()
                .iter()
                .any(|e| matches!(e, GameEvent::CatKilled { .. } | GameEvent::CatHit { .. }))
        {
            out.execute(Print('\x07'))?;
        }

        let hud = HudInfo {
            highscore: game.highscore(),
            fps: settings.show_fps.then(|| fps.tick(frame_start)),
            difficulty: settings.difficulty.as_str(),
        };
        render_frame(out, &game.snapshot(), &hud)?;

        if game.is_finished() {
            return Ok(false);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

fn new_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// Frames per second over the last 50 frames
#[derive(Default)]
struct FpsCounter {
    frames: std::collections::VecDeque<Instant>,
}

impl FpsCounter {
    fn tick(&mut self, now: Instant) -> u32 {
        self.frames.push_back(now);
        if self.frames.len() > TICK_RATE as usize {
            self.frames.pop_front();
        }
        match self.frames.front() {
            Some(&oldest) if self.frames.len() > 1 => {
                let secs = now.duration_since(oldest).as_secs_f32();
                if secs > 0.0 {
                    ((self.frames.len() - 1) as f32 / secs).round() as u32
                } else {
                    0
                }
            }
            _ => 0,
        }
    }
}
