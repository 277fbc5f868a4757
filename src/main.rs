use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;

use pacman::game::{Game, Status};
use pacman::level::Dir;
use pacman::render::{render, render_outcome, Renderer};

const DEFAULT_TICK_MS: u64 = 120;
const DEFAULT_RENDER_FPS: u64 = 60;

fn main() -> Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    // Always restore the terminal, even when the loop errored.
    let _ = stdout.execute(Show);
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    result
}

fn run(stdout: &mut Stdout) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut game = Game::new(&mut rng);
    let mut renderer = Renderer::new(game.level.width(), game.level.height());
    let (tick_ms, render_fps) = read_speed_settings();
    let tick_time = Duration::from_millis(tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));

    let mut last_tick = Instant::now();
    let mut pending: Option<Dir> = None;

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Up | KeyCode::Char('k') => pending = Some(Dir::Up),
                    KeyCode::Down | KeyCode::Char('j') => pending = Some(Dir::Down),
                    KeyCode::Left | KeyCode::Char('h') => pending = Some(Dir::Left),
                    KeyCode::Right | KeyCode::Char('l') => pending = Some(Dir::Right),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_time {
            last_tick = Instant::now();
            game.tick(pending.take(), &mut rng);
        }
        render(stdout, &game, &mut renderer)?;

        if game.status != Status::Playing {
            render_outcome(stdout, &game)?;
            return wait_for_quit();
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn read_speed_settings() -> (u64, u64) {
    let tick_ms = std::env::var("PACMAN_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let render_fps = std::env::var("PACMAN_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    (tick_ms, render_fps)
}

fn wait_for_quit() -> Result<()> {
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(());
                }
            }
        }
    }
}
