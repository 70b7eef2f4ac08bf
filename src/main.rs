//! Terminal blockfall runner (default binary).
//!
//! Wires crossterm input, the framebuffer renderer, and the optional score
//! client around the core game loop. The score client is fire-and-forget:
//! its commands and notices cross the loop boundary through non-blocking
//! channels and can never stall a frame.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::client::{ClientCommand, ClientNotice, ScoreClient};
use blockfall::core::GameState;
use blockfall::input::{handle_key_event, should_quit, InputHandler};
use blockfall::term::{GameView, HudInfo, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, ScoreEvent, TICK_MS};

/// How long a HUD notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(4);

fn main() -> Result<()> {
    init_logging();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file when `BLOCKFALL_LOG` names one; stdout belongs to the
/// alternate screen.
fn init_logging() {
    let Ok(path) = std::env::var("BLOCKFALL_LOG") else {
        return;
    };
    match std::fs::File::create(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(err) => eprintln!("cannot open log file {path}: {err}"),
    }
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut game = GameState::new(seed);
    info!("new game, seed {seed}");

    let mut client = ScoreClient::start_from_env();
    if client.is_none() {
        info!("score service not configured, running offline");
    }
    let mut hud = HudInfo::default();
    let mut notice_expiry: Option<Instant> = None;

    let view = GameView::default();
    let mut input = InputHandler::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        if notice_expiry.is_some_and(|t| Instant::now() >= t) {
            hud.notice = None;
            notice_expiry = None;
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let mut fb = view.render(&game.snapshot(), &hud, Viewport::new(w, h));
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }

                        if let Some(action) = input.handle_key_press(key.code) {
                            game.apply_action(action);
                        } else if let Some(action) = handle_key_event(key) {
                            match action {
                                GameAction::MoveLeft
                                | GameAction::MoveRight
                                | GameAction::SoftDrop => {
                                    // Held-key state already tracked above.
                                }
                                _ => {
                                    game.apply_action(action);
                                }
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; DAS/ARR handles repeats.
                    }
                    KeyEventKind::Release => {
                        input.handle_key_release(key.code);
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for action in input.update(TICK_MS) {
                game.apply_action(action);
            }
            game.tick(TICK_MS, input.soft_drop_held());

            for event in game.take_events() {
                if let ScoreEvent::GameOver { score } = event {
                    info!("round over, score {score}");
                }
                if let Some(client) = &client {
                    match event {
                        ScoreEvent::GameOver { score } => {
                            client.send(ClientCommand::SubmitScore(score));
                        }
                        ScoreEvent::BestScoreQuery => {
                            client.send(ClientCommand::FetchGlobalBest);
                        }
                    }
                }
            }

            if let Some(client) = &mut client {
                while let Some(notice) = client.try_recv() {
                    match notice {
                        ClientNotice::LoggedIn => hud.logged_in = true,
                        ClientNotice::GlobalBest(best) => hud.best_score = best,
                        ClientNotice::AccountBest(best) => {
                            hud.notice = Some(format!("your best: {best}"));
                            notice_expiry = Some(Instant::now() + NOTICE_TTL);
                        }
                        ClientNotice::Error(msg) => {
                            hud.notice = Some(msg);
                            notice_expiry = Some(Instant::now() + NOTICE_TTL);
                        }
                    }
                }
            }
        }
    }
}
