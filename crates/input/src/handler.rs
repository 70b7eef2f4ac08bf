//! DAS/ARR input handler for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a
//! timeout. Horizontal movement repeats through DAS/ARR; the soft-drop
//! key is tracked as a held flag that the game loop passes into gravity.

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: std::time::Instant,
    das_timer: u32,
    arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

// In terminals without key-release events, a short timeout prevents a single
// tap from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: std::time::Instant::now(),
            das_timer: 0,
            arr_accumulator: 0,
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Whether the soft-drop key is currently held.
    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == HorizontalDirection::Left {
                    None
                } else {
                    self.horizontal = HorizontalDirection::Left;
                    self.das_timer = 0;
                    self.arr_accumulator = 0;
                    Some(GameAction::MoveLeft)
                }
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == HorizontalDirection::Right {
                    None
                } else {
                    self.horizontal = HorizontalDirection::Right;
                    self.das_timer = 0;
                    self.arr_accumulator = 0;
                    Some(GameAction::MoveRight)
                }
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
                self.last_key_time = std::time::Instant::now();
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    Some(GameAction::SoftDrop)
                }
            }
            _ => None,
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
                if self.horizontal == HorizontalDirection::Left {
                    self.stop_horizontal();
                }
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
                if self.horizontal == HorizontalDirection::Right {
                    self.stop_horizontal();
                }
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
                self.down_held = false;
            }
            _ => {}
        }
    }

    fn stop_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Advance timers and collect auto-repeat actions for this tick.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // Auto-release when the terminal does not emit release events.
        let time_since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if time_since_last_key > self.key_release_timeout_ms {
            if self.horizontal != HorizontalDirection::None {
                self.stop_horizontal();
            }
            self.down_held = false;
        }

        match self.horizontal {
            HorizontalDirection::Left | HorizontalDirection::Right => {
                let prev_das = self.das_timer;
                self.das_timer += elapsed_ms;

                if self.das_timer >= self.das_delay {
                    let excess = if prev_das < self.das_delay {
                        self.das_timer - self.das_delay
                    } else {
                        elapsed_ms
                    };
                    self.arr_accumulator += excess;

                    while self.arr_accumulator >= self.arr_rate {
                        let action = match self.horizontal {
                            HorizontalDirection::Left => GameAction::MoveLeft,
                            HorizontalDirection::Right => GameAction::MoveRight,
                            HorizontalDirection::None => break,
                        };
                        let _ = actions.try_push(action);
                        self.arr_accumulator -= self.arr_rate;
                    }
                }
            }
            HorizontalDirection::None => {
                self.das_timer = 0;
                self.arr_accumulator = 0;
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.last_key_time = std::time::Instant::now();
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));

        // Before DAS expires: no repeats.
        let actions = ih.update(99);
        assert!(actions.is_empty());

        // Exactly at DAS: still no repeats (needs excess over DAS to accumulate ARR).
        let actions = ih.update(1);
        assert!(actions.is_empty());

        // First ARR interval after DAS: one repeat.
        let actions = ih.update(25);
        assert_eq!(actions.as_slice(), &[GameAction::MoveLeft]);

        // Another ARR interval: one repeat again.
        let actions = ih.update(25);
        assert_eq!(actions.as_slice(), &[GameAction::MoveLeft]);
    }

    #[test]
    fn test_repeated_press_of_same_direction_is_ignored() {
        let mut ih = InputHandler::new();

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(ih.handle_key_press(KeyCode::Left), None);

        // Switching direction emits the new move immediately.
        assert_eq!(
            ih.handle_key_press(KeyCode::Right),
            Some(GameAction::MoveRight)
        );
    }

    #[test]
    fn test_soft_drop_hold_and_release() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        assert!(!ih.soft_drop_held());

        // Initial press emits one immediate step and latches the hold.
        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(GameAction::SoftDrop));
        assert!(ih.soft_drop_held());
        assert_eq!(ih.handle_key_press(KeyCode::Down), None);

        // The hold never turns into repeated actions; gravity handles cadence.
        assert!(ih.update(1000).is_empty());
        assert!(ih.soft_drop_held());

        ih.handle_key_release(KeyCode::Down);
        assert!(!ih.soft_drop_held());
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(GameAction::SoftDrop));

        // Simulate no key-release events by moving the last key time into the past.
        ih.last_key_time = std::time::Instant::now() - std::time::Duration::from_millis(51);

        let actions = ih.update(0);
        assert!(actions.is_empty());
        assert_eq!(ih.horizontal, HorizontalDirection::None);
        assert!(!ih.soft_drop_held());
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }
}
