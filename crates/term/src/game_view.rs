//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb};
use crate::types::{GameStatus, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Display-only state fed by the score client, rendered beside the board.
#[derive(Debug, Clone, Default)]
pub struct HudInfo {
    /// Global best score, if a fetch has succeeded.
    pub best_score: Option<u32>,
    pub logged_in: bool,
    /// Transient notice line (network errors, submitted-score results).
    pub notice: Option<String>,
}

/// A lightweight terminal renderer for the falling-block game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

const BOARD_BG: Rgb = Rgb::new(24, 26, 34);

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render a snapshot and HUD into a framebuffer sized to the viewport.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudInfo, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: BOARD_BG,
            bold: false,
            dim: false,
        };
        let border = CellStyle::plain(Rgb::new(200, 200, 200));

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Locked board cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.board[y as usize][x as usize] {
                    Some(kind) => self.draw_board_cell(&mut fb, start_x, start_y, x, y, kind),
                    None => self.draw_empty_cell(&mut fb, start_x, start_y, x, y),
                }
            }
        }

        // Ghost piece, drawn under the active piece.
        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost_style = CellStyle {
                fg: Rgb::new(140, 140, 140),
                bg: BOARD_BG,
                bold: false,
                dim: true,
            };
            for &(dx, dy) in get_shape(active.kind, active.rotation).iter() {
                self.draw_piece_mino(
                    &mut fb,
                    start_x,
                    start_y,
                    active.x + dx,
                    ghost_y + dy,
                    '░',
                    ghost_style,
                );
            }
        }

        // Active piece.
        if let Some(active) = snap.active {
            let style = CellStyle {
                fg: piece_color(active.kind),
                bg: BOARD_BG,
                bold: true,
                dim: false,
            };
            for &(dx, dy) in get_shape(active.kind, active.rotation).iter() {
                self.draw_piece_mino(
                    &mut fb,
                    start_x,
                    start_y,
                    active.x + dx,
                    active.y + dy,
                    '█',
                    style,
                );
            }
        }

        self.draw_side_panel(&mut fb, snap, hud, viewport, start_x, start_y, frame_w);

        match snap.status {
            GameStatus::NotStarted => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "PRESS ANY KEY")
            }
            GameStatus::Paused => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED")
            }
            GameStatus::GameOver => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            GameStatus::Running => {}
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(70, 74, 86),
            bg: BOARD_BG,
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle {
            fg: piece_color(kind),
            bg: BOARD_BG,
            bold: false,
            dim: false,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    /// Draw one mino of a floating piece, clipping rows above the board.
    #[allow(clippy::too_many_arguments)]
    fn draw_piece_mino(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, ch, style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudInfo,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200));

        let mut y = start_y;
        for (name, val) in [
            ("SCORE", snap.score.to_string()),
            ("LEVEL", snap.level.to_string()),
            ("LINES", snap.lines.to_string()),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, &val, value);
            y = y.saturating_add(3);
        }

        // Global best, placeholder until the client reports one.
        fb.put_str(panel_x, y, "BEST", label);
        let best = hud
            .best_score
            .map(|b| b.to_string())
            .unwrap_or_else(|| "---".to_string());
        fb.put_str(panel_x, y + 1, &best, value);
        if hud.logged_in && panel_w >= best.len() as u16 + 3 {
            fb.put_str(
                panel_x + best.len() as u16 + 1,
                y + 1,
                "●",
                CellStyle::plain(Rgb::new(100, 220, 120)),
            );
        }
        y = y.saturating_add(3);

        // Next piece preview, drawn as its spawn-rotation bitmap.
        fb.put_str(panel_x, y, "NEXT", label);
        let next_style = CellStyle::plain(piece_color(snap.next));
        for &(dx, dy) in get_shape(snap.next, 0).iter() {
            let px = panel_x + (dx as u16) * self.cell_w;
            let py = y + 1 + dy as u16;
            if py < viewport.height {
                fb.fill_rect(px, py, self.cell_w, 1, '█', next_style);
            }
        }
        y = y.saturating_add(6);

        if let Some(notice) = &hud.notice {
            let notice_style = CellStyle {
                fg: Rgb::new(240, 200, 120),
                bg: Rgb::new(0, 0, 0),
                bold: false,
                dim: false,
            };
            fb.put_str(panel_x, y, notice, notice_style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Palette carried over from the original canvas rendition.
fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0x46, 0xd5, 0xff),
        PieceKind::O => Rgb::new(0xff, 0xd5, 0x4a),
        PieceKind::T => Rgb::new(0xb4, 0x7b, 0xff),
        PieceKind::S => Rgb::new(0x6d, 0xff, 0x8f),
        PieceKind::Z => Rgb::new(0xff, 0x5c, 0x7a),
        PieceKind::J => Rgb::new(0x5c, 0x85, 0xff),
        PieceKind::L => Rgb::new(0xff, 0x9b, 0x4a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn fb_text(fb: &FrameBuffer) -> String {
        let mut out = String::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                out.push(fb.get(x, y).unwrap().ch);
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_render_running_game_shows_hud_labels() {
        let mut state = GameState::new(1);
        state.start();
        let snap = state.snapshot();

        let view = GameView::default();
        let fb = view.render(&snap, &HudInfo::default(), Viewport::new(80, 24));
        let text = fb_text(&fb);

        assert!(text.contains("SCORE"));
        assert!(text.contains("LEVEL"));
        assert!(text.contains("LINES"));
        assert!(text.contains("NEXT"));
        assert!(text.contains("BEST"));
        assert!(text.contains("---"), "placeholder best before any fetch");
        assert!(!text.contains("PAUSED"));
    }

    #[test]
    fn test_render_overlays_by_status() {
        let mut state = GameState::new(1);
        let view = GameView::default();
        let viewport = Viewport::new(80, 24);
        let hud = HudInfo::default();

        let text = fb_text(&view.render(&state.snapshot(), &hud, viewport));
        assert!(text.contains("PRESS ANY KEY"));

        state.start();
        state.toggle_pause();
        let text = fb_text(&view.render(&state.snapshot(), &hud, viewport));
        assert!(text.contains("PAUSED"));
    }

    #[test]
    fn test_render_hud_best_and_notice() {
        let state = GameState::new(1);
        let view = GameView::default();
        let hud = HudInfo {
            best_score: Some(4200),
            logged_in: true,
            notice: Some("score service unreachable".to_string()),
        };

        let text = fb_text(&view.render(&state.snapshot(), &hud, Viewport::new(100, 30)));
        assert!(text.contains("4200"));
        assert!(text.contains("score service unreachable"));
    }

    #[test]
    fn test_render_fits_tiny_viewport_without_panicking() {
        let mut state = GameState::new(1);
        state.start();
        let view = GameView::default();

        let fb = view.render(&state.snapshot(), &HudInfo::default(), Viewport::new(10, 5));
        assert_eq!(fb.width(), 10);
        assert_eq!(fb.height(), 5);
    }
}
