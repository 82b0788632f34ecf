//! BoardView: maps the presenter board into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested. The same layout math
//! backs [`BoardView::cell_at`], so pointer hit-testing always agrees with
//! what was drawn.

use crate::core::SessionStats;
use crate::engine::Presenter;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Coord, Emphasis, TokenColor};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterStatusView {
    pub client_count: u16,
    pub controller_id: Option<usize>,
}

/// Everything one frame needs.
#[derive(Debug, Clone, Copy)]
pub struct BoardFrame<'a> {
    pub presenter: &'a Presenter,
    /// Keyboard cursor, if shown.
    pub cursor: Option<Coord>,
    pub stats: SessionStats,
    pub busy: bool,
    pub adapter: Option<&'a AdapterStatusView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen rectangle of the bordered board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A terminal renderer for the match-3 board.
#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for BoardView {
    fn default() -> Self {
        // 4x2 keeps cells roughly square and easy to click.
        Self {
            cell_w: 4,
            cell_h: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn layout(&self, rows: usize, columns: usize, viewport: Viewport) -> Layout {
        let w = (columns as u16).saturating_mul(self.cell_w).saturating_add(2);
        let h = (rows as u16).saturating_mul(self.cell_h).saturating_add(2);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Layout { x, y, w, h }
    }

    /// Map a terminal position to the board cell drawn there.
    pub fn cell_at(
        &self,
        rows: usize,
        columns: usize,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) -> Option<Coord> {
        let l = self.layout(rows, columns, viewport);
        let px = x.checked_sub(l.x + 1)?;
        let py = y.checked_sub(l.y + 1)?;
        let column = (px / self.cell_w) as usize;
        let row = (py / self.cell_h) as usize;
        (row < rows && column < columns).then_some(Coord::new(row, column))
    }

    /// Render a frame into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, frame: &BoardFrame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board = frame.presenter;
        let l = self.layout(board.rows(), board.columns(), viewport);

        let border = CellStyle::fg(Rgb::new(200, 200, 200), Rgb::BLACK);
        fb.fill_rect(
            l.x + 1,
            l.y + 1,
            l.w.saturating_sub(2),
            l.h.saturating_sub(2),
            ' ',
            CellStyle::fg(Rgb::new(80, 80, 90), BOARD_BG),
        );
        self.draw_border(fb, l, border);

        for row in 0..board.rows() {
            for column in 0..board.columns() {
                let coord = Coord::new(row, column);
                match board.token(coord) {
                    Some(color) => {
                        let fg = match board.emphasis(coord) {
                            Emphasis::Highlighted => Rgb::WHITE,
                            Emphasis::Normal => token_rgb(color),
                        };
                        let style = CellStyle {
                            fg,
                            bg: BOARD_BG,
                            bold: true,
                            dim: false,
                        };
                        self.fill_cell_rect(fb, l, coord, '█', style);
                    }
                    None => {
                        let style = CellStyle {
                            fg: Rgb::new(90, 90, 100),
                            bg: BOARD_BG,
                            bold: false,
                            dim: true,
                        };
                        self.fill_cell_rect(fb, l, coord, '·', style);
                    }
                }
            }
        }

        if let Some(cursor) = frame.cursor {
            self.draw_cursor(fb, l, cursor);
        }

        self.draw_side_panel(fb, frame, viewport, l);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &BoardFrame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, l: Layout, style: CellStyle) {
        if l.w < 2 || l.h < 2 {
            return;
        }
        let (x, y, w, h) = (l.x, l.y, l.w, l.h);

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

    fn cell_origin(&self, l: Layout, coord: Coord) -> (u16, u16) {
        (
            l.x + 1 + coord.column as u16 * self.cell_w,
            l.y + 1 + coord.row as u16 * self.cell_h,
        )
    }

    fn fill_cell_rect(&self, fb: &mut FrameBuffer, l: Layout, coord: Coord, ch: char, style: CellStyle) {
        let (px, py) = self.cell_origin(l, coord);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, l: Layout, cursor: Coord) {
        if self.cell_w < 2 {
            return;
        }
        let (px, py) = self.cell_origin(l, cursor);
        let style = CellStyle {
            fg: Rgb::WHITE,
            bg: Rgb::new(60, 60, 70),
            bold: true,
            dim: false,
        };
        for dy in 0..self.cell_h {
            fb.put_char(px, py + dy, '[', style);
            fb.put_char(px + self.cell_w - 1, py + dy, ']', style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, frame: &BoardFrame<'_>, viewport: Viewport, l: Layout) {
        let panel_x = l.x.saturating_add(l.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::fg(Rgb::new(200, 200, 200), Rgb::BLACK);

        let mut y = l.y;
        for (name, n) in [
            ("SWAPS", frame.stats.swaps_attempted),
            ("KEPT", frame.stats.swaps_kept),
            ("CLEARED", frame.stats.tokens_cleared),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, n, value);
            y = y.saturating_add(2);
        }

        if frame.busy {
            let busy = CellStyle {
                fg: Rgb::new(240, 200, 80),
                bold: true,
                ..value
            };
            fb.put_str(panel_x, y, "BUSY", busy);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "AI", label);
        y = y.saturating_add(1);
        match frame.adapter {
            Some(st) => {
                let x = fb.put_str(panel_x, y, "ON ", value);
                fb.put_u32(x, y, st.client_count as u32, value);
                y = y.saturating_add(1);
                let x = fb.put_str(panel_x, y, "CTRL ", value);
                match st.controller_id {
                    Some(id) => fb.put_u32(x, y, id as u32, value),
                    None => fb.put_str(x, y, "-", value),
                };
            }
            None => {
                fb.put_str(panel_x, y, "OFF", value);
            }
        }
    }
}

/// Display color of a token.
pub fn token_rgb(color: TokenColor) -> Rgb {
    match color {
        TokenColor::Red => Rgb::new(220, 60, 60),
        TokenColor::Green => Rgb::new(80, 200, 90),
        TokenColor::Blue => Rgb::new(70, 110, 230),
        TokenColor::Yellow => Rgb::new(240, 220, 80),
        TokenColor::Magenta => Rgb::new(210, 80, 210),
        TokenColor::Cyan => Rgb::new(80, 220, 220),
    }
}
