//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! repaints the whole screen. Later frames only repaint the horizontal runs of
//! cells that differ from the previous frame, which for a board that changes
//! a few cells per event keeps output to a handful of bytes.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written, if it is still what the terminal shows.
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
    mouse: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    /// Renderer with mouse capture (click-to-select) enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(8 * 1024),
            mouse: true,
        }
    }

    /// Skip mouse capture (keyboard-only terminals).
    pub fn without_mouse(mut self) -> Self {
        self.mouse = false;
        self
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        if self.mouse {
            self.out.queue(EnableMouseCapture)?;
        }
        self.out
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.write_out()
    }

    /// Undo [`TerminalRenderer::enter`]. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        if self.mouse {
            self.out.queue(DisableMouseCapture)?;
        }
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint everything (terminal resized).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb`, then hand the caller back the previous frame's buffer.
    ///
    /// Keep one `FrameBuffer` and pass it every frame; the two buffers
    /// alternate so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut spare = match self.shown.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.out)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.out)?;
                let mut spare = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                spare.resize(fb.width(), fb.height());
                spare
            }
        };
        self.write_out()?;

        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Emits style changes only when the next cell's style differs.
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn new() -> Self {
        Self { style: None }
    }

    fn print(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            set_style(out, cell.style)?;
            self.style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a full-screen repaint of `fb` into `out` (no I/O).
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::new();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            pen.print(out, fb.get(x, y).unwrap_or_default())?;
        }
    }
    pen.finish(out)
}

/// Encode only the cells of `next` that differ from `prev` into `out` (no I/O).
///
/// Both frames must have the same size; a size mismatch repaints every row.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::new();
    for run in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            pen.print(out, next.get(x, run.y).unwrap_or_default())?;
        }
    }
    pen.finish(out)
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    // Attribute::Reset clears colors too, so it goes first.
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetForegroundColor(color(style.fg)))?
        .queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// A horizontal stretch of changed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
    let (w, h) = (next.width(), next.height());
    if prev.width() != w || prev.height() != h {
        return (0..h).map(|y| Run { x: 0, y, len: w }).collect();
    }

    let differs = |x: u16, y: u16| prev.get(x, y) != next.get(x, y);
    let mut runs = Vec::new();
    for y in 0..h {
        let mut x = 0;
        while x < w {
            if !differs(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && differs(x, y) {
                x += 1;
            }
            runs.push(Run {
                x: start,
                y,
                len: x - start,
            });
        }
    }
    runs
}
