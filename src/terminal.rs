// Copyright (c) 2026 the snowfall authors

use std::io::{stdout, Result, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::frame::{Cell, Frame};

pub struct Terminal {
    stdout: Stdout,
    last: Vec<Cell>,
    last_size: (u16, u16),
    run_buf: String,
}

struct StyleState {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last: Vec::new(),
            last_size: (0, 0),
            run_buf: String::with_capacity(64),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        if self.last_size != (frame.width, frame.height) {
            self.draw_full(frame)
        } else {
            self.draw_diff(frame)
        }
    }

    fn draw_full(&mut self, frame: &Frame) -> Result<()> {
        let mut style = StyleState {
            fg: None,
            bg: None,
            bold: false,
        };

        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        for y in 0..frame.height {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            let row = usize::from(y) * usize::from(frame.width);
            for x in 0..usize::from(frame.width) {
                let cell = frame.cells()[row + x];
                apply_style(&mut self.stdout, &mut style, &cell)?;
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.last.clear();
        self.last.extend_from_slice(frame.cells());
        self.last_size = (frame.width, frame.height);

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()
    }

    // Diff pass (same size as last frame, changed same-style runs only)
    fn draw_diff(&mut self, frame: &Frame) -> Result<()> {
        let mut style = StyleState {
            fg: None,
            bg: None,
            bold: false,
        };
        let mut cur_pos: Option<(u16, u16)> = None;
        let width = usize::from(frame.width);

        for y in 0..frame.height {
            let row = usize::from(y) * width;
            let mut x = 0usize;
            while x < width {
                let cell = frame.cells()[row + x];
                if self.last[row + x] == cell {
                    x += 1;
                    continue;
                }

                let run_start = x;
                self.run_buf.clear();
                while x < width {
                    let c = frame.cells()[row + x];
                    if self.last[row + x] == c
                        || c.fg != cell.fg
                        || c.bg != cell.bg
                        || c.bold != cell.bold
                    {
                        break;
                    }
                    self.run_buf.push(c.ch);
                    self.last[row + x] = c;
                    x += 1;
                }

                if cur_pos != Some((run_start as u16, y)) {
                    self.stdout.queue(cursor::MoveTo(run_start as u16, y))?;
                }
                apply_style(&mut self.stdout, &mut style, &cell)?;
                self.stdout.queue(Print(self.run_buf.as_str()))?;
                cur_pos = if x < width {
                    Some((x as u16, y))
                } else {
                    None
                };
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()
    }
}

fn apply_style(out: &mut Stdout, style: &mut StyleState, cell: &Cell) -> Result<()> {
    if cell.fg != style.fg {
        out.queue(SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
        style.fg = cell.fg;
    }
    if cell.bg != style.bg {
        out.queue(SetBackgroundColor(cell.bg.unwrap_or(Color::Reset)))?;
        style.bg = cell.bg;
    }
    if cell.bold != style.bold {
        out.queue(SetAttribute(if cell.bold {
            Attribute::Bold
        } else {
            Attribute::NormalIntensity
        }))?;
        style.bold = cell.bold;
    }
    Ok(())
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(SetAttribute(Attribute::Reset));
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::EnableLineWrap);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

// Signal handlers and the panic hook restore through fresh handles.
pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
