// Copyright (c) 2026 the snowfall authors

use crate::frame::{Cell, Frame};
use crate::palette::Palette;

const MAX_WIDTH: usize = 64;
const MAX_HEIGHT: usize = 32;

pub const PRESET_CYCLE: [&str; 5] = ["flake", "star", "dot", "crystal", "puff"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteCell {
    pub ch: char,
    pub level: u8,
}

#[derive(Debug)]
pub struct Sprite {
    width: u16,
    height: u16,
    cells: Vec<Option<SpriteCell>>,
}

impl Sprite {
    pub fn from_rows(rows: &[&str]) -> Result<Sprite, String> {
        let grids: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
        let height = grids.len();
        let width = grids.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 || height == 0 {
            return Err("sprite is empty".to_string());
        }
        if width > MAX_WIDTH {
            return Err(format!("sprite too wide: {width} (max {MAX_WIDTH})"));
        }
        if height > MAX_HEIGHT {
            return Err(format!("sprite too tall: {height} (max {MAX_HEIGHT})"));
        }

        let mut cells = Vec::with_capacity(width * height);
        for row in &grids {
            for x in 0..width {
                let cell = row.get(x).filter(|ch| !ch.is_whitespace());
                cells.push(cell.map(|&ch| SpriteCell {
                    ch,
                    level: glyph_level(ch),
                }));
            }
        }
        if cells.iter().all(Option::is_none) {
            return Err("sprite is blank".to_string());
        }

        Ok(Sprite {
            width: width as u16,
            height: height as u16,
            cells,
        })
    }

    pub fn from_text(text: &str) -> Result<Sprite, String> {
        let mut rows: Vec<&str> = text.lines().collect();
        while rows.last().is_some_and(|r| r.trim().is_empty()) {
            rows.pop();
        }
        Sprite::from_rows(&rows)
    }

    #[allow(dead_code)]
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<SpriteCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = usize::from(y) * usize::from(self.width) + usize::from(x);
        self.cells.get(i).copied().flatten()
    }

    pub fn blit(&self, frame: &mut Frame, x: i32, y: i32, palette: &Palette, bold: bool) {
        for sy in 0..self.height {
            let ty = y + i32::from(sy);
            if ty < 0 {
                continue;
            }
            if ty >= i32::from(frame.height) {
                break;
            }
            for sx in 0..self.width {
                let tx = x + i32::from(sx);
                if tx < 0 || tx >= i32::from(frame.width) {
                    continue;
                }
                let Some(sc) = self.cell(sx, sy) else {
                    continue;
                };
                frame.set(
                    tx as u16,
                    ty as u16,
                    Cell {
                        ch: sc.ch,
                        fg: palette.colors.get(usize::from(sc.level)).copied(),
                        bg: palette.bg,
                        bold: bold && sc.level == 2,
                    },
                );
            }
        }
    }
}

pub fn preset(name: &str, prefer_ascii: bool) -> Result<Sprite, String> {
    let key = name.trim().to_ascii_lowercase();
    let rows: &[&str] = match key.as_str() {
        "auto" => {
            return preset(if prefer_ascii { "star" } else { "flake" }, prefer_ascii);
        }
        "flake" => &["❄"],
        "star" => &["*"],
        "dot" => &["."],
        "crystal" => &[" + ", "+❄+", " + "],
        "puff" => &[" .+. ", ".+*+.", " .+. "],
        _ => return Err(format!("invalid sprite: {} (see --list-sprites)", name)),
    };
    Sprite::from_rows(rows)
}

// Punctuation reads as shading, anything else is a full-brightness glyph.
fn glyph_level(ch: char) -> u8 {
    match ch {
        '.' | ',' | '\'' | '`' | '·' => 0,
        '+' | '-' | ':' | ';' | 'x' | 'o' | '•' | '░' | '▒' => 1,
        _ => 2,
    }
}
