// Copyright (c) 2026 the snowfall authors

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Cell {
    pub fn blank(bg: Option<Color>) -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg,
            bold: false,
        }
    }
}

#[derive(Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
    blank: Cell,
    dirty: bool,
}

impl Frame {
    pub fn new(width: u16, height: u16, bg: Option<Color>) -> Self {
        let len = usize::from(width) * usize::from(height);
        let blank = Cell::blank(bg);
        Self {
            width,
            height,
            cells: vec![blank; len],
            blank,
            dirty: true,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(self.blank);
        self.dirty = true;
    }

    // True once per batch of writes; the caller skips untouched frames.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    #[allow(dead_code)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(ch: char) -> Cell {
        Cell {
            ch,
            fg: None,
            bg: None,
            bold: false,
        }
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut f = Frame::new(3, 2, None);
        f.set(2, 1, glyph('x'));
        assert_eq!(f.get(2, 1).unwrap().ch, 'x');
        assert_eq!(f.get(0, 0).unwrap().ch, ' ');
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut f = Frame::new(3, 2, None);
        f.set(3, 0, glyph('x'));
        f.set(0, 2, glyph('x'));
        assert!(f.cells().iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn clear_restores_the_blank_cell() {
        let bg = Some(Color::Black);
        let mut f = Frame::new(2, 2, bg);
        f.set(1, 1, glyph('*'));
        f.clear();
        for c in f.cells() {
            assert_eq!(c.ch, ' ');
            assert_eq!(c.bg, bg);
        }
    }

    #[test]
    fn oob_get_is_none() {
        let f = Frame::new(2, 2, None);
        assert!(f.get(2, 0).is_none());
        assert!(f.get(0, 2).is_none());
    }

    #[test]
    fn fresh_frames_and_writes_are_dirty() {
        let mut f = Frame::new(2, 2, None);
        assert!(f.take_dirty());
        assert!(!f.take_dirty());

        f.set(0, 0, glyph('x'));
        assert!(f.take_dirty());
        assert!(!f.take_dirty());

        f.clear();
        assert!(f.take_dirty());
    }

    #[test]
    fn ignored_writes_leave_the_frame_clean() {
        let mut f = Frame::new(2, 2, None);
        f.take_dirty();
        f.set(2, 0, glyph('x'));
        assert!(!f.take_dirty());
    }
}
