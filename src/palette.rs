// Copyright (c) 2026 the snowfall authors

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color256,
    TrueColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    White,
    Ice,
    Silver,
    Gold,
    Aurora,
}

// Ramp stops are (dim, mid, bright), indexed by sprite cell level.
const WHITE: [(u8, u8, u8); 3] = [(110, 120, 135), (180, 190, 205), (255, 255, 255)];
const ICE: [(u8, u8, u8); 3] = [(70, 130, 180), (135, 200, 235), (225, 245, 255)];
const SILVER: [(u8, u8, u8); 3] = [(105, 110, 120), (170, 175, 185), (235, 238, 245)];
const GOLD: [(u8, u8, u8); 3] = [(150, 110, 40), (220, 180, 80), (255, 240, 200)];
const AURORA: [(u8, u8, u8); 3] = [(60, 160, 120), (120, 220, 180), (220, 255, 240)];

impl Tint {
    fn ramp(self) -> &'static [(u8, u8, u8); 3] {
        match self {
            Tint::White => &WHITE,
            Tint::Ice => &ICE,
            Tint::Silver => &SILVER,
            Tint::Gold => &GOLD,
            Tint::Aurora => &AURORA,
        }
    }
}

pub fn parse_tint(s: &str) -> Result<Tint, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "white" | "snow" => Ok(Tint::White),
        "ice" | "blue" => Ok(Tint::Ice),
        "silver" | "gray" | "grey" => Ok(Tint::Silver),
        "gold" | "amber" => Ok(Tint::Gold),
        "aurora" | "mint" => Ok(Tint::Aurora),
        _ => Err(format!("invalid color: {} (see --list-colors)", s)),
    }
}

#[derive(Clone, Debug)]
pub struct Palette {
    pub colors: Vec<Color>,
    pub bg: Option<Color>,
}

pub fn build_palette(tint: Tint, mode: ColorMode, transparent_bg: bool) -> Palette {
    let colors = match mode {
        ColorMode::Mono => Vec::new(),
        ColorMode::Color256 => tint
            .ramp()
            .iter()
            .map(|&(r, g, b)| Color::AnsiValue(ansi256(r, g, b)))
            .collect(),
        ColorMode::TrueColor => tint
            .ramp()
            .iter()
            .map(|&(r, g, b)| Color::Rgb { r, g, b })
            .collect(),
    };
    let bg = if transparent_bg {
        None
    } else {
        Some(Color::Black)
    };
    Palette { colors, bg }
}

fn ansi256(r: u8, g: u8, b: u8) -> u8 {
    let hi = r.max(g).max(b);
    let lo = r.min(g).min(b);
    if hi - lo < 24 {
        let avg = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
        if avg < 5 {
            return 16;
        }
        if avg > 246 {
            return 231;
        }
        return 232 + ((avg - 5) / 10).min(23);
    }
    let step = |v: u8| -> u8 {
        if v < 48 {
            0
        } else if v < 115 {
            1
        } else {
            ((u16::from(v) - 35) / 40) as u8
        }
    };
    16 + 36 * step(r) + 6 * step(g) + step(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi256_hits_cube_corners() {
        assert_eq!(ansi256(0, 0, 0), 16);
        assert_eq!(ansi256(255, 255, 255), 231);
        assert_eq!(ansi256(255, 0, 0), 196);
        assert_eq!(ansi256(0, 255, 0), 46);
        assert_eq!(ansi256(0, 0, 255), 21);
    }

    #[test]
    fn ansi256_grays_use_the_gray_ramp() {
        for v in [40u8, 128, 200] {
            let idx = ansi256(v, v, v);
            assert!((232..=255).contains(&idx), "gray {v} mapped to {idx}");
        }
    }

    #[test]
    fn mono_palette_has_no_colors() {
        let p = build_palette(Tint::Ice, ColorMode::Mono, false);
        assert!(p.colors.is_empty());
        assert_eq!(p.bg, Some(Color::Black));
    }

    #[test]
    fn truecolor_palette_keeps_ramp_order() {
        let p = build_palette(Tint::White, ColorMode::TrueColor, true);
        assert_eq!(p.colors.len(), 3);
        assert_eq!(
            p.colors[2],
            Color::Rgb {
                r: 255,
                g: 255,
                b: 255
            }
        );
        assert_eq!(p.bg, None);
    }

    #[test]
    fn color256_palette_stays_on_the_extended_table() {
        let p = build_palette(Tint::Gold, ColorMode::Color256, false);
        assert_eq!(p.colors.len(), 3);
        for c in &p.colors {
            match c {
                Color::AnsiValue(v) => assert!(*v >= 16),
                other => panic!("unexpected color {other:?}"),
            }
        }
    }

    #[test]
    fn tint_aliases_parse() {
        assert_eq!(parse_tint("grey").unwrap(), Tint::Silver);
        assert_eq!(parse_tint("SNOW").unwrap(), Tint::White);
        assert_eq!(parse_tint(" mint ").unwrap(), Tint::Aurora);
        let err = parse_tint("plaid").unwrap_err();
        assert!(err.contains("--list-colors"));
    }
}
