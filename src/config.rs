// Copyright (c) 2026 the snowfall authors

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  snowfall --sprite auto --color ice --color-bg black --colormode 24 --spawn-ms 800 --fps 10";

pub const KEYS_HELP: &str = "KEYS:\n  q, esc    quit\n  p         pause / resume\n  c         clear the sky\n  s         cycle builtin sprites\n  up/down   spawn faster / slower";

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

pub fn help_block(text: &str) -> String {
    if !color_enabled_stdout() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 32);
    for chunk in text.split_inclusive('\n') {
        let (line, nl) = chunk
            .strip_suffix('\n')
            .map(|l| (l, "\n"))
            .unwrap_or((chunk, ""));
        let is_heading =
            !line.starts_with(' ') && line.ends_with(':') && line == line.to_ascii_uppercase();
        if is_heading {
            out.push_str("\x1b[1;36m");
            out.push_str(line);
            out.push_str("\x1b[0m");
        } else {
            out.push_str(line);
        }
        out.push_str(nl);
    }
    out
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBg {
    #[value(name = "black")]
    Black,
    #[value(name = "transparent")]
    Transparent,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "snowfall", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        long = "sprite",
        default_value = "auto",
        help_heading = "APPEARANCE",
        help = "Sprite preset (see --list-sprites)"
    )]
    pub sprite: String,

    #[arg(
        long = "sprite-file",
        value_name = "PATH",
        help_heading = "APPEARANCE",
        help = "Load the sprite from a text file (one row per line, spaces transparent)"
    )]
    pub sprite_file: Option<PathBuf>,

    #[arg(
        short = 'c',
        long = "color",
        default_value = "ice",
        help_heading = "APPEARANCE",
        help = "Flake tint (see --list-colors)"
    )]
    pub color: String,

    #[arg(
        long = "color-bg",
        default_value_t = ColorBg::Black,
        value_enum,
        help_heading = "APPEARANCE",
        help = "Background mode (black, transparent)"
    )]
    pub color_bg: ColorBg,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,8/256,24/32). Default: 24-bit when COLORTERM reports truecolor, mono when TERM=dumb, else 8-bit"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "no-bold",
        help_heading = "APPEARANCE",
        help = "Never bolden bright sprite cells"
    )]
    pub no_bold: bool,

    #[arg(
        short = 'r',
        long = "spawn-ms",
        default_value_t = 800,
        help_heading = "SNOW",
        help = "Milliseconds between new flakes (min 1 max 600000)"
    )]
    pub spawn_ms: u64,

    #[arg(
        long = "seed",
        help_heading = "SNOW",
        help = "Seed the simulation for a repeatable flurry"
    )]
    pub seed: Option<u64>,

    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 10.0,
        help_heading = "PERFORMANCE",
        help = "Target FPS, one simulation tick per frame (min 1 max 240)"
    )]
    pub fps: f64,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "list-sprites",
        help_heading = "HELP",
        help = "List available sprite presets and exit"
    )]
    pub list_sprites: bool,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List available flake tints and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

pub fn print_list_sprites() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE SPRITE PRESETS:\x1b[0m");
        println!("\x1b[2mNOTE: Use only the VALUE (left side) with --sprite.\x1b[0m");
    } else {
        println!("AVAILABLE SPRITE PRESETS:");
        println!("NOTE: Use only the VALUE (left side) with --sprite.");
    }
    println!();
    println!("VALUE        DESCRIPTION");
    println!("auto         Auto-select (star when non-UTF locale, otherwise flake)");
    println!("flake        Single snowflake glyph");
    println!("star         Single asterisk (ASCII safe)");
    println!("dot          Single faint dot (ASCII safe)");
    println!("crystal      3x3 snowflake with arms");
    println!("puff         5x3 soft clump (ASCII safe)");
    println!();
    println!("Custom shapes: --sprite-file PATH (one row per line, spaces transparent)");
}

pub fn print_list_colors() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE FLAKE TINTS:\x1b[0m");
        println!("\x1b[2mNOTE: Use only the VALUE (left side) with --color.\x1b[0m");
    } else {
        println!("AVAILABLE FLAKE TINTS:");
        println!("NOTE: Use only the VALUE (left side) with --color.");
    }
    println!();
    println!("VALUE        DESCRIPTION");
    println!("white        Plain snow (alias: snow)");
    println!("ice          Cold blue-white (alias: blue)");
    println!("silver       Muted gray (aliases: gray, grey)");
    println!("gold         Warm lamplight (alias: amber)");
    println!("aurora       Pale green (alias: mint)");
}
