// Copyright (c) 2026 the snowfall authors

mod config;
mod flake;
mod frame;
mod palette;
mod snow;
mod sprite;
mod terminal;
mod wind;

use std::env;
use std::fs;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use rand::Rng;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::{
    color_enabled_stdout, help_block, print_list_colors, print_list_sprites, Args, ColorBg,
    DEFAULT_PARAMS_USAGE, KEYS_HELP,
};
use crate::frame::Frame;
use crate::palette::{build_palette, parse_tint, ColorMode};
use crate::snow::Snowfall;
use crate::sprite::Sprite;
use crate::terminal::{restore_terminal_best_effort, Terminal};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

const SPAWN_MS_MIN: u64 = 1;
const SPAWN_MS_MAX: u64 = 600_000;

fn build_info() -> &'static str {
    env!("SNOWFALL_BUILD")
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u64_range(name: &str, v: u64, min: u64, max: u64) -> u64 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

// Up/down keys halve or double within the same bounds --spawn-ms accepts.
fn step_spawn_interval(current: Duration, faster: bool) -> Duration {
    let ms = current.as_millis() as u64;
    let ms = if faster {
        (ms / 2).max(SPAWN_MS_MIN)
    } else {
        (ms * 2).min(SPAWN_MS_MAX)
    };
    Duration::from_millis(ms)
}

fn default_to_ascii() -> bool {
    let lang = env::var("LANG").unwrap_or_default();
    !lang.to_ascii_uppercase().contains("UTF")
}

fn detect_color_mode_auto() -> ColorMode {
    auto_color_mode(
        &env::var("COLORTERM").unwrap_or_default(),
        &env::var("TERM").unwrap_or_default(),
    )
}

fn auto_color_mode(colorterm: &str, term: &str) -> ColorMode {
    let colorterm = colorterm.to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }
    if term.eq_ignore_ascii_case("dumb") {
        return ColorMode::Mono;
    }
    ColorMode::Color256
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            8 | 256 => ColorMode::Color256,
            24 | 32 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,8,24)", m);
                std::process::exit(1);
            }
        };
    }

    detect_color_mode_auto()
}

fn load_sprite(args: &Args, def_ascii: bool) -> Sprite {
    if let Some(path) = &args.sprite_file {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("failed to read sprite file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        };
        match Sprite::from_text(&text) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    } else {
        match sprite::preset(&args.sprite, def_ascii) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(help_block(DEFAULT_PARAMS_USAGE));
    cmd = cmd.after_help(help_block(KEYS_HELP));
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    cmd.build();

    if cmd.get_arguments().any(|a| a.get_id().as_str() == "help") {
        cmd = cmd.mut_arg("help", |a| a.help_heading("HELP"));
    }
    cmd.build();

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_sprites {
        print_list_sprites();
        return Ok(());
    }

    if args.list_colors {
        print_list_colors();
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        let sha = env!("SNOWFALL_GIT_SHA");
        if !sha.is_empty() {
            println!("Revision: {}", sha);
        }
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return Ok(());
    }

    let def_ascii = default_to_ascii();
    let color_mode = detect_color_mode(&args);

    let target_fps = require_f64_range("--fps", args.fps, 1.0, 240.0);
    let spawn_ms = require_u64_range("--spawn-ms", args.spawn_ms, SPAWN_MS_MIN, SPAWN_MS_MAX);
    let duration_s = args.duration.map(|s| {
        if !s.is_finite() {
            eprintln!("failed to apply --duration {} (must be a finite number)", s);
            std::process::exit(1);
        }
        if s > 0.0 {
            return require_f64_range("--duration", s, 0.1, 86400.0);
        }
        s
    });

    let tint = match parse_tint(&args.color) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let first_sprite = Rc::new(load_sprite(&args, def_ascii));
    let bold = !args.no_bold;
    let palette = build_palette(
        tint,
        color_mode,
        matches!(args.color_bg, ColorBg::Transparent),
    );

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());

    let preset_cycle: Vec<Rc<Sprite>> = sprite::PRESET_CYCLE
        .iter()
        .filter_map(|name| sprite::preset(name, def_ascii).ok())
        .map(Rc::new)
        .collect();
    let mut cycle_idx = sprite::PRESET_CYCLE
        .iter()
        .position(|n| *n == args.sprite)
        .unwrap_or(sprite::PRESET_CYCLE.len() - 1);

    let mut term = Terminal::new()?;
    let (w, h) = term.size()?;

    let mut sky = Snowfall::new(seed);
    sky.set_spawn_interval(Duration::from_millis(spawn_ms));
    sky.set_sprite(Some(first_sprite));

    let mut frame = Frame::new(w, h, palette.bg);

    let start_time = Instant::now();
    let end_time = duration_s.and_then(|s| {
        if s <= 0.0 {
            return None;
        }
        Some(start_time + Duration::from_secs_f64(s))
    });

    let target_period = Duration::from_secs_f64(1.0 / target_fps);
    let mut next_frame = Instant::now();
    let mut running = true;

    while running {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }
        let mut pending_resize: Option<(u16, u16)> = None;

        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                let ev = Terminal::read_event()?;
                match ev {
                    Event::Resize(nw, nh) => {
                        pending_resize = Some((nw, nh));
                    }
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if args.screensaver {
                            running = false;
                            break;
                        }

                        match (k.code, k.modifiers) {
                            (KeyCode::Esc, _) => running = false,
                            (KeyCode::Char('q'), _) => running = false,
                            (KeyCode::Char('c'), KeyModifiers::CONTROL) => running = false,
                            (KeyCode::Char('p'), _) => {
                                sky.toggle_pause();
                            }
                            (KeyCode::Char('c'), _) => {
                                sky.clear();
                                frame.clear();
                            }
                            (KeyCode::Char('s'), _) => {
                                if !preset_cycle.is_empty() {
                                    cycle_idx = (cycle_idx + 1) % preset_cycle.len();
                                    sky.set_sprite(Some(Rc::clone(&preset_cycle[cycle_idx])));
                                }
                            }
                            (KeyCode::Up, _) => {
                                let next = step_spawn_interval(sky.spawn_interval(), true);
                                sky.set_spawn_interval(next);
                            }
                            (KeyCode::Down, _) => {
                                let next = step_spawn_interval(sky.spawn_interval(), false);
                                sky.set_spawn_interval(next);
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }

            if !running || pending_resize.is_some() {
                break;
            }

            let now = Instant::now();
            if now >= next_frame {
                break;
            }

            let mut timeout = next_frame - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !running {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            frame = Frame::new(nw, nh, palette.bg);
        }

        if !sky.paused() {
            let now = Instant::now();
            frame.clear();
            for cmd in sky.tick(now, frame.width, frame.height) {
                cmd.sprite.blit(&mut frame, cmd.x, cmd.y, &palette, bold);
            }
        }
        if frame.take_dirty() {
            term.draw(&frame)?;
        }

        next_frame += target_period;
        let now = Instant::now();
        if now > next_frame {
            next_frame = now;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn spawn_stepping_spans_the_cli_range() {
        assert_eq!(step_spawn_interval(ms(800), true), ms(400));
        assert_eq!(step_spawn_interval(ms(20), true), ms(10));
        assert_eq!(step_spawn_interval(ms(1), true), ms(1));
        assert_eq!(step_spawn_interval(ms(300), false), ms(600));
        assert_eq!(step_spawn_interval(ms(400_000), false), ms(600_000));
        assert_eq!(step_spawn_interval(ms(600_000), false), ms(600_000));
    }

    #[test]
    fn auto_color_mode_falls_back_to_256() {
        assert_eq!(auto_color_mode("truecolor", "xterm"), ColorMode::TrueColor);
        assert_eq!(auto_color_mode("24bit", ""), ColorMode::TrueColor);
        assert_eq!(auto_color_mode("", "dumb"), ColorMode::Mono);
        assert_eq!(auto_color_mode("", "xterm-256color"), ColorMode::Color256);
        assert_eq!(auto_color_mode("", ""), ColorMode::Color256);
    }
}
