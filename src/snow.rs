// Copyright (c) 2026 the snowfall authors

use std::rc::Rc;
use std::time::{Duration, Instant};

use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::flake::Snowflake;
use crate::sprite::Sprite;
use crate::wind::WindCurve;

pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_millis(800);

pub struct DrawCommand {
    pub x: i32,
    pub y: i32,
    pub sprite: Rc<Sprite>,
}

pub struct Snowfall {
    flakes: Vec<Snowflake>,
    commands: Vec<DrawCommand>,
    sprite: Option<Rc<Sprite>>,
    spawn_interval: Duration,
    last_spawn: Option<Instant>,
    wind: WindCurve,
    rng: StdRng,
    rand_speed: Uniform<i32>,
    paused: bool,
    pause_time: Option<Instant>,
}

impl Snowfall {
    pub fn new(seed: u64) -> Self {
        Self {
            flakes: Vec::new(),
            commands: Vec::new(),
            sprite: None,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            last_spawn: None,
            wind: WindCurve::new(Instant::now()),
            rng: StdRng::seed_from_u64(seed),
            rand_speed: Uniform::new(0, 7).expect("valid range"),
            paused: false,
            pause_time: None,
        }
    }

    // Flakes already in the air keep the sprite they spawned with.
    pub fn set_sprite(&mut self, sprite: Option<Rc<Sprite>>) {
        self.sprite = sprite;
    }

    pub fn set_spawn_interval(&mut self, interval: Duration) {
        self.spawn_interval = interval;
    }

    pub fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    pub fn clear(&mut self) {
        self.flakes.clear();
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.pause_time = Some(Instant::now());
        } else if let Some(paused_at) = self.pause_time.take() {
            let stalled = Instant::now().saturating_duration_since(paused_at);
            self.last_spawn = self.last_spawn.map(|t| t + stalled);
            self.wind.delay(stalled);
        }
    }

    pub fn tick(&mut self, now: Instant, width: u16, height: u16) -> &[DrawCommand] {
        self.commands.clear();
        if self.paused {
            return &self.commands;
        }
        let Some(sprite) = self.sprite.clone() else {
            return &self.commands;
        };

        let wind = self.wind.maybe_advance(now);
        self.maybe_spawn(now, width, &sprite);

        for flake in &mut self.flakes {
            flake.advance(&mut self.rng, wind);
            self.commands.push(DrawCommand {
                x: flake.x.floor() as i32,
                y: flake.y.floor() as i32,
                sprite: Rc::clone(&flake.sprite),
            });
        }

        // The exit tick still draws the flake, clipped below the frame.
        let limit = f32::from(height);
        self.flakes.retain(|f| f.y <= limit);

        &self.commands
    }

    fn maybe_spawn(&mut self, now: Instant, width: u16, sprite: &Rc<Sprite>) {
        let Some(last) = self.last_spawn else {
            self.last_spawn = Some(now);
            return;
        };
        if now.saturating_duration_since(last) <= self.spawn_interval || width == 0 {
            return;
        }
        let x = self.rng.random_range(0.0..f32::from(width));
        let y = -f32::from(sprite.height());
        let speed = self.rand_speed.sample(&mut self.rng);
        self.flakes.push(Snowflake::new(x, y, speed, Rc::clone(sprite)));
        self.last_spawn = Some(now);
    }
}
