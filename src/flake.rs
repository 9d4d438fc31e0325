// Copyright (c) 2026 the snowfall authors

use std::cmp::Ordering;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::Rng;

use crate::sprite::Sprite;

pub struct Snowflake {
    pub x: f32,
    pub y: f32,
    pub speed: i32,
    pub bias: i32,
    pub bias_time: i32,
    pub random_next: bool,
    pub sprite: Rc<Sprite>,
}

impl Snowflake {
    pub fn new(x: f32, y: f32, speed: i32, sprite: Rc<Sprite>) -> Self {
        Self {
            x,
            y,
            speed,
            bias: 0,
            bias_time: 0,
            random_next: false,
            sprite,
        }
    }

    pub fn advance(&mut self, rng: &mut StdRng, wind: i32) {
        if self.bias_time < 0 {
            // Every other re-roll is forced neutral.
            if self.random_next {
                self.bias = match rng.random_range(0..3i32).cmp(&1) {
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                    Ordering::Greater => 1,
                };
                self.random_next = false;
            } else {
                self.bias = 0;
                self.random_next = true;
            }
            self.bias_time = rng.random_range(0..30);
        }
        self.bias_time -= 1;
        self.x += (self.bias + wind) as f32;
        self.y += (4 + self.speed) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_sprite() -> Rc<Sprite> {
        Rc::new(Sprite::from_rows(&["*"]).unwrap())
    }

    #[test]
    fn falls_by_four_plus_speed_every_tick() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut flake = Snowflake::new(10.0, -1.0, 3, test_sprite());

        for k in 1..=100 {
            flake.advance(&mut rng, 0);
            assert_eq!(flake.y, -1.0 + (7 * k) as f32);
        }
    }

    #[test]
    fn sideways_step_is_bias_plus_wind() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut flake = Snowflake::new(50.0, 0.0, 0, test_sprite());

        for _ in 0..500 {
            let before = flake.x;
            flake.advance(&mut rng, 2);
            assert_eq!(flake.x - before, (flake.bias + 2) as f32);
            assert!((-1..=1).contains(&flake.bias));
        }
    }

    #[test]
    fn first_two_ticks_never_lean() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut flake = Snowflake::new(0.0, 0.0, 1, test_sprite());

            flake.advance(&mut rng, 0);
            assert_eq!(flake.bias, 0);
            flake.advance(&mut rng, 0);
            assert_eq!(flake.bias, 0);
        }
    }

    #[test]
    fn rerolls_alternate_neutral_and_random() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut flake = Snowflake::new(0.0, 0.0, 0, test_sprite());

        let mut rolls = 0u32;
        for _ in 0..2000 {
            let before = flake.bias_time;
            flake.advance(&mut rng, 0);
            if before < 0 {
                rolls += 1;
                if rolls % 2 == 1 {
                    assert_eq!(flake.bias, 0);
                }
                assert!((-1..29).contains(&flake.bias_time));
            } else {
                assert_eq!(flake.bias_time, before - 1);
            }
        }
        assert!(rolls >= 60, "expected steady re-rolls, got {rolls}");
    }

    #[test]
    fn countdown_stays_in_window() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut flake = Snowflake::new(0.0, 0.0, 6, test_sprite());

        for _ in 0..1000 {
            flake.advance(&mut rng, -2);
            assert!(flake.bias_time >= -1 && flake.bias_time < 30);
        }
    }
}
