//! Vertical physics and collision checks.
//!
//! Positive speed moves the bird up; rows grow downward.

use crate::pipes::Pipe;

/// Per-tick clamp on vertical speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedClamp {
    pub floor: f64,
    pub ceiling: f64,
}

impl SpeedClamp {
    /// Fixed bounds used during play.
    pub const GAMEPLAY: SpeedClamp = SpeedClamp {
        floor: -1.0,
        ceiling: 1.2,
    };

    /// Bounds actually reachable with the given tunables: the extremes of
    /// 100 ticks of free fall and 100 ticks of held boost, both from rest.
    /// The preview loop clamps to these instead of the fixed bounds.
    pub fn derive(gravity: f64, boost: f64) -> SpeedClamp {
        let mut speed = 0.0_f64;
        let mut floor = speed;
        for _ in 0..100 {
            speed = (speed - gravity).max(Self::GAMEPLAY.floor);
            floor = floor.min(speed);
        }

        let mut speed = 0.0_f64;
        let mut ceiling = speed;
        for _ in 0..100 {
            speed = (speed + boost).min(Self::GAMEPLAY.ceiling);
            ceiling = ceiling.max(speed);
        }

        SpeedClamp { floor, ceiling }
    }
}

/// Advance vertical speed by one tick: gravity always pulls, boost applies
/// while the jump key is held, and the result stays inside the clamp.
pub fn step(speed: f64, gravity: f64, boost: f64, jump_held: bool, clamp: SpeedClamp) -> f64 {
    let mut speed = (speed - gravity).max(clamp.floor);
    if jump_held {
        speed = (speed + boost).min(clamp.ceiling);
    }
    speed
}

/// Row reached after one tick at the given speed.
pub fn fall(y: i32, speed: f64) -> i32 {
    y - speed.round() as i32
}

/// True when the bird's cell is pipe material.
pub fn collided_with_pipe(pipes: &[Pipe], pipe_gap: i32, bird_x: i32, bird_y: i32) -> bool {
    pipes.iter().any(|pipe| pipe.covers(bird_x, bird_y, pipe_gap))
}

/// The bird dies once it drops past the bottom row. There is no ceiling
/// death; the bird may fly above row 0.
pub fn breached_floor(y: i32, height: i32) -> bool {
    y > height
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITY: f64 = 0.7;
    const BOOST: f64 = 3.0;

    #[test]
    fn holding_jump_never_slows_the_bird() {
        let mut speed = -1.0;
        while speed <= 1.2 {
            let released = step(speed, GRAVITY, BOOST, false, SpeedClamp::GAMEPLAY);
            let held = step(speed, GRAVITY, BOOST, true, SpeedClamp::GAMEPLAY);
            assert!(released <= held, "speed {speed}: {released} > {held}");
            speed += 0.1;
        }
    }

    #[test]
    fn stepped_speed_stays_inside_the_clamp() {
        let clamp = SpeedClamp::GAMEPLAY;
        let mut speed = 0.0;
        for tick in 0..200 {
            let jump_held = tick % 3 == 0;
            speed = step(speed, GRAVITY, BOOST, jump_held, clamp);
            assert!(speed >= clamp.floor && speed <= clamp.ceiling, "speed {speed}");
        }
    }

    #[test]
    fn clamping_is_stable_at_the_bounds() {
        let clamp = SpeedClamp::GAMEPLAY;
        assert_eq!(step(clamp.floor, GRAVITY, 0.1, false, clamp), clamp.floor);
        assert_eq!(step(clamp.ceiling, 0.1, BOOST, true, clamp), clamp.ceiling);
    }

    #[test]
    fn derived_clamp_matches_the_fixed_bounds_for_strong_tunables() {
        // Gravity 0.7 reaches -1 within two ticks; boost 3 caps at 1.2
        // immediately, so the derived clamp collapses to the gameplay one.
        assert_eq!(SpeedClamp::derive(GRAVITY, BOOST), SpeedClamp::GAMEPLAY);
    }

    #[test]
    fn derived_clamp_shrinks_for_weak_tunables() {
        let clamp = SpeedClamp::derive(0.004, 0.005);
        assert!((clamp.floor - -0.4).abs() < 1e-9, "floor {}", clamp.floor);
        assert!((clamp.ceiling - 0.5).abs() < 1e-9, "ceiling {}", clamp.ceiling);
    }

    #[test]
    fn positive_speed_moves_the_bird_up() {
        assert_eq!(fall(10, 1.2), 9);
        assert_eq!(fall(10, -0.7), 11);
        assert_eq!(fall(10, 0.0), 10);
    }

    #[test]
    fn pipe_collision_cases() {
        let pipes = [Pipe { x: 10, gap_y: 5 }];
        assert!(collided_with_pipe(&pipes, 5, 10, 4));
        assert!(!collided_with_pipe(&pipes, 5, 10, 7));
        assert!(!collided_with_pipe(&pipes, 5, 9, 4));
        assert!(collided_with_pipe(&pipes, 5, 11, 11));
        assert!(!collided_with_pipe(&pipes, 5, 12, 4));
        assert!(!collided_with_pipe(&[], 5, 10, 4));
    }

    #[test]
    fn floor_breach_is_strictly_below_the_board() {
        assert!(!breached_floor(20, 20));
        assert!(breached_floor(21, 20));
        assert!(!breached_floor(-5, 20));
    }
}
