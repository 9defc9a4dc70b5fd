//! Fixed-step game loop
//!
//! Wall-clock time goes into an accumulator; each whole tick taken out of it
//! is exactly one logic update. Updates are never skipped or merged, however
//! slow presenting gets. Rendering runs after every update and once more per
//! iteration.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::input;
use crate::platform::Platform;
use crate::renderer;
use crate::sim::{self, GameState};

/// Source of elapsed wall-clock time
pub trait Clock {
    /// Time since the previous call (or since creation)
    fn restart(&mut self) -> Duration;
}

/// Real time via [`Instant`]
#[derive(Debug, Clone)]
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn restart(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }
}

/// Scripted deltas; zero once the script is used up
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    deltas: VecDeque<Duration>,
}

impl ManualClock {
    pub fn new(deltas: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            deltas: deltas.into_iter().collect(),
        }
    }

    /// The same delta `count` times
    pub fn repeat(delta: Duration, count: usize) -> Self {
        Self::new(std::iter::repeat_n(delta, count))
    }
}

impl Clock for ManualClock {
    fn restart(&mut self) -> Duration {
        self.deltas.pop_front().unwrap_or(Duration::ZERO)
    }
}

/// Time accumulator that hands out whole ticks
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStep {
    accumulated: Duration,
    tick: Duration,
}

impl FixedStep {
    pub fn new(tick: Duration) -> Self {
        Self {
            accumulated: Duration::ZERO,
            tick,
        }
    }

    pub fn accumulate(&mut self, elapsed: Duration) {
        self.accumulated += elapsed;
    }

    /// Take one tick out of the accumulator if more than a tick is stored
    pub fn try_consume(&mut self) -> bool {
        if self.accumulated > self.tick {
            self.accumulated -= self.tick;
            true
        } else {
            false
        }
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }
}

/// Owns the game state and drives it against a platform
pub struct GameLoop<C: Clock = SystemClock> {
    pub state: GameState,
    pub config: GameConfig,
    step: FixedStep,
    clock: C,
}

impl GameLoop<SystemClock> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> GameLoop<C> {
    pub fn with_clock(config: GameConfig, clock: C) -> Self {
        Self {
            state: GameState::new(&config),
            step: FixedStep::new(config.tick_duration()),
            config,
            clock,
        }
    }

    /// Run until the platform closes
    pub fn run<P: Platform>(&mut self, platform: &mut P) {
        log::info!(
            "Game loop started ({} Hz, tick {:?})",
            self.config.tick_rate,
            self.step.tick()
        );
        while platform.is_open() {
            self.frame(platform);
        }
        log::info!(
            "Game loop finished after {} ticks: {} hits, {} misses",
            self.state.time_ticks,
            self.state.hits,
            self.state.misses
        );
    }

    /// One loop iteration: input, as many ticks as time allows, render
    pub fn frame<P: Platform>(&mut self, platform: &mut P) {
        self.drain_input(platform);
        if self.state.exit_requested {
            platform.close();
            return;
        }

        self.step.accumulate(self.clock.restart());
        while platform.is_open() && self.step.try_consume() {
            self.drain_input(platform);
            self.update(platform);
            self.render(platform);
        }
        self.render(platform);
    }

    fn drain_input<P: Platform>(&mut self, platform: &mut P) {
        while let Some(event) = platform.poll_event() {
            input::dispatch(event, &mut self.state, &self.config);
        }
    }

    fn update<P: Platform>(&mut self, platform: &mut P) {
        if self.state.exit_requested {
            platform.close();
            return;
        }
        sim::tick(&mut self.state, &self.config);
    }

    fn render<P: Platform>(&mut self, platform: &mut P) {
        if !platform.is_open() {
            return;
        }
        let frame = renderer::render(&self.state, &self.config);
        platform.present(&frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, Key};
    use crate::platform::HeadlessPlatform;
    use glam::Vec2;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fixed_step_strictly_greater() {
        let mut step = FixedStep::new(ms(10));
        step.accumulate(ms(10));
        assert!(!step.try_consume());
        step.accumulate(Duration::from_nanos(1));
        assert!(step.try_consume());
        assert!(!step.try_consume());
        assert_eq!(step.accumulated(), Duration::from_nanos(1));
    }

    #[test]
    fn test_long_stall_runs_every_tick() {
        let mut step = FixedStep::new(ms(10));
        step.accumulate(ms(1005));
        let mut count = 0;
        while step.try_consume() {
            count += 1;
        }
        assert_eq!(count, 100);
    }

    #[test]
    fn test_render_after_each_update_and_once_more() {
        let config = GameConfig::default();
        let tick = config.tick_duration();
        let mut game = GameLoop::with_clock(config, ManualClock::new([tick * 3 + ms(1)]));
        let mut platform = HeadlessPlatform::new(vec![vec![]; 10]);

        game.frame(&mut platform);
        assert_eq!(game.state.time_ticks, 3);
        assert_eq!(platform.frame_count(), 4);
    }

    #[test]
    fn test_shot_through_loop() {
        let config = GameConfig::default();
        let mut game = GameLoop::with_clock(config.clone(), ManualClock::repeat(ms(17), 1000));
        let mut script = vec![
            vec![InputEvent::PointerDown(Vec2::new(130.0, 540.0))],
            vec![InputEvent::PointerMove(Vec2::new(400.0, 500.0))],
            vec![InputEvent::PointerUp(Vec2::new(400.0, 500.0))],
        ];
        script.extend(std::iter::repeat_n(Vec::new(), 400));
        let mut platform = HeadlessPlatform::new(script);

        game.run(&mut platform);

        assert!(!platform.is_open());
        // (6, -1) runs into the wall face
        assert_eq!((game.state.hits, game.state.misses), (0, 1));
        assert!(game.state.projectile.is_idle());
        assert_eq!(game.state.projectile.location, config.launch_point);
        assert!(game.state.time_ticks > 100);
    }

    #[test]
    fn test_escape_stops_loop() {
        let config = GameConfig::default();
        let mut game = GameLoop::with_clock(config, ManualClock::repeat(ms(20), 100));
        let mut script = vec![vec![]; 5];
        script.push(vec![InputEvent::KeyDown(Key::Escape)]);
        script.extend(vec![vec![]; 50]);
        let mut platform = HeadlessPlatform::new(script);

        game.run(&mut platform);

        assert!(game.state.exit_requested);
        assert!(!platform.is_open());
        // Stopped well before the script ran out
        assert!(platform.frame_count() < 20);
    }

    #[test]
    fn test_gravity_and_mode_keys_through_loop() {
        let config = GameConfig::default();
        let mut game = GameLoop::with_clock(config, ManualClock::default());
        let mut platform = HeadlessPlatform::new(vec![
            vec![InputEvent::KeyDown(Key::Minus); 3],
            vec![InputEvent::KeyDown(Key::ToggleMode)],
        ]);

        game.run(&mut platform);

        assert!((game.state.gravity.y - 0.035).abs() < 1e-6);
        assert_eq!(game.state.render_mode, crate::sim::RenderMode::Graphics);
        // No time passed, so no ticks
        assert_eq!(game.state.time_ticks, 0);
    }

    proptest! {
        #[test]
        fn update_count_tracks_elapsed_time(
            deltas in proptest::collection::vec(0u64..100_000, 0..200),
        ) {
            let tick = GameConfig::default().tick_duration();
            let mut step = FixedStep::new(tick);
            let mut total = Duration::ZERO;
            let mut updates: u128 = 0;

            for micros in deltas {
                let dt = Duration::from_micros(micros);
                total += dt;
                step.accumulate(dt);
                while step.try_consume() {
                    updates += 1;
                }
            }

            let expected = total.as_nanos() / tick.as_nanos();
            prop_assert!(updates <= expected);
            prop_assert!(expected - updates <= 1);
            prop_assert!(step.accumulated() <= tick);
        }
    }
}
