//! Tick-driven snake simulation.
//!
//! The engine owns every piece of game state and is the only place where it
//! changes. Callers feed it commands (`start`, `reset`, `set_direction`,
//! `set_speed`) and drive `tick` at the cadence of the active speed profile;
//! `state` hands back a snapshot for drawing. Commands that don't apply to the
//! current phase are ignored rather than reported.
//!
//! The engine is not reentrant. A multi-threaded host must serialize calls.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::snake::{Direction, Snake};
use crate::speed::SpeedProfile;
use crate::Cell;

/// Random draws before `spawn_food` falls back to scanning the free cells.
const MAX_FOOD_DRAWS: usize = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    GameOver,
    /// The snake filled the board; terminal like `GameOver`.
    Won,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Wall,
    Body,
}

/// What a single `tick` did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, nothing happened.
    Ignored,
    Moved,
    Ate { points: u32 },
    Crashed(Crash),
    BoardFull,
}

/// Read-only snapshot of the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Head first.
    pub snake: Vec<Cell>,
    pub food: Cell,
    /// Direction of the last move the snake made.
    pub heading: Direction,
    /// Direction the next tick will use.
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub speed: SpeedProfile,
    pub phase: Phase,
}

pub struct GameEngine<R: Rng = StdRng> {
    config: EngineConfig,
    rng: R,
    snake: Snake,
    food: Cell,
    // heading of the last applied move, and the one the next tick will use
    heading: Direction,
    pending: Direction,
    score: u32,
    high_score: u32,
    speed: SpeedProfile,
    phase: Phase,
}

impl GameEngine<StdRng> {
    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        GameEngine::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn new(config: EngineConfig, rng: R) -> Self {
        GameEngine {
            config,
            rng,
            snake: Snake::new(config.start_cell()),
            food: config.initial_food(),
            heading: Direction::Up,
            pending: Direction::Up,
            score: 0,
            high_score: 0,
            speed: SpeedProfile::default(),
            phase: Phase::Idle,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn speed(&self) -> SpeedProfile {
        self.speed
    }

    pub fn state(&self) -> GameState {
        GameState {
            snake: self.snake.to_vec(),
            food: self.food,
            heading: self.heading,
            direction: self.pending,
            score: self.score,
            high_score: self.high_score,
            speed: self.speed,
            phase: self.phase,
        }
    }

    /// Begins a fresh game. No-op while a game is running.
    pub fn start(&mut self) {
        if self.phase == Phase::Playing {
            return;
        }

        self.clear_board();
        match self.spawn_food() {
            Ok(food) => {
                self.food = food;
                self.phase = Phase::Playing;
                crate::log!("game started: speed={} food={:?}", self.speed, food);
            }
            // A single cell can't fill any board the config accepts
            Err(err) => {
                crate::log!("could not start: {}", err);
                self.phase = Phase::Won;
            }
        }
    }

    /// Back to `Idle` with a fresh board. The high score survives.
    pub fn reset(&mut self) {
        self.clear_board();
        self.food = self.config.initial_food();
        if self.phase != Phase::Idle {
            crate::log!("reset from {:?}", self.phase);
        }
        self.phase = Phase::Idle;
    }

    /// Queues a turn for the next tick. Ignored outside `Playing` and when
    /// `direction` reverses either the last move or the turn already queued.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.phase != Phase::Playing
            || direction.is_reverse_of(self.heading)
            || direction.is_reverse_of(self.pending)
        {
            return;
        }

        self.pending = direction;
    }

    /// `set_direction` for raw deltas; anything but a unit orthogonal step is ignored.
    pub fn set_direction_delta(&mut self, dx: i32, dy: i32) {
        if let Some(direction) = Direction::from_delta(dx, dy) {
            self.set_direction(direction);
        }
    }

    /// Locked while playing so the tick interval stays stable for the session.
    pub fn set_speed(&mut self, speed: SpeedProfile) {
        if self.phase == Phase::Playing {
            return;
        }

        self.speed = speed;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Ignored;
        }

        let direction = self.pending;
        let new_head = self.snake.next_head(direction);

        if !self.config.in_bounds(new_head) {
            return self.crash(Crash::Wall);
        }
        // The tail hasn't moved yet, so it counts as body
        if self.snake.contains(&new_head) {
            return self.crash(Crash::Body);
        }

        self.heading = direction;
        let ate = new_head == self.food;
        self.snake.advance(new_head, ate);

        if !ate {
            return TickOutcome::Moved;
        }

        let points = self.speed.food_points();
        self.score = self.score.saturating_add(points);

        match self.spawn_food() {
            Ok(food) => {
                self.food = food;
                TickOutcome::Ate { points }
            }
            Err(_) => {
                self.finish(Phase::Won);
                TickOutcome::BoardFull
            }
        }
    }

    /// Picks a uniformly random cell not covered by the snake.
    ///
    /// Draws a bounded number of candidates first and then picks among the
    /// remaining free cells, so a crowded board costs a scan instead of an
    /// unbounded loop. Fails with [`EngineError::BoardFull`] when the snake
    /// covers every cell.
    pub fn spawn_food(&mut self) -> Result<Cell, EngineError> {
        let size = self.config.board_size();

        if self.snake.len() >= self.config.cell_count() {
            return Err(EngineError::BoardFull);
        }

        for _ in 0..MAX_FOOD_DRAWS {
            let candidate = (self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if !self.snake.contains(&candidate) {
                return Ok(candidate);
            }
        }

        let free: Vec<Cell> = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .filter(|cell| !self.snake.contains(cell))
            .collect();

        if free.is_empty() {
            return Err(EngineError::BoardFull);
        }

        Ok(free[self.rng.gen_range(0..free.len())])
    }

    /// Replaces the board with `state` after checking it is playable: a
    /// non-empty, in-bounds snake of orthogonally adjacent cells that doesn't
    /// overlap itself or the food. A queued `direction` that reverses
    /// `heading` is dropped. Nothing changes when the snapshot is rejected.
    pub fn restore(&mut self, state: GameState) -> Result<(), EngineError> {
        let snake = Snake::from_cells(&state.snake).ok_or(EngineError::EmptySnake)?;

        for (i, cell) in state.snake.iter().enumerate() {
            if !self.config.in_bounds(*cell) {
                return Err(EngineError::OutOfBounds(*cell));
            }
            if state.snake[..i].contains(cell) {
                return Err(EngineError::SelfOverlap(*cell));
            }
            if i > 0 && !adjacent(state.snake[i - 1], *cell) {
                return Err(EngineError::Disconnected(*cell));
            }
        }
        if !self.config.in_bounds(state.food) {
            return Err(EngineError::OutOfBounds(state.food));
        }
        if snake.contains(&state.food) {
            return Err(EngineError::FoodOnSnake(state.food));
        }

        self.snake = snake;
        self.food = state.food;
        self.heading = state.heading;
        self.pending = if state.direction.is_reverse_of(state.heading) {
            state.heading
        } else {
            state.direction
        };
        self.score = state.score;
        self.high_score = state.high_score;
        self.speed = state.speed;
        self.phase = state.phase;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn clear_board(&mut self) {
        self.snake = Snake::new(self.config.start_cell());
        self.heading = Direction::Up;
        self.pending = Direction::Up;
        self.score = 0;
    }

    fn crash(&mut self, crash: Crash) -> TickOutcome {
        self.finish(Phase::GameOver);
        crate::log!("crashed into {:?} at {:?}", crash, self.snake.head());
        TickOutcome::Crashed(crash)
    }

    fn finish(&mut self, phase: Phase) {
        self.high_score = self.high_score.max(self.score);
        self.phase = phase;
        crate::log!("{:?}: score={} high_score={}", phase, self.score, self.high_score);
    }
}

fn adjacent((ax, ay): Cell, (bx, by): Cell) -> bool {
    (ax - bx).abs() + (ay - by).abs() == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::seeded(EngineConfig::default(), 7)
    }

    #[test]
    fn new_engine_is_idle() {
        let state = engine().state();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.snake, vec![(10, 10)]);
        assert_eq!(state.food, (15, 15));
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, SpeedProfile::Medium);
    }

    #[test]
    fn tick_while_idle_is_ignored() {
        let mut engine = engine();
        let before = engine.state();
        assert_eq!(engine.tick(), TickOutcome::Ignored);
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn queued_turn_checks_applied_heading() {
        let mut engine = engine();
        engine.start();
        engine.set_direction(Direction::Left);
        // Still heading up until the next tick, so Down stays a reversal
        engine.set_direction(Direction::Down);
        assert_eq!(engine.state().direction, Direction::Left);
    }

    #[test]
    fn queued_turn_cannot_be_reversed() {
        let mut engine = engine();
        engine.start();
        engine.set_direction(Direction::Left);
        engine.set_direction(Direction::Right);
        assert_eq!(engine.state().direction, Direction::Left);
        assert_eq!(engine.state().heading, Direction::Up);
    }

    #[test]
    fn score_saturates_instead_of_overflowing() {
        let mut engine = engine();
        let mut state = engine.state();
        state.phase = Phase::Playing;
        state.food = (10, 9);
        state.score = u32::MAX - 3;
        engine.restore(state).unwrap();

        assert_eq!(engine.tick(), TickOutcome::Ate { points: 15 });
        assert_eq!(engine.state().score, u32::MAX);
    }

    #[test]
    fn restore_rejects_gaps_in_the_body() {
        let mut engine = engine();
        let before = engine.state();

        let mut bad = before.clone();
        bad.snake = vec![(3, 3), (3, 4), (5, 4)];
        assert_eq!(engine.restore(bad), Err(EngineError::Disconnected((5, 4))));

        let mut bad = before.clone();
        bad.snake = vec![(3, 3), (4, 4)];
        assert_eq!(engine.restore(bad), Err(EngineError::Disconnected((4, 4))));

        assert_eq!(engine.state(), before);
    }

    #[test]
    fn restore_drops_reversed_queued_turn() {
        let mut engine = engine();
        let mut state = engine.state();
        state.snake = vec![(4, 4), (4, 5)];
        state.heading = Direction::Up;
        state.direction = Direction::Down;
        engine.restore(state).unwrap();
        assert_eq!(engine.state().direction, Direction::Up);
    }

    #[test]
    fn delta_commands_need_unit_steps() {
        let mut engine = engine();
        engine.start();
        engine.set_direction_delta(1, 1);
        assert_eq!(engine.state().direction, Direction::Up);
        engine.set_direction_delta(-1, 0);
        assert_eq!(engine.state().direction, Direction::Left);
    }

    #[test]
    fn rejected_restore_leaves_state() {
        let mut engine = engine();
        let before = engine.state();

        let mut bad = before.clone();
        bad.snake = vec![(3, 3), (3, 4), (3, 3)];
        assert_eq!(engine.restore(bad), Err(EngineError::SelfOverlap((3, 3))));

        let mut bad = before.clone();
        bad.food = before.snake[0];
        assert_eq!(engine.restore(bad), Err(EngineError::FoodOnSnake((10, 10))));

        let mut bad = before.clone();
        bad.snake = vec![(-1, 0)];
        assert_eq!(engine.restore(bad), Err(EngineError::OutOfBounds((-1, 0))));

        let mut bad = before.clone();
        bad.snake.clear();
        assert_eq!(engine.restore(bad), Err(EngineError::EmptySnake));

        assert_eq!(engine.state(), before);
    }
}
