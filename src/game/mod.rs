mod direction;
mod food;
mod grid;
mod snake;
mod speed;
pub(crate) use self::direction::Direction;
use self::food::FoodSpawner;
pub(crate) use self::grid::{Cell, Grid};
use self::snake::{MoveOutcome, Snake};
pub(crate) use self::speed::Speed;
use crate::command::Command;
use crate::consts;
use crate::highscore::{HighScoreFile, HighScoreStore};
use crate::util::error_chain;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

/// A single player's game: the current run plus the high score carried
/// between runs.
#[derive(Clone, Debug)]
pub(crate) struct GameSession<R = rand::rngs::ThreadRng, S = HighScoreFile> {
    rng: R,
    store: S,
    grid: Grid,
    spawner: FoodSpawner,
    snake: Snake,
    food: Option<Cell>,
    score: u32,
    speed: Speed,
    phase: Phase,
    high_score: u32,
}

impl<R: Rng, S: HighScoreStore> GameSession<R, S> {
    /// Create a session that has not started yet, loading the high score from
    /// `store`.
    pub(crate) fn new(grid: Grid, rng: R, mut store: S) -> GameSession<R, S> {
        let high_score = store.load();
        GameSession {
            rng,
            store,
            grid,
            spawner: FoodSpawner::new(grid),
            snake: Snake::default(),
            food: None,
            score: 0,
            speed: Speed::BASE,
            phase: Phase::NotStarted,
            high_score,
        }
    }

    /// Begin a new run, discarding any previous one
    pub(crate) fn start(&mut self) -> Signal {
        self.snake = Snake::default();
        self.food = None;
        self.score = 0;
        self.speed = Speed::BASE;
        self.phase = Phase::Running;
        tracing::info!(high_score = self.high_score, "starting new run");
        Signal::Started
    }

    /// Apply a command from the player.  Commands that make no sense in the
    /// current phase are ignored.
    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<Signal> {
        match (self.phase, cmd) {
            (_, Command::Quit) => {
                self.save_high_score();
                return Some(Signal::Quit);
            }
            (Phase::NotStarted | Phase::GameOver, Command::Start) => return Some(self.start()),
            (Phase::Running, Command::Turn(d)) => self.snake.propose_direction(d),
            (Phase::Running, Command::TogglePause) => {
                tracing::debug!(score = self.score, "paused");
                self.phase = Phase::Paused;
            }
            (Phase::Paused, Command::TogglePause) => {
                tracing::debug!("resumed");
                self.phase = Phase::Running;
            }
            (phase, cmd) => tracing::trace!(?phase, ?cmd, "ignoring command"),
        }
        None
    }

    /// Advance the run by one step.  Returns [`Signal::GameOver`] if the snake
    /// crashed.
    pub(crate) fn tick(&mut self) -> Option<Signal> {
        if self.phase != Phase::Running {
            return None;
        }
        let food = match self.food {
            Some(cell) => cell,
            None => {
                let cell = self.spawner.spawn(&mut self.rng, self.snake.body());
                tracing::trace!(%cell, "placed food");
                self.food = Some(cell);
                cell
            }
        };
        let outcome = self.snake.advance(Some(food), &self.grid);
        if outcome.ate() {
            self.score += consts::SCORE_INCREMENT;
            self.speed.increase();
            self.food = None;
            tracing::debug!(score = self.score, speed = self.speed.get(), "ate food");
        }
        if let MoveOutcome::Collided { collision, .. } = outcome {
            tracing::info!(
                ?collision,
                head = %self.snake.head(),
                direction = ?self.snake.direction(),
                score = self.score,
                "snake crashed"
            );
            return Some(self.game_over());
        }
        None
    }

    fn game_over(&mut self) -> Signal {
        self.phase = Phase::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
            tracing::info!(high_score = self.high_score, "new high score");
            self.persist(self.high_score);
        }
        Signal::GameOver {
            score: self.score,
            high_score: self.high_score,
        }
    }

    /// Store the better of the current score and the high score.  Called on
    /// the way out of the program.
    pub(crate) fn save_high_score(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.persist(self.high_score);
    }

    fn persist(&mut self, score: u32) {
        if let Err(e) = self.store.save(score) {
            tracing::warn!(score, error = %error_chain(&e), "could not save high score");
        }
    }
}

impl<R, S> GameSession<R, S> {
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn current_speed(&self) -> Speed {
        self.speed
    }

    /// How long the caller should wait between calls to `tick()`
    pub(crate) fn tick_period(&self) -> Duration {
        if self.phase == Phase::Running {
            self.current_speed().period()
        } else {
            Duration::from_secs(1) / consts::IDLE_SPEED
        }
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            body: self.snake.body(),
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            speed: self.speed,
            phase: self.phase,
        }
    }
}

/// The coarse lifecycle state of a session
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// Waiting for the player to start the first run
    NotStarted,
    Running,
    Paused,
    /// The last run ended in a crash
    GameOver,
}

/// Things the session tells its caller about
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Signal {
    /// A run has begun
    Started,
    /// The run has ended
    GameOver { score: u32, high_score: u32 },
    /// The player asked to leave; the high score has been saved
    Quit,
}

/// Everything needed to draw the session at a moment in time
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    pub(crate) grid: Grid,
    pub(crate) body: &'a VecDeque<Cell>,
    pub(crate) food: Option<Cell>,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) speed: Speed,
    pub(crate) phase: Phase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::SaveError;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// Keeps the high score in memory and records every save
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct MemoryStore {
        initial: u32,
        saved: Vec<u32>,
    }

    impl HighScoreStore for MemoryStore {
        fn load(&mut self) -> u32 {
            self.initial
        }

        fn save(&mut self, score: u32) -> Result<(), SaveError> {
            self.saved.push(score);
            Ok(())
        }
    }

    fn session(high_score: u32) -> GameSession<ChaCha12Rng, MemoryStore> {
        GameSession::new(
            Grid::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
            MemoryStore {
                initial: high_score,
                saved: Vec::new(),
            },
        )
    }

    fn running(high_score: u32) -> GameSession<ChaCha12Rng, MemoryStore> {
        let mut game = session(high_score);
        assert_eq!(game.handle_command(Command::Start), Some(Signal::Started));
        game
    }

    /// Put food directly in front of the snake
    fn feed(game: &mut GameSession<ChaCha12Rng, MemoryStore>) {
        let cell = game
            .snake
            .next_direction
            .advance(game.snake.head(), game.grid.cell_size());
        game.food = Some(cell);
    }

    fn body(coords: &[(i32, i32)]) -> VecDeque<Cell> {
        coords.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn new_session() {
        let game = session(70);
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.high_score, 70);
        assert_eq!(game.current_speed(), Speed::BASE);
        assert_eq!(game.tick_period(), Duration::from_millis(200));
    }

    #[test]
    fn not_started_ignores_ticks_and_turns() {
        let mut game = session(0);
        let before = game.snake.clone();
        assert_eq!(game.handle_command(Command::Turn(Direction::Down)), None);
        assert_eq!(game.handle_command(Command::TogglePause), None);
        assert_eq!(game.tick(), None);
        assert_eq!(game.snake, before);
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.food, None);
    }

    #[test]
    fn start_resets_run() {
        let game = running(0);
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snapshot().body, &body(&[(100, 50), (90, 50), (80, 50)]));
        assert_eq!(game.food, None);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn first_tick_places_food_off_snake() {
        let mut game = running(0);
        assert_eq!(game.tick(), None);
        assert_eq!(game.snake.head(), Cell::new(110, 50));
        match game.food {
            Some(food) => {
                assert!(game.grid.is_in_bounds(food));
                assert!(!game.snake.body().contains(&food));
                assert_eq!(game.snapshot().body, &body(&[(110, 50), (100, 50), (90, 50)]));
            }
            // The food happened to land right in front of the snake
            None => assert_eq!(game.score, 10),
        }
    }

    #[test]
    fn eat_food() {
        let mut game = running(0);
        game.food = Some(Cell::new(110, 50));
        assert_eq!(game.tick(), None);
        assert_eq!(
            game.snapshot().body,
            &body(&[(110, 50), (100, 50), (90, 50), (80, 50)])
        );
        assert_eq!(game.score, 10);
        assert_eq!(game.current_speed().get(), 16);
        assert_eq!(game.food, None);
        assert_eq!(game.tick_period(), Duration::from_secs(1) / 16);
    }

    #[test]
    fn speed_is_capped() {
        let mut game = running(0);
        for i in 1..=20 {
            feed(&mut game);
            assert_eq!(game.tick(), None);
            assert_eq!(game.score, 10 * i);
            assert!(Speed::BASE <= game.current_speed() && game.current_speed() <= Speed::MAX);
        }
        assert_eq!(game.current_speed(), Speed::MAX);
        assert_eq!(game.snake.body().len(), 23);
    }

    #[test]
    fn turn_while_running() {
        let mut game = running(0);
        assert_eq!(game.handle_command(Command::Turn(Direction::Down)), None);
        assert_eq!(game.handle_command(Command::Turn(Direction::Left)), None);
        assert_eq!(game.tick(), None);
        assert_eq!(game.snake.head(), Cell::new(100, 60));
    }

    #[test]
    fn pause_freezes_everything() {
        let mut game = running(0);
        assert_eq!(game.tick(), None);
        assert_eq!(game.handle_command(Command::TogglePause), None);
        assert_eq!(game.phase(), Phase::Paused);
        assert_eq!(game.tick_period(), Duration::from_millis(200));
        let snake = game.snake.clone();
        let food = game.food;
        let score = game.score;
        assert_eq!(game.handle_command(Command::Turn(Direction::Up)), None);
        for _ in 0..10 {
            assert_eq!(game.tick(), None);
        }
        assert_eq!(game.snake, snake);
        assert_eq!(game.food, food);
        assert_eq!(game.score, score);
        assert_eq!(game.handle_command(Command::TogglePause), None);
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.tick(), None);
        assert_eq!(game.snake.direction(), Direction::Right);
        assert_eq!(game.snake.head(), Cell::new(120, 50));
    }

    #[test]
    fn boundary_crash_sets_high_score() {
        let mut game = running(15);
        feed(&mut game);
        assert_eq!(game.tick(), None);
        feed(&mut game);
        assert_eq!(game.tick(), None);
        game.snake = Snake::new(body(&[(0, 50), (10, 50), (20, 50)]), Direction::Left);
        game.food = Some(Cell::new(500, 500));
        assert_eq!(
            game.tick(),
            Some(Signal::GameOver {
                score: 20,
                high_score: 20
            })
        );
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.store.saved, [20]);
        // Nothing moves after the crash
        let snake = game.snake.clone();
        assert_eq!(game.tick(), None);
        assert_eq!(game.snake, snake);
    }

    #[test]
    fn crash_below_high_score_saves_nothing() {
        let mut game = running(100);
        game.snake = Snake::new(body(&[(500, 0), (500, 10), (500, 20)]), Direction::Up);
        assert_eq!(
            game.tick(),
            Some(Signal::GameOver {
                score: 0,
                high_score: 100
            })
        );
        assert!(game.store.saved.is_empty());
    }

    #[test]
    fn eating_into_wall_still_scores() {
        let mut game = running(0);
        game.snake = Snake::new(body(&[(990, 50), (980, 50), (970, 50)]), Direction::Right);
        game.food = Some(Cell::new(1000, 50));
        assert_eq!(
            game.tick(),
            Some(Signal::GameOver {
                score: 10,
                high_score: 10
            })
        );
        assert_eq!(game.current_speed().get(), 16);
    }

    #[test]
    fn self_crash() {
        let mut game = running(0);
        game.snake = Snake::new(
            body(&[(100, 50), (110, 50), (110, 60), (100, 60), (90, 60)]),
            Direction::Left,
        );
        assert_eq!(game.handle_command(Command::Turn(Direction::Down)), None);
        assert!(matches!(game.tick(), Some(Signal::GameOver { .. })));
    }

    #[test]
    fn quit_while_paused_saves_best_score() {
        let mut game = running(5);
        feed(&mut game);
        assert_eq!(game.tick(), None);
        assert_eq!(game.handle_command(Command::TogglePause), None);
        assert_eq!(game.handle_command(Command::Quit), Some(Signal::Quit));
        assert_eq!(game.store.saved, [10]);
        assert_eq!(game.high_score, 10);
    }

    #[test]
    fn quit_keeps_higher_stored_score() {
        let mut game = running(300);
        feed(&mut game);
        assert_eq!(game.tick(), None);
        assert_eq!(game.handle_command(Command::Quit), Some(Signal::Quit));
        assert_eq!(game.store.saved, [300]);
    }

    #[test]
    fn quit_before_start() {
        let mut game = session(40);
        assert_eq!(game.handle_command(Command::Quit), Some(Signal::Quit));
        assert_eq!(game.store.saved, [40]);
    }

    #[test]
    fn restart_after_game_over() {
        let mut game = running(0);
        feed(&mut game);
        assert_eq!(game.tick(), None);
        game.snake = Snake::new(body(&[(500, 590), (500, 580)]), Direction::Down);
        assert!(matches!(game.tick(), Some(Signal::GameOver { .. })));
        assert_eq!(game.handle_command(Command::TogglePause), None);
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.handle_command(Command::Start), Some(Signal::Started));
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.score, 0);
        assert_eq!(game.current_speed(), Speed::BASE);
        assert_eq!(game.high_score, 10);
        assert_eq!(game.snake, Snake::default());
    }

    #[test]
    fn start_ignored_while_running() {
        let mut game = running(0);
        feed(&mut game);
        assert_eq!(game.tick(), None);
        assert_eq!(game.handle_command(Command::Start), None);
        assert_eq!(game.score, 10);
    }

    #[test]
    fn snapshot() {
        let mut game = running(90);
        game.food = Some(Cell::new(300, 300));
        let snap = game.snapshot();
        assert_eq!(snap.food, Some(Cell::new(300, 300)));
        assert_eq!(snap.score, 0);
        assert_eq!(snap.high_score, 90);
        assert_eq!(snap.speed, Speed::BASE);
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.body.len(), 3);
    }
}
