//! Simulation state: pit, active piece, descent timer and command handling.

use crate::collision::{self, LandingScan};
use crate::input::Command;
use crate::piece::{Piece, Position};
use crate::pit::Pit;
use crate::shape::Direction;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use std::time::{Duration, Instant};

/// Default descent interval.
pub const TICK_INTERVAL: Duration = Duration::from_secs(10);

/// Fixed-interval timer. Restarting always cancels and re-arms with the same interval.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.reset();
        self.next_due = Some(now + self.interval);
    }

    pub fn reset(&mut self) {
        self.next_due = None;
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// True once per elapsed interval; schedules the following firing from `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

/// Options that affect simulation behaviour.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub tick_interval: Duration,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            seed: 0,
        }
    }
}

/// Everything that changes while the piece falls. Owned by the app loop.
#[derive(Debug, Clone)]
pub struct Simulation {
    pit: Pit,
    piece: Piece,
    landing: Position,
    scan: LandingScan,
    direction: Direction,
    rng: Pcg32,
    seed: u64,
    ticker: Ticker,
    pieces_spawned: u64,
}

impl Simulation {
    pub fn new(pit: Pit, config: SimConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let piece = Piece::spawn(&mut rng);
        let mut sim = Self {
            pit,
            piece,
            landing: Position::default(),
            scan: LandingScan::default(),
            direction: Direction::Down,
            rng,
            seed: config.seed,
            ticker: Ticker::new(config.tick_interval),
            pieces_spawned: 1,
        };
        sim.detect_landing();
        sim
    }

    #[inline]
    pub fn pit(&self) -> &Pit {
        &self.pit
    }

    #[inline]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    #[inline]
    pub fn landing(&self) -> Position {
        self.landing
    }

    #[inline]
    pub fn scan(&self) -> &LandingScan {
        &self.scan
    }

    /// Last direction issued by a tick or a move command.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    #[inline]
    pub fn pieces_spawned(&self) -> u64 {
        self.pieces_spawned
    }

    fn pit_width(&self) -> i32 {
        self.pit.width() as i32
    }

    /// Arm the descent timer.
    pub fn start(&mut self, now: Instant) {
        self.ticker.start(now);
    }

    fn spawn_piece(&mut self) {
        self.piece = Piece::spawn(&mut self.rng);
        self.pieces_spawned += 1;
    }

    /// Recompute the landing point for the current piece.
    pub fn detect_landing(&mut self) {
        let (landing, scan) = collision::resolve(&self.piece, &self.pit);
        self.landing = landing;
        self.scan = scan;
    }

    /// Fire the descent timer if due. Returns whether a tick ran.
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        if !self.ticker.fire(now) {
            return false;
        }
        self.tick(now);
        true
    }

    /// One automatic descent step. Returns true if the piece was replaced.
    ///
    /// Replacement happens once the box no longer fits vertically, whatever
    /// the pit holds; the old piece is not written into the pit.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.direction = Direction::Down;
        self.piece.shift(Direction::Down, self.pit_width());

        let floor = self.pit.height() as i32 - self.piece.geometry().box_size;
        let replaced = self.piece.position.y > floor;
        if replaced {
            self.spawn_piece();
            self.ticker.start(now);
        }
        self.detect_landing();
        replaced
    }

    /// New piece at the top; the timer keeps running.
    pub fn restart(&mut self) {
        self.spawn_piece();
        self.detect_landing();
    }

    /// Apply a player command, pull the piece back inside the walls and refresh the landing point.
    pub fn handle(&mut self, command: Command) {
        let width = self.pit_width();
        match command {
            Command::Rotate => self.piece.rotate(Direction::Right),
            Command::SoftDrop => {
                self.direction = Direction::Down;
                self.piece.shift(Direction::Down, width);
            }
            Command::MoveLeft => {
                self.direction = Direction::Left;
                self.piece.shift(Direction::Left, width);
            }
            Command::MoveRight => {
                self.direction = Direction::Right;
                self.piece.shift(Direction::Right, width);
            }
            Command::HardDrop => self.direction = Direction::Down,
            Command::Restart => self.restart(),
            Command::Quit => return,
        }
        self.piece.pull_inside(width);
        self.detect_landing();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pit::{HORIZONTAL_BLOCKS, VERTICAL_BLOCKS};

    fn sim(seed: u64) -> Simulation {
        Simulation::new(
            Pit::initial(),
            SimConfig {
                tick_interval: Duration::from_millis(100),
                seed,
            },
        )
    }

    #[test]
    fn starts_with_a_piece_at_origin_and_a_landing_point() {
        let s = sim(1);
        assert_eq!(s.piece().position, Position::new(0, 0));
        assert_eq!(s.landing(), collision::resolve(s.piece(), s.pit()).0);
        assert_eq!(s.pieces_spawned(), 1);
    }

    #[test]
    fn same_seed_same_pieces() {
        let mut a = sim(99);
        let mut b = sim(99);
        for _ in 0..10 {
            assert_eq!(a.piece().kind(), b.piece().kind());
            a.restart();
            b.restart();
        }
    }

    #[test]
    fn tick_moves_down_and_sets_direction() {
        let mut s = sim(3);
        s.handle(Command::MoveRight);
        assert_eq!(s.direction(), Direction::Right);
        let replaced = s.tick(Instant::now());
        assert!(!replaced);
        assert_eq!(s.piece().position.y, 1);
        assert_eq!(s.direction(), Direction::Down);
    }

    #[test]
    fn tick_replaces_piece_past_the_floor_threshold() {
        let mut s = sim(5);
        let now = Instant::now();
        s.start(now);
        let floor = (VERTICAL_BLOCKS as i32) - s.piece().geometry().box_size;
        while s.piece().position.y <= floor {
            s.handle(Command::SoftDrop);
        }
        s.handle(Command::MoveRight);
        assert_eq!(s.pieces_spawned(), 1);

        let later = now + Duration::from_millis(30);
        assert!(s.tick(later));
        assert_eq!(s.pieces_spawned(), 2);
        assert_eq!(s.piece().position, Position::new(0, 0));
        assert_eq!(s.piece().mask(), &s.piece().kind().mask());
        assert_eq!(s.ticker().next_due(), Some(later + Duration::from_millis(100)));
    }

    #[test]
    fn tick_keeps_piece_until_threshold_is_passed() {
        let mut s = sim(8);
        let floor = (VERTICAL_BLOCKS as i32) - s.piece().geometry().box_size;
        for _ in 0..floor {
            assert!(!s.tick(Instant::now()));
        }
        assert_eq!(s.piece().position.y, floor);
        assert!(s.tick(Instant::now()));
    }

    #[test]
    fn soft_drop_can_pass_the_landing_point() {
        let mut s = sim(11);
        let landing = s.landing();
        for _ in 0..=landing.y {
            s.handle(Command::SoftDrop);
        }
        assert!(s.piece().position.y > landing.y);
    }

    #[test]
    fn landed_pieces_never_enter_the_pit() {
        let mut s = sim(13);
        let before = s.pit().clone();
        for _ in 0..100 {
            s.tick(Instant::now());
        }
        assert_eq!(s.pit(), &before);
    }

    #[test]
    fn hard_drop_only_sets_direction() {
        let mut s = sim(17);
        s.handle(Command::MoveLeft);
        let position = s.piece().position;
        s.handle(Command::HardDrop);
        assert_eq!(s.direction(), Direction::Down);
        assert_eq!(s.piece().position, position);
    }

    #[test]
    fn restart_spawns_but_keeps_ticker() {
        let mut s = sim(19);
        let now = Instant::now();
        s.start(now);
        s.handle(Command::SoftDrop);
        s.handle(Command::Restart);
        assert_eq!(s.pieces_spawned(), 2);
        assert_eq!(s.piece().position, Position::new(0, 0));
        assert_eq!(s.ticker().next_due(), Some(now + Duration::from_millis(100)));
    }

    #[test]
    fn rotate_near_right_wall_is_pulled_back() {
        let mut s = sim(23);
        for _ in 0..HORIZONTAL_BLOCKS {
            s.handle(Command::MoveRight);
        }
        for _ in 0..4 {
            s.handle(Command::Rotate);
            let right = s.piece().right_limit(HORIZONTAL_BLOCKS as i32);
            assert!(s.piece().position.x <= right);
            assert!(s.piece().cells().all(|(x, _)| x < HORIZONTAL_BLOCKS as i32));
        }
    }

    #[test]
    fn landing_is_refreshed_after_each_command() {
        let mut s = sim(29);
        for command in [Command::MoveRight, Command::Rotate, Command::SoftDrop, Command::MoveLeft] {
            s.handle(command);
            assert_eq!(s.landing(), collision::resolve(s.piece(), s.pit()).0);
            assert_eq!(s.landing().x, s.piece().position.x);
        }
    }

    #[test]
    fn ticker_fires_once_per_interval() {
        let mut t = Ticker::new(Duration::from_millis(50));
        let now = Instant::now();
        assert!(!t.fire(now));
        t.start(now);
        assert!(!t.fire(now + Duration::from_millis(49)));
        assert!(t.fire(now + Duration::from_millis(50)));
        assert!(!t.fire(now + Duration::from_millis(60)));
        assert!(t.fire(now + Duration::from_millis(100)));
        t.reset();
        assert!(!t.fire(now + Duration::from_secs(10)));
    }

    #[test]
    fn poll_tick_runs_only_when_due() {
        let mut s = sim(31);
        let now = Instant::now();
        s.start(now);
        assert!(!s.poll_tick(now));
        assert_eq!(s.piece().position.y, 0);
        assert!(s.poll_tick(now + Duration::from_millis(100)));
        assert_eq!(s.piece().position.y, 1);
    }
}
