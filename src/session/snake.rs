//! Snake
//!
//! A fixed board that wraps at the edges. Direction changes are queued and
//! applied on the next step, and a change straight back into the body is
//! refused against the direction actually travelled.

use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;

use super::{SessionCx, SessionStatus};
use crate::input::{KeyCode, KeyEvent};
use crate::view::output::{EntryId, LineStyle};

pub const POINTS_PER_FOOD: u32 = 10;

const BODY: char = '■';
const HEAD: char = '█';
const FOOD: char = '●';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    GameOver,
    Exited,
}

#[derive(Debug)]
pub struct SnakeSession {
    width: i32,
    height: i32,
    dir: Direction,
    next_dir: Direction,
    /// Tail first, head last
    segments: VecDeque<Point>,
    food: Option<Point>,
    score: u32,
    step_every: Duration,
    since_step: Duration,
    score_line: EntryId,
    board: EntryId,
}

impl SnakeSession {
    pub fn start(cx: &mut SessionCx) -> Self {
        let width = i32::from(cx.config.snake.width.max(4));
        let height = i32::from(cx.config.snake.height.max(2));
        let (cx0, cy0) = (width / 2, height / 2);

        let out = &mut *cx.output;
        out.append_line("╔══════════════ S N A K E ══════════════╗", LineStyle::Divider);
        let score_line = out.append_line("Score: 0", LineStyle::Info);
        let board = out.append_block("", LineStyle::Ascii);
        out.append_line("Controls: ← ↑ → ↓ to move • Q to quit", LineStyle::Muted);
        out.append_line("╚═══════════════════════════════════════╝", LineStyle::Divider);

        let mut snake = Self {
            width,
            height,
            dir: Direction::Right,
            next_dir: Direction::Right,
            segments: (0..3)
                .map(|i| Point {
                    x: cx0 - 2 + i,
                    y: cy0,
                })
                .collect(),
            food: None,
            score: 0,
            step_every: Duration::from_millis(cx.config.snake.tick_ms.max(1)),
            since_step: Duration::ZERO,
            score_line,
            board,
        };
        snake.food = snake.place_food(cx);
        snake.render(cx);
        snake
    }

    pub fn head(&self) -> Option<Point> {
        self.segments.back().copied()
    }

    pub fn segments(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    /// Queue a turn, ignoring a reversal of the current heading
    pub fn turn(&mut self, dir: Direction) {
        if dir != self.dir.opposite() {
            self.next_dir = dir;
        }
    }

    /// Pick a random free cell, `None` once the snake fills the board
    fn place_food(&self, cx: &mut SessionCx) -> Option<Point> {
        let free: Vec<Point> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Point { x, y }))
            .filter(|p| !self.segments.contains(p))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(free[cx.rng.gen_range(0..free.len())])
    }

    fn render(&self, cx: &mut SessionCx) {
        let mut grid = vec![vec![' '; self.width as usize]; self.height as usize];
        let mut cells = self.segments.iter().rev();
        if let Some(head) = cells.next() {
            grid[head.y as usize][head.x as usize] = HEAD;
        }
        for seg in cells {
            grid[seg.y as usize][seg.x as usize] = BODY;
        }
        if let Some(food) = self.food {
            grid[food.y as usize][food.x as usize] = FOOD;
        }
        let board = grid
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        cx.output.update(self.board, board, LineStyle::Ascii);
    }

    /// Advance one cell. Returns the outcome when the move ends the game.
    fn step(&mut self, cx: &mut SessionCx) -> Option<Outcome> {
        let head = self.head()?;
        self.dir = self.next_dir;
        let (dx, dy) = self.dir.delta();
        let next = Point {
            x: (head.x + dx).rem_euclid(self.width),
            y: (head.y + dy).rem_euclid(self.height),
        };

        if self.segments.contains(&next) {
            return Some(Outcome::GameOver);
        }

        self.segments.push_back(next);
        if self.food == Some(next) {
            self.score += POINTS_PER_FOOD;
            cx.output
                .update(self.score_line, format!("Score: {}", self.score), LineStyle::Info);
            self.food = self.place_food(cx);
        } else {
            self.segments.pop_front();
        }
        self.render(cx);
        None
    }

    fn end(&self, outcome: Outcome, cx: &mut SessionCx) -> SessionStatus {
        let (reason, style) = match outcome {
            Outcome::GameOver => ("Game Over", LineStyle::Error),
            Outcome::Exited => ("Exited", LineStyle::Info),
        };
        cx.output
            .append_line(format!("{reason}! Final score: {}", self.score), style);
        tracing::debug!("Snake ended ({}) with score {}", reason, self.score);
        SessionStatus::Finished
    }

    pub fn handle_key(&mut self, key: &KeyEvent, cx: &mut SessionCx) -> Option<SessionStatus> {
        match key.code {
            KeyCode::Up => self.turn(Direction::Up),
            KeyCode::Down => self.turn(Direction::Down),
            KeyCode::Left => self.turn(Direction::Left),
            KeyCode::Right => self.turn(Direction::Right),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Some(self.end(Outcome::Exited, cx));
            }
            // The game owns the keyboard; nothing reaches the prompt
            _ => {}
        }
        Some(SessionStatus::Continue)
    }

    /// Advance the game clock. A late frame moves at most one cell.
    pub fn tick(&mut self, elapsed: Duration, cx: &mut SessionCx) -> SessionStatus {
        self.since_step = (self.since_step + elapsed).min(self.step_every);
        if self.since_step < self.step_every {
            return SessionStatus::Continue;
        }
        self.since_step = Duration::ZERO;
        match self.step(cx) {
            Some(outcome) => self.end(outcome, cx),
            None => SessionStatus::Continue,
        }
    }
}
