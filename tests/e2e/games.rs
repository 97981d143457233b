// End-to-end tests for snake and the pill game

use std::time::Duration;

use crate::common::harness::ConsoleTestHarness;
use crt_terminal::input::{KeyCode, KeyModifiers};
use crt_terminal::session::snake::{Direction, Point};
use crt_terminal::session::Session;

fn snake_state(harness: &ConsoleTestHarness) -> Option<(Point, Direction)> {
    match harness.shell().session() {
        Some(Session::Snake(snake)) => Some((snake.head()?, snake.direction())),
        _ => None,
    }
}

#[test]
fn test_snake_ignores_reversal_and_moves_on_tick() {
    let mut harness = ConsoleTestHarness::new(80, 30);
    harness.enter_line("snake");
    let (start, dir) = snake_state(&harness).expect("snake running");
    assert_eq!(dir, Direction::Right);

    harness.send_key(KeyCode::Left, KeyModifiers::NONE);
    assert_eq!(snake_state(&harness).map(|s| s.1), Some(Direction::Right));

    harness.advance(Duration::from_millis(120));
    let (head, _) = snake_state(&harness).expect("snake running");
    assert_eq!(head, Point { x: start.x + 1, y: start.y });

    harness.send_key(KeyCode::Up, KeyModifiers::NONE);
    harness.advance(Duration::from_millis(120));
    let (head, dir) = snake_state(&harness).expect("snake running");
    assert_eq!(dir, Direction::Up);
    assert_eq!(head.y, start.y - 1);
}

#[test]
fn test_snake_late_frame_moves_one_cell() {
    let mut harness = ConsoleTestHarness::new(80, 30);
    harness.enter_line("snake");
    let (start, _) = snake_state(&harness).expect("snake running");

    harness.tick(Duration::from_secs(10));
    let (head, _) = snake_state(&harness).expect("snake still running");
    assert_eq!(head, Point { x: start.x + 1, y: start.y });
}

#[test]
fn test_snake_swallows_typing() {
    let mut harness = ConsoleTestHarness::new(80, 30);
    harness.enter_line("snake");
    harness.type_text("hello");
    assert_eq!(harness.shell().line().text(), "");
    assert!(harness.shell().is_interactive());
}

#[test]
fn test_snake_quit_prints_score() {
    let mut harness = ConsoleTestHarness::new(80, 30);
    harness.enter_line("snake");
    assert!(harness
        .shell()
        .output()
        .contains("Snake starting… Use arrow keys to move. Press Q to quit."));
    harness.assert_screen_contains("Score: 0");

    harness.type_text("q");
    assert!(!harness.shell().is_interactive());
    assert!(harness.shell().output().contains("Exited! Final score: 0"));
}

/// Lines typed during a game go to the game, so no second session can start
#[test]
fn test_only_one_session_at_a_time() {
    let mut harness = ConsoleTestHarness::new(80, 30);
    harness.enter_line("snake");
    harness.enter_line("contact");

    assert!(matches!(harness.shell().session(), Some(Session::Snake(_))));
    assert!(!harness.shell().output().contains("Your name?"));
    assert!(!harness.shell().history().entries().contains(&"contact".to_string()));
}

#[test]
fn test_blue_pill_story_ends() {
    let mut harness = ConsoleTestHarness::new(80, 30);
    harness.enter_line("meaning.of.life.exe");
    assert!(harness.shell().output().contains("Wake up, Neo…"));

    harness.enter_line("purple");
    assert!(harness.shell().output().contains("Only two choices: red or blue."));

    harness.enter_line("blue");
    harness.advance(Duration::from_secs(4));
    assert!(!harness.shell().is_interactive());
    let output = harness.shell().output();
    assert!(output.contains("…and believe whatever you want to believe."));
    assert!(output.contains("Tip: try snake, neofetch, or matrix."));
}

#[test]
fn test_red_pill_rains_then_wakes() {
    let mut harness = ConsoleTestHarness::new(80, 30);
    harness.enter_line("pills");
    harness.enter_line("red");

    harness.advance(Duration::from_millis(1300));
    assert!(harness.console().effects().is_active());
    assert!(harness.shell().output().contains("Tracing reality…"));

    harness.advance(Duration::from_millis(1800));
    assert!(!harness.shell().is_interactive());
    assert!(harness.shell().output().contains("Welcome to the desert of the real."));
}

#[test]
fn test_walking_away_from_the_pills() {
    let mut harness = ConsoleTestHarness::new(80, 30);
    harness.enter_line("pills");
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE);

    assert!(!harness.shell().is_interactive());
    assert!(harness.shell().output().contains("You walk away. The pills remain."));
}
