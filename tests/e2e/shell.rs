// End-to-end tests for the prompt, history and dispatcher

use std::time::Duration;

use crate::common::harness::ConsoleTestHarness;
use crt_terminal::input::{KeyCode, KeyModifiers};

#[test]
fn test_history_keeps_fifty_newest() {
    let mut harness = ConsoleTestHarness::new(80, 24);
    for i in 1..=51 {
        harness.enter_line(&format!("echo {i}"));
    }

    let entries = harness.shell().history().entries();
    assert_eq!(entries.len(), 50);
    assert_eq!(entries.first().map(String::as_str), Some("echo 51"));
    assert_eq!(entries.last().map(String::as_str), Some("echo 2"));

    harness.send_key(KeyCode::Up, KeyModifiers::NONE);
    harness.send_key(KeyCode::Up, KeyModifiers::NONE);
    assert_eq!(harness.shell().line().text(), "echo 50");
}

#[test]
fn test_dispatcher_outputs() {
    let mut harness = ConsoleTestHarness::new(100, 40);

    harness.enter_line("whoami");
    harness.enter_line("EcHo  Hello   CRT ");
    harness.enter_line("nope");

    let lines = harness.shell().output().plain_lines();
    assert_eq!(
        lines,
        vec![
            "guest@terminal:~$ whoami",
            "guest",
            "guest@terminal:~$ EcHo  Hello   CRT",
            "Hello CRT",
            "guest@terminal:~$ nope",
            "Command not found: nope",
            "Type \"help\" for available commands.",
        ]
    );

    harness.enter_line("clear");
    assert!(harness.shell().output().is_empty());
}

#[test]
fn test_help_hides_aliases() {
    let mut harness = ConsoleTestHarness::new(100, 60);
    harness.enter_line("help");
    let output = harness.shell().output();
    assert!(output.contains("neofetch"));
    assert!(output.contains("meaning.of.life.exe"));
    assert!(!output.contains("  pills"));
}

#[test]
fn test_uptime_tracks_ticks() {
    let mut harness = ConsoleTestHarness::new(80, 24);
    harness.advance(Duration::from_secs(61));
    harness.enter_line("uptime");
    assert!(harness.shell().output().contains("System uptime: 0h 1m 1s"));
}

#[test]
fn test_welcome_and_prompt_render() {
    let mut harness = ConsoleTestHarness::new(100, 40);
    harness.enter_line("welcome");
    harness.type_text("ls");
    harness.assert_screen_contains("guest@terminal:~$ ls");
    harness.assert_screen_contains("guest@terminal");
}

#[test]
fn test_neofetch_renders_info_block() {
    let mut harness = ConsoleTestHarness::new(200, 50);
    harness.enter_line("neofetch");
    harness.assert_screen_contains("guest@terminal");
    harness.assert_screen_contains("Uptime");
}

#[test]
fn test_matrix_closes_on_key_without_typing() {
    let mut harness = ConsoleTestHarness::new(80, 24);
    harness.enter_line("matrix");
    assert!(harness.console().effects().is_active());
    harness.render();

    harness.type_text("x");
    assert!(!harness.console().effects().is_active());
    assert_eq!(harness.shell().line().text(), "");
}

#[test]
fn test_matrix_times_out() {
    let mut harness = ConsoleTestHarness::new(80, 24);
    harness.enter_line("matrix");
    harness.advance(Duration::from_secs(11));
    assert!(!harness.console().effects().is_active());
}

#[test]
fn test_slideshow_navigation_and_close() {
    let mut harness = ConsoleTestHarness::new(100, 30);
    harness.enter_line("slideshow.exe");
    harness.assert_screen_contains("1/");

    harness.send_key(KeyCode::Right, KeyModifiers::NONE);
    harness.assert_screen_contains("2/");
    harness.type_text(" ");
    harness.assert_screen_contains("paused");

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE);
    assert!(!harness.console().effects().is_active());
}
