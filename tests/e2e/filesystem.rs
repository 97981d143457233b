// End-to-end tests for the virtual filesystem commands and nano

use crate::common::harness::ConsoleTestHarness;
use crt_terminal::input::{KeyCode, KeyModifiers};
use crt_terminal::model::vfs::{default_tree, Node};

fn text_at(harness: &ConsoleTestHarness, path: &str) -> Option<String> {
    match harness.shell().vfs().get_node(path) {
        Some(Node::TextFile { content }) => Some(content.clone()),
        _ => None,
    }
}

#[test]
fn test_nano_save_token_writes_file() {
    let mut harness = ConsoleTestHarness::new(80, 24);

    harness.enter_line("nano notes.txt");
    assert!(harness.shell().is_interactive());
    harness.enter_line("a");
    harness.enter_line("b");
    harness.enter_line(":wq");

    assert!(!harness.shell().is_interactive());
    assert!(harness.shell().output().contains("Saved."));
    assert_eq!(text_at(&harness, "/home/guest/notes.txt").as_deref(), Some("a\nb"));

    harness.enter_line("cat notes.txt");
    let lines = harness.shell().output().plain_lines();
    assert_eq!(&lines[lines.len() - 2..], &["a", "b"]);
}

#[test]
fn test_nano_escape_aborts_without_writing() {
    let mut harness = ConsoleTestHarness::new(80, 24);

    harness.enter_line("nano scratch.txt");
    harness.enter_line("draft");
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE);

    assert!(!harness.shell().is_interactive());
    assert!(harness.shell().output().contains("Aborted."));
    assert_eq!(text_at(&harness, "/home/guest/scratch.txt"), None);
}

#[test]
fn test_nano_ctrl_x_saves_typed_line() {
    let mut harness = ConsoleTestHarness::new(80, 24);

    harness.enter_line("nano todo.txt");
    harness.enter_line("first");
    harness.send_key(KeyCode::Char('x'), KeyModifiers::CONTROL);

    assert!(!harness.shell().is_interactive());
    assert_eq!(text_at(&harness, "/home/guest/todo.txt").as_deref(), Some("first"));
}

#[test]
fn test_nano_ctrl_x_keeps_unsubmitted_text_out_of_the_prompt() {
    let mut harness = ConsoleTestHarness::new(80, 24);

    harness.enter_line("nano t.txt");
    harness.type_text("rm -rf");
    harness.send_key(KeyCode::Char('x'), KeyModifiers::CONTROL);

    assert!(!harness.shell().is_interactive());
    assert_eq!(harness.shell().line().text(), "");
    assert_eq!(text_at(&harness, "/home/guest/t.txt").as_deref(), Some("rm -rf"));

    // Enter on the now empty prompt runs nothing
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(harness.shell().history().entries(), &["nano t.txt"]);
}

#[test]
fn test_nano_escape_discards_unsubmitted_text() {
    let mut harness = ConsoleTestHarness::new(80, 24);

    harness.enter_line("nano t.txt");
    harness.type_text("oops");
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE);

    assert!(!harness.shell().is_interactive());
    assert_eq!(harness.shell().line().text(), "");
    assert_eq!(text_at(&harness, "/home/guest/t.txt"), None);
}

#[test]
fn test_edits_persist_and_fsreset_restores_defaults() {
    let mut harness = ConsoleTestHarness::new(80, 24);
    harness.enter_line("nano keep.txt");
    harness.enter_line("kept");
    harness.enter_line(":x");

    let reopened = ConsoleTestHarness::with_storage(80, 24, harness.storage());
    assert_eq!(text_at(&reopened, "/home/guest/keep.txt").as_deref(), Some("kept"));

    harness.enter_line("fsreset");
    assert!(harness
        .shell()
        .output()
        .contains("Filesystem reset. Try ls, cd pictures, open ravon-dev.svg"));
    assert_eq!(harness.shell().vfs().root(), &default_tree());

    let after_reset = ConsoleTestHarness::with_storage(80, 24, harness.storage());
    assert_eq!(after_reset.shell().vfs().root(), &default_tree());
}

#[test]
fn test_navigation_and_listing() {
    let mut harness = ConsoleTestHarness::new(80, 24);

    harness.enter_line("cd nowhere");
    assert!(harness.shell().output().contains("cd: nowhere: No such file or directory"));

    harness.enter_line("cd pictures");
    assert_eq!(harness.shell().prompt(), "guest@terminal:~/pictures$");
    harness.enter_line("pwd");
    assert!(harness.shell().output().contains("/home/guest/pictures"));

    harness.enter_line("cd ..");
    harness.enter_line("cat pictures");
    assert!(harness.shell().output().contains("cat: pictures: Not a text file"));

    harness.enter_line("cd");
    assert_eq!(harness.shell().cwd(), "/home/guest");
}

#[test]
fn test_open_image_shows_overlay_until_key() {
    let mut harness = ConsoleTestHarness::new(80, 24);

    harness.enter_line("open pictures/ravon-dev.svg");
    assert!(harness.console().effects().is_active());
    harness.assert_screen_contains("press any key to close");

    harness.type_text("q");
    assert!(!harness.console().effects().is_active());
    assert_eq!(harness.shell().line().text(), "");
}
