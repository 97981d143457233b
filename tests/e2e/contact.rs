// End-to-end tests for the contact flow

use std::time::Duration;

use crate::common::harness::ConsoleTestHarness;
use crt_terminal::model::storage::{Storage, CONTACTS_KEY};

/// The full dialogue: name, phone, sending animation, email link and persisted record
#[test]
fn test_contact_flow_records_and_links() {
    let mut harness = ConsoleTestHarness::new(100, 40);

    harness.enter_line("contact");
    assert!(harness.shell().is_interactive());
    assert!(harness.shell().output().contains("Your name?"));

    harness.enter_line("Ada");
    assert!(harness.shell().output().contains("Nice to meet you, Ada!"));

    harness.enter_line("12");
    assert!(harness
        .shell()
        .output()
        .contains("Please enter a valid phone number (e.g., +1 555-123-4567)."));

    harness.enter_line("+1 555-123-4567");
    assert!(harness.shell().output().contains("Sending"));
    assert_eq!(harness.shell().contacts().records().len(), 1);

    // Input while sending is swallowed by the session
    harness.enter_line("ls");
    assert!(!harness.shell().output().contains("documents/"));

    harness.advance(Duration::from_millis(1600));
    assert!(!harness.shell().is_interactive());
    let output = harness.shell().output();
    assert!(output.contains("Sent ✓"));
    assert!(output.contains("Open email composer with details: mailto:admin@ravon.dev?subject="));
    assert!(output.contains("Thanks, Ada! I’ll get back to you soon."));

    let clipboard = harness.take_clipboard();
    assert_eq!(clipboard.len(), 1);
    assert!(clipboard[0].contains("Name: Ada"));
    assert!(clipboard[0].contains("Phone: +1 555-123-4567"));

    let raw = harness
        .storage()
        .borrow()
        .get(CONTACTS_KEY)
        .unwrap()
        .expect("contacts persisted");
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["name"], "Ada");
    assert_eq!(stored[0]["phone"], "+1 555-123-4567");
}

/// Contact records accumulate across shells sharing one store
#[test]
fn test_contacts_append_across_sessions() {
    let mut first = ConsoleTestHarness::new(80, 24);
    for name in ["Ada", "Grace"] {
        first.enter_line("contact");
        first.enter_line(name);
        first.enter_line("5551234");
        first.advance(Duration::from_millis(1600));
    }

    let second = ConsoleTestHarness::with_storage(80, 24, first.storage());
    let names: Vec<String> = second
        .shell()
        .contacts()
        .records()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Ada", "Grace"]);
}
