//! Contact form: asks for a name and a phone number
//!
//! The record is stored as soon as the phone number is accepted. The session
//! then plays a short "Sending" animation before printing the follow-ups
//! (clipboard request, mailto link, thanks) and ending.

use std::time::Duration;

use chrono::{SecondsFormat, Utc};

use super::{SessionCx, SessionStatus};
use crate::model::contacts::ContactRecord;
use crate::view::effects::Effect;
use crate::view::output::{EntryId, LineStyle};

const SENDING_DURATION: Duration = Duration::from_millis(1500);
const SPINNER_FRAME: Duration = Duration::from_millis(250);
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 20;

#[derive(Debug)]
enum Step {
    Name,
    Phone {
        name: String,
    },
    Sending {
        record: ContactRecord,
        status: EntryId,
        elapsed: Duration,
        since_frame: Duration,
        dots: usize,
    },
}

#[derive(Debug)]
pub struct ContactSession {
    step: Step,
}

/// Whether `phone` carries a plausible number of digits
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Percent-encode a mailto component (spaces as `%20`)
fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

pub fn mailto_link(to: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        to.trim(),
        encode_component(subject),
        encode_component(body)
    )
}

impl ContactSession {
    pub fn start(cx: &mut SessionCx) -> Self {
        let out = &mut *cx.output;
        out.append_line("┌──────────────── CONTACT ────────────────┐", LineStyle::Divider);
        out.append_line(
            "Let's get you in touch. I'll ask two quick things.",
            LineStyle::Welcome,
        );
        out.append_line("Press Enter after each answer.", LineStyle::Info);
        out.append_line("└─────────────────────────────────────────┘", LineStyle::Divider);
        out.append_line("Your name?", LineStyle::Question);
        Self { step: Step::Name }
    }

    /// The name collected so far
    pub fn name(&self) -> Option<&str> {
        match &self.step {
            Step::Name => None,
            Step::Phone { name } => Some(name),
            Step::Sending { record, .. } => Some(&record.name),
        }
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.step, Step::Sending { .. })
    }

    pub fn submit(&mut self, value: &str, cx: &mut SessionCx) -> SessionStatus {
        if self.is_sending() {
            return SessionStatus::Continue;
        }
        if !value.is_empty() {
            cx.output.append_line(format!("» {value}"), LineStyle::Muted);
        }

        match &self.step {
            Step::Name => {
                let name = value.trim();
                if name.is_empty() {
                    cx.output.append_line("Please enter a name.", LineStyle::Error);
                    return SessionStatus::Continue;
                }
                cx.output
                    .append_line(format!("Nice to meet you, {name}!"), LineStyle::Info);
                cx.output.append_line(
                    "Your phone number? (include country code if outside your region)",
                    LineStyle::Question,
                );
                self.step = Step::Phone {
                    name: name.to_string(),
                };
            }
            Step::Phone { name } => {
                let phone = value.trim();
                if !is_valid_phone(phone) {
                    cx.output.append_line(
                        "Please enter a valid phone number (e.g., +1 555-123-4567).",
                        LineStyle::Error,
                    );
                    return SessionStatus::Continue;
                }
                let record = ContactRecord {
                    name: name.clone(),
                    phone: phone.to_string(),
                    timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                };
                cx.contacts.append(record.clone());
                tracing::info!("Contact request recorded");
                let status = cx.output.append_line("Sending", LineStyle::Info);
                self.step = Step::Sending {
                    record,
                    status,
                    elapsed: Duration::ZERO,
                    since_frame: Duration::ZERO,
                    dots: 0,
                };
            }
            Step::Sending { .. } => {}
        }
        SessionStatus::Continue
    }

    pub fn tick(&mut self, elapsed_now: Duration, cx: &mut SessionCx) -> SessionStatus {
        let Step::Sending {
            record,
            status,
            elapsed,
            since_frame,
            dots,
        } = &mut self.step
        else {
            return SessionStatus::Continue;
        };

        *elapsed += elapsed_now;
        if *elapsed < SENDING_DURATION {
            *since_frame += elapsed_now;
            while *since_frame >= SPINNER_FRAME {
                *since_frame -= SPINNER_FRAME;
                *dots = (*dots + 1) % 4;
            }
            cx.output
                .update(*status, format!("Sending{}", ".".repeat(*dots)), LineStyle::Info);
            return SessionStatus::Continue;
        }

        cx.output.update(*status, "Sent ✓", LineStyle::Success);
        let summary = format!(
            "New contact request\nName: {}\nPhone: {}\nReceived: {}",
            record.name, record.phone, record.timestamp
        );
        cx.effects.push(Effect::CopyToClipboard(summary.clone()));
        let link = mailto_link(
            &cx.config.contact_email,
            "New contact from CRT Terminal",
            &summary,
        );
        cx.output.append_line(
            format!("Open email composer with details: {link}"),
            LineStyle::Info,
        );
        cx.output.append_line(
            format!("Thanks, {}! I’ll get back to you soon.", record.name),
            LineStyle::Success,
        );
        cx.output
            .append_line("Tip: run \"help\" or explore more commands.", LineStyle::Muted);
        SessionStatus::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::storage::{shared, FailingStorage};
    use crate::session::fixture::Fixture;

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+1 555-123-4567"));
        assert!(is_valid_phone("5551234"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("call me maybe"));
        assert!(!is_valid_phone(&"1".repeat(21)));
    }

    #[test]
    fn test_mailto_encoding() {
        let link = mailto_link(" a@b.dev ", "Hi there", "Name: Ada\nPhone: +1");
        assert_eq!(
            link,
            "mailto:a@b.dev?subject=Hi%20there&body=Name%3A%20Ada%0APhone%3A%20%2B1"
        );
    }

    #[test]
    fn test_flow_records_then_finishes_after_sending() {
        let mut fx = Fixture::new();
        let mut session = ContactSession::start(&mut fx.cx());

        assert_eq!(session.submit("  ", &mut fx.cx()), SessionStatus::Continue);
        assert!(session.name().is_none());
        assert!(fx.output.contains("Please enter a name."));

        session.submit("Ada", &mut fx.cx());
        assert_eq!(session.name(), Some("Ada"));
        assert!(fx.output.contains("» Ada"));
        assert!(fx.output.contains("Nice to meet you, Ada!"));

        session.submit("123", &mut fx.cx());
        assert!(!session.is_sending());
        assert!(fx.output.contains("Please enter a valid phone number"));

        session.submit("+1 555-123-4567", &mut fx.cx());
        assert!(session.is_sending());
        let records = fx.contacts.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ada");
        assert_eq!(records[0].phone, "+1 555-123-4567");

        assert_eq!(
            session.tick(Duration::from_millis(500), &mut fx.cx()),
            SessionStatus::Continue
        );
        assert!(fx.output.contains("Sending.."));
        // Input while sending is ignored
        session.submit("hello?", &mut fx.cx());
        assert!(!fx.output.contains("» hello?"));

        assert_eq!(
            session.tick(Duration::from_millis(1000), &mut fx.cx()),
            SessionStatus::Finished
        );
        assert!(fx.output.contains("Sent ✓"));
        assert!(fx.output.contains("Thanks, Ada! I’ll get back to you soon."));
        assert!(matches!(
            fx.effects.as_slice(),
            [Effect::CopyToClipboard(summary)] if summary.starts_with("New contact request\nName: Ada")
        ));
    }

    #[test]
    fn test_flow_completes_when_storage_is_unavailable() {
        let mut fx = Fixture::with_storage(shared(FailingStorage));
        let mut session = ContactSession::start(&mut fx.cx());
        session.submit("Ada", &mut fx.cx());
        session.submit("+1 555-123-4567", &mut fx.cx());
        assert!(session.is_sending());

        assert_eq!(
            session.tick(Duration::from_millis(1500), &mut fx.cx()),
            SessionStatus::Finished
        );
        assert!(fx.output.contains("Sent ✓"));
        assert!(fx.output.contains("Thanks, Ada! I’ll get back to you soon."));
        assert!(fx.contacts.records().is_empty());
    }
}
