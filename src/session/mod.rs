//! Interactive sessions
//!
//! A session is a multi-turn flow that owns line input until it ends: the
//! contact form, the nano editor, snake and the pill game. At most one is alive
//! at a time; it lives in the single slot of [`SessionManager`].
//!
//! Sessions are driven three ways:
//! - `submit` receives each line typed while the session is active
//! - `handle_key` is the key interceptor; it sees keys before the line editor
//!   and may consume them
//! - `tick` advances timer-driven phases (animations, game steps)
//!
//! Every path that ends a session returns [`SessionStatus::Finished`], and the
//! manager clears the slot. Timers and the key interceptor belong to the
//! session value itself, so clearing the slot removes them as well.

pub mod contact;
pub mod nano;
pub mod pills;
pub mod snake;

use std::time::Duration;

use rand::rngs::StdRng;
use thiserror::Error;

use crate::config::Config;
use crate::input::KeyEvent;
use crate::model::contacts::ContactLog;
use crate::model::vfs::Vfs;
use crate::view::effects::Effect;
use crate::view::output::Output;

pub use contact::ContactSession;
pub use nano::NanoSession;
pub use pills::PillSession;
pub use snake::SnakeSession;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Finish the current interactive session first.")]
    AlreadyActive { active: &'static str },
}

/// Whether a session keeps the slot after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Continue,
    Finished,
}

/// What a session may touch while handling an event
pub struct SessionCx<'a> {
    pub output: &'a mut Output,
    pub vfs: &'a mut Vfs,
    pub contacts: &'a mut ContactLog,
    pub effects: &'a mut Vec<Effect>,
    pub config: &'a Config,
    pub rng: &'a mut StdRng,
    pub cwd: &'a str,
    /// Text typed at the prompt but not yet submitted
    pub pending: &'a str,
}

#[derive(Debug)]
pub enum Session {
    Contact(ContactSession),
    Nano(NanoSession),
    Snake(SnakeSession),
    Pills(PillSession),
}

impl Session {
    pub fn name(&self) -> &'static str {
        match self {
            Session::Contact(_) => "contact",
            Session::Nano(_) => "nano",
            Session::Snake(_) => "snake",
            Session::Pills(_) => "pills",
        }
    }

    fn submit(&mut self, line: &str, cx: &mut SessionCx) -> SessionStatus {
        match self {
            Session::Contact(s) => s.submit(line, cx),
            Session::Nano(s) => s.submit(line, cx),
            // Snake is driven by keys only; Enter is swallowed
            Session::Snake(_) => SessionStatus::Continue,
            Session::Pills(s) => s.submit(line, cx),
        }
    }

    /// Key interceptor. `None` lets the key through to the line editor.
    fn handle_key(&mut self, key: &KeyEvent, cx: &mut SessionCx) -> Option<SessionStatus> {
        match self {
            Session::Contact(_) => None,
            Session::Nano(s) => s.handle_key(key, cx),
            Session::Snake(s) => s.handle_key(key, cx),
            Session::Pills(s) => s.handle_key(key, cx),
        }
    }

    fn tick(&mut self, elapsed: Duration, cx: &mut SessionCx) -> SessionStatus {
        match self {
            Session::Contact(s) => s.tick(elapsed, cx),
            Session::Nano(_) => SessionStatus::Continue,
            Session::Snake(s) => s.tick(elapsed, cx),
            Session::Pills(s) => s.tick(elapsed, cx),
        }
    }
}

/// The single interactive-session slot
#[derive(Debug, Default)]
pub struct SessionManager {
    slot: Option<Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.slot.is_some()
    }

    pub fn active(&self) -> Option<&Session> {
        self.slot.as_ref()
    }

    /// Start a session built by `factory`
    ///
    /// Refuses with [`SessionError::AlreadyActive`] without calling the factory
    /// while another session holds the slot. The factory may decline to start
    /// (e.g. nano on a directory) by returning `None`.
    pub fn try_start<F>(&mut self, cx: &mut SessionCx, factory: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut SessionCx) -> Option<Session>,
    {
        if let Some(active) = &self.slot {
            tracing::debug!("Refusing to start a session while {} is active", active.name());
            return Err(SessionError::AlreadyActive {
                active: active.name(),
            });
        }
        if let Some(session) = factory(cx) {
            tracing::info!("Session started: {}", session.name());
            self.slot = Some(session);
        }
        Ok(())
    }

    /// Forward a submitted line to the active session
    ///
    /// Returns false when no session is active.
    pub fn dispatch(&mut self, line: &str, cx: &mut SessionCx) -> bool {
        let Some(session) = self.slot.as_mut() else {
            return false;
        };
        let status = session.submit(line, cx);
        self.settle(status);
        true
    }

    /// Offer a key to the active session's interceptor; true when consumed
    pub fn handle_key(&mut self, key: &KeyEvent, cx: &mut SessionCx) -> bool {
        let Some(session) = self.slot.as_mut() else {
            return false;
        };
        match session.handle_key(key, cx) {
            Some(status) => {
                self.settle(status);
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self, elapsed: Duration, cx: &mut SessionCx) {
        if let Some(session) = self.slot.as_mut() {
            let status = session.tick(elapsed, cx);
            self.settle(status);
        }
    }

    fn settle(&mut self, status: SessionStatus) {
        if status == SessionStatus::Finished {
            if let Some(session) = self.slot.take() {
                tracing::info!("Session ended: {}", session.name());
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixture::Fixture;
    use super::*;
    use crate::input::KeyCode;

    #[test]
    fn test_second_session_is_refused_and_first_untouched() {
        let mut fx = Fixture::new();
        let mut manager = SessionManager::new();

        manager
            .try_start(&mut fx.cx(), |cx| Some(Session::Contact(ContactSession::start(cx))))
            .unwrap();
        manager.dispatch("Ada", &mut fx.cx());

        let mut factory_called = false;
        let err = manager
            .try_start(&mut fx.cx(), |cx| {
                factory_called = true;
                Some(Session::Snake(SnakeSession::start(cx)))
            })
            .unwrap_err();

        assert_eq!(err, SessionError::AlreadyActive { active: "contact" });
        assert!(!factory_called);
        match manager.active() {
            Some(Session::Contact(contact)) => assert_eq!(contact.name(), Some("Ada")),
            other => panic!("expected contact session, got {other:?}"),
        }
    }

    #[test]
    fn test_finishing_clears_slot() {
        let mut fx = Fixture::new();
        let mut manager = SessionManager::new();
        manager
            .try_start(&mut fx.cx(), |cx| Some(Session::Snake(SnakeSession::start(cx))))
            .unwrap();
        assert!(manager.handle_key(&KeyCode::Esc.into(), &mut fx.cx()));
        assert!(!manager.is_active());
        // Nothing left to intercept keys
        assert!(!manager.handle_key(&KeyCode::Esc.into(), &mut fx.cx()));
    }

    #[test]
    fn test_declining_factory_leaves_slot_empty() {
        let mut fx = Fixture::new();
        let mut manager = SessionManager::new();
        manager.try_start(&mut fx.cx(), |_| None).unwrap();
        assert!(!manager.is_active());
        assert!(!manager.dispatch("hello", &mut fx.cx()));
    }
}
