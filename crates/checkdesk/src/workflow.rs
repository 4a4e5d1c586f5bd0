//! Lookup/log workflow.
//!
//! [`Desk`] is the application state for one check-in station: it owns the
//! roster, the check-in log, and the current display state, and it is the
//! only place a log append can happen. One successful resolve produces
//! exactly one appended event.
//!
//! The state machine has two resting states. `Idle` accepts an identifier,
//! resolves it synchronously and either enters `Displaying` (found, logged)
//! or stays `Idle` (not found, nothing logged). While `Displaying`, repeated
//! submissions inside the cooldown window are ignored so an accidental
//! double-press cannot produce duplicate rows; the first submission at or
//! after cooldown expiry only clears the display and is consumed, it does
//! not start a new resolve.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::checkin::{CheckinEvent, DisplayCard};
use crate::error::Result;
use crate::photo;
use crate::roster::Roster;
use crate::storage::CheckinLog;

/// Current display state of the desk.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DeskState {
    /// No check-in on screen; submissions are resolved.
    Idle,
    /// A check-in is on screen; submissions are gated by the cooldown.
    Displaying {
        card: DisplayCard,
        shown_at: NaiveDateTime,
    },
}

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The identifier resolved; one event was logged and the card is shown.
    CheckedIn(DisplayCard),
    /// No participant with this identifier; nothing was logged.
    NotFound {
        /// The trimmed identifier that failed to resolve.
        dni: String,
    },
    /// A check-in is still on screen and the cooldown has not elapsed;
    /// the submission was ignored and the display is unchanged.
    CoolingDown,
    /// The cooldown had elapsed: the display was cleared and the submission
    /// was consumed as a reset without being resolved.
    Cleared,
    /// The input was empty after trimming; nothing happened.
    Empty,
}

/// Application state for a single check-in station.
#[derive(Debug)]
pub struct Desk {
    roster: Roster,
    log: CheckinLog,
    cooldown: chrono::Duration,
    state: DeskState,
}

impl Desk {
    /// Create a desk over a loaded roster and an open log.
    #[must_use]
    pub fn new(roster: Roster, log: CheckinLog, cooldown: Duration) -> Self {
        let cooldown = chrono::Duration::from_std(cooldown).unwrap_or(chrono::Duration::MAX);
        Self {
            roster,
            log,
            cooldown,
            state: DeskState::Idle,
        }
    }

    /// Submit one line of operator input, stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns an error only when appending to the log fails; the desk state
    /// is unchanged in that case and the operation can be retried.
    pub fn submit(&mut self, input: &str) -> Result<Submission> {
        self.submit_at(input, Local::now().naive_local())
    }

    /// Submit one line of operator input at an explicit instant.
    ///
    /// This is the clock-injected form of [`Desk::submit`]; the cooldown gate
    /// is evaluated against `now`.
    ///
    /// # Errors
    ///
    /// Returns an error only when appending to the log fails.
    pub fn submit_at(&mut self, input: &str, now: NaiveDateTime) -> Result<Submission> {
        if let DeskState::Displaying { shown_at, .. } = &self.state {
            if now.signed_duration_since(*shown_at) >= self.cooldown {
                self.state = DeskState::Idle;
                return Ok(Submission::Cleared);
            }
            return Ok(Submission::CoolingDown);
        }

        let dni = input.trim();
        if dni.is_empty() {
            return Ok(Submission::Empty);
        }

        let Some(participant) = self.roster.resolve(dni) else {
            return Ok(Submission::NotFound {
                dni: dni.to_string(),
            });
        };

        let event = CheckinEvent::at(&participant.dni, &participant.nombre, now);
        // The state transition happens only after the append succeeded, so a
        // storage failure leaves the desk Idle with nothing logged.
        self.log.append(&event)?;
        info!(dni = %event.dni, nombre = %event.nombre, "check-in recorded");

        let card = DisplayCard::new(
            participant,
            photo::inspect(&participant.foto_path),
            event.timestamp,
        );
        self.state = DeskState::Displaying {
            card: card.clone(),
            shown_at: event.timestamp,
        };
        Ok(Submission::CheckedIn(card))
    }

    /// The card currently on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<&DisplayCard> {
        match &self.state {
            DeskState::Displaying { card, .. } => Some(card),
            DeskState::Idle => None,
        }
    }

    /// Check whether a check-in is currently displayed.
    #[must_use]
    pub fn is_displaying(&self) -> bool {
        matches!(self.state, DeskState::Displaying { .. })
    }

    /// The roster this desk resolves against.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The log this desk appends to.
    #[must_use]
    pub fn log(&self) -> &CheckinLog {
        &self.log
    }
}
