//! `checkdesk` - single-desk offline check-in kiosk
//!
//! This library provides the core of a check-in station: a read-only
//! participant roster loaded from CSV, an append-only durable log of
//! check-in events, and the lookup workflow that ties a submitted
//! identifier to exactly one logged event behind a cooldown gate.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod checkin;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod photo;
pub mod roster;
pub mod storage;
pub mod workflow;

pub use checkin::{CheckinEvent, DisplayCard, TIMESTAMP_FORMAT};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use photo::PhotoStatus;
pub use roster::{Participant, Roster};
pub use storage::{CheckinLog, LogStats};
pub use workflow::{Desk, Submission};
