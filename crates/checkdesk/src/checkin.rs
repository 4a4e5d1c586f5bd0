//! Check-in event and display payload types.
//!
//! This module defines the record appended to the check-in log for every
//! successful lookup, and the card the presentation shell renders.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::photo::PhotoStatus;
use crate::roster::Participant;

/// Canonical timestamp format for check-in events: `YYYY-MM-DD HH:MM:SS`.
///
/// Second precision, local wall-clock time. This is the format stored in the
/// database and written to the tabular export.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single check-in event.
///
/// Created exactly once per successful lookup and appended to the log.
/// Events are never mutated or deleted; repeated check-ins by the same
/// identifier are separate events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinEvent {
    /// Unique identifier for this event (assigned by the storage layer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The participant's identifier.
    pub dni: String,

    /// The participant's given name at the time of logging.
    pub nombre: String,

    /// When the check-in happened, truncated to whole seconds.
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
}

impl CheckinEvent {
    /// Create a new event stamped with the current local time.
    #[must_use]
    pub fn new(dni: impl Into<String>, nombre: impl Into<String>) -> Self {
        Self::at(dni, nombre, Local::now().naive_local())
    }

    /// Create an event at an explicit instant.
    ///
    /// The timestamp is truncated to whole seconds so the in-memory value
    /// round-trips through the stored text form unchanged.
    #[must_use]
    pub fn at(dni: impl Into<String>, nombre: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            id: None,
            dni: dni.into(),
            nombre: nombre.into(),
            timestamp: truncate_to_second(timestamp),
        }
    }

    /// The timestamp rendered in the canonical format.
    #[must_use]
    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// The payload the shell renders after a successful check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCard {
    /// The participant's identifier.
    pub dni: String,
    /// Family name.
    pub apellido: String,
    /// Given name.
    pub nombre: String,
    /// Email address.
    pub correo: String,
    /// Whether the participant's photo can be shown.
    pub photo: PhotoStatus,
    /// When this check-in was recorded.
    #[serde(with = "timestamp")]
    pub checked_in_at: NaiveDateTime,
}

impl DisplayCard {
    /// Build the card for a resolved participant.
    #[must_use]
    pub fn new(participant: &Participant, photo: PhotoStatus, checked_in_at: NaiveDateTime) -> Self {
        Self {
            dni: participant.dni.clone(),
            apellido: participant.apellido.clone(),
            nombre: participant.nombre.clone(),
            correo: participant.correo.clone(),
            photo,
            checked_in_at: truncate_to_second(checked_in_at),
        }
    }
}

impl std::fmt::Display for DisplayCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Apellido: {}", self.apellido)?;
        writeln!(f, "Nombre:   {}", self.nombre)?;
        writeln!(f, "Correo:   {}", self.correo)?;
        writeln!(f, "Foto:     {}", self.photo)?;
        write!(
            f,
            "Check-in: {}",
            self.checked_in_at.format(TIMESTAMP_FORMAT)
        )
    }
}

fn truncate_to_second(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// Serde adapter for the canonical timestamp format.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    /// Parse a timestamp from the canonical format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match `YYYY-MM-DD HH:MM:SS`.
    pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
    }

    /// Serialize a timestamp into the canonical format.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Deserialize a timestamp from the canonical format.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a string in the canonical format.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn participant() -> Participant {
        Participant {
            dni: "123".to_string(),
            apellido: "Pérez".to_string(),
            nombre: "Juan".to_string(),
            correo: "juan@x.com".to_string(),
            foto_path: "fotos/juan.png".to_string(),
        }
    }

    #[test]
    fn test_event_at() {
        let event = CheckinEvent::at("123", "Juan", instant());
        assert!(event.id.is_none());
        assert_eq!(event.dni, "123");
        assert_eq!(event.nombre, "Juan");
        assert_eq!(event.timestamp_str(), "2024-03-01 10:00:00");
    }

    #[test]
    fn test_event_new_stamps_now() {
        let before = Local::now().naive_local();
        let event = CheckinEvent::new("123", "Juan");
        let after = Local::now().naive_local();

        assert!(event.timestamp >= truncate_to_second(before) - chrono::Duration::seconds(1));
        assert!(event.timestamp <= after);
    }

    #[test]
    fn test_timestamp_truncated_to_seconds() {
        let with_nanos = instant().with_nanosecond(123_456_789).unwrap();
        let event = CheckinEvent::at("123", "Juan", with_nanos);
        assert_eq!(event.timestamp.nanosecond(), 0);
        assert_eq!(event.timestamp_str(), "2024-03-01 10:00:00");
    }

    #[test]
    fn test_timestamp_parse_round_trip() {
        let event = CheckinEvent::at("123", "Juan", instant());
        let parsed = timestamp::parse(&event.timestamp_str()).unwrap();
        assert_eq!(parsed, event.timestamp);
    }

    #[test]
    fn test_timestamp_parse_rejects_garbage() {
        assert!(timestamp::parse("not a timestamp").is_err());
        assert!(timestamp::parse("2024-03-01T10:00:00").is_err());
    }

    #[test]
    fn test_event_serialization() {
        let event = CheckinEvent::at("123", "Juan", instant());
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"2024-03-01 10:00:00\""));

        let back: CheckinEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_display_card_fields() {
        let card = DisplayCard::new(&participant(), PhotoStatus::Unavailable, instant());
        assert_eq!(card.dni, "123");
        assert_eq!(card.apellido, "Pérez");
        assert_eq!(card.nombre, "Juan");
        assert_eq!(card.correo, "juan@x.com");
        assert_eq!(card.photo, PhotoStatus::Unavailable);
    }

    #[test]
    fn test_display_card_rendering() {
        let card = DisplayCard::new(
            &participant(),
            PhotoStatus::Ready(PathBuf::from("fotos/juan.png")),
            instant(),
        );
        let text = card.to_string();
        assert!(text.contains("Apellido: Pérez"));
        assert!(text.contains("Nombre:   Juan"));
        assert!(text.contains("Correo:   juan@x.com"));
        assert!(text.contains("fotos/juan.png"));
        assert!(text.contains("Check-in: 2024-03-01 10:00:00"));
    }

    #[test]
    fn test_display_card_missing_photo_rendering() {
        let card = DisplayCard::new(&participant(), PhotoStatus::Unavailable, instant());
        assert!(card.to_string().contains("no disponible"));
    }
}
