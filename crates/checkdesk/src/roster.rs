//! Participant roster.
//!
//! The roster is loaded once at startup from a CSV file and is read-only
//! afterwards. An absent roster file is not an error: the kiosk still starts
//! and simply rejects every lookup.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// A single participant record.
///
/// All fields are text as read from the roster file; the identifier in
/// particular is never coerced to a number so leading zeros survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier (national ID number).
    pub dni: String,
    /// Family name.
    pub apellido: String,
    /// Given name.
    pub nombre: String,
    /// Email address.
    pub correo: String,
    /// Path of the participant's photo.
    pub foto_path: String,
}

/// In-memory directory of participants keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: HashMap<String, Participant>,
}

impl Roster {
    /// Load the roster from a CSV file with header columns
    /// `dni,apellido,nombre,correo,foto_path`.
    ///
    /// An absent file yields an empty roster. Duplicate identifiers keep the
    /// last row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no roster file at {}, starting empty", path.display());
            return Ok(Self::default());
        }

        let reader =
            csv::Reader::from_path(path).map_err(|source| Error::roster(path, source))?;
        let roster = Self::from_csv(reader, path)?;
        info!(
            participants = roster.len(),
            "roster loaded from {}",
            path.display()
        );
        Ok(roster)
    }

    /// Build a roster from any reader carrying the same CSV layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be parsed.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        Self::from_csv(
            csv::Reader::from_reader(reader),
            Path::new("<memory>"),
        )
    }

    fn from_csv<R: io::Read>(reader: csv::Reader<R>, path: &Path) -> Result<Self> {
        let mut participants = HashMap::new();
        for row in reader.into_deserialize::<Participant>() {
            let record = row.map_err(|source| Error::roster(path, source))?;
            if let Some(previous) = participants.insert(record.dni.clone(), record) {
                warn!(
                    dni = %previous.dni,
                    "duplicate identifier in roster, keeping the last row"
                );
            }
        }
        Ok(Self { participants })
    }

    /// Look up a participant by exact identifier.
    ///
    /// No fuzzy matching and no case normalization; callers trim surrounding
    /// whitespace before resolving.
    #[must_use]
    pub fn resolve(&self, dni: &str) -> Option<&Participant> {
        self.participants.get(dni)
    }

    /// Number of participants in the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Check whether the roster holds no participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
