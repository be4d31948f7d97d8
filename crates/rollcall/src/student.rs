//! Core student record type for rollcall.
//!
//! This module defines the record shape shared by the registry, the entry
//! form, and the persisted student list.

use serde::{Deserialize, Serialize};

use crate::capitalize::capitalize;

/// A single student record.
///
/// Records are identified purely by their position in the registry sequence;
/// no field carries a uniqueness constraint. Serialized field names are
/// camelCase to match the persisted JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Given name.
    pub first_name: String,

    /// Middle initial(s), one to three letters.
    pub middle_initial: String,

    /// Family name.
    pub last_name: String,

    /// Date of birth as a `YYYY-MM-DD` string.
    pub birth_day: String,

    /// Age in years.
    pub age: u32,

    /// Home address.
    pub address: String,

    /// Enrolled course identifiers, in selection order. Never empty for a
    /// record that passed form validation.
    pub courses: Vec<String>,
}

impl StudentRecord {
    /// Full display name with first and last name title-cased.
    ///
    /// Empty name parts are skipped, so stored records that never went
    /// through form validation still render without stray spaces.
    #[must_use]
    pub fn display_name(&self) -> String {
        [
            capitalize(&self.first_name),
            self.middle_initial.to_uppercase(),
            capitalize(&self.last_name),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Check if every field still holds its empty default.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}
