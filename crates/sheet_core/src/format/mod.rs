pub mod escape;
pub mod ini;
mod sections;
pub mod weapon_line;

use std::fmt;

use serde::Serialize;

use crate::character::CharacterRecord;

pub use sections::{decode_record, encode_record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecodeWarningKind {
    MalformedLine,
    UnknownSection,
    UnknownKey,
    InvalidNumber,
    OutOfRange,
    InvalidBool,
    MalformedWeapon,
    InvalidWeaponField,
}

/// Something in the input that was skipped or defaulted. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeWarning {
    pub line: usize,
    pub kind: DecodeWarningKind,
    pub message: String,
}

impl DecodeWarning {
    pub fn new(line: usize, kind: DecodeWarningKind, message: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {:?}: {}", self.line, self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    pub record: CharacterRecord,
    pub warnings: Vec<DecodeWarning>,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_record(self) -> CharacterRecord {
        self.record
    }
}
