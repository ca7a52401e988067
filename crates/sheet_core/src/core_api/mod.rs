mod codec;
mod error;

pub use crate::character::fields::{ListField, NumericField, Section, TextField};
pub use crate::character::{CharacterRecord, Identity};
pub use crate::format::weapon_line::{
    decode_weapon_line, decode_weapon_line_with_issues, encode_weapon_line,
};
pub use crate::format::{DecodeReport, DecodeWarning, DecodeWarningKind};
pub use crate::skills::{SKILL_COUNT, SKILL_NAMES, SkillEntry, SkillSheet, SkillState};
pub use crate::weapon::{Weapon, WeaponClass, WeaponType};
pub use codec::SheetCodec;
pub use error::{CoreError, CoreErrorCode};
