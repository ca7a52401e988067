use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::character::CharacterRecord;
use crate::character::fields::{ListField, NumericField, Section, TextField};
use crate::character::parse_int_saturating;
use crate::skills::{MAX_SKILL_RANK, skill_index};

use super::escape::{escape_value, unescape};
use super::ini::{IniDocument, IniEntry, IniWriter, RejectReason};
use super::weapon_line::{encode_weapon_line, parse_weapon_line};
use super::{DecodeReport, DecodeWarning, DecodeWarningKind};

const ITEM_KEY_PREFIX: &str = "item";
const TRAINED_SUFFIX: &str = "trained";
const RANK_SUFFIX: &str = "rank";

// --- Encoding ---

pub fn encode_record(record: &CharacterRecord) -> String {
    let mut w = IniWriter::new();

    for section in Section::ALL {
        w.section(section.header());
        match section {
            Section::Identity => {
                for field in TextField::ALL {
                    w.entry(field.key(), &escape_value(record.text(field)));
                }
            }
            Section::Skills => {
                for skill in record.skills().iter() {
                    w.entry(
                        &format!("{}.{TRAINED_SUFFIX}", skill.name),
                        bool_text(skill.state.trained),
                    );
                    w.entry(
                        &format!("{}.{RANK_SUFFIX}", skill.name),
                        &skill.state.rank().to_string(),
                    );
                }
            }
            Section::Weapons => {
                for (i, weapon) in record.weapons().iter().enumerate() {
                    w.entry(&item_key(i), &encode_weapon_line(weapon));
                }
            }
            other => {
                for field in NumericField::in_section(other) {
                    w.entry(field.key(), &record.attribute(field).to_string());
                }
                if let Some(list) = ListField::from_section(other) {
                    for (i, item) in record.list(list).iter().enumerate() {
                        w.entry(&item_key(i), &escape_value(item));
                    }
                }
            }
        }
    }

    w.finish()
}

fn item_key(index: usize) -> String {
    format!("{ITEM_KEY_PREFIX}{}", index + 1)
}

fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

// --- Decoding ---

#[derive(Default)]
struct Decoder {
    record: CharacterRecord,
    warnings: Vec<DecodeWarning>,
    lists: BTreeMap<usize, BTreeMap<u64, String>>,
    weapons: BTreeMap<u64, (usize, String)>,
}

pub fn decode_record(text: &str) -> DecodeReport {
    let doc = IniDocument::parse(text);
    let mut d = Decoder::default();

    for rejected in &doc.rejected {
        let reason = match rejected.reason {
            RejectReason::NoSeparator => "no '=' separator",
            RejectReason::EmptyKey => "empty key",
            RejectReason::OutsideSection => "entry before any [section]",
        };
        d.warn(
            rejected.line,
            DecodeWarningKind::MalformedLine,
            format!("{reason}: {:?}", rejected.text),
        );
    }

    for ini_section in &doc.sections {
        let Some(section) = Section::from_header(&ini_section.name) else {
            d.warn(
                ini_section.line,
                DecodeWarningKind::UnknownSection,
                format!("unknown section [{}]", ini_section.name),
            );
            continue;
        };
        for entry in &ini_section.entries {
            d.entry(section, entry);
        }
    }

    d.finish()
}

impl Decoder {
    fn warn(&mut self, line: usize, kind: DecodeWarningKind, message: impl Into<String>) {
        self.warnings.push(DecodeWarning::new(line, kind, message));
    }

    fn unknown_key(&mut self, section: Section, entry: &IniEntry) {
        self.warn(
            entry.line,
            DecodeWarningKind::UnknownKey,
            format!("unknown key {:?} in [{section}]", entry.key),
        );
    }

    fn entry(&mut self, section: Section, entry: &IniEntry) {
        match section {
            Section::Identity => match TextField::from_key(&entry.key) {
                Some(field) => self.record.set_text(field, unescape(&entry.value)),
                None => self.unknown_key(section, entry),
            },
            Section::Skills => self.skill(entry),
            Section::Weapons => match item_number(&entry.key) {
                Some(n) => {
                    self.weapons.insert(n, (entry.line, entry.value.clone()));
                }
                None => self.unknown_key(section, entry),
            },
            other => {
                if let Some(list) = ListField::from_section(other) {
                    match item_number(&entry.key) {
                        Some(n) => {
                            self.lists
                                .entry(list as usize)
                                .or_default()
                                .insert(n, unescape(&entry.value));
                        }
                        None => self.unknown_key(section, entry),
                    }
                    return;
                }
                match NumericField::from_key(&entry.key).filter(|f| f.section() == other) {
                    Some(field) => {
                        let value = self.number(entry, field.range());
                        self.record.set_attribute(field, value);
                    }
                    None => self.unknown_key(section, entry),
                }
            }
        }
    }

    /// Accepts `Name.trained` / `Name.rank` and the older `Name_Trained` /
    /// `Name_Rank` spelling.
    fn skill(&mut self, entry: &IniEntry) {
        let split = entry
            .key
            .rsplit_once('.')
            .or_else(|| entry.key.rsplit_once('_'));
        let Some((name, attr)) = split else {
            self.unknown_key(Section::Skills, entry);
            return;
        };
        let Some(index) = skill_index(name) else {
            self.unknown_key(Section::Skills, entry);
            return;
        };

        if attr.eq_ignore_ascii_case(TRAINED_SUFFIX) {
            let trained = self.boolean(entry);
            if let Some(state) = self.record.skills_mut().by_index_mut(index) {
                state.trained = trained;
            }
        } else if attr.eq_ignore_ascii_case(RANK_SUFFIX) {
            let rank = self.number(entry, 0..=MAX_SKILL_RANK);
            if let Some(state) = self.record.skills_mut().by_index_mut(index) {
                state.set_rank(rank);
            }
        } else {
            self.unknown_key(Section::Skills, entry);
        }
    }

    /// Non-numbers become 0; out-of-range values are reported and left for
    /// the setter to clamp.
    fn number(&mut self, entry: &IniEntry, range: RangeInclusive<i32>) -> i64 {
        let text = unescape(&entry.value);
        match parse_int_saturating(&text) {
            Some(value) => {
                let (min, max) = (*range.start(), *range.end());
                if value < min as i64 || value > max as i64 {
                    self.warn(
                        entry.line,
                        DecodeWarningKind::OutOfRange,
                        format!("{} = {value} outside {min}..={max}, clamped", entry.key),
                    );
                }
                value
            }
            None => {
                self.warn(
                    entry.line,
                    DecodeWarningKind::InvalidNumber,
                    format!("{} = {text:?} is not a number, using 0", entry.key),
                );
                0
            }
        }
    }

    fn boolean(&mut self, entry: &IniEntry) -> bool {
        let text = unescape(&entry.value);
        match parse_bool(&text) {
            Some(value) => value,
            None => {
                self.warn(
                    entry.line,
                    DecodeWarningKind::InvalidBool,
                    format!("{} = {text:?} is not a boolean, using false", entry.key),
                );
                false
            }
        }
    }

    fn finish(mut self) -> DecodeReport {
        for list in ListField::ALL {
            let Some(items) = self.lists.remove(&(list as usize)) else {
                continue;
            };
            for item in items.into_values() {
                self.record.add_list_entry(list, item);
            }
        }

        let weapons = std::mem::take(&mut self.weapons);
        for (line, raw) in weapons.into_values() {
            let parsed = match parse_weapon_line(&raw) {
                Ok(parsed) => parsed,
                Err(reason) => {
                    self.warn(
                        line,
                        DecodeWarningKind::MalformedWeapon,
                        format!("weapon dropped: {reason}"),
                    );
                    continue;
                }
            };
            // Sub-field issues only matter for weapons that are kept.
            match self.record.add_weapon(parsed.weapon) {
                Ok(()) => {
                    for issue in parsed.issues {
                        self.warn(line, DecodeWarningKind::InvalidWeaponField, issue);
                    }
                }
                Err(err) => self.warn(
                    line,
                    DecodeWarningKind::MalformedWeapon,
                    format!("weapon dropped: {}", err.message),
                ),
            }
        }

        DecodeReport {
            record: self.record,
            warnings: self.warnings,
        }
    }
}

fn item_number(key: &str) -> Option<u64> {
    let prefix = key.get(..ITEM_KEY_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(ITEM_KEY_PREFIX) {
        return None;
    }
    let digits = &key[ITEM_KEY_PREFIX.len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.is_empty() {
        return Some(false);
    }
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}
