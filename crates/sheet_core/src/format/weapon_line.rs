use crate::character::parse_int_saturating;
use crate::weapon::{MAX_ARMOUR_PENETRATION, Weapon, WeaponClass, WeaponType};

use super::escape::{FIELD_DELIMITER, escape_field, split_fields, unescape};

pub const WEAPON_FIELD_COUNT: usize = 10;

// Field order on the line.
const NAME: usize = 0;
const TYPE: usize = 1;
const CLASS: usize = 2;
const RANGE: usize = 3;
const RATE_OF_FIRE: usize = 4;
const DAMAGE: usize = 5;
const PENETRATION: usize = 6;
const CLIP: usize = 7;
const RELOAD: usize = 8;
const SPECIAL: usize = 9;

/// A weapon line that split cleanly, plus notes about sub-fields that had
/// to be defaulted or clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedWeapon {
    pub weapon: Weapon,
    pub issues: Vec<String>,
}

/// Joins the escaped sub-fields with `|`.
pub fn encode_weapon_line(weapon: &Weapon) -> String {
    let penetration = weapon.armour_penetration().to_string();
    let fields: [&str; WEAPON_FIELD_COUNT] = [
        &weapon.name,
        weapon.weapon_type.as_str(),
        weapon.class.as_str(),
        &weapon.range,
        &weapon.rate_of_fire,
        &weapon.damage,
        &penetration,
        &weapon.clip_size,
        &weapon.reload,
        &weapon.special_qualities,
    ];
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(FIELD_DELIMITER);
        }
        line.push_str(&escape_field(field));
    }
    line
}

/// Parses one weapon line. `None` when the line does not hold exactly ten
/// fields or the name is blank.
pub fn decode_weapon_line(line: &str) -> Option<Weapon> {
    decode_weapon_line_with_issues(line).map(|(weapon, _)| weapon)
}

/// Like [`decode_weapon_line`], also returning a note for each sub-field
/// that was defaulted or clamped.
pub fn decode_weapon_line_with_issues(line: &str) -> Option<(Weapon, Vec<String>)> {
    parse_weapon_line(line)
        .ok()
        .filter(|parsed| parsed.weapon.has_name())
        .map(|parsed| (parsed.weapon, parsed.issues))
}

pub(crate) fn parse_weapon_line(line: &str) -> Result<ParsedWeapon, String> {
    let raw = split_fields(line);
    if raw.len() != WEAPON_FIELD_COUNT {
        return Err(format!(
            "expected {WEAPON_FIELD_COUNT} fields, found {}",
            raw.len()
        ));
    }
    let mut fields: Vec<String> = raw.into_iter().map(unescape).collect();
    let mut issues = Vec::new();

    let weapon_type = WeaponType::parse(&fields[TYPE]).unwrap_or_else(|| {
        issues.push(format!("unknown weapon type {:?}", fields[TYPE]));
        WeaponType::default()
    });
    let class = WeaponClass::parse(&fields[CLASS]).unwrap_or_else(|| {
        issues.push(format!("unknown weapon class {:?}", fields[CLASS]));
        WeaponClass::default()
    });
    let penetration = match parse_int_saturating(&fields[PENETRATION]) {
        Some(value) => {
            if !(0..=MAX_ARMOUR_PENETRATION as i64).contains(&value) {
                issues.push(format!("armour penetration {value} clamped"));
            }
            value
        }
        None => {
            issues.push(format!(
                "armour penetration {:?} is not a number",
                fields[PENETRATION]
            ));
            0
        }
    };

    let mut weapon = Weapon::new(std::mem::take(&mut fields[NAME]), weapon_type, class);
    weapon.range = std::mem::take(&mut fields[RANGE]);
    weapon.rate_of_fire = std::mem::take(&mut fields[RATE_OF_FIRE]);
    weapon.damage = std::mem::take(&mut fields[DAMAGE]);
    weapon.clip_size = std::mem::take(&mut fields[CLIP]);
    weapon.reload = std::mem::take(&mut fields[RELOAD]);
    weapon.special_qualities = std::mem::take(&mut fields[SPECIAL]);
    weapon.set_armour_penetration(penetration);

    Ok(ParsedWeapon { weapon, issues })
}
