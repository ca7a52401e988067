use std::fmt::Write as _;

use serde_json::{Map as JsonMap, Value as JsonValue};
use sheet_core::core_api::{
    CharacterRecord, ListField, NumericField, SkillEntry, TextField, Weapon, encode_weapon_line,
};
use sheet_core::format::escape::escape_value;

const SHEET_WIDTH: usize = 76;
const IDENTITY_LABEL_WIDTH: usize = 12;
const IDENTITY_VALUE_WIDTH: usize = 24;
const CHARACTERISTIC_COLUMNS: usize = 3;
const CHARACTERISTIC_COL_WIDTH: usize = 25;
const SKILL_COL_WIDTH: usize = 38;
const SKILL_NAME_WIDTH: usize = 18;

const WOUND_FIELDS: [NumericField; 3] = [
    NumericField::CurrentWounds,
    NumericField::MaxWounds,
    NumericField::Fatigue,
];
const MOVEMENT_FIELDS: [NumericField; 4] = [
    NumericField::HalfMove,
    NumericField::FullMove,
    NumericField::ChargeMove,
    NumericField::RunMove,
];
const ARMOUR_FIELDS: [NumericField; 4] = [
    NumericField::HeadAp,
    NumericField::ArmsAp,
    NumericField::BodyAp,
    NumericField::LegsAp,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

/// Groups of the sheet picked for field output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub name: bool,
    pub identity: bool,
    pub attributes: bool,
    pub skills: bool,
    pub wounds: bool,
    pub experience: bool,
    pub talents: bool,
    pub gear: bool,
    pub weapons: bool,
    pub armour: bool,
    pub psyker: bool,
    pub status: bool,
}

impl FieldSelection {
    pub fn is_any_selected(&self) -> bool {
        self.name
            || self.identity
            || self.attributes
            || self.skills
            || self.wounds
            || self.experience
            || self.talents
            || self.gear
            || self.weapons
            || self.armour
            || self.psyker
            || self.status
    }
}

pub fn render_json_full(record: &CharacterRecord, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(default_json(record)),
    }
}

pub fn render_json_selected(
    record: &CharacterRecord,
    fields: &FieldSelection,
    style: JsonStyle,
) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(selected_json(fields, record)),
    }
}

/// One `(key, value)` pair per line of field output, in canonical order.
/// Text values are escaped so every pair fits on one line.
pub fn render_selected_pairs(
    record: &CharacterRecord,
    fields: &FieldSelection,
) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();

    if fields.name {
        out.push(("name", escape_value(record.name())));
    }
    if fields.identity {
        for field in TextField::ALL {
            out.push((
                "identity",
                format!("{}={}", field.key(), escape_value(record.text(field))),
            ));
        }
    }
    if fields.attributes {
        for field in NumericField::CHARACTERISTICS {
            out.push((
                "attribute",
                format!("{}={}", field.key(), record.attribute(field)),
            ));
        }
    }
    if fields.skills {
        for skill in record.skills().iter() {
            let tag = if skill.state.trained { " [Trained]" } else { "" };
            out.push((
                "skill",
                format!("{}={}{}", skill.name, skill.state.rank(), tag),
            ));
        }
    }
    if fields.wounds {
        for field in WOUND_FIELDS.into_iter().chain(MOVEMENT_FIELDS) {
            out.push(("wounds", format!("{}={}", field.key(), record.attribute(field))));
        }
    }
    if fields.experience {
        out.push(("total_xp", record.total_xp().to_string()));
        out.push(("spent_xp", record.spent_xp().to_string()));
        out.push(("remaining_xp", record.remaining_xp().to_string()));
    }
    if fields.talents {
        push_list(&mut out, "talent", record.list(ListField::Talents));
    }
    if fields.gear {
        push_list(&mut out, "gear", record.list(ListField::Gear));
    }
    if fields.weapons {
        for weapon in record.weapons() {
            out.push(("weapon", encode_weapon_line(weapon)));
        }
    }
    if fields.armour {
        for field in ARMOUR_FIELDS {
            out.push(("armour", format!("{}={}", field.key(), record.attribute(field))));
        }
    }
    if fields.psyker {
        out.push((
            "psy_rating",
            record.attribute(NumericField::PsyRating).to_string(),
        ));
        push_list(&mut out, "power", record.list(ListField::Powers));
    }
    if fields.status {
        out.push((
            "corruption",
            record.attribute(NumericField::Corruption).to_string(),
        ));
        out.push((
            "insanity",
            record.attribute(NumericField::Insanity).to_string(),
        ));
        push_list(&mut out, "mutation", record.list(ListField::Mutations));
        push_list(&mut out, "disorder", record.list(ListField::Disorders));
    }

    out
}

fn push_list(out: &mut Vec<(&'static str, String)>, key: &'static str, items: &[String]) {
    for item in items {
        out.push((key, escape_value(item)));
    }
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

fn selected_json(fields: &FieldSelection, record: &CharacterRecord) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();

    if fields.name {
        out.insert(
            "name".to_string(),
            JsonValue::String(record.name().to_string()),
        );
    }
    if fields.identity {
        out.insert("identity".to_string(), identity_to_json(record));
    }
    if fields.attributes {
        out.insert("attributes".to_string(), attributes_to_json(record));
    }
    if fields.skills {
        out.insert("skills".to_string(), skills_to_json(record));
    }
    if fields.wounds {
        out.insert("wounds".to_string(), wounds_to_json(record));
        out.insert("movement".to_string(), movement_to_json(record));
    }
    if fields.experience {
        out.insert("experience".to_string(), experience_to_json(record));
    }
    if fields.talents {
        out.insert(
            "talents".to_string(),
            list_to_json(record.list(ListField::Talents)),
        );
    }
    if fields.gear {
        out.insert(
            "gear".to_string(),
            list_to_json(record.list(ListField::Gear)),
        );
    }
    if fields.weapons {
        out.insert("weapons".to_string(), weapons_to_json(record.weapons()));
    }
    if fields.armour {
        out.insert("armour".to_string(), armour_to_json(record));
    }
    if fields.psyker {
        out.insert("psyker".to_string(), psyker_to_json(record));
    }
    if fields.status {
        out.insert("status".to_string(), status_to_json(record));
    }

    out
}

fn default_json(record: &CharacterRecord) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();

    out.insert(
        "name".to_string(),
        JsonValue::String(record.name().to_string()),
    );
    out.insert("identity".to_string(), identity_to_json(record));
    out.insert("attributes".to_string(), attributes_to_json(record));
    out.insert("skills".to_string(), skills_to_json(record));
    out.insert("wounds".to_string(), wounds_to_json(record));
    out.insert("movement".to_string(), movement_to_json(record));
    out.insert("experience".to_string(), experience_to_json(record));
    out.insert(
        "talents".to_string(),
        list_to_json(record.list(ListField::Talents)),
    );
    out.insert(
        "gear".to_string(),
        list_to_json(record.list(ListField::Gear)),
    );
    out.insert("weapons".to_string(), weapons_to_json(record.weapons()));
    out.insert("armour".to_string(), armour_to_json(record));
    out.insert("psyker".to_string(), psyker_to_json(record));
    out.insert("status".to_string(), status_to_json(record));

    out
}

fn identity_to_json(record: &CharacterRecord) -> JsonValue {
    let mut m = JsonMap::new();
    for field in TextField::ALL {
        m.insert(
            field.key().to_string(),
            JsonValue::String(record.text(field).to_string()),
        );
    }
    JsonValue::Object(m)
}

fn attributes_to_json(record: &CharacterRecord) -> JsonValue {
    JsonValue::Array(
        NumericField::CHARACTERISTICS
            .iter()
            .map(|field| {
                let mut m = JsonMap::new();
                m.insert("key".to_string(), JsonValue::from(field.key()));
                m.insert("name".to_string(), JsonValue::from(field.label()));
                m.insert("value".to_string(), JsonValue::from(record.attribute(*field)));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn skills_to_json(record: &CharacterRecord) -> JsonValue {
    JsonValue::Array(record.skills().iter().map(skill_entry_to_json).collect())
}

fn skill_entry_to_json(s: SkillEntry<'_>) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("index".to_string(), JsonValue::from(s.index));
    m.insert("name".to_string(), JsonValue::from(s.name));
    m.insert("trained".to_string(), JsonValue::Bool(s.state.trained));
    m.insert("rank".to_string(), JsonValue::from(s.state.rank()));
    JsonValue::Object(m)
}

fn wounds_to_json(record: &CharacterRecord) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "current".to_string(),
        JsonValue::from(record.attribute(NumericField::CurrentWounds)),
    );
    m.insert(
        "max".to_string(),
        JsonValue::from(record.attribute(NumericField::MaxWounds)),
    );
    m.insert(
        "fatigue".to_string(),
        JsonValue::from(record.attribute(NumericField::Fatigue)),
    );
    JsonValue::Object(m)
}

fn movement_to_json(record: &CharacterRecord) -> JsonValue {
    let mut m = JsonMap::new();
    for (key, field) in ["half", "full", "charge", "run"].into_iter().zip(MOVEMENT_FIELDS) {
        m.insert(key.to_string(), JsonValue::from(record.attribute(field)));
    }
    JsonValue::Object(m)
}

fn experience_to_json(record: &CharacterRecord) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("total".to_string(), JsonValue::from(record.total_xp()));
    m.insert("spent".to_string(), JsonValue::from(record.spent_xp()));
    m.insert(
        "remaining".to_string(),
        JsonValue::from(record.remaining_xp()),
    );
    JsonValue::Object(m)
}

fn list_to_json(items: &[String]) -> JsonValue {
    JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
}

fn weapons_to_json(weapons: &[Weapon]) -> JsonValue {
    JsonValue::Array(weapons.iter().map(weapon_to_json).collect())
}

fn weapon_to_json(w: &Weapon) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("name".to_string(), JsonValue::String(w.name.clone()));
    m.insert("type".to_string(), JsonValue::from(w.weapon_type.as_str()));
    m.insert("class".to_string(), JsonValue::from(w.class.as_str()));
    m.insert("range".to_string(), JsonValue::String(w.range.clone()));
    m.insert(
        "rate_of_fire".to_string(),
        JsonValue::String(w.rate_of_fire.clone()),
    );
    m.insert("damage".to_string(), JsonValue::String(w.damage.clone()));
    m.insert(
        "armour_penetration".to_string(),
        JsonValue::from(w.armour_penetration()),
    );
    m.insert("clip_size".to_string(), JsonValue::String(w.clip_size.clone()));
    m.insert("reload".to_string(), JsonValue::String(w.reload.clone()));
    m.insert(
        "special_qualities".to_string(),
        JsonValue::String(w.special_qualities.clone()),
    );
    JsonValue::Object(m)
}

fn armour_to_json(record: &CharacterRecord) -> JsonValue {
    let mut m = JsonMap::new();
    for (key, field) in ["head", "arms", "body", "legs"].into_iter().zip(ARMOUR_FIELDS) {
        m.insert(key.to_string(), JsonValue::from(record.attribute(field)));
    }
    JsonValue::Object(m)
}

fn psyker_to_json(record: &CharacterRecord) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "psy_rating".to_string(),
        JsonValue::from(record.attribute(NumericField::PsyRating)),
    );
    m.insert(
        "powers".to_string(),
        list_to_json(record.list(ListField::Powers)),
    );
    JsonValue::Object(m)
}

fn status_to_json(record: &CharacterRecord) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "corruption".to_string(),
        JsonValue::from(record.attribute(NumericField::Corruption)),
    );
    m.insert(
        "insanity".to_string(),
        JsonValue::from(record.attribute(NumericField::Insanity)),
    );
    m.insert(
        "mutations".to_string(),
        list_to_json(record.list(ListField::Mutations)),
    );
    m.insert(
        "disorders".to_string(),
        list_to_json(record.list(ListField::Disorders)),
    );
    JsonValue::Object(m)
}

// ---------------------------------------------------------------------------
// Text sheet
// ---------------------------------------------------------------------------

pub fn render_sheet(record: &CharacterRecord) -> String {
    let mut out = String::new();
    writeln!(&mut out).expect("writing to String cannot fail");
    writeln!(&mut out, "{}", centered_no_trailing("DARK HERESY", SHEET_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(
        &mut out,
        "{}",
        centered_no_trailing("ACOLYTE CHARACTER SHEET", SHEET_WIDTH)
    )
    .expect("writing to String cannot fail");
    writeln!(&mut out).expect("writing to String cannot fail");

    write_identity(&mut out, record);
    writeln!(&mut out).expect("writing to String cannot fail");
    write_characteristics(&mut out, record);
    writeln!(&mut out).expect("writing to String cannot fail");
    write_wounds_and_experience(&mut out, record);
    writeln!(&mut out).expect("writing to String cannot fail");
    write_skills(&mut out, record);
    writeln!(&mut out).expect("writing to String cannot fail");
    write_list(&mut out, "Talents", record.list(ListField::Talents));
    writeln!(&mut out).expect("writing to String cannot fail");
    write_list(&mut out, "Gear", record.list(ListField::Gear));
    writeln!(&mut out).expect("writing to String cannot fail");
    write_weapons(&mut out, record.weapons());
    writeln!(&mut out).expect("writing to String cannot fail");
    write_armour(&mut out, record);
    writeln!(&mut out).expect("writing to String cannot fail");
    write_psyker(&mut out, record);
    writeln!(&mut out).expect("writing to String cannot fail");
    write_status(&mut out, record);

    out
}

fn write_header(out: &mut String, title: &str) {
    writeln!(out, " ::: {title} :::").expect("writing to String cannot fail");
}

fn write_identity(out: &mut String, record: &CharacterRecord) {
    // Background is free prose and gets its own block below the grid.
    let grid: Vec<TextField> = TextField::ALL
        .into_iter()
        .filter(|field| *field != TextField::Background)
        .collect();

    for pair in grid.chunks(2) {
        let mut line = String::with_capacity(SHEET_WIDTH);
        for field in pair {
            let value = fit_column(&single_line(record.text(*field)), IDENTITY_VALUE_WIDTH);
            line.push_str(&format!(
                "{:>lw$}: {:<vw$}",
                field.label(),
                value,
                lw = IDENTITY_LABEL_WIDTH,
                vw = IDENTITY_VALUE_WIDTH
            ));
        }
        writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
    }

    let background = record.text(TextField::Background);
    if !background.trim().is_empty() {
        writeln!(out).expect("writing to String cannot fail");
        write_header(out, "Background");
        for line in background.lines() {
            writeln!(out, "  {}", line.trim_end()).expect("writing to String cannot fail");
        }
    }
}

fn write_characteristics(out: &mut String, record: &CharacterRecord) {
    write_header(out, "Characteristics");
    for row in NumericField::CHARACTERISTICS.chunks(CHARACTERISTIC_COLUMNS) {
        let mut line = String::with_capacity(SHEET_WIDTH);
        for field in row {
            let cell = format!("{:>16}: {:02}", field.label(), record.attribute(*field));
            line.push_str(&format!("{cell:<w$}", w = CHARACTERISTIC_COL_WIDTH));
        }
        writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
    }
}

fn write_wounds_and_experience(out: &mut String, record: &CharacterRecord) {
    write_header(out, "Wounds");
    writeln!(
        out,
        "  Wounds: {}/{}   Fatigue: {}",
        record.attribute(NumericField::CurrentWounds),
        record.attribute(NumericField::MaxWounds),
        record.attribute(NumericField::Fatigue)
    )
    .expect("writing to String cannot fail");

    let movement: Vec<String> = MOVEMENT_FIELDS
        .iter()
        .map(|field| format!("{} {}", field.label(), record.attribute(*field)))
        .collect();
    writeln!(out, "  Movement: {}", movement.join("  ")).expect("writing to String cannot fail");
    writeln!(out).expect("writing to String cannot fail");

    write_header(out, "Experience");
    let overspent = if record.is_overspent() {
        " (overspent)"
    } else {
        ""
    };
    writeln!(
        out,
        "  Total: {}   Spent: {}   Remaining: {}{}",
        format_number_with_commas(record.total_xp()),
        format_number_with_commas(record.spent_xp()),
        format_number_with_commas(record.remaining_xp()),
        overspent
    )
    .expect("writing to String cannot fail");
}

fn write_skills(out: &mut String, record: &CharacterRecord) {
    write_header(out, "Skills");
    let cells: Vec<String> = record
        .skills()
        .iter()
        .map(|skill| {
            let mark = if skill.state.trained { '*' } else { ' ' };
            format!(
                "{mark} {:<nw$} {}",
                skill.name,
                skill.state.rank(),
                nw = SKILL_NAME_WIDTH
            )
        })
        .collect();

    // Column-major, like a printed sheet.
    let rows = cells.len().div_ceil(2);
    for row in 0..rows {
        let left = &cells[row];
        let line = match cells.get(row + rows) {
            Some(right) => format!("  {left:<w$}{right}", w = SKILL_COL_WIDTH),
            None => format!("  {left}"),
        };
        writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
    }
    writeln!(out, "  (* trained)").expect("writing to String cannot fail");
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    write_header(out, title);
    if items.is_empty() {
        writeln!(out, "  none").expect("writing to String cannot fail");
        return;
    }
    for item in items {
        writeln!(
            out,
            "  {}",
            fit_column(&single_line(item), SHEET_WIDTH - 2)
        )
        .expect("writing to String cannot fail");
    }
}

fn write_weapons(out: &mut String, weapons: &[Weapon]) {
    write_header(out, "Weapons");
    if weapons.is_empty() {
        writeln!(out, "  none").expect("writing to String cannot fail");
        return;
    }
    for w in weapons {
        writeln!(
            out,
            "  {} ({} {})",
            single_line(&w.name),
            w.weapon_type,
            w.class
        )
        .expect("writing to String cannot fail");
        writeln!(
            out,
            "      Range: {}  RoF: {}  Dmg: {}  Pen: {}  Clip: {}  Rld: {}",
            dash_if_empty(&w.range),
            dash_if_empty(&w.rate_of_fire),
            dash_if_empty(&w.damage),
            w.armour_penetration(),
            dash_if_empty(&w.clip_size),
            dash_if_empty(&w.reload)
        )
        .expect("writing to String cannot fail");
        if !w.special_qualities.trim().is_empty() {
            writeln!(out, "      Special: {}", single_line(&w.special_qualities))
                .expect("writing to String cannot fail");
        }
    }
}

fn write_armour(out: &mut String, record: &CharacterRecord) {
    write_header(out, "Armour");
    let cells: Vec<String> = ARMOUR_FIELDS
        .iter()
        .map(|field| format!("{}: {}", field.label(), record.attribute(*field)))
        .collect();
    writeln!(out, "  {}", cells.join("   ")).expect("writing to String cannot fail");
}

fn write_psyker(out: &mut String, record: &CharacterRecord) {
    write_header(out, "Psyker");
    writeln!(
        out,
        "  Psy Rating: {}",
        record.attribute(NumericField::PsyRating)
    )
    .expect("writing to String cannot fail");
    let powers = record.list(ListField::Powers);
    if !powers.is_empty() {
        writeln!(out, "  Powers:").expect("writing to String cannot fail");
        for power in powers {
            writeln!(out, "    {}", single_line(power)).expect("writing to String cannot fail");
        }
    }
}

fn write_status(out: &mut String, record: &CharacterRecord) {
    write_header(out, "Status");
    writeln!(
        out,
        "  Corruption: {}   Insanity: {}",
        record.attribute(NumericField::Corruption),
        record.attribute(NumericField::Insanity)
    )
    .expect("writing to String cannot fail");
    for (label, list) in [
        ("Mutations", ListField::Mutations),
        ("Disorders", ListField::Disorders),
    ] {
        let items = record.list(list);
        if items.is_empty() {
            continue;
        }
        writeln!(out, "  {label}:").expect("writing to String cannot fail");
        for item in items {
            writeln!(out, "    {}", single_line(item)).expect("writing to String cannot fail");
        }
    }
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn dash_if_empty(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value.chars().take(width).collect();
    }

    let mut out = String::with_capacity(width);
    for ch in value.chars().take(width - 3) {
        out.push(ch);
    }
    out.push_str("...");
    out
}

fn centered_no_trailing(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }

    let left_padding = (width - len) / 2;
    format!("{}{}", " ".repeat(left_padding), value)
}

fn format_number_with_commas(n: i32) -> String {
    if n < 0 {
        return format!("-{}", format_number_with_commas(-n));
    }
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_group_thousands() {
        assert_eq!(format_number_with_commas(0), "0");
        assert_eq!(format_number_with_commas(2500), "2,500");
        assert_eq!(format_number_with_commas(100_000), "100,000");
        assert_eq!(format_number_with_commas(-1250), "-1,250");
    }

    #[test]
    fn fit_column_truncates_with_ellipsis() {
        assert_eq!(fit_column("Interrogator", 8), "Inter...");
        assert_eq!(fit_column("Vex", 8), "Vex");
    }
}
