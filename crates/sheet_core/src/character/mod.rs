pub mod fields;

use crate::core_api::{CoreError, CoreErrorCode};
use crate::skills::{SkillSheet, SkillState};
use crate::weapon::Weapon;
use fields::{ListField, NumericField, TextField};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub gender: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub build: String,
    pub hair: String,
    pub eyes: String,
    pub aura: String,
    pub homeworld: String,
    pub background: String,
    pub role: String,
    pub divination: String,
}

impl Identity {
    pub fn get(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Gender => &self.gender,
            TextField::Age => &self.age,
            TextField::Height => &self.height,
            TextField::Weight => &self.weight,
            TextField::Build => &self.build,
            TextField::Hair => &self.hair,
            TextField::Eyes => &self.eyes,
            TextField::Aura => &self.aura,
            TextField::Homeworld => &self.homeworld,
            TextField::Background => &self.background,
            TextField::Role => &self.role,
            TextField::Divination => &self.divination,
        }
    }

    pub fn get_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Name => &mut self.name,
            TextField::Gender => &mut self.gender,
            TextField::Age => &mut self.age,
            TextField::Height => &mut self.height,
            TextField::Weight => &mut self.weight,
            TextField::Build => &mut self.build,
            TextField::Hair => &mut self.hair,
            TextField::Eyes => &mut self.eyes,
            TextField::Aura => &mut self.aura,
            TextField::Homeworld => &mut self.homeworld,
            TextField::Background => &mut self.background,
            TextField::Role => &mut self.role,
            TextField::Divination => &mut self.divination,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ListBlock {
    talents: Vec<String>,
    gear: Vec<String>,
    powers: Vec<String>,
    mutations: Vec<String>,
    disorders: Vec<String>,
}

impl ListBlock {
    fn get(&self, list: ListField) -> &Vec<String> {
        match list {
            ListField::Talents => &self.talents,
            ListField::Gear => &self.gear,
            ListField::Powers => &self.powers,
            ListField::Mutations => &self.mutations,
            ListField::Disorders => &self.disorders,
        }
    }

    fn get_mut(&mut self, list: ListField) -> &mut Vec<String> {
        match list {
            ListField::Talents => &mut self.talents,
            ListField::Gear => &mut self.gear,
            ListField::Powers => &mut self.powers,
            ListField::Mutations => &mut self.mutations,
            ListField::Disorders => &mut self.disorders,
        }
    }
}

/// One character sheet.
///
/// Free text lives in [`Identity`] and is public. Every bounded integer,
/// the skill table, the lists and the weapons sit behind methods so the
/// range and catalogue rules hold after any mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub identity: Identity,
    numbers: [i32; NumericField::COUNT],
    skills: SkillSheet,
    lists: ListBlock,
    weapons: Vec<Weapon>,
}

impl Default for CharacterRecord {
    fn default() -> Self {
        Self::new_default()
    }
}

impl CharacterRecord {
    pub fn new_default() -> Self {
        Self {
            identity: Identity::default(),
            numbers: [0; NumericField::COUNT],
            skills: SkillSheet::new(),
            lists: ListBlock::default(),
            weapons: Vec::new(),
        }
    }

    // --- Identity ---

    pub fn text(&self, field: TextField) -> &str {
        self.identity.get(field)
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        *self.identity.get_mut(field) = value.into();
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    // --- Bounded integers ---

    pub fn attribute(&self, field: NumericField) -> i32 {
        self.numbers[field.index()]
    }

    /// Stores `value` clamped into the field's range.
    pub fn set_attribute(&mut self, field: NumericField, value: i64) {
        self.numbers[field.index()] = field.clamp(value);
    }

    /// Same as [`set_attribute`](Self::set_attribute) for raw widget text;
    /// anything that is not an integer becomes 0. Returns `false` in that
    /// case. Over-long digit strings count as integers and saturate.
    pub fn set_attribute_text(&mut self, field: NumericField, text: &str) -> bool {
        let parsed = parse_int_saturating(text);
        self.set_attribute(field, parsed.unwrap_or(0));
        parsed.is_some()
    }

    pub fn total_xp(&self) -> i32 {
        self.attribute(NumericField::TotalXp)
    }

    pub fn spent_xp(&self) -> i32 {
        self.attribute(NumericField::SpentXp)
    }

    /// Derived on every call; negative when more XP is spent than earned.
    pub fn remaining_xp(&self) -> i32 {
        self.total_xp() - self.spent_xp()
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining_xp() < 0
    }

    // --- Skills ---

    pub fn skills(&self) -> &SkillSheet {
        &self.skills
    }

    pub fn skill(&self, name: &str) -> Option<&SkillState> {
        self.skills.get(name)
    }

    /// `None` for names outside the catalogue.
    pub fn skill_mut(&mut self, name: &str) -> Option<&mut SkillState> {
        self.skills.get_mut(name)
    }

    pub(crate) fn skills_mut(&mut self) -> &mut SkillSheet {
        &mut self.skills
    }

    // --- Lists ---

    pub fn list(&self, list: ListField) -> &[String] {
        self.lists.get(list)
    }

    pub fn add_list_entry(&mut self, list: ListField, text: impl Into<String>) {
        self.lists.get_mut(list).push(text.into());
    }

    pub fn remove_list_entry(&mut self, list: ListField, index: usize) -> Result<String, CoreError> {
        let entries = self.lists.get_mut(list);
        if index >= entries.len() {
            return Err(CoreError::index_out_of_range(list.key(), index, entries.len()));
        }
        Ok(entries.remove(index))
    }

    // --- Weapons ---

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn add_weapon(&mut self, weapon: Weapon) -> Result<(), CoreError> {
        check_weapon_name(&weapon)?;
        self.weapons.push(weapon);
        Ok(())
    }

    pub fn update_weapon(&mut self, index: usize, weapon: Weapon) -> Result<(), CoreError> {
        let len = self.weapons.len();
        let Some(slot) = self.weapons.get_mut(index) else {
            return Err(CoreError::index_out_of_range("weapon", index, len));
        };
        check_weapon_name(&weapon)?;
        *slot = weapon;
        Ok(())
    }

    pub fn remove_weapon(&mut self, index: usize) -> Result<Weapon, CoreError> {
        if index >= self.weapons.len() {
            return Err(CoreError::index_out_of_range(
                "weapon",
                index,
                self.weapons.len(),
            ));
        }
        Ok(self.weapons.remove(index))
    }
}

fn check_weapon_name(weapon: &Weapon) -> Result<(), CoreError> {
    if weapon.has_name() {
        return Ok(());
    }
    Err(CoreError::new(
        CoreErrorCode::InvalidWeapon,
        "weapon must have a name",
    ))
}

/// Parses an optionally signed decimal integer, saturating on overflow so
/// huge inputs still clamp to the top of a range instead of falling to 0.
pub(crate) fn parse_int_saturating(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}
