use std::fmt;

use serde::{Deserialize, Serialize};

pub const MAX_ARMOUR_PENETRATION: i32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponType {
    #[default]
    Melee,
    Ranged,
}

impl WeaponType {
    pub const ALL: [WeaponType; 2] = [Self::Melee, Self::Ranged];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Melee => "Melee",
            Self::Ranged => "Ranged",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponClass {
    #[default]
    Basic,
    Pistol,
    Heavy,
    Thrown,
    Melee,
}

impl WeaponClass {
    pub const ALL: [WeaponClass; 5] = [
        Self::Basic,
        Self::Pistol,
        Self::Heavy,
        Self::Thrown,
        Self::Melee,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Basic => "Basic",
            Self::Pistol => "Pistol",
            Self::Heavy => "Heavy",
            Self::Thrown => "Thrown",
            Self::Melee => "Melee",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for WeaponClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the weapons table.
///
/// `name` is the only field with a presence rule: the record refuses a
/// weapon whose name is empty or whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Weapon {
    pub name: String,
    pub weapon_type: WeaponType,
    pub class: WeaponClass,
    pub range: String,
    pub rate_of_fire: String,
    pub damage: String,
    armour_penetration: i32,
    pub clip_size: String,
    pub reload: String,
    pub special_qualities: String,
}

impl Weapon {
    pub fn new(name: impl Into<String>, weapon_type: WeaponType, class: WeaponClass) -> Self {
        Self {
            name: name.into(),
            weapon_type,
            class,
            ..Self::default()
        }
    }

    pub fn armour_penetration(&self) -> i32 {
        self.armour_penetration
    }

    pub fn set_armour_penetration(&mut self, value: i64) {
        self.armour_penetration = value.clamp(0, MAX_ARMOUR_PENETRATION as i64) as i32;
    }

    pub fn with_armour_penetration(mut self, value: i64) -> Self {
        self.set_armour_penetration(value);
        self
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
