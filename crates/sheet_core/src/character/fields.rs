use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Named group of `key = value` lines in a sheet file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Identity,
    Attributes,
    Skills,
    Wounds,
    Experience,
    Armour,
    Psyker,
    Status,
    Talents,
    Gear,
    Weapons,
    Powers,
    Mutations,
    Disorders,
}

impl Section {
    /// Emission order.
    pub const ALL: [Section; 14] = [
        Self::Identity,
        Self::Attributes,
        Self::Skills,
        Self::Wounds,
        Self::Experience,
        Self::Armour,
        Self::Psyker,
        Self::Status,
        Self::Talents,
        Self::Gear,
        Self::Weapons,
        Self::Powers,
        Self::Mutations,
        Self::Disorders,
    ];

    pub fn header(&self) -> &'static str {
        match *self {
            Self::Identity => "Identity",
            Self::Attributes => "Attributes",
            Self::Skills => "Skills",
            Self::Wounds => "Wounds",
            Self::Experience => "Experience",
            Self::Armour => "Armour",
            Self::Psyker => "Psyker",
            Self::Status => "Status",
            Self::Talents => "Talents",
            Self::Gear => "Gear",
            Self::Weapons => "Weapons",
            Self::Powers => "Powers",
            Self::Mutations => "Mutations",
            Self::Disorders => "Disorders",
        }
    }

    /// Resolves a section header, including the `Basic` name older sheets
    /// used for identity fields.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        if header.eq_ignore_ascii_case("Basic") {
            return Some(Self::Identity);
        }
        Self::ALL
            .into_iter()
            .find(|section| section.header().eq_ignore_ascii_case(header))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Free-text identity fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextField {
    Name,
    Gender,
    Age,
    Height,
    Weight,
    Build,
    Hair,
    Eyes,
    Aura,
    Homeworld,
    Background,
    Role,
    Divination,
}

impl TextField {
    pub const ALL: [TextField; 13] = [
        Self::Name,
        Self::Gender,
        Self::Age,
        Self::Height,
        Self::Weight,
        Self::Build,
        Self::Hair,
        Self::Eyes,
        Self::Aura,
        Self::Homeworld,
        Self::Background,
        Self::Role,
        Self::Divination,
    ];

    pub fn key(&self) -> &'static str {
        match *self {
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Build => "build",
            Self::Hair => "hair",
            Self::Eyes => "eyes",
            Self::Aura => "aura",
            Self::Homeworld => "homeworld",
            Self::Background => "background",
            Self::Role => "role",
            Self::Divination => "divination",
        }
    }

    pub fn label(&self) -> &'static str {
        match *self {
            Self::Name => "Name",
            Self::Gender => "Gender",
            Self::Age => "Age",
            Self::Height => "Height",
            Self::Weight => "Weight",
            Self::Build => "Build",
            Self::Hair => "Hair",
            Self::Eyes => "Eyes",
            Self::Aura => "Aura",
            Self::Homeworld => "Home World",
            Self::Background => "Background",
            Self::Role => "Role",
            Self::Divination => "Divination",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key))
    }
}

/// Every clamped integer on the sheet.
///
/// Discriminants index the record's value block, so variants must stay in
/// `ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    WeaponSkill,
    BallisticSkill,
    Strength,
    Toughness,
    Agility,
    Intelligence,
    Perception,
    Willpower,
    Fellowship,
    CurrentWounds,
    MaxWounds,
    Fatigue,
    HalfMove,
    FullMove,
    ChargeMove,
    RunMove,
    TotalXp,
    SpentXp,
    HeadAp,
    ArmsAp,
    BodyAp,
    LegsAp,
    PsyRating,
    Corruption,
    Insanity,
}

impl NumericField {
    pub const COUNT: usize = 25;

    pub const ALL: [NumericField; Self::COUNT] = [
        Self::WeaponSkill,
        Self::BallisticSkill,
        Self::Strength,
        Self::Toughness,
        Self::Agility,
        Self::Intelligence,
        Self::Perception,
        Self::Willpower,
        Self::Fellowship,
        Self::CurrentWounds,
        Self::MaxWounds,
        Self::Fatigue,
        Self::HalfMove,
        Self::FullMove,
        Self::ChargeMove,
        Self::RunMove,
        Self::TotalXp,
        Self::SpentXp,
        Self::HeadAp,
        Self::ArmsAp,
        Self::BodyAp,
        Self::LegsAp,
        Self::PsyRating,
        Self::Corruption,
        Self::Insanity,
    ];

    pub const CHARACTERISTICS: [NumericField; 9] = [
        Self::WeaponSkill,
        Self::BallisticSkill,
        Self::Strength,
        Self::Toughness,
        Self::Agility,
        Self::Intelligence,
        Self::Perception,
        Self::Willpower,
        Self::Fellowship,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn section(&self) -> Section {
        match *self {
            Self::WeaponSkill
            | Self::BallisticSkill
            | Self::Strength
            | Self::Toughness
            | Self::Agility
            | Self::Intelligence
            | Self::Perception
            | Self::Willpower
            | Self::Fellowship => Section::Attributes,
            Self::CurrentWounds
            | Self::MaxWounds
            | Self::Fatigue
            | Self::HalfMove
            | Self::FullMove
            | Self::ChargeMove
            | Self::RunMove => Section::Wounds,
            Self::TotalXp | Self::SpentXp => Section::Experience,
            Self::HeadAp | Self::ArmsAp | Self::BodyAp | Self::LegsAp => Section::Armour,
            Self::PsyRating => Section::Psyker,
            Self::Corruption | Self::Insanity => Section::Status,
        }
    }

    pub fn range(&self) -> RangeInclusive<i32> {
        match self.section() {
            Section::Attributes => 0..=100,
            Section::Wounds => match *self {
                Self::HalfMove | Self::FullMove | Self::ChargeMove | Self::RunMove => 0..=99,
                _ => 0..=100,
            },
            Section::Experience => 0..=100_000,
            Section::Armour => 0..=20,
            Section::Psyker => 0..=10,
            _ => 0..=100,
        }
    }

    /// Key used in the sheet file.
    pub fn key(&self) -> &'static str {
        match *self {
            Self::WeaponSkill => "WS",
            Self::BallisticSkill => "BS",
            Self::Strength => "S",
            Self::Toughness => "T",
            Self::Agility => "Ag",
            Self::Intelligence => "Int",
            Self::Perception => "Per",
            Self::Willpower => "WP",
            Self::Fellowship => "Fel",
            Self::CurrentWounds => "current_wounds",
            Self::MaxWounds => "max_wounds",
            Self::Fatigue => "fatigue",
            Self::HalfMove => "half_move",
            Self::FullMove => "full_move",
            Self::ChargeMove => "charge_move",
            Self::RunMove => "run_move",
            Self::TotalXp => "total_xp",
            Self::SpentXp => "spent_xp",
            Self::HeadAp => "head_ap",
            Self::ArmsAp => "arms_ap",
            Self::BodyAp => "body_ap",
            Self::LegsAp => "legs_ap",
            Self::PsyRating => "psy_rating",
            Self::Corruption => "corruption",
            Self::Insanity => "insanity",
        }
    }

    pub fn label(&self) -> &'static str {
        match *self {
            Self::WeaponSkill => "Weapon Skill",
            Self::BallisticSkill => "Ballistic Skill",
            Self::Strength => "Strength",
            Self::Toughness => "Toughness",
            Self::Agility => "Agility",
            Self::Intelligence => "Intelligence",
            Self::Perception => "Perception",
            Self::Willpower => "Willpower",
            Self::Fellowship => "Fellowship",
            Self::CurrentWounds => "Current Wounds",
            Self::MaxWounds => "Max Wounds",
            Self::Fatigue => "Fatigue",
            Self::HalfMove => "Half",
            Self::FullMove => "Full",
            Self::ChargeMove => "Charge",
            Self::RunMove => "Run",
            Self::TotalXp => "Total XP",
            Self::SpentXp => "Spent XP",
            Self::HeadAp => "Head",
            Self::ArmsAp => "Arms",
            Self::BodyAp => "Body",
            Self::LegsAp => "Legs",
            Self::PsyRating => "Psy Rating",
            Self::Corruption => "Corruption",
            Self::Insanity => "Insanity",
        }
    }

    /// Case-insensitive lookup by file key.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key))
    }

    pub fn in_section(section: Section) -> impl Iterator<Item = NumericField> {
        Self::ALL
            .into_iter()
            .filter(move |field| field.section() == section)
    }

    pub fn clamp(&self, value: i64) -> i32 {
        let range = self.range();
        value.clamp(*range.start() as i64, *range.end() as i64) as i32
    }
}

/// Ordered free-text lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListField {
    Talents,
    Gear,
    Powers,
    Mutations,
    Disorders,
}

impl ListField {
    pub const ALL: [ListField; 5] = [
        Self::Talents,
        Self::Gear,
        Self::Powers,
        Self::Mutations,
        Self::Disorders,
    ];

    pub fn section(&self) -> Section {
        match *self {
            Self::Talents => Section::Talents,
            Self::Gear => Section::Gear,
            Self::Powers => Section::Powers,
            Self::Mutations => Section::Mutations,
            Self::Disorders => Section::Disorders,
        }
    }

    pub fn key(&self) -> &'static str {
        match *self {
            Self::Talents => "talents",
            Self::Gear => "gear",
            Self::Powers => "powers",
            Self::Mutations => "mutations",
            Self::Disorders => "disorders",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key))
    }

    pub fn from_section(section: Section) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.section() == section)
    }
}
