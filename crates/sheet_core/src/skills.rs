use serde::Serialize;

pub const SKILL_COUNT: usize = 38;
pub const MAX_SKILL_RANK: i32 = 5;

// --- Skill catalogue ---
// Persisted order. Entries are never added or removed at runtime.

pub const SKILL_NAMES: [&str; SKILL_COUNT] = [
    "Acrobatics",
    "Awareness",
    "Barter",
    "Carouse",
    "Charm",
    "Climb",
    "Command",
    "Common Lore",
    "Concealment",
    "Contortionist",
    "Deceive",
    "Disguise",
    "Dodge",
    "Drive",
    "Evaluate",
    "Forbidden Lore",
    "Gamble",
    "Inquiry",
    "Interrogation",
    "Intimidate",
    "Logic",
    "Medicae",
    "Navigate",
    "Operate",
    "Parry",
    "Pilot",
    "Psyniscience",
    "Scholastic Lore",
    "Scrutiny",
    "Search",
    "Security",
    "Silent Move",
    "Speak Language",
    "Survival",
    "Swim",
    "Tech-Use",
    "Tracking",
    "Trade",
];

/// Case-insensitive catalogue lookup.
pub fn skill_index(name: &str) -> Option<usize> {
    let name = name.trim();
    SKILL_NAMES
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkillState {
    pub trained: bool,
    rank: i32,
}

impl SkillState {
    pub fn new(trained: bool, rank: i64) -> Self {
        let mut state = Self { trained, rank: 0 };
        state.set_rank(rank);
        state
    }

    pub fn rank(&self) -> i32 {
        self.rank
    }

    /// Stores `rank` clamped to `0..=MAX_SKILL_RANK`.
    pub fn set_rank(&mut self, rank: i64) {
        self.rank = rank.clamp(0, MAX_SKILL_RANK as i64) as i32;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillEntry<'a> {
    pub index: usize,
    pub name: &'static str,
    pub state: &'a SkillState,
}

/// Fixed-size skill table addressed by catalogue index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSheet {
    states: [SkillState; SKILL_COUNT],
}

impl Default for SkillSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillSheet {
    pub fn new() -> Self {
        Self {
            states: [SkillState::default(); SKILL_COUNT],
        }
    }

    pub fn len(&self) -> usize {
        SKILL_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, name: &str) -> Option<&SkillState> {
        skill_index(name).map(|index| &self.states[index])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SkillState> {
        skill_index(name).map(|index| &mut self.states[index])
    }

    pub fn by_index(&self, index: usize) -> Option<&SkillState> {
        self.states.get(index)
    }

    pub fn by_index_mut(&mut self, index: usize) -> Option<&mut SkillState> {
        self.states.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = SkillEntry<'_>> {
        SKILL_NAMES
            .iter()
            .zip(self.states.iter())
            .enumerate()
            .map(|(index, (name, state))| SkillEntry {
                index,
                name: *name,
                state,
            })
    }

    pub fn trained(&self) -> impl Iterator<Item = SkillEntry<'_>> {
        self.iter().filter(|entry| entry.state.trained)
    }
}
