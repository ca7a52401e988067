//! Dark Heresy character sheets: the in-memory record and its text file
//! format. Most callers only need [`core_api`].

pub mod character;
pub mod core_api;
pub mod format;
pub mod skills;
pub mod weapon;
