//! Property tests for the sheet codec.
//!
//! Invariants:
//! - any valid record decodes back to itself without warnings
//! - encoding a decoded record reproduces the same text
//! - any named weapon survives its one-line form

use proptest::prelude::*;

use sheet_core::core_api::{
    CharacterRecord, ListField, NumericField, SKILL_COUNT, SKILL_NAMES, SheetCodec, TextField,
    Weapon, WeaponClass, WeaponType, decode_weapon_line, encode_weapon_line,
};

// ============================================================================
// Strategies
// ============================================================================

/// Free text, weighted toward the characters the escaper has to handle.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[ a-z\\\\|=:;#\\[\\]\t\r\n]{0,12}",
        Just(String::new()),
        Just(" ".to_string()),
        Just("\\s\\n\\|".to_string()),
    ]
}

/// Picks a value inside `field`'s range from an arbitrary seed.
fn in_range(field: NumericField, seed: u32) -> i64 {
    let range = field.range();
    let (min, max) = (i64::from(*range.start()), i64::from(*range.end()));
    min + i64::from(seed) % (max - min + 1)
}

prop_compose! {
    fn arb_weapon()(
        name in arb_text().prop_filter("weapons need a name", |s| !s.trim().is_empty()),
        weapon_type in prop::sample::select(WeaponType::ALL.to_vec()),
        class in prop::sample::select(WeaponClass::ALL.to_vec()),
        fields in prop::collection::vec(arb_text(), 6),
        penetration in 0i64..=100,
    ) -> Weapon {
        let mut weapon = Weapon::new(name, weapon_type, class).with_armour_penetration(penetration);
        weapon.range = fields[0].clone();
        weapon.rate_of_fire = fields[1].clone();
        weapon.damage = fields[2].clone();
        weapon.clip_size = fields[3].clone();
        weapon.reload = fields[4].clone();
        weapon.special_qualities = fields[5].clone();
        weapon
    }
}

prop_compose! {
    fn arb_record()(
        texts in prop::collection::vec(arb_text(), TextField::ALL.len()),
        seeds in prop::collection::vec(any::<u32>(), NumericField::ALL.len()),
        skills in prop::collection::vec((any::<bool>(), 0i64..=5), SKILL_COUNT),
        lists in prop::collection::vec(
            prop::collection::vec(arb_text(), 0..4),
            ListField::ALL.len(),
        ),
        weapons in prop::collection::vec(arb_weapon(), 0..4),
    ) -> CharacterRecord {
        let mut record = CharacterRecord::new_default();
        for (field, text) in TextField::ALL.into_iter().zip(texts) {
            record.set_text(field, text);
        }
        for (field, seed) in NumericField::ALL.into_iter().zip(seeds) {
            record.set_attribute(field, in_range(field, seed));
        }
        for (name, (trained, rank)) in SKILL_NAMES.iter().zip(skills) {
            if let Some(state) = record.skill_mut(name) {
                state.trained = trained;
                state.set_rank(rank);
            }
        }
        for (list, items) in ListField::ALL.into_iter().zip(lists) {
            for item in items {
                record.add_list_entry(list, item);
            }
        }
        for weapon in weapons {
            let _ = record.add_weapon(weapon);
        }
        record
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn any_record_roundtrips(record in arb_record()) {
        let codec = SheetCodec::new();
        let text = codec.encode_to_string(&record);
        let report = codec.decode_str_with_warnings(&text);

        prop_assert!(report.is_clean(), "unexpected warnings: {:?}", report.warnings);
        prop_assert_eq!(&report.record, &record);
        prop_assert_eq!(codec.encode_to_string(&report.record), text);
    }

    #[test]
    fn any_weapon_line_roundtrips(weapon in arb_weapon()) {
        let line = encode_weapon_line(&weapon);
        prop_assert!(!line.contains('\n'));
        prop_assert_eq!(decode_weapon_line(&line), Some(weapon));
    }
}
