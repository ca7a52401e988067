use sheet_core::core_api::{
    CharacterRecord, CoreErrorCode, ListField, NumericField, SKILL_COUNT, TextField, Weapon,
    WeaponClass, WeaponType,
};

fn laspistol() -> Weapon {
    let mut weapon = Weapon::new("Laspistol", WeaponType::Ranged, WeaponClass::Pistol);
    weapon.special_qualities = "Reliable".to_string();
    weapon
}

#[test]
fn new_default_is_blank() {
    let record = CharacterRecord::new_default();

    for field in TextField::ALL {
        assert_eq!(record.text(field), "");
    }
    for field in NumericField::ALL {
        assert_eq!(record.attribute(field), 0, "{field:?}");
    }
    assert_eq!(record.skills().len(), SKILL_COUNT);
    assert!(record.skills().iter().all(|s| !s.state.trained && s.state.rank() == 0));
    for list in ListField::ALL {
        assert!(record.list(list).is_empty());
    }
    assert!(record.weapons().is_empty());
    assert_eq!(record, CharacterRecord::default());
}

#[test]
fn attributes_clamp_to_their_ranges() {
    let mut record = CharacterRecord::new_default();

    record.set_attribute(NumericField::WeaponSkill, -5);
    assert_eq!(record.attribute(NumericField::WeaponSkill), 0);
    record.set_attribute(NumericField::WeaponSkill, 150);
    assert_eq!(record.attribute(NumericField::WeaponSkill), 100);

    record.set_attribute(NumericField::SpentXp, 100_001);
    assert_eq!(record.attribute(NumericField::SpentXp), 100_000);

    record.set_attribute(NumericField::RunMove, 100);
    assert_eq!(record.attribute(NumericField::RunMove), 99);
    record.set_attribute(NumericField::Fatigue, 100);
    assert_eq!(record.attribute(NumericField::Fatigue), 100);
    record.set_attribute(NumericField::BodyAp, 25);
    assert_eq!(record.attribute(NumericField::BodyAp), 20);
    record.set_attribute(NumericField::PsyRating, 11);
    assert_eq!(record.attribute(NumericField::PsyRating), 10);
    record.set_attribute(NumericField::Insanity, i64::MAX);
    assert_eq!(record.attribute(NumericField::Insanity), 100);
}

#[test]
fn attribute_text_coerces_garbage_to_zero() {
    let mut record = CharacterRecord::new_default();
    record.set_attribute(NumericField::Toughness, 40);

    assert!(!record.set_attribute_text(NumericField::Toughness, "forty"));
    assert_eq!(record.attribute(NumericField::Toughness), 0);

    assert!(record.set_attribute_text(NumericField::Toughness, " 35 "));
    assert_eq!(record.attribute(NumericField::Toughness), 35);

    assert!(record.set_attribute_text(NumericField::TotalXp, "99999999999999999999999"));
    assert_eq!(record.attribute(NumericField::TotalXp), 100_000);

    assert!(record.set_attribute_text(NumericField::WeaponSkill, "-99999999999999999999"));
    assert_eq!(record.attribute(NumericField::WeaponSkill), 0);
}

#[test]
fn remaining_xp_is_derived_and_may_go_negative() {
    let mut record = CharacterRecord::new_default();
    record.set_attribute(NumericField::TotalXp, 1200);
    record.set_attribute(NumericField::SpentXp, 700);
    assert_eq!(record.remaining_xp(), 500);
    assert!(!record.is_overspent());

    record.set_attribute(NumericField::SpentXp, 1500);
    assert_eq!(record.remaining_xp(), -300);
    assert!(record.is_overspent());
}

#[test]
fn list_entries_append_verbatim_and_remove_by_index() {
    let mut record = CharacterRecord::new_default();
    record.add_list_entry(ListField::Talents, "Heightened Senses (Sight)");
    record.add_list_entry(ListField::Talents, "");
    record.add_list_entry(ListField::Talents, "Heightened Senses (Sight)");
    assert_eq!(record.list(ListField::Talents).len(), 3);
    assert!(record.list(ListField::Gear).is_empty());

    let removed = record
        .remove_list_entry(ListField::Talents, 1)
        .expect("index 1 exists");
    assert_eq!(removed, "");
    assert_eq!(
        record.list(ListField::Talents),
        ["Heightened Senses (Sight)", "Heightened Senses (Sight)"]
    );

    let err = record
        .remove_list_entry(ListField::Disorders, 0)
        .expect_err("empty list has no index 0");
    assert_eq!(err.code, CoreErrorCode::IndexOutOfRange);
}

#[test]
fn nameless_weapons_are_rejected() {
    let mut record = CharacterRecord::new_default();

    let err = record
        .add_weapon(Weapon::default())
        .expect_err("empty name must be rejected");
    assert_eq!(err.code, CoreErrorCode::InvalidWeapon);

    let err = record
        .add_weapon(Weapon::new("   ", WeaponType::Melee, WeaponClass::Melee))
        .expect_err("blank name must be rejected");
    assert_eq!(err.code, CoreErrorCode::InvalidWeapon);
    assert!(record.weapons().is_empty());
}

#[test]
fn weapons_update_and_remove_check_indices() {
    let mut record = CharacterRecord::new_default();
    record.add_weapon(laspistol()).expect("named weapon");

    let sword = Weapon::new("Mono-sword", WeaponType::Melee, WeaponClass::Melee)
        .with_armour_penetration(2);
    record.update_weapon(0, sword.clone()).expect("index 0 exists");
    assert_eq!(record.weapons(), [sword.clone()]);

    let err = record
        .update_weapon(3, laspistol())
        .expect_err("index 3 does not exist");
    assert_eq!(err.code, CoreErrorCode::IndexOutOfRange);

    let err = record
        .update_weapon(0, Weapon::default())
        .expect_err("update must keep the name rule");
    assert_eq!(err.code, CoreErrorCode::InvalidWeapon);
    assert_eq!(record.weapons()[0], sword);

    let err = record.remove_weapon(1).expect_err("index 1 does not exist");
    assert_eq!(err.code, CoreErrorCode::IndexOutOfRange);

    let removed = record.remove_weapon(0).expect("index 0 exists");
    assert_eq!(removed.name, "Mono-sword");
    assert!(record.weapons().is_empty());
}

#[test]
fn weapon_penetration_is_clamped() {
    let weapon = laspistol().with_armour_penetration(250);
    assert_eq!(weapon.armour_penetration(), 100);
    let weapon = laspistol().with_armour_penetration(-1);
    assert_eq!(weapon.armour_penetration(), 0);
}

#[test]
fn skills_are_fixed_and_ranks_clamp() {
    let mut record = CharacterRecord::new_default();

    let dodge = record.skill_mut("dodge").expect("Dodge is in the catalogue");
    dodge.trained = true;
    dodge.set_rank(7);
    assert_eq!(record.skill("Dodge").map(|s| (s.trained, s.rank())), Some((true, 5)));

    assert!(record.skill_mut("Basket Weaving").is_none());
    assert_eq!(record.skills().len(), SKILL_COUNT);
    assert_eq!(record.skills().trained().count(), 1);
}

#[test]
fn text_fields_bind_by_enum_and_key() {
    let mut record = CharacterRecord::new_default();
    record.set_text(TextField::Homeworld, "Scintilla");
    assert_eq!(record.identity.homeworld, "Scintilla");

    let field = TextField::from_key("HOMEWORLD").expect("key lookup ignores case");
    assert_eq!(record.text(field), "Scintilla");
    assert_eq!(NumericField::from_key("ag"), Some(NumericField::Agility));
    assert_eq!(ListField::from_key("Gear"), Some(ListField::Gear));
    assert_eq!(NumericField::from_key("luck"), None);
}

#[test]
fn value_types_serialize_with_field_names() {
    let weapon = laspistol().with_armour_penetration(3);
    let json = serde_json::to_value(&weapon).expect("weapon serializes");
    assert_eq!(json["name"], "Laspistol");
    assert_eq!(json["weapon_type"], "Ranged");
    assert_eq!(json["class"], "Pistol");
    assert_eq!(json["armour_penetration"], 3);

    let field: NumericField = serde_json::from_str("\"PsyRating\"").expect("field deserializes");
    assert_eq!(field, NumericField::PsyRating);
    assert_eq!(
        serde_json::to_string(&ListField::Mutations).expect("list serializes"),
        "\"Mutations\""
    );
}
