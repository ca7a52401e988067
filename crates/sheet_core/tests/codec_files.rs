use std::fs;

use sheet_core::core_api::{
    CharacterRecord, CoreErrorCode, DecodeWarningKind, ListField, NumericField, SheetCodec,
    TextField,
};

fn sample() -> CharacterRecord {
    let mut record = CharacterRecord::new_default();
    record.set_text(TextField::Name, "Brother Castus");
    record.set_attribute(NumericField::Intelligence, 38);
    record.add_list_entry(ListField::Gear, "Data-slate");
    record
}

#[test]
fn encode_then_decode_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("castus.txt");
    let codec = SheetCodec::new();

    codec.encode(&sample(), &path).expect("encode");
    let decoded = codec.decode(&path).expect("decode");
    assert_eq!(decoded, sample());

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("castus.txt")]);
}

#[test]
fn encode_replaces_previous_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sheet.txt");
    fs::write(&path, "[Identity]\nname = Old Name\nrole = Guardsman\n").expect("seed file");

    let codec = SheetCodec::new();
    codec.encode(&sample(), &path).expect("encode");
    let decoded = codec.decode(&path).expect("decode");
    assert_eq!(decoded.name(), "Brother Castus");
    assert_eq!(decoded.text(TextField::Role), "");
}

#[test]
fn encode_creates_missing_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("warband").join("acolytes").join("castus.txt");

    SheetCodec::new().encode(&sample(), &path).expect("encode");
    assert!(path.is_file());
}

#[test]
fn encode_into_a_file_path_fails_with_write_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "plain file").expect("seed file");

    let err = SheetCodec::new()
        .encode(&sample(), blocker.join("castus.txt"))
        .expect_err("parent is a regular file");
    assert_eq!(err.code, CoreErrorCode::WriteFailure);
    assert!(err.message.contains("castus.txt"), "{}", err.message);
    assert_eq!(fs::read_to_string(&blocker).expect("blocker"), "plain file");
}

#[test]
fn decode_missing_file_is_unreadable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = SheetCodec::new()
        .decode(dir.path().join("nobody.txt"))
        .expect_err("file does not exist");
    assert_eq!(err.code, CoreErrorCode::UnreadableFile);
}

#[test]
fn decode_empty_file_gives_default_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").expect("seed file");

    let report = SheetCodec::new().decode_with_warnings(&path).expect("decode");
    assert!(report.is_clean());
    assert_eq!(report.record, CharacterRecord::new_default());
}

#[test]
fn decode_tolerates_bom_crlf_and_invalid_utf8() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("windows.txt");
    let mut bytes = b"\xef\xbb\xbf[Identity]\r\nname = Vex\r\nrole = Scum \xff\r\n".to_vec();
    bytes.extend_from_slice(b"[Attributes]\r\nFel = 41\r\n");
    fs::write(&path, bytes).expect("seed file");

    let report = SheetCodec::new().decode_with_warnings(&path).expect("decode");
    assert!(report.is_clean(), "unexpected warnings: {:?}", report.warnings);
    assert_eq!(report.record.name(), "Vex");
    assert_eq!(report.record.text(TextField::Role), "Scum \u{fffd}");
    assert_eq!(report.record.attribute(NumericField::Fellowship), 41);
}

#[test]
fn load_or_new_starts_fresh_for_missing_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = SheetCodec::new();
    let path = dir.path().join("fresh.txt");

    let record = codec.load_or_new(&path).expect("missing path is fine");
    assert_eq!(record, CharacterRecord::new_default());
    assert!(!path.exists());

    codec.encode(&sample(), &path).expect("encode");
    assert_eq!(codec.load_or_new(&path).expect("load"), sample());
}

#[test]
fn load_or_new_still_reports_other_read_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = SheetCodec::new()
        .load_or_new(dir.path())
        .expect_err("a directory is not a sheet");
    assert_eq!(err.code, CoreErrorCode::UnreadableFile);
}

#[test]
fn warnings_carry_file_line_numbers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("typo.txt");
    fs::write(&path, "[Status]\ncorruption = 12\ninsanity = lots\n").expect("seed file");

    let report = SheetCodec::new().decode_with_warnings(&path).expect("decode");
    assert_eq!(report.warnings.len(), 1);
    let warning = &report.warnings[0];
    assert_eq!(warning.line, 3);
    assert_eq!(warning.kind, DecodeWarningKind::InvalidNumber);
    assert!(warning.to_string().starts_with("line 3: InvalidNumber:"));
    assert_eq!(report.record.attribute(NumericField::Corruption), 12);
}

#[cfg(unix)]
#[test]
fn new_sheet_is_world_readable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fresh.txt");
    SheetCodec::new().encode(&sample(), &path).expect("encode");

    let mode = fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

#[cfg(unix)]
#[test]
fn rewrite_keeps_existing_sheet_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let codec = SheetCodec::new();
    for wanted in [0o644, 0o640, 0o600] {
        let path = dir.path().join(format!("sheet-{wanted:o}.txt"));
        fs::write(&path, "[Identity]\nname = Old Name\n").expect("seed file");
        fs::set_permissions(&path, fs::Permissions::from_mode(wanted)).expect("chmod");

        codec.encode(&sample(), &path).expect("encode");
        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, wanted, "{}", path.display());
        assert_eq!(codec.decode(&path).expect("decode"), sample());
    }
}
