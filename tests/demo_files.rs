use demolens::{cache, list_demos, parse_demo, GZIP_START};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;

// Field offsets of the fixed header layout, as written by the engine.
const HEADER_LEN_OFFSET: usize = 0x30;
const HEADER_DATA_OFFSET: usize = 0x38;

/// Builds a complete synthetic demo file: fixed size header with the given
/// key/value pairs, followed by the gzip compressed body.
fn demo_bytes(pairs: &[(&str, &str)], body: &[u8]) -> Vec<u8> {
    let mut region = Vec::new();
    for (key, value) in pairs {
        region.extend_from_slice(key.as_bytes());
        region.push(0);
        region.extend_from_slice(value.as_bytes());
        region.push(0);
    }
    assert!(region.len() <= usize::from(u8::MAX));

    let mut data = vec![0u8; GZIP_START];
    data[HEADER_LEN_OFFSET] = region.len() as u8;
    data[HEADER_DATA_OFFSET..HEADER_DATA_OFFSET + region.len()].copy_from_slice(&region);

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body).unwrap();
    data.extend_from_slice(&encoder.finish().unwrap());
    data
}

fn duel_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("hostname", "warsow server"),
        ("localtime", "1257894000"),
        ("duration", "605"),
        ("mapname", "wdm2"),
        ("levelname", "Disposal Plant"),
        ("gametype", "duel"),
        ("matchscore", "16 : 14"),
        ("matchname", "Alice ^7vs Bob"),
    ]
}

const CS_BODY: &[u8] = b"\x00\x0bcs 20 \"CfgOne\"\x00\x0bcs 21 \"CfgTwo\"\x00";

#[test]
fn parse_demo_end_to_end() {
    let data = demo_bytes(&duel_pairs(), CS_BODY);
    let file = parse_demo(&data).unwrap();

    assert_eq!(file.header["hostname"], "warsow server");
    assert_eq!(file.header["matchname"], "Alice ^7vs Bob");
    assert_eq!(file.config_strings[&20], "CfgOne");
    assert_eq!(file.config_strings[&21], "CfgTwo");
}

#[test]
fn list_demos_resolves_a_duel() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("match.wdz20"),
        demo_bytes(&duel_pairs(), CS_BODY),
    )
    .unwrap();

    let demos = list_demos(dir.path()).unwrap();
    assert_eq!(demos.len(), 1);

    let demo = &demos[0];
    assert_eq!(demo.filename, "match.wdz20");
    assert_eq!(demo.url, "/demos/match.wdz20");
    assert!(demo.size > GZIP_START as u64);
    assert!(demo.size_str.ends_with("kB"));
    assert_eq!(demo.hostname, "warsow server");
    assert_eq!(demo.time, 1257894000);
    assert_eq!(demo.time_str, "10 Nov 09 23:00 UTC");
    assert_eq!(demo.duration, 605);
    assert_eq!(demo.duration_str, "10m5s");
    assert_eq!(demo.map_id, "wdm2");
    assert_eq!(demo.map_name, "Disposal Plant");
    assert!(demo.is_duel);
    assert_eq!(demo.player1, "Alice");
    assert_eq!(demo.player2, "Bob");
    assert_eq!((demo.score1, demo.score2), (16, 14));
}

#[test]
fn players_fall_back_to_configstrings() {
    let dir = tempfile::tempdir().unwrap();
    let pairs = vec![("gametype", "ca"), ("matchname", "Alice ^7vs Bob")];
    fs::write(dir.path().join("ca.wdz20"), demo_bytes(&pairs, CS_BODY)).unwrap();

    let demos = list_demos(dir.path()).unwrap();
    assert_eq!(demos.len(), 1);
    assert!(!demos[0].is_duel);
    assert_eq!(demos[0].player1, "CfgOne");
    assert_eq!(demos[0].player2, "CfgTwo");
}

#[test]
fn cache_hit_replaces_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let demo_path = dir.path().join("match.wdz20");
    fs::write(&demo_path, demo_bytes(&duel_pairs(), CS_BODY)).unwrap();

    let first = list_demos(dir.path()).unwrap();
    assert!(cache::cache_path(&demo_path).exists());

    // The source file changes but its artifact survives, so the old
    // metadata keeps being served until the artifact is removed.
    fs::write(&demo_path, demo_bytes(&[("hostname", "other")], CS_BODY)).unwrap();
    let second = list_demos(dir.path()).unwrap();
    assert_eq!(first, second);

    fs::remove_file(cache::cache_path(&demo_path)).unwrap();
    let third = list_demos(dir.path()).unwrap();
    assert_eq!(third[0].hostname, "other");
}

#[test]
fn corrupt_cache_artifact_degrades_to_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let demo_path = dir.path().join("match.wdz20");
    fs::write(&demo_path, demo_bytes(&duel_pairs(), CS_BODY)).unwrap();
    fs::write(cache::cache_path(&demo_path), b"{ truncated").unwrap();

    let demos = list_demos(dir.path()).unwrap();
    assert_eq!(demos.len(), 1);
    assert_eq!(demos[0].hostname, "warsow server");

    // the re-parse rewrote the artifact
    assert_eq!(cache::load(&demo_path).unwrap(), demos[0]);
}

#[test]
fn truncated_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("short.wdz20"), vec![0u8; 128]).unwrap();
    fs::write(
        dir.path().join("good.wdz20"),
        demo_bytes(&duel_pairs(), CS_BODY),
    )
    .unwrap();

    let demos = list_demos(dir.path()).unwrap();
    assert_eq!(demos.len(), 1);
    assert_eq!(demos[0].filename, "good.wdz20");
}

#[test]
fn undecodable_body_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = vec![0u8; GZIP_START];
    data.extend_from_slice(b"garbage, not gzip");
    fs::write(dir.path().join("broken.wdz20"), data).unwrap();

    let demos = list_demos(dir.path()).unwrap();
    assert!(demos.is_empty());
}

#[test]
fn empty_directory_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(list_demos(dir.path()).unwrap(), Vec::new());
}

#[test]
fn other_extensions_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
    fs::write(
        dir.path().join("match.wdz20"),
        demo_bytes(&duel_pairs(), CS_BODY),
    )
    .unwrap();

    let demos = list_demos(dir.path()).unwrap();
    assert_eq!(demos.len(), 1);
    // the run also produced an artifact, which must not be listed either
    assert!(cache::cache_path(&dir.path().join("match.wdz20")).exists());
    assert_eq!(list_demos(dir.path()).unwrap().len(), 1);
}

#[test]
fn missing_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    assert!(list_demos(dir.path().join("nope")).is_err());
}
