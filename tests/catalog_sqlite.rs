use std::path::Path;

use bannersmith::{BannerError, Catalog, RecordSet};
use rusqlite::Connection;

fn seed_db(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE Gonfalons (id INTEGER PRIMARY KEY, json TEXT);
        CREATE TABLE Decals (id INTEGER PRIMARY KEY, json TEXT);
        CREATE TABLE DecalPrimaryColors (id INTEGER PRIMARY KEY, json TEXT);
        CREATE TABLE GonfalonColors (id INTEGER PRIMARY KEY, json TEXT);

        INSERT INTO Gonfalons VALUES (-1, '{"foregroundImagePath":"/img/gonfalon.png"}');
        INSERT INTO Decals VALUES (7, '{"foregroundImagePath":"/img/decal_fg.png","backgroundImagePath":"/img/decal_bg.png"}');
        INSERT INTO DecalPrimaryColors VALUES (3, '{"red":"255","green":"0","blue":"64"}');
        INSERT INTO GonfalonColors VALUES (4, '{"red":"300","green":"0","blue":"0"}');
        "#,
    )
    .unwrap();
}

fn open_seeded() -> (tempfile::TempDir, Catalog) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.sqlite");
    seed_db(&path);
    (dir, Catalog::open(&path).unwrap())
}

#[test]
fn negative_stored_id_matches_wrapped_request() {
    let (_dir, catalog) = open_seeded();

    // Stored -1 is the signed encoding of the requested 4294967295.
    let record = catalog
        .art_record(RecordSet::Gonfalons, 4_294_967_295)
        .unwrap();
    assert_eq!(record.foreground_image_path, "/img/gonfalon.png");
}

#[test]
fn decal_record_carries_both_image_paths() {
    let (_dir, catalog) = open_seeded();

    let record = catalog.art_record(RecordSet::Decals, 7).unwrap();
    assert_eq!(record.foreground_image_path, "/img/decal_fg.png");
    assert_eq!(record.background_image_path.as_deref(), Some("/img/decal_bg.png"));
}

#[test]
fn color_record_decodes_to_opaque_rgba() {
    let (_dir, catalog) = open_seeded();

    let color = catalog.color(RecordSet::DecalPrimaryColors, 3).unwrap();
    assert_eq!(color.0, [255, 0, 64, 255]);
}

#[test]
fn missing_record_is_an_explicit_not_found() {
    let (_dir, catalog) = open_seeded();

    let err = catalog.art_record(RecordSet::Gonfalons, 12345).unwrap_err();
    assert!(matches!(err, BannerError::NotFound(_)));
    assert!(err.to_string().contains("Gonfalons"));
}

#[test]
fn malformed_color_component_is_a_database_error() {
    let (_dir, catalog) = open_seeded();

    let err = catalog.color(RecordSet::GonfalonColors, 4).unwrap_err();
    assert!(matches!(err, BannerError::Database(_)));
}

#[test]
fn missing_table_is_a_database_error() {
    let (_dir, catalog) = open_seeded();

    let err = catalog
        .art_record(RecordSet::GonfalonDetails, 1)
        .unwrap_err();
    assert!(matches!(err, BannerError::Database(_)));
}

#[test]
fn opening_a_missing_database_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.sqlite");
    assert!(matches!(
        Catalog::open(&missing),
        Err(BannerError::Database(_))
    ));
}
