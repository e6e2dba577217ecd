use std::fs;

use singscore::catalog::{Catalog, CatalogError};

const CATALOG_JSON: &str = r#"{
    "songs": {
        "jianjia": {
            "title": "Jian Jia",
            "segments": {
                "1": "jianjia/jianjia-1.mp3",
                "2": "jianjia/jianjia-2.mp3"
            }
        },
        "look": {
            "title": "Wang Hai Chao",
            "segments": {
                "1": "look/look-1.mp3"
            }
        }
    }
}"#;

#[test]
fn loads_catalog_and_resolves_relative_to_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, CATALOG_JSON).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let resolved = catalog.resolve("jianjia", "2").unwrap();
    assert_eq!(resolved.title, "Jian Jia");
    assert_eq!(resolved.path, dir.path().join("jianjia/jianjia-2.mp3"));
}

#[test]
fn lists_all_registered_songs() {
    let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
    let ids: Vec<&str> = catalog.songs().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["jianjia", "look"]);
}

#[test]
fn unknown_song_and_segment_are_distinct_errors() {
    let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
    assert!(matches!(
        catalog.resolve("nope", "1"),
        Err(CatalogError::UnknownSong(_))
    ));
    assert!(matches!(
        catalog.resolve("look", "9"),
        Err(CatalogError::UnknownSegment { .. })
    ));
}

#[test]
fn missing_catalog_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(Catalog::load(&missing).is_err());
}

#[test]
fn malformed_catalog_reports_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, "{ definitely not json").unwrap();
    let err = Catalog::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("catalog"));
}
