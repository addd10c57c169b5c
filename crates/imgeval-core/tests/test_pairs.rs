use std::fs;

use tempfile::TempDir;

use imgeval_core::model::ImagePair;
use imgeval_core::pairs::discover_pairs;

fn touch(dir: &TempDir, name: &str) {
    fs::write(dir.path().join(name), b"x").unwrap();
}

#[test]
fn test_pairs_matched_by_name_without_marker() {
    let dir = TempDir::new().unwrap();
    for name in [
        "scene_A_01.png",
        "scene_B_01.png",
        "scene_A_02.jpg",
        "scene_B_02.jpg",
        "scene_A_03.png",
        "notes_A_.txt",
    ] {
        touch(&dir, name);
    }
    fs::create_dir(dir.path().join("sub_A_dir.png")).unwrap();

    let pairs = discover_pairs(dir.path()).unwrap();
    assert_eq!(
        pairs,
        vec![
            ImagePair::new("scene_A_01.png", "scene_B_01.png"),
            ImagePair::new("scene_A_02.jpg", "scene_B_02.jpg"),
        ]
    );
}

#[test]
fn test_extension_must_match_too() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "x_A_1.png");
    touch(&dir, "x_B_1.jpg");
    assert!(discover_pairs(dir.path()).unwrap().is_empty());
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(discover_pairs(&dir.path().join("absent")).is_err());
}
