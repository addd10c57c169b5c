use std::path::Path;

use tracing::debug;

use crate::consts::IMAGE_EXTENSIONS;
use crate::error::Result;
use crate::model::ImagePair;

const A_MARKER: &str = "_A_";
const B_MARKER: &str = "_B_";

fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Pair `*_A_*` files with `*_B_*` files in `dir`.
///
/// An A file matches the first B file (in sorted order) whose name with `_B_`
/// removed equals the A name with `_A_` removed. A files with no match are
/// left out.
pub fn discover_pairs(dir: &Path) -> Result<Vec<ImagePair>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_image(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();

    let a_files: Vec<&String> = names.iter().filter(|n| n.contains(A_MARKER)).collect();
    let b_files: Vec<&String> = names.iter().filter(|n| n.contains(B_MARKER)).collect();

    let mut pairs = Vec::new();
    for a in a_files {
        let key = a.replace(A_MARKER, "");
        match b_files.iter().find(|b| b.replace(B_MARKER, "") == key) {
            Some(b) => pairs.push(ImagePair::new(a.as_str(), b.as_str())),
            None => debug!(a = %a, "No B image for A image"),
        }
    }
    Ok(pairs)
}
