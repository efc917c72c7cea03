#![allow(dead_code)]

use std::fs;

use phpantom_reflect::{ClassIndex, MethodReflector};

/// Build an index from a single inline PHP source.
pub fn index_from(php: &str) -> ClassIndex {
    ClassIndex::from_sources([("test.php", php)])
}

/// Build a reflector, panicking if the method cannot be found.
pub fn reflect<'a>(index: &'a ClassIndex, class: &str, method: &str) -> MethodReflector<'a> {
    MethodReflector::new(index, class, method)
        .unwrap_or_else(|err| panic!("failed to reflect {class}::{method}: {err}"))
}

/// Helper: create a temp workspace containing the given files and return
/// it so it stays alive for the duration of the test.
pub fn create_workspace(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (rel_path, content) in files {
        let full = dir.path().join(rel_path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create dirs");
        }
        fs::write(&full, content).expect("failed to write file");
    }
    dir
}
