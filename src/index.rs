/// The class index: an immutable snapshot of class metadata.
///
/// The index stands in for a live runtime's reflection facility.  It is
/// built once, from inline sources or from PHP files on disk, and only
/// read afterwards.  Hierarchy queries (method lookup, interface
/// enumeration, `instanceof`) live in the `inheritance` module.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, info, warn};

use crate::parser::parse_php;
use crate::types::ClassInfo;
use crate::util::class_key;

#[derive(Debug, Default, Clone)]
pub struct ClassIndex {
    /// Lower-cased fully-qualified name → class-like.
    classes: HashMap<String, ClassInfo>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from in-memory sources, given as `(label, content)`
    /// pairs.  The label is only used for logging.
    pub fn from_sources<'s>(sources: impl IntoIterator<Item = (&'s str, &'s str)>) -> Self {
        let mut index = Self::new();
        for (label, content) in sources {
            index.add_source(label, content);
        }
        index
    }

    /// Build an index from every `.php` file under the given paths.
    ///
    /// Directories are walked recursively, honouring `.ignore` files (and
    /// `.gitignore` inside git repositories) and skipping hidden entries.
    /// Plain file paths are read directly.  Files that cannot be read are
    /// logged and skipped.
    pub fn load_paths(paths: &[PathBuf]) -> Self {
        let mut index = Self::new();
        for path in paths {
            index.load_path(path);
        }
        if index.is_empty() {
            warn!("no PHP classes found under {:?}", paths);
        } else {
            info!(classes = index.len(), "class index loaded");
        }
        index
    }

    fn load_path(&mut self, root: &Path) {
        for entry in WalkBuilder::new(root).build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable path under {}: {}", root.display(), err);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "php") {
                continue;
            }

            match std::fs::read_to_string(path) {
                Ok(content) => self.add_source(&path.display().to_string(), &content),
                Err(err) => warn!("skipping {}: {}", path.display(), err),
            }
        }
    }

    /// Parse a PHP source and add every class-like it declares.
    pub fn add_source(&mut self, label: &str, content: &str) {
        let classes = parse_php(content);
        debug!(source = label, count = classes.len(), "parsed classes");
        for class in classes {
            self.insert(class);
        }
    }

    /// Add a single class-like.
    ///
    /// PHP cannot redeclare a class, so the first declaration of a name is
    /// kept and later ones are ignored.
    pub fn insert(&mut self, class: ClassInfo) {
        let key = class_key(&class.fqn);
        if self.classes.contains_key(&key) {
            warn!("ignoring duplicate declaration of {}", class.fqn);
            return;
        }
        self.classes.insert(key, class);
    }

    /// Look up a class-like by name.
    ///
    /// The name is matched case-insensitively against fully-qualified
    /// names; a leading `\` is ignored.
    pub fn find_class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(&class_key(name))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
