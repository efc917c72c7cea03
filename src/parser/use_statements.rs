/// `use` statement extraction and class name resolution.
///
/// This module builds a mapping of short (imported) names to their
/// fully-qualified equivalents and resolves the names written in
/// `extends`, `implements`, and trait `use` clauses against it.
use std::collections::HashMap;

use mago_syntax::ast::*;

use crate::util::{short_name, strip_fqn_prefix};

/// The namespace and imports in effect for a declaration.
pub(crate) struct NameScope<'s> {
    pub namespace: Option<&'s str>,
    /// Lower-cased alias → fully-qualified name.
    pub use_map: &'s HashMap<String, String>,
}

impl NameScope<'_> {
    /// The fully-qualified name of a class declared in this scope.
    pub fn qualify(&self, short: &str) -> String {
        match self.namespace {
            Some(ns) => format!("{}\\{}", ns, short),
            None => short.to_string(),
        }
    }

    /// Resolve a class name as written in source to its fully-qualified
    /// form (without a leading `\`).
    ///
    /// 1. `\Foo\Bar` is already fully-qualified.
    /// 2. `Foo\Bar` whose first segment is imported expands the import.
    /// 3. `Bar` that is imported becomes the import target.
    /// 4. Anything else is relative to the current namespace.
    pub fn resolve(&self, name: &str) -> String {
        if name.starts_with('\\') {
            return strip_fqn_prefix(name).to_string();
        }

        if let Some(pos) = name.find('\\') {
            let first = &name[..pos];
            let rest = &name[pos..];
            if let Some(fqn) = self.use_map.get(&first.to_ascii_lowercase()) {
                return format!("{}{}", fqn, rest);
            }
        } else if let Some(fqn) = self.use_map.get(&name.to_ascii_lowercase()) {
            return fqn.clone();
        }

        self.qualify(name)
    }
}

/// Extract individual use items from a `UseItems` node.
pub(crate) fn extract_use_items(items: &UseItems, use_map: &mut HashMap<String, String>) {
    match items {
        UseItems::Sequence(seq) => {
            for item in seq.items.iter() {
                register_use_item(item, None, use_map);
            }
        }
        UseItems::TypedSequence(seq) => {
            // Only class imports matter here.
            if seq.r#type.is_function() || seq.r#type.is_const() {
                return;
            }
            for item in seq.items.iter() {
                register_use_item(item, None, use_map);
            }
        }
        UseItems::TypedList(list) => {
            if list.r#type.is_function() || list.r#type.is_const() {
                return;
            }
            let prefix = list.namespace.value();
            for item in list.items.iter() {
                register_use_item(item, Some(prefix), use_map);
            }
        }
        UseItems::MixedList(list) => {
            let prefix = list.namespace.value();
            for maybe_typed in list.items.iter() {
                if let Some(ref t) = maybe_typed.r#type
                    && (t.is_function() || t.is_const())
                {
                    continue;
                }
                register_use_item(&maybe_typed.item, Some(prefix), use_map);
            }
        }
    }
}

/// Register a single `UseItem` into the use_map.
///
/// If `group_prefix` is `Some`, the item name is relative to that prefix
/// (`use Foo\{Bar}` gives `"Foo\Bar"`).
fn register_use_item(
    item: &UseItem,
    group_prefix: Option<&str>,
    use_map: &mut HashMap<String, String>,
) {
    let item_name = strip_fqn_prefix(item.name.value());

    let fqn = match group_prefix {
        Some(prefix) => format!("{}\\{}", strip_fqn_prefix(prefix), item_name),
        None => item_name.to_string(),
    };

    let alias = match item.alias {
        Some(ref alias) => alias.identifier.value.to_string(),
        None => short_name(&fqn).to_string(),
    };

    use_map.insert(alias.to_ascii_lowercase(), fqn);
}
