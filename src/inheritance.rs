/// Class hierarchy queries over the [`ClassIndex`].
///
/// This module answers the questions a runtime's reflection API would:
/// where a method of a class is actually declared, which interfaces a
/// class implements (and in which order), and whether a class is an
/// instance of a given type name.
///
/// Method lookup follows PHP precedence:
///
///   class own > traits > parent chain > interfaces
///
/// A depth limit of 20 prevents infinite loops from circular inheritance.
use crate::index::ClassIndex;
use crate::types::{ClassInfo, MethodInfo};
use crate::util::class_key;

const MAX_DEPTH: u32 = 20;

impl ClassIndex {
    /// Find the method `name` as seen from `class`.
    ///
    /// Returns the declaring class-like together with the method.  Methods
    /// pulled in from a trait report the class using the trait as the
    /// declaring class, since that is where PHP copies them.  A method an
    /// abstract class inherits from an interface without implementing it
    /// reports the interface.  For interfaces, parent interfaces are
    /// searched instead of a parent class.
    pub fn find_method<'a>(
        &'a self,
        class: &'a ClassInfo,
        name: &str,
    ) -> Option<(&'a ClassInfo, &'a MethodInfo)> {
        if class.is_interface() {
            if let Some(method) = class.own_method(name) {
                return Some((class, method));
            }
            return self.find_interface_method(class, name, 0);
        }

        self.find_class_method(class, name).or_else(|| {
            // Abstract classes expose interface methods they never implement.
            self.interfaces_of(class)
                .into_iter()
                .find_map(|iface| iface.own_method(name).map(|method| (iface, method)))
        })
    }

    /// Walk the class itself, its traits and its parent chain.
    fn find_class_method<'a>(
        &'a self,
        class: &'a ClassInfo,
        name: &str,
    ) -> Option<(&'a ClassInfo, &'a MethodInfo)> {
        let mut current = class;
        for _ in 0..=MAX_DEPTH {
            if let Some(method) = current.own_method(name) {
                return Some((current, method));
            }

            if let Some(method) = self.find_trait_method(&current.used_traits, name, 0) {
                return Some((current, method));
            }

            current = self.find_class(current.parent_class.as_deref()?)?;
        }
        None
    }

    /// Search the given traits (and the traits they use) for a method.
    fn find_trait_method(&self, traits: &[String], name: &str, depth: u32) -> Option<&MethodInfo> {
        if depth > MAX_DEPTH {
            return None;
        }
        for trait_name in traits {
            let Some(trait_info) = self.find_class(trait_name) else {
                continue;
            };
            if let Some(method) = trait_info.own_method(name) {
                return Some(method);
            }
            if let Some(method) = self.find_trait_method(&trait_info.used_traits, name, depth + 1)
            {
                return Some(method);
            }
        }
        None
    }

    /// Search the parent interfaces of `iface` depth-first, in declaration
    /// order.
    fn find_interface_method<'a>(
        &'a self,
        iface: &'a ClassInfo,
        name: &str,
        depth: u32,
    ) -> Option<(&'a ClassInfo, &'a MethodInfo)> {
        if depth > MAX_DEPTH {
            return None;
        }
        for parent_name in &iface.interfaces {
            let Some(parent) = self.find_class(parent_name) else {
                continue;
            };
            if let Some(method) = parent.own_method(name) {
                return Some((parent, method));
            }
            if let Some(found) = self.find_interface_method(parent, name, depth + 1) {
                return Some(found);
            }
        }
        None
    }

    /// All interfaces implemented by `class`, in the order PHP's
    /// `ReflectionClass::getInterfaces()` reports them.
    ///
    /// The parent class's interfaces come first.  Then each declared
    /// interface is followed by the interfaces it extends.  Duplicates are
    /// skipped, as are names missing from the index.  For an interface
    /// this is every interface it extends, directly or not.
    pub fn interfaces_of<'a>(&'a self, class: &'a ClassInfo) -> Vec<&'a ClassInfo> {
        let mut out = Vec::new();
        self.collect_interfaces(class, &mut out, 0);
        out
    }

    fn collect_interfaces<'a>(
        &'a self,
        class: &'a ClassInfo,
        out: &mut Vec<&'a ClassInfo>,
        depth: u32,
    ) {
        if depth > MAX_DEPTH {
            return;
        }

        if let Some(parent) = class.parent_class.as_deref().and_then(|p| self.find_class(p)) {
            self.collect_interfaces(parent, out, depth + 1);
        }

        for name in &class.interfaces {
            let Some(iface) = self.find_class(name) else {
                continue;
            };
            push_unique(out, iface);
            self.collect_interfaces(iface, out, depth + 1);
        }
    }

    /// Whether an instance of `class_name` satisfies `instanceof target`.
    ///
    /// True when `target` names the class itself, one of its ancestors, or
    /// one of its interfaces.  Names are compared case-insensitively with
    /// any leading `\` removed.  A class missing from the index can still
    /// match its own name; a target missing from the index never matches
    /// anything else.
    pub fn is_instance_of(&self, class_name: &str, target: &str) -> bool {
        let target_key = class_key(target);
        if target_key.is_empty() {
            return false;
        }
        if class_key(class_name) == target_key {
            return true;
        }

        let Some(class) = self.find_class(class_name) else {
            return false;
        };

        let mut current = class;
        for _ in 0..MAX_DEPTH {
            let Some(parent) = current.parent_class.as_deref().and_then(|p| self.find_class(p))
            else {
                break;
            };
            if class_key(&parent.fqn) == target_key {
                return true;
            }
            current = parent;
        }

        self.interfaces_of(class)
            .iter()
            .any(|iface| class_key(&iface.fqn) == target_key)
    }
}

fn push_unique<'a>(out: &mut Vec<&'a ClassInfo>, class: &'a ClassInfo) {
    if !out.iter().any(|c| std::ptr::eq(*c, class)) {
        out.push(class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fqns(classes: &[&ClassInfo]) -> Vec<String> {
        classes.iter().map(|c| c.fqn.clone()).collect()
    }

    #[test]
    fn interface_order_puts_parent_interfaces_first() {
        let index = ClassIndex::from_sources([(
            "a.php",
            concat!(
                "<?php\n",
                "interface Base {}\n",
                "interface Readable extends Base {}\n",
                "interface Writable {}\n",
                "interface Countable {}\n",
                "class Stream implements Countable {}\n",
                "class File extends Stream implements Readable, Writable, Countable {}\n",
            ),
        )]);

        let file = index.find_class("File").unwrap();
        assert_eq!(
            fqns(&index.interfaces_of(file)),
            vec!["Countable", "Readable", "Base", "Writable"]
        );
    }

    #[test]
    fn trait_methods_are_declared_by_the_using_class() {
        let index = ClassIndex::from_sources([(
            "a.php",
            concat!(
                "<?php\n",
                "trait Greets { public function hello() {} }\n",
                "class Base { use Greets; }\n",
                "class Child extends Base {}\n",
            ),
        )]);

        let child = index.find_class("Child").unwrap();
        let (declaring, method) = index.find_method(child, "HELLO").unwrap();
        assert_eq!(declaring.fqn, "Base");
        assert_eq!(method.name, "hello");
    }

    #[test]
    fn unimplemented_interface_method_is_declared_by_the_interface() {
        let index = ClassIndex::from_sources([(
            "a.php",
            concat!(
                "<?php\n",
                "interface Sized { public function size(); }\n",
                "abstract class Base implements Sized {}\n",
                "abstract class Middle extends Base {}\n",
            ),
        )]);

        let middle = index.find_class("Middle").unwrap();
        let (declaring, method) = index.find_method(middle, "size").unwrap();
        assert_eq!(declaring.fqn, "Sized");
        assert_eq!(method.name, "size");
    }

    #[test]
    fn circular_hierarchy_terminates() {
        let index = ClassIndex::from_sources([(
            "a.php",
            "<?php\nclass A extends B {}\nclass B extends A {}\n",
        )]);

        let a = index.find_class("A").unwrap();
        assert!(index.find_method(a, "missing").is_none());
        assert!(!index.is_instance_of("A", "C"));
        assert!(index.is_instance_of("A", "B"));
    }

    #[test]
    fn instance_of_unknown_class_matches_only_itself() {
        let index = ClassIndex::new();
        assert!(index.is_instance_of("stdClass", "\\stdclass"));
        assert!(!index.is_instance_of("stdClass", "object"));
        assert!(!index.is_instance_of("stdClass", ""));
    }
}
