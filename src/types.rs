//! Data types used throughout phpantom_reflect.
//!
//! This module contains the "model" structs and enums that represent
//! class metadata extracted from PHP source (classes, interfaces, traits,
//! enums and their methods).  Together they form the snapshot that the
//! reflector queries in place of a live PHP runtime.

use serde::Serialize;

/// Visibility of a method.
///
/// In PHP, members without an explicit visibility modifier default to `Public`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// The syntactic kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLikeKind {
    Class,
    Interface,
    Trait,
    Enum,
}

/// Stores extracted method information from a parsed PHP class-like.
#[derive(Debug, Clone, Serialize)]
pub struct MethodInfo {
    /// The method name as declared (e.g. "findUser").
    pub name: String,
    /// Visibility of the method (public, protected, or private).
    pub visibility: Visibility,
    /// Whether the method is static.
    pub is_static: bool,
    /// The raw `/** ... */` comment attached to the declaration, delimiters
    /// included, exactly as it appears in the source.
    pub docblock: Option<String>,
}

/// Stores extracted class-like information from a parsed PHP file.
/// All data is owned so we don't depend on the parser's arena lifetime.
#[derive(Debug, Clone)]
pub struct ClassInfo {
    /// Whether this is a class, interface, trait, or enum.
    pub kind: ClassLikeKind,
    /// The short name of the class (e.g. "User").
    pub name: String,
    /// The fully-qualified name without a leading `\` (e.g. "App\Models\User").
    pub fqn: String,
    /// The fully-qualified parent class from the `extends` clause, if any.
    /// Always `None` for interfaces, whose parents live in `interfaces`.
    pub parent_class: Option<String>,
    /// Fully-qualified names from the `implements` clause, or from the
    /// `extends` clause when this is an interface.  Declaration order.
    pub interfaces: Vec<String>,
    /// Fully-qualified names of traits pulled in with `use`.
    pub used_traits: Vec<String>,
    /// The methods declared directly in this class-like.
    pub methods: Vec<MethodInfo>,
}

impl ClassInfo {
    /// Find a method declared directly on this class-like.
    ///
    /// PHP method names are case-insensitive.
    pub fn own_method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassLikeKind::Interface
    }
}
