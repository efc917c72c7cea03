//! Method return type reflection.
//!
//! A [`MethodReflector`] binds to one method of one class in a
//! [`ClassIndex`] and answers three questions about it:
//!
//! - which docblock documents it ([`MethodReflector::doc_comment`]),
//!   falling back to the interfaces of the declaring class when the method
//!   itself is undocumented;
//! - which return types that docblock declares
//!   ([`MethodReflector::return_types`]);
//! - whether a runtime value conforms to one of them
//!   ([`MethodReflector::is_valid_return_value`]).
//!
//! The doc comment and the return types are resolved on first use and
//! cached for the lifetime of the reflector.

use std::sync::OnceLock;

use serde::Serialize;
use tracing::debug;

use crate::docblock;
use crate::error::ReflectionError;
use crate::index::ClassIndex;
use crate::types::MethodInfo;
use crate::value::PhpValue;

/// A resolved reference to a method of a class.
#[derive(Debug, Clone, Serialize)]
pub struct MethodHandle {
    /// Fully-qualified name of the class the method was requested on.
    pub class: String,
    /// Fully-qualified name of the class that declares the method.  This
    /// is an ancestor for inherited methods, and the using class for
    /// methods imported from a trait.
    pub declaring_class: String,
    pub method: MethodInfo,
}

impl MethodHandle {
    pub fn name(&self) -> &str {
        &self.method.name
    }
}

/// Why a value was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Conformance {
    /// No return types are declared, so anything goes.
    Unconstrained,
    /// A `mixed` alternative accepted the value.
    Mixed,
    /// The value is an object and an `object` alternative accepted it.
    ObjectWildcard,
    /// The value is an instance of the first class-typed alternative.
    InstanceOf,
    /// The value is an object, but not an instance of the first
    /// alternative that was checked against it.
    NotInstanceOf,
    /// An alternative named the value's type.
    TypeName,
    /// No alternative accepted the value.
    NoMatch,
}

impl Conformance {
    pub fn is_valid(self) -> bool {
        !matches!(self, Conformance::NotInstanceOf | Conformance::NoMatch)
    }
}

pub struct MethodReflector<'a> {
    index: &'a ClassIndex,
    handle: MethodHandle,
    doc_comment: OnceLock<Option<String>>,
    return_types: OnceLock<Vec<String>>,
}

impl<'a> MethodReflector<'a> {
    /// Bind a reflector to `class::method`.
    ///
    /// Fails when the class is not in the index, or when neither the class,
    /// its traits, nor its ancestors declare the method.
    pub fn new(index: &'a ClassIndex, class: &str, method: &str) -> Result<Self, ReflectionError> {
        let class_info = index
            .find_class(class)
            .ok_or_else(|| ReflectionError::ClassNotFound(class.to_string()))?;

        let (declaring, method_info) =
            index
                .find_method(class_info, method)
                .ok_or_else(|| ReflectionError::MethodNotFound {
                    class: class_info.fqn.clone(),
                    method: method.to_string(),
                })?;

        Ok(Self {
            index,
            handle: MethodHandle {
                class: class_info.fqn.clone(),
                declaring_class: declaring.fqn.clone(),
                method: method_info.clone(),
            },
            doc_comment: OnceLock::new(),
            return_types: OnceLock::new(),
        })
    }

    pub fn handle(&self) -> &MethodHandle {
        &self.handle
    }

    /// The docblock documenting the method, if any.
    ///
    /// The method's own docblock is preferred.  Without one, the interfaces
    /// of the declaring class are searched in enumeration order and the
    /// first one declaring a documented method of the same name wins.
    pub fn doc_comment(&self) -> Option<&str> {
        self.doc_comment
            .get_or_init(|| self.resolve_doc_comment())
            .as_deref()
    }

    fn resolve_doc_comment(&self) -> Option<String> {
        if let Some(doc) = non_empty(&self.handle.method) {
            return Some(doc.to_string());
        }

        let declaring = self.index.find_class(&self.handle.declaring_class)?;
        for iface in self.index.interfaces_of(declaring) {
            let Some((_, method)) = self.index.find_method(iface, self.handle.name()) else {
                continue;
            };
            if let Some(doc) = non_empty(method) {
                debug!(
                    "docblock for {}::{} inherited from {}",
                    self.handle.class,
                    self.handle.name(),
                    iface.fqn
                );
                return Some(doc.to_string());
            }
        }

        debug!(
            "no docblock for {}::{}",
            self.handle.class,
            self.handle.name()
        );
        None
    }

    /// The alternatives of the `@return` tag, in declaration order.
    ///
    /// Empty when there is no docblock or no `@return` tag.
    pub fn return_types(&self) -> &[String] {
        self.return_types.get_or_init(|| {
            self.doc_comment()
                .map(docblock::parse_return_types)
                .unwrap_or_default()
        })
    }

    /// Whether `value` conforms to the declared return types.
    ///
    /// Undocumented methods accept everything.
    pub fn is_valid_return_value(&self, value: &PhpValue) -> bool {
        self.check(value).is_valid()
    }

    /// Check `value` against the declared return types and report which
    /// rule decided.
    ///
    /// Alternatives are tried in order.  For an object value, the first
    /// alternative that is neither `mixed` nor `object` decides the
    /// outcome through an instance check, even when it fails and a later
    /// alternative would have matched.
    pub fn check(&self, value: &PhpValue) -> Conformance {
        let declared = self.return_types();
        if declared.is_empty() {
            return Conformance::Unconstrained;
        }

        let actual = value.type_name();
        for token in declared {
            if token == "mixed" {
                return Conformance::Mixed;
            }

            if let Some(object) = value.as_object() {
                if token == "object" {
                    return Conformance::ObjectWildcard;
                }
                return if self.index.is_instance_of(&object.class, token) {
                    Conformance::InstanceOf
                } else {
                    Conformance::NotInstanceOf
                };
            }

            if canonical_type_name(token) == actual {
                return Conformance::TypeName;
            }
        }

        Conformance::NoMatch
    }
}

fn non_empty(method: &MethodInfo) -> Option<&str> {
    method.docblock.as_deref().filter(|doc| !doc.is_empty())
}

/// Map the short scalar spellings to the names `gettype()` uses.
fn canonical_type_name(token: &str) -> &str {
    match token {
        "int" => "integer",
        "bool" => "boolean",
        "float" => "double",
        other => other,
    }
}
