//! phpantom_reflect: docblock return types for PHP methods.
//!
//! PHP code written before native return types (or in spite of them)
//! documents what a method returns in its docblock:
//!
//! ```text
//! /**
//!  * @return User|null The user, if found.
//!  */
//! public function find($id) { ... }
//! ```
//!
//! This crate parses PHP sources into a [`ClassIndex`], binds a
//! [`MethodReflector`] to a method, and checks runtime values
//! ([`PhpValue`]) against the types the method's `@return` tag declares.
//! Undocumented methods fall back to the docblock of the same method on
//! an implemented interface.
//!
//! - [`parser`]: PHP source → [`ClassInfo`] via mago-syntax
//! - [`docblock`]: docblock lookup and `@return` extraction
//! - [`index`]: the class snapshot and its hierarchy queries
//! - [`reflector`]: the method reflector and conformance check
//! - [`value`]: runtime values and their `gettype()` names
//! - [`config`]: TOML configuration for the CLI

pub mod config;
pub mod docblock;
pub mod error;
pub mod index;
mod inheritance;
pub mod parser;
pub mod reflector;
pub mod types;
mod util;
pub mod value;

pub use config::Config;
pub use error::{ConfigError, ReflectionError};
pub use index::ClassIndex;
pub use reflector::{Conformance, MethodHandle, MethodReflector};
pub use types::{ClassInfo, ClassLikeKind, MethodInfo, Visibility};
pub use value::{ArrayKey, PhpObject, PhpValue};
