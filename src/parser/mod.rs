/// PHP parsing and AST extraction.
///
/// This module parses PHP source text with the mago_syntax parser and
/// turns every class-like declaration into an owned [`ClassInfo`], keeping
/// each method's raw docblock so that the reflector can read it later
/// without touching the AST again.
///
/// Sub-modules:
/// - [`classes`]: Class, interface, trait, and enum extraction
/// - [`use_statements`]: `use` statement extraction and name resolution
mod classes;
mod use_statements;

use std::collections::HashMap;
use std::panic;

use bumpalo::Bump;
use mago_syntax::ast::*;
use mago_syntax::parser::parse_file_content;

use crate::types::ClassInfo;

pub(crate) use use_statements::NameScope;

/// Context for reading docblock comments from the parsed program.
///
/// Bundles the program's trivia (comments/whitespace) and the raw source
/// text so that extraction functions can look up the `/** ... */` comment
/// preceding any AST node.
pub(crate) struct DocblockCtx<'a> {
    pub trivias: &'a [Trivia<'a>],
    pub content: &'a str,
}

/// Parse PHP source text and extract class-like information.
///
/// Returns a `ClassInfo` for every class, interface, trait, and enum found
/// at the top level or inside namespace declarations.  Names in `extends`,
/// `implements`, and trait `use` clauses come back fully-qualified.
///
/// The mago-syntax parser can panic on some malformed input, so the whole
/// parse is wrapped in `catch_unwind`; on panic the file yields no classes.
pub fn parse_php(content: &str) -> Vec<ClassInfo> {
    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        let arena = Bump::new();
        let file_id = mago_database::file::FileId::new("input.php");
        let program = parse_file_content(&arena, file_id, content);

        let doc_ctx = DocblockCtx {
            trivias: program.trivia.as_slice(),
            content,
        };

        let mut classes = Vec::new();
        extract_from_block(program.statements.iter(), None, &doc_ctx, &mut classes);
        classes
    }));

    match result {
        Ok(classes) => classes,
        Err(_) => {
            tracing::error!("phpantom_reflect: parser panicked in parse_php");
            Vec::new()
        }
    }
}

/// Walk one block of statements (the file body or a namespace body).
///
/// `use` imports are collected for the whole block before any class is
/// extracted, so imports written below a declaration still apply to it.
/// Both namespace forms are handled: the braced form nests its body, and
/// a bare `namespace Foo;` also applies to the sibling statements after it.
fn extract_from_block<'a>(
    statements: impl Iterator<Item = &'a Statement<'a>>,
    namespace: Option<String>,
    ctx: &DocblockCtx<'a>,
    classes: &mut Vec<ClassInfo>,
) {
    let statements: Vec<&Statement> = statements.collect();

    let mut use_map = HashMap::new();
    for statement in &statements {
        if let Statement::Use(use_stmt) = statement {
            use_statements::extract_use_items(&use_stmt.items, &mut use_map);
        }
    }

    let mut current_namespace = namespace;
    for statement in statements {
        match statement {
            Statement::Namespace(ns) => {
                let name = ns
                    .name
                    .as_ref()
                    .map(|ident| ident.value().to_string())
                    .filter(|name| !name.is_empty());
                extract_from_block(ns.statements().iter(), name.clone(), ctx, classes);
                current_namespace = name;
            }
            Statement::Class(_)
            | Statement::Interface(_)
            | Statement::Trait(_)
            | Statement::Enum(_) => {
                let scope = NameScope {
                    namespace: current_namespace.as_deref(),
                    use_map: &use_map,
                };
                if let Some(class) = classes::extract_class_like(statement, &scope, ctx) {
                    classes.push(class);
                }
            }
            _ => {}
        }
    }
}
