/// Class, interface, trait, and enum extraction.
///
/// Each class-like declaration is tagged with a [`ClassLikeKind`] and
/// reduced to what reflection needs: its fully-qualified name, the names
/// it inherits from, and its methods together with their raw docblocks.
use mago_syntax::ast::*;

use crate::docblock;
use crate::types::{ClassInfo, ClassLikeKind, MethodInfo, Visibility};

use super::{DocblockCtx, NameScope};

/// Build a `ClassInfo` from a class-like statement.
///
/// Returns `None` for any other statement kind.
pub(crate) fn extract_class_like<'a>(
    statement: &'a Statement<'a>,
    scope: &NameScope<'_>,
    ctx: &DocblockCtx<'a>,
) -> Option<ClassInfo> {
    let (kind, name, parent_class, interfaces, members) = match statement {
        Statement::Class(class) => {
            let parent_class = class
                .extends
                .as_ref()
                .and_then(|ext| ext.types.first().map(|ident| scope.resolve(ident.value())));
            let interfaces = class
                .implements
                .as_ref()
                .map(|imp| imp.types.iter().map(|ident| scope.resolve(ident.value())).collect())
                .unwrap_or_default();
            (
                ClassLikeKind::Class,
                class.name.value,
                parent_class,
                interfaces,
                class.members.iter().collect::<Vec<_>>(),
            )
        }
        Statement::Interface(iface) => {
            // Interfaces may extend several parents; all of them are
            // recorded as interfaces.
            let interfaces = iface
                .extends
                .as_ref()
                .map(|ext| ext.types.iter().map(|ident| scope.resolve(ident.value())).collect())
                .unwrap_or_default();
            (
                ClassLikeKind::Interface,
                iface.name.value,
                None,
                interfaces,
                iface.members.iter().collect(),
            )
        }
        Statement::Trait(trait_def) => (
            ClassLikeKind::Trait,
            trait_def.name.value,
            None,
            Vec::new(),
            trait_def.members.iter().collect(),
        ),
        Statement::Enum(enum_def) => {
            let interfaces = enum_def
                .implements
                .as_ref()
                .map(|imp| imp.types.iter().map(|ident| scope.resolve(ident.value())).collect())
                .unwrap_or_default();
            (
                ClassLikeKind::Enum,
                enum_def.name.value,
                None,
                interfaces,
                enum_def.members.iter().collect(),
            )
        }
        _ => return None,
    };

    let (methods, used_traits) = extract_class_like_members(members.into_iter(), scope, ctx);

    Some(ClassInfo {
        kind,
        name: name.to_string(),
        fqn: scope.qualify(name),
        parent_class,
        interfaces,
        used_traits,
        methods,
    })
}

/// Extract methods and used trait names from class-like members.
///
/// Shared by every class-like kind since all use the same
/// `ClassLikeMember` representation.
fn extract_class_like_members<'a>(
    members: impl Iterator<Item = &'a ClassLikeMember<'a>>,
    scope: &NameScope<'_>,
    ctx: &DocblockCtx<'a>,
) -> (Vec<MethodInfo>, Vec<String>) {
    let mut methods = Vec::new();
    let mut used_traits = Vec::new();

    for member in members {
        match member {
            ClassLikeMember::Method(method) => {
                let docblock =
                    docblock::get_docblock_text_for_node(ctx.trivias, ctx.content, method)
                        .map(str::to_string);

                methods.push(MethodInfo {
                    name: method.name.value.to_string(),
                    visibility: extract_visibility(method.modifiers.iter()),
                    is_static: method.modifiers.iter().any(|m| m.is_static()),
                    docblock,
                });
            }
            ClassLikeMember::TraitUse(trait_use) => {
                for trait_name in trait_use.trait_names.iter() {
                    used_traits.push(scope.resolve(trait_name.value()));
                }
            }
            _ => {}
        }
    }

    (methods, used_traits)
}

/// Extract visibility from a set of modifiers.
/// Defaults to `Public` if no visibility modifier is present.
fn extract_visibility<'a>(modifiers: impl Iterator<Item = &'a Modifier<'a>>) -> Visibility {
    for m in modifiers {
        if m.is_private() {
            return Visibility::Private;
        }
        if m.is_protected() {
            return Visibility::Protected;
        }
        if m.is_public() {
            return Visibility::Public;
        }
    }
    Visibility::Public
}
