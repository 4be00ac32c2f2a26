// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encodability classifier.
//!
//! A type is *safe* when every value it can hold encodes to text without loss
//! or encoder failure. The verdict depends on the type graph only; values are
//! never read. It is conservative: an unconstrained field makes its type
//! unsafe even if the value it holds today would encode fine.

use crate::describe::Describe;
use crate::descriptor::{TypeDescriptor, TypeKey, TypeKind};
use crate::registry::{HashMapTypeRegistry, TypeRegistry};

/// Returns `true` if every value of `T` is guaranteed to encode.
///
/// Only the type of `value` is inspected.
///
/// ```
/// use safemarshal::{is_safe, Describe};
/// use std::any::Any;
///
/// #[derive(Describe)]
/// struct Safe {
///     field: String,
/// }
///
/// #[derive(Describe)]
/// struct Unsafe {
///     field: Box<dyn Any>,
/// }
///
/// assert!(is_safe(&Safe { field: String::new() }));
/// assert!(!is_safe(&Unsafe { field: Box::new(1u8) }));
/// ```
pub fn is_safe<T: Describe + ?Sized>(_value: &T) -> bool {
    is_safe_type::<T>()
}

/// Returns `true` if every value of `T` is guaranteed to encode.
pub fn is_safe_type<T: Describe + ?Sized>() -> bool {
    let mut registry = HashMapTypeRegistry::new();
    let root = T::describe(&mut registry);
    is_safe_descriptor(Some(root.as_ref()), &registry)
}

/// Classify an explicit descriptor graph.
///
/// Links are resolved through `registry`. An absent root has no type to
/// inspect and is safe.
pub fn is_safe_descriptor<R: TypeRegistry + ?Sized>(
    root: Option<&TypeDescriptor>,
    registry: &R,
) -> bool {
    let Some(root) = root else {
        return true;
    };
    let safe = !is_unsafe(root, registry, None);
    log::debug!("{} classified {}", root.name, if safe { "safe" } else { "unsafe" });
    safe
}

/// Declared types on the path from the root to the current node.
///
/// Each frame borrows its parent, so a branch only ever sees its own
/// ancestors and siblings never share history.
struct Path<'a> {
    key: &'a TypeKey,
    parent: Option<&'a Path<'a>>,
}

impl Path<'_> {
    fn contains(&self, key: &TypeKey) -> bool {
        let mut frame = Some(self);
        while let Some(current) = frame {
            if current.key == key {
                return true;
            }
            frame = current.parent;
        }
        false
    }
}

fn is_unsafe<R: TypeRegistry + ?Sized>(
    desc: &TypeDescriptor,
    registry: &R,
    path: Option<&Path<'_>>,
) -> bool {
    let desc = match &desc.kind {
        TypeKind::Link(key) => match registry.lookup(key) {
            Some(target) if key.is_declared() && !target.is_link() => target.as_ref(),
            _ => {
                log::warn!("unresolved type link {}", key);
                return true;
            }
        },
        _ => desc,
    };

    // Every cycle goes through a link, and links only name declared types, so
    // structural keys never need to join the path.
    let frame;
    let path = if desc.key.is_declared() {
        if path.is_some_and(|p| p.contains(&desc.key)) {
            return false;
        }
        frame = Path {
            key: &desc.key,
            parent: path,
        };
        Some(&frame)
    } else {
        path
    };

    match &desc.kind {
        TypeKind::Primitive(_) => false,
        TypeKind::Pointer(element) => is_unsafe(element, registry, path),
        TypeKind::Sequence(seq) => is_unsafe(&seq.element_type, registry, path),
        TypeKind::Array(arr) => is_unsafe(&arr.element_type, registry, path),
        TypeKind::Map(map) => {
            is_unsafe(&map.key_type, registry, path) || is_unsafe(&map.value_type, registry, path)
        }
        TypeKind::Struct(fields) => fields
            .iter()
            .any(|field| is_unsafe(&field.type_desc, registry, path)),
        TypeKind::Union(cases) => cases
            .iter()
            .any(|case| is_unsafe(&case.type_desc, registry, path)),
        // Links never reach here: they are resolved or rejected above.
        TypeKind::Any | TypeKind::Unsupported(_) | TypeKind::Link(_) => {
            log::trace!("unsafe leaf {}", desc.name);
            true
        }
    }
}
