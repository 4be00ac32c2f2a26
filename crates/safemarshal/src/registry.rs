// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declared-type registry.
//!
//! Descriptors are plain values, so a recursive type cannot contain itself.
//! Where a type graph closes on itself, the descriptor holds a
//! [`TypeKind::Link`] naming the declared type instead, and the classifier
//! resolves that link through a [`TypeRegistry`].

use crate::descriptor::{TypeDescriptor, TypeKey, TypeKind};
use crate::describe::Describe;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Errors raised while registering descriptors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A different descriptor is already registered under this key.
    #[error("conflicting descriptor for declared type `{key}`")]
    Conflict { key: TypeKey },
}

/// Registry that resolves a [`TypeKey`] to its declared [`TypeDescriptor`].
pub trait TypeRegistry {
    /// Look up a descriptor by key.
    ///
    /// Returns `None` if the key is unknown.
    fn lookup(&self, key: &TypeKey) -> Option<&Arc<TypeDescriptor>>;
}

/// Simple [`HashMap`]-backed [`TypeRegistry`].
///
/// Also acts as the context for [`Describe`]: derived impls register their
/// type here and use it to detect that a type is already being described
/// further up the stack.
#[derive(Debug, Default)]
pub struct HashMapTypeRegistry {
    types: HashMap<TypeKey, Arc<TypeDescriptor>>,
    pending: HashSet<TypeKey>,
}

impl HashMapTypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declared type under its own key.
    ///
    /// Registering an identical descriptor twice is a no-op.
    pub fn register(&mut self, descriptor: Arc<TypeDescriptor>) -> Result<(), RegistryError> {
        match self.types.get(&descriptor.key) {
            Some(existing) if existing == &descriptor => Ok(()),
            Some(_) => Err(RegistryError::Conflict {
                key: descriptor.key.clone(),
            }),
            None => {
                self.types.insert(descriptor.key.clone(), descriptor);
                Ok(())
            }
        }
    }

    /// Describe `T` into this registry.
    pub fn describe<T: Describe + ?Sized>(&mut self) -> Arc<TypeDescriptor> {
        T::describe(self)
    }

    /// Describe the declared type `T`, building it at most once.
    ///
    /// If `T` is already registered, the registered descriptor is returned.
    /// If `T` is being built further up the stack, a [`TypeKind::Link`] to it
    /// is returned instead; this is where recursive types close.
    pub fn declare<T: ?Sized>(
        &mut self,
        name: &str,
        build: impl FnOnce(&mut Self) -> TypeKind,
    ) -> Arc<TypeDescriptor> {
        let key = TypeKey::of::<T>();
        if let Some(existing) = self.types.get(&key) {
            return Arc::clone(existing);
        }
        if !self.pending.insert(key.clone()) {
            log::trace!("closing cycle on {}", key);
            return Arc::new(TypeDescriptor::new(key.clone(), name, TypeKind::Link(key)));
        }

        let kind = build(self);
        self.pending.remove(&key);

        let descriptor = Arc::new(TypeDescriptor::new(key.clone(), name, kind));
        self.types.insert(key, Arc::clone(&descriptor));
        descriptor
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeRegistry for HashMapTypeRegistry {
    fn lookup(&self, key: &TypeKey) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(key)
    }
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for &R {
    fn lookup(&self, key: &TypeKey) -> Option<&Arc<TypeDescriptor>> {
        (**self).lookup(key)
    }
}
