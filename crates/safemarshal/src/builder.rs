// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for declaring record types at runtime.

use crate::descriptor::{
    FieldDescriptor, PrimitiveKind, TypeDescriptor, TypeKey, UnsupportedKind,
};
use std::sync::Arc;

/// Builder for record [`TypeDescriptor`]s.
///
/// Use [`link_field`](Self::link_field) to refer to another declared type by
/// key; register both types in a registry to classify the resulting graph.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptorBuilder {
    /// Create a new builder for a record type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a primitive field.
    pub fn field(self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::primitive(kind)))
    }

    /// Add a field with a type descriptor.
    pub fn field_with_type(
        mut self,
        name: impl Into<String>,
        type_desc: Arc<TypeDescriptor>,
    ) -> Self {
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add a string field.
    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, PrimitiveKind::String)
    }

    /// Add a field holding an indirection to `target`.
    pub fn pointer_field(self, name: impl Into<String>, target: Arc<TypeDescriptor>) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::pointer(target)))
    }

    /// Add a sequence field.
    pub fn sequence_field(self, name: impl Into<String>, element: Arc<TypeDescriptor>) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::sequence(element)))
    }

    /// Add an array field.
    pub fn array_field(
        self,
        name: impl Into<String>,
        element: Arc<TypeDescriptor>,
        length: usize,
    ) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::array(element, length)))
    }

    /// Add a map field.
    pub fn map_field(
        self,
        name: impl Into<String>,
        key_type: Arc<TypeDescriptor>,
        value_type: Arc<TypeDescriptor>,
    ) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::map(key_type, value_type)))
    }

    /// Add a field that points at the declared type `target`.
    ///
    /// The target is resolved through a registry at classification time, so
    /// it may be the type being built.
    pub fn link_field(self, name: impl Into<String>, target: impl Into<TypeKey>) -> Self {
        let link = Arc::new(TypeDescriptor::link(target));
        self.pointer_field(name, link)
    }

    /// Add an unconstrained field.
    pub fn any_field(self, name: impl Into<String>) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::any()))
    }

    pub fn unsupported_field(self, name: impl Into<String>, kind: UnsupportedKind) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::unsupported(kind)))
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::struct_type(self.name, self.fields)
    }
}
