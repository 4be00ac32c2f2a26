// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # safemarshal
//!
//! Static encodability checks for serde-style text encoders.
//!
//! [`is_safe`] decides, from a value's *type* alone, whether every value of
//! that type can be encoded without loss or encoder failure. Types that may
//! hold anything at runtime ([`std::any::Any`]), functions, channels, locks
//! and the like are rejected wherever they occur in the type graph.
//! Recursive types are handled: a declared type met again on the same path
//! contributes nothing new.
//!
//! ## Quick Start
//!
//! ```rust
//! use safemarshal::{is_safe, is_safe_type, Describe};
//! use std::any::Any;
//!
//! #[derive(Describe)]
//! struct Tree {
//!     label: String,
//!     children: Vec<Tree>,
//! }
//!
//! #[derive(Describe)]
//! struct Envelope {
//!     id: u64,
//!     payload: Box<dyn Any>,
//! }
//!
//! assert!(is_safe_type::<Tree>());
//! assert!(!is_safe_type::<Envelope>());
//! assert!(is_safe(&vec![1u8, 2, 3]));
//! ```
//!
//! ## Runtime-declared types
//!
//! ```rust
//! use safemarshal::{is_safe_descriptor, HashMapTypeRegistry, PrimitiveKind, TypeDescriptorBuilder};
//! use std::sync::Arc;
//!
//! let node = Arc::new(
//!     TypeDescriptorBuilder::new("Node")
//!         .field("value", PrimitiveKind::I64)
//!         .link_field("next", "Node")
//!         .build(),
//! );
//! let mut registry = HashMapTypeRegistry::new();
//! registry.register(node.clone()).unwrap();
//!
//! assert!(is_safe_descriptor(Some(&*node), &registry));
//! assert!(is_safe_descriptor(None, &registry));
//! ```
//!
//! The verdict is conservative: `false` does not mean encoding a particular
//! value will fail, only that some value of the type could.

// Allow the derive macro to work inside this crate's tests
extern crate self as safemarshal;

mod builder;
mod classify;
mod describe;
mod descriptor;
mod registry;

pub use builder::TypeDescriptorBuilder;
pub use classify::{is_safe, is_safe_descriptor, is_safe_type};
pub use describe::Describe;
pub use descriptor::{
    ArrayDescriptor, FieldDescriptor, MapDescriptor, PrimitiveKind, SequenceDescriptor,
    TypeDescriptor, TypeKey, TypeKind, UnionCase, UnsupportedKind,
};
pub use registry::{HashMapTypeRegistry, RegistryError, TypeRegistry};
pub use safemarshal_codegen::Describe;
