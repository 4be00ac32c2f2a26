// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: a structural description of a type, independent of any value.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Identity of a type.
///
/// Declared types (derived Rust types and records named through the builder)
/// and structural types (primitives, containers, std types) live in separate
/// namespaces: a record named `any` is never equal to the unconstrained type.
/// Only declared types can recurse, so only declared keys take part in cycle
/// detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TypeKey {
    /// Derived Rust type (fully qualified name) or runtime-declared record.
    Declared(Arc<str>),
    /// Type identified by its shape.
    Structural(Arc<str>),
}

impl TypeKey {
    /// Key of a runtime-declared type.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self::Declared(Arc::from(name.as_ref()))
    }

    /// Key of a type identified by its shape.
    pub fn structural(name: impl AsRef<str>) -> Self {
        Self::Structural(Arc::from(name.as_ref()))
    }

    /// Key of the declared Rust type `T`.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Declared(name) | Self::Structural(name) => &**name,
        }
    }

    pub fn is_declared(&self) -> bool {
        matches!(self, Self::Declared(_))
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self::Declared(Arc::from(name))
    }
}

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum PrimitiveKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Char,
    String,
}

impl PrimitiveKind {
    /// Canonical spelling, used as the key of primitive descriptors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::String => "String",
        }
    }
}

/// Kinds that never encode reliably, whatever the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum UnsupportedKind {
    /// Function pointers and closures.
    Function,
    /// Channel endpoints.
    Channel,
    /// Complex numbers.
    Complex,
    /// Raw pointers.
    RawPointer,
    /// Lock or borrow wrappers whose serializers fail when poisoned or borrowed.
    Guarded,
    /// Paths and OS strings, which fail to encode when not valid UTF-8.
    Platform,
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Function => "function",
            Self::Channel => "channel",
            Self::Complex => "complex",
            Self::RawPointer => "raw pointer",
            Self::Guarded => "guarded",
            Self::Platform => "platform string",
        };
        f.write_str(label)
    }
}

/// Type kind enumeration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TypeKind {
    /// Text, boolean, integer or floating-point primitive.
    Primitive(PrimitiveKind),
    /// Record with named fields, in declaration order.
    Struct(Vec<FieldDescriptor>),
    /// Tagged union; one case per variant.
    Union(Vec<UnionCase>),
    /// Indirection to exactly one element type.
    Pointer(Arc<TypeDescriptor>),
    /// Variable-length homogeneous sequence.
    Sequence(SequenceDescriptor),
    /// Fixed-length homogeneous sequence.
    Array(ArrayDescriptor),
    /// Associative mapping.
    Map(MapDescriptor),
    /// Unconstrained: may hold anything at runtime.
    Any,
    /// Never reliably encodable.
    Unsupported(UnsupportedKind),
    /// Reference to a declared type held by a registry; closes cycles.
    Link(TypeKey),
}

/// A complete type descriptor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TypeDescriptor {
    /// Declared-type identity.
    pub key: TypeKey,
    /// Display name.
    pub name: String,
    /// Type kind.
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a new type descriptor.
    pub fn new(key: impl Into<TypeKey>, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            kind,
        }
    }

    /// Create a descriptor whose name is its key.
    pub fn named(key: impl Into<TypeKey>, kind: TypeKind) -> Self {
        let key = key.into();
        let name = key.as_str().to_string();
        Self { key, name, kind }
    }

    /// Create a primitive type descriptor.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::named(TypeKey::structural(kind.type_name()), TypeKind::Primitive(kind))
    }

    /// Create a struct type descriptor.
    pub fn struct_type(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        let name = name.into();
        Self::new(name.as_str(), name.clone(), TypeKind::Struct(fields))
    }

    /// Indirection to `element`.
    pub fn pointer(element: Arc<TypeDescriptor>) -> Self {
        let key = TypeKey::structural(format!("*{}", element.key));
        Self::named(key, TypeKind::Pointer(element))
    }

    /// Unbounded sequence of `element`.
    pub fn sequence(element: Arc<TypeDescriptor>) -> Self {
        let key = TypeKey::structural(format!("[{}]", element.key));
        Self::named(key, TypeKind::Sequence(SequenceDescriptor::new(element)))
    }

    /// Fixed-length array of `element`.
    pub fn array(element: Arc<TypeDescriptor>, length: usize) -> Self {
        let key = TypeKey::structural(format!("[{}; {}]", element.key, length));
        Self::named(key, TypeKind::Array(ArrayDescriptor::new(element, length)))
    }

    /// Mapping from `key_type` to `value_type`.
    pub fn map(key_type: Arc<TypeDescriptor>, value_type: Arc<TypeDescriptor>) -> Self {
        let key = TypeKey::structural(format!("map[{}]{}", key_type.key, value_type.key));
        Self::named(key, TypeKind::Map(MapDescriptor::new(key_type, value_type)))
    }

    /// Unconstrained type.
    pub fn any() -> Self {
        Self::named(TypeKey::structural("any"), TypeKind::Any)
    }

    pub fn unsupported(kind: UnsupportedKind) -> Self {
        Self::named(TypeKey::structural(format!("<{kind}>")), TypeKind::Unsupported(kind))
    }

    /// Reference to the declared type `key`, resolved through a registry.
    pub fn link(key: impl Into<TypeKey>) -> Self {
        let key = key.into();
        Self::named(key.clone(), TypeKind::Link(key))
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    pub fn is_link(&self) -> bool {
        matches!(self.kind, TypeKind::Link(_))
    }

    /// Get fields if this is a struct.
    pub fn fields(&self) -> Option<&[FieldDescriptor]> {
        match &self.kind {
            TypeKind::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields()?.iter().find(|f| f.name == name)
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = depth * 2;
        match &self.kind {
            TypeKind::Primitive(_) => writeln!(f, "{}", self.name),
            TypeKind::Any => writeln!(f, "any"),
            TypeKind::Unsupported(kind) => writeln!(f, "{} <{}>", self.name, kind),
            TypeKind::Link(key) => writeln!(f, "-> {key}"),
            TypeKind::Pointer(inner) => {
                write!(f, "*")?;
                inner.write_tree(f, depth)
            }
            TypeKind::Sequence(seq) => {
                write!(f, "[]")?;
                seq.element_type.write_tree(f, depth)
            }
            TypeKind::Array(arr) => {
                write!(f, "[{}]", arr.length)?;
                arr.element_type.write_tree(f, depth)
            }
            TypeKind::Map(map) => {
                writeln!(f, "map")?;
                write!(f, "{:pad$}  key: ", "")?;
                map.key_type.write_tree(f, depth + 1)?;
                write!(f, "{:pad$}  value: ", "")?;
                map.value_type.write_tree(f, depth + 1)
            }
            TypeKind::Struct(fields) => {
                writeln!(f, "{} {{", self.name)?;
                for field in fields {
                    write!(f, "{:pad$}  {}: ", "", field.name)?;
                    field.type_desc.write_tree(f, depth + 1)?;
                }
                writeln!(f, "{:pad$}}}", "")
            }
            TypeKind::Union(cases) => {
                writeln!(f, "{} (", self.name)?;
                for case in cases {
                    write!(f, "{:pad$}  | {}: ", "", case.name)?;
                    case.type_desc.write_tree(f, depth + 1)?;
                }
                writeln!(f, "{:pad$})", "")
            }
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Field descriptor for struct members.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Field type.
    pub type_desc: Arc<TypeDescriptor>,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, type_desc: Arc<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            type_desc,
        }
    }
}

/// Union case: one variant and the type of its payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct UnionCase {
    /// Case name.
    pub name: String,
    /// Case type.
    pub type_desc: Arc<TypeDescriptor>,
}

impl UnionCase {
    pub fn new(name: impl Into<String>, type_desc: Arc<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            type_desc,
        }
    }
}

/// Sequence type descriptor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SequenceDescriptor {
    /// Element type.
    pub element_type: Arc<TypeDescriptor>,
}

impl SequenceDescriptor {
    pub fn new(element_type: Arc<TypeDescriptor>) -> Self {
        Self { element_type }
    }
}

/// Array type descriptor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ArrayDescriptor {
    /// Element type.
    pub element_type: Arc<TypeDescriptor>,
    /// Fixed length.
    pub length: usize,
}

impl ArrayDescriptor {
    /// Create array descriptor.
    pub fn new(element_type: Arc<TypeDescriptor>, length: usize) -> Self {
        Self {
            element_type,
            length,
        }
    }
}

/// Map type descriptor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MapDescriptor {
    pub key_type: Arc<TypeDescriptor>,
    pub value_type: Arc<TypeDescriptor>,
}

impl MapDescriptor {
    pub fn new(key_type: Arc<TypeDescriptor>, value_type: Arc<TypeDescriptor>) -> Self {
        Self {
            key_type,
            value_type,
        }
    }
}
