// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type introspection: [`Describe`] and its impls for std types.

use crate::descriptor::{
    ArrayDescriptor, FieldDescriptor, MapDescriptor, PrimitiveKind, SequenceDescriptor,
    TypeDescriptor, TypeKey, TypeKind, UnionCase, UnsupportedKind,
};
use crate::registry::HashMapTypeRegistry;
use std::any::{type_name, Any};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::ffi::{OsStr, OsString};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::{Arc, Mutex, RwLock};

/// Types that can describe their own structure.
///
/// Implement it with `#[derive(Describe)]` for structs and enums. Impls for
/// declared types must go through [`HashMapTypeRegistry::declare`] so that
/// recursive types terminate.
pub trait Describe {
    /// Describe `Self`, registering any declared types it reaches.
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor>;
}

fn leaf<S: ?Sized>(kind: TypeKind) -> Arc<TypeDescriptor> {
    Arc::new(TypeDescriptor::named(TypeKey::structural(type_name::<S>()), kind))
}

fn element_of<S: ?Sized, T: Describe + ?Sized>(
    registry: &mut HashMapTypeRegistry,
    wrap: impl FnOnce(Arc<TypeDescriptor>) -> TypeKind,
) -> Arc<TypeDescriptor> {
    let element = T::describe(registry);
    leaf::<S>(wrap(element))
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

macro_rules! impl_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe(_: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
                    Arc::new(TypeDescriptor::primitive(PrimitiveKind::$kind))
                }
            }
        )*
    };
}

impl_primitive!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
    str => String,
    String => String,
);

// ---------------------------------------------------------------------------
// Indirection
// ---------------------------------------------------------------------------

macro_rules! impl_pointer {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T: Describe + ?Sized> Describe for $ty<T> {
                fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
                    element_of::<Self, T>(registry, TypeKind::Pointer)
                }
            }
        )*
    };
}

impl_pointer!(Box, Rc, Arc);

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, TypeKind::Pointer)
    }
}

impl<T: Describe + ?Sized> Describe for &mut T {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, TypeKind::Pointer)
    }
}

impl<B: Describe + ToOwned + ?Sized> Describe for Cow<'_, B> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, B>(registry, TypeKind::Pointer)
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, TypeKind::Pointer)
    }
}

impl<T: Describe> Describe for Cell<T> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, TypeKind::Pointer)
    }
}

// ---------------------------------------------------------------------------
// Sequences and maps
// ---------------------------------------------------------------------------

fn sequence(element: Arc<TypeDescriptor>) -> TypeKind {
    TypeKind::Sequence(SequenceDescriptor::new(element))
}

impl<T: Describe> Describe for Vec<T> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, sequence)
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, sequence)
    }
}

impl<T: Describe> Describe for LinkedList<T> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, sequence)
    }
}

impl<T: Describe> Describe for BinaryHeap<T> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, sequence)
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, sequence)
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, sequence)
    }
}

impl<T: Describe> Describe for [T] {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, sequence)
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        element_of::<Self, T>(registry, |element| {
            TypeKind::Array(ArrayDescriptor::new(element, N))
        })
    }
}

fn map_of<S: ?Sized, K: Describe, V: Describe>(
    registry: &mut HashMapTypeRegistry,
) -> Arc<TypeDescriptor> {
    let key_type = K::describe(registry);
    let value_type = V::describe(registry);
    leaf::<S>(TypeKind::Map(MapDescriptor::new(key_type, value_type)))
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        map_of::<Self, K, V>(registry)
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        map_of::<Self, K, V>(registry)
    }
}

// ---------------------------------------------------------------------------
// Records and unions
// ---------------------------------------------------------------------------

macro_rules! impl_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Describe),+> Describe for ($($name,)+) {
            fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
                let fields = vec![
                    $(FieldDescriptor::new(stringify!($idx), <$name as Describe>::describe(registry))),+
                ];
                leaf::<Self>(TypeKind::Struct(fields))
            }
        }
    };
}

impl_tuple!(A: 0);
impl_tuple!(A: 0, B: 1);
impl_tuple!(A: 0, B: 1, C: 2);
impl_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

impl Describe for () {
    fn describe(_: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        leaf::<Self>(TypeKind::Struct(Vec::new()))
    }
}

impl<T: ?Sized> Describe for PhantomData<T> {
    fn describe(_: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        leaf::<Self>(TypeKind::Struct(Vec::new()))
    }
}

impl<T: Describe, E: Describe> Describe for Result<T, E> {
    fn describe(registry: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        let cases = vec![
            UnionCase::new("Ok", T::describe(registry)),
            UnionCase::new("Err", E::describe(registry)),
        ];
        leaf::<Self>(TypeKind::Union(cases))
    }
}

// ---------------------------------------------------------------------------
// Unconstrained
// ---------------------------------------------------------------------------

macro_rules! impl_any {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe(_: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
                    leaf::<Self>(TypeKind::Any)
                }
            }
        )*
    };
}

impl_any!(dyn Any, dyn Any + Send, dyn Any + Send + Sync);

// ---------------------------------------------------------------------------
// Never encodable
// ---------------------------------------------------------------------------

macro_rules! impl_unsupported {
    ($kind:ident: $($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe(_: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
                    leaf::<Self>(TypeKind::Unsupported(UnsupportedKind::$kind))
                }
            }
        )*
    };
}

impl_unsupported!(Platform: Path, PathBuf, OsStr, OsString);

// Higher-ranked forms such as `fn(&str) -> bool` are distinct types from
// `fn(A) -> R`; rustc reports the pair under `coherence_leak_check`.
macro_rules! impl_callable {
    (@dyn [$($gen:tt)*] $ty:ty) => {
        #[allow(coherence_leak_check)]
        impl<'a, R, $($gen)*> Describe for $ty {
            fn describe(_: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
                leaf::<Self>(TypeKind::Unsupported(UnsupportedKind::Function))
            }
        }
    };
    ([$($gen:tt)*] ($($arg:ty),*)) => {
        #[allow(coherence_leak_check)]
        impl<R, $($gen)*> Describe for fn($($arg),*) -> R {
            fn describe(_: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
                leaf::<Self>(TypeKind::Unsupported(UnsupportedKind::Function))
            }
        }
        impl_callable!(@dyn [$($gen)*] dyn Fn($($arg),*) -> R + 'a);
        impl_callable!(@dyn [$($gen)*] dyn Fn($($arg),*) -> R + Send + 'a);
        impl_callable!(@dyn [$($gen)*] dyn Fn($($arg),*) -> R + Send + Sync + 'a);
        impl_callable!(@dyn [$($gen)*] dyn FnMut($($arg),*) -> R + 'a);
        impl_callable!(@dyn [$($gen)*] dyn FnMut($($arg),*) -> R + Send + 'a);
        impl_callable!(@dyn [$($gen)*] dyn FnMut($($arg),*) -> R + Send + Sync + 'a);
        impl_callable!(@dyn [$($gen)*] dyn FnOnce($($arg),*) -> R + 'a);
        impl_callable!(@dyn [$($gen)*] dyn FnOnce($($arg),*) -> R + Send + 'a);
        impl_callable!(@dyn [$($gen)*] dyn FnOnce($($arg),*) -> R + Send + Sync + 'a);
    };
}

impl_callable!([] ());
impl_callable!([A] (A));
impl_callable!([A, B] (A, B));
impl_callable!([A, B, C] (A, B, C));
impl_callable!([A, B, C, D] (A, B, C, D));
impl_callable!([A, B, C, D, E] (A, B, C, D, E));
impl_callable!([A, B, C, D, E, F] (A, B, C, D, E, F));
impl_callable!([A: ?Sized] (&A));
impl_callable!([A: ?Sized] (&mut A));
impl_callable!([A: ?Sized, B] (&A, B));
impl_callable!([A: ?Sized, B: ?Sized] (&A, &B));

macro_rules! impl_unsupported_generic {
    ($kind:ident: $($ty:ident<T $(: ?$sized:ident)?>),* $(,)?) => {
        $(
            impl<T $(: ?$sized)?> Describe for $ty<T> {
                fn describe(_: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
                    leaf::<Self>(TypeKind::Unsupported(UnsupportedKind::$kind))
                }
            }
        )*
    };
}

impl_unsupported_generic!(Channel: Sender<T>, SyncSender<T>, Receiver<T>);
impl_unsupported_generic!(Guarded: Mutex<T: ?Sized>, RwLock<T: ?Sized>, RefCell<T: ?Sized>);

impl<T: ?Sized> Describe for *const T {
    fn describe(_: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        leaf::<Self>(TypeKind::Unsupported(UnsupportedKind::RawPointer))
    }
}

impl<T: ?Sized> Describe for *mut T {
    fn describe(_: &mut HashMapTypeRegistry) -> Arc<TypeDescriptor> {
        leaf::<Self>(TypeKind::Unsupported(UnsupportedKind::RawPointer))
    }
}
