// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Classification of derived and std types.
//!
//! Every fixture classified safe here is also encoded with `serde_json`, so
//! these cases double as a check against the real encoder. The structural
//! rule does not model encoder-specific limits such as non-string map keys,
//! and no fixture relies on one.

// Fixtures only exist to be described; most fields are never read.
#![allow(dead_code)]

use safemarshal::{is_safe, is_safe_type, Describe};
use serde::Serialize;
use std::any::Any;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Sender};
use std::sync::Mutex;

#[derive(Describe, Serialize, Clone)]
struct SafeStruct {
    field1: String,
}

#[derive(Describe, Serialize)]
struct SafeRecursiveStruct {
    field1: String,
    field2: Option<Box<SafeRecursiveStruct>>,
}

#[derive(Describe, Serialize)]
struct SafeLinkedStruct1 {
    field1: String,
    field2: Option<Box<SafeLinkedStruct2>>,
}

#[derive(Describe, Serialize)]
struct SafeLinkedStruct2 {
    field1: String,
    field2: Option<Box<SafeLinkedStruct1>>,
}

#[derive(Describe)]
struct UnsafeLinkedStruct1 {
    field1: String,
    field2: Option<Box<UnsafeLinkedStruct2>>,
}

#[derive(Describe)]
struct UnsafeLinkedStruct2 {
    field1: String,
    field2: Option<Box<UnsafeLinkedStruct1>>,
    field3: Box<dyn Any>,
}

#[derive(Describe)]
struct UnsafeStruct1 {
    field1: String,
    field2: Box<dyn Any>,
}

#[derive(Describe)]
struct UnsafeStruct2 {
    field1: String,
    field2: fn(),
}

#[derive(Describe)]
struct UnsafeStruct3 {
    field1: String,
    field2: Sender<i32>,
}

#[derive(Describe)]
struct Handler {
    name: String,
    on_event: Box<dyn Fn(u32) + Send>,
}

#[derive(Describe)]
struct Pipeline<'a> {
    filter: fn(&str) -> bool,
    transform: &'a dyn Fn(&str) -> String,
    finish: Option<Box<dyn FnOnce() + Send + Sync>>,
    sink: Box<dyn FnMut(&[u8], usize) -> usize>,
}

#[derive(Describe)]
struct UnsafeRecursiveStruct {
    field1: String,
    field2: Option<Box<UnsafeRecursiveStruct>>,
    field3: Box<dyn Any>,
}

#[derive(Describe, Serialize)]
struct Point(f64, f64);

#[derive(Describe, Serialize)]
struct Marker;

#[derive(Describe, Serialize)]
enum Shape {
    Circle { radius: f64 },
    Square(f64),
    Empty,
}

#[derive(Describe)]
enum Event {
    Tick,
    Payload(Box<dyn Any + Send>),
}

#[derive(Describe, Serialize)]
struct Wrapper<T> {
    inner: T,
}

#[derive(Describe, Serialize)]
struct Borrowed<'a> {
    name: &'a str,
    tags: Cow<'a, [String]>,
}

#[derive(Describe, Serialize)]
struct Cached {
    id: u32,
    #[describe(skip)]
    #[serde(skip)]
    scratch: Option<Box<dyn Any>>,
}

/// Assert a safe verdict and that the value really encodes.
fn assert_safe<T: Describe + Serialize + ?Sized>(value: &T) {
    assert!(
        is_safe(value),
        "{} should be safe",
        std::any::type_name::<T>()
    );
    if let Err(e) = serde_json::to_string(value) {
        panic!("encoding {} failed: {e}", std::any::type_name::<T>());
    }
}

fn assert_unsafe<T: Describe + ?Sized>(value: &T) {
    assert!(
        !is_safe(value),
        "{} should be unsafe",
        std::any::type_name::<T>()
    );
}

fn safe_struct() -> SafeStruct {
    SafeStruct {
        field1: "a string".to_string(),
    }
}

fn unsafe_struct() -> UnsafeStruct1 {
    UnsafeStruct1 {
        field1: "a string".to_string(),
        field2: Box::new(999),
    }
}

#[test]
fn primitives_and_pointers_to_them() {
    let str_val = "a string".to_string();
    let int_val: i64 = 999;
    let uint_val: u64 = 999;
    let float_val = 999.99_f64;
    let char_val = 'x';

    assert_safe(&str_val);
    assert_safe(&&str_val);
    assert_safe("a str slice");
    assert_safe(&char_val);
    assert_safe(&&char_val);
    assert_safe(&int_val);
    assert_safe(&&int_val);
    assert_safe(&uint_val);
    assert_safe(&&uint_val);
    assert_safe(&float_val);
    assert_safe(&&float_val);
    assert_safe(&true);
    assert_safe(&u128::MAX);
    assert_safe(&i8::MIN);
}

#[test]
fn byte_sequences() {
    assert_safe(&b"bytes".to_vec());
    assert_safe(&[0u8; 4]);
    assert_safe(&b"bytes"[..]);
}

#[test]
fn safe_records_and_containers() {
    assert_safe(&safe_struct());
    assert_safe(&&safe_struct());
    assert_safe(&Box::new(safe_struct()));
    assert_safe(&vec![safe_struct()]);
    assert_safe(&[safe_struct()]);
    assert_safe(&HashMap::from([("key".to_string(), safe_struct())]));
    assert_safe(&BTreeMap::from([(1u32, vec![safe_struct()])]));
    assert_safe(&("anonymous".to_string(), 1u8, false));
    assert_safe(&());
    assert_safe(&Point(1.0, 2.0));
    assert_safe(&Marker);
}

#[test]
fn absent_values() {
    let nil_safe: Option<Box<SafeStruct>> = None;
    let nil_unsafe: Option<Box<UnsafeStruct1>> = None;

    assert_safe(&nil_safe);
    // The type is still inspected even though there is no value.
    assert_unsafe(&nil_unsafe);
}

#[test]
fn recursive_records() {
    let recursive = SafeRecursiveStruct {
        field1: "a string".to_string(),
        field2: Some(Box::new(SafeRecursiveStruct {
            field1: "another string".to_string(),
            field2: None,
        })),
    };
    assert_safe(&recursive);

    let linked = SafeLinkedStruct1 {
        field1: "a string".to_string(),
        field2: Some(Box::new(SafeLinkedStruct2 {
            field1: "another string".to_string(),
            field2: Some(Box::new(SafeLinkedStruct1 {
                field1: "yet another string".to_string(),
                field2: None,
            })),
        })),
    };
    assert_safe(&linked);
    assert!(is_safe_type::<SafeLinkedStruct2>());

    let unsafe_recursive = UnsafeRecursiveStruct {
        field1: "a string".to_string(),
        field2: None,
        field3: Box::new(99.9),
    };
    assert_unsafe(&unsafe_recursive);

    let unsafe_linked = UnsafeLinkedStruct1 {
        field1: "a string".to_string(),
        field2: Some(Box::new(UnsafeLinkedStruct2 {
            field1: "another string".to_string(),
            field2: None,
            field3: Box::new(99.99),
        })),
    };
    assert_unsafe(&unsafe_linked);
    assert!(!is_safe_type::<UnsafeLinkedStruct2>());
}

#[test]
fn unsafe_fields() {
    let (tx, _rx) = channel();

    assert_unsafe(&unsafe_struct());
    assert_unsafe(&UnsafeStruct2 {
        field1: "a string".to_string(),
        field2: || {},
    });
    assert_unsafe(&UnsafeStruct3 {
        field1: "a string".to_string(),
        field2: tx,
    });
}

#[test]
fn callback_fields() {
    let handler = Handler {
        name: "tick".to_string(),
        on_event: Box::new(|_: u32| {}),
    };
    assert_unsafe(&handler);
    assert_unsafe(&vec![handler]);

    let upper = |s: &str| s.to_uppercase();
    let pipeline = Pipeline {
        filter: |s: &str| !s.is_empty(),
        transform: &upper,
        finish: None,
        sink: Box::new(|bytes: &[u8], limit: usize| bytes.len().min(limit)),
    };
    assert_unsafe(&pipeline);
    assert!(!is_safe_type::<Option<Box<dyn FnOnce() -> String + Send>>>());
}

#[test]
fn unsafe_records_in_containers() {
    assert_unsafe(&&unsafe_struct());
    assert_unsafe(&vec![unsafe_struct()]);
    assert_unsafe(&[unsafe_struct()]);
    assert_unsafe(&HashMap::from([("key".to_string(), unsafe_struct())]));
    assert_unsafe(&(1u8, unsafe_struct()));
}

#[test]
fn unsafe_map_keys() {
    let any_keys: HashMap<Box<dyn Any>, SafeStruct> = HashMap::new();
    assert_unsafe(&any_keys);

    let path_keys: HashMap<PathBuf, String> = HashMap::new();
    assert_unsafe(&path_keys);
}

#[test]
fn opaque_and_unsupported_values() {
    let any: Box<dyn Any> = Box::new("a string");
    assert_unsafe(&any);
    assert_unsafe(&*any);
    assert_unsafe(&Mutex::new(1u32));
    assert_unsafe(&PathBuf::from("/tmp"));
    assert_unsafe(&std::ptr::null::<u8>());

    let callback: fn(u32) -> u32 = |x| x + 1;
    assert_unsafe(&callback);
}

#[test]
fn enums() {
    assert_safe(&Shape::Circle { radius: 1.0 });
    assert_safe(&vec![Shape::Square(2.0), Shape::Empty]);
    assert_safe(&Ok::<u32, String>(1));

    assert_unsafe(&Event::Tick);
    assert_unsafe(&Err::<u32, Box<dyn Any>>(Box::new(1)));
}

#[test]
fn generic_and_borrowed_records() {
    assert_safe(&Wrapper {
        inner: "text".to_string(),
    });
    assert_safe(&Wrapper {
        inner: Wrapper { inner: 1u8 },
    });
    assert!(!is_safe_type::<Wrapper<Box<dyn Any>>>());

    let tags = vec!["a".to_string()];
    assert_safe(&Borrowed {
        name: "borrowed",
        tags: Cow::Borrowed(&tags),
    });
}

#[test]
fn skipped_fields_are_ignored() {
    assert_safe(&Cached {
        id: 7,
        scratch: None,
    });
}

#[test]
fn verdict_depends_on_type_not_value() {
    // A conservative verdict: these values encode fine, their types do not
    // guarantee it.
    assert_unsafe(&Mutex::new(5u32));
    assert!(serde_json::to_string(&Mutex::new(5u32)).is_ok());

    assert_unsafe(&PathBuf::from("plain/ascii"));
    assert!(serde_json::to_string(&PathBuf::from("plain/ascii")).is_ok());

    // Independently built instances get the same verdict.
    let first = SafeStruct {
        field1: String::new(),
    };
    let second = SafeStruct {
        field1: "different".to_string(),
    };
    assert_eq!(is_safe(&first), is_safe(&second));
    assert_eq!(is_safe(&unsafe_struct()), is_safe(&unsafe_struct()));
}

#[test]
fn concurrent_calls_are_independent() {
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                scope.spawn(move || {
                    if i % 2 == 0 {
                        is_safe_type::<SafeLinkedStruct1>()
                    } else {
                        !is_safe_type::<UnsafeLinkedStruct1>()
                    }
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().expect("classifier thread panicked"));
        }
    });
}
