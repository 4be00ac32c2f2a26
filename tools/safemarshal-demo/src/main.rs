// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! safemarshal-demo - encodability verdicts for two sample types
//!
//! Prints `true` for a record holding a string and `false` for a record
//! holding an unconstrained value, optionally followed by their descriptors.

use anyhow::Context;
use clap::Parser;
use safemarshal::{is_safe, Describe, HashMapTypeRegistry};
use std::any::Any;

#[derive(Parser, Debug)]
#[command(name = "safemarshal-demo")]
#[command(version)]
#[command(about = "Print the encodability verdict of two sample types")]
struct Args {
    /// Print each type's descriptor tree
    #[arg(long)]
    tree: bool,

    /// Print each type's descriptor as JSON
    #[arg(long, conflicts_with = "tree")]
    json: bool,

    /// Log classifier decisions (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Describe, Default)]
struct Safe {
    field: String,
}

#[derive(Describe)]
struct Unsafe {
    field: Box<dyn Any>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    // This will print 'true'.
    println!("{}", is_safe(&Safe::default()));

    // This will print 'false', even though this particular value would
    // encode: the field's type does not rule out values that cannot.
    println!("{}", is_safe(&Unsafe { field: Box::new("safe") }));

    if args.tree || args.json {
        show::<Safe>(&args)?;
        show::<Unsafe>(&args)?;
    }
    Ok(())
}

fn show<T: Describe>(args: &Args) -> anyhow::Result<()> {
    let mut registry = HashMapTypeRegistry::new();
    let descriptor = registry.describe::<T>();
    log::debug!("described {} ({} declared types)", descriptor.name, registry.len());

    if args.json {
        let json = serde_json::to_string_pretty(descriptor.as_ref())
            .with_context(|| format!("encoding descriptor of {}", descriptor.name))?;
        println!("{json}");
    } else {
        print!("{descriptor}");
    }
    Ok(())
}
