// Copyright 2019 Lyndon Brown
//
// This file is part of the `cmdtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Per-kind value binding
//!
//! Dispatches the raw value tokens a dialect rule collected for one option occurrence into the
//! caller-owned storage described by that option's [`Binding`], validating arity and parsing
//! scalars along the way. Called once per occurrence: scalar kinds overwrite, list kinds append,
//! so a `repeatable` list option accumulates across occurrences while a `repeatable` scalar
//! option simply keeps the last value seen.
//!
//! List-kind value tokens are additionally split on `,` (each piece trimmed before parsing), so
//! `--tags a,b --tags c` and `--tags a --tags b --tags c` bind identically.

use crate::options::{Binding, OptionDef};
use crate::parser::ParseError;

pub(crate) fn bind(def: &OptionDef<'_>, raw: &[String]) -> Result<(), ParseError> {
    let name = display_name(def);
    let mut binding = def.binding_mut();
    match &mut *binding {
        Binding::Bool(target) => {
            if !raw.is_empty() {
                return Err(ParseError::UnexpectedValue { name });
            }
            if let Some(t) = target {
                **t = true;
            }
        }
        Binding::Float64(target) => {
            let v = parse_scalar(&name, raw, |s| s.parse::<f64>().ok())?;
            if let Some(t) = target {
                **t = v;
            }
        }
        Binding::Int(target) => {
            let v = parse_scalar(&name, raw, |s| s.parse::<i32>().ok())?;
            if let Some(t) = target {
                **t = v;
            }
        }
        Binding::Int64(target) => {
            let v = parse_scalar(&name, raw, |s| s.parse::<i64>().ok())?;
            if let Some(t) = target {
                **t = v;
            }
        }
        Binding::Uint(target) => {
            let v = parse_scalar(&name, raw, |s| s.parse::<u32>().ok())?;
            if let Some(t) = target {
                **t = v;
            }
        }
        Binding::Uint64(target) => {
            let v = parse_scalar(&name, raw, |s| s.parse::<u64>().ok())?;
            if let Some(t) = target {
                **t = v;
            }
        }
        Binding::String(target) => {
            let v = expect_one_nonempty(&name, raw)?;
            if let Some(t) = target {
                **t = v;
            }
        }
        Binding::Float64List(target) => {
            let vals = parse_list(&name, raw, |s| s.parse::<f64>().ok())?;
            if let Some(t) = target {
                t.extend(vals);
            }
        }
        Binding::IntList(target) => {
            let vals = parse_list(&name, raw, |s| s.parse::<i32>().ok())?;
            if let Some(t) = target {
                t.extend(vals);
            }
        }
        Binding::Int64List(target) => {
            let vals = parse_list(&name, raw, |s| s.parse::<i64>().ok())?;
            if let Some(t) = target {
                t.extend(vals);
            }
        }
        Binding::UintList(target) => {
            let vals = parse_list(&name, raw, |s| s.parse::<u32>().ok())?;
            if let Some(t) = target {
                t.extend(vals);
            }
        }
        Binding::Uint64List(target) => {
            let vals = parse_list(&name, raw, |s| s.parse::<u64>().ok())?;
            if let Some(t) = target {
                t.extend(vals);
            }
        }
        Binding::StringList(target) => {
            let vals = split_list(raw);
            if vals.is_empty() {
                return Err(ParseError::MissingValue { name });
            }
            if let Some(t) = target {
                t.extend(vals);
            }
        }
    }
    Ok(())
}

fn display_name(def: &OptionDef<'_>) -> String {
    if !def.name.is_empty() {
        format!("--{}", def.name)
    } else {
        format!("-{}", def.short)
    }
}

fn expect_one_nonempty(name: &str, raw: &[String]) -> Result<String, ParseError> {
    if raw.len() != 1 || raw[0].is_empty() {
        return Err(ParseError::InvalidValue { name: name.to_string(), value: raw.join(",") });
    }
    Ok(raw[0].clone())
}

fn parse_scalar<F, V>(name: &str, raw: &[String], parse: F) -> Result<V, ParseError>
where
    F: Fn(&str) -> Option<V>,
{
    let text = expect_one_nonempty(name, raw)?;
    parse(&text).ok_or_else(|| ParseError::InvalidValue { name: name.to_string(), value: text })
}

fn split_list(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|token| token.split(','))
        .map(|piece| piece.trim().to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

fn parse_list<F, V>(name: &str, raw: &[String], parse: F) -> Result<Vec<V>, ParseError>
where
    F: Fn(&str) -> Option<V>,
{
    let pieces = split_list(raw);
    if pieces.is_empty() {
        return Err(ParseError::MissingValue { name: name.to_string() });
    }
    pieces
        .into_iter()
        .map(|piece| {
            parse(&piece).ok_or_else(|| ParseError::InvalidValue {
                name: name.to_string(),
                value: piece.clone(),
            })
        })
        .collect()
}
