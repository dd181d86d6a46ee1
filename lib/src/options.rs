// Copyright 2017 Lyndon Brown
//
// This file is part of the `cmdtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Option description components
//!
//! This module describes the *options* available within a command: their identifiers, their
//! value arity, and the caller-owned storage ("binding") that a successful parse writes into.
//!
//! Unlike a reflection-based binder, every binding here is a variant of [`Binding`] that matches
//! its owning [`OptionKind`] one-to-one, so a kind/binding mismatch is unrepresentable rather than
//! a runtime surprise.

use std::cell::RefCell;
use std::fmt;

/// The thirteen supported option value kinds.
///
/// The order here (and the order `CommandBuilder::build` flattens declared options into) is
/// observable in rendered help output: `Bool, Float64, Float64List, Int, IntList, Int64,
/// Int64List, String, StringList, Uint, UintList, Uint64, Uint64List`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Float64,
    Float64List,
    Int,
    IntList,
    Int64,
    Int64List,
    String,
    StringList,
    Uint,
    UintList,
    Uint64,
    Uint64List,
}

impl OptionKind {
    /// Whether this kind collects a sequence of values rather than a single scalar.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self,
            OptionKind::Float64List | OptionKind::IntList | OptionKind::Int64List |
            OptionKind::StringList | OptionKind::UintList | OptionKind::Uint64List)
    }

    /// Whether this kind is the bare presence flag (accepts zero value tokens).
    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, OptionKind::Bool)
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKind::Bool => "bool",
            OptionKind::Float64 => "float64",
            OptionKind::Float64List => "float64 list",
            OptionKind::Int => "int",
            OptionKind::IntList => "int list",
            OptionKind::Int64 => "int64",
            OptionKind::Int64List => "int64 list",
            OptionKind::String => "string",
            OptionKind::StringList => "string list",
            OptionKind::Uint => "uint",
            OptionKind::UintList => "uint list",
            OptionKind::Uint64 => "uint64",
            OptionKind::Uint64List => "uint64 list",
        };
        f.write_str(name)
    }
}

/// Caller-owned writable storage for an option's value.
///
/// A `None` binding is valid and deliberate: it means "parse and validate this option's value,
/// but do not write it anywhere" (useful for options whose presence alone matters, or for test
/// symmetry with the no-op case).
pub enum Binding<'a> {
    Bool(Option<&'a mut bool>),
    Float64(Option<&'a mut f64>),
    Float64List(Option<&'a mut Vec<f64>>),
    Int(Option<&'a mut i32>),
    IntList(Option<&'a mut Vec<i32>>),
    Int64(Option<&'a mut i64>),
    Int64List(Option<&'a mut Vec<i64>>),
    String(Option<&'a mut String>),
    StringList(Option<&'a mut Vec<String>>),
    Uint(Option<&'a mut u32>),
    UintList(Option<&'a mut Vec<u32>>),
    Uint64(Option<&'a mut u64>),
    Uint64List(Option<&'a mut Vec<u64>>),
}

impl<'a> Binding<'a> {
    /// The [`OptionKind`] this binding corresponds to.
    pub fn kind(&self) -> OptionKind {
        match self {
            Binding::Bool(_) => OptionKind::Bool,
            Binding::Float64(_) => OptionKind::Float64,
            Binding::Float64List(_) => OptionKind::Float64List,
            Binding::Int(_) => OptionKind::Int,
            Binding::IntList(_) => OptionKind::IntList,
            Binding::Int64(_) => OptionKind::Int64,
            Binding::Int64List(_) => OptionKind::Int64List,
            Binding::String(_) => OptionKind::String,
            Binding::StringList(_) => OptionKind::StringList,
            Binding::Uint(_) => OptionKind::Uint,
            Binding::UintList(_) => OptionKind::UintList,
            Binding::Uint64(_) => OptionKind::Uint64,
            Binding::Uint64List(_) => OptionKind::Uint64List,
        }
    }
}

/// Description of a declared option, bound to caller-owned storage.
///
/// Built via one of the `OptionDef::new_<kind>` constructors (mirrored by
/// `CommandBuilder::add_<kind>_arg`); see [`crate::commands::CommandBuilder`].
pub struct OptionDef<'a> {
    /// Long name, excluding any `--` prefix. Empty if only a short form is declared.
    pub name: &'a str,
    /// Short name `char`. `'\0'` if only a long form is declared.
    pub short: char,
    /// Usage text shown in rendered help.
    pub usage: &'a str,
    /// Whether the option may appear more than once without error.
    pub repeatable: bool,
    /// For the GNU dialect only: whether a detached next-argument token may supply this option's
    /// value (`true`, "data"-style), or whether a value is only accepted attached via `=`
    /// (`false`, "mixed"/optional-style). Irrelevant to the POSIX dialect, where the next token is
    /// always consumed as the value of a pending non-bool option.
    pub required: bool,
    binding: RefCell<Binding<'a>>,
}

macro_rules! ctor {
    ($ctor_name:ident, $variant:ident, $target:ty) => {
        #[doc = concat!("Declare a `", stringify!($variant), "` option.")]
        pub fn $ctor_name(name: &'a str, short: char, usage: &'a str, repeatable: bool,
            required: bool, target: Option<&'a mut $target>) -> Self
        {
            Self {
                name, short, usage, repeatable, required,
                binding: RefCell::new(Binding::$variant(target)),
            }
        }
    };
}

impl<'a> OptionDef<'a> {
    ctor!(new_bool, Bool, bool);
    ctor!(new_float64, Float64, f64);
    ctor!(new_float64_list, Float64List, Vec<f64>);
    ctor!(new_int, Int, i32);
    ctor!(new_int_list, IntList, Vec<i32>);
    ctor!(new_int64, Int64, i64);
    ctor!(new_int64_list, Int64List, Vec<i64>);
    ctor!(new_string, String, String);
    ctor!(new_string_list, StringList, Vec<String>);
    ctor!(new_uint, Uint, u32);
    ctor!(new_uint_list, UintList, Vec<u32>);
    ctor!(new_uint64, Uint64, u64);
    ctor!(new_uint64_list, Uint64List, Vec<u64>);

    /// A synthesized, unbound anonymous bool option (used for the auto-injected `help`/`version`
    /// options, and for builder symmetry where a caller only wants validation, not storage).
    pub fn anonymous_bool(name: &'a str, short: char, usage: &'a str, repeatable: bool) -> Self {
        Self::new_bool(name, short, usage, repeatable, false, None)
    }

    /// The option's value kind.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.binding.borrow().kind()
    }

    /// Whether this option's resolved name matches either of `help`/`h`.
    pub(crate) fn is_help(&self) -> bool {
        self.name == "help" || self.short == 'h'
    }

    /// Whether this option's resolved name matches either of `version`/`v`.
    pub(crate) fn is_version(&self) -> bool {
        self.name == "version" || self.short == 'v'
    }

    /// Writes parsed raw value tokens into the bound caller storage, per the arity rules of
    /// [`OptionKind`]. See [`crate::binder`] for the dispatch rules.
    pub(crate) fn bind(&self, raw: &[String]) -> Result<(), crate::parser::ParseError> {
        crate::binder::bind(self, raw)
    }

    pub(crate) fn binding_mut(&self) -> std::cell::RefMut<'_, Binding<'a>> {
        self.binding.borrow_mut()
    }
}

impl<'a> fmt::Debug for OptionDef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDef")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("repeatable", &self.repeatable)
            .field("required", &self.required)
            .field("kind", &self.kind())
            .finish()
    }
}

/// POSIX reserves `-W` for vendor extensions; both dialects reject it as a short name.
const RESERVED_SHORT: char = 'W';

/// Validate a short option name: a single alphabetic character, excluding `W`.
#[inline]
pub fn is_valid_short(ch: char) -> bool {
    ch.is_ascii_alphabetic() && ch != RESERVED_SHORT
}

/// Validate a long option name: alphabetic characters, optionally separated by `-` into
/// non-empty parts. Unlike the short-name rule, `W` is not excluded here.
pub fn is_valid_long(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    name.split('-').all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphabetic()))
}
