// Copyright 2018 Lyndon Brown
//
// This file is part of the `cmdtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Command tree construction
//!
//! A [`CommandBuilder`] is the mutable, ergonomic side of the tree: callers add options and
//! subcommands to it, then call [`CommandBuilder::build`] once, at the root, to validate the
//! whole tree and freeze it into an immutable [`Command`].
//!
//! `help`/`version` options are injected automatically at `build()` time — a bare `-h`/`--help`
//! and `-v`/`--version` on *every* command in the tree, root and subcommands alike — unless the
//! caller already declared a colliding name themselves, in which case their own declaration wins.
//! The version string itself is not carried on the tree at all: it is supplied once, to
//! [`crate::runner::Runner`], and applied uniformly to whichever command's `--version` fired.

use crate::options::OptionDef;
use thiserror::Error;

/// A command's run callback: given the shared execution context and this command's operand
/// tokens, perform the command's action.
pub type RunFn<'a, T> = Box<dyn Fn(&T, &[String]) + 'a>;

/// What to do when two sibling subcommands declare the same name.
///
/// Carried for forward compatibility with the original design this crate is modeled on, which
/// declared the equivalent knob but never branched on it. `CommandBuilder::build` does not
/// branch on this either: declaration order always wins (see the command-resolution walker in
/// [`crate::parser`]), regardless of which variant is set here. See `DESIGN.md` for the record of
/// this decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateCommandPolicy {
    Error,
    BreadthFirst,
    DepthFirst,
}

impl Default for DuplicateCommandPolicy {
    fn default() -> Self {
        DuplicateCommandPolicy::BreadthFirst
    }
}

/// A failure encountered while finalizing a [`CommandBuilder`] into a [`Command`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("command `{cmd}`: invalid long option name `--{name}`")]
    InvalidLongName { cmd: String, name: String },
    #[error("command `{cmd}`: invalid short option name `-{name}`")]
    InvalidShortName { cmd: String, name: char },
    #[error("command `{cmd}`: option declares neither a long nor a short name")]
    UnnamedOption { cmd: String },
    #[error("command `{cmd}`: duplicate long option name `--{name}`")]
    DuplicateLongName { cmd: String, name: String },
    #[error("command `{cmd}`: duplicate short option name `-{name}`")]
    DuplicateShortName { cmd: String, name: char },
}

/// The mutable, ergonomic builder side of a command tree.
///
/// `T` is the caller's shared execution context type, threaded unchanged to every run callback.
pub struct CommandBuilder<'a, T> {
    name: &'a str,
    usage: &'a str,
    duplicate_policy: DuplicateCommandPolicy,
    options: Vec<OptionDef<'a>>,
    subcommands: Vec<CommandBuilder<'a, T>>,
    run: Option<RunFn<'a, T>>,
}

macro_rules! add_arg {
    ($method:ident, $ctor:ident, $target:ty) => {
        #[doc = concat!("Declare a `", stringify!($ctor), "`-kind option on this command.")]
        pub fn $method(mut self, name: &'a str, short: char, usage: &'a str, repeatable: bool,
            required: bool, target: Option<&'a mut $target>) -> Self
        {
            self.options.push(OptionDef::$ctor(name, short, usage, repeatable, required, target));
            self
        }
    };
}

impl<'a, T> CommandBuilder<'a, T> {
    /// Begin building a command (or, at the top of a tree, the root command) named `name`.
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            usage: "",
            duplicate_policy: DuplicateCommandPolicy::default(),
            options: Vec::new(),
            subcommands: Vec::new(),
            run: None,
        }
    }

    /// Set this command's one-line usage summary, shown in help output.
    pub fn usage(mut self, usage: &'a str) -> Self {
        self.usage = usage;
        self
    }

    /// Override the (currently unused, see [`DuplicateCommandPolicy`]) duplicate-subcommand-name
    /// policy.
    pub fn duplicate_policy(mut self, policy: DuplicateCommandPolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set this command's run callback, invoked by [`crate::runner::Runner`] with the shared
    /// context and this command's operand tokens.
    pub fn run<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, &[String]) + 'a,
    {
        self.run = Some(Box::new(f));
        self
    }

    /// Append a subcommand.
    pub fn add_subcommand(mut self, sub: CommandBuilder<'a, T>) -> Self {
        self.subcommands.push(sub);
        self
    }

    add_arg!(add_bool_arg, new_bool, bool);
    add_arg!(add_float64_arg, new_float64, f64);
    add_arg!(add_float64_list_arg, new_float64_list, Vec<f64>);
    add_arg!(add_int_arg, new_int, i32);
    add_arg!(add_int_list_arg, new_int_list, Vec<i32>);
    add_arg!(add_int64_arg, new_int64, i64);
    add_arg!(add_int64_list_arg, new_int64_list, Vec<i64>);
    add_arg!(add_string_arg, new_string, String);
    add_arg!(add_string_list_arg, new_string_list, Vec<String>);
    add_arg!(add_uint_arg, new_uint, u32);
    add_arg!(add_uint_list_arg, new_uint_list, Vec<u32>);
    add_arg!(add_uint64_arg, new_uint64, u64);
    add_arg!(add_uint64_list_arg, new_uint64_list, Vec<u64>);

    /// Validate and freeze this builder (and its whole subtree) into an immutable [`Command`].
    ///
    /// Declared option names flatten into the fixed order `Bool, Float64, Float64List, Int,
    /// IntList, Int64, Int64List, String, StringList, Uint, UintList, Uint64, Uint64List` — this
    /// crate preserves declaration order *within* each kind, but kinds themselves always sort
    /// into that sequence, matching the order observed in rendered help text.
    pub fn build(self) -> Result<Command<'a, T>, BuildError> {
        self.build_internal(Vec::new())
    }

    fn build_internal(mut self, ancestors: Vec<String>) -> Result<Command<'a, T>, BuildError> {
        let has_help = self.options.iter().any(|o| o.is_help());
        if !has_help {
            self.options.push(OptionDef::anonymous_bool("help", 'h',
                "display usage information for this command", true));
        }
        let has_version = self.options.iter().any(|o| o.is_version());
        if !has_version {
            self.options.push(OptionDef::anonymous_bool("version", 'v',
                "display the version for the utility", true));
        }

        validate_options(self.name, &self.options)?;

        self.options.sort_by_key(|o| kind_rank(o.kind()));

        let mut child_ancestors = ancestors.clone();
        child_ancestors.push(self.name.to_string());

        let mut subcommands = Vec::with_capacity(self.subcommands.len());
        for sub in self.subcommands {
            subcommands.push(sub.build_internal(child_ancestors.clone())?);
        }

        Ok(Command {
            name: self.name,
            usage: self.usage,
            duplicate_policy: self.duplicate_policy,
            options: self.options,
            subcommands,
            run: self.run,
            ancestors,
        })
    }
}

/// Position of a kind in the fixed build-time flattening order: `Bool, Float64, Float64List,
/// Int, IntList, Int64, Int64List, String, StringList, Uint, UintList, Uint64, Uint64List`.
fn kind_rank(kind: crate::options::OptionKind) -> usize {
    use crate::options::OptionKind::*;
    match kind {
        Bool => 0,
        Float64 => 1,
        Float64List => 2,
        Int => 3,
        IntList => 4,
        Int64 => 5,
        Int64List => 6,
        String => 7,
        StringList => 8,
        Uint => 9,
        UintList => 10,
        Uint64 => 11,
        Uint64List => 12,
    }
}

fn validate_options(cmd: &str, options: &[OptionDef<'_>]) -> Result<(), BuildError> {
    let mut seen_long = std::collections::HashSet::new();
    let mut seen_short = std::collections::HashSet::new();

    for opt in options {
        let has_long = !opt.name.is_empty();
        let has_short = opt.short != '\0';

        if !has_long && !has_short {
            return Err(BuildError::UnnamedOption { cmd: cmd.to_string() });
        }
        if has_long && !crate::options::is_valid_long(opt.name) {
            return Err(BuildError::InvalidLongName { cmd: cmd.to_string(), name: opt.name.to_string() });
        }
        if has_short && !crate::options::is_valid_short(opt.short) {
            return Err(BuildError::InvalidShortName { cmd: cmd.to_string(), name: opt.short });
        }
        if has_long && !seen_long.insert(opt.name) {
            return Err(BuildError::DuplicateLongName { cmd: cmd.to_string(), name: opt.name.to_string() });
        }
        if has_short && !seen_short.insert(opt.short) {
            return Err(BuildError::DuplicateShortName { cmd: cmd.to_string(), name: opt.short });
        }
    }
    Ok(())
}

/// An immutable, validated command, optionally with children.
///
/// `ancestors` holds the chain of names from the root down to (but excluding) this command,
/// baked in at `build()` time as owned `String`s rather than a literal parent back-pointer — an
/// equivalent, borrow-checker-friendly representation of "this command's position in the tree".
pub struct Command<'a, T> {
    pub(crate) name: &'a str,
    pub(crate) usage: &'a str,
    pub(crate) duplicate_policy: DuplicateCommandPolicy,
    pub(crate) options: Vec<OptionDef<'a>>,
    pub(crate) subcommands: Vec<Command<'a, T>>,
    pub(crate) run: Option<RunFn<'a, T>>,
    pub(crate) ancestors: Vec<String>,
}

impl<'a, T> Command<'a, T> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn usage(&self) -> &'a str {
        self.usage
    }

    pub fn options(&self) -> &[OptionDef<'a>] {
        &self.options
    }

    pub fn subcommands(&self) -> &[Command<'a, T>] {
        &self.subcommands
    }

    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    pub fn duplicate_policy(&self) -> DuplicateCommandPolicy {
        self.duplicate_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_injects_help_and_version_on_plain_command() {
        let cmd: Command<()> = CommandBuilder::new("root").build().unwrap();
        assert!(cmd.options().iter().any(|o| o.is_help()));
        assert!(cmd.options().iter().any(|o| o.is_version()));
    }

    #[test]
    fn subcommands_also_get_their_own_version_option() {
        let cmd: Command<()> = CommandBuilder::new("root")
            .add_subcommand(CommandBuilder::new("child"))
            .build()
            .unwrap();
        let child = &cmd.subcommands()[0];
        assert!(child.options().iter().any(|o| o.is_version()));
    }

    #[test]
    fn build_rejects_invalid_long_name() {
        let err = CommandBuilder::<()>::new("root")
            .add_bool_arg("bad_name", '\0', "", false, false, None)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidLongName { .. }));
    }

    #[test]
    fn build_rejects_reserved_short_name() {
        let err = CommandBuilder::<()>::new("root")
            .add_bool_arg("", 'W', "", false, false, None)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidShortName { .. }));
    }

    #[test]
    fn build_rejects_duplicate_long_name() {
        let err = CommandBuilder::<()>::new("root")
            .add_bool_arg("foo", '\0', "", false, false, None)
            .add_bool_arg("foo", '\0', "", false, false, None)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateLongName { .. }));
    }

    #[test]
    fn ancestors_are_baked_root_to_leaf() {
        let cmd: Command<()> = CommandBuilder::new("root")
            .add_subcommand(CommandBuilder::new("mid").add_subcommand(CommandBuilder::new("leaf")))
            .build()
            .unwrap();
        let mid = &cmd.subcommands()[0];
        let leaf = &mid.subcommands()[0];
        assert_eq!(mid.ancestors(), &["root".to_string()]);
        assert_eq!(leaf.ancestors(), &["root".to_string(), "mid".to_string()]);
    }

    #[test]
    fn fixed_kind_order_is_preserved_in_help() {
        let mut s = String::new();
        let mut n = 0i32;
        let cmd: Command<()> = CommandBuilder::new("root")
            .add_int_arg("count", 'c', "", false, true, Some(&mut n))
            .add_bool_arg("flag", 'f', "", false, false, None)
            .add_string_arg("name", 'n', "", false, true, Some(&mut s))
            .build()
            .unwrap();
        let kinds: Vec<_> = cmd.options().iter().map(|o| o.kind()).collect();
        // bool (flag, then auto-injected help) precede int precede string, regardless of
        // declaration order.
        let bool_pos = kinds.iter().position(|k| *k == crate::options::OptionKind::Bool).unwrap();
        let int_pos = kinds.iter().position(|k| *k == crate::options::OptionKind::Int).unwrap();
        let string_pos = kinds.iter().position(|k| *k == crate::options::OptionKind::String).unwrap();
        assert!(bool_pos < int_pos);
        assert!(int_pos < string_pos);
    }
}
