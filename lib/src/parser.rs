// Copyright 2018 Lyndon Brown
//
// This file is part of the `cmdtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Command-line parsing
//!
//! Parsing happens in two interleaved passes per command level:
//!
//! 1. **Command resolution** — walk the declared subcommand tree looking for a bare token (one
//!    that doesn't look like an option) matching a command in the walker's current *reachable
//!    set*. That set starts out as the root's direct children; each time the walker descends
//!    into a resolved command, the set becomes that command's own direct children plus the
//!    direct children of every ancestor back up to the root. This lets a deep subcommand be
//!    reached without naming every ancestor on the way down — a token may match a sibling of
//!    any ancestor, not only a direct child of wherever the walker currently sits.
//! 2. **Argument parsing** — everything up to the boundary found in step 1 (or the whole
//!    remaining token slice, if nothing matched) is parsed as that command's own options and
//!    operands, according to the active [`Dialect`]'s rules. Both the POSIX and GNU pipelines
//!    open with a Validity rule: the first token of a command's own buffer must begin with `-`
//!    or the whole parse fails — a bare leading positional is only legal once it follows a `--`
//!    terminator.
//!
//! The two passes repeat recursively down into any resolved subcommand, producing a
//! [`ParsedCommand`] tree that mirrors the path the walker actually took (which, since the
//! reachable set includes ancestor siblings, need not mirror the declared tree shape).

use crate::commands::Command;
use crate::options::OptionDef;
use std::collections::HashSet;
use thiserror::Error;

/// Which argument syntax a [`Parser`] enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Single-dash short options only, clustered (`-abc`), with an optional attached
    /// (`-n5`) or detached (`-n 5`) value on the cluster's final option.
    Posix,
    /// GNU-style: `-x`/`-xvalue` short options, `--long`/`--long=value` long options. A long
    /// option declared with `required = false` only accepts its value attached via `=`; a bare
    /// following token is rejected as ambiguous rather than silently treated as an operand.
    Gnu,
    /// Go `flag`-package style: `-name`/`--name`, `-name=value`/`--name=value`, or a detached
    /// following token, uniformly, regardless of the option's declared `required` flag.
    GoFlag,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub dialect: Dialect,
    /// Stop parsing a command level's own tokens at the first problem encountered (the default),
    /// rather than accumulating every problem before failing.
    pub stop_on_problem: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { dialect: Dialect::Gnu, stop_on_problem: true }
    }
}

/// A parse-time failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid POSIX option: {token}")]
    MalformedFirstToken { token: String },
    #[error("unknown option: {name}")]
    UnknownOption { name: String },
    #[error("option {name} does not take a value")]
    UnexpectedValue { name: String },
    #[error("option {name} requires a value")]
    MissingValue { name: String },
    #[error("invalid value '{value}' for option {name}")]
    InvalidValue { name: String, value: String },
    #[error("option {name} only accepts a value attached with '=' here")]
    AmbiguousOptionalValue { name: String },
    #[error("option {name} cannot be repeated")]
    NotRepeatable { name: String },
}

/// One recorded occurrence of an option during parsing.
#[derive(Debug, Clone)]
pub struct ParsedArg {
    pub name: String,
    pub short: char,
    pub raw: Vec<String>,
    /// Whether the matched [`OptionDef`] declared itself as requiring a detached value
    /// (GNU dialect) — carried through for callers inspecting the parse record, not consulted
    /// by the binder itself (arity is purely a function of [`crate::options::OptionKind`]).
    pub required: bool,
}

/// One resolved level of a parsed command tree.
pub struct ParsedCommand<'c, 'a, T> {
    pub(crate) command: &'c Command<'a, T>,
    pub args: Vec<ParsedArg>,
    pub operands: Vec<String>,
    pub subcommands: Vec<ParsedCommand<'c, 'a, T>>,
    pub help_requested: bool,
    pub version_requested: bool,
}

impl<'c, 'a, T> ParsedCommand<'c, 'a, T> {
    pub fn name(&self) -> &'a str {
        self.command.name()
    }

    pub fn command(&self) -> &'c Command<'a, T> {
        self.command
    }
}

/// Parse `args` (typically `std::env::args().skip(1)`, collected) against `root`.
pub fn parse<'c, 'a, T>(root: &'c Command<'a, T>, args: &[String], settings: &Settings)
    -> Result<ParsedCommand<'c, 'a, T>, ParseError>
{
    resolve_and_parse(root, args, settings, &[])
}

/// Resolve and parse one level, given the chain of ancestors (root-to-parent, not including
/// `cmd`) whose direct children also count as reachable from `cmd`.
fn resolve_and_parse<'c, 'a, T>(
    cmd: &'c Command<'a, T>,
    tokens: &[String],
    settings: &Settings,
    ancestors: &[&'c Command<'a, T>],
) -> Result<ParsedCommand<'c, 'a, T>, ParseError> {
    let reachable = |name: &str| -> Option<&'c Command<'a, T>> {
        cmd.subcommands().iter().find(|s| s.name() == name)
            .or_else(|| ancestors.iter().rev().find_map(|a| a.subcommands().iter().find(|s| s.name() == name)))
    };

    let boundary = tokens.iter()
        .position(|tok| !looks_like_option(tok, settings.dialect) && reachable(tok).is_some());

    let (own_tokens, rest) = match boundary {
        Some(idx) => (&tokens[..idx], Some((&tokens[idx], &tokens[idx + 1..]))),
        None => (tokens, None),
    };

    let (parsed_args, operands) = match settings.dialect {
        Dialect::Posix => engine::parse_posix(cmd.options(), own_tokens)?,
        Dialect::Gnu => engine::parse_gnu(cmd.options(), own_tokens)?,
        Dialect::GoFlag => engine::parse_goflag(cmd.options(), own_tokens)?,
    };

    let help_requested = parsed_args.iter().any(|a| is_named(cmd.options(), a, OptionDef::is_help));
    let version_requested =
        parsed_args.iter().any(|a| is_named(cmd.options(), a, OptionDef::is_version));

    let subcommands = match rest {
        Some((matched_name, remaining_tokens)) => {
            let matched = reachable(matched_name)
                .expect("boundary token was matched against the reachable set");
            let mut child_ancestors: Vec<&'c Command<'a, T>> = ancestors.to_vec();
            child_ancestors.push(cmd);
            vec![resolve_and_parse(matched, remaining_tokens, settings, &child_ancestors)?]
        }
        None => Vec::new(),
    };

    Ok(ParsedCommand { command: cmd, args: parsed_args, operands, subcommands, help_requested, version_requested })
}

fn is_named(options: &[OptionDef<'_>], arg: &ParsedArg, pred: fn(&OptionDef<'_>) -> bool) -> bool {
    options.iter().any(|o| pred(o) && (o.name == arg.name || o.short == arg.short))
}

fn looks_like_option(token: &str, dialect: Dialect) -> bool {
    match dialect {
        Dialect::Posix | Dialect::Gnu => token.starts_with('-') && token != "-",
        Dialect::GoFlag => token.starts_with('-') && token != "-",
    }
}

mod engine {
    use super::*;

    pub(super) fn parse_posix(options: &[OptionDef<'_>], tokens: &[String])
        -> Result<(Vec<ParsedArg>, Vec<String>), ParseError>
    {
        let mut args = Vec::new();
        let mut operands = Vec::new();
        let mut seen: HashSet<char> = HashSet::new();
        let mut i = 0;
        let mut terminated = false;

        while i < tokens.len() {
            let tok = &tokens[i];
            if i == 0 && !tok.starts_with('-') {
                return Err(ParseError::MalformedFirstToken { token: tok.clone() });
            }
            if terminated {
                operands.push(tok.clone());
                i += 1;
                continue;
            }
            if tok == "--" {
                terminated = true;
                i += 1;
                continue;
            }
            if tok.starts_with("--") {
                return Err(ParseError::UnknownOption { name: tok.clone() });
            }
            if tok.starts_with('-') && tok.len() > 1 {
                let chars: Vec<char> = tok[1..].chars().collect();
                let mut c = 0;
                while c < chars.len() {
                    let ch = chars[c];
                    let def = options.iter().find(|o| o.short == ch)
                        .ok_or_else(|| ParseError::UnknownOption { name: format!("-{}", ch) })?;
                    check_repeatable(def, &mut seen, ch)?;
                    if def.kind().is_bool() {
                        def.bind(&[])?;
                        args.push(record(def, Vec::new()));
                        c += 1;
                    } else {
                        let remainder: String = chars[c + 1..].iter().collect();
                        let raw = if !remainder.is_empty() {
                            vec![remainder]
                        } else {
                            i += 1;
                            let next = tokens.get(i).cloned().ok_or_else(|| {
                                ParseError::MissingValue { name: format!("-{}", ch) }
                            })?;
                            vec![next]
                        };
                        def.bind(&raw)?;
                        args.push(record(def, raw));
                        c = chars.len();
                    }
                }
                i += 1;
                continue;
            }
            operands.push(tok.clone());
            i += 1;
        }

        Ok((args, operands))
    }

    pub(super) fn parse_gnu(options: &[OptionDef<'_>], tokens: &[String])
        -> Result<(Vec<ParsedArg>, Vec<String>), ParseError>
    {
        let mut args = Vec::new();
        let mut operands = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut i = 0;
        let mut terminated = false;

        while i < tokens.len() {
            let tok = &tokens[i];
            if i == 0 && !tok.starts_with('-') {
                return Err(ParseError::MalformedFirstToken { token: tok.clone() });
            }
            if terminated {
                operands.push(tok.clone());
                i += 1;
                continue;
            }
            if tok == "--" {
                terminated = true;
                i += 1;
                continue;
            }
            if let Some(rest) = tok.strip_prefix("--") {
                let (name, attached) = match rest.find('=') {
                    Some(eq) => (&rest[..eq], Some(rest[eq + 1..].to_string())),
                    None => (rest, None),
                };
                let def = options.iter().find(|o| o.name == name)
                    .ok_or_else(|| ParseError::UnknownOption { name: format!("--{}", name) })?;
                check_repeatable_long(def, &mut seen)?;

                if def.kind().is_bool() {
                    if attached.is_some() {
                        return Err(ParseError::UnexpectedValue { name: format!("--{}", name) });
                    }
                    def.bind(&[])?;
                    args.push(record(def, Vec::new()));
                    i += 1;
                    continue;
                }

                let raw = match attached {
                    Some(v) => vec![v],
                    None => {
                        if def.required {
                            i += 1;
                            let next = tokens.get(i).cloned().ok_or_else(|| {
                                ParseError::MissingValue { name: format!("--{}", name) }
                            })?;
                            vec![next]
                        } else if i + 1 < tokens.len() {
                            return Err(ParseError::AmbiguousOptionalValue { name: format!("--{}", name) });
                        } else {
                            Vec::new()
                        }
                    }
                };
                def.bind(&raw)?;
                args.push(record(def, raw));
                i += 1;
                continue;
            }
            if tok.starts_with('-') && tok.len() > 1 {
                let chars: Vec<char> = tok[1..].chars().collect();
                let mut c = 0;
                while c < chars.len() {
                    let ch = chars[c];
                    let def = options.iter().find(|o| o.short == ch)
                        .ok_or_else(|| ParseError::UnknownOption { name: format!("-{}", ch) })?;
                    check_repeatable_long(def, &mut seen)?;
                    if def.kind().is_bool() {
                        def.bind(&[])?;
                        args.push(record(def, Vec::new()));
                        c += 1;
                    } else {
                        let remainder: String = chars[c + 1..].iter().collect();
                        let raw = if !remainder.is_empty() {
                            vec![remainder]
                        } else {
                            i += 1;
                            let next = tokens.get(i).cloned().ok_or_else(|| {
                                ParseError::MissingValue { name: format!("-{}", ch) }
                            })?;
                            vec![next]
                        };
                        def.bind(&raw)?;
                        args.push(record(def, raw));
                        c = chars.len();
                    }
                }
                i += 1;
                continue;
            }
            operands.push(tok.clone());
            i += 1;
        }

        Ok((args, operands))
    }

    pub(super) fn parse_goflag(options: &[OptionDef<'_>], tokens: &[String])
        -> Result<(Vec<ParsedArg>, Vec<String>), ParseError>
    {
        let mut args = Vec::new();
        let mut operands = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut i = 0;
        let mut terminated = false;

        while i < tokens.len() {
            let tok = &tokens[i];
            if terminated {
                operands.push(tok.clone());
                i += 1;
                continue;
            }
            if tok == "--" {
                terminated = true;
                i += 1;
                continue;
            }
            let stripped = tok.strip_prefix("--").or_else(|| tok.strip_prefix('-'));
            match stripped {
                Some(rest) if !rest.is_empty() => {
                    let (name, attached) = match rest.find('=') {
                        Some(eq) => (&rest[..eq], Some(rest[eq + 1..].to_string())),
                        None => (rest, None),
                    };
                    let def = options.iter().find(|o| o.name == name)
                        .ok_or_else(|| ParseError::UnknownOption { name: format!("-{}", name) })?;
                    check_repeatable_long(def, &mut seen)?;

                    if def.kind().is_bool() {
                        if let Some(v) = &attached {
                            if v != "true" && v != "false" {
                                return Err(ParseError::InvalidValue {
                                    name: format!("-{}", name), value: v.clone(),
                                });
                            }
                        }
                        def.bind(&[])?;
                        args.push(record(def, Vec::new()));
                        i += 1;
                        continue;
                    }

                    let raw = match attached {
                        Some(v) => vec![v],
                        None => {
                            i += 1;
                            let next = tokens.get(i).cloned().ok_or_else(|| {
                                ParseError::MissingValue { name: format!("-{}", name) }
                            })?;
                            vec![next]
                        }
                    };
                    def.bind(&raw)?;
                    args.push(record(def, raw));
                    i += 1;
                }
                _ => {
                    operands.push(tok.clone());
                    i += 1;
                }
            }
        }

        Ok((args, operands))
    }

    fn record(def: &OptionDef<'_>, raw: Vec<String>) -> ParsedArg {
        ParsedArg { name: def.name.to_string(), short: def.short, raw, required: def.required }
    }

    fn check_repeatable(def: &OptionDef<'_>, seen: &mut HashSet<char>, key: char) -> Result<(), ParseError> {
        if !def.repeatable && !seen.insert(key) {
            return Err(ParseError::NotRepeatable { name: format!("-{}", key) });
        }
        seen.insert(key);
        Ok(())
    }

    fn check_repeatable_long(def: &OptionDef<'_>, seen: &mut HashSet<String>) -> Result<(), ParseError> {
        let key = if !def.name.is_empty() { def.name.to_string() } else { def.short.to_string() };
        if !def.repeatable && seen.contains(&key) {
            return Err(ParseError::NotRepeatable { name: key });
        }
        seen.insert(key);
        Ok(())
    }
}
