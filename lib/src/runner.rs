// Copyright 2019 Lyndon Brown
//
// This file is part of the `cmdtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Dispatch
//!
//! [`Runner::run`] takes a [`ParsedCommand`] tree and invokes callbacks: `--help`/`-h` short-
//! circuits into the help renderer and skips every run callback; `--version`/`-v` short-circuits
//! into a version line (`"<name> <version>\n"`, using whichever command in the tree the flag was
//! found on, paired with the single version string the `Runner` itself was configured with) and
//! likewise skips every run callback; otherwise the root command's own run callback fires (if
//! any), followed by every resolved descendant's run callback, pre-order, depth first — a
//! three-level-deep resolution such as `testcmd foo bar` fires all three callbacks from one
//! `run()` call.

use crate::help;
use crate::parser::{Dialect, ParsedCommand};
use std::io::Write;

/// Drives a parsed command tree to completion.
///
/// Unlike [`crate::commands::Command`], which carries no version information at all, the
/// `Runner` is where a single version string lives — it is applied uniformly to whichever
/// command's `--version`/`-v` fired, matching the shape of the tool this crate is modeled on
/// (there, the version string is a `Runner` constructor argument, not a per-command property).
pub struct Runner<'a> {
    dialect: Dialect,
    version: &'a str,
}

impl<'a> Runner<'a> {
    pub fn new(dialect: Dialect, version: &'a str) -> Self {
        Self { dialect, version }
    }

    /// Run `parsed` against `ctx`, writing help/version output to `out`.
    pub fn run<T, W: Write>(&self, parsed: &ParsedCommand<'_, '_, T>, ctx: &T, out: &mut W)
        -> std::io::Result<()>
    {
        if parsed.help_requested {
            write!(out, "{}", help::render(parsed.command(), self.dialect))?;
            return Ok(());
        }
        if parsed.version_requested {
            writeln!(out, "{} {}", parsed.command().name(), self.version)?;
            return Ok(());
        }

        Self::dispatch(parsed, ctx);
        Ok(())
    }

    /// Invoke `parsed`'s own run callback, then recurse pre-order into every resolved
    /// descendant — not just the immediate children.
    fn dispatch<T>(parsed: &ParsedCommand<'_, '_, T>, ctx: &T) {
        if let Some(run) = &parsed.command().run {
            run(ctx, &parsed.operands);
        }
        for sub in &parsed.subcommands {
            Self::dispatch(sub, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandBuilder;
    use crate::parser::{self, Settings};
    use std::cell::RefCell;

    #[test]
    fn help_flag_short_circuits_run_callbacks() {
        let ran = RefCell::new(false);
        let cmd = CommandBuilder::new("app")
            .run(|_: &(), _ops: &[String]| *ran.borrow_mut() = true)
            .build()
            .unwrap();
        let settings = Settings::default();
        let args: Vec<String> = vec!["--help".to_string()];
        let parsed = parser::parse(&cmd, &args, &settings).unwrap();

        let runner = Runner::new(settings.dialect, "1.0.0");
        let mut out = Vec::new();
        runner.run(&parsed, &(), &mut out).unwrap();

        assert!(!*ran.borrow());
        assert!(String::from_utf8(out).unwrap().starts_with("Usage:\n    app"));
    }

    #[test]
    fn version_flag_prints_name_and_version() {
        let cmd = CommandBuilder::<()>::new("app").build().unwrap();
        let settings = Settings::default();
        let args: Vec<String> = vec!["--version".to_string()];
        let parsed = parser::parse(&cmd, &args, &settings).unwrap();

        let runner = Runner::new(settings.dialect, "2.3.4");
        let mut out = Vec::new();
        runner.run(&parsed, &(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "app 2.3.4\n");
    }

    #[test]
    fn version_flag_on_subcommand_uses_subcommand_name() {
        let cmd = CommandBuilder::<()>::new("app")
            .add_subcommand(CommandBuilder::new("child"))
            .build()
            .unwrap();
        let settings = Settings::default();
        let args: Vec<String> = vec!["child".to_string(), "--version".to_string()];
        let parsed = parser::parse(&cmd, &args, &settings).unwrap();

        let runner = Runner::new(settings.dialect, "2.3.4");
        let mut out = Vec::new();
        runner.run(&parsed.subcommands[0], &(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "child 2.3.4\n");
    }

    #[test]
    fn root_and_every_resolved_descendant_run_in_pre_order() {
        let order = RefCell::new(Vec::new());
        let cmd = CommandBuilder::new("app")
            .run(|_: &(), _: &[String]| order.borrow_mut().push("root"))
            .add_subcommand(CommandBuilder::new("child")
                .run(|_: &(), _: &[String]| order.borrow_mut().push("child"))
                .add_subcommand(CommandBuilder::new("grandchild")
                    .run(|_: &(), _: &[String]| order.borrow_mut().push("grandchild"))))
            .build()
            .unwrap();
        let settings = Settings::default();
        let args: Vec<String> = vec!["child".to_string(), "grandchild".to_string()];
        let parsed = parser::parse(&cmd, &args, &settings).unwrap();

        let runner = Runner::new(settings.dialect, "1.0.0");
        let mut out = Vec::new();
        runner.run(&parsed, &(), &mut out).unwrap();

        assert_eq!(*order.borrow(), vec!["root", "child", "grandchild"]);
    }
}
