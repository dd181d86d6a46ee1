// Copyright 2019 Lyndon Brown
//
// This file is part of the `cmdtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Help text rendering
//!
//! Fixed-shape usage text: a `Usage:` line, an optional `Commands:` section, then an `Options:`
//! section, each option or subcommand line column-aligned against the widest label in its
//! section plus a four-space gutter. Option-line formatting is dialect-specific: the GNU and
//! Go-flag dialects show both forms (`-h, --help`); POSIX shows the short form alone, since it
//! has no long-option syntax.

use crate::commands::Command;
use crate::options::OptionDef;
use crate::parser::Dialect;

const GUTTER: usize = 4;

/// Render the fixed-shape help text for `cmd`, as seen under `dialect`.
pub fn render<T>(cmd: &Command<'_, T>, dialect: Dialect) -> String {
    let mut out = String::new();

    out.push_str("Usage:\n    ");
    for ancestor in cmd.ancestors() {
        out.push_str(ancestor);
        out.push(' ');
    }
    out.push_str(cmd.name());
    if !cmd.subcommands().is_empty() {
        out.push_str(" [command]");
    }
    out.push('\n');

    if !cmd.usage().is_empty() {
        out.push('\n');
        out.push_str(cmd.usage());
        out.push('\n');
    }

    if !cmd.subcommands().is_empty() {
        out.push_str("\nCommands:\n");
        for sub in cmd.subcommands() {
            out.push_str("    ");
            out.push_str(sub.name());
            out.push('\n');
        }
    }

    if !cmd.options().is_empty() {
        out.push_str("\nOptions:\n");
        let labels: Vec<String> = cmd.options().iter().map(|o| option_label(o, dialect)).collect();
        let width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
        for (opt, label) in cmd.options().iter().zip(labels.iter()) {
            out.push_str(&format!("    {:<width$}{}{}\n", label,
                " ".repeat(GUTTER), opt.usage, width = width));
        }
    }

    out
}

fn option_label(opt: &OptionDef<'_>, dialect: Dialect) -> String {
    let has_long = !opt.name.is_empty();
    let has_short = opt.short != '\0';

    match dialect {
        Dialect::Posix => {
            if has_short {
                format!("-{}", opt.short)
            } else {
                format!("-{}", opt.name.chars().next().unwrap())
            }
        }
        Dialect::Gnu | Dialect::GoFlag => {
            match (has_short, has_long) {
                (true, true) => format!("-{}, --{}", opt.short, opt.name),
                (true, false) => format!("-{}", opt.short),
                (false, true) => format!("-{}, --{}", opt.name.chars().next().unwrap(), opt.name),
                (false, false) => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandBuilder;

    #[test]
    fn gnu_shows_both_forms() {
        let cmd: Command<()> = CommandBuilder::new("app").build().unwrap();
        let text = render(&cmd, Dialect::Gnu);
        assert!(text.contains("-h, --help"));
    }

    #[test]
    fn posix_shows_short_form_only() {
        let cmd: Command<()> = CommandBuilder::new("app").build().unwrap();
        let text = render(&cmd, Dialect::Posix);
        assert!(text.contains("-h"));
        assert!(!text.contains("--help"));
    }

    #[test]
    fn posix_long_only_option_renders_first_letter_with_a_single_dash() {
        let cmd: Command<()> = CommandBuilder::new("app")
            .add_bool_arg("alphabet", '\0', "", false, false, None)
            .build()
            .unwrap();
        let text = render(&cmd, Dialect::Posix);
        assert!(text.contains("-a"));
        assert!(!text.contains("--alphabet"));
    }

    #[test]
    fn gnu_long_only_option_shows_both_a_synthesized_short_and_the_long_form() {
        let cmd: Command<()> = CommandBuilder::new("app")
            .add_bool_arg("alphabet", '\0', "", false, false, None)
            .build()
            .unwrap();
        let text = render(&cmd, Dialect::Gnu);
        assert!(text.contains("-a, --alphabet"));
    }

    #[test]
    fn usage_line_lists_ancestors_and_sections() {
        let cmd: Command<()> = CommandBuilder::new("app")
            .add_subcommand(CommandBuilder::new("clone").usage("clone a repository"))
            .build()
            .unwrap();
        let text = render(&cmd, Dialect::Gnu);
        assert!(text.starts_with("Usage:\n    app [command]"));
        assert!(text.contains("Commands:\n    clone"));

        let clone = &cmd.subcommands()[0];
        let clone_text = render(clone, Dialect::Gnu);
        assert!(clone_text.starts_with("Usage:\n    app clone"));
    }
}
