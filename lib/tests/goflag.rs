// Copyright 2024 Lyndon Brown
//
// This file is part of the `cmdtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! GoFlag-dialect scenarios (spec.md's explicitly optional third dialect): single- or
//! double-dash `-name`/`--name`, attached `=value` or a detached following token, with no
//! required/optional distinction (unlike GNU).

#[macro_use]
mod common;

use cmdtree::commands::CommandBuilder;
use cmdtree::parser::{self, Dialect, ParseError, Settings};

fn goflag_settings() -> Settings {
    Settings { dialect: Dialect::GoFlag, ..Settings::default() }
}

#[test]
fn single_and_double_dash_are_both_accepted() {
    let mut a = String::new();
    let cmd = CommandBuilder::new("testcmd")
        .add_string_arg("name", 'n', "", false, true, Some(&mut a))
        .build()
        .unwrap();
    parser::parse(&cmd, &argv!["-name=x"], &goflag_settings()).unwrap();
    assert_eq!(a, "x");

    let mut b = String::new();
    let cmd2 = CommandBuilder::new("testcmd")
        .add_string_arg("name", 'n', "", false, true, Some(&mut b))
        .build()
        .unwrap();
    parser::parse(&cmd2, &argv!["--name=x"], &goflag_settings()).unwrap();
    assert_eq!(b, "x");
}

#[test]
fn detached_value_is_accepted_regardless_of_required_flag() {
    let mut a = String::new();
    let cmd = CommandBuilder::new("testcmd")
        .add_string_arg("name", 'n', "", false, false, Some(&mut a))
        .build()
        .unwrap();
    parser::parse(&cmd, &argv!["-name", "x"], &goflag_settings()).unwrap();
    assert_eq!(a, "x");
}

#[test]
fn bool_flag_accepts_a_literal_true_or_false_when_attached() {
    let mut v = false;
    let cmd = CommandBuilder::new("testcmd")
        .add_bool_arg("verbose", 'v', "", false, false, Some(&mut v))
        .build()
        .unwrap();
    parser::parse(&cmd, &argv!["-verbose=true"], &goflag_settings()).unwrap();
    assert!(v);
}

#[test]
fn bool_flag_rejects_a_non_boolean_attached_value() {
    let cmd = CommandBuilder::<()>::new("testcmd")
        .add_bool_arg("verbose", 'v', "", false, false, None)
        .build()
        .unwrap();
    let err = parser::parse(&cmd, &argv!["-verbose=maybe"], &goflag_settings()).unwrap_err();
    assert!(matches!(err, ParseError::InvalidValue { .. }));
}
