// Copyright 2017 Lyndon Brown
//
// This file is part of the `cmdtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! A command tree and argument-parsing engine: declare a tree of commands and typed options with
//! a [`commands::CommandBuilder`], parse `argv` against it with [`parser::parse`], and dispatch
//! to run callbacks with [`runner::Runner`].
//!
//! # Documentation
//!
//! Most of this crate's documentation is found within its submodules: start at
//! [`commands`] for building a tree, [`parser`] for parsing it, and [`runner`] for running it.

#![deny(bare_trait_objects)]

mod binder;
pub mod commands;
pub mod help;
pub mod options;
pub mod parser;
pub mod runner;
