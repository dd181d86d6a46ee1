// Copyright 2024 Lyndon Brown
//
// This file is part of the `cmdtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Playground program for the `cmdtree` library
//!
//! Builds a toy three-subcommand tree (`new`, `build`, `serve`) shaped like the front door of a
//! static-site scaffolder, parses `std::env::args()` against it, and logs what each resolved
//! command would have done. It does not scaffold anything — that glue lives outside this crate's
//! scope (see `cmdtree`'s own docs); this binary exists only to exercise the library end to end.

use cmdtree::commands::CommandBuilder;
use cmdtree::parser::{self, Dialect, Settings};
use cmdtree::runner::Runner;

struct Ctx;

fn main() {
    env_logger::init();

    let mut site_name = String::new();
    let mut out_dir = String::new();
    let mut verbose = false;
    let mut port: u32 = 8080;

    let root = CommandBuilder::<Ctx>::new("site")
        .usage("scaffold, build, and preview a static site")
        .add_subcommand(
            CommandBuilder::new("new")
                .usage("create a new site directory")
                .add_string_arg("name", 'n', "name of the site to create", false, true,
                    Some(&mut site_name))
                .run(|_ctx, operands| {
                    log::info!("would scaffold a new site; operands = {:?}", operands);
                }),
        )
        .add_subcommand(
            CommandBuilder::new("build")
                .usage("render the site to an output directory")
                .add_string_arg("out", 'o', "output directory", false, true, Some(&mut out_dir))
                .add_bool_arg("verbose", 'V', "log each rendered page", false, false,
                    Some(&mut verbose))
                .run(|_ctx, operands| {
                    log::info!("would build the site; operands = {:?}", operands);
                }),
        )
        .add_subcommand(
            CommandBuilder::new("serve")
                .usage("serve the built site locally")
                .add_uint_arg("port", 'p', "port to listen on", false, true, Some(&mut port))
                .run(|_ctx, operands| {
                    log::info!("would serve the site; operands = {:?}", operands);
                }),
        )
        .run(|_ctx, operands| {
            log::debug!("root command invoked directly; operands = {:?}", operands);
        })
        .build()
        .unwrap_or_else(|err| {
            log::error!("invalid command tree: {}", err);
            std::process::exit(1);
        });

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = Settings { dialect: Dialect::Gnu, ..Settings::default() };

    let parsed = match parser::parse(&root, &args, &settings) {
        Ok(parsed) => parsed,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };

    let runner = Runner::new(settings.dialect, env!("CARGO_PKG_VERSION"));
    let mut stdout = std::io::stdout();
    if let Err(err) = runner.run(&parsed, &Ctx, &mut stdout) {
        log::error!("failed writing output: {}", err);
        std::process::exit(1);
    }
}
