// Copyright 2024 Lyndon Brown
//
// This file is part of the `cmdtree` command-line argument parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Shared test helpers: arguments normally come from `std::env::args()` as owned `String`s, so
//! tests build their argv the same way rather than working with `&str` slices directly.

/// Build a `Vec<String>` from a list of `&str` literals, mirroring how argv actually arrives.
#[macro_export]
macro_rules! argv {
    ( $($e:expr),* $(,)? ) => {
        vec![$(String::from($e)),*]
    };
}
