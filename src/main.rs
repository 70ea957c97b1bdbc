// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Triton CLI entrypoint.
//!
//! Runs the interactive TUI over the built-in demo workspace, or an empty
//! one with `--empty`.

use std::error::Error;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--empty]\n\nRuns the keyboard block navigator. By default a small demo workspace is\nloaded; --empty starts with an empty workspace (use `t` to add blocks)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    empty: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--empty" => {
                if options.empty {
                    return Err(());
                }
                options.empty = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "triton".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.empty {
            let workspace =
                triton::model::Workspace::new(triton::model::WorkspaceId::new("scratch")?);
            let session =
                triton::session::Session::new(workspace, triton::model::builtin_catalog());
            triton::tui::run_with_session(session)?;
        } else {
            triton::tui::run()?;
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("triton: {err}");
        std::process::exit(1);
    }
}
