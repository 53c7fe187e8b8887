// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// smartcrop — command-line entry point. Initialises logging and dispatches to
// the subcommand.

mod cli;
mod crop_cmd;
mod png_cmd;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Crop {
            ref input,
            ref output,
            bottom_padding,
            right_padding,
            bottom_only,
            ref config,
            ref debug_image,
            ref rasterizer,
            json,
        } => crop_cmd::run(&crop_cmd::CropArgs {
            input,
            output: output.as_deref(),
            bottom_padding,
            right_padding,
            bottom_only,
            config: config.as_deref(),
            debug_image: debug_image.as_deref(),
            rasterizer: rasterizer.as_deref(),
            json,
        }),
        Commands::Png {
            ref input,
            ref output,
            ref rasterizer,
        } => png_cmd::run(input, output, rasterizer.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "smartcrop failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
