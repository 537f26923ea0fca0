// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Fabstir Image Labeler CLI
#[derive(Parser, Debug)]
#[command(name = "image-labeler")]
#[command(version)]
#[command(about = "Label images with a translated classification", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP labeling service
    Serve(commands::ServeArgs),

    /// Label a local image file and print the JSON result
    Label(commands::LabelArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve(args) => commands::serve(args).await,
        Commands::Label(args) => commands::label(args).await,
    }
}
