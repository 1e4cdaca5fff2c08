// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::Result;
use clap::Parser;
use kindling::cli::Cli;
use kindling::logging::init_tracing;
use tracing::error;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Every step is awaited in order; a single thread is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        cli.run().await.map_err(|e| {
            error!("Bootstrap failed: {e}");
            anyhow::Error::new(e)
        })
    })
}
