// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Minimal liveness service: `GET /health` → `{"status": "Ok"}`.

use anyhow::{Context, Result};
use clap::Parser;
use kindling::constants::{HEALTH_SERVER_BIND_ADDRESS, HEALTH_SERVER_PORT};
use kindling::health;
use kindling::logging::init_tracing;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "kindling-health", version, about = "Serve GET /health")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = HEALTH_SERVER_PORT)]
    port: u16,

    /// Address to bind
    #[arg(long, env = "BIND_ADDRESS", default_value = HEALTH_SERVER_BIND_ADDRESS)]
    bind_address: IpAddr,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing();

    let addr = SocketAddr::new(args.bind_address, args.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    health::serve(listener).await.context("health service failed")
}
