// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use feedback_ingest::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    if let Err(e) = feedback_ingest::run::run(config).await {
        tracing::error!("fatal: {e:#}");
        std::process::exit(1);
    }
}
