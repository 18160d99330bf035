// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `fndeploy serve` command - Run the sample handlers locally.

use super::{CommandError, CommandResult};

pub async fn execute(port: u16) -> CommandResult {
    println!("Serving sample functions on port {}", port);
    println!("  POST /multiply   {{\"x\": 3, \"y\": 4}}");
    println!("  GET  /greeting");
    println!();

    fndeploy_functions::serve(port)
        .await
        .map_err(|e| CommandError::Serve {
            message: e.to_string(),
        })
}
