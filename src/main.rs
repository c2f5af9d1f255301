// This file is part of the terraform-provider-entitle project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use tf_provider::serve;
use tracing_subscriber::EnvFilter;

use crate::entitle_provider::EntitleProvider;

mod client;
mod entitle_provider;
mod lookup;
mod resolve;
mod utils;
mod workflow;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the plugin handshake
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ENTITLE_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    serve("entitle", EntitleProvider::default()).await?;
    Ok(())
}
