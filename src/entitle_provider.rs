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

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use tf_provider::schema::{AttributeConstraint, AttributeType};
use tf_provider::value::ValueString;
use tf_provider::{map, AttributePath, Block, Description, Diagnostics, Provider, Schema, ValueEmpty};

use crate::{
    client::{EntitleClient, DEFAULT_ENDPOINT},
    lookup::{DirectoryGroupDataSource, IntegrationDataSource, UserDataSource},
    utils::attribute,
    workflow::{WorkflowDataSource, WorkflowResource},
};

pub const API_KEY_ENV: &str = "ENTITLE_API_KEY";
pub const ENDPOINT_ENV: &str = "ENTITLE_ENDPOINT";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig<'a> {
    pub api_key: ValueString<'a>,
    pub endpoint: ValueString<'a>,
}

/// Client shared between the provider and its resources, set once the provider is configured
#[derive(Debug, Default)]
pub struct ProviderData {
    client: RwLock<Option<EntitleClient>>,
}

impl ProviderData {
    pub async fn client(&self, diags: &mut Diagnostics) -> Option<EntitleClient> {
        let client = self.client.read().await.clone();
        if client.is_none() {
            diags.root_error(
                "Provider not configured",
                "The Entitle provider must be configured before its resources and data sources are used.",
            );
        }
        client
    }

    #[cfg(test)]
    pub fn with_client(client: EntitleClient) -> Self {
        Self {
            client: RwLock::new(Some(client)),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct EntitleProvider {
    data: Arc<ProviderData>,
}

fn setting(value: &ValueString<'_>, env: &str) -> Option<String> {
    match value.as_deref_option() {
        Some(value) if !value.is_empty() => Some(value.to_owned()),
        _ => std::env::var(env).ok().filter(|value| !value.is_empty()),
    }
}

#[async_trait]
impl Provider for EntitleProvider {
    type Config<'a> = ProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        let mut api_key = attribute(
            AttributeType::String,
            AttributeConstraint::Optional,
            "Entitle API key, defaults to the `ENTITLE_API_KEY` environment variable",
        );
        api_key.sensitive = true;

        Some(Schema {
            version: 1,
            block: Block {
                description: Description::plain("entitle"),
                attributes: map! {
                    "api_key" => api_key,
                    "endpoint" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Optional,
                        "Entitle API endpoint, defaults to the `ENTITLE_ENDPOINT` environment variable or https://api.entitle.io",
                    ),
                },
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        if let Some(endpoint) = config.endpoint.as_deref_option() {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                diags.error(
                    "Invalid endpoint",
                    format!("`{endpoint}` must be an http or https URL"),
                    AttributePath::new("endpoint"),
                );
            }
        }

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let Some(api_key) = setting(&config.api_key, API_KEY_ENV) else {
            diags.error(
                "Missing API key",
                format!("Set `api_key` in the provider block or the `{API_KEY_ENV}` environment variable."),
                AttributePath::new("api_key"),
            );
            return None;
        };
        let endpoint =
            setting(&config.endpoint, ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());

        match EntitleClient::new(&endpoint, &api_key) {
            Ok(client) => {
                tracing::info!(%endpoint, %terraform_version, "provider configured");
                *self.data.client.write().await = Some(client);
                Some(())
            }
            Err(err) => {
                diags.root_error("Failed to create the Entitle client", err.to_string());
                None
            }
        }
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<std::collections::HashMap<String, Box<dyn tf_provider::resource::DynamicResource>>>
    {
        Some(map! {
            "workflow" => WorkflowResource::new(self.data.clone()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<
        std::collections::HashMap<String, Box<dyn tf_provider::data_source::DynamicDataSource>>,
    > {
        Some(map! {
            "workflow"        => WorkflowDataSource::new(self.data.clone()),
            "integration"     => IntegrationDataSource::new(self.data.clone()),
            "user"            => UserDataSource::new(self.data.clone()),
            "directory_group" => DirectoryGroupDataSource::new(self.data.clone()),
        })
    }
}
