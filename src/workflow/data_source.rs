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

use tf_provider::value::ValueEmpty;
use tf_provider::{schema::Schema, AttributePath, DataSource, Diagnostics};

use crate::entitle_provider::ProviderData;
use crate::lookup::find_id;
use crate::utils::{WithSchema, WithValidate};

use super::convert::workflow_state;
use super::state::WorkflowDataSourceState;
use super::{report_api, report_convert, workflow_id};

#[derive(Debug, Default)]
pub struct WorkflowDataSource {
    data: Arc<ProviderData>,
}

impl WorkflowDataSource {
    pub fn new(data: Arc<ProviderData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl DataSource for WorkflowDataSource {
    type State<'a> = WorkflowDataSourceState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(WorkflowDataSourceState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = self.data.client(diags).await?;

        let id = if config.id.is_null() {
            let name = config.name.as_str();
            let client = &client;
            find_id(diags, "workflow", "name", name, move |page| async move {
                client
                    .list_workflows(page)
                    .await
                    .map_err(anyhow::Error::from)
            })
            .await?
        } else {
            workflow_id(diags, &config.id)?
        };

        let state = match client.get_workflow(id).await {
            Ok(workflow) => match workflow_state(workflow) {
                Ok(state) => state,
                Err(err) => {
                    report_convert(diags, err);
                    return None;
                }
            },
            Err(err) => {
                report_api(diags, "Failed to read workflow", Some(id), err);
                return None;
            }
        };

        if let Some(name) = config.name.as_deref_option() {
            if name != state.name.as_str() {
                diags.error(
                    "Workflow name mismatch",
                    format!(
                        "Workflow `{id}` is named `{}`, not `{name}`",
                        state.name.as_str()
                    ),
                    AttributePath::new("name"),
                );
                return None;
            }
        }

        Some(state.into())
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use httpmock::prelude::*;
    use serde_json::json;
    use tf_provider::value::Value;

    use crate::client::EntitleClient;

    use super::*;

    const WORKFLOW_ID: &str = "0d6c3f0e-54a7-4f7b-9d0e-5f7d1c2b3a41";

    fn data_source(server: &MockServer) -> WorkflowDataSource {
        let client = EntitleClient::new(&server.base_url(), "secret").unwrap();
        WorkflowDataSource::new(Arc::new(ProviderData::with_client(client)))
    }

    #[tokio::test]
    async fn read_by_name_resolves_then_fetches() {
        let server = MockServer::start_async().await;
        let first = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/public/v1/workflows")
                    .query_param("page", "1");
                then.status(200).json_body(json!({
                    "result": [{ "id": "11111111-1111-4111-8111-111111111111", "name": "other" }],
                    "pagination": { "totalPages": 2 }
                }));
            })
            .await;
        let second = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/public/v1/workflows")
                    .query_param("page", "2");
                then.status(200).json_body(json!({
                    "result": [{ "id": WORKFLOW_ID, "name": "break-glass" }],
                    "pagination": { "totalPages": 2 }
                }));
            })
            .await;
        let get = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/public/v1/workflows/{WORKFLOW_ID}"));
                then.status(200).json_body(json!({
                    "result": {
                        "id": WORKFLOW_ID,
                        "name": "break-glass",
                        "rules": [
                            { "sortOrder": 1, "underDuration": 7200, "approvalFlow": { "steps": [] } },
                            { "sortOrder": 0, "underDuration": 600, "approvalFlow": { "steps": [] } }
                        ]
                    }
                }));
            })
            .await;

        let mut diags = Diagnostics::default();
        let config = WorkflowDataSourceState {
            name: Value::Value(Cow::Borrowed("break-glass")),
            ..Default::default()
        };
        let state = data_source(&server)
            .read(&mut diags, config, Value::Null)
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        get.assert_async().await;
        assert_eq!(state.id.as_str(), WORKFLOW_ID);

        let Value::Value(rules) = &state.rules else {
            panic!("rules should be known");
        };
        let durations: Vec<_> = rules
            .iter()
            .filter_map(|rule| rule.as_ref_option())
            .map(|rule| rule.under_duration.clone())
            .collect();
        assert_eq!(durations, vec![Value::Value(600), Value::Value(7200)]);
    }

    #[tokio::test]
    async fn read_by_unknown_name_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/public/v1/workflows");
                then.status(200).json_body(json!({
                    "result": [],
                    "pagination": { "totalPages": 1 }
                }));
            })
            .await;

        let mut diags = Diagnostics::default();
        let config = WorkflowDataSourceState {
            name: Value::Value(Cow::Borrowed("missing")),
            ..Default::default()
        };
        let state = data_source(&server)
            .read(&mut diags, config, Value::Null)
            .await;

        assert!(state.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn read_by_id_rejects_another_name() {
        let server = MockServer::start_async().await;
        let get = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/public/v1/workflows/{WORKFLOW_ID}"));
                then.status(200).json_body(json!({
                    "result": { "id": WORKFLOW_ID, "name": "break-glass", "rules": [] }
                }));
            })
            .await;

        let mut diags = Diagnostics::default();
        let config = WorkflowDataSourceState {
            id: Value::Value(Cow::Borrowed(WORKFLOW_ID)),
            name: Value::Value(Cow::Borrowed("default")),
            ..Default::default()
        };
        let state = data_source(&server)
            .read(&mut diags, config, Value::Null)
            .await;

        get.assert_async().await;
        assert!(state.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn read_by_id_alone_fills_name() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/public/v1/workflows/{WORKFLOW_ID}"));
                then.status(200).json_body(json!({
                    "result": { "id": WORKFLOW_ID, "name": "break-glass", "rules": [] }
                }));
            })
            .await;

        let mut diags = Diagnostics::default();
        let config = WorkflowDataSourceState {
            id: Value::Value(Cow::Borrowed(WORKFLOW_ID)),
            ..Default::default()
        };
        let state = data_source(&server)
            .read(&mut diags, config, Value::Null)
            .await
            .unwrap();

        assert!(diags.errors.is_empty());
        assert_eq!(state.name.as_str(), "break-glass");
    }
}
