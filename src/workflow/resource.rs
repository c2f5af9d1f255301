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

use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{schema::Schema, Diagnostics, Resource};

use crate::entitle_provider::ProviderData;
use crate::utils::{WithNormalize, WithSchema, WithValidate};

use super::convert::{has_unknown_values, workflow_request, workflow_state};
use super::state::WorkflowState;
use super::{report_api, report_convert, workflow_id};

#[derive(Debug, Default)]
pub struct WorkflowResource {
    pub(super) data: Arc<ProviderData>,
}

impl WorkflowResource {
    pub fn new(data: Arc<ProviderData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Resource for WorkflowResource {
    type State<'a> = WorkflowState<'a>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(WorkflowState::schema())
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
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.data.client(diags).await?;
        let id = workflow_id(diags, &state.id)?;

        match client.get_workflow(id).await {
            Ok(workflow) => match workflow_state(workflow) {
                Ok(state) => Some((state, private_state)),
                Err(err) => {
                    report_convert(diags, err);
                    None
                }
            },
            Err(err) => {
                report_api(diags, "Failed to read workflow", Some(id), err);
                None
            }
        }
    }

    async fn plan_create<'a>(
        &self,
        diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state.clone();
        state.id = Value::Unknown;
        state.normalize(diags);

        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(
        Self::State<'a>,
        Self::PrivateState<'a>,
        Vec<tf_provider::AttributePath>,
    )> {
        // Values read back from the API only change when the request itself changes.
        // Unknown ids are left out of requests, so they cannot be compared that way.
        let unchanged = !has_unknown_values(&proposed_state)
            && match (workflow_request(&prior_state), workflow_request(&proposed_state)) {
                (Ok(prior), Ok(proposed)) => prior == proposed,
                _ => false,
            };
        if unchanged {
            return Some((prior_state, prior_private_state, vec![]));
        }

        let mut state = proposed_state.clone();
        state.normalize(diags);
        state.id = prior_state.id.clone();

        Some((state, prior_private_state, vec![]))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        _prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        Some(())
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.data.client(diags).await?;
        let request = match workflow_request(&planned_state) {
            Ok(request) => request,
            Err(err) => {
                report_convert(diags, err);
                return None;
            }
        };

        let workflow = match client.create_workflow(&request).await {
            Ok(workflow) => workflow,
            Err(err) => {
                report_api(diags, "Failed to create workflow", None, err);
                return None;
            }
        };
        tracing::info!(id = %workflow.id, name = %workflow.name, "workflow created");

        match workflow_state(workflow) {
            Ok(state) => Some((state, private_state)),
            Err(err) => {
                report_convert(diags, err);
                None
            }
        }
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.data.client(diags).await?;
        let id = workflow_id(diags, &planned_state.id)?;
        let request = match workflow_request(&planned_state) {
            Ok(request) => request,
            Err(err) => {
                report_convert(diags, err);
                return None;
            }
        };

        let workflow = match client.update_workflow(id, &request).await {
            Ok(workflow) => workflow,
            Err(err) => {
                report_api(diags, "Failed to update workflow", Some(id), err);
                return None;
            }
        };
        tracing::info!(%id, name = %workflow.name, "workflow updated");

        match workflow_state(workflow) {
            Ok(state) => Some((state, private_state)),
            Err(err) => {
                report_convert(diags, err);
                None
            }
        }
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let client = self.data.client(diags).await?;
        let id = workflow_id(diags, &state.id)?;

        match client.delete_workflow(id).await {
            Ok(()) => {
                tracing::info!(%id, "workflow deleted");
                Some(())
            }
            Err(err) => {
                report_api(diags, "Failed to delete workflow", Some(id), err);
                None
            }
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.data.client(diags).await?;
        let Ok(id) = id.parse() else {
            diags.root_error(
                "Invalid import id",
                format!("`{id}` is not a valid workflow identifier"),
            );
            return None;
        };

        match client.get_workflow(id).await {
            Ok(workflow) => match workflow_state(workflow) {
                Ok(state) => Some((state, Value::Null)),
                Err(err) => {
                    report_convert(diags, err);
                    None
                }
            },
            Err(err) => {
                report_api(diags, "Failed to import workflow", Some(id), err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use httpmock::prelude::*;
    use serde_json::json;

    use crate::client::EntitleClient;
    use crate::workflow::state::{ApprovalFlowState, EntityState, RefState, RuleState, StepState};

    use super::*;

    const WORKFLOW_ID: &str = "6f1c2a4e-9a55-4d8a-8c1e-0f3a2b7c9d10";

    fn resource(server: &MockServer) -> WorkflowResource {
        let client = EntitleClient::new(&server.base_url(), "secret").unwrap();
        WorkflowResource::new(Arc::new(ProviderData::with_client(client)))
    }

    fn planned<'a>() -> WorkflowState<'a> {
        let mut state = WorkflowState {
            id: Value::Null,
            name: Value::Value(Cow::Borrowed("default")),
            rules: Value::Value(vec![Value::Value(RuleState {
                sort_order: Value::Value(0),
                under_duration: Value::Value(3600),
                any_schedule: Value::Null,
                in_groups: Value::Null,
                in_schedules: Value::Null,
                approval_flow: Value::Value(ApprovalFlowState {
                    steps: Value::Value(vec![Value::Value(StepState {
                        sort_order: Value::Value(0),
                        operator: Value::Value(Cow::Borrowed("and")),
                        approval_entities: Value::Value(vec![Value::Value(EntityState {
                            kind: Value::Value(Cow::Borrowed("DirectManager")),
                            ..Default::default()
                        })]),
                        notified_entities: Value::Null,
                    })]),
                }),
            })]),
        };
        state.normalize(&mut Diagnostics::default());
        state
    }

    #[tokio::test]
    async fn create_reads_back_the_workflow() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/public/v1/workflows");
                then.status(201).json_body(json!({
                    "result": {
                        "id": WORKFLOW_ID,
                        "name": "default",
                        "rules": [{
                            "sortOrder": 0,
                            "underDuration": 3600,
                            "anySchedule": false,
                            "inGroups": [],
                            "inSchedules": [],
                            "approvalFlow": { "steps": [{
                                "sortOrder": 0,
                                "operator": "and",
                                "approvalEntities": [{ "type": "DirectManager" }],
                                "notifiedEntities": []
                            }] }
                        }]
                    }
                }));
            })
            .await;

        let mut diags = Diagnostics::default();
        let (state, _) = resource(&server)
            .create(
                &mut diags,
                planned(),
                planned(),
                Value::Null,
                Value::Null,
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(diags.errors.is_empty());
        assert_eq!(state.id.as_str(), WORKFLOW_ID);

        let mut expected = planned();
        expected.id = Value::Value(Cow::Borrowed(WORKFLOW_ID));
        assert_eq!(state, expected);
    }

    #[tokio::test]
    async fn create_rejects_invalid_state_without_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/public/v1/workflows");
                then.status(201);
            })
            .await;

        let mut state = planned();
        if let Value::Value(rules) = &mut state.rules {
            if let Value::Value(rule) = &mut rules[0] {
                rule.under_duration = Value::Null;
            }
        }

        let mut diags = Diagnostics::default();
        let created = resource(&server)
            .create(&mut diags, state.clone(), state, Value::Null, Value::Null)
            .await;

        assert!(created.is_none());
        assert_eq!(diags.errors.len(), 1);
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn read_of_missing_workflow_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/public/v1/workflows/{WORKFLOW_ID}"));
                then.status(404);
            })
            .await;

        let mut state = planned();
        state.id = Value::Value(Cow::Borrowed(WORKFLOW_ID));

        let mut diags = Diagnostics::default();
        let read = resource(&server)
            .read(&mut diags, state, Value::Null, Value::Null)
            .await;

        assert!(read.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn plan_update_keeps_prior_when_request_is_unchanged() {
        let server = MockServer::start_async().await;
        let mut prior = planned();
        prior.id = Value::Value(Cow::Borrowed(WORKFLOW_ID));

        let mut diags = Diagnostics::default();
        let (state, _, replace) = resource(&server)
            .plan_update(
                &mut diags,
                prior.clone(),
                prior.clone(),
                prior.clone(),
                Value::Null,
                Value::Null,
            )
            .await
            .unwrap();

        assert_eq!(state, prior);
        assert!(replace.is_empty());
    }

    #[tokio::test]
    async fn plan_update_keeps_references_known_only_at_apply() {
        let server = MockServer::start_async().await;
        let mut prior = planned();
        prior.id = Value::Value(Cow::Borrowed(WORKFLOW_ID));

        let mut proposed = prior.clone();
        if let Value::Value(rules) = &mut proposed.rules {
            if let Value::Value(rule) = &mut rules[0] {
                rule.in_groups = Value::Value(vec![Value::Value(RefState {
                    id: Value::Unknown,
                    name: Value::Unknown,
                })]);
            }
        }

        let mut diags = Diagnostics::default();
        let (state, _, _) = resource(&server)
            .plan_update(
                &mut diags,
                prior.clone(),
                proposed.clone(),
                proposed,
                Value::Null,
                Value::Null,
            )
            .await
            .unwrap();

        assert_ne!(state, prior);
        assert_eq!(state.id.as_str(), WORKFLOW_ID);
        let Value::Value(rules) = &state.rules else {
            panic!("rules should be known");
        };
        let Value::Value(rule) = &rules[0] else {
            panic!("rule should be known");
        };
        let Value::Value(groups) = &rule.in_groups else {
            panic!("groups should be known");
        };
        assert_eq!(groups.len(), 1);
        assert!(matches!(&groups[0], Value::Value(group) if group.id.is_unknown()));
    }
}
