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

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resolve::Named;

/// Envelope of every single-object response
#[derive(Debug, Clone, Deserialize)]
pub(super) struct Single<T> {
    pub(super) result: T,
}

/// Envelope of every listing response
#[derive(Debug, Clone, Deserialize)]
pub(super) struct Listing<T> {
    pub(super) result: Vec<T>,
    pub(super) pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Pagination {
    #[serde(default)]
    pub(super) total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Who approves a step, or who gets notified about it
///
/// The tag is serialized as `type` and the payload, if any, as `entity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "entity")]
pub enum ApprovalEntity {
    User(UserRef),
    DirectoryGroup(NamedRef),
    OnCallIntegrationSchedule(NamedRef),
    DirectManager,
    IntegrationOwner,
    IntegrationMaintainer,
    ResourceMaintainer,
    ResourceOwner,
    TeamMember,
    Automatic,
}

impl ApprovalEntity {
    pub fn tag(&self) -> &'static str {
        match self {
            ApprovalEntity::User(_) => "User",
            ApprovalEntity::DirectoryGroup(_) => "DirectoryGroup",
            ApprovalEntity::OnCallIntegrationSchedule(_) => "OnCallIntegrationSchedule",
            ApprovalEntity::DirectManager => "DirectManager",
            ApprovalEntity::IntegrationOwner => "IntegrationOwner",
            ApprovalEntity::IntegrationMaintainer => "IntegrationMaintainer",
            ApprovalEntity::ResourceMaintainer => "ResourceMaintainer",
            ApprovalEntity::ResourceOwner => "ResourceOwner",
            ApprovalEntity::TeamMember => "TeamMember",
            ApprovalEntity::Automatic => "Automatic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRequest {
    pub name: String,
    pub rules: Vec<RuleRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRequest {
    pub sort_order: i32,
    pub under_duration: i32,
    pub any_schedule: bool,
    pub in_groups: Vec<IdRef>,
    pub in_schedules: Vec<IdRef>,
    pub approval_flow: ApprovalFlowRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovalFlowRequest {
    pub steps: Vec<StepRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRequest {
    pub sort_order: i32,
    pub operator: String,
    pub approval_entities: Vec<ApprovalEntity>,
    pub notified_entities: Vec<ApprovalEntity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Named for Workflow {
    fn id(&self) -> Uuid {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub under_duration: i32,
    #[serde(default)]
    pub any_schedule: bool,
    #[serde(default)]
    pub in_groups: Vec<NamedRef>,
    #[serde(default)]
    pub in_schedules: Vec<NamedRef>,
    #[serde(default)]
    pub approval_flow: ApprovalFlow,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApprovalFlow {
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Entities are kept as raw envelopes: the `type` field decides how the rest is decoded
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub approval_entities: Vec<serde_json::Value>,
    #[serde(default)]
    pub notified_entities: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Application {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: Uuid,
    pub name: String,
    pub application: Application,
    #[serde(default)]
    pub requestable: bool,
    #[serde(default)]
    pub workflow: Option<NamedRef>,
}

impl Named for Integration {
    fn id(&self) -> Uuid {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
}

/// Users are looked up by email
impl Named for User {
    fn id(&self) -> Uuid {
        self.id
    }
    fn name(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryGroup {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Named for DirectoryGroup {
    fn id(&self) -> Uuid {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}
