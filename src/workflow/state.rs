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

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType};
use tf_provider::value::{Value, ValueList, ValueNumber, ValueString};
use tf_provider::{map, Block, Description, Schema};

use crate::utils::{attribute, WithSchema};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub rules: ValueList<Value<RuleState<'a>>>,
}

/// Same shape as the resource, but looked up by `id` or `name`
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDataSourceState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub rules: ValueList<Value<RuleState<'a>>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleState<'a> {
    pub sort_order: ValueNumber,
    pub under_duration: ValueNumber,
    pub any_schedule: Value<bool>,
    pub in_groups: ValueList<Value<RefState<'a>>>,
    pub in_schedules: ValueList<Value<RefState<'a>>>,
    pub approval_flow: Value<ApprovalFlowState<'a>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalFlowState<'a> {
    pub steps: ValueList<Value<StepState<'a>>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepState<'a> {
    pub sort_order: ValueNumber,
    pub operator: ValueString<'a>,
    pub approval_entities: ValueList<Value<EntityState<'a>>>,
    pub notified_entities: ValueList<Value<EntityState<'a>>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityState<'a> {
    #[serde(rename = "type")]
    pub kind: ValueString<'a>,
    pub user: Value<UserRefState<'a>>,
    pub group: Value<RefState<'a>>,
    pub schedule: Value<RefState<'a>>,
}

/// Reference to a directory group or an on-call schedule
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRefState<'a> {
    pub id: ValueString<'a>,
    pub email: ValueString<'a>,
}

impl<'a> From<WorkflowState<'a>> for WorkflowDataSourceState<'a> {
    fn from(value: WorkflowState<'a>) -> Self {
        Self {
            id: value.id,
            name: value.name,
            rules: value.rules,
        }
    }
}

/// Constraints of the nested attributes, depending on who owns the values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ownership {
    /// Written by the user, completed by the API
    Config,
    /// Entirely read from the API
    Computed,
}

impl Ownership {
    fn required(self) -> AttributeConstraint {
        match self {
            Ownership::Config => AttributeConstraint::Required,
            Ownership::Computed => AttributeConstraint::Computed,
        }
    }
    fn optional(self) -> AttributeConstraint {
        match self {
            Ownership::Config => AttributeConstraint::OptionalComputed,
            Ownership::Computed => AttributeConstraint::Computed,
        }
    }
}

fn reference_attributes(ownership: Ownership, label: &str, key: &str) -> HashMap<String, Attribute> {
    map! {
        "id" => attribute(
            AttributeType::String,
            ownership.required(),
            &format!("Identifier of the {label}"),
        ),
        key => attribute(
            AttributeType::String,
            AttributeConstraint::Computed,
            &format!("{key} of the {label}, filled from the API"),
        ),
    }
}

fn entity_attributes(ownership: Ownership) -> HashMap<String, Attribute> {
    let optional = match ownership {
        Ownership::Config => AttributeConstraint::Optional,
        Ownership::Computed => AttributeConstraint::Computed,
    };
    map! {
        "type" => attribute(
            AttributeType::String,
            ownership.required(),
            "Kind of entity: `User`, `Group`, `Schedule`, or one of the categories `DirectManager`, `IntegrationOwner`, `IntegrationMaintainer`, `ResourceMaintainer`, `ResourceOwner`, `TeamMember`, `Automatic`",
        ),
        "user" => attribute(
            AttributeType::AttributeSingle(reference_attributes(ownership, "user", "email")),
            optional.clone(),
            "User, required when `type` is `User`",
        ),
        "group" => attribute(
            AttributeType::AttributeSingle(reference_attributes(ownership, "directory group", "name")),
            optional.clone(),
            "Directory group, required when `type` is `Group`",
        ),
        "schedule" => attribute(
            AttributeType::AttributeSingle(reference_attributes(ownership, "on-call schedule", "name")),
            optional,
            "On-call schedule, required when `type` is `Schedule`",
        ),
    }
}

fn step_attributes(ownership: Ownership) -> HashMap<String, Attribute> {
    map! {
        "sort_order" => attribute(
            AttributeType::Number,
            ownership.required(),
            "Position of the step within the approval flow",
        ),
        "operator" => attribute(
            AttributeType::String,
            ownership.required(),
            "How the approval entities of the step are combined (`and`, `or`)",
        ),
        "approval_entities" => attribute(
            AttributeType::AttributeList(entity_attributes(ownership)),
            ownership.optional(),
            "Entities allowed to approve the step",
        ),
        "notified_entities" => attribute(
            AttributeType::AttributeList(entity_attributes(ownership)),
            ownership.optional(),
            "Entities notified about the step (`Automatic` is not allowed here)",
        ),
    }
}

fn rule_attributes(ownership: Ownership) -> HashMap<String, Attribute> {
    map! {
        "sort_order" => attribute(
            AttributeType::Number,
            ownership.required(),
            "Position of the rule within the workflow",
        ),
        "under_duration" => attribute(
            AttributeType::Number,
            ownership.required(),
            "The rule applies to requests shorter than this duration, in seconds",
        ),
        "any_schedule" => attribute(
            AttributeType::Bool,
            ownership.optional(),
            "The rule applies regardless of on-call schedules, conflicts with `in_schedules`",
        ),
        "in_groups" => attribute(
            AttributeType::AttributeList(reference_attributes(ownership, "directory group", "name")),
            ownership.optional(),
            "The rule applies to requesters in these directory groups",
        ),
        "in_schedules" => attribute(
            AttributeType::AttributeList(reference_attributes(ownership, "on-call schedule", "name")),
            ownership.optional(),
            "The rule applies to requesters on call in these schedules",
        ),
        "approval_flow" => attribute(
            AttributeType::AttributeSingle(map! {
                "steps" => attribute(
                    AttributeType::AttributeList(step_attributes(ownership)),
                    ownership.required(),
                    "Ordered approval steps",
                ),
            }),
            ownership.required(),
            "Approval flow of the rule",
        ),
    }
}

impl<'a> WithSchema for WorkflowState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                description: Description::plain("Entitle approval workflow"),
                attributes: map! {
                    "id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Identifier of the workflow",
                    ),
                    "name" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Name of the workflow",
                    ),
                    "rules" => attribute(
                        AttributeType::AttributeList(rule_attributes(Ownership::Config)),
                        AttributeConstraint::Required,
                        "Rules of the workflow, evaluated by ascending `sort_order`",
                    ),
                },
                ..Default::default()
            },
        }
    }
}

impl<'a> WithSchema for WorkflowDataSourceState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                description: Description::plain("Entitle approval workflow, looked up by id or by name"),
                attributes: map! {
                    "id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Identifier of the workflow",
                    ),
                    "name" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Name of the workflow, used when `id` is not set",
                    ),
                    "rules" => attribute(
                        AttributeType::AttributeList(rule_attributes(Ownership::Computed)),
                        AttributeConstraint::Computed,
                        "Rules of the workflow, ordered by `sort_order`",
                    ),
                },
                ..Default::default()
            },
        }
    }
}
