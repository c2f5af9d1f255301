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

//! Conversion between the workflow Terraform state and the Entitle wire format.
//!
//! Outbound (state to request) is strict: an unknown entity type, or a type whose payload is
//! missing, aborts the whole conversion. Inbound (response to state) skips entities whose type
//! is not recognized, with a warning. Rules and steps coming back from the API are stably
//! sorted by `sort_order`.

use std::borrow::Cow;
use std::fmt::Display;

use serde::Deserialize;
use tf_provider::value::{Value, ValueList, ValueNumber, ValueString};
use tf_provider::AttributePath;
use thiserror::Error;
use uuid::Uuid;

use crate::client::models::{
    ApprovalEntity, ApprovalFlowRequest, IdRef, NamedRef, Rule, RuleRequest, Step, StepRequest,
    UserRef, Workflow, WorkflowRequest,
};
use crate::utils::DisplayJoinable;

use super::state::{
    ApprovalFlowState, EntityState, RefState, RuleState, StepState, UserRefState, WorkflowState,
};

/// Entity types accepted in the Terraform configuration
pub const ENTITY_TYPES: &[&str] = &[
    "User",
    "Group",
    "Schedule",
    "DirectManager",
    "IntegrationOwner",
    "IntegrationMaintainer",
    "ResourceMaintainer",
    "ResourceOwner",
    "TeamMember",
    "Automatic",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityList {
    Approval,
    Notified,
}

impl EntityList {
    pub fn attribute(self) -> &'static str {
        match self {
            EntityList::Approval => "approval_entities",
            EntityList::Notified => "notified_entities",
        }
    }
}

/// Where in the `rules` tree a value lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub rule: usize,
    pub step: Option<usize>,
    /// Nested list attribute and index within it
    pub item: Option<(&'static str, usize)>,
}

impl Location {
    fn rule(rule: usize) -> Self {
        Self {
            rule,
            step: None,
            item: None,
        }
    }
    fn step(rule: usize, step: usize) -> Self {
        Self {
            rule,
            step: Some(step),
            item: None,
        }
    }
    fn item(self, attribute: &'static str, index: usize) -> Self {
        Self {
            item: Some((attribute, index)),
            ..self
        }
    }

    pub fn attribute_path(&self) -> AttributePath {
        let mut path = AttributePath::new("rules").index(self.rule as i64);
        if let Some(step) = self.step {
            path = path
                .attribute("approval_flow")
                .attribute("steps")
                .index(step as i64);
        }
        if let Some((attribute, index)) = self.item {
            path = path.attribute(attribute).index(index as i64);
        }
        path
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rules[{}]", self.rule)?;
        if let Some(step) = self.step {
            write!(f, ".approval_flow.steps[{step}]")?;
        }
        if let Some((attribute, index)) = self.item {
            write!(f, ".{attribute}[{index}]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{at}: `any_schedule` cannot be true while `in_schedules` is not empty")]
    AnyScheduleConflict { at: Location },
    #[error("{at}: entity of type `{tag}` requires `{field}` to be set")]
    MissingPayload {
        at: Location,
        tag: String,
        field: &'static str,
    },
    #[error("{at}: entity of type `{tag}` does not accept `{field}`")]
    UnexpectedPayload {
        at: Location,
        tag: String,
        field: &'static str,
    },
    #[error("{at}: `sort_order` {value} is lower than the {previous} declared before it")]
    OutOfOrder {
        at: Location,
        previous: i64,
        value: i64,
    },
    #[error("{at}: unsupported entity type `{tag}`, expected one of: {expected}")]
    UnsupportedVariant {
        at: Location,
        tag: String,
        expected: String,
    },
    #[error("{at}: `{field}` must be set")]
    MissingField { at: Location, field: &'static str },
    #[error("{at}: `{field}` value {value} does not fit in a 32-bit integer")]
    OutOfRange {
        at: Location,
        field: &'static str,
        value: i64,
    },
    #[error("{at}: `{value}` is not a valid identifier")]
    InvalidId { at: Location, value: String },
    #[error("{at}: invalid entity: {source}")]
    Encoding {
        at: Location,
        #[source]
        source: serde_json::Error,
    },
}

impl ConvertError {
    /// Attribute path of the offending value, for diagnostics
    pub fn attribute_path(&self) -> AttributePath {
        match self {
            ConvertError::AnyScheduleConflict { at } => at.attribute_path().attribute("any_schedule"),
            ConvertError::MissingPayload { at, field, .. }
            | ConvertError::UnexpectedPayload { at, field, .. } => at.attribute_path().attribute(*field),
            ConvertError::OutOfOrder { at, .. } => at.attribute_path().attribute("sort_order"),
            ConvertError::UnsupportedVariant { at, .. } => at.attribute_path().attribute("type"),
            ConvertError::MissingField { at, field } | ConvertError::OutOfRange { at, field, .. } => {
                at.attribute_path().attribute(*field)
            }
            ConvertError::InvalidId { at, .. } => at.attribute_path().attribute("id"),
            ConvertError::Encoding { at, .. } => at.attribute_path(),
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            ConvertError::AnyScheduleConflict { .. } => "Conflicting schedule settings",
            ConvertError::MissingPayload { .. } => "Missing entity payload",
            ConvertError::UnexpectedPayload { .. } => "Unexpected entity payload",
            ConvertError::OutOfOrder { .. } => "Entries out of order",
            ConvertError::UnsupportedVariant { .. } => "Unsupported entity type",
            ConvertError::MissingField { .. } => "Missing value",
            ConvertError::OutOfRange { .. } => "Value out of range",
            ConvertError::InvalidId { .. } => "Invalid identifier",
            ConvertError::Encoding { .. } => "Invalid workflow response",
        }
    }
}

/// Entity type resolved from its configuration tag
enum EntityKind {
    User,
    Group,
    Schedule,
    Category(ApprovalEntity),
}

impl EntityKind {
    /// Payload attribute the kind requires, if any
    fn payload(&self) -> Option<&'static str> {
        match self {
            EntityKind::User => Some("user"),
            EntityKind::Group => Some("group"),
            EntityKind::Schedule => Some("schedule"),
            EntityKind::Category(_) => None,
        }
    }
}

/// Payload attributes set on the entity, with whether their value is known
fn payloads(entity: &EntityState<'_>) -> impl Iterator<Item = (&'static str, bool)> {
    [
        ("user", entity.user.is_null(), entity.user.is_unknown()),
        ("group", entity.group.is_null(), entity.group.is_unknown()),
        ("schedule", entity.schedule.is_null(), entity.schedule.is_unknown()),
    ]
    .into_iter()
    .filter(|(_, null, _)| !null)
    .map(|(field, _, unknown)| (field, !unknown))
}

fn entity_kind(at: Location, list: EntityList, tag: &str) -> Result<EntityKind, ConvertError> {
    let kind = match tag {
        "User" => EntityKind::User,
        "Group" => EntityKind::Group,
        "Schedule" => EntityKind::Schedule,
        "DirectManager" => EntityKind::Category(ApprovalEntity::DirectManager),
        "IntegrationOwner" => EntityKind::Category(ApprovalEntity::IntegrationOwner),
        "IntegrationMaintainer" => EntityKind::Category(ApprovalEntity::IntegrationMaintainer),
        "ResourceMaintainer" => EntityKind::Category(ApprovalEntity::ResourceMaintainer),
        "ResourceOwner" => EntityKind::Category(ApprovalEntity::ResourceOwner),
        "TeamMember" => EntityKind::Category(ApprovalEntity::TeamMember),
        "Automatic" if list == EntityList::Approval => EntityKind::Category(ApprovalEntity::Automatic),
        _ => {
            let expected = ENTITY_TYPES
                .iter()
                .filter(|t| list == EntityList::Approval || **t != "Automatic")
                .join_with(", ")
                .to_string();
            return Err(ConvertError::UnsupportedVariant {
                at,
                tag: tag.to_owned(),
                expected,
            });
        }
    };
    Ok(kind)
}

fn narrow(at: Location, field: &'static str, value: &ValueNumber) -> Result<i32, ConvertError> {
    let Value::Value(value) = *value else {
        return Err(ConvertError::MissingField { at, field });
    };
    i32::try_from(value).map_err(|_| ConvertError::OutOfRange { at, field, value })
}

/// First entry whose `sort_order` is lower than the one declared before it
fn out_of_order<'v>(
    entries: impl Iterator<Item = (Location, &'v ValueNumber)>,
) -> Option<ConvertError> {
    let mut previous: Option<i64> = None;
    for (at, value) in entries {
        let Value::Value(value) = *value else {
            continue;
        };
        if let Some(previous) = previous.filter(|previous| value < *previous) {
            return Some(ConvertError::OutOfOrder {
                at,
                previous,
                value,
            });
        }
        previous = Some(value);
    }
    None
}

fn parse_id(at: Location, id: &str) -> Result<Uuid, ConvertError> {
    id.parse().map_err(|_| ConvertError::InvalidId {
        at,
        value: id.to_owned(),
    })
}

fn list_items<T>(list: &ValueList<Value<T>>) -> impl Iterator<Item = (usize, &T)> {
    list.iter()
        .flatten()
        .enumerate()
        .filter_map(|(i, item)| Some((i, item.as_ref_option()?)))
}

/// Group and schedule references, dropping the ones whose id is not set
fn references<'a>(
    at: Location,
    attribute: &'static str,
    list: &ValueList<Value<RefState<'a>>>,
) -> Result<Vec<IdRef>, ConvertError> {
    list_items(list)
        .filter_map(|(i, reference)| Some((i, reference.id.as_deref_option()?)))
        .map(|(i, id)| parse_id(at.item(attribute, i), id).map(|id| IdRef { id }))
        .collect()
}

fn entity_request(
    at: Location,
    list: EntityList,
    entity: &EntityState<'_>,
) -> Result<ApprovalEntity, ConvertError> {
    let tag = entity.kind.as_str();
    let missing = |field| ConvertError::MissingPayload {
        at,
        tag: tag.to_owned(),
        field,
    };

    let kind = entity_kind(at, list, tag)?;
    let expected = kind.payload();
    if let Some((field, _)) = payloads(entity).find(|(field, _)| Some(*field) != expected) {
        return Err(ConvertError::UnexpectedPayload {
            at,
            tag: tag.to_owned(),
            field,
        });
    }

    Ok(match kind {
        EntityKind::User => {
            let user = entity.user.as_ref_option().ok_or_else(|| missing("user"))?;
            let id = user.id.as_deref_option().ok_or_else(|| missing("user"))?;
            ApprovalEntity::User(UserRef {
                id: parse_id(at, id)?,
                email: None,
            })
        }
        EntityKind::Group => {
            let group = entity.group.as_ref_option().ok_or_else(|| missing("group"))?;
            let id = group.id.as_deref_option().ok_or_else(|| missing("group"))?;
            ApprovalEntity::DirectoryGroup(NamedRef {
                id: parse_id(at, id)?,
                name: None,
            })
        }
        EntityKind::Schedule => {
            let schedule = entity
                .schedule
                .as_ref_option()
                .ok_or_else(|| missing("schedule"))?;
            let id = schedule.id.as_deref_option().ok_or_else(|| missing("schedule"))?;
            ApprovalEntity::OnCallIntegrationSchedule(NamedRef {
                id: parse_id(at, id)?,
                name: None,
            })
        }
        EntityKind::Category(category) => category,
    })
}

fn entities_request(
    at: Location,
    list: EntityList,
    entities: &ValueList<Value<EntityState<'_>>>,
) -> Result<Vec<ApprovalEntity>, ConvertError> {
    list_items(entities)
        .map(|(i, entity)| entity_request(at.item(list.attribute(), i), list, entity))
        .collect()
}

fn step_request(at: Location, step: &StepState<'_>) -> Result<StepRequest, ConvertError> {
    let operator = step
        .operator
        .as_deref_option()
        .ok_or(ConvertError::MissingField {
            at,
            field: "operator",
        })?;
    Ok(StepRequest {
        sort_order: narrow(at, "sort_order", &step.sort_order)?,
        operator: operator.to_owned(),
        approval_entities: entities_request(at, EntityList::Approval, &step.approval_entities)?,
        notified_entities: entities_request(at, EntityList::Notified, &step.notified_entities)?,
    })
}

fn rule_request(index: usize, rule: &RuleState<'_>) -> Result<RuleRequest, ConvertError> {
    let at = Location::rule(index);
    let any_schedule = matches!(rule.any_schedule, Value::Value(true));
    if any_schedule && list_items(&rule.in_schedules).next().is_some() {
        return Err(ConvertError::AnyScheduleConflict { at });
    }

    let steps = rule
        .approval_flow
        .as_ref_option()
        .map(|flow| {
            let orders = list_items(&flow.steps)
                .map(|(i, step)| (Location::step(index, i), &step.sort_order));
            if let Some(err) = out_of_order(orders) {
                return Err(err);
            }
            list_items(&flow.steps)
                .map(|(i, step)| step_request(Location::step(index, i), step))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok(RuleRequest {
        sort_order: narrow(at, "sort_order", &rule.sort_order)?,
        under_duration: narrow(at, "under_duration", &rule.under_duration)?,
        any_schedule,
        in_groups: references(at, "in_groups", &rule.in_groups)?,
        in_schedules: references(at, "in_schedules", &rule.in_schedules)?,
        approval_flow: ApprovalFlowRequest { steps },
    })
}

/// Build the API request from a planned workflow state
///
/// Rules and steps must be declared by ascending `sort_order`, the order the API reads them back.
pub fn workflow_request(state: &WorkflowState<'_>) -> Result<WorkflowRequest, ConvertError> {
    let orders = list_items(&state.rules).map(|(i, rule)| (Location::rule(i), &rule.sort_order));
    if let Some(err) = out_of_order(orders) {
        return Err(err);
    }

    Ok(WorkflowRequest {
        name: state.name.as_str().to_owned(),
        rules: list_items(&state.rules)
            .map(|(i, rule)| rule_request(i, rule))
            .collect::<Result<_, _>>()?,
    })
}

/// Static checks that can run on a configuration holding unknown values
///
/// Every problem found is returned, instead of stopping at the first one.
pub fn check_workflow(state: &WorkflowState<'_>) -> Vec<ConvertError> {
    let mut errors = Vec::new();

    let orders = list_items(&state.rules).map(|(i, rule)| (Location::rule(i), &rule.sort_order));
    errors.extend(out_of_order(orders));

    for (r, rule) in list_items(&state.rules) {
        let at = Location::rule(r);
        let schedules = list_items(&rule.in_schedules).count();
        if matches!(rule.any_schedule, Value::Value(true)) && schedules > 0 {
            errors.push(ConvertError::AnyScheduleConflict { at });
        }
        for (field, value) in [
            ("sort_order", &rule.sort_order),
            ("under_duration", &rule.under_duration),
        ] {
            if let Value::Value(value) = *value {
                if i32::try_from(value).is_err() {
                    errors.push(ConvertError::OutOfRange { at, field, value });
                }
            }
        }

        let Some(flow) = rule.approval_flow.as_ref_option() else {
            continue;
        };
        let orders = list_items(&flow.steps).map(|(s, step)| (Location::step(r, s), &step.sort_order));
        errors.extend(out_of_order(orders));

        for (s, step) in list_items(&flow.steps) {
            let at = Location::step(r, s);
            if let Value::Value(value) = step.sort_order {
                if i32::try_from(value).is_err() {
                    errors.push(ConvertError::OutOfRange {
                        at,
                        field: "sort_order",
                        value,
                    });
                }
            }
            for (list, entities) in [
                (EntityList::Approval, &step.approval_entities),
                (EntityList::Notified, &step.notified_entities),
            ] {
                for (e, entity) in list_items(entities) {
                    let at = at.item(list.attribute(), e);
                    let Some(tag) = entity.kind.as_deref_option() else {
                        continue;
                    };
                    let expected = match entity_kind(at, list, tag) {
                        Ok(kind) => kind.payload(),
                        Err(err) => {
                            errors.push(err);
                            continue;
                        }
                    };
                    if let Some(field) = expected {
                        if payloads(entity).all(|(set, _)| set != field) {
                            errors.push(ConvertError::MissingPayload {
                                at,
                                tag: tag.to_owned(),
                                field,
                            });
                        }
                    }
                    for (field, known) in payloads(entity) {
                        if known && Some(field) != expected {
                            errors.push(ConvertError::UnexpectedPayload {
                                at,
                                tag: tag.to_owned(),
                                field,
                            });
                        }
                    }
                }
            }
        }
    }

    errors
}

/// Whether a value the request is built from is not known yet
///
/// Names and emails are read back from the API and are not looked at.
pub fn has_unknown_values(state: &WorkflowState<'_>) -> bool {
    fn unknown_list<T>(list: &ValueList<Value<T>>) -> bool {
        list.is_unknown() || list.iter().flatten().any(Value::is_unknown)
    }
    fn unknown_references(list: &ValueList<Value<RefState<'_>>>) -> bool {
        unknown_list(list) || list_items(list).any(|(_, reference)| reference.id.is_unknown())
    }
    fn unknown_payload<T>(payload: &Value<T>, id: impl Fn(&T) -> bool) -> bool {
        payload.is_unknown() || payload.as_ref_option().is_some_and(id)
    }
    fn unknown_entities(list: &ValueList<Value<EntityState<'_>>>) -> bool {
        unknown_list(list)
            || list_items(list).any(|(_, entity)| {
                entity.kind.is_unknown()
                    || unknown_payload(&entity.user, |user| user.id.is_unknown())
                    || unknown_payload(&entity.group, |group| group.id.is_unknown())
                    || unknown_payload(&entity.schedule, |schedule| schedule.id.is_unknown())
            })
    }

    state.name.is_unknown()
        || unknown_list(&state.rules)
        || list_items(&state.rules).any(|(_, rule)| {
            rule.sort_order.is_unknown()
                || rule.under_duration.is_unknown()
                || rule.any_schedule.is_unknown()
                || unknown_references(&rule.in_groups)
                || unknown_references(&rule.in_schedules)
                || rule.approval_flow.is_unknown()
                || rule.approval_flow.as_ref_option().is_some_and(|flow| {
                    unknown_list(&flow.steps)
                        || list_items(&flow.steps).any(|(_, step)| {
                            step.sort_order.is_unknown()
                                || step.operator.is_unknown()
                                || unknown_entities(&step.approval_entities)
                                || unknown_entities(&step.notified_entities)
                        })
                })
        })
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    entity: serde_json::Value,
}

/// Decode one entity envelope, `None` when its type is not recognized
fn decode_entity(at: Location, raw: serde_json::Value) -> Result<Option<ApprovalEntity>, ConvertError> {
    let encoding = |source| ConvertError::Encoding { at, source };
    let envelope: Envelope = serde_json::from_value(raw).map_err(encoding)?;

    let entity = match envelope.kind.as_str() {
        "User" => ApprovalEntity::User(serde_json::from_value(envelope.entity).map_err(encoding)?),
        "DirectoryGroup" => {
            ApprovalEntity::DirectoryGroup(serde_json::from_value(envelope.entity).map_err(encoding)?)
        }
        "OnCallIntegrationSchedule" => ApprovalEntity::OnCallIntegrationSchedule(
            serde_json::from_value(envelope.entity).map_err(encoding)?,
        ),
        "DirectManager" => ApprovalEntity::DirectManager,
        "IntegrationOwner" => ApprovalEntity::IntegrationOwner,
        "IntegrationMaintainer" => ApprovalEntity::IntegrationMaintainer,
        "ResourceMaintainer" => ApprovalEntity::ResourceMaintainer,
        "ResourceOwner" => ApprovalEntity::ResourceOwner,
        "TeamMember" => ApprovalEntity::TeamMember,
        "Automatic" => ApprovalEntity::Automatic,
        other => {
            tracing::warn!(location = %at, tag = other, "skipping entity of unsupported type");
            return Ok(None);
        }
    };
    Ok(Some(entity))
}

fn string<'a>(value: impl Into<Cow<'a, str>>) -> ValueString<'a> {
    Value::Value(value.into())
}

fn optional_string<'a>(value: Option<String>) -> ValueString<'a> {
    value.map_or(Value::Null, string)
}

fn reference_state<'a>(reference: NamedRef) -> RefState<'a> {
    RefState {
        id: string(reference.id.to_string()),
        name: optional_string(reference.name),
    }
}

fn entity_state<'a>(entity: ApprovalEntity) -> EntityState<'a> {
    let mut state = EntityState {
        kind: Value::Null,
        user: Value::Null,
        group: Value::Null,
        schedule: Value::Null,
    };
    let kind = match entity {
        ApprovalEntity::User(user) => {
            state.user = Value::Value(UserRefState {
                id: string(user.id.to_string()),
                email: optional_string(user.email),
            });
            string("User")
        }
        ApprovalEntity::DirectoryGroup(group) => {
            state.group = Value::Value(reference_state(group));
            string("Group")
        }
        ApprovalEntity::OnCallIntegrationSchedule(schedule) => {
            state.schedule = Value::Value(reference_state(schedule));
            string("Schedule")
        }
        category => string(category.tag()),
    };
    state.kind = kind;
    state
}

fn entities_state<'a>(
    at: Location,
    list: EntityList,
    entities: Vec<serde_json::Value>,
) -> Result<ValueList<Value<EntityState<'a>>>, ConvertError> {
    let mut decoded = Vec::with_capacity(entities.len());
    for (i, raw) in entities.into_iter().enumerate() {
        if let Some(entity) = decode_entity(at.item(list.attribute(), i), raw)? {
            decoded.push(Value::Value(entity_state(entity)));
        }
    }
    Ok(Value::Value(decoded))
}

fn step_state<'a>(at: Location, step: Step) -> Result<StepState<'a>, ConvertError> {
    Ok(StepState {
        sort_order: Value::Value(step.sort_order.into()),
        operator: string(step.operator),
        approval_entities: entities_state(at, EntityList::Approval, step.approval_entities)?,
        notified_entities: entities_state(at, EntityList::Notified, step.notified_entities)?,
    })
}

fn references_state<'a>(references: Vec<NamedRef>) -> ValueList<Value<RefState<'a>>> {
    Value::Value(
        references
            .into_iter()
            .map(|reference| Value::Value(reference_state(reference)))
            .collect(),
    )
}

fn rule_state<'a>(index: usize, rule: Rule) -> Result<RuleState<'a>, ConvertError> {
    let mut steps = rule.approval_flow.steps;
    // Stable: steps sharing a sort order keep their arrival order
    steps.sort_by_key(|step| step.sort_order);

    let steps = steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| step_state(Location::step(index, i), step).map(Value::Value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RuleState {
        sort_order: Value::Value(rule.sort_order.into()),
        under_duration: Value::Value(rule.under_duration.into()),
        any_schedule: Value::Value(rule.any_schedule),
        in_groups: references_state(rule.in_groups),
        in_schedules: references_state(rule.in_schedules),
        approval_flow: Value::Value(ApprovalFlowState {
            steps: Value::Value(steps),
        }),
    })
}

/// Build the Terraform state from a workflow returned by the API
pub fn workflow_state<'a>(workflow: Workflow) -> Result<WorkflowState<'a>, ConvertError> {
    let mut rules = workflow.rules;
    rules.sort_by_key(|rule| rule.sort_order);

    let rules = rules
        .into_iter()
        .enumerate()
        .map(|(i, rule)| rule_state(i, rule).map(Value::Value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WorkflowState {
        id: string(workflow.id.to_string()),
        name: string(workflow.name),
        rules: Value::Value(rules),
    })
}
