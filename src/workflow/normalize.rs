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

use tf_provider::{
    value::{Value, ValueList},
    Diagnostics,
};

use crate::utils::WithNormalize;

use super::state::{EntityState, RefState, WorkflowState};

fn items_mut<T>(list: &mut ValueList<Value<T>>) -> impl Iterator<Item = &mut T> {
    list.as_mut_option()
        .into_iter()
        .flatten()
        .filter_map(Value::as_mut_option)
}

fn default_empty<T>(list: &mut ValueList<T>) {
    if list.is_null() {
        *list = Value::Value(Vec::new());
    }
}

fn forget_names(references: &mut ValueList<Value<RefState<'_>>>) {
    for reference in items_mut(references) {
        reference.name = Value::Unknown;
    }
}

fn normalize_entities(entities: &mut ValueList<Value<EntityState<'_>>>) {
    default_empty(entities);
    for entity in items_mut(entities) {
        if let Value::Value(user) = &mut entity.user {
            user.email = Value::Unknown;
        }
        if let Value::Value(group) = &mut entity.group {
            group.name = Value::Unknown;
        }
        if let Value::Value(schedule) = &mut entity.schedule {
            schedule.name = Value::Unknown;
        }
    }
}

/// Fill the optional values with what the API will answer, and mark the names read back from the
/// API as unknown
impl<'a> WithNormalize for WorkflowState<'a> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        if self.id.is_null() {
            self.id = Value::Unknown;
        }
        for rule in items_mut(&mut self.rules) {
            if rule.any_schedule.is_null() {
                rule.any_schedule = Value::Value(false);
            }
            default_empty(&mut rule.in_groups);
            default_empty(&mut rule.in_schedules);
            forget_names(&mut rule.in_groups);
            forget_names(&mut rule.in_schedules);

            let Value::Value(flow) = &mut rule.approval_flow else {
                continue;
            };
            for step in items_mut(&mut flow.steps) {
                normalize_entities(&mut step.approval_entities);
                normalize_entities(&mut step.notified_entities);
            }
        }
    }
}
