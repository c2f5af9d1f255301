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

use tf_provider::{AttributePath, Diagnostics};

use crate::utils::WithValidate;

use super::convert::check_workflow;
use super::report_convert;
use super::state::{WorkflowDataSourceState, WorkflowState};

impl<'a> WithValidate for WorkflowState<'a> {
    fn validate(&self, diags: &mut Diagnostics) {
        if let Some("") = self.name.as_deref_option() {
            diags.error_short("`name` should not be empty", AttributePath::new("name"));
        }
        for err in check_workflow(self) {
            report_convert(diags, err);
        }
    }
}

impl<'a> WithValidate for WorkflowDataSourceState<'a> {
    fn validate(&self, diags: &mut Diagnostics) {
        if self.id.is_null() && self.name.is_null() {
            diags.root_error_short("One of `id` or `name` must be set");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use tf_provider::value::Value;

    use super::*;

    #[test]
    fn data_source_needs_a_key() {
        let mut diags = Diagnostics::default();
        WorkflowDataSourceState::default().validate(&mut diags);
        assert_eq!(diags.errors.len(), 1);

        let mut diags = Diagnostics::default();
        WorkflowDataSourceState {
            name: Value::Unknown,
            ..Default::default()
        }
        .validate(&mut diags);
        assert!(diags.errors.is_empty());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut diags = Diagnostics::default();
        WorkflowState {
            name: Value::Value(Cow::Borrowed("")),
            rules: Value::Value(vec![]),
            ..Default::default()
        }
        .validate(&mut diags);
        assert_eq!(diags.errors.len(), 1);
    }
}
