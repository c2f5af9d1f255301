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

use tf_provider::{value::ValueString, AttributePath, Diagnostics};
use uuid::Uuid;

use crate::client::ApiError;

pub mod convert;
mod data_source;
mod normalize;
mod resource;
mod state;
mod validate;

pub use data_source::WorkflowDataSource;
pub use resource::WorkflowResource;

use convert::ConvertError;

fn workflow_id(diags: &mut Diagnostics, id: &ValueString<'_>) -> Option<Uuid> {
    let id = id.as_str();
    match id.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            diags.error(
                "Invalid workflow id",
                format!("`{id}` is not a valid workflow identifier"),
                AttributePath::new("id"),
            );
            None
        }
    }
}

fn report_api(diags: &mut Diagnostics, summary: &str, id: Option<Uuid>, err: ApiError) {
    let detail = match (&err, id) {
        (ApiError::NotFound, Some(id)) => format!("Workflow `{id}` does not exist"),
        _ => err.to_string(),
    };
    diags.root_error(summary.to_owned(), detail);
}

fn report_convert(diags: &mut Diagnostics, err: ConvertError) {
    diags.error(err.summary(), err.to_string(), err.attribute_path());
}
