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

use tf_provider::schema::{AttributeConstraint, AttributeType};
use tf_provider::value::{Value, ValueEmpty, ValueString};
use tf_provider::{map, AttributePath, Block, DataSource, Description, Diagnostics, Schema};

use crate::client::models::User;
use crate::entitle_provider::ProviderData;
use crate::utils::{attribute, WithSchema};

use super::find;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState<'a> {
    pub id: ValueString<'a>,
    pub email: ValueString<'a>,
    pub given_name: ValueString<'a>,
    pub family_name: ValueString<'a>,
}

impl<'a> From<User> for UserState<'a> {
    fn from(user: User) -> Self {
        Self {
            id: Value::Value(user.id.to_string().into()),
            email: Value::Value(user.email.into()),
            given_name: user.given_name.map_or(Value::Null, |name| Value::Value(name.into())),
            family_name: user.family_name.map_or(Value::Null, |name| Value::Value(name.into())),
        }
    }
}

impl<'a> WithSchema for UserState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                description: Description::plain("Entitle user, looked up by email"),
                attributes: map! {
                    "id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Identifier of the user",
                    ),
                    "email" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Email of the user, matched exactly",
                    ),
                    "given_name" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Given name of the user",
                    ),
                    "family_name" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Family name of the user",
                    ),
                },
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Default)]
pub struct UserDataSource {
    data: Arc<ProviderData>,
}

impl UserDataSource {
    pub fn new(data: Arc<ProviderData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl DataSource for UserDataSource {
    type State<'a> = UserState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(UserState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        if let Some("") = config.email.as_deref_option() {
            diags.error_short("`email` should not be empty", AttributePath::new("email"));
            return None;
        }
        Some(())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = self.data.client(diags).await?;
        let client = &client;
        let email = config.email.as_str();

        let user = find(diags, "user", "email", email, move |page| async move {
            client
                .list_users(page, Some(email))
                .await
                .map_err(anyhow::Error::from)
        })
        .await?;

        Some(user.into())
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use httpmock::prelude::*;
    use serde_json::json;

    use crate::client::EntitleClient;

    use super::*;

    #[tokio::test]
    async fn user_by_email() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/public/v1/users")
                    .query_param("search", "ada@example.com")
                    .header("authorization", "Bearer secret");
                then.status(200).json_body(json!({
                    "result": [{
                        "id": "dddddddd-dddd-4ddd-8ddd-dddddddddddd",
                        "email": "ada@example.com",
                        "givenName": "Ada"
                    }],
                    "pagination": { "totalPages": 1 }
                }));
            })
            .await;

        let client = EntitleClient::new(&server.base_url(), "secret").unwrap();
        let data_source = UserDataSource::new(Arc::new(ProviderData::with_client(client)));
        let mut diags = Diagnostics::default();
        let config = UserState {
            email: Value::Value(Cow::Borrowed("ada@example.com")),
            ..Default::default()
        };

        let state = data_source
            .read(&mut diags, config, Value::Null)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(state.id.as_str(), "dddddddd-dddd-4ddd-8ddd-dddddddddddd");
        assert_eq!(state.given_name.as_str(), "Ada");
        assert!(state.family_name.is_null());
    }
}
