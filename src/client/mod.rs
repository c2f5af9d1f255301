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

use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::resolve::Page;

pub mod models;

use models::{DirectoryGroup, Integration, Listing, Single, User, Workflow, WorkflowRequest};

pub const DEFAULT_ENDPOINT: &str = "https://api.entitle.io";
const API_PREFIX: &str = "public/v1";
const PER_PAGE: u32 = 100;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("object not found")]
    NotFound,
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin wrapper over the Entitle public REST API
#[derive(Debug, Clone)]
pub struct EntitleClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl EntitleClient {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{API_PREFIX}/{path}", self.endpoint);
        tracing::debug!(%method, %url, "entitle request");
        self.client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::ACCEPT, "application/json")
    }

    async fn send(request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        match status {
            status if status.is_success() => Ok(body),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status => Err(ApiError::Status { status, body }),
        }
    }

    async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = Self::send(self.request(Method::GET, path)).await?;
        let single: Single<T> = serde_json::from_str(&body)?;
        Ok(single.result)
    }

    async fn send_one<B, T>(&self, method: Method, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = Self::send(self.request(method, path).json(payload)).await?;
        let single: Single<T> = serde_json::from_str(&body)?;
        Ok(single.result)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        search: Option<&str>,
    ) -> Result<Page<T>, ApiError> {
        let page = page.to_string();
        let per_page = PER_PAGE.to_string();
        let mut query = vec![("page", page.as_str()), ("perPage", per_page.as_str())];
        if let Some(search) = search {
            query.push(("search", search));
        }

        let body = Self::send(self.request(Method::GET, path).query(&query)).await?;
        let listing: Listing<T> = serde_json::from_str(&body)?;
        Ok(Page {
            items: listing.result,
            total_pages: listing.pagination.total_pages,
        })
    }

    pub async fn list_workflows(&self, page: u32) -> Result<Page<Workflow>, ApiError> {
        self.list("workflows", page, None).await
    }

    pub async fn get_workflow(&self, id: Uuid) -> Result<Workflow, ApiError> {
        self.get_one(&format!("workflows/{id}")).await
    }

    pub async fn create_workflow(&self, workflow: &WorkflowRequest) -> Result<Workflow, ApiError> {
        self.send_one(Method::POST, "workflows", workflow).await
    }

    pub async fn update_workflow(
        &self,
        id: Uuid,
        workflow: &WorkflowRequest,
    ) -> Result<Workflow, ApiError> {
        self.send_one(Method::PUT, &format!("workflows/{id}"), workflow)
            .await
    }

    pub async fn delete_workflow(&self, id: Uuid) -> Result<(), ApiError> {
        Self::send(self.request(Method::DELETE, &format!("workflows/{id}"))).await?;
        Ok(())
    }

    pub async fn list_integrations(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<Page<Integration>, ApiError> {
        self.list("integrations", page, search).await
    }

    pub async fn get_integration(&self, id: Uuid) -> Result<Integration, ApiError> {
        self.get_one(&format!("integrations/{id}")).await
    }

    pub async fn list_users(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<Page<User>, ApiError> {
        self.list("users", page, search).await
    }

    pub async fn list_directory_groups(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<Page<DirectoryGroup>, ApiError> {
        self.list("directoryGroups", page, search).await
    }
}
