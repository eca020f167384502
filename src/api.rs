// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP client for the intra-search server.
//!
//! Three endpoints: the document listing, the raw document, and a query against one document.
//! Requests are sent once; there is no timeout and no retry.

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::model::{EmbeddingId, EmbeddingInfo, ResultHighlight};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid server url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} answered {status}: {body}")]
    Status { status: StatusCode, url: Url, body: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|err| ApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a base url".to_owned(),
            });
        }
        Ok(Self { client: reqwest::Client::new(), base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /api/embeddings`
    pub async fn list_embeddings(&self) -> Result<Vec<EmbeddingInfo>, ApiError> {
        let url = self.endpoint(&["api", "embeddings"])?;
        self.get_json(url).await
    }

    /// `GET /api/doc/<embedding>`: the PDF the embedding was built from.
    pub async fn document(&self, embedding_id: &EmbeddingId) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(&["api", "doc", embedding_id.as_str()])?;
        let response = self.send(url).await?;
        let bytes = response.bytes().await?;
        debug!(embedding = %embedding_id, bytes = bytes.len(), "fetched document");
        Ok(bytes.to_vec())
    }

    /// `GET /api/<embedding>/query?query=<text>`: ranked highlights, best first.
    pub async fn query(
        &self,
        embedding_id: &EmbeddingId,
        text: &str,
    ) -> Result<Vec<ResultHighlight>, ApiError> {
        let mut url = self.endpoint(&["api", embedding_id.as_str(), "query"])?;
        url.query_pairs_mut().append_pair("query", text);
        let highlights: Vec<ResultHighlight> = self.get_json(url).await?;
        debug!(embedding = %embedding_id, count = highlights.len(), "query answered");
        Ok(highlights)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "not a base url".to_owned(),
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response, ApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, %status, "server returned an error status");
            return Err(ApiError::Status { status, url, body });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.send(url).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
