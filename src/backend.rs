// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Where documents and results come from: a live server, or the built-in demo set.

use crate::api::{ApiClient, ApiError};
use crate::model::fixtures::{demo_embedding, demo_highlights};
use crate::model::{EmbeddingId, EmbeddingInfo, ResultHighlight};

#[derive(Debug, Clone)]
pub enum Backend {
    Remote(ApiClient),
    Demo,
}

impl Backend {
    pub fn label(&self) -> String {
        match self {
            Self::Remote(client) => client.base_url().to_string(),
            Self::Demo => "demo".to_owned(),
        }
    }

    pub async fn list_embeddings(&self) -> Result<Vec<EmbeddingInfo>, ApiError> {
        match self {
            Self::Remote(client) => client.list_embeddings().await,
            Self::Demo => Ok(vec![demo_embedding()]),
        }
    }

    /// PDF bytes of the document, when the backend has any.
    pub async fn document(&self, embedding_id: &EmbeddingId) -> Result<Option<Vec<u8>>, ApiError> {
        match self {
            Self::Remote(client) => client.document(embedding_id).await.map(Some),
            Self::Demo => Ok(None),
        }
    }

    /// The demo answers every query with the same ranked passages.
    pub async fn query(
        &self,
        embedding_id: &EmbeddingId,
        text: &str,
    ) -> Result<Vec<ResultHighlight>, ApiError> {
        match self {
            Self::Remote(client) => client.query(embedding_id, text).await,
            Self::Demo if embedding_id.as_str() == demo_embedding().id.as_str() => {
                Ok(demo_highlights())
            }
            Self::Demo => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Backend;
    use crate::model::EmbeddingId;

    #[tokio::test]
    async fn demo_backend_lists_one_document_and_answers_for_it() {
        let backend = Backend::Demo;
        let listing = backend.list_embeddings().await.expect("listing");
        assert_eq!(listing.len(), 1);

        let results = backend.query(&listing[0].id, "anything").await.expect("results");
        assert_eq!(results.len(), 12);
        assert!(results.windows(2).all(|w| w[0].similarity >= w[1].similarity));

        let other = EmbeddingId::new("other").expect("id");
        assert!(backend.query(&other, "anything").await.expect("results").is_empty());
        assert_eq!(backend.document(&other).await.expect("document"), None);
    }
}
