// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Query submission and completion.
//!
//! Submitting validates the input and hands out a [`QueryTicket`]; the caller performs the
//! request and feeds the result back through [`QueryController::complete`]. Only one query may be
//! outstanding. A completion whose ticket was superseded by a document change is dropped.

use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::model::{EmbeddingId, ResultHighlight};
use crate::store::ResultStore;
use crate::working_set::WorkingSetFilter;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Select a document before searching!")]
    NoDocument,
    #[error("Query must not be empty!")]
    EmptyQuery,
    #[error("A query is already running")]
    Busy,
    #[error("Unable to process query!")]
    Request(#[source] ApiError),
}

/// Proof that a query was accepted, carried back with its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub generation: u64,
    pub embedding_id: EmbeddingId,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The store now holds `count` highlights.
    Applied { count: usize },
    /// The document changed while the request was in flight; nothing was applied.
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryController {
    busy: bool,
    generation: u64,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn submit(&mut self, store: &ResultStore, query: &str) -> Result<QueryTicket, QueryError> {
        let embedding_id = store.embedding_id().ok_or(QueryError::NoDocument)?;
        let query = query.trim();
        if query.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        if self.busy {
            return Err(QueryError::Busy);
        }

        self.busy = true;
        debug!(embedding = %embedding_id, generation = self.generation, "query submitted");
        Ok(QueryTicket {
            generation: self.generation,
            embedding_id: embedding_id.clone(),
            query: query.to_owned(),
        })
    }

    /// Applies a finished request. The busy flag is released whatever the result.
    ///
    /// On success the store is replaced and the cutoff set to its default. On failure the store
    /// is left as it was.
    pub fn complete(
        &mut self,
        ticket: QueryTicket,
        result: Result<Vec<ResultHighlight>, ApiError>,
        store: &mut ResultStore,
        filter: &mut WorkingSetFilter,
    ) -> Result<QueryOutcome, QueryError> {
        self.busy = false;

        if ticket.generation != self.generation || store.embedding_id() != Some(&ticket.embedding_id)
        {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "dropping stale query response"
            );
            return Ok(QueryOutcome::Stale);
        }

        let highlights = result.map_err(|err| {
            warn!(error = %err, query = %ticket.query, "query failed");
            QueryError::Request(err)
        })?;

        let count = highlights.len();
        store.replace_all(highlights);
        filter.initialize_default(store);
        info!(embedding = %ticket.embedding_id, count, "query applied");
        Ok(QueryOutcome::Applied { count })
    }

    /// Supersedes every ticket handed out so far. Called when the document changes.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryController, QueryError, QueryOutcome};
    use crate::api::ApiError;
    use crate::model::fixtures::text_highlight;
    use crate::model::EmbeddingId;
    use crate::store::ResultStore;
    use crate::working_set::WorkingSetFilter;

    fn eid(value: &str) -> EmbeddingId {
        EmbeddingId::new(value).expect("embedding id")
    }

    fn store_for(embedding: &str) -> ResultStore {
        let mut store = ResultStore::new();
        store.select_embedding(Some(eid(embedding)));
        store
    }

    fn decode_error() -> ApiError {
        ApiError::Decode(serde_json::from_str::<u8>("{").expect_err("invalid json"))
    }

    #[test]
    fn submission_requires_a_document() {
        let mut queries = QueryController::new();
        let err = queries.submit(&ResultStore::new(), "topic").expect_err("no document");
        assert!(matches!(err, QueryError::NoDocument));
        assert_eq!(err.to_string(), "Select a document before searching!");
        assert!(!queries.is_busy());
    }

    #[test]
    fn blank_queries_are_rejected() {
        let mut queries = QueryController::new();
        let store = store_for("doc");
        for blank in ["", "   ", "\t\n"] {
            let err = queries.submit(&store, blank).expect_err("blank query");
            assert_eq!(err.to_string(), "Query must not be empty!");
        }
        assert!(!queries.is_busy());
    }

    #[test]
    fn second_submission_while_busy_is_rejected() {
        let mut queries = QueryController::new();
        let store = store_for("doc");
        let ticket = queries.submit(&store, "  topic ").expect("ticket");
        assert_eq!(ticket.query, "topic");
        assert!(matches!(queries.submit(&store, "other"), Err(QueryError::Busy)));
    }

    #[test]
    fn completion_replaces_store_and_sets_default_cutoff() {
        let mut queries = QueryController::new();
        let mut store = store_for("doc");
        let mut filter = WorkingSetFilter::new();

        let ticket = queries.submit(&store, "topic").expect("ticket");
        let results = vec![text_highlight("a", 0.9, 1), text_highlight("b", 0.5, 1)];
        let outcome = queries.complete(ticket, Ok(results), &mut store, &mut filter);

        assert!(matches!(outcome, Ok(QueryOutcome::Applied { count: 2 })));
        assert_eq!(store.rowcount(), 2);
        let ids: Vec<&str> = store.working_set().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(!queries.is_busy());
    }

    #[test]
    fn failure_keeps_prior_results_and_releases_busy() {
        let mut queries = QueryController::new();
        let mut store = store_for("doc");
        let mut filter = WorkingSetFilter::new();

        let ticket = queries.submit(&store, "first").expect("ticket");
        queries
            .complete(ticket, Ok(vec![text_highlight("a", 0.9, 1)]), &mut store, &mut filter)
            .expect("applied");
        let rev = store.rev();

        let ticket = queries.submit(&store, "second").expect("ticket");
        let err = queries
            .complete(ticket, Err(decode_error()), &mut store, &mut filter)
            .expect_err("request failed");

        assert_eq!(err.to_string(), "Unable to process query!");
        assert_eq!(store.rev(), rev);
        assert_eq!(store.len(), 1);
        assert!(!queries.is_busy());
    }

    #[test]
    fn response_for_a_superseded_document_is_dropped() {
        let mut queries = QueryController::new();
        let mut store = store_for("old");
        let mut filter = WorkingSetFilter::new();

        let ticket = queries.submit(&store, "topic").expect("ticket");
        store.select_embedding(Some(eid("new")));
        queries.invalidate();

        let outcome = queries
            .complete(ticket, Ok(vec![text_highlight("a", 0.9, 1)]), &mut store, &mut filter)
            .expect("no error");
        assert_eq!(outcome, QueryOutcome::Stale);
        assert!(store.is_empty());
        assert!(!queries.is_busy());
    }

    #[test]
    fn reselecting_the_same_document_still_drops_the_response() {
        let mut queries = QueryController::new();
        let mut store = store_for("doc");
        let mut filter = WorkingSetFilter::new();

        let ticket = queries.submit(&store, "topic").expect("ticket");
        store.select_embedding(Some(eid("doc")));
        queries.invalidate();

        let outcome = queries
            .complete(ticket, Ok(vec![text_highlight("a", 0.9, 1)]), &mut store, &mut filter)
            .expect("no error");
        assert_eq!(outcome, QueryOutcome::Stale);
        assert!(store.is_empty());
    }
}
