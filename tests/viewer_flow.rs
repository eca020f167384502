// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end: a local search server, the HTTP client and the viewer state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use lopdf::{dictionary, Document, Object};
use serde_json::{json, Value};

use intrasearch::api::{ApiClient, ApiError};
use intrasearch::document::DocumentLayout;
use intrasearch::model::{EmbeddingId, HighlightKind, PageSize};
use intrasearch::query::{QueryError, QueryOutcome};
use intrasearch::render::text::result_lines;
use intrasearch::ui::ViewerState;

#[derive(Clone, Default)]
struct Seen {
    queries: Arc<Mutex<Vec<(String, String)>>>,
}

fn rect(x1: f64, y1: f64, x2: f64, y2: f64, page: u32) -> Value {
    json!({ "x1": x1, "y1": y1, "x2": x2, "y2": y2, "width": 612.0, "height": 792.0, "pageNumber": page })
}

fn ranked(count: usize) -> Value {
    let items = (0..count)
        .map(|rank| {
            let top = 72.0 + (rank % 10) as f64 * 60.0;
            json!({
                "id": format!("h{rank:02}"),
                "type": "text",
                "content": { "text": format!("passage number {rank} about the topic") },
                "position": {
                    "boundingRect": rect(72.0, top, 540.0, top + 14.0, 1 + (rank / 10) as u32),
                    "rects": [rect(72.0, top, 540.0, top + 14.0, 1 + (rank / 10) as u32)],
                },
                "similarity": 0.95 - rank as f64 * 0.05,
            })
        })
        .collect::<Vec<_>>();
    Value::Array(items)
}

fn one_page_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

async fn embeddings() -> Json<Value> {
    Json(json!([
        { "id": "report", "document_name": "report.pdf", "model": "msmarco", "chunk_size": 50 },
        { "id": "broken", "document_name": "broken.pdf", "model": "msmarco", "chunk_size": 25 },
    ]))
}

async fn doc(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "report" => one_page_pdf().into_response(),
        _ => (StatusCode::NOT_FOUND, "no such document").into_response(),
    }
}

async fn query(
    State(seen): State<Seen>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let text = params.get("query").cloned().unwrap_or_default();
    if let Ok(mut queries) = seen.queries.lock() {
        queries.push((id.clone(), text.clone()));
    }
    match (id.as_str(), text.as_str()) {
        ("broken", _) => (StatusCode::INTERNAL_SERVER_ERROR, "index unavailable").into_response(),
        ("report", "garbled") => "{not json".into_response(),
        ("report", "nothing") => Json(json!([])).into_response(),
        ("report", _) => Json(ranked(12)).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn serve() -> (String, Seen) {
    let seen = Seen::default();
    let router = Router::new()
        .route("/api/embeddings", get(embeddings))
        .route("/api/doc/{id}", get(doc))
        .route("/api/{id}/query", get(query))
        .with_state(seen.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    (format!("http://{addr}"), seen)
}

fn eid(value: &str) -> EmbeddingId {
    EmbeddingId::new(value).expect("embedding id")
}

#[tokio::test]
async fn lists_the_embedding_manifest() {
    let (base, _) = serve().await;
    let client = ApiClient::new(&base).expect("client");

    let listing = client.list_embeddings().await.expect("listing");
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].id, eid("report"));
    assert_eq!(listing[0].label(), "report.pdf (msmarco, chunk size 50)");
}

#[tokio::test]
async fn query_text_is_sent_encoded_and_results_keep_their_order() {
    let (base, seen) = serve().await;
    let client = ApiClient::new(&base).expect("client");

    let results = client.query(&eid("report"), "what's new? & why").await.expect("results");
    assert_eq!(results.len(), 12);
    assert_eq!(results[0].id.as_str(), "h00");
    assert_eq!(results[0].kind, HighlightKind::Text);
    assert!(results.windows(2).all(|pair| pair[0].similarity >= pair[1].similarity));

    let queries = seen.queries.lock().expect("seen").clone();
    assert_eq!(queries, vec![("report".to_owned(), "what's new? & why".to_owned())]);
}

#[tokio::test]
async fn document_bytes_yield_the_page_layout() {
    let (base, _) = serve().await;
    let client = ApiClient::new(&base).expect("client");

    let bytes = client.document(&eid("report")).await.expect("document");
    let layout = DocumentLayout::from_pdf(&bytes).expect("layout");
    assert_eq!(layout.page_count(), 1);
    assert_eq!(layout.page(1), Some(PageSize::new(612.0, 792.0)));

    let missing = client.document(&eid("absent")).await.expect_err("missing document");
    assert!(matches!(missing, ApiError::Status { status, .. } if status.as_u16() == 404));
}

#[tokio::test]
async fn server_errors_and_bad_bodies_surface_as_errors() {
    let (base, _) = serve().await;
    let client = ApiClient::new(&base).expect("client");

    let err = client.query(&eid("broken"), "anything").await.expect_err("status error");
    match err {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "index unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }

    let err = client.query(&eid("report"), "garbled").await.expect_err("decode error");
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn viewer_applies_answers_and_reports_failures() {
    let (base, _) = serve().await;
    let client = ApiClient::new(&base).expect("client");
    let mut viewer = ViewerState::new();
    viewer.mount();

    viewer.select_document(Some(eid("report")));
    let ticket = viewer.submit_query("topic").expect("ticket");
    let result = client.query(&ticket.embedding_id, &ticket.query).await;
    assert_eq!(viewer.complete_query(ticket, result).expect("applied"), QueryOutcome::Applied {
        count: 12
    });
    assert_eq!(viewer.working_set().len(), 10);

    viewer.stage_rowcount(3);
    viewer.commit_rowcount();
    let lines = result_lines(viewer.working_set());
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("  1. passage number 0 about the topic…"), "{}", lines[0]);
    assert!(lines[0].ends_with("(Page 1, 0.950)"), "{}", lines[0]);

    let ticket = viewer.submit_query("nothing").expect("ticket");
    let result = client.query(&ticket.embedding_id, &ticket.query).await;
    viewer.complete_query(ticket, result).expect("applied");
    assert_eq!(result_lines(viewer.working_set()), vec!["No Results Found".to_owned()]);

    viewer.select_document(Some(eid("broken")));
    let ticket = viewer.submit_query("topic").expect("ticket");
    let result = client.query(&ticket.embedding_id, &ticket.query).await;
    let err = viewer.complete_query(ticket, result).expect_err("request error");
    assert!(matches!(err, QueryError::Request(ApiError::Status { .. })));
    assert_eq!(err.to_string(), "Unable to process query!");
    assert!(!viewer.queries().is_busy());
    assert!(viewer.store().is_empty());
}
