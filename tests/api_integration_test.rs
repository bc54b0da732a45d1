//! End-to-end tests of the HTTP surface against the in-memory store

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use genosentinel::adapters::clinical::ClinicalDataAdapter;
use genosentinel::adapters::memory::MemoryStore;
use genosentinel::api::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), ClinicalDataAdapter::pending());
    build_router(state, Duration::from_secs(5))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_gene(app: &Router, symbol: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/genes/",
        Some(json!({
            "symbol": symbol,
            "full_name": format!("{symbol} full name"),
            "function_summary": "Tumor suppressor"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

async fn create_variant(app: &Router, gene_id: &str, chromosome: &str, position: i64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/variants/",
        Some(json!({
            "gene_id": gene_id,
            "chromosome": chromosome,
            "position": position,
            "reference_base": "a",
            "alternate_base": "g",
            "impact": "MISSENSE"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

async fn create_report(app: &Router, patient_id: &str, variant_id: &str, frequency: Value) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/patient-reports/",
        Some(json!({
            "patient_id": patient_id,
            "variant_id": variant_id,
            "detection_date": "2024-03-15",
            "allele_frequency": frequency
        })),
    )
    .await
}

const PATIENT: &str = "3f2b8c1e-4d5a-4b6c-8e7f-9a0b1c2d3e4f";

#[tokio::test]
async fn test_health_reports_storage() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_gene_lifecycle() {
    let app = app();
    let id = create_gene(&app, "TP53").await;

    let (status, body) = send(&app, Method::GET, &format!("/genes/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "TP53");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/genes/{id}/"),
        Some(json!({"function_summary": "Guardian of the genome"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["function_summary"], "Guardian of the genome");
    assert_eq!(body["full_name"], "TP53 full name");

    let (status, body) = send(&app, Method::DELETE, &format!("/genes/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &format!("/genes/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_duplicate_and_lowercase_symbols_rejected() {
    let app = app();
    create_gene(&app, "BRCA1").await;

    let payload = json!({"symbol": "BRCA1", "full_name": "dup", "function_summary": "dup"});
    let (status, _) = send(&app, Method::POST, "/genes/", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let payload = json!({"symbol": "brca2", "full_name": "x", "function_summary": "x"});
    let (status, body) = send(&app, Method::POST, "/genes/", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("uppercase"));
}

#[tokio::test]
async fn test_gene_delete_guard_reports_variant_count() {
    let app = app();
    let gene_id = create_gene(&app, "BRCA1").await;
    create_variant(&app, &gene_id, "chr17", 43_094_464).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/genes/{gene_id}/"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["variants_count"], 1);
    assert_eq!(
        body["error"],
        "Cannot delete gene because it has associated genetic variants"
    );
}

#[tokio::test]
async fn test_gene_search_and_list_filter() {
    let app = app();
    create_gene(&app, "BRCA1").await;
    create_gene(&app, "BRCA2").await;
    create_gene(&app, "TP53").await;

    let (status, body) = send(&app, Method::GET, "/genes/search/?q=brca", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "brca");
    assert_eq!(body["count"], 2);

    let (status, body) = send(&app, Method::GET, "/genes/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Parameter \"q\" is required for search");

    let (_, body) = send(&app, Method::GET, "/genes/?symbol=tp", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["variants_count"], 0);

    let (_, body) = send(&app, Method::GET, "/genes/statistics/", None).await;
    assert_eq!(body["total_genes"], 3);
    assert_eq!(body["genes_without_variants"], 3);
}

#[tokio::test]
async fn test_variant_for_unknown_gene_is_not_found() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/variants/",
        Some(json!({
            "gene_id": "00000000-0000-4000-8000-000000000000",
            "chromosome": "chr1",
            "position": 10,
            "reference_base": "A",
            "alternate_base": "T",
            "impact": "SILENT"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_variant_queries() {
    let app = app();
    let brca1 = create_gene(&app, "BRCA1").await;
    let tp53 = create_gene(&app, "TP53").await;
    create_variant(&app, &brca1, "chr17", 300).await;
    create_variant(&app, &brca1, "chr17", 100).await;
    create_variant(&app, &tp53, "chr13", 50).await;

    let (status, body) = send(&app, Method::GET, "/variants/by_gene/?gene_symbol=brca1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gene_symbol"], "BRCA1");
    assert_eq!(body["total_variants"], 2);
    assert_eq!(body["variants"][0]["position"], 100);
    assert_eq!(body["variants"][0]["mutation"], "A>G");

    let (_, body) = send(&app, Method::GET, "/variants/by_chromosome?chr=chr13", None).await;
    assert_eq!(body["total_variants"], 1);

    let (status, _) = send(&app, Method::GET, "/variants/by_chromosome/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/variants/?chromosome=chr17&impact=MISSENSE", None).await;
    assert_eq!(body["count"], 2);

    let (_, body) = send(&app, Method::GET, "/variants/statistics/", None).await;
    assert_eq!(body["total_variants"], 3);
    assert_eq!(body["top_chromosomes"][0]["chromosome"], "chr17");
}

#[tokio::test]
async fn test_report_validation_rules() {
    let app = app();
    let gene = create_gene(&app, "EGFR").await;
    let variant = create_variant(&app, &gene, "chr7", 55_191_822).await;

    let (status, body) = create_report(&app, PATIENT, &variant, json!("1.5")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("between 0 and 1"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/patient-reports/",
        Some(json!({
            "patient_id": PATIENT,
            "variant_id": variant,
            "detection_date": "2200-01-01",
            "allele_frequency": "0.5"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = create_report(&app, "not-a-uuid", &variant, json!(0.5)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_carries_pending_clinical_data() {
    let app = app();
    let gene = create_gene(&app, "KRAS").await;
    let variant = create_variant(&app, &gene, "chr12", 25_245_350).await;

    let (status, body) = create_report(&app, PATIENT, &variant, json!("0.45")).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["allele_frequency"], "0.4500");
    assert_eq!(body["gene_symbol"], "KRAS");
    assert_eq!(body["clinical_data"]["integration_status"], "pending");

    let (status, body) = send(&app, Method::GET, &format!("/patient-reports/patient/{PATIENT}/"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_variants"], 1);
    assert_eq!(body["clinical_summary"]["integration_status"], "pending");

    let uri = format!("/patient-reports/patient_statistics/?patient_id={PATIENT}");
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average_allele_frequency"], "0.4500");

    let (_, body) = send(&app, Method::GET, "/patient-reports/general_statistics", None).await;
    assert_eq!(body["total_reports"], 1);
    assert_eq!(body["average_variants_per_patient"], 1.0);
}

#[tokio::test]
async fn test_duplicate_report_rejected() {
    let app = app();
    let gene = create_gene(&app, "ALK").await;
    let variant = create_variant(&app, &gene, "chr2", 29_192_774).await;

    let (status, _) = create_report(&app, PATIENT, &variant, json!("0.3")).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = create_report(&app, PATIENT, &variant, json!("0.3")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_variant_delete_cascades_reports() {
    let app = app();
    let gene = create_gene(&app, "PIK3CA").await;
    let variant = create_variant(&app, &gene, "chr3", 179_234_297).await;
    let (_, report) = create_report(&app, PATIENT, &variant, json!(0.2)).await;
    let report_id = report["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, Method::DELETE, &format!("/variants/{variant}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/patient-reports/{report_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_patient_is_not_found() {
    let app = app();
    let (status, body) = send(&app, Method::GET, &format!("/patient-reports/patient/{PATIENT}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("No reports found for patient {PATIENT}"));
}

#[tokio::test]
async fn test_unknown_route_and_bad_ids() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/proteins/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");

    let (status, _) = send(&app, Method::GET, "/genes/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_body_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/genes/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_variant_is_conflict() {
    let app = app();
    let gene = create_gene(&app, "BRCA1").await;
    create_variant(&app, &gene, "chr17", 41_276_045).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/variants/",
        Some(json!({
            "gene_id": gene,
            "chromosome": "chr17",
            "position": 41_276_045,
            "reference_base": "A",
            "alternate_base": "G",
            "impact": "SILENT"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"), "{body}");
}

#[tokio::test]
async fn test_variant_update_and_collision() {
    let app = app();
    let gene = create_gene(&app, "BRCA1").await;
    create_variant(&app, &gene, "chr17", 41_276_045).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/variants/",
        Some(json!({
            "gene_id": gene,
            "chromosome": "chr17",
            "position": 41_276_045,
            "reference_base": "C",
            "alternate_base": "G",
            "impact": "MISSENSE"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let other = body["id"].as_str().unwrap().to_string();

    let change = json!({"impact": "SILENT", "reference_base": "c"});
    let (status, first) = send(&app, Method::PATCH, &format!("/variants/{other}/"), Some(change.clone())).await;
    assert_eq!(status, StatusCode::OK, "{first}");
    assert_eq!(first["impact"], "SILENT");
    assert_eq!(first["reference_base"], "C");

    // Same update again leaves the stored variant unchanged
    let (status, second) = send(&app, Method::PUT, &format!("/variants/{other}"), Some(change)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, stored) = send(&app, Method::GET, &format!("/variants/{other}"), None).await;
    for field in ["reference_base", "alternate_base", "impact", "chromosome", "position", "gene_id"] {
        assert_eq!(second[field], first[field], "{field}");
        assert_eq!(stored[field], first[field], "{field}");
    }

    // Moving onto the first variant's coordinates and bases is refused
    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/variants/{other}"),
        Some(json!({"reference_base": "A"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"), "{body}");

    let (_, stored) = send(&app, Method::GET, &format!("/variants/{other}"), None).await;
    assert_eq!(stored["reference_base"], "C");
}

#[tokio::test]
async fn test_report_update_collision_and_repeat() {
    let app = app();
    let gene = create_gene(&app, "TP53").await;
    let variant = create_variant(&app, &gene, "chr17", 7_675_088).await;

    let (status, _) = create_report(&app, PATIENT, &variant, json!("0.2")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/patient-reports/",
        Some(json!({
            "patient_id": PATIENT,
            "variant_id": variant,
            "detection_date": "2024-04-01",
            "allele_frequency": "0.3"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let later = body["id"].as_str().unwrap().to_string();

    let change = json!({"allele_frequency": "0.35"});
    for _ in 0..2 {
        let (status, body) = send(&app, Method::PATCH, &format!("/patient-reports/{later}"), Some(change.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allele_frequency"], "0.3500");
        assert_eq!(body["detection_date"], "2024-04-01");
    }

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/patient-reports/{later}"),
        Some(json!({"detection_date": "2024-03-15"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (_, stored) = send(&app, Method::GET, &format!("/patient-reports/{later}"), None).await;
    assert_eq!(stored["detection_date"], "2024-04-01");
}
