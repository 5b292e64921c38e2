use crate::infra::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Datelike, Utc};
use conservador::error::AppError;
use conservador::registry::domain::{InscriptionType, Office, Region, TransactionKind};
use conservador::registry::{
    compare_purchase_costs, write_schedule_csv, CostEstimate, EstimateRequest, FeeCalculator,
    PurchaseCostLine,
};
use conservador::site::{PageQuery, PageState, STYLESHEET, STYLESHEET_PATH};
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::debug;

#[derive(Debug, Serialize)]
pub(crate) struct EstimateResponse {
    /// `None` when the requested type is not in the tariff table.
    pub(crate) inscription_type: Option<&'static str>,
    pub(crate) property_value: f64,
    pub(crate) include_certificates: bool,
    pub(crate) estimate: CostEstimate,
    pub(crate) purchase_costs: Vec<PurchaseCostLine>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegionOfficesResponse {
    pub(crate) region: String,
    pub(crate) offices: &'static [Office],
}

pub(crate) fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page_endpoint))
        .route(STYLESHEET_PATH, get(stylesheet_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/inscription-types", get(inscription_types_endpoint))
        .route("/api/v1/certificates", get(certificates_endpoint))
        .route("/api/v1/estimate", post(estimate_endpoint))
        .route("/api/v1/regions", get(regions_endpoint))
        .route("/api/v1/regions/:region/offices", get(region_offices_endpoint))
        .route("/api/v1/documents", get(documents_endpoint))
        .route("/api/v1/documents/:kind", get(document_checklist_endpoint))
        .route("/api/v1/guide", get(guide_endpoint))
        .route("/api/v1/schedule.csv", get(schedule_csv_endpoint))
        .with_state(state)
}

pub(crate) async fn page_endpoint(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let page = PageState::from_query(&query);
    debug!(view = page.view.slug(), "rendering page");
    Html(state.renderer().render(&page))
}

pub(crate) async fn stylesheet_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let content_type = mime_guess::from_path(STYLESHEET_PATH).first_or_text_plain();
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CACHE_CONTROL,
                format!("public, max-age={}", state.site.asset_max_age_secs),
            ),
        ],
        STYLESHEET,
    )
}

pub(crate) async fn healthcheck(State(state): State<AppState>) -> Json<serde_json::Value> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0);
    Json(json!({ "status": "ok", "uptime_secs": uptime_secs }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn inscription_types_endpoint(
    State(state): State<AppState>,
) -> Json<&'static [InscriptionType]> {
    Json(state.catalog.inscription_types())
}

pub(crate) async fn certificates_endpoint(State(state): State<AppState>) -> Json<serde_json::Value> {
    let calculator = FeeCalculator::new(state.catalog);
    Json(json!({
        "tariff_year": state.catalog.tariff_effective_from().year(),
        "effective_from": state.catalog.tariff_effective_from(),
        "bundled_total": calculator.bundled_certificates_fee(),
        "certificates": state.catalog.certificate_fees(),
    }))
}

pub(crate) async fn estimate_endpoint(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    request.check_property_value()?;
    let calculator = FeeCalculator::new(state.catalog);
    let estimate = calculator.estimate(&request);
    let matched = state
        .catalog
        .inscription_type(&request.inscription_type)
        .map(|kind| kind.id);

    Ok(Json(EstimateResponse {
        inscription_type: matched,
        property_value: request.property_value,
        include_certificates: request.include_certificates,
        purchase_costs: compare_purchase_costs(estimate.total, request.property_value),
        estimate,
    }))
}

pub(crate) async fn regions_endpoint(State(state): State<AppState>) -> Json<&'static [Region]> {
    Json(state.catalog.regions())
}

pub(crate) async fn region_offices_endpoint(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Json<RegionOfficesResponse> {
    let offices = state.catalog.offices_in(&region).unwrap_or(&[]);
    Json(RegionOfficesResponse { region, offices })
}

pub(crate) async fn documents_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog.checklists())
}

pub(crate) async fn document_checklist_endpoint(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Response {
    match TransactionKind::from_slug(&kind).and_then(|kind| state.catalog.checklist(kind)) {
        Some(checklist) => (StatusCode::OK, Json(checklist)).into_response(),
        None => {
            let payload = json!({
                "error": format!("unknown transaction kind '{kind}'"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn guide_endpoint(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "process_steps": state.catalog.process_steps(),
        "registry_books": state.catalog.registry_books(),
        "glossary": state.catalog.glossary(),
        "links": state.catalog.links(),
    }))
}

pub(crate) async fn schedule_csv_endpoint(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let mut buffer = Vec::new();
    write_schedule_csv(state.catalog, &mut buffer)?;
    Ok((
        [(header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.as_ref())],
        buffer,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::test_state;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn read_body(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable")
            .to_vec()
    }

    async fn read_json(response: Response) -> Value {
        serde_json::from_slice(&read_body(response).await).expect("json body")
    }

    async fn get(uri: &str) -> Response {
        app_router(test_state())
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .expect("route executes")
    }

    #[tokio::test]
    async fn page_renders_default_estimate() {
        let response = get("/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .starts_with("text/html"));
        let html = String::from_utf8(read_body(response).await).expect("utf8 page");
        assert!(html.contains("id=\"total\">$221.500<"));
    }

    #[tokio::test]
    async fn page_honours_query_inputs() {
        let response =
            get("/?vista=conservadores&region=Los%20Lagos&valor=abc&tipo=fusion").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(read_body(response).await).expect("utf8 page");
        assert!(html.contains("Conservador de Puerto Montt"));
        assert!(html.contains("data-view=\"conservadores\""));
    }

    #[tokio::test]
    async fn stylesheet_is_served_as_css() {
        let response = get("/static/styles.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css"
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=3600"
        );
    }

    #[tokio::test]
    async fn estimate_endpoint_returns_breakdown() {
        let response = app_router(test_state())
            .oneshot(
                Request::post("/api/v1/estimate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"inscription_type":"dominio","property_value":100000000,"include_certificates":true}"#,
                    ))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["inscription_type"], "dominio");
        assert_eq!(payload["estimate"]["inscription_fee"], 200_000);
        assert_eq!(payload["estimate"]["certificates_fee"], 21_500);
        assert_eq!(payload["estimate"]["total"], 221_500);
        assert_eq!(payload["purchase_costs"][2]["concept"], "stamp_tax");
        assert_eq!(payload["purchase_costs"][2]["amount"], 800_000);
    }

    #[tokio::test]
    async fn estimate_endpoint_zeroes_unknown_types() {
        let Json(body) = estimate_endpoint(
            State(test_state()),
            Json(EstimateRequest {
                inscription_type: "arriendo".to_string(),
                property_value: 50_000_000.0,
                include_certificates: true,
            }),
        )
        .await
        .expect("unknown types are not an error");

        assert!(body.inscription_type.is_none());
        assert_eq!(body.estimate, CostEstimate::ZERO);
    }

    #[tokio::test]
    async fn estimate_endpoint_rejects_values_above_the_cap() {
        for value in ["1e22", "1.7976931348623157e308"] {
            let response = app_router(test_state())
                .oneshot(
                    Request::post("/api/v1/estimate")
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from(format!(
                            r#"{{"inscription_type":"dominio","property_value":{value}}}"#
                        )))
                        .unwrap(),
                )
                .await
                .expect("route executes");

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{value}");
            let payload = read_json(response).await;
            assert!(payload["error"]
                .as_str()
                .unwrap_or_default()
                .contains("exceeds the supported maximum"));
        }
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["status"], "ok");
        assert!(payload["uptime_secs"].as_i64().is_some());
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let response = get("/metrics").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn inscription_types_carry_tagged_fee_rules() {
        let response = get("/api/v1/inscription-types").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        let kinds = payload.as_array().expect("array of inscription types");
        assert_eq!(kinds.len(), 8);
        assert_eq!(kinds[0]["id"], "dominio");
        assert_eq!(
            kinds[0]["fee_rule"],
            json!({ "kind": "proportional", "rate": 0.2, "minimum": 15_000 })
        );
        let cancellation = kinds
            .iter()
            .find(|kind| kind["id"] == "cancelacion")
            .expect("cancelacion listed");
        assert_eq!(
            cancellation["fee_rule"],
            json!({ "kind": "fixed", "amount": 12_000 })
        );
    }

    #[tokio::test]
    async fn regions_endpoint_lists_offices_per_region() {
        let response = get("/api/v1/regions").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        let regions = payload.as_array().expect("array of regions");
        assert_eq!(regions.len(), 5);
        assert_eq!(regions[0]["name"], "Metropolitana");
        assert_eq!(
            regions[0]["offices"][0]["name"],
            "Conservador de Santiago"
        );
        assert!(regions[0]["offices"][0]["served_areas"].is_string());
    }

    #[tokio::test]
    async fn documents_endpoint_lists_every_checklist() {
        let response = get("/api/v1/documents").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        let kinds: Vec<_> = payload
            .as_array()
            .expect("array of checklists")
            .iter()
            .map(|checklist| checklist["kind"].clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                json!("compraventa"),
                json!("hipoteca"),
                json!("herencia"),
                json!("subdivision")
            ]
        );
    }

    #[tokio::test]
    async fn guide_endpoint_bundles_reference_material() {
        let response = get("/api/v1/guide").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["process_steps"].as_array().map(Vec::len), Some(6));
        assert_eq!(payload["process_steps"][0]["step"], 1);
        assert_eq!(payload["registry_books"].as_array().map(Vec::len), Some(4));
        assert_eq!(payload["glossary"].as_array().map(Vec::len), Some(8));
        assert_eq!(payload["links"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn region_offices_endpoint_handles_unknown_region() {
        let response = get("/api/v1/regions/Atacama/offices").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["region"], "Atacama");
        assert_eq!(payload["offices"], json!([]));

        let payload = read_json(get("/api/v1/regions/Valparaiso/offices").await).await;
        assert_eq!(payload["offices"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn document_checklist_endpoint_rejects_unknown_kind() {
        let response = get("/api/v1/documents/arriendo").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let payload = read_json(get("/api/v1/documents/hipoteca").await).await;
        assert_eq!(payload["kind"], "hipoteca");
        assert_eq!(payload["documents"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn certificates_endpoint_reports_bundle_total() {
        let payload = read_json(get("/api/v1/certificates").await).await;
        assert_eq!(payload["bundled_total"], 21_500);
        assert_eq!(payload["tariff_year"], 2024);
        assert_eq!(payload["certificates"].as_array().map(Vec::len), Some(6));
    }

    #[tokio::test]
    async fn schedule_csv_endpoint_serves_csv() {
        let response = get("/api/v1/schedule.csv").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        let body = String::from_utf8(read_body(response).await).expect("utf8 csv");
        assert!(body.starts_with("category,id,name,rule,rate_pct,amount"));
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let state = test_state();
        let response = app_router(state.clone())
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.readiness.store(true, Ordering::Release);
        let response = app_router(state)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
