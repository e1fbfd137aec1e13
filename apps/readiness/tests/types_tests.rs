//! Tests for the HTTP API request/response types.

// Allow unwrap in tests - these are standard for test code
#![allow(clippy::unwrap_used)]

use readiness::api::{
    ErrorResponse, HealthResponse, ListQuery, ReloadResponse, WorkPackageListResponse,
};
use readiness_core::{
    AssessedPackage, Dashboard, Material, ReadinessStatus, WorkPackage, compute_readiness,
};
use serde_json::json;

fn blocked_package() -> WorkPackage {
    WorkPackage::new(
        "Switchgear Install",
        vec![
            Material::on_site("Cable tray"),
            Material::awaiting("Switchgear lineup", "Not RTS"),
            Material::awaiting("Bus duct", "In Transit").with_eta("2024-09-02"),
        ],
    )
}

// =============================================================================
// HEALTH / RELOAD / ERROR
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_reload_response_success() {
    let value = serde_json::to_value(ReloadResponse::success(12)).unwrap();
    assert_eq!(
        value,
        json!({"success": true, "work_packages": 12, "error": null})
    );
}

#[test]
fn test_reload_response_error() {
    let reload = ReloadResponse::error("Reload failed: boom");
    assert!(!reload.success);
    assert_eq!(reload.work_packages, 0);
    assert_eq!(reload.error.as_deref(), Some("Reload failed: boom"));
}

#[test]
fn test_error_response_serialization() {
    let value = serde_json::to_value(ErrorResponse::new("nope")).unwrap();
    assert_eq!(value, json!({"success": false, "error": "nope"}));
}

// =============================================================================
// LIST QUERY
// =============================================================================

#[test]
fn test_list_query_without_status() {
    let query: ListQuery = serde_json::from_value(json!({})).unwrap();
    assert_eq!(query.status_filter(), Ok(None));
}

#[test]
fn test_list_query_parses_status_case_insensitively() {
    let query = ListQuery {
        status: Some("PARTIAL".to_string()),
    };
    assert_eq!(query.status_filter(), Ok(Some(ReadinessStatus::Partial)));
}

#[test]
fn test_list_query_rejects_unknown_status() {
    let query = ListQuery {
        status: Some("delayed".to_string()),
    };
    assert!(query.status_filter().is_err());
}

// =============================================================================
// READINESS / WORK PACKAGE
// =============================================================================

#[test]
fn test_readiness_wire_shape() {
    let readiness = compute_readiness(&blocked_package().required_materials);
    let value = serde_json::to_value(&readiness).unwrap();

    assert_eq!(value["on_site"], 1);
    assert_eq!(value["in_transit"], 1);
    assert_eq!(value["not_ready"], 1);
    assert_eq!(value["total"], 3);
    assert_eq!(value["percent"], 33);
    assert_eq!(value["status"], "blocked");
    assert_eq!(value["can_start"], false);
    assert_eq!(value["blocking_items"].as_array().unwrap().len(), 2);
    assert_eq!(value["blocking_items"][0]["status"], "Not RTS");
    assert!(value["blocking_items"][0]["eta"].is_null());
    assert_eq!(value["blocking_items"][1]["eta"], "2024-09-02");
}

#[test]
fn test_assessed_package_omits_missing_id() {
    let assessed = AssessedPackage::assess(blocked_package());
    let value = serde_json::to_value(&assessed).unwrap();

    assert!(value["package"].get("id").is_none());
    assert_eq!(value["package"]["name"], "Switchgear Install");
    assert_eq!(
        value["package"]["required_materials"].as_array().unwrap().len(),
        3
    );
    assert_eq!(value["readiness"]["status"], "blocked");
}

#[test]
fn test_assessed_package_keeps_id() {
    let mut pkg = blocked_package();
    pkg.id = Some("WP-330".to_string());
    let assessed = AssessedPackage::assess(pkg);

    let value = serde_json::to_value(&assessed).unwrap();
    assert_eq!(value["package"]["id"], "WP-330");
}

#[test]
fn test_card_and_package_share_readiness_shape() {
    let assessed = AssessedPackage::assess(blocked_package());

    let package = serde_json::to_value(&assessed).unwrap();
    let card = serde_json::to_value(assessed.card()).unwrap();

    assert_eq!(package["readiness"], card["readiness"]);
}

#[test]
fn test_list_response_counts_entries() {
    let dashboard = Dashboard::assess(vec![
        blocked_package(),
        WorkPackage::new("Layout", vec![Material::on_site("Survey stakes")]),
    ]);
    let response = WorkPackageListResponse::new(dashboard.filtered(None));
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["count"], 2);
    assert_eq!(value["work_packages"][1]["package"]["name"], "Layout");
    assert_eq!(value["work_packages"][1]["readiness"]["percent"], 100);
}

// =============================================================================
// EXECUTIVE SUMMARY
// =============================================================================

#[test]
fn test_summary_serializes_from_dashboard() {
    let dashboard = Dashboard::assess(vec![
        blocked_package(),
        WorkPackage::new("Layout", vec![Material::on_site("Survey stakes")]),
    ]);
    let value = serde_json::to_value(dashboard.executive_summary()).unwrap();

    assert_eq!(value["counts"], json!({"ready": 1, "partial": 0, "blocked": 1}));
    assert_eq!(value["lines"][0]["light"], "red");
    assert_eq!(value["lines"][0]["headline"], "Blocked - 1 materials missing");
    assert_eq!(value["lines"][1]["light"], "green");
    assert_eq!(value["lines"][1]["readiness_percent"], 100);
}
