use restlint::builtin::{CUSTOM_ACTIONS, METHOD_PATH_CONSISTENCY, SINGULAR_USER_RESOURCES};
use restlint::primitives::paths_of;
use restlint::serialize::to_yaml;
use restlint::synthesize::{appropriate_methods, extract_path_parameters};
use restlint::{RuleStatus, Validator, analyze_path, synthesize_spec};
use serde_json::json;

#[test]
fn analyzes_collection_path() {
    let analysis = analyze_path("/api/v0/admin/cloudAgents/{datacenterId}/upgrades");
    assert_eq!(analysis.path, "/api/v0/admin/cloudAgents/{datacenterId}/upgrades");
    assert_eq!(analysis.path_parameters, vec!["datacenterId"]);
    assert!(!analysis.ends_with_resource);
    assert_eq!(analysis.appropriate_methods, vec!["get", "post"]);
}

#[test]
fn analyzes_resource_path() {
    let analysis = analyze_path("/users/{id}");
    assert_eq!(analysis.path_parameters, vec!["id"]);
    assert!(analysis.ends_with_resource);
    assert_eq!(analysis.appropriate_methods, vec!["get", "put", "patch", "delete"]);
}

#[test]
fn analyzes_empty_path() {
    let analysis = analyze_path("");
    assert!(analysis.path_parameters.is_empty());
    assert!(!analysis.ends_with_resource);
    assert_eq!(analysis.appropriate_methods, appropriate_methods(false));
}

#[test]
fn extracts_parameters_in_order() {
    assert_eq!(
        extract_path_parameters("/orgs/{orgId}/teams/{teamId}/members"),
        vec!["orgId", "teamId"]
    );
    assert!(extract_path_parameters("/a/{/b/}").is_empty());
}

#[test]
fn synthesized_operations_have_expected_shape() {
    let spec = synthesize_spec(&analyze_path("/widgets/{widgetId}/parts"));
    assert_eq!(spec["openapi"], "3.0.0");
    assert_eq!(spec["info"]["title"], "Auto-generated API for URL Path Validation");

    let item = &spec["paths"]["/widgets/{widgetId}/parts"];
    assert_eq!(item["get"]["summary"], "GET endpoint");
    assert_eq!(
        item["get"]["description"],
        "Auto-generated GET endpoint for validation"
    );
    assert_eq!(item["get"]["responses"], json!({"200": {"description": "OK"}}));
    assert_eq!(
        item["get"]["parameters"],
        json!([{"name": "widgetId", "in": "path", "required": true, "schema": {"type": "string"}}])
    );
    assert!(item["post"].get("parameters").is_none());
}

#[test]
fn parameterless_path_has_no_parameters_key() {
    let spec = synthesize_spec(&analyze_path("/widgets"));
    let item = &spec["paths"]["/widgets"];
    assert!(item["get"].get("parameters").is_none());
}

#[test]
fn synthesized_spec_has_exactly_one_path() {
    let spec = synthesize_spec(&analyze_path("/a/{b}"));
    let paths = paths_of(&spec).expect("paths present");
    assert_eq!(paths.len(), 1);
    let methods: Vec<&String> = paths["/a/{b}"].as_object().expect("object").keys().collect();
    assert_eq!(methods, vec!["get", "put", "patch", "delete"]);
}

#[test]
fn url_path_validation_runs_every_rule() {
    let report = Validator::builtin().validate_url_path("/users/{id}");
    assert_eq!(report.path_analysis.path_parameters, vec!["id"]);
    assert_eq!(report.results.len(), 3);
    assert_eq!(
        report.results[METHOD_PATH_CONSISTENCY].status,
        RuleStatus::Passed
    );
    assert_eq!(report.results[CUSTOM_ACTIONS].status, RuleStatus::Passed);
    let singular = &report.results[SINGULAR_USER_RESOURCES];
    assert_eq!(singular.status, RuleStatus::Failed);
    assert_eq!(singular.issues[0].path.as_deref(), Some("/users/{id}"));
    assert!(report.has_failures());
}

#[test]
fn me_path_passes_every_builtin() {
    let report = Validator::builtin().validate_url_path("/me/settings/{settingId}");
    assert!(!report.has_failures(), "{:?}", report.results);
}

#[test]
fn action_paths_synthesize_post() {
    let report = Validator::builtin().validate_url_path("/widgets/{widgetId}/actions/reboot");
    assert_eq!(report.results[CUSTOM_ACTIONS].status, RuleStatus::Passed);
    assert!(!report.has_failures());
}

#[test]
fn emitted_yaml_validates_like_the_tree() {
    let path = "/api/v0/admin/cloudAgents/{datacenterId}/upgrades";
    let validator = Validator::builtin();
    let yaml = to_yaml(&synthesize_spec(&analyze_path(path))).expect("serializes");
    let from_yaml = validator.validate(&yaml, &[]).expect("round-trips");
    let direct = validator.validate_url_path(path);
    assert_eq!(from_yaml.results, direct.results);
}
