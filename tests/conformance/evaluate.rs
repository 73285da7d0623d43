use super::common::spec;
use regex::Regex;
use restlint::evaluate::{Condition, NO_SCHEMAS_MESSAGE, evaluate_condition};
use restlint::primitives::paths_of;
use restlint::types::Issue;
use serde_json::Value;

fn run(condition: &Condition, spec: &Value) -> Vec<Issue> {
    let paths = paths_of(spec).expect("spec has paths");
    evaluate_condition(condition, spec, paths)
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

const WIDGETS: &str = r#"
paths:
  /api/v1/widgets:
    get: {}
    post: {}
  /api/v1/widgets/{widgetId}:
    parameters:
      - name: widgetId
        in: path
    get: {}
  /legacy/Widget_List:
    get: {}
"#;

// ─── path_pattern ───────────────────────────────────────────────────────────

#[test]
fn path_pattern_flags_non_matching_paths() {
    let cond = Condition::PathPattern {
        pattern: regex("^/api/v[0-9]+/"),
        message: "paths must be versioned".into(),
    };
    let issues = run(&cond, &spec(WIDGETS));
    assert_eq!(issues, vec![Issue::at_path("/legacy/Widget_List", "paths must be versioned")]);
}

#[test]
fn path_pattern_is_unanchored_unless_author_anchors() {
    let cond = Condition::PathPattern {
        pattern: regex("widgets"),
        message: "m".into(),
    };
    let issues = run(&cond, &spec(WIDGETS));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path.as_deref(), Some("/legacy/Widget_List"));
}

// ─── method_check ───────────────────────────────────────────────────────────

#[test]
fn method_check_reports_missing_method() {
    let cond = Condition::MethodCheck {
        path: "/api/v1/widgets/{widgetId}".into(),
        method: "delete".into(),
        message: "widgets must be deletable".into(),
    };
    let issues = run(&cond, &spec(WIDGETS));
    assert_eq!(
        issues,
        vec![Issue::at_path("/api/v1/widgets/{widgetId}", "widgets must be deletable")]
    );
}

#[test]
fn method_check_is_case_insensitive() {
    let cond = Condition::MethodCheck {
        path: "/api/v1/widgets".into(),
        method: "POST".into(),
        message: "m".into(),
    };
    assert!(run(&cond, &spec(WIDGETS)).is_empty());
}

#[test]
fn method_check_ignores_absent_path() {
    let cond = Condition::MethodCheck {
        path: "/api/v1/gadgets".into(),
        method: "get".into(),
        message: "m".into(),
    };
    assert!(run(&cond, &spec(WIDGETS)).is_empty());
}

// ─── parameter_check ────────────────────────────────────────────────────────

#[test]
fn parameter_check_requires_parameters_key() {
    let with_params = Condition::ParameterCheck {
        path: "/api/v1/widgets/{widgetId}".into(),
        message: "m".into(),
    };
    assert!(run(&with_params, &spec(WIDGETS)).is_empty());

    let without_params = Condition::ParameterCheck {
        path: "/api/v1/widgets".into(),
        message: "collection needs paging parameters".into(),
    };
    assert_eq!(
        run(&without_params, &spec(WIDGETS)),
        vec![Issue::at_path("/api/v1/widgets", "collection needs paging parameters")]
    );
}

#[test]
fn parameter_check_ignores_absent_path() {
    let cond = Condition::ParameterCheck {
        path: "/nowhere".into(),
        message: "m".into(),
    };
    assert!(run(&cond, &spec(WIDGETS)).is_empty());
}

// ─── resource_naming ────────────────────────────────────────────────────────

#[test]
fn resource_naming_reports_first_bad_segment_only() {
    let cond = Condition::ResourceNaming {
        pattern: regex(r"^([a-z][a-zA-Z0-9]*|\{[a-zA-Z]+\})$"),
        message: "segments must be camelCase".into(),
    };
    let spec = spec(
        r#"
paths:
  /good/path/{id}:
    get: {}
  /Bad_One/Bad_Two:
    get: {}
"#,
    );
    let issues = run(&cond, &spec);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path.as_deref(), Some("/Bad_One/Bad_Two"));
    assert_eq!(issues[0].segment.as_deref(), Some("Bad_One"));
    assert_eq!(issues[0].message, "segments must be camelCase");
}

#[test]
fn resource_naming_skips_empty_segments() {
    let cond = Condition::ResourceNaming {
        pattern: regex("^[a-z]+$"),
        message: "m".into(),
    };
    let spec = spec("paths:\n  /a//b/:\n    get: {}\n");
    assert!(run(&cond, &spec).is_empty());
}

// ─── schema_field ───────────────────────────────────────────────────────────

fn created_time() -> Condition {
    Condition::SchemaField {
        field: "createdTime".into(),
        format: Some("date-time".into()),
        message: "Resources should have a createdTime field".into(),
    }
}

#[test]
fn schema_field_without_definitions_reports_once() {
    let spec = spec("paths:\n  /widgets:\n    get: {}\n");
    let issues = run(&created_time(), &spec);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field.as_deref(), Some("createdTime"));
    assert_eq!(issues[0].message, NO_SCHEMAS_MESSAGE);
    assert!(issues[0].message.starts_with("No schema definitions found"));
}

#[test]
fn schema_field_found_with_expected_format() {
    let spec = spec(
        r#"
paths: {}
components:
  schemas:
    Widget:
      properties:
        createdTime:
          type: string
          format: date-time
"#,
    );
    assert!(run(&created_time(), &spec).is_empty());
}

#[test]
fn schema_field_wrong_format_names_schema() {
    let spec = spec(
        r#"
paths: {}
components:
  schemas:
    Widget:
      properties:
        createdTime:
          type: integer
"#,
    );
    let issues = run(&created_time(), &spec);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].schema.as_deref(), Some("Widget"));
    assert_eq!(issues[0].field.as_deref(), Some("createdTime"));
    assert_eq!(
        issues[0].message,
        "Resources should have a createdTime field (format should be date-time)"
    );
}

#[test]
fn schema_field_stops_at_first_schema_declaring_field() {
    // The first match has the wrong format; a later correct one is not consulted.
    let spec = spec(
        r#"
paths: {}
components:
  schemas:
    Alpha:
      properties:
        createdTime:
          format: date
    Beta:
      properties:
        createdTime:
          format: date-time
"#,
    );
    let issues = run(&created_time(), &spec);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].schema.as_deref(), Some("Alpha"));
}

#[test]
fn schema_field_falls_back_to_swagger_definitions() {
    let spec = spec(
        r#"
swagger: "2.0"
paths: {}
definitions:
  Widget:
    properties:
      createdTime:
        type: string
        format: date-time
"#,
    );
    assert!(run(&created_time(), &spec).is_empty());
}

#[test]
fn schema_field_components_without_schemas_ignores_definitions() {
    let spec = spec(
        r#"
paths: {}
components:
  securitySchemes: {}
definitions:
  Widget:
    properties:
      createdTime:
        format: date-time
"#,
    );
    let issues = run(&created_time(), &spec);
    assert_eq!(issues, vec![Issue::for_field("createdTime", NO_SCHEMAS_MESSAGE)]);
}

#[test]
fn schema_field_non_mapping_components_falls_back_to_definitions() {
    let spec = spec(
        r#"
paths: {}
components: ~
definitions:
  Widget:
    properties:
      createdTime:
        format: date-time
"#,
    );
    assert!(run(&created_time(), &spec).is_empty());
}

#[test]
fn schema_field_missing_everywhere_uses_condition_message() {
    let spec = spec(
        r#"
paths: {}
components:
  schemas:
    Widget:
      properties:
        name:
          type: string
"#,
    );
    let issues = run(&created_time(), &spec);
    assert_eq!(
        issues,
        vec![Issue::for_field(
            "createdTime",
            "Resources should have a createdTime field"
        )]
    );
}

#[test]
fn schema_field_without_format_accepts_any_property_shape() {
    let cond = Condition::SchemaField {
        field: "createdBy".into(),
        format: None,
        message: "m".into(),
    };
    let spec = spec(
        r#"
paths: {}
components:
  schemas:
    Widget:
      properties:
        createdBy: {}
"#,
    );
    assert!(run(&cond, &spec).is_empty());
}
