use proptest::prelude::*;
use restlint::builtin::{CustomActions, MethodPathConsistency, SingularUserResources};
use restlint::{Rule, RuleStatus};
use serde_json::{Map, Value, json};

/// A literal path segment such as `widgets` or `cloudAgents`.
fn arb_literal() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,8}".prop_filter("reserved words", |s| {
        s != "users" && s != "me" && s != "actions"
    })
}

/// A `{param}` segment.
fn arb_param() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,8}".prop_map(|s| format!("{{{}}}", s))
}

/// A path of one to five segments with literals and parameters mixed.
fn arb_path() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![arb_literal(), arb_param()], 1..5)
        .prop_map(|segments| format!("/{}", segments.join("/")))
}

fn spec_with(path: &str, methods: &[&str]) -> Value {
    let item: Map<String, Value> = methods.iter().map(|m| (m.to_string(), json!({}))).collect();
    json!({ "paths": { path: item } })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // GET never violates the method/path convention, whatever the path shape.
    #[test]
    fn get_is_always_consistent(path in arb_path()) {
        let result = MethodPathConsistency.apply(&spec_with(&path, &["get"])).unwrap();
        prop_assert_eq!(result.status, RuleStatus::Passed);
    }

    // Exactly one of POST and DELETE is misplaced on any path.
    #[test]
    fn post_and_delete_are_complementary(path in arb_path()) {
        let result = MethodPathConsistency
            .apply(&spec_with(&path, &["post", "delete"]))
            .unwrap();
        prop_assert_eq!(result.status, RuleStatus::Failed);
        prop_assert_eq!(result.issues.len(), 1);
        let expected = if path.ends_with('}') { "post" } else { "delete" };
        prop_assert_eq!(result.issues[0].method.as_deref(), Some(expected));
    }

    // Paths without reserved segments never trip the user or action rules.
    #[test]
    fn plain_paths_pass_user_and_action_rules(path in arb_path()) {
        let spec = spec_with(&path, &["get"]);
        prop_assert_eq!(SingularUserResources.apply(&spec).unwrap().status, RuleStatus::Passed);
        prop_assert_eq!(CustomActions.apply(&spec).unwrap().status, RuleStatus::Passed);
    }

    // Any path nested under /users/ without /me/ is flagged.
    #[test]
    fn nested_user_paths_are_flagged(rest in arb_path()) {
        let path = format!("/users{}", rest);
        let result = SingularUserResources.apply(&spec_with(&path, &["get"])).unwrap();
        prop_assert_eq!(result.status, RuleStatus::Failed);
    }
}
