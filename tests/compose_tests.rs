//! Integration tests for layered composition.

use bundle_config::compose::compose;
use bundle_config::rules::{NamedRuleSet, RuleDefinition};
use serde_json::json;

#[test]
fn test_target_layer_wins_on_conflict() {
    let common = json!({"mode": "development", "output": {"path": "/dist", "filename": "[name].js"}});
    let target = json!({"output": {"path": "/dist/client"}, "target": "web"});

    let config = compose(&common, &target, &NamedRuleSet::new());

    assert_eq!(config.value()["output"]["path"], "/dist/client");
    assert_eq!(config.value()["output"]["filename"], "[name].js");
    assert_eq!(config.value()["mode"], "development");
    assert_eq!(config.value()["target"], "web");
}

#[test]
fn test_plugin_lists_concatenate() {
    let common = json!({"plugins": [{"plugin": "DefinePlugin"}]});
    let target = json!({"plugins": [{"plugin": "HotModuleReplacementPlugin"}]});

    let config = compose(&common, &target, &NamedRuleSet::new());
    let plugins = config.value()["plugins"].as_array().unwrap();

    assert_eq!(plugins.len(), 2);
    assert_eq!(plugins[0]["plugin"], "DefinePlugin");
}

#[test]
fn test_module_rules_replaced_by_rule_set() {
    let common = json!({"module": {"rules": [{"test": "stale"}], "noParse": "jquery"}});
    let target = json!({"module": {"rules": [{"test": "also-stale"}]}});
    let rules = NamedRuleSet::new()
        .with("jsRule", RuleDefinition::new("J"))
        .with("cssRule", RuleDefinition::disabled());

    let config = compose(&common, &target, &rules);

    assert_eq!(config.module_rules(), &[json!({"test": "J"})]);
    assert_eq!(config.value()["module"]["noParse"], "jquery");
    assert_eq!(config.rules(), &rules);
}

#[test]
fn test_empty_rule_set_gives_empty_list() {
    let config = compose(&json!({}), &json!({}), &NamedRuleSet::new());
    assert_eq!(config.value()["module"]["rules"], json!([]));
}

#[test]
fn test_fragments_not_mutated() {
    let common = json!({"resolve": {"extensions": [".js"]}});
    let target = json!({"resolve": {"extensions": [".jsx"]}});
    let common_before = common.clone();
    let target_before = target.clone();

    let config = compose(&common, &target, &NamedRuleSet::new());

    assert_eq!(config.value()["resolve"]["extensions"], json!([".js", ".jsx"]));
    assert_eq!(common, common_before);
    assert_eq!(target, target_before);
}
