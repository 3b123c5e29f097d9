//! `librepub context` driven through the compiled binary.

use crate::common::TestProject;
use librepub::test_utils::ManifestFixture;

#[test]
fn test_context_prints_json_with_text_items() {
    let project = TestProject::new().unwrap();
    project.write_manifest(&ManifestFixture::basic().content).unwrap();

    let output = project.run_librepub(&["context", "publication.toml"]).unwrap();
    output.assert_success();

    let context: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(context["title"], "Moby Dick");
    assert_eq!(context["creator"], "Herman Melville");
    assert!(context["date"].is_null());
    assert_eq!(context["items"].as_array().unwrap().len(), 4);

    let text_ids: Vec<&str> = context["text_items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(text_ids, vec!["ch1", "ch2"]);
}

#[test]
fn test_context_without_items() {
    let project = TestProject::new().unwrap();
    project.write_manifest(&ManifestFixture::metadata_only().content).unwrap();

    let output = project.run_librepub(&["--quiet", "context", "publication.toml"]).unwrap();
    output.assert_success();

    let context: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert!(context["items"].is_null());
    assert_eq!(context["text_items"], serde_json::json!([]));
}

#[test]
fn test_context_invalid_manifest() {
    let project = TestProject::new().unwrap();
    project.write_manifest(&ManifestFixture::invalid_syntax().content).unwrap();

    project
        .run_librepub(&["context", "publication.toml"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("error");
}
