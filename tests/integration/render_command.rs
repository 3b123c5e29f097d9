//! `librepub render` driven through the compiled binary.

use predicates::prelude::*;

use crate::common::{FileAssert, TestProject};
use librepub::test_utils::ManifestFixture;

#[test]
fn test_render_writes_package_and_chapters() {
    let project = TestProject::new().unwrap();
    project.write_manifest(&ManifestFixture::basic().content).unwrap();

    let output = project.run_librepub(&["render", "publication.toml", "--out-dir", "out"]).unwrap();
    output.assert_success().assert_stdout_contains("Rendered Moby Dick");

    let out = project.out_path();
    FileAssert::contains(out.join("content.opf"), "<dc:title>Moby Dick</dc:title>");
    FileAssert::contains(out.join("content.opf"), r#"<itemref idref="ch1"/>"#);
    FileAssert::contains(out.join("text/chapter1.xhtml"), "<p>Call me Ishmael.</p>");
    FileAssert::contains(out.join("text/chapter2.xhtml"), "<h1>The Carpet-Bag</h1>");
    FileAssert::not_exists(out.join("images/cover.jpg"));
    FileAssert::not_exists(out.join("styles/main.css"));
}

#[test]
fn test_render_reads_content_files_relative_to_manifest() {
    let project = TestProject::new().unwrap();
    project.create_file("book/chapters/one.html", "<p>From a file</p>").unwrap();
    project
        .create_file(
            "book/publication.toml",
            r#"
title = "T"
language = "en"
identifier = "urn:uuid:1"

[[items]]
id = "ch1"
file = "ch1.xhtml"
type = "application/xhtml+xml"
content_file = "chapters/one.html"
"#,
        )
        .unwrap();

    project
        .run_librepub(&["render", "book/publication.toml", "-o", "out", "--quiet"])
        .unwrap()
        .assert_success();

    FileAssert::contains(project.out_path().join("ch1.xhtml"), "<p>From a file</p>");
}

#[test]
fn test_render_with_template_dir_and_package_file() {
    let project = TestProject::new().unwrap();
    project
        .create_file("templates/summary.txt", "{{ title }}: {{ text_items | length }} chapters")
        .unwrap();
    project
        .create_file(
            "publication.toml",
            &format!("{}\ntemplate = \"summary.txt\"\n", metadata_lines()),
        )
        .unwrap();

    project
        .run_librepub(&[
            "render",
            "publication.toml",
            "-o",
            "out",
            "--templates",
            "templates",
            "--method",
            "text",
            "--package-file",
            "summary.txt",
        ])
        .unwrap()
        .assert_success();

    FileAssert::contains(project.out_path().join("summary.txt"), "Moby Dick: 0 chapters");
}

#[test]
fn test_template_dir_from_environment() {
    let project = TestProject::new().unwrap();
    project.write_manifest(&ManifestFixture::metadata_only().content).unwrap();
    let templates = project.create_file("env-templates/content.opf", "env {{ title }}").unwrap();
    let templates_dir = templates.parent().unwrap().to_string_lossy().to_string();

    project
        .run_librepub_with_env(
            &["render", "publication.toml", "-o", "out"],
            &[("LIBREPUB_TEMPLATE_DIR", templates_dir.as_str())],
        )
        .unwrap()
        .assert_success();

    FileAssert::contains(project.out_path().join("content.opf"), "env Empty Book");
}

#[test]
fn test_config_file_sets_method_and_template_dirs() {
    let project = TestProject::new().unwrap();
    project.write_manifest(&ManifestFixture::metadata_only().content).unwrap();
    project.create_file("tpl/content.opf", "{{ title }} <{{ language }}>").unwrap();
    project
        .create_file(
            "librepub.toml",
            "serialization_method = \"text\"\ntemplate_dirs = [\"tpl\"]\n",
        )
        .unwrap();

    project
        .run_librepub(&["render", "publication.toml", "-o", "out"])
        .unwrap()
        .assert_success();

    FileAssert::contains(project.out_path().join("content.opf"), "Empty Book <en>");
}

#[test]
fn test_missing_template_fails_without_output() {
    let project = TestProject::new().unwrap();
    project.write_manifest(&ManifestFixture::missing_template().content).unwrap();

    project
        .run_librepub(&["render", "publication.toml", "-o", "out"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("does-not-exist.opf");

    FileAssert::not_exists(project.out_path().join("content.opf"));
}

#[test]
fn test_invalid_manifest_fails() {
    let project = TestProject::new().unwrap();
    project.write_manifest(&ManifestFixture::invalid_syntax().content).unwrap();

    project
        .run_librepub(&["render", "publication.toml", "-o", "out"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Failed to load manifest");

    FileAssert::not_exists(project.out_path());
}

#[test]
fn test_empty_required_field_fails() {
    let project = TestProject::new().unwrap();
    project.write_manifest("title = \"T\"\nlanguage = \"\"\nidentifier = \"i\"\n").unwrap();

    project
        .run_librepub(&["render", "publication.toml", "-o", "out"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("'language'");
}

#[test]
fn test_invalid_method_in_environment_fails() {
    let project = TestProject::new().unwrap();
    project.write_manifest(&ManifestFixture::metadata_only().content).unwrap();

    project
        .run_librepub_with_env(
            &["render", "publication.toml", "-o", "out"],
            &[("LIBREPUB_SERIALIZATION_METHOD", "pdf")],
        )
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("LIBREPUB_SERIALIZATION_METHOD");
}

#[test]
fn test_render_help() {
    let mut cmd = assert_cmd::Command::cargo_bin("librepub").unwrap();
    cmd.arg("render")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--out-dir"))
        .stdout(predicate::str::contains("--templates"))
        .stdout(predicate::str::contains("--package-file"));
}

#[test]
fn test_missing_manifest_reports_path() {
    let mut cmd = assert_cmd::Command::cargo_bin("librepub").unwrap();
    cmd.args(["render", "no-such-manifest.toml", "--out-dir", "out"])
        .env("NO_COLOR", "1")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no-such-manifest.toml"));
}

fn metadata_lines() -> String {
    ManifestFixture::basic()
        .content
        .lines()
        .take_while(|line| !line.starts_with("[[items]]"))
        .collect::<Vec<_>>()
        .join("\n")
}
