//! Library end-to-end: manifests, template directories and serialization.

use std::fs;
use std::sync::Arc;

use librepub::config::RenderConfig;
use librepub::constants::{TEXT_CONTENT_TYPE, TEXT_ITEM_TEMPLATE};
use librepub::core::LibrepubError;
use librepub::manifest::PublicationManifest;
use librepub::model::{Item, Publication, Renderable};
use librepub::templating::{
    DirectoryLoader, SerializationMethod, TemplateError, TemplateLoader, TemplateRenderer,
};
use librepub::test_utils::{ManifestFixture, TemplateDirFixture, init_test_logging, sample_publication};
use tempfile::TempDir;

const SPINE_TEMPLATE: &str = "\
{{ title }} ({{ language }})
{% for item in text_items %}{{ item.id }}={{ item.file }}
{% endfor %}";

#[test]
fn test_serialize_writes_exactly_render_output() {
    init_test_logging(None);
    let templates = TempDir::new().unwrap();
    TemplateDirFixture::new()
        .with_template("content.opf", SPINE_TEMPLATE)
        .with_template(TEXT_ITEM_TEMPLATE, "<body>{{ content | safe }}</body>")
        .write_to(templates.path())
        .unwrap();
    let renderer = TemplateRenderer::new(
        DirectoryLoader::new(templates.path()),
        SerializationMethod::Xhtml,
    );

    let (publication, chapter) = sample_publication();
    let out = TempDir::new().unwrap();

    let package_path = out.path().join("content.opf");
    publication.serialize(&renderer, &package_path).unwrap();
    let written = fs::read_to_string(&package_path).unwrap();
    assert_eq!(written, publication.render(&renderer).unwrap());
    assert_eq!(written, "T (en)\nch1=chapter1.xhtml\n");

    let chapter_path = out.path().join("chapter1.xhtml");
    chapter.serialize(&renderer, &chapter_path).unwrap();
    assert_eq!(fs::read_to_string(&chapter_path).unwrap(), "<body><p>Hello</p></body>");
}

#[test]
fn test_missing_template_leaves_output_untouched() {
    let templates = TempDir::new().unwrap();
    let renderer = TemplateRenderer::new(
        DirectoryLoader::new(templates.path()),
        SerializationMethod::Xml,
    );
    let (publication, _) = sample_publication();
    let out = TempDir::new().unwrap();

    let fresh = out.path().join("fresh.opf");
    let error = publication.serialize(&renderer, &fresh).unwrap_err();
    assert!(error.is_template_not_found());
    assert!(!fresh.exists());

    let existing = out.path().join("existing.opf");
    fs::write(&existing, "previous").unwrap();
    let error = publication.serialize(&renderer, &existing).unwrap_err();
    assert!(matches!(error, LibrepubError::Template(TemplateError::NotFound { .. })));
    assert_eq!(fs::read_to_string(&existing).unwrap(), "previous");
}

#[test]
fn test_not_found_suggests_close_template_names() {
    let templates = TempDir::new().unwrap();
    TemplateDirFixture::new()
        .with_template("content.opf", "x")
        .with_template("nav/toc.ncx", "y")
        .write_to(templates.path())
        .unwrap();
    let loader = DirectoryLoader::new(templates.path());

    let error = loader.load("content.op").unwrap_err();
    match &error {
        TemplateError::NotFound {
            name,
            suggestions,
            ..
        } => {
            assert_eq!(name, "content.op");
            assert_eq!(suggestions, &vec!["content.opf".to_string()]);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(error.format_with_context().contains("content.opf"));
}

#[test]
fn test_missing_variable_names_variable_and_suggests() {
    let templates = TempDir::new().unwrap();
    TemplateDirFixture::new()
        .with_template("content.opf", "<title>{{ titel }}</title>")
        .write_to(templates.path())
        .unwrap();
    let renderer = TemplateRenderer::new(
        DirectoryLoader::new(templates.path()),
        SerializationMethod::Xml,
    );
    let (publication, _) = sample_publication();

    match publication.render(&renderer).unwrap_err() {
        TemplateError::VariableNotFound {
            variable,
            suggestions,
            available_variables,
            ..
        } => {
            assert_eq!(variable, "titel");
            assert!(suggestions.contains(&"title".to_string()));
            assert!(available_variables.contains(&"text_items".to_string()));
        }
        other => panic!("expected VariableNotFound, got {other:?}"),
    }
}

#[test]
fn test_markup_methods_escape_and_text_does_not() {
    let templates = TempDir::new().unwrap();
    TemplateDirFixture::new()
        .with_template("content.opf", "{{ title }}")
        .write_to(templates.path())
        .unwrap();
    let renderer = TemplateRenderer::new(
        DirectoryLoader::new(templates.path()),
        SerializationMethod::Xml,
    );
    let publication = Publication::new("Fish & <Chips>", "en", "urn:uuid:1");

    for method in [SerializationMethod::Xml, SerializationMethod::Xhtml, SerializationMethod::Html] {
        let rendered = publication.render(&renderer.with_method(method)).unwrap();
        assert_eq!(rendered, "Fish &amp; &lt;Chips&gt;", "method {method}");
    }
    let rendered = publication.render(&renderer.with_method(SerializationMethod::Text)).unwrap();
    assert_eq!(rendered, "Fish & <Chips>");
}

#[test]
fn test_manifest_with_builtin_templates() {
    let project = TempDir::new().unwrap();
    let path = ManifestFixture::basic().write_to(project.path()).unwrap();
    let publication = PublicationManifest::load(&path).unwrap().to_publication().unwrap();
    let renderer = RenderConfig::default().renderer();

    let package = publication.render(&renderer).unwrap();
    assert!(package.contains("<dc:publisher>Harper &amp; Brothers</dc:publisher>"));
    assert!(package.contains(r#"href="styles/main.css" media-type="text/css""#));

    let spine = &package[package.find("<spine").unwrap()..];
    let ch1 = spine.find(r#"idref="ch1""#).unwrap();
    let ch2 = spine.find(r#"idref="ch2""#).unwrap();
    assert!(ch1 < ch2);
    assert!(!spine.contains(r#"idref="cover""#));
    assert!(!spine.contains(r#"idref="style""#));
}

#[test]
fn test_non_text_item_renders_through_text_template() {
    let templates = TempDir::new().unwrap();
    TemplateDirFixture::new()
        .with_template(TEXT_ITEM_TEMPLATE, "item {{ id }} of type {{ type }}")
        .write_to(templates.path())
        .unwrap();
    let renderer = TemplateRenderer::new(
        DirectoryLoader::new(templates.path()),
        SerializationMethod::Text,
    );

    let image = Item::new("cover", "cover.png", "image/png");
    assert_eq!(image.render(&renderer).unwrap(), "item cover of type image/png");

    let publication = Publication::new("T", "en", "i")
        .with_items(vec![Arc::new(image), Arc::new(Item::new("a", "a.xhtml", TEXT_CONTENT_TYPE))]);
    assert_eq!(publication.text_items().len(), 1);
}
