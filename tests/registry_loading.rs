mod common;

use common::{seeded_orchestrator, temp_dir, write_file, SINGLE_PATTERN_YAML};
use loginprobe::{
    BuiltinPatternSource, FieldKind, FilePatternSource, PatternOrigin, PatternRegistry,
    PatternSource, RegistryError,
};

#[tokio::test]
async fn test_reload_from_file_swaps_registry() {
    let dir = temp_dir();
    let path = write_file(&dir, "patterns.yaml", SINGLE_PATTERN_YAML);
    let orchestrator = seeded_orchestrator(1);

    let count = orchestrator
        .reload_registry(&FilePatternSource::new(&path))
        .await
        .unwrap();
    assert_eq!(count, 1);

    let result = orchestrator.analyze("https://login.acme.test/").await;
    assert_eq!(result.pattern_source, PatternOrigin::Registry);
    assert_eq!(result.elements.username.selector, "#acme-user");
    assert_eq!(result.selectors.combined(FieldKind::Submit), "#acme-go, button[type=\"submit\"]");

    // Built-in domains are gone after the swap
    let github = orchestrator.analyze("https://github.com/login").await;
    assert_eq!(github.pattern_source, PatternOrigin::Generic);
}

#[tokio::test]
async fn test_failed_reload_keeps_current_registry() {
    let dir = temp_dir();
    let path = write_file(
        &dir,
        "broken.yaml",
        &SINGLE_PATTERN_YAML.replace("confidence: 0.9,", "confidence: 1.4,"),
    );
    let orchestrator = seeded_orchestrator(1);

    let err = orchestrator
        .reload_registry(&FilePatternSource::new(&path))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::ConfidenceOutOfRange {
            field: FieldKind::Username,
            ..
        }
    ));
    assert_eq!(orchestrator.registry().len(), 5);
    assert!(orchestrator.registry().contains("github.com"));
}

#[tokio::test]
async fn test_unsupported_version_is_rejected() {
    let dir = temp_dir();
    let path = write_file(
        &dir,
        "v0.yaml",
        &SINGLE_PATTERN_YAML.replace("version: 1", "version: 0"),
    );

    let document = FilePatternSource::new(&path).load().await.unwrap();
    let err = PatternRegistry::from_document(document).unwrap_err();
    assert!(matches!(err, RegistryError::UnsupportedVersion(0)));
}

#[tokio::test]
async fn test_json_documents_are_accepted() {
    let document = BuiltinPatternSource::new().load().await.unwrap();
    let json = serde_json::to_string_pretty(&document).unwrap();

    let dir = temp_dir();
    let path = write_file(&dir, "patterns.json", &json);
    let reloaded = FilePatternSource::new(&path).load().await.unwrap();
    assert_eq!(reloaded, document);
}

#[tokio::test]
async fn test_shipped_sample_knowledge_base_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/patterns.yaml");
    let document = FilePatternSource::new(path).load().await.unwrap();
    let registry = PatternRegistry::from_document(document).unwrap();

    let builtin = PatternRegistry::builtin();
    for domain in builtin.domains() {
        assert_eq!(registry.lookup(domain), builtin.lookup(domain), "{domain}");
    }
    assert!(registry.contains("gitlab.com"));
}

#[tokio::test]
async fn test_missing_file_reports_path() {
    let orchestrator = seeded_orchestrator(1);
    let err = orchestrator
        .reload_registry(&FilePatternSource::new("/no/such/dir/patterns.yaml"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("/no/such/dir/patterns.yaml"));
}
