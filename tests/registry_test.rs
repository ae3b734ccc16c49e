use std::io::Write;

use scripture_resolver::registry;
use scripture_resolver::{Error, ProviderChoice, VersionRegistry};

const TABLE: &str = r#"
- code: ESV
  name: English Standard Version
  language: English
  providers:
    gateway: ESV
    hub: esv
- code: KJV
  name: King James Version
  language: English
  providers:
    gateway: KJV
    hub: kjv
    now: KJV
    com: "1"
"#;

fn write_table(contents: &str) -> tempfile::NamedTempFile {
    let mut file = match tempfile::NamedTempFile::new() {
        Ok(file) => file,
        Err(err) => panic!("tempfile: {err}"),
    };
    if let Err(err) = file.write_all(contents.as_bytes()) {
        panic!("write table: {err}");
    }
    file
}

fn load(contents: &str) -> VersionRegistry {
    let file = write_table(contents);
    match VersionRegistry::load(file.path()) {
        Ok(registry) => registry,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn loads_table_from_file() {
    let registry = load(TABLE);
    assert_eq!(registry.len(), 2);
    let esv = registry.get("esv");
    assert_eq!(esv.map(|v| v.name), Some("English Standard Version".to_string()));
}

#[test]
fn malformed_file_fails_construction() {
    let file = write_table("- code: ESV\n  providers: [gateway\n");
    assert!(matches!(VersionRegistry::load(file.path()), Err(Error::RegistryLoadError(_))));

    let file = write_table("code: ESV\nname: not a list\n");
    assert!(matches!(VersionRegistry::load(file.path()), Err(Error::RegistryLoadError(_))));
}

#[test]
fn missing_file_fails_construction() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir: {err}"),
    };
    let path = dir.path().join("versions.yaml");
    assert!(matches!(VersionRegistry::load(&path), Err(Error::RegistryLoadError(_))));
}

#[test]
fn unknown_code_passes_through() {
    let registry = load(TABLE);
    assert_eq!(registry.get_provider_code("UNKNOWN", "anyProvider"), "UNKNOWN");
    assert_eq!(registry.get_provider_code("ESV", "com"), "ESV");
    assert_eq!(registry.get_provider_code("Esv", "hub"), "esv");
}

#[test]
fn selection_honors_preference_order() {
    let registry = load(TABLE);
    let default_choice = registry.select_provider("ESV", &[]).ok();
    assert_eq!(
        default_choice,
        Some(ProviderChoice { provider: "gateway".into(), code: "ESV".into() })
    );
    let hub_first = registry.select_provider("ESV", &["hub", "gateway"]).ok();
    assert_eq!(hub_first, Some(ProviderChoice { provider: "hub".into(), code: "esv".into() }));
    assert!(matches!(registry.select_provider("ESV", &["com"]), Err(Error::NoSuitableProvider(_))));
    assert!(matches!(registry.select_provider("XYZ", &[]), Err(Error::VersionNotFound(_))));
}

#[test]
fn prioritized_list_uses_fallback_order() {
    let registry = load(TABLE);
    let kjv: Vec<(String, String)> = registry
        .get_prioritized_providers("KJV", &[])
        .unwrap_or_default()
        .into_iter()
        .map(|c| (c.provider, c.code))
        .collect();
    assert_eq!(
        kjv,
        vec![
            ("gateway".to_string(), "KJV".to_string()),
            ("hub".to_string(), "kjv".to_string()),
            ("now".to_string(), "KJV".to_string()),
            ("com".to_string(), "1".to_string()),
        ]
    );

    let custom: Vec<String> = registry
        .get_prioritized_providers("KJV", &["com", "now"])
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.provider)
        .collect();
    assert_eq!(custom, vec!["com", "now"]);
}

#[test]
fn bundled_table_is_consistent() {
    let registry = match VersionRegistry::bundled() {
        Ok(registry) => registry,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    for version in registry.get_all() {
        assert!(
            registry.get_prioritized_providers(&version.code, &[]).is_ok(),
            "{} has no provider",
            version.code
        );
    }
    assert_eq!(registry.get_provider_code("NIV", "com"), "111");
    assert_eq!(registry.get_provider_code("KJV", "now"), "KJV");
}

#[test]
fn global_registry_installs_once() {
    assert!(registry::install(load(TABLE)).is_ok());
    assert!(registry::install(load(TABLE)).is_err());
    assert_eq!(registry::global().map(VersionRegistry::len), Some(2));
}
