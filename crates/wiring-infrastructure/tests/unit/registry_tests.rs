//! Provider registry tests

use wiring_domain::error::Error;
use wiring_domain::provider::{ProviderDefinition, ValueProvider};
use wiring_domain::value_objects::Token;
use wiring_infrastructure::di::{Binding, ModuleId, ProviderRegistry};

fn value(token: &Token, value: &'static str) -> ProviderDefinition {
    ValueProvider::new(token.clone(), value).into()
}

fn registry_with(id: usize, name: &str, tokens: &[&Token]) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new(ModuleId::new(id), name);
    for token in tokens {
        registry.register(value(token, "v")).expect("register");
    }
    registry
}

#[test]
fn test_register_rejects_duplicate_local_token() {
    let token = Token::symbol("URL");
    let mut registry = registry_with(0, "database", &[&token]);

    let err = registry.register(value(&token, "again")).unwrap_err();

    assert!(
        matches!(err, Error::DuplicateToken { ref module, ref token } if module == "database" && token.name() == "URL")
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_export_requires_visible_token() {
    let known = Token::symbol("KNOWN");
    let mut registry = registry_with(0, "config", &[&known]);

    registry.export(known.clone()).expect("export known");
    let err = registry.export(Token::symbol("MISSING")).unwrap_err();

    assert!(registry.is_exported(&known));
    assert!(matches!(err, Error::UnknownExport { .. }));
}

#[test]
fn test_import_exports_only_exported_tokens() {
    let public = Token::symbol("PUBLIC");
    let private = Token::symbol("PRIVATE");
    let mut database = registry_with(0, "database", &[&public, &private]);
    database.export(public.clone()).expect("export");

    let mut users = ProviderRegistry::new(ModuleId::new(1), "users");
    let added = users.import_exports(&database).expect("import");

    assert_eq!(added, 1);
    assert!(users.contains(&public));
    assert!(!users.contains(&private));
    assert!(
        matches!(users.lookup(&public), Some(Binding::Imported { from, module }) if *from == ModuleId::new(0) && module == "database")
    );
    assert!(users.definition(&public).is_none());
}

#[test]
fn test_imported_tokens_are_not_re_exported_implicitly() {
    let token = Token::symbol("POOL");
    let mut database = registry_with(0, "database", &[&token]);
    database.export(token.clone()).expect("export");

    let mut users = ProviderRegistry::new(ModuleId::new(1), "users");
    users.import_exports(&database).expect("import");

    let mut app = ProviderRegistry::new(ModuleId::new(2), "app");
    assert_eq!(app.import_exports(&users).expect("import"), 0);
    assert!(!app.contains(&token));
}

#[test]
fn test_re_export_points_at_defining_module() {
    let token = Token::symbol("POOL");
    let mut database = registry_with(0, "database", &[&token]);
    database.export(token.clone()).expect("export");

    let mut shared = ProviderRegistry::new(ModuleId::new(1), "shared");
    shared.import_exports(&database).expect("import");
    shared.export(token.clone()).expect("re-export");

    let mut app = ProviderRegistry::new(ModuleId::new(2), "app");
    app.import_exports(&shared).expect("import");

    assert!(
        matches!(app.lookup(&token), Some(Binding::Imported { from, .. }) if *from == ModuleId::new(0))
    );
}

#[test]
fn test_local_definition_shadows_import() {
    let token = Token::symbol("LOGGER");
    let mut library = registry_with(0, "library", &[&token]);
    library.export(token.clone()).expect("export");

    let mut app = registry_with(1, "app", &[&token]);
    let added = app.import_exports(&library).expect("import");

    assert_eq!(added, 0);
    assert!(app.lookup(&token).is_some_and(Binding::is_local));
}

#[test]
fn test_same_origin_imported_twice_is_idempotent() {
    let token = Token::symbol("POOL");
    let mut database = registry_with(0, "database", &[&token]);
    database.export(token.clone()).expect("export");

    let mut left = ProviderRegistry::new(ModuleId::new(1), "left");
    left.import_exports(&database).expect("import");
    left.export(token.clone()).expect("re-export");
    let mut right = ProviderRegistry::new(ModuleId::new(2), "right");
    right.import_exports(&database).expect("import");
    right.export(token.clone()).expect("re-export");

    let mut app = ProviderRegistry::new(ModuleId::new(3), "app");
    app.import_exports(&left).expect("left");
    app.import_exports(&right).expect("right");

    assert_eq!(app.len(), 1);
}

#[test]
fn test_conflicting_imports_fail() {
    let token = Token::symbol("CLOCK");
    let mut first = registry_with(0, "first", &[&token]);
    first.export(token.clone()).expect("export");
    let mut second = registry_with(1, "second", &[&token]);
    second.export(token.clone()).expect("export");

    let mut app = ProviderRegistry::new(ModuleId::new(2), "app");
    app.import_exports(&first).expect("first");
    let err = app.import_exports(&second).unwrap_err();

    assert!(matches!(err, Error::DuplicateToken { ref module, .. } if module == "app"));
}

#[test]
fn test_tokens_keep_registration_order() {
    let a = Token::symbol("A");
    let b = Token::symbol("B");
    let c = Token::symbol("C");
    let mut registry = registry_with(0, "ordered", &[&c, &a, &b]);
    registry.export(b.clone()).expect("export");
    registry.export(c.clone()).expect("export");

    let tokens: Vec<_> = registry.tokens().map(Token::name).collect();
    let exported: Vec<_> = registry.exported_tokens().map(Token::name).collect();

    assert_eq!(tokens, ["C", "A", "B"]);
    assert_eq!(exported, ["C", "B"]);
    assert_eq!(registry.local_definitions().count(), 3);
}

#[test]
fn test_module_id_display() {
    assert_eq!(ModuleId::new(3).to_string(), "#3");
    assert_eq!(ModuleId::new(3).index(), 3);
}
