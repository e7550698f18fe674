//! End-to-end tool calls through the dispatcher against a scratch
//! installation.

use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use webasyst_mcp::{Dispatcher, ToolContext, ToolOutcome, ToolRegistry, WebasystService};

fn installation() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("index.php"), "<?php\n").unwrap();
    std::fs::create_dir_all(temp.path().join("wa-system")).unwrap();
    temp
}

fn dispatcher(start: &Path) -> Dispatcher {
    Dispatcher::new(
        Arc::new(ToolRegistry::builtin()),
        ToolContext::new(start).unwrap(),
    )
}

async fn call(dispatcher: &Dispatcher, name: &str, args: Value) -> ToolOutcome {
    dispatcher
        .call(name, args.as_object().cloned().unwrap_or_default())
        .await
}

#[tokio::test]
async fn test_created_app_is_listed() {
    let temp = installation();
    let dispatcher = dispatcher(temp.path());

    let outcome = call(
        &dispatcher,
        "create_app_structure",
        json!({"app_id": "blog", "app_name": "Blog"}),
    )
    .await;
    assert!(!outcome.is_error, "{}", outcome.text);
    assert!(outcome.text.starts_with("Application Blog (blog) created"));

    let outcome = call(&dispatcher, "list_webasyst_apps", json!({})).await;
    assert!(!outcome.is_error, "{}", outcome.text);
    assert!(outcome.text.contains("- Blog (blog) - v1.0.0"), "{}", outcome.text);
}

#[tokio::test]
async fn test_root_found_from_nested_directory() {
    let temp = installation();
    let nested = temp.path().join("wa-data/public/site");
    std::fs::create_dir_all(&nested).unwrap();
    let dispatcher = dispatcher(&nested);

    let outcome = call(
        &dispatcher,
        "create_app_structure",
        json!({"app_id": "crm", "app_name": "CRM"}),
    )
    .await;

    assert!(!outcome.is_error, "{}", outcome.text);
    assert!(temp.path().join("wa-apps/crm/lib/config/app.php").is_file());
    assert!(!nested.join("wa-apps").exists());
}

#[tokio::test]
async fn test_second_create_reports_already_exists() {
    let temp = installation();
    let dispatcher = dispatcher(temp.path());
    let args = json!({"app_id": "blog", "app_name": "Blog"});

    call(&dispatcher, "create_app_structure", args.clone()).await;
    let outcome = call(&dispatcher, "create_app_structure", args).await;

    assert!(outcome.is_error);
    assert!(outcome.text.starts_with("Error: "));
    assert!(outcome.text.contains("already exists"), "{}", outcome.text);
}

#[tokio::test]
async fn test_generator_without_root() {
    let temp = TempDir::new().unwrap();
    let dispatcher = dispatcher(temp.path());

    let outcome = call(
        &dispatcher,
        "create_model",
        json!({"app_id": "shop", "table_name": "shop_product"}),
    )
    .await;

    assert!(outcome.is_error);
    assert!(outcome.text.contains("Webasyst root directory not found"));
}

#[tokio::test]
async fn test_missing_app_reported() {
    let temp = installation();
    let dispatcher = dispatcher(temp.path());

    let outcome = call(
        &dispatcher,
        "create_plugin_structure",
        json!({"app_id": "ghost", "plugin_id": "seo", "plugin_name": "SEO"}),
    )
    .await;

    assert!(outcome.is_error);
    assert_eq!(outcome.text, "Error: Application 'ghost' not found");
}

#[tokio::test]
async fn test_unknown_component_kind_rejected() {
    let temp = TempDir::new().unwrap();
    let dispatcher = dispatcher(temp.path());

    let outcome = call(
        &dispatcher,
        "create_ui_component",
        json!({
            "component_type": "carousel",
            "component_name": "slides",
            "target_path": temp.path(),
        }),
    )
    .await;

    assert!(outcome.is_error);
    assert!(outcome.text.starts_with("Error: Invalid argument"), "{}", outcome.text);
    assert!(!temp.path().join("templates").exists());
}

#[tokio::test]
async fn test_path_based_generator_ignores_start_dir() {
    let temp = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let dispatcher = dispatcher(temp.path());

    let outcome = call(
        &dispatcher,
        "create_site_block",
        json!({
            "block_name": "hero",
            "block_title": "Hero",
            "webasyst_path": target.path(),
        }),
    )
    .await;

    assert!(!outcome.is_error, "{}", outcome.text);
    assert!(target.path().join("wa-apps/site/blocks/hero/block.php").is_file());
}

#[tokio::test]
async fn test_po_template_twice_keeps_first_file() {
    let temp = installation();
    std::fs::create_dir_all(temp.path().join("wa-apps/blog")).unwrap();
    let dispatcher = dispatcher(temp.path());
    let args = json!({"app_id": "blog"});

    let first = call(&dispatcher, "generate_po_template", args.clone()).await;
    assert!(!first.is_error, "{}", first.text);
    let po = temp.path().join("wa-apps/blog/locale/ru_RU/LC_MESSAGES/blog.po");
    std::fs::write(&po, "edited").unwrap();

    let second = call(&dispatcher, "generate_po_template", args).await;
    assert!(!second.is_error, "{}", second.text);
    assert_eq!(std::fs::read_to_string(&po).unwrap(), "edited");
}

#[tokio::test]
async fn test_compile_mo_without_po() {
    let temp = installation();
    std::fs::create_dir_all(temp.path().join("wa-apps/blog")).unwrap();
    let dispatcher = dispatcher(temp.path());

    let outcome = call(&dispatcher, "compile_mo", json!({"app_id": "blog"})).await;

    assert!(outcome.is_error);
    assert!(outcome.text.contains("not found"), "{}", outcome.text);
}

#[tokio::test]
async fn test_service_wraps_dispatcher() {
    let temp = installation();
    let service = WebasystService::with_start_dir(temp.path()).unwrap();

    let result = service
        .call(
            "list_webasyst_apps",
            json!({"include_system": "yes"}).as_object().cloned().unwrap(),
        )
        .await;
    assert_eq!(result.is_error, Some(true));

    std::fs::create_dir_all(temp.path().join("wa-apps")).unwrap();
    let result = service.call("list_webasyst_apps", serde_json::Map::new()).await;
    assert_eq!(result.is_error, Some(false));
}
