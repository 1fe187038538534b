//! Integration tests for project aggregation over the sample fixture.
//!
//! These tests validate the full discovery -> analysis -> aggregation path
//! against the checked-in `testdata/sample-project` tree.

use std::path::PathBuf;

use readmint::{aggregate, AnalysisCache, Analyzer, Config, ProjectRecord};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/sample-project")
}

async fn aggregate_fixture() -> ProjectRecord {
    let root = fixture_path();
    let config = Config::default();
    let analyzer = Analyzer::new(&root, AnalysisCache::disabled(), &config);
    aggregate(&root, &analyzer, &config)
        .await
        .expect("aggregation should succeed")
}

#[tokio::test]
async fn test_manifest_metadata() {
    let record = aggregate_fixture().await;

    assert_eq!(record.manifest.name, "orders-api");
    assert_eq!(
        record.manifest.description,
        "Order management service over HTTP"
    );
    assert_eq!(record.manifest.dependencies, vec!["express", "pg"]);
    assert_eq!(record.manifest.dev_dependencies, vec!["jest"]);
    assert_eq!(record.manifest.scripts.get("test").unwrap(), "jest");
}

#[tokio::test]
async fn test_files_grouped_by_folder() {
    let record = aggregate_fixture().await;

    assert_eq!(record.file_count(), 3);
    assert_eq!(record.error_count(), 0);

    let src = record.folders.get("src").expect("src folder");
    let src_paths: Vec<_> = src.iter().map(|a| a.path().to_string()).collect();
    assert!(src_paths.contains(&"src/index.js".to_string()));
    assert!(src_paths.contains(&"src/router.js".to_string()));

    let data = record.folders.get("src/data").expect("src/data folder");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].path(), "src/data/orders.js");
}

#[tokio::test]
async fn test_route_table() {
    let record = aggregate_fixture().await;

    assert_eq!(record.routes.len(), 3);

    let get = &record.routes[0];
    assert_eq!(get.method, "GET");
    assert_eq!(get.path, "/orders");
    assert_eq!(get.handlers, vec!["listOrders"]);
    assert!(get.purpose.contains("listOrders"));

    let post = &record.routes[1];
    assert_eq!(post.method, "POST");
    assert_eq!(post.handlers, vec!["validateOrder", "createOrder"]);

    let delete = &record.routes[2];
    assert_eq!(delete.method, "DELETE");
    assert_eq!(delete.path, "/orders/:id");
}

#[tokio::test]
async fn test_deployment_summary_humanized() {
    let record = aggregate_fixture().await;

    let deploy = record.deploy.expect("deploy summary");
    let resources = deploy.resources.expect("resources");

    let requests = resources.requests.expect("requests");
    assert_eq!(requests.cpu_text.as_deref(), Some("250 milicores"));
    assert_eq!(requests.memory_text.as_deref(), Some("256 Megabytes"));

    let limits = resources.limits.expect("limits");
    assert_eq!(limits.cpu.as_deref(), Some("500m"));
    assert_eq!(limits.cpu_text.as_deref(), Some("500 milicores"));
    assert_eq!(limits.memory_text.as_deref(), Some("512 Megabytes"));

    assert_eq!(deploy.hosts.dev, vec!["orders.dev.example.net"]);
    assert_eq!(deploy.hosts.pro, vec!["orders.example.net"]);
}

#[tokio::test]
async fn test_extracted_facts_for_data_file() {
    let record = aggregate_fixture().await;

    let data = record.folders.get("src/data").unwrap();
    let facts = data[0].facts().expect("facts for orders.js");

    assert_eq!(facts.doc_summary.as_deref(), Some("Order persistence helpers."));
    assert_eq!(facts.imports, vec!["pg"]);
    assert_eq!(facts.db_clients, vec!["pg"]);
    assert_eq!(facts.sql_snippets.len(), 3);
    assert!(facts.sql_snippets[0].contains("SELECT"));
    assert!(facts.functions.iter().any(|f| f.name == "listOrders"));
    assert!(facts.classes.iter().any(|c| c.name == "OrderArchive"));
    assert!(facts.handler_usage.is_handler());
    assert!(facts.narrative.is_some());
}

#[tokio::test]
async fn test_key_files_and_structure() {
    let record = aggregate_fixture().await;

    assert!(record.key_files.contains(&"Dockerfile".to_string()));
    assert!(record.key_files.contains(&"src/router.js".to_string()));
    // Non-source files never appear in the analyzed set
    assert!(!record.key_files.contains(&"deploy/k8s/api-deployment.yaml".to_string()));

    assert!(record.structure.contains("- src/"));
    assert!(record.structure.contains("- orders.js"));
}
