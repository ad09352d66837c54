use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use std::sync::Arc;
use tower::ServiceExt;

use s3web::s3::{ObjectStore, S3Client};
use s3web::vfs::{ListingPolicy, drill_down, drill_up, visible_children};
use s3web::web::{AppState, router};

/// Test bucket name
const TEST_BUCKET: &str = "s3web-test-bucket";

/// Helper function to create an S3 client pointing to localstack
async fn create_localstack_client() -> Client {
    let endpoint_url =
        std::env::var("AWS_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_string());

    let config = aws_config::defaults(BehaviorVersion::latest())
        .region("us-east-1")
        .load()
        .await;

    // Build S3-specific config with endpoint
    let s3_config = aws_sdk_s3::config::Builder::from(&config)
        .endpoint_url(&endpoint_url)
        .force_path_style(true) // Required for LocalStack
        .build();

    Client::from_conf(s3_config)
}

/// Setup test environment with bucket and a small folder tree
async fn setup_test_bucket(client: &Client) {
    // Bucket may survive from an earlier run
    let _ = client.create_bucket().bucket(TEST_BUCKET).send().await;

    let objects: [(&str, &str); 5] = [
        ("test.txt", "Hello from S3!\n"),
        ("dir/", ""),
        ("dir/nested.txt", "This is a nested file\n"),
        ("dir/sub/", ""),
        ("dir/sub/deep.txt", "deep\n"),
    ];

    for (key, body) in objects {
        client
            .put_object()
            .bucket(TEST_BUCKET)
            .key(key)
            .body(Bytes::from(body).into())
            .send()
            .await
            .unwrap_or_else(|e| panic!("Failed to upload {key}: {e}"));
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_listing_and_navigation() {
    let client = create_localstack_client().await;

    // Verify localstack is running
    let resp = client.list_buckets().send().await;
    assert!(resp.is_ok(), "Failed to connect to Localstack S3");

    setup_test_bucket(&client).await;
    let store = S3Client::from_client(client);

    // Root shows the file and the folder marker only
    let entries = store.list_objects(TEST_BUCKET, "").await.unwrap();
    let root = visible_children(&entries, "", ListingPolicy::default());
    let keys: Vec<_> = root.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["dir/", "test.txt"]);

    // Drill into dir/
    let prefix = drill_down("", "dir/").unwrap();
    let entries = store.list_objects(TEST_BUCKET, &prefix).await.unwrap();
    let children = visible_children(&entries, &prefix, ListingPolicy::default());
    let keys: Vec<_> = children.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["dir/nested.txt", "dir/sub/"]);
    assert_eq!(children[0].size, 22);

    // And back up
    assert_eq!(drill_up(&prefix), "");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_put_and_get_object() {
    let client = create_localstack_client().await;
    setup_test_bucket(&client).await;
    let store = S3Client::from_client(client);

    store
        .put_object(TEST_BUCKET, "uploads/uploaded.bin", Bytes::from_static(b"\x00\x01\x02"))
        .await
        .expect("Failed to put object");

    let body = store
        .get_object(TEST_BUCKET, "uploads/uploaded.bin")
        .await
        .expect("Failed to get object");
    assert_eq!(body, Bytes::from_static(b"\x00\x01\x02"));
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_missing_bucket_is_unavailable() {
    let client = create_localstack_client().await;
    let store = S3Client::from_client(client);

    let err = store
        .list_objects("s3web-no-such-bucket", "")
        .await
        .unwrap_err();
    assert!(matches!(err, s3web::BrowseError::StoreUnavailable { .. }));
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored --test-threads=1
async fn test_router_against_localstack() {
    let client = create_localstack_client().await;
    setup_test_bucket(&client).await;

    let store = Arc::new(S3Client::from_client(client));
    let app = router(
        AppState::new(store, TEST_BUCKET, ListingPolicy::default()),
        1024 * 1024,
    );

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/path/dir/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(html.contains("nested.txt"));
    assert!(!html.contains("deep.txt"));

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/download/{TEST_BUCKET}/test.txt"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, Bytes::from("Hello from S3!\n"));
}
