//! Schema caching through the directory client.

use std::sync::Arc;
use std::time::Duration;

use orgwalk_client::{OrgDirectoryClient, SchemaCache};
use orgwalk_core::models::{FieldDescriptor, FilterExpr, HttpResponse};
use orgwalk_core::traits::IOrgDirectory;
use test_fixtures::{test_config, FakeDirectory, OrgFixture, Scripted};

fn fake() -> FakeDirectory {
    let fixture = OrgFixture::load("small_org");
    FakeDirectory::new(fixture.entities).with_fields(fixture.fields)
}

fn client(fake: &FakeDirectory) -> OrgDirectoryClient<FakeDirectory> {
    OrgDirectoryClient::with_sender(test_config(), fake.clone()).unwrap()
}

#[tokio::test]
async fn schema_is_fetched_once_within_ttl() {
    let fake = fake();
    let client = client(&fake);

    let first = client.get_schema(false).await.unwrap();
    let second = client.get_schema(false).await.unwrap();

    assert_eq!(fake.count_path("/fields"), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.schema.len(), 5);
    assert!(first.schema.field("managerId").unwrap().filterable);
}

#[tokio::test]
async fn force_refresh_always_fetches() {
    let fake = fake();
    let client = client(&fake);

    client.get_schema(false).await.unwrap();
    fake.set_fields(vec![FieldDescriptor {
        key: "id".into(),
        name: "Id".into(),
        field_type: Default::default(),
        filterable: true,
        searchable: false,
    }]);
    let refreshed = client.get_schema(true).await.unwrap();
    let again = client.get_schema(true).await.unwrap();

    assert_eq!(fake.count_path("/fields"), 3);
    assert_eq!(refreshed.schema.len(), 1);
    assert_eq!(again.schema.len(), 1);
}

#[tokio::test]
async fn expired_schema_is_refetched() {
    let fake = fake();
    let cache = Arc::new(SchemaCache::with_ttl(Duration::from_millis(50)));
    let client = client(&fake).with_schema_cache(cache);

    client.get_schema(false).await.unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    client.get_schema(false).await.unwrap();

    assert_eq!(fake.count_path("/fields"), 2);
}

#[tokio::test]
async fn failed_refresh_keeps_serving_the_old_snapshot() {
    let fake = fake();
    let client = client(&fake);

    let before = client.get_schema(false).await.unwrap();
    fake.script([Scripted::Respond(HttpResponse::new(403, "forbidden"))]);
    assert!(client.get_schema(true).await.is_err());

    let after = client.get_schema(false).await.unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn clients_can_share_one_cache() {
    let fake = fake();
    let cache = Arc::new(SchemaCache::default());
    let a = client(&fake).with_schema_cache(Arc::clone(&cache));
    let b = client(&fake).with_schema_cache(Arc::clone(&cache));

    a.get_schema(false).await.unwrap();
    b.get_schema(false).await.unwrap();

    assert_eq!(fake.count_path("/fields"), 1);
    assert_eq!(cache.refreshes(), 1);
}

#[tokio::test]
async fn schema_flags_unknown_filter_fields() {
    let fake = fake();
    let client = client(&fake);
    let snapshot = client.get_schema(false).await.unwrap();

    assert!(snapshot
        .schema
        .validate_filter(&FilterExpr::eq("department", "Finance"))
        .is_ok());
    assert!(snapshot
        .schema
        .validate_filter(&FilterExpr::eq("location", "Lisbon"))
        .is_err());
    assert!(snapshot
        .schema
        .validate_filter(&FilterExpr::eq("shoeSize", 42))
        .is_err());
}
