//! Subtree walks: depth and node bounds, truncation, edges, and root fallback.

use std::collections::HashSet;

use orgwalk_client::OrgDirectoryClient;
use orgwalk_core::errors::OrgWalkError;
use orgwalk_core::models::{Entity, WalkOptions};
use orgwalk_core::traits::IOrgDirectory;
use test_fixtures::{test_config, FakeDirectory, OrgTree};

/// root → A, B; A → A1, A2.
fn small_tree() -> Vec<Entity> {
    OrgTree::new()
        .root("root")
        .report("root", "A")
        .report("root", "B")
        .report("A", "A1")
        .report("A", "A2")
        .build()
}

fn client(fake: &FakeDirectory) -> OrgDirectoryClient<FakeDirectory> {
    OrgDirectoryClient::with_sender(test_config(), fake.clone()).unwrap()
}

fn id_set(ids: Vec<&str>) -> HashSet<String> {
    ids.into_iter().map(str::to_string).collect()
}

#[tokio::test]
async fn walk_collects_the_whole_subtree_within_bounds() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    let result = client
        .get_subtree("root", &WalkOptions::new(2, 100))
        .await
        .unwrap();

    assert_eq!(
        id_set(result.node_ids()),
        id_set(vec!["A", "B", "A1", "A2"])
    );
    let edges: HashSet<(String, String)> = result
        .edge_pairs()
        .into_iter()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect();
    assert_eq!(edges.len(), 4);
    assert!(edges.contains(&("A".to_string(), "A2".to_string())));
    assert!(!result.truncated());
    assert_eq!(result.stats.max_depth_reached, 2);
    assert_eq!(result.root_id, "root");
    assert_eq!(result.root.as_ref().unwrap().id, "root");
    assert!(!result.contains("root"));
}

#[tokio::test]
async fn node_cap_truncates_at_the_filling_insertion() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    let result = client
        .get_subtree("root", &WalkOptions::new(2, 3))
        .await
        .unwrap();

    assert_eq!(result.node_ids(), vec!["A", "B", "A1"]);
    assert!(result.truncated());
    assert_eq!(result.len(), 3);
    assert_eq!(result.edges.len(), 3);
}

#[tokio::test]
async fn exact_fit_is_not_truncated() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    let result = client
        .get_subtree("root", &WalkOptions::new(2, 4))
        .await
        .unwrap();
    assert_eq!(result.node_ids(), vec!["A", "B", "A1", "A2"]);
    assert!(!result.truncated());

    // A still has reports, but they lie past the depth bound.
    let shallow = client
        .get_subtree("root", &WalkOptions::new(1, 2))
        .await
        .unwrap();
    assert_eq!(shallow.node_ids(), vec!["A", "B"]);
    assert!(!shallow.truncated());
}

#[tokio::test]
async fn filling_the_cap_with_expansions_pending_is_truncated() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    let result = client
        .get_subtree("root", &WalkOptions::new(2, 2))
        .await
        .unwrap();

    assert_eq!(result.node_ids(), vec!["A", "B"]);
    assert!(result.truncated());
    assert_eq!(fake.subordinate_searches_for("A"), 0);
}

#[tokio::test]
async fn depth_bound_limits_expansion() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    let result = client
        .get_subtree("root", &WalkOptions::new(1, 100))
        .await
        .unwrap();

    assert_eq!(id_set(result.node_ids()), id_set(vec!["A", "B"]));
    assert_eq!(result.stats.max_depth_reached, 1);
    assert!(!result.truncated());
    assert_eq!(fake.subordinate_searches_for("A"), 0);
}

#[tokio::test]
async fn zero_depth_returns_no_nodes() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    let result = client
        .get_subtree("root", &WalkOptions::new(0, 100))
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.stats.api_calls, 1);
}

#[tokio::test]
async fn leaves_are_never_expanded() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    let result = client
        .get_subtree("root", &WalkOptions::new(10, 100))
        .await
        .unwrap();

    for leaf in ["B", "A1", "A2"] {
        assert_eq!(fake.subordinate_searches_for(leaf), 0, "{leaf} was expanded");
    }
    // Root lookup, then root and A expanded.
    assert_eq!(result.stats.api_calls, 3);
    assert_eq!(result.stats.nodes_expanded, 2);
}

#[tokio::test]
async fn include_manager_adds_the_root_node() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    let result = client
        .get_subtree("root", &WalkOptions::new(2, 100).include_manager(true))
        .await
        .unwrap();

    assert_eq!(result.len(), 5);
    assert_eq!(result.node_ids()[0], "root");

    let capped = client
        .get_subtree("root", &WalkOptions::new(2, 1).include_manager(true))
        .await
        .unwrap();
    assert_eq!(capped.node_ids(), vec!["root"]);
    assert!(capped.truncated());

    let root_only = client
        .get_subtree("root", &WalkOptions::new(0, 1).include_manager(true))
        .await
        .unwrap();
    assert_eq!(root_only.node_ids(), vec!["root"]);
    assert!(!root_only.truncated());
}

#[tokio::test]
async fn walk_by_email_resolves_the_root_id() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    let result = client
        .get_subtree("A@example.com", &WalkOptions::new(5, 100))
        .await
        .unwrap();

    assert_eq!(result.root_id, "A");
    assert_eq!(id_set(result.node_ids()), id_set(vec!["A1", "A2"]));
}

#[tokio::test]
async fn failed_root_lookup_falls_back_to_the_key() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    // No entity is served for this key, but its subordinates are.
    let mut tree = small_tree();
    tree.retain(|e| e.id != "A");
    let fake_without_a = FakeDirectory::new(tree);
    let client_without_a = OrgDirectoryClient::with_sender(test_config(), fake_without_a).unwrap();

    let result = client_without_a
        .get_subtree("A", &WalkOptions::new(5, 100))
        .await
        .unwrap();
    assert_eq!(result.root_id, "A");
    assert!(result.root.is_none());
    assert_eq!(id_set(result.node_ids()), id_set(vec!["A1", "A2"]));

    // Sanity: the intact org serves the same subtree with a root entity.
    let intact = client.get_subtree("A", &WalkOptions::new(5, 100)).await.unwrap();
    assert!(intact.root.is_some());
}

#[tokio::test]
async fn failed_expansion_fails_the_walk() {
    let fake = FakeDirectory::new(small_tree()).fail_key("A", 500);
    let client = client(&fake);

    let err = client
        .get_subtree("root", &WalkOptions::new(5, 100))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn invalid_walk_arguments_are_caller_errors() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    let blank = client.get_subtree(" ", &WalkOptions::new(2, 10)).await;
    let no_room = client.get_subtree("root", &WalkOptions::new(2, 0)).await;

    assert!(matches!(blank, Err(OrgWalkError::InvalidInput { .. })));
    assert!(matches!(no_room, Err(OrgWalkError::InvalidInput { .. })));
    assert_eq!(fake.request_count(), 0);
}

#[tokio::test]
async fn default_options_come_from_config() {
    let fake = FakeDirectory::new(small_tree());
    let client = client(&fake);

    let options = client.walk_options();

    assert_eq!(options.max_depth, 10);
    assert_eq!(options.max_nodes, 5_000);
    assert!(!options.include_manager);
}
