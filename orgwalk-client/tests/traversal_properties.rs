//! Property tests for subtree walks over random org charts.

use std::collections::{HashMap, HashSet};

use orgwalk_client::OrgDirectoryClient;
use orgwalk_core::models::{Entity, SubtreeResult, WalkOptions};
use orgwalk_core::traits::IOrgDirectory;
use proptest::prelude::*;
use test_fixtures::{test_config, FakeDirectory, OrgTree};

/// Node `i` reports to `parents[i - 1] % i`, so every chart is a tree rooted at n0.
fn build_org(parents: &[usize]) -> Vec<Entity> {
    let mut tree = OrgTree::new().root("n0");
    for (i, p) in parents.iter().enumerate() {
        let child = i + 1;
        tree = tree.report(&format!("n{}", p % child), &format!("n{child}"));
    }
    tree.build()
}

/// Ids of every node at depth `1..=max_depth` under n0.
fn descendants_within(parents: &[usize], max_depth: usize) -> HashSet<String> {
    let mut depth = vec![0usize];
    for (i, p) in parents.iter().enumerate() {
        let child = i + 1;
        depth.push(depth[p % child] + 1);
    }
    depth
        .iter()
        .enumerate()
        .filter(|(_, d)| **d >= 1 && **d <= max_depth)
        .map(|(i, _)| format!("n{i}"))
        .collect()
}

fn walk(org: Vec<Entity>, options: WalkOptions) -> SubtreeResult {
    let fake = FakeDirectory::new(org).with_page_size(3);
    let client = OrgDirectoryClient::with_sender(test_config(), fake).unwrap();
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(client.get_subtree("n0", &options))
        .unwrap()
}

fn org_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..1_000, 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn node_set_never_exceeds_the_cap(
        parents in org_strategy(),
        max_depth in 0usize..6,
        max_nodes in 1usize..20,
    ) {
        let result = walk(build_org(&parents), WalkOptions::new(max_depth, max_nodes));

        prop_assert!(result.len() <= max_nodes);
        if result.truncated() {
            prop_assert_eq!(result.len(), max_nodes);
        } else {
            let found: HashSet<String> =
                result.node_ids().into_iter().map(str::to_string).collect();
            prop_assert_eq!(found, descendants_within(&parents, max_depth));
        }
        let unique: HashSet<&str> = result.node_ids().into_iter().collect();
        prop_assert_eq!(unique.len(), result.len());
    }

    #[test]
    fn no_node_lies_deeper_than_max_depth(
        parents in org_strategy(),
        max_depth in 0usize..6,
    ) {
        let result = walk(build_org(&parents), WalkOptions::new(max_depth, 10_000));

        prop_assert!(result.stats.max_depth_reached <= max_depth);
        for node in &result.nodes {
            // Path from n0 down to the node's manager; n0 itself is depth 0.
            prop_assert!(node.reporting_path.len() <= max_depth);
        }

        // Every edge hangs off the root or a node that was itself expanded.
        let depth_of: HashMap<&str, usize> = result
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n.reporting_path.len()))
            .collect();
        for edge in &result.edges {
            let superior = edge.superior_id.as_str();
            let expanded = superior == "n0"
                || depth_of.get(superior).is_some_and(|d| *d < max_depth);
            prop_assert!(expanded, "edge from unexpanded node {}", superior);
        }
    }

    #[test]
    fn unbounded_walk_finds_every_descendant(parents in org_strategy()) {
        let org = build_org(&parents);
        let expected: HashSet<String> = org
            .iter()
            .filter(|e| e.id != "n0")
            .map(|e| e.id.clone())
            .collect();

        let result = walk(org, WalkOptions::new(100, 10_000));

        prop_assert!(!result.truncated());
        let found: HashSet<String> = result.node_ids().into_iter().map(str::to_string).collect();
        prop_assert_eq!(found, expected);
        prop_assert_eq!(result.edges.len(), result.len());
    }
}
