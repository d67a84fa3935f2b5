//! # Graph Arena Tests
//!
//! Node deduplication, edge validation and neighbourhood expansion in the
//! graph-explorer arena.

mod common;

use climatechat::{ChatError, GraphArena, NodeId, NodeKind};
use climatechat_test_utils::FENCED_ANSWER;
use common::interpreter;

#[test]
fn test_nodes_are_deduplicated_by_kind_and_label() {
    let mut arena = GraphArena::new();
    let a = arena.add_node("Jane Doe", NodeKind::Author);
    let again = arena.add_node("Jane Doe", NodeKind::Author);
    let paper = arena.add_node("Jane Doe", NodeKind::Paper);

    assert_eq!(a, again);
    assert_ne!(a, paper);
    assert_eq!(arena.nodes().len(), 2);
    assert_eq!(arena.find("Jane Doe", NodeKind::Paper), Some(paper));
}

#[test]
fn test_arenas_do_not_share_id_counters() {
    let mut first = GraphArena::new();
    let mut second = GraphArena::new();
    first.add_node("A", NodeKind::Author);
    first.add_node("B", NodeKind::Author);

    let id = second.add_node("C", NodeKind::Author);
    assert_eq!(id, NodeId(0));
}

#[test]
fn test_edge_to_unknown_node_fails() {
    let mut arena = GraphArena::new();
    let a = arena.add_node("A", NodeKind::Author);

    let result = arena.add_edge(a, NodeId(42), "co_authored");
    assert!(matches!(result, Err(ChatError::UnknownNode(42))));
    assert!(arena.edges().is_empty());
}

#[test]
fn test_expand_links_neighbours_once() {
    let mut arena = GraphArena::new();
    let center = arena.add_node("Jane Doe", NodeKind::Author);

    let first = arena
        .expand(
            center,
            &[("John Roe", NodeKind::Author), ("Ana Lima", NodeKind::Author)],
            "co_authored",
        )
        .unwrap();
    let second = arena
        .expand(center, &[("Ana Lima", NodeKind::Author)], "co_authored")
        .unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second, vec![first[1]]);
    assert_eq!(arena.nodes().len(), 3);
    assert_eq!(arena.edges().len(), 2);
    assert!(arena.edges().iter().all(|e| e.from == center));
}

#[test]
fn test_expand_unknown_center_fails() {
    let mut arena = GraphArena::new();
    let result = arena.expand(NodeId(7), &[("X", NodeKind::Topic)], "related");
    assert!(matches!(result, Err(ChatError::UnknownNode(7))));
    assert!(arena.nodes().is_empty());
}

#[test]
fn test_topic_network_from_parsed_answer() {
    let parsed = interpreter().parse(FENCED_ANSWER);
    let arena = GraphArena::from_parsed(&parsed);

    let topics = arena
        .nodes()
        .iter()
        .filter(|n| n.kind == NodeKind::Topic)
        .count();
    let sources = arena
        .nodes()
        .iter()
        .filter(|n| n.kind == NodeKind::Source)
        .count();
    assert_eq!(topics, 3);
    assert_eq!(sources, 3);
    assert_eq!(arena.edges().len(), 3);
    assert!(arena.edges().iter().all(|e| e.relation == "cites"));

    let heat = arena.find("Extreme heat", NodeKind::Topic).unwrap();
    let ipcc = arena.find("IPCC AR6 WGII", NodeKind::Source).unwrap();
    assert!(arena.edges().iter().any(|e| e.from == heat && e.to == ipcc));
}

#[test]
fn test_repeated_topics_share_nodes_and_edge() {
    let parsed = interpreter().parse(
        r#"Repeats {"topic": "Heat", "source": "IPCC"}, {"topic": "Heat", "source": "IPCC"}, {"topic": "Drought"}"#,
    );
    let arena = GraphArena::from_parsed(&parsed);

    assert_eq!(parsed.challenge_count(), 3);
    assert_eq!(arena.nodes().len(), 3);
    assert_eq!(arena.edges().len(), 1);
    let heat = arena.find("Heat", NodeKind::Topic).unwrap();
    let ipcc = arena.find("IPCC", NodeKind::Source).unwrap();
    assert_eq!((arena.edges()[0].from, arena.edges()[0].to), (heat, ipcc));
    assert!(arena.find("Drought", NodeKind::Topic).is_some());
}
