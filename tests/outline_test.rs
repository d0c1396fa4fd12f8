//! Integration tests for outline inference through the public API.

use docmap::extract::{preview, PREVIEW_CHARS};
use docmap::{map_text, outline_text, NodeKind};

#[test]
fn test_marker_levels_are_positional_rank() {
    let outline = outline_text("1.1. Point A\n- Point B\ni. Point C\na. Point D").unwrap();

    let levels: Vec<u32> = outline.lines.iter().map(|l| l.level).collect();
    assert_eq!(levels, vec![0, 1, 2, 3]);

    let texts: Vec<&str> = outline.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["Point A", "Point B", "Point C", "Point D"]);
}

#[test]
fn test_marker_levels_independent_of_document_position() {
    // Same lines, reversed order: identical level assignments.
    let outline = outline_text("a. Point D\ni. Point C\n- Point B\n1.1. Point A").unwrap();
    let levels: Vec<u32> = outline.lines.iter().map(|l| l.level).collect();
    assert_eq!(levels, vec![3, 2, 1, 0]);
}

#[test]
fn test_unmarked_indentation_levels() {
    let outline = outline_text("top line\n    four spaces in").unwrap();
    assert_eq!(outline.lines[0].level, 0);
    assert_eq!(outline.lines[1].level, 2);
}

#[test]
fn test_collision_scenario_reproduced() {
    // "Topic" (0 indent, no marker) and the numbered lines all land at
    // level 0; the bullet lands at level 1.
    let outline = outline_text("Topic\n1. Sub A\n2. Sub B\n- detail of A").unwrap();

    let groups = outline.by_level();
    let level0: Vec<&str> = groups[&0].iter().map(|l| l.text.as_str()).collect();
    assert_eq!(level0, vec!["Topic", "Sub A", "Sub B"]);

    let level1: Vec<&str> = groups[&1].iter().map(|l| l.text.as_str()).collect();
    assert_eq!(level1, vec!["detail of A"]);

    assert_eq!(outline.main_topics().len(), 3);
}

#[test]
fn test_blank_lines_occupy_no_position() {
    let outline = outline_text("one\n\n\ntwo\n   \nthree").unwrap();
    let texts: Vec<&str> = outline.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn test_preview_truncation_properties() {
    let long = "a".repeat(1500);
    let p = preview(&long);
    assert_eq!(&p[..PREVIEW_CHARS], &long[..PREVIEW_CHARS]);
    assert!(p.ends_with("..."));

    let short = "b".repeat(500);
    assert_eq!(preview(&short), short);
}

#[test]
fn test_map_text_builds_positioned_graph() {
    let map = map_text("Cell Biology\n  Organelles\n    mitochondria\n  Membranes").unwrap();

    let main = map.nodes.iter().find(|n| n.kind == NodeKind::Main).unwrap();
    assert_eq!(main.label, "Cell Biology");
    assert_eq!(main.position.unwrap().x, 400.0);
    assert_eq!(main.position.unwrap().y, 200.0);

    let subs: Vec<_> = map.nodes.iter().filter(|n| n.kind == NodeKind::Sub).collect();
    assert_eq!(subs.len(), 2);
    for sub in &subs {
        let d = main.position.unwrap().distance(&sub.position.unwrap());
        assert!((d - 200.0).abs() < 1e-9);
    }

    let leaf = map.nodes.iter().find(|n| n.kind == NodeKind::Leaf).unwrap();
    let parent = map.node(&map.parent_link(&leaf.id).unwrap().source).unwrap();
    let d = parent.position.unwrap().distance(&leaf.position.unwrap());
    assert!((d - 100.0).abs() < 1e-9);
}

#[test]
fn test_outline_text_empty_rejected() {
    assert!(outline_text("").is_err());
    assert!(outline_text(" \n \n ").is_err());
}
