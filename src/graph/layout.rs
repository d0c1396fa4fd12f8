//! Coordinate assignment for mind-map presentation.
//!
//! The layout is fixed: the central node sits at the canvas anchor, sub
//! nodes are spaced evenly on a ring around it, and each leaf lands at a
//! fixed radius from its parent at a random angle. The randomness source is
//! injected so tests can seed it and assert reproducible coordinates while
//! production uses a thread RNG.

use rand::Rng;
use std::f64::consts::TAU;

use super::{MindMap, NodeKind, Point};

/// Canvas anchor and radii for the fixed layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Anchor for the central node (center of the 800×400 reference canvas).
    pub center: Point,
    /// Radius of the sub-topic ring.
    pub ring_radius: f64,
    /// Distance of a leaf from its parent sub node.
    pub leaf_radius: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            center: Point::new(400.0, 200.0),
            ring_radius: 200.0,
            leaf_radius: 100.0,
        }
    }
}

/// Assign canvas positions to all resolvable nodes in place.
///
/// Only the first `Main` node is centered; any further `Main` nodes join
/// the sub ring. Sub nodes take equal angular spacing `2π·i/N`. Each leaf
/// is placed around its parent (the source of the link targeting it) at a
/// uniformly random angle; a leaf whose parent cannot be resolved, or whose
/// parent has no position, keeps `None` coordinates rather than failing.
pub fn assign_positions<R: Rng + ?Sized>(
    map: &mut MindMap,
    options: &LayoutOptions,
    rng: &mut R,
) {
    let mut center_index: Option<usize> = None;
    let mut ring_indices = Vec::new();

    for (index, node) in map.nodes.iter().enumerate() {
        match node.kind {
            NodeKind::Main if center_index.is_none() => center_index = Some(index),
            NodeKind::Main | NodeKind::Sub => ring_indices.push(index),
            NodeKind::Leaf => {}
        }
    }

    if let Some(index) = center_index {
        map.nodes[index].position = Some(options.center);
    }

    let ring_len = ring_indices.len();
    for (slot, &index) in ring_indices.iter().enumerate() {
        let angle = TAU * slot as f64 / ring_len as f64;
        map.nodes[index].position = Some(Point::new(
            options.center.x + options.ring_radius * angle.cos(),
            options.center.y + options.ring_radius * angle.sin(),
        ));
    }

    // Resolve each leaf's parent position before mutating.
    let placements: Vec<(usize, Point)> = map
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.kind == NodeKind::Leaf)
        .filter_map(|(index, node)| {
            let link = map.parent_link(&node.id)?;
            let parent = map.node(&link.source)?;
            parent.position.map(|p| (index, p))
        })
        .collect();

    for (index, parent) in placements {
        let angle: f64 = rng.random_range(0.0..TAU);
        map.nodes[index].position = Some(Point::new(
            parent.x + options.leaf_radius * angle.cos(),
            parent.y + options.leaf_radius * angle.sin(),
        ));
    }
}

/// Assign positions with a thread-local random angle source.
pub fn assign_positions_default(map: &mut MindMap, options: &LayoutOptions) {
    assign_positions(map, options, &mut rand::rng());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{MapLink, MapNode};
    use crate::outline::segment;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn laid_out(text: &str, seed: u64) -> MindMap {
        let mut map = MindMap::from_outline(&segment(text));
        let mut rng = StdRng::seed_from_u64(seed);
        assign_positions(&mut map, &LayoutOptions::default(), &mut rng);
        map
    }

    #[test]
    fn test_main_at_anchor() {
        let map = laid_out("Topic\n  a\n  b", 7);
        let main = &map.nodes[0];
        assert_eq!(main.position, Some(Point::new(400.0, 200.0)));
    }

    #[test]
    fn test_subs_ring_spaced() {
        let map = laid_out("Topic\n  a\n  b\n  c\n  d", 7);
        let options = LayoutOptions::default();
        let subs: Vec<&MapNode> = map.nodes.iter().filter(|n| n.kind == NodeKind::Sub).collect();
        assert_eq!(subs.len(), 4);

        for (slot, sub) in subs.iter().enumerate() {
            let angle = TAU * slot as f64 / 4.0;
            let expected = Point::new(
                options.center.x + options.ring_radius * angle.cos(),
                options.center.y + options.ring_radius * angle.sin(),
            );
            let position = sub.position.expect("sub node positioned");
            assert!(position.distance(&expected) < 1e-9);
        }
    }

    #[test]
    fn test_leaf_at_fixed_radius_from_parent() {
        let map = laid_out("Topic\n  sub\n    leaf", 42);
        let sub = map.nodes.iter().find(|n| n.kind == NodeKind::Sub).unwrap();
        let leaf = map.nodes.iter().find(|n| n.kind == NodeKind::Leaf).unwrap();

        let sub_pos = sub.position.unwrap();
        let leaf_pos = leaf.position.unwrap();
        assert!((sub_pos.distance(&leaf_pos) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_layout_reproducible() {
        let a = laid_out("Topic\n  sub\n    one\n    two", 99);
        let b = laid_out("Topic\n  sub\n    one\n    two", 99);
        for (left, right) in a.nodes.iter().zip(b.nodes.iter()) {
            assert_eq!(left.position, right.position);
        }
    }

    #[test]
    fn test_different_seeds_move_leaves() {
        let a = laid_out("Topic\n  sub\n    leaf", 1);
        let b = laid_out("Topic\n  sub\n    leaf", 2);
        let leaf_a = a.nodes.iter().find(|n| n.kind == NodeKind::Leaf).unwrap();
        let leaf_b = b.nodes.iter().find(|n| n.kind == NodeKind::Leaf).unwrap();
        assert_ne!(leaf_a.position, leaf_b.position);
    }

    #[test]
    fn test_unresolved_leaf_keeps_none() {
        let mut map = MindMap::new();
        map.nodes.push(MapNode::new("node-0", "Topic", NodeKind::Main));
        map.nodes.push(MapNode::new("node-1", "orphan", NodeKind::Leaf));
        // Link whose source does not exist: skipped, not an error.
        map.nodes.push(MapNode::new("node-2", "dangling", NodeKind::Leaf));
        map.links.push(MapLink::new("node-9", "node-2"));

        let mut rng = StdRng::seed_from_u64(0);
        assign_positions(&mut map, &LayoutOptions::default(), &mut rng);

        assert!(map.node("node-1").unwrap().position.is_none());
        assert!(map.node("node-2").unwrap().position.is_none());
        assert!(map.node("node-0").unwrap().position.is_some());
    }

    #[test]
    fn test_extra_main_nodes_join_ring() {
        let mut map = MindMap::new();
        map.nodes.push(MapNode::new("node-0", "First", NodeKind::Main));
        map.nodes.push(MapNode::new("node-1", "Second", NodeKind::Main));

        let options = LayoutOptions::default();
        let mut rng = StdRng::seed_from_u64(0);
        assign_positions(&mut map, &options, &mut rng);

        assert_eq!(map.nodes[0].position, Some(options.center));
        // The second main takes the first ring slot (angle 0).
        let expected = Point::new(options.center.x + options.ring_radius, options.center.y);
        assert!(map.nodes[1].position.unwrap().distance(&expected) < 1e-9);
    }

    #[test]
    fn test_empty_map_is_noop() {
        let mut map = MindMap::new();
        assign_positions_default(&mut map, &LayoutOptions::default());
        assert!(map.is_empty());
    }
}
