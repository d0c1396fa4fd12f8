//! Mind-map graph types and construction from outlines.

mod layout;

pub use layout::{assign_positions, assign_positions_default, LayoutOptions};

use serde::{Deserialize, Serialize};

use crate::outline::Outline;

/// Color token for the central node.
pub const MAIN_COLOR: &str = "#6366f1";

/// Color token for leaf nodes.
pub const LEAF_COLOR: &str = "#94a3b8";

/// Color tokens cycled across sub-topic nodes.
pub const SUB_PALETTE: [&str; 5] = ["#8b5cf6", "#ec4899", "#f59e0b", "#10b981", "#3b82f6"];

/// Node role in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The single central topic.
    Main,
    /// A topic on the ring around the center.
    Sub,
    /// A detail attached to a sub-topic.
    Leaf,
}

/// A 2-D canvas position.
///
/// Presentation state: assigned during layout, not during node creation,
/// and not part of node identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A typed node in the mind map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapNode {
    /// Unique identifier within the map.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Node role.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Color token.
    pub color: String,
    /// Canvas position, present only after layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

impl MapNode {
    /// Create an unpositioned node.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        let color = match kind {
            NodeKind::Main => MAIN_COLOR.to_string(),
            NodeKind::Sub => SUB_PALETTE[0].to_string(),
            NodeKind::Leaf => LEAF_COLOR.to_string(),
        };
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            color,
            position: None,
        }
    }

    /// Replace the color token.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// A directed parent→child edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLink {
    /// Id of the parent node.
    pub source: String,
    /// Id of the child node.
    pub target: String,
}

impl MapLink {
    /// Create a link.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A mind map: typed nodes plus directed links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MindMap {
    /// All nodes, in creation order.
    pub nodes: Vec<MapNode>,
    /// Directed parent→child links.
    pub links: Vec<MapLink>,
}

impl MindMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the map has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&MapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The link targeting the given node, if any.
    pub fn parent_link(&self, id: &str) -> Option<&MapLink> {
        self.links.iter().find(|l| l.target == id)
    }

    /// Build an unpositioned map from an outline.
    ///
    /// The first line at the minimum level becomes the single `Main` node;
    /// remaining minimum-level lines and lines at the next level become
    /// `Sub` nodes linked from the main node; deeper lines become `Leaf`
    /// nodes linked from the most recent sub node in document order. A leaf
    /// with no preceding sub node is left unlinked.
    pub fn from_outline(outline: &Outline) -> MindMap {
        let mut map = MindMap::new();
        let Some(min_level) = outline.min_level() else {
            return map;
        };

        let sub_level = outline
            .lines
            .iter()
            .map(|line| line.level)
            .filter(|&level| level > min_level)
            .min();

        let mut main_id: Option<String> = None;
        let mut last_sub_id: Option<String> = None;
        let mut sub_count = 0usize;

        for (index, line) in outline.lines.iter().enumerate() {
            let id = format!("node-{}", index);
            let is_leaf = match sub_level {
                Some(sub) => line.level > sub,
                None => false,
            };

            if line.level == min_level && main_id.is_none() {
                map.nodes
                    .push(MapNode::new(&id, &line.text, NodeKind::Main));
                main_id = Some(id);
            } else if is_leaf {
                if let Some(parent) = &last_sub_id {
                    map.links.push(MapLink::new(parent, &id));
                } else {
                    log::debug!("leaf {:?} has no preceding sub topic, left unlinked", id);
                }
                map.nodes
                    .push(MapNode::new(&id, &line.text, NodeKind::Leaf));
            } else {
                let color = SUB_PALETTE[sub_count % SUB_PALETTE.len()];
                sub_count += 1;
                map.nodes
                    .push(MapNode::new(&id, &line.text, NodeKind::Sub).with_color(color));
                if let Some(main) = &main_id {
                    map.links.push(MapLink::new(main, &id));
                }
                last_sub_id = Some(id);
            }
        }

        map
    }
}
