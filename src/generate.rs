//! Generative-model port and model-backed map synthesis.
//!
//! The model is an opaque text-in/text-out capability behind the
//! [`TextGenerator`] trait. This module builds the prompt that asks the
//! model to turn an outline into node/link structure, and parses the reply
//! back into a [`MindMap`]. Replies that cannot be parsed as valid
//! structure are [`crate::Error::ModelCallFailed`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{MapLink, MapNode, MindMap, NodeKind, LEAF_COLOR, MAIN_COLOR, SUB_PALETTE};
use crate::outline::Outline;

/// Abstract interface to a text generation capability.
///
/// Opaque: prompt (plus an optional binary attachment) in, generated text
/// out. No timeout or retry is applied by this crate; a failure surfaces
/// immediately to the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text from a prompt, optionally attaching a binary document.
    async fn generate(&self, prompt: &str, attachment: Option<&[u8]>) -> Result<String>;
}

/// Build the prompt asking the model to expand an outline into map
/// structure.
pub fn map_prompt(outline: &Outline) -> String {
    let mut prompt = String::from(
        "Turn the following outline into a mind map. Reply with JSON only, \
         shaped as {\"nodes\": [{\"id\", \"label\", \"type\"}], \
         \"links\": [{\"source\", \"target\"}]} where type is one of \
         \"main\", \"sub\", or \"leaf\" and exactly one node is \"main\".\n\nOutline:\n",
    );
    for line in &outline.lines {
        prompt.push_str(&"  ".repeat(line.level as usize));
        prompt.push_str(&line.text);
        prompt.push('\n');
    }
    prompt
}

/// Wire shape of a node in a model reply.
#[derive(Debug, Deserialize)]
struct WireNode {
    id: String,
    label: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    color: Option<String>,
}

/// Wire shape of a link in a model reply.
#[derive(Debug, Deserialize)]
struct WireLink {
    source: String,
    target: String,
}

/// Wire shape of a full model reply.
#[derive(Debug, Deserialize)]
struct WireMap {
    nodes: Vec<WireNode>,
    links: Vec<WireLink>,
}

/// Parse a model reply into an unpositioned [`MindMap`].
///
/// Tolerates a Markdown code fence around the JSON body. Links whose
/// target id does not name a node in the same reply are dropped, keeping
/// the structure invariant that every link target resolves; links with
/// unknown sources are kept and skipped later during layout.
pub fn parse_model_map(reply: &str) -> Result<MindMap> {
    let body = strip_code_fence(reply);
    let wire: WireMap = serde_json::from_str(body)
        .map_err(|e| Error::ModelCallFailed(format!("unparseable model reply: {}", e)))?;

    if wire.nodes.is_empty() {
        return Err(Error::ModelCallFailed("model reply contains no nodes".into()));
    }

    let mut map = MindMap::new();
    for (index, node) in wire.nodes.into_iter().enumerate() {
        let mut built = MapNode::new(node.id, node.label, node.kind);
        match node.color {
            Some(color) => built.color = color,
            None => built.color = default_color(node.kind, index),
        }
        map.nodes.push(built);
    }

    for link in wire.links {
        if map.node(&link.target).is_none() {
            log::warn!(
                "dropping link to unknown node {:?} in model reply",
                link.target
            );
            continue;
        }
        map.links.push(MapLink::new(link.source, link.target));
    }

    Ok(map)
}

fn default_color(kind: NodeKind, index: usize) -> String {
    match kind {
        NodeKind::Main => MAIN_COLOR.to_string(),
        NodeKind::Sub => SUB_PALETTE[index % SUB_PALETTE.len()].to_string(),
        NodeKind::Leaf => LEAF_COLOR.to_string(),
    }
}

/// Strip a surrounding Markdown code fence, if present.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string ("json") on the opening fence line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.strip_suffix("```").map(str::trim).unwrap_or(trimmed)
}

/// A synthesized map plus whether it came from the fallback path.
#[derive(Debug, Clone, Serialize)]
pub struct MapAnalysis {
    /// The positioned map.
    #[serde(flatten)]
    pub map: MindMap,
    /// True when the model path failed and a heuristic map was served
    /// instead.
    pub fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::segment;

    const REPLY: &str = r##"{
        "nodes": [
            {"id": "n1", "label": "Center", "type": "main"},
            {"id": "n2", "label": "Branch", "type": "sub", "color": "#123456"},
            {"id": "n3", "label": "Detail", "type": "leaf"}
        ],
        "links": [
            {"source": "n1", "target": "n2"},
            {"source": "n2", "target": "n3"}
        ]
    }"##;

    #[test]
    fn test_map_prompt_indents_by_level() {
        let outline = segment("Topic\n  sub point");
        let prompt = map_prompt(&outline);
        assert!(prompt.contains("\nTopic\n"));
        assert!(prompt.contains("\n  sub point\n"));
        assert!(prompt.contains("\"main\""));
    }

    #[test]
    fn test_parse_model_map() {
        let map = parse_model_map(REPLY).unwrap();
        assert_eq!(map.nodes.len(), 3);
        assert_eq!(map.links.len(), 2);
        assert_eq!(map.node("n1").unwrap().kind, NodeKind::Main);
        // Declared colors win; missing colors are defaulted by kind.
        assert_eq!(map.node("n2").unwrap().color, "#123456");
        assert_eq!(map.node("n3").unwrap().color, LEAF_COLOR);
    }

    #[test]
    fn test_parse_model_map_with_code_fence() {
        let fenced = format!("```json\n{}\n```", REPLY);
        let map = parse_model_map(&fenced).unwrap();
        assert_eq!(map.nodes.len(), 3);
    }

    #[test]
    fn test_parse_model_map_rejects_prose() {
        let err = parse_model_map("Sure! Here is your mind map.").unwrap_err();
        assert!(matches!(err, Error::ModelCallFailed(_)));
    }

    #[test]
    fn test_parse_model_map_rejects_empty_nodes() {
        let err = parse_model_map(r#"{"nodes": [], "links": []}"#).unwrap_err();
        assert!(matches!(err, Error::ModelCallFailed(_)));
    }

    #[test]
    fn test_parse_model_map_drops_dangling_targets() {
        let reply = r#"{
            "nodes": [{"id": "n1", "label": "Center", "type": "main"}],
            "links": [
                {"source": "n1", "target": "ghost"},
                {"source": "ghost", "target": "n1"}
            ]
        }"#;
        let map = parse_model_map(reply).unwrap();
        // Unknown target dropped; unknown source kept for layout to skip.
        assert_eq!(map.links.len(), 1);
        assert_eq!(map.links[0].source, "ghost");
    }

    #[test]
    fn test_strip_code_fence_passthrough() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }
}
