//! Tab-switchable presentations of one project's node collection.
//!
//! Mind is the interactive canvas; the other three are read-only
//! projections computed here so the host only lays out rows.

#[cfg(test)]
#[path = "views_test.rs"]
mod views_test;

use std::fmt;
use std::str::FromStr;

use canvas::doc::{Node, NodeId, NodeType};
use time::OffsetDateTime;
use time::macros::format_description;

pub const NO_TIMESTAMP: &str = "No timestamp";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewTab {
    #[default]
    Mind,
    Text,
    Time,
    Map,
}

impl ViewTab {
    pub const ALL: [Self; 4] = [Self::Mind, Self::Text, Self::Time, Self::Map];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mind => "mind",
            Self::Text => "text",
            Self::Time => "time",
            Self::Map => "map",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Mind => "Mind",
            Self::Text => "Text",
            Self::Time => "Time",
            Self::Map => "Map",
        }
    }
}

impl fmt::Display for ViewTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for ViewTab {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

// =============================================================================
// TIME
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineEntry {
    /// Position on the timeline, from 1.
    pub number: usize,
    pub id: NodeId,
    pub title: String,
    pub when: String,
}

/// `yyyy-MM-dd HH:mm` in UTC. Missing and zero timestamps read as absent.
#[must_use]
pub fn format_timestamp(timestamp_ms: Option<i64>) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]");
    timestamp_ms
        .filter(|&ms| ms != 0)
        .and_then(|ms| OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok())
        .and_then(|dt| dt.format(fmt).ok())
        .unwrap_or_else(|| NO_TIMESTAMP.to_string())
}

/// Nodes ordered by timestamp (missing sorts as 0), ties in collection order.
#[must_use]
pub fn timeline(nodes: &[Node]) -> Vec<TimelineEntry> {
    let mut sorted: Vec<&Node> = nodes.iter().collect();
    sorted.sort_by_key(|n| n.timestamp.unwrap_or(0));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, n)| TimelineEntry {
            number: i + 1,
            id: n.id.clone(),
            title: n.title.clone(),
            when: format_timestamp(n.timestamp),
        })
        .collect()
}

// =============================================================================
// TEXT
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineEntry {
    pub id: NodeId,
    pub title: String,
    pub description: String,
    pub kind: &'static str,
}

/// Nodes in collection order as a document outline.
#[must_use]
pub fn outline(nodes: &[Node]) -> Vec<OutlineEntry> {
    nodes
        .iter()
        .map(|n| OutlineEntry {
            id: n.id.clone(),
            title: n.title.clone(),
            description: n.description.clone(),
            kind: n.node_type.label(),
        })
        .collect()
}

// =============================================================================
// MAP
// =============================================================================

/// A node placed on the ground plane.
#[derive(Clone, Debug, PartialEq)]
pub struct MapPin {
    pub id: NodeId,
    pub title: String,
    pub x: f64,
    pub z: f64,
    pub is_location: bool,
}

/// Ground-plane projection with location nodes listed first.
#[must_use]
pub fn map_plan(nodes: &[Node]) -> Vec<MapPin> {
    let (mut pins, others): (Vec<MapPin>, Vec<MapPin>) = nodes
        .iter()
        .map(|n| MapPin {
            id: n.id.clone(),
            title: n.title.clone(),
            x: n.position.x,
            z: n.position.z,
            is_location: n.node_type == NodeType::Location,
        })
        .partition(|p| p.is_location);
    pins.extend(others);
    pins
}
