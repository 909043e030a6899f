#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::doc::Node;

/// Find the node under `screen_pt`.
///
/// A node is hit when its projected screen position lies within `radius_px`
/// of the pointer. The nearest hit wins; on equal distance the node earlier
/// in `nodes` wins.
#[must_use]
pub fn hit_test<'a>(screen_pt: Point, nodes: &'a [Node], camera: &Camera, radius_px: f64) -> Option<&'a Node> {
    let mut best: Option<(&Node, f64)> = None;
    for node in nodes {
        let p = camera.world_to_screen(node.position);
        let dist = (p.x - screen_pt.x).hypot(p.y - screen_pt.y);
        if dist > radius_px {
            continue;
        }
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((node, dist));
        }
    }
    best.map(|(node, _)| node)
}
