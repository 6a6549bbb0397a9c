use super::coordinates::{parse_coordinates, parse_point, Coordinate};
use super::document::GeometryNode;

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    /// A polygon described by its outer ring. Holes are not supported.
    Polygon(Vec<Coordinate>),
}

fn priority(node: &GeometryNode) -> u8 {
    match node {
        GeometryNode::Point { .. } => 0,
        GeometryNode::LineString { .. } => 1,
        GeometryNode::Polygon { .. } => 2,
    }
}

fn non_empty(coordinates: Vec<Coordinate>) -> Option<Vec<Coordinate>> {
    if coordinates.is_empty() {
        None
    } else {
        Some(coordinates)
    }
}

impl GeometryNode {
    pub fn translate(&self) -> Option<Geometry> {
        match self {
            GeometryNode::Point { coordinates } => parse_point(coordinates).map(Geometry::Point),
            GeometryNode::LineString { coordinates } => {
                non_empty(parse_coordinates(coordinates)).map(Geometry::LineString)
            }
            GeometryNode::Polygon { outer } => {
                non_empty(parse_coordinates(outer)).map(Geometry::Polygon)
            }
        }
    }
}

/// Pick the geometry of a placemark.
///
/// Only one geometry is considered: the first `Point`, else the first
/// `LineString`, else the first `Polygon`. When that one does not resolve the
/// placemark has no geometry.
pub fn translate(nodes: &[GeometryNode]) -> Option<Geometry> {
    nodes.iter().min_by_key(|node| priority(node))?.translate()
}
