//! Typed view of a KML document.
//!
//! The XML is parsed once with `roxmltree` and lowered into a small tree of
//! folders and placemarks. Style and style map declarations are collected
//! from the whole document in document order, independent of where they are
//! nested.

use super::error::Result;
use log::warn;
use roxmltree::{Node as XmlNode, ParsingOptions};

pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Folder,
    Placemark,
    Style,
    StyleMap,
    Point,
    LineString,
    Polygon,
    Other,
}

impl NodeKind {
    pub fn of(node: XmlNode<'_, '_>) -> Self {
        if !node.is_element() {
            return NodeKind::Other;
        }
        match node.tag_name().name() {
            "Document" => NodeKind::Document,
            "Folder" => NodeKind::Folder,
            "Placemark" => NodeKind::Placemark,
            "Style" => NodeKind::Style,
            "StyleMap" => NodeKind::StyleMap,
            "Point" => NodeKind::Point,
            "LineString" => NodeKind::LineString,
            "Polygon" => NodeKind::Polygon,
            _ => NodeKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Folder(Folder),
    Placemark(Placemark),
    Other,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Folder {
    /// Declared name, `None` when absent or empty.
    pub name: Option<String>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryNode {
    Point { coordinates: String },
    LineString { coordinates: String },
    /// Only the outer boundary is read, inner rings are never kept.
    Polygon { outer: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placemark {
    pub name: String,
    pub description: String,
    pub style_url: Option<String>,
    pub data: Vec<(String, String)>,
    pub geometries: Vec<GeometryNode>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStyleDecl {
    pub color: Option<String>,
    pub width: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDecl {
    pub id: Option<String>,
    pub line: Option<LineStyleDecl>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairDecl {
    pub key: String,
    pub style_url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMapDecl {
    pub id: Option<String>,
    pub pairs: Vec<PairDecl>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub root: Folder,
    pub styles: Vec<StyleDecl>,
    pub style_maps: Vec<StyleMapDecl>,
}

fn child<'a, 'input>(node: XmlNode<'a, 'input>, name: &str) -> Option<XmlNode<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

fn text(node: XmlNode<'_, '_>) -> String {
    node.children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}

fn child_text(node: XmlNode<'_, '_>, name: &str) -> Option<String> {
    child(node, name).map(text)
}

fn id(node: XmlNode<'_, '_>) -> Option<String> {
    node.attribute("id").map(String::from)
}

impl Folder {
    fn from_xml(node: XmlNode<'_, '_>) -> Self {
        let name = child_text(node, "name").filter(|name| !name.is_empty());
        let children = node
            .children()
            .filter(|c| c.is_element())
            .map(|c| match NodeKind::of(c) {
                NodeKind::Folder => Node::Folder(Folder::from_xml(c)),
                NodeKind::Placemark => Node::Placemark(Placemark::from_xml(c)),
                _ => Node::Other,
            })
            .collect();
        Folder { name, children }
    }
}

impl GeometryNode {
    fn from_xml(node: XmlNode<'_, '_>) -> Option<Self> {
        let coordinates = || child_text(node, "coordinates").unwrap_or_default();
        let geometry = match NodeKind::of(node) {
            NodeKind::Point => GeometryNode::Point {
                coordinates: coordinates(),
            },
            NodeKind::LineString => GeometryNode::LineString {
                coordinates: coordinates(),
            },
            NodeKind::Polygon => {
                let outer = child(node, "outerBoundaryIs")
                    .and_then(|boundary| child(boundary, "LinearRing"))
                    .and_then(|ring| child_text(ring, "coordinates"))
                    .unwrap_or_default();
                GeometryNode::Polygon { outer }
            }
            _ => return None,
        };
        Some(geometry)
    }
}

impl Placemark {
    fn from_xml(node: XmlNode<'_, '_>) -> Self {
        let data = child(node, "ExtendedData")
            .map(|extended| {
                extended
                    .children()
                    .filter(|c| c.is_element() && c.tag_name().name() == "Data")
                    .map(|d| {
                        let key = d.attribute("name").unwrap_or_default().to_string();
                        let value = child_text(d, "value").unwrap_or_default();
                        (key, value)
                    })
                    .collect()
            })
            .unwrap_or_default();
        let geometries = node
            .children()
            .filter_map(GeometryNode::from_xml)
            .collect();
        Placemark {
            name: child_text(node, "name").unwrap_or_default(),
            description: child_text(node, "description").unwrap_or_default(),
            style_url: child_text(node, "styleUrl"),
            data,
            geometries,
        }
    }
}

impl StyleDecl {
    fn from_xml(node: XmlNode<'_, '_>) -> Self {
        let line = child(node, "LineStyle").map(|line| LineStyleDecl {
            color: child_text(line, "color"),
            width: child_text(line, "width"),
        });
        StyleDecl { id: id(node), line }
    }
}

impl StyleMapDecl {
    fn from_xml(node: XmlNode<'_, '_>) -> Self {
        let pairs = node
            .children()
            .filter(|c| c.is_element() && c.tag_name().name() == "Pair")
            .map(|pair| PairDecl {
                key: child_text(pair, "key").unwrap_or_default(),
                style_url: child_text(pair, "styleUrl").unwrap_or_default(),
            })
            .collect();
        StyleMapDecl {
            id: id(node),
            pairs,
        }
    }
}

impl Document {
    /// Parse a KML document.
    ///
    /// The traversal root is the first `Document` element below `<kml>`, or
    /// the root element itself when there is none.
    pub fn parse(text: &str) -> Result<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let text = text.trim_start_matches('\u{feff}');
        let xml = roxmltree::Document::parse_with_options(text, options)?;
        let kml = xml.root_element();
        if kml.tag_name().namespace() != Some(KML_NAMESPACE) {
            warn!(
                "root element <{}> is not in the KML 2.2 namespace",
                kml.tag_name().name()
            );
        }

        let container = kml
            .children()
            .find(|c| NodeKind::of(*c) == NodeKind::Document)
            .unwrap_or(kml);
        let root = Folder::from_xml(container);

        let mut styles = vec![];
        let mut style_maps = vec![];
        for node in xml.descendants() {
            match NodeKind::of(node) {
                NodeKind::Style => styles.push(StyleDecl::from_xml(node)),
                NodeKind::StyleMap => style_maps.push(StyleMapDecl::from_xml(node)),
                _ => {}
            }
        }

        Ok(Document {
            root,
            styles,
            style_maps,
        })
    }
}
