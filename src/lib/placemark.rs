use super::document::Placemark;
use super::geometry::{self, Geometry};
use super::styles::{StyleDef, StyleRegistry};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// `<img ... src="...">`, tag name case-insensitive. This is a plain text
/// scan over the description, single-quoted attributes are not recognised.
static IMG_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i:<img)[^>]+src="([^">]+)""#).expect("Invalid img regex"));

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    /// Raw description markup, not sanitized.
    pub description: String,
    pub folder: String,
    pub images: Vec<String>,
    pub meta: BTreeMap<String, String>,
    pub style: Option<StyleDef>,
    pub geometry: Geometry,
}

pub fn extract_images(description: &str) -> Vec<String> {
    IMG_SRC
        .captures_iter(description)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Translate a placemark into a feature of the given folder. Placemarks
/// without a usable geometry yield `None`.
pub fn translate(placemark: &Placemark, folder: &str, styles: &StyleRegistry) -> Option<Feature> {
    let meta = placemark.data.iter().cloned().collect();
    let images = extract_images(&placemark.description);
    let style = placemark
        .style_url
        .as_deref()
        .and_then(|url| styles.resolve(url))
        .cloned();

    let geometry = match geometry::translate(&placemark.geometries) {
        Some(geometry) => geometry,
        None => {
            debug!("dropping placemark {:?} without geometry", placemark.name);
            return None;
        }
    };

    Some(Feature {
        name: placemark.name.clone(),
        description: placemark.description.clone(),
        folder: folder.to_string(),
        images,
        meta,
        style,
        geometry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, GeometryNode, LineStyleDecl, StyleDecl};

    fn placemark() -> Placemark {
        Placemark {
            name: "Tower".into(),
            description: "<p>north side</p>".into(),
            style_url: None,
            data: vec![],
            geometries: vec![GeometryNode::Point {
                coordinates: "13.41,52.52".into(),
            }],
        }
    }

    fn registry() -> StyleRegistry {
        let decl = StyleDecl {
            id: Some("red".into()),
            line: Some(LineStyleDecl {
                color: Some("ff0000ff".into()),
                width: Some("5".into()),
            }),
        };
        let document = Document {
            styles: vec![decl],
            ..Document::default()
        };
        StyleRegistry::build(&document)
    }

    #[test]
    fn plain_point() {
        let feature = translate(&placemark(), "Masts", &StyleRegistry::default()).unwrap();
        assert_eq!(feature.name, "Tower");
        assert_eq!(feature.description, "<p>north side</p>");
        assert_eq!(feature.folder, "Masts");
        assert!(feature.images.is_empty());
        assert!(feature.meta.is_empty());
        assert_eq!(feature.style, None);
        assert_eq!(feature.geometry, Geometry::Point((13.41, 52.52)));
    }

    #[test]
    fn resolved_style() {
        let mut placemark = placemark();
        placemark.style_url = Some("#red".into());
        let feature = translate(&placemark, "Masts", &registry()).unwrap();
        let expected = StyleDef {
            color: Some("#ff0000".into()),
            width: 5.,
        };
        assert_eq!(feature.style, Some(expected));
    }

    #[test]
    fn unresolved_style() {
        let mut placemark = placemark();
        placemark.style_url = Some("#blue".into());
        let feature = translate(&placemark, "Masts", &registry()).unwrap();
        assert_eq!(feature.style, None);
    }

    #[test]
    fn meta_last_key_wins() {
        let mut placemark = placemark();
        placemark.data = vec![
            ("height".into(), "40m".into()),
            ("owner".into(), "city".into()),
            ("height".into(), "42m".into()),
        ];
        let feature = translate(&placemark, "Masts", &registry()).unwrap();
        assert_eq!(feature.meta.len(), 2);
        assert_eq!(feature.meta["height"], "42m");
        assert_eq!(feature.meta["owner"], "city");
    }

    #[test]
    fn without_geometry() {
        let mut placemark = placemark();
        placemark.geometries = vec![GeometryNode::LineString {
            coordinates: "".into(),
        }];
        assert_eq!(translate(&placemark, "Masts", &registry()), None);
        placemark.geometries = vec![];
        assert_eq!(translate(&placemark, "Masts", &registry()), None);
    }

    #[test]
    fn images_in_order() {
        let description = r#"<IMG class="a" src="http://x/1.jpg"> text <img alt="b" src="2.png"/>"#;
        assert_eq!(extract_images(description), vec!["http://x/1.jpg", "2.png"]);
    }

    #[test]
    fn images_attribute_case_sensitive() {
        assert!(extract_images(r#"<img SRC="1.jpg">"#).is_empty());
    }

    #[test]
    fn images_single_quotes() {
        assert!(extract_images("<img src='1.jpg'>").is_empty());
        assert!(extract_images("<img>").is_empty());
    }

    #[test]
    fn images_from_description() {
        let mut placemark = placemark();
        placemark.description = r#"<div><img src="photo.jpg" width="200"></div>"#.into();
        let feature = translate(&placemark, "Masts", &registry()).unwrap();
        assert_eq!(feature.images, vec!["photo.jpg"]);
    }
}
