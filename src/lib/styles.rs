use super::color::kml_color_to_rgb;
use super::document::{Document, StyleDecl, StyleMapDecl};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_WIDTH: f64 = 2.;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StyleDef {
    pub color: Option<String>,
    pub width: f64,
}

impl Default for StyleDef {
    fn default() -> Self {
        StyleDef {
            color: None,
            width: DEFAULT_WIDTH,
        }
    }
}

fn parse_width(width: &str) -> Option<f64> {
    let width: f64 = width.trim().parse().ok()?;
    if width.is_finite() && width != 0. {
        Some(width)
    } else {
        None
    }
}

impl From<&StyleDecl> for StyleDef {
    fn from(decl: &StyleDecl) -> Self {
        let line = match &decl.line {
            Some(line) => line,
            None => return StyleDef::default(),
        };
        let color = line.color.as_deref().and_then(kml_color_to_rgb);
        let width = line
            .width
            .as_deref()
            .and_then(parse_width)
            .unwrap_or(DEFAULT_WIDTH);
        StyleDef { color, width }
    }
}

/// Strip the fragment marker(s) from a local style reference (`#id` -> `id`).
pub fn style_id(style_url: &str) -> &str {
    style_url.trim().trim_start_matches('#')
}

fn non_empty(id: &Option<String>) -> Option<&str> {
    id.as_deref().filter(|id| !id.is_empty())
}

/// Lookup table from style (or style map) id to the resolved line style.
///
/// Built once per conversion and only read afterwards.
#[derive(Debug, Default, Clone)]
pub struct StyleRegistry {
    styles: HashMap<String, StyleDef>,
}

impl StyleRegistry {
    /// Collect every `Style` of the document, then alias every `StyleMap` to
    /// the style its first `normal` pair points at. Later declarations of the
    /// same id replace earlier ones. Style maps pointing at other style maps
    /// are not followed.
    pub fn build(document: &Document) -> Self {
        let mut styles: HashMap<String, StyleDef> = HashMap::new();
        for decl in &document.styles {
            if let Some(id) = non_empty(&decl.id) {
                styles.insert(id.to_string(), decl.into());
            }
        }

        let aliases: Vec<(String, StyleDef)> = document
            .style_maps
            .iter()
            .filter_map(|map| resolve_map(map, &styles))
            .collect();
        styles.extend(aliases);

        StyleRegistry { styles }
    }

    pub fn get(&self, id: &str) -> Option<&StyleDef> {
        self.styles.get(id)
    }

    /// Resolve a `styleUrl` value of a placemark.
    pub fn resolve(&self, style_url: &str) -> Option<&StyleDef> {
        let id = style_id(style_url);
        if id.is_empty() {
            return None;
        }
        let style = self.get(id);
        if style.is_none() {
            debug!("style {:?} could not be resolved", id);
        }
        style
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

fn resolve_map(
    map: &StyleMapDecl,
    styles: &HashMap<String, StyleDef>,
) -> Option<(String, StyleDef)> {
    let id = non_empty(&map.id)?;
    let pair = map.pairs.iter().find(|pair| pair.key.trim() == "normal");
    let style = pair.and_then(|pair| styles.get(style_id(&pair.style_url)));
    match style {
        Some(style) => Some((id.to_string(), style.clone())),
        None => {
            debug!("style map {:?} has no resolvable normal style", id);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{LineStyleDecl, PairDecl};

    fn style(id: &str, color: Option<&str>, width: Option<&str>) -> StyleDecl {
        StyleDecl {
            id: Some(id.into()),
            line: Some(LineStyleDecl {
                color: color.map(String::from),
                width: width.map(String::from),
            }),
        }
    }

    fn style_map(id: &str, pairs: &[(&str, &str)]) -> StyleMapDecl {
        let pairs = pairs
            .iter()
            .map(|(key, url)| PairDecl {
                key: (*key).into(),
                style_url: (*url).into(),
            })
            .collect();
        StyleMapDecl {
            id: Some(id.into()),
            pairs,
        }
    }

    fn registry(styles: Vec<StyleDecl>, style_maps: Vec<StyleMapDecl>) -> StyleRegistry {
        let document = Document {
            styles,
            style_maps,
            ..Document::default()
        };
        StyleRegistry::build(&document)
    }

    #[test]
    fn line_style() {
        let registry = registry(vec![style("a", Some("ffff0000"), Some("3"))], vec![]);
        let expected = StyleDef {
            color: Some("#0000ff".into()),
            width: 3.,
        };
        assert_eq!(registry.get("a"), Some(&expected));
    }

    #[test]
    fn width_fallback() {
        let registry = registry(
            vec![
                style("zero", None, Some("0")),
                style("missing", None, None),
                style("garbage", None, Some("wide")),
                style("empty", Some(""), Some("")),
            ],
            vec![],
        );
        for id in &["zero", "missing", "garbage", "empty"] {
            assert_eq!(registry.get(id), Some(&StyleDef::default()), "{}", id);
        }
    }

    #[test]
    fn without_line_style() {
        let decl = StyleDecl {
            id: Some("icon".into()),
            line: None,
        };
        let registry = registry(vec![decl], vec![]);
        assert_eq!(registry.get("icon"), Some(&StyleDef::default()));
    }

    #[test]
    fn without_id() {
        let mut decl = style("", None, Some("4"));
        let registry_1 = registry(vec![decl.clone()], vec![]);
        assert!(registry_1.is_empty());
        decl.id = None;
        let registry_2 = registry(vec![decl], vec![]);
        assert!(registry_2.is_empty());
    }

    #[test]
    fn last_declaration_wins() {
        let registry = registry(
            vec![style("a", None, Some("1")), style("a", None, Some("5"))],
            vec![],
        );
        assert_eq!(registry.get("a").unwrap().width, 5.);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn style_map_alias() {
        let registry = registry(
            vec![
                style("normal-style", Some("ff00ff00"), Some("4")),
                style("hover-style", Some("ff0000ff"), Some("8")),
            ],
            vec![style_map(
                "map",
                &[("highlight", "#hover-style"), ("normal", "#normal-style")],
            )],
        );
        assert_eq!(registry.get("map"), registry.get("normal-style"));
    }

    #[test]
    fn first_normal_pair_only() {
        let registry = registry(
            vec![style("b", None, Some("4"))],
            vec![style_map("map", &[("normal", "#missing"), ("normal", "#b")])],
        );
        assert_eq!(registry.get("map"), None);
    }

    #[test]
    fn style_map_without_target() {
        let registry = registry(
            vec![],
            vec![
                style_map("dangling", &[("normal", "#nowhere")]),
                style_map("highlight-only", &[("highlight", "#nowhere")]),
            ],
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn style_map_to_style_map() {
        let registry = registry(
            vec![style("a", None, Some("4"))],
            vec![
                style_map("inner", &[("normal", "#a")]),
                style_map("outer", &[("normal", "#inner")]),
            ],
        );
        assert!(registry.get("inner").is_some());
        assert_eq!(registry.get("outer"), None);
    }

    #[test]
    fn resolve_style_url() {
        let registry = registry(vec![style("a", None, Some("4"))], vec![]);
        assert_eq!(registry.resolve("#a").unwrap().width, 4.);
        assert_eq!(registry.resolve(" ##a ").unwrap().width, 4.);
        assert_eq!(registry.resolve("#b"), None);
        assert_eq!(registry.resolve(""), None);
    }
}
