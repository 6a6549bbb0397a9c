use super::coordinates::Coordinate;
use super::geometry;
use super::placemark::Feature;
use super::styles::StyleDef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Coordinate },
    LineString { coordinates: Vec<Coordinate> },
    Polygon { coordinates: Vec<Vec<Coordinate>> },
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Properties {
    pub name: String,
    pub description: String,
    pub folder: String,
    pub images: Vec<String>,
    pub meta: BTreeMap<String, String>,
    pub style: Option<StyleDef>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum Entity {
    Feature {
        properties: Properties,
        geometry: Geometry,
    },
    FeatureCollection {
        features: Vec<Entity>,
    },
}

impl From<&geometry::Geometry> for Geometry {
    fn from(geometry: &geometry::Geometry) -> Self {
        match geometry {
            geometry::Geometry::Point(coordinates) => Geometry::Point {
                coordinates: *coordinates,
            },
            geometry::Geometry::LineString(coordinates) => Geometry::LineString {
                coordinates: coordinates.clone(),
            },
            geometry::Geometry::Polygon(outer) => Geometry::Polygon {
                coordinates: vec![outer.clone()],
            },
        }
    }
}

impl From<&Feature> for Entity {
    fn from(feature: &Feature) -> Self {
        let properties = Properties {
            name: feature.name.clone(),
            description: feature.description.clone(),
            folder: feature.folder.clone(),
            images: feature.images.clone(),
            meta: feature.meta.clone(),
            style: feature.style.clone(),
        };
        Entity::Feature {
            properties,
            geometry: (&feature.geometry).into(),
        }
    }
}
