use super::error::Result;
use super::geojson::Entity;
use super::placemark::Feature;
use serde_json::{to_string, to_string_pretty};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One pretty printed `FeatureCollection`.
    GeoJson,
    /// One compact `Feature` per line.
    JsonLines,
}

pub trait Output {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<()>;
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<()>;

    fn write_as(&self, format: OutputFormat, writer: &mut dyn Write) -> Result<()> {
        match format {
            OutputFormat::GeoJson => self.write_geojson(writer),
            OutputFormat::JsonLines => self.write_json_lines(writer),
        }
    }
}

impl Output for Vec<Feature> {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<()> {
        let features = self.iter().map(Entity::from).collect();
        let feature_collection = Entity::FeatureCollection { features };
        let string = to_string_pretty(&feature_collection)?;
        writeln!(writer, "{}", string)?;
        Ok(())
    }

    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<()> {
        for feature in self.iter() {
            let json = to_string(&Entity::from(feature))?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }
}
