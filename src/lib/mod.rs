//! Convert KML documents into flat, style-resolved GeoJSON.
//!
//! Styles and style maps are resolved once per document, then the folder
//! tree is walked depth-first and every placemark with a usable geometry
//! becomes a `Feature` tagged with the name of its nearest named folder.
//!
//! # Example
//!
//! ```
//! use kml2geojson::convert;
//! use kml2geojson::output::Output;
//!
//! let kml = r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
//!   <Placemark><name>Tower</name><Point><coordinates>13.4,52.5</coordinates></Point></Placemark>
//! </Document></kml>"#;
//!
//! let features = convert(kml.as_bytes()).unwrap();
//! assert_eq!(features.len(), 1);
//! assert_eq!(features[0].folder, "Root");
//!
//! let mut geojson = Vec::new();
//! features.write_geojson(&mut geojson).unwrap();
//! ```

use self::document::Document;
use self::folder::{walk, ROOT_LABEL};
use self::output::{Output, OutputFormat};
use self::styles::StyleRegistry;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

pub use self::error::{Error, Result};
pub use self::placemark::Feature;

pub mod color;
pub mod coordinates;
pub mod document;
mod error;
pub mod folder;
pub mod geojson;
pub mod geometry;
pub mod output;
pub mod placemark;
pub mod styles;

/// Convert the text of a KML document.
pub fn convert_str(text: &str) -> Result<Vec<Feature>> {
    let document = Document::parse(text)?;
    let styles = StyleRegistry::build(&document);
    debug!("{} styles registered", styles.len());
    let features = walk(&document.root, ROOT_LABEL, &styles);
    Ok(features)
}

/// Read and convert a KML document.
pub fn convert(mut input: impl Read) -> Result<Vec<Feature>> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes).map_err(Error::Read)?;
    let text = String::from_utf8(bytes).map_err(|err| Error::Parse(err.to_string()))?;
    convert_str(&text)
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::InputMissing(path.to_path_buf()),
        _ => Error::Read(err),
    })
}

/// Convert the KML document at `path`.
pub fn convert_path(path: &Path) -> Result<Vec<Feature>> {
    let file = open_input(path)?;
    let features = convert(BufReader::new(file))?;
    info!(
        "converted {} features from {}",
        features.len(),
        path.display()
    );
    Ok(features)
}

/// Convert `input` and write the result to `output`, creating missing
/// parent directories. The output is only touched once the document has
/// been parsed. Returns the number of features written.
pub fn convert_file(input: &Path, output: &Path, format: OutputFormat) -> Result<usize> {
    let features = convert_path(input)?;

    if let Some(dir) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| Error::OutputDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let mut writer = BufWriter::new(File::create(output)?);
    features.write_as(format, &mut writer)?;
    writer.flush()?;
    Ok(features.len())
}

/// Whether `output` has to be regenerated: it is missing or older than
/// `input`. A missing input is an error.
pub fn is_stale(input: &Path, output: &Path) -> Result<bool> {
    let input_meta = fs::metadata(input).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::InputMissing(input.to_path_buf()),
        _ => Error::Read(err),
    })?;
    let output_modified = match fs::metadata(output).and_then(|meta| meta.modified()) {
        Ok(modified) => modified,
        Err(_) => return Ok(true),
    };
    let input_modified = input_meta.modified().map_err(Error::Read)?;
    Ok(input_modified > output_modified)
}

/// Convert `input` into `output` if the output is stale, or unconditionally
/// with `force`. Returns the number of features written, `None` when the
/// output was up to date.
pub fn refresh(
    input: &Path,
    output: &Path,
    format: OutputFormat,
    force: bool,
) -> Result<Option<usize>> {
    if !force && !is_stale(input, output)? {
        info!("{} is up to date", output.display());
        return Ok(None);
    }
    let count = convert_file(input, output, format)?;
    Ok(Some(count))
}
