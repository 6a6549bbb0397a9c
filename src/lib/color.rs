/// Convert a KML color (`aabbggrr`) into an RGB hex string (`#rrggbb`).
///
/// The alpha pair is discarded. Inputs shorter than 8 characters or with
/// non-hex color digits yield `None`.
///
/// # Example
///
/// ```
/// use kml2geojson::color::kml_color_to_rgb;
///
/// assert_eq!(kml_color_to_rgb("ff0000ff"), Some("#ff0000".into()));
/// assert_eq!(kml_color_to_rgb("ff00ff"), None);
/// ```
pub fn kml_color_to_rgb(abgr: &str) -> Option<String> {
    let abgr = abgr.trim();
    let bgr = abgr.get(2..8)?;
    if !bgr.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let b = &bgr[0..2];
    let g = &bgr[2..4];
    let r = &bgr[4..6];
    Some(format!("#{}{}{}", r, g, b))
}
