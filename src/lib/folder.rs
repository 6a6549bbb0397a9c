use super::document::{Folder, Node};
use super::placemark::{self, Feature};
use super::styles::StyleRegistry;

/// Label of the top level folder when the document has no name.
pub const ROOT_LABEL: &str = "Root";

/// Collect the features of a folder and its sub-folders in document order.
///
/// A folder without a name of its own takes the `inherited` name of its
/// nearest named ancestor.
pub fn walk(folder: &Folder, inherited: &str, styles: &StyleRegistry) -> Vec<Feature> {
    let name = folder.name.as_deref().unwrap_or(inherited);
    folder
        .children
        .iter()
        .flat_map(|child| match child {
            Node::Placemark(placemark) => placemark::translate(placemark, name, styles)
                .into_iter()
                .collect::<Vec<_>>(),
            Node::Folder(sub_folder) => walk(sub_folder, name, styles),
            Node::Other => vec![],
        })
        .collect()
}
