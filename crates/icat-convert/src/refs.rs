//! Codec for the `ui_references` CSV column.
//!
//! The ordered reference list is encoded as a single cell: entries joined by
//! `;`, each entry `label|url`.

use icat_model::Reference;

/// Encodes references for the `ui_references` cell. Empty list encodes empty.
pub fn encode_references(references: &[Reference]) -> String {
    references
        .iter()
        .map(|reference| format!("{}|{}", reference.label, reference.url))
        .collect::<Vec<_>>()
        .join(";")
}

/// Decodes a `ui_references` cell back into an ordered reference list.
///
/// Blank segments are skipped. A segment splits on its first `|` into
/// `(label, url)`; a segment without `|` is taken as a bare URL and fills
/// both fields.
pub fn decode_references(cell: &str) -> Vec<Reference> {
    let mut references = Vec::new();
    for segment in cell.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match segment.split_once('|') {
            Some((label, url)) => references.push(Reference {
                label: label.trim().to_string(),
                url: url.trim().to_string(),
            }),
            None => references.push(Reference {
                label: segment.to_string(),
                url: segment.to_string(),
            }),
        }
    }
    references
}
