//! Import previews for bulk uploads
//!
//! A preview pairs every selected file with the identity the server will
//! derive from its name, in selection order, and flags files the bulk
//! endpoint is going to refuse.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{matched_rule, parse_filename, ParsedIdentity, RuleKind};

/// Image MIME types accepted by the bulk upload endpoint.
const IMAGE_MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
];

/// Get MIME type for an image file based on extension.
pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    IMAGE_MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Why a file would not become a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PreviewIssue {
    /// Not an image, the server only takes `image/*` uploads
    NotAnImage,
    /// The filename yields an empty name
    EmptyName,
}

impl PreviewIssue {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::NotAnImage => "not an image",
            Self::EmptyName => "could not parse a name",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewEntry {
    pub path: PathBuf,
    pub file_name: String,
    pub identity: ParsedIdentity,
    pub rule: RuleKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<PreviewIssue>,
}

impl PreviewEntry {
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let identity = parse_filename(&file_name);
        let rule = matched_rule(&file_name);

        let issue = if image_mime_type(path).is_none() {
            Some(PreviewIssue::NotAnImage)
        } else if identity.name.is_empty() {
            Some(PreviewIssue::EmptyName)
        } else {
            None
        };

        Self {
            path: path.to_path_buf(),
            file_name,
            identity,
            rule,
            issue,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.issue.is_none()
    }
}

/// Preview of a bulk import, index-aligned with the selected files
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportPreview {
    pub entries: Vec<PreviewEntry>,
}

impl ImportPreview {
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Self {
        Self {
            entries: paths
                .iter()
                .map(|p| PreviewEntry::from_path(p.as_ref()))
                .collect(),
        }
    }

    /// Entries that will be uploaded, in selection order
    pub fn accepted(&self) -> impl Iterator<Item = &PreviewEntry> {
        self.entries.iter().filter(|e| e.is_accepted())
    }

    pub fn rejected(&self) -> impl Iterator<Item = &PreviewEntry> {
        self.entries.iter().filter(|e| !e.is_accepted())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime_type() {
        assert_eq!(image_mime_type(Path::new("a.jpg")), Some("image/jpeg"));
        assert_eq!(image_mime_type(Path::new("a.JPEG")), Some("image/jpeg"));
        assert_eq!(image_mime_type(Path::new("a.png")), Some("image/png"));
        assert_eq!(image_mime_type(Path::new("a.txt")), None);
        assert_eq!(image_mime_type(Path::new("noext")), None);
    }

    #[test]
    fn test_preview_is_index_aligned() {
        let preview = ImportPreview::from_paths(&[
            "photos/Zed_Adams_Ops.png",
            "photos/notes.txt",
            "photos/Amy Brown - CTO.jpg",
        ]);

        assert_eq!(preview.len(), 3);
        assert_eq!(preview.entries[0].identity, ParsedIdentity::new("Zed Adams", "Ops"));
        assert_eq!(preview.entries[0].rule, RuleKind::Underscore);
        assert_eq!(preview.entries[1].issue, Some(PreviewIssue::NotAnImage));
        assert_eq!(preview.entries[2].file_name, "Amy Brown - CTO.jpg");
        assert_eq!(preview.entries[2].identity, ParsedIdentity::new("Amy Brown", "CTO"));
    }

    #[test]
    fn test_accepted_keeps_order_and_skips_rejects() {
        let preview = ImportPreview::from_paths(&["b.png", " - Ghost.png", "a.png", "c.gif"]);

        let accepted: Vec<&str> = preview.accepted().map(|e| e.file_name.as_str()).collect();
        assert_eq!(accepted, vec!["b.png", "a.png", "c.gif"]);

        let rejected: Vec<PreviewIssue> = preview.rejected().filter_map(|e| e.issue).collect();
        assert_eq!(rejected, vec![PreviewIssue::EmptyName]);
    }
}
