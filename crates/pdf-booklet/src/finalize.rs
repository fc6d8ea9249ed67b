//! Document finalization
//!
//! Footer badges carry the total page count, which exists only after every
//! item is placed, so finalization is a strict second pass: content
//! rendering completes, then `stamp_footers` runs, then the document is
//! serialized. The file write is atomic (temp sibling plus rename) so a
//! failed run leaves nothing behind.

use crate::layout::PageGeometry;
use crate::render::{DocumentFont, footer_ops};
use crate::types::Result;
use printpdf::*;
use std::path::{Path, PathBuf};

/// Second pass over every created page. Precondition: all content pages
/// are fully rendered; no page may be added afterwards.
pub(crate) fn stamp_footers(pages: &mut [Vec<Op>], geometry: &PageGeometry, font: &DocumentFont) {
    let total = pages.len();
    for (index, ops) in pages.iter_mut().enumerate() {
        ops.extend(footer_ops(geometry, index + 1, total, font));
    }
}

/// Attach the op streams as pages and serialize the document
pub(crate) fn serialize(
    doc: &mut PdfDocument,
    pages: Vec<Vec<Op>>,
    geometry: &PageGeometry,
) -> Vec<u8> {
    let media_box = Rect {
        x: Pt(0.0),
        y: Pt(0.0),
        width: Pt(geometry.page_width),
        height: Pt(geometry.page_height),
    };
    doc.pages = pages
        .into_iter()
        .map(|ops| PdfPage {
            media_box: media_box.clone(),
            trim_box: media_box.clone(),
            crop_box: media_box.clone(),
            ops,
        })
        .collect();

    let mut warnings = Vec::new();
    doc.save(&PdfSaveOptions::default(), &mut warnings)
}

/// Write to a temp sibling, then rename over the target
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_sibling(path);
    tokio::fs::write(&tmp, bytes).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "booklet.pdf".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Artifact file name from the user-supplied title
pub fn sanitize_file_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = cleaned.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        "booklet.pdf".to_string()
    } else {
        format!("{}.pdf", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("My Booklet"), "My Booklet.pdf");
        assert_eq!(sanitize_file_name("a/b:c?"), "a_b_c_.pdf");
        assert_eq!(sanitize_file_name("   "), "booklet.pdf");
        assert_eq!(sanitize_file_name("trailing..."), "trailing.pdf");
    }

    #[test]
    fn test_temp_sibling_keeps_directory() {
        let tmp = temp_sibling(Path::new("/some/dir/out.pdf"));
        assert_eq!(tmp, PathBuf::from("/some/dir/out.pdf.tmp"));
    }
}
