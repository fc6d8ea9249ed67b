use crate::constants::{BOLD_STRIKE_OFFSET_PT, HELVETICA_CHAR_WIDTH_RATIO};
use crate::types::BookletWarning;
use printpdf::*;
use std::path::PathBuf;

/// The document's resolved text font: the first parseable configured font
/// file, or built-in Helvetica when none resolves.
pub struct DocumentFont {
    kind: FontKind,
}

enum FontKind {
    Custom {
        id: FontId,
        parsed: Box<ParsedFont>,
    },
    Builtin(BuiltinFont),
}

impl DocumentFont {
    /// Probe the configured font files in order and register the winner
    /// with the document. Falls back to Helvetica with a warning; an empty
    /// source list means the built-in font was asked for, not a fallback.
    pub fn resolve(
        doc: &mut PdfDocument,
        sources: &[PathBuf],
        warnings: &mut Vec<BookletWarning>,
    ) -> Self {
        for path in sources {
            let bytes = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("cannot read font {}: {}", path.display(), e);
                    continue;
                }
            };
            let mut font_warnings = Vec::new();
            match ParsedFont::from_bytes(&bytes, 0, &mut font_warnings) {
                Some(parsed) => {
                    let id = doc.add_font(&parsed);
                    log::debug!("using font {}", path.display());
                    return Self {
                        kind: FontKind::Custom {
                            id,
                            parsed: Box::new(parsed),
                        },
                    };
                }
                None => log::warn!("cannot parse font {}", path.display()),
            }
        }

        if !sources.is_empty() {
            warnings.push(BookletWarning::FontFallback {
                reason: format!("none of {} configured font files usable", sources.len()),
            });
        }
        Self {
            kind: FontKind::Builtin(BuiltinFont::Helvetica),
        }
    }

    /// Ops for one run of text at a PDF-space baseline position
    pub fn text_ops(&self, text: &str, x: f32, y: f32, size: f32, color: Color) -> Vec<Op> {
        let mut ops = vec![Op::StartTextSection];
        ops.push(Op::SetFillColor { col: color });
        match &self.kind {
            FontKind::Custom { id, .. } => {
                ops.push(Op::SetFontSize {
                    size: Pt(size),
                    font: id.clone(),
                });
                ops.push(Op::SetTextMatrix {
                    matrix: TextMatrix::Translate(Pt(x), Pt(y)),
                });
                ops.push(Op::WriteText {
                    items: vec![TextItem::Text(text.to_string())],
                    font: id.clone(),
                });
            }
            FontKind::Builtin(font) => {
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(size),
                    font: *font,
                });
                ops.push(Op::SetTextCursor {
                    pos: Point { x: Pt(x), y: Pt(y) },
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text.to_string())],
                    font: *font,
                });
            }
        }
        ops.push(Op::EndTextSection);
        ops
    }

    /// The same run drawn twice with a slight horizontal offset, simulating
    /// a heavier weight than the face provides
    pub fn double_struck_ops(
        &self,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    ) -> Vec<Op> {
        let mut ops = self.text_ops(text, x, y, size, color.clone());
        ops.extend(self.text_ops(text, x + BOLD_STRIKE_OFFSET_PT, y, size, color));
        ops
    }

    /// Approximate advance width of a run at the given size, in points
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        match &self.kind {
            FontKind::Custom { parsed, .. } => {
                let mut width = 0.0;
                for ch in text.chars() {
                    if let Some(glyph_id) = parsed.lookup_glyph_index(ch as u32) {
                        let advance = parsed.get_horizontal_advance(glyph_id);
                        width += (advance as f32 / 1000.0) * size;
                    }
                }
                width
            }
            FontKind::Builtin(_) => text.chars().count() as f32 * size * HELVETICA_CHAR_WIDTH_RATIO,
        }
    }
}
