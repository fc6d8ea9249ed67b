//! Op-stream builders for page chrome and placed items
//!
//! Layout hands over top-down placements; everything here converts to PDF
//! bottom-up coordinates on the way out.

use super::fonts::DocumentFont;
use super::gray;
use crate::constants::*;
use crate::images::PreparedQuestion;
use crate::layout::{PageGeometry, PlacedItem};
use printpdf::*;

/// Static chrome drawn once when a page is created: the center divider
/// between the columns and, when a title is set, the header line and rule.
pub(crate) fn new_page_ops(
    geometry: &PageGeometry,
    title: Option<&str>,
    font: &DocumentFont,
) -> Vec<Op> {
    let mut ops = Vec::new();

    let center = geometry.page_width / 2.0;
    ops.extend(line_ops(
        center,
        geometry.margin,
        center,
        geometry.page_height - geometry.margin,
        gray(DIVIDER_GRAY),
        DIVIDER_WIDTH_PT,
    ));

    if let Some(title) = title {
        let baseline = geometry.pdf_y(geometry.margin + TITLE_FONT_SIZE_PT);
        ops.extend(font.text_ops(
            title,
            geometry.margin,
            baseline,
            TITLE_FONT_SIZE_PT,
            gray(0.2),
        ));

        let rule_y = geometry.pdf_y(geometry.content_top - HEADER_RULE_RISE_PT);
        ops.extend(line_ops(
            geometry.margin,
            rule_y,
            geometry.page_width - geometry.margin,
            rule_y,
            gray(DIVIDER_GRAY),
            HEADER_RULE_WIDTH_PT,
        ));
    }

    ops
}

/// Content for one placed question, in z-order: citation line, image,
/// number mask, replacement number.
pub(crate) fn placed_question_ops(
    placement: &PlacedItem,
    question: &PreparedQuestion,
    image: XObjectId,
    geometry: &PageGeometry,
    font: &DocumentFont,
) -> Vec<Op> {
    let mut ops = Vec::new();

    if placement.with_citation {
        let citation = format!("{} Q{}", question.source_title, question.source_number);
        let baseline = geometry.pdf_y(placement.y + CITATION_BASELINE_PT);
        ops.extend(font.text_ops(
            &citation,
            placement.x,
            baseline,
            CITATION_FONT_SIZE_PT,
            gray(CITATION_GRAY),
        ));
    }

    // The image sits below the citation line within the item block.
    let image_top = placement.y + (placement.total_height - placement.image_height);
    let scale = geometry.column_width / question.pixel_width as f32;
    ops.push(Op::UseXobject {
        id: image,
        transform: XObjectTransform {
            translate_x: Some(Pt(placement.x)),
            translate_y: Some(Pt(geometry.pdf_y(image_top + placement.image_height))),
            rotate: None,
            scale_x: Some(scale),
            scale_y: Some(scale),
            // 1 source pixel = `scale` points
            dpi: Some(72.0),
        },
    });

    // Opaque patch over the original printed number.
    ops.push(Op::SetFillColor { col: gray(1.0) });
    ops.push(Op::DrawPolygon {
        polygon: rect_polygon(
            placement.x,
            geometry.pdf_y(image_top + MASK_HEIGHT_PT),
            MASK_WIDTH_PT,
            MASK_HEIGHT_PT,
            PaintMode::Fill,
        ),
    });

    let number = format!("{}.", question.display_number);
    let number_x = placement.x + mm_to_pt(NUMBER_OFFSET_X_MM);
    let number_baseline =
        geometry.pdf_y(image_top + mm_to_pt(NUMBER_OFFSET_Y_MM) + NUMBER_FONT_SIZE_PT);
    ops.extend(font.double_struck_ops(
        &number,
        number_x,
        number_baseline,
        NUMBER_FONT_SIZE_PT,
        gray(0.0),
    ));

    ops
}

/// The `{page} / {total}` badge, centered in the footer band
pub(crate) fn footer_ops(
    geometry: &PageGeometry,
    page: usize,
    total: usize,
    font: &DocumentFont,
) -> Vec<Op> {
    let text = format!("{} / {}", page, total);
    let text_width = font.text_width(&text, FOOTER_FONT_SIZE_PT);

    let badge_width = text_width + 2.0 * FOOTER_BADGE_PAD_PT;
    let badge_x = (geometry.page_width - badge_width) / 2.0;
    let badge_y = geometry.margin + (geometry.footer_height - FOOTER_BADGE_HEIGHT_PT) / 2.0;

    let mut ops = vec![
        Op::SetOutlineColor { col: gray(0.3) },
        Op::SetOutlineThickness {
            pt: Pt(FOOTER_BADGE_BORDER_PT),
        },
        Op::DrawPolygon {
            polygon: rect_polygon(
                badge_x,
                badge_y,
                badge_width,
                FOOTER_BADGE_HEIGHT_PT,
                PaintMode::Stroke,
            ),
        },
    ];
    ops.extend(font.double_struck_ops(
        &text,
        badge_x + FOOTER_BADGE_PAD_PT,
        badge_y + FOOTER_TEXT_RISE_PT,
        FOOTER_FONT_SIZE_PT,
        gray(0.0),
    ));
    ops
}

fn line_ops(x1: f32, y1: f32, x2: f32, y2: f32, color: Color, width: f32) -> Vec<Op> {
    vec![
        Op::SetOutlineColor { col: color },
        Op::SetOutlineThickness { pt: Pt(width) },
        Op::DrawLine {
            line: Line {
                points: vec![
                    LinePoint {
                        p: Point {
                            x: Pt(x1),
                            y: Pt(y1),
                        },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point {
                            x: Pt(x2),
                            y: Pt(y2),
                        },
                        bezier: false,
                    },
                ],
                is_closed: false,
            },
        },
    ]
}

/// Axis-aligned rectangle from its PDF-space bottom-left corner
fn rect_polygon(x: f32, y: f32, width: f32, height: f32, mode: PaintMode) -> Polygon {
    let corner = |px: f32, py: f32| LinePoint {
        p: Point {
            x: Pt(px),
            y: Pt(py),
        },
        bezier: false,
    };
    Polygon {
        rings: vec![PolygonRing {
            points: vec![
                corner(x, y),
                corner(x + width, y),
                corner(x + width, y + height),
                corner(x, y + height),
            ],
        }],
        mode,
        winding_order: WindingOrder::NonZero,
    }
}
