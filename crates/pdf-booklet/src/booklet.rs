//! Generation-run orchestration
//!
//! One run processes one immutable request to completion: resolve and
//! prepare images (concurrent, joined in order), pack, render, stamp
//! footers, serialize. Progress and warnings stream out over an optional
//! event channel; cancellation is checked once per item.

use crate::finalize::{sanitize_file_name, serialize, stamp_footers, write_atomic};
use crate::images::{PreparedQuestion, prepare_questions};
use crate::layout::{ItemExtent, LayoutPlan, PageGeometry, pack};
use crate::options::BookletOptions;
use crate::render::{DocumentFont, new_page_ops, placed_question_ops};
use crate::stats::calculate_statistics;
use crate::types::*;
use printpdf::{Op, PdfDocument, RawImage};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;

/// Progress events emitted during a run
#[derive(Debug, Clone)]
pub enum BookletUpdate {
    /// One selection item finished preparation (prepared or skipped)
    Progress { processed: usize, total: usize },
    /// Layout and content rendering completed
    ContentLaidOut { pages: usize, items: usize },
}

/// Everything one generation run needs, snapshotted from the caller's
/// selection state. Construct once, pass by reference, never mutated.
#[derive(Debug, Clone)]
pub struct BookletRequest {
    /// Root directory holding the collection folders
    pub assets_root: PathBuf,
    /// Ordered question selection
    pub picks: Vec<QuestionRef>,
    pub options: BookletOptions,
}

/// A finished booklet: serialized bytes plus the run summary
#[derive(Debug, Clone)]
pub struct BookletArtifact {
    pub bytes: Vec<u8>,
    /// Sanitized `{title}.pdf` name for the download/save step
    pub file_name: String,
    pub statistics: BookletStatistics,
    pub warnings: Vec<BookletWarning>,
}

/// Generate the booklet in memory.
pub async fn generate_booklet(
    request: &BookletRequest,
    events: Option<&UnboundedSender<BookletUpdate>>,
    cancel: &CancelFlag,
) -> Result<BookletArtifact> {
    request.options.validate()?;
    if request.picks.is_empty() {
        return Err(BookletError::NoItems);
    }

    let (prepared, warnings) = prepare_questions(
        &request.assets_root,
        &request.picks,
        &request.options,
        events,
        cancel,
    )
    .await?;
    if prepared.is_empty() {
        for warning in &warnings {
            log::warn!("{}", warning);
        }
        return Err(BookletError::NoItems);
    }
    if cancel.is_cancelled() {
        return Err(BookletError::Cancelled);
    }

    let options = request.options.clone();
    let requested = request.picks.len();
    let (bytes, plan, warnings) =
        tokio::task::spawn_blocking(move || render_document(&prepared, &options, warnings))
            .await??;

    if let Some(events) = events {
        let _ = events.send(BookletUpdate::ContentLaidOut {
            pages: plan.page_count,
            items: plan.placements.len(),
        });
    }

    Ok(BookletArtifact {
        bytes,
        file_name: sanitize_file_name(&request.options.document_title),
        statistics: calculate_statistics(requested, &plan),
        warnings,
    })
}

/// Generate and atomically write the booklet to `output_path`.
pub async fn generate_booklet_to_file(
    request: &BookletRequest,
    output_path: impl AsRef<Path>,
    events: Option<&UnboundedSender<BookletUpdate>>,
    cancel: &CancelFlag,
) -> Result<BookletArtifact> {
    let artifact = generate_booklet(request, events, cancel).await?;
    write_atomic(output_path.as_ref(), &artifact.bytes).await?;
    Ok(artifact)
}

/// Run preparation and layout without rendering a document; returns the
/// statistics and warnings a full run would produce.
pub async fn plan_booklet(
    request: &BookletRequest,
    events: Option<&UnboundedSender<BookletUpdate>>,
    cancel: &CancelFlag,
) -> Result<(BookletStatistics, Vec<BookletWarning>)> {
    request.options.validate()?;
    if request.picks.is_empty() {
        return Err(BookletError::NoItems);
    }

    let (prepared, warnings) = prepare_questions(
        &request.assets_root,
        &request.picks,
        &request.options,
        events,
        cancel,
    )
    .await?;
    if prepared.is_empty() {
        return Err(BookletError::NoItems);
    }

    let geometry = PageGeometry::from_options(&request.options);
    let plan = pack(
        &item_extents(&prepared),
        &geometry,
        request.options.packing_mode,
        request.options.show_citations,
    );
    Ok((calculate_statistics(request.picks.len(), &plan), warnings))
}

fn item_extents(prepared: &[PreparedQuestion]) -> Vec<ItemExtent> {
    prepared
        .iter()
        .map(|q| ItemExtent {
            pixel_width: q.pixel_width,
            pixel_height: q.pixel_height,
        })
        .collect()
}

/// Pack, render, stamp, serialize. Runs on a blocking thread; the prepared
/// items are already ordered and numbered.
fn render_document(
    prepared: &[PreparedQuestion],
    options: &BookletOptions,
    mut warnings: Vec<BookletWarning>,
) -> Result<(Vec<u8>, LayoutPlan, Vec<BookletWarning>)> {
    let geometry = PageGeometry::from_options(options);
    let mut doc = PdfDocument::new(&options.document_title);
    let font = DocumentFont::resolve(&mut doc, &options.font_sources, &mut warnings);

    // Register every embed up front so placements only deal in ids.
    let mut image_ids = Vec::with_capacity(prepared.len());
    for question in prepared {
        let mut image_warnings = Vec::new();
        let raw = RawImage::decode_from_bytes(&question.bytes, &mut image_warnings)
            .map_err(BookletError::Pdf)?;
        image_ids.push(doc.add_image(&raw));
    }

    let plan = pack(
        &item_extents(prepared),
        &geometry,
        options.packing_mode,
        options.show_citations,
    );

    let title = options.document_title.trim();
    let title = (!title.is_empty()).then_some(title);
    let mut pages: Vec<Vec<Op>> = (0..plan.page_count)
        .map(|_| new_page_ops(&geometry, title, &font))
        .collect();
    for placement in &plan.placements {
        let question = &prepared[placement.item_index];
        pages[placement.page - 1].extend(placed_question_ops(
            placement,
            question,
            image_ids[placement.item_index].clone(),
            &geometry,
            &font,
        ));
    }

    // Footers go on only after every page's content exists.
    stamp_footers(&mut pages, &geometry, &font);
    let bytes = serialize(&mut doc, pages, &geometry);
    Ok((bytes, plan, warnings))
}
