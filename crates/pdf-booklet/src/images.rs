//! Image preparation pipeline
//!
//! Resolves each selected question to an image file, decodes it for its
//! intrinsic dimensions, and optionally re-encodes it as JPEG for a smaller
//! embed. Decoding is CPU-bound and runs across blocking tasks; results are
//! joined strictly in input order so the renderer sees the selection order.

use crate::assets::{self, Collection};
use crate::booklet::BookletUpdate;
use crate::options::BookletOptions;
use crate::types::*;
use image::codecs::jpeg::JpegEncoder;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// One renderable question: metadata plus embeddable image bytes.
/// Immutable once handed to layout and rendering.
#[derive(Debug, Clone)]
pub struct PreparedQuestion {
    pub year: String,
    /// 1-based question number in the source exam
    pub source_number: u32,
    /// 1-based renumbered position in the output
    pub display_number: u32,
    /// Citation title of the source collection
    pub source_title: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// JPEG re-encode or the original file bytes, ready for embedding
    pub bytes: Vec<u8>,
}

/// Per-pick outcome before display numbers are assigned
enum Outcome {
    Prepared {
        source_title: String,
        pixel_width: u32,
        pixel_height: u32,
        bytes: Vec<u8>,
    },
    Skipped,
}

/// Resolve, decode, and renumber the whole selection.
///
/// Missing or unreadable assets become warnings and are skipped; the
/// numbering policy decides whether they still consume a display number.
pub(crate) async fn prepare_questions(
    root: &Path,
    picks: &[QuestionRef],
    options: &BookletOptions,
    events: Option<&UnboundedSender<BookletUpdate>>,
    cancel: &CancelFlag,
) -> Result<(Vec<PreparedQuestion>, Vec<BookletWarning>)> {
    let mut warnings = Vec::new();

    // Resolve each distinct year once, keeping the warning per year too.
    let mut collections: BTreeMap<String, Option<Collection>> = BTreeMap::new();
    for pick in picks {
        if !collections.contains_key(&pick.year) {
            let found = assets::find_collection(root, &pick.year).await?;
            if found.is_none() {
                warnings.push(BookletWarning::CollectionNotFound {
                    year: pick.year.clone(),
                });
            }
            collections.insert(pick.year.clone(), found);
        }
    }

    // Fan the decode work out across blocking tasks, one per resolvable pick.
    type DecodeResult = std::result::Result<(u32, u32, Vec<u8>), String>;
    let mut tasks: Vec<(Option<String>, Option<JoinHandle<DecodeResult>>)> =
        Vec::with_capacity(picks.len());
    for pick in picks {
        let collection = collections.get(&pick.year).and_then(|c| c.as_ref());
        let Some(collection) = collection else {
            tasks.push((None, None));
            continue;
        };
        let Some(path) = assets::resolve_question(collection, pick.number).await? else {
            warnings.push(BookletWarning::AssetNotFound {
                year: pick.year.clone(),
                number: pick.number,
            });
            tasks.push((None, None));
            continue;
        };

        let raw = tokio::fs::read(&path).await?;
        let compress = options.compress_images;
        let quality = options.jpeg_quality;
        let handle =
            tokio::task::spawn_blocking(move || prepare_image_bytes(raw, compress, quality));
        tasks.push((Some(collection.title.clone()), Some(handle)));
    }

    // Join in input order; this is where per-item cancellation and progress
    // reporting happen.
    let total = picks.len();
    let mut outcomes = Vec::with_capacity(total);
    for (processed, ((title, handle), pick)) in tasks.into_iter().zip(picks).enumerate() {
        if cancel.is_cancelled() {
            return Err(BookletError::Cancelled);
        }

        let outcome = match handle {
            None => Outcome::Skipped,
            Some(handle) => match handle.await? {
                Ok((pixel_width, pixel_height, bytes)) => Outcome::Prepared {
                    source_title: title.unwrap_or_default(),
                    pixel_width,
                    pixel_height,
                    bytes,
                },
                Err(reason) => {
                    log::warn!("skipping {} Q{}: {}", pick.year, pick.number, reason);
                    warnings.push(BookletWarning::UnreadableImage {
                        year: pick.year.clone(),
                        number: pick.number,
                        reason,
                    });
                    Outcome::Skipped
                }
            },
        };
        outcomes.push(outcome);

        if let Some(events) = events {
            let _ = events.send(BookletUpdate::Progress {
                processed: processed + 1,
                total,
            });
        }
    }

    // Renumbering pass over the ordered outcomes.
    let prepared_flags: Vec<bool> = outcomes
        .iter()
        .map(|o| matches!(o, Outcome::Prepared { .. }))
        .collect();
    let numbers = assign_display_numbers(&prepared_flags, options.numbering);

    let mut prepared = Vec::new();
    for ((outcome, number), pick) in outcomes.into_iter().zip(numbers).zip(picks) {
        if let Outcome::Prepared {
            source_title,
            pixel_width,
            pixel_height,
            bytes,
        } = outcome
        {
            prepared.push(PreparedQuestion {
                year: pick.year.clone(),
                source_number: pick.number,
                display_number: number.expect("prepared items always get a number"),
                source_title,
                pixel_width,
                pixel_height,
                bytes,
            });
        }
    }

    Ok((prepared, warnings))
}

/// Assign display numbers over the ordered prepared/skipped flags.
///
/// `Contiguous` numbers only the prepared items (no gaps in print);
/// `CountSkipped` advances the counter for every pick, reproducing the
/// source numbering gaps.
fn assign_display_numbers(prepared: &[bool], policy: NumberingPolicy) -> Vec<Option<u32>> {
    let mut next = 1u32;
    prepared
        .iter()
        .map(|&ok| match policy {
            NumberingPolicy::Contiguous => {
                if ok {
                    let n = next;
                    next += 1;
                    Some(n)
                } else {
                    None
                }
            }
            NumberingPolicy::CountSkipped => {
                let n = next;
                next += 1;
                ok.then_some(n)
            }
        })
        .collect()
}

/// Decode for dimensions and optionally re-encode as JPEG.
///
/// Errors are strings so the caller can turn them into per-item warnings
/// rather than aborting the run.
fn prepare_image_bytes(
    raw: Vec<u8>,
    compress: bool,
    quality: u8,
) -> std::result::Result<(u32, u32, Vec<u8>), String> {
    let img = image::load_from_memory(&raw).map_err(|e| e.to_string())?;
    let (width, height) = (img.width(), img.height());

    if !compress {
        return Ok((width, height, raw));
    }

    // Lossy re-encode wants a plain 3-channel image.
    let rgb = img.to_rgb8();
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, quality)
        .encode(
            rgb.as_raw(),
            width,
            height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| e.to_string())?;
    Ok((width, height, encoded))
}
