//! Question-image asset resolution
//!
//! Collections live as folders under a root directory, one per source exam,
//! holding question images named by 2-digit zero-padded number
//! (`{root}/{folder}/{NN}.jpg`). A collection folder is located from its
//! year label: a folder named exactly `{year}` or starting with `{year}_`.

use crate::constants::ASSET_EXTENSIONS;
use crate::types::Result;
use std::path::{Path, PathBuf};

/// One source exam folder resolved under the asset root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Year label the collection was looked up by
    pub year: String,
    /// Folder name under the root
    pub folder: String,
    /// Human-readable citation title (folder name with underscores as spaces)
    pub title: String,
    /// Absolute (or root-relative) folder path
    pub path: PathBuf,
}

/// A collection together with its available question count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub folder: String,
    pub title: String,
    pub question_count: usize,
}

/// Locate the collection folder for a year label.
///
/// When several folders share the year prefix the lexicographically first
/// one wins, so repeated runs resolve identically.
pub async fn find_collection(root: &Path, year: &str) -> Result<Option<Collection>> {
    let mut matches = Vec::new();
    let mut entries = tokio::fs::read_dir(root).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == year || name.starts_with(&format!("{}_", year)) {
            matches.push(name);
        }
    }
    matches.sort();

    Ok(matches.into_iter().next().map(|folder| Collection {
        year: year.to_string(),
        title: folder.replace('_', " "),
        path: root.join(&folder),
        folder,
    }))
}

/// Resolve the image file for a question number, probing the known
/// extensions in order. `None` means the asset is absent.
pub async fn resolve_question(collection: &Collection, number: u32) -> Result<Option<PathBuf>> {
    for ext in ASSET_EXTENSIONS {
        let candidate = collection.path.join(format!("{:02}.{}", number, ext));
        if tokio::fs::try_exists(&candidate).await? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Enumerate all collection folders under the root with their question
/// counts, sorted by folder name.
pub async fn scan_collections(root: &Path) -> Result<Vec<CollectionSummary>> {
    let mut summaries = Vec::new();
    let mut entries = tokio::fs::read_dir(root).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        let folder = entry.file_name().to_string_lossy().into_owned();
        let question_count = count_question_images(&entry.path()).await?;
        summaries.push(CollectionSummary {
            title: folder.replace('_', " "),
            folder,
            question_count,
        });
    }
    summaries.sort_by(|a, b| a.folder.cmp(&b.folder));
    Ok(summaries)
}

async fn count_question_images(path: &Path) -> Result<usize> {
    let mut count = 0;
    let mut entries = tokio::fs::read_dir(path).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_question_image_name(&name) {
            count += 1;
        }
    }
    Ok(count)
}

/// `NN.ext` with a 2-digit number and a known raster extension
fn is_question_image_name(name: &str) -> bool {
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    stem.len() == 2
        && stem.chars().all(|c| c.is_ascii_digit())
        && ASSET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_image_name() {
        assert!(is_question_image_name("01.jpg"));
        assert!(is_question_image_name("40.png"));
        assert!(is_question_image_name("07.JPG"));
        assert!(!is_question_image_name("1.jpg"));
        assert!(!is_question_image_name("001.jpg"));
        assert!(!is_question_image_name("01.txt"));
        assert!(!is_question_image_name("notes"));
    }
}
