use crate::types::{BookletError, QuestionRef, Result};
use std::path::Path;

/// Load an ordered selection list from a headerless CSV file with
/// `year,question` rows. Row order is output order.
pub async fn load_selection_csv(path: impl AsRef<Path>) -> Result<Vec<QuestionRef>> {
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;

    let picks = tokio::task::spawn_blocking(move || {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(contents.as_bytes());
        let mut picks = Vec::new();

        for (row, result) in reader.records().enumerate() {
            let record = result?;
            if record.is_empty() || (record.len() == 1 && record[0].is_empty()) {
                continue;
            }
            if record.len() < 2 {
                return Err(BookletError::Config(format!(
                    "selection row {} needs year and question columns",
                    row + 1
                )));
            }
            let year = record[0].to_string();
            let number: u32 = record[1].parse().map_err(|_| {
                BookletError::Config(format!(
                    "selection row {}: invalid question number '{}'",
                    row + 1,
                    &record[1]
                ))
            })?;
            if number == 0 {
                return Err(BookletError::Config(format!(
                    "selection row {}: question numbers are 1-based",
                    row + 1
                )));
            }
            picks.push(QuestionRef { year, number });
        }
        Ok::<_, BookletError>(picks)
    })
    .await??;

    Ok(picks)
}
