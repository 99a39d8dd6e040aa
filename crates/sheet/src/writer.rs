use anyhow::{Context, Result};
use extract::Record;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub const HEADER: &str = "Given Name,Surname,Relation,Data Position";

const OUTPUT_FILE: &str = "family_records.csv";

/// Appends record batches to a CSV table inside a chosen folder. File
/// creation is idempotent (the header is written once); appending is
/// not, so callers hand a batch over exactly once per user action.
pub struct SheetWriter {
    folder: PathBuf,
}

impl SheetWriter {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.folder.join(OUTPUT_FILE)
    }

    /// Append one batch after the current last row, creating the folder
    /// and the header row first when absent. Returns rows appended.
    pub async fn append_records(&self, records: &[Record]) -> Result<usize> {
        fs::create_dir_all(&self.folder)
            .await
            .context(format!("Failed to create output folder: {:?}", self.folder))?;

        let path = self.output_path();

        if !fs::try_exists(&path).await? {
            fs::write(&path, format!("{HEADER}\n"))
                .await
                .context(format!("Failed to create sheet: {:?}", path))?;
        }

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .await
            .context(format!("Failed to open sheet for append: {:?}", path))?;

        let mut rows = String::new();
        for record in records {
            rows.push_str(&format_row(record));
            rows.push('\n');
        }

        file.write_all(rows.as_bytes())
            .await
            .context(format!("Failed to append to sheet: {:?}", path))?;

        Ok(records.len())
    }
}

fn format_row(record: &Record) -> String {
    format!(
        "{},{},{},{}",
        escape_field(&record.given_name),
        escape_field(&record.surname),
        escape_field(&record.relation),
        record.position
    )
}

/// Quote a field containing a comma, quote, or newline.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
