// src/load.rs
//! Append-only CSV persistence.
//!
//! The first write to a path creates the file with a header row; later writes
//! append data rows only, with every field quoted. Concurrent writers to the
//! same path are not coordinated.

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use serde::de::DeserializeOwned;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::StorageConfig;
use crate::model::CsvRecord;
use crate::transform::TransformOutput;

/// Append `rows` to `dir/file_name`, creating both if needed.
pub fn append_csv<T: CsvRecord>(dir: &Path, file_name: &str, rows: &[T]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let path = dir.join(file_name);
    let is_new = !path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let quote_style = if is_new {
        QuoteStyle::Necessary
    } else {
        QuoteStyle::Always
    };
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(quote_style)
        .from_writer(file);

    if is_new {
        writer.write_record(T::HEADERS)?;
    }
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len(), "Data saved");
    Ok(path)
}

/// Read every row of a headered CSV file.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("File not found: {}", path.display()))?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .with_context(|| format!("parsing {}", path.display()))
}

/// Persist the five clean tables of one run.
pub fn load_data(out: &TransformOutput, storage: &StorageConfig) -> Result<()> {
    let dir = &storage.clean_dir;
    append_csv(dir, &storage.clean_sources, &out.sources)?;
    append_csv(dir, &storage.clean_sources_articles, &out.sources_articles)?;
    append_csv(dir, &storage.clean_articles, &out.articles)?;
    append_csv(dir, &storage.clean_authors, &out.authors)?;
    append_csv(dir, &storage.clean_author_article, &out.author_article)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Author, Source};

    #[test]
    fn first_write_has_header_then_appends_quoted_rows() {
        let dir = tempfile::tempdir().unwrap();
        let a = vec![Author {
            id: 1,
            author: "Jane Doe".into(),
        }];
        let b = vec![Author {
            id: 1,
            author: "John Smith".into(),
        }];

        append_csv(dir.path(), "authors.csv", &a).unwrap();
        let p = append_csv(dir.path(), "authors.csv", &b).unwrap();

        let text = fs::read_to_string(p).unwrap();
        assert_eq!(text, "id,author\n1,Jane Doe\n\"1\",\"John Smith\"\n");
    }

    #[test]
    fn empty_table_still_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let p = append_csv::<Author>(dir.path().join("nested").as_path(), "a.csv", &[]).unwrap();
        assert_eq!(fs::read_to_string(p).unwrap(), "id,author\n");
    }

    #[test]
    fn appended_rows_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let s = Source {
            id: "abc-news".into(),
            name: Some("ABC News".into()),
            description: Some("Says \"hi\", often".into()),
            url: None,
            category: Some("general".into()),
            language: Some("en".into()),
            country: Some("us".into()),
        };
        append_csv(dir.path(), "s.csv", std::slice::from_ref(&s)).unwrap();
        let p = append_csv(dir.path(), "s.csv", std::slice::from_ref(&s)).unwrap();

        let back: Vec<Source> = read_csv(&p).unwrap();
        assert_eq!(back, vec![s.clone(), s]);
    }

    #[test]
    fn missing_file_names_path() {
        let err = read_csv::<Author>(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("here.csv"));
    }
}
