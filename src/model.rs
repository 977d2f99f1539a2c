// src/model.rs
//! Row types for every table the pipeline reads, derives or persists.
//!
//! All tables are batch-scoped: they are rebuilt from scratch on each run and
//! only ever appended to storage. Surrogate ids (`NormalizedArticle::id`,
//! `Author::id`) restart at 1 every run, so they are not unique across runs;
//! join on `url` / author name when cross-run identity matters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row type that can be appended to a CSV table.
///
/// `HEADERS` must list the serialized field names in declaration order; it is
/// written explicitly so that an empty batch still produces a header row.
pub trait CsvRecord: Serialize {
    const HEADERS: &'static [&'static str];
}

/// A news publisher as returned by the sources endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl CsvRecord for Source {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "url",
        "category",
        "language",
        "country",
    ];
}

/// Source after cleaning: deduplicated by id, `url` dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanSource {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

impl CsvRecord for CleanSource {
    const HEADERS: &'static [&'static str] =
        &["id", "name", "description", "category", "language", "country"];
}

/// Article with the nested `source` object flattened to `source_id` / `source_name`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawArticle {
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub content: Option<String>,
    pub source_id: Option<String>,
    pub source_name: Option<String>,
}

impl CsvRecord for RawArticle {
    const HEADERS: &'static [&'static str] = &[
        "author",
        "title",
        "description",
        "url",
        "urlToImage",
        "publishedAt",
        "content",
        "source_id",
        "source_name",
    ];
}

/// Article after cleaning. Title and description are guaranteed present.
///
/// `authors` is `None` only when the raw author was empty and the article had
/// no source name to fall back to.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanArticle {
    pub title: String,
    pub description: String,
    pub source_id: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub authors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedArticle {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub source_id: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl CsvRecord for NormalizedArticle {
    const HEADERS: &'static [&'static str] =
        &["id", "title", "description", "source_id", "published_at"];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub id: u64,
    pub author: String,
}

impl CsvRecord for Author {
    const HEADERS: &'static [&'static str] = &["id", "author"];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorArticle {
    pub article_id: u64,
    pub author_id: u64,
}

impl CsvRecord for AuthorArticle {
    const HEADERS: &'static [&'static str] = &["article_id", "author_id"];
}

/// Categorical sentiment derived from a compound score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// Sentiment columns computed for one text field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSentiment {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub overall: f64,
    pub label: SentimentLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedArticle {
    pub article: NormalizedArticle,
    pub title_sentiment: FieldSentiment,
    pub description_sentiment: FieldSentiment,
}

/// Final merged view: enriched article left-joined with its source.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceArticle {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
    pub sentiment_negative_by_title: f64,
    pub sentiment_neutral_by_title: f64,
    pub sentiment_positive_by_title: f64,
    pub overall_sentiment_by_title: f64,
    pub sentiment_label_by_title: SentimentLabel,
    pub sentiment_negative_by_description: f64,
    pub sentiment_neutral_by_description: f64,
    pub sentiment_positive_by_description: f64,
    pub overall_sentiment_by_description: f64,
    pub sentiment_label_by_description: SentimentLabel,
    pub source_name: Option<String>,
    pub source_description: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

impl CsvRecord for SourceArticle {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "published_at",
        "sentiment_negative_by_title",
        "sentiment_neutral_by_title",
        "sentiment_positive_by_title",
        "overall_sentiment_by_title",
        "sentiment_label_by_title",
        "sentiment_negative_by_description",
        "sentiment_neutral_by_description",
        "sentiment_positive_by_description",
        "overall_sentiment_by_description",
        "sentiment_label_by_description",
        "source_name",
        "source_description",
        "category",
        "language",
        "country",
    ];
}
