// src/transform/mod.rs
//! Transformation phase: clean → normalize → filter → enrich → merge.
//!
//! Stages run strictly in that order. A failure anywhere aborts the whole
//! transform and nothing is persisted for the run.

pub mod authors;
pub mod clean;
pub mod enrich;
pub mod filter;
pub mod merge;
pub mod normalize;

use chrono::NaiveDate;
use tracing::info;

use crate::model::{
    Author, AuthorArticle, CleanSource, NormalizedArticle, RawArticle, Source, SourceArticle,
};
use crate::sentiment::SentimentScorer;

pub use clean::{clean_articles, clean_sources};
pub use enrich::enrich_articles;
pub use filter::filter_articles;
pub use merge::merge_sources_articles;
pub use normalize::{normalize_articles, Normalized};

/// The five tables a run persists.
///
/// `authors` and `author_article` are derived before the age filter, so they
/// can reference article ids that `articles` no longer contains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformOutput {
    pub sources: Vec<CleanSource>,
    pub articles: Vec<NormalizedArticle>,
    pub authors: Vec<Author>,
    pub author_article: Vec<AuthorArticle>,
    pub sources_articles: Vec<SourceArticle>,
}

pub fn transform_data(
    sources: Vec<Source>,
    articles: Vec<RawArticle>,
    max_article_age_days: u32,
    today: NaiveDate,
    scorer: &dyn SentimentScorer,
) -> TransformOutput {
    info!("Starting data transformation process...");

    let cleaned_sources = clean_sources(sources);
    info!(rows = cleaned_sources.len(), "Sources data successfully cleaned.");

    let cleaned_articles = clean_articles(articles);
    info!(rows = cleaned_articles.len(), "Articles data successfully cleaned.");

    let Normalized {
        articles: normalized,
        authors,
        author_article,
    } = normalize_articles(cleaned_articles);
    info!(
        articles = normalized.len(),
        authors = authors.len(),
        links = author_article.len(),
        "Articles data successfully normalised."
    );

    let filtered = filter_articles(normalized, max_article_age_days, today);
    info!(rows = filtered.len(), max_article_age_days, "Articles data successfully filtered.");

    let enriched = enrich_articles(filtered.clone(), scorer);
    info!("Data enriched successfully.");

    let sources_articles = merge_sources_articles(&cleaned_sources, enriched);
    info!(rows = sources_articles.len(), "Data merged successfully.");

    TransformOutput {
        sources: cleaned_sources,
        articles: filtered,
        authors,
        author_article,
        sources_articles,
    }
}
