// src/transform/merge.rs
use std::collections::HashMap;

use crate::model::{CleanSource, EnrichedArticle, SourceArticle};

/// Left-join articles to their source on `source_id`.
///
/// Every article appears exactly once; unmatched articles keep `None` in the
/// source-derived columns. The join key itself is not carried over.
pub fn merge_sources_articles(
    sources: &[CleanSource],
    articles: Vec<EnrichedArticle>,
) -> Vec<SourceArticle> {
    let by_id: HashMap<&str, &CleanSource> = sources
        .iter()
        .rev() // first occurrence wins on duplicate ids
        .map(|s| (s.id.as_str(), s))
        .collect();

    articles
        .into_iter()
        .map(|e| {
            let src = e
                .article
                .source_id
                .as_deref()
                .and_then(|id| by_id.get(id).copied());
            let t = e.title_sentiment;
            let d = e.description_sentiment;
            SourceArticle {
                id: e.article.id,
                title: e.article.title,
                description: e.article.description,
                published_at: e.article.published_at,
                sentiment_negative_by_title: t.negative,
                sentiment_neutral_by_title: t.neutral,
                sentiment_positive_by_title: t.positive,
                overall_sentiment_by_title: t.overall,
                sentiment_label_by_title: t.label,
                sentiment_negative_by_description: d.negative,
                sentiment_neutral_by_description: d.neutral,
                sentiment_positive_by_description: d.positive,
                overall_sentiment_by_description: d.overall,
                sentiment_label_by_description: d.label,
                source_name: src.and_then(|s| s.name.clone()),
                source_description: src.and_then(|s| s.description.clone()),
                category: src.and_then(|s| s.category.clone()),
                language: src.and_then(|s| s.language.clone()),
                country: src.and_then(|s| s.country.clone()),
            }
        })
        .collect()
}
