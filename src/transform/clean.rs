// src/transform/clean.rs
use std::collections::HashSet;

use super::authors::{clean_author_field, KnownSources};
use crate::dates::parse_published_at;
use crate::model::{CleanArticle, CleanSource, RawArticle, Source};

/// Drop duplicate sources by id (first wins) and the `url` column.
pub fn clean_sources(sources: Vec<Source>) -> Vec<CleanSource> {
    let mut seen: HashSet<String> = HashSet::new();
    sources
        .into_iter()
        .filter(|s| seen.insert(s.id.clone()))
        .map(|s| CleanSource {
            id: s.id,
            name: s.name,
            description: s.description,
            category: s.category,
            language: s.language,
            country: s.country,
        })
        .collect()
}

/// Clean raw articles, in order:
/// 1) drop duplicates by `url` (first wins; missing urls count as one value)
/// 2) drop rows missing `title` or `description`
/// 3) parse `publishedAt` (unparseable -> `None`)
/// 4) derive the author list
/// 5) keep only the columns downstream stages use
pub fn clean_articles(articles: Vec<RawArticle>) -> Vec<CleanArticle> {
    let mut seen: HashSet<Option<String>> = HashSet::new();
    let kept: Vec<RawArticle> = articles
        .into_iter()
        .filter(|a| seen.insert(a.url.clone()))
        .filter(|a| a.title.is_some() && a.description.is_some())
        .collect();

    let known = KnownSources::from_names(kept.iter().map(|a| a.source_name.as_deref()));

    kept.into_iter()
        .filter_map(|a| {
            let authors =
                clean_author_field(a.author.as_deref(), a.source_name.as_deref(), &known);
            Some(CleanArticle {
                title: a.title?,
                description: a.description?,
                source_id: a.source_id,
                published_at: a.published_at.as_deref().and_then(parse_published_at),
                authors,
            })
        })
        .collect()
}
