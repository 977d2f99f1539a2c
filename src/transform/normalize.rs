// src/transform/normalize.rs
//! Split cleaned articles into relational article / author / link tables.

use std::collections::HashMap;

use crate::model::{Author, AuthorArticle, CleanArticle, NormalizedArticle};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub articles: Vec<NormalizedArticle>,
    pub authors: Vec<Author>,
    pub author_article: Vec<AuthorArticle>,
}

/// Assign dense 1-based ids to articles (row order) and authors (order of
/// first appearance), and link them.
///
/// `article_id` in the link table is the same positional enumeration as
/// `NormalizedArticle::id`. Articles with no authors get no link rows.
pub fn normalize_articles(articles: Vec<CleanArticle>) -> Normalized {
    let mut authors: Vec<Author> = Vec::new();
    let mut author_ids: HashMap<String, u64> = HashMap::new();
    let mut author_article = Vec::new();
    let mut normalized = Vec::with_capacity(articles.len());

    for (idx, a) in articles.into_iter().enumerate() {
        let article_id = idx as u64 + 1;

        for name in a.authors.iter().flatten() {
            let next_id = authors.len() as u64 + 1;
            let author_id = *author_ids.entry(name.clone()).or_insert_with(|| {
                authors.push(Author {
                    id: next_id,
                    author: name.clone(),
                });
                next_id
            });
            author_article.push(AuthorArticle {
                article_id,
                author_id,
            });
        }

        normalized.push(NormalizedArticle {
            id: article_id,
            title: a.title,
            description: a.description,
            source_id: a.source_id,
            published_at: a.published_at,
        });
    }

    Normalized {
        articles: normalized,
        authors,
        author_article,
    }
}
