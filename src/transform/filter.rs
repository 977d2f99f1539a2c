// src/transform/filter.rs
use chrono::NaiveDate;

use crate::dates;
use crate::model::NormalizedArticle;

/// Keep articles published on or after midnight UTC `max_age_days` before
/// `today`. Articles without a timestamp are dropped.
pub fn filter_articles(
    articles: Vec<NormalizedArticle>,
    max_age_days: u32,
    today: NaiveDate,
) -> Vec<NormalizedArticle> {
    let threshold = dates::threshold(today, max_age_days);
    articles
        .into_iter()
        .filter(|a| a.published_at.is_some_and(|t| t >= threshold))
        .collect()
}
