// src/transform/enrich.rs
use crate::model::{EnrichedArticle, FieldSentiment, NormalizedArticle};
use crate::sentiment::{label_for, SentimentScorer};

/// Score `text` and attach its label.
pub fn field_sentiment(scorer: &dyn SentimentScorer, text: &str) -> FieldSentiment {
    let s = scorer.polarity_scores(text);
    FieldSentiment {
        negative: s.negative,
        neutral: s.neutral,
        positive: s.positive,
        overall: s.compound,
        label: label_for(s.compound),
    }
}

/// Add title and description sentiment to every article; text is kept.
pub fn enrich_articles(
    articles: Vec<NormalizedArticle>,
    scorer: &dyn SentimentScorer,
) -> Vec<EnrichedArticle> {
    articles
        .into_iter()
        .map(|article| EnrichedArticle {
            title_sentiment: field_sentiment(scorer, &article.title),
            description_sentiment: field_sentiment(scorer, &article.description),
            article,
        })
        .collect()
}
