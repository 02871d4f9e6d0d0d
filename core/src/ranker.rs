use serde::Serialize;

use crate::corpus::MovieRecord;
use crate::error::{Error, Result};
use crate::tfidf::TermWeightSpace;

/// One recommended movie, alive only for the duration of a query response.
/// `score` is rounded to 4 decimal digits for display.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredResult {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub rating: f64,
    pub score: f64,
}

/// Score every corpus record against `query` and return the `top_n` best.
///
/// `score = alpha * similarity + (1 - alpha) * rating / 10`. `alpha` is not
/// range-checked: values outside [0, 1] are accepted and produce a
/// well-defined but possibly non-monotonic blend. Ties keep their original
/// corpus order (the sort is stable), and a `top_n` beyond the corpus size
/// returns the whole corpus, ranked.
pub fn recommend(
    space: &TermWeightSpace,
    corpus: &[MovieRecord],
    query: &str,
    top_n: i64,
    alpha: f64,
) -> Result<Vec<ScoredResult>> {
    if top_n <= 0 {
        return Err(Error::Config(format!(
            "top_n must be positive, got {top_n}"
        )));
    }

    let query_vec = space.transform(query);
    let similarities = space.similarities(&query_vec);

    let mut scored: Vec<(usize, f64)> = similarities
        .iter()
        .zip(corpus)
        .enumerate()
        .map(|(idx, (sim, rec))| (idx, alpha * sim + (1.0 - alpha) * rec.rating / 10.0))
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    tracing::debug!(query, candidates = scored.len(), "scored corpus");

    Ok(scored
        .into_iter()
        .take(top_n as usize)
        .map(|(idx, score)| {
            let rec = &corpus[idx];
            ScoredResult {
                title: rec.title.clone(),
                year: rec.year,
                genre: rec.genre.clone(),
                rating: rec.rating,
                score: round4(score),
            }
        })
        .collect())
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
