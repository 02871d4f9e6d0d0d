use std::cmp::Ordering;
use std::collections::HashMap;

use crate::corpus::MovieRecord;
use crate::error::{Error, Result};
use crate::tokenizer::tokenize;

/// A sparse vector in the fitted term space: (term index, weight) pairs
/// sorted by term index. Unit length, or empty/zero when nothing matched.
pub type SparseVec = Vec<(usize, f64)>;

/// The fitted vocabulary and IDF weights, plus the normalized TF-IDF vector
/// of every corpus document in ingestion order.
///
/// Immutable after [`TermWeightSpace::fit`]; projecting a query never alters
/// the vocabulary or the document vectors, so one fitted space can be shared
/// read-only across threads. Rebuild it if the corpus changes.
pub struct TermWeightSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    doc_vectors: Vec<SparseVec>,
}

impl TermWeightSpace {
    /// Fit the term-weight space from the `combined_text` of every record.
    ///
    /// Weighting is smoothed IDF `ln((1 + n) / (1 + df)) + 1` over raw term
    /// counts, with each document vector L2-normalized.
    pub fn fit(corpus: &[MovieRecord]) -> Result<Self> {
        if corpus.is_empty() {
            return Err(Error::Input("cannot fit an empty corpus".into()));
        }

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        let mut doc_counts: Vec<HashMap<usize, u32>> = Vec::with_capacity(corpus.len());

        for rec in corpus {
            let mut counts: HashMap<usize, u32> = HashMap::new();
            for term in tokenize(&rec.combined_text) {
                let next_id = vocabulary.len();
                let tid = *vocabulary.entry(term).or_insert(next_id);
                if tid == df.len() {
                    df.push(0);
                }
                let tf = counts.entry(tid).or_insert(0);
                if *tf == 0 {
                    df[tid] += 1;
                }
                *tf += 1;
            }
            doc_counts.push(counts);
        }

        if vocabulary.is_empty() {
            return Err(Error::Vectorization(
                "corpus produced an empty vocabulary".into(),
            ));
        }

        let n = corpus.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let doc_vectors: Vec<SparseVec> = doc_counts
            .iter()
            .map(|counts| weigh_and_normalize(counts, &idf))
            .collect();

        tracing::info!(
            num_docs = corpus.len(),
            num_terms = idf.len(),
            "fitted term-weight space"
        );

        Ok(Self { vocabulary, idf, doc_vectors })
    }

    pub fn num_docs(&self) -> usize {
        self.doc_vectors.len()
    }

    pub fn vocab_size(&self) -> usize {
        self.idf.len()
    }

    /// Project a query into the fitted space. Out-of-vocabulary tokens are
    /// silently dropped; a query with no known tokens maps to the zero
    /// vector, never an error.
    pub fn transform(&self, text: &str) -> SparseVec {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for term in tokenize(text) {
            if let Some(&tid) = self.vocabulary.get(&term) {
                *counts.entry(tid).or_insert(0) += 1;
            }
        }
        weigh_and_normalize(&counts, &self.idf)
    }

    /// Cosine similarity of `query_vec` against every corpus document, in
    /// corpus order, each in [0.0, 1.0]. A zero-magnitude vector on either
    /// side scores 0.0.
    pub fn similarities(&self, query_vec: &SparseVec) -> Vec<f64> {
        self.doc_vectors
            .iter()
            .map(|doc| sparse_dot(query_vec, doc))
            .collect()
    }
}

fn weigh_and_normalize(counts: &HashMap<usize, u32>, idf: &[f64]) -> SparseVec {
    let mut vec: SparseVec = counts
        .iter()
        .map(|(&tid, &tf)| (tid, tf as f64 * idf[tid]))
        .collect();
    let norm = vec.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in vec.iter_mut() {
            *w /= norm;
        }
    }
    vec.sort_by_key(|&(tid, _)| tid);
    vec
}

// Both sides are unit length (or zero), so the dot product is cosine.
fn sparse_dot(a: &SparseVec, b: &SparseVec) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(combined_text: &str) -> MovieRecord {
        MovieRecord {
            title: "t".into(),
            genre: "g".into(),
            description: "d".into(),
            year: 2000,
            rating: 5.0,
            combined_text: combined_text.into(),
        }
    }

    #[test]
    fn query_does_not_grow_vocabulary() {
        let corpus = vec![rec("robots explore mars"), rec("pirates sail oceans")];
        let space = TermWeightSpace::fit(&corpus).unwrap();
        let before = space.vocab_size();
        let v = space.transform("dragons robots dragons");
        assert_eq!(space.vocab_size(), before);
        // only "robots" survives projection
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn document_vectors_are_unit_length() {
        let corpus = vec![rec("robots explore mars"), rec("robots fight robots")];
        let space = TermWeightSpace::fit(&corpus).unwrap();
        for doc in &space.doc_vectors {
            let norm: f64 = doc.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }
}
