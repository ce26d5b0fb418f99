//! Document similarity: TF-IDF cosine over the two texts plus set measures
//! over the extracted keywords, blended into a single score.
//!
//! The TF-IDF corpus is exactly the two documents being compared. Term
//! frequency is normalized by the document's maximum frequency and
//! `idf = ln((N + 1) / (df + 1)) + 1` with N = 2, so terms shared by both
//! documents still contribute.

use crate::processing::normalizer::TextNormalizer;
use std::collections::{HashMap, HashSet};

const COSINE_WEIGHT: f64 = 0.3;
const JACCARD_WEIGHT: f64 = 0.3;
const OVERLAP_WEIGHT: f64 = 0.4;

pub struct SimilarityEngine {
    normalizer: TextNormalizer,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityEngine {
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
        }
    }

    /// Cosine similarity of TF-IDF vectors over the stopword-filtered tokens
    /// of the two texts. Returns 0.0 when either vector has zero magnitude.
    pub fn cosine_similarity(&self, text1: &str, text2: &str) -> f64 {
        let tokens1 = self
            .normalizer
            .remove_stop_words(self.normalizer.tokenize(text1));
        let tokens2 = self
            .normalizer
            .remove_stop_words(self.normalizer.tokenize(text2));

        let vec1 = tf_idf_vector(&tokens1, &[&tokens1, &tokens2]);
        let vec2 = tf_idf_vector(&tokens2, &[&tokens1, &tokens2]);

        cosine(&vec1, &vec2)
    }

    /// Blend of cosine similarity over the raw texts and Jaccard/overlap over
    /// the keyword sets, weighted 0.3/0.3/0.4 and capped at 1.0.
    pub fn weighted_similarity(
        &self,
        resume_text: &str,
        job_text: &str,
        resume_keywords: &[String],
        job_keywords: &[String],
    ) -> f64 {
        let cosine_sim = self.cosine_similarity(resume_text, job_text);

        let resume_set: HashSet<String> = resume_keywords.iter().map(|k| k.to_lowercase()).collect();
        let job_set: HashSet<String> = job_keywords.iter().map(|k| k.to_lowercase()).collect();

        let jaccard_sim = jaccard_similarity(&resume_set, &job_set);
        let overlap_coef = overlap_coefficient(&resume_set, &job_set);

        let weighted = cosine_sim * COSINE_WEIGHT
            + jaccard_sim * JACCARD_WEIGHT
            + overlap_coef * OVERLAP_WEIGHT;

        weighted.min(1.0)
    }
}

/// Intersection over union; 0.0 when both sets are empty.
pub fn jaccard_similarity(set1: &HashSet<String>, set2: &HashSet<String>) -> f64 {
    let intersection = set1.intersection(set2).count();
    let union = set1.union(set2).count();

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}

/// Intersection over the smaller set; 0.0 when either set is empty.
pub fn overlap_coefficient(set1: &HashSet<String>, set2: &HashSet<String>) -> f64 {
    let min_size = set1.len().min(set2.len());
    if min_size == 0 {
        return 0.0;
    }

    let intersection = set1.intersection(set2).count();
    intersection as f64 / min_size as f64
}

fn tf_idf_vector(tokens: &[String], all_documents: &[&Vec<String>]) -> HashMap<String, f64> {
    let tf = term_frequency(tokens);
    let num_docs = all_documents.len() as f64;

    let mut tfidf = HashMap::with_capacity(tf.len());

    for (term, tf_value) in tf {
        let docs_with_term = all_documents
            .iter()
            .filter(|doc| doc.contains(&term))
            .count() as f64;
        let idf_value = ((num_docs + 1.0) / (docs_with_term + 1.0)).ln() + 1.0;
        tfidf.insert(term, tf_value * idf_value);
    }

    tfidf
}

fn term_frequency(tokens: &[String]) -> HashMap<String, f64> {
    let mut counts: HashMap<String, f64> = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0.0) += 1.0;
    }

    let max_freq = counts.values().fold(1.0_f64, |acc, &v| acc.max(v));
    for value in counts.values_mut() {
        *value /= max_freq;
    }

    counts
}

fn cosine(vec1: &HashMap<String, f64>, vec2: &HashMap<String, f64>) -> f64 {
    let mut dot_product = 0.0;

    for (term, v1) in vec1 {
        if let Some(v2) = vec2.get(term) {
            dot_product += v1 * v2;
        }
    }

    let magnitude1 = vec1.values().map(|v| v * v).sum::<f64>().sqrt();
    let magnitude2 = vec2.values().map(|v| v * v).sum::<f64>().sqrt();

    if magnitude1 == 0.0 || magnitude2 == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude1 * magnitude2)
}
