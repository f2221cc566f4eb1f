//! Similarity scoring: pluggable, trait-based scorer comparing a resume with a job description.
//!
//! Default: `TfIdfScorer` (TF-IDF over the two-document corpus + cosine similarity).
//! Alternative: `OverlapScorer` (share of job-description words present in the resume).
//!
//! `AppState` holds an `Arc<dyn SimilarityScorer>`, picked at startup via `SIMILARITY_BACKEND`.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::matching::tokenizer::content_tokens;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The similarity scorer trait. Implementations are stateless after construction,
/// so one instance is shared across all requests.
pub trait SimilarityScorer: Send + Sync {
    /// Returns a match score in `[0, 100]`.
    fn compute_similarity(&self, resume_text: &str, job_text: &str) -> f64;

    /// Short backend label, surfaced in logs and reports.
    fn backend(&self) -> &'static str;
}

/// Backend selector parsed from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimilarityBackend {
    #[default]
    TfIdf,
    Overlap,
}

impl FromStr for SimilarityBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tfidf" | "tf-idf" => Ok(SimilarityBackend::TfIdf),
            "overlap" => Ok(SimilarityBackend::Overlap),
            other => Err(format!(
                "unknown similarity backend '{other}' (expected 'tfidf' or 'overlap')"
            )),
        }
    }
}

impl fmt::Display for SimilarityBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityBackend::TfIdf => f.write_str("tfidf"),
            SimilarityBackend::Overlap => f.write_str("overlap"),
        }
    }
}

/// Builds the shared scorer for the configured backend.
pub fn build_scorer(backend: SimilarityBackend) -> Arc<dyn SimilarityScorer> {
    match backend {
        SimilarityBackend::TfIdf => Arc::new(TfIdfScorer),
        SimilarityBackend::Overlap => Arc::new(OverlapScorer),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// TfIdfScorer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// TF-IDF cosine scorer over the corpus formed by exactly the two submitted documents.
///
/// Algorithm:
/// 1. Tokenize both documents, drop stop words, build the joint vocabulary.
/// 2. weight = raw count × idf, with idf = ln((1 + N) / (1 + df)) + 1 and N = 2.
/// 3. cosine = dot(v1, v2) / (‖v1‖ · ‖v2‖), 0 when either vector is zero.
/// 4. score = cosine × 100, clamped into [0, 100].
pub struct TfIdfScorer;

const CORPUS_SIZE: f64 = 2.0;

impl SimilarityScorer for TfIdfScorer {
    fn compute_similarity(&self, resume_text: &str, job_text: &str) -> f64 {
        let resume_counts = term_counts(resume_text);
        let job_counts = term_counts(job_text);

        if resume_counts.is_empty() || job_counts.is_empty() {
            return 0.0;
        }

        // Sorted joint vocabulary keeps the summation order independent of argument order.
        let vocabulary: BTreeMap<&str, (f64, f64)> = resume_counts
            .keys()
            .chain(job_counts.keys())
            .map(|term| {
                let r = resume_counts.get(term).copied().unwrap_or(0.0);
                let j = job_counts.get(term).copied().unwrap_or(0.0);
                (term.as_str(), (r, j))
            })
            .collect();

        let mut dot = 0.0_f64;
        let mut resume_sq = 0.0_f64;
        let mut job_sq = 0.0_f64;

        for (r_count, j_count) in vocabulary.values() {
            let df = f64::from(u8::from(*r_count > 0.0) + u8::from(*j_count > 0.0));
            let idf = ((1.0 + CORPUS_SIZE) / (1.0 + df)).ln() + 1.0;
            let r = r_count * idf;
            let j = j_count * idf;
            dot += r * j;
            resume_sq += r * r;
            job_sq += j * j;
        }

        let magnitude = resume_sq.sqrt() * job_sq.sqrt();
        if magnitude == 0.0 {
            return 0.0;
        }

        (dot / magnitude * 100.0).clamp(0.0, 100.0)
    }

    fn backend(&self) -> &'static str {
        "tfidf"
    }
}

fn term_counts(text: &str) -> BTreeMap<String, f64> {
    let mut counts = BTreeMap::new();
    for token in content_tokens(text) {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }
    counts
}

// ────────────────────────────────────────────────────────────────────────────
// OverlapScorer — word-set overlap
// ────────────────────────────────────────────────────────────────────────────

/// Share of distinct job-description words (lowercased, whitespace-split) that also
/// appear in the resume. Not symmetric: the job description is the reference.
pub struct OverlapScorer;

impl SimilarityScorer for OverlapScorer {
    fn compute_similarity(&self, resume_text: &str, job_text: &str) -> f64 {
        let resume_lower = resume_text.to_lowercase();
        let job_lower = job_text.to_lowercase();
        let resume_words: HashSet<&str> = resume_lower.split_whitespace().collect();
        let job_words: HashSet<&str> = job_lower.split_whitespace().collect();

        let shared = resume_words.intersection(&job_words).count();
        shared as f64 / job_words.len().max(1) as f64 * 100.0
    }

    fn backend(&self) -> &'static str {
        "overlap"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RESUME: &str = "Backend engineer with Python, Docker and PostgreSQL. \
        Built distributed data pipelines and REST services.";
    const JOB: &str = "We are hiring a backend engineer to build REST services in Python. \
        Docker and Kubernetes experience required.";

    fn tfidf(a: &str, b: &str) -> f64 {
        TfIdfScorer.compute_similarity(a, b)
    }

    #[test]
    fn test_empty_document_scores_zero() {
        assert_eq!(tfidf("", "anything at all"), 0.0);
        assert_eq!(tfidf("anything at all", ""), 0.0);
        assert_eq!(tfidf("", ""), 0.0);
    }

    #[test]
    fn test_stop_word_only_documents_score_zero() {
        assert_eq!(tfidf("the a an", "the a an"), 0.0);
        assert_eq!(tfidf("   ", "python engineer"), 0.0);
    }

    #[test]
    fn test_identical_documents_score_100() {
        let score = tfidf(JOB, JOB);
        assert!(score >= 99.99, "Expected ≈100, got {score}");
        assert!(score <= 100.0);
    }

    #[test]
    fn test_disjoint_documents_score_zero() {
        assert_eq!(tfidf("rust compiler internals", "marketing budget forecast"), 0.0);
    }

    #[test]
    fn test_related_documents_score_between_bounds() {
        let score = tfidf(RESUME, JOB);
        assert!(score > 0.0 && score < 100.0, "got {score}");
    }

    #[test]
    fn test_similarity_is_symmetric() {
        assert_eq!(tfidf(RESUME, JOB), tfidf(JOB, RESUME));
    }

    #[test]
    fn test_case_does_not_affect_score() {
        assert_eq!(tfidf("PYTHON Docker", JOB), tfidf("python docker", JOB));
    }

    #[test]
    fn test_adding_shared_vocabulary_increases_score() {
        let job = "rust engineer building distributed systems";
        let base = tfidf("rust engineer", job);
        let more = tfidf("rust engineer distributed", job);
        let all = tfidf("rust engineer distributed building systems", job);
        assert!(more >= base, "{more} < {base}");
        assert!(all >= more, "{all} < {more}");
        assert!(all >= 99.99);
    }

    #[test]
    fn test_overlap_scorer_uses_job_words_as_reference() {
        let score = OverlapScorer.compute_similarity("python docker rust", "python docker java sql");
        assert!((score - 50.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_overlap_scorer_empty_job_is_zero() {
        assert_eq!(OverlapScorer.compute_similarity("python", ""), 0.0);
    }

    #[test]
    fn test_backend_labels() {
        assert_eq!(build_scorer(SimilarityBackend::TfIdf).backend(), "tfidf");
        assert_eq!(build_scorer(SimilarityBackend::Overlap).backend(), "overlap");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("TFIDF".parse::<SimilarityBackend>(), Ok(SimilarityBackend::TfIdf));
        assert_eq!(" overlap ".parse::<SimilarityBackend>(), Ok(SimilarityBackend::Overlap));
        assert!("bm25".parse::<SimilarityBackend>().is_err());
        assert_eq!(SimilarityBackend::default().to_string(), "tfidf");
    }

    fn words() -> impl Strategy<Value = String> {
        proptest::collection::vec("[a-zA-Z]{1,10}", 0..40).prop_map(|w| w.join(" "))
    }

    proptest! {
        #[test]
        fn prop_tfidf_symmetric_and_bounded(a in words(), b in words()) {
            let ab = tfidf(&a, &b);
            let ba = tfidf(&b, &a);
            prop_assert_eq!(ab, ba);
            prop_assert!((0.0..=100.0).contains(&ab));
        }

        #[test]
        fn prop_tfidf_identity_is_100(a in words()) {
            prop_assume!(!content_tokens(&a).is_empty());
            let score = tfidf(&a, &a);
            prop_assert!(score >= 99.9, "identity scored {}", score);
        }

        #[test]
        fn prop_overlap_bounded(a in words(), b in words()) {
            let score = OverlapScorer.compute_similarity(&a, &b);
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
