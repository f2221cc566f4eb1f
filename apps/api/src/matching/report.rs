//! Merges the similarity score and the requirement gap report into one response.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::matching::requirements::{RequirementGap, RequirementMatcher};
use crate::matching::similarity::SimilarityScorer;

pub const COMPARISON_COMPLETE: &str = "Comparison complete.";

/// Full comparison result. Returned as-is by the details endpoint; the
/// standard endpoints narrow it to `CompareResponse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// 0.0 – 100.0
    pub match_score: f64,
    pub missing_requirements: Vec<String>,
    pub matched_requirements: Vec<String>,
    pub scorer_backend: String,
}

impl MatchReport {
    /// "73.42%"
    pub fn formatted_score(&self) -> String {
        format!("{:.2}%", self.match_score)
    }
}

/// Wire shape returned by every comparison endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    pub match_score: String,
    pub missing_requirements: Vec<String>,
    pub message: String,
}

impl From<MatchReport> for CompareResponse {
    fn from(report: MatchReport) -> Self {
        CompareResponse {
            match_score: report.formatted_score(),
            missing_requirements: report.missing_requirements,
            message: COMPARISON_COMPLETE.to_string(),
        }
    }
}

/// Runs the scorer and the matcher independently over the two documents.
pub fn compare_documents(
    scorer: &dyn SimilarityScorer,
    matcher: &RequirementMatcher,
    resume_text: &str,
    job_text: &str,
) -> MatchReport {
    let match_score = scorer.compute_similarity(resume_text, job_text);
    let RequirementGap {
        missing: missing_requirements,
        matched: matched_requirements,
    } = matcher.gap(job_text, resume_text);

    debug!(
        resume_chars = resume_text.len(),
        job_chars = job_text.len(),
        ?missing_requirements,
        ?matched_requirements,
        "Requirement extraction finished"
    );
    info!(
        backend = scorer.backend(),
        score = match_score,
        missing = missing_requirements.len(),
        "Comparison complete"
    );

    MatchReport {
        match_score,
        missing_requirements,
        matched_requirements,
        scorer_backend: scorer.backend().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::similarity::{OverlapScorer, TfIdfScorer};
    use pretty_assertions::assert_eq;

    const JOB: &str = "Requires a Master's degree and 5+ years experience with Python and Docker.";
    const RESUME: &str = "Bachelor's degree, 3 years experience with Python.";

    fn report(match_score: f64) -> MatchReport {
        MatchReport {
            match_score,
            missing_requirements: vec![],
            matched_requirements: vec![],
            scorer_backend: "tfidf".to_string(),
        }
    }

    #[test]
    fn test_formatted_score_two_decimals() {
        assert_eq!(report(73.4219).formatted_score(), "73.42%");
        assert_eq!(report(0.0).formatted_score(), "0.00%");
        assert_eq!(report(100.0).formatted_score(), "100.00%");
    }

    #[test]
    fn test_compare_documents_merges_both_components() {
        let matcher = RequirementMatcher::new().unwrap();
        let report = compare_documents(&TfIdfScorer, &matcher, RESUME, JOB);

        assert!(report.match_score > 0.0 && report.match_score < 100.0);
        assert_eq!(report.scorer_backend, "tfidf");
        assert_eq!(report.matched_requirements, vec!["Python"]);
        let mut missing = report.missing_requirements.clone();
        missing.sort();
        assert_eq!(missing, vec!["5+ years experience", "Docker", "Master's Degree"]);
    }

    #[test]
    fn test_compare_documents_empty_inputs() {
        let matcher = RequirementMatcher::new().unwrap();
        let report = compare_documents(&OverlapScorer, &matcher, "", "");
        assert_eq!(report.match_score, 0.0);
        assert!(report.missing_requirements.is_empty());
        assert_eq!(report.scorer_backend, "overlap");
    }

    #[test]
    fn test_compare_response_wire_shape() {
        let mut r = report(73.4219);
        r.missing_requirements = vec!["Docker".to_string()];
        let response = CompareResponse::from(r);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "match_score": "73.42%",
                "missing_requirements": ["Docker"],
                "message": "Comparison complete."
            })
        );
    }
}
