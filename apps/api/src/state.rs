use std::sync::Arc;

use crate::config::Config;
use crate::matching::requirements::RequirementMatcher;
use crate::matching::similarity::{build_scorer, SimilarityScorer};

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is immutable; requests never share mutable data.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable similarity scorer. Default: TfIdfScorer. Swap via SIMILARITY_BACKEND.
    pub scorer: Arc<dyn SimilarityScorer>,
    pub matcher: Arc<RequirementMatcher>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, regex::Error> {
        let matcher = RequirementMatcher::with_skills(config.extra_skills.as_slice())?;
        Ok(AppState {
            scorer: build_scorer(config.similarity_backend),
            matcher: Arc::new(matcher),
            config,
        })
    }
}
