//! Requirement Matcher — extracts discrete requirement tokens (degree, experience, skills)
//! from free text and reports which job requirements the resume does not cover.
//!
//! Extraction is a declarative rule table: every rule runs independently over the text
//! and all emitted tokens are unioned. Extending the vocabulary means adding rules.

use std::collections::BTreeSet;

use regex::Regex;

/// Set of normalized requirement tokens extracted from one document.
pub type RequirementSet = BTreeSet<String>;

/// Skill keywords recognised out of the box.
pub const DEFAULT_SKILLS: &[&str] = &["python", "docker", "react", "sql", "tensorflow", "java"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementCategory {
    Degree,
    Experience,
    Skill,
}

/// How a rule turns a match into a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenProducer {
    /// Emit a fixed label once if the pattern matches anywhere.
    Label(String),
    /// Emit every matched substring (whitespace collapsed).
    MatchedText,
}

#[derive(Debug, Clone)]
pub struct RequirementRule {
    pub category: RequirementCategory,
    pub pattern: Regex,
    pub producer: TokenProducer,
}

impl RequirementRule {
    fn new(
        category: RequirementCategory,
        pattern: &str,
        producer: TokenProducer,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            category,
            pattern: Regex::new(pattern)?,
            producer,
        })
    }

    /// Substring skill rule: case-insensitive, no word boundaries.
    fn skill(keyword: &str) -> Result<Self, regex::Error> {
        Self::new(
            RequirementCategory::Skill,
            &format!("(?i){}", regex::escape(keyword)),
            TokenProducer::Label(capitalize(keyword)),
        )
    }

    /// Adds every token this rule produces for `text` to `out`.
    pub fn apply(&self, text: &str, out: &mut RequirementSet) {
        match &self.producer {
            TokenProducer::Label(label) => {
                if self.pattern.is_match(text) {
                    out.insert(label.clone());
                }
            }
            TokenProducer::MatchedText => {
                for m in self.pattern.find_iter(text) {
                    out.insert(collapse_whitespace(m.as_str()));
                }
            }
        }
    }
}

/// Rule-based requirement extractor. Immutable after construction; share it via `Arc`.
#[derive(Debug, Clone)]
pub struct RequirementMatcher {
    rules: Vec<RequirementRule>,
}

impl RequirementMatcher {
    /// Builds the built-in rule table: two degree rules, the experience-duration rule
    /// and one rule per entry of `DEFAULT_SKILLS`.
    pub fn new() -> Result<Self, regex::Error> {
        let mut rules = vec![
            RequirementRule::new(
                RequirementCategory::Degree,
                r"(?i)\bmaster['’]?s\b",
                TokenProducer::Label("Master's Degree".to_string()),
            )?,
            RequirementRule::new(
                RequirementCategory::Degree,
                r"(?i)\bbachelor['’]?s\b",
                TokenProducer::Label("Bachelor's Degree".to_string()),
            )?,
            RequirementRule::new(
                RequirementCategory::Experience,
                r"(?i)\d+\+?\s+years?\s+(?:of\s+)?(?:experience|exp)",
                TokenProducer::MatchedText,
            )?,
        ];
        for skill in DEFAULT_SKILLS {
            rules.push(RequirementRule::skill(skill)?);
        }
        Ok(Self { rules })
    }

    /// Built-in table plus additional skill keywords. Keywords already covered
    /// (case-insensitively) and blank entries are ignored.
    pub fn with_skills<S: AsRef<str>>(extra: &[S]) -> Result<Self, regex::Error> {
        let mut matcher = Self::new()?;
        let mut known: BTreeSet<String> =
            DEFAULT_SKILLS.iter().map(|s| s.to_lowercase()).collect();

        for skill in extra {
            let skill = skill.as_ref().trim();
            if skill.is_empty() || !known.insert(skill.to_lowercase()) {
                continue;
            }
            matcher.rules.push(RequirementRule::skill(skill)?);
        }
        Ok(matcher)
    }

    /// Number of rules in one category.
    pub fn rule_count(&self, category: RequirementCategory) -> usize {
        self.rules.iter().filter(|r| r.category == category).count()
    }

    /// Union of the tokens produced by every rule.
    pub fn extract_requirements(&self, text: &str) -> RequirementSet {
        let mut found = RequirementSet::new();
        for rule in &self.rules {
            rule.apply(text, &mut found);
        }
        found
    }

    /// Extracts each document once and splits the job requirements into
    /// missing (job − resume) and matched (job ∩ resume).
    pub fn gap(&self, job_text: &str, resume_text: &str) -> RequirementGap {
        let job = self.extract_requirements(job_text);
        let resume = self.extract_requirements(resume_text);
        RequirementGap {
            missing: job.difference(&resume).cloned().collect(),
            matched: job.intersection(&resume).cloned().collect(),
        }
    }

    /// Requirements present in the job description but absent from the resume.
    /// Callers must not rely on the order of the returned list.
    #[allow(dead_code)]
    pub fn compare_requirements(&self, job_text: &str, resume_text: &str) -> Vec<String> {
        self.gap(job_text, resume_text).missing
    }
}

/// Job requirements split by whether the resume covers them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementGap {
    pub missing: Vec<String>,
    pub matched: Vec<String>,
}

/// "tensorflow" → "Tensorflow": first character upper, rest lower.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
