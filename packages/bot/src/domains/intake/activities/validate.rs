//! Validity predicate for intake candidates.

use crate::config::{DEFAULT_IMAGE_EXTENSIONS, DEFAULT_MEME_FLAIR};
use crate::domains::intake::Candidate;

/// Why a candidate was dropped. Rejections are expected and never surface as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    SelfPost,
    NotAnImage,
    WrongCategory,
}

/// Accepts link posts whose URL points at an image and whose category
/// label matches exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    image_extensions: Vec<String>,
    category: String,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            DEFAULT_MEME_FLAIR,
        )
    }
}

impl CandidateFilter {
    pub fn new(image_extensions: Vec<String>, category: impl Into<String>) -> Self {
        Self {
            image_extensions,
            category: category.into(),
        }
    }

    pub fn image_extensions(&self) -> &[String] {
        &self.image_extensions
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// `Ok(())` when valid, otherwise the first failed check.
    pub fn check(&self, candidate: &Candidate) -> Result<(), Rejection> {
        if candidate.is_self {
            return Err(Rejection::SelfPost);
        }

        if !self
            .image_extensions
            .iter()
            .any(|ext| candidate.url.ends_with(ext.as_str()))
        {
            return Err(Rejection::NotAnImage);
        }

        if candidate.category.as_deref() != Some(self.category.as_str()) {
            return Err(Rejection::WrongCategory);
        }

        Ok(())
    }

    pub fn is_valid(&self, candidate: &Candidate) -> bool {
        self.check(candidate).is_ok()
    }
}
