//! Paged examples carousel.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::client::model::Example;

/// Cards shown at once.
pub const PAGE_SIZE: usize = 3;

#[derive(Debug, Error)]
pub enum ExamplesError {
    #[error("failed to read examples: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse examples: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    examples: Vec<Example>,
    index: usize,
}

impl Carousel {
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples, index: 0 }
    }

    /// Shuffle once, then page through in that order.
    pub fn shuffled(mut examples: Vec<Example>, rng: &mut fastrand::Rng) -> Self {
        rng.shuffle(&mut examples);
        Self::new(examples)
    }

    /// Load a JSON array of examples from disk.
    pub fn load(path: &Path, rng: &mut fastrand::Rng) -> Result<Self, ExamplesError> {
        let content = fs::read_to_string(path)?;
        let examples: Vec<Example> = serde_json::from_str(&content)?;
        tracing::debug!(count = examples.len(), path = ?path, "Examples loaded");
        Ok(Self::shuffled(examples, rng))
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn page(&self) -> &[Example] {
        let end = (self.index + PAGE_SIZE).min(self.examples.len());
        &self.examples[self.index..end]
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + PAGE_SIZE < self.examples.len()
    }

    /// Move one page back. Returns whether the page changed.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index = self.index.saturating_sub(PAGE_SIZE);
        true
    }

    /// Move one page forward, never past the last full page.
    pub fn next(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index = (self.examples.len() - PAGE_SIZE).min(self.index + PAGE_SIZE);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples(n: usize) -> Vec<Example> {
        (0..n)
            .map(|i| Example {
                title: format!("t{i}"),
                description: String::new(),
                source: format!("https://example.org/{i}"),
            })
            .collect()
    }

    fn titles(c: &Carousel) -> Vec<&str> {
        c.page().iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_last_page_is_clamped_to_full_page() {
        let mut c = Carousel::new(examples(7));
        assert!(!c.can_go_back());
        assert_eq!(titles(&c), ["t0", "t1", "t2"]);

        assert!(c.next());
        assert_eq!(c.index(), 3);
        assert!(c.next());
        assert_eq!(c.index(), 4);
        assert_eq!(titles(&c), ["t4", "t5", "t6"]);
        assert!(!c.can_go_forward());
        assert!(!c.next());

        assert!(c.previous());
        assert_eq!(c.index(), 1);
        assert!(c.previous());
        assert_eq!(c.index(), 0);
        assert!(!c.previous());
    }

    #[test]
    fn test_short_list_has_single_page() {
        let mut c = Carousel::new(examples(2));
        assert_eq!(c.page().len(), 2);
        assert!(!c.next());
        assert!(Carousel::new(Vec::new()).page().is_empty());
    }

    #[test]
    fn test_shuffle_keeps_every_example() {
        let mut rng = fastrand::Rng::with_seed(7);
        let c = Carousel::shuffled(examples(10), &mut rng);
        let mut all: Vec<_> = c.examples.iter().map(|e| e.title.clone()).collect();
        all.sort();
        let mut expected: Vec<_> = (0..10).map(|i| format!("t{i}")).collect();
        expected.sort();
        assert_eq!(all, expected);
    }
}
