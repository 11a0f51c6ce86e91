//! Task description to keyword tokens.

use regex::Regex;

/// Ordered keyword tokens of a task description.
///
/// Duplicates are kept. An empty token can appear (see
/// [`KeywordExtractor::extract`]) and matches every heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    tokens: Vec<String>,
}

impl KeywordSet {
    /// Keywords of a task description.
    pub fn from_task(description: &str) -> Self {
        KeywordExtractor::new().extract(description)
    }

    /// Wrap already-normalized tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Tokens in source order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Iterate over tokens.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Normalizes free text into keyword tokens.
pub struct KeywordExtractor {
    disallowed: Regex,
    separator: Regex,
}

impl KeywordExtractor {
    /// Create an extractor.
    pub fn new() -> Self {
        Self {
            disallowed: Regex::new(r"[^a-z0-9 ]").unwrap(),
            separator: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Lowercase, drop everything but ASCII letters, digits and spaces,
    /// then split on whitespace runs.
    ///
    /// A leading separator yields a leading empty token, trailing empty
    /// tokens are dropped, and text with no separator at all is a single
    /// token (so `""` gives `[""]`).
    pub fn extract(&self, description: &str) -> KeywordSet {
        let lowered = description.to_lowercase();
        let normalized = self.disallowed.replace_all(&lowered, "");

        let mut tokens: Vec<String> = self
            .separator
            .split(&normalized)
            .map(str::to_string)
            .collect();

        if self.separator.is_match(&normalized) {
            while tokens.last().is_some_and(|t| t.is_empty()) {
                tokens.pop();
            }
        }

        KeywordSet { tokens }
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<String> {
        KeywordSet::from_task(s).tokens().to_vec()
    }

    #[test]
    fn test_punctuation_removed_not_replaced() {
        assert_eq!(
            tokens("Prepare a literature-review!"),
            vec!["prepare", "a", "literaturereview"]
        );
    }

    #[test]
    fn test_duplicates_and_order_kept() {
        assert_eq!(tokens("Plan the plan"), vec!["plan", "the", "plan"]);
    }

    #[test]
    fn test_digits_kept() {
        assert_eq!(tokens("Top 10 tips for 2024"), vec!["top", "10", "tips", "for", "2024"]);
    }

    #[test]
    fn test_non_space_whitespace_is_stripped() {
        // Tabs and newlines are not the space character, so they are removed
        // before splitting and the surrounding words join.
        assert_eq!(tokens("travel\tplanner\nguide"), vec!["travelplannerguide"]);
    }

    #[test]
    fn test_non_ascii_letters_removed() {
        assert_eq!(tokens("Café menü"), vec!["caf", "men"]);
    }

    #[test]
    fn test_leading_separator_gives_empty_token() {
        assert_eq!(tokens("  hello world  "), vec!["", "hello", "world"]);
        assert_eq!(tokens("- hello"), vec!["", "hello"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(tokens(""), vec![""]);
        assert!(tokens("   ").is_empty());
        assert_eq!(tokens("!!!"), vec![""]);
    }
}
