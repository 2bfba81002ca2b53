//! Keyword extraction for the associative index

/// Tokenizer seam for the associative index. The manager treats extraction
/// as an external collaborator; swap this to plug in a real NLP pipeline.
pub trait KeywordExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Extract the keywords of a piece of content, deduplicated, in order of
    /// first occurrence.
    fn extract(&self, text: &str) -> Vec<String>;
}

/// Zero-config keyword extractor.
///
/// This is intentionally lightweight and deterministic (no models, no
/// network). It is *not* intended to match the quality of a learned
/// keyword extractor.
#[derive(Debug, Clone)]
pub struct SimpleKeywordExtractor {
    min_len: usize,
}

impl Default for SimpleKeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleKeywordExtractor {
    pub fn new() -> Self {
        Self { min_len: 3 }
    }

    pub fn with_min_len(min_len: usize) -> Self {
        Self { min_len }
    }
}

impl KeywordExtractor for SimpleKeywordExtractor {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn extract(&self, text: &str) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::new();
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            if token.chars().count() < self.min_len {
                continue;
            }
            let word = token.to_lowercase();
            if !keywords.contains(&word) {
                keywords.push(word);
            }
        }
        keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_lowercased_words() {
        let extractor = SimpleKeywordExtractor::new();
        let keywords = extractor.extract("The Solana validator restarted");
        assert_eq!(keywords, vec!["the", "solana", "validator", "restarted"]);
    }

    #[test]
    fn drops_short_tokens_and_punctuation() {
        let extractor = SimpleKeywordExtractor::new();
        let keywords = extractor.extract("ok, it is up - 42ms now!");
        assert_eq!(keywords, vec!["42ms", "now"]);
    }

    #[test]
    fn dedups_repeated_words() {
        let extractor = SimpleKeywordExtractor::new();
        let keywords = extractor.extract("chat chat CHAT spam");
        assert_eq!(keywords, vec!["chat", "spam"]);
    }

    #[test]
    fn empty_input_yields_no_keywords() {
        let extractor = SimpleKeywordExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("a b c").is_empty());
    }
}
