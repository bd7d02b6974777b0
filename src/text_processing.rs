//! Tokenization shared by corpus fitting and query transformation.
//!
//! Both sides of the vector space model must see identical tokens, so the
//! tokenizer lives here as a single pure function: lowercase, split on
//! word boundaries, keep alphanumeric terms of two or more characters, drop
//! stop words. The stop-word list is fixed and closed for the deployment's
//! language (English); changing it invalidates every fitted vocabulary.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

// Terms of at least two word characters, matching how the original corpus
// was tokenized. Single-letter fragments carry no discriminative weight.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Fixed English stop-word list.
///
/// Closed by design: the fitted vocabulary depends on it, so it is never
/// extended at runtime.
static ENGLISH_STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
        "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
        "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
        "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
        "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
        "beside", "besides", "between", "beyond", "both", "bottom", "but", "by", "call", "can",
        "cannot", "could", "did", "do", "does", "doing", "done", "down", "due", "during", "each",
        "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "even", "ever",
        "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
        "first", "five", "for", "former", "formerly", "forty", "four", "from", "front", "full",
        "further", "get", "give", "go", "had", "has", "have", "he", "hence", "her", "here",
        "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
        "how", "however", "hundred", "if", "in", "indeed", "into", "is", "it", "its", "itself",
        "keep", "last", "latter", "latterly", "least", "less", "made", "many", "may", "me",
        "meanwhile", "might", "mine", "more", "moreover", "most", "mostly", "move", "much",
        "must", "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next",
        "nine", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of",
        "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
        "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please",
        "put", "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious",
        "several", "she", "should", "show", "side", "since", "six", "sixty", "so", "some",
        "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still", "such",
        "take", "ten", "than", "that", "the", "their", "them", "themselves", "then", "thence",
        "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they",
        "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
        "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "under",
        "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what",
        "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby",
        "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who",
        "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without", "would",
        "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Tokenize a text into lowercase terms with stop words removed.
///
/// Case-insensitive: input is lowercased before matching. Out-of-vocabulary
/// handling happens downstream; this function just produces the raw term
/// stream in document order. Empty input yields an empty vector, never an
/// error.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|term| !ENGLISH_STOP_WORDS.contains(term))
        .map(|term| term.to_string())
        .collect()
}

/// Check whether a term is on the fixed stop-word list.
pub fn is_stop_word(term: &str) -> bool {
    ENGLISH_STOP_WORDS.contains(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_input() {
        let tokens = tokenize("King David");
        assert_eq!(tokens, vec!["king", "david"]);
    }

    #[test]
    fn test_tokenize_removes_stop_words() {
        let tokens = tokenize("the apple of the valley");
        assert_eq!(tokens, vec!["apple", "valley"]);
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        // "x" in pedigree notation like "Jonathan x Arkansas Black"
        let tokens = tokenize("Jonathan x Arkansas Black");
        assert_eq!(tokens, vec!["jonathan", "arkansas", "black"]);
    }

    #[test]
    fn test_tokenize_keeps_alphanumeric_codes() {
        let tokens = tokenize("mal0101 Malus domestica");
        assert_eq!(tokens, vec!["mal0101", "malus", "domestica"]);
    }

    #[test]
    fn test_tokenize_empty_and_whitespace() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n  ").is_empty());
    }

    #[test]
    fn test_tokenize_punctuation_boundaries() {
        let tokens = tokenize("Gala, Supreme; (Fuji)");
        assert_eq!(tokens, vec!["gala", "supreme", "fuji"]);
    }

    #[test]
    fn test_is_stop_word() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("of"));
        assert!(!is_stop_word("apple"));
        assert!(!is_stop_word("malus"));
    }

    #[test]
    fn test_tokenize_deterministic() {
        let text = "Golden Delicious from West Virginia";
        assert_eq!(tokenize(text), tokenize(text));
    }
}
