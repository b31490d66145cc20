//! Tokenization and sentence splitting shared by relevance scoring and
//! finding extraction.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

// Runs of letters or digits; everything else is a separator.
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+").unwrap());

/// Lower-cased word set of `text`, punctuation stripped.
pub fn tokenize(text: &str) -> HashSet<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Split text into sentences on terminal punctuation.
///
/// A boundary is a `.`, `!` or `?` followed by whitespace or the end of the
/// text, so decimals such as `3.5` do not split. Fragments are trimmed and
/// empty ones dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let at_boundary = match chars.peek() {
            None => true,
            Some((_, next)) => next.is_whitespace(),
        };
        if at_boundary {
            let end = idx + ch.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, fragment: &'a str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        sentences.push(fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_punctuation_and_case() {
        let tokens = tokenize("Type-2 Diabetes: metformin, (HbA1c)!");
        let expected: HashSet<String> = ["type", "2", "diabetes", "metformin", "hba1c"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" -- ... ").is_empty());
    }

    #[test]
    fn test_split_sentences() {
        let text = "Metformin lowered HbA1c by 1.5 points. Was it safe? Yes!  ";
        assert_eq!(
            split_sentences(text),
            vec!["Metformin lowered HbA1c by 1.5 points.", "Was it safe?", "Yes!"]
        );
    }

    #[test]
    fn test_split_sentences_without_terminal_punctuation() {
        assert_eq!(split_sentences("No full stop here"), vec!["No full stop here"]);
        assert!(split_sentences("   ").is_empty());
    }
}
