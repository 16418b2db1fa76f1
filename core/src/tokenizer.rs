use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[\p{L}\p{N}_]+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","an","the","and","or","but","is","are","was","were",
            "in","on","at","to","for","with","by","about","like",
            "from","of","as","this","that","these","those","it","its",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Tokenize text into index terms: lowercase, split on word-character runs,
/// drop single-character tokens and stopwords. Terms keep encounter order.
///
/// Documents and queries both go through this function.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut terms = Vec::new();
    for mat in RE.find_iter(&lowered) {
        let token = mat.as_str();
        // length is measured in characters so "é" counts as one
        if token.chars().nth(1).is_none() { continue; }
        if is_stopword(token) { continue; }
        terms.push(token.to_string());
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Cloud-Security, THREATS!");
        assert_eq!(t, vec!["cloud", "security", "threats"]);
    }

    #[test]
    fn keeps_digits_and_underscores() {
        let t = tokenize("CVE 2024_0001 x86");
        assert_eq!(t, vec!["cve", "2024_0001", "x86"]);
    }

    #[test]
    fn combining_marks_split_words() {
        assert!(tokenize("x\u{301}").is_empty());
        assert_eq!(tokenize("cafe\u{301} x\u{301}"), vec!["cafe"]);
    }

    #[test]
    fn single_char_counted_in_chars() {
        assert!(tokenize("é a b").is_empty());
        assert_eq!(tokenize("éé"), vec!["éé"]);
    }
}
