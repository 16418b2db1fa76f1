use search_core::tokenizer::tokenize;

#[test]
fn it_lowercases_and_splits_on_punctuation() {
    let words = tokenize("Malware&Ransomware; PHISHING...attacks");
    assert_eq!(words, vec!["malware", "ransomware", "phishing", "attacks"]);
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    // no stemming
    assert!(tokenize("Running runners").contains(&"running".to_string()));
}

#[test]
fn it_drops_single_characters() {
    assert_eq!(tokenize("x y z 42 7"), vec!["42"]);
}
