use irs_core::tokenizer::{normalize_document, normalize_query};

fn words(text: &str) -> Vec<String> {
    normalize_document(text, 30).into_iter().map(|t| t.as_str().to_string()).collect()
}

#[test]
fn it_stems_then_lowercases() {
    let words = words("running runners RUN! connected");
    assert!(words.contains(&"run".to_string()));
    assert!(words.contains(&"runner".to_string()));
    assert!(words.contains(&"connect".to_string()));
}

#[test]
fn it_filters_stopwords_and_short_tokens() {
    let words = words("The quick brown fox and the lazy dog a b 7");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(!words.contains(&"a".to_string()));
    assert!(!words.contains(&"7".to_string()));
    assert!(words.contains(&"quick".to_string()));
}

#[test]
fn it_replaces_punctuation_with_whitespace() {
    let words = words("hello.world(foo)bar;baz");
    assert_eq!(words, vec!["hello", "world", "foo", "bar", "baz"]);
}

#[test]
fn queries_keep_stopwords_and_short_tokens() {
    let toks = normalize_query("The a running");
    assert_eq!(toks, vec!["the", "a", "run"]);
}
