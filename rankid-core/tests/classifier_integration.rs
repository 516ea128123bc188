//! End-to-end classification against the bundled sample tables

use rankid_core::{ClassifierConfig, LanguageClassifier, LanguageIdentifier};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

fn sample_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("freq_data").join("wikipedia")
}

fn classifier() -> &'static LanguageClassifier {
    static CLASSIFIER: OnceLock<LanguageClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(|| LanguageClassifier::from_dir(&sample_dir()).expect("sample tables load"))
}

const TEST_TEXTS: &[(&str, Option<&str>)] = &[
    ("This is English", Some("en")),
    ("Esto es español", Some("es")),
    ("Can you please thank you", Some("en")),
    ("Hello", Some("en")),
    ("Please", Some("en")),
    ("I agree", Some("en")),
    ("Let's go!", Some("en")),
    ("kindly update me once done", Some("en")),
    ("Gracias", Some("es")),
    ("por favor desactiva mi tarjeta", Some("es")),
    ("Obrigada, bom dia!", Some("pt")),
    ("Ciao, grazie", Some("it")),
    ("Merci beaucoup", Some("fr")),
    ("书", Some("zh")),
    ("吸尘器", Some("zh")),
    ("本", Some("ja")),
    ("掃除機が壊れた", Some("ja")),
    ("안녕하세요? 안녕하세요?", Some("ko")),
    ("123", None),
    ("1", None),
    ("ᵔ", None),
    ("http://go.microsoft.com/fwlink/?LinkID=267510", None),
    ("http://go.microsoft.com/fwlink/?LinkID=267510&clcid=0x409", None),
    ("https://downloads.anywhere.com is enough to block classification", None),
    ("<!EncryptedText ,,, even if followed", None),
    ("displayText more text", None),
    ("wuglmkqufd mgackxzrfk ydcxscavcb", None),
];

#[test]
fn test_language_classifier_cases() {
    let classifier = classifier();
    for (text, expected) in TEST_TEXTS {
        let winner = classifier.get_winner(text);
        assert_eq!(winner, *expected, "Expected {expected:?} instead of {winner:?} for \"{text}\"");
    }
}

#[test]
fn test_sample_languages() {
    assert_eq!(
        classifier().languages(),
        vec!["de", "en", "es", "fr", "it", "ja", "ko", "pt", "zh"]
    );
}

#[test]
fn test_default_instance_uses_bundled_tables() {
    if std::env::var_os(rankid_core::DATA_DIR_ENV).is_some() {
        return;
    }
    let classifier = LanguageClassifier::default_instance().unwrap();
    assert_eq!(classifier.get_winner("This is English"), Some("en"));
    assert_eq!(classifier.get_winner_score("This is English").0, Some("en"));
    assert_eq!(classifier.get_language_scores("This is English")[0].0, "en");
}

#[test]
fn test_winner_is_deterministic() {
    let classifier = classifier();
    for (text, _) in TEST_TEXTS {
        let first = classifier.get_winner_score(text);
        for _ in 0..5 {
            assert_eq!(classifier.get_winner_score(text), first);
        }
    }
}

fn bits(scores: Vec<(&str, f64)>) -> Vec<(String, u64)> {
    scores.into_iter().map(|(lang, score)| (lang.to_string(), score.to_bits())).collect()
}

#[test]
fn test_scores_are_bit_identical_across_loads() {
    let reloaded = LanguageClassifier::from_dir(&sample_dir()).unwrap();
    for (text, _) in TEST_TEXTS {
        assert_eq!(
            bits(classifier().get_language_scores(text)),
            bits(reloaded.get_language_scores(text)),
            "{text}"
        );
    }
}

#[test]
fn test_winner_score_for_digit() {
    assert_eq!(classifier().get_winner_score("1"), (None, 0.0));
    assert_eq!(classifier().get_winner_margin("1"), (None, 0.0));
}

#[test]
fn test_get_winner_margin() {
    let classifier = classifier();
    let (winner1, margin) = classifier.get_winner_margin("no");
    let (winner2, score) = classifier.get_winner_score("no");
    assert_eq!(winner1, Some("it"));
    assert_eq!(winner2, Some("it"));
    assert!(margin < score);

    let (korean, margin2) = classifier.get_winner_margin("안녕하세요");
    assert_eq!(korean, Some("ko"));
    assert!(margin2 > margin);
}

#[test]
fn test_single_candidate_margin_is_full_score() {
    let (winner, margin) = classifier().get_winner_margin("안녕하세요");
    let (_, score) = classifier().get_winner_score("안녕하세요");
    assert_eq!(winner, Some("ko"));
    assert_eq!(margin, score);
    assert!((score - 1.0).abs() < 1e-12);
}

#[test]
fn test_language_scores_are_sorted() {
    let scores = classifier().get_language_scores("no");
    assert!(scores.len() > 1);
    assert!(scores.windows(2).all(|pair| pair[0].1 >= pair[1].1));
    assert!(scores.iter().all(|(_, score)| *score > 0.0));
}

#[test]
fn test_char_winner() {
    let classifier = classifier();
    assert_eq!(classifier.get_char_winner("안녕하세요"), Some("ko"));
    assert_eq!(classifier.get_char_winner("书"), Some("zh"));
    assert_eq!(classifier.get_char_winner("12345"), None);
}

#[test]
fn test_restricted_instance() {
    let latin = classifier().restrict_to(&["en", "es"]);
    assert_eq!(latin.get_winner("书"), None);
    assert_eq!(latin.get_winner("Esto es español"), Some("es"));
}

#[test]
fn test_custom_prefixes() {
    let config = ClassifierConfig {
        computerese_prefixes: vec!["[bot]".to_string()],
        ..ClassifierConfig::default()
    };
    let classifier = LanguageClassifier::from_dir_with_config(&sample_dir(), config).unwrap();
    assert_eq!(classifier.get_winner("[bot] This is English"), None);
    assert_eq!(classifier.get_winner("http is a protocol"), Some("en"));
}

#[test]
fn test_shared_across_threads() {
    let classifier = Arc::new(LanguageClassifier::from_dir(&sample_dir()).unwrap());
    let handles: Vec<_> = TEST_TEXTS
        .iter()
        .map(|(text, expected)| {
            let classifier = Arc::clone(&classifier);
            std::thread::spawn(move || {
                assert_eq!(classifier.classify(text).as_deref(), *expected);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_classify_batch() {
    let texts: Vec<&str> = TEST_TEXTS.iter().map(|(text, _)| *text).collect();
    let expected: Vec<Option<&str>> = TEST_TEXTS.iter().map(|(_, lang)| *lang).collect();
    assert_eq!(classifier().classify_batch(&texts), expected);
}
