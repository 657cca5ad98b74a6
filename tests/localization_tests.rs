//! # Localization Tests
//!
//! Message retrieval, argument formatting and language detection.

use recipes_bot::localization::{detect_language, t_args_lang, t_lang, LocalizationManager};
use std::collections::HashMap;

fn setup_localization() -> LocalizationManager {
    LocalizationManager::new().expect("Failed to create localization manager")
}

#[test]
fn test_get_message_existing_key() {
    let manager = setup_localization();

    let message = manager.get_message_in_language("help-text", "en", None);
    assert!(message.contains("/search"));
    assert!(message.contains("Commands"));
}

#[test]
fn test_get_message_nonexistent_key() {
    let manager = setup_localization();

    let message = manager.get_message_in_language("nonexistent-key", "en", None);
    assert_eq!(message, "Missing translation: nonexistent-key");
}

#[test]
fn test_get_message_unsupported_language_falls_back_to_english() {
    let manager = setup_localization();

    let message = manager.get_message_in_language("no-recipes", "de", None);
    assert_eq!(message, manager.get_message_in_language("no-recipes", "en", None));
}

#[test]
fn test_russian_differs_from_english() {
    let manager = setup_localization();

    let russian = manager.get_message_in_language("welcome", "ru", None);
    let english = manager.get_message_in_language("welcome", "en", None);
    assert_ne!(russian, english);
    assert!(russian.contains("Привет"));
}

#[test]
fn test_get_message_with_args() {
    let manager = setup_localization();

    let mut args = HashMap::new();
    args.insert("term", "chicken");

    let message = manager.get_message_in_language("search-not-found", "en", Some(&args));
    assert_eq!(message, "😔 No recipes found with «chicken».");
}

#[test]
fn test_multiline_message_keeps_line_breaks() {
    let message = t_lang("search-usage", "en");
    assert_eq!(message, "❗ Add an ingredient after the command, for example:\n/search chicken");
}

#[test]
fn test_both_languages_define_the_same_keys() {
    let manager = setup_localization();
    let keys = [
        "menu-random",
        "menu-search",
        "menu-help",
        "menu-next",
        "menu-main",
        "welcome",
        "recipe-ingredients",
        "recipe-instructions",
        "no-recipes",
        "search-usage",
        "search-not-found",
        "search-hint",
        "search-first",
        "help-text",
        "not-understood",
    ];

    for language in ["en", "ru"] {
        for key in keys {
            let message = manager.get_message_in_language(key, language, None);
            assert!(!message.starts_with("Missing"), "{language} lacks {key}");
        }
    }
}

#[test]
fn test_language_detection() {
    assert_eq!(detect_language(Some("en"), "ru"), "en");
    assert_eq!(detect_language(Some("en-US"), "ru"), "en");
    assert_eq!(detect_language(Some("RU"), "en"), "ru");
    assert_eq!(detect_language(None, "ru"), "ru");
    assert_eq!(detect_language(Some("fr"), "ru"), "ru");
    assert_eq!(detect_language(Some("fr"), "de"), "en");
}

#[test]
fn test_convenience_functions() {
    assert!(!t_lang("help-text", "ru").is_empty());

    let message = t_args_lang("search-not-found", &[("term", "курица")], "ru");
    assert!(message.contains("курица"));
}
