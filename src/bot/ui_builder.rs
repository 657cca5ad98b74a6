//! UI Builder module for creating reply keyboards

use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::localization::t_lang;
use crate::router::Menu;

/// Main menu: random recipe, search by ingredient, help
pub fn create_primary_keyboard(language: &str) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(t_lang("menu-random", language)),
            KeyboardButton::new(t_lang("menu-search", language)),
        ],
        vec![KeyboardButton::new(t_lang("menu-help", language))],
    ])
    .resize_keyboard()
}

/// Menu shown while paging through search results
pub fn create_search_keyboard(language: &str) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(t_lang("menu-next", language))],
        vec![KeyboardButton::new(t_lang("menu-main", language))],
    ])
    .resize_keyboard()
}

pub fn create_keyboard(menu: Menu, language: &str) -> KeyboardMarkup {
    match menu {
        Menu::Primary => create_primary_keyboard(language),
        Menu::Secondary => create_search_keyboard(language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{classify_text, TextAction};

    fn labels(keyboard: &KeyboardMarkup) -> Vec<String> {
        keyboard
            .keyboard
            .iter()
            .flatten()
            .map(|button| button.text.clone())
            .collect()
    }

    #[test]
    fn test_primary_keyboard_layout() {
        let keyboard = create_primary_keyboard("en");
        assert_eq!(keyboard.keyboard.len(), 2);
        assert_eq!(keyboard.keyboard[0].len(), 2);
        assert_eq!(
            labels(&keyboard),
            vec!["🍽 Random recipe", "🔍 Search by ingredient", "📖 Help"]
        );
    }

    #[test]
    fn test_search_keyboard_layout() {
        let keyboard = create_search_keyboard("ru");
        assert_eq!(labels(&keyboard), vec!["🔄 Ещё рецепт", "⬅️ Главное меню"]);
    }

    #[test]
    fn test_every_button_routes_to_its_action() {
        for language in ["en", "ru"] {
            let primary = labels(&create_primary_keyboard(language));
            assert_eq!(classify_text(&primary[0]), Some(TextAction::RandomRecipe));
            assert_eq!(classify_text(&primary[1]), Some(TextAction::SearchHint));
            assert_eq!(classify_text(&primary[2]), Some(TextAction::Help));

            let search = labels(&create_search_keyboard(language));
            assert_eq!(classify_text(&search[0]), Some(TextAction::NextMatch));
            assert_eq!(classify_text(&search[1]), Some(TextAction::Help));
        }
    }
}
