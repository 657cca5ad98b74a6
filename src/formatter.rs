//! Recipe card rendering for Telegram's HTML parse mode

use teloxide::utils::html::{bold, escape};

use crate::db::Recipe;
use crate::localization::t_lang;

/// Render a recipe as a display block: bold title, then labelled
/// ingredients and instructions sections.
///
/// Recipe text is escaped, never truncated or re-cased, so Telegram shows
/// it exactly as stored.
pub fn render(recipe: &Recipe, language: &str) -> String {
    format!(
        "{}\n\n🧺 {}\n{}\n\n👨‍🍳 {}\n{}",
        bold(&escape(&recipe.title)),
        bold(&format!("{}:", t_lang("recipe-ingredients", language))),
        escape(&recipe.ingredients),
        bold(&format!("{}:", t_lang("recipe-instructions", language))),
        escape(&recipe.instructions),
    )
}
