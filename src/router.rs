//! # Command Router
//!
//! Classifies one inbound chat event into an action and produces the single
//! reply it calls for. The router knows nothing about Telegram delivery; the
//! `bot` module turns a [`Reply`] into an outbound message.

use anyhow::Result;
use teloxide::types::UserId;
use teloxide::utils::command::BotCommands;
use teloxide::utils::html::escape;
use tracing::{debug, info};

use crate::db::RecipeStore;
use crate::formatter::render;
use crate::localization::{t_args_lang, t_lang};
use crate::session::{SessionState, SessionStore};

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start using the bot")]
    Start,

    #[command(description = "Get a random recipe")]
    Random,

    #[command(description = "Get a random recipe (same as /random)")]
    Recipe,

    #[command(description = "Find recipes by ingredient: /search chicken")]
    Search(String),

    #[command(description = "Show help")]
    Help,
}

/// An inbound chat event as seen by the router
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    Command(Command),
    Text(String),
}

/// Which reply keyboard accompanies a reply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Menu {
    /// Random recipe, search by ingredient, help
    Primary,
    /// Next match, back to main menu
    Secondary,
}

/// One outbound message: HTML text plus the keyboard to attach
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub menu: Menu,
}

impl Reply {
    fn primary(text: String) -> Self {
        Self {
            text,
            menu: Menu::Primary,
        }
    }

    fn secondary(text: String) -> Self {
        Self {
            text,
            menu: Menu::Secondary,
        }
    }
}

/// Actions reachable from free-text messages (button presses)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAction {
    RandomRecipe,
    SearchHint,
    NextMatch,
    Help,
}

const RECIPE_TOKENS: &[&str] = &["recipe", "рецепт"];
const RANDOM_TOKENS: &[&str] = &["random", "случайн"];
const SEARCH_TOKENS: &[&str] = &["search", "поиск"];
const NEXT_TOKENS: &[&str] = &["more", "next", "ещё", "еще"];
const HELP_TOKENS: &[&str] = &["help", "помощ", "main menu", "главное меню"];

fn contains_any(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| text.contains(token))
}

fn asks_for_random_recipe(text: &str) -> bool {
    contains_any(text, RECIPE_TOKENS) && contains_any(text, RANDOM_TOKENS)
}

fn asks_for_search(text: &str) -> bool {
    contains_any(text, SEARCH_TOKENS)
}

fn asks_for_next(text: &str) -> bool {
    contains_any(text, NEXT_TOKENS)
}

fn asks_for_help(text: &str) -> bool {
    contains_any(text, HELP_TOKENS)
}

/// Free-text rules in priority order; the first matching predicate wins.
/// Predicates receive the lowercased message text.
pub const TEXT_RULES: &[(fn(&str) -> bool, TextAction)] = &[
    (asks_for_random_recipe, TextAction::RandomRecipe),
    (asks_for_search, TextAction::SearchHint),
    (asks_for_next, TextAction::NextMatch),
    (asks_for_help, TextAction::Help),
];

/// Map free text to an action, or `None` when nothing matches
pub fn classify_text(text: &str) -> Option<TextAction> {
    let text = text.to_lowercase();
    TEXT_RULES
        .iter()
        .find(|(rule, _)| rule(text.as_str()))
        .map(|(_, action)| *action)
}

/// Dispatches inbound events against the recipe store and session state
pub struct CommandRouter<R, S> {
    store: R,
    sessions: SessionState<S>,
}

impl<R: RecipeStore, S: SessionStore> CommandRouter<R, S> {
    pub fn new(store: R, sessions: S) -> Self {
        Self {
            store,
            sessions: SessionState::new(sessions),
        }
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn sessions(&self) -> &SessionState<S> {
        &self.sessions
    }

    /// Handle one inbound event for `user`, replying in `language`
    pub async fn handle(&self, user: UserId, language: &str, inbound: Inbound) -> Result<Reply> {
        match inbound {
            Inbound::Command(Command::Start) => Ok(self.greet(language)),
            Inbound::Command(Command::Random | Command::Recipe) => self.random_recipe(language).await,
            Inbound::Command(Command::Search(term)) => self.search(user, language, &term).await,
            Inbound::Command(Command::Help) => Ok(self.help(language)),
            Inbound::Text(text) => self.handle_text(user, language, &text).await,
        }
    }

    async fn handle_text(&self, user: UserId, language: &str, text: &str) -> Result<Reply> {
        let action = classify_text(text);
        debug!(user_id = %user, action = ?action, "Classified free-text message");

        match action {
            Some(TextAction::RandomRecipe) => self.random_recipe(language).await,
            Some(TextAction::SearchHint) => Ok(Reply::primary(t_lang("search-hint", language))),
            Some(TextAction::NextMatch) => Ok(self.next_match(user, language)),
            Some(TextAction::Help) => Ok(self.help(language)),
            None => Ok(Reply::primary(t_lang("not-understood", language))),
        }
    }

    fn greet(&self, language: &str) -> Reply {
        Reply::primary(t_lang("welcome", language))
    }

    fn help(&self, language: &str) -> Reply {
        Reply::primary(t_lang("help-text", language))
    }

    async fn random_recipe(&self, language: &str) -> Result<Reply> {
        let text = match self.store.fetch_random().await? {
            Some(recipe) => {
                info!(recipe_id = recipe.id, "Serving random recipe");
                render(&recipe, language)
            }
            None => t_lang("no-recipes", language),
        };
        Ok(Reply::primary(text))
    }

    async fn search(&self, user: UserId, language: &str, term: &str) -> Result<Reply> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Reply::primary(t_lang("search-usage", language)));
        }

        let matches = self.store.search_by_ingredient(term).await?;
        info!(user_id = %user, term = %term, matches = matches.len(), "Search completed");

        if !self.sessions.start_session(user, matches) {
            let escaped = escape(term);
            return Ok(Reply::primary(t_args_lang(
                "search-not-found",
                &[("term", escaped.as_str())],
                language,
            )));
        }

        Ok(self.send_search_match(user, language))
    }

    fn next_match(&self, user: UserId, language: &str) -> Reply {
        if !self.sessions.has_session(user) {
            return Reply::primary(t_lang("search-first", language));
        }
        self.send_search_match(user, language)
    }

    /// Render the current match, then move the cursor on
    fn send_search_match(&self, user: UserId, language: &str) -> Reply {
        match self.sessions.current(user) {
            Some(recipe) => {
                let text = render(&recipe, language);
                self.sessions.advance(user);
                Reply::secondary(text)
            }
            None => Reply::primary(t_lang("search-first", language)),
        }
    }
}
