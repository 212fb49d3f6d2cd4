use std::sync::Arc;

use tuicher_config::Config;
use tuicher_config::search_engine::SearchEngine;
use tuicher_core::{BackendError, SearchBackend};
use tuicher_types::{Action, SearchResult, Session};

const SETTINGS: &str = "Settings";

/// Row text, aliases matched against the query, description
const SESSION_ROWS: [(Session, &str, &[&str], &str); 4] = [
    (
        Session::Shutdown,
        "Shutdown",
        &["shutdown", "poweroff"],
        "Shutdown the computer",
    ),
    (
        Session::Restart,
        "Restart",
        &["restart", "reboot"],
        "Restart the computer",
    ),
    (
        Session::Suspend,
        "Suspend",
        &["suspend"],
        "Suspend the computer",
    ),
    (
        Session::Logout,
        "Logout",
        &["logout"],
        "Logout of your desktop environment/window manager",
    ),
];

/// Keyword routing over the configured search engines
pub struct ConfigSearchBackend {
    config: Arc<Config>,
}

impl ConfigSearchBackend {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn results_for(&self, text: &str) -> Vec<SearchResult> {
        if text.trim().is_empty() {
            return vec![];
        }

        if let Some((keyword, query)) = split_keyword(text)
            && let Some(engine) = self.config.engine_for_keyword(keyword)
        {
            return vec![engine_result(engine, query)];
        }

        if let Some((keyword, query)) = split_keyword(text)
            && self.config.is_session_keyword(keyword)
        {
            return session_results(query);
        }

        let mut results = Vec::new();

        if SETTINGS.to_lowercase().contains(&text.trim().to_lowercase()) {
            results.push(
                SearchResult::new(SETTINGS, "settings")
                    .with_secondary_text("Open Tuicher Settings")
                    .with_action(Action::OpenSettings),
            );
        }

        if let Some(engine) = self.config.default_engine() {
            results.push(engine_result(engine, text));
        }

        results.truncate(self.config.ui.max_results);
        results
    }
}

#[async_trait::async_trait]
impl SearchBackend for ConfigSearchBackend {
    async fn search(&self, text: &str) -> Result<Vec<SearchResult>, BackendError> {
        let results = self.results_for(text);
        tracing::debug!("'{}' -> {} results", text, results.len());
        Ok(results)
    }
}

/// `"g rust book"` -> `("g", "rust book")`
fn split_keyword(text: &str) -> Option<(&str, &str)> {
    let (keyword, query) = text.split_once(' ')?;
    if keyword.is_empty() {
        return None;
    }
    Some((keyword, query))
}

/// An empty query lists every session action
fn session_results(query: &str) -> Vec<SearchResult> {
    let query = query.trim().to_lowercase();
    SESSION_ROWS
        .iter()
        .filter(|(_, _, aliases, _)| aliases.iter().any(|alias| alias.contains(&query)))
        .map(|(session, text, _, description)| {
            SearchResult::new(*text, "session-manager")
                .with_secondary_text(*description)
                .with_action(Action::Session(*session))
        })
        .collect()
}

fn engine_result(engine: &SearchEngine, query: &str) -> SearchResult {
    SearchResult::new(&engine.name, "search-engine")
        .with_secondary_text(format!("Search for {query}"))
        .with_action(Action::OpenUrl {
            url: engine.query_url(query),
        })
}
