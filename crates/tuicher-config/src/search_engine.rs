use serde::{Deserialize, Serialize};

/// Placeholder replaced by the query in `SearchEngine::url`
pub const QUERY_PLACEHOLDER: &str = "%s";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchEngine {
    pub id: u64,
    pub keyword: String,
    pub name: String,
    pub url: String,
}

impl SearchEngine {
    pub fn query_url(&self, query: &str) -> String {
        self.url.replace(QUERY_PLACEHOLDER, query)
    }
}

pub fn default_search_engines() -> Vec<SearchEngine> {
    vec![
        SearchEngine {
            id: 0,
            keyword: "g".to_string(),
            name: "Google".to_string(),
            url: "https://www.google.com/search?q=%s".to_string(),
        },
        SearchEngine {
            id: 1,
            keyword: "d".to_string(),
            name: "DuckDuckGo".to_string(),
            url: "https://duckduckgo.com/?q=%s".to_string(),
        },
    ]
}
