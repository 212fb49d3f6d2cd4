use serde::{Deserialize, Serialize};

/// Topic of the backend push channel carrying replacement result lists
pub const SHOW_PLUGIN_RESULTS: &str = "show-plugin-results";

/// One selectable row in the launcher list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub icon_path: Option<String>,
    pub text: String,
    pub secondary_text: Option<String>,
    /// `None` marks an informational row, executing it does nothing
    pub action: Option<Action>,
    pub info: String,
}

impl SearchResult {
    pub fn new(text: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            icon_path: None,
            text: text.into(),
            secondary_text: None,
            action: None,
            info: info.into(),
        }
    }

    pub fn with_secondary_text(mut self, text: impl Into<String>) -> Self {
        self.secondary_text = Some(text.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_icon_path(mut self, path: impl Into<String>) -> Self {
        self.icon_path = Some(path.into());
        self
    }
}

/// What executing a result does, tagged by `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    OpenApp {
        path: String,
    },
    OpenFile {
        path: String,
    },
    #[serde(rename = "OpenURL")]
    OpenUrl {
        url: String,
    },
    CopyText {
        text: String,
    },
    CopyImage {
        path: String,
    },
    /// Replaces the current list with a nested one
    ShowResults {
        results: Vec<SearchResult>,
    },
    Custom {
        plugin_id: String,
        action: String,
        #[serde(rename = "info")]
        params: Vec<String>,
    },
    OpenSettings,
    Session(Session),
    Bookmark(Bookmark),
}

impl Action {
    /// Variant name as it appears in the `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            Action::OpenApp { .. } => "OpenApp",
            Action::OpenFile { .. } => "OpenFile",
            Action::OpenUrl { .. } => "OpenURL",
            Action::CopyText { .. } => "CopyText",
            Action::CopyImage { .. } => "CopyImage",
            Action::ShowResults { .. } => "ShowResults",
            Action::Custom { .. } => "Custom",
            Action::OpenSettings => "OpenSettings",
            Action::Session(_) => "Session",
            Action::Bookmark(_) => "Bookmark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "session")]
pub enum Session {
    Shutdown,
    Restart,
    Suspend,
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bookmark {
    Add { name: String, url: String },
    Remove { id: u64 },
}

/// Events produced by the view layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum MainScreenAction {
    ArrowUp,
    ArrowDown,
    SearchInput { text: String },
    EnterPress,
    EscapePress,
    ResultHover { index: usize },
    ResultClick,
}

/// Unsolicited messages from the search backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum PushEvent {
    ShowPluginResults { results: Vec<SearchResult> },
}

impl PushEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            PushEvent::ShowPluginResults { .. } => SHOW_PLUGIN_RESULTS,
        }
    }
}

/// Snapshot of everything the result list view renders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    pub query_text: String,
    pub selected_index: usize,
    pub results: Vec<SearchResult>,
}

impl UiState {
    pub fn selected(&self) -> Option<&SearchResult> {
        self.results.get(self.selected_index)
    }
}
