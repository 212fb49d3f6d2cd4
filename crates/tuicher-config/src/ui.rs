use std::env;

use serde::{Deserialize, Serialize};

fn default_row_height() -> u32 {
    48
}

fn default_max_results() -> usize {
    50
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Height of one result row in pixels
    #[serde(default = "default_row_height")]
    pub row_height: u32,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl UiConfig {
    pub fn new() -> Self {
        let row_height = env::var("TUICHER_ROW_HEIGHT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_row_height);

        Self {
            row_height,
            max_results: default_max_results(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            row_height: default_row_height(),
            max_results: default_max_results(),
        }
    }
}
