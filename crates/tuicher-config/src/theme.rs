use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Accent color, not themable
pub const ACCENT: &str = "#FFDE72";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: String,
    pub secondary: String,
    pub tertiary: String,
    pub disabled: String,
    pub text: String,
    pub text_secondary: String,
    pub text_tertiary: String,
    pub on_text: String,
    pub warning: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#1E1E2E".to_string(),
            secondary: "#313244".to_string(),
            tertiary: "#45475A".to_string(),
            disabled: "#6C7086".to_string(),
            text: "#CDD6F4".to_string(),
            text_secondary: "#BAC2DE".to_string(),
            text_tertiary: "#7F849C".to_string(),
            on_text: "#11111B".to_string(),
            warning: "#F38BA8".to_string(),
        }
    }
}

impl Theme {
    /// CSS custom properties in declaration order
    pub fn variables(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("background", &self.background),
            ("secondary", &self.secondary),
            ("tertiary", &self.tertiary),
            ("disabled", &self.disabled),
            ("text", &self.text),
            ("text_secondary", &self.text_secondary),
            ("text_tertiary", &self.text_tertiary),
            ("on_text", &self.on_text),
            ("accent", ACCENT),
            ("warning", &self.warning),
        ]
    }

    /// Style block injected into the launcher view
    pub fn css(&self) -> String {
        let mut css = String::from("<style>\n:root{\n");
        for (name, value) in self.variables() {
            // Writing into a String cannot fail
            let _ = writeln!(css, "\t--{name}: {value};");
        }
        css.push_str("}\n");
        css.push_str(UTILITY_CLASSES);
        css.push_str("</style>");
        css
    }
}

const UTILITY_CLASSES: &str = r#"
.bg {
	background-color: var(--background);
}

.bg-text {
	background-color: var(--text);
}

.bg-secondary {
	background-color: var(--secondary);
}

.bg-tertiary {
	background-color: var(--tertiary);
}

.bg-accent {
	background-color: var(--accent);
}

.text {
	color: var(--text);
}

.text_secondary {
	color: var(--text_secondary);
}

.custom-scroll::-webkit-scrollbar {
	width: 4px;
}

.custom-scroll::-webkit-scrollbar-track {
	background: transparent;
}

.custom-scroll::-webkit-scrollbar-thumb {
	background-color: var(--tertiary);
	border-radius: 0px;
}

input::placeholder {
	color: var(--text_tertiary);
}

"#;
