use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Key resolution settings (auto-commit, autocomplete triggers)
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Suggestion menu layout and option documentation
    #[serde(default)]
    pub menu: MenuConfig,
}

/// Key resolution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolverConfig {
    /// Commit an exactly-matching autocomplete token when the cursor leaves it (default: true)
    #[serde(default = "default_true")]
    pub auto_commit_on_blur: bool,

    /// Single-character patterns that open an autocomplete session
    #[serde(default)]
    pub triggers: TriggerConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            auto_commit_on_blur: true,
            triggers: TriggerConfig::default(),
        }
    }
}

/// Regular expressions matched against the typed character.
/// One per autocomplete position, plus the in-text operator trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TriggerConfig {
    /// Letter typed at the start of an empty line
    #[serde(default = "default_word_trigger")]
    pub start_of_line: String,

    /// Letter typed at an empty expression hole
    #[serde(default = "default_word_trigger")]
    pub expression_hole: String,

    /// Letter typed at an empty operator hole
    #[serde(default = "default_word_trigger")]
    pub operator_hole: String,

    /// Character typed just left of an expression
    #[serde(default = "default_word_trigger")]
    pub left_of_expression: String,

    /// Character typed just right of an expression
    #[serde(default = "default_right_of_expression_trigger")]
    pub right_of_expression: String,

    /// Operator typed while editing a token that ends an expression
    #[serde(default = "default_in_text_operator_trigger")]
    pub in_text_operator: String,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            start_of_line: default_word_trigger(),
            expression_hole: default_word_trigger(),
            operator_hole: default_word_trigger(),
            left_of_expression: default_word_trigger(),
            right_of_expression: default_right_of_expression_trigger(),
            in_text_operator: default_in_text_operator_trigger(),
        }
    }
}

impl TriggerConfig {
    /// (name, pattern) pairs, in a fixed order
    pub fn patterns(&self) -> [(&'static str, &str); 6] {
        [
            ("start_of_line", self.start_of_line.as_str()),
            ("expression_hole", self.expression_hole.as_str()),
            ("operator_hole", self.operator_hole.as_str()),
            ("left_of_expression", self.left_of_expression.as_str()),
            ("right_of_expression", self.right_of_expression.as_str()),
            ("in_text_operator", self.in_text_operator.as_str()),
        ]
    }
}

pub const DEFAULT_WORD_TRIGGER: &str = "^[a-zA-Z]$";
pub const DEFAULT_RIGHT_OF_EXPRESSION_TRIGGER: &str = r"^[a-zA-Z.+\-*/%<>=!]$";
pub const DEFAULT_IN_TEXT_OPERATOR_TRIGGER: &str = r"^[+\-*/%<>=!]$";

fn default_word_trigger() -> String {
    DEFAULT_WORD_TRIGGER.to_string()
}

fn default_right_of_expression_trigger() -> String {
    DEFAULT_RIGHT_OF_EXPRESSION_TRIGGER.to_string()
}

fn default_in_text_operator_trigger() -> String {
    DEFAULT_IN_TEXT_OPERATOR_TRIGGER.to_string()
}

fn default_true() -> bool {
    true
}

/// A named menu and its options. An option naming another category is a link to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MenuCategory {
    pub name: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl MenuCategory {
    pub fn new(name: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// Suggestion menu configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MenuConfig {
    /// Name of the root category (default: "Top")
    #[serde(default = "default_menu_root")]
    pub root: String,

    /// Categories of the "available inserts" menu, in display order
    #[serde(default = "default_menu_categories")]
    pub categories: Vec<MenuCategory>,

    /// Documentation reference per option text
    #[serde(default)]
    pub docs: HashMap<String, String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            root: default_menu_root(),
            categories: default_menu_categories(),
            docs: HashMap::new(),
        }
    }
}

impl MenuConfig {
    pub fn option_map(&self) -> Vec<(String, Vec<String>)> {
        self.categories
            .iter()
            .map(|c| (c.name.clone(), c.options.clone()))
            .collect()
    }
}

fn default_menu_root() -> String {
    "Top".to_string()
}

fn default_menu_categories() -> Vec<MenuCategory> {
    vec![
        MenuCategory::new(
            "Top",
            &[
                "Literals",
                "Function Calls",
                "Operators",
                "Control Statements",
                "Member Function Calls",
                "Other",
            ],
        ),
        MenuCategory::new("Literals", &["\"\"", "0", "True", "False", "[]"]),
        MenuCategory::new("Function Calls", &["print()", "len()", "randint()", "range()"]),
        MenuCategory::new("Operators", &["Comparator", "Arithmetic", "Boolean"]),
        MenuCategory::new("Control Statements", &["if", "elif", "else", "while", "for"]),
        MenuCategory::new("Comparator", &["==", "!=", ">", ">=", "<", "<="]),
        MenuCategory::new("Arithmetic", &["+", "-", "/", "*"]),
        MenuCategory::new("Boolean", &["and", "or", "not"]),
        MenuCategory::new(
            "Member Function Calls",
            &[".append()", ".find()", ".split()", ".replace()", ".join()"],
        ),
        MenuCategory::new("Other", &["var = "]),
    ]
}

impl Config {
    /// Get the default config file path
    pub fn default_config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|p| p.join("structural-editor").join("config.json"))
    }

    /// Load from the default path, falling back to defaults on any failure
    pub fn load_or_default() -> Self {
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                match Self::load_from_file(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}, using defaults",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, pattern) in self.resolver.triggers.patterns() {
            if let Err(e) = regex::Regex::new(pattern) {
                return Err(ConfigError::ValidationError(format!(
                    "trigger {name} is not a valid regex: {e}"
                )));
            }
        }

        if self.menu.root.is_empty() {
            return Err(ConfigError::ValidationError(
                "menu root cannot be empty".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for category in &self.menu.categories {
            if !seen.insert(category.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate menu category: {}",
                    category.name
                )));
            }
        }

        if !self.menu.categories.is_empty() && !seen.contains(self.menu.root.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "menu root {} is not a category",
                self.menu.root
            )));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
