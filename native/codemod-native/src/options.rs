use serde::{Deserialize, Serialize};

/// Package whose size-suffixed icon imports are rewritten.
pub const TARGET_MODULE: &str = "@carbon/icons-react";

/// Specifier the rewritten imports point at.
pub const NEXT_MODULE: &str = "@carbon/icons-react/next";

/// Size an icon renders at when no `size` is given.
pub const DEFAULT_SIZE: u32 = 32;

/// Appended to the size-less name when the module already declares it.
pub const COLLISION_SUFFIX: &str = "Icon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteStyle {
    /// Keep whatever quote character the original literal used.
    #[default]
    Auto,
    Single,
    Double,
}

impl QuoteStyle {
    /// Picks the quote character for a string literal whose original raw text is `raw`.
    pub fn resolve(self, raw: &str) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
            QuoteStyle::Auto => match raw.chars().next() {
                Some('"') => '"',
                _ => '\'',
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintOptions {
    #[serde(default)]
    pub quote: QuoteStyle,
    #[serde(default = "default_trailing_comma")]
    pub trailing_comma: bool,
}

fn default_trailing_comma() -> bool {
    true
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            quote: QuoteStyle::Auto,
            trailing_comma: true,
        }
    }
}

/// Knobs for a single transform run. Fixed for the duration of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    pub target_module: String,
    /// `None` keeps the matched import's module specifier as written.
    pub rewrite_module_to: Option<String>,
    pub default_size: u32,
    pub collision_suffix: String,
    pub print_options: PrintOptions,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            target_module: TARGET_MODULE.to_string(),
            rewrite_module_to: Some(NEXT_MODULE.to_string()),
            default_size: DEFAULT_SIZE,
            collision_suffix: COLLISION_SUFFIX.to_string(),
            print_options: PrintOptions::default(),
        }
    }
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_module(mut self, target: impl Into<String>) -> Self {
        self.target_module = target.into();
        self
    }

    pub fn with_rewrite_module_to(mut self, rewrite: Option<String>) -> Self {
        self.rewrite_module_to = rewrite;
        self
    }

    pub fn with_default_size(mut self, size: u32) -> Self {
        self.default_size = size;
        self
    }
}
