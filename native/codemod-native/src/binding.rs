use crate::error::{Result, TransformError};
use crate::options::TransformOptions;
use crate::scope::ScopeTable;
use oxc_ast::ast::{ImportSpecifier, ModuleExportName};
use oxc_span::Span;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

lazy_static::lazy_static! {
    /// `<name><two digits>`, name taken greedily.
    static ref SIZE_SUFFIX: Regex = Regex::new(r"^(.+)(\d\d)$").unwrap();
}

/// A size-suffixed icon import and the name it is rewritten to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub imported_name: String,
    pub local_name: String,
    pub decomposed_name: String,
    pub suffix_value: u32,
    /// Local name every in-scope reference is renamed to.
    pub replacement: String,
    /// `import { Add16 as Plus }`: the alias is kept as the replacement.
    pub aliased: bool,
    /// `import { type Add16 }`.
    pub type_only: bool,
    pub specifier_span: Span,
}

impl ImportBinding {
    /// Text of the rewritten import specifier.
    pub fn specifier_text(&self) -> String {
        let prefix = if self.type_only { "type " } else { "" };
        if self.replacement == self.decomposed_name {
            format!("{}{}", prefix, self.decomposed_name)
        } else {
            format!("{}{} as {}", prefix, self.decomposed_name, self.replacement)
        }
    }

    pub fn needs_size(&self, default_size: u32) -> bool {
        self.suffix_value != default_size
    }
}

/// Per-binding summary surfaced to callers and the batch report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingReport {
    pub imported: String,
    pub replacement: String,
    pub size: u32,
    pub rewritten_references: usize,
    pub skipped_references: usize,
    /// Rewritten references that a nested declaration of `replacement` now binds.
    pub captured_references: usize,
}

/// Splits `IconName24` into `("IconName", 24)`.
pub fn decompose(imported: &str) -> Result<(String, u32)> {
    let caps = SIZE_SUFFIX
        .captures(imported)
        .ok_or_else(|| TransformError::naming(imported, "expected a two-digit size suffix"))?;
    let name = caps.get(1).map_or("", |m| m.as_str());
    let digits = caps.get(2).map_or("", |m| m.as_str());
    if name.is_empty() {
        return Err(TransformError::naming(imported, "empty icon name"));
    }
    let size = digits
        .parse::<u32>()
        .map_err(|e| TransformError::naming(imported, format!("unable to parse size: {}", e)))?;
    Ok((name.to_string(), size))
}

pub fn imported_name(specifier: &ImportSpecifier<'_>) -> String {
    match &specifier.imported {
        ModuleExportName::IdentifierName(id) => id.name.to_string(),
        ModuleExportName::IdentifierReference(id) => id.name.to_string(),
        ModuleExportName::StringLiteral(s) => s.value.to_string(),
    }
}

/// Chooses replacement names for the specifiers of the located imports.
///
/// Names handed out earlier in the same run count as declared, so importing
/// two sizes of one icon never produces two identical bindings.
pub struct BindingAnalyzer<'t> {
    root_scope: &'t ScopeTable,
    collision_suffix: String,
    claimed: HashSet<String>,
}

impl<'t> BindingAnalyzer<'t> {
    pub fn new(root_scope: &'t ScopeTable, options: &TransformOptions) -> Self {
        Self {
            root_scope,
            collision_suffix: options.collision_suffix.clone(),
            claimed: HashSet::new(),
        }
    }

    pub fn analyze(&mut self, specifier: &ImportSpecifier<'_>) -> Result<ImportBinding> {
        let imported = imported_name(specifier);
        let local = specifier.local.name.to_string();
        let (decomposed, size) = decompose(&imported)?;

        let aliased = imported != local;
        let replacement = if aliased {
            local.clone()
        } else {
            self.safe_binding(&decomposed)
        };
        self.claimed.insert(replacement.clone());

        Ok(ImportBinding {
            imported_name: imported,
            local_name: local,
            decomposed_name: decomposed,
            suffix_value: size,
            replacement,
            aliased,
            type_only: specifier.import_kind.is_type(),
            specifier_span: specifier.span,
        })
    }

    fn safe_binding(&self, name: &str) -> String {
        let root = self.root_scope.root();
        let declared =
            self.root_scope.declares(root, name) || self.root_scope.declares_type(root, name);
        if declared || self.claimed.contains(name) {
            format!("{}{}", name, self.collision_suffix)
        } else {
            name.to_string()
        }
    }
}
