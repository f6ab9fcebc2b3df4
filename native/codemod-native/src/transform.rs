//! Whole-file transform: parse, analyse, plan, splice, verify.

use crate::binding::{BindingAnalyzer, BindingReport, ImportBinding};
use crate::error::{Result, TransformError};
use crate::imports::{find_imports, named_specifiers};
use crate::options::TransformOptions;
use crate::renamer::ReferenceRewriter;
use crate::scope;
#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_ast::ast::ImportDeclaration;
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub code: String,
    pub changed: bool,
    pub bindings: Vec<BindingReport>,
}

impl TransformOutput {
    fn unchanged(source: &str) -> Self {
        Self {
            code: source.to_string(),
            changed: false,
            bindings: Vec::new(),
        }
    }
}

/// TSX module: parses plain JS, JSX and TypeScript alike.
pub fn default_source_type() -> SourceType {
    SourceType::default()
        .with_typescript(true)
        .with_module(true)
        .with_jsx(true)
}

/// Source type for a file on disk. Unknown extensions fall back to
/// [`default_source_type`]; `.ts` stays JSX-free so `<T>expr` casts parse.
pub fn source_type_for(path: &Path) -> SourceType {
    match SourceType::from_path(path) {
        Ok(st) if st.is_typescript() && !st.is_jsx() => st.with_module(true),
        Ok(st) => st.with_module(true).with_jsx(true),
        Err(_) => default_source_type(),
    }
}

pub fn transform_source(source: &str, options: &TransformOptions) -> Result<TransformOutput> {
    run(source, default_source_type(), "<input>", options)
}

pub fn transform_file_source(
    path: &Path,
    source: &str,
    options: &TransformOptions,
) -> Result<TransformOutput> {
    run(
        source,
        source_type_for(path),
        &path.to_string_lossy(),
        options,
    )
}

fn run(
    source: &str,
    source_type: SourceType,
    path: &str,
    options: &TransformOptions,
) -> Result<TransformOutput> {
    let _span = tracing::debug_span!("transform", path).entered();

    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
        return Err(TransformError::Parse {
            path: path.to_string(),
            messages: ret.errors.iter().map(|e| e.to_string()).collect(),
        });
    }
    let program = ret.program;

    let imports = find_imports(&program, &options.target_module);
    if imports.is_empty() {
        tracing::debug!(
            target_module = %options.target_module,
            "no matching import, passing through"
        );
        return Ok(TransformOutput::unchanged(source));
    }

    let analysis = scope::analyze(&program);

    // Every specifier is validated before anything is planned, so a bad
    // name aborts with the source untouched.
    let mut analyzer = BindingAnalyzer::new(&analysis.scopes, options);
    let bindings = imports
        .iter()
        .flat_map(|decl| named_specifiers(decl))
        .map(|specifier| analyzer.analyze(specifier))
        .collect::<Result<Vec<ImportBinding>>>()?;

    let mut rewriter = ReferenceRewriter::new(source, &analysis, options);
    if let Some(next) = &options.rewrite_module_to {
        for decl in &imports {
            let literal = module_literal(source, decl, next, options);
            rewriter.plan.replace(decl.source.span, literal);
        }
    }

    let mut reports = Vec::with_capacity(bindings.len());
    for binding in &bindings {
        rewriter
            .plan
            .replace(binding.specifier_span, binding.specifier_text());
        reports.push(rewriter.rewrite(binding));
    }

    let code = rewriter.into_plan().apply(source)?;
    verify_output(&code, source_type)?;

    let changed = code != source;
    if changed {
        tracing::info!(path, bindings = reports.len(), "rewrote icon imports");
    }
    Ok(TransformOutput {
        code,
        changed,
        bindings: reports,
    })
}

/// New module specifier literal, quoted per the print options.
fn module_literal(
    source: &str,
    decl: &ImportDeclaration<'_>,
    module: &str,
    options: &TransformOptions,
) -> String {
    let raw = decl.source.span.source_text(source);
    let quote = options.print_options.quote.resolve(raw);
    let mut literal = String::with_capacity(module.len() + 2);
    literal.push(quote);
    for c in module.chars() {
        if c == quote || c == '\\' {
            literal.push('\\');
        }
        literal.push(c);
    }
    literal.push(quote);
    literal
}

/// Re-parses rewritten output so a bad splice never reaches disk.
fn verify_output(code: &str, source_type: SourceType) -> Result<()> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, code, source_type).parse();
    if ret.panicked || !ret.errors.is_empty() {
        return Err(TransformError::InvalidOutput {
            messages: ret.errors.iter().map(|e| e.to_string()).collect(),
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI BRIDGE
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi(object)]
pub struct NativeTransformResult {
    pub code: String,
    pub changed: bool,
}

#[cfg(feature = "napi")]
#[napi]
pub fn transform_icon_size_prop_native(
    source: String,
    options_json: Option<String>,
) -> napi::Result<NativeTransformResult> {
    let options = match options_json {
        Some(json) => serde_json::from_str::<TransformOptions>(&json)
            .map_err(|e| napi::Error::from_reason(e.to_string()))?,
        None => TransformOptions::default(),
    };
    let output = transform_source(&source, &options)
        .map_err(|e| napi::Error::from_reason(format!("[{}] {}", e.code(), e)))?;
    Ok(NativeTransformResult {
        code: output.code,
        changed: output.changed,
    })
}
