use crate::binding::{BindingReport, ImportBinding};
use crate::edit::RewritePlan;
use crate::options::TransformOptions;
use crate::scope::{Reference, Resolution, ScopeAnalysis, Usage};
use crate::synth::{line_indent, synthesize};

/// Renames the references of one import binding at a time and adds the
/// size information the old name used to carry.
pub struct ReferenceRewriter<'s> {
    source: &'s str,
    analysis: &'s ScopeAnalysis,
    options: &'s TransformOptions,
    pub plan: RewritePlan,
}

impl<'s> ReferenceRewriter<'s> {
    pub fn new(
        source: &'s str,
        analysis: &'s ScopeAnalysis,
        options: &'s TransformOptions,
    ) -> Self {
        Self {
            source,
            analysis,
            options,
            plan: RewritePlan::new(),
        }
    }

    pub fn into_plan(self) -> RewritePlan {
        self.plan
    }

    /// Rewrites every reference to `binding` in document order.
    pub fn rewrite(&mut self, binding: &ImportBinding) -> BindingReport {
        let mut rewritten = 0;
        let mut skipped = 0;
        let mut captured = 0;

        for reference in self.analysis.references_to(&binding.local_name) {
            match reference.resolve(&self.analysis.scopes, &binding.local_name) {
                Resolution::Root => {
                    if self.is_captured(binding, reference) {
                        captured += 1;
                    }
                    self.rewrite_reference(binding, reference);
                    rewritten += 1;
                }
                Resolution::Shadowed(scope) => {
                    tracing::debug!(
                        name = %binding.local_name,
                        offset = reference.span.start,
                        scope = scope.index(),
                        "reference shadowed by a local declaration, leaving it"
                    );
                    skipped += 1;
                }
                Resolution::Unreachable => {
                    tracing::debug!(
                        name = %binding.local_name,
                        offset = reference.span.start,
                        "reference has no scope chain to the module root, leaving it"
                    );
                    skipped += 1;
                }
            }
        }

        BindingReport {
            imported: binding.imported_name.clone(),
            replacement: binding.replacement.clone(),
            size: binding.suffix_value,
            rewritten_references: rewritten,
            skipped_references: skipped,
            captured_references: captured,
        }
    }

    /// True when a nested declaration of the replacement name will bind the
    /// renamed reference instead of the import.
    fn is_captured(&self, binding: &ImportBinding, reference: &Reference) -> bool {
        if binding.replacement == binding.local_name {
            return false;
        }
        match reference.resolve(&self.analysis.scopes, &binding.replacement) {
            Resolution::Shadowed(scope) => {
                tracing::warn!(
                    name = %binding.replacement,
                    offset = reference.span.start,
                    scope = scope.index(),
                    "renamed reference is captured by a local declaration of the new name"
                );
                true
            }
            _ => false,
        }
    }

    fn rewrite_reference(&mut self, binding: &ImportBinding, reference: &Reference) {
        let local = binding.local_name.as_str();
        let replacement = binding.replacement.as_str();
        let sized = binding.needs_size(self.options.default_size);

        match reference.usage {
            Usage::Tag { insert_at } => {
                self.plan.replace(reference.span, replacement);
                if sized {
                    self.plan
                        .insert(insert_at, format!(" size={{{}}}", binding.suffix_value));
                }
            }
            Usage::Value { shorthand } => {
                let value = if sized {
                    let indent = line_indent(self.source, reference.span.start);
                    synthesize(
                        replacement,
                        binding.suffix_value,
                        indent,
                        &self.options.print_options,
                    )
                } else {
                    replacement.to_string()
                };
                // `{ Add16 }` keeps its key: `{ Add16: <value> }`.
                if shorthand && value != local {
                    self.plan.replace(reference.span, format!("{}: {}", local, value));
                } else {
                    self.plan.replace(reference.span, value);
                }
            }
            Usage::Other { export_shorthand } => {
                // `export { Add16 }` keeps its public name.
                if export_shorthand && replacement != local {
                    self.plan
                        .replace(reference.span, format!("{} as {}", replacement, local));
                } else {
                    self.plan.replace(reference.span, replacement);
                }
            }
        }
    }
}
