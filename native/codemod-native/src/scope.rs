//! Lexical scope table and reference inventory.
//!
//! One read-only walk over the program records every scope as a
//! [`ScopeRecord`] in a flat table addressed by [`ScopeHandle`], together
//! with every identifier reference, the scope it sits in, and how it is used
//! by its parent node. Resolution later walks parent handles; nothing in the
//! table is mutated after the walk.

use oxc_ast::ast::{
    ArrowFunctionExpression, BindingPattern, CatchClause, Class, ClassType, ExportSpecifier,
    Expression, Function, FunctionType, IdentifierReference, ImportDeclaration,
    ImportDeclarationSpecifier, JSXElementName, JSXOpeningElement, ObjectProperty, Program,
    PropertyKind, TSEnumDeclaration, TSInterfaceDeclaration, TSModuleDeclaration,
    TSModuleDeclarationName, TSTypeAliasDeclaration, TSTypeAnnotation, TSTypeName,
    TSTypeReference, VariableDeclaration, VariableDeclarationKind,
};
use oxc_ast_visit::{walk, Visit};
use oxc_span::{GetSpan, Span};
use oxc_syntax::scope::{ScopeFlags, ScopeId};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeHandle(usize);

impl ScopeHandle {
    pub const ROOT: ScopeHandle = ScopeHandle(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    /// Function bodies, class static blocks and TS namespaces; `var` lands here.
    Function,
    Block,
}

#[derive(Debug)]
pub struct ScopeRecord {
    pub parent: Option<ScopeHandle>,
    pub kind: ScopeKind,
    pub names: HashSet<String>,
    /// Interfaces and type aliases. They never shadow a value.
    pub types: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct ScopeTable {
    scopes: Vec<ScopeRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Value,
    /// Name of a type reference (`let x: Icon`).
    Type,
}

/// Outcome of looking a name up from a reference site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// No scope between the reference and the module root declares the name.
    Root,
    /// A nested scope redeclares the name.
    Shadowed(ScopeHandle),
    /// The parent chain ended before the module root.
    Unreachable,
}

impl ScopeTable {
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn root(&self) -> ScopeHandle {
        ScopeHandle::ROOT
    }

    pub fn get(&self, handle: ScopeHandle) -> Option<&ScopeRecord> {
        self.scopes.get(handle.0)
    }

    pub fn parent(&self, handle: ScopeHandle) -> Option<ScopeHandle> {
        self.get(handle).and_then(|s| s.parent)
    }

    pub fn declares(&self, handle: ScopeHandle, name: &str) -> bool {
        self.get(handle).is_some_and(|s| s.names.contains(name))
    }

    pub fn declares_type(&self, handle: ScopeHandle, name: &str) -> bool {
        self.get(handle).is_some_and(|s| s.types.contains(name))
    }

    fn declares_in(&self, handle: ScopeHandle, name: &str, namespace: Namespace) -> bool {
        match namespace {
            Namespace::Value => self.declares(handle, name),
            Namespace::Type => self.declares(handle, name) || self.declares_type(handle, name),
        }
    }

    /// Iterates from `from` up through its ancestors, `from` included.
    pub fn chain(&self, from: ScopeHandle) -> ScopeChain<'_> {
        ScopeChain {
            table: self,
            next: self.get(from).map(|_| from),
        }
    }

    /// Decides whether `name`, referenced from `from`, still means the
    /// module-level binding. Only scopes strictly below the root are checked.
    pub fn resolve(&self, from: Option<ScopeHandle>, name: &str) -> Resolution {
        self.resolve_in(from, name, Namespace::Value)
    }

    pub fn resolve_in(
        &self,
        from: Option<ScopeHandle>,
        name: &str,
        namespace: Namespace,
    ) -> Resolution {
        let Some(from) = from else {
            return Resolution::Unreachable;
        };
        for scope in self.chain(from) {
            if scope == ScopeHandle::ROOT {
                return Resolution::Root;
            }
            if self.declares_in(scope, name, namespace) {
                return Resolution::Shadowed(scope);
            }
        }
        Resolution::Unreachable
    }

    fn push(
        &mut self,
        parent: Option<ScopeHandle>,
        kind: ScopeKind,
        names: HashSet<String>,
    ) -> ScopeHandle {
        let handle = ScopeHandle(self.scopes.len());
        self.scopes.push(ScopeRecord {
            parent,
            kind,
            names,
            types: HashSet::new(),
        });
        handle
    }
}

pub struct ScopeChain<'t> {
    table: &'t ScopeTable,
    next: Option<ScopeHandle>,
}

impl Iterator for ScopeChain<'_> {
    type Item = ScopeHandle;

    fn next(&mut self) -> Option<ScopeHandle> {
        let current = self.next?;
        self.next = self.table.parent(current);
        Some(current)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REFERENCES
// ═══════════════════════════════════════════════════════════════════════════════

/// How the parent node uses a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// Name of a JSX opening element. `insert_at` is where a leading attribute goes.
    Tag { insert_at: u32 },
    /// Value of an object property. Shorthand `{ Icon }` shares its span with the key.
    Value { shorthand: bool },
    /// Anything else. `export_shorthand` marks `export { Icon }`.
    Other { export_shorthand: bool },
}

impl Usage {
    const PLAIN: Usage = Usage::Other {
        export_shorthand: false,
    };
}

#[derive(Debug, Clone)]
pub struct Reference {
    pub name: String,
    pub span: Span,
    pub scope: Option<ScopeHandle>,
    pub usage: Usage,
    pub namespace: Namespace,
}

impl Reference {
    /// Resolves `name` from this reference's site in its own namespace.
    pub fn resolve(&self, scopes: &ScopeTable, name: &str) -> Resolution {
        scopes.resolve_in(self.scope, name, self.namespace)
    }
}

#[derive(Debug, Default)]
pub struct ScopeAnalysis {
    pub scopes: ScopeTable,
    /// Every identifier reference in document order.
    pub references: Vec<Reference>,
}

impl ScopeAnalysis {
    pub fn references_to<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Reference> + 's {
        self.references.iter().filter(move |r| r.name == name)
    }
}

pub fn analyze(program: &Program<'_>) -> ScopeAnalysis {
    let mut analyzer = ScopeAnalyzer::default();
    analyzer.visit_program(program);
    ScopeAnalysis {
        scopes: analyzer.table,
        references: analyzer.references,
    }
}

#[derive(Default)]
struct ScopeAnalyzer {
    table: ScopeTable,
    stack: Vec<ScopeHandle>,
    /// Names that belong to the next scope entered (parameters, catch params,
    /// function and class expression names).
    pending: HashSet<String>,
    /// Usages registered by a parent node for the reference at that span.
    usages: HashMap<(u32, u32), Usage>,
    type_positions: HashSet<(u32, u32)>,
    references: Vec<Reference>,
}

impl ScopeAnalyzer {
    fn current(&self) -> Option<ScopeHandle> {
        self.stack.last().copied()
    }

    fn declare(&mut self, name: &str) {
        if let Some(handle) = self.current() {
            self.table.scopes[handle.0].names.insert(name.to_string());
        }
    }

    fn declare_type(&mut self, name: &str) {
        if let Some(handle) = self.current() {
            self.table.scopes[handle.0].types.insert(name.to_string());
        }
    }

    fn declare_var(&mut self, name: &str) {
        let target = self
            .stack
            .iter()
            .rev()
            .copied()
            .find(|h| self.table.scopes[h.0].kind != ScopeKind::Block);
        if let Some(handle) = target {
            self.table.scopes[handle.0].names.insert(name.to_string());
        }
    }

    fn mark(&mut self, span: Span, usage: Usage) {
        self.usages.insert((span.start, span.end), usage);
    }
}

impl<'a> Visit<'a> for ScopeAnalyzer {
    fn enter_scope(&mut self, flags: ScopeFlags, _scope_id: &Cell<Option<ScopeId>>) {
        let kind = if flags.contains(ScopeFlags::Top) {
            ScopeKind::Module
        } else if flags.intersects(
            ScopeFlags::Function | ScopeFlags::ClassStaticBlock | ScopeFlags::TsModuleBlock,
        ) {
            ScopeKind::Function
        } else {
            ScopeKind::Block
        };
        let names = std::mem::take(&mut self.pending);
        let parent = self.current();
        let handle = self.table.push(parent, kind, names);
        self.stack.push(handle);
    }

    fn leave_scope(&mut self) {
        self.stack.pop();
    }

    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        let usage = self
            .usages
            .remove(&(ident.span.start, ident.span.end))
            .unwrap_or(Usage::PLAIN);
        let namespace = if self.type_positions.remove(&(ident.span.start, ident.span.end)) {
            Namespace::Type
        } else {
            Namespace::Value
        };
        self.references.push(Reference {
            name: ident.name.to_string(),
            span: ident.span,
            scope: self.current(),
            usage,
            namespace,
        });
    }

    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        if let Some(specifiers) = &decl.specifiers {
            for specifier in specifiers {
                let local = match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(s) => &s.local,
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => &s.local,
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => &s.local,
                };
                self.declare(local.name.as_str());
            }
        }
        walk::walk_import_declaration(self, decl);
    }

    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration<'a>) {
        let mut names = HashSet::new();
        for declarator in &decl.declarations {
            collect_pattern_names(&declarator.id, &mut names);
        }
        for name in &names {
            if decl.kind == VariableDeclarationKind::Var {
                self.declare_var(name);
            } else {
                self.declare(name);
            }
        }
        walk::walk_variable_declaration(self, decl);
    }

    fn visit_function(&mut self, func: &Function<'a>, flags: ScopeFlags) {
        if let Some(id) = &func.id {
            if func.r#type == FunctionType::FunctionExpression {
                self.pending.insert(id.name.to_string());
            } else {
                self.declare(id.name.as_str());
            }
        }
        let mut collector = BindingCollector::default();
        collector.visit_formal_parameters(&func.params);
        self.pending.extend(collector.symbols);
        walk::walk_function(self, func, flags);
    }

    fn visit_arrow_function_expression(&mut self, func: &ArrowFunctionExpression<'a>) {
        let mut collector = BindingCollector::default();
        collector.visit_formal_parameters(&func.params);
        self.pending.extend(collector.symbols);
        walk::walk_arrow_function_expression(self, func);
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        if let Some(id) = &class.id {
            match class.r#type {
                ClassType::ClassDeclaration => self.declare(id.name.as_str()),
                // Bound only inside the class body.
                ClassType::ClassExpression => {
                    self.pending.insert(id.name.to_string());
                }
            }
        }
        walk::walk_class(self, class);
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause<'a>) {
        if let Some(param) = &clause.param {
            collect_pattern_names(&param.pattern, &mut self.pending);
        }
        walk::walk_catch_clause(self, clause);
    }

    fn visit_ts_enum_declaration(&mut self, decl: &TSEnumDeclaration<'a>) {
        self.declare(decl.id.name.as_str());
        walk::walk_ts_enum_declaration(self, decl);
    }

    fn visit_ts_module_declaration(&mut self, decl: &TSModuleDeclaration<'a>) {
        if let TSModuleDeclarationName::Identifier(id) = &decl.id {
            self.declare(id.name.as_str());
        }
        walk::walk_ts_module_declaration(self, decl);
    }

    fn visit_ts_interface_declaration(&mut self, decl: &TSInterfaceDeclaration<'a>) {
        self.declare_type(decl.id.name.as_str());
        walk::walk_ts_interface_declaration(self, decl);
    }

    fn visit_ts_type_alias_declaration(&mut self, decl: &TSTypeAliasDeclaration<'a>) {
        self.declare_type(decl.id.name.as_str());
        walk::walk_ts_type_alias_declaration(self, decl);
    }

    fn visit_ts_type_reference(&mut self, ty: &TSTypeReference<'a>) {
        if let TSTypeName::IdentifierReference(id) = &ty.type_name {
            self.type_positions.insert((id.span.start, id.span.end));
        }
        walk::walk_ts_type_reference(self, ty);
    }

    fn visit_jsx_opening_element(&mut self, elem: &JSXOpeningElement<'a>) {
        if let JSXElementName::IdentifierReference(id) = &elem.name {
            let insert_at = elem
                .type_arguments
                .as_ref()
                .map_or(id.span.end, |args| args.span.end);
            self.mark(id.span, Usage::Tag { insert_at });
        }
        walk::walk_jsx_opening_element(self, elem);
    }

    fn visit_object_property(&mut self, prop: &ObjectProperty<'a>) {
        if let Expression::Identifier(id) = strip_parens(&prop.value) {
            if prop.kind == PropertyKind::Init && !prop.method {
                self.mark(
                    id.span,
                    Usage::Value {
                        shorthand: prop.shorthand,
                    },
                );
            }
        }
        walk::walk_object_property(self, prop);
    }

    fn visit_export_specifier(&mut self, spec: &ExportSpecifier<'a>) {
        let local = spec.local.span();
        if local == spec.exported.span() {
            self.mark(
                local,
                Usage::Other {
                    export_shorthand: true,
                },
            );
        }
        walk::walk_export_specifier(self, spec);
    }
}

/// `((Icon))` -> `Icon`.
fn strip_parens<'e, 'a>(mut expr: &'e Expression<'a>) -> &'e Expression<'a> {
    while let Expression::ParenthesizedExpression(paren) = expr {
        expr = &paren.expression;
    }
    expr
}

fn collect_pattern_names(pattern: &BindingPattern<'_>, names: &mut HashSet<String>) {
    let mut collector = BindingCollector::default();
    collector.visit_binding_pattern(pattern);
    names.extend(collector.symbols);
}

/// Collects the names a binding pattern introduces.
#[derive(Default)]
struct BindingCollector {
    symbols: HashSet<String>,
}

impl<'a> Visit<'a> for BindingCollector {
    fn visit_binding_identifier(&mut self, ident: &oxc_ast::ast::BindingIdentifier<'a>) {
        self.symbols.insert(ident.name.to_string());
    }

    // Default values hold references, not bindings.
    fn visit_expression(&mut self, _expr: &Expression<'a>) {}

    fn visit_ts_type_annotation(&mut self, _annotation: &TSTypeAnnotation<'a>) {}
}
