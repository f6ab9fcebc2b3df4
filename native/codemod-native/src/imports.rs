use oxc_ast::ast::{
    ImportDeclaration, ImportDeclarationSpecifier, ImportSpecifier, Program, Statement,
};

/// Top-level import declarations whose module specifier is exactly `target`.
pub fn find_imports<'p, 'a>(
    program: &'p Program<'a>,
    target: &str,
) -> Vec<&'p ImportDeclaration<'a>> {
    program
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::ImportDeclaration(decl) if decl.source.value.as_str() == target => {
                Some(&**decl)
            }
            _ => None,
        })
        .collect()
}

/// Named specifiers (`{ A, B as C }`) of an import, in source order.
pub fn named_specifiers<'p, 'a>(
    decl: &'p ImportDeclaration<'a>,
) -> impl Iterator<Item = &'p ImportSpecifier<'a>> {
    decl.specifiers
        .iter()
        .flat_map(|specifiers| specifiers.iter())
        .filter_map(|specifier| match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(s) => Some(&**s),
            _ => None,
        })
}
