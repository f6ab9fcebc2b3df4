//! End-to-end rewrites of whole modules.

#[cfg(test)]
mod tests {
    use crate::error::{ERR_NAMING_CONVENTION, ERR_PARSE};
    use crate::options::{QuoteStyle, TransformOptions};
    use crate::transform::{transform_file_source, transform_source};
    use std::path::Path;

    fn run(code: &str) -> String {
        transform_source(code, &TransformOptions::default())
            .expect("transform should succeed")
            .code
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // PASS-THROUGH
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_no_target_import_passes_through() {
        let code = "import React from 'react';\nconst   a =  1 ;  // odd spacing\n<Add16 />;\n";
        let out = transform_source(code, &TransformOptions::default()).unwrap();
        assert!(!out.changed);
        assert_eq!(out.code, code);
        assert!(out.bindings.is_empty());
    }

    #[test]
    fn test_similar_module_is_not_matched() {
        let code = "import { Add16 } from '@carbon/icons-react/es';\nconst a = <Add16 />;\n";
        assert_eq!(run(code), code);
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // TAG USAGE
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_tag_usage_gets_size_attribute() {
        let code = "import { IconName24 } from '@carbon/icons-react';\nconst el = <IconName24 />;\n";
        assert_eq!(
            run(code),
            "import { IconName } from '@carbon/icons-react/next';\nconst el = <IconName size={24} />;\n"
        );
    }

    #[test]
    fn test_size_attribute_goes_first_and_closing_tag_is_renamed() {
        let code = r#"import { Add16 } from '@carbon/icons-react';
const el = <Add16 className="icon" aria-label="Add">text</Add16>;
"#;
        assert_eq!(
            run(code),
            r#"import { Add } from '@carbon/icons-react/next';
const el = <Add size={16} className="icon" aria-label="Add">text</Add>;
"#
        );
    }

    #[test]
    fn test_default_size_is_never_written() {
        let code = "import { Add32 } from '@carbon/icons-react';\nconst el = <Add32 />;\nconst map = { add: Add32 };\n";
        let out = run(code);
        assert_eq!(
            out,
            "import { Add } from '@carbon/icons-react/next';\nconst el = <Add />;\nconst map = { add: Add };\n"
        );
        assert!(!out.contains("size"));
    }

    #[test]
    fn test_custom_default_size() {
        let code = "import { Add16 } from '@carbon/icons-react';\nconst el = <Add16 />;\n";
        let options = TransformOptions::default().with_default_size(16);
        let out = transform_source(code, &options).unwrap();
        assert!(out.code.contains("<Add />"));
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // VALUE USAGE
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_value_usage_is_wrapped() {
        let code = "import { IconName24 } from '@carbon/icons-react';\nconst map = { key: IconName24 };\n";
        assert_eq!(
            run(code),
            "import { IconName } from '@carbon/icons-react/next';\nconst map = { key: React.forwardRef((props, ref) => <IconName ref={ref} size={24} {...props} />) };\n"
        );
    }

    #[test]
    fn test_parenthesized_value_is_wrapped() {
        let code = "import { Add16 } from '@carbon/icons-react';\nconst map = { key: ((Add16)) };\n";
        assert_eq!(
            run(code),
            "import { Add } from '@carbon/icons-react/next';\nconst map = { key: ((React.forwardRef((props, ref) => <Add ref={ref} size={16} {...props} />))) };\n"
        );
    }

    #[test]
    fn test_lowercase_alias_uses_create_element() {
        let code = "import { Add16 as add } from '@carbon/icons-react';\nconst map = {\n  key: add,\n};\n";
        assert_eq!(
            run(code),
            "import { Add as add } from '@carbon/icons-react/next';\nconst map = {\n  key: (props) => React.forwardRef((props, ref) => React.createElement(add, {\n    ref,\n    size: 16,\n    ...props,\n  })),\n};\n"
        );
    }

    #[test]
    fn test_shorthand_property_keeps_key() {
        let code = "import { Add16, Bee32 } from '@carbon/icons-react';\nconst map = { Add16, Bee32 };\n";
        assert_eq!(
            run(code),
            "import { Add, Bee } from '@carbon/icons-react/next';\nconst map = { Add16: React.forwardRef((props, ref) => <Add ref={ref} size={16} {...props} />), Bee32: Bee };\n"
        );
    }

    #[test]
    fn test_other_usages_are_plain_renames() {
        let code = "import { Add16 } from '@carbon/icons-react';\nconst b = <Button renderIcon={Add16} />;\nfoo(Add16);\nconst m = icons.Add16;\n";
        assert_eq!(
            run(code),
            "import { Add } from '@carbon/icons-react/next';\nconst b = <Button renderIcon={Add} />;\nfoo(Add);\nconst m = icons.Add16;\n"
        );
    }

    #[test]
    fn test_shorthand_export_keeps_public_name() {
        let code = "import { Add16 } from '@carbon/icons-react';\nexport { Add16 };\nexport default Add16;\n";
        assert_eq!(
            run(code),
            "import { Add } from '@carbon/icons-react/next';\nexport { Add as Add16 };\nexport default Add;\n"
        );
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // BINDING NAMES
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_aliased_import_keeps_alias() {
        let code = "import { Add16 as Plus } from '@carbon/icons-react';\nconst el = <Plus />;\n";
        assert_eq!(
            run(code),
            "import { Add as Plus } from '@carbon/icons-react/next';\nconst el = <Plus size={16} />;\n"
        );
    }

    #[test]
    fn test_collision_with_module_declaration() {
        let code = "import { Add16 } from '@carbon/icons-react';\nconst Add = 'add';\nconst el = <Add16 />;\n";
        assert_eq!(
            run(code),
            "import { Add as AddIcon } from '@carbon/icons-react/next';\nconst Add = 'add';\nconst el = <AddIcon size={16} />;\n"
        );
    }

    #[test]
    fn test_two_sizes_of_one_icon_do_not_collide() {
        let code = "import { Add16, Add20 } from '@carbon/icons-react';\nconst a = <Add16 />;\nconst b = <Add20 />;\n";
        assert_eq!(
            run(code),
            "import { Add, Add as AddIcon } from '@carbon/icons-react/next';\nconst a = <Add size={16} />;\nconst b = <AddIcon size={20} />;\n"
        );
    }

    #[test]
    fn test_multiple_import_declarations() {
        let code = "import { Add16 } from '@carbon/icons-react';\nimport { Bee24 } from '@carbon/icons-react';\nconst a = [<Add16 />, <Bee24 />];\n";
        assert_eq!(
            run(code),
            "import { Add } from '@carbon/icons-react/next';\nimport { Bee } from '@carbon/icons-react/next';\nconst a = [<Add size={16} />, <Bee size={24} />];\n"
        );
    }

    #[test]
    fn test_binding_report() {
        let code = "import { Add16 } from '@carbon/icons-react';\nconst a = <Add16 />;\nfunction f(Add16) { return Add16; }\n";
        let out = transform_source(code, &TransformOptions::default()).unwrap();
        assert_eq!(out.bindings.len(), 1);
        let report = &out.bindings[0];
        assert_eq!(report.imported, "Add16");
        assert_eq!(report.replacement, "Add");
        assert_eq!(report.size, 16);
        assert_eq!(report.rewritten_references, 1);
        assert_eq!(report.skipped_references, 1);
        assert_eq!(report.captured_references, 0);
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // SCOPES
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_shadowed_references_are_untouched() {
        let code = r#"import { Add16 } from '@carbon/icons-react';
function render(Add16) {
  return <Add16 />;
}
function other() {
  const Add16 = () => null;
  return <Add16 />;
}
const a = <Add16 />;
"#;
        assert_eq!(
            run(code),
            r#"import { Add } from '@carbon/icons-react/next';
function render(Add16) {
  return <Add16 />;
}
function other() {
  const Add16 = () => null;
  return <Add16 />;
}
const a = <Add size={16} />;
"#
        );
    }

    #[test]
    fn test_class_expression_name_shadows_inside_its_body() {
        let code = "import { Add16 } from '@carbon/icons-react';\nconst C = class Add16 {\n  r() { return <Add16 />; }\n};\nconst a = <Add16 />;\n";
        assert_eq!(
            run(code),
            "import { Add } from '@carbon/icons-react/next';\nconst C = class Add16 {\n  r() { return <Add16 />; }\n};\nconst a = <Add size={16} />;\n"
        );
    }

    #[test]
    fn test_local_type_alias_does_not_shadow_value() {
        let code = "import { Add16 } from '@carbon/icons-react';\nfunction f() {\n  type Add16 = string;\n  let label: Add16 = '';\n  return <Add16 title={label} />;\n}\n";
        assert_eq!(
            run(code),
            "import { Add } from '@carbon/icons-react/next';\nfunction f() {\n  type Add16 = string;\n  let label: Add16 = '';\n  return <Add size={16} title={label} />;\n}\n"
        );
    }

    #[test]
    fn test_capture_by_local_replacement_name_is_reported() {
        let code = "import { Add16 } from '@carbon/icons-react';\nfunction f() {\n  const Add = 1;\n  return <Add16 />;\n}\nconst a = <Add16 />;\n";
        let out = transform_source(code, &TransformOptions::default()).unwrap();
        assert!(out.code.contains("return <Add size={16} />;"));
        let report = &out.bindings[0];
        assert_eq!(report.rewritten_references, 2);
        assert_eq!(report.captured_references, 1);
    }

    #[test]
    fn test_nested_function_sees_module_binding() {
        let code = "import { Add16 } from '@carbon/icons-react';\nfunction App() {\n  const items = [1].map((n) => <Add16 key={n} />);\n  return items;\n}\n";
        assert_eq!(
            run(code),
            "import { Add } from '@carbon/icons-react/next';\nfunction App() {\n  const items = [1].map((n) => <Add size={16} key={n} />);\n  return items;\n}\n"
        );
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // FORMATTING
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_unrelated_text_is_preserved() {
        let code = "// header comment\nimport   React from 'react' ;\nimport { Add16 } from \"@carbon/icons-react\";\n\n\nconst   x = {a:1,   b : 2};  /* trailing */\nconst el = <Add16/>;\n";
        assert_eq!(
            run(code),
            "// header comment\nimport   React from 'react' ;\nimport { Add } from \"@carbon/icons-react/next\";\n\n\nconst   x = {a:1,   b : 2};  /* trailing */\nconst el = <Add size={16}/>;\n"
        );
    }

    #[test]
    fn test_forced_quote_style() {
        let code = "import { Add16 } from '@carbon/icons-react';\n";
        let mut options = TransformOptions::default();
        options.print_options.quote = QuoteStyle::Double;
        let out = transform_source(code, &options).unwrap();
        assert_eq!(out.code, "import { Add } from \"@carbon/icons-react/next\";\n");
    }

    #[test]
    fn test_keep_module_specifier() {
        let code = "import { Add16 } from '@carbon/icons-react';\n";
        let options = TransformOptions::default().with_rewrite_module_to(None);
        let out = transform_source(code, &options).unwrap();
        assert_eq!(out.code, "import { Add } from '@carbon/icons-react';\n");
    }

    #[test]
    fn test_typescript_file_with_angle_cast() {
        let code = "import { Add16 } from '@carbon/icons-react';\nconst x = <any>Add16;\n";
        let out = transform_file_source(Path::new("icons.ts"), code, &TransformOptions::default())
            .unwrap();
        assert_eq!(
            out.code,
            "import { Add } from '@carbon/icons-react/next';\nconst x = <any>Add;\n"
        );
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // FAILURES & IDEMPOTENCE
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_malformed_name_is_fatal() {
        let code = "import { Icon } from '@carbon/icons-react';\nconst el = <Icon />;\n";
        let err = transform_source(code, &TransformOptions::default()).unwrap_err();
        assert_eq!(err.code(), ERR_NAMING_CONVENTION);
        assert!(err.to_string().contains("Icon"));
    }

    #[test]
    fn test_malformed_name_after_valid_one_still_aborts() {
        let code = "import { Add16, Bad } from '@carbon/icons-react';\nconst el = <Add16 />;\n";
        let err = transform_source(code, &TransformOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::TransformError::NamingConvention { ref binding, .. } if binding == "Bad"
        ));
    }

    #[test]
    fn test_parse_error_is_fatal() {
        let code = "import { Add16 } from '@carbon/icons-react';\nconst = ;\n";
        let err = transform_source(code, &TransformOptions::default()).unwrap_err();
        assert_eq!(err.code(), ERR_PARSE);
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let code = "import { Add16, Bee20 as B } from '@carbon/icons-react';\nconst a = <Add16 />;\nconst m = { b: B, Add16 };\n";
        let first = transform_source(code, &TransformOptions::default()).unwrap();
        assert!(first.changed);
        let second = transform_source(&first.code, &TransformOptions::default()).unwrap();
        assert!(!second.changed);
        assert_eq!(second.code, first.code);
    }
}
