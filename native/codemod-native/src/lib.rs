//! # Icon Size-Prop Codemod
//!
//! Rewrites imports of size-suffixed icons into size-less icons that take an
//! explicit `size` prop:
//!
//! ```text
//! import { Add16 } from '@carbon/icons-react';      import { Add } from '@carbon/icons-react/next';
//! <Add16 />                                    =>   <Add size={16} />
//! const map = { add: Add16 };                       const map = { add: React.forwardRef(...) };
//! ```
//!
//! ## Rewrite Invariants
//!
//! 1. **Exact module match**: only top-level imports whose specifier equals the
//!    target module are touched. No match means the source comes back as is.
//!
//! 2. **Naming convention**: every named import must end in a two-digit size.
//!    Anything else aborts the file (CM-ERR-NAMING-001) before a single edit is
//!    planned; there is never partial output.
//!
//! 3. **Alias preservation**: `import { Add16 as Plus }` keeps `Plus`. Otherwise
//!    the binding becomes the size-less name, or `<name>Icon` when the module
//!    already declares that name.
//!
//! 4. **Scope safety**: a reference is rewritten only when no scope between it
//!    and the module root redeclares the name. Interfaces and type aliases
//!    only shadow type references.
//!
//! 5. **Default size is implicit**: a size equal to the default (32) is never
//!    written out.
//!
//! 6. **Text preservation**: output is the input with span edits spliced in;
//!    unrelated formatting and comments survive byte-for-byte, and the result
//!    is re-parsed before it is returned.

pub mod binding;
pub mod edit;
pub mod error;
pub mod imports;
pub mod logging;
pub mod options;
pub mod renamer;
pub mod runner;
pub mod scope;
pub mod synth;
pub mod transform;

#[cfg(test)]
mod runner_tests;
#[cfg(test)]
mod transform_tests;

pub use binding::{BindingReport, ImportBinding};
pub use error::TransformError;
pub use options::{PrintOptions, QuoteStyle, TransformOptions};
pub use transform::{transform_file_source, transform_source, TransformOutput};

#[cfg(feature = "napi")]
pub use transform::transform_icon_size_prop_native;
