//! tolbok - annotation-driven boilerplate expansion for Java-like ASTs
//!
//! Given a parsed class tree carrying trigger annotations, tolbok rewrites
//! the tree in place before it is handed to later compilation stages:
//!
//! - **`@Getter`**: synthesizes an accessor method per annotated field (or
//!   per qualifying field of an annotated class), with conflict detection
//!   against user-authored methods and idempotent re-application.
//! - **`@ThreadNamed`**: wraps a method body in save/set/try-finally-restore
//!   bracketing of the executing thread's display name, keeping a leading
//!   `this(...)`/`super(...)` call outside the protected region.
//!
//! ## Expansion flow
//!
//! ```text
//! Annotated AST → Expander (collect occurrences → strip triggers → dispatch)
//!                      ↓                       ↓
//!              GetterSynthesizer      ThreadContextWrapper
//!                      ↓                       ↓
//!               Expanded AST  +  Diagnostics (warnings / errors)
//! ```
//!
//! Handlers communicate outcome purely through tree mutation plus the
//! [`diag::Diagnostics`] sink; a failure on one annotated construct never
//! aborts processing of its siblings.

pub mod ast;
pub mod config;
pub mod diag;
pub mod error;
pub mod expand;

pub use config::{Config, FlagUsage};
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use expand::{expand, Expander};
