//! # treemodel
//!
//! Content-model matching and identity-constraint resolution for tree-shaped
//! documents (typically parsed from XML).
//!
//! The crate covers the two subsystems a declarative document validator
//! cannot do without:
//!
//! - The **content-model matcher**: given the set of child names present
//!   under a composite node, check them against the declared ordered
//!   sequence of required/optional elements and choice groups, and produce
//!   the canonical validated order.
//! - The **identity-constraint resolver**: scoped key/unique registries, a
//!   document-wide ID registry, and a deferred whole-tree pass matching
//!   forward or backward references to the instance that declared the key.
//!
//! Field definitions, scalar parsing, document population and
//! re-serialization are the host's business; this core consumes per-node
//! present-name sets, hierarchical path strings and an error sink, and hands
//! back validated orderings and resolved reference targets.
//!
//! ## Example
//!
//! ```rust
//! use treemodel::{
//!     match_sequence, resolve_refs, ContentModel, Element, ErrorRecord, KeyCheck,
//!     KeyRefCheck, ScopeDecl, Stores,
//! };
//!
//! # fn main() -> treemodel::Result<()> {
//! let model = ContentModel::new(vec![
//!     Element::required("name").into(),
//!     Element::optional("description").into(),
//! ]);
//!
//! let present = ["name".to_string()].into_iter().collect();
//! let mut errors: Vec<ErrorRecord> = Vec::new();
//! let ordered = match_sequence(&model, &present, "component", &mut errors);
//! assert_eq!(ordered, vec!["name"]);
//!
//! let mut stores = Stores::new();
//! ScopeDecl::keys(["viewKey"])?.declare("component", &mut stores)?;
//! KeyCheck::key(["viewKey"], 1)?.check(Some("rtl"), "component.view[0]", &mut stores)?;
//! KeyRefCheck::new("viewKey")?.check("rtl", "component.viewRef", &mut stores)?;
//! resolve_refs(&mut stores, &mut errors)?;
//! assert_eq!(stores.refs.target_of("component.viewRef"), Some("component.view[0]"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod content;
pub mod error;
pub mod identities;
pub mod matcher;
pub mod paths;
pub mod resolver;

// Re-exports for convenience
pub use content::{Choice, ChoiceOption, ContentItem, ContentModel, Element};
pub use error::{ConstraintError, Error, ErrorRecord, Result, SchemaError};
pub use identities::{
    ConstraintKind, IdCheck, IdRefCheck, IdRefStore, IdStore, KeyCheck, KeyRefCheck, KeyStore,
    PendingRef, RefStore, ScopeDecl, Stores,
};
pub use matcher::{match_choice, match_sequence};
pub use resolver::resolve_refs;

/// Version of the treemodel library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
