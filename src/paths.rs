//! Instance path utilities
//!
//! Paths address nodes in a validated document tree and double as the scope
//! keys of the identity-constraint stores, so their string form is part of
//! the data contract:
//!
//! ```text
//! path    := root_segment ("." segment)*
//! segment := Identifier ("[" non_negative_integer "]")?
//! ```
//!
//! The root segment is the root composite type's name. An `[index]` suffix
//! marks an item inside a repeated collection (zero-based).

/// Build the path of a child composite node.
pub fn child(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

/// Build the path of an item inside a repeated collection.
pub fn indexed(parent: &str, name: &str, index: usize) -> String {
    format!("{}[{}]", child(parent, name), index)
}

/// Strip exactly `level` trailing dot-separated segments from `path`,
/// yielding the enclosing scope's path.
///
/// `level` counts composite-node boundaries between a leaf and the scope
/// owner. Index suffixes stay attached to their segment. Stripping more
/// segments than the path has yields the empty string.
pub fn scope_of(path: &str, level: usize) -> String {
    let segments: Vec<&str> = path.split('.').collect();
    if level >= segments.len() {
        return String::new();
    }
    segments[..segments.len() - level].join(".")
}
