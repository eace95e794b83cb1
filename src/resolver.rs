//! Reference resolver
//!
//! The single whole-tree pass that drains pending references against the key
//! and ID stores. It runs exactly once, after the validation walk (including
//! deferred nested collections) has returned; nothing about reference
//! validity is knowable earlier, because forward references are legal.

use tracing::debug;

use crate::error::{ConstraintError, ErrorRecord, Result};
use crate::identities::{KeyStore, RefStore, Stores};

/// Resolve every pending keyref against the key store and every pending
/// IDREF against the ID store.
///
/// A matched reference records its target in the owning store. An unmatched
/// one (unknown key name, or value never registered under any scope) is
/// accumulated in the sink, attributed to the referencing path, and the pass
/// continues with the remaining references. The only fail-fast condition is
/// a referencing path being resolved twice, which a single well-formed walk
/// cannot produce.
pub fn resolve_refs(stores: &mut Stores, errors: &mut Vec<ErrorRecord>) -> Result<()> {
    resolve_store(&stores.keys, &mut stores.refs, errors)?;

    let pending = stores.idrefs.refs().pending().to_vec();
    for pending_ref in pending {
        match stores.ids.match_id(&pending_ref.key_value) {
            Ok(target_path) => {
                let target_path = target_path.to_string();
                stores
                    .idrefs
                    .refs_mut()
                    .set_target(&pending_ref.ref_path, &target_path)?;
                debug!(
                    value = %pending_ref.key_value,
                    target = %target_path,
                    "matched idref"
                );
            }
            Err(err) => record_failure(errors, &pending_ref.ref_path, &pending_ref.key_name, err),
        }
    }
    Ok(())
}

fn resolve_store(
    key_store: &KeyStore,
    ref_store: &mut RefStore,
    errors: &mut Vec<ErrorRecord>,
) -> Result<()> {
    let pending = ref_store.pending().to_vec();
    for pending_ref in pending {
        match key_store.match_ref(&pending_ref.key_name, &pending_ref.key_value) {
            Ok(target_path) => {
                let target_path = target_path.to_string();
                ref_store.set_target(&pending_ref.ref_path, &target_path)?;
                debug!(
                    key = %pending_ref.key_name,
                    value = %pending_ref.key_value,
                    target = %target_path,
                    "matched ref"
                );
            }
            Err(err) => record_failure(errors, &pending_ref.ref_path, &pending_ref.key_name, err),
        }
    }
    Ok(())
}

fn record_failure(
    errors: &mut Vec<ErrorRecord>,
    ref_path: &str,
    key_name: &str,
    err: ConstraintError,
) {
    errors.push(err.into_record(ref_path, key_name));
}
