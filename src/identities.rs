//! Identity constraint stores
//!
//! Scoped registries tracking key, unique, ID, keyref and IDREF values during
//! a single depth-first validation walk:
//!
//! - [`KeyStore`] - per-scope value buckets for key and unique constraints
//! - [`IdStore`] - a `KeyStore` fixed to one document-wide `ID` bucket
//! - [`RefStore`] / [`IdRefStore`] - pending references, resolved post-walk
//! - [`Stores`] - the per-run aggregate threaded through the walk
//!
//! Scope declaration is top-down (a composite node declares its scopes before
//! any descendant inserts a value); value insertion is depth-first beneath
//! it. References are never resolved inline because forward references are
//! legal; see [`crate::resolver`].

use indexmap::IndexMap;

use crate::error::{ConstraintError, SchemaError};
use crate::paths;

/// Key name shared by every ID constraint
pub const ID_KEY_NAME: &str = "ID";

/// Scope path shared by every ID constraint
pub const ID_SCOPE: &str = "/";

fn collect_names<I, S>(names: I) -> Result<Vec<String>, SchemaError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    if names.is_empty() || names.iter().any(String::is_empty) {
        return Err(SchemaError::EmptyKeyName);
    }
    Ok(names)
}

/// Scoped store for key and unique constraint values.
///
/// Holds one bucket per `(key_name, scope_path)` pair, mapping each key value
/// to the instance path that declared it, plus an index of scope paths per
/// key name in declaration order.
#[derive(Debug, Default)]
pub struct KeyStore {
    index: IndexMap<String, Vec<String>>,
    buckets: IndexMap<(String, String), IndexMap<String, String>>,
}

impl KeyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an empty bucket for each key name at `scope_path`.
    ///
    /// Fails if any `(key_name, scope_path)` bucket already exists. Must run
    /// exactly once per scope-owning composite instance, before descendants
    /// insert values.
    pub fn add_key<I, S>(&mut self, key_names: I, scope_path: &str) -> Result<(), ConstraintError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key_name in key_names.into_iter().map(Into::into) {
            let bucket_key = (key_name.clone(), scope_path.to_string());
            if self.buckets.contains_key(&bucket_key) {
                return Err(ConstraintError::DuplicateScope {
                    key_name,
                    scope_path: scope_path.to_string(),
                });
            }
            self.index
                .entry(key_name)
                .or_default()
                .push(scope_path.to_string());
            self.buckets.insert(bucket_key, IndexMap::new());
        }
        Ok(())
    }

    /// Whether a bucket exists for `(key_name, scope_path)`
    pub fn contains_scope(&self, key_name: &str, scope_path: &str) -> bool {
        self.buckets
            .contains_key(&(key_name.to_string(), scope_path.to_string()))
    }

    /// Insert `key_value -> value_path` into the first key name's bucket that
    /// is declared at `scope_path`.
    ///
    /// The key names act as aliases; only one bucket receives the value.
    /// Fails on a duplicate value within the bucket, or when no bucket exists
    /// at the scope for any alias.
    pub fn add_value<I, S>(
        &mut self,
        key_names: I,
        scope_path: &str,
        key_value: &str,
        value_path: &str,
    ) -> Result<(), ConstraintError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key_names: Vec<String> = key_names.into_iter().map(Into::into).collect();
        for key_name in &key_names {
            let bucket_key = (key_name.clone(), scope_path.to_string());
            if let Some(bucket) = self.buckets.get_mut(&bucket_key) {
                if bucket.contains_key(key_value) {
                    return Err(ConstraintError::DuplicateValue {
                        key_name: key_name.clone(),
                        value: key_value.to_string(),
                        path: value_path.to_string(),
                    });
                }
                bucket.insert(key_value.to_string(), value_path.to_string());
                return Ok(());
            }
        }
        Err(ConstraintError::ScopeNotDeclared {
            scope_path: scope_path.to_string(),
            key_names: key_names.join(", "),
        })
    }

    /// Find the instance path that declared `value` under `key_name`,
    /// scanning scopes in declaration order and bucket values in insertion
    /// order.
    pub fn match_ref(&self, key_name: &str, value: &str) -> Result<&str, ConstraintError> {
        let scopes = self
            .index
            .get(key_name)
            .ok_or_else(|| ConstraintError::UnknownKeyName {
                key_name: key_name.to_string(),
            })?;
        for scope_path in scopes {
            let bucket_key = (key_name.to_string(), scope_path.clone());
            if let Some(instance_path) = self.buckets.get(&bucket_key).and_then(|b| b.get(value)) {
                return Ok(instance_path.as_str());
            }
        }
        Err(ConstraintError::UnmatchedRef {
            key_name: key_name.to_string(),
            value: value.to_string(),
        })
    }

    /// Number of values in the `(key_name, scope_path)` bucket (0 when the
    /// bucket does not exist)
    pub fn value_count(&self, key_name: &str, scope_path: &str) -> usize {
        self.buckets
            .get(&(key_name.to_string(), scope_path.to_string()))
            .map(IndexMap::len)
            .unwrap_or(0)
    }
}

/// Document-wide ID registry.
///
/// A [`KeyStore`] specialized to a single permanent bucket: key name `"ID"`,
/// scope `"/"`, declared at construction.
#[derive(Debug)]
pub struct IdStore {
    store: KeyStore,
}

impl IdStore {
    /// Create the store with its single pre-declared bucket
    pub fn new() -> Self {
        let mut store = KeyStore::new();
        store
            .index
            .insert(ID_KEY_NAME.to_string(), vec![ID_SCOPE.to_string()]);
        store
            .buckets
            .insert((ID_KEY_NAME.to_string(), ID_SCOPE.to_string()), IndexMap::new());
        Self { store }
    }

    /// Register an ID value; fails on a document-wide duplicate
    pub fn add_id(&mut self, value: &str, path: &str) -> Result<(), ConstraintError> {
        self.store.add_value([ID_KEY_NAME], ID_SCOPE, value, path)
    }

    /// Find the instance path that declared the ID `value`
    pub fn match_id(&self, value: &str) -> Result<&str, ConstraintError> {
        self.store.match_ref(ID_KEY_NAME, value)
    }

    /// Number of registered IDs
    pub fn id_count(&self) -> usize {
        self.store.value_count(ID_KEY_NAME, ID_SCOPE)
    }
}

impl Default for IdStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A reference recorded during the walk whose target has not yet been
/// located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRef {
    /// Name of the key constraint being referenced
    pub key_name: String,
    /// The referenced value
    pub key_value: String,
    /// Instance path of the referencing leaf
    pub ref_path: String,
}

/// Store for keyref constraints: queued pending references and, after
/// resolution, the referencing-path to target-path map.
#[derive(Debug, Default)]
pub struct RefStore {
    pending: Vec<PendingRef>,
    targets: IndexMap<String, String>,
}

impl RefStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reference for the post-walk resolution pass.
    ///
    /// Fails immediately when `key_value` is empty; a reference must name
    /// something. Resolution is not attempted here because the target key may
    /// not have been registered yet.
    pub fn add_pending(
        &mut self,
        key_name: &str,
        key_value: &str,
        ref_path: &str,
    ) -> Result<(), ConstraintError> {
        if key_value.is_empty() {
            return Err(ConstraintError::EmptyValue);
        }
        self.pending.push(PendingRef {
            key_name: key_name.to_string(),
            key_value: key_value.to_string(),
            ref_path: ref_path.to_string(),
        });
        Ok(())
    }

    /// Record the resolved target for a referencing path.
    ///
    /// Each referencing path receives at most one target; a second call for
    /// the same path fails.
    pub fn set_target(&mut self, ref_path: &str, target_path: &str) -> Result<(), ConstraintError> {
        if self.targets.contains_key(ref_path) {
            return Err(ConstraintError::DuplicateTarget {
                ref_path: ref_path.to_string(),
            });
        }
        self.targets
            .insert(ref_path.to_string(), target_path.to_string());
        Ok(())
    }

    /// Queued references, in recording order
    pub fn pending(&self) -> &[PendingRef] {
        &self.pending
    }

    /// Resolved targets (empty until the resolution pass has run)
    pub fn targets(&self) -> &IndexMap<String, String> {
        &self.targets
    }

    /// The resolved target for one referencing path, if any
    pub fn target_of(&self, ref_path: &str) -> Option<&str> {
        self.targets.get(ref_path).map(String::as_str)
    }
}

/// Store for IDREF constraints; a [`RefStore`] whose references all name the
/// `"ID"` key.
#[derive(Debug, Default)]
pub struct IdRefStore {
    store: RefStore,
}

impl IdRefStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an IDREF for the post-walk resolution pass
    pub fn add_idref(&mut self, value: &str, ref_path: &str) -> Result<(), ConstraintError> {
        self.store.add_pending(ID_KEY_NAME, value, ref_path)
    }

    /// The underlying reference store
    pub fn refs(&self) -> &RefStore {
        &self.store
    }

    /// Mutable access for the resolution pass
    pub fn refs_mut(&mut self) -> &mut RefStore {
        &mut self.store
    }
}

/// All identity-constraint stores of one validation run.
///
/// Created fresh per document, threaded `&mut` through the recursive walk,
/// and consumed by [`crate::resolver::resolve_refs`] once the walk has
/// returned. Deliberately no `Default` and no global instance; reusing a
/// `Stores` across documents would leak stale scope buckets, and sharing one
/// across concurrent runs is a data race.
#[derive(Debug)]
pub struct Stores {
    /// Key constraint buckets
    pub keys: KeyStore,
    /// Unique constraint buckets
    pub uniques: KeyStore,
    /// Document-wide IDs
    pub ids: IdStore,
    /// Pending keyrefs
    pub refs: RefStore,
    /// Pending IDREFs
    pub idrefs: IdRefStore,
}

impl Stores {
    /// Create the aggregate for one validation run.
    ///
    /// There is intentionally no `Default` impl: every run must construct
    /// its own instance explicitly.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            keys: KeyStore::new(),
            uniques: KeyStore::new(),
            ids: IdStore::new(),
            refs: RefStore::new(),
            idrefs: IdRefStore::new(),
        }
    }
}

/// Which store a scoped check writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Key semantics: values must be present and unique within scope
    Key,
    /// Unique semantics: like key, but an absent value is tolerated
    Unique,
}

/// Scope declaration for a composite node.
///
/// Declares empty buckets for the node's key and unique constraint names at
/// the node's own path. Runs before any descendant inserts a value.
#[derive(Debug, Clone)]
pub struct ScopeDecl {
    key_names: Vec<String>,
    unique_names: Vec<String>,
}

impl ScopeDecl {
    /// Declare key scopes only
    pub fn keys<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            key_names: collect_names(names)?,
            unique_names: Vec::new(),
        })
    }

    /// Declare unique scopes only
    pub fn uniques<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            key_names: Vec::new(),
            unique_names: collect_names(names)?,
        })
    }

    /// Register this node's scopes at `path`
    pub fn declare(&self, path: &str, stores: &mut Stores) -> Result<(), ConstraintError> {
        if !self.key_names.is_empty() {
            stores.keys.add_key(self.key_names.iter().cloned(), path)?;
        }
        if !self.unique_names.is_empty() {
            stores
                .uniques
                .add_key(self.unique_names.iter().cloned(), path)?;
        }
        Ok(())
    }
}

/// Leaf-level check for key and unique constrained values.
///
/// Configured once at schema-definition time with the alias list, the number
/// of path segments between the leaf and its scope owner, and optionally a
/// key name this value also references.
#[derive(Debug, Clone)]
pub struct KeyCheck {
    kind: ConstraintKind,
    key_names: Vec<String>,
    level: usize,
    refer: Option<String>,
}

impl KeyCheck {
    /// Key semantics: an empty value is an error
    pub fn key<I, S>(names: I, level: usize) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(ConstraintKind::Key, names, level)
    }

    /// Unique semantics: an empty value is tolerated
    pub fn unique<I, S>(names: I, level: usize) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_kind(ConstraintKind::Unique, names, level)
    }

    fn with_kind<I, S>(kind: ConstraintKind, names: I, level: usize) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if level == 0 {
            return Err(SchemaError::ZeroLevel);
        }
        Ok(Self {
            kind,
            key_names: collect_names(names)?,
            level,
            refer: None,
        })
    }

    /// Also record this value as a reference to `refer`
    pub fn with_refer(mut self, refer: impl Into<String>) -> Self {
        self.refer = Some(refer.into());
        self
    }

    /// The configured constraint kind
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Check one leaf value at `path`.
    ///
    /// The scope is obtained by stripping `level` trailing segments from
    /// `path`. When a refer key is configured the value is additionally
    /// queued as a pending reference.
    pub fn check(
        &self,
        value: Option<&str>,
        path: &str,
        stores: &mut Stores,
    ) -> Result<(), ConstraintError> {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => {
                return match self.kind {
                    ConstraintKind::Unique => Ok(()),
                    ConstraintKind::Key => Err(ConstraintError::EmptyValue),
                }
            }
        };
        let scope_path = paths::scope_of(path, self.level);
        if let Some(refer) = &self.refer {
            stores.refs.add_pending(refer, value, path)?;
        }
        match self.kind {
            ConstraintKind::Key => {
                stores
                    .keys
                    .add_value(self.key_names.iter().cloned(), &scope_path, value, path)
            }
            ConstraintKind::Unique => {
                stores
                    .uniques
                    .add_value(self.key_names.iter().cloned(), &scope_path, value, path)
            }
        }
    }
}

/// Leaf-level check registering a document-wide ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdCheck;

impl IdCheck {
    /// Register `value` as an ID declared at `path`
    pub fn check(
        &self,
        value: &str,
        path: &str,
        stores: &mut Stores,
    ) -> Result<(), ConstraintError> {
        if value.is_empty() {
            return Err(ConstraintError::EmptyValue);
        }
        stores.ids.add_id(value, path)
    }
}

/// Leaf-level check queuing an IDREF.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdRefCheck;

impl IdRefCheck {
    /// Queue `value` as an IDREF recorded at `path`
    pub fn check(
        &self,
        value: &str,
        path: &str,
        stores: &mut Stores,
    ) -> Result<(), ConstraintError> {
        stores.idrefs.add_idref(value, path)
    }
}

/// Leaf-level check queuing a named keyref.
#[derive(Debug, Clone)]
pub struct KeyRefCheck {
    refer: String,
}

impl KeyRefCheck {
    /// Create a check referencing the key constraint `refer`
    pub fn new(refer: impl Into<String>) -> Result<Self, SchemaError> {
        let refer = refer.into();
        if refer.is_empty() {
            return Err(SchemaError::EmptyKeyName);
        }
        Ok(Self { refer })
    }

    /// The referenced key name
    pub fn refer(&self) -> &str {
        &self.refer
    }

    /// Queue `value` as a reference recorded at `path`
    pub fn check(
        &self,
        value: &str,
        path: &str,
        stores: &mut Stores,
    ) -> Result<(), ConstraintError> {
        stores.refs.add_pending(&self.refer, value, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_key_duplicate_scope_fails() {
        let mut stores = Stores::new();
        let decl = ScopeDecl::keys(["TestKeys"]).unwrap();
        decl.declare("root", &mut stores).unwrap();
        let err = decl.declare("root", &mut stores).unwrap_err();
        assert!(matches!(err, ConstraintError::DuplicateScope { .. }));
    }

    #[test]
    fn test_add_key_same_name_two_scopes() {
        let mut stores = Stores::new();
        let decl = ScopeDecl::keys(["TestKey"]).unwrap();
        decl.declare("root.test[0]", &mut stores).unwrap();
        decl.declare("root.test[1]", &mut stores).unwrap();
        assert!(stores.keys.contains_scope("TestKey", "root.test[0]"));
        assert!(stores.keys.contains_scope("TestKey", "root.test[1]"));
    }

    #[test]
    fn test_add_value_and_count() {
        let mut store = KeyStore::new();
        store.add_key(["TestKey"], "root").unwrap();
        assert_eq!(store.value_count("TestKey", "root"), 0);
        store
            .add_value(["TestKey"], "root", "TestKey0", "root.a.b")
            .unwrap();
        assert_eq!(store.value_count("TestKey", "root"), 1);
        assert_eq!(store.value_count("dummy", "/"), 0);
    }

    #[test]
    fn test_add_value_duplicate_fails() {
        let mut store = KeyStore::new();
        store.add_key(["FieldKey"], "root.register[0]").unwrap();
        store
            .add_value(["FieldKey"], "root.register[0]", "field2", "root.register[0].field[0]")
            .unwrap();
        let err = store
            .add_value(["FieldKey"], "root.register[0]", "field2", "root.register[0].field[1]")
            .unwrap_err();
        assert!(matches!(err, ConstraintError::DuplicateValue { .. }));
    }

    #[test]
    fn test_add_value_scope_not_declared() {
        let mut store = KeyStore::new();
        store.add_key(["FieldKey"], "root.register[0]").unwrap();
        let err = store
            .add_value(["FieldKey"], "elsewhere", "field2", "elsewhere.field")
            .unwrap_err();
        assert!(matches!(err, ConstraintError::ScopeNotDeclared { .. }));
    }

    #[test]
    fn test_add_value_first_declared_alias_wins() {
        let mut store = KeyStore::new();
        store.add_key(["FieldKey"], "root.register[0]").unwrap();
        store
            .add_value(
                ["OtherKey", "FieldKey", "YetAnotherKey"],
                "root.register[0]",
                "field2",
                "root.register[0].field[2]",
            )
            .unwrap();
        assert_eq!(store.value_count("FieldKey", "root.register[0]"), 1);
        assert_eq!(store.value_count("OtherKey", "root.register[0]"), 0);
    }

    #[test]
    fn test_distinct_scopes_never_collide() {
        let mut store = KeyStore::new();
        store.add_key(["FieldKey"], "root.register[0]").unwrap();
        store.add_key(["FieldKey"], "root.register[1]").unwrap();
        store
            .add_value(["FieldKey"], "root.register[0]", "f", "root.register[0].f")
            .unwrap();
        store
            .add_value(["FieldKey"], "root.register[1]", "f", "root.register[1].f")
            .unwrap();
    }

    #[test]
    fn test_match_ref() {
        let mut store = KeyStore::new();
        store.add_key(["key_name"], "root.register[0]").unwrap();
        store
            .add_value(["key_name"], "root.register[0]", "field2", "root.register[0].field[2]")
            .unwrap();
        assert_eq!(
            store.match_ref("key_name", "field2").unwrap(),
            "root.register[0].field[2]"
        );
        assert!(matches!(
            store.match_ref("wrong_name", "field2"),
            Err(ConstraintError::UnknownKeyName { .. })
        ));
        assert!(matches!(
            store.match_ref("key_name", "field220"),
            Err(ConstraintError::UnmatchedRef { .. })
        ));
    }

    #[test]
    fn test_match_ref_scans_scopes_in_declaration_order() {
        let mut store = KeyStore::new();
        store.add_key(["regKey"], "root.block[0]").unwrap();
        store.add_key(["regKey"], "root.block[1]").unwrap();

        // Value only in the later-declared scope: the scan reaches it.
        store
            .add_value(["regKey"], "root.block[1]", "ctrl", "root.block[1].ctrl")
            .unwrap();
        assert_eq!(
            store.match_ref("regKey", "ctrl").unwrap(),
            "root.block[1].ctrl"
        );

        // Same value in both scopes: the first-declared scope's path wins.
        store
            .add_value(["regKey"], "root.block[0]", "status", "root.block[0].status")
            .unwrap();
        store
            .add_value(["regKey"], "root.block[1]", "status", "root.block[1].status")
            .unwrap();
        assert_eq!(
            store.match_ref("regKey", "status").unwrap(),
            "root.block[0].status"
        );
    }

    #[test]
    fn test_id_store() {
        let mut store = IdStore::new();
        assert_eq!(store.id_count(), 0);
        store.add_id("ID42", "root.register[0].field[2].id").unwrap();
        assert_eq!(store.id_count(), 1);
        assert_eq!(
            store.match_id("ID42").unwrap(),
            "root.register[0].field[2].id"
        );
        let err = store.add_id("ID42", "root.other.id").unwrap_err();
        assert!(matches!(err, ConstraintError::DuplicateValue { .. }));
    }

    #[test]
    fn test_ref_store_pending_and_targets() {
        let mut store = RefStore::new();
        store
            .add_pending("TestKeyRef", "refName", "root.test")
            .unwrap();
        assert_eq!(
            store.pending(),
            &[PendingRef {
                key_name: "TestKeyRef".to_string(),
                key_value: "refName".to_string(),
                ref_path: "root.test".to_string(),
            }]
        );
        store.set_target("root.test", "root.target").unwrap();
        assert_eq!(store.target_of("root.test"), Some("root.target"));
        let err = store.set_target("root.test", "root.target").unwrap_err();
        assert!(matches!(err, ConstraintError::DuplicateTarget { .. }));
    }

    #[test]
    fn test_ref_store_empty_value_fails() {
        let mut store = RefStore::new();
        let err = store.add_pending("TestKeyRef", "", "root").unwrap_err();
        assert!(matches!(err, ConstraintError::EmptyValue));
    }

    #[test]
    fn test_idref_store() {
        let mut store = IdRefStore::new();
        store.add_idref("key_value", "ref_path").unwrap();
        assert_eq!(store.refs().pending()[0].key_name, ID_KEY_NAME);
    }

    #[test]
    fn test_key_check_single_key() {
        let mut stores = Stores::new();
        ScopeDecl::keys(["FieldKey"])
            .unwrap()
            .declare("root.register[0]", &mut stores)
            .unwrap();
        let check = KeyCheck::key(["FieldKey"], 1).unwrap();
        check
            .check(Some("field22"), "root.register[0].field[2]", &mut stores)
            .unwrap();
        assert_eq!(stores.keys.value_count("FieldKey", "root.register[0]"), 1);
    }

    #[test]
    fn test_key_check_duplicate_value_fails() {
        let mut stores = Stores::new();
        ScopeDecl::keys(["FieldKey"])
            .unwrap()
            .declare("root.register[0]", &mut stores)
            .unwrap();
        let check = KeyCheck::key(["FieldKey"], 1).unwrap();
        check
            .check(Some("field2"), "root.register[0].field2", &mut stores)
            .unwrap();
        let err = check
            .check(Some("field2"), "root.register[0].field12", &mut stores)
            .unwrap_err();
        assert!(matches!(err, ConstraintError::DuplicateValue { .. }));
    }

    #[test]
    fn test_key_check_empty_value_fails() {
        let mut stores = Stores::new();
        ScopeDecl::keys(["FieldKey"])
            .unwrap()
            .declare("root.register[0]", &mut stores)
            .unwrap();
        let check = KeyCheck::key(["FieldKey"], 1).unwrap();
        let err = check
            .check(Some(""), "root.register[0].field12", &mut stores)
            .unwrap_err();
        assert!(matches!(err, ConstraintError::EmptyValue));
    }

    #[test]
    fn test_unique_check_empty_value_tolerated() {
        let mut stores = Stores::new();
        ScopeDecl::uniques(["FieldKey"])
            .unwrap()
            .declare("root.register[0]", &mut stores)
            .unwrap();
        let check = KeyCheck::unique(["FieldKey"], 1).unwrap();
        check
            .check(None, "root.register[0].field[2]", &mut stores)
            .unwrap();
        assert_eq!(stores.uniques.value_count("FieldKey", "root.register[0]"), 0);
    }

    #[test]
    fn test_unique_check_duplicate_fails() {
        let mut stores = Stores::new();
        ScopeDecl::uniques(["FieldKey"])
            .unwrap()
            .declare("root.register[0]", &mut stores)
            .unwrap();
        let check = KeyCheck::unique(["FieldKey"], 1).unwrap();
        check
            .check(Some("field2"), "root.register[0].field2", &mut stores)
            .unwrap();
        let err = check
            .check(Some("field2"), "root.register[0].field12", &mut stores)
            .unwrap_err();
        assert!(matches!(err, ConstraintError::DuplicateValue { .. }));
    }

    #[test]
    fn test_key_check_path_mismatch_fails() {
        let mut stores = Stores::new();
        ScopeDecl::keys(["FieldKey"])
            .unwrap()
            .declare("root.register[0]", &mut stores)
            .unwrap();
        let check = KeyCheck::key(["FieldKey"], 1).unwrap();
        let err = check.check(Some("field2"), "field2", &mut stores).unwrap_err();
        assert!(matches!(err, ConstraintError::ScopeNotDeclared { .. }));
    }

    #[test]
    fn test_key_check_aliases() {
        let mut stores = Stores::new();
        ScopeDecl::keys(["Key2"])
            .unwrap()
            .declare("root", &mut stores)
            .unwrap();
        let check = KeyCheck::key(["Key1", "Key2"], 1).unwrap();
        check
            .check(Some("child:name"), "root.child[1]", &mut stores)
            .unwrap();
        assert_eq!(stores.keys.value_count("Key2", "root"), 1);
    }

    #[test]
    fn test_key_check_with_refer_queues_pending() {
        let mut stores = Stores::new();
        ScopeDecl::keys(["Key2"])
            .unwrap()
            .declare("root", &mut stores)
            .unwrap();
        let check = KeyCheck::key(["Key1", "Key2"], 1)
            .unwrap()
            .with_refer("referKey");
        check
            .check(Some("child:name"), "root.child[1]", &mut stores)
            .unwrap();
        assert_eq!(
            stores.refs.pending(),
            &[PendingRef {
                key_name: "referKey".to_string(),
                key_value: "child:name".to_string(),
                ref_path: "root.child[1]".to_string(),
            }]
        );
    }

    #[test]
    fn test_check_constructors_fail_fast() {
        assert!(matches!(
            KeyCheck::key(Vec::<String>::new(), 1),
            Err(SchemaError::EmptyKeyName)
        ));
        assert!(matches!(
            KeyCheck::key([""], 1),
            Err(SchemaError::EmptyKeyName)
        ));
        assert!(matches!(
            KeyCheck::key(["FieldKey"], 0),
            Err(SchemaError::ZeroLevel)
        ));
        assert!(matches!(
            ScopeDecl::keys(Vec::<String>::new()),
            Err(SchemaError::EmptyKeyName)
        ));
        assert!(matches!(KeyRefCheck::new(""), Err(SchemaError::EmptyKeyName)));
    }

    #[test]
    fn test_id_and_idref_checks() {
        let mut stores = Stores::new();
        IdCheck
            .check("ID42", "root.component.id", &mut stores)
            .unwrap();
        IdRefCheck
            .check("ID42", "root.component.ref.for.id", &mut stores)
            .unwrap();
        assert_eq!(stores.ids.id_count(), 1);
        assert_eq!(stores.idrefs.refs().pending().len(), 1);
        assert!(matches!(
            IdCheck.check("", "root.x", &mut stores),
            Err(ConstraintError::EmptyValue)
        ));
    }
}
