use serde::Serialize;

/// A member of a scope, created lazily on first interaction.
/// `(external_id, scope)` is unique; `id` is the internal surrogate key.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub external_id: String,
    pub scope: String,
}
