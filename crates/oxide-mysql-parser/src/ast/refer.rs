//! Resolved result fields referenced from column expressions.
//!
//! Name resolution runs after parsing and records what each column refers
//! to in a [`ResultFieldTable`] it owns. Column expressions only keep a
//! [`ResultFieldRef`] key, so dropping or cloning the table never leaves a
//! dangling reference in the tree.

use serde::{Deserialize, Serialize};

/// Key of a [`ResultField`] in a [`ResultFieldTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResultFieldRef(usize);

impl ResultFieldRef {
    /// Returns the raw table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A column produced by a result set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultField {
    /// Schema of the source table.
    pub db_name: Option<String>,
    /// Source table name.
    pub table_name: Option<String>,
    /// Alias of the source table in the query.
    pub table_as_name: Option<String>,
    /// Column name.
    pub column_name: String,
    /// Alias of the column in the query.
    pub column_as_name: Option<String>,
}

/// Owner of the result fields referenced by a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultFieldTable {
    fields: Vec<ResultField>,
}

impl ResultFieldTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Stores `field` and returns its key.
    pub fn insert(&mut self, field: ResultField) -> ResultFieldRef {
        self.fields.push(field);
        ResultFieldRef(self.fields.len() - 1)
    }

    /// Looks up a field. Returns `None` for keys past the end of this
    /// table. Keys are plain indices, so a key taken from another table may
    /// name an unrelated field here.
    #[must_use]
    pub fn get(&self, key: ResultFieldRef) -> Option<&ResultField> {
        self.fields.get(key.0)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the table holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut table = ResultFieldTable::new();
        let key = table.insert(ResultField {
            column_name: "id".to_owned(),
            ..ResultField::default()
        });
        assert_eq!(table.get(key).map(|f| f.column_name.as_str()), Some("id"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_key_past_the_end_is_none() {
        let mut table = ResultFieldTable::new();
        let key = table.insert(ResultField::default());
        let fresh = ResultFieldTable::new();
        assert!(fresh.get(key).is_none());
        assert_eq!(key.index(), 0);
    }

    #[test]
    fn test_keys_are_indices() {
        let mut a = ResultFieldTable::new();
        let mut b = ResultFieldTable::new();
        let key = a.insert(ResultField {
            column_name: "x".to_owned(),
            ..ResultField::default()
        });
        b.insert(ResultField {
            column_name: "y".to_owned(),
            ..ResultField::default()
        });
        assert_eq!(b.get(key).map(|f| f.column_name.as_str()), Some("y"));
    }
}
