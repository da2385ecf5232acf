//! Column metadata

use rustc_hash::FxHashSet;

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Column index (0-based position)
    pub index: usize,
}

impl Column {
    /// Create a new column with name and index
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// First column name that occurs more than once in a header, if any
pub fn find_duplicate_name<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    names.into_iter().find(|name| !seen.insert(*name))
}
