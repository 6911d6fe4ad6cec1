//! Deduplicated string table.
//!
//! Strings are not written inline. Each distinct string is stored once in the
//! table and value tokens refer to it by its 1-based position; `0` stands for
//! a null string. The finished stream carries the table as an array of escaped
//! literals in insertion order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_rpcjson::{StringTable, StringTableSource};
//!
//! let mut table = StringTable::new();
//! assert_eq!(table.add("a"), 1);
//! assert_eq!(table.add("b"), 2);
//! assert_eq!(table.add("a"), 1);
//! assert_eq!(table.entries().collect::<Vec<_>>(), vec!["a", "b"]);
//! ```

use indexmap::IndexSet;

/// Index written for a null string.
pub const NULL_STRING_INDEX: i32 = 0;

/// Ordered, already deduplicated strings to be emitted as the string table.
pub trait StringTableSource {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Entry at 0-based `position`.
    fn entry(&self, position: usize) -> Option<&str>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in table order.
    fn entries(&self) -> Entries<'_, Self> {
        Entries {
            source: self,
            position: 0,
        }
    }
}

/// Iterator over the entries of a [`StringTableSource`].
pub struct Entries<'s, S: ?Sized> {
    source: &'s S,
    position: usize,
}

impl<'s, S: StringTableSource + ?Sized> Iterator for Entries<'s, S> {
    type Item = &'s str;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.source.entry(self.position)?;
        self.position += 1;
        Some(entry)
    }
}

impl StringTableSource for [String] {
    fn len(&self) -> usize {
        <[String]>::len(self)
    }

    fn entry(&self, position: usize) -> Option<&str> {
        self.get(position).map(String::as_str)
    }
}

impl StringTableSource for Vec<String> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn entry(&self, position: usize) -> Option<&str> {
        self.get(position).map(String::as_str)
    }
}

impl StringTableSource for [&str] {
    fn len(&self) -> usize {
        <[&str]>::len(self)
    }

    fn entry(&self, position: usize) -> Option<&str> {
        self.get(position).copied()
    }
}

/// Insertion-ordered set of strings with 1-based indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringTable(IndexSet<String>);

impl StringTable {
    #[must_use]
    pub fn new() -> Self {
        StringTable(IndexSet::new())
    }

    /// Adds `value` if it is not present and returns its 1-based index.
    pub fn add(&mut self, value: &str) -> i32 {
        let position = match self.0.get_index_of(value) {
            Some(position) => position,
            None => self.0.insert_full(value.to_owned()).0,
        };
        (position + 1) as i32
    }

    /// Index of an optional string; `None` maps to [`NULL_STRING_INDEX`].
    pub fn add_optional(&mut self, value: Option<&str>) -> i32 {
        value.map_or(NULL_STRING_INDEX, |s| self.add(s))
    }

    /// 1-based index of `value`, if present.
    #[must_use]
    pub fn index_of(&self, value: &str) -> Option<i32> {
        self.0.get_index_of(value).map(|position| (position + 1) as i32)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl StringTableSource for StringTable {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn entry(&self, position: usize) -> Option<&str> {
        self.0.get_index(position).map(String::as_str)
    }
}
