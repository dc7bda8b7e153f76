use std::collections::HashMap;
use std::collections::hash_map::{Entry, Iter};

/// Separator used when a header name shows up more than once.
const DUPLICATE_SEPARATOR: &str = ", ";

/// Request header fields keyed by lowercase name.
///
/// Names are folded to lowercase on insert and on lookup, so `Content-Type` and
/// `content-type` address the same entry. A repeated name does not overwrite: its value is
/// appended to the existing one, joined by `", "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    inner: HashMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, merging with an existing value of the same name.
    ///
    /// The name is expected to be already validated as a token.
    pub fn append(&mut self, name: &str, value: &str) {
        match self.inner.entry(name.to_ascii_lowercase()) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.push_str(DUPLICATE_SEPARATOR);
                existing.push_str(value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value.to_owned());
            }
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.inner.get(&name.to_ascii_lowercase()).map(String::as_str)
        } else {
            self.inner.get(name).map(String::as_str)
        }
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates `(name, value)` pairs in no particular order, names are lowercase.
    pub fn iter(&self) -> HeaderIter<'_> {
        HeaderIter { inner: self.inner.iter() }
    }
}

impl<'a> IntoIterator for &'a HeaderMap {
    type Item = (&'a str, &'a str);
    type IntoIter = HeaderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug)]
pub struct HeaderIter<'a> {
    inner: Iter<'a, String, String>,
}

impl<'a> Iterator for HeaderIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
