//! Query string access
//!
//! Parameters are looked up lazily on the borrowed query text. Values are
//! not percent-decoded: the portal only ever sends digits and commas.

/// Borrowed view over a `name=value&name=value` query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParams<'a> {
    raw: &'a str,
}

impl<'a> QueryParams<'a> {
    /// Wrap a query string, with or without its leading `?`
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw: raw.strip_prefix('?').unwrap_or(raw),
        }
    }

    /// Iterate over `(name, value)` pairs in order
    ///
    /// A pair without `=` has an empty value.
    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.raw
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
    }

    /// Value of the first parameter called `name`
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.pairs().find(|(key, _)| *key == name).map(|(_, value)| value)
    }

    /// Check whether a parameter is present, even with an empty value
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
