//! Free-text search over the loaded page.

/// Case-insensitive substring filter applied to caller-projected fields.
///
/// A record matches if any projected field contains the term; the empty
/// term matches everything. The filter only narrows records already
/// fetched - it never reaches back to the service, so its scope is always
/// the currently loaded page.
///
/// # Example
///
/// ```
/// use girder::filter::SearchFilter;
///
/// let names = ["Alice Fund", "Bob Capital"];
/// let filter = SearchFilter::with_term("cap");
/// let hits = filter.apply(&names, |n| vec![n.to_string()]);
/// assert_eq!(hits, vec![&"Bob Capital"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    term: String,
}

impl SearchFilter {
    /// Creates a filter with an empty term (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter with the given term.
    pub fn with_term(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }

    /// Replaces the search term.
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Returns the current term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Returns `true` if the term is empty (identity filter).
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    /// Check whether any of the projected fields contains the term.
    pub fn matches(&self, fields: &[String]) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let needle = self.term.to_lowercase();
        fields.iter().any(|f| f.to_lowercase().contains(&needle))
    }

    /// Filters `records`, projecting searchable fields with `fields`.
    ///
    /// Pure and synchronous; preserves the input order.
    pub fn apply<'a, T, F>(&self, records: &'a [T], fields: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> Vec<String>,
    {
        if self.term.is_empty() {
            return records.iter().collect();
        }
        let needle = self.term.to_lowercase();
        records
            .iter()
            .filter(|r| {
                fields(r)
                    .iter()
                    .any(|f| f.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
