//! Catalog filter criteria for product listing.
//!
//! [`ProductFilter`] normalizes raw query-string input into the set of
//! filters the product repository applies. Matching semantics live in the
//! SQL; this module decides which filters are active at all.
//!
//! - `search`: case-insensitive substring of the product name.
//! - `category`: exact match; the literal `all` disables it.
//! - `opacity`: every listed value must match (narrowing).
//! - `room`: any listed value may match (widening).
//! - `color`: the product color is one of the listed values.

/// Category selector value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Active product filters. `None` means the filter is not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub opacity: Option<Vec<String>>,
    pub room: Option<Vec<String>>,
    pub color: Option<Vec<String>>,
}

impl ProductFilter {
    /// Build a filter from decoded query-string pairs.
    ///
    /// List keys accept `key[]=v`, `key[0]=v` and bare `key=v`, and values
    /// accumulate. Scalar keys keep the last value. Blank values are dropped,
    /// and a list with no remaining values is treated as absent.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut search = None;
        let mut category = None;
        let mut opacity = Vec::new();
        let mut room = Vec::new();
        let mut color = Vec::new();

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match base_key(key.as_ref()) {
                "search" => search = non_blank(value),
                "category" => category = non_blank(value),
                "opacity" => opacity.extend(non_blank(value)),
                "room" => room.extend(non_blank(value)),
                "color" => color.extend(non_blank(value)),
                _ => {}
            }
        }

        Self {
            search,
            category: category.filter(|c| c != ALL_CATEGORIES),
            opacity: non_empty(opacity),
            room: non_empty(room),
            color: non_empty(color),
        }
    }

    /// True when no filter is active (the full catalog is returned).
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.opacity.is_none()
            && self.room.is_none()
            && self.color.is_none()
    }

    /// `ILIKE` pattern for the search term, with wildcards escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(term)))
    }
}

/// Escape `\`, `%` and `_` so the term matches literally inside `LIKE`.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Strip a trailing `[]` or `[N]` array suffix from a query key.
fn base_key(key: &str) -> &str {
    match key.find('[') {
        Some(idx) if key.ends_with(']') => &key[..idx],
        _ => key,
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
