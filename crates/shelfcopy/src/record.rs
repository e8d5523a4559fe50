// ABOUTME: Normalized record for one book entry of the listing.
// ABOUTME: Keeps values in field order and distinguishes absent values from empty ones.

/// One book entry: display name to extracted value, in field order.
///
/// `None` marks a value that is absent or could not be normalized (e.g. an
/// unparseable date); `Some("")` marks a cell that is present but empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: Vec<(&'static str, Option<String>)>,
}

impl Record {
    /// The value for `name`, if the record has that field and it holds a value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Returns true if the record has a field called `name`, with or without a value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(n, _)| *n == name)
    }

    /// Iterates over `(display name, value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        self.values.iter().map(|(n, v)| (*n, v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(&'static str, Option<String>)> for Record {
    fn from_iter<I: IntoIterator<Item = (&'static str, Option<String>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
