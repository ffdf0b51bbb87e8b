use derive_more::Display;
use std::borrow::Cow;

/// Identifier under which the cache memoizes a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub struct QueryKey(Cow<'static, str>);

impl QueryKey {
    /// Key from a literal; no allocation.
    pub const fn fixed(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    /// Key made of `base` followed by each part, separated by `:`.
    pub fn scoped<'a>(
        base: &str,
        parts: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut key = base.to_string();
        for part in parts {
            key.push(':');
            key.push_str(part);
        }
        Self(Cow::Owned(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for QueryKey {
    fn from(key: &'static str) -> Self {
        Self::fixed(key)
    }
}

impl From<String> for QueryKey {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}
