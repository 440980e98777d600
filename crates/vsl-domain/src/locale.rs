use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Locale used when neither the requested locale nor a configured default
/// carries an entry.
pub const DEFAULT_LOCALE: &str = "en";

/// Text keyed by locale code (`"en"`, `"es"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for literal schemas.
    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(locale.into(), text.into());
        self
    }

    pub fn insert(&mut self, locale: impl Into<String>, text: impl Into<String>) {
        self.0.insert(locale.into(), text.into());
    }

    /// Exact lookup. Empty entries are treated as missing.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0
            .get(locale)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Resolves text for `locale`, then `default_locale`, then `fallback`.
    ///
    /// Every localized lookup (labels, placeholders, titles, option labels,
    /// submit label) goes through here so the chain stays identical.
    pub fn resolve<'a>(&'a self, locale: &str, default_locale: &str, fallback: &'a str) -> &'a str {
        self.get(locale)
            .or_else(|| self.get(default_locale))
            .unwrap_or(fallback)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|text| text.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for LocalizedText
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(locale, text)| (locale.into(), text.into()))
                .collect(),
        )
    }
}

/// Resolves an optional localized entry, yielding `fallback` when absent.
pub fn resolve_optional<'a>(
    text: Option<&'a LocalizedText>,
    locale: &str,
    default_locale: &str,
    fallback: &'a str,
) -> &'a str {
    match text {
        Some(text) => text.resolve(locale, default_locale, fallback),
        None => fallback,
    }
}
