use rust_decimal::Decimal;
use std::fmt;

/// HTTP verb an endpoint is called with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered request parameters.
///
/// Insertion order is the order the parameters go on the wire. Values are
/// already rendered to their final string form, so whatever is signed is
/// exactly what gets sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(&'static str, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, replacing an earlier value under the same name
    pub fn push(&mut self, name: &'static str, value: impl ToParam) {
        let value = value.to_param();
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Append only when the value is present
    pub fn push_opt<T: ToParam>(&mut self, name: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Pairs in the shape reqwest's `query`/`form` serializers expect
    pub fn as_pairs(&self) -> Vec<(&str, &str)> {
        self.iter().collect()
    }
}

/// Natural string form of a parameter value: no locale, no grouping.
pub trait ToParam {
    fn to_param(&self) -> String;
}

impl ToParam for &str {
    fn to_param(&self) -> String {
        (*self).to_string()
    }
}

impl ToParam for String {
    fn to_param(&self) -> String {
        self.clone()
    }
}

impl ToParam for u64 {
    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ToParam for Decimal {
    fn to_param(&self) -> String {
        self.to_string()
    }
}
