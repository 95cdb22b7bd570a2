//! Ordered header field container.
//!
//! `http::HeaderMap` normalizes names to lower case and groups values by name. The
//! generator writes fields exactly as the caller added them, so it keeps its own
//! small container that preserves both insertion order and name case.

use bytes::Bytes;
use http::HeaderMap;
use std::slice;

/// A single `name: value` header field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    name: String,
    value: Bytes,
}

impl HeaderField {
    pub fn new(name: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Returns the value as `&str` if it is valid utf-8.
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }

    /// Compares the field name ignoring ascii case.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Ordered, case preserving list of header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    fields: Vec<HeaderField>,
}

impl HeaderFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { fields: Vec::with_capacity(capacity) }
    }

    /// Appends a field, keeping any existing field with the same name.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Bytes>) -> &mut Self {
        self.fields.push(HeaderField::new(name, value));
        self
    }

    /// Replaces every field with the same name by a single new field.
    ///
    /// The new field takes the position of the first replaced field, or goes to the
    /// end if the name was not present.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Bytes>) -> &mut Self {
        let field = HeaderField::new(name, value);
        match self.fields.iter().position(|f| f.is(&field.name)) {
            Some(index) => {
                let name = field.name.clone();
                self.fields[index] = field;
                let mut current = 0;
                self.fields.retain(|f| {
                    let keep = current <= index || !f.is(&name);
                    current += 1;
                    keep
                });
            }
            None => self.fields.push(field),
        }
        self
    }

    /// Returns the first value of the named field.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.fields.iter().find(|f| f.is(name)).map(HeaderField::value)
    }

    /// Returns the first value of the named field as `&str`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.is(name)).and_then(HeaderField::value_str)
    }

    /// Returns every value of the named field in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.fields.iter().filter(move |f| f.is(name)).map(HeaderField::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.is(name))
    }

    /// Removes every field with the given name, returning how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.fields.len();
        self.fields.retain(|f| !f.is(name));
        before - self.fields.len()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn iter(&self) -> slice::Iter<'_, HeaderField> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a HeaderFields {
    type Item = &'a HeaderField;
    type IntoIter = slice::Iter<'a, HeaderField>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Into<String>, V: Into<Bytes>> FromIterator<(N, V)> for HeaderFields {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut fields = HeaderFields::new();
        for (name, value) in iter {
            fields.add(name, value);
        }
        fields
    }
}

/// Converts a `HeaderMap`, names end up in the lower case form `http` stores them in.
impl From<&HeaderMap> for HeaderFields {
    fn from(map: &HeaderMap) -> Self {
        let mut fields = HeaderFields::with_capacity(map.len());
        for (name, value) in map {
            fields.add(name.as_str(), Bytes::copy_from_slice(value.as_bytes()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{CONTENT_TYPE, HOST};
    use http::HeaderValue;

    #[test]
    fn keeps_insertion_order_and_case() {
        let mut fields = HeaderFields::new();
        fields.add("Host", "something").add("User-Agent", "test").add("X-Trace", "1");

        let names: Vec<&str> = fields.iter().map(HeaderField::name).collect();
        assert_eq!(names, vec!["Host", "User-Agent", "X-Trace"]);
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn lookup_ignores_case() {
        let mut fields = HeaderFields::new();
        fields.add("Content-Length", "58");

        assert_eq!(fields.get("content-length"), Some(&b"58"[..]));
        assert_eq!(fields.get_str("CONTENT-LENGTH"), Some("58"));
        assert!(fields.contains("Content-length"));
        assert_eq!(fields.get("Host"), None);
    }

    #[test]
    fn put_replaces_all_values() {
        let mut fields = HeaderFields::new();
        fields.add("Accept", "text/html").add("Host", "a").add("accept", "application/json");

        fields.put("ACCEPT", "*/*");

        assert_eq!(fields.len(), 2);
        let all: Vec<&[u8]> = fields.get_all("accept").collect();
        assert_eq!(all, vec![&b"*/*"[..]]);
        assert_eq!(fields.iter().next().unwrap().name(), "ACCEPT");
    }

    #[test]
    fn put_appends_missing_field() {
        let mut fields = HeaderFields::new();
        fields.add("Host", "a");
        fields.put("Server", "micro");
        assert_eq!(fields.iter().last().unwrap().name(), "Server");
    }

    #[test]
    fn remove_counts_fields() {
        let mut fields: HeaderFields = vec![("A", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(fields.remove("a"), 2);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.remove("a"), 0);
    }

    #[test]
    fn from_header_map() {
        let mut map = HeaderMap::new();
        map.insert(HOST, HeaderValue::from_static("127.0.0.1:8080"));
        map.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let fields = HeaderFields::from(&map);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get_str("Host"), Some("127.0.0.1:8080"));
        assert_eq!(fields.get_str("content-type"), Some("text/plain"));
    }
}
