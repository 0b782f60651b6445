//! Case preserving header collection.
//!
//! `http::HeaderMap` lowercases every name, but mongrel2 hands header names to
//! us exactly as the client sent them, and the front end writes our reply
//! verbatim to the client. [`Headers`] keeps names as given and keeps insertion
//! order, while lookups compare names ASCII case-insensitively.

/// An ordered multimap of header name to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value for `name`, keeping any values already present.
    pub fn append<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.entries.push((name.into(), value.into()));
    }

    /// Sets `name` to a single value.
    ///
    /// The first existing entry is overwritten in place and the others are
    /// removed, so the header keeps its position in the block.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter().position(|(key, _)| key.eq_ignore_ascii_case(&name)) {
            Some(index) => {
                let mut current = 0;
                self.entries.retain(|(key, _)| {
                    let keep = current <= index || !key.eq_ignore_ascii_case(&name);
                    current += 1;
                    keep
                });
                // entries up to `index` are untouched by the retain above
                self.entries[index] = (name, value);
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the first value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    /// Returns every value of `name`, in insertion order.
    pub fn get_all<'a, 'b>(&'a self, name: &'b str) -> impl Iterator<Item = &'a str> + use<'a, 'b> {
        self.entries.iter().filter(move |(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    /// Removes every value of `name`, returning how many were dropped.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        before - self.entries.len()
    }

    /// Iterates over `(name, value)` pairs, one per value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of values, not distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_all_values() {
        let mut headers = Headers::new();
        headers.append("Accept", "text/html");
        headers.append("X-Forwarded-For", "10.0.0.1");
        headers.append("accept", "*/*");

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("ACCEPT"), Some("text/html"));
        assert_eq!(headers.get_all("Accept").collect::<Vec<_>>(), vec!["text/html", "*/*"]);
    }

    #[test]
    fn test_names_keep_their_case() {
        let mut headers = Headers::new();
        headers.append("x-Custom-HEADER", "1");

        assert_eq!(headers.iter().next(), Some(("x-Custom-HEADER", "1")));
        assert!(headers.contains("X-CUSTOM-header"));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut headers = Headers::new();
        headers.append("Set-Cookie", "a=1");
        headers.append("Content-Type", "text/plain");
        headers.append("set-cookie", "b=2");

        headers.insert("Set-Cookie", "c=3");

        assert_eq!(headers.iter().collect::<Vec<_>>(), vec![("Set-Cookie", "c=3"), ("Content-Type", "text/plain")]);
    }

    #[test]
    fn test_insert_new_name() {
        let mut headers = Headers::new();
        headers.insert("Content-Length", "2");
        assert_eq!(headers.get("content-length"), Some("2"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut headers = Headers::new();
        headers.append("Cookie", "a=1");
        headers.append("Host", "example.com");
        headers.append("cookie", "b=2");

        assert_eq!(headers.remove("COOKIE"), 2);
        assert_eq!(headers.remove("Cookie"), 0);
        assert_eq!(headers.len(), 1);
        assert!(!headers.is_empty());
    }

    #[test]
    fn test_values_outlive_lookup_name() {
        let mut headers = Headers::new();
        headers.append("Accept", "text/html");
        headers.append("accept", "*/*");

        let first = {
            let name = String::from("ACCEPT");
            headers.get(&name)
        };
        let all: Vec<&str> = {
            let name = "accept".to_string();
            headers.get_all(&name).collect()
        };

        assert_eq!(first, Some("text/html"));
        assert_eq!(all, vec!["text/html", "*/*"]);
    }
}
