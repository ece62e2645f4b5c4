//! Namespace table
//!
//! An ordered list of prefix → namespace bindings. Prefixes are unique:
//! adding an already-bound prefix is rejected rather than overwritten.

use std::fmt;

/// Anything that can map a namespace prefix to its namespace IRI
pub trait PrefixLookup {
    fn namespace(&self, prefix: &str) -> Option<&str>;
}

/// Where a vocabulary's term definitions were loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationType {
    #[default]
    None,
    Url,
    File,
}

impl LocationType {
    /// Parse a `loctype` value; unknown values map to `None`
    pub fn from_loc_type_str(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "URL" => LocationType::Url,
            "FILE" => LocationType::File,
            "NONE" | "" => LocationType::None,
            other => {
                tracing::warn!(loctype = other, "Unknown vocabulary location type, using NONE");
                LocationType::None
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::None => "NONE",
            LocationType::Url => "URL",
            LocationType::File => "FILE",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prefix binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub prefix: String,
    pub namespace: String,
    pub location: String,
    pub location_type: LocationType,
}

impl Vocabulary {
    pub fn new(prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            namespace: namespace.into(),
            location: String::new(),
            location_type: LocationType::None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>, location_type: LocationType) -> Self {
        self.location = location.into();
        self.location_type = location_type;
        self
    }
}

/// Ordered, prefix-unique vocabulary list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyList {
    vocabs: Vec<Vocabulary>,
}

/// Bindings used when a document declares no namespaces
const PREDEFINED: &[(&str, &str)] = &[
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("vcard", "http://www.w3.org/2006/vcard/ns#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
];

impl VocabularyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard vocabularies (`rdf`, `rdfs`, `owl`, `xsd`, `vcard`, `foaf`)
    pub fn predefined() -> Self {
        PREDEFINED
            .iter()
            .map(|(prefix, namespace)| Vocabulary::new(*prefix, *namespace))
            .collect()
    }

    /// Add a binding; returns `false` if the prefix is already bound
    pub fn add(&mut self, vocab: Vocabulary) -> bool {
        if self.contains_prefix(&vocab.prefix) {
            tracing::debug!(prefix = %vocab.prefix, "Vocabulary already bound");
            return false;
        }
        self.vocabs.push(vocab);
        true
    }

    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Vocabulary> {
        self.vocabs.iter().find(|v| v.prefix == prefix)
    }

    pub fn find_namespace_by_prefix(&self, prefix: &str) -> Option<&str> {
        self.find_by_prefix(prefix).map(|v| v.namespace.as_str())
    }

    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.find_by_prefix(prefix).is_some()
    }

    /// Remove a binding; returns `false` if the prefix was not bound
    pub fn remove_by_prefix(&mut self, prefix: &str) -> bool {
        match self.vocabs.iter().position(|v| v.prefix == prefix) {
            Some(idx) => {
                self.vocabs.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.vocabs.iter().map(|v| v.prefix.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vocabulary> {
        self.vocabs.iter()
    }

    pub fn len(&self) -> usize {
        self.vocabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabs.is_empty()
    }

    /// Prefix table announced to sinks
    ///
    /// The empty prefix is bound to `base_iri` unless the base is already
    /// some vocabulary's namespace.
    pub fn prefix_map(&self, base_iri: &str) -> Vec<(String, String)> {
        let mut map = Vec::with_capacity(self.vocabs.len() + 1);
        let base_is_bound = self.vocabs.iter().any(|v| v.namespace == base_iri);
        if !base_is_bound && !base_iri.is_empty() && !self.contains_prefix("") {
            map.push((String::new(), base_iri.to_string()));
        }
        map.extend(
            self.vocabs
                .iter()
                .map(|v| (v.prefix.clone(), v.namespace.clone())),
        );
        map
    }
}

impl PrefixLookup for VocabularyList {
    fn namespace(&self, prefix: &str) -> Option<&str> {
        self.find_namespace_by_prefix(prefix)
    }
}

impl FromIterator<Vocabulary> for VocabularyList {
    fn from_iter<I: IntoIterator<Item = Vocabulary>>(iter: I) -> Self {
        let mut list = VocabularyList::new();
        for vocab in iter {
            list.add(vocab);
        }
        list
    }
}

impl<'a> IntoIterator for &'a VocabularyList {
    type Item = &'a Vocabulary;
    type IntoIter = std::slice::Iter<'a, Vocabulary>;

    fn into_iter(self) -> Self::IntoIter {
        self.vocabs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VocabularyList {
        [
            Vocabulary::new("foaf", "http://xmlns.com/foaf/0.1/"),
            Vocabulary::new("xsd", "http://www.w3.org/2001/XMLSchema#"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_add_rejects_duplicate_prefix() {
        let mut list = sample();
        assert!(!list.add(Vocabulary::new("foaf", "http://other.org/")));
        assert_eq!(
            list.find_namespace_by_prefix("foaf"),
            Some("http://xmlns.com/foaf/0.1/")
        );
        assert!(list.add(Vocabulary::new("ex", "http://ex.org/")));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_remove_by_prefix() {
        let mut list = sample();
        assert!(list.remove_by_prefix("foaf"));
        assert!(!list.remove_by_prefix("foaf"));
        assert!(!list.contains_prefix("foaf"));
        assert_eq!(list.prefixes().collect::<Vec<_>>(), vec!["xsd"]);
    }

    #[test]
    fn test_prefix_map_binds_base() {
        let map = sample().prefix_map("http://ex.org/");
        assert_eq!(map[0], (String::new(), "http://ex.org/".to_string()));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_prefix_map_skips_bound_base() {
        let mut list = sample();
        list.add(Vocabulary::new("ex", "http://ex.org/"));
        let map = list.prefix_map("http://ex.org/");
        assert!(map.iter().all(|(prefix, _)| !prefix.is_empty()));
    }

    #[test]
    fn test_predefined() {
        let list = VocabularyList::predefined();
        assert_eq!(list.len(), 6);
        assert_eq!(
            list.find_namespace_by_prefix("rdfs"),
            Some("http://www.w3.org/2000/01/rdf-schema#")
        );
    }

    #[test]
    fn test_location_type() {
        assert_eq!(LocationType::from_loc_type_str("url"), LocationType::Url);
        assert_eq!(LocationType::from_loc_type_str("bogus"), LocationType::None);
        assert_eq!(LocationType::File.to_string(), "FILE");
    }
}
