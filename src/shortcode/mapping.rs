//! # Mapping Store
//!
//! The in-memory, bidirectional association between short codes and target URLs.
//!
//! Invariants held by every [`MappingStore`]:
//! - every code is [`CODE_LEN`](crate::model::CODE_LEN) uppercase ASCII letters
//! - codes are unique, and so are URLs: a URL maps to at most one code
//! - entries are only ever appended, never updated or removed
//!
//! Entries keep their insertion order, which is also the order they are written to
//! and read back from a snapshot.
//!
//! The store does not persist itself. [`MappingStore::load`] and [`MappingStore::save`]
//! go through [`FileStore`](crate::store::fs::FileStore); anything implementing
//! [`SnapshotStore`](crate::store::SnapshotStore) can be used instead.

use crate::codegen::CodeGenerator;
use crate::error::{Result, ShortenError};
use crate::model::{is_valid_code, Mapping};
use crate::store::fs::FileStore;
use crate::store::SnapshotStore;
use rand::Rng;
use serde::de;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    entries: Vec<Mapping>,
    by_code: HashMap<String, usize>,
    by_url: HashMap<String, usize>,
    generator: CodeGenerator,
}

impl PartialEq for MappingStore {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for MappingStore {}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(mut self, generator: CodeGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn generator(&self) -> CodeGenerator {
        self.generator
    }

    /// Builds a store from `(code, url)` pairs, checking every invariant.
    ///
    /// On failure the error string names the offending entry; callers wrap it in
    /// the error that fits their source.
    pub fn from_pairs<I>(pairs: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut store = Self::new();
        for (code, url) in pairs {
            if !is_valid_code(&code) {
                return Err(format!("invalid code {:?}", code));
            }
            if url.is_empty() {
                return Err(format!("empty URL for code {}", code));
            }
            if store.by_code.contains_key(&code) {
                return Err(format!("duplicate code {}", code));
            }
            if let Some(&idx) = store.by_url.get(&url) {
                return Err(format!(
                    "URL {} is mapped by both {} and {}",
                    url, store.entries[idx].code, code
                ));
            }
            store.insert(code, url);
        }
        Ok(store)
    }

    /// Loads the snapshot at `path`. A missing file yields an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        FileStore::new(path.as_ref()).load()
    }

    /// Writes a full snapshot to `path`, replacing whatever was there.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        FileStore::new(path.as_ref()).save(self)
    }

    /// Maps `url` to a fresh code using the thread-local RNG.
    ///
    /// Fails with [`ShortenError::AlreadyExists`] carrying the existing code if the
    /// exact same URL string is already stored; the store is left untouched.
    /// URL syntax is not checked here.
    pub fn add(&mut self, url: &str) -> Result<String> {
        self.add_with_rng(url, &mut rand::rng())
    }

    pub fn add_with_rng<R: Rng + ?Sized>(&mut self, url: &str, rng: &mut R) -> Result<String> {
        if url.is_empty() {
            return Err(ShortenError::InvalidUrl("URL cannot be empty".into()));
        }

        if let Some(existing) = self.code_for(url) {
            return Err(ShortenError::AlreadyExists {
                existing_code: existing.to_string(),
            });
        }

        let code = self
            .generator
            .generate_unique(rng, |candidate| self.by_code.contains_key(candidate))?;
        self.insert(code.clone(), url.to_string());
        debug!(code = %code, url, total = self.entries.len(), "added mapping");
        Ok(code)
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.by_code
            .get(code)
            .map(|&idx| self.entries[idx].url.as_str())
    }

    /// Reverse lookup: the code already assigned to `url`, if any.
    pub fn code_for(&self, url: &str) -> Option<&str> {
        self.by_url
            .get(url)
            .map(|&idx| self.entries[idx].code.as_str())
    }

    /// All mappings in insertion order.
    pub fn list_all(&self) -> impl ExactSizeIterator<Item = &Mapping> + '_ {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Mapping] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, code: String, url: String) {
        let idx = self.entries.len();
        self.by_code.insert(code.clone(), idx);
        self.by_url.insert(url.clone(), idx);
        self.entries.push(Mapping { code, url });
    }
}

impl Serialize for MappingStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for m in &self.entries {
            map.serialize_entry(&m.code, &m.url)?;
        }
        map.end()
    }
}

// serde_json's map keeps file order. Duplicate keys collapse to the last value.
impl<'de> Deserialize<'de> for MappingStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;

        let mut pairs = Vec::with_capacity(raw.len());
        for (code, value) in raw {
            match value {
                serde_json::Value::String(url) => pairs.push((code, url)),
                other => {
                    return Err(de::Error::custom(format!(
                        "value for {} is not a string: {}",
                        code, other
                    )))
                }
            }
        }
        MappingStore::from_pairs(pairs).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_add_and_lookup() {
        let mut store = MappingStore::new();
        let code = store.add("https://example.com").unwrap();

        assert!(is_valid_code(&code));
        assert_eq!(store.lookup(&code), Some("https://example.com"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_same_url_returns_existing_code() {
        let mut store = MappingStore::new();
        let code = store.add("https://example.com").unwrap();

        match store.add("https://example.com") {
            Err(ShortenError::AlreadyExists { existing_code }) => assert_eq!(existing_code, code),
            other => panic!("expected AlreadyExists, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_urls_are_not_normalized() {
        let mut store = MappingStore::new();
        let a = store.add("https://example.com").unwrap();
        let b = store.add("https://example.com/").unwrap();
        let c = store.add("HTTPS://example.com").unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(HashSet::from([&a, &b, &c]).len(), 3);
    }

    #[test]
    fn test_many_adds_give_distinct_codes() {
        let mut store = MappingStore::new();
        let mut rng = StdRng::seed_from_u64(11);
        let mut codes = HashSet::new();

        for i in 0..2000 {
            let code = store
                .add_with_rng(&format!("https://example.com/{}", i), &mut rng)
                .unwrap();
            assert!(is_valid_code(&code));
            codes.insert(code);
        }

        assert_eq!(codes.len(), 2000);
        assert_eq!(store.len(), 2000);
    }

    #[test]
    fn test_lookup_unknown_and_case_sensitive() {
        let mut store = MappingStore::new();
        let code = store.add("https://example.com").unwrap();

        assert_eq!(store.lookup(&code.to_lowercase()), None);
        assert_eq!(store.lookup(&code[..5]), None);
        assert_eq!(store.lookup(""), None);
    }

    #[test]
    fn test_empty_url_rejected() {
        let mut store = MappingStore::new();
        assert!(matches!(store.add(""), Err(ShortenError::InvalidUrl(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_exhaustion_leaves_store_untouched() {
        let mut store = MappingStore::new();
        let first = store
            .add_with_rng("https://a.example", &mut StdRng::seed_from_u64(5))
            .unwrap();

        // Same seed, one draw: the only candidate is the code already taken.
        let mut store = store.with_generator(CodeGenerator::new(1));
        let err = store
            .add_with_rng("https://b.example", &mut StdRng::seed_from_u64(5))
            .unwrap_err();

        assert!(matches!(err, ShortenError::CodeSpaceExhausted { attempts: 1 }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup(&first), Some("https://a.example"));
        assert_eq!(store.code_for("https://b.example"), None);
    }

    #[test]
    fn test_list_all_in_insertion_order_and_restartable() {
        let mut store = MappingStore::new();
        let urls = ["https://c.example", "https://a.example", "https://b.example"];
        let codes: Vec<String> = urls.iter().map(|u| store.add(u).unwrap()).collect();

        let first: Vec<&Mapping> = store.list_all().collect();
        let second: Vec<&Mapping> = store.list_all().collect();
        assert_eq!(first, second);

        let listed: Vec<(&str, &str)> = first
            .iter()
            .map(|m| (m.code.as_str(), m.url.as_str()))
            .collect();
        let expected: Vec<(&str, &str)> = codes
            .iter()
            .map(String::as_str)
            .zip(urls.iter().copied())
            .collect();
        assert_eq!(listed, expected);
    }

    #[test]
    fn test_from_pairs_rejects_bad_code() {
        let err = MappingStore::from_pairs(vec![("abc".to_string(), "https://x".to_string())])
            .unwrap_err();
        assert!(err.contains("invalid code"));
    }

    #[test]
    fn test_from_pairs_rejects_empty_url() {
        let err = MappingStore::from_pairs(vec![("ABCDEF".to_string(), String::new())])
            .unwrap_err();
        assert!(err.contains("empty URL"));
    }

    #[test]
    fn test_from_pairs_rejects_shared_url() {
        let err = MappingStore::from_pairs(vec![
            ("AAAAAA".to_string(), "https://x".to_string()),
            ("BBBBBB".to_string(), "https://x".to_string()),
        ])
        .unwrap_err();
        assert!(err.contains("mapped by both"));
    }

    #[test]
    fn test_serialize_flat_object_in_order() {
        let store = MappingStore::from_pairs(vec![
            ("ZZZZZZ".to_string(), "https://z.example".to_string()),
            ("AAAAAA".to_string(), "https://a.example".to_string()),
        ])
        .unwrap();

        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(
            json,
            r#"{"ZZZZZZ":"https://z.example","AAAAAA":"https://a.example"}"#
        );
    }

    #[test]
    fn test_deserialize_preserves_file_order() {
        let json = r#"{"GHIJKL": "https://another.example/page", "ABCDEF": "https://example.com"}"#;
        let store: MappingStore = serde_json::from_str(json).unwrap();

        let codes: Vec<&str> = store.list_all().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["GHIJKL", "ABCDEF"]);
        assert_eq!(store.code_for("https://example.com"), Some("ABCDEF"));
    }

    #[test]
    fn test_deserialize_rejects_non_object_and_non_string_values() {
        assert!(serde_json::from_str::<MappingStore>("[]").is_err());
        assert!(serde_json::from_str::<MappingStore>(r#"{"ABCDEF": 3}"#).is_err());
        assert!(serde_json::from_str::<MappingStore>(r#""ABCDEF""#).is_err());
    }

    #[test]
    fn test_deserialize_duplicate_key_keeps_last() {
        let store: MappingStore =
            serde_json::from_str(r#"{"ABCDEF": "https://a.example", "ABCDEF": "https://b.example"}"#)
                .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("ABCDEF"), Some("https://b.example"));
    }
}
