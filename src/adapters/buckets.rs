//! Bucket bookkeeping shared by the cache storage adapters

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::worker::{Request, Response};

/// One named bucket: request identity to response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Bucket {
    name: String,
    entries: BTreeMap<String, Response>,
}

/// All buckets of a cache storage, kept in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheBuckets {
    buckets: Vec<Bucket>,
}

impl CacheBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.buckets.iter().map(|b| b.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Create `name` if missing. Returns whether it was created.
    pub fn open(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.buckets.push(Bucket {
            name: name.to_string(),
            entries: BTreeMap::new(),
        });
        true
    }

    pub fn delete(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.buckets.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str, request: &Request) -> Option<Response> {
        let idx = self.position(name)?;
        self.buckets[idx].entries.get(&request.identity()).cloned()
    }

    /// First hit across buckets, oldest bucket first
    pub fn find(&self, request: &Request) -> Option<Response> {
        let key = request.identity();
        self.buckets
            .iter()
            .find_map(|bucket| bucket.entries.get(&key).cloned())
    }

    pub fn insert(&mut self, name: &str, request: &Request, response: Response) {
        self.open(name);
        if let Some(idx) = self.position(name) {
            self.buckets[idx]
                .entries
                .insert(request.identity(), response);
        }
    }

    /// Store a batch in `name`, creating the bucket even for an empty batch
    pub fn insert_all(&mut self, name: &str, entries: Vec<(Request, Response)>) {
        self.open(name);
        for (request, response) in entries {
            self.insert(name, &request, response);
        }
    }

    /// Number of entries in `name`, `None` if the bucket does not exist
    pub fn len_of(&self, name: &str) -> Option<usize> {
        self.position(name).map(|idx| self.buckets[idx].entries.len())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.buckets.iter().position(|b| b.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_is_idempotent() {
        let mut buckets = CacheBuckets::new();
        assert!(buckets.open("v1"));
        assert!(!buckets.open("v1"));
        assert_eq!(buckets.names(), vec!["v1".to_string()]);
    }

    #[test]
    fn test_find_prefers_oldest_bucket() {
        let mut buckets = CacheBuckets::new();
        let request = Request::get("./app.js");
        buckets.insert("old", &request, Response::ok("old"));
        buckets.insert("new", &request, Response::ok("new"));

        assert_eq!(buckets.find(&request).unwrap().body, b"old".to_vec());
        assert_eq!(buckets.get("new", &request).unwrap().body, b"new".to_vec());
    }

    #[test]
    fn test_last_write_wins() {
        let mut buckets = CacheBuckets::new();
        let request = Request::get("./app.js");
        buckets.insert("v1", &request, Response::ok("a"));
        buckets.insert("v1", &request, Response::ok("b"));

        assert_eq!(buckets.len_of("v1"), Some(1));
        assert_eq!(buckets.get("v1", &request).unwrap().body, b"b".to_vec());
    }

    #[test]
    fn test_delete() {
        let mut buckets = CacheBuckets::new();
        buckets.insert("v1", &Request::get("./"), Response::ok(""));

        assert!(buckets.delete("v1"));
        assert!(!buckets.delete("v1"));
        assert_eq!(buckets.len_of("v1"), None);
        assert_eq!(buckets.find(&Request::get("./")), None);
    }

    #[test]
    fn test_insert_all_creates_bucket() {
        let mut buckets = CacheBuckets::new();
        buckets.insert_all("empty", Vec::new());
        buckets.insert_all("v1", vec![(Request::get("./"), Response::ok("a"))]);

        assert_eq!(buckets.len_of("empty"), Some(0));
        assert_eq!(buckets.len_of("v1"), Some(1));
    }
}
