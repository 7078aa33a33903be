//! Response bodies of geocoding requests, kept for the lifetime of the process so identical
//! lookups hit the network once.

use std::collections::HashMap;

use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct ResponseCache {
    bodies: Mutex<HashMap<String, String>>,
}

impl ResponseCache {
    pub fn get(&self, uri: &str) -> Option<String> {
        self.bodies.lock().get(uri).cloned()
    }

    pub fn insert(&self, uri: &str, body: &str) {
        self.bodies.lock().insert(uri.to_string(), body.to_string());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bodies.lock().len()
    }
}
