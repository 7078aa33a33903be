//! The default location of each user, keyed by their user@host identity and kept in a JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct LocationStore {
    path: Option<PathBuf>,
    locations: BTreeMap<String, String>,
}

impl LocationStore {
    /// An empty store that is never written to disk.
    #[cfg(test)]
    pub fn in_memory() -> LocationStore {
        LocationStore::default()
    }

    /// Load the store from `path`. A missing or unreadable file yields an empty store; the file
    /// is (re)created on the next flush.
    pub fn load(path: &Path) -> LocationStore {
        let locations = match fs::read_to_string(path) {
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!("Unable to read location database {}: {}", path.display(), err);
                }
                BTreeMap::new()
            },
            Ok(json) =>
                match serde_json::from_str(&json) {
                    Ok(locations) =>
                        locations,
                    Err(err) => {
                        warn!("Ignoring corrupt location database {}: {}", path.display(), err);
                        BTreeMap::new()
                    },
                },
        };
        debug!("Loaded {} locations from {}", locations.len(), path.display());

        LocationStore {
            path: Some(path.to_path_buf()),
            locations,
        }
    }

    pub fn get(&self, identity: &str) -> Option<&str> {
        self.locations.get(identity).map(String::as_str)
    }

    pub fn set(&mut self, identity: &str, location: &str) {
        self.locations.insert(identity.to_string(), location.to_string());
    }

    /// Remove the location for `identity`; returns whether there was one.
    pub fn unset(&mut self, identity: &str) -> bool {
        self.locations.remove(identity).is_some()
    }

    /// Serialize the store for writing elsewhere, e.g. off the async runtime. `None` for a store
    /// without a file.
    pub fn pending_write(&self) -> io::Result<Option<PendingWrite>> {
        let path = match self.path {
            Some(ref path) => path.clone(),
            None => return Ok(None),
        };

        Ok(Some(PendingWrite {
            path,
            json: serde_json::to_string_pretty(&self.locations)?,
            count: self.locations.len(),
        }))
    }

    /// Rewrite the whole file.
    pub fn flush(&self) -> io::Result<()> {
        match self.pending_write()? {
            Some(pending) => pending.commit(),
            None => Ok(()),
        }
    }
}

/// A serialized snapshot of a `LocationStore`, not yet on disk.
#[derive(Debug)]
pub struct PendingWrite {
    path: PathBuf,
    json: String,
    count: usize,
}

impl PendingWrite {
    /// The new contents are written next to the file first and renamed into place, so a crash
    /// mid-write leaves the previous version.
    pub fn commit(self) -> io::Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &self.json)?;
        fs::rename(&tmp, &self.path)?;

        debug!("Wrote {} locations to {}", self.count, self.path.display());
        Ok(())
    }
}
