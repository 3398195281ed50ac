//! Filesystem share store keyed by record id
//!
//! Layout: `<root>/<id>_share1.png` and `<root>/<id>_share2.png`. PNG keeps
//! the 2×2 block structure intact across a save/load cycle.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::qr::{QrOptions, render_qr};
use super::{load_share, save_binary};
use crate::ShareCodec;
use crate::codec::decode::{Rendering, decode_with};
use crate::error::{Result, VcsError};
use crate::models::{BinaryImage, SharePair};

const FIRST_SUFFIX: &str = "_share1.png";
const SECOND_SUFFIX: &str = "_share2.png";

/// Directory-backed storage for matched share pairs
#[derive(Debug, Clone)]
pub struct ShareStore {
    root: PathBuf,
}

impl ShareStore {
    /// Store rooted at `root` (created lazily on first write)
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at `VCS_STORE_ROOT` (default `media/shares`)
    pub fn from_env() -> Self {
        Self::new(crate::config::store_root())
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File paths of the two shares for `id`
    pub fn share_paths(&self, id: &str) -> Result<(PathBuf, PathBuf)> {
        validate_id(id)?;
        Ok((
            self.root.join(format!("{id}{FIRST_SUFFIX}")),
            self.root.join(format!("{id}{SECOND_SUFFIX}")),
        ))
    }

    // Leading '.' keeps staged files out of `list`; the `.png` tail keeps
    // `save_binary` on a lossless format.
    fn staging_path(&self, id: &str, suffix: &str) -> PathBuf {
        self.root.join(format!(".{id}{suffix}.partial.png"))
    }

    /// Persist a pair, replacing any previous pair for `id`
    ///
    /// Both shares are staged under hidden names and renamed into place only
    /// once both are written. On failure no new share is left under `id`.
    pub fn put(&self, id: &str, pair: &SharePair) -> Result<(PathBuf, PathBuf)> {
        let (first, second) = self.share_paths(id)?;
        fs::create_dir_all(&self.root)?;
        let staged_first = self.staging_path(id, FIRST_SUFFIX);
        let staged_second = self.staging_path(id, SECOND_SUFFIX);

        let mut placed_first = false;
        let written = save_binary(pair.first.as_image(), &staged_first)
            .and_then(|()| save_binary(pair.second.as_image(), &staged_second))
            .and_then(|()| {
                fs::rename(&staged_first, &first)?;
                placed_first = true;
                fs::rename(&staged_second, &second)?;
                Ok(())
            });

        if let Err(e) = written {
            let _ = fs::remove_file(&staged_first);
            let _ = fs::remove_file(&staged_second);
            if placed_first {
                // A lone share 1 next to a stale share 2 would reveal noise
                let _ = fs::remove_file(&first);
            }
            return Err(e);
        }

        if cfg!(debug_assertions) && crate::debug::debug_enabled() {
            eprintln!("STORE: put {} -> {}", id, self.root.display());
        }
        Ok((first, second))
    }

    /// Load both shares for `id`
    pub fn load(&self, id: &str) -> Result<SharePair> {
        let (first, second) = self.share_paths(id)?;
        Ok(SharePair {
            first: load_share(first)?,
            second: load_share(second)?,
        })
    }

    /// Load both shares and stack them
    pub fn reconstruct(&self, id: &str, rendering: Rendering) -> Result<BinaryImage> {
        let pair = self.load(id)?;
        decode_with(&pair.first, &pair.second, rendering)
    }

    /// Render `payload` as a QR code, split it and persist the shares
    pub fn enroll(
        &self,
        id: &str,
        payload: &str,
        options: &QrOptions,
        codec: &ShareCodec,
    ) -> Result<SharePair> {
        validate_id(id)?;
        let secret = render_qr(payload, options)?;
        let pair = codec.split(&secret)?;
        self.put(id, &pair)?;
        Ok(pair)
    }

    /// Delete both shares; missing files are not an error
    pub fn remove(&self, id: &str) -> Result<()> {
        let (first, second) = self.share_paths(id)?;
        for path in [first, second] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Ids with both shares present, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            let Some(id) = name.to_str().and_then(|n| n.strip_suffix(FIRST_SUFFIX)) else {
                continue;
            };
            if validate_id(id).is_ok() && self.root.join(format!("{id}{SECOND_SUFFIX}")).is_file()
            {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Ids become file-name prefixes, so only plain ASCII word characters pass
fn validate_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id.len() <= 128
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(VcsError::InvalidRecordId(id.to_string()))
    }
}
