//! Local copy of the converted collection

use std::fs;
use std::path::Path;

use crate::client::CollectionEnvelope;
use crate::error::{Error, Result};

/// Write `envelope` as pretty-printed JSON, replacing any existing file
pub fn write_envelope(path: &Path, envelope: &CollectionEnvelope) -> Result<()> {
    let contents = serde_json::to_string_pretty(envelope)?;
    fs::write(path, contents).map_err(|source| Error::Persist {
        path: path.to_path_buf(),
        source,
    })
}
