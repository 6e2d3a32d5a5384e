use crate::error::Result;
use crate::store::{split_lines, DocumentStore};

/// Replaces the whole document with `body_md`, creating it if needed.
pub fn run<S: DocumentStore>(store: &S, path: &str, body_md: &str) -> Result<String> {
    store.locked(path, || {
        store.write_lines(path, &split_lines(body_md))?;
        Ok(path.to_string())
    })
}
