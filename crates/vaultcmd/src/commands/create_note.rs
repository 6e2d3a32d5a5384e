use crate::error::{Result, VaultError};
use crate::store::{split_lines, DocumentStore};

/// Creates `path` with an optional `# title` line, failing if it already exists.
///
/// The title line is skipped when the body already opens with a heading.
pub fn run<S: DocumentStore>(store: &S, path: &str, title: &str, body_md: &str) -> Result<String> {
    store.locked(path, || {
        if store.exists(path)? {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }

        let mut lines = Vec::new();
        if !title.trim().is_empty() && !body_md.trim_start().starts_with('#') {
            lines.push(format!("# {}", title.trim()));
            lines.push(String::new());
        }
        lines.extend(split_lines(body_md));

        store.write_lines(path, &lines)?;
        Ok(path.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::memory::MemStore;

    #[test]
    fn creates_with_title_heading() {
        let store = MemStore::new();
        let id = run(&store, "Projects/Alpha.md", "Alpha", "Kickoff notes\nsecond line").unwrap();

        assert_eq!(id, "Projects/Alpha.md");
        assert_eq!(
            store.content("Projects/Alpha.md").unwrap(),
            "# Alpha\n\nKickoff notes\nsecond line\n"
        );
    }

    #[test]
    fn body_heading_suppresses_title() {
        let store = MemStore::new();
        run(&store, "a.md", "Alpha", "## Custom\ntext").unwrap();
        assert_eq!(store.content("a.md").unwrap(), "## Custom\ntext\n");
    }

    #[test]
    fn refuses_to_overwrite() {
        let store = MemStore::new();
        store.insert("a.md", "keep me").unwrap();

        let err = run(&store, "a.md", "Alpha", "new").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(store.content("a.md").unwrap(), "keep me\n");
    }

    #[test]
    fn empty_existing_file_still_counts() {
        let store = MemStore::new();
        store.insert("a.md", "").unwrap();
        assert!(run(&store, "a.md", "Alpha", "x").is_err());
    }
}
