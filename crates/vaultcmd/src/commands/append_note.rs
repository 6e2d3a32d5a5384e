use crate::error::Result;
use crate::model::Placement;
use crate::sections::{ensure_trailing_blank, find_heading, is_empty_line, section_insert_point};
use crate::store::{split_lines, DocumentStore};

/// Adds `body_md` to `path`, creating the document if it does not exist.
///
/// - `Top`: before everything, followed by a blank line.
/// - `Bottom`: after a blank separator, followed by a blank line.
/// - `AfterHeading`: at the end of the heading's section. A missing heading is
///   appended to the document first rather than treated as an error.
pub fn run<S: DocumentStore>(
    store: &S,
    path: &str,
    body_md: &str,
    placement: &Placement,
) -> Result<String> {
    store.locked(path, || {
        let existing = store.read_lines(path)?.unwrap_or_default();
        let content = split_lines(body_md);
        let lines = match placement {
            Placement::Top => prepend(existing, content),
            Placement::Bottom => append_bottom(existing, content),
            Placement::AfterHeading(heading) => append_under(existing, content, heading),
        };
        store.write_lines(path, &lines)?;
        Ok(path.to_string())
    })
}

fn prepend(existing: Vec<String>, mut content: Vec<String>) -> Vec<String> {
    content.push(String::new());
    content.extend(existing);
    content
}

fn append_bottom(mut lines: Vec<String>, content: Vec<String>) -> Vec<String> {
    ensure_trailing_blank(&mut lines);
    lines.extend(content);
    lines.push(String::new());
    lines
}

fn append_under(mut lines: Vec<String>, content: Vec<String>, heading: &str) -> Vec<String> {
    let start = match find_heading(&lines, heading) {
        Some(idx) => idx,
        None => {
            tracing::debug!(heading, "heading not found, creating it at end of document");
            ensure_trailing_blank(&mut lines);
            lines.push(heading_line(heading));
            lines.push(String::new());
            lines.len() - 2
        }
    };

    let at = section_insert_point(&mut lines, start);
    let inserted = content.len();
    let tail = lines.split_off(at);
    lines.extend(content);
    lines.extend(tail);

    // Keep one blank line between the new content and a following heading.
    let after = at + inserted;
    if after < lines.len() && !is_empty_line(&lines[after]) {
        lines.insert(after, String::new());
    }
    lines
}

/// Heading text as given when it carries its own `#` marker, else a level-2 heading.
fn heading_line(heading: &str) -> String {
    let heading = heading.trim();
    if heading.starts_with('#') {
        heading.to_string()
    } else {
        format!("## {}", heading)
    }
}
