//! # Headings and Sections
//!
//! Stateless scanning over a document's lines. There is no document model: every
//! operation receives the full line sequence, finds what it needs, and is done.
//!
//! ## Headings
//!
//! A heading is any line whose trimmed content starts with `#`. Its level is the
//! number of leading `#` characters and its key is the remainder, trimmed and
//! lowercased:
//!
//! ```text
//! "  ## Stand-Up  "   level 2, key "stand-up"
//! "#Log"              level 1, key "log"
//! ```
//!
//! ## Section Boundaries
//!
//! A section starts at its heading and runs until the next heading of the **same
//! or shallower** level, or the end of the document. Deeper headings are nested
//! content:
//!
//! ```text
//! 0  ## Standup        <- section start (level 2)
//! 1  notes
//! 2  ### Blockers      <- level 3: still inside
//! 3  none
//! 4  ## Retro          <- level 2: section end = 4
//! ```
//!
//! Appending "after a heading" therefore lands after its subsections, right before
//! the next sibling or parent heading.

/// Returns the heading level of `line`, or `None` when it is not a heading.
pub fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    if !trimmed.starts_with('#') {
        return None;
    }
    Some(trimmed.chars().take_while(|c| *c == '#').count())
}

/// Case-folded heading key: leading `#` removed, surrounding whitespace trimmed.
pub fn normalize_heading(text: &str) -> String {
    text.trim().trim_start_matches('#').trim().to_lowercase()
}

/// Only a truly empty line separates content; whitespace-only lines are content.
pub fn is_empty_line(line: &str) -> bool {
    line.is_empty()
}

/// Index of the first heading whose key equals the key of `target`.
pub fn find_heading(lines: &[String], target: &str) -> Option<usize> {
    let key = normalize_heading(target);
    lines
        .iter()
        .position(|line| heading_level(line).is_some() && normalize_heading(line) == key)
}

/// Index one past the last line of the section opened at `start`.
///
/// If `start` is not a heading, the section runs to the end of the document.
pub fn section_end(lines: &[String], start: usize) -> usize {
    let Some(level) = lines.get(start).and_then(|l| heading_level(l)) else {
        return lines.len();
    };

    lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| heading_level(line).is_some_and(|l| l <= level))
        .map(|(idx, _)| idx)
        .unwrap_or(lines.len())
}

/// Computes where content appended to the section at `start` goes, inserting a
/// blank separator first when the section's last line is not blank.
pub fn section_insert_point(lines: &mut Vec<String>, start: usize) -> usize {
    let mut end = section_end(lines, start);
    if end > 0 && !is_empty_line(&lines[end - 1]) {
        lines.insert(end, String::new());
        end += 1;
    }
    end
}

/// Appends a blank line unless the document is empty or already ends in one.
pub fn ensure_trailing_blank(lines: &mut Vec<String>) {
    if lines.last().is_some_and(|l| !is_empty_line(l)) {
        lines.push(String::new());
    }
}
