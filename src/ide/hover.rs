//! Hover implementation

use std::fmt::Write as _;

use crate::config::ProjectConfig;
use crate::ide::lookup::LookupEntry;

/// Characters inspected on each side of the cursor.
const HOVER_WINDOW: usize = 50;

/// Extracts the translation key under or near the cursor.
///
/// Looks at up to [`HOVER_WINDOW`] characters on each side of `character`
/// for single-quoted strings containing a dot. The string spanning the
/// cursor wins; otherwise the first one in the window is used.
#[must_use]
pub fn extract_key(line: &str, character: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let character = character.min(chars.len());
    let start = character.saturating_sub(HOVER_WINDOW);
    let end = character.saturating_add(HOVER_WINDOW).min(chars.len());
    let window = chars.get(start..end)?;
    let cursor = character - start;

    let candidates = quoted_keys(window);
    candidates
        .iter()
        .find(|(open, close, _)| (*open..=*close).contains(&cursor))
        .or_else(|| candidates.first())
        .map(|(_, _, key)| key.clone())
}

/// `(opening quote, closing quote, contents)` for each quoted dotted string.
fn quoted_keys(window: &[char]) -> Vec<(usize, usize, String)> {
    let mut keys = Vec::new();
    let mut open: Option<usize> = None;

    for (index, &ch) in window.iter().enumerate() {
        if ch != '\'' {
            continue;
        }
        match open.take() {
            None => open = Some(index),
            Some(start) => {
                let key: String = window.get(start + 1..index).unwrap_or_default().iter().collect();
                if key.contains('.') {
                    keys.push((start, index, key));
                }
            }
        }
    }

    keys
}

/// Renders lookup results as one markdown table per project.
///
/// Projects appear in configured order; projects without entries are left
/// out. Returns `None` when there is nothing to show.
#[must_use]
pub fn generate_hover_content(projects: &[ProjectConfig], entries: &[LookupEntry]) -> Option<String> {
    let mut content = String::new();

    for project in projects {
        let mut rows = entries.iter().filter(|entry| entry.project == project.name).peekable();
        if rows.peek().is_none() {
            continue;
        }

        let _ = writeln!(content, "|{}||", escape_cell(&project.name));
        content.push_str("|:--|:--|\n");
        for entry in rows {
            let _ = writeln!(
                content,
                "|[{}]|{}|",
                escape_cell(&entry.locale),
                escape_cell(&entry.value.to_string())
            );
        }
        content.push('\n');
    }

    if content.is_empty() { None } else { Some(content) }
}

/// Keeps a value inside its table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}
