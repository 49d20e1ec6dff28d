//! Maps a translation file path to its `(project, locale)` identity.

use std::path::Path;

use regex::Regex;

use crate::config::ProjectConfig;
use crate::indexer::types::PathIdentity;

/// Extension every translation file carries.
const TRANSLATION_EXTENSION: &str = ".json";

/// Directory separator used when taking a path apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `/`
    Slash,
    /// `\`
    Backslash,
}

impl Separator {
    /// Separator of the host platform.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) { Self::Backslash } else { Self::Slash }
    }

    /// The separator as it appears in a path.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slash => "/",
            Self::Backslash => "\\",
        }
    }

    /// Rewrites both separator styles in `path` to this one.
    fn normalize(self, path: &str) -> String {
        match self {
            Self::Slash => path.replace('\\', "/"),
            Self::Backslash => path.replace('/', "\\"),
        }
    }
}

/// Resolves `path` against the configured projects.
///
/// The workspace root is stripped first, then the first project whose root
/// is a prefix of the remainder wins. The locale is whatever lies between
/// `<root><separator>` and the trailing `.json`, so nested files keep their
/// directories (`common/en`). Never fails: unknown paths come back with no
/// project and an empty locale.
#[must_use]
pub fn resolve_identity(
    path: &Path,
    workspace_root: &Path,
    projects: &[ProjectConfig],
    separator: Separator,
) -> PathIdentity {
    let path = path.to_string_lossy();
    let root = workspace_root.to_string_lossy();
    let relative = strip_root(&path, &root, separator);

    let Some(project) = projects
        .iter()
        .find(|project| contains_path(&separator.normalize(project_root(project)), relative, separator))
    else {
        return PathIdentity { project: None, locale: String::new() };
    };

    let locale = locale_pattern(project, separator)
        .and_then(|pattern| {
            pattern.captures(relative).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
        })
        .unwrap_or_default();

    PathIdentity { project: Some(project.name.clone()), locale }
}

/// Project root without leading `./` or trailing separators.
fn project_root(project: &ProjectConfig) -> &str {
    let root = project.path.strip_prefix("./").unwrap_or(&project.path);
    root.trim_end_matches(['/', '\\'])
}

/// Whether `relative` is `root` itself or lies below it. Sibling directories
/// sharing a name prefix (`i18n/app` and `i18n/application`) do not match.
fn contains_path(root: &str, relative: &str, separator: Separator) -> bool {
    relative
        .strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(separator.as_str()))
}

/// `path` relative to `root`, or `path` unchanged when it lies outside.
fn strip_root<'a>(path: &'a str, root: &str, separator: Separator) -> &'a str {
    let root = root.trim_end_matches(['/', '\\']);
    path.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix(separator.as_str()))
        .unwrap_or(path)
}

/// `^<root><sep>(.+)\.json$`, with every literal part escaped.
fn locale_pattern(project: &ProjectConfig, separator: Separator) -> Option<Regex> {
    let pattern = format!(
        "^{}{}(.+){}$",
        regex::escape(&separator.normalize(project_root(project))),
        regex::escape(separator.as_str()),
        regex::escape(TRANSLATION_EXTENSION),
    );
    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(error) => {
            tracing::warn!(project = %project.name, %error, "Invalid locale pattern");
            None
        }
    }
}
