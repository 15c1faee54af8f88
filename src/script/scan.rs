use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use regex::Regex;

use crate::foundation::error::{ReelError, ReelResult};

/// List files in `dir` whose name matches the shell-style glob `pattern`.
///
/// Only direct children are considered. Results are sorted by path. An empty result is not an
/// error, and neither is a missing `dir` (logged, zero matches).
pub fn scan_scripts(dir: &Path, pattern: &str) -> ReelResult<Vec<PathBuf>> {
    let matcher = glob_to_regex(pattern)?;

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "script directory does not exist");
            return Ok(Vec::new());
        }
        other => other
            .with_context(|| format!("failed to read script directory '{}'", dir.display()))?,
    };

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if matcher.is_match(name) {
            found.push(path);
        }
    }
    found.sort();

    tracing::info!(
        dir = %dir.display(),
        pattern,
        count = found.len(),
        "scanned for scripts"
    );
    Ok(found)
}

/// Compile a file-name glob into an anchored regex.
///
/// Supports `*`, `?`, `[abc]`, `[a-z]` and `[!abc]`; everything else matches literally,
/// including `^` inside a class.
pub fn glob_to_regex(pattern: &str) -> ReelResult<Regex> {
    if pattern.is_empty() {
        return Err(ReelError::validation("glob pattern must not be empty"));
    }

    let mut re = String::with_capacity(pattern.len() * 2 + 2);
    re.push('^');

    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            '[' => {
                let mut class = String::new();
                let mut closed = false;
                if chars.peek() == Some(&'!') {
                    chars.next();
                    class.push('^');
                }
                while let Some(cc) = chars.next() {
                    match cc {
                        ']' if !class.is_empty() && class != "^" => {
                            closed = true;
                            break;
                        }
                        '\\' | '[' | ']' | '&' | '~' | '^' => {
                            class.push('\\');
                            class.push(cc);
                        }
                        _ => class.push(cc),
                    }
                }
                if !closed {
                    return Err(ReelError::validation(format!(
                        "unterminated character class in glob '{pattern}'"
                    )));
                }
                re.push('[');
                re.push_str(&class);
                re.push(']');
            }
            _ => re.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
    }
    re.push('$');

    Regex::new(&re)
        .map_err(|e| ReelError::validation(format!("invalid glob '{pattern}': {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/script/scan.rs"]
mod tests;
