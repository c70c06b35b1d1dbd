//! Saving generated articles as markdown files.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::ExportError;

pub const FALLBACK_FILENAME: &str = "블로그_글.md";

fn is_filename_char(c: char) -> bool {
    ('가'..='힣').contains(&c)
        || ('ㄱ'..='ㅎ').contains(&c)
        || ('ㅏ'..='ㅣ').contains(&c)
        || c.is_ascii_alphanumeric()
}

/// Markdown filename derived from a title.
///
/// Characters outside Hangul, ASCII letters and digits become `_`, runs of
/// `_` collapse to one, and leading or trailing `_` are dropped.
pub fn default_filename(title: Option<&str>) -> String {
    let Some(title) = title else {
        return FALLBACK_FILENAME.to_string();
    };

    let mut stem = String::with_capacity(title.len());
    for c in title.chars() {
        let c = if is_filename_char(c) { c } else { '_' };
        if c == '_' && stem.ends_with('_') {
            continue;
        }
        stem.push(c);
    }

    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        format!("{stem}.md")
    }
}

/// A bare file name: one normal component, no separators of either platform.
fn is_bare_filename(name: &str) -> bool {
    let mut components = Path::new(name).components();
    !name.contains(['/', '\\'])
        && matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
}

/// Write `content` to `dir/filename`, creating `dir` if needed.
///
/// `filename` must name a file directly inside `dir`.
pub fn save_markdown(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, ExportError> {
    let filename = filename.trim();
    if filename.is_empty() {
        return Err(ExportError::EmptyFilename);
    }
    if !is_bare_filename(filename) {
        return Err(ExportError::NotAFileName(filename.to_string()));
    }

    let path = dir.join(filename);
    let io_err = |source| ExportError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_err)?;
    fs::write(&path, content.as_bytes()).map_err(io_err)?;

    tracing::info!("Saved article to {:?} ({} bytes)", path, content.len());
    Ok(path)
}
