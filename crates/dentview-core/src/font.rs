use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ab_glyph::FontArc;

use crate::config::FontSpec;
use crate::consts::FONT_SEARCH_MAX_DEPTH;
use crate::error::{DentviewError, Result};

/// Families tried after the configured ones, so most Linux and macOS
/// installs still get a label font.
const FALLBACK_FAMILIES: [&str; 4] = ["DejaVu Sans", "Liberation Sans", "Noto Sans", "Verdana"];

/// Load a TrueType/OpenType font file.
pub fn load_font_file(path: &Path) -> Result<FontArc> {
    let bytes = std::fs::read(path)?;
    FontArc::try_from_vec(bytes)
        .map_err(|e| DentviewError::Font(format!("{}: {e}", path.display())))
}

/// Resolve the label font: explicit path first, then each family in order,
/// then a few common fallbacks. `None` when nothing usable is installed.
pub fn resolve_font(spec: &FontSpec) -> Option<FontArc> {
    if let Some(ref path) = spec.path {
        match load_font_file(path) {
            Ok(font) => return Some(font),
            Err(e) => tracing::warn!("ignoring configured font: {e}"),
        }
    }

    let index = index_font_dirs(&font_dirs());
    let families = spec
        .families
        .iter()
        .map(String::as_str)
        .chain(FALLBACK_FAMILIES);

    for family in families {
        for name in candidate_file_names(family) {
            let Some(path) = index.get(&name) else {
                continue;
            };
            match load_font_file(path) {
                Ok(font) => {
                    tracing::debug!(family, path = %path.display(), "resolved label font");
                    return Some(font);
                }
                Err(e) => tracing::debug!("skipping {}: {e}", path.display()),
            }
        }
    }

    tracing::warn!(families = ?spec.families, "no label font found");
    None
}

/// Lower-cased file names a family is commonly installed under.
pub fn candidate_file_names(family: &str) -> Vec<String> {
    let compact: String = family
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    let mut names = match compact.as_str() {
        "segoeui" => vec!["segoeui.ttf".to_string()],
        "arial" => vec!["arial.ttf".to_string(), "arialmt.ttf".to_string()],
        _ => Vec::new(),
    };
    names.push(format!("{compact}.ttf"));
    names.push(format!("{compact}-regular.ttf"));
    names.push(format!("{compact}.otf"));
    names.push(format!("{compact}-regular.otf"));
    names.dedup();
    names
}

fn font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(windir) = std::env::var_os("WINDIR") {
        dirs.push(PathBuf::from(windir).join("Fonts"));
    }
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
        dirs.push(home.join("Library/Fonts"));
    }
    for dir in [
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/System/Library/Fonts",
        "/System/Library/Fonts/Supplemental",
        "/Library/Fonts",
    ] {
        dirs.push(PathBuf::from(dir));
    }
    dirs
}

/// Map lower-cased file name to path for every font file under `dirs`.
/// Earlier directories win on name clashes.
fn index_font_dirs(dirs: &[PathBuf]) -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();
    for dir in dirs {
        walk(dir, 0, &mut index);
    }
    index
}

fn walk(dir: &Path, depth: usize, index: &mut HashMap<String, PathBuf>) {
    if depth > FONT_SEARCH_MAX_DEPTH {
        return;
    }
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, depth + 1, index);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            let lower = name.to_lowercase();
            if lower.ends_with(".ttf") || lower.ends_with(".otf") {
                index.entry(lower).or_insert(path);
            }
        }
    }
}
