use std::path::{Path, PathBuf};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Relative paths in a configuration file are relative to the file itself.
pub fn resolve_path(root: Option<&Path>, path: &str) -> String {
    match root {
        Some(root) if Path::new(path).is_relative() => {
            let p: PathBuf = [root, Path::new(path)].iter().collect();
            p.as_path().display().to_string()
        }
        _ => path.to_string(),
    }
}

/// One line per row, cells separated by `|`.
pub fn format_preview(rows: &[Vec<String>]) -> Vec<String> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| format!("{:>4} | {}", idx + 1, row.join(" | ")))
        .collect()
}
