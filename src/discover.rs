//! Finding DDF resources and legacy lumps on disk.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use ddf_data::{LegacyLump, Source};

fn is_ddf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("ddf"))
}

fn is_lump(path: &Path) -> bool {
    !is_ddf(path)
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| LegacyLump::from_lump_name(n).is_ok())
}

/// Every `*.ddf` file and legacy lump under `dir`, sorted by path.
fn scan(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .wrap_err_with(|| format!("reading directory {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    entries.sort();
    for path in entries {
        if path.is_dir() {
            scan(&path, out)?;
        } else if is_ddf(&path) || is_lump(&path) {
            out.push(path);
        }
    }
    Ok(())
}

/// Expand `paths` into the files to load. Files named directly are always
/// included; directories contribute only recognised files.
pub fn find(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            scan(path, &mut out)?;
        } else {
            out.push(path.clone());
        }
    }
    Ok(out)
}

pub fn read(path: &Path) -> Result<Source> {
    let name = path.display().to_string();
    if is_lump(path) {
        let data = std::fs::read(path).wrap_err_with(|| format!("reading {name}"))?;
        let lump = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        log::debug!("{name}: legacy lump {lump}");
        return Ok(Source::Lump { name: lump, data });
    }
    let text = std::fs::read_to_string(path).wrap_err_with(|| format!("reading {name}"))?;
    Ok(Source::Text { name, text })
}
