// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog files on disk

use super::Catalog;
use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use filetime::FileTime;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Load a catalog file. A missing file is an empty catalog.
pub fn load(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Ok(Catalog::new());
    }
    let text = read_text(path)?;
    Ok(Catalog::parse(&text))
}

/// Replace the catalog file with the full contents of `catalog`.
pub fn save(path: &Path, catalog: &Catalog) -> Result<()> {
    write_atomic(path, &catalog.to_text())
}

/// Read a text file, honouring a UTF-8 or UTF-16 byte order mark.
///
/// Catalogs edited in spreadsheet tools often come back with a BOM, which
/// would otherwise end up glued to the first key.
pub fn read_text(path: &Path) -> Result<String> {
    Ok(read_text_with_bom(path)?.0)
}

/// Like [`read_text`], also returning the encoding named by the file's byte
/// order mark, if it had one.
pub fn read_text_with_bom(path: &Path) -> Result<(String, Option<&'static Encoding>)> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let bom = Encoding::for_bom(&bytes);
    let (encoding, bom_len) = bom.unwrap_or((UTF_8, 0));
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if had_errors {
        tracing::warn!(
            path = %path.display(),
            encoding = encoding.name(),
            "replaced malformed byte sequences while decoding"
        );
    }
    Ok((text.into_owned(), bom.map(|(encoding, _)| encoding)))
}

/// Encode `text` behind the given byte order mark. Without one the text is
/// plain UTF-8.
pub fn encode_text(text: &str, bom: Option<&'static Encoding>) -> Vec<u8> {
    match bom {
        None => text.as_bytes().to_vec(),
        Some(encoding) if encoding == UTF_16LE => {
            let mut out = vec![0xFF, 0xFE];
            out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
            out
        }
        Some(encoding) if encoding == UTF_16BE => {
            let mut out = vec![0xFE, 0xFF];
            out.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
            out
        }
        Some(_) => {
            let mut out = vec![0xEF, 0xBB, 0xBF];
            out.extend_from_slice(text.as_bytes());
            out
        }
    }
}

/// Write `text` directly to `path` in the encoding given by `bom`.
pub fn write_text(path: &Path, text: &str, bom: Option<&'static Encoding>) -> Result<()> {
    fs::write(path, encode_text(text, bom)).with_context(|| format!("writing {}", path.display()))
}

/// Write a whole file through a sibling temporary file and a rename, so
/// readers never observe a half-written file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let staging = staging_path(path);
    fs::write(&staging, contents).with_context(|| format!("writing {}", staging.display()))?;
    fs::rename(&staging, path)
        .with_context(|| format!("replacing {} with {}", path.display(), staging.display()))?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Last modification time, or `None` when the file does not exist.
pub fn modified(path: &Path) -> Result<Option<FileTime>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(FileTime::from_last_modification_time(&metadata))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("reading metadata of {}", path.display())),
    }
}
