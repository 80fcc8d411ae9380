//! On-disk fixtures for include and archive tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Writes `files` (relative path, content) under a fresh temporary directory.
pub fn write_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (relative, content) in files {
        write_file(dir.path(), relative, content);
    }
    dir
}

pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, content).expect("write fixture");
    path
}

/// Builds an in-memory ZIP archive from (entry name, content) pairs.
#[cfg(feature = "archive")]
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    use std::io::{Cursor, Write};

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in entries {
            zip.start_file(*name, options).expect("start zip entry");
            zip.write_all(content.as_bytes()).expect("write zip entry");
        }
        zip.finish().expect("finish zip");
    }
    buffer.into_inner()
}
