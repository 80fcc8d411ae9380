//! Archive bundle loader.
//!
//! Every matching entry of a ZIP container is parsed as a fragment named
//! after the archive, with its includes ignored, and folded into the first
//! fragment with [`merge_documents`].

use std::io::{Cursor, Read};
use std::path::Path;

use zip::ZipArchive;

use crate::error::ModelError;
use crate::merge::merge_documents;
use crate::model::{Document, Model};
use crate::pipeline::{Linked, ModelGenerator, Pipeline, document_name};

use super::config::ArchiveOptions;

pub struct ArchiveLoader<'g> {
    generator: &'g ModelGenerator,
    options: ArchiveOptions,
}

impl<'g> ArchiveLoader<'g> {
    pub fn new(generator: &'g ModelGenerator, options: ArchiveOptions) -> Self {
        Self { generator, options }
    }

    /// Loads the archive at `path`; the document is named after its file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Pipeline<Linked>, ModelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ModelError::io(path, source))?;
        self.load_bytes(&document_name(path), &bytes)
    }

    /// Loads an in-memory archive as the document `name`.
    pub fn load_bytes(&self, name: &str, bytes: &[u8]) -> Result<Pipeline<Linked>, ModelError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let entries: Vec<String> = (0..archive.len())
            .filter_map(|i| {
                let file = archive.by_index(i).ok()?;
                let entry_name = file.name().to_string();
                (file.is_file() && self.options.filter.matches(&entry_name)).then_some(entry_name)
            })
            .collect();

        let mut model = Model::new();
        let mut root = None;
        for entry_name in entries {
            let mut file = archive.by_name(&entry_name)?;
            let mut content = Vec::new();
            file.read_to_end(&mut content)
                .map_err(|e| ModelError::archive(format!("Failed to read {entry_name}: {e}")))?;
            let source = self.generator.decode(&content);

            let fragment = self
                .generator
                .build_source(&mut model, Document::new(name), &source, false)
                .map_err(|error| match error {
                    ModelError::Syntax { errors, .. } => ModelError::Syntax {
                        document: entry_name.clone(),
                        errors,
                    },
                    other => other,
                })?;
            match root {
                None => root = Some(fragment),
                Some(existing) => {
                    merge_documents(&mut model, existing, fragment)?;
                }
            }
            tracing::debug!(entry = %entry_name, "loaded archive entry");
        }

        let root = match root {
            Some(root) => root,
            None => {
                tracing::warn!(archive = name, "archive holds no matching entries");
                model.add_document(Document::new(name))
            }
        };
        Ok(Pipeline::new(self.generator.clone(), model, root, Vec::new()))
    }
}

impl ModelGenerator {
    /// Loads an archive bundle with `options`. See [`ArchiveLoader`].
    pub fn load_archive(
        &self,
        path: impl AsRef<Path>,
        options: ArchiveOptions,
    ) -> Result<Pipeline<Linked>, ModelError> {
        ArchiveLoader::new(self, options).load(path)
    }
}
