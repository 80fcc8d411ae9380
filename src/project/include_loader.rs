//! Include-graph loader.
//!
//! For every include of a document that is not loaded yet, the declared path
//! is searched in the including document's directory and then in each
//! ancestor directory, nearest first; failing that, in each fallback root in
//! order. A session cache keyed by canonical location makes a file reached
//! through several includes parse once and be shared by every include
//! record.
//!
//! A document enters the cache before its own includes load, so a cyclic
//! include observes it while it is still being populated.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::{IncludeError, IncludeFailure};
use crate::model::{DocumentId, Model};
use crate::pipeline::ModelGenerator;

use super::config::IncludeConfig;

/// One load session. The cache lives as long as the loader.
pub struct IncludeLoader<'a> {
    generator: &'a ModelGenerator,
    config: &'a IncludeConfig,
    cache: FxHashMap<PathBuf, DocumentId>,
    failures: Vec<IncludeFailure>,
}

impl<'a> IncludeLoader<'a> {
    pub fn new(generator: &'a ModelGenerator, config: &'a IncludeConfig) -> Self {
        Self {
            generator,
            config,
            cache: FxHashMap::default(),
            failures: Vec::new(),
        }
    }

    /// Loads the include graph below `root` and returns the includes that
    /// could not be loaded.
    pub fn load(mut self, model: &mut Model, root: DocumentId) -> Vec<IncludeFailure> {
        let root_location = model[root]
            .path
            .as_ref()
            .and_then(|path| std::fs::canonicalize(path).ok());
        if let Some(location) = root_location {
            self.cache.insert(location, root);
        }
        self.load_includes(model, root);
        tracing::debug!(
            documents = self.cache.len(),
            failures = self.failures.len(),
            "loaded include graph"
        );
        self.failures
    }

    fn load_includes(&mut self, model: &mut Model, document: DocumentId) {
        for index in 0..model[document].includes.len() {
            let include = &model[document].includes[index];
            if include.document.is_some() {
                continue;
            }
            let declared_path = include.declared_path.clone();
            let Some(found) = self.locate(model[document].path.as_deref(), &declared_path) else {
                self.fail(
                    document,
                    &declared_path,
                    IncludeError::NotFound {
                        declared_path: declared_path.clone(),
                    },
                );
                continue;
            };
            let location = match std::fs::canonicalize(&found) {
                Ok(location) => location,
                Err(source) => {
                    self.fail(document, &declared_path, IncludeError::Io { path: found, source });
                    continue;
                }
            };
            model[document].includes[index].resolved_path = Some(location.clone());

            if let Some(&cached) = self.cache.get(&location) {
                tracing::trace!(path = %location.display(), "include served from session cache");
                model[document].includes[index].document = Some(cached);
                continue;
            }
            match self.generator.build_file(model, &location) {
                Ok(loaded) => {
                    tracing::debug!(path = %location.display(), "loaded include");
                    self.cache.insert(location, loaded);
                    model[document].includes[index].document = Some(loaded);
                    self.load_includes(model, loaded);
                }
                Err(error) => {
                    let error = IncludeError::from_model_error(location, error);
                    self.fail(document, &declared_path, error);
                }
            }
        }
    }

    /// Nearest ancestor directory of `including` first, then fallback roots.
    fn locate(&self, including: Option<&Path>, declared_path: &str) -> Option<PathBuf> {
        let ancestors = including
            .and_then(Path::parent)
            .into_iter()
            .flat_map(Path::ancestors);
        ancestors
            .chain(self.config.include_paths().iter().map(PathBuf::as_path))
            .map(|dir| dir.join(declared_path))
            .find(|candidate| candidate.is_file())
    }

    fn fail(&mut self, document: DocumentId, declared_path: &str, error: IncludeError) {
        tracing::warn!(include = declared_path, %error, "include not loaded");
        self.failures.push(IncludeFailure {
            document,
            declared_path: declared_path.to_string(),
            error,
        });
    }
}
