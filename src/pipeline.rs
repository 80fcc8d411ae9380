//! Model generation pipeline.
//!
//! ```text
//! ModelGenerator::generate / load_file      walk + local resolve
//!     ↓ Pipeline<Built>
//! load_includes(&IncludeConfig) | skip_includes()
//!     ↓ Pipeline<Linked>                    (archive loads start here)
//! resolve()                                 global resolve over the include graph
//!     ↓ Pipeline<Resolved>
//! strip_aliases()                           optional, irreversible
//!     ↓ Pipeline<Stripped>
//! ```
//!
//! Every transition consumes the previous stage, so stages cannot run out of
//! order.

use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::builder::{CommentAssociator, ModelBuilder};
use crate::error::{IncludeFailure, ModelError};
use crate::model::{Document, DocumentId, Model};
use crate::project::IncludeConfig;
use crate::project::IncludeLoader;
use crate::resolve::{resolve_global, strip_aliases};
use crate::syntax::{BomDetector, CharsetDetector, SyntaxTree, decode_text};

/// Name of the document stored at `path`: the file name up to its first dot.
pub fn document_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name.into_owned(),
    }
}

/// Entry point: parses documents and starts pipelines.
///
/// Holds configuration only; every call works on its own [`Model`].
#[derive(Clone)]
pub struct ModelGenerator {
    detector: Arc<dyn CharsetDetector>,
}

impl fmt::Debug for ModelGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelGenerator").finish_non_exhaustive()
    }
}

impl Default for ModelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelGenerator {
    pub fn new() -> Self {
        Self {
            detector: Arc::new(BomDetector),
        }
    }

    /// Uses `detector` to pick the encoding of files and archive entries.
    pub fn with_detector(detector: impl CharsetDetector + 'static) -> Self {
        Self {
            detector: Arc::new(detector),
        }
    }

    /// Builds a document named `name` from in-memory source text.
    pub fn generate(&self, name: &str, source: &str) -> Result<Pipeline<Built>, ModelError> {
        let mut model = Model::new();
        let root = self.build_source(&mut model, Document::new(name), source, true)?;
        Ok(Pipeline::new(self.clone(), model, root, Vec::new()))
    }

    /// Reads, decodes and builds the document at `path`.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Pipeline<Built>, ModelError> {
        let mut model = Model::new();
        let root = self.build_file(&mut model, path.as_ref())?;
        Ok(Pipeline::new(self.clone(), model, root, Vec::new()))
    }

    pub fn decode(&self, bytes: &[u8]) -> String {
        decode_text(bytes, self.detector.as_ref())
    }

    pub(crate) fn build_file(&self, model: &mut Model, path: &Path) -> Result<DocumentId, ModelError> {
        let bytes = std::fs::read(path).map_err(|source| ModelError::io(path, source))?;
        let source = self.decode(&bytes);
        let document = Document::new(document_name(path)).with_path(PathBuf::from(path));
        self.build_source(model, document, &source, true)
    }

    /// Parses `source` and walks it into `model`. A syntax error aborts the
    /// build before anything is added to the model.
    pub(crate) fn build_source(
        &self,
        model: &mut Model,
        document: Document,
        source: &str,
        record_includes: bool,
    ) -> Result<DocumentId, ModelError> {
        let tree = SyntaxTree::parse(source);
        if tree.has_errors() {
            return Err(ModelError::Syntax {
                document: document.name.to_string(),
                errors: tree.errors().to_vec(),
            });
        }
        let comments = CommentAssociator::from_tokens(tree.tokens());
        let builder = ModelBuilder::new(model, comments);
        let builder = if record_includes {
            builder
        } else {
            builder.ignore_includes()
        };
        Ok(builder.build(document, &tree.root()))
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Marker for a pipeline stage.
pub trait Stage: sealed::Sealed {}

/// Documents walked and locally resolved.
#[derive(Debug)]
pub struct Built;
/// Include graph loaded (or skipped).
#[derive(Debug)]
pub struct Linked;
/// Global resolution done.
#[derive(Debug)]
pub struct Resolved;
/// Aliases stripped.
#[derive(Debug)]
pub struct Stripped;

impl sealed::Sealed for Built {}
impl sealed::Sealed for Linked {}
impl sealed::Sealed for Resolved {}
impl sealed::Sealed for Stripped {}
impl Stage for Built {}
impl Stage for Linked {}
impl Stage for Resolved {}
impl Stage for Stripped {}

/// A model in the middle of generation.
#[derive(Debug)]
pub struct Pipeline<S: Stage> {
    generator: ModelGenerator,
    model: Model,
    root: DocumentId,
    include_failures: Vec<IncludeFailure>,
    stage: PhantomData<S>,
}

impl<S: Stage> Pipeline<S> {
    pub(crate) fn new(
        generator: ModelGenerator,
        model: Model,
        root: DocumentId,
        include_failures: Vec<IncludeFailure>,
    ) -> Self {
        Self {
            generator,
            model,
            root,
            include_failures,
            stage: PhantomData,
        }
    }

    fn advance<T: Stage>(self) -> Pipeline<T> {
        Pipeline::new(self.generator, self.model, self.root, self.include_failures)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn root(&self) -> DocumentId {
        self.root
    }

    pub fn root_document(&self) -> &Document {
        &self.model[self.root]
    }

    /// Includes that stayed unloaded. Always empty before `load_includes`.
    pub fn include_failures(&self) -> &[IncludeFailure] {
        &self.include_failures
    }

    pub fn into_model(self) -> Model {
        self.model
    }
}

impl Pipeline<Built> {
    /// Loads the include graph below the root document.
    pub fn load_includes(mut self, config: &IncludeConfig) -> Pipeline<Linked> {
        let loader = IncludeLoader::new(&self.generator, config);
        self.include_failures = loader.load(&mut self.model, self.root);
        self.advance()
    }

    /// Continues with the root document alone.
    pub fn skip_includes(self) -> Pipeline<Linked> {
        self.advance()
    }
}

impl Pipeline<Linked> {
    /// Resolves the remaining placeholders across the include graph.
    pub fn resolve(mut self) -> Pipeline<Resolved> {
        let remaining = resolve_global(&mut self.model, self.root);
        tracing::debug!(document = %self.model[self.root].name, remaining, "resolved model");
        self.advance()
    }
}

impl Pipeline<Resolved> {
    /// Replaces alias uses with real types and drops alias registry entries.
    pub fn strip_aliases(mut self) -> Pipeline<Stripped> {
        strip_aliases(&mut self.model, self.root);
        self.advance()
    }

    /// True when every reachable entity of the root document is valid.
    pub fn is_valid(&self) -> bool {
        self.model.document_is_valid(self.root)
    }
}
