use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::ast::{Module, Root};
use crate::base::{FileId, SourceBuffer};
use crate::diagnostics::Diagnostic;
use crate::error::FrontendError;

use super::settings::Settings;

/// The cached result of parsing one file, keyed by [`FileId`] in
/// [`DependencyGraph`]. A root file caches a [`Root`]; everything reached
/// through an `INCLUDE` caches a [`Module`].
pub enum ParsedUnit {
    Root(Root, Vec<Diagnostic>),
    Module(Module, Vec<Diagnostic>),
}

impl ParsedUnit {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            ParsedUnit::Root(_, d) => d,
            ParsedUnit::Module(_, d) => d,
        }
    }
}

struct FileEntry {
    path: PathBuf,
    buffer: SourceBuffer,
    unit: Option<ParsedUnit>,
}

/// Map from canonical absolute file path to a cached parse result. Owns
/// every [`SourceBuffer`] and every parsed [`Root`]/[`Module`] it produces;
/// an `Include` node elsewhere in the tree holds only the `FileId` of the
/// module it refers to, never a pointer into this structure.
pub struct DependencyGraph {
    settings: Settings,
    entries: Vec<FileEntry>,
    by_path: HashMap<PathBuf, FileId>,
    /// Files whose `parse_as_root`/`parse_as_module` call is currently on
    /// the stack. A recursion-stack membership check at edge-insertion
    /// time is the cycle check: transitive reachability from `to` back to
    /// `from` is exactly membership in this stack, because include
    /// resolution is synchronous recursive descent — "reachable from `to`"
    /// and "an ancestor still being parsed" are the same set.
    in_progress: Vec<FileId>,
}

impl DependencyGraph {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            entries: Vec::new(),
            by_path: HashMap::new(),
            in_progress: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self, file: FileId) -> &Path {
        &self.entries[file.index()].path
    }

    pub fn buffer(&self, file: FileId) -> &SourceBuffer {
        &self.entries[file.index()].buffer
    }

    pub fn cached_unit(&self, file: FileId) -> Option<&ParsedUnit> {
        self.entries[file.index()].unit.as_ref()
    }

    pub fn cache_unit(&mut self, file: FileId, unit: ParsedUnit) {
        self.entries[file.index()].unit = Some(unit);
    }

    /// Register the entry (root) file, canonicalizing its path.
    pub fn register_root(&mut self, path: &Path) -> Result<FileId, FrontendError> {
        let canonical = Self::canonicalize(path)?;
        self.intern_path(canonical)
    }

    /// Resolve `written_path` relative to the directory containing `from`,
    /// registering a new entry if this canonical path hasn't been seen
    /// before, or rejecting the edge if it would close a cycle back to an
    /// ancestor still being parsed. Diamond inclusion — the same canonical
    /// path reached by two different written paths — resolves to the same
    /// `FileId` and is not re-parsed.
    pub fn resolve_include(&mut self, from: FileId, written_path: &str) -> Result<FileId, FrontendError> {
        let base_dir = self.path(from).parent().unwrap_or_else(|| Path::new("."));
        let candidate = base_dir.join(written_path);
        let canonical = Self::canonicalize(&candidate)?;

        if let Some(&existing) = self.by_path.get(&canonical) {
            if self.in_progress.contains(&existing) {
                return Err(FrontendError::CyclicalDependency {
                    from: self.path(from).to_path_buf(),
                    to: canonical,
                });
            }
            return Ok(existing);
        }

        self.intern_path(canonical)
    }

    pub fn begin_parsing(&mut self, file: FileId) {
        self.in_progress.push(file);
    }

    pub fn end_parsing(&mut self, file: FileId) {
        let popped = self.in_progress.pop();
        debug_assert_eq!(popped, Some(file), "parse stack discipline violated");
    }

    fn intern_path(&mut self, canonical: PathBuf) -> Result<FileId, FrontendError> {
        if let Some(&id) = self.by_path.get(&canonical) {
            return Ok(id);
        }
        let text = std::fs::read_to_string(&canonical).map_err(|source| FrontendError::UnreadableFile {
            path: canonical.clone(),
            source,
        })?;
        let id = FileId::new(self.entries.len());
        let buffer = SourceBuffer::new(id, text);
        self.entries.push(FileEntry {
            path: canonical.clone(),
            buffer,
            unit: None,
        });
        self.by_path.insert(canonical, id);
        Ok(id)
    }

    /// Resolve `.`/`..` and case-fold on case-insensitive filesystems.
    /// Rust's `Path::canonicalize` already
    /// resolves symlinks and relative components via the OS; case-folding
    /// is left to the OS as well (case-insensitive filesystems report the
    /// same canonical spelling for any input casing), so no extra
    /// normalization step is needed beyond the OS call.
    fn canonicalize(path: &Path) -> Result<PathBuf, FrontendError> {
        path.canonicalize().map_err(|source| FrontendError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })
    }
}
