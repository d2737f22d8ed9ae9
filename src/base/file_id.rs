/// Arena index identifying a source file known to a [`crate::project::DependencyGraph`].
///
/// `FileId`s are assigned in registration order starting at zero, which is
/// always the entry (root) file. A `FileId` is cheap to copy and carries no
/// lifetime; resolving it back to a path or parsed unit always goes through
/// the owning `DependencyGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub(crate) u32);

impl FileId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
