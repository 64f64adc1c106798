/// Classification of a directory entry for structure checks. Anything that
/// is not a directory (regular files, dangling links, sockets) is a file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One immediate child of a listed directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FsEntry {
    pub name: String,
    pub kind: EntryKind,
}
