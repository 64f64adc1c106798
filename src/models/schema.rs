use crate::core::NamePattern;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    Directory,
    File,
}

/// One expected entry of the structure definition.
///
/// File nodes are always leaves; only the constructors below build nodes, so
/// a file can never carry children. `allow_other_entries` only constrains the
/// node's own immediate contents and is always `true` for files.
#[derive(Clone, Debug)]
pub struct SchemaNode {
    kind: NodeKind,
    pattern: NamePattern,
    allow_other_entries: bool,
    children: Vec<SchemaNode>,
}

impl SchemaNode {
    /// The repository root. Its pattern is never used for listing.
    pub fn root(children: Vec<SchemaNode>) -> Self {
        Self {
            kind: NodeKind::Directory,
            pattern: NamePattern::any(),
            allow_other_entries: false,
            children,
        }
    }

    pub fn directory(
        pattern: NamePattern,
        allow_other_entries: bool,
        children: Vec<SchemaNode>,
    ) -> Self {
        Self {
            kind: NodeKind::Directory,
            pattern,
            allow_other_entries,
            children,
        }
    }

    pub fn file(pattern: NamePattern) -> Self {
        Self {
            kind: NodeKind::File,
            pattern,
            allow_other_entries: true,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn pattern(&self) -> &NamePattern {
        &self.pattern
    }

    pub fn allow_other_entries(&self) -> bool {
        self.allow_other_entries
    }

    pub fn children(&self) -> &[SchemaNode] {
        &self.children
    }
}
