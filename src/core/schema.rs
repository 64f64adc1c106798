use std::path::Path;

use roxmltree::{Document, Node};

use crate::core::{CaseSensitivity, NamePattern};
use crate::error::SchemaError;
use crate::models::SchemaNode;

pub const ROOT_ELEMENT: &str = "repoRoot";
const DIRECTORY_ELEMENT: &str = "directory";
const FILE_ELEMENT: &str = "file";
const NAME_ATTR: &str = "name";
const ALLOW_OTHER_ATTR: &str = "allowotherfiles";

/// Read and parse a structure definition file.
pub fn load_schema(path: &Path, case: CaseSensitivity) -> Result<SchemaNode, SchemaError> {
    let source = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema(&source, case)
}

/// Parse an XML structure definition rooted at `<repoRoot>`.
///
/// Attributes are looked up by name. Elements other than `directory` and
/// `file` are skipped.
pub fn parse_schema(source: &str, case: CaseSensitivity) -> Result<SchemaNode, SchemaError> {
    if source.trim().is_empty() {
        return Err(SchemaError::Empty);
    }

    let doc = Document::parse(source)?;
    let root = doc.root_element();
    if root.tag_name().name() != ROOT_ELEMENT {
        return Err(SchemaError::WrongRoot {
            found: root.tag_name().name().to_owned(),
        });
    }

    let children = parse_children(&doc, root, case)?;
    Ok(SchemaNode::root(children))
}

fn parse_children(
    doc: &Document<'_>,
    parent: Node<'_, '_>,
    case: CaseSensitivity,
) -> Result<Vec<SchemaNode>, SchemaError> {
    let mut nodes = Vec::new();
    for element in parent.children().filter(Node::is_element) {
        match element.tag_name().name() {
            DIRECTORY_ELEMENT => {
                let pattern = name_pattern(doc, element, case)?;
                let allow_other_entries = element.attribute(ALLOW_OTHER_ATTR) != Some("no");
                let children = parse_children(doc, element, case)?;
                nodes.push(SchemaNode::directory(
                    pattern,
                    allow_other_entries,
                    children,
                ));
            }
            FILE_ELEMENT => {
                let pattern = name_pattern(doc, element, case)?;
                if element.children().any(|child| child.is_element()) {
                    return Err(SchemaError::FileWithChildren {
                        name: pattern.as_str().to_owned(),
                        line: line_of(doc, element),
                    });
                }
                nodes.push(SchemaNode::file(pattern));
            }
            other => {
                tracing::warn!(
                    element = other,
                    line = line_of(doc, element),
                    "skipping unknown element in structure definition"
                );
            }
        }
    }
    Ok(nodes)
}

fn name_pattern(
    doc: &Document<'_>,
    element: Node<'_, '_>,
    case: CaseSensitivity,
) -> Result<NamePattern, SchemaError> {
    let name = element
        .attribute(NAME_ATTR)
        .ok_or_else(|| SchemaError::MissingName {
            element: element.tag_name().name().to_owned(),
            line: line_of(doc, element),
        })?;
    NamePattern::new(name, case)
}

fn line_of(doc: &Document<'_>, element: Node<'_, '_>) -> u32 {
    doc.text_pos_at(element.range().start).row
}
