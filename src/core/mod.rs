mod batch;
mod matcher;
mod pattern;
mod render;
mod schema;

pub use batch::{BatchSummary, RepositoryList, check_repositories, check_repository};
pub use matcher::Matcher;
pub use pattern::{CaseSensitivity, NamePattern};
pub use render::{write_json, write_text};
pub use schema::{ROOT_ELEMENT, load_schema, parse_schema};
