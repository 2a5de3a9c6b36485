pub mod parser;
pub mod schema;
pub mod types;

pub use types::*;
pub use parser::{load_catalogue, parse_catalogue_str, BUILTIN_CATALOGUE};
