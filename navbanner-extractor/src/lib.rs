pub mod error;
pub mod extractor;
pub mod menu;

pub use error::ExtractError;
pub use extractor::{IndexSource, MenuExtractor, parse_menu, rewrite_href};
pub use menu::{LinkEntry, MenuStructure, SectionMap};
