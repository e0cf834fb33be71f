pub mod config;
pub mod error;
pub mod inject;
pub mod matcher;
pub mod page;
pub mod render;
pub mod script;
pub mod style;
pub mod sync;
pub mod tabs;

pub use config::BannerConfig;
pub use error::BannerError;
pub use matcher::{AliasTable, PageMatcher};
pub use page::{BannerPipeline, PageLocation, PageOutcome};
pub use render::{RenderedBanner, Renderer};

pub use navbanner_extractor::{IndexSource, LinkEntry, MenuExtractor, MenuStructure, SectionMap};
