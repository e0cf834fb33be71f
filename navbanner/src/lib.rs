// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    collect_pages, expand_page_path, format_menu_text, load_pages_from_file, page_location,
    parse_page_line, InjectOptions, InjectSummary, MenuFormat,
};
