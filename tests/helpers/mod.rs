pub mod line_parser;
pub mod loader_helpers;
