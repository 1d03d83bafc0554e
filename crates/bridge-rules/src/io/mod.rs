pub mod hand_parser;
pub mod lin;
pub mod text;
