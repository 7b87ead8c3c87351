pub mod glyphs;
pub mod input;
pub mod render;
pub mod screen;
