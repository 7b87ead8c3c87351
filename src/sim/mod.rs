pub mod editor;
pub mod save;
pub mod session;
