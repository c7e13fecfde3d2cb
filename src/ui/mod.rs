pub mod layout;
pub mod terminal;
pub mod theme;

pub use terminal::run_ui;
