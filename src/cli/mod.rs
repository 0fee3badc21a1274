pub mod apply;
pub mod log;
pub mod menu;
