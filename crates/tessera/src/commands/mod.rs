pub mod render;
pub mod selector;
