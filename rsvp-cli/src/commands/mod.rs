pub mod event;
pub mod list;
pub mod submit;
