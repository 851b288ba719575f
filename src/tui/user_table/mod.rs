pub mod pagination;
pub mod states;
pub mod themed_table;
pub mod update;
pub mod view;
pub mod view_table_row;

pub use update::{handle_edit_key, handle_key};
pub use view::render;
