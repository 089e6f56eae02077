//! Menu-selectable developer tools.

pub mod catalog;
pub mod menu;
pub mod selection;

pub use catalog::Tool;
pub use menu::{choose_tools, menu_lines, SELECTION_KEY};
pub use selection::{parse_selection, Selection, ALL_TOKEN, QUIT_TOKEN};
