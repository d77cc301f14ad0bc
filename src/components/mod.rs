pub mod confirm_dialog;
pub mod detail_screen;
pub mod form_screen;
pub mod list_screen;
mod theme;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use confirm_dialog::{ConfirmDialog, ConfirmDialogProps};
pub use detail_screen::{DetailScreen, DetailScreenProps};
pub use form_screen::{FormScreen, FormScreenProps};
pub use list_screen::{ListScreen, ListScreenProps, item_label, pagination_summary};
