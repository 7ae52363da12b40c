pub mod dashboard;
pub mod dialogs;
pub mod flow_view;
pub mod form_field;
pub mod keybindings;
mod panels;
pub mod project_form;
pub mod projects_table;
pub mod terminal_guard;

pub use dashboard::Dashboard;
pub use dialogs::{ConfirmDeleteDialog, ConfirmSelection, HelpDialog};
pub use project_form::{FormAction, FormMode, ProjectForm};
pub use terminal_guard::{install_panic_hook, TerminalGuard};
