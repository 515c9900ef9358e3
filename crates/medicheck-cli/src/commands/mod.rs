//! Command implementations.
//!
//! Each command renders its output and returns it; `main` does the printing.

pub mod check;
pub mod history;
pub mod info;
pub mod search;

pub use self::check::execute_check;
pub use self::history::{execute_clear_history, execute_history, execute_rerun};
pub use self::info::execute_info;
pub use self::search::execute_search;
