//! Reusable view components for the dashboard templates.

pub mod data_table;
pub mod form;
pub mod layout;

pub use data_table::{DataTableConfig, TableCell, TableColumn, TableRow};
pub use form::{FormData, FormField, SelectOption, Widget};
pub use layout::{Layout, Section};
