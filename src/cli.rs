//! Terminal front end: interactive menus and batch runs from a JSON config.
pub mod cli_batch;
pub mod cli_cstr;
pub mod cli_main;
