pub mod config;
pub mod delete;
pub mod insert;
pub mod select;
pub mod table;
pub mod update;
