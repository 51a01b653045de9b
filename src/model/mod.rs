pub mod command;
pub mod interface;
pub mod report;
