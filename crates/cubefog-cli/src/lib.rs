pub mod args;
pub mod report;
pub mod sky;
