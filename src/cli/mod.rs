pub mod market;
pub mod report;
pub mod setup;
pub mod ui;
