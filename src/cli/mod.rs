pub mod allocate;
pub mod calc;
pub mod setup;
pub mod ui;
