pub mod actions;
pub mod run;
