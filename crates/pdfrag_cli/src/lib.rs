pub mod logging;
pub mod output;
pub mod questions;
pub mod run;
