pub mod check;
pub mod compile;
pub mod dump;
pub mod env;
pub mod run_common;
pub mod source_loader;
