//! Install orchestration for the starter pack.
//!
//! The sequence is data (`steps::STEPS`); `install` executes it and
//! `status` reports on it.
mod context;
mod install;
mod status;
mod steps;
#[cfg(test)]
mod test_support;

pub use install::run_install;
pub use status::run_status;
