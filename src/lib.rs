pub mod math;
pub mod parameters;
pub mod runner;
pub mod tarmac;
