pub mod bfl;
pub mod sim;
