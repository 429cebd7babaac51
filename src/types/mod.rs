pub mod actuators;
pub mod attitude;
pub mod command;
pub mod status;
