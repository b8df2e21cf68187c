//! Console-side input handling: parsing typed commands into booking events and
//! pumping them from stdin into the coordinator.

mod console_command;
mod console_endpoint;

pub(crate) use console_endpoint::ConsoleEndpoint;
