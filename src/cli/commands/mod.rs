mod command_result;
pub mod graph;
pub mod helper;
pub mod hints;
pub mod init;
pub mod order;
pub mod paths;

pub use command_result::*;
