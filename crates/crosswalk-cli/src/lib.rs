//! Library components of the crosswalk CLI.

pub mod logging;
pub mod settings;
pub mod write_back;
