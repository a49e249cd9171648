// Configuration loading

pub mod secrets;
pub mod settings;
