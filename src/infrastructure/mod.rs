//! Infrastructure adapters: loading configuration from files and the environment.

pub mod settings;
