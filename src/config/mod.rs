// Configuration for pagefix: which file to patch and how to write it back

pub mod config_loader;

pub use config_loader::{ConfigLoader, PatcherConfig, DEFAULT_TARGET};
