//! Saving and loading games: local slots, file export, remote service

pub mod local;
pub mod manager;
pub mod remote;

pub use local::{export_to_file, import_from_file, LocalStore, SaveInfo};
pub use manager::{LoadSource, SaveManager, SaveTarget};
pub use remote::RemoteStore;
