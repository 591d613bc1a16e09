// Adapters layer: concrete implementations for the console and the local dataset folder.

pub mod console;
pub mod local;

pub use console::StdConsole;
pub use local::LocalDatasets;
