pub mod file;

pub use file::FileDataStore;
