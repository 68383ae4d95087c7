pub mod file;

pub use file::JsonAccountRepository;
