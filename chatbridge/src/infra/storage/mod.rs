pub mod toml_store;

pub use toml_store::TomlDocumentStore;
