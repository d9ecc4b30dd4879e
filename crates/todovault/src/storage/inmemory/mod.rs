mod store;

pub use store::InMemoryBlobStore;
