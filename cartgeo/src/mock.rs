pub mod api;
pub mod resolver;
pub mod storage;

pub use api::MockApi;
pub use resolver::StubResolver;
pub use storage::MockStorage;
