pub mod clipboard;
pub mod executor;
pub mod session;

pub use executor::SystemExecutor;
