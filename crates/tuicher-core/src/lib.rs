pub mod backend;
pub mod controller;
pub mod error;
pub mod layout;

pub use backend::{ActionExecutor, ControllerContext, SearchBackend, WindowHost};
pub use controller::{ControllerEvent, ControllerHandle, InteractionController};
pub use error::{BackendError, ControllerError, HostError};
