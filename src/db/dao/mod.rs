mod context;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod todo_dao;

pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use gateway::TodoGateway;
pub use memory::{GatewayCalls, MemoryTodoDao};
pub use todo_dao::TodoDao;
