//! The in-memory canvas graph: nodes, connections, and change notification.

pub mod canvas;
pub mod connection;
pub mod node;

pub use canvas::*;
pub use connection::*;
pub use node::*;
