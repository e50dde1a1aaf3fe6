pub mod connection;
pub mod handler;
pub mod types;

pub use connection::ConnectionRegistry;
pub use handler::ws_handler;
