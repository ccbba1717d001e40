//! Framed TCP front end.
//!
//! [`server`] accepts connections, [`connection`] runs the one-shot
//! request/response exchange on each, [`frame`] encodes the wire format and
//! [`client`] is the matching caller side.

pub mod client;
pub mod connection;
pub mod frame;
pub mod server;

pub use connection::ConnectionHandler;
pub use frame::FrameCodec;
pub use server::Server;
