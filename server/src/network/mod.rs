//! HTTP API.

mod handlers;
mod server;

pub use server::serve;
