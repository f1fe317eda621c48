#![allow(dead_code)]

mod dns_server_mock;
pub mod internet;
mod message;
mod scripted_transport;

pub use dns_server_mock::MockDnsServer;
pub use message::{question_of, ResponseBuilder};
pub use scripted_transport::{Reply, ScriptedQuery, ScriptedTransport};
