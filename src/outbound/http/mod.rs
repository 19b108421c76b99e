//! Reqwest-backed adapter for the remote JSON API.

mod dto;
mod gateway;

pub use gateway::HttpPostGateway;
