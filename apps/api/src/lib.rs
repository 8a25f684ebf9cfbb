pub mod builder;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod llm_client;
pub mod routes;
pub mod state;
