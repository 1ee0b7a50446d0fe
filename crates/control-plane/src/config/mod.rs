// Configuration loading and parsing
//
// Server settings come from environment variables (optionally a .env file
// loaded by the binary). Auth settings live in auth::config.

pub mod server;

pub use server::ServerConfig;
