// Authentication and authorization
//
// - config: AUTH_MODE, JWT and admin credentials from the environment
// - jwt: token issue/validation
// - middleware: AuthUser / AdminUser extractors
// - routes: login, logout, me

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod routes;

pub use config::{AuthConfig, AuthMode};
pub use middleware::{AdminUser, AuthState, AuthUser, FromRef};
