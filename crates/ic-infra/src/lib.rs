//! # ic-infra
//!
//! Infrastructure adapters for the invcap capture workflow: the reqwest
//! HTTP adapter for the remote invoice/document service, the in-memory
//! bearer-token store, and API configuration.

pub mod config;
pub mod http;
pub mod token;

pub use config::ApiConfig;
pub use http::HttpInvoiceService;
pub use token::InMemoryTokenStore;
