//! # pagseguro-client
//!
//! PagSeguro gateway integration for pagseguro-rs.
//!
//! This crate provides two entry points:
//!
//! 1. **CheckoutButton** - renders the redirect checkout form
//!    - Hidden fields for credentials, reference, buyer and cart
//!    - HTML-attribute escaping of every value
//!    - Best for: redirecting a shopper to the hosted checkout page
//!
//! 2. **TransactionClient** - queries the transaction webservice
//!    - Lookup by notification code or transaction code
//!    - XML response decoding into `TransactionSummary`
//!    - Legacy (NPI) notification validation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagseguro_client::{CheckoutButton, Config, Environment, TransactionClient};
//! use pagseguro_core::{Amount, Item};
//!
//! let config = Config::new("merchant@example.com", "TOKEN", Environment::Sandbox)?;
//!
//! // Render a payment button
//! let html = CheckoutButton::new(&config, "order-107")
//!     .with_item(Item::new("1", "Widget", Amount::from_reais(10.0), 2))
//!     .render()?;
//!
//! // Resolve a notification the gateway posted to your webhook
//! let client = TransactionClient::new(config);
//! let summary = client.find_by_notification_code("766B9C-AD4B044B04DA-77742F5FA653-E1AB24").await?;
//! println!("{}: {}", summary.reference, summary.label());
//! ```

pub mod button;
pub mod config;
pub mod transactions;

// Re-exports
pub use button::CheckoutButton;
pub use config::{Config, Environment, DEFAULT_BUTTON_IMAGE, DEFAULT_TIMEOUT};
pub use transactions::TransactionClient;
