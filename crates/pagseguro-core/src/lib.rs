//! # pagseguro-core
//!
//! Core types for the pagseguro-rs gateway client.
//!
//! This crate provides:
//! - `Customer` and `ShippingType` for the buyer record, with loose-input
//!   normalization (`cep`, `tel1`, `tel2`, ...)
//! - `Amount`, `Item`, and `Cart` for checkout line items
//! - `TransactionStatus` and `TransactionSummary` for the transaction API
//! - `Error` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pagseguro_core::{Amount, Cart, Customer, Item};
//! use serde_json::json;
//!
//! // Normalize a loosely-keyed customer record
//! let customer = Customer::from_raw(&json!({
//!     "name": "Maria Silva",
//!     "tel1": "4899998-888",
//!     "cep": "88000-000",
//! }))?;
//!
//! // Build a cart
//! let cart = Cart::new()
//!     .with_item(Item::new("107", "Widget", Amount::from_reais(10.0), 2));
//! ```

pub mod cart;
pub mod customer;
pub mod error;
pub mod status;

// Re-exports for convenience
pub use cart::{Amount, Cart, Item};
pub use customer::{Customer, ShippingType};
pub use error::{Error, Result};
pub use status::{status_label, TransactionStatus, TransactionSummary};
