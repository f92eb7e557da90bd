// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Durable client storage (key → string).
//!
//! The session record, the locale preference and the transient payment-flow
//! values all live here. Backends are last-write-wins with no cross-process
//! notification.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage key names as constants.
pub mod keys {
    pub const SESSION: &str = "trenvus.auth";
    pub const LOCALE: &str = "exchange.locale";
    pub const PAYPAL_ORDER_ID: &str = "paypal_order_id";
    pub const PAYPAL_AMOUNT: &str = "paypal_amount";
    pub const MERCADOPAGO_AMOUNT: &str = "mercadopago_amount";
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable key/value storage for client state.
pub trait Storage: Send + Sync {
    /// Read a value. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
