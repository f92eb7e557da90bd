// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Trenvus client: session, API and formatting core of the wallet front end.
//!
//! The backend owns all business rules. This crate keeps the client-side
//! session (tokens, refresh, logout), talks to the REST API, and provides
//! the parsing and formatting helpers the screens need.

pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod money;
pub mod phone;
pub mod services;
pub mod storage;
pub mod telemetry;
pub mod time_utils;

use config::Config;
use error::Result;
use i18n::I18n;
use services::{ApiClient, PaymentFlows, SessionManager, StatementService};
use std::sync::Arc;
use storage::{FileStorage, Storage};

/// Shared client state, built once at startup and handed to every screen.
pub struct WalletClient {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionManager>,
    pub i18n: Arc<I18n>,
    pub payments: PaymentFlows,
    pub statement: StatementService,
}

impl WalletClient {
    /// Build the client from environment configuration with file storage.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        let storage = Arc::new(FileStorage::open(&config.storage_path)?);
        Self::new(config, storage)
    }

    /// Build the client over an explicit storage backend.
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Result<Self> {
        let api = Arc::new(ApiClient::new(&config)?);
        let session = Arc::new(SessionManager::load(api.clone(), storage.clone()));
        let i18n = Arc::new(I18n::load(
            storage.clone(),
            config.system_language.as_deref(),
        ));
        let payments = PaymentFlows::new(api.clone(), session.clone(), storage.clone());
        let statement = StatementService::new(api.clone(), session.clone());

        tracing::info!(
            api_base_url = %config.api_base_url,
            locale = i18n.locale().tag(),
            "Wallet client initialized"
        );

        Ok(Self {
            config,
            storage,
            api,
            session,
            i18n,
            payments,
            statement,
        })
    }
}
