// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Locale and message store.
//!
//! Static key → string tables per language. Lookup falls back from the
//! active locale to English and finally to the key itself, so a missing
//! translation never breaks rendering.

use crate::storage::{keys, Storage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl Locale {
    /// BCP 47 tag as persisted in storage.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::En => "en",
        }
    }

    /// Parse an exact stored tag. Anything else is `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "pt-BR" => Some(Locale::PtBr),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Pick a locale from a system language hint like `pt_BR.UTF-8`.
    pub fn from_system_language(lang: Option<&str>) -> Self {
        match lang {
            Some(l) if l.to_ascii_lowercase().starts_with("pt") => Locale::PtBr,
            _ => Locale::En,
        }
    }
}

static PT_BR: &[(&str, &str)] = &[
    ("lang.pt", "PT-BR"),
    ("lang.en", "EN"),
    ("nav.dashboard", "Dashboard"),
    ("nav.statement", "Extrato"),
    ("nav.market", "Mercado"),
    ("actions.logout", "Sair"),
    ("actions.login", "Entrar"),
    ("actions.register", "Criar conta"),
    ("actions.testAccount", "Conta teste"),
    ("actions.loginTestAccount", "Entrar com conta teste"),
    ("actions.update", "Atualizar"),
    ("actions.updateBalance", "Atualizar saldo"),
    ("actions.previous", "Anterior"),
    ("actions.next", "Próximo"),
    ("labels.email", "E-mail"),
    ("labels.password", "Senha"),
    ("labels.amountUsd", "Valor (USD)"),
    ("labels.amountByCurrency", "Valor ({currency})"),
    ("labels.available", "Disponível"),
    ("dashboard.usdBalance", "Saldo USD"),
    ("dashboard.trvBalance", "Saldo TRV"),
    ("dashboard.deposit.title", "Depositar USD"),
    ("dashboard.deposit.help", "Informe um valor com 2 casas decimais."),
    ("dashboard.convert.title", "Converter"),
    ("dashboard.convert.usdToTrv", "USD → TRV"),
    ("dashboard.convert.trvToUsd", "TRV → USD"),
    ("dashboard.convert.feeLine", "Câmbio 1:1. Taxa fixa: {fee} USD por transação."),
    ("transfer.title", "Transferir TRV"),
    ("transfer.feeLine", "Taxa: {fee} TRV"),
    ("statement.title", "Extrato privado"),
    ("statement.subtitle", "Apenas valores são exibidos para manter privacidade."),
    ("statement.empty", "Sem transações"),
    ("statement.fee", "taxa"),
    ("statement.type.deposit", "Depósito"),
    ("statement.type.convertUsdToTrv", "Conversão USD → TRV"),
    ("statement.type.convertTrvToUsd", "Conversão TRV → USD"),
    ("statement.type.transferOut", "Transferência enviada"),
    ("statement.type.transferIn", "Transferência recebida"),
    ("statement.type.feeIncome", "Receita de taxa"),
    ("statement.type.adminAdjust", "Ajuste administrativo"),
    ("statement.generatedAt", "Gerado em {date}"),
    ("statement.columns", "Data | TEC | Tipo | Valores"),
    ("payment.cancelled", "Pagamento cancelado."),
    ("payment.error", "Erro no pagamento."),
    ("payment.notCompleted", "Pagamento não concluído."),
    ("payment.rejected", "Pagamento falhou ou foi rejeitado."),
    ("payment.pending", "Pagamento pendente. Aguarde a confirmação."),
    ("payment.invalidAmount", "Valor do pagamento inválido."),
    ("payment.missingCheckoutUrl", "O provedor não retornou um link de pagamento."),
    ("market.title", "Mercado"),
    ("login.title", "Entrar"),
    ("register.title", "Criar conta"),
    ("errors.loadBalance", "Falha ao carregar saldo"),
    ("errors.deposit", "Falha ao depositar"),
    ("errors.convert", "Falha ao converter"),
    ("errors.transfer", "Falha ao transferir"),
    ("errors.loadStatement", "Falha ao carregar extrato"),
    ("errors.loadMarket", "Falha ao carregar mercado"),
    ("errors.loadOrderBook", "Falha ao carregar livro de ofertas"),
    ("errors.login", "Falha ao entrar"),
    ("errors.loginTestAccount", "Falha ao entrar com conta de teste"),
    ("errors.register", "Falha ao criar conta"),
    ("errors.unauthenticated", "Não autenticado"),
];

static EN: &[(&str, &str)] = &[
    ("lang.pt", "PT-BR"),
    ("lang.en", "EN"),
    ("nav.dashboard", "Dashboard"),
    ("nav.statement", "Statement"),
    ("nav.market", "Market"),
    ("actions.logout", "Logout"),
    ("actions.login", "Login"),
    ("actions.register", "Create account"),
    ("actions.testAccount", "Test account"),
    ("actions.loginTestAccount", "Log in with test account"),
    ("actions.update", "Update"),
    ("actions.updateBalance", "Update balance"),
    ("actions.previous", "Previous"),
    ("actions.next", "Next"),
    ("labels.email", "Email"),
    ("labels.password", "Password"),
    ("labels.amountUsd", "Amount (USD)"),
    ("labels.amountByCurrency", "Amount ({currency})"),
    ("labels.available", "Available"),
    ("dashboard.usdBalance", "USD balance"),
    ("dashboard.trvBalance", "TRV balance"),
    ("dashboard.deposit.title", "Deposit USD"),
    ("dashboard.deposit.help", "Enter an amount with 2 decimal places."),
    ("dashboard.convert.title", "Convert"),
    ("dashboard.convert.usdToTrv", "USD → TRV"),
    ("dashboard.convert.trvToUsd", "TRV → USD"),
    ("dashboard.convert.feeLine", "Rate 1:1. Fixed fee: {fee} USD per transaction."),
    ("transfer.title", "Transfer TRV"),
    ("transfer.feeLine", "Fee: {fee} TRV"),
    ("statement.title", "Private statement"),
    ("statement.subtitle", "Only values are shown to preserve privacy."),
    ("statement.empty", "No transactions"),
    ("statement.fee", "fee"),
    ("statement.type.deposit", "Deposit"),
    ("statement.type.convertUsdToTrv", "Conversion USD → TRV"),
    ("statement.type.convertTrvToUsd", "Conversion TRV → USD"),
    ("statement.type.transferOut", "Transfer sent"),
    ("statement.type.transferIn", "Transfer received"),
    ("statement.type.feeIncome", "Fee income"),
    ("statement.type.adminAdjust", "Admin adjustment"),
    ("statement.generatedAt", "Generated on {date}"),
    ("statement.columns", "Date | TEC | Type | Values"),
    ("payment.cancelled", "Payment cancelled."),
    ("payment.error", "Payment error."),
    ("payment.notCompleted", "Payment not completed."),
    ("payment.rejected", "Payment failed or was rejected."),
    ("payment.pending", "Payment pending. Please wait for confirmation."),
    ("payment.invalidAmount", "Invalid payment amount."),
    ("payment.missingCheckoutUrl", "The provider did not return a checkout link."),
    ("market.title", "Market"),
    ("login.title", "Login"),
    ("register.title", "Create account"),
    ("errors.loadBalance", "Failed to load balance"),
    ("errors.deposit", "Failed to deposit"),
    ("errors.convert", "Failed to convert"),
    ("errors.transfer", "Failed to transfer"),
    ("errors.loadStatement", "Failed to load statement"),
    ("errors.loadMarket", "Failed to load market"),
    ("errors.loadOrderBook", "Failed to load order book"),
    ("errors.login", "Login failed"),
    ("errors.loginTestAccount", "Test account login failed"),
    ("errors.register", "Failed to create account"),
    ("errors.unauthenticated", "Not authenticated"),
];

static CATALOG: LazyLock<HashMap<Locale, HashMap<&'static str, &'static str>>> =
    LazyLock::new(|| {
        HashMap::from([
            (Locale::PtBr, PT_BR.iter().copied().collect()),
            (Locale::En, EN.iter().copied().collect()),
        ])
    });

/// Look up `key` for `locale`, falling back to English, then the key.
pub fn lookup(locale: Locale, key: &str) -> String {
    let find = |l: Locale| CATALOG.get(&l).and_then(|m| m.get(key)).copied();
    find(locale)
        .or_else(|| find(Locale::En))
        .unwrap_or(key)
        .to_string()
}

/// Replace `{name}` placeholders. Unknown names are left as written.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close)
                if close > 0
                    && after[..close]
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                let name = &after[..close];
                match vars.iter().find(|(k, _)| *k == name) {
                    Some((_, v)) => out.push_str(v),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Message store bound to a persisted locale preference.
pub struct I18n {
    locale: RwLock<Locale>,
    storage: Arc<dyn Storage>,
}

impl I18n {
    /// Resolve the initial locale: stored preference if valid, else the
    /// system language hint.
    pub fn load(storage: Arc<dyn Storage>, system_language: Option<&str>) -> Self {
        let stored = match storage.get(keys::LOCALE) {
            Ok(v) => v.as_deref().and_then(Locale::from_tag),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read locale preference");
                None
            }
        };
        let locale = stored.unwrap_or_else(|| Locale::from_system_language(system_language));
        tracing::debug!(locale = locale.tag(), "Locale resolved");

        Self {
            locale: RwLock::new(locale),
            storage,
        }
    }

    pub fn locale(&self) -> Locale {
        *self.locale.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Switch language and persist the choice.
    pub fn set_locale(&self, locale: Locale) -> crate::error::Result<()> {
        *self.locale.write().unwrap_or_else(|e| e.into_inner()) = locale;
        self.storage.set(keys::LOCALE, locale.tag())?;
        Ok(())
    }

    pub fn t(&self, key: &str) -> String {
        lookup(self.locale(), key)
    }

    pub fn t_with(&self, key: &str, vars: &[(&str, &str)]) -> String {
        interpolate(&lookup(self.locale(), key), vars)
    }
}
