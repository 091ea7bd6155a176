//! Account addressing and the account-state lookup port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Leading character reserved for the muxed address space.
const MUXED_LEAD: char = 'M';

/// A parsed account address.
///
/// Two disjoint address spaces exist: ordinary accounts and muxed accounts.
/// Muxed addresses embed routing information and are recognized by their
/// reserved leading character, so the distinction is made once at the
/// boundary instead of by scattered string-prefix checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Address {
    /// An ordinary account identifier.
    Account(String),
    /// A muxed account identifier (embeds memo routing information).
    Muxed(String),
}

impl Address {
    /// Parse an address string into its address space.
    #[must_use]
    pub fn parse(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.starts_with(MUXED_LEAD) {
            Self::Muxed(value)
        } else {
            Self::Account(value)
        }
    }

    /// The raw address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Account(value) | Self::Muxed(value) => value,
        }
    }

    /// Whether this address lives in the muxed address space.
    #[must_use]
    pub const fn is_muxed(&self) -> bool {
        matches!(self, Self::Muxed(_))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        match value {
            Address::Account(inner) | Address::Muxed(inner) => inner,
        }
    }
}

/// Current ledger state of an account, as returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// The account identifier.
    pub account_id: String,
    /// Current sequence number, rendered as a string by the gateway.
    pub sequence: String,
    /// Per-account key/value policy data; values are base64 strings.
    #[serde(default)]
    pub data: HashMap<String, String>,
    /// Fields this core does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AccountRecord {
    /// Look up a policy-data entry by key.
    #[must_use]
    pub fn data_entry(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// Account-state lookup failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    /// The account does not exist on the ledger.
    #[error("account not found")]
    NotFound,

    /// Transport-level failure reaching the gateway.
    #[error("lookup transport error: {message}")]
    Transport {
        /// Error details.
        message: String,
    },

    /// The gateway answered with something this client cannot interpret.
    #[error("unexpected lookup response: {message}")]
    UnexpectedResponse {
        /// Error details.
        message: String,
    },
}

/// Capability for fetching account state.
///
/// Injected into the policy scan so callers can supply the real gateway
/// client or a deterministic stub table in tests.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// Fetch the current state of `account_id`.
    async fn load_account(&self, account_id: &str) -> Result<AccountRecord, LookupError>;
}
