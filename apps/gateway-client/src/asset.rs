//! Asset descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An asset on the ledger.
///
/// Exactly three kinds exist on the wire: the native asset, and credit
/// assets identified by a `(code, issuer)` pair serialized in either the
/// 4-character or the 12-character width. Any other kind tag in a decoded
/// result is a structural error, never a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Asset {
    /// The network's native asset.
    Native,
    /// Credit asset with a code of up to 4 characters.
    CreditAlphanum4 {
        /// Asset code, NUL-padding already trimmed.
        #[serde(rename = "asset_code")]
        code: String,
        /// Issuing account identifier.
        issuer: String,
    },
    /// Credit asset with a code of 5 to 12 characters.
    CreditAlphanum12 {
        /// Asset code, NUL-padding already trimmed.
        #[serde(rename = "asset_code")]
        code: String,
        /// Issuing account identifier.
        issuer: String,
    },
}

impl Asset {
    /// Kind name as it appears in gateway payloads.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::CreditAlphanum4 { .. } => "credit_alphanum4",
            Self::CreditAlphanum12 { .. } => "credit_alphanum12",
        }
    }

    /// Asset code, if this is a credit asset.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4 { code, .. } | Self::CreditAlphanum12 { code, .. } => {
                Some(code)
            }
        }
    }

    /// Issuer account identifier, if this is a credit asset.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4 { issuer, .. } | Self::CreditAlphanum12 { issuer, .. } => {
                Some(issuer)
            }
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::CreditAlphanum4 { code, issuer }
            | Self::CreditAlphanum12 { code, issuer } => write!(f, "{code}:{issuer}"),
        }
    }
}
