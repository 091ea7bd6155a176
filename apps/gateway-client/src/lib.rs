// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::items_after_statements
    )
)]

//! Gateway Client - Rust Core Library
//!
//! Client for a distributed ledger's public API gateway: submits signed
//! transactions and interprets the gateway's binary-encoded execution
//! results into structured, application-consumable outcomes.
//!
//! # Architecture
//!
//! - **Data model** (read-only inputs and shared values)
//!   - [`transaction`]: transactions, operations, memos, fee-bump envelopes
//!   - [`account`]: parsed addresses, account records, the lookup capability
//!   - [`asset`]: the three asset kinds
//!   - [`amount`]: fixed-point (scale 7) conversion to decimal strings
//!   - [`strkey`]: checksummed rendering of raw account keys
//!
//! - **Policy** ([`policy`]): pre-submission memo-required scan over a
//!   transaction's value-moving operations, backed by sequential account
//!   lookups through an injected capability
//!
//! - **Result decoding** ([`result`]): tagged binary result tree parsed into
//!   explicit variants, distilled into per-operation offer outcomes
//!
//! - **Gateway** ([`gateway`]): the HTTP client tying it together —
//!   submission (sync and async relay), account lookup, fee stats,
//!   gateway-clock timebounds
//!
//! Transaction construction, signing, and retry policy live with the
//! embedding application, not here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod amount;
pub mod asset;
pub mod gateway;
pub mod policy;
pub mod result;
pub mod strkey;
pub mod transaction;

pub use account::{AccountLookup, AccountRecord, Address, LookupError};
pub use asset::Asset;
pub use gateway::{
    AsyncSubmitResponse, FeeStatsResponse, GatewayClient, GatewayError, GatewayOptions,
    SubmitOptions, SubmitTransactionResponse, Timebounds, SUBMIT_TRANSACTION_TIMEOUT,
};
pub use policy::{check_memo_required, PolicyError, MEMO_REQUIRED_KEY, MEMO_REQUIRED_SENTINEL};
pub use result::{
    ClaimedOffer, CurrentOffer, DecodeError, OfferEffect, OfferOutcome, TransactionResult,
    TransactionResultCode, offer_outcomes,
};
pub use transaction::{
    FeeBumpTransaction, Memo, Operation, OperationKind, Transaction, TransactionEnvelope,
};
