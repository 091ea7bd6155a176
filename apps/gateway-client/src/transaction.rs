//! Read-only transaction model.
//!
//! Transactions and their operations are constructed (and signed) by the
//! transaction-builder collaborator; this crate only reads them for the
//! pre-submission policy scan and carries the signed envelope bytes through
//! to submission.

use crate::account::Address;

/// Optional note attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Memo {
    /// No memo attached.
    None,
    /// UTF-8 text memo.
    Text(String),
    /// 64-bit identifier memo.
    Id(u64),
    /// 32-byte hash memo.
    Hash([u8; 32]),
    /// 32-byte return-hash memo.
    Return([u8; 32]),
}

impl Memo {
    /// Whether this is the absent memo kind.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Operation kind tags, mirroring the wire enum.
///
/// The numbering is fixed by the network protocol; the result decoder relies
/// on it to dispatch per-operation result bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Create and fund a new account.
    CreateAccount,
    /// Simple payment.
    Payment,
    /// Path payment with a fixed destination amount.
    PathPaymentStrictReceive,
    /// Sell-side offer management.
    ManageSellOffer,
    /// Passive sell offer creation.
    CreatePassiveSellOffer,
    /// Account option changes.
    SetOptions,
    /// Trustline changes.
    ChangeTrust,
    /// Legacy trustline authorization.
    AllowTrust,
    /// Merge an account into a destination.
    AccountMerge,
    /// Protocol inflation run.
    Inflation,
    /// Per-account data entry management.
    ManageData,
    /// Sequence number bump.
    BumpSequence,
    /// Buy-side offer management.
    ManageBuyOffer,
    /// Path payment with a fixed source amount.
    PathPaymentStrictSend,
    /// Claimable balance creation.
    CreateClaimableBalance,
    /// Claimable balance claim.
    ClaimClaimableBalance,
    /// Begin sponsoring another account's reserves.
    BeginSponsoringFutureReserves,
    /// End a sponsorship relationship.
    EndSponsoringFutureReserves,
    /// Revoke a sponsorship.
    RevokeSponsorship,
    /// Clawback of a credit asset.
    Clawback,
    /// Clawback of a claimable balance.
    ClawbackClaimableBalance,
    /// Trustline flag changes.
    SetTrustLineFlags,
    /// Liquidity pool deposit.
    LiquidityPoolDeposit,
    /// Liquidity pool withdrawal.
    LiquidityPoolWithdraw,
    /// Smart contract host function invocation.
    InvokeHostFunction,
    /// Contract state lifetime extension.
    ExtendFootprintTtl,
    /// Archived contract state restoration.
    RestoreFootprint,
}

impl OperationKind {
    /// Map a wire discriminant to its kind.
    #[must_use]
    pub const fn from_discriminant(value: i32) -> Option<Self> {
        Some(match value {
            0 => Self::CreateAccount,
            1 => Self::Payment,
            2 => Self::PathPaymentStrictReceive,
            3 => Self::ManageSellOffer,
            4 => Self::CreatePassiveSellOffer,
            5 => Self::SetOptions,
            6 => Self::ChangeTrust,
            7 => Self::AllowTrust,
            8 => Self::AccountMerge,
            9 => Self::Inflation,
            10 => Self::ManageData,
            11 => Self::BumpSequence,
            12 => Self::ManageBuyOffer,
            13 => Self::PathPaymentStrictSend,
            14 => Self::CreateClaimableBalance,
            15 => Self::ClaimClaimableBalance,
            16 => Self::BeginSponsoringFutureReserves,
            17 => Self::EndSponsoringFutureReserves,
            18 => Self::RevokeSponsorship,
            19 => Self::Clawback,
            20 => Self::ClawbackClaimableBalance,
            21 => Self::SetTrustLineFlags,
            22 => Self::LiquidityPoolDeposit,
            23 => Self::LiquidityPoolWithdraw,
            24 => Self::InvokeHostFunction,
            25 => Self::ExtendFootprintTtl,
            26 => Self::RestoreFootprint,
            _ => return None,
        })
    }

    /// Kind name as it appears in gateway payloads and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateAccount => "createAccount",
            Self::Payment => "payment",
            Self::PathPaymentStrictReceive => "pathPaymentStrictReceive",
            Self::ManageSellOffer => "manageSellOffer",
            Self::CreatePassiveSellOffer => "createPassiveSellOffer",
            Self::SetOptions => "setOptions",
            Self::ChangeTrust => "changeTrust",
            Self::AllowTrust => "allowTrust",
            Self::AccountMerge => "accountMerge",
            Self::Inflation => "inflation",
            Self::ManageData => "manageData",
            Self::BumpSequence => "bumpSequence",
            Self::ManageBuyOffer => "manageBuyOffer",
            Self::PathPaymentStrictSend => "pathPaymentStrictSend",
            Self::CreateClaimableBalance => "createClaimableBalance",
            Self::ClaimClaimableBalance => "claimClaimableBalance",
            Self::BeginSponsoringFutureReserves => "beginSponsoringFutureReserves",
            Self::EndSponsoringFutureReserves => "endSponsoringFutureReserves",
            Self::RevokeSponsorship => "revokeSponsorship",
            Self::Clawback => "clawback",
            Self::ClawbackClaimableBalance => "clawbackClaimableBalance",
            Self::SetTrustLineFlags => "setTrustLineFlags",
            Self::LiquidityPoolDeposit => "liquidityPoolDeposit",
            Self::LiquidityPoolWithdraw => "liquidityPoolWithdraw",
            Self::InvokeHostFunction => "invokeHostFunction",
            Self::ExtendFootprintTtl => "extendFootprintTtl",
            Self::RestoreFootprint => "restoreFootprint",
        }
    }
}

/// One instruction inside a transaction.
///
/// Only the four kinds that can move value to a named account carry their
/// destination here; everything else is inert for submission-time policy
/// checks and is kept as its bare kind tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Simple payment to a destination.
    Payment {
        /// Receiving account.
        destination: Address,
    },
    /// Path payment with a fixed destination amount.
    PathPaymentStrictReceive {
        /// Receiving account.
        destination: Address,
    },
    /// Path payment with a fixed source amount.
    PathPaymentStrictSend {
        /// Receiving account.
        destination: Address,
    },
    /// Merge the source account into a destination.
    AccountMerge {
        /// Receiving account.
        destination: Address,
    },
    /// Any operation kind that cannot move value to a named account.
    Inert {
        /// The operation's kind tag.
        kind: OperationKind,
    },
}

impl Operation {
    /// Destination relevant to the memo-required policy scan, if any.
    #[must_use]
    pub const fn policy_destination(&self) -> Option<&Address> {
        match self {
            Self::Payment { destination }
            | Self::PathPaymentStrictReceive { destination }
            | Self::PathPaymentStrictSend { destination }
            | Self::AccountMerge { destination } => Some(destination),
            Self::Inert { .. } => None,
        }
    }
}

/// A signed transaction ready for submission.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Attached memo.
    pub memo: Memo,
    /// Ordered operation list.
    pub operations: Vec<Operation>,
    /// Signed envelope bytes produced by the transaction builder.
    pub envelope_xdr: Vec<u8>,
}

/// A fee-bump wrapper around an inner transaction.
#[derive(Debug, Clone)]
pub struct FeeBumpTransaction {
    /// Account paying the replacement fee.
    pub fee_source: Address,
    /// The wrapped transaction.
    pub inner: Transaction,
    /// Signed envelope bytes of the wrapper.
    pub envelope_xdr: Vec<u8>,
}

/// Either a plain transaction or a fee-bump wrapper.
#[derive(Debug, Clone)]
pub enum TransactionEnvelope {
    /// A plain transaction.
    Transaction(Transaction),
    /// A fee-bump wrapper.
    FeeBump(FeeBumpTransaction),
}

impl TransactionEnvelope {
    /// The innermost transaction.
    ///
    /// Memo-required checking always resolves to the innermost transaction's
    /// memo and operation list.
    #[must_use]
    pub const fn inner_transaction(&self) -> &Transaction {
        match self {
            Self::Transaction(tx) => tx,
            Self::FeeBump(bump) => &bump.inner,
        }
    }

    /// Signed envelope bytes to submit.
    #[must_use]
    pub fn envelope_xdr(&self) -> &[u8] {
        match self {
            Self::Transaction(tx) => &tx.envelope_xdr,
            Self::FeeBump(bump) => &bump.envelope_xdr,
        }
    }
}
