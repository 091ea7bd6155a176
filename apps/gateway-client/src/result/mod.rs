//! Decoding of submitted-transaction results.
//!
//! The gateway answers a submission with an opaque, tagged binary blob. This
//! module parses it into an explicit variant tree ([`types`]) and distills
//! per-operation offer outcomes from it: what was filled, at what amounts,
//! and what happened to the submitter's own offer.

mod xdr;

pub mod types;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::amount;
use crate::asset::Asset;
use crate::strkey;

pub use types::{Price, TransactionResult, TransactionResultCode, TransactionResultPayload};

use types::{AppliedOperationResult, ManageOfferResult, OfferChange, OperationResult};

/// Malformed or unexpected binary result structure.
///
/// Decoding never substitutes a default for malformed input: either the
/// whole structure parses or the call fails with the offending field path.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecodeError {
    /// The buffer ended before the named field was complete.
    #[error("truncated result: {field} needs {needed} bytes, {remaining} remain")]
    Truncated {
        /// Path of the field being read.
        field: String,
        /// Bytes the field required.
        needed: usize,
        /// Bytes actually remaining.
        remaining: usize,
    },

    /// A discriminant carried a value outside the known arms.
    #[error("unexpected tag {value} at {field}")]
    UnexpectedTag {
        /// Path of the discriminant.
        field: String,
        /// The offending value.
        value: i64,
    },

    /// Bytes continued past a structurally complete result.
    #[error("{remaining} trailing bytes after result")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// A byte string was not valid text.
    #[error("invalid string at {field}: {message}")]
    InvalidString {
        /// Path of the field.
        field: String,
        /// Error details.
        message: String,
    },

    /// A manage-offer entry inside an executed result carried a failure code.
    #[error("operation {operation_index} is a manage-offer failure (code {code})")]
    OfferResultNotSuccess {
        /// Index of the operation in transaction order.
        operation_index: usize,
        /// The wire failure code.
        code: i32,
    },

    /// An accumulated amount exceeded exact decimal range.
    #[error("amount overflow at {field}")]
    AmountOverflow {
        /// Path of the field.
        field: String,
    },

    /// The transport-level encoding of the result could not be undone.
    #[error("invalid result encoding: {message}")]
    InvalidEncoding {
        /// Error details.
        message: String,
    },
}

/// What a manage-offer operation did to the submitter's own offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferEffect {
    /// A new offer was placed on the book.
    Created,
    /// An existing offer was amended.
    Updated,
    /// The offer no longer exists.
    Deleted,
}

/// One fill produced by matching, in the submitter's frame of reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedOffer {
    /// Account that owned the claimed offer.
    pub seller_id: String,
    /// Identifier of the claimed offer.
    pub offer_id: i64,
    /// Asset the resting seller gave up.
    pub asset_sold: Asset,
    /// Converted amount the resting seller gave up.
    pub amount_sold: String,
    /// Asset the resting seller received.
    pub asset_bought: Asset,
    /// Converted amount the resting seller received.
    pub amount_bought: String,
}

/// The submitter's offer as it rests on the book after matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentOffer {
    /// Offer identifier.
    pub offer_id: i64,
    /// Asset being sold.
    pub selling: Asset,
    /// Asset being bought.
    pub buying: Asset,
    /// Converted remaining amount on offer.
    pub amount: String,
    /// Price of `selling` in terms of `buying`.
    pub price: Price,
}

/// Aggregate outcome of one manage-offer operation.
///
/// Exactly one of the four execution-shape flags is true per outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferOutcome {
    /// Offers claimed by this operation, in match order.
    pub offers_claimed: Vec<ClaimedOffer>,
    /// What happened to the submitter's own offer.
    pub effect: OfferEffect,
    /// Index of the operation in the transaction's operation list.
    pub operation_index: usize,
    /// The offer still resting on the book, absent if fully consumed.
    pub current_offer: Option<CurrentOffer>,
    /// Converted total bought by the submitter during execution.
    pub amount_bought: String,
    /// Converted total sold by the submitter during execution.
    pub amount_sold: String,
    /// The full requested amount is open for matching.
    pub is_fully_open: bool,
    /// The offer was partially, but not completely, filled.
    pub was_partially_filled: bool,
    /// The offer was fully matched and never rested on the book.
    pub was_immediately_filled: bool,
    /// The offer was removed without matching (for example rounded to zero).
    pub was_immediately_deleted: bool,
}

/// Decode a base64 result blob and distill its offer outcomes.
pub fn decode_result_base64(
    encoded: &str,
) -> Result<(TransactionResult, Option<Vec<OfferOutcome>>), DecodeError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| DecodeError::InvalidEncoding {
            message: e.to_string(),
        })?;
    let result = TransactionResult::from_xdr(&bytes)?;
    let outcomes = offer_outcomes(&result)?;
    Ok((result, outcomes))
}

/// Build per-operation offer outcomes from a decoded result.
///
/// Returns `None` when the result carries no per-operation list at all, or
/// when no manage-offer operation is present — callers distinguish "no offer
/// operations" from "offer operations that produced outcomes".
pub fn offer_outcomes(
    result: &TransactionResult,
) -> Result<Option<Vec<OfferOutcome>>, DecodeError> {
    let TransactionResultPayload::Operations { results, .. } = &result.payload else {
        return Ok(None);
    };

    let mut outcomes = Vec::new();
    let mut has_offer_op = false;
    for (index, entry) in results.iter().enumerate() {
        let OperationResult::Applied(applied) = entry else {
            continue;
        };
        let offer_result = match applied {
            AppliedOperationResult::ManageSellOffer(r)
            | AppliedOperationResult::ManageBuyOffer(r) => r,
            AppliedOperationResult::Other(_) => continue,
        };
        has_offer_op = true;
        outcomes.push(build_outcome(index, offer_result)?);
    }
    Ok(has_offer_op.then_some(outcomes))
}

fn build_outcome(
    operation_index: usize,
    offer_result: &ManageOfferResult,
) -> Result<OfferOutcome, DecodeError> {
    let success = match offer_result {
        ManageOfferResult::Success(success) => success,
        ManageOfferResult::Failed(code) => {
            return Err(DecodeError::OfferResultNotSuccess {
                operation_index,
                code: *code,
            });
        }
    };

    // Each claimed offer is the counterparty's fill: its bought/sold sense
    // is inverted relative to the operation that was just submitted, so the
    // claimed "bought" accumulates into the submitter's "sold" and vice
    // versa.
    let mut total_bought: u128 = 0;
    let mut total_sold: u128 = 0;
    let mut offers_claimed = Vec::with_capacity(success.offers_claimed.len());
    for atom in &success.offers_claimed {
        total_bought += u128::from(atom.amount_sold);
        total_sold += u128::from(atom.amount_bought);
        offers_claimed.push(ClaimedOffer {
            seller_id: strkey::encode_account_id(&atom.seller_ed25519),
            offer_id: atom.offer_id,
            asset_sold: atom.asset_sold.clone(),
            amount_sold: amount::to_decimal_string(atom.amount_sold),
            asset_bought: atom.asset_bought.clone(),
            amount_bought: amount::to_decimal_string(atom.amount_bought),
        });
    }

    let effect = match &success.offer {
        OfferChange::Created(_) => OfferEffect::Created,
        OfferChange::Updated(_) => OfferEffect::Updated,
        OfferChange::Deleted => OfferEffect::Deleted,
    };
    let current_offer = match &success.offer {
        OfferChange::Created(entry) | OfferChange::Updated(entry) => Some(CurrentOffer {
            offer_id: entry.offer_id,
            selling: entry.selling.clone(),
            buying: entry.buying.clone(),
            amount: amount::to_decimal_string(entry.amount),
            price: entry.price,
        }),
        OfferChange::Deleted => None,
    };

    let has_claims = !offers_claimed.is_empty();
    let deleted = effect == OfferEffect::Deleted;

    Ok(OfferOutcome {
        offers_claimed,
        effect,
        operation_index,
        current_offer,
        amount_bought: amount::total_to_decimal_string(total_bought).ok_or_else(|| {
            DecodeError::AmountOverflow {
                field: format!("results[{operation_index}].amountBought"),
            }
        })?,
        amount_sold: amount::total_to_decimal_string(total_sold).ok_or_else(|| {
            DecodeError::AmountOverflow {
                field: format!("results[{operation_index}].amountSold"),
            }
        })?,
        is_fully_open: !has_claims && !deleted,
        was_partially_filled: has_claims && !deleted,
        was_immediately_filled: has_claims && deleted,
        was_immediately_deleted: !has_claims && deleted,
    })
}
