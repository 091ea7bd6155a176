//! Typed tree for decoded transaction results.
//!
//! One explicit enumerated type per nesting level of the wire structure, so
//! unknown or invalid discriminants are caught at the parse boundary instead
//! of surfacing as missing fields downstream. Operation kinds that never
//! produce offer outcomes are structurally consumed (their bodies validated
//! against the fixed schema of each kind) but not materialized.

use super::DecodeError;
use super::xdr::XdrReader;
use crate::asset::Asset;
use crate::strkey;
use crate::transaction::OperationKind;

/// Top-level result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionResultCode {
    /// Fee-bump wrapper executed and the inner transaction succeeded.
    FeeBumpInnerSuccess,
    /// All operations succeeded.
    Success,
    /// One or more operations failed; per-operation results are present.
    Failed,
    /// Submitted before the lower time bound.
    TooEarly,
    /// Submitted after the upper time bound.
    TooLate,
    /// No operations in the transaction.
    MissingOperation,
    /// Sequence number mismatch.
    BadSeq,
    /// Too few valid signatures or wrong network.
    BadAuth,
    /// Fee would drop the source below its reserve.
    InsufficientBalance,
    /// Source account not found.
    NoAccount,
    /// Fee below the network minimum.
    InsufficientFee,
    /// Unused signatures attached.
    BadAuthExtra,
    /// Unknown failure inside the network.
    InternalError,
    /// Transaction kind not supported.
    NotSupported,
    /// Fee-bump wrapper executed and the inner transaction failed.
    FeeBumpInnerFailed,
    /// Sponsorship not confirmed.
    BadSponsorship,
    /// Minimum sequence age or gap not met.
    BadMinSeqAgeOrGap,
    /// Precondition is somehow invalid.
    Malformed,
    /// Contract execution resources exceeded or invalid.
    SorobanInvalid,
}

impl TransactionResultCode {
    /// Map a wire discriminant to its code.
    #[must_use]
    pub const fn from_discriminant(value: i32) -> Option<Self> {
        Some(match value {
            1 => Self::FeeBumpInnerSuccess,
            0 => Self::Success,
            -1 => Self::Failed,
            -2 => Self::TooEarly,
            -3 => Self::TooLate,
            -4 => Self::MissingOperation,
            -5 => Self::BadSeq,
            -6 => Self::BadAuth,
            -7 => Self::InsufficientBalance,
            -8 => Self::NoAccount,
            -9 => Self::InsufficientFee,
            -10 => Self::BadAuthExtra,
            -11 => Self::InternalError,
            -12 => Self::NotSupported,
            -13 => Self::FeeBumpInnerFailed,
            -14 => Self::BadSponsorship,
            -15 => Self::BadMinSeqAgeOrGap,
            -16 => Self::Malformed,
            -17 => Self::SorobanInvalid,
            _ => return None,
        })
    }

    /// Whether this code carries a per-operation result list.
    #[must_use]
    pub const fn has_operation_results(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    /// Whether this code carries a wrapped inner result.
    #[must_use]
    pub const fn is_fee_bump(self) -> bool {
        matches!(self, Self::FeeBumpInnerSuccess | Self::FeeBumpInnerFailed)
    }
}

/// A fully decoded top-level transaction result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResult {
    /// Fee actually charged, in raw fixed-point units.
    pub fee_charged: i64,
    /// The discriminated result body.
    pub payload: TransactionResultPayload,
}

/// The discriminated arms of a transaction result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionResultPayload {
    /// The transaction executed (fully or partially); one entry per operation.
    Operations {
        /// `Success` or `Failed`.
        code: TransactionResultCode,
        /// Per-operation results, in operation order.
        results: Vec<OperationResult>,
    },
    /// A fee-bump wrapper result carrying the inner transaction's result.
    InnerPair {
        /// `FeeBumpInnerSuccess` or `FeeBumpInnerFailed`.
        code: TransactionResultCode,
        /// Hash of the wrapped transaction.
        transaction_hash: [u8; 32],
        /// The inner transaction's own result.
        inner: Box<InnerTransactionResult>,
    },
    /// The transaction was rejected before execution; no per-operation list.
    Code(TransactionResultCode),
}

/// Result of the transaction wrapped by a fee bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerTransactionResult {
    /// Fee charged to the inner transaction, in raw fixed-point units.
    pub fee_charged: i64,
    /// The inner result body (fee-bump arms are invalid at this level).
    pub payload: TransactionResultPayload,
}

/// Per-operation result entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// The operation was applied; the body is keyed by operation kind.
    Applied(AppliedOperationResult),
    /// The operation was rejected before its kind-specific logic ran.
    Rejected(OperationRejection),
}

/// Kind-keyed body of an applied operation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedOperationResult {
    /// Sell-side offer management result.
    ManageSellOffer(ManageOfferResult),
    /// Buy-side offer management result.
    ManageBuyOffer(ManageOfferResult),
    /// Any other kind; its body was validated and consumed but not kept.
    Other(OperationKind),
}

/// Operation-level rejection codes (the kind-specific body never ran).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationRejection {
    /// Signatures were insufficient for this operation's source.
    BadAuth,
    /// The operation's source account does not exist.
    NoAccount,
    /// The operation kind is disabled on the network.
    NotSupported,
    /// Account subentry limit exceeded.
    TooManySubentries,
    /// Operation did too much work.
    ExceededWorkLimit,
    /// Account sponsorship limit exceeded.
    TooManySponsoring,
}

impl OperationRejection {
    const fn from_discriminant(value: i32) -> Option<Self> {
        Some(match value {
            -1 => Self::BadAuth,
            -2 => Self::NoAccount,
            -3 => Self::NotSupported,
            -4 => Self::TooManySubentries,
            -5 => Self::ExceededWorkLimit,
            -6 => Self::TooManySponsoring,
            _ => return None,
        })
    }
}

/// Result of a manage-offer operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManageOfferResult {
    /// The offer was processed; fills and the post-match offer state follow.
    Success(ManageOfferSuccess),
    /// The offer failed with the given wire code.
    Failed(i32),
}

/// Successful manage-offer envelope: fills plus the offer's new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageOfferSuccess {
    /// Offers taken off the book by this operation, in match order.
    pub offers_claimed: Vec<ClaimedOfferAtom>,
    /// What happened to the submitter's own offer.
    pub offer: OfferChange,
}

/// Post-match state of the submitter's offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferChange {
    /// A new offer was placed on the book.
    Created(OfferEntry),
    /// An existing offer was amended.
    Updated(OfferEntry),
    /// The offer no longer exists (fully consumed or removed).
    Deleted,
}

/// One fill against a resting offer.
///
/// Amounts are from the resting seller's perspective; the outcome layer
/// swaps them into the submitter's frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedOfferAtom {
    /// Raw ed25519 key of the resting offer's owner.
    pub seller_ed25519: [u8; 32],
    /// Identifier of the claimed offer.
    pub offer_id: i64,
    /// Asset the resting seller gave up.
    pub asset_sold: Asset,
    /// Raw amount the resting seller gave up.
    pub amount_sold: u64,
    /// Asset the resting seller received.
    pub asset_bought: Asset,
    /// Raw amount the resting seller received.
    pub amount_bought: u64,
}

/// A resting offer as stored on the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferEntry {
    /// Raw ed25519 key of the offer's owner.
    pub seller_ed25519: [u8; 32],
    /// Offer identifier.
    pub offer_id: i64,
    /// Asset being sold.
    pub selling: Asset,
    /// Asset being bought.
    pub buying: Asset,
    /// Remaining raw amount of `selling` on offer.
    pub amount: u64,
    /// Price of `selling` in terms of `buying`.
    pub price: Price,
    /// Ledger flags.
    pub flags: u32,
}

/// A price as a rational number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Price {
    /// Numerator.
    pub n: i32,
    /// Denominator.
    pub d: i32,
}

impl TransactionResult {
    /// Decode a transaction result from its binary wire form.
    ///
    /// The whole buffer must be consumed; trailing bytes are an error.
    pub fn from_xdr(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = XdrReader::new(bytes);
        let (fee_charged, payload) = decode_result_body(&mut reader, true, "")?;
        reader.finish()?;
        Ok(Self {
            fee_charged,
            payload,
        })
    }
}

/// Decode `feeCharged`, the result union, and the extension point.
///
/// `allow_fee_bump` is false when decoding the inner half of a fee-bump
/// pair, where wrapper codes are invalid.
fn decode_result_body(
    reader: &mut XdrReader<'_>,
    allow_fee_bump: bool,
    prefix: &str,
) -> Result<(i64, TransactionResultPayload), DecodeError> {
    let fee_charged = reader.read_i64(&format!("{prefix}feeCharged"))?;

    let code_field = format!("{prefix}result.code");
    let raw_code = reader.read_i32(&code_field)?;
    let code = TransactionResultCode::from_discriminant(raw_code).ok_or_else(|| {
        DecodeError::UnexpectedTag {
            field: code_field.clone(),
            value: i64::from(raw_code),
        }
    })?;

    let payload = if code.has_operation_results() {
        let count = reader.read_array_len(4, &format!("{prefix}result.results"))?;
        let mut results = Vec::with_capacity(count);
        for i in 0..count {
            results.push(decode_operation_result(
                reader,
                &format!("{prefix}result.results[{i}]"),
            )?);
        }
        TransactionResultPayload::Operations { code, results }
    } else if code.is_fee_bump() {
        if !allow_fee_bump {
            return Err(DecodeError::UnexpectedTag {
                field: code_field,
                value: i64::from(raw_code),
            });
        }
        let transaction_hash =
            reader.read_fixed::<32>(&format!("{prefix}result.innerResultPair.transactionHash"))?;
        let inner_prefix = format!("{prefix}result.innerResultPair.result.");
        let (inner_fee, inner_payload) = decode_result_body(reader, false, &inner_prefix)?;
        TransactionResultPayload::InnerPair {
            code,
            transaction_hash,
            inner: Box::new(InnerTransactionResult {
                fee_charged: inner_fee,
                payload: inner_payload,
            }),
        }
    } else {
        TransactionResultPayload::Code(code)
    };

    expect_void_extension(reader, &format!("{prefix}ext.v"))?;
    Ok((fee_charged, payload))
}

fn decode_operation_result(
    reader: &mut XdrReader<'_>,
    path: &str,
) -> Result<OperationResult, DecodeError> {
    let code_field = format!("{path}.code");
    let code = reader.read_i32(&code_field)?;

    if code != 0 {
        let rejection = OperationRejection::from_discriminant(code).ok_or(
            DecodeError::UnexpectedTag {
                field: code_field,
                value: i64::from(code),
            },
        )?;
        return Ok(OperationResult::Rejected(rejection));
    }

    let kind_field = format!("{path}.tr.type");
    let raw_kind = reader.read_i32(&kind_field)?;
    let kind = OperationKind::from_discriminant(raw_kind).ok_or(DecodeError::UnexpectedTag {
        field: kind_field,
        value: i64::from(raw_kind),
    })?;

    let body_path = format!("{path}.tr.{}", kind.name());
    let applied = match kind {
        OperationKind::ManageSellOffer => AppliedOperationResult::ManageSellOffer(
            decode_manage_offer_result(reader, &body_path)?,
        ),
        OperationKind::ManageBuyOffer => AppliedOperationResult::ManageBuyOffer(
            decode_manage_offer_result(reader, &body_path)?,
        ),
        other => {
            consume_operation_body(reader, other, &body_path)?;
            AppliedOperationResult::Other(other)
        }
    };
    Ok(OperationResult::Applied(applied))
}

fn decode_manage_offer_result(
    reader: &mut XdrReader<'_>,
    path: &str,
) -> Result<ManageOfferResult, DecodeError> {
    let code_field = format!("{path}.code");
    let code = reader.read_i32(&code_field)?;
    if code == 0 {
        return Ok(ManageOfferResult::Success(decode_manage_offer_success(
            reader,
            &format!("{path}.success"),
        )?));
    }
    if code < 0 {
        // All failure arms are void on the wire.
        return Ok(ManageOfferResult::Failed(code));
    }
    Err(DecodeError::UnexpectedTag {
        field: code_field,
        value: i64::from(code),
    })
}

fn decode_manage_offer_success(
    reader: &mut XdrReader<'_>,
    path: &str,
) -> Result<ManageOfferSuccess, DecodeError> {
    let claims_field = format!("{path}.offersClaimed");
    let count = reader.read_array_len(4, &claims_field)?;
    let mut offers_claimed = Vec::with_capacity(count);
    for i in 0..count {
        offers_claimed.push(decode_claimed_offer(
            reader,
            &format!("{claims_field}[{i}]"),
        )?);
    }

    let effect_field = format!("{path}.offer.effect");
    let effect = reader.read_i32(&effect_field)?;
    let offer = match effect {
        0 => OfferChange::Created(decode_offer_entry(reader, &format!("{path}.offer.offer"))?),
        1 => OfferChange::Updated(decode_offer_entry(reader, &format!("{path}.offer.offer"))?),
        2 => OfferChange::Deleted,
        other => {
            return Err(DecodeError::UnexpectedTag {
                field: effect_field,
                value: i64::from(other),
            });
        }
    };

    Ok(ManageOfferSuccess {
        offers_claimed,
        offer,
    })
}

/// Decode one claimed offer for a manage-offer result.
///
/// Two legacy seller-identity shapes exist. The pool-sourced arm is defined
/// in the wire format but structurally impossible here: offer matching only
/// ever claims book offers.
fn decode_claimed_offer(
    reader: &mut XdrReader<'_>,
    path: &str,
) -> Result<ClaimedOfferAtom, DecodeError> {
    let source_field = format!("{path}.type");
    let source = reader.read_i32(&source_field)?;
    let seller_ed25519 = match source {
        0 => reader.read_fixed::<32>(&format!("{path}.v0.sellerEd25519"))?,
        1 => decode_account_key(reader, &format!("{path}.orderBook.sellerId"))?,
        _ => {
            return Err(DecodeError::UnexpectedTag {
                field: source_field,
                value: i64::from(source),
            });
        }
    };

    Ok(ClaimedOfferAtom {
        seller_ed25519,
        offer_id: reader.read_i64(&format!("{path}.offerId"))?,
        asset_sold: decode_asset(reader, &format!("{path}.assetSold"))?,
        amount_sold: reader.read_u64(&format!("{path}.amountSold"))?,
        asset_bought: decode_asset(reader, &format!("{path}.assetBought"))?,
        amount_bought: reader.read_u64(&format!("{path}.amountBought"))?,
    })
}

fn decode_offer_entry(
    reader: &mut XdrReader<'_>,
    path: &str,
) -> Result<OfferEntry, DecodeError> {
    let entry = OfferEntry {
        seller_ed25519: decode_account_key(reader, &format!("{path}.sellerId"))?,
        offer_id: reader.read_i64(&format!("{path}.offerId"))?,
        selling: decode_asset(reader, &format!("{path}.selling"))?,
        buying: decode_asset(reader, &format!("{path}.buying"))?,
        amount: reader.read_u64(&format!("{path}.amount"))?,
        price: Price {
            n: reader.read_i32(&format!("{path}.price.n"))?,
            d: reader.read_i32(&format!("{path}.price.d"))?,
        },
        flags: reader.read_u32(&format!("{path}.flags"))?,
    };
    expect_void_extension(reader, &format!("{path}.ext.v"))?;
    Ok(entry)
}

/// Decode an account identifier (a keyed ed25519 public key).
fn decode_account_key(
    reader: &mut XdrReader<'_>,
    path: &str,
) -> Result<[u8; 32], DecodeError> {
    let type_field = format!("{path}.type");
    let key_type = reader.read_i32(&type_field)?;
    if key_type != 0 {
        return Err(DecodeError::UnexpectedTag {
            field: type_field,
            value: i64::from(key_type),
        });
    }
    reader.read_fixed::<32>(&format!("{path}.ed25519"))
}

/// Decode an asset descriptor; exactly three kinds are valid.
fn decode_asset(reader: &mut XdrReader<'_>, path: &str) -> Result<Asset, DecodeError> {
    let type_field = format!("{path}.type");
    let asset_type = reader.read_i32(&type_field)?;
    match asset_type {
        0 => Ok(Asset::Native),
        1 => {
            let code = reader.read_fixed::<4>(&format!("{path}.alphaNum4.assetCode"))?;
            let issuer = decode_account_key(reader, &format!("{path}.alphaNum4.issuer"))?;
            Ok(Asset::CreditAlphanum4 {
                code: trim_asset_code(&code, &format!("{path}.alphaNum4.assetCode"))?,
                issuer: strkey::encode_account_id(&issuer),
            })
        }
        2 => {
            let code = reader.read_fixed::<12>(&format!("{path}.alphaNum12.assetCode"))?;
            let issuer = decode_account_key(reader, &format!("{path}.alphaNum12.issuer"))?;
            Ok(Asset::CreditAlphanum12 {
                code: trim_asset_code(&code, &format!("{path}.alphaNum12.assetCode"))?,
                issuer: strkey::encode_account_id(&issuer),
            })
        }
        other => Err(DecodeError::UnexpectedTag {
            field: type_field,
            value: i64::from(other),
        }),
    }
}

/// Trim the fixed-width NUL padding from an asset code.
fn trim_asset_code(raw: &[u8], field: &str) -> Result<String, DecodeError> {
    let end = raw
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |index| index + 1);
    String::from_utf8(raw[..end].to_vec()).map_err(|e| DecodeError::InvalidString {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Read an extension discriminant that must be the void arm.
fn expect_void_extension(reader: &mut XdrReader<'_>, field: &str) -> Result<(), DecodeError> {
    let v = reader.read_i32(field)?;
    if v != 0 {
        return Err(DecodeError::UnexpectedTag {
            field: field.to_string(),
            value: i64::from(v),
        });
    }
    Ok(())
}

/// Structurally consume the result body of a non-offer operation kind.
///
/// The wire schema is fixed per kind: a result code, a success body for code
/// zero, and void failure arms — except the path-payment no-issuer arm,
/// which carries the offending asset.
fn consume_operation_body(
    reader: &mut XdrReader<'_>,
    kind: OperationKind,
    path: &str,
) -> Result<(), DecodeError> {
    const PATH_PAYMENT_NO_ISSUER: i32 = -9;

    let code_field = format!("{path}.code");
    let code = reader.read_i32(&code_field)?;
    if code > 0 {
        return Err(DecodeError::UnexpectedTag {
            field: code_field,
            value: i64::from(code),
        });
    }

    match kind {
        OperationKind::AccountMerge => {
            if code == 0 {
                reader.read_i64(&format!("{path}.sourceAccountBalance"))?;
            }
        }
        OperationKind::Inflation => {
            if code == 0 {
                let payouts_field = format!("{path}.payouts");
                let count = reader.read_array_len(4, &payouts_field)?;
                for i in 0..count {
                    decode_account_key(reader, &format!("{payouts_field}[{i}].destination"))?;
                    reader.read_i64(&format!("{payouts_field}[{i}].amount"))?;
                }
            }
        }
        OperationKind::PathPaymentStrictReceive | OperationKind::PathPaymentStrictSend => {
            if code == 0 {
                let offers_field = format!("{path}.success.offers");
                let count = reader.read_array_len(4, &offers_field)?;
                for i in 0..count {
                    consume_claim_atom(reader, &format!("{offers_field}[{i}]"))?;
                }
                decode_account_key(reader, &format!("{path}.success.last.destination"))?;
                decode_asset(reader, &format!("{path}.success.last.asset"))?;
                reader.read_i64(&format!("{path}.success.last.amount"))?;
            } else if code == PATH_PAYMENT_NO_ISSUER {
                decode_asset(reader, &format!("{path}.noIssuer"))?;
            }
        }
        OperationKind::CreatePassiveSellOffer => {
            if code == 0 {
                decode_manage_offer_success(reader, &format!("{path}.success"))?;
            }
        }
        OperationKind::CreateClaimableBalance => {
            if code == 0 {
                let id_field = format!("{path}.balanceId.type");
                let id_type = reader.read_i32(&id_field)?;
                if id_type != 0 {
                    return Err(DecodeError::UnexpectedTag {
                        field: id_field,
                        value: i64::from(id_type),
                    });
                }
                reader.read_fixed::<32>(&format!("{path}.balanceId.v0"))?;
            }
        }
        OperationKind::InvokeHostFunction => {
            if code == 0 {
                reader.read_fixed::<32>(&format!("{path}.success"))?;
            }
        }
        // Every remaining kind carries a bare result code.
        _ => {}
    }
    Ok(())
}

/// Consume a claim atom inside a path-payment body.
///
/// Unlike offer results, path payments can cross liquidity pools, so all
/// three claim-source arms are valid here.
fn consume_claim_atom(reader: &mut XdrReader<'_>, path: &str) -> Result<(), DecodeError> {
    let source_field = format!("{path}.type");
    let source = reader.read_i32(&source_field)?;
    match source {
        0 => {
            reader.read_fixed::<32>(&format!("{path}.v0.sellerEd25519"))?;
            reader.read_i64(&format!("{path}.offerId"))?;
        }
        1 => {
            decode_account_key(reader, &format!("{path}.orderBook.sellerId"))?;
            reader.read_i64(&format!("{path}.offerId"))?;
        }
        2 => {
            reader.read_fixed::<32>(&format!("{path}.liquidityPool.poolId"))?;
        }
        _ => {
            return Err(DecodeError::UnexpectedTag {
                field: source_field,
                value: i64::from(source),
            });
        }
    }
    decode_asset(reader, &format!("{path}.assetSold"))?;
    reader.read_i64(&format!("{path}.amountSold"))?;
    decode_asset(reader, &format!("{path}.assetBought"))?;
    reader.read_i64(&format!("{path}.amountBought"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::testutil::XdrWriter;

    #[test]
    fn decodes_rejected_transaction_without_results() {
        let mut w = XdrWriter::new();
        w.put_i64(100); // feeCharged
        w.put_i32(-5); // txBAD_SEQ
        w.put_i32(0); // ext.v
        let result = TransactionResult::from_xdr(&w.into_bytes()).unwrap();
        assert_eq!(result.fee_charged, 100);
        assert_eq!(
            result.payload,
            TransactionResultPayload::Code(TransactionResultCode::BadSeq)
        );
    }

    #[test]
    fn decodes_success_with_payment_entry() {
        let mut w = XdrWriter::new();
        w.put_i64(100);
        w.put_i32(0); // txSUCCESS
        w.put_u32(1); // one operation result
        w.put_i32(0); // opINNER
        w.put_i32(1); // payment
        w.put_i32(0); // PAYMENT_SUCCESS (void body)
        w.put_i32(0); // ext.v
        let result = TransactionResult::from_xdr(&w.into_bytes()).unwrap();
        match result.payload {
            TransactionResultPayload::Operations { code, results } => {
                assert_eq!(code, TransactionResultCode::Success);
                assert_eq!(
                    results,
                    vec![OperationResult::Applied(AppliedOperationResult::Other(
                        OperationKind::Payment
                    ))]
                );
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn decodes_fee_bump_inner_pair() {
        let mut w = XdrWriter::new();
        w.put_i64(400); // wrapper feeCharged
        w.put_i32(1); // txFEE_BUMP_INNER_SUCCESS
        w.put_bytes(&[7u8; 32]); // inner transaction hash
        w.put_i64(100); // inner feeCharged
        w.put_i32(0); // inner txSUCCESS
        w.put_u32(0); // no operation results
        w.put_i32(0); // inner ext.v
        w.put_i32(0); // outer ext.v
        let result = TransactionResult::from_xdr(&w.into_bytes()).unwrap();
        match result.payload {
            TransactionResultPayload::InnerPair {
                code,
                transaction_hash,
                inner,
            } => {
                assert_eq!(code, TransactionResultCode::FeeBumpInnerSuccess);
                assert_eq!(transaction_hash, [7u8; 32]);
                assert_eq!(inner.fee_charged, 100);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn rejects_nested_fee_bump_codes() {
        let mut w = XdrWriter::new();
        w.put_i64(400);
        w.put_i32(1); // txFEE_BUMP_INNER_SUCCESS
        w.put_bytes(&[0u8; 32]);
        w.put_i64(100);
        w.put_i32(1); // fee bump inside fee bump: invalid
        let err = TransactionResult::from_xdr(&w.into_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedTag { .. }));
    }

    #[test]
    fn rejects_unknown_top_level_code() {
        let mut w = XdrWriter::new();
        w.put_i64(0);
        w.put_i32(-99);
        let err = TransactionResult::from_xdr(&w.into_bytes()).unwrap_err();
        match err {
            DecodeError::UnexpectedTag { field, value } => {
                assert_eq!(field, "result.code");
                assert_eq!(value, -99);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut w = XdrWriter::new();
        w.put_i64(100);
        w.put_i32(-5);
        w.put_i32(0);
        w.put_u32(0xDEAD_BEEF); // trailing garbage
        assert!(matches!(
            TransactionResult::from_xdr(&w.into_bytes()),
            Err(DecodeError::TrailingBytes { .. })
        ));
    }

    #[test]
    fn rejects_truncated_buffer() {
        let mut w = XdrWriter::new();
        w.put_i64(100);
        w.put_i32(0); // txSUCCESS
        w.put_u32(1); // promises one result that is missing
        let err = TransactionResult::from_xdr(&w.into_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn decodes_credit_asset_and_trims_padding() {
        let mut w = XdrWriter::new();
        w.put_i32(1); // ASSET_TYPE_CREDIT_ALPHANUM4
        w.put_bytes(b"EUR\0");
        w.put_i32(0); // issuer key type
        w.put_bytes(&[0u8; 32]);
        let bytes = w.into_bytes();
        let mut reader = XdrReader::new(&bytes);
        let asset = decode_asset(&mut reader, "asset").unwrap();
        match asset {
            Asset::CreditAlphanum4 { code, issuer } => {
                assert_eq!(code, "EUR");
                assert!(issuer.starts_with('G'));
            }
            other => panic!("unexpected asset: {other:?}"),
        }
    }

    #[test]
    fn rejects_fourth_asset_kind() {
        let mut w = XdrWriter::new();
        w.put_i32(3); // pool-share kind: not a valid result asset
        let bytes = w.into_bytes();
        let mut reader = XdrReader::new(&bytes);
        let err = decode_asset(&mut reader, "asset").unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedTag { .. }));
    }

    #[test]
    fn consumes_path_payment_body_with_pool_claim() {
        let mut w = XdrWriter::new();
        w.put_i64(100);
        w.put_i32(0); // txSUCCESS
        w.put_u32(1);
        w.put_i32(0); // opINNER
        w.put_i32(13); // pathPaymentStrictSend
        w.put_i32(0); // success
        w.put_u32(1); // one claim atom
        w.put_i32(2); // liquidity-pool claim source
        w.put_bytes(&[9u8; 32]); // pool id
        w.put_i32(0); // assetSold: native
        w.put_i64(5);
        w.put_i32(0); // assetBought: native
        w.put_i64(6);
        w.put_i32(0); // last.destination key type
        w.put_bytes(&[1u8; 32]);
        w.put_i32(0); // last.asset: native
        w.put_i64(6); // last.amount
        w.put_i32(0); // ext.v
        let result = TransactionResult::from_xdr(&w.into_bytes()).unwrap();
        match result.payload {
            TransactionResultPayload::Operations { results, .. } => {
                assert_eq!(
                    results,
                    vec![OperationResult::Applied(AppliedOperationResult::Other(
                        OperationKind::PathPaymentStrictSend
                    ))]
                );
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn decodes_operation_rejection() {
        let mut w = XdrWriter::new();
        w.put_i64(100);
        w.put_i32(-1); // txFAILED
        w.put_u32(1);
        w.put_i32(-2); // opNO_ACCOUNT
        w.put_i32(0); // ext.v
        let result = TransactionResult::from_xdr(&w.into_bytes()).unwrap();
        match result.payload {
            TransactionResultPayload::Operations { results, .. } => {
                assert_eq!(
                    results,
                    vec![OperationResult::Rejected(OperationRejection::NoAccount)]
                );
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}
