//! Pre-submission policy checks.
//!
//! Destination accounts can demand a memo on incoming value-moving
//! operations by setting a well-known policy-data entry. The scan here runs
//! before a transaction leaves the client, so a violation blocks submission
//! instead of burning a fee on a transaction the recipient will disown.

use std::collections::HashSet;

use crate::account::{AccountLookup, LookupError};
use crate::transaction::TransactionEnvelope;

/// Policy-data key that marks an account as memo-requiring.
pub const MEMO_REQUIRED_KEY: &str = "config.memo_required";

/// Sentinel value of [`MEMO_REQUIRED_KEY`]: the base64 encoding of `1`.
pub const MEMO_REQUIRED_SENTINEL: &str = "MQ==";

/// Submission-time policy failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PolicyError {
    /// A destination account requires a memo and the transaction has none.
    #[error(
        "destination {destination} requires a memo (operation {operation_index})"
    )]
    MemoRequired {
        /// The memo-requiring destination.
        destination: String,
        /// Index of the first operation naming that destination.
        operation_index: usize,
    },

    /// An account lookup failed for a reason other than "not found".
    #[error("account lookup failed during policy scan: {0}")]
    Lookup(#[from] LookupError),
}

/// Check whether any destination account of `envelope` requires a memo.
///
/// The check resolves to the innermost transaction (a fee-bump wrapper
/// preserves its inner transaction's memo and operations) and is a no-op
/// when a memo is already attached. Destinations are deduplicated by exact
/// string equality within this single call — no state is kept across calls,
/// so later calls observe fresh account state. Muxed destinations already
/// encode memo information and are skipped without a lookup.
///
/// Lookups run strictly one at a time in operation order, so the reported
/// operation index is deterministic and the first violation in transaction
/// order is the one surfaced. An account that does not exist imposes no
/// constraint; any other lookup failure aborts the scan.
pub async fn check_memo_required<L>(
    lookup: &L,
    envelope: &TransactionEnvelope,
) -> Result<(), PolicyError>
where
    L: AccountLookup + ?Sized,
{
    let transaction = envelope.inner_transaction();
    if !transaction.memo.is_none() {
        return Ok(());
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for (index, operation) in transaction.operations.iter().enumerate() {
        let Some(destination) = operation.policy_destination() else {
            continue;
        };
        if !seen.insert(destination.as_str()) {
            continue;
        }
        if destination.is_muxed() {
            tracing::debug!(destination = %destination, "muxed destination, skipping memo check");
            continue;
        }

        match lookup.load_account(destination.as_str()).await {
            Ok(account) => {
                if account.data_entry(MEMO_REQUIRED_KEY) == Some(MEMO_REQUIRED_SENTINEL) {
                    tracing::warn!(
                        destination = %destination,
                        operation_index = index,
                        "destination requires a memo, blocking submission"
                    );
                    return Err(PolicyError::MemoRequired {
                        destination: destination.as_str().to_string(),
                        operation_index: index,
                    });
                }
            }
            Err(LookupError::NotFound) => {
                // A nonexistent account cannot demand a memo.
                continue;
            }
            Err(other) => return Err(other.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountRecord, Address};
    use crate::transaction::{Memo, Operation, OperationKind, Transaction};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Deterministic lookup table that records every call.
    struct StubLookup {
        accounts: HashMap<String, AccountRecord>,
        failures: HashMap<String, LookupError>,
        calls: Mutex<Vec<String>>,
    }

    impl StubLookup {
        fn new() -> Self {
            Self {
                accounts: HashMap::new(),
                failures: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_account(mut self, id: &str, data: &[(&str, &str)]) -> Self {
            self.accounts.insert(
                id.to_string(),
                AccountRecord {
                    account_id: id.to_string(),
                    sequence: "1".to_string(),
                    data: data
                        .iter()
                        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                        .collect(),
                    extra: serde_json::Map::new(),
                },
            );
            self
        }

        fn with_failure(mut self, id: &str, error: LookupError) -> Self {
            self.failures.insert(id.to_string(), error);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AccountLookup for StubLookup {
        async fn load_account(&self, account_id: &str) -> Result<AccountRecord, LookupError> {
            self.calls.lock().unwrap().push(account_id.to_string());
            if let Some(error) = self.failures.get(account_id) {
                return Err(error.clone());
            }
            self.accounts
                .get(account_id)
                .cloned()
                .ok_or(LookupError::NotFound)
        }
    }

    fn payment_to(destination: &str) -> Operation {
        Operation::Payment {
            destination: Address::parse(destination),
        }
    }

    fn envelope(memo: Memo, operations: Vec<Operation>) -> TransactionEnvelope {
        TransactionEnvelope::Transaction(Transaction {
            memo,
            operations,
            envelope_xdr: vec![],
        })
    }

    #[tokio::test]
    async fn transaction_with_memo_skips_all_lookups() {
        let lookup = StubLookup::new();
        let envelope = envelope(Memo::Text("ref 17".to_string()), vec![payment_to("GDEST")]);
        check_memo_required(&lookup, &envelope).await.unwrap();
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test]
    async fn muxed_destinations_are_never_looked_up() {
        let lookup = StubLookup::new();
        let envelope = envelope(
            Memo::None,
            vec![payment_to("MDEST1"), payment_to("MDEST2")],
        );
        check_memo_required(&lookup, &envelope).await.unwrap();
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test]
    async fn repeated_destination_is_looked_up_once() {
        let lookup = StubLookup::new().with_account("GDEST", &[]);
        let envelope = envelope(Memo::None, vec![payment_to("GDEST"), payment_to("GDEST")]);
        check_memo_required(&lookup, &envelope).await.unwrap();
        assert_eq!(lookup.calls(), vec!["GDEST".to_string()]);
    }

    #[tokio::test]
    async fn memo_required_sentinel_blocks_with_destination_and_index() {
        let lookup = StubLookup::new()
            .with_account("GCLEAN", &[])
            .with_account("GSTRICT", &[(MEMO_REQUIRED_KEY, MEMO_REQUIRED_SENTINEL)]);
        let envelope = envelope(
            Memo::None,
            vec![
                payment_to("GCLEAN"),
                payment_to("GSTRICT"),
                payment_to("GNEVER"),
            ],
        );
        let err = check_memo_required(&lookup, &envelope).await.unwrap_err();
        match err {
            PolicyError::MemoRequired {
                destination,
                operation_index,
            } => {
                assert_eq!(destination, "GSTRICT");
                assert_eq!(operation_index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // The scan stopped at the violation; the third destination was never
        // queried.
        assert_eq!(
            lookup.calls(),
            vec!["GCLEAN".to_string(), "GSTRICT".to_string()]
        );
    }

    #[tokio::test]
    async fn other_sentinel_values_do_not_block() {
        let lookup = StubLookup::new().with_account("GDEST", &[(MEMO_REQUIRED_KEY, "MA==")]);
        let envelope = envelope(Memo::None, vec![payment_to("GDEST")]);
        check_memo_required(&lookup, &envelope).await.unwrap();
    }

    #[tokio::test]
    async fn missing_account_imposes_no_constraint() {
        let lookup = StubLookup::new().with_account("GSECOND", &[]);
        let envelope = envelope(
            Memo::None,
            vec![payment_to("GMISSING"), payment_to("GSECOND")],
        );
        check_memo_required(&lookup, &envelope).await.unwrap();
        assert_eq!(lookup.calls().len(), 2);
    }

    #[tokio::test]
    async fn transport_failure_aborts_the_scan() {
        let lookup = StubLookup::new()
            .with_failure(
                "GDOWN",
                LookupError::Transport {
                    message: "connection reset".to_string(),
                },
            )
            .with_account("GAFTER", &[]);
        let envelope = envelope(Memo::None, vec![payment_to("GDOWN"), payment_to("GAFTER")]);
        let err = check_memo_required(&lookup, &envelope).await.unwrap_err();
        assert!(matches!(err, PolicyError::Lookup(_)));
        assert_eq!(lookup.calls(), vec!["GDOWN".to_string()]);
    }

    #[tokio::test]
    async fn inert_operations_are_ignored() {
        let lookup = StubLookup::new();
        let envelope = envelope(
            Memo::None,
            vec![
                Operation::Inert {
                    kind: OperationKind::ManageData,
                },
                Operation::Inert {
                    kind: OperationKind::ManageSellOffer,
                },
            ],
        );
        check_memo_required(&lookup, &envelope).await.unwrap();
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test]
    async fn fee_bump_resolves_inner_memo_and_operations() {
        let lookup = StubLookup::new();
        let inner = Transaction {
            memo: Memo::Id(9),
            operations: vec![payment_to("GDEST")],
            envelope_xdr: vec![],
        };
        let envelope =
            TransactionEnvelope::FeeBump(crate::transaction::FeeBumpTransaction {
                fee_source: Address::parse("GFEE"),
                inner,
                envelope_xdr: vec![],
            });
        check_memo_required(&lookup, &envelope).await.unwrap();
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test]
    async fn all_four_value_moving_kinds_are_scanned() {
        let lookup = StubLookup::new()
            .with_account("G1", &[])
            .with_account("G2", &[])
            .with_account("G3", &[])
            .with_account("G4", &[]);
        let envelope = envelope(
            Memo::None,
            vec![
                Operation::Payment {
                    destination: Address::parse("G1"),
                },
                Operation::PathPaymentStrictReceive {
                    destination: Address::parse("G2"),
                },
                Operation::PathPaymentStrictSend {
                    destination: Address::parse("G3"),
                },
                Operation::AccountMerge {
                    destination: Address::parse("G4"),
                },
            ],
        );
        check_memo_required(&lookup, &envelope).await.unwrap();
        assert_eq!(lookup.calls().len(), 4);
    }
}
