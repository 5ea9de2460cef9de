//! Reconciliation engine
//!
//! Turns "this account really holds X" into the adjustment transaction that
//! moves the tracked balance to X. Pure computation: no I/O, no state.

use chrono::{Local, NaiveDate};
use log::{debug, warn};

use crate::models::{Account, AccountId, AdjustmentMarker, AdjustmentTransaction, AmountError, Milliunits};

/// A balance typed by the user for one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceUpdateRequest {
    pub account_id: AccountId,
    pub new_balance: String,
}

impl BalanceUpdateRequest {
    pub fn new(account_id: impl Into<AccountId>, new_balance: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            new_balance: new_balance.into(),
        }
    }
}

/// Outcome for one account of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub account_id: AccountId,
    pub account_name: String,
    pub previous_balance: Milliunits,
    /// `Ok(None)` when the balance already matches
    pub outcome: Result<Option<AdjustmentTransaction>, AmountError>,
}

impl BatchItem {
    /// The adjustment to post, if any
    pub fn adjustment(&self) -> Option<&AdjustmentTransaction> {
        self.outcome.as_ref().ok().and_then(Option::as_ref)
    }

    /// Balance once the adjustment is applied; `None` for invalid input
    pub fn new_balance(&self) -> Option<Milliunits> {
        match &self.outcome {
            Ok(Some(tx)) => Some(self.previous_balance + tx.amount),
            Ok(None) => Some(self.previous_balance),
            Err(_) => None,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self.outcome, Ok(None))
    }

    pub fn is_invalid(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Computes adjustment transactions for a fixed marker and date
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    marker: AdjustmentMarker,
    date: NaiveDate,
}

impl ReconciliationEngine {
    /// Engine dating adjustments today (local time)
    pub fn new(marker: AdjustmentMarker) -> Self {
        Self::with_date(marker, Local::now().date_naive())
    }

    pub fn with_date(marker: AdjustmentMarker, date: NaiveDate) -> Self {
        Self { marker, date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Adjustment moving `account` to `new_balance`
    ///
    /// Returns `Ok(None)` when the entered balance equals the known one.
    pub fn compute_adjustment(
        &self,
        account: &Account,
        new_balance: &str,
    ) -> Result<Option<AdjustmentTransaction>, AmountError> {
        let target = Milliunits::parse(new_balance)?;
        let delta = target
            .checked_sub(account.balance)
            .ok_or_else(|| AmountError::OutOfRange(new_balance.trim().to_string()))?;

        if delta.is_zero() {
            debug!("{} already at {}", account.name, target);
            return Ok(None);
        }

        debug!(
            "{}: {} -> {} (adjustment {})",
            account.name, account.balance, target, delta
        );
        Ok(Some(AdjustmentTransaction {
            account_id: account.id.clone(),
            amount: delta,
            date: self.date,
            marker: self.marker.clone(),
        }))
    }

    /// Apply [`compute_adjustment`](Self::compute_adjustment) to every pair
    ///
    /// Items are independent: a bad amount for one account is recorded on
    /// that item and the rest are still computed.
    pub fn compute_batch(&self, updates: &[(&Account, &str)]) -> Vec<BatchItem> {
        updates
            .iter()
            .map(|(account, new_balance)| {
                let outcome = self.compute_adjustment(account, new_balance);
                if let Err(e) = &outcome {
                    warn!("Invalid balance for {}: {}", account.name, e);
                }
                BatchItem {
                    account_id: account.id.clone(),
                    account_name: account.name.clone(),
                    previous_balance: account.balance,
                    outcome,
                }
            })
            .collect()
    }
}

/// Adjustments of a batch that need posting, in batch order
pub fn pending_adjustments(items: &[BatchItem]) -> Vec<AdjustmentTransaction> {
    items
        .iter()
        .filter_map(|item| item.adjustment().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClearedStatus;

    fn engine() -> ReconciliationEngine {
        ReconciliationEngine::with_date(
            AdjustmentMarker::default(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
    }

    fn account(id: &str, balance: i64) -> Account {
        Account::new(id, format!("Account {}", id), Milliunits::new(balance))
    }

    #[test]
    fn test_matching_balance_needs_no_adjustment() {
        let result = engine()
            .compute_adjustment(&account("a", 150_000), "150.00")
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_positive_adjustment() {
        let tx = engine()
            .compute_adjustment(&account("a", 150_000), "175.50")
            .unwrap()
            .unwrap();
        assert_eq!(tx.amount, Milliunits::new(25_500));
        assert_eq!(tx.account_id.as_str(), "a");
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(tx.marker.payee_name, "Balance Adjustment");
        assert!(tx.marker.approved);
    }

    #[test]
    fn test_negative_adjustment() {
        let tx = engine()
            .compute_adjustment(&account("a", 200_000), "180")
            .unwrap()
            .unwrap();
        assert_eq!(tx.amount, Milliunits::new(-20_000));
    }

    #[test]
    fn test_invalid_amount_propagates() {
        let err = engine()
            .compute_adjustment(&account("a", 0), "12.3.4")
            .unwrap_err();
        assert!(matches!(err, AmountError::Malformed(_)));
    }

    #[test]
    fn test_delta_overflow_is_out_of_range() {
        let err = engine()
            .compute_adjustment(&account("a", i64::MIN), "1")
            .unwrap_err();
        assert!(matches!(err, AmountError::OutOfRange(_)));

        let err = engine()
            .compute_adjustment(&account("a", i64::MAX), "-1")
            .unwrap_err();
        assert!(matches!(err, AmountError::OutOfRange(_)));
    }

    #[test]
    fn test_delta_is_exact_for_many_balances() {
        let engine = engine();
        for (known, entered, expected) in [
            (0, "0.001", 1),
            (-5_000, "5", 10_000),
            (123_456, "-0.544", -124_000),
            (999, "1", 1),
        ] {
            let tx = engine
                .compute_adjustment(&account("a", known), entered)
                .unwrap()
                .unwrap();
            assert_eq!(tx.amount.value(), expected);
            assert_eq!(
                (Milliunits::new(known) + tx.amount),
                Milliunits::parse(entered).unwrap()
            );
        }
    }

    #[test]
    fn test_marker_comes_from_engine() {
        let marker = AdjustmentMarker {
            memo: "custom".into(),
            cleared: ClearedStatus::Reconciled,
            ..AdjustmentMarker::default()
        };
        let engine = ReconciliationEngine::new(marker.clone());
        let tx = engine
            .compute_adjustment(&account("a", 0), "1")
            .unwrap()
            .unwrap();
        assert_eq!(tx.marker, marker);
        assert_eq!(tx.date, engine.date());
    }

    #[test]
    fn test_batch_continues_past_invalid_item() {
        let a = account("a", 150_000);
        let b = account("b", 200_000);
        let c = account("c", 150_000);
        let d = account("d", 0);

        let items = engine().compute_batch(&[(&a, "175.50"), (&b, "12.3.4"), (&c, "150"), (&d, "-1")]);

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].adjustment().unwrap().amount.value(), 25_500);
        assert!(items[1].is_invalid());
        assert_eq!(items[1].new_balance(), None);
        assert!(items[2].is_unchanged());
        assert_eq!(items[2].new_balance(), Some(Milliunits::new(150_000)));
        assert_eq!(items[3].new_balance(), Some(Milliunits::new(-1_000)));

        let pending = pending_adjustments(&items);
        let ids: Vec<&str> = pending.iter().map(|t| t.account_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn test_batch_with_all_invalid() {
        let accounts: Vec<Account> = (0..3).map(|i| account(&i.to_string(), 0)).collect();
        let updates: Vec<(&Account, &str)> = accounts.iter().map(|a| (a, "abc")).collect();
        let items = engine().compute_batch(&updates);
        assert!(items.iter().all(BatchItem::is_invalid));
        assert!(pending_adjustments(&items).is_empty());
    }

    #[test]
    fn test_balance_update_request() {
        let request = BalanceUpdateRequest::new("a", "10.00");
        assert_eq!(request.account_id.as_str(), "a");
        assert_eq!(request.new_balance, "10.00");
    }
}
