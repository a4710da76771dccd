use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use dues_types::TransactionStatus;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::subscription_backend::SubscriptionBackend,
    domain::entities::payment_transaction::PaymentTransaction,
};

/// A transaction as shown in the list, plus whether it is being checked.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEntry {
    pub transaction: PaymentTransaction,
    pub checking: bool,
}

/// Transaction lists per subscription and the manual status poller.
///
/// The last fetched list for each subscription is kept in memory. A status
/// check rewrites only the matching entry. At most one check per
/// transaction id runs at a time; a second caller gets `CheckInProgress`.
pub struct TransactionUseCases {
    backend: Arc<dyn SubscriptionBackend>,
    board: Mutex<HashMap<Uuid, Vec<PaymentTransaction>>>,
    in_flight: Mutex<HashSet<Uuid>>,
}

impl TransactionUseCases {
    pub fn new(backend: Arc<dyn SubscriptionBackend>) -> Self {
        Self {
            backend,
            board: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Fetches the transactions for a subscription and replaces its list.
    #[instrument(skip(self))]
    pub async fn list(&self, subscription_id: Uuid) -> AppResult<Vec<TransactionEntry>> {
        let transactions = self.backend.list_transactions(subscription_id).await?;

        // Empty lists aren't tracked; unknown ids must not grow the board.
        let mut board = lock(&self.board);
        if transactions.is_empty() {
            board.remove(&subscription_id);
        } else {
            board.insert(subscription_id, transactions);
        }
        drop(board);

        Ok(self.current(subscription_id))
    }

    /// The last fetched list for a subscription, without contacting the backend.
    pub fn current(&self, subscription_id: Uuid) -> Vec<TransactionEntry> {
        let board = lock(&self.board);
        let in_flight = lock(&self.in_flight);

        board
            .get(&subscription_id)
            .map(|transactions| {
                transactions
                    .iter()
                    .map(|tx| TransactionEntry {
                        transaction: tx.clone(),
                        checking: in_flight.contains(&tx.id),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_checking(&self, transaction_id: Uuid) -> bool {
        lock(&self.in_flight).contains(&transaction_id)
    }

    /// Single-shot status check. No retries and no polling loop.
    #[instrument(skip(self))]
    pub async fn check_status(&self, transaction_id: Uuid) -> AppResult<TransactionStatus> {
        let _guard = InFlightGuard::acquire(&self.in_flight, transaction_id)?;

        let status = self.backend.check_transaction_status(transaction_id).await?;
        let updated = self.apply_status(transaction_id, status);

        info!(
            transaction_id = %transaction_id,
            status = %status,
            updated,
            "Transaction status checked"
        );

        Ok(status)
    }

    fn apply_status(&self, transaction_id: Uuid, status: TransactionStatus) -> bool {
        let mut board = lock(&self.board);
        let mut updated = false;

        for tx in board.values_mut().flatten() {
            if tx.id == transaction_id {
                tx.status = status;
                updated = true;
            }
        }

        updated
    }
}

/// Marks a transaction as being checked until dropped.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<Uuid>>,
    transaction_id: Uuid,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(in_flight: &'a Mutex<HashSet<Uuid>>, transaction_id: Uuid) -> AppResult<Self> {
        if !lock(in_flight).insert(transaction_id) {
            return Err(AppError::CheckInProgress);
        }

        Ok(Self {
            in_flight,
            transaction_id,
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.in_flight).remove(&self.transaction_id);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
