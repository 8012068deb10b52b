//! In-memory storage implementation.
//!
//! Everything sits behind one mutex, which makes each `record_donation` a
//! single atomic step. Nothing survives a restart; use it for tests and local
//! runs without `RocksDB`.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use tipjar_core::{leaderboard_order, DonationId, DonationRecord, Donor, UserAccount, UserId};

use crate::error::{Result, StoreError};
use crate::Store;

#[derive(Default)]
struct Inner {
    donations: BTreeMap<DonationId, DonationRecord>,
    donations_by_user: HashMap<UserId, BTreeSet<DonationId>>,
    accounts: HashMap<UserId, UserAccount>,
    payments: HashSet<String>,
}

/// Memory-backed storage implementation.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl Store for MemoryStore {
    fn record_donation(&self, donor: &Donor, record: &DonationRecord) -> Result<()> {
        let mut inner = self.lock()?;

        if let Some(payment_id) = &record.payment_id {
            if !inner.payments.insert(payment_id.clone()) {
                return Err(StoreError::DuplicatePayment {
                    payment_id: payment_id.clone(),
                });
            }
        }

        inner.donations.insert(record.id, record.clone());
        inner
            .donations_by_user
            .entry(record.user_id)
            .or_default()
            .insert(record.id);

        let contribution = UserAccount::from_donation(donor, record);
        match inner.accounts.entry(record.user_id) {
            Entry::Occupied(mut entry) => entry.get_mut().absorb(contribution),
            Entry::Vacant(entry) => {
                entry.insert(contribution);
            }
        }

        Ok(())
    }

    fn get_account(&self, user_id: &UserId) -> Result<Option<UserAccount>> {
        Ok(self.lock()?.accounts.get(user_id).cloned())
    }

    fn top_accounts(&self, limit: usize) -> Result<Vec<UserAccount>> {
        let mut accounts: Vec<_> = self.lock()?.accounts.values().cloned().collect();
        accounts.sort_by(leaderboard_order);
        accounts.truncate(limit);
        Ok(accounts)
    }

    fn get_donation(&self, donation_id: &DonationId) -> Result<Option<DonationRecord>> {
        Ok(self.lock()?.donations.get(donation_id).cloned())
    }

    fn list_donations_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<DonationRecord>> {
        let inner = self.lock()?;
        let Some(ids) = inner.donations_by_user.get(user_id) else {
            return Ok(Vec::new());
        };

        Ok(ids
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .filter_map(|id| inner.donations.get(id).cloned())
            .collect())
    }

    fn has_payment(&self, payment_id: &str) -> Result<bool> {
        Ok(self.lock()?.payments.contains(payment_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donate(store: &MemoryStore, user_id: i64, amount: u64, payment_id: Option<&str>) -> Result<()> {
        let donor = Donor::new(UserId::new(user_id), "Ann", Some("ann1".into()));
        let record = DonationRecord::new(
            UserId::new(user_id),
            amount,
            "Warrior",
            payment_id.map(str::to_string),
        )
        .unwrap();
        store.record_donation(&donor, &record)
    }

    #[test]
    fn first_donation_creates_account() {
        let store = MemoryStore::new();
        donate(&store, 42, 10, None).unwrap();

        let account = store.get_account(&UserId::new(42)).unwrap().unwrap();
        assert_eq!(account.total_donated, 10);
        assert_eq!(account.username.as_deref(), Some("ann1"));
    }

    #[test]
    fn duplicate_payment_leaves_totals_untouched() {
        let store = MemoryStore::new();
        donate(&store, 1, 10, Some("charge")).unwrap();
        let result = donate(&store, 1, 10, Some("charge"));

        assert!(matches!(result, Err(StoreError::DuplicatePayment { .. })));
        assert_eq!(store.get_account(&UserId::new(1)).unwrap().unwrap().total_donated, 10);
        assert_eq!(store.list_donations_by_user(&UserId::new(1), 10, 0).unwrap().len(), 1);
    }

    #[test]
    fn out_of_order_writes_keep_newest_donation() {
        let store = MemoryStore::new();
        let donor = Donor::new(UserId::new(7), "Ann", None);
        let earlier = DonationRecord::new(UserId::new(7), 5, "Starter", None).unwrap();
        let later = DonationRecord::new(UserId::new(7), 10, "Warrior", None).unwrap();

        store.record_donation(&donor, &later).unwrap();
        store.record_donation(&donor, &earlier).unwrap();

        let account = store.get_account(&UserId::new(7)).unwrap().unwrap();
        assert_eq!(account.total_donated, 15);
        assert_eq!(account.last_tier_donated, "Warrior");
        assert_eq!(account.last_donated_timestamp, later.timestamp);
        assert_eq!(account.first_donated_at, earlier.timestamp);

        let newest_first = store.list_donations_by_user(&UserId::new(7), 10, 0).unwrap();
        let ids: Vec<_> = newest_first.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![later.id, earlier.id]);
    }

    #[test]
    fn users_are_isolated() {
        let store = MemoryStore::new();
        donate(&store, 1, 10, None).unwrap();
        donate(&store, 2, 25, None).unwrap();

        assert_eq!(store.get_account(&UserId::new(1)).unwrap().unwrap().total_donated, 10);
        assert!(store.list_donations_by_user(&UserId::new(3), 10, 0).unwrap().is_empty());
    }
}
