//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.
//! Account totals are never read, modified and written back by this code: each
//! donation contributes a merge operand and `RocksDB` folds the operands into
//! the stored aggregate, so concurrent donations for one user cannot lose an
//! increment.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MergeOperands, MultiThreaded, Options, WriteBatch,
};

use tipjar_core::{leaderboard_order, DonationId, DonationRecord, Donor, UserAccount, UserId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf, ACCOUNT_MERGE_OPERATOR};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes the check-then-write on the payments column family.
    payment_guard: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Self::cf_options(name)))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            payment_guard: Mutex::new(()),
        })
    }

    fn cf_options(name: &str) -> Options {
        let mut opts = Options::default();
        if name == cf::ACCOUNTS {
            opts.set_merge_operator_associative(ACCOUNT_MERGE_OPERATOR, merge_accounts);
        }
        opts
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Unavailable(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

/// Associative merge: fold account contributions in order.
///
/// Returning `None` marks the merge as failed; `RocksDB` then surfaces a
/// corruption error on the read or compaction that triggered it.
fn merge_accounts(
    _key: &[u8],
    existing: Option<&[u8]>,
    operands: &MergeOperands,
) -> Option<Vec<u8>> {
    let decode = |bytes: &[u8]| match RocksStore::deserialize::<UserAccount>(bytes) {
        Ok(account) => Some(account),
        Err(e) => {
            tracing::error!(error = %e, "Undecodable account value in merge");
            None
        }
    };

    let mut account = match existing {
        Some(bytes) => Some(decode(bytes)?),
        None => None,
    };

    for operand in operands.iter() {
        let contribution = decode(operand)?;
        match account.as_mut() {
            Some(current) => current.absorb(contribution),
            None => account = Some(contribution),
        }
    }

    let merged = account?;
    match RocksStore::serialize(&merged) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::error!(error = %e, user_id = %merged.user_id, "Failed to encode merged account");
            None
        }
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Write Operations
    // =========================================================================

    fn record_donation(&self, donor: &Donor, record: &DonationRecord) -> Result<()> {
        // Only idempotent writes need the guard; plain donations touch no
        // shared read state.
        let _guard = record
            .payment_id
            .as_ref()
            .map(|_| self.payment_guard.lock().unwrap_or_else(PoisonError::into_inner));

        if let Some(payment_id) = &record.payment_id {
            if self.has_payment(payment_id)? {
                return Err(StoreError::DuplicatePayment {
                    payment_id: payment_id.clone(),
                });
            }
        }

        let cf_accounts = self.cf(cf::ACCOUNTS)?;
        let cf_donations = self.cf(cf::DONATIONS)?;
        let cf_by_user = self.cf(cf::DONATIONS_BY_USER)?;
        let cf_payments = self.cf(cf::PAYMENTS)?;

        let account_key = keys::account_key(&record.user_id);
        let donation_key = keys::donation_key(&record.id);
        let user_donation_key = keys::user_donation_key(&record.user_id, &record.id);

        let contribution = Self::serialize(&UserAccount::from_donation(donor, record))?;
        let donation_value = Self::serialize(record)?;

        // Write atomically
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_donations, &donation_key, &donation_value);
        batch.put_cf(&cf_by_user, &user_donation_key, b"");
        if let Some(payment_id) = &record.payment_id {
            batch.put_cf(&cf_payments, keys::payment_key(payment_id), &donation_key);
        }
        batch.merge_cf(&cf_accounts, &account_key, &contribution);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(())
    }

    // =========================================================================
    // Account Operations
    // =========================================================================

    fn get_account(&self, user_id: &UserId) -> Result<Option<UserAccount>> {
        let cf = self.cf(cf::ACCOUNTS)?;
        let key = keys::account_key(user_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn top_accounts(&self, limit: usize) -> Result<Vec<UserAccount>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let cf = self.cf(cf::ACCOUNTS)?;

        // Full scan; totals have no secondary index.
        let mut accounts = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Unavailable(e.to_string()))?;
            accounts.push(Self::deserialize::<UserAccount>(&value)?);
        }

        accounts.sort_by(leaderboard_order);
        accounts.truncate(limit);
        Ok(accounts)
    }

    // =========================================================================
    // Ledger Operations
    // =========================================================================

    fn get_donation(&self, donation_id: &DonationId) -> Result<Option<DonationRecord>> {
        let cf = self.cf(cf::DONATIONS)?;
        let key = keys::donation_key(donation_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_donations_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<DonationRecord>> {
        let cf_by_user = self.cf(cf::DONATIONS_BY_USER)?;
        let prefix = keys::user_donations_prefix(user_id);

        let iter = self
            .db
            .iterator_cf(&cf_by_user, IteratorMode::From(&prefix, Direction::Forward));

        // Collect the user's index keys (ULIDs are naturally time-ordered)
        let mut ids = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Unavailable(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            match keys::extract_donation_id_from_user_key(&key) {
                Some(id) => ids.push(id),
                None => tracing::warn!(user_id = %user_id, "Skipping malformed donation index key"),
            }
        }

        let mut donations = Vec::with_capacity(limit.min(ids.len()));
        for id in ids.iter().rev().skip(offset).take(limit) {
            if let Some(record) = self.get_donation(id)? {
                donations.push(record);
            }
        }

        Ok(donations)
    }

    fn has_payment(&self, payment_id: &str) -> Result<bool> {
        let cf = self.cf(cf::PAYMENTS)?;
        let key = keys::payment_key(payment_id);

        let exists = self
            .db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .is_some();

        Ok(exists)
    }
}
