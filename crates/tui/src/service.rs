use api_types::{
    SelectOption,
    entry::{Entry, EntryFilter, EntryKind, EntryStatus},
    user::{Credentials, User},
};

use crate::client::ClientError;

/// Remote operations on ledger entries.
///
/// The query screen only talks to this trait, so tests can drive it with an
/// in-memory implementation.
pub trait LedgerService {
    async fn search(&self, filter: &EntryFilter) -> Result<Vec<Entry>, ClientError>;

    async fn delete(&self, id: i64) -> Result<(), ClientError>;

    async fn update_status(&self, id: i64, status: EntryStatus) -> Result<(), ClientError>;

    fn months(&self) -> Vec<SelectOption<u32>> {
        api_types::month_options()
    }

    fn kinds(&self) -> Vec<SelectOption<EntryKind>> {
        api_types::kind_options()
    }
}

pub trait AuthService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, ClientError>;
}
