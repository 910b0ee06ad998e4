//! Service request persistence

use super::storage::{REQUESTS_TABLE, Storage, StorageResult};
use redb::{ReadableDatabase, ReadableTable};
use shared::models::ServiceRequest;

impl Storage {
    /// Insert a new request row
    pub fn insert_request(&self, request: &ServiceRequest) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(REQUESTS_TABLE)?;
            let value = serde_json::to_vec(request)?;
            table.insert(request.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get a request by id
    pub fn get_request(&self, id: &str) -> StorageResult<Option<ServiceRequest>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REQUESTS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All requests of a tenant, any status, unordered
    pub fn list_requests(&self, company_slug: &str) -> StorageResult<Vec<ServiceRequest>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REQUESTS_TABLE)?;

        let mut requests = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let request: ServiceRequest = serde_json::from_slice(value.value())?;
            if request.company_slug == company_slug {
                requests.push(request);
            }
        }
        Ok(requests)
    }

    /// Complete an active request of the tenant at `now_millis`.
    ///
    /// Returns `None` when the request is missing, belongs to another tenant
    /// or is already completed.
    pub fn complete_request(
        &self,
        id: &str,
        company_slug: &str,
        now_millis: i64,
    ) -> StorageResult<Option<ServiceRequest>> {
        let txn = self.db.begin_write()?;
        let completed = {
            let mut table = txn.open_table(REQUESTS_TABLE)?;
            let current: Option<ServiceRequest> = match table.get(id)? {
                Some(value) => Some(serde_json::from_slice(value.value())?),
                None => None,
            };
            match current {
                Some(mut request) if request.company_slug == company_slug => {
                    if request.complete(now_millis) {
                        let value = serde_json::to_vec(&request)?;
                        table.insert(id, value.as_slice())?;
                        Some(request)
                    } else {
                        None
                    }
                }
                _ => None,
            }
        };
        txn.commit()?;
        Ok(completed)
    }

    /// Hard-delete a tenant's request in any status. Returns whether a row was removed.
    pub fn delete_request(&self, id: &str, company_slug: &str) -> StorageResult<bool> {
        self.remove_request_if(id, |r| r.company_slug == company_slug)
    }

    /// Hard-delete a request only while it is still active
    pub fn delete_active_request(&self, id: &str) -> StorageResult<bool> {
        self.remove_request_if(id, ServiceRequest::is_active)
    }

    fn remove_request_if(
        &self,
        id: &str,
        predicate: impl Fn(&ServiceRequest) -> bool,
    ) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(REQUESTS_TABLE)?;
            let current: Option<ServiceRequest> = match table.get(id)? {
                Some(value) => Some(serde_json::from_slice(value.value())?),
                None => None,
            };
            match current {
                Some(request) if predicate(&request) => {
                    table.remove(id)?;
                    true
                }
                _ => false,
            }
        };
        txn.commit()?;
        Ok(removed)
    }
}
