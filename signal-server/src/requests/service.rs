use std::sync::Arc;

use shared::models::{RequestInsights, RequestRange, ServiceRequest, ServiceRequestCreate};

use super::{RequestError, compute_insights};
use crate::db::Storage;
use crate::settings::SettingsService;
use crate::status::{self, TableStatusView};
use crate::utils::Clock;

/// Staff request operations, scoped to the principal's tenant
#[derive(Clone)]
pub struct RequestService {
    storage: Storage,
    settings: SettingsService,
    clock: Arc<dyn Clock>,
}

impl RequestService {
    pub fn new(storage: Storage, settings: SettingsService, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            settings,
            clock,
        }
    }

    /// Raise a request on behalf of a staff member
    pub fn create(
        &self,
        owner_id: &str,
        input: ServiceRequestCreate,
    ) -> Result<ServiceRequest, RequestError> {
        let settings = self.settings.for_owner(owner_id)?;
        if !settings.has_table(input.table_number) {
            return Err(RequestError::InvalidTable(input.table_number));
        }
        if !settings.has_request_type(&input.request_type) {
            return Err(RequestError::InvalidRequestType(input.request_type));
        }

        let request = ServiceRequest::new_active(
            shared::util::new_id(),
            settings.company_slug,
            input.table_number,
            input.request_type,
            self.clock.now_millis(),
            Some(owner_id.to_string()),
        );
        self.storage.insert_request(&request)?;

        tracing::info!(
            request_id = %request.id,
            table = request.table_number,
            request_type = %request.request_type,
            "Service request created by staff"
        );
        Ok(request)
    }

    /// Active requests, newest first
    pub fn list_active(&self, owner_id: &str) -> Result<Vec<ServiceRequest>, RequestError> {
        let mut requests = self.tenant_requests(owner_id)?;
        requests.retain(ServiceRequest::is_active);
        sort_newest_created(&mut requests);
        Ok(requests)
    }

    /// Completed requests created inside `range`, newest first
    pub fn list_completed(
        &self,
        owner_id: &str,
        range: RequestRange,
    ) -> Result<Vec<ServiceRequest>, RequestError> {
        let mut requests = self.completed_in(owner_id, range)?;
        sort_newest_created(&mut requests);
        Ok(requests)
    }

    /// Every request of the tenant, newest first
    pub fn list_all(&self, owner_id: &str) -> Result<Vec<ServiceRequest>, RequestError> {
        let mut requests = self.tenant_requests(owner_id)?;
        sort_newest_created(&mut requests);
        Ok(requests)
    }

    /// Complete an active request; the elapsed time comes from the server clock
    pub fn complete(&self, owner_id: &str, id: &str) -> Result<ServiceRequest, RequestError> {
        let slug = self.settings.for_owner(owner_id)?.company_slug;
        let completed = self
            .storage
            .complete_request(id, &slug, self.clock.now_millis())?
            .ok_or_else(|| RequestError::NotFound(id.to_string()))?;

        tracing::info!(
            request_id = %completed.id,
            elapsed_secs = completed.elapsed_time.unwrap_or(0),
            "Service request completed"
        );
        Ok(completed)
    }

    /// Hard delete in any status
    pub fn delete(&self, owner_id: &str, id: &str) -> Result<(), RequestError> {
        let slug = self.settings.for_owner(owner_id)?.company_slug;
        if !self.storage.delete_request(id, &slug)? {
            return Err(RequestError::NotFound(id.to_string()));
        }
        tracing::info!(request_id = %id, "Service request deleted");
        Ok(())
    }

    /// Completed requests ordered by completion time, newest first
    pub fn history(
        &self,
        owner_id: &str,
        range: RequestRange,
    ) -> Result<Vec<ServiceRequest>, RequestError> {
        let mut requests = self.completed_in(owner_id, range)?;
        requests.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(requests)
    }

    pub fn insights(
        &self,
        owner_id: &str,
        range: RequestRange,
    ) -> Result<RequestInsights, RequestError> {
        let requests = self.completed_in(owner_id, range)?;
        Ok(compute_insights(&requests))
    }

    /// Aggregate status of every configured table
    pub fn floor_status(&self, owner_id: &str) -> Result<Vec<TableStatusView>, RequestError> {
        let settings = self.settings.for_owner(owner_id)?;
        let requests = self.storage.list_requests(&settings.company_slug)?;
        Ok(status::floor_status(
            &settings,
            &requests,
            self.clock.now_millis(),
        ))
    }

    fn tenant_requests(&self, owner_id: &str) -> Result<Vec<ServiceRequest>, RequestError> {
        let slug = self.settings.for_owner(owner_id)?.company_slug;
        Ok(self.storage.list_requests(&slug)?)
    }

    fn completed_in(
        &self,
        owner_id: &str,
        range: RequestRange,
    ) -> Result<Vec<ServiceRequest>, RequestError> {
        let mut requests = self.tenant_requests(owner_id)?;
        requests.retain(|r| !r.is_active() && range.contains(r.created_at));
        Ok(requests)
    }
}

fn sort_newest_created(requests: &mut [ServiceRequest]) {
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
