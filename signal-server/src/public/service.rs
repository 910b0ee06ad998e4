use std::sync::Arc;

use shared::models::{PublicRequestCreate, PublicRequestCreated, ServiceRequest};

use super::{PublicRequestError, RateKey, RateLimit};
use crate::db::Storage;
use crate::security_log;
use crate::settings::{SettingsService, normalize_slug};
use crate::utils::Clock;

/// Guest create / cancel
#[derive(Clone)]
pub struct PublicRequestService {
    storage: Storage,
    settings: SettingsService,
    limiter: Arc<dyn RateLimit>,
    clock: Arc<dyn Clock>,
}

impl PublicRequestService {
    pub fn new(
        storage: Storage,
        settings: SettingsService,
        limiter: Arc<dyn RateLimit>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            settings,
            limiter,
            clock,
        }
    }

    /// Raise a request from the guest page.
    ///
    /// Order of checks: slug shape, rate limit, tenant and table, request
    /// type. A rejected call never writes to storage.
    pub fn create(
        &self,
        company_slug: &str,
        client_ip: &str,
        input: PublicRequestCreate,
    ) -> Result<PublicRequestCreated, PublicRequestError> {
        let company_slug = normalize_slug(company_slug)
            .map_err(|_| PublicRequestError::InvalidTable(input.table_number))?;
        let key = RateKey::new(client_ip, company_slug.as_str(), input.table_number);
        if !self.limiter.check_and_increment(&key) {
            security_log!(
                "WARN",
                "public_rate_limited",
                client_ip = client_ip.to_string(),
                company_slug = company_slug.clone(),
                table = input.table_number
            );
            return Err(PublicRequestError::RateLimited);
        }

        let Some(settings) = self
            .settings
            .resolve(&company_slug)?
            .filter(|s| s.has_table(input.table_number))
        else {
            return Err(PublicRequestError::InvalidTable(input.table_number));
        };
        if !settings.has_request_type(&input.request_type) {
            return Err(PublicRequestError::InvalidRequestType(input.request_type));
        }

        let request = ServiceRequest::new_active(
            shared::util::new_id(),
            settings.company_slug,
            input.table_number,
            input.request_type,
            self.clock.now_millis(),
            None,
        );
        if let Err(e) = self.storage.insert_request(&request) {
            tracing::error!(
                company_slug = %request.company_slug,
                table = request.table_number,
                error = %e,
                "Failed to store guest request"
            );
            return Err(e.into());
        }

        tracing::info!(
            request_id = %request.id,
            company_slug = %request.company_slug,
            table = request.table_number,
            request_type = %request.request_type,
            "Guest request created"
        );
        Ok(PublicRequestCreated {
            request_id: request.id,
        })
    }

    /// Withdraw a guest request while it is still active.
    ///
    /// Completed, deleted and unknown ids all fail the same way, so a second
    /// cancel is harmless.
    pub fn cancel(&self, request_id: &str) -> Result<(), PublicRequestError> {
        if !self.storage.delete_active_request(request_id)? {
            return Err(PublicRequestError::NotCancelable(request_id.to_string()));
        }
        tracing::info!(request_id = %request_id, "Guest request canceled");
        Ok(())
    }
}
