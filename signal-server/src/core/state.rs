use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::Storage;
use crate::layout::LayoutService;
use crate::menu::MenuService;
use crate::orders::{OrderService, OrderSubmitter};
use crate::public::{FixedWindowLimiter, PublicRequestService};
use crate::requests::RequestService;
use crate::settings::SettingsService;
use crate::utils::{Clock, SystemClock};

/// Shared server state
///
/// Every field is a cheap handle (`Arc` inside), so the state is cloned into
/// each handler.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | storage | redb database handle |
/// | clock | time source shared by all services |
/// | jwt_service | staff token validation |
/// | rate_limiter | guest creation limiter, swept by a background task |
/// | settings / layout / requests / public / menu / orders / submitter | domain services |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub storage: Storage,
    pub clock: Arc<dyn Clock>,
    pub jwt_service: Arc<JwtService>,
    pub rate_limiter: Arc<FixedWindowLimiter>,
    pub settings: SettingsService,
    pub layout: LayoutService,
    pub requests: RequestService,
    pub public: PublicRequestService,
    pub menu: MenuService,
    pub orders: OrderService,
    pub submitter: OrderSubmitter,
}

impl ServerState {
    /// Wire every service over the given storage and clock
    pub fn new(config: Config, storage: Storage, clock: Arc<dyn Clock>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let rate_limiter = Arc::new(FixedWindowLimiter::new(
            clock.clone(),
            config.public_rate_limit_max,
            config.public_rate_limit_window_secs,
        ));

        let settings = SettingsService::new(
            storage.clone(),
            clock.clone(),
            config.default_company_slug.clone(),
        );
        let layout = LayoutService::new(storage.clone(), clock.clone());
        let requests = RequestService::new(storage.clone(), settings.clone(), clock.clone());
        let public = PublicRequestService::new(
            storage.clone(),
            settings.clone(),
            rate_limiter.clone(),
            clock.clone(),
        );
        let menu = MenuService::new(storage.clone(), settings.clone(), clock.clone());
        let orders = OrderService::new(storage.clone(), settings.clone(), clock.clone());
        let submitter = OrderSubmitter::new(storage.clone(), settings.clone(), clock.clone());

        Self {
            config,
            storage,
            clock,
            jwt_service,
            rate_limiter,
            settings,
            layout,
            requests,
            public,
            menu,
            orders,
            submitter,
        }
    }

    /// Open the on-disk database under the work dir and build the state
    pub fn initialize(config: &Config) -> Result<Self> {
        config.validate()?;
        config.ensure_work_dir()?;
        let db_path = config.database_path();
        let storage = Storage::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Database opened");

        Ok(Self::new(config.clone(), storage, Arc::new(SystemClock)))
    }

    /// Periodically drop expired rate-limit windows
    pub fn start_background_tasks(&self) {
        let limiter = self.rate_limiter.clone();
        let period = std::time::Duration::from_secs(self.config.rate_limit_cleanup_secs.max(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = limiter.cleanup();
                if removed > 0 {
                    tracing::debug!(removed, "Expired rate-limit windows swept");
                }
            }
        });
    }
}
