//! Route table and shared state.
//!
//! `main` and the HTTP test suites build the app the same way:
//!
//! ```ignore
//! let state = AppState::in_memory(MemoryStore::new());
//! App::new().configure(|cfg| state.configure(cfg))
//! ```

use std::sync::Arc;

use actix_web::web;
use sqlx::MySqlPool;

use crate::middleware::{configure_extractors, not_found};
use crate::modules::health::{self, DatabaseProbe};
use crate::modules::items::{self, ItemService};
use crate::modules::math::{self, MathService};
use crate::modules::users::{self, UserService};
use crate::unit_of_work::{MemoryStore, MySqlUnitOfWorkFactory, UnitOfWorkFactory};

/// Services shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub items: Arc<ItemService>,
    pub math: Arc<MathService>,
    pub probe: Arc<dyn DatabaseProbe>,
}

impl AppState {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>, probe: Arc<dyn DatabaseProbe>) -> Self {
        Self {
            users: Arc::new(UserService::new(uow.clone())),
            items: Arc::new(ItemService::new(uow)),
            math: Arc::new(MathService::new()),
            probe,
        }
    }

    pub fn mysql(pool: MySqlPool) -> Self {
        Self::new(
            Arc::new(MySqlUnitOfWorkFactory::new(pool.clone())),
            Arc::new(pool),
        )
    }

    pub fn in_memory(store: MemoryStore) -> Self {
        Self::new(Arc::new(store.clone()), Arc::new(store))
    }

    /// Register state, extractor configs and every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.users.clone()))
            .app_data(web::Data::new(self.items.clone()))
            .app_data(web::Data::new(self.math.clone()))
            .app_data(web::Data::new(self.probe.clone()));

        configure_extractors(cfg);
        routes(cfg);
        cfg.default_service(web::to(not_found));
    }
}

/// `/health`, `/test-db`, `/api/v1/...` and `/api/v2/...`
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .service(
            web::scope("/api/v1")
                .configure(users::controllers::v1::configure)
                .configure(items::controllers::v1::configure)
                .configure(math::controllers::v1::configure),
        )
        .service(
            web::scope("/api/v2")
                .configure(users::controllers::v2::configure)
                .configure(items::controllers::v2::configure)
                .configure(math::controllers::v2::configure),
        );
}
