pub mod member_service;

use std::sync::Arc;
use crate::db::DbPool;
pub use member_service::MemberService;

pub struct ServiceContext {
    pub member_service: Arc<MemberService>,
    pub db_pool: DbPool,
}

impl ServiceContext {
    pub fn new(db_pool: DbPool, empty_list_is_error: bool) -> Self {
        let member_service = Arc::new(MemberService::new(
            db_pool.member_repository(),
            empty_list_is_error,
        ));

        Self {
            member_service,
            db_pool,
        }
    }
}
