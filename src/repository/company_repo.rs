//! Company repository

use crate::{error::AppError, models::company::Company};
use sqlx::PgPool;

pub struct CompanyRepository {
    db: PgPool,
}

impl CompanyRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Find a company by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(company)
    }
}
