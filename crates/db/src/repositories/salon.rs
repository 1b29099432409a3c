use crate::models::DbSalon;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_salon_by_slug(pool: &Pool<Postgres>, slug: &str) -> Result<Option<DbSalon>> {
    tracing::debug!("Getting salon by slug: {}", slug);

    let salon = sqlx::query_as::<_, DbSalon>(
        r#"
        SELECT id, slug, name, timezone, created_at
        FROM salons
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    if salon.is_none() {
        tracing::debug!("Salon not found: slug={}", slug);
    }

    Ok(salon)
}
