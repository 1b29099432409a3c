use crate::models::DbBusinessHours;
use eyre::Result;
use salonbook_core::models::hours::WeeklyHours;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_hours_by_salon_id(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
) -> Result<Vec<DbBusinessHours>> {
    let hours = sqlx::query_as::<_, DbBusinessHours>(
        r#"
        SELECT salon_id, weekday, open_time, close_time, is_closed
        FROM business_hours
        WHERE salon_id = $1
        ORDER BY weekday ASC
        "#,
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;

    Ok(hours)
}

/// Deletes and rewrites every rule of a salon inside one transaction.
pub async fn replace_hours(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    rules: &[WeeklyHours],
) -> Result<Vec<DbBusinessHours>> {
    tracing::debug!("Replacing business hours: salon_id={}, rules={}", salon_id, rules.len());

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM business_hours
        WHERE salon_id = $1
        "#,
    )
    .bind(salon_id)
    .execute(&mut *tx)
    .await?;

    let mut stored = Vec::with_capacity(rules.len());
    for rule in rules {
        let row = sqlx::query_as::<_, DbBusinessHours>(
            r#"
            INSERT INTO business_hours (salon_id, weekday, open_time, close_time, is_closed)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING salon_id, weekday, open_time, close_time, is_closed
            "#,
        )
        .bind(salon_id)
        .bind(i16::from(rule.weekday))
        .bind(rule.open_time)
        .bind(rule.close_time)
        .bind(rule.is_closed)
        .fetch_one(&mut *tx)
        .await?;
        stored.push(row);
    }

    tx.commit().await?;

    stored.sort_by_key(|row| row.weekday);
    Ok(stored)
}
