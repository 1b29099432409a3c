use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Salons are provisioned outside this service; only read here
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS salons (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            slug VARCHAR(255) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            timezone VARCHAR(64) NOT NULL DEFAULT 'UTC',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One rule per weekday per salon
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS business_hours (
            salon_id UUID NOT NULL REFERENCES salons(id) ON DELETE CASCADE,
            weekday SMALLINT NOT NULL,
            open_time TIME NOT NULL,
            close_time TIME NOT NULL,
            is_closed BOOLEAN NOT NULL DEFAULT FALSE,
            PRIMARY KEY (salon_id, weekday),
            CONSTRAINT valid_weekday CHECK (weekday BETWEEN 0 AND 6),
            CONSTRAINT valid_hours CHECK (is_closed OR close_time > open_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            salon_id UUID NOT NULL REFERENCES salons(id) ON DELETE CASCADE,
            reservation_date DATE NOT NULL,
            start_time TIME NOT NULL,
            duration_minutes INTEGER NOT NULL,
            customer_name VARCHAR(255) NOT NULL,
            customer_phone VARCHAR(64) NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'confirmed',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_duration CHECK (duration_minutes > 0),
            CONSTRAINT valid_status CHECK (status IN ('confirmed', 'cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // At most one active booking may start at a given salon, date and time
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS uq_reservations_active_slot
            ON reservations (salon_id, reservation_date, start_time)
            WHERE status <> 'cancelled';
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_reservations_salon_date
            ON reservations (salon_id, reservation_date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
