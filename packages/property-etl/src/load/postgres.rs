//! PostgreSQL sink for the `properties_data` table.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, warn};

use crate::error::{EtlError, Result};
use crate::traits::sink::PropertySink;
use crate::types::{CleanedRecord, CLEANED_COLUMNS};

/// Width of every text column.
pub const TEXT_WIDTH: usize = 255;

/// Rows per INSERT statement (10 binds each, well under the 65535 limit).
const INSERT_BATCH: usize = 1000;

pub struct PostgresSink {
    pool: PgPool,
    table: String,
}

impl PostgresSink {
    pub async fn connect(database_url: &str, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        if !is_identifier(&table) {
            return Err(EtlError::InvalidTableName(table));
        }
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool, table })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn create_table_sql(&self) -> String {
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                purpose VARCHAR(255),
                address VARCHAR(255),
                region VARCHAR(255),
                size_m2 INTEGER,
                design VARCHAR(255),
                price_czk INTEGER,
                price_per_m2 INTEGER,
                link VARCHAR(255),
                dump_date VARCHAR(255),
                file_name VARCHAR(255)
            )
            "#,
            self.table
        )
    }
}

/// A cleaned record coerced to the column types.
struct Row {
    purpose: String,
    address: String,
    region: String,
    size_m2: i32,
    design: Option<String>,
    price_czk: i32,
    price_per_m2: Option<i32>,
    link: String,
    dump_date: String,
    file_name: String,
}

impl Row {
    fn from_record(r: &CleanedRecord, truncated: &mut usize) -> Result<Self> {
        let mut text = |s: &str| {
            let (capped, cut) = cap_width(s);
            *truncated += usize::from(cut);
            capped
        };
        Ok(Self {
            purpose: text(&r.purpose),
            address: text(&r.address),
            region: text(r.region.name()),
            size_m2: to_integer("size_m2", r.size_m2)?,
            design: r.design.as_deref().map(&mut text),
            price_czk: to_integer("price_czk", r.price_czk)?,
            price_per_m2: r
                .price_per_m2
                .map(|v| to_integer("price_per_m2", v))
                .transpose()?,
            link: text(&r.link),
            dump_date: text(&r.dump_date),
            file_name: text(&r.file_name),
        })
    }
}

#[async_trait]
impl PropertySink for PostgresSink {
    async fn ensure_table(&self) -> Result<()> {
        sqlx::query(&self.create_table_sql())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn append(&self, records: &[CleanedRecord]) -> Result<usize> {
        let mut truncated = 0usize;
        let rows = records
            .iter()
            .map(|r| Row::from_record(r, &mut truncated))
            .collect::<Result<Vec<_>>>()?;
        if truncated > 0 {
            warn!(truncated, width = TEXT_WIDTH, "Truncated over-long text values");
        }

        let mut tx = self.pool.begin().await?;
        for chunk in rows.chunks(INSERT_BATCH) {
            let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
                "INSERT INTO {} ({}) ",
                self.table,
                CLEANED_COLUMNS.join(", ")
            ));
            qb.push_values(chunk, |mut b, row| {
                b.push_bind(row.purpose.clone())
                    .push_bind(row.address.clone())
                    .push_bind(row.region.clone())
                    .push_bind(row.size_m2)
                    .push_bind(row.design.clone())
                    .push_bind(row.price_czk)
                    .push_bind(row.price_per_m2)
                    .push_bind(row.link.clone())
                    .push_bind(row.dump_date.clone())
                    .push_bind(row.file_name.clone());
            });
            qb.build().execute(&mut *tx).await?;
            debug!(rows = chunk.len(), table = %self.table, "Inserted batch");
        }
        tx.commit().await?;

        Ok(rows.len())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn cap_width(s: &str) -> (String, bool) {
    match s.char_indices().nth(TEXT_WIDTH) {
        Some((idx, _)) => (s[..idx].to_string(), true),
        None => (s.to_string(), false),
    }
}

fn to_integer(column: &'static str, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| EtlError::ValueOutOfRange { column, value })
}
