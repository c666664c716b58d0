use crate::clusterer::{summarize_with, ClusterSummary, ProfileTable};
use crate::customer::{generate_customers, Customer, Gender, NewCustomer, ValidationError};
use crate::store::{validate_dataset, CustomerStore, StoreError};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Provenance of the stored dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetMeta {
    pub seed: Option<u64>,
    pub generated_at: String,
}

/// Customers and cluster summaries persisted in SQLite
pub struct SqliteStore {
    conn: Mutex<Connection>,
    profiles: ProfileTable,
}

impl SqliteStore {
    /// Create a new in-memory database
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        Self::from_connection(conn)
    }

    /// Open (or create) a database file
    pub fn open(path: &str) -> Result<Self> {
        let conn =
            Connection::open(path).context(format!("Failed to open database at {}", path))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
            profiles: ProfileTable::segments(),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Storage("database connection lock poisoned".to_string()))
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.lock().map_err(anyhow::Error::from)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                id INTEGER PRIMARY KEY,
                customer_id INTEGER NOT NULL,
                gender TEXT NOT NULL,
                age INTEGER NOT NULL,
                annual_income REAL NOT NULL,
                spending_score REAL NOT NULL,
                cluster INTEGER
            );

            CREATE TABLE IF NOT EXISTS cluster_analysis (
                id INTEGER PRIMARY KEY,
                cluster INTEGER NOT NULL UNIQUE,
                avg_age REAL NOT NULL,
                avg_income REAL NOT NULL,
                avg_spending REAL NOT NULL,
                size INTEGER NOT NULL,
                color TEXT NOT NULL,
                label TEXT NOT NULL,
                description TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS dataset_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_customers_cluster ON customers(cluster);
            "#,
        )
        .context("Failed to initialize database schema")?;
        Ok(())
    }

    /// Replace the stored dataset with `customers` and their summaries
    pub fn load_dataset(&self, customers: &[Customer], seed: Option<u64>) -> Result<()> {
        validate_dataset(customers, &self.profiles).context("Rejected dataset")?;
        let summaries = summarize_with(customers, &self.profiles);
        let mut conn = self.lock().map_err(anyhow::Error::from)?;
        let tx = conn.transaction().context("Failed to begin transaction")?;

        tx.execute_batch("DELETE FROM customers; DELETE FROM cluster_analysis; DELETE FROM dataset_meta;")
            .context("Failed to clear existing dataset")?;

        for c in customers {
            insert_customer(&tx, c)
                .context(format!("Failed to insert customer: {}", c.id))?;
        }

        for s in &summaries {
            tx.execute(
                "INSERT INTO cluster_analysis (id, cluster, avg_age, avg_income, avg_spending, size, color, label, description) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    s.id,
                    s.cluster,
                    s.avg_age,
                    s.avg_income,
                    s.avg_spending,
                    s.size,
                    s.color,
                    s.label,
                    s.description
                ],
            )
            .context(format!("Failed to insert summary for cluster: {}", s.cluster))?;
        }

        tx.execute(
            "INSERT INTO dataset_meta (key, value) VALUES ('generated_at', ?1)",
            params![Utc::now().to_rfc3339()],
        )
        .context("Failed to record dataset timestamp")?;
        if let Some(seed) = seed {
            tx.execute(
                "INSERT INTO dataset_meta (key, value) VALUES ('seed', ?1)",
                params![seed.to_string()],
            )
            .context("Failed to record dataset seed")?;
        }

        tx.commit().context("Failed to commit dataset")?;
        info!(customers = customers.len(), clusters = summaries.len(), "dataset loaded into sqlite");
        Ok(())
    }

    /// Open `path` and fill it with the generated dataset when it holds none
    pub fn open_seeded(path: &str, seed: u64) -> Result<Self> {
        let store = Self::open(path)?;
        if store.customer_count()? == 0 {
            store.load_dataset(&generate_customers(seed), Some(seed))?;
        }
        Ok(store)
    }

    pub fn customer_count(&self) -> Result<u32> {
        let conn = self.lock().map_err(anyhow::Error::from)?;
        let count: u32 = conn
            .query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))
            .context("Failed to count customers")?;
        Ok(count)
    }

    pub fn meta(&self) -> Result<Option<DatasetMeta>> {
        let conn = self.lock().map_err(anyhow::Error::from)?;
        let mut stmt = conn
            .prepare("SELECT key, value FROM dataset_meta")
            .context("Failed to prepare statement")?;
        let pairs = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .context("Failed to query dataset meta")?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to collect dataset meta")?;

        let mut generated_at = None;
        let mut seed = None;
        for (key, value) in pairs {
            match key.as_str() {
                "generated_at" => generated_at = Some(value),
                "seed" => seed = value.parse().ok(),
                _ => {}
            }
        }

        Ok(generated_at.map(|generated_at| DatasetMeta { seed, generated_at }))
    }

    /// Save database to file
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        // VACUUM INTO refuses to overwrite an existing file.
        let _ = std::fs::remove_file(path);
        let safe_path = path.replace('\'', "''");
        let sql = format!("VACUUM INTO '{}'", safe_path);
        let conn = self.lock().map_err(anyhow::Error::from)?;
        conn.execute_batch(&sql)
            .context(format!("Failed to save database to {}", path))?;
        Ok(())
    }
}

fn insert_customer(conn: &Connection, c: &Customer) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO customers (id, customer_id, gender, age, annual_income, spending_score, cluster) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            c.id,
            c.customer_id,
            c.gender.as_str(),
            c.age,
            c.annual_income,
            c.spending_score,
            c.cluster
        ],
    )
}

fn gender_from_sql(raw: String, idx: usize) -> rusqlite::Result<Gender> {
    raw.parse::<Gender>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

impl CustomerStore for SqliteStore {
    fn all_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, customer_id, gender, age, annual_income, spending_score, cluster FROM customers ORDER BY id",
        )?;

        let customers = stmt
            .query_map([], |row| {
                Ok(Customer {
                    id: row.get(0)?,
                    customer_id: row.get(1)?,
                    gender: gender_from_sql(row.get(2)?, 2)?,
                    age: row.get(3)?,
                    annual_income: row.get(4)?,
                    spending_score: row.get(5)?,
                    cluster: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(customers)
    }

    fn create_customer(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        customer.validate()?;
        if let Some(cluster) = customer.cluster {
            if !self.profiles.contains(cluster) {
                return Err(ValidationError::UnknownCluster(cluster).into());
            }
        }

        let conn = self.lock()?;
        let id: u32 = conn.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM customers", [], |row| {
            row.get(0)
        })?;
        let created = customer.with_id(id);
        insert_customer(&conn, &created)?;
        debug!(id, "customer created");
        Ok(created)
    }

    fn cluster_summaries(&self) -> Result<Vec<ClusterSummary>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, cluster, avg_age, avg_income, avg_spending, size, color, label, description FROM cluster_analysis ORDER BY cluster",
        )?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(ClusterSummary {
                    id: row.get(0)?,
                    cluster: row.get(1)?,
                    avg_age: row.get(2)?,
                    avg_income: row.get(3)?,
                    avg_spending: row.get(4)?,
                    size: row.get(5)?,
                    color: row.get(6)?,
                    label: row.get(7)?,
                    description: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(summaries)
    }
}
