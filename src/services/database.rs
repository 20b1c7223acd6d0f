use crate::config::Config;
use crate::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::{Response, Surreal};
use tracing::{debug, error, info};

/// Document store access, a thin wrapper around the SurrealDB client.
///
/// The connection string selects the engine: `http://` for a remote server,
/// `mem://` for the embedded in-memory store used by the test suite.
#[derive(Clone)]
pub struct Database {
    client: Surreal<Any>,
}

impl Database {
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Initializing database connection to {}", config.database_url);

        let client = connect(config.database_url.as_str()).await?;

        // Embedded engines have no authentication layer to sign in to.
        if !config.database_url.starts_with("mem:") {
            client
                .signin(Root {
                    username: &config.database_username,
                    password: &config.database_password,
                })
                .await?;
        }

        client
            .use_ns(config.database_namespace.as_str())
            .use_db(config.database_name.as_str())
            .await?;

        Ok(Self { client })
    }

    /// Verify the connection with a trivial query.
    pub async fn verify_connection(&self) -> Result<()> {
        match self.client.query("INFO FOR DB").await {
            Ok(_) => {
                info!("Database connection verified successfully");
                Ok(())
            }
            Err(e) => {
                error!("Failed to verify database connection: {}", e);
                Err(AppError::Database(e))
            }
        }
    }

    /// Execute a query with bound parameters.
    pub async fn query_with_params<P>(&self, sql: &str, params: P) -> Result<Response>
    where
        P: Serialize,
    {
        self.client
            .query(sql)
            .bind(params)
            .await
            .map_err(AppError::Database)
    }

    /// Create a record under an explicit id. Any `id` key inside the content
    /// is dropped: the record id is carried by `type::thing`, not the body.
    pub async fn create_with_id(
        &self,
        table: &str,
        id: &str,
        mut data: serde_json::Value,
    ) -> Result<()> {
        if let Some(object) = data.as_object_mut() {
            object.remove("id");
        }

        debug!("Creating {} record: {}", table, id);

        let mut response = self
            .query_with_params(
                "CREATE type::thing($tb, $id) CONTENT $data",
                json!({ "tb": table, "id": id, "data": data }),
            )
            .await?;
        let _created: Vec<serde_json::Value> = response.take(0)?;

        Ok(())
    }

    /// Fetch a single record by id. Accepts either the bare id or the
    /// `table:id` record form.
    pub async fn get_by_id<T>(&self, table: &str, id: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let prefix = format!("{}:", table);
        let pure_id = id.strip_prefix(&prefix).unwrap_or(id);

        let mut response = self
            .query_with_params(
                "SELECT *, meta::id(id) AS id FROM type::thing($tb, $id)",
                json!({ "tb": table, "id": pure_id }),
            )
            .await?;
        let results: Vec<T> = response.take(0)?;

        Ok(results.into_iter().next())
    }

    /// Fetch every record of a table, in store-native order.
    pub async fn select_all<T>(&self, table: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut response = self
            .query_with_params(
                "SELECT *, meta::id(id) AS id FROM type::table($tb)",
                json!({ "tb": table }),
            )
            .await?;

        Ok(response.take(0)?)
    }
}
