use serde_json::json;

use crate::cli::utils::{output_error, output_success};
use crate::cli::{connect, OutputFormat};
use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = connect(config)?;
    let result = DatabaseManager::health_check(&pool).await;
    DatabaseManager::close(&pool).await;

    match result {
        Ok(()) => output_success(
            output_format,
            "Database reachable",
            Some(json!({ "environment": format!("{:?}", config.environment) })),
        ),
        Err(e) => {
            output_error(output_format, &format!("Database unreachable: {}", e))?;
            anyhow::bail!("health check failed")
        }
    }
}
