use crate::cli::utils::output_success;
use crate::cli::{connect, OutputFormat};
use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = connect(config)?;
    DatabaseManager::migrate(&pool).await?;
    DatabaseManager::close(&pool).await;

    output_success(output_format, "Database migrations applied", None)
}
