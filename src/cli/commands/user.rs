use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::{connect, OutputFormat};
use crate::config::AppConfig;
use crate::services::{NewUser, UserService};
use crate::types::{RecordStatus, Role};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create an active ADMIN account")]
    CreateAdmin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long, help = "Mobile number, unique across users")]
        mobile: String,
    },
}

pub async fn handle(cmd: UserCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::CreateAdmin {
            email,
            password,
            first_name,
            last_name,
            mobile,
        } => {
            if password.len() < 8 {
                anyhow::bail!("password must be at least 8 characters");
            }

            let pool = connect(config)?;
            let result = UserService::new(&pool)
                .create(NewUser {
                    email,
                    password,
                    role: Role::Admin,
                    first_name,
                    last_name,
                    mobile_number: mobile,
                    employee_id: None,
                    status: RecordStatus::Active,
                })
                .await;
            pool.close().await;

            let user = result?;
            output_success(
                output_format,
                &format!("Created admin {}", user.email),
                Some(json!({ "id": user.id, "email": user.email })),
            )
        }
    }
}
