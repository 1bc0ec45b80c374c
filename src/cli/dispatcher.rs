use crate::cli::command_handlers::{ConfigHandler, DataSourceHandler, GroupHandler, UserHandler};
use crate::cli::main_types::Commands;
use redash_admin::api::client::RedashClient;
use redash_admin::core::services::config_service::ConfigService;
use redash_admin::error::{AppError, CliError};
use redash_admin::storage::config::Config;
use redash_admin::storage::credentials::{API_KEY_VAR, get_api_key};
use redash_admin::utils::logging::VerboseLogger;
use redash_admin::utils::validation::{validate_api_key, validate_url};
use std::path::PathBuf;
use std::sync::Arc;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    logger: VerboseLogger,
    api_key: Option<String>,
    host: Option<String>,
}

impl Dispatcher {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        verbose: bool,
        api_key: Option<String>,
        host: Option<String>,
    ) -> Self {
        Self {
            config,
            config_path,
            logger: VerboseLogger::new(verbose),
            api_key,
            host,
        }
    }

    // Get effective API key (CLI arg > env var)
    fn get_effective_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        get_api_key()
    }

    // Get URL (CLI arg > config > env var > default)
    fn get_url(&self) -> String {
        self.host
            .clone()
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| self.config.effective_url())
    }

    fn create_client(&self) -> Result<Arc<RedashClient>, AppError> {
        let api_key = self.get_effective_api_key().ok_or_else(|| {
            AppError::Cli(CliError::AuthRequired {
                message: format!("{} is not set", API_KEY_VAR),
                hint: format!(
                    "Set {} or pass --api-key; keys are listed on the Redash user profile page",
                    API_KEY_VAR
                ),
            })
        })?;
        validate_api_key(&api_key)?;

        let url = self.get_url();
        validate_url(&url)?;

        self.logger.log(&format!("Connecting to {}", url));
        let client = match self.config.timeout() {
            Some(timeout) => RedashClient::with_timeout(url, api_key, timeout)?,
            None => RedashClient::new(url, api_key)?,
        };
        Ok(Arc::new(client))
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        let verbose = self.logger.is_enabled();
        match command {
            Commands::Config { command } => {
                let mut config_service =
                    ConfigService::new(self.config.clone(), self.config_path.clone());
                ConfigHandler::new().handle(command, &mut config_service, verbose)
            }
            Commands::DataSource { command } => {
                let handler = DataSourceHandler::new(self.create_client()?);
                handler.handle(command, verbose).await
            }
            Commands::User { command } => {
                let handler = UserHandler::new(self.create_client()?);
                handler.handle(command, verbose).await
            }
            Commands::Group { command } => {
                let handler = GroupHandler::new(self.create_client()?);
                handler.handle(command, verbose).await
            }
        }
    }
}
