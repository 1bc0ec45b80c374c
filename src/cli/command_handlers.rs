use crate::cli::main_types::{
    ConfigCommands, DataSourceArgs, DataSourceCommands, GroupCommands, UserCommands,
};
use redash_admin::Outcome;
use redash_admin::api::client::RedashClient;
use redash_admin::api::models::{DataSource, Group, User};
use redash_admin::api::transport::ApiResponse;
use redash_admin::core::services::config_service::ConfigService;
use redash_admin::core::services::data_source_service::DataSourceService;
use redash_admin::core::services::group_service::GroupService;
use redash_admin::core::services::membership_service::MembershipService;
use redash_admin::core::services::types::{ResourceKind, ServiceError, UserListParams};
use redash_admin::core::services::user_service::UserService;
use redash_admin::error::{AppError, CliError};
use redash_admin::storage::credentials::has_api_key;
use redash_admin::utils::input::parse_options;
use redash_admin::utils::logging::print_verbose;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// What an applied mutation reports on the command line.
trait Report {
    fn status(&self) -> u16 {
        200
    }
    fn body(&self) -> Value;
}

impl Report for ApiResponse {
    fn status(&self) -> u16 {
        self.status
    }
    fn body(&self) -> Value {
        self.body.clone()
    }
}

macro_rules! impl_report {
    ($($model:ty),*) => {
        $(impl Report for $model {
            fn body(&self) -> Value {
                serde_json::to_value(self).unwrap_or(Value::Null)
            }
        })*
    };
}

impl_report!(DataSource, User, Group);

fn outcome_json<T: Report>(outcome: &Outcome<T>) -> Value {
    let (status, body) = match outcome {
        Outcome::Applied(value) => (value.status(), value.body()),
        other => (
            other.synthesized_status().unwrap_or(200),
            other.synthesized_body().unwrap_or(Value::Null),
        ),
    };
    json!({
        "status": status,
        "outcome": outcome.label(),
        "synthesized": !outcome.is_applied(),
        "body": body,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to serialize result to JSON: {}",
            e
        )))
    })?;
    println!("{}", rendered);
    Ok(())
}

fn print_outcome<T: Report>(outcome: &Outcome<T>) -> Result<(), AppError> {
    print_json(&outcome_json(outcome))?;
    exit_status(outcome)
}

/// A name collision fails the command; other synthesized outcomes succeed.
fn exit_status<T>(outcome: &Outcome<T>) -> Result<(), AppError> {
    match outcome {
        Outcome::AlreadyExists(name) => Err(CliError::AlreadyExists(name.clone()).into()),
        _ => Ok(()),
    }
}

fn require<T>(found: Option<T>, kind: ResourceKind, name: &str) -> Result<T, AppError> {
    found.ok_or_else(|| {
        AppError::Service(ServiceError::EntityNotFound {
            kind,
            name: name.to_string(),
        })
    })
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        config_service: &mut ConfigService,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                let config = config_service.config();
                println!("Current Configuration:");
                println!("=====================");
                println!("File: {}", config_service.location()?.display());
                println!("URL: {}", config.effective_url());
                match config.timeout_secs {
                    Some(secs) => println!("Timeout: {}s", secs),
                    None => println!("Timeout: none"),
                }
                if has_api_key() {
                    println!("API Key: Set (REDASH_API_KEY)");
                } else {
                    println!("API Key: Not set");
                }
                Ok(())
            }
            ConfigCommands::Set { url, timeout } => {
                print_verbose(
                    verbose,
                    &format!("config set - url: {:?}, timeout: {:?}", url, timeout),
                );

                let mut updated_fields = Vec::new();
                if let Some(url_value) = url {
                    config_service.set_url(url_value.clone())?;
                    updated_fields.push(format!("URL to: {}", url_value));
                }
                if let Some(secs) = timeout {
                    config_service.set_timeout(secs)?;
                    updated_fields.push(format!("timeout to: {}s", secs));
                }

                if updated_fields.is_empty() {
                    return Err(AppError::Cli(CliError::InvalidArguments(
                        "No configuration values provided. Use --url and/or --timeout".to_string(),
                    )));
                }

                config_service.save()?;
                println!("Set {}", updated_fields.join(", "));
                Ok(())
            }
        }
    }
}

pub struct DataSourceHandler {
    service: DataSourceService<RedashClient>,
}

impl DataSourceHandler {
    pub fn new(client: Arc<RedashClient>) -> Self {
        Self {
            service: DataSourceService::new(client),
        }
    }

    pub async fn handle(&self, command: DataSourceCommands, verbose: bool) -> Result<(), AppError> {
        match command {
            DataSourceCommands::List => print_json(&self.service.list().await?),
            DataSourceCommands::Get { name } => {
                let found = self.service.get(&name).await?;
                print_json(&require(found, ResourceKind::DataSource, &name)?)
            }
            DataSourceCommands::Create(args) => {
                let DataSourceArgs {
                    kind,
                    name,
                    options,
                } = args;
                let options = parse_options(&options)?;
                print_verbose(
                    verbose,
                    &format!("Creating data source {} ({})", name, kind),
                );
                print_outcome(&self.service.create(&kind, &name, &options).await?)
            }
            DataSourceCommands::Upsert(args) => {
                let options = parse_options(&args.options)?;
                print_verbose(
                    verbose,
                    &format!("Upserting data source {} ({})", args.name, args.kind),
                );
                print_outcome(
                    &self
                        .service
                        .create_or_update(&args.kind, &args.name, &options)
                        .await?,
                )
            }
            DataSourceCommands::Delete { name } => {
                print_outcome(&self.service.delete(&name).await?)
            }
        }
    }
}

pub struct UserHandler {
    service: UserService<RedashClient>,
}

impl UserHandler {
    pub fn new(client: Arc<RedashClient>) -> Self {
        Self {
            service: UserService::new(client),
        }
    }

    pub async fn handle(&self, command: UserCommands, verbose: bool) -> Result<(), AppError> {
        match command {
            UserCommands::List {
                page_size,
                no_pending,
                order,
            } => {
                let params = UserListParams {
                    page_size,
                    include_pending: !no_pending,
                    sort_order: order,
                };
                print_verbose(verbose, &format!("Listing users - {:?}", params));
                print_json(&self.service.list(&params).await?)
            }
            UserCommands::Get { name } => {
                let found = self.service.get(&name).await?;
                print_json(&require(found, ResourceKind::User, &name)?)
            }
            UserCommands::Create { name, email } => {
                print_outcome(&self.service.create(&name, &email).await?)
            }
            UserCommands::Delete { name } => print_outcome(&self.service.delete(&name).await?),
        }
    }
}

pub struct GroupHandler {
    groups: GroupService<RedashClient>,
    memberships: MembershipService<RedashClient>,
}

impl GroupHandler {
    pub fn new(client: Arc<RedashClient>) -> Self {
        Self {
            groups: GroupService::new(Arc::clone(&client)),
            memberships: MembershipService::new(client),
        }
    }

    pub async fn handle(&self, command: GroupCommands, verbose: bool) -> Result<(), AppError> {
        match command {
            GroupCommands::List => print_json(&self.groups.list().await?),
            GroupCommands::Get { name } => {
                let found = self.groups.get(&name).await?;
                print_json(&require(found, ResourceKind::Group, &name)?)
            }
            GroupCommands::Create { name } => print_outcome(&self.groups.create(&name).await?),
            GroupCommands::Delete { name } => print_outcome(&self.groups.delete(&name).await?),
            GroupCommands::Members { name } => print_json(&self.groups.members(&name).await?),
            GroupCommands::DataSources { name } => {
                print_json(&self.groups.data_sources(&name).await?)
            }
            GroupCommands::AddUser { user, group } => {
                print_verbose(verbose, &format!("Adding {} to {}", user, group));
                print_outcome(&self.memberships.add_user_to_group(&user, &group).await?)
            }
            GroupCommands::RemoveUser { user, group } => {
                print_verbose(verbose, &format!("Removing {} from {}", user, group));
                print_outcome(
                    &self
                        .memberships
                        .remove_user_from_group(&user, &group)
                        .await?,
                )
            }
            GroupCommands::AddDataSource { data_source, group } => {
                print_verbose(verbose, &format!("Granting {} to {}", data_source, group));
                print_outcome(
                    &self
                        .memberships
                        .add_data_source_to_group(&data_source, &group)
                        .await?,
                )
            }
            GroupCommands::RemoveDataSource { data_source, group } => {
                print_verbose(verbose, &format!("Revoking {} from {}", data_source, group));
                print_outcome(
                    &self
                        .memberships
                        .remove_data_source_from_group(&data_source, &group)
                        .await?,
                )
            }
        }
    }
}
