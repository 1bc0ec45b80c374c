use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "redash-admin")]
#[command(about = "Manage Redash data sources, users and groups by name")]
#[command(version)]
#[command(after_help = "Examples:
  redash-admin data-source list
  redash-admin data-source upsert pg warehouse -o dbname=dw -o port=5432
  redash-admin group create analysts
  redash-admin group add-user alice analysts
  redash-admin group add-data-source warehouse analysts

Environment Variables:
  REDASH_API_KEY   Redash admin API key (required)
  REDASH_URL       Redash server URL
  RUST_LOG         Log filter, overrides --verbose")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Redash API key for authentication
    #[arg(long, global = true, env = "REDASH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Redash server URL, overrides the configuration file
    #[arg(long, global = true)]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configuration management (show, set)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Manage data sources
    DataSource {
        #[command(subcommand)]
        command: DataSourceCommands,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Manage groups and their members and data sources
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration values
    Set {
        /// Redash server URL
        #[arg(long)]
        url: Option<String>,
        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataSourceCommands {
    /// List all data sources
    List,
    /// Show a data source by name
    Get { name: String },
    /// Create a data source; nothing is written if the name is taken
    Create(DataSourceArgs),
    /// Create a data source or update the one with this name
    Upsert(DataSourceArgs),
    /// Delete a data source by name
    Delete { name: String },
}

#[derive(Args, Debug)]
pub struct DataSourceArgs {
    /// Driver identifier, e.g. pg
    #[arg(value_name = "TYPE")]
    pub kind: String,
    pub name: String,
    /// Driver option as key=value (repeatable)
    #[arg(short = 'o', long = "option", action = clap::ArgAction::Append)]
    pub options: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List {
        #[arg(long, default_value = "250")]
        page_size: u32,
        /// Leave out users with a pending invitation
        #[arg(long)]
        no_pending: bool,
        /// Sort order forwarded to the server
        #[arg(long, default_value = "name")]
        order: String,
    },
    /// Show a user by name
    Get { name: String },
    /// Invite a user
    Create { name: String, email: String },
    /// Delete a user by name
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// List all groups
    List,
    /// Show a group by name
    Get { name: String },
    /// Create a group; nothing is written if the name is taken
    Create { name: String },
    /// Delete a group by name
    Delete { name: String },
    /// List the members of a group
    Members { name: String },
    /// List the data sources granted to a group
    DataSources { name: String },
    /// Add a user to a group
    AddUser { user: String, group: String },
    /// Remove a user from a group
    RemoveUser { user: String, group: String },
    /// Grant a data source to a group
    AddDataSource { data_source: String, group: String },
    /// Revoke a data source from a group
    RemoveDataSource { data_source: String, group: String },
}
