use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::constants::{
    AVAILABLE_DRUPAL_PROFILES, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_USERNAME,
    DEFAULT_APACHE_DOCUMENT_ROOT, DEFAULT_APACHE_SERVER_ADMIN, DEFAULT_APACHE_VHOST_NAME,
    DEFAULT_APP_NAME, DEFAULT_DRUPAL_PROFILE, DEFAULT_JOOMLA_ADMIN_FULL_NAME,
    DEFAULT_JOOMLA_VERSION, DEFAULT_SITE_TITLE, DEFAULT_WORDPRESS_LOCALE,
    DEFAULT_WORDPRESS_VERSION,
};

#[derive(Parser)]
#[command(name = "lampstack")]
#[command(version)]
#[command(about = "Deploy LAMP stacks and PHP applications with Ansible", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Provision a server: `lampstack run deploy@example.com wordpress`
    Run(RunArgs),

    /// List supported actions and the PHP extensions they need
    Actions,

    /// Print the banner
    Banner,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// How the web server gets its TLS certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SslArg {
    /// Let's Encrypt via certbot
    #[default]
    Certbot,
    /// Self-signed certificate
    Selfsigned,
    /// No TLS at all
    #[value(name = "none")]
    Disabled,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Web server as `<user>@<host>`
    #[arg(value_name = "USER@HOST")]
    pub web: String,

    /// Action to run (see `lampstack actions`)
    pub action: String,

    // ------------------------------------------------------------------
    // Hosts and connection
    // ------------------------------------------------------------------
    /// Database server as `<user>@<host>`, if not the web server
    #[arg(long, value_name = "USER@HOST", help_heading = "Connection")]
    pub database_system: Option<String>,

    /// Private key file to connect with
    #[arg(long, help_heading = "Connection")]
    pub ssh_key_file: Option<PathBuf>,

    /// Prompt for the remote sudo password
    #[arg(long, help_heading = "Connection")]
    pub ask_remote_sudo: bool,

    // ------------------------------------------------------------------
    // Apache
    // ------------------------------------------------------------------
    #[arg(long, default_value = DEFAULT_APACHE_SERVER_ADMIN, help_heading = "Apache")]
    pub apache_server_admin: String,

    #[arg(long, default_value = DEFAULT_APACHE_VHOST_NAME, help_heading = "Apache")]
    pub apache_vhost_name: String,

    #[arg(long, default_value = DEFAULT_APACHE_DOCUMENT_ROOT, help_heading = "Apache")]
    pub apache_document_root: String,

    // ------------------------------------------------------------------
    // Database
    // ------------------------------------------------------------------
    #[arg(long, help_heading = "Database")]
    pub database_username: Option<String>,

    /// Requires --insecure-cli-password; prompted for otherwise
    #[arg(long, help_heading = "Database")]
    pub database_password: Option<String>,

    #[arg(long, help_heading = "Database")]
    pub database_name: Option<String>,

    /// Host the application uses to reach the database
    #[arg(long, help_heading = "Database")]
    pub database_host: Option<String>,

    #[arg(long, help_heading = "Database")]
    pub database_table_prefix: Option<String>,

    // ------------------------------------------------------------------
    // PHP
    // ------------------------------------------------------------------
    #[arg(long, help_heading = "PHP")]
    pub php_version: Option<String>,

    /// Extra PHP packages, comma separated (e.g. php-intl)
    #[arg(long, value_delimiter = ',', help_heading = "PHP")]
    pub php_extensions: Vec<String>,

    /// Composer packages to require, comma separated
    #[arg(long, value_delimiter = ',', help_heading = "PHP")]
    pub composer_packages: Option<Vec<String>>,

    #[arg(long, help_heading = "PHP")]
    pub composer_project: Option<String>,

    #[arg(long, help_heading = "PHP")]
    pub composer_working_directory: Option<String>,

    // ------------------------------------------------------------------
    // Applications
    // ------------------------------------------------------------------
    #[arg(long, default_value = DEFAULT_SITE_TITLE, help_heading = "Applications")]
    pub site_title: String,

    #[arg(long, default_value = DEFAULT_ADMIN_USERNAME, help_heading = "Applications")]
    pub admin_username: String,

    /// Requires --insecure-cli-password; prompted for otherwise
    #[arg(long, help_heading = "Applications")]
    pub admin_password: Option<String>,

    #[arg(long, default_value = DEFAULT_ADMIN_EMAIL, help_heading = "Applications")]
    pub admin_email: String,

    #[arg(long, default_value = DEFAULT_WORDPRESS_VERSION, help_heading = "Applications")]
    pub wordpress_version: String,

    #[arg(long, default_value = DEFAULT_WORDPRESS_LOCALE, help_heading = "Applications")]
    pub wordpress_locale: String,

    /// Keep xmlrpc.php reachable
    #[arg(long, help_heading = "Applications")]
    pub wordpress_insecure_allow_xmlrpc: bool,

    #[arg(long, default_value = DEFAULT_JOOMLA_VERSION, help_heading = "Applications")]
    pub joomla_version: String,

    #[arg(long, default_value = DEFAULT_JOOMLA_ADMIN_FULL_NAME, help_heading = "Applications")]
    pub joomla_admin_full_name: String,

    #[arg(
        long,
        default_value = DEFAULT_DRUPAL_PROFILE,
        value_parser = PossibleValuesParser::new(AVAILABLE_DRUPAL_PROFILES.iter().copied()),
        help_heading = "Applications"
    )]
    pub drupal_profile: String,

    #[arg(long, default_value = DEFAULT_APP_NAME, help_heading = "Applications")]
    pub app_name: String,

    /// Local build archive to upload for a Laravel app
    #[arg(long, help_heading = "Applications")]
    pub app_build_path: Option<String>,

    /// Artisan commands to run after deploying, comma separated
    #[arg(long, value_delimiter = ',', help_heading = "Applications")]
    pub laravel_artisan_commands: Option<Vec<String>>,

    /// Deploy with a local-environment .env
    #[arg(long, help_heading = "Applications")]
    pub app_local_env: bool,

    // ------------------------------------------------------------------
    // SSL
    // ------------------------------------------------------------------
    #[arg(long, value_enum, default_value_t = SslArg::Certbot, help_heading = "SSL")]
    pub ssl: SslArg,

    /// Ask certbot for a staging certificate
    #[arg(long, help_heading = "SSL")]
    pub ssl_test_cert: bool,

    #[arg(long, help_heading = "SSL")]
    pub email_for_ssl: Option<String>,

    /// Domains for the certificate, comma separated
    #[arg(long, value_delimiter = ',', help_heading = "SSL")]
    pub domains_for_ssl: Vec<String>,

    // ------------------------------------------------------------------
    // Extras
    // ------------------------------------------------------------------
    /// System packages to install, comma separated
    #[arg(long, value_delimiter = ',', help_heading = "Extras")]
    pub extra_packages: Vec<String>,

    /// Environment variables as KEY=VALUE (repeatable)
    #[arg(long = "extra-env-var", value_parser = parse_env_var, help_heading = "Extras")]
    pub extra_env_vars: Vec<(String, String)>,

    // ------------------------------------------------------------------
    // Behaviour
    // ------------------------------------------------------------------
    /// Install missing Ansible Galaxy collections without asking
    #[arg(long, alias = "ansible-galaxy-ok")]
    pub galaxy_ok: bool,

    /// Allow passwords as command line arguments
    #[arg(long)]
    pub insecure_cli_password: bool,

    /// Never prompt, even on a terminal
    #[arg(long)]
    pub non_interactive: bool,

    /// Playbook project directory
    #[arg(long)]
    pub project_dir: Option<PathBuf>,

    /// Transient directory for ansible-runner (removed after the run)
    #[arg(long)]
    pub private_data_dir: Option<PathBuf>,

    /// Where Galaxy collections are looked up
    #[arg(long)]
    pub collections_path: Option<PathBuf>,
}

/// Parse `KEY=VALUE`.
fn parse_env_var(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
