//! Deployment intent: what the caller asked for, before defaulting.

use crate::action::Action;
use crate::constants::{
    DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_USERNAME, DEFAULT_APACHE_DOCUMENT_ROOT,
    DEFAULT_APACHE_SERVER_ADMIN, DEFAULT_APACHE_VHOST_NAME, DEFAULT_DATABASE_TABLE_PREFIX,
    DEFAULT_SITE_TITLE,
};
use std::path::PathBuf;

/// How TLS is set up on the web server. The modes are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    /// Let's Encrypt certificate via certbot
    #[default]
    Certbot,
    /// Self-signed certificate with an extra SSL vhost
    SelfSigned,
    Disabled,
}

impl SslMode {
    pub fn is_certbot(self) -> bool {
        self == Self::Certbot
    }

    pub fn is_selfsigned(self) -> bool {
        self == Self::SelfSigned
    }
}

/// A fully-specified request to deploy `action` onto `web_host`.
///
/// Built once through [`IntentBuilder`]; the database system host/user
/// default to the web host/user at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentIntent {
    pub action: Action,

    pub web_user: String,
    pub web_host: String,
    pub database_system_user: String,
    pub database_system_host: String,
    /// Whether a database system host was given explicitly
    pub database_system_host_explicit: bool,

    pub apache_server_admin: String,
    pub apache_vhost_name: String,
    pub apache_document_root: String,
    pub apache_custom_conf_name: String,

    pub database_username: Option<String>,
    pub database_password: Option<String>,
    pub database_name: Option<String>,
    pub database_host: Option<String>,
    pub database_table_prefix: String,

    pub php_version: Option<String>,
    pub php_extensions: Vec<String>,

    /// `None` when the caller never supplied a package list
    pub composer_packages: Option<Vec<String>>,
    pub composer_project: Option<String>,
    pub composer_working_directory: Option<String>,

    pub site_title: String,
    pub admin_username: String,
    pub admin_password: Option<String>,
    pub admin_email: String,

    pub ssl_mode: SslMode,
    pub ssl_test_cert: bool,
    pub email_for_ssl: Option<String>,
    pub domains_for_ssl: Vec<String>,

    pub extra_packages: Vec<String>,
    /// Ordered `KEY`, `VALUE` pairs
    pub extra_env_vars: Vec<(String, String)>,

    pub remote_sudo_password: Option<String>,
    pub ssh_key_file: Option<PathBuf>,
}

impl DeploymentIntent {
    pub fn builder(
        web_user: impl Into<String>,
        web_host: impl Into<String>,
        action: Action,
    ) -> IntentBuilder {
        IntentBuilder::new(web_user.into(), web_host.into(), action)
    }
}

/// Builder for [`DeploymentIntent`]. Unset fields take their default constant.
#[derive(Debug, Clone)]
pub struct IntentBuilder {
    action: Action,
    web_user: String,
    web_host: String,
    database_system_user: Option<String>,
    database_system_host: Option<String>,
    apache_server_admin: String,
    apache_vhost_name: String,
    apache_document_root: String,
    apache_custom_conf_name: String,
    database_username: Option<String>,
    database_password: Option<String>,
    database_name: Option<String>,
    database_host: Option<String>,
    database_table_prefix: String,
    php_version: Option<String>,
    php_extensions: Vec<String>,
    composer_packages: Option<Vec<String>>,
    composer_project: Option<String>,
    composer_working_directory: Option<String>,
    site_title: String,
    admin_username: String,
    admin_password: Option<String>,
    admin_email: String,
    ssl_mode: SslMode,
    ssl_test_cert: bool,
    email_for_ssl: Option<String>,
    domains_for_ssl: Vec<String>,
    extra_packages: Vec<String>,
    extra_env_vars: Vec<(String, String)>,
    remote_sudo_password: Option<String>,
    ssh_key_file: Option<PathBuf>,
}

impl IntentBuilder {
    fn new(web_user: String, web_host: String, action: Action) -> Self {
        Self {
            action,
            web_user,
            web_host,
            database_system_user: None,
            database_system_host: None,
            apache_server_admin: DEFAULT_APACHE_SERVER_ADMIN.to_string(),
            apache_vhost_name: DEFAULT_APACHE_VHOST_NAME.to_string(),
            apache_document_root: DEFAULT_APACHE_DOCUMENT_ROOT.to_string(),
            apache_custom_conf_name: String::new(),
            database_username: None,
            database_password: None,
            database_name: None,
            database_host: None,
            database_table_prefix: DEFAULT_DATABASE_TABLE_PREFIX.to_string(),
            php_version: None,
            php_extensions: Vec::new(),
            composer_packages: None,
            composer_project: None,
            composer_working_directory: None,
            site_title: DEFAULT_SITE_TITLE.to_string(),
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: None,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            ssl_mode: SslMode::default(),
            ssl_test_cert: false,
            email_for_ssl: None,
            domains_for_ssl: Vec::new(),
            extra_packages: Vec::new(),
            extra_env_vars: Vec::new(),
            remote_sudo_password: None,
            ssh_key_file: None,
        }
    }

    pub fn database_system_user(mut self, user: impl Into<String>) -> Self {
        self.database_system_user = Some(user.into());
        self
    }

    pub fn database_system_host(mut self, host: impl Into<String>) -> Self {
        self.database_system_host = Some(host.into());
        self
    }

    pub fn apache_server_admin(mut self, admin: impl Into<String>) -> Self {
        self.apache_server_admin = admin.into();
        self
    }

    pub fn apache_vhost_name(mut self, name: impl Into<String>) -> Self {
        self.apache_vhost_name = name.into();
        self
    }

    pub fn apache_document_root(mut self, root: impl Into<String>) -> Self {
        self.apache_document_root = root.into();
        self
    }

    pub fn apache_custom_conf_name(mut self, name: impl Into<String>) -> Self {
        self.apache_custom_conf_name = name.into();
        self
    }

    pub fn database_username(mut self, username: impl Into<String>) -> Self {
        self.database_username = Some(username.into());
        self
    }

    pub fn database_password(mut self, password: impl Into<String>) -> Self {
        self.database_password = Some(password.into());
        self
    }

    pub fn database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = Some(name.into());
        self
    }

    pub fn database_host(mut self, host: impl Into<String>) -> Self {
        self.database_host = Some(host.into());
        self
    }

    pub fn database_table_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.database_table_prefix = prefix.into();
        self
    }

    pub fn php_version(mut self, version: impl Into<String>) -> Self {
        self.php_version = Some(version.into());
        self
    }

    pub fn php_extensions(mut self, extensions: Vec<String>) -> Self {
        self.php_extensions = extensions;
        self
    }

    pub fn composer_packages(mut self, packages: Vec<String>) -> Self {
        self.composer_packages = Some(packages);
        self
    }

    pub fn composer_project(mut self, project: impl Into<String>) -> Self {
        self.composer_project = Some(project.into());
        self
    }

    pub fn composer_working_directory(mut self, dir: impl Into<String>) -> Self {
        self.composer_working_directory = Some(dir.into());
        self
    }

    pub fn site_title(mut self, title: impl Into<String>) -> Self {
        self.site_title = title.into();
        self
    }

    pub fn admin_username(mut self, username: impl Into<String>) -> Self {
        self.admin_username = username.into();
        self
    }

    pub fn admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = Some(password.into());
        self
    }

    pub fn admin_email(mut self, email: impl Into<String>) -> Self {
        self.admin_email = email.into();
        self
    }

    pub fn ssl_mode(mut self, mode: SslMode) -> Self {
        self.ssl_mode = mode;
        self
    }

    pub fn ssl_test_cert(mut self, test_cert: bool) -> Self {
        self.ssl_test_cert = test_cert;
        self
    }

    pub fn email_for_ssl(mut self, email: impl Into<String>) -> Self {
        self.email_for_ssl = Some(email.into());
        self
    }

    pub fn domains_for_ssl(mut self, domains: Vec<String>) -> Self {
        self.domains_for_ssl = domains;
        self
    }

    pub fn extra_packages(mut self, packages: Vec<String>) -> Self {
        self.extra_packages = packages;
        self
    }

    pub fn extra_env_vars(mut self, vars: Vec<(String, String)>) -> Self {
        self.extra_env_vars = vars;
        self
    }

    pub fn remote_sudo_password(mut self, password: impl Into<String>) -> Self {
        self.remote_sudo_password = Some(password.into());
        self
    }

    pub fn ssh_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ssh_key_file = Some(path.into());
        self
    }

    pub fn build(self) -> DeploymentIntent {
        let database_system_host_explicit = self.database_system_host.is_some();
        let database_system_user = self
            .database_system_user
            .unwrap_or_else(|| self.web_user.clone());
        let database_system_host = self
            .database_system_host
            .unwrap_or_else(|| self.web_host.clone());

        DeploymentIntent {
            action: self.action,
            web_user: self.web_user,
            web_host: self.web_host,
            database_system_user,
            database_system_host,
            database_system_host_explicit,
            apache_server_admin: self.apache_server_admin,
            apache_vhost_name: self.apache_vhost_name,
            apache_document_root: self.apache_document_root,
            apache_custom_conf_name: self.apache_custom_conf_name,
            database_username: self.database_username,
            database_password: self.database_password,
            database_name: self.database_name,
            database_host: self.database_host,
            database_table_prefix: self.database_table_prefix,
            php_version: self.php_version,
            php_extensions: self.php_extensions,
            composer_packages: self.composer_packages,
            composer_project: self.composer_project,
            composer_working_directory: self.composer_working_directory,
            site_title: self.site_title,
            admin_username: self.admin_username,
            admin_password: self.admin_password,
            admin_email: self.admin_email,
            ssl_mode: self.ssl_mode,
            ssl_test_cert: self.ssl_test_cert,
            email_for_ssl: self.email_for_ssl,
            domains_for_ssl: self.domains_for_ssl,
            extra_packages: self.extra_packages,
            extra_env_vars: self.extra_env_vars,
            remote_sudo_password: self.remote_sudo_password,
            ssh_key_file: self.ssh_key_file,
        }
    }
}
