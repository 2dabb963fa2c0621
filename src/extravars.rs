//! Extravars payload builder
//!
//! Flattens a [`DefaultedConfiguration`] into the ordered variable set the
//! playbooks read. The key list is fixed per action; a handful of keys are
//! computed rather than copied (`wordpress_url`, `certbot_domains_string`,
//! `extra_env_vars`, `app_source_root`, `open_database`), and the sudo
//! password key is left out entirely when no password was given.

use ansiblekit::PrivateData;
use serde_yaml::{Mapping, Value};

use crate::action::Action;
use crate::constants::DEFAULT_APACHE_DOCUMENT_ROOT;
use crate::defaults::{DefaultedConfiguration, VhostSpec};

/// The resolved, ordered extravars for one run.
#[derive(Clone, PartialEq)]
pub struct ExtravarSet {
    vars: Mapping,
    ssl_domains: Vec<String>,
}

impl ExtravarSet {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Keys in payload order.
    pub fn keys(&self) -> Vec<&str> {
        self.vars.keys().filter_map(Value::as_str).collect()
    }

    /// The SSL domain list after `wordpress_url` was merged in.
    pub fn ssl_domains(&self) -> &[String] {
        &self.ssl_domains
    }

    /// Write the set to `env/extravars`.
    pub fn persist(&self, private_data: &PrivateData) -> ansiblekit::Result<()> {
        private_data.write_extravars(&self.vars)
    }
}

// Values may hold passwords; only show the keys.
impl std::fmt::Debug for ExtravarSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtravarSet")
            .field("keys", &self.keys())
            .field("ssl_domains", &self.ssl_domains)
            .finish()
    }
}

fn text(s: &str) -> Value {
    Value::String(s.to_string())
}

fn opt_text(s: Option<&str>) -> Value {
    s.map_or(Value::Null, text)
}

fn list<S: AsRef<str>>(items: &[S]) -> Value {
    Value::Sequence(items.iter().map(|s| text(s.as_ref())).collect())
}

fn vhost_value(vhost: &VhostSpec) -> Value {
    let mut map = Mapping::new();
    map.insert(text("base_vhost_file"), text(&vhost.base_vhost_file));
    map.insert(text("document_root"), text(&vhost.document_root));
    map.insert(text("vhost_name"), text(&vhost.vhost_name));
    map.insert(text("server_name"), text(&vhost.server_name));
    map.insert(text("server_admin"), text(&vhost.server_admin));
    map.insert(text("allow_override"), Value::Bool(vhost.allow_override));
    Value::Mapping(map)
}

/// `www.<host>` under certbot unless the host already starts with `www.`.
pub fn wordpress_url(web_host: &str, certbot: bool) -> String {
    if !certbot || web_host.starts_with("www.") {
        web_host.to_string()
    } else {
        format!("www.{web_host}")
    }
}

/// `-d a -d b ...` for certbot.
pub fn certbot_domains_string(domains: &[String]) -> String {
    format!("-d {}", domains.join(" -d "))
}

/// `KEY=VALUE` strings, in input order.
pub fn flatten_env_vars(vars: &[(String, String)]) -> Vec<String> {
    vars.iter().map(|(k, v)| format!("{k}={v}")).collect()
}

/// Whether the database lives on its own host and must accept remote clients.
pub fn open_database(config: &DefaultedConfiguration) -> bool {
    let intent = &config.intent;
    intent.database_system_host_explicit && intent.database_system_host != intent.web_host
}

/// Build the extravars for a defaulted configuration.
pub fn build_extravars(config: &DefaultedConfiguration) -> ExtravarSet {
    let intent = &config.intent;
    let mut vars = Mapping::new();
    let mut ssl_domains = intent.domains_for_ssl.clone();
    let mut put = |key: &str, value: Value| {
        vars.insert(text(key), value);
    };

    put("web_host", text(&intent.web_host));
    put(
        "apache_vhosts",
        Value::Sequence(config.apache_vhosts.iter().map(vhost_value).collect()),
    );
    put("apache_vhost_name", text(&intent.apache_vhost_name));
    put("apache_document_root", text(&intent.apache_document_root));
    put("apache_server_admin", text(&intent.apache_server_admin));
    put("apache_custom_conf_name", text(&intent.apache_custom_conf_name));
    put("database_username", opt_text(intent.database_username.as_deref()));
    put("database_password", opt_text(intent.database_password.as_deref()));
    put("database_name", opt_text(intent.database_name.as_deref()));
    put("database_host", opt_text(intent.database_host.as_deref()));
    put("database_table_prefix", text(&intent.database_table_prefix));
    put("php_version", opt_text(intent.php_version.as_deref()));
    put("php_extensions", list(&intent.php_extensions));
    put(
        "composer_packages",
        intent.composer_packages.as_deref().map_or(Value::Null, list),
    );
    put("composer_project", opt_text(intent.composer_project.as_deref()));
    put(
        "composer_working_directory",
        text(config.composer_working_directory()),
    );
    put("site_title", text(&intent.site_title));
    put("admin_username", text(&intent.admin_username));
    put("admin_password", opt_text(intent.admin_password.as_deref()));
    put("admin_email", text(&intent.admin_email));

    match &intent.action {
        Action::WordPress(wp) => {
            let url = wordpress_url(&intent.web_host, intent.ssl_mode.is_certbot());
            if !ssl_domains.contains(&url) {
                ssl_domains.push(url.clone());
            }
            put("wordpress_version", text(&wp.version));
            put("wordpress_locale", text(&wp.locale));
            put("wordpress_url", text(&url));
            put(
                "wordpress_insecure_allow_xmlrpc",
                Value::Bool(wp.insecure_allow_xmlrpc),
            );
        }
        Action::Joomla(joomla) => {
            put("joomla_version", text(&joomla.version));
            put("joomla_admin_full_name", text(&joomla.admin_full_name));
        }
        Action::Drupal(drupal) => {
            put("drupal_profile", text(&drupal.profile));
        }
        Action::Laravel(app) => {
            put("app_name", text(&app.app_name));
            put("app_build_path", opt_text(app.app_build_path.as_deref()));
            put(
                "app_source_root",
                text(&format!("{DEFAULT_APACHE_DOCUMENT_ROOT}/{}", app.app_name)),
            );
            put("laravel_artisan_commands", list(&app.artisan_commands));
            put("app_local_env", Value::Bool(app.app_local_env));
        }
        Action::LampStack
        | Action::Apache
        | Action::Mysql
        | Action::Php
        | Action::DumpAnsibleFacts
        | Action::Custom(_) => {}
    }

    put("ssl_certbot", Value::Bool(intent.ssl_mode.is_certbot()));
    put("email_for_ssl", opt_text(intent.email_for_ssl.as_deref()));
    put(
        "certbot_domains_string",
        text(&certbot_domains_string(&ssl_domains)),
    );
    put("ssl_test_cert", Value::Bool(intent.ssl_test_cert));
    put("ssl_selfsigned", Value::Bool(intent.ssl_mode.is_selfsigned()));
    put("extra_packages", list(&intent.extra_packages));

    // App env vars go to the app's .env, never to Apache's envvars.
    let env_vars = list(&flatten_env_vars(&intent.extra_env_vars));
    if matches!(intent.action, Action::Laravel(_)) {
        put("laravel_extra_env_vars", env_vars);
        put("extra_env_vars", Value::Sequence(Vec::new()));
    } else {
        put("extra_env_vars", env_vars);
    }

    if let Some(password) = intent.remote_sudo_password.as_deref().filter(|p| !p.is_empty()) {
        put("ansible_sudo_pass", text(password));
    }
    put("open_database", Value::Bool(open_database(config)));

    ExtravarSet { vars, ssl_domains }
}
