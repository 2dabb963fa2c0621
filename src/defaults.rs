//! Action defaulting engine
//!
//! Turns a [`DeploymentIntent`] into a [`DefaultedConfiguration`]: PHP
//! extension set, app-specific database/composer settings, Apache vhosts
//! and SSL settings. Defaulting never fails; every gap is filled with a
//! constant. Explicit caller values always win over derived ones.

use crate::action::{Action, LaravelSettings};
use crate::constants::{
    DEFAULT_APACHE_DOCUMENT_ROOT, DEFAULT_APACHE_SERVER_NAME, DEFAULT_APACHE_VHOST_NAME,
    DEFAULT_APP_NAME, DEFAULT_DATABASE_TABLE_PREFIX, DRUPAL_COMPOSER_PROJECT, DRUSH_PACKAGE,
    SSL_CUSTOM_CONF_NAME, SSL_VHOST_TEMPLATE, WORDPRESS_TABLE_PREFIX,
};
use crate::hostname::is_valid_fqdn;
use crate::intent::{DeploymentIntent, SslMode};

/// One Apache virtual host to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VhostSpec {
    /// Template the vhost is rendered from
    pub base_vhost_file: String,
    pub document_root: String,
    pub vhost_name: String,
    pub server_name: String,
    pub server_admin: String,
    pub allow_override: bool,
}

/// Intent after defaulting, plus the vhosts derived from it.
///
/// `intent.composer_working_directory` is always set here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultedConfiguration {
    pub intent: DeploymentIntent,
    pub apache_vhosts: Vec<VhostSpec>,
}

impl DefaultedConfiguration {
    pub fn action(&self) -> &Action {
        &self.intent.action
    }

    pub fn composer_working_directory(&self) -> &str {
        self.intent
            .composer_working_directory
            .as_deref()
            .unwrap_or(DEFAULT_APACHE_DOCUMENT_ROOT)
    }
}

/// Apply all action-specific defaults.
pub fn apply_defaults(intent: &DeploymentIntent) -> DefaultedConfiguration {
    let mut intent = intent.clone();

    if intent.apache_document_root.is_empty() {
        intent.apache_document_root = DEFAULT_APACHE_DOCUMENT_ROOT.to_string();
    }
    if intent.apache_vhost_name.is_empty() {
        intent.apache_vhost_name = DEFAULT_APACHE_VHOST_NAME.to_string();
    }
    if let Action::Laravel(settings) = &mut intent.action
        && settings.app_name.is_empty()
    {
        settings.app_name = DEFAULT_APP_NAME.to_string();
    }

    apply_action_defaults(&mut intent);
    apply_vhost_defaults(&mut intent);
    let apache_vhosts = build_vhosts(&mut intent);

    if intent.composer_working_directory.is_none() {
        intent.composer_working_directory = Some(intent.apache_document_root.clone());
    }

    DefaultedConfiguration {
        intent,
        apache_vhosts,
    }
}

/// Extensions, table prefix and composer settings.
fn apply_action_defaults(intent: &mut DeploymentIntent) {
    match &intent.action {
        Action::WordPress(_) => {
            if intent.database_table_prefix == DEFAULT_DATABASE_TABLE_PREFIX {
                intent.database_table_prefix = WORDPRESS_TABLE_PREFIX.to_string();
            }
        }
        Action::Drupal(_) => {
            if intent.composer_project.is_none() {
                intent.composer_project = Some(DRUPAL_COMPOSER_PROJECT.to_string());
            }
            if intent.composer_working_directory.is_none() {
                intent.composer_working_directory =
                    Some(format!("{}/drupal", intent.apache_document_root));
            }
            match &mut intent.composer_packages {
                Some(packages) => {
                    if !packages.iter().any(|p| p == DRUSH_PACKAGE) {
                        packages.push(DRUSH_PACKAGE.to_string());
                    }
                }
                None => intent.composer_packages = Some(vec![DRUSH_PACKAGE.to_string()]),
            }
        }
        _ => {}
    }

    for ext in intent.action.required_php_extensions() {
        if !intent.php_extensions.contains(&ext) {
            intent.php_extensions.push(ext);
        }
    }
}

/// Document root and vhost name, only where the caller kept the generic value.
fn apply_vhost_defaults(intent: &mut DeploymentIntent) {
    let generic_root = intent.apache_document_root == DEFAULT_APACHE_DOCUMENT_ROOT;
    let generic_name = intent.apache_vhost_name == DEFAULT_APACHE_VHOST_NAME;

    let (root, name) = match &intent.action {
        Action::WordPress(_) | Action::Joomla(_) => {
            let action = intent.action.name();
            (
                Some(format!("{DEFAULT_APACHE_DOCUMENT_ROOT}/{action}")),
                Some(action.to_string()),
            )
        }
        Action::Drupal(_) => (
            Some(format!("{DEFAULT_APACHE_DOCUMENT_ROOT}/drupal/web")),
            None,
        ),
        Action::Laravel(LaravelSettings { app_name, .. }) => (
            Some(format!("{DEFAULT_APACHE_DOCUMENT_ROOT}/{app_name}/public")),
            Some(app_name.clone()),
        ),
        _ => (None, None),
    };

    if generic_root && let Some(root) = root {
        intent.apache_document_root = root;
    }
    if generic_name && let Some(name) = name {
        intent.apache_vhost_name = name;
    }
}

/// Whether the vhost allows `.htaccess` overrides.
pub fn allow_override(action: &Action) -> bool {
    match action {
        Action::Laravel(_) | Action::Drupal(_) => true,
        Action::WordPress(settings) => !settings.insecure_allow_xmlrpc,
        _ => false,
    }
}

/// Base vhost plus the SSL variant, and the SSL email/domain defaults.
fn build_vhosts(intent: &mut DeploymentIntent) -> Vec<VhostSpec> {
    let server_name = if is_valid_fqdn(&intent.web_host) {
        intent.web_host.clone()
    } else {
        DEFAULT_APACHE_SERVER_NAME.to_string()
    };

    let base = VhostSpec {
        base_vhost_file: format!("{DEFAULT_APACHE_VHOST_NAME}.conf"),
        document_root: intent.apache_document_root.clone(),
        vhost_name: intent.apache_vhost_name.clone(),
        server_name,
        server_admin: intent.apache_server_admin.clone(),
        allow_override: allow_override(&intent.action),
    };

    let mut vhosts = vec![base];

    match intent.ssl_mode {
        SslMode::Certbot => {
            if intent.email_for_ssl.as_deref().is_none_or(str::is_empty) {
                intent.email_for_ssl = Some(intent.apache_server_admin.clone());
            }
            if intent.domains_for_ssl.is_empty() {
                intent.domains_for_ssl = vec![intent.web_host.clone()];
            }
        }
        SslMode::SelfSigned => {
            let mut ssl = vhosts[0].clone();
            ssl.base_vhost_file = SSL_VHOST_TEMPLATE.to_string();
            ssl.vhost_name.push_str("-ssl");
            vhosts.push(ssl);
            intent.apache_custom_conf_name = SSL_CUSTOM_CONF_NAME.to_string();
        }
        SslMode::Disabled => {}
    }

    vhosts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{DrupalSettings, SUPPORTED_ACTIONS, WordPressSettings};
    use crate::constants::REQUIRED_PHP_EXTENSIONS;

    fn intent(action: &str) -> crate::intent::IntentBuilder {
        DeploymentIntent::builder("deploy", "example.com", Action::parse(action))
    }

    #[test]
    fn test_required_extensions_present_exactly_once() {
        for (action, exts) in REQUIRED_PHP_EXTENSIONS {
            let cfg = apply_defaults(
                &intent(action)
                    .php_extensions(vec!["php-mysql".to_string(), "php-intl".to_string()])
                    .build(),
            );
            for ext in *exts {
                let name = format!("php-{ext}");
                let count = cfg
                    .intent
                    .php_extensions
                    .iter()
                    .filter(|e| **e == name)
                    .count();
                assert_eq!(count, 1, "{action}: {name}");
            }
            // Caller-supplied extras are kept, in front.
            assert_eq!(cfg.intent.php_extensions[0], "php-mysql");
            assert_eq!(cfg.intent.php_extensions[1], "php-intl");
        }
    }

    #[test]
    fn test_custom_action_gets_no_extensions() {
        let cfg = apply_defaults(&intent("nextcloud").build());
        assert!(cfg.intent.php_extensions.is_empty());
        assert_eq!(cfg.apache_vhosts[0].document_root, "/var/www/html");
        assert_eq!(cfg.apache_vhosts[0].vhost_name, "000-default");
    }

    #[test]
    fn test_wordpress_table_prefix() {
        let cfg = apply_defaults(&intent("wordpress").build());
        assert_eq!(cfg.intent.database_table_prefix, "wp_");

        let cfg = apply_defaults(&intent("wordpress").database_table_prefix("site1_").build());
        assert_eq!(cfg.intent.database_table_prefix, "site1_");

        let cfg = apply_defaults(&intent("joomla").build());
        assert_eq!(cfg.intent.database_table_prefix, "");
    }

    #[test]
    fn test_drupal_composer_defaults() {
        let cfg = apply_defaults(&intent("drupal").build());
        assert_eq!(
            cfg.intent.composer_project.as_deref(),
            Some("drupal/recommended-project")
        );
        assert_eq!(cfg.composer_working_directory(), "/var/www/html/drupal");
        assert_eq!(
            cfg.intent.composer_packages,
            Some(vec!["drush/drush".to_string()])
        );
        assert_eq!(cfg.apache_vhosts[0].document_root, "/var/www/html/drupal/web");
        assert_eq!(cfg.apache_vhosts[0].vhost_name, "000-default");
    }

    #[test]
    fn test_drupal_appends_drush_to_caller_packages() {
        let cfg = apply_defaults(
            &intent("drupal")
                .composer_packages(vec!["drupal/admin_toolbar".to_string()])
                .build(),
        );
        assert_eq!(
            cfg.intent.composer_packages,
            Some(vec![
                "drupal/admin_toolbar".to_string(),
                "drush/drush".to_string()
            ])
        );
    }

    #[test]
    fn test_drupal_defaulting_is_idempotent() {
        let once = apply_defaults(&intent("drupal").build());
        let twice = apply_defaults(&once.intent);
        let drush = twice
            .intent
            .composer_packages
            .as_ref()
            .unwrap()
            .iter()
            .filter(|p| *p == "drush/drush")
            .count();
        assert_eq!(drush, 1);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_drupal_working_dir_uses_caller_root() {
        let cfg = apply_defaults(&intent("drupal").apache_document_root("/srv/www").build());
        assert_eq!(cfg.composer_working_directory(), "/srv/www/drupal");
        assert_eq!(cfg.apache_vhosts[0].document_root, "/srv/www");
    }

    #[test]
    fn test_vhost_rules_per_action() {
        let cfg = apply_defaults(&intent("joomla").build());
        assert_eq!(cfg.apache_vhosts[0].document_root, "/var/www/html/joomla");
        assert_eq!(cfg.apache_vhosts[0].vhost_name, "joomla");

        let laravel = LaravelSettings {
            app_name: "shop".to_string(),
            ..Default::default()
        };
        let cfg = apply_defaults(
            &DeploymentIntent::builder("deploy", "example.com", Action::Laravel(laravel)).build(),
        );
        assert_eq!(cfg.apache_vhosts[0].document_root, "/var/www/html/shop/public");
        assert_eq!(cfg.apache_vhosts[0].vhost_name, "shop");
        assert_eq!(cfg.composer_working_directory(), "/var/www/html/shop/public");
    }

    #[test]
    fn test_explicit_vhost_values_win() {
        let cfg = apply_defaults(
            &intent("wordpress")
                .apache_document_root("/srv/blog")
                .apache_vhost_name("blog")
                .build(),
        );
        assert_eq!(cfg.apache_vhosts[0].document_root, "/srv/blog");
        assert_eq!(cfg.apache_vhosts[0].vhost_name, "blog");
    }

    #[test]
    fn test_vhosts_never_empty() {
        for action in SUPPORTED_ACTIONS {
            let cfg = apply_defaults(
                &intent(action)
                    .apache_document_root("")
                    .apache_vhost_name("")
                    .ssl_mode(SslMode::SelfSigned)
                    .build(),
            );
            for vhost in &cfg.apache_vhosts {
                assert!(!vhost.document_root.is_empty(), "{action}");
                assert!(!vhost.vhost_name.is_empty(), "{action}");
            }
        }
    }

    #[test]
    fn test_server_name_falls_back_for_non_fqdn() {
        let cfg = apply_defaults(
            &DeploymentIntent::builder("deploy", "10.0.0.5", Action::LampStack).build(),
        );
        assert_eq!(cfg.apache_vhosts[0].server_name, "localhost");

        let cfg = apply_defaults(&intent("lamp-stack").build());
        assert_eq!(cfg.apache_vhosts[0].server_name, "example.com");
    }

    #[test]
    fn test_allow_override() {
        assert!(allow_override(&Action::Drupal(DrupalSettings::default())));
        assert!(allow_override(&Action::parse("laravel")));
        assert!(allow_override(&Action::parse("wordpress")));
        assert!(!allow_override(&Action::WordPress(WordPressSettings {
            insecure_allow_xmlrpc: true,
            ..Default::default()
        })));
        assert!(!allow_override(&Action::Apache));
    }

    #[test]
    fn test_certbot_defaults() {
        let cfg = apply_defaults(
            &intent("lamp-stack")
                .apache_server_admin("ops@example.com")
                .build(),
        );
        assert_eq!(cfg.intent.email_for_ssl.as_deref(), Some("ops@example.com"));
        assert_eq!(cfg.intent.domains_for_ssl, vec!["example.com".to_string()]);
        assert_eq!(cfg.apache_vhosts.len(), 1);

        let cfg = apply_defaults(
            &intent("lamp-stack")
                .email_for_ssl("tls@example.com")
                .domains_for_ssl(vec!["a.example.com".to_string()])
                .build(),
        );
        assert_eq!(cfg.intent.email_for_ssl.as_deref(), Some("tls@example.com"));
        assert_eq!(cfg.intent.domains_for_ssl, vec!["a.example.com".to_string()]);
    }

    #[test]
    fn test_selfsigned_adds_ssl_vhost() {
        let cfg = apply_defaults(&intent("wordpress").ssl_mode(SslMode::SelfSigned).build());
        assert_eq!(cfg.apache_vhosts.len(), 2);
        let (base, ssl) = (&cfg.apache_vhosts[0], &cfg.apache_vhosts[1]);
        assert_eq!(base.base_vhost_file, "000-default.conf");
        assert_eq!(ssl.base_vhost_file, "default-ssl.conf");
        assert_eq!(ssl.vhost_name, "wordpress-ssl");
        assert_eq!(ssl.document_root, base.document_root);
        assert_eq!(cfg.intent.apache_custom_conf_name, "ssl-params");
        assert!(cfg.intent.email_for_ssl.is_none());
        assert!(cfg.intent.domains_for_ssl.is_empty());
    }

    #[test]
    fn test_disabled_ssl_leaves_ssl_fields() {
        let cfg = apply_defaults(&intent("php").ssl_mode(SslMode::Disabled).build());
        assert_eq!(cfg.apache_vhosts.len(), 1);
        assert!(cfg.intent.email_for_ssl.is_none());
        assert!(cfg.intent.domains_for_ssl.is_empty());
        assert_eq!(cfg.intent.apache_custom_conf_name, "");
    }
}
