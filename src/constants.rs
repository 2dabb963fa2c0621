//! Static defaults and lookup tables.

// Apache
pub const DEFAULT_APACHE_VHOST_NAME: &str = "000-default";
pub const DEFAULT_APACHE_SERVER_NAME: &str = "localhost";
pub const DEFAULT_APACHE_SERVER_ADMIN: &str = "webmaster@localhost";
pub const DEFAULT_APACHE_DOCUMENT_ROOT: &str = "/var/www/html";
pub const SSL_VHOST_TEMPLATE: &str = "default-ssl.conf";
pub const SSL_CUSTOM_CONF_NAME: &str = "ssl-params";

// Database
pub const DEFAULT_DATABASE_TABLE_PREFIX: &str = "";
pub const WORDPRESS_TABLE_PREFIX: &str = "wp_";

// PHP
pub const SUPPORTED_PHP_VERSIONS: &[&str] = &[
    "8.4", "8.3", "8.2", "8.1", "8.0", "7.4", "7.3", "7.2", "7.1", "7.0", "5.6", "5.5", "5.4",
];
pub const PHP_EXTENSION_PREFIX: &str = "php-";

/// PHP extensions each action needs, before namespacing.
pub const REQUIRED_PHP_EXTENSIONS: &[(&str, &[&str])] = &[
    ("lamp-stack", &["mysql"]),
    ("wordpress", &["mysql", "gd"]),
    ("joomla", &["simplexml", "dom", "zip", "gd", "mysql"]),
    ("drupal", &["mysql", "xml", "gd", "curl", "mbstring"]),
    ("laravel", &["mysql", "xml", "mbstring"]),
];

// All CMS
pub const DEFAULT_SITE_TITLE: &str = "Sample Site";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

// WordPress
pub const DEFAULT_WORDPRESS_VERSION: &str = "latest";
pub const DEFAULT_WORDPRESS_LOCALE: &str = "en_US";
pub const RECENT_WORDPRESS_VERSIONS: &[&str] = &[
    "latest", "nightly", "6.7.2", "6.7.1", "6.7", "6.6.2", "6.6.1", "6.6", "6.5.5", "6.5.4",
    "6.5.3", "6.5.2", "6.5", "6.4.4", "6.4.3", "6.4.2", "6.4.1", "6.4",
];

// Joomla
pub const DEFAULT_JOOMLA_VERSION: &str = "5.2.3";
pub const DEFAULT_JOOMLA_ADMIN_FULL_NAME: &str = "Sample User";

// Drupal
pub const AVAILABLE_DRUPAL_PROFILES: &[&str] = &["standard", "minimal"];
pub const DEFAULT_DRUPAL_PROFILE: &str = "standard";
pub const DRUPAL_COMPOSER_PROJECT: &str = "drupal/recommended-project";
pub const DRUSH_PACKAGE: &str = "drush/drush";

// Web applications
pub const DEFAULT_APP_NAME: &str = "laravel";
pub const DEFAULT_LARAVEL_ARTISAN_COMMANDS: &[&str] = &["key:generate", "migrate", "db:seed"];

// Galaxy
pub const GALAXY_REQUIREMENTS_FILE: &str = "ansible-galaxy-requirements.yml";

// Misc
pub const INSECURE_CLI_PASS_WARNING: &str = "It's insecure to pass passwords via CLI args! If you are sure that you want to do this, rerun this command with the --insecure-cli-password flag.";

/// Required PHP extensions for an action name, without the `php-` prefix.
pub fn required_php_extensions(action: &str) -> &'static [&'static str] {
    REQUIRED_PHP_EXTENSIONS
        .iter()
        .find(|(name, _)| *name == action)
        .map(|(_, exts)| *exts)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_php_extensions_lookup() {
        assert_eq!(required_php_extensions("wordpress"), &["mysql", "gd"]);
        assert!(required_php_extensions("apache").is_empty());
        assert!(required_php_extensions("my-custom-thing").is_empty());
    }
}
