//! Deployment actions
//!
//! Every action maps to one playbook (`<name>.yml`). App actions carry the
//! settings only they use. Unknown names are kept as [`Action::Custom`] so
//! site-specific playbooks can still be run.

use crate::constants::{
    DEFAULT_APP_NAME, DEFAULT_DRUPAL_PROFILE, DEFAULT_JOOMLA_ADMIN_FULL_NAME,
    DEFAULT_JOOMLA_VERSION, DEFAULT_LARAVEL_ARTISAN_COMMANDS, DEFAULT_WORDPRESS_LOCALE,
    DEFAULT_WORDPRESS_VERSION, PHP_EXTENSION_PREFIX, required_php_extensions,
};
use std::fmt;

/// Names of the built-in actions, in display order.
pub const SUPPORTED_ACTIONS: &[&str] = &[
    // LAMP-Stack basics
    "lamp-stack",
    "apache",
    "mysql",
    "php",
    // PHP CMS
    "wordpress",
    "joomla",
    "drupal",
    // PHP frameworks
    "laravel",
    // Local debugging
    "dump-ansible-facts",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPressSettings {
    pub version: String,
    pub locale: String,
    pub insecure_allow_xmlrpc: bool,
}

impl Default for WordPressSettings {
    fn default() -> Self {
        Self {
            version: DEFAULT_WORDPRESS_VERSION.to_string(),
            locale: DEFAULT_WORDPRESS_LOCALE.to_string(),
            insecure_allow_xmlrpc: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoomlaSettings {
    pub version: String,
    pub admin_full_name: String,
}

impl Default for JoomlaSettings {
    fn default() -> Self {
        Self {
            version: DEFAULT_JOOMLA_VERSION.to_string(),
            admin_full_name: DEFAULT_JOOMLA_ADMIN_FULL_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrupalSettings {
    pub profile: String,
}

impl Default for DrupalSettings {
    fn default() -> Self {
        Self {
            profile: DEFAULT_DRUPAL_PROFILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaravelSettings {
    pub app_name: String,
    pub app_build_path: Option<String>,
    pub artisan_commands: Vec<String>,
    /// Deploy with a local-environment `.env`
    pub app_local_env: bool,
}

impl Default for LaravelSettings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            app_build_path: None,
            artisan_commands: DEFAULT_LARAVEL_ARTISAN_COMMANDS
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
            app_local_env: false,
        }
    }
}

/// What to deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LampStack,
    Apache,
    Mysql,
    Php,
    WordPress(WordPressSettings),
    Joomla(JoomlaSettings),
    Drupal(DrupalSettings),
    Laravel(LaravelSettings),
    DumpAnsibleFacts,
    /// A playbook name outside the built-in set
    Custom(String),
}

impl Action {
    /// Parse an action name, using default settings for app actions.
    pub fn parse(name: &str) -> Self {
        match name {
            "lamp-stack" => Self::LampStack,
            "apache" => Self::Apache,
            "mysql" => Self::Mysql,
            "php" => Self::Php,
            "wordpress" => Self::WordPress(WordPressSettings::default()),
            "joomla" => Self::Joomla(JoomlaSettings::default()),
            "drupal" => Self::Drupal(DrupalSettings::default()),
            "laravel" => Self::Laravel(LaravelSettings::default()),
            "dump-ansible-facts" => Self::DumpAnsibleFacts,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::LampStack => "lamp-stack",
            Self::Apache => "apache",
            Self::Mysql => "mysql",
            Self::Php => "php",
            Self::WordPress(_) => "wordpress",
            Self::Joomla(_) => "joomla",
            Self::Drupal(_) => "drupal",
            Self::Laravel(_) => "laravel",
            Self::DumpAnsibleFacts => "dump-ansible-facts",
            Self::Custom(name) => name,
        }
    }

    /// Playbook file run for this action.
    pub fn playbook(&self) -> String {
        format!("{}.yml", self.name())
    }

    /// Namespaced PHP extensions (`php-<ext>`) this action needs.
    ///
    /// Custom actions get none.
    pub fn required_php_extensions(&self) -> Vec<String> {
        if matches!(self, Self::Custom(_)) {
            return Vec::new();
        }
        required_php_extensions(self.name())
            .iter()
            .map(|ext| format!("{PHP_EXTENSION_PREFIX}{ext}"))
            .collect()
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// CMS actions create an admin account.
    pub fn needs_admin_password(&self) -> bool {
        matches!(self, Self::WordPress(_) | Self::Joomla(_) | Self::Drupal(_))
    }

    /// App actions create their own database and user.
    pub fn needs_database(&self) -> bool {
        self.needs_admin_password() || matches!(self, Self::Laravel(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
