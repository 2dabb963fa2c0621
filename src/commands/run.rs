//! `lampstack run`: turn command line arguments into a deployment and run it.

use ansiblekit::Client;
use ansiblekit::backend::cli::AnsibleCli;
use anyhow::{Context as _, Result, bail};
use std::io::IsTerminal;

use crate::Context;
use crate::action::{
    Action, DrupalSettings, JoomlaSettings, LaravelSettings, WordPressSettings,
};
use crate::cli::{RunArgs, SslArg};
use crate::config::{LampstackConfig, PathOverrides};
use crate::consent::{AutoApprove, ConsentProvider, NonInteractive, Terminal};
use crate::constants::{
    INSECURE_CLI_PASS_WARNING, RECENT_WORDPRESS_VERSIONS, SUPPORTED_PHP_VERSIONS,
};
use crate::intent::{DeploymentIntent, SslMode};
use crate::orchestrator::{Orchestrator, RC_FAILURE, report_error};
use crate::ui;

/// Passwords that were prompted for or given on the command line.
#[derive(Default)]
struct Secrets {
    database_password: Option<String>,
    admin_password: Option<String>,
    remote_sudo_password: Option<String>,
}

pub fn run(ctx: &Context, args: RunArgs) -> Result<i32> {
    check_cli_passwords(&args)?;
    validate(&args)?;

    let action = action_from_args(&args);
    if action.is_custom() {
        ui::warn(&format!(
            "'{}' is not a built-in action; running {} without extra defaults",
            action,
            action.playbook()
        ));
    }

    let interactive = !args.non_interactive && std::io::stdin().is_terminal();
    let secrets = collect_secrets(&args, &action, interactive)?;
    let intent = build_intent(&args, action, secrets)?;

    let config = LampstackConfig::load()?;
    let paths = config.run_paths(PathOverrides {
        project_dir: args.project_dir.clone(),
        private_data_dir: args.private_data_dir.clone(),
        collections_path: args.collections_path.clone(),
    })?;
    let client = match config.executables() {
        Some((galaxy, runner)) => Client::with_backend(Box::new(AnsibleCli::with_executables(
            galaxy.to_string_lossy(),
            runner.to_string_lossy(),
        ))),
        None => match Client::new() {
            Ok(client) => client,
            Err(e) => {
                report_error(&anyhow::Error::new(e).context("Ansible is not available"));
                return Ok(RC_FAILURE);
            }
        },
    };

    if !ctx.quiet {
        ui::header(&format!("lampstack {}", intent.action));
        ui::kv("web server", &format!("{}@{}", intent.web_user, intent.web_host));
        ui::kv(
            "database server",
            &format!(
                "{}@{}",
                intent.database_system_user, intent.database_system_host
            ),
        );
        ui::kv("project", &paths.project_dir.display().to_string());
        println!();
    }

    let mut consent: Box<dyn ConsentProvider> = if args.galaxy_ok {
        Box::new(AutoApprove)
    } else if interactive {
        Box::new(Terminal)
    } else {
        Box::new(NonInteractive)
    };

    let rc = Orchestrator::new(&client, paths).run(&intent, consent.as_mut());
    if rc == 0 {
        ui::success(&format!("{} finished", intent.action));
    } else {
        ui::error(&format!("{} failed (rc={rc})", intent.action));
    }
    Ok(rc)
}

/// Split `<user>@<host>`.
fn parse_user_host(value: &str) -> Result<(String, String)> {
    match value.split_once('@') {
        Some((user, host)) if !user.is_empty() && !host.is_empty() && !host.contains('@') => {
            Ok((user.to_string(), host.to_string()))
        }
        _ => bail!("Expected <user>@<host>, got '{value}'"),
    }
}

/// Passwords on the command line end up in shell history and `ps`.
fn check_cli_passwords(args: &RunArgs) -> Result<()> {
    let given = args.database_password.is_some() || args.admin_password.is_some();
    if given && !args.insecure_cli_password {
        bail!(INSECURE_CLI_PASS_WARNING);
    }
    Ok(())
}

fn validate(args: &RunArgs) -> Result<()> {
    if let Some(version) = &args.php_version
        && !SUPPORTED_PHP_VERSIONS.contains(&version.as_str())
    {
        bail!(
            "Unsupported PHP version '{version}'. Supported: {}",
            SUPPORTED_PHP_VERSIONS.join(", ")
        );
    }

    if args.action == "wordpress"
        && !RECENT_WORDPRESS_VERSIONS.contains(&args.wordpress_version.as_str())
    {
        ui::warn(&format!(
            "WordPress version '{}' is not a recent release; the download may fail",
            args.wordpress_version
        ));
    }

    if args.ssl_test_cert && args.ssl != SslArg::Certbot {
        ui::warn("--ssl-test-cert only applies to certbot certificates");
    }
    Ok(())
}

fn action_from_args(args: &RunArgs) -> Action {
    match Action::parse(&args.action) {
        Action::WordPress(_) => Action::WordPress(WordPressSettings {
            version: args.wordpress_version.clone(),
            locale: args.wordpress_locale.clone(),
            insecure_allow_xmlrpc: args.wordpress_insecure_allow_xmlrpc,
        }),
        Action::Joomla(_) => Action::Joomla(JoomlaSettings {
            version: args.joomla_version.clone(),
            admin_full_name: args.joomla_admin_full_name.clone(),
        }),
        Action::Drupal(_) => Action::Drupal(DrupalSettings {
            profile: args.drupal_profile.clone(),
        }),
        Action::Laravel(defaults) => Action::Laravel(LaravelSettings {
            app_name: args.app_name.clone(),
            app_build_path: args.app_build_path.clone(),
            artisan_commands: args
                .laravel_artisan_commands
                .clone()
                .unwrap_or(defaults.artisan_commands),
            app_local_env: args.app_local_env,
        }),
        other => other,
    }
}

fn prompt_password(prompt: &str) -> Result<String> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))
}

fn collect_secrets(args: &RunArgs, action: &Action, interactive: bool) -> Result<Secrets> {
    let mut secrets = Secrets {
        database_password: args.database_password.clone(),
        admin_password: args.admin_password.clone(),
        remote_sudo_password: None,
    };

    if args.ask_remote_sudo {
        if !interactive {
            bail!("--ask-remote-sudo needs an interactive terminal");
        }
        secrets.remote_sudo_password = Some(prompt_password("Remote sudo password")?);
    }

    let wants_db_password =
        action.needs_database() || args.database_username.is_some();
    if wants_db_password && secrets.database_password.is_none() {
        if interactive {
            secrets.database_password = Some(prompt_password("Database password")?);
        } else {
            log::warn!("No database password given for {action}");
        }
    }

    if action.needs_admin_password() && secrets.admin_password.is_none() {
        if interactive {
            secrets.admin_password = Some(prompt_password("Admin password")?);
        } else {
            log::warn!("No admin password given for {action}");
        }
    }

    Ok(secrets)
}

fn build_intent(args: &RunArgs, action: Action, secrets: Secrets) -> Result<DeploymentIntent> {
    let (web_user, web_host) = parse_user_host(&args.web)?;
    let mut builder = DeploymentIntent::builder(web_user, web_host, action)
        .apache_server_admin(&args.apache_server_admin)
        .apache_vhost_name(&args.apache_vhost_name)
        .apache_document_root(&args.apache_document_root)
        .php_extensions(args.php_extensions.clone())
        .site_title(&args.site_title)
        .admin_username(&args.admin_username)
        .admin_email(&args.admin_email)
        .ssl_mode(match args.ssl {
            SslArg::Certbot => SslMode::Certbot,
            SslArg::Selfsigned => SslMode::SelfSigned,
            SslArg::Disabled => SslMode::Disabled,
        })
        .ssl_test_cert(args.ssl_test_cert)
        .domains_for_ssl(args.domains_for_ssl.clone())
        .extra_packages(args.extra_packages.clone())
        .extra_env_vars(args.extra_env_vars.clone());

    if let Some(db) = &args.database_system {
        let (user, host) = parse_user_host(db)?;
        builder = builder.database_system_user(user).database_system_host(host);
    }
    if let Some(v) = &args.database_username {
        builder = builder.database_username(v);
    }
    if let Some(v) = secrets.database_password {
        builder = builder.database_password(v);
    }
    if let Some(v) = &args.database_name {
        builder = builder.database_name(v);
    }
    if let Some(v) = &args.database_host {
        builder = builder.database_host(v);
    }
    if let Some(v) = &args.database_table_prefix {
        builder = builder.database_table_prefix(v);
    }
    if let Some(v) = &args.php_version {
        builder = builder.php_version(v);
    }
    if let Some(v) = &args.composer_packages {
        builder = builder.composer_packages(v.clone());
    }
    if let Some(v) = &args.composer_project {
        builder = builder.composer_project(v);
    }
    if let Some(v) = &args.composer_working_directory {
        builder = builder.composer_working_directory(v);
    }
    if let Some(v) = secrets.admin_password {
        builder = builder.admin_password(v);
    }
    if let Some(v) = &args.email_for_ssl {
        builder = builder.email_for_ssl(v);
    }
    if let Some(v) = secrets.remote_sudo_password {
        builder = builder.remote_sudo_password(v);
    }
    if let Some(v) = &args.ssh_key_file {
        builder = builder.ssh_key_file(v);
    }

    Ok(builder.build())
}
