//! # lampstack
//!
//! Resolves a LAMP deployment request into the inventory and extra
//! variables an Ansible playbook needs, makes sure the project's Galaxy
//! collections are installed, and runs the playbook once.
//!
//! The pipeline is a chain of pure steps followed by one side-effecting run:
//!
//! ```text
//! DeploymentIntent -> DefaultedConfiguration -> ExtravarSet -> Orchestrator::run
//! ```

pub mod action;
pub mod cli;
pub mod commands;
pub mod config;
pub mod consent;
pub mod constants;
pub mod defaults;
pub mod extravars;
pub mod hostname;
pub mod intent;
pub mod inventory;
pub mod orchestrator;
pub mod paths;
pub mod progress;
pub mod reconcile;
pub mod ui;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}
