//! `rotki-devtool new-user --username <name> [--password <pw>]`: create a
//! development account and seed it.
//!
//! Steps, in order: create the account with premium sync and usage
//! analytics disabled, store the default RPC nodes, register premium
//! credentials when both `ROTKI_API_KEY` and `ROTKI_API_SECRET` are set,
//! register each external service whose variable is set, log out.
//!
//! The session logs out on every exit path.  A failure after the account was
//! created leaves the account on disk as far as it got.

use anyhow::{Context, Result};

use crate::{
    config::Config,
    credentials::{EnvCredentials, ExternalService, PREMIUM_API_KEY_VAR, PREMIUM_API_SECRET_VAR},
    data_handler::{
        AccountSession, DataHandler, ModifiableSettings, default_rpc_nodes,
        local::LocalDataHandler,
    },
    error::DevToolError,
    paths::{self, Environment},
    ui::Stages,
};

pub fn run(cfg: &Config, username: &str, password: &str) -> Result<()> {
    let data_dir = paths::resolve(cfg, Environment::Development)?;
    let mut handler = LocalDataHandler::open(&data_dir)
        .map_err(DevToolError::from)
        .with_context(|| format!("opening data directory {}", data_dir.display()))?;

    tracing::info!("Creating new user {username} in {}", data_dir.display());
    bootstrap(
        &mut handler,
        username,
        password,
        &EnvCredentials::from_process_env(),
    )
}

/// Create and seed `username` through `handler`.
pub fn bootstrap<H: DataHandler>(
    handler: &mut H,
    username: &str,
    password: &str,
    credentials: &EnvCredentials,
) -> Result<()> {
    let mut stages = Stages::new("New user");

    let mut session = stages.run("Create account", move || {
        AccountSession::create(
            handler,
            username,
            password,
            ModifiableSettings::development(),
        )
        .map_err(DevToolError::from)
        .with_context(|| format!("creating user {username}"))
    })?;

    let nodes = default_rpc_nodes();
    stages.run("RPC nodes", || {
        session
            .populate_rpc_nodes(&nodes)
            .map(|()| nodes.len())
            .map_err(DevToolError::from)
            .context("populating rpc nodes")
    })?;

    match &credentials.premium {
        Some(premium) => {
            tracing::info!("Setting up rotki API keys");
            stages.run("Premium", || {
                session
                    .set_premium(premium)
                    .map_err(DevToolError::from)
                    .context("storing premium credentials")
            })?;
        },
        None => stages.skip(
            "Premium",
            &format!("{PREMIUM_API_KEY_VAR}/{PREMIUM_API_SECRET_VAR} not set"),
        ),
    }

    for service in ExternalService::ALL {
        let label = service.to_string();
        match credentials.external.iter().find(|c| c.service == service) {
            Some(credential) => {
                tracing::info!("Setting up {service}");
                stages.run(&label, || {
                    session
                        .add_external_service_credentials(std::slice::from_ref(credential))
                        .map_err(DevToolError::from)
                        .with_context(|| format!("storing {service} credentials"))
                })?;
            },
            None => stages.skip(&label, &format!("{} not set", service.env_var())),
        }
    }

    stages.run("Logout", || {
        session
            .close()
            .map_err(DevToolError::from)
            .context("logging out")
    })?;
    stages.finish();
    Ok(())
}
