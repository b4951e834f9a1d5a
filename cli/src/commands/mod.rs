pub mod get;
pub mod reset;

use anyhow::{Context, Result};
use clap::CommandFactory;
use hwameistor_api::v1alpha1::{LocalVolume, LocalVolumeReplica};
use kube::Client;
use std::time::Duration;

use crate::cli::{Cli, Commands, ResourceAction};
use crate::kubernetes::{ClientOptions, KubeStateStore, create_kube_client};
use crate::state::{ResourceKind, StateStore};

pub fn client_options(cli: &Cli) -> ClientOptions {
    ClientOptions {
        kubeconfig: cli.kubeconfig.clone(),
        context: cli.context.clone(),
        request_timeout: Some(Duration::from_secs(cli.request_timeout)),
    }
}

fn store_for(kind: ResourceKind, client: Client) -> Box<dyn StateStore> {
    match kind {
        ResourceKind::Volume => Box::new(KubeStateStore::<LocalVolume>::new(client)),
        ResourceKind::VolumeReplica => Box::new(KubeStateStore::<LocalVolumeReplica>::new(client)),
    }
}

/// Print help for the root command, or for one of its subcommands
fn print_help(subcommand: Option<&str>) -> Result<()> {
    let mut command = Cli::command();
    command.build();
    match subcommand.and_then(|name| command.find_subcommand_mut(name)) {
        Some(subcommand) => subcommand.print_help()?,
        None => command.print_help()?,
    }
    Ok(())
}

/// Run one action against a status store
pub async fn run_action(store: &dyn StateStore, action: &ResourceAction, cli: &Cli) -> Result<()> {
    match action {
        ResourceAction::Get { name } => get::handle_get_command(store, name, cli).await,
        ResourceAction::Reset { name } => reset::handle_reset_command(store, name).await,
    }
}

/// Main command dispatcher
pub async fn handle_command(cli: &Cli) -> Result<()> {
    let Some(command) = &cli.command else {
        return print_help(None);
    };

    let (kind, subcommand, action) = match command {
        Commands::Volume { action } => (ResourceKind::Volume, "volume", action),
        Commands::VolumeReplica { action } => {
            (ResourceKind::VolumeReplica, "volumereplica", action)
        }
    };

    let Some(action) = action else {
        return print_help(Some(subcommand));
    };

    let client = create_kube_client(&client_options(cli))
        .await
        .context("Failed to create Kubernetes client")?;

    let store = store_for(kind, client);
    run_action(&*store, action, cli).await
}
