use async_trait::async_trait;
use hwameistor_api::constants::FIELD_MANAGER;
use hwameistor_api::v1alpha1::{LocalVolume, LocalVolumeReplica, State};
use kube::api::{Patch, PatchParams};
use kube::config::{KubeConfigOptions, Kubeconfig, KubeconfigError};
use kube::{Api, Client, Config, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::state::{ResourceKind, StateSnapshot, StateStore, StateStoreError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("kubeconfig does not exist at {}", .0.display())]
    MissingKubeconfig(PathBuf),
    #[error("unable to determine the home directory for the default kubeconfig")]
    NoHomeDirectory,
    #[error("failed to load kubeconfig from {}: {source}", path.display())]
    Kubeconfig {
        path: PathBuf,
        #[source]
        source: KubeconfigError,
    },
    #[error("failed to create Kubernetes client: {0}")]
    Client(#[from] kube::Error),
}

/// How to reach the API server.
#[derive(Clone, Debug, Default)]
pub struct ClientOptions {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub request_timeout: Option<Duration>,
}

/// `$HOME/.kube/config`
pub fn default_kubeconfig_path() -> Result<PathBuf, ClientError> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(|home| Path::new(&home).join(".kube").join("config"))
        .ok_or(ClientError::NoHomeDirectory)
}

/// Build the client configuration from a kubeconfig file on disk.
pub async fn load_config(options: &ClientOptions) -> Result<Config, ClientError> {
    let path = match &options.kubeconfig {
        Some(path) => path.clone(),
        None => default_kubeconfig_path()?,
    };

    if !path.exists() {
        return Err(ClientError::MissingKubeconfig(path));
    }

    debug!("Loading kubeconfig from {}", path.display());
    let kubeconfig = Kubeconfig::read_from(&path).map_err(|source| ClientError::Kubeconfig {
        path: path.clone(),
        source,
    })?;

    let kubeconfig_options = KubeConfigOptions {
        context: options.context.clone(),
        ..KubeConfigOptions::default()
    };

    let mut config = Config::from_custom_kubeconfig(kubeconfig, &kubeconfig_options)
        .await
        .map_err(|source| ClientError::Kubeconfig { path, source })?;

    if let Some(timeout) = options.request_timeout {
        config.connect_timeout = Some(timeout);
        config.read_timeout = Some(timeout);
        config.write_timeout = Some(timeout);
    }

    Ok(config)
}

pub async fn create_kube_client(options: &ClientOptions) -> Result<Client, ClientError> {
    let config = load_config(options).await?;
    debug!("Connecting to {}", config.cluster_url);
    Ok(Client::try_from(config)?)
}

/// A custom resource whose status carries a [`State`].
pub trait StatefulResource:
    Resource<DynamicType = ()> + Clone + Debug + DeserializeOwned + Send + Sync + 'static
{
    const KIND: ResourceKind;

    fn current_state(&self) -> Option<&State>;
}

impl StatefulResource for LocalVolume {
    const KIND: ResourceKind = ResourceKind::Volume;

    fn current_state(&self) -> Option<&State> {
        self.state()
    }
}

impl StatefulResource for LocalVolumeReplica {
    const KIND: ResourceKind = ResourceKind::VolumeReplica;

    fn current_state(&self) -> Option<&State> {
        self.state()
    }
}

/// [`StateStore`] backed by the cluster-scoped API of `K`.
pub struct KubeStateStore<K> {
    api: Api<K>,
}

impl<K: StatefulResource> KubeStateStore<K> {
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }

    fn snapshot(object: &K) -> StateSnapshot {
        StateSnapshot {
            name: object.name_any(),
            state: object.current_state().cloned(),
            resource_version: object.resource_version(),
            created: object.creation_timestamp().map(|ts| ts.0),
        }
    }

    fn map_error(name: &str, error: kube::Error) -> StateStoreError {
        match error {
            kube::Error::Api(response) if response.code == 404 => StateStoreError::NotFound {
                kind: K::KIND,
                name: name.to_string(),
            },
            kube::Error::Api(response) if response.code == 409 => StateStoreError::Conflict {
                kind: K::KIND,
                name: name.to_string(),
                message: response.message,
            },
            error => StateStoreError::Api(error),
        }
    }
}

/// Merge patch that sets only `status.state`, guarded by the resource version
/// the caller observed.
pub fn state_patch(snapshot: &StateSnapshot, state: &State) -> serde_json::Value {
    let mut patch = json!({
        "status": {
            "state": state,
        },
    });

    if let Some(resource_version) = &snapshot.resource_version {
        patch["metadata"] = json!({ "resourceVersion": resource_version });
    }

    patch
}

#[async_trait]
impl<K: StatefulResource> StateStore for KubeStateStore<K> {
    fn kind(&self) -> ResourceKind {
        K::KIND
    }

    async fn fetch(&self, name: &str) -> Result<StateSnapshot, StateStoreError> {
        debug!("Fetching {} {}", K::KIND, name);
        match self.api.get_opt(name).await {
            Ok(Some(object)) => Ok(Self::snapshot(&object)),
            Ok(None) => Err(StateStoreError::NotFound {
                kind: K::KIND,
                name: name.to_string(),
            }),
            Err(err) => Err(Self::map_error(name, err)),
        }
    }

    async fn write_state(
        &self,
        snapshot: &StateSnapshot,
        state: &State,
    ) -> Result<(), StateStoreError> {
        debug!(
            "Patching {} {} status state to {} at resource version {:?}",
            K::KIND,
            snapshot.name,
            state,
            snapshot.resource_version
        );

        let params = PatchParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..PatchParams::default()
        };
        let patch = state_patch(snapshot, state);

        self.api
            .patch_status(&snapshot.name, &params, &Patch::Merge(&patch))
            .await
            .map(|_| ())
            .map_err(|err| Self::map_error(&snapshot.name, err))
    }
}
