use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hwameistor_api::v1alpha1::State;
use strum::Display;
use thiserror::Error;

/// The resource kinds the doctor can inspect, displayed the way they appear
/// in command output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum ResourceKind {
    #[strum(serialize = "volume")]
    Volume,
    #[strum(serialize = "volumeReplica")]
    VolumeReplica,
}

/// The part of a remote object that the commands read and write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateSnapshot {
    pub name: String,
    pub state: Option<State>,
    pub resource_version: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl StateSnapshot {
    pub fn is_not_ready(&self) -> bool {
        self.state.as_ref().is_some_and(State::is_not_ready)
    }

    pub fn state_display(&self) -> String {
        self.state
            .as_ref()
            .map_or_else(|| "<none>".to_string(), ToString::to_string)
    }
}

#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("{kind} \"{name}\" not found")]
    NotFound { kind: ResourceKind, name: String },
    #[error("{kind} \"{name}\" was modified concurrently, fetch it again and retry: {message}")]
    Conflict {
        kind: ResourceKind,
        name: String,
        message: String,
    },
    #[error("Kubernetes API request failed: {0}")]
    Api(#[from] kube::Error),
}

impl StateStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Reads and writes the status state of one resource kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StateStore: Send + Sync {
    fn kind(&self) -> ResourceKind;

    async fn fetch(&self, name: &str) -> Result<StateSnapshot, StateStoreError>;

    /// Writes `state` as the object's status state. The write is rejected with
    /// [`StateStoreError::Conflict`] if the object changed since `snapshot`
    /// was fetched.
    async fn write_state(
        &self,
        snapshot: &StateSnapshot,
        state: &State,
    ) -> Result<(), StateStoreError>;
}
