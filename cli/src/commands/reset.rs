use anyhow::Result;
use hwameistor_api::v1alpha1::State;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing::{info, warn};

use crate::state::{ResourceKind, StateStore, StateStoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    AlreadyNotReady {
        kind: ResourceKind,
        name: String,
    },
    Updated {
        kind: ResourceKind,
        name: String,
        previous: Option<State>,
    },
}

impl Display for ResetOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyNotReady { kind, name } => {
                write!(f, "{kind} {name} is already in NotReady state.")
            }
            Self::Updated {
                kind,
                name,
                previous,
            } => write!(
                f,
                "{kind} {name} status is updated from {} to NotReady successfully.",
                display_state(previous.as_ref())
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResetError {
    #[error(transparent)]
    Fetch(#[from] StateStoreError),
    #[error("failed to update {kind} {name} status from {previous} to NotReady")]
    Update {
        kind: ResourceKind,
        name: String,
        previous: String,
        #[source]
        source: StateStoreError,
    },
}

fn display_state(state: Option<&State>) -> String {
    state.map_or_else(|| "<none>".to_string(), ToString::to_string)
}

/// Force the object's status state to `NotReady`. Objects already in that
/// state are left untouched.
pub async fn reset_state(store: &dyn StateStore, name: &str) -> Result<ResetOutcome, ResetError> {
    let kind = store.kind();
    let snapshot = store.fetch(name).await?;

    if snapshot.is_not_ready() {
        return Ok(ResetOutcome::AlreadyNotReady {
            kind,
            name: snapshot.name,
        });
    }

    if let Err(source) = store.write_state(&snapshot, &State::NotReady).await {
        warn!(
            "Status update of {} {} was rejected: {}",
            kind, snapshot.name, source
        );
        return Err(ResetError::Update {
            kind,
            previous: snapshot.state_display(),
            name: snapshot.name,
            source,
        });
    }

    info!(
        "Reset {} {} from {} to NotReady",
        kind,
        snapshot.name,
        snapshot.state_display()
    );
    Ok(ResetOutcome::Updated {
        kind,
        name: snapshot.name,
        previous: snapshot.state,
    })
}

/// Handle the reset action for one resource kind
pub async fn handle_reset_command(store: &dyn StateStore, name: &str) -> Result<()> {
    let outcome = reset_state(store, name).await?;
    println!("{outcome}");
    Ok(())
}
