//! In-memory status store shared by the command tests

use async_trait::async_trait;
use hwameidoc::state::{ResourceKind, StateSnapshot, StateStore, StateStoreError};
use hwameistor_api::v1alpha1::State;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Holds the objects of a single kind and counts status writes.
pub struct InMemoryStateStore {
    kind: ResourceKind,
    objects: Mutex<HashMap<String, StateSnapshot>>,
    writes: AtomicUsize,
}

impl InMemoryStateStore {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            objects: Mutex::new(HashMap::new()),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn with_object(self, name: &str, state: Option<State>) -> Self {
        self.objects.lock().unwrap().insert(
            name.to_string(),
            StateSnapshot {
                name: name.to_string(),
                state,
                resource_version: Some("1".to_string()),
                created: None,
            },
        );
        self
    }

    pub fn state_of(&self, name: &str) -> Option<State> {
        self.objects
            .lock()
            .unwrap()
            .get(name)
            .and_then(|snapshot| snapshot.state.clone())
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    async fn fetch(&self, name: &str) -> Result<StateSnapshot, StateStoreError> {
        self.objects
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| StateStoreError::NotFound {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    async fn write_state(
        &self,
        snapshot: &StateSnapshot,
        state: &State,
    ) -> Result<(), StateStoreError> {
        let mut objects = self.objects.lock().unwrap();
        let current = objects
            .get_mut(&snapshot.name)
            .ok_or_else(|| StateStoreError::NotFound {
                kind: self.kind,
                name: snapshot.name.clone(),
            })?;

        current.state = Some(state.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
