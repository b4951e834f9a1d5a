use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Lifecycle state shared by volumes and volume replicas.
///
/// The operator owns this vocabulary, so values this crate does not know are
/// kept verbatim in [`State::Unknown`] and written back unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumString, EnumIter, IntoStaticStr)]
#[derive(Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum State {
    Creating,
    Created,
    Ready,
    NotReady,
    ToBeUpdated,
    InUse,
    ToBeMounted,
    ToBeUnmount,
    ToBeDeleted,
    Deleted,
    Cleaned,
    Empty,
    #[strum(default)]
    Unknown(String),
}

impl State {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown(value) => value,
            known => {
                let name: &'static str = known.into();
                name
            }
        }
    }

    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for State {
    fn from(value: String) -> Self {
        // Parsing never fails: unrecognized values land in the default variant.
        Self::from_str(&value).unwrap_or(Self::Unknown(value))
    }
}

impl From<State> for String {
    fn from(state: State) -> Self {
        match state {
            State::Unknown(value) => value,
            known => known.as_str().to_owned(),
        }
    }
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityTopology {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
}

#[derive(Default, CustomResource, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[kube(
    kind = "LocalVolume",
    group = "hwameistor.io",
    version = "v1alpha1",
    plural = "localvolumes",
    shortname = "lv",
    status = "LocalVolumeStatus",
    schema = "disabled"
)]
#[kube(derive = "Default")]
#[kube(derive = "PartialEq")]
#[serde(rename_all = "camelCase")]
pub struct LocalVolumeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_capacity_bytes: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_number: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumegroup: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convertible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<AccessibilityTopology>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_volume_claim_namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_volume_claim_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalVolumeStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocated_capacity_bytes: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replicas: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_node: Option<String>,
}

impl LocalVolume {
    pub fn state(&self) -> Option<&State> {
        self.status.as_ref().and_then(|status| status.state.as_ref())
    }
}

#[derive(Default, CustomResource, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[kube(
    kind = "LocalVolumeReplica",
    group = "hwameistor.io",
    version = "v1alpha1",
    plural = "localvolumereplicas",
    shortname = "lvr",
    status = "LocalVolumeReplicaStatus",
    schema = "disabled"
)]
#[kube(derive = "Default")]
#[kube(derive = "PartialEq")]
#[serde(rename_all = "camelCase")]
pub struct LocalVolumeReplicaSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_capacity_bytes: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalVolumeReplicaStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocated_capacity_bytes: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced: Option<bool>,
}

impl LocalVolumeReplica {
    pub fn state(&self) -> Option<&State> {
        self.status.as_ref().and_then(|status| status.state.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::{CustomResourceExt, Resource};
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case("Ready", State::Ready)]
    #[case("NotReady", State::NotReady)]
    #[case("ToBeDeleted", State::ToBeDeleted)]
    #[case("InUse", State::InUse)]
    #[case("notready", State::Unknown("notready".to_string()))]
    #[case("Migrating", State::Unknown("Migrating".to_string()))]
    fn test_state_from_string(#[case] input: &str, #[case] expected: State) {
        assert_eq!(State::from(input.to_string()), expected);
        assert_eq!(State::from(input.to_string()).to_string(), input);
    }

    #[test]
    fn test_known_states_round_trip_through_strings() {
        for state in State::iter().filter(|s| !matches!(s, State::Unknown(_))) {
            let serialized = String::from(state.clone());
            assert_eq!(State::from(serialized), state);
        }
    }

    #[test]
    fn test_only_not_ready_is_the_sentinel() {
        assert!(State::NotReady.is_not_ready());
        assert!(!State::Ready.is_not_ready());
        assert!(!State::Unknown("NotReady ".to_string()).is_not_ready());
    }

    #[test]
    fn test_state_serializes_as_plain_string() {
        let status = LocalVolumeStatus {
            state: Some(State::NotReady),
            ..Default::default()
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "NotReady" }));
    }

    #[test]
    fn test_local_volume_deserialization() {
        let volume: LocalVolume = serde_yaml::from_str(
            r"
apiVersion: hwameistor.io/v1alpha1
kind: LocalVolume
metadata:
  name: pvc-1187f716-db92-47ac-a5fc-44fd19047a81
  resourceVersion: '4242'
spec:
  poolName: LocalStorage_PoolHDD
  requiredCapacityBytes: 1073741824
  replicaNumber: 2
  volumegroup: lvg-1187f716
  convertible: true
  accessibility:
    nodes:
    - node-1
    - node-2
  persistentVolumeClaimNamespace: default
  persistentVolumeClaimName: data-mysql-0
  volumeQoS:
    iops: '1000'
status:
  state: Ready
  allocatedCapacityBytes: 1073741824
  replicas:
  - pvc-1187f716-db92-47ac-a5fc-44fd19047a81-fsnjsf
  publishedNode: node-1
  usedCapacityBytes: 4096
",
        )
        .unwrap();

        assert_eq!(volume.state(), Some(&State::Ready));
        assert_eq!(volume.spec.replica_number, Some(2));
        assert_eq!(
            volume.spec.accessibility.unwrap().nodes,
            vec!["node-1".to_string(), "node-2".to_string()]
        );
        assert_eq!(
            volume.status.unwrap().published_node.as_deref(),
            Some("node-1")
        );
    }

    #[test]
    fn test_local_volume_replica_without_status() {
        let replica: LocalVolumeReplica = serde_yaml::from_str(
            r"
apiVersion: hwameistor.io/v1alpha1
kind: LocalVolumeReplica
metadata:
  name: pvc-1187f716-db92-47ac-a5fc-44fd19047a81-fsnjsf
spec:
  volumeName: pvc-1187f716-db92-47ac-a5fc-44fd19047a81
  nodeName: node-1
",
        )
        .unwrap();

        assert_eq!(replica.state(), None);
        assert_eq!(replica.spec.node_name.as_deref(), Some("node-1"));
    }

    #[test]
    fn test_local_volume_replica_keeps_unknown_state() {
        let replica: LocalVolumeReplica = serde_json::from_value(serde_json::json!({
            "apiVersion": "hwameistor.io/v1alpha1",
            "kind": "LocalVolumeReplica",
            "metadata": { "name": "replica-a" },
            "spec": {},
            "status": { "state": "Resizing", "synced": true }
        }))
        .unwrap();

        assert_eq!(
            replica.state(),
            Some(&State::Unknown("Resizing".to_string()))
        );
        let json = serde_json::to_value(&replica).unwrap();
        assert_eq!(json["status"]["state"], "Resizing");
    }

    #[test]
    fn test_resources_are_cluster_scoped() {
        let crd = LocalVolume::crd();
        assert_eq!(crd.spec.scope, "Cluster");
        assert_eq!(crd.spec.names.short_names, Some(vec!["lv".to_string()]));

        let crd = LocalVolumeReplica::crd();
        assert_eq!(crd.spec.scope, "Cluster");
        assert_eq!(crd.spec.names.plural, "localvolumereplicas");

        assert_eq!(LocalVolume::group(&()), "hwameistor.io");
        assert_eq!(LocalVolume::version(&()), "v1alpha1");
        assert_eq!(LocalVolumeReplica::kind(&()), "LocalVolumeReplica");
    }
}
