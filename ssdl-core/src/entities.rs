//! Section record types and the document root
//!
//! Plain data shapes the parser assembles into. Each record is owned by its
//! immediate parent; the [`Ssdl`] root owns everything, so a document is a
//! tree with no back references.

use crate::collections::{Mapping, Sequence};
use crate::enums::{
    AppLayout, AppType, DeploymentType, Provider, Role, Scope, SensorType, VisType,
};
use crate::value::{Value, ValueType};
use crate::Uri;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic version triple. All components are non-negative and required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The `.service` preamble: what the deployment is and which vertical it
/// serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub version: Version,
    pub scope: Scope,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{} ({})", self.name, self.version, self.scope)
    }
}

/// Named fields a sensor emits, with example or default values per field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorFormat {
    pub props: Mapping<Value>,
}

/// Provider-side query a sensor reading is selected with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Entity type requested from the provider (e.g. `AirQualityObserved`).
    pub entity: String,
    /// Attribute names to select from the entity.
    pub select: Sequence<String>,
}

/// One data source: where readings come from and what shape they have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub sensor_type: SensorType,
    pub provider: Provider,
    pub uri: Uri,
    pub format: SensorFormat,
    pub query: Option<Query>,
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.sensor_type, self.provider, self.uri)
    }
}

/// The `.data` section: sensors keyed by identifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorData {
    pub sensors: Mapping<Sensor>,
}

/// A visualization configuration block.
///
/// `format` declares the *expected types* of the rendered fields, not values;
/// it is validated against the registry schema for `vis_type` at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    pub vis_type: VisType,
    pub format: Mapping<ValueType>,
}

/// The `.application` section: frontend shape and its graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub app_type: AppType,
    pub layout: AppLayout,
    pub roles: Sequence<Role>,
    pub graphs: Mapping<Visualization>,
}

/// One deployment target. Descriptive only; nothing here is ever executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentEnv {
    pub uri: Uri,
    pub port: Option<u16>,
    pub deploy_type: DeploymentType,
    pub credentials: Option<Mapping<String>>,
}

impl fmt::Display for DeploymentEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{} ({})", self.uri, port, self.deploy_type),
            None => write!(f, "{} ({})", self.uri, self.deploy_type),
        }
    }
}

/// The `.deployment` section: environments keyed by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Deployment {
    pub envs: Mapping<DeploymentEnv>,
}

/// A fully assembled SSDL document. Immutable once constructed; parsing is
/// the only constructor path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ssdl {
    pub service: Service,
    pub data: SensorData,
    pub application: Application,
    pub deployment: Deployment,
}
