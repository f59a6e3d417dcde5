//! Fixed tag enums for SSDL records
//!
//! Every tag has a canonical, case-sensitive source text; `FromStr` accepts
//! exactly that text and nothing else. The parser maps a failed `FromStr`
//! onto a validation error naming the offending tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domain scope of a service. The 15 fixed smart-city verticals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Service,
    Industry,
    Manifacturing,
    Education,
    Healthcare,
    SocialPrograms,
    Government,
    Energy,
    Water,
    Environment,
    Transportation,
    Communication,
    PublicSafety,
    UrbanPlanning,
    Infrastructure,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Service => "Service",
            Scope::Industry => "Industry",
            Scope::Manifacturing => "Manifacturing",
            Scope::Education => "Education",
            Scope::Healthcare => "Healthcare",
            Scope::SocialPrograms => "SocialPrograms",
            Scope::Government => "Government",
            Scope::Energy => "Energy",
            Scope::Water => "Water",
            Scope::Environment => "Environment",
            Scope::Transportation => "Transportation",
            Scope::Communication => "Communication",
            Scope::PublicSafety => "PublicSafety",
            Scope::UrbanPlanning => "UrbanPlanning",
            Scope::Infrastructure => "Infrastructure",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Service" => Ok(Scope::Service),
            "Industry" => Ok(Scope::Industry),
            "Manifacturing" => Ok(Scope::Manifacturing),
            "Education" => Ok(Scope::Education),
            "Healthcare" => Ok(Scope::Healthcare),
            "SocialPrograms" => Ok(Scope::SocialPrograms),
            "Government" => Ok(Scope::Government),
            "Energy" => Ok(Scope::Energy),
            "Water" => Ok(Scope::Water),
            "Environment" => Ok(Scope::Environment),
            "Transportation" => Ok(Scope::Transportation),
            "Communication" => Ok(Scope::Communication),
            "PublicSafety" => Ok(Scope::PublicSafety),
            "UrbanPlanning" => Ok(Scope::UrbanPlanning),
            "Infrastructure" => Ok(Scope::Infrastructure),
            _ => Err(format!("Invalid scope: {}", s)),
        }
    }
}

/// Data source platform a sensor is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    Fiware,
    Dataskop,
    Fotec,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Fiware => "Fiware",
            Provider::Dataskop => "Dataskop",
            Provider::Fotec => "Fotec",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fiware" => Ok(Provider::Fiware),
            "Dataskop" => Ok(Provider::Dataskop),
            "Fotec" => Ok(Provider::Fotec),
            _ => Err(format!("Invalid provider: {}", s)),
        }
    }
}

/// Kind of data source behind a sensor entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    SmartMeter,
    Actuator,
    Device,
    Vehicle,
    Person,
    Robot,
    Other,
}

impl SensorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::SmartMeter => "SmartMeter",
            SensorType::Actuator => "Actuator",
            SensorType::Device => "Device",
            SensorType::Vehicle => "Vehicle",
            SensorType::Person => "Person",
            SensorType::Robot => "Robot",
            SensorType::Other => "Other",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SmartMeter" => Ok(SensorType::SmartMeter),
            "Actuator" => Ok(SensorType::Actuator),
            "Device" => Ok(SensorType::Device),
            "Vehicle" => Ok(SensorType::Vehicle),
            "Person" => Ok(SensorType::Person),
            "Robot" => Ok(SensorType::Robot),
            "Other" => Ok(SensorType::Other),
            _ => Err(format!("Invalid sensor type: {}", s)),
        }
    }
}

/// Application delivery target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppType {
    WebApp,
    MobileApp,
    DesktopApp,
    IotApp,
}

impl AppType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppType::WebApp => "WebApp",
            AppType::MobileApp => "MobileApp",
            AppType::DesktopApp => "DesktopApp",
            AppType::IotApp => "IotApp",
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WebApp" => Ok(AppType::WebApp),
            "MobileApp" => Ok(AppType::MobileApp),
            "DesktopApp" => Ok(AppType::DesktopApp),
            "IotApp" => Ok(AppType::IotApp),
            _ => Err(format!("Invalid app type: {}", s)),
        }
    }
}

/// Application window/page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppLayout {
    SinglePage,
    MultiPage,
    MultiWindow,
}

impl AppLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppLayout::SinglePage => "SinglePage",
            AppLayout::MultiPage => "MultiPage",
            AppLayout::MultiWindow => "MultiWindow",
        }
    }
}

impl fmt::Display for AppLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SinglePage" => Ok(AppLayout::SinglePage),
            "MultiPage" => Ok(AppLayout::MultiPage),
            "MultiWindow" => Ok(AppLayout::MultiWindow),
            _ => Err(format!("Invalid app layout: {}", s)),
        }
    }
}

/// Authentication role an application may grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    SuperUser,
    Admin,
    User,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperUser => "SuperUser",
            Role::Admin => "Admin",
            Role::User => "User",
            Role::Guest => "Guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SuperUser" => Ok(Role::SuperUser),
            "Admin" => Ok(Role::Admin),
            "User" => Ok(Role::User),
            "Guest" => Ok(Role::Guest),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Visualization kind. The closed set the registry knows how to type-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisType {
    Table,
    Chart,
    Map,
    Line,
}

impl VisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisType::Table => "Table",
            VisType::Chart => "Chart",
            VisType::Map => "Map",
            VisType::Line => "Line",
        }
    }

    /// All known visualization kinds, in registry order.
    pub const ALL: [VisType; 4] = [VisType::Table, VisType::Chart, VisType::Map, VisType::Line];
}

impl fmt::Display for VisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Table" => Ok(VisType::Table),
            "Chart" => Ok(VisType::Chart),
            "Map" => Ok(VisType::Map),
            "Line" => Ok(VisType::Line),
            _ => Err(format!("Invalid visualization type: {}", s)),
        }
    }
}

/// Mechanism a deployment environment is provisioned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentType {
    Docker,
    Kubernetes,
    DockerCompose,
    Helm,
    Ansible,
    Terraform,
    CloudFormation,
    Serverless,
}

impl DeploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentType::Docker => "Docker",
            DeploymentType::Kubernetes => "Kubernetes",
            DeploymentType::DockerCompose => "DockerCompose",
            DeploymentType::Helm => "Helm",
            DeploymentType::Ansible => "Ansible",
            DeploymentType::Terraform => "Terraform",
            DeploymentType::CloudFormation => "CloudFormation",
            DeploymentType::Serverless => "Serverless",
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Docker" => Ok(DeploymentType::Docker),
            "Kubernetes" => Ok(DeploymentType::Kubernetes),
            "DockerCompose" => Ok(DeploymentType::DockerCompose),
            "Helm" => Ok(DeploymentType::Helm),
            "Ansible" => Ok(DeploymentType::Ansible),
            "Terraform" => Ok(DeploymentType::Terraform),
            "CloudFormation" => Ok(DeploymentType::CloudFormation),
            "Serverless" => Ok(DeploymentType::Serverless),
            _ => Err(format!("Invalid deployment type: {}", s)),
        }
    }
}
