//! Project list read from the `projects` key of a config file.

use std::{
    collections::{HashMap, HashSet},
    sync::LazyLock,
};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Pattern shared by project and namespace names.
pub const NAME_PATTERN: &str = r"^[-a-zA-Z0-9_]{2,}$";

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(NAME_PATTERN).expect("name pattern is a valid regex")
});

/// Per-channel behaviour, shared by projects and their namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelOptions {
    /// Forward channel messages to the admin channel.
    pub watch: bool,
    /// Allow clients to publish directly.
    pub publish: bool,
    /// Allow anonymous (unauthenticated) subscriptions.
    pub anonymous: bool,
    /// Track which clients are subscribed to a channel.
    pub presence: bool,
    /// Send join and leave messages when clients subscribe or unsubscribe.
    pub join_leave: bool,
    /// Number of messages kept in channel history; 0 disables history.
    pub history_size: u64,
    /// Seconds a channel history survives without new messages.
    pub history_lifetime: u64,
}

/// Channel group inside a project, addressed as `<namespace>:<channel>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Namespace {
    /// Must match [`NAME_PATTERN`] and be unique within its project.
    #[serde(deserialize_with = "string_from_scalar")]
    pub name: String,
    /// Options for every channel in this namespace.
    #[serde(flatten)]
    pub options: ChannelOptions,
}

/// One tenant of the node, with its own secret and channel rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    /// Must match [`NAME_PATTERN`] and be unique across the list.
    #[serde(deserialize_with = "string_from_scalar")]
    pub name: String,
    /// Key used to sign client tokens and API requests.
    #[serde(default, deserialize_with = "string_from_scalar")]
    pub secret: String,
    /// Seconds a client connection stays valid before it must refresh.
    /// 0 means connections never expire.
    #[serde(default)]
    pub connection_lifetime: u64,
    /// Options for channels outside any namespace.
    #[serde(flatten)]
    pub options: ChannelOptions,
    /// Namespaces declared by this project.
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
}

/// The `projects` section of a config file, in file order.
pub type ProjectList = Vec<Project>;

/// Why a [`ProjectList`] was rejected.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("invalid project name '{name}': must match {}", NAME_PATTERN)]
    InvalidProjectName { name: String },
    #[error("duplicate project name '{name}'")]
    DuplicateProject { name: String },
    #[error(
        "invalid namespace name '{namespace}' in project '{project}': \
         must match {}",
        NAME_PATTERN
    )]
    InvalidNamespaceName { project: String, namespace: String },
    #[error("duplicate namespace '{namespace}' in project '{project}'")]
    DuplicateNamespace { project: String, namespace: String },
}

/// Names and secrets are strings, but a plain YAML scalar such as `12345`
/// or `true` parses as a number or boolean. Accept those as their text.
fn string_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match RawScalar::deserialize(deserializer)? {
        RawScalar::Text(text) => text,
        RawScalar::Unsigned(n) => n.to_string(),
        RawScalar::Signed(n) => n.to_string(),
        RawScalar::Float(n) => n.to_string(),
        RawScalar::Flag(flag) => flag.to_string(),
    })
}

/// Indexed view over a [`ProjectList`].
#[derive(Debug, Clone, Default)]
pub struct Structure {
    projects: ProjectList,
    by_name: HashMap<String, usize>,
}

impl Structure {
    /// Index `projects` by name.
    pub fn new(projects: ProjectList) -> Self {
        // On duplicates the first entry wins; validate() reports them.
        let mut by_name = HashMap::with_capacity(projects.len());
        for (idx, project) in projects.iter().enumerate() {
            by_name.entry(project.name.clone()).or_insert(idx);
        }
        Self { projects, by_name }
    }

    /// Projects in file order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// True when no projects are configured.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Project called `name`; the first one if the name is duplicated.
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.by_name.get(name).map(|&idx| &self.projects[idx])
    }

    /// Namespace `namespace` of project `project`.
    pub fn namespace(
        &self,
        project: &str,
        namespace: &str,
    ) -> Option<&Namespace> {
        self.project(project)?
            .namespaces
            .iter()
            .find(|ns| ns.name == namespace)
    }

    /// Check names and uniqueness of every project and namespace. Stops at
    /// the first problem found.
    pub fn validate(&self) -> Result<(), StructureError> {
        let mut seen = HashSet::new();

        for project in &self.projects {
            if !NAME_RE.is_match(&project.name) {
                return Err(StructureError::InvalidProjectName {
                    name: project.name.clone(),
                });
            }
            if !seen.insert(project.name.as_str()) {
                return Err(StructureError::DuplicateProject {
                    name: project.name.clone(),
                });
            }
            validate_namespaces(project)?;
        }

        Ok(())
    }
}

fn validate_namespaces(project: &Project) -> Result<(), StructureError> {
    let mut seen = HashSet::new();
    for ns in &project.namespaces {
        if !NAME_RE.is_match(&ns.name) {
            return Err(StructureError::InvalidNamespaceName {
                project: project.name.clone(),
                namespace: ns.name.clone(),
            });
        }
        if !seen.insert(ns.name.as_str()) {
            return Err(StructureError::DuplicateNamespace {
                project: project.name.clone(),
                namespace: ns.name.clone(),
            });
        }
    }
    Ok(())
}
