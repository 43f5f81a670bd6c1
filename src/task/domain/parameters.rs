//! Command kinds and the parameter payloads each kind accepts.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of automation operation a task runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCommand {
    /// Runs a playbook with `ansible-playbook`.
    AnsiblePlaybook,
}

impl TaskCommand {
    /// Returns the canonical command name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnsiblePlaybook => "ansible-playbook",
        }
    }
}

impl TryFrom<&str> for TaskCommand {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ansible-playbook" => Ok(Self::AnsiblePlaybook),
            _ => Err(TaskDomainError::UnsupportedCommand(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a task, tagged by command kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "parameters", rename_all = "kebab-case")]
pub enum TaskParameters {
    /// Parameters for [`TaskCommand::AnsiblePlaybook`].
    AnsiblePlaybook(AnsiblePlaybookParameters),
}

impl TaskParameters {
    /// Decodes a raw payload using the decoder registered for `command`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnsupportedCommand`] for unknown commands,
    /// [`TaskDomainError::InvalidParameters`] when the payload does not match
    /// the command's shape, or the command's own validation errors.
    pub fn decode(command: &str, payload: Value) -> Result<Self, TaskDomainError> {
        let kind = TaskCommand::try_from(command)?;
        match kind {
            TaskCommand::AnsiblePlaybook => {
                let parameters: AnsiblePlaybookParameters = serde_json::from_value(payload)
                    .map_err(|err| TaskDomainError::InvalidParameters {
                        command: kind,
                        reason: err.to_string(),
                    })?;
                parameters.validate()?;
                Ok(Self::AnsiblePlaybook(parameters))
            }
        }
    }

    /// Returns the command kind these parameters belong to.
    #[must_use]
    pub const fn command(&self) -> TaskCommand {
        match self {
            Self::AnsiblePlaybook(_) => TaskCommand::AnsiblePlaybook,
        }
    }

    /// Returns the command-line arguments for the command's binary.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        match self {
            Self::AnsiblePlaybook(parameters) => parameters.arguments(),
        }
    }
}

impl From<AnsiblePlaybookParameters> for TaskParameters {
    fn from(parameters: AnsiblePlaybookParameters) -> Self {
        Self::AnsiblePlaybook(parameters)
    }
}

/// Parameters of an `ansible-playbook` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnsiblePlaybookParameters {
    playbook: String,
    #[serde(default)]
    inventory: Option<String>,
    #[serde(default)]
    limit: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    extra_vars: BTreeMap<String, Value>,
    #[serde(default)]
    check: bool,
}

impl AnsiblePlaybookParameters {
    /// Creates parameters running `playbook`, relative to the project root.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyPlaybook`] when the playbook is empty
    /// after trimming.
    pub fn new(playbook: impl Into<String>) -> Result<Self, TaskDomainError> {
        let parameters = Self {
            playbook: playbook.into().trim().to_owned(),
            inventory: None,
            limit: None,
            tags: Vec::new(),
            extra_vars: BTreeMap::new(),
            check: false,
        };
        parameters.validate()?;
        Ok(parameters)
    }

    /// Sets the inventory file or host list.
    #[must_use]
    pub fn with_inventory(mut self, inventory: impl Into<String>) -> Self {
        self.inventory = Some(inventory.into());
        self
    }

    /// Restricts the run to a host pattern.
    #[must_use]
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Restricts the run to tagged tasks.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Adds an extra variable.
    #[must_use]
    pub fn with_extra_var(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra_vars.insert(key.into(), value);
        self
    }

    /// Enables check mode (dry run).
    #[must_use]
    pub const fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Returns the playbook path.
    #[must_use]
    pub fn playbook(&self) -> &str {
        &self.playbook
    }

    /// Returns the inventory, if any.
    #[must_use]
    pub fn inventory(&self) -> Option<&str> {
        self.inventory.as_deref()
    }

    /// Returns the host limit, if any.
    #[must_use]
    pub fn limit(&self) -> Option<&str> {
        self.limit.as_deref()
    }

    /// Returns the tag filter.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the extra variables.
    #[must_use]
    pub const fn extra_vars(&self) -> &BTreeMap<String, Value> {
        &self.extra_vars
    }

    /// Returns whether check mode is enabled.
    #[must_use]
    pub const fn check(&self) -> bool {
        self.check
    }

    /// Returns the `ansible-playbook` arguments for these parameters.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(inventory) = &self.inventory {
            args.extend(["--inventory".to_owned(), inventory.clone()]);
        }
        if let Some(limit) = &self.limit {
            args.extend(["--limit".to_owned(), limit.clone()]);
        }
        if !self.tags.is_empty() {
            args.extend(["--tags".to_owned(), self.tags.join(",")]);
        }
        if !self.extra_vars.is_empty() {
            args.extend([
                "--extra-vars".to_owned(),
                Value::Object(self.extra_vars.clone().into_iter().collect()).to_string(),
            ]);
        }
        if self.check {
            args.push("--check".to_owned());
        }
        args.push(self.playbook.clone());
        args
    }

    fn validate(&self) -> Result<(), TaskDomainError> {
        if self.playbook.trim().is_empty() {
            return Err(TaskDomainError::EmptyPlaybook);
        }
        Ok(())
    }
}
