use serde::{Deserialize, Serialize};

/// A person who can be assigned to a job.
///
/// Mirrors the `{value, label}` option shape used by the multi-select
/// widgets and by the remote store's assignee records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMember {
    pub value: String,
    pub label: String,
}

impl TeamMember {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The fixed set of team members jobs can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    members: Vec<TeamMember>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            members: vec![
                TeamMember::new("cedric", "Cédric"),
                TeamMember::new("dora", "Dora"),
                TeamMember::new("luke", "Luke"),
                TeamMember::new("vera", "Vera"),
            ],
        }
    }
}

impl Roster {
    /// Parse a roster from `value:Label` pairs separated by commas
    ///
    /// Example: `cedric:Cédric,dora:Dora`
    ///
    /// # Returns
    /// - `Ok(Roster)` - At least one member was parsed
    /// - `Err(String)` - An entry is malformed or the list is empty
    pub fn parse(spec: &str) -> Result<Self, String> {
        let mut members: Vec<TeamMember> = Vec::new();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (value, label) = entry
                .split_once(':')
                .ok_or_else(|| format!("Team member '{}' must be written as value:Label", entry))?;

            let (value, label) = (value.trim(), label.trim());
            if value.is_empty() || label.is_empty() {
                return Err(format!("Team member '{}' has an empty value or label", entry));
            }
            if members.iter().any(|m| m.value == value || m.label == label) {
                return Err(format!("Team member '{}' is listed twice", entry));
            }

            members.push(TeamMember::new(value, label));
        }

        if members.is_empty() {
            return Err("Team member list is empty".to_string());
        }

        Ok(Self { members })
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn by_label(&self, label: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.label == label)
    }
}
