use std::fmt;

/// Severity level reported by the vulnerability feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Parses a feed severity label; unknown labels map to `None`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "CRITICAL" => Severity::Critical,
            "HIGH" => Severity::High,
            "MEDIUM" | "MODERATE" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::None,
        }
    }

    /// Label used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::None => "None",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known-vulnerability entry for the target cloud resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VulnerabilityRecord {
    /// Advisory / CVE identifier
    pub id: String,
    /// Affected component name
    pub component: String,
    /// Affected version, or a version range when range matching is enabled
    pub version: String,
    pub severity: Severity,
    pub fixed_version: Option<String>,
    pub description: Option<String>,
}

impl VulnerabilityRecord {
    pub fn new(
        id: impl Into<String>,
        component: impl Into<String>,
        version: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: id.into(),
            component: component.into(),
            version: version.into(),
            severity,
            fixed_version: None,
            description: None,
        }
    }

    pub fn with_fixed_version(mut self, fixed_version: impl Into<String>) -> Self {
        self.fixed_version = Some(fixed_version.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
