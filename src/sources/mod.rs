//! Built-in data sources

pub mod chemidplus;
pub mod disease_ontology;
pub mod github_release;
pub mod oncotree;

pub use chemidplus::ChemIdPlusSource;
pub use disease_ontology::DiseaseOntologySource;
pub use github_release::GitHubReleaseSource;
pub use oncotree::OncoTreeSource;

use std::fmt;

use thiserror::Error;

use crate::source::Source;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown source: {0} (available: {available})", available = SourceName::names().join(", "))]
pub struct UnknownSource(pub String);

/// Name of a built-in source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceName {
    /// Mondo Disease Ontology
    Mondo,
    /// Human Phenotype Ontology
    Hpo,
    /// Human Disease Ontology
    Do,
    /// ChemIDplus
    ChemIdPlus,
    /// OncoTree
    OncoTree,
}

impl SourceName {
    pub const ALL: [SourceName; 5] = [
        SourceName::ChemIdPlus,
        SourceName::Do,
        SourceName::Hpo,
        SourceName::Mondo,
        SourceName::OncoTree,
    ];

    /// Returns the string representation of the source name
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceName::Mondo => "mondo",
            SourceName::Hpo => "hpo",
            SourceName::Do => "do",
            SourceName::ChemIdPlus => "chemidplus",
            SourceName::OncoTree => "oncotree",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(SourceName::as_str).collect()
    }

    /// Create the source with its default endpoints
    pub fn build(&self) -> Box<dyn Source> {
        match self {
            SourceName::Mondo => Box::new(GitHubReleaseSource::mondo()),
            SourceName::Hpo => Box::new(GitHubReleaseSource::hpo()),
            SourceName::Do => Box::new(DiseaseOntologySource::default()),
            SourceName::ChemIdPlus => Box::new(ChemIdPlusSource::default()),
            SourceName::OncoTree => Box::new(OncoTreeSource::default()),
        }
    }
}

impl std::str::FromStr for SourceName {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == lowered)
            .ok_or_else(|| UnknownSource(s.to_string()))
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
