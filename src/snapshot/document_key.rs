use strum::{Display, EnumIter, IntoStaticStr};

/// Logical name of one fetched sub-document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, IntoStaticStr)]
pub enum DocumentKey {
    #[strum(serialize = "careerSavegame")]
    CareerSavegame,

    #[strum(serialize = "economy")]
    Economy,

    #[strum(serialize = "vehicles")]
    Vehicles,

    #[strum(serialize = "server")]
    Server,
}

impl DocumentKey {
    /// Name of the root element a well-formed document for this key carries.
    #[must_use]
    pub const fn root_element(self) -> &'static str {
        match self {
            Self::CareerSavegame => "careerSavegame",
            Self::Economy => "economy",
            Self::Vehicles => "careerVehicles",
            Self::Server => "Server",
        }
    }
}

/// How to retrieve one document from the reporting API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRequest {
    pub key: DocumentKey,
    pub endpoint: String,
    pub file: Option<String>,
}

pub const SAVEGAME_ENDPOINT: &str = "dedicated-server-savegame.html";
pub const STATS_ENDPOINT: &str = "dedicated-server-stats.xml";

impl DocumentRequest {
    /// The request that retrieves `key` from a stock dedicated server.
    #[must_use]
    pub fn for_key(key: DocumentKey) -> Self {
        match key {
            DocumentKey::Server => Self {
                key,
                endpoint: STATS_ENDPOINT.to_string(),
                file: None,
            },
            DocumentKey::CareerSavegame | DocumentKey::Economy | DocumentKey::Vehicles => Self {
                key,
                endpoint: SAVEGAME_ENDPOINT.to_string(),
                file: Some(key.to_string()),
            },
        }
    }

    /// One request per document key.
    #[must_use]
    pub fn standard_set() -> Vec<Self> {
        use strum::IntoEnumIterator;
        DocumentKey::iter().map(Self::for_key).collect()
    }
}
