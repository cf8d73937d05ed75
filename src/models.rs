use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Sentinel state for entries that could not be classified.
pub const UNKNOWN_STATE: &str = "Unknown";
/// Sentinel state for entries explicitly mapped to an overseas origin.
pub const FOREIGN_STATE: &str = "Foreign";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Closed set of canonical state names. Reference data, not inferred
    /// from input.
    pub known_states: Vec<String>,
    /// Exact-match replacements applied after trimming: misspellings,
    /// alternative names, direct mappings like "Overseas".
    pub aliases: HashMap<String, String>,
    /// The state whose entries follow the `CODE - NAME` convention.
    pub code_format_state: String,
    pub college_column: String,
    pub top_colleges: usize,
    pub output_directory: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            known_states: vec![
                "Andhra Pradesh".to_string(),
                "Arunachal Pradesh".to_string(),
                "Assam".to_string(),
                "Bihar".to_string(),
                "Chhattisgarh".to_string(),
                "Goa".to_string(),
                "Gujarat".to_string(),
                "Haryana".to_string(),
                "Himachal Pradesh".to_string(),
                "Jharkhand".to_string(),
                "Karnataka".to_string(),
                "Kerala".to_string(),
                "Madhya Pradesh".to_string(),
                "Maharashtra".to_string(),
                "Manipur".to_string(),
                "Meghalaya".to_string(),
                "Mizoram".to_string(),
                "Nagaland".to_string(),
                "Odisha".to_string(),
                "Punjab".to_string(),
                "Rajasthan".to_string(),
                "Sikkim".to_string(),
                "Tamil Nadu".to_string(),
                "Telangana".to_string(),
                "Tripura".to_string(),
                "Uttar Pradesh".to_string(),
                "Uttarakhand".to_string(),
                "West Bengal".to_string(),
                "Telangana/Andhra Pradesh".to_string(),
                FOREIGN_STATE.to_string(),
                UNKNOWN_STATE.to_string(),
            ],
            aliases: HashMap::from([
                ("AndhraPradesh".to_string(), "Andhra Pradesh".to_string()),
                ("TamilNadu".to_string(), "Tamil Nadu".to_string()),
                ("Telagana".to_string(), "Telangana".to_string()),
                ("Telengana".to_string(), "Telangana".to_string()),
                ("Telangana State".to_string(), "Telangana".to_string()),
                (
                    "India (State Undetermined)".to_string(),
                    UNKNOWN_STATE.to_string(),
                ),
                ("India".to_string(), UNKNOWN_STATE.to_string()),
                ("Overseas".to_string(), FOREIGN_STATE.to_string()),
                ("LKDFJAKLD".to_string(), UNKNOWN_STATE.to_string()),
                (
                    "Andhra Pradesh / Telangana".to_string(),
                    "Telangana/Andhra Pradesh".to_string(),
                ),
                (
                    "Andhra Pradesh /Telangana".to_string(),
                    "Telangana/Andhra Pradesh".to_string(),
                ),
            ]),
            code_format_state: "Telangana".to_string(),
            college_column: "college".to_string(),
            top_colleges: 10,
            output_directory: Some("output".to_string()),
        }
    }
}

impl Config {
    pub fn load_from_file(file_path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(file_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, file_path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(file_path, content)?;
        Ok(())
    }
}

/// Immutable lookup data for state classification, built once from the
/// configuration and injected wherever classification happens.
#[derive(Debug, Clone)]
pub struct StateRegistry {
    states: HashSet<String>,
    aliases: HashMap<String, String>,
}

impl StateRegistry {
    pub fn from_config(config: &Config) -> Self {
        Self {
            states: config.known_states.iter().cloned().collect(),
            aliases: config.aliases.clone(),
        }
    }

    /// Exact, case-sensitive membership test. Callers normalize first.
    pub fn is_known_state(&self, name: &str) -> bool {
        self.states.contains(name)
    }

    /// Returns the mapped canonical name if `name` is an alias, otherwise
    /// `name` unchanged.
    pub fn resolve_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }
}

/// One parsed input row: values aligned positionally with the dataset
/// header. A missing or empty cell is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub values: Vec<Option<String>>,
}

impl RawRecord {
    pub fn value(&self, column_index: usize) -> Option<&str> {
        self.values.get(column_index)?.as_deref()
    }
}

/// A parsed CSV file: header row plus records, column order preserved.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl Dataset {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// A raw record augmented with the derived state and, for code-format
/// entries, the extracted college name. `None` means no name applies
/// (non-code-format state); `Some("")` means the format matched but the
/// name portion was blank. Downstream filtering needs the distinction.
#[derive(Debug, Clone)]
pub struct EnrichedRecord {
    pub raw: RawRecord,
    pub state: String,
    pub college_name: Option<String>,
}
