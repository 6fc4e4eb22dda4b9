use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FeaturizerError;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "de")]
    DE,
    #[serde(rename = "en")]
    EN,
    #[serde(rename = "es")]
    ES,
    #[serde(rename = "fr")]
    FR,
    #[serde(rename = "it")]
    IT,
    #[serde(rename = "ja")]
    JA,
    #[serde(rename = "ko")]
    KO,
    #[serde(rename = "pt_pt")]
    PT_PT,
    #[serde(rename = "pt_br")]
    PT_BR,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::DE,
            Language::EN,
            Language::ES,
            Language::FR,
            Language::IT,
            Language::JA,
            Language::KO,
            Language::PT_PT,
            Language::PT_BR,
        ]
    }

    pub fn iso_code(self) -> &'static str {
        match self {
            Language::DE => "de",
            Language::EN => "en",
            Language::ES => "es",
            Language::FR => "fr",
            Language::IT => "it",
            Language::JA => "ja",
            Language::KO => "ko",
            Language::PT_PT => "pt_pt",
            Language::PT_BR => "pt_br",
        }
    }

    /// Separator used to join tokens back into a string
    pub fn default_sep(self) -> &'static str {
        match self {
            Language::JA => "",
            _ => " ",
        }
    }
}

impl FromStr for Language {
    type Err = FeaturizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::all()
            .iter()
            .find(|language| language.iso_code() == s.to_lowercase())
            .cloned()
            .ok_or_else(|| FeaturizerError::UnknownLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.iso_code())
    }
}
