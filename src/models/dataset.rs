use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::{EntityName, IntentName};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub language: String,
    #[serde(default)]
    pub intents: BTreeMap<IntentName, Intent>,
    #[serde(default)]
    pub entities: BTreeMap<EntityName, Entity>,
}

/// Entity definition of a dataset.
///
/// Builtin entities carry no data in the dataset, they are resolved by a dedicated parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entity {
    Custom(CustomEntity),
    Builtin(BuiltinEntity),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEntity {
    pub use_synonyms: bool,
    #[serde(default)]
    pub automatically_extensible: bool,
    pub data: Vec<EntityValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityValue {
    pub value: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// Builtin entities are declared with an empty object, any field makes the entity invalid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuiltinEntity {}

impl CustomEntity {
    /// Literal strings which refer to this entity
    pub fn utterances(&self) -> Vec<&str> {
        if self.use_synonyms {
            self.data
                .iter()
                .flat_map(|entity_value| {
                    Some(&entity_value.value)
                        .into_iter()
                        .chain(entity_value.synonyms.iter())
                })
                .map(|utterance| utterance.as_str())
                .collect()
        } else {
            self.data
                .iter()
                .map(|entity_value| entity_value.value.as_str())
                .collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub utterances: Vec<IntentUtterance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentUtterance {
    pub data: Vec<UtteranceChunk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtteranceChunk {
    pub text: String,
    #[serde(default)]
    pub entity: Option<EntityName>,
    #[serde(default)]
    pub slot_name: Option<String>,
}

impl IntentUtterance {
    pub fn text(&self) -> String {
        self.data.iter().map(|chunk| chunk.text.as_str()).collect()
    }
}

/// Training queries flattened out of the dataset intents.
///
/// `labels[i]` is the index in `intents` of the intent of `queries[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledQueries {
    pub queries: Vec<String>,
    pub labels: Vec<usize>,
    pub intents: Vec<IntentName>,
}

impl Dataset {
    pub fn labeled_queries(&self) -> LabeledQueries {
        let mut queries = vec![];
        let mut labels = vec![];
        let mut intents = vec![];
        for (intent_index, (intent_name, intent)) in self.intents.iter().enumerate() {
            intents.push(intent_name.clone());
            for utterance in intent.utterances.iter() {
                queries.push(utterance.text());
                labels.push(intent_index);
            }
        }
        LabeledQueries {
            queries,
            labels,
            intents,
        }
    }
}
