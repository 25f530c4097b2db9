use crate::config::ConfigMap;
use crate::session::{EditSession, MethodConfig, MethodSettings};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A flat string-to-string JSON object, as stored per association side.
pub type ConfigObject = Map<String, Value>;

/// One stored PSP/payment-method association, as loaded when editing an
/// existing configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StoredAssociation {
    pub live: Option<BTreeMap<String, String>>,
    pub test: Option<BTreeMap<String, String>>,
    pub priority: Option<u32>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

/// The initial document: payment-method id to stored association.
pub type InitialDocument = BTreeMap<u16, StoredAssociation>;

/// The submission payload for one method: the reconciled credential objects
/// (empty keys dropped, `null` when nothing remains) plus the scalar fields.
#[derive(Debug, Serialize, PartialEq)]
pub struct MethodPayload {
    pub method: u16,
    pub live: Option<ConfigObject>,
    pub test: Option<ConfigObject>,
    pub priority: Option<u32>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub enabled: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SubmitPayload {
    pub psp: u16,
    pub methods: Vec<MethodPayload>,
}

/// Builds a session pre-populated from stored associations. Each stored
/// live/test pair is reconciled as it is loaded.
pub fn load_session(psp: u16, doc: InitialDocument) -> EditSession {
    let mut session = EditSession::new(psp);
    for (method, stored) in doc {
        let live = stored_map(stored.live.as_ref());
        let test = stored_map(stored.test.as_ref());
        let settings = MethodSettings {
            priority: stored.priority,
            min_amount: stored.min_amount,
            max_amount: stored.max_amount,
            enabled: stored.enabled,
        };
        session.load(method, MethodConfig::from_stored(live, test, settings));
    }
    session
}

fn stored_map(object: Option<&BTreeMap<String, String>>) -> ConfigMap {
    match object {
        Some(object) => ConfigMap::from_pairs(
            object
                .iter()
                .map(|(k, v)| crate::config::ConfigPair::new(k.clone(), v.clone()))
                .collect(),
        ),
        None => ConfigMap::new(),
    }
}

/// Serializes one reconciled list as a flat JSON object, dropping rows whose
/// trimmed key is empty. A list with no non-empty keys becomes `None`
/// (submitted as `null`). A blank key with a value is silently excluded
/// rather than reported; malformed intermediate rows never block submission.
pub fn config_object(map: &ConfigMap) -> Option<ConfigObject> {
    let mut object = ConfigObject::new();
    for pair in map.pairs() {
        if pair.has_key() {
            object.insert(
                pair.trimmed_key().to_string(),
                Value::String(pair.value.clone()),
            );
        }
    }
    if object.is_empty() { None } else { Some(object) }
}

/// Consumes the session on form submission: every selected method gets a
/// final reconciliation pass, then its lists are serialized.
pub fn submit(session: EditSession) -> SubmitPayload {
    let (psp, methods) = session.into_parts();
    let methods = methods
        .into_iter()
        .map(|(method, mut config)| {
            config.blur();
            let settings = config.settings().clone();
            MethodPayload {
                method,
                live: config_object(config.live()),
                test: config_object(config.test()),
                priority: settings.priority,
                min_amount: settings.min_amount,
                max_amount: settings.max_amount,
                enabled: settings.enabled,
            }
        })
        .collect();
    SubmitPayload { psp, methods }
}
