use crate::config::{ConfigMap, ConfigPair};
use crate::error::{ConfigError, Result};
use crate::event::{EditEvent, EventOp};
use crate::reconcile::reconcile;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which of the two parallel credential maps an edit targets.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Live,
    Test,
}

/// Synchronization state of one live/test pair.
///
/// Full reconciliation only runs on the Editing -> Reconciled transition
/// (blur or submit), so a key that is mid-edit is never collapsed into
/// another row while the user is still typing.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SyncState {
    Editing,
    Reconciled,
}

/// Scalar association fields carried alongside the credential maps. They
/// ride through the session untouched by reconciliation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct MethodSettings {
    pub priority: Option<u32>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub enabled: bool,
}

impl Default for MethodSettings {
    fn default() -> Self {
        Self {
            priority: None,
            min_amount: None,
            max_amount: None,
            enabled: true,
        }
    }
}

/// The live/test list pair for one payment method, plus the edit state
/// machine that decides when reconciliation runs.
#[derive(Debug, PartialEq, Clone)]
pub struct MethodConfig {
    live: ConfigMap,
    test: ConfigMap,
    state: SyncState,
    settings: MethodSettings,
}

impl MethodConfig {
    /// A fresh pair: one blank row on each side.
    pub fn new() -> Self {
        Self {
            live: ConfigMap::new(),
            test: ConfigMap::new(),
            state: SyncState::Editing,
            settings: MethodSettings::default(),
        }
    }

    /// Loads a stored association. The stored maps are reconciled
    /// immediately so both sides expose the union of saved keys.
    pub fn from_stored(live: ConfigMap, test: ConfigMap, settings: MethodSettings) -> Self {
        let (live, test) = reconcile(&live, &test);
        Self {
            live,
            test,
            state: SyncState::Reconciled,
            settings,
        }
    }

    pub fn live(&self) -> &ConfigMap {
        &self.live
    }

    pub fn test(&self) -> &ConfigMap {
        &self.test
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn settings(&self) -> &MethodSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut MethodSettings {
        &mut self.settings
    }

    fn sides_mut(&mut self, side: Side) -> (&mut ConfigMap, &mut ConfigMap) {
        match side {
            Side::Live => (&mut self.live, &mut self.test),
            Side::Test => (&mut self.test, &mut self.live),
        }
    }

    /// Replaces the key at `index` on `side`, with a best-effort mirrored
    /// edit on the counterpart:
    /// - old key empty: a brand-new row, so the same row on the other side
    ///   gets the same key if it is still blank;
    /// - old key non-empty: the first counterpart row carrying that key
    ///   (scan order) is renamed to match.
    pub fn set_key(&mut self, side: Side, index: usize, new_key: impl Into<String>) {
        let new_key = new_key.into();
        let (edited, counterpart) = self.sides_mut(side);
        let Some(old_key) = edited
            .pairs()
            .get(index)
            .map(|p| p.trimmed_key().to_string())
        else {
            return;
        };
        edited.set_key(index, new_key.clone());
        if old_key.is_empty() {
            if counterpart.pairs().get(index).is_some_and(|p| !p.has_key()) {
                counterpart.set_key(index, new_key);
            }
        } else if let Some(pos) = counterpart.position_of(&old_key) {
            counterpart.set_key(pos, new_key);
        }
        self.state = SyncState::Editing;
    }

    /// Replaces the value at `index` on `side` only. Values are never
    /// mirrored.
    pub fn set_value(&mut self, side: Side, index: usize, value: impl Into<String>) {
        let (edited, _) = self.sides_mut(side);
        edited.set_value(index, value);
        self.state = SyncState::Editing;
    }

    /// Appends the same blank row to both sides. Symmetric by construction,
    /// so no reconciliation pass runs and key sets stay untouched until the
    /// next blur.
    pub fn add_pair(&mut self) {
        self.live.push(ConfigPair::blank());
        self.test.push(ConfigPair::blank());
    }

    /// Removes the row at `index` on `side`. A non-empty key is removed from
    /// both sides (first counterpart match by trimmed key) to keep them
    /// symmetric; a blank key only removes the targeted row.
    pub fn remove_at(&mut self, side: Side, index: usize) {
        let (edited, counterpart) = self.sides_mut(side);
        let Some(key) = edited
            .pairs()
            .get(index)
            .map(|p| p.trimmed_key().to_string())
        else {
            return;
        };
        edited.remove_at(index);
        if !key.is_empty()
            && let Some(pos) = counterpart.position_of(&key)
        {
            counterpart.remove_at(pos);
        }
        self.state = SyncState::Editing;
    }

    /// Key-field blur: runs full reconciliation over both sides.
    pub fn blur(&mut self) {
        let (live, test) = reconcile(&self.live, &self.test);
        self.live = live;
        self.test = test;
        self.state = SyncState::Reconciled;
    }
}

impl Default for MethodConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One editing session for a PSP: which payment methods are selected, and
/// the live/test pair owned by each. Selection order is preserved.
pub struct EditSession {
    psp: u16,
    methods: Vec<(u16, MethodConfig)>,
}

impl EditSession {
    pub fn new(psp: u16) -> Self {
        Self {
            psp,
            methods: Vec::new(),
        }
    }

    pub fn psp(&self) -> u16 {
        self.psp
    }

    /// Adds a payment method to the selection with a fresh blank pair.
    /// Selecting an already selected method keeps its edits.
    pub fn select(&mut self, method: u16) {
        if self.method(method).is_none() {
            self.methods.push((method, MethodConfig::new()));
        }
    }

    /// Adds a payment method backed by a stored association.
    pub fn load(&mut self, method: u16, config: MethodConfig) {
        if self.method(method).is_none() {
            self.methods.push((method, config));
        }
    }

    /// Drops a payment method from the selection, discarding its edits.
    pub fn deselect(&mut self, method: u16) {
        self.methods.retain(|(id, _)| *id != method);
    }

    pub fn method(&self, method: u16) -> Option<&MethodConfig> {
        self.methods
            .iter()
            .find(|(id, _)| *id == method)
            .map(|(_, c)| c)
    }

    pub fn method_mut(&mut self, method: u16) -> Option<&mut MethodConfig> {
        self.methods
            .iter_mut()
            .find(|(id, _)| *id == method)
            .map(|(_, c)| c)
    }

    pub fn selected(&self) -> impl Iterator<Item = u16> + '_ {
        self.methods.iter().map(|(id, _)| *id)
    }

    /// Consumes the session, yielding the PSP id and the selected methods in
    /// selection order.
    pub fn into_parts(self) -> (u16, Vec<(u16, MethodConfig)>) {
        (self.psp, self.methods)
    }

    /// Routes one edit event to the targeted method. Only the routing layer
    /// can fail (unknown method, missing field); the structural edits
    /// themselves are total.
    pub fn apply(&mut self, event: EditEvent) -> Result<()> {
        match event.op {
            EventOp::Select => {
                self.select(event.method);
                return Ok(());
            }
            EventOp::Deselect => {
                self.deselect(event.method);
                return Ok(());
            }
            _ => {}
        }

        let method = event.method;
        let config = self.method_mut(method).ok_or_else(|| {
            ConfigError::EventError(format!("payment method {method} is not selected"))
        })?;

        match event.op {
            EventOp::SetKey => {
                let side = require_side(&event)?;
                let index = require_index(&event)?;
                config.set_key(side, index, event.key.unwrap_or_default());
            }
            EventOp::SetValue => {
                let side = require_side(&event)?;
                let index = require_index(&event)?;
                config.set_value(side, index, event.value.unwrap_or_default());
            }
            EventOp::AddPair => config.add_pair(),
            EventOp::Remove => {
                let side = require_side(&event)?;
                let index = require_index(&event)?;
                config.remove_at(side, index);
            }
            EventOp::Blur => config.blur(),
            EventOp::SetPriority => {
                let raw = event.value.unwrap_or_default();
                let priority = raw.parse::<u32>().map_err(|_| {
                    ConfigError::EventError(format!("invalid priority: {raw:?}"))
                })?;
                config.settings_mut().priority = Some(priority);
            }
            EventOp::SetMinAmount => config.settings_mut().min_amount = event.amount,
            EventOp::SetMaxAmount => config.settings_mut().max_amount = event.amount,
            EventOp::SetEnabled => {
                let raw = event.value.unwrap_or_default();
                let enabled = raw.parse::<bool>().map_err(|_| {
                    ConfigError::EventError(format!("invalid enabled flag: {raw:?}"))
                })?;
                config.settings_mut().enabled = enabled;
            }
            EventOp::Select | EventOp::Deselect => unreachable!(),
        }
        Ok(())
    }
}

fn require_side(event: &EditEvent) -> Result<Side> {
    event
        .side
        .ok_or_else(|| ConfigError::EventError(format!("{:?} event is missing a side", event.op)))
}

fn require_index(event: &EditEvent) -> Result<usize> {
    event.index.ok_or_else(|| {
        ConfigError::EventError(format!("{:?} event is missing an index", event.op))
    })
}
