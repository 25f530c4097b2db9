use crate::session::Side;
use rust_decimal::Decimal;
use serde::Deserialize;

/// One UI action against the editing session, as read from the event stream.
#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EventOp {
    Select,
    Deselect,
    SetKey,
    SetValue,
    AddPair,
    Remove,
    Blur,
    SetPriority,
    SetMinAmount,
    SetMaxAmount,
    SetEnabled,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct EditEvent {
    pub op: EventOp,
    pub method: u16,
    pub side: Option<Side>,
    pub index: Option<usize>,
    pub key: Option<String>,
    pub value: Option<String>,
    pub amount: Option<Decimal>,
}
