use pspconf::event::{EditEvent, EventOp};
use pspconf::payload;
use pspconf::reader::EventReader;
use pspconf::session::{EditSession, Side};
use serde_json::json;

fn event(op: EventOp, method: u16) -> EditEvent {
    EditEvent {
        op,
        method,
        side: None,
        index: None,
        key: None,
        value: None,
        amount: None,
    }
}

fn edit(op: EventOp, method: u16, side: Side, index: usize, text: &str) -> EditEvent {
    let mut ev = event(op, method);
    ev.side = Some(side);
    ev.index = Some(index);
    match op {
        EventOp::SetKey => ev.key = Some(text.to_string()),
        _ => ev.value = Some(text.to_string()),
    }
    ev
}

#[test]
fn test_full_editing_flow() {
    let mut session = EditSession::new(7);
    session.apply(event(EventOp::Select, 1)).unwrap();
    session
        .apply(edit(EventOp::SetKey, 1, Side::Live, 0, "apiKey"))
        .unwrap();
    session
        .apply(edit(EventOp::SetValue, 1, Side::Live, 0, "L1"))
        .unwrap();
    session.apply(event(EventOp::AddPair, 1)).unwrap();
    session
        .apply(edit(EventOp::SetKey, 1, Side::Live, 1, "secret"))
        .unwrap();
    session
        .apply(edit(EventOp::SetValue, 1, Side::Test, 1, "T2"))
        .unwrap();
    session.apply(event(EventOp::Blur, 1)).unwrap();

    let value = serde_json::to_value(payload::submit(session)).unwrap();
    assert_eq!(
        value["methods"][0]["live"],
        json!({"apiKey": "L1", "secret": ""})
    );
    assert_eq!(
        value["methods"][0]["test"],
        json!({"apiKey": "", "secret": "T2"})
    );
}

#[test]
fn test_deselect_discards_edits() {
    let mut session = EditSession::new(7);
    session.apply(event(EventOp::Select, 1)).unwrap();
    session
        .apply(edit(EventOp::SetKey, 1, Side::Live, 0, "apiKey"))
        .unwrap();
    session.apply(event(EventOp::Deselect, 1)).unwrap();

    let value = serde_json::to_value(payload::submit(session)).unwrap();
    assert_eq!(value["methods"], json!([]));
}

#[test]
fn test_remove_keeps_sides_symmetric() {
    let mut session = EditSession::new(7);
    session.apply(event(EventOp::Select, 1)).unwrap();
    session
        .apply(edit(EventOp::SetKey, 1, Side::Live, 0, "a"))
        .unwrap();
    session
        .apply(edit(EventOp::SetValue, 1, Side::Test, 0, "t"))
        .unwrap();
    session.apply(event(EventOp::AddPair, 1)).unwrap();
    session
        .apply(edit(EventOp::SetKey, 1, Side::Test, 1, "b"))
        .unwrap();
    session.apply(event(EventOp::Blur, 1)).unwrap();

    let mut remove = event(EventOp::Remove, 1);
    remove.side = Some(Side::Test);
    remove.index = Some(0);
    session.apply(remove).unwrap();

    let config = session.method(1).unwrap();
    assert_eq!(config.live().len(), 1);
    assert_eq!(config.test().len(), 1);
    assert_eq!(config.live().pairs()[0].key, "b");
    assert_eq!(config.test().pairs()[0].key, "b");
}

#[test]
fn test_events_replayed_from_csv_stream() {
    let data = "op, method, side, index, key, value, amount\n\
                select, 4, , , , , \n\
                setkey, 4, test, 0, token, , \n\
                setvalue, 4, test, 0, , sandbox-token, \n\
                blur, 4, , , , , \n\
                setenabled, 4, , , , false, ";
    let mut session = EditSession::new(9);
    for result in EventReader::new(data.as_bytes()).events() {
        session.apply(result.unwrap()).unwrap();
    }

    let value = serde_json::to_value(payload::submit(session)).unwrap();
    assert_eq!(value["psp"], json!(9));
    assert_eq!(value["methods"][0]["method"], json!(4));
    assert_eq!(value["methods"][0]["test"], json!({"token": "sandbox-token"}));
    assert_eq!(value["methods"][0]["live"], json!({"token": ""}));
    assert_eq!(value["methods"][0]["enabled"], json!(false));
}

#[test]
fn test_apply_continues_after_routing_error() {
    let mut session = EditSession::new(7);
    // Method 2 was never selected
    assert!(session
        .apply(edit(EventOp::SetKey, 2, Side::Live, 0, "apiKey"))
        .is_err());

    session.apply(event(EventOp::Select, 1)).unwrap();
    session
        .apply(edit(EventOp::SetKey, 1, Side::Live, 0, "apiKey"))
        .unwrap();
    assert_eq!(session.selected().collect::<Vec<_>>(), vec![1]);
}
