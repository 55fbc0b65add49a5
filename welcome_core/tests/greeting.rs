use tokio::sync::mpsc;
use welcome_core::{
    Delivery, Greeter, GreetingConfig, GreetingEvent, Invocation, MemoryStore, OverrideRecord,
    RoomEvent,
};

fn join(username: &str, uid: &str) -> GreetingEvent {
    GreetingEvent::Join(RoomEvent {
        username: username.into(),
        uid: uid.into(),
    })
}

#[tokio::test]
async fn stock_welcome() {
    let (tx, mut rx) = mpsc::channel(4);
    let config = GreetingConfig {
        welcome_list: vec!["hi(@)!".into()],
        ..Default::default()
    };
    let greeter = Greeter::new(config, "bot", MemoryStore::new(), tx);

    greeter.handle(&join("Bob", "1")).await.unwrap();
    assert_eq!(
        rx.recv().await,
        Some(Delivery::Room {
            message: r#"hi<at id="Bob"/>!"#.into()
        })
    );
}

#[tokio::test]
async fn stored_override_then_rm() {
    let (tx, mut rx) = mpsc::channel(4);
    let store = MemoryStore::from_iter([OverrideRecord {
        uid: "42".into(),
        welcome_msg: Some("yo(@)".into()),
        leave_msg: None,
    }]);
    let greeter = Greeter::new(GreetingConfig::default(), "bot", store, tx);

    greeter.handle(&join("Ann", "42")).await.unwrap();
    assert_eq!(
        rx.recv().await.as_ref().map(Delivery::message),
        Some(r#"yo<at id="Ann"/>"#)
    );

    let ann = Invocation {
        platform: "iirose".into(),
        user_id: "42".into(),
        username: "Ann".into(),
    };
    greeter.clear_welcome_override(&ann).await.unwrap();

    greeter.handle(&join("Ann", "42")).await.unwrap();
    assert_eq!(
        rx.recv().await.as_ref().map(Delivery::message),
        Some(r#"welcome<at id="Ann"/>!"#)
    );
}
