use super::*;
use crate::badge::BadgeState;
use crate::runtime::test_helpers;
use crate::storage::{THEME_KEY, load_theme, save_theme};
use tokio::time::{Duration, timeout};

/// Register a fake content listener that echoes applies and records what
/// was forwarded to it.
async fn attach_echo_tab(bus: &MessageBus, tab_id: TabId) -> mpsc::Receiver<Message> {
    let mut rx = bus.register(Endpoint::Tab(tab_id)).await;
    let (seen_tx, seen_rx) = mpsc::channel(8);
    tokio::spawn(async move {
        while let Some(delivery) = rx.recv().await {
            let message = delivery.message().clone();
            let _ = seen_tx.send(message.clone()).await;
            delivery.respond(message);
        }
    });
    seen_rx
}

async fn recv_forwarded(rx: &mut mpsc::Receiver<Message>) -> Message {
    timeout(Duration::from_millis(500), rx.recv())
        .await
        .expect("forward receive timed out")
        .expect("forward channel closed unexpectedly")
}

fn rejection_code(err: SendError) -> String {
    let SendError::Rejected(rejection) = err else {
        panic!("expected rejection, got {err:?}");
    };
    rejection.code
}

#[tokio::test]
async fn init_on_a_fresh_store_answers_the_light_default() {
    let runtime = test_helpers::memory_runtime();
    runtime.start_background().await;

    let response = runtime
        .bus
        .send_to_background(Message::init_request())
        .await
        .expect("init should resolve");

    assert_eq!(response.theme(), Some(&Theme::default()));
    assert_eq!(runtime.badge.snapshot().await, BadgeState::for_theme(&Theme::default()));
    // First contact writes the default back.
    assert!(runtime.store.get(THEME_KEY).await.expect("get").is_some());
}

#[tokio::test]
async fn init_answers_the_stored_theme() {
    let runtime = test_helpers::memory_runtime();
    save_theme(runtime.store.as_ref(), &Theme::dark_inverted()).await.expect("seed");
    runtime.start_background().await;

    let response = runtime.bus.send_to_background(Message::init_request()).await.expect("init");

    assert_eq!(response.theme(), Some(&Theme::dark_inverted()));
    assert_eq!(runtime.badge.snapshot().await, BadgeState::for_theme(&Theme::dark_inverted()));
}

#[tokio::test]
async fn apply_forwards_to_the_active_tab() {
    let runtime = test_helpers::memory_runtime();
    runtime.start_background().await;
    let tab_id = runtime.tabs.open().await;
    let mut forwarded = attach_echo_tab(&runtime.bus, tab_id).await;

    let ack = runtime
        .bus
        .send_to_background(Message::apply(Theme::dark_inverted()))
        .await
        .expect("apply should resolve");

    let sent = recv_forwarded(&mut forwarded).await;
    assert_eq!(sent.tab_id(), Some(tab_id));
    assert_eq!(sent.theme(), Some(&Theme::dark_inverted()));
    // The sender receives the content acknowledgment, not a synthetic reply.
    assert_eq!(ack, sent);
    assert_eq!(runtime.badge.snapshot().await, BadgeState::for_theme(&Theme::dark_inverted()));
    assert_eq!(load_theme(runtime.store.as_ref()).await, Theme::dark_inverted());
}

#[tokio::test]
async fn apply_honors_an_explicit_tab_target() {
    let runtime = test_helpers::memory_runtime();
    runtime.start_background().await;
    let first = runtime.tabs.open().await;
    let _second = runtime.tabs.open().await;
    let mut forwarded = attach_echo_tab(&runtime.bus, first).await;

    let ack = runtime
        .bus
        .send_to_background(Message::apply(Theme::dark_inverted()).with_tab(first))
        .await
        .expect("apply should resolve");

    let sent = recv_forwarded(&mut forwarded).await;
    assert_eq!(sent.tab_id(), Some(first));
    assert_eq!(ack.tab_id(), Some(first));
}

#[tokio::test]
async fn apply_without_any_tab_rejects() {
    let runtime = test_helpers::memory_runtime();
    runtime.start_background().await;

    let err = runtime
        .bus
        .send_to_background(Message::apply(Theme::dark_inverted()))
        .await
        .unwrap_err();

    assert_eq!(rejection_code(err), "E_NO_ACTIVE_TAB");
    // Nothing was persisted for the failed apply.
    assert!(runtime.store.get(THEME_KEY).await.expect("get").is_none());
}

#[tokio::test]
async fn apply_to_an_unaddressable_tab_rejects() {
    let runtime = test_helpers::memory_runtime();
    runtime.start_background().await;

    let err = runtime
        .bus
        .send_to_background(Message::apply(Theme::dark_inverted()).with_tab(0))
        .await
        .unwrap_err();

    assert_eq!(rejection_code(err), "E_INVALID_TAB");
}

#[tokio::test]
async fn unconfirmed_forward_leaves_badge_and_storage_untouched() {
    let runtime = test_helpers::memory_runtime();
    runtime.start_background().await;
    // Tab open, but no content listener attached.
    runtime.tabs.open().await;

    let err = runtime
        .bus
        .send_to_background(Message::apply(Theme::dark_inverted()))
        .await
        .unwrap_err();

    assert_eq!(rejection_code(err), "E_FORWARD");
    assert_eq!(runtime.badge.snapshot().await, BadgeState::default());
    assert!(runtime.store.get(THEME_KEY).await.expect("get").is_none());
}

#[tokio::test]
async fn failed_persist_rejects_but_keeps_the_session_themed() {
    let runtime = test_helpers::broken_store_runtime();
    runtime.start_background().await;
    let tab_id = runtime.tabs.open().await;
    let mut forwarded = attach_echo_tab(&runtime.bus, tab_id).await;

    let err = runtime
        .bus
        .send_to_background(Message::apply(Theme::dark_inverted()))
        .await
        .unwrap_err();

    assert_eq!(rejection_code(err), "E_STORAGE");
    // The content page and badge had already switched; only persistence failed.
    let sent = recv_forwarded(&mut forwarded).await;
    assert_eq!(sent.theme(), Some(&Theme::dark_inverted()));
    assert_eq!(runtime.badge.snapshot().await, BadgeState::for_theme(&Theme::dark_inverted()));
}

#[tokio::test]
async fn init_with_a_failing_store_rejects() {
    let runtime = test_helpers::broken_store_runtime();
    runtime.start_background().await;

    let err = runtime.bus.send_to_background(Message::init_request()).await.unwrap_err();

    assert_eq!(rejection_code(err), "E_STORAGE");
    // The badge already reflects the resolved default; only the write-back failed.
    assert_eq!(runtime.badge.snapshot().await, BadgeState::for_theme(&Theme::default()));
}
