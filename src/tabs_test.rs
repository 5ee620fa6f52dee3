use super::*;

#[tokio::test]
async fn open_assigns_increasing_ids_and_focuses() {
    let tabs = TabRegistry::new();
    let first = tabs.open().await;
    let second = tabs.open().await;

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(tabs.active_tab().await, Some(second));
    assert_eq!(tabs.open_tabs().await, vec![first, second]);
}

#[tokio::test]
async fn activate_switches_focus() {
    let tabs = TabRegistry::new();
    let first = tabs.open().await;
    tabs.open().await;

    assert!(tabs.activate(first).await);
    assert_eq!(tabs.active_tab().await, Some(first));
}

#[tokio::test]
async fn activate_unknown_tab_is_refused() {
    let tabs = TabRegistry::new();
    let first = tabs.open().await;

    assert!(!tabs.activate(99).await);
    assert_eq!(tabs.active_tab().await, Some(first));
}

#[tokio::test]
async fn close_falls_back_to_most_recent_remaining() {
    let tabs = TabRegistry::new();
    let first = tabs.open().await;
    let second = tabs.open().await;
    let third = tabs.open().await;

    tabs.close(third).await;
    assert_eq!(tabs.active_tab().await, Some(second));
    assert_eq!(tabs.open_tabs().await, vec![first, second]);
}

#[tokio::test]
async fn closing_an_inactive_tab_keeps_focus() {
    let tabs = TabRegistry::new();
    let first = tabs.open().await;
    let second = tabs.open().await;
    tabs.activate(first).await;

    tabs.close(second).await;
    assert_eq!(tabs.active_tab().await, Some(first));
}

#[tokio::test]
async fn closing_the_last_tab_clears_focus() {
    let tabs = TabRegistry::new();
    let only = tabs.open().await;

    tabs.close(only).await;
    assert_eq!(tabs.active_tab().await, None);
    assert!(tabs.open_tabs().await.is_empty());
}

#[tokio::test]
async fn ids_are_not_reused_after_close() {
    let tabs = TabRegistry::new();
    let first = tabs.open().await;
    tabs.close(first).await;

    let second = tabs.open().await;
    assert_eq!(second, 2);
}
