use std::sync::Arc;

use application::TagGroup;
use domain::{Controller, DomainError, ElementType, GroupEvent, TagRef, TagSpec, same_tag};
use infrastructure::{ChannelEventPublisher, SimulatedController, SimulatedTag};
use serde_json::json;
use tokio::sync::mpsc;

fn new_group() -> (
    Arc<SimulatedController>,
    TagGroup,
    mpsc::UnboundedReceiver<GroupEvent>,
) {
    let controller = SimulatedController::new();
    let (publisher, rx) = ChannelEventPublisher::unbounded();
    let group = TagGroup::new(controller.clone(), publisher);
    (controller, group, rx)
}

fn registered_tag(
    controller: &Arc<SimulatedController>,
    name: &str,
    element_type: ElementType,
) -> (Arc<SimulatedTag>, Arc<dyn TagRef>) {
    let tag = SimulatedTag::new(TagSpec::scalar(name, element_type));
    let dyn_tag: Arc<dyn TagRef> = tag.clone();
    controller.register(dyn_tag.clone());
    (tag, dyn_tag)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<GroupEvent>) -> Vec<GroupEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_add_tag_appends_in_order() {
    let (controller, group, _rx) = new_group();
    let (_, a) = registered_tag(&controller, "A", ElementType::Int32);
    let (_, b) = registered_tag(&controller, "B", ElementType::Int32);

    group.add_tag(a.clone()).await.unwrap();
    group.add_tag(b.clone()).await.unwrap();

    let members = group.members().await;
    assert_eq!(members.len(), 2);
    assert!(same_tag(&members[0], &a));
    assert!(same_tag(&members[1], &b));
}

#[tokio::test]
async fn test_duplicate_add_fails_and_leaves_members_unchanged() {
    let (controller, group, _rx) = new_group();
    let (_, a) = registered_tag(&controller, "A", ElementType::Int32);

    group.add_tag(a.clone()).await.unwrap();
    let result = group.add_tag(a.clone()).await;

    assert_eq!(result, Err(DomainError::DuplicateMember("A".into())));
    assert_eq!(group.len().await, 1);
}

#[tokio::test]
async fn test_remove_of_absent_tag_fails() {
    let (controller, group, _rx) = new_group();
    let (_, a) = registered_tag(&controller, "A", ElementType::Int32);

    let result = group.remove_tag(&a).await;
    assert_eq!(result, Err(DomainError::NotAMember("A".into())));
    assert!(group.is_empty().await);
}

#[tokio::test]
async fn test_foreign_tag_is_rejected_by_add_and_remove() {
    let (_controller, group, _rx) = new_group();
    // Created directly, never registered with the group's controller
    let foreign: Arc<dyn TagRef> =
        SimulatedTag::new(TagSpec::scalar("FOREIGN", ElementType::Int32));

    assert_eq!(
        group.add_tag(foreign.clone()).await,
        Err(DomainError::ForeignTag("FOREIGN".into()))
    );
    assert_eq!(
        group.remove_tag(&foreign).await,
        Err(DomainError::ForeignTag("FOREIGN".into()))
    );
    assert!(group.is_empty().await);
}

#[tokio::test]
async fn test_remove_keeps_the_other_members() {
    let (controller, group, _rx) = new_group();
    let (_, a) = registered_tag(&controller, "A", ElementType::Int32);
    let (_, b) = registered_tag(&controller, "B", ElementType::Int32);
    let (_, c) = registered_tag(&controller, "C", ElementType::Int32);
    group.add_tag(a.clone()).await.unwrap();
    group.add_tag(b.clone()).await.unwrap();
    group.add_tag(c.clone()).await.unwrap();

    group.remove_tag(&b).await.unwrap();

    let members = group.members().await;
    assert_eq!(members.len(), 2);
    assert!(same_tag(&members[0], &a));
    assert!(same_tag(&members[1], &c));
    // Still part of the controller, only the group membership ended
    assert!(controller.is_registered(&b));
}

#[tokio::test]
async fn test_clear_tags_does_not_dispose_members() {
    let (controller, group, _rx) = new_group();
    let (sim, a) = registered_tag(&controller, "A", ElementType::Int32);
    group.add_tag(a.clone()).await.unwrap();

    group.clear_tags().await;

    assert!(group.is_empty().await);
    assert!(!sim.is_disposed());
    assert!(controller.is_registered(&a));
}

#[tokio::test]
async fn test_create_tag_registers_and_adds() {
    let (controller, group, _rx) = new_group();

    let tag = group
        .create_tag("Line1/MotorSpeed", ElementType::Int32)
        .await
        .unwrap();

    assert!(controller.is_registered(&tag));
    assert_eq!(group.len().await, 1);
    assert_eq!(tag.spec().element_size, 4);
    assert_eq!(tag.spec().length, 1);
}

#[tokio::test]
async fn test_create_string_tag_uses_wire_string_size() {
    let (_controller, group, _rx) = new_group();
    let tag = group
        .create_tag("Line1/Label", ElementType::String)
        .await
        .unwrap();
    assert_eq!(tag.spec().element_size, 88);
}

#[tokio::test]
async fn test_create_tag_sized_builds_arrays() {
    let (_controller, group, _rx) = new_group();
    let tag = group
        .create_tag_sized("myDINTArray", ElementType::Int32, 4, 42)
        .await
        .unwrap();
    assert!(tag.spec().is_array());
    assert_eq!(tag.spec().total_size(), 168);
}

#[tokio::test]
async fn test_failed_creation_adds_nothing() {
    let (controller, group, _rx) = new_group();
    controller.fail_tag_creation();

    let result = group.create_tag("BROKEN", ElementType::Int32).await;

    assert!(matches!(result, Err(DomainError::TagCreation(_))));
    assert!(group.is_empty().await);
    assert!(controller.tags().is_empty());
}

#[tokio::test]
async fn test_read_returns_one_result_per_member_in_order() {
    let (controller, group, _rx) = new_group();
    let (sim_a, a) = registered_tag(&controller, "A", ElementType::Int32);
    let (sim_b, b) = registered_tag(&controller, "B", ElementType::Int32);
    group.add_tag(a).await.unwrap();
    group.add_tag(b).await.unwrap();
    sim_a.set_remote(json!(1)).await;
    sim_b.set_remote(json!(2)).await;

    let results = group.read(false).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].tag.name(), "A");
    assert_eq!(results[1].tag.name(), "B");
    assert_eq!(results[0].value(), Some(&json!(1)));
    assert_eq!(results[1].value(), Some(&json!(2)));
}

#[tokio::test]
async fn test_only_changed_returns_the_changed_subsequence() {
    let (controller, group, _rx) = new_group();
    let (sim_a, a) = registered_tag(&controller, "A", ElementType::Int32);
    let (sim_b, b) = registered_tag(&controller, "B", ElementType::Int32);
    group.add_tag(a).await.unwrap();
    group.add_tag(b).await.unwrap();
    sim_a.set_remote(json!(1)).await;
    sim_b.set_remote(json!(2)).await;

    // First read: everything counts as changed
    let first = group.read(true).await;
    assert_eq!(first.len(), 2);

    // Nothing moved: changed subsequence is empty, full set still complete
    let steady = group.read(true).await;
    assert!(steady.is_empty());
    assert_eq!(group.read(false).await.len(), 2);

    // Only B moves
    sim_b.set_remote(json!(3)).await;
    let changed = group.read(true).await;
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].tag.name(), "B");
    assert_eq!(changed[0].value(), Some(&json!(3)));
}

#[tokio::test]
async fn test_changed_event_carries_only_the_changed_subset() {
    let (controller, group, mut rx) = new_group();
    let (sim_a, a) = registered_tag(&controller, "A", ElementType::Int32);
    let (sim_b, b) = registered_tag(&controller, "B", ElementType::String);
    group.add_tag(a).await.unwrap();
    group.add_tag(b).await.unwrap();
    sim_a.set_remote(json!(5)).await;
    sim_b.set_remote(json!("x")).await;

    // Prime both tags, then discard the initial Changed event
    group.read(false).await;
    drain(&mut rx);

    // a: 5 -> 6, b stays "x"
    sim_a.set_remote(json!(6)).await;
    let results = group.read(false).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].value(), Some(&json!(6)));
    assert!(results[0].changed);
    assert_eq!(results[1].value(), Some(&json!("x")));
    assert!(!results[1].changed);

    let events = drain(&mut rx);
    assert_eq!(events.len(), 1);
    match &events[0] {
        GroupEvent::Changed { results, .. } => {
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].tag.name(), "A");
            assert_eq!(results[0].value(), Some(&json!(6)));
            assert!(results[0].changed);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_no_changed_event_when_nothing_moved() {
    let (controller, group, mut rx) = new_group();
    let (sim_a, a) = registered_tag(&controller, "A", ElementType::Int32);
    group.add_tag(a).await.unwrap();
    sim_a.set_remote(json!(1)).await;

    group.read(false).await;
    drain(&mut rx);

    group.read(false).await;
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_write_never_raises_changed() {
    let (controller, group, mut rx) = new_group();
    let (sim_a, a) = registered_tag(&controller, "A", ElementType::Int32);
    group.add_tag(a).await.unwrap();
    sim_a.set_pending_write(json!(42)).await;

    let results = group.write().await;

    assert_eq!(results.len(), 1);
    assert!(results[0].is_ok());
    assert_eq!(sim_a.last_written().await, Some(json!(42)));
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_one_failing_member_does_not_abort_the_batch() {
    let (controller, group, _rx) = new_group();
    let (sim_a, a) = registered_tag(&controller, "A", ElementType::Int32);
    let (sim_b, b) = registered_tag(&controller, "B", ElementType::Int32);
    let (sim_c, c) = registered_tag(&controller, "C", ElementType::Int32);
    group.add_tag(a).await.unwrap();
    group.add_tag(b).await.unwrap();
    group.add_tag(c).await.unwrap();
    sim_a.set_remote(json!(1)).await;
    sim_c.set_remote(json!(3)).await;
    sim_b.fail_next_read();

    let results = group.read(false).await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1].outcome, Err(DomainError::Driver(_))));
    assert!(!results[1].changed);
    assert!(results[2].is_ok());
}

#[tokio::test]
async fn test_write_failures_are_per_member_too() {
    let (controller, group, _rx) = new_group();
    let (sim_a, a) = registered_tag(&controller, "A", ElementType::Int32);
    let (_sim_b, b) = registered_tag(&controller, "B", ElementType::Int32);
    group.add_tag(a).await.unwrap();
    group.add_tag(b).await.unwrap();
    sim_a.fail_next_write();

    let results = group.write().await;

    assert_eq!(results.len(), 2);
    assert!(matches!(results[0].outcome, Err(DomainError::Driver(_))));
    assert!(results[1].is_ok());
}

#[tokio::test]
async fn test_dispose_disposes_each_member_exactly_once() {
    let (controller, group, _rx) = new_group();
    let (sim_a, a) = registered_tag(&controller, "A", ElementType::Int32);
    let (sim_b, b) = registered_tag(&controller, "B", ElementType::Int32);
    group.add_tag(a).await.unwrap();
    group.add_tag(b).await.unwrap();

    group.dispose().await;
    group.dispose().await;

    assert!(group.is_disposed());
    assert!(group.is_empty().await);
    assert_eq!(sim_a.dispose_count(), 1);
    assert_eq!(sim_b.dispose_count(), 1);
}

#[tokio::test]
async fn test_dispose_continues_past_a_failing_member() {
    let (controller, group, _rx) = new_group();
    let (sim_a, a) = registered_tag(&controller, "A", ElementType::Int32);
    let (sim_b, b) = registered_tag(&controller, "B", ElementType::Int32);
    group.add_tag(a).await.unwrap();
    group.add_tag(b).await.unwrap();
    sim_a.fail_dispose();

    group.dispose().await;

    // The failure on A did not stop B from being released
    assert!(sim_a.is_disposed());
    assert!(sim_b.is_disposed());
    assert_eq!(sim_b.dispose_count(), 1);
    assert!(group.is_empty().await);
}
