use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = NoticeState::default();
    let a = state.push(NoticeLevel::Info, "one");
    let b = state.push(NoticeLevel::Error, "two");
    assert!(b > a);
    assert_eq!(state.items.len(), 2);
}

#[test]
fn dismiss_removes_only_the_target_notice() {
    let mut state = NoticeState::default();
    let a = state.error("bad");
    let b = state.success("good");
    state.dismiss(a);

    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, b);
}

#[test]
fn dismiss_of_unknown_id_is_a_noop() {
    let mut state = NoticeState::default();
    state.info("hello");
    state.dismiss(999);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn stack_is_capped_and_evicts_oldest() {
    let mut state = NoticeState::default();
    for i in 0..8 {
        state.info(format!("notice {i}"));
    }
    assert_eq!(state.items.len(), 5);
    assert_eq!(state.items[0].message, "notice 3");
    assert_eq!(state.items[4].message, "notice 7");
}

#[test]
fn error_count_counts_only_errors() {
    let mut state = NoticeState::default();
    state.error("bad");
    state.success("good");
    state.info("meh");
    state.error("worse");
    assert_eq!(state.error_count(), 2);
}

#[test]
fn dismissed_ids_are_not_reused() {
    let mut state = NoticeState::default();
    let a = state.info("one");
    state.dismiss(a);
    let b = state.info("two");
    assert_ne!(a, b);
}
