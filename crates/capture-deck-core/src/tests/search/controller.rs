use crate::{
    DEFAULT_DEBOUNCE, SearchController, SearchPhase, WindowHandle,
    tests::support::{FakeDesktop, taskbar_window},
};

use std::time::{Duration, Instant};

fn desktop() -> FakeDesktop {
    FakeDesktop::with_windows(vec![
        taskbar_window(1, "Inbox"),
        taskbar_window(2, "main.rs"),
        taskbar_window(3, "OBS"),
    ])
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// WHAT: Activation rebuilds the snapshot and shows it unfiltered
/// WHY: The overlay must open on a fresh, complete list
#[test]
#[allow(clippy::unwrap_used)]
fn given_idle_controller_when_activating_then_settled_with_full_snapshot() {
    // Given: An idle controller
    let desktop = desktop();
    let mut controller = SearchController::new(desktop.clone(), DEFAULT_DEBOUNCE);
    assert_eq!(controller.phase(), SearchPhase::Idle);

    // When: Activating
    controller.activate().unwrap();

    // Then: Full snapshot in enumeration order, no query, no timer
    assert_eq!(controller.phase(), SearchPhase::Settled);
    assert_eq!(controller.results().len(), 3);
    assert_eq!(controller.results()[0].handle, WindowHandle(1));
    assert_eq!(controller.query(), "");
    assert_eq!(controller.deadline(), None);
    assert_eq!(desktop.0.borrow().enumerations, 1);
}

/// WHAT: Every activation enumerates again
/// WHY: Results must never come from a snapshot older than the latest activation
#[test]
#[allow(clippy::unwrap_used)]
fn given_active_controller_when_windows_change_and_reactivating_then_snapshot_refreshed() {
    // Given: An active controller with a typed query
    let desktop = desktop();
    let mut controller = SearchController::new(desktop.clone(), DEFAULT_DEBOUNCE);
    controller.activate().unwrap();
    controller.on_query_changed("obs", Instant::now());

    // When: A window closes and the overlay is activated again
    desktop.0.borrow_mut().windows.retain(|w| w.title != "OBS");
    controller.activate().unwrap();

    // Then: The new snapshot is shown, the query and timer are reset
    assert_eq!(controller.results().len(), 2);
    assert_eq!(controller.query(), "");
    assert_eq!(controller.deadline(), None);
    assert_eq!(desktop.0.borrow().enumerations, 2);
}

/// WHAT: A burst of edits produces exactly one filter pass with the last query
/// WHY: Filtering on every keystroke would stall the UI thread
#[test]
#[allow(clippy::unwrap_used)]
fn given_edits_within_quiet_period_when_time_passes_then_single_filter_pass() {
    // Given: An active controller and a virtual clock
    let mut controller = SearchController::new(desktop(), DEFAULT_DEBOUNCE);
    controller.activate().unwrap();
    let t0 = Instant::now();
    let edits = [(0, "m"), (50, "ma"), (100, "mai"), (150, "main")];

    // When: Edits arrive 50ms apart and the clock runs for a second in 10ms steps
    let mut next_edit = edits.iter().peekable();
    for step in 0..=100u64 {
        let now = t0 + ms(step * 10);
        while let Some((at, text)) = next_edit.peek() {
            if t0 + ms(*at) > now {
                break;
            }
            controller.on_query_changed(text, now);
            next_edit.next();
        }
        controller.fire_if_due(now);
    }

    // Then: One pass, run with the query as of t=150
    assert_eq!(controller.filter_passes(), 1);
    assert_eq!(controller.phase(), SearchPhase::Settled);
    assert_eq!(controller.results().len(), 1);
    assert_eq!(controller.results()[0].handle, WindowHandle(2));
}

/// WHAT: Each edit pushes the deadline out by the full quiet period
/// WHY: Only one timer may be pending; re-arming replaces it
#[test]
#[allow(clippy::unwrap_used)]
fn given_pending_timer_when_editing_again_then_deadline_replaced() {
    // Given: An active controller with one edit
    let mut controller = SearchController::new(desktop(), DEFAULT_DEBOUNCE);
    controller.activate().unwrap();
    let t0 = Instant::now();
    controller.on_query_changed("o", t0);
    assert_eq!(controller.deadline(), Some(t0 + DEFAULT_DEBOUNCE));

    // When: Another edit arrives 200ms later
    controller.on_query_changed("ob", t0 + ms(200));

    // Then: The old deadline no longer fires, the new one does
    assert_eq!(controller.deadline(), Some(t0 + ms(500)));
    assert!(!controller.fire_if_due(t0 + ms(300)));
    assert_eq!(controller.phase(), SearchPhase::Pending);
    assert!(controller.fire_if_due(t0 + ms(500)));
    assert_eq!(controller.deadline(), None);
}

/// WHAT: Timer fire outside the pending phase does nothing
/// WHY: A stale wake-up must not recompute or re-show results
#[test]
#[allow(clippy::unwrap_used)]
fn given_settled_or_idle_controller_when_timer_fires_then_no_op() {
    // Given: A settled controller
    let mut controller = SearchController::new(desktop(), DEFAULT_DEBOUNCE);
    controller.activate().unwrap();

    // When/Then: Firing does nothing while settled or idle
    assert!(!controller.on_timer_fire());
    controller.hide();
    assert!(!controller.on_timer_fire());
    assert_eq!(controller.filter_passes(), 0);
}

/// WHAT: Clearing the query restores the identity list
/// WHY: Backspacing to nothing should show every window again
#[test]
#[allow(clippy::unwrap_used)]
fn given_filtered_results_when_query_cleared_then_empty_phase_with_full_list() {
    // Given: A controller filtered to one match
    let mut controller = SearchController::new(desktop(), DEFAULT_DEBOUNCE);
    controller.activate().unwrap();
    let t0 = Instant::now();
    controller.on_query_changed("inbox", t0);
    controller.fire_if_due(t0 + DEFAULT_DEBOUNCE);
    assert_eq!(controller.results().len(), 1);

    // When: The query becomes whitespace only
    controller.on_query_changed("  ", t0 + ms(1000));
    controller.fire_if_due(t0 + ms(1000) + DEFAULT_DEBOUNCE);

    // Then: All windows, original order
    assert_eq!(controller.phase(), SearchPhase::Empty);
    let handles: Vec<WindowHandle> = controller.results().iter().map(|e| e.handle).collect();
    assert_eq!(
        handles,
        vec![WindowHandle(1), WindowHandle(2), WindowHandle(3)]
    );
}

/// WHAT: Out-of-range selections clamp to the first row
/// WHY: Select must always make forward progress instead of failing
#[test]
#[allow(clippy::unwrap_used)]
fn given_three_results_when_selecting_out_of_range_then_first_row_focused() {
    for index in [-1isize, 9999] {
        // Given: An active controller with three results
        let desktop = desktop();
        let mut controller = SearchController::new(desktop.clone(), DEFAULT_DEBOUNCE);
        controller.activate().unwrap();

        // When: Selecting an out-of-range index
        let selected = controller.select(index);

        // Then: The first row is focused and the overlay is idle
        assert_eq!(selected, Some(WindowHandle(1)));
        assert_eq!(desktop.0.borrow().focused, vec![WindowHandle(1)]);
        assert_eq!(controller.phase(), SearchPhase::Idle);
        assert!(controller.results().is_empty());
    }
}

/// WHAT: A stale handle still closes the overlay without error
/// WHY: The window may have closed after the snapshot was taken
#[test]
#[allow(clippy::unwrap_used)]
fn given_stale_handle_when_selecting_then_overlay_closes_silently() {
    // Given: The second window died after activation
    let desktop = desktop();
    let mut controller = SearchController::new(desktop.clone(), DEFAULT_DEBOUNCE);
    controller.activate().unwrap();
    desktop.0.borrow_mut().stale.push(WindowHandle(2));

    // When: Selecting it
    let selected = controller.select(1);

    // Then: Focus was attempted and the controller is idle
    assert_eq!(selected, Some(WindowHandle(2)));
    assert_eq!(desktop.0.borrow().focused, vec![WindowHandle(2)]);
    assert_eq!(controller.phase(), SearchPhase::Idle);
}

/// WHAT: Selecting from an empty result list only closes the overlay
/// WHY: A query matching nothing must not focus an arbitrary window
#[test]
#[allow(clippy::unwrap_used)]
fn given_no_results_when_selecting_then_nothing_focused() {
    // Given: A query that matches nothing
    let desktop = desktop();
    let mut controller = SearchController::new(desktop.clone(), DEFAULT_DEBOUNCE);
    controller.activate().unwrap();
    let t0 = Instant::now();
    controller.on_query_changed("qqq", t0);
    controller.fire_if_due(t0 + DEFAULT_DEBOUNCE);

    // When: Selecting
    let selected = controller.select(0);

    // Then: No focus request, overlay idle
    assert_eq!(selected, None);
    assert!(desktop.0.borrow().focused.is_empty());
    assert_eq!(controller.phase(), SearchPhase::Idle);
}

/// WHAT: Highlight moves within bounds and drives select_highlighted
/// WHY: Arrow keys choose a row other than the first
#[test]
#[allow(clippy::unwrap_used)]
fn given_results_when_moving_highlight_then_clamped_and_selected() {
    // Given: An active controller with three results
    let desktop = desktop();
    let mut controller = SearchController::new(desktop.clone(), DEFAULT_DEBOUNCE);
    controller.activate().unwrap();
    assert_eq!(controller.highlighted(), None);

    // When: Moving down past the end, then up once
    controller.move_highlight(1);
    assert_eq!(controller.highlighted(), Some(0));
    controller.move_highlight(5);
    assert_eq!(controller.highlighted(), Some(2));
    controller.move_highlight(-1);

    // Then: The middle row is selected
    assert_eq!(controller.select_highlighted(), Some(WindowHandle(2)));
}

/// WHAT: Escape clears everything from any sub-state
/// WHY: A pending timer must not fire after the overlay closed
#[test]
#[allow(clippy::unwrap_used)]
fn given_pending_edit_when_escaping_then_idle_and_timer_cancelled() {
    // Given: A pending edit
    let mut controller = SearchController::new(desktop(), DEFAULT_DEBOUNCE);
    controller.activate().unwrap();
    let t0 = Instant::now();
    controller.on_query_changed("obs", t0);

    // When: Escaping
    controller.escape();

    // Then: Idle, no deadline, and later fires do nothing
    assert_eq!(controller.phase(), SearchPhase::Idle);
    assert_eq!(controller.deadline(), None);
    assert!(controller.results().is_empty());
    assert!(!controller.fire_if_due(t0 + ms(1000)));
    assert_eq!(controller.filter_passes(), 0);
}

/// WHAT: Edits while idle are ignored
/// WHY: Keystrokes racing the overlay close must not re-arm the timer
#[test]
fn given_idle_controller_when_query_changes_then_ignored() {
    // Given: An idle controller
    let mut controller = SearchController::new(desktop(), DEFAULT_DEBOUNCE);

    // When: A query edit arrives
    controller.on_query_changed("obs", Instant::now());

    // Then: Still idle with no timer
    assert_eq!(controller.phase(), SearchPhase::Idle);
    assert_eq!(controller.deadline(), None);
}

/// WHAT: Failed enumeration leaves the controller idle
/// WHY: The overlay must not open without a fresh snapshot
#[test]
fn given_failing_enumeration_when_activating_then_error_and_idle() {
    // Given: A desktop whose enumeration fails
    let desktop = desktop();
    desktop.0.borrow_mut().fail_enumeration = true;
    let mut controller = SearchController::new(desktop, DEFAULT_DEBOUNCE);

    // When: Activating
    let result = controller.activate();

    // Then: Error returned, controller idle
    assert!(result.is_err());
    assert_eq!(controller.phase(), SearchPhase::Idle);
}
