use std::time::Duration;

use tokio::time::{Instant, advance};

use super::*;

const DOC_A: DocumentId = DocumentId(1);
const DOC_B: DocumentId = DocumentId(2);

async fn settle() {
	for _ in 0..4 {
		tokio::task::yield_now().await;
	}
}

/// Fires once the quiet window has elapsed and not before.
#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn fires_after_quiet_window() {
	let mut scheduler = RefreshScheduler::new(Duration::from_millis(200));
	let generation = scheduler.schedule(DOC_A);
	assert!(scheduler.is_pending(DOC_A));

	advance(Duration::from_millis(199)).await;
	settle().await;
	assert_eq!(scheduler.try_due(), None, "fired inside the quiet window");

	advance(Duration::from_millis(1)).await;
	settle().await;
	let due = scheduler.try_due().expect("fired after the window");
	assert_eq!(due, RefreshDue { doc_id: DOC_A, generation });
	assert!(scheduler.accept(due));
	assert!(!scheduler.is_pending(DOC_A));
}

/// A burst of events coalesces into one firing, timed from the last event.
#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn burst_coalesces_to_last_event() {
	let mut scheduler = RefreshScheduler::new(Duration::from_millis(200));
	let start = Instant::now();

	let mut last = 0;
	for _ in 0..5 {
		last = scheduler.schedule(DOC_A);
		advance(Duration::from_millis(50)).await;
	}

	let due = scheduler.recv_due().await.expect("one firing");
	assert_eq!(due.generation, last);
	assert_eq!(start.elapsed(), Duration::from_millis(200 + 4 * 50));
	assert!(scheduler.accept(due));

	settle().await;
	assert_eq!(scheduler.try_due(), None, "superseded timers never fire");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn cancelled_refresh_never_fires() {
	let mut scheduler = RefreshScheduler::new(Duration::from_millis(200));
	scheduler.schedule(DOC_A);
	assert!(scheduler.cancel(DOC_A));
	assert!(!scheduler.cancel(DOC_A));

	advance(Duration::from_millis(500)).await;
	settle().await;
	assert_eq!(scheduler.try_due(), None);
	assert_eq!(scheduler.pending_count(), 0);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn documents_are_independent() {
	let mut scheduler = RefreshScheduler::new(Duration::from_millis(100));
	scheduler.schedule(DOC_A);
	advance(Duration::from_millis(60)).await;
	scheduler.schedule(DOC_B);

	let first = scheduler.recv_due().await.expect("doc a fires");
	assert_eq!(first.doc_id, DOC_A);
	let second = scheduler.recv_due().await.expect("doc b fires");
	assert_eq!(second.doc_id, DOC_B);
	assert!(scheduler.accept(first));
	assert!(scheduler.accept(second));
}

#[test]
fn stale_generation_is_rejected() {
	let mut scheduler = RefreshScheduler::new(Duration::ZERO);
	let old = scheduler.schedule(DOC_A);
	let new = scheduler.schedule(DOC_A);
	assert_ne!(old, new);

	assert!(!scheduler.accept(RefreshDue { doc_id: DOC_A, generation: old }));
	assert!(scheduler.accept(RefreshDue { doc_id: DOC_A, generation: new }));
	assert!(!scheduler.accept(RefreshDue { doc_id: DOC_A, generation: new }), "accepted twice");
}

/// Without a runtime there is nothing to debounce on; the refresh is due
/// straight away.
#[test]
fn outside_runtime_fires_immediately() {
	let mut scheduler = RefreshScheduler::new(Duration::from_millis(200));
	let generation = scheduler.schedule(DOC_A);
	assert_eq!(scheduler.try_due(), Some(RefreshDue { doc_id: DOC_A, generation }));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn set_debounce_applies_to_new_timers() {
	let mut scheduler = RefreshScheduler::new(Duration::from_millis(200));
	scheduler.set_debounce(Duration::from_millis(20));
	assert_eq!(scheduler.debounce(), Duration::from_millis(20));

	let start = Instant::now();
	scheduler.schedule(DOC_A);
	scheduler.recv_due().await.expect("fires");
	assert_eq!(start.elapsed(), Duration::from_millis(20));
}
