//! Virtual-clock timer queue.
//!
//! Stands in for `setTimeout` / `setInterval`. The queue never sleeps: the
//! owner moves the clock forward with [`Timers::pop_due`] and applies each
//! returned task. Timers fire in order of due time, ties broken by the order
//! in which they were registered. A repeating timer is rescheduled from its
//! own due time, so a late pump does not shift its cadence.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::carousel::CarouselId;
use crate::dom::ElementId;

/// Handle returned by the scheduling calls; used to cancel a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Work a timer performs when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    AddClass { element: ElementId, class: String },
    RemoveClass { element: ElementId, class: String },
    RemoveElement(ElementId),
    EnableControl(ElementId),
    CarouselTick(CarouselId),
}

#[derive(Debug, Clone)]
struct Scheduled {
    handle: TimerHandle,
    due: Duration,
    seq: u64,
    period: Option<Duration>,
    task: TimerTask,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the heap pops the earliest due, then earliest registered
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}

/// Pending timers plus the current virtual time.
#[derive(Debug, Default)]
pub struct Timers {
    now: Duration,
    next_handle: u64,
    next_seq: u64,
    scheduled: BinaryHeap<Scheduled>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the page was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    fn push(&mut self, due: Duration, period: Option<Duration>, task: TimerTask) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.scheduled.push(Scheduled {
            handle,
            due,
            seq,
            period,
            task,
        });
        handle
    }

    /// Fire `task` once, `delay` from now.
    pub fn set_timeout(&mut self, delay: Duration, task: TimerTask) -> TimerHandle {
        self.push(self.now + delay, None, task)
    }

    /// Fire `task` every `period`, first after one period.
    pub fn set_interval(&mut self, period: Duration, task: TimerTask) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        self.push(self.now + period, Some(period), task)
    }

    /// Cancel a timer. Returns false if it already fired or was cleared.
    pub fn clear(&mut self, handle: TimerHandle) -> bool {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.handle != handle);
        self.scheduled.len() != before
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.scheduled.iter().any(|s| s.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }

    /// Tasks still waiting to fire, in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = &TimerTask> {
        self.scheduled.iter().map(|s| &s.task)
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.scheduled.peek().map(|s| s.due)
    }

    /// Take the earliest timer due at or before `until`, moving the clock to
    /// its due time. Repeating timers are re-queued under the same handle.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, TimerTask)> {
        if self.scheduled.peek()?.due > until {
            return None;
        }
        let entry = self.scheduled.pop()?;
        self.now = self.now.max(entry.due);

        if let Some(period) = entry.period {
            let seq = self.next_seq;
            self.next_seq += 1;
            self.scheduled.push(Scheduled {
                handle: entry.handle,
                due: entry.due + period,
                seq,
                period: entry.period,
                task: entry.task.clone(),
            });
        }
        Some((entry.handle, entry.task))
    }

    /// Move the clock forward without firing anything.
    pub fn advance_clock(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn element(n: usize) -> ElementId {
        let mut doc = crate::dom::Document::new();
        let mut last = doc.body();
        for _ in 0..n {
            last = doc.create_element("span");
        }
        last
    }

    #[test]
    fn test_timeouts_fire_in_due_then_registration_order() {
        let mut timers = Timers::new();
        let a = element(1);
        let b = element(2);
        timers.set_timeout(ms(100), TimerTask::RemoveElement(a));
        timers.set_timeout(ms(50), TimerTask::RemoveElement(b));
        timers.set_timeout(ms(50), TimerTask::EnableControl(b));

        assert_eq!(timers.pop_due(ms(40)), None);
        assert_eq!(timers.pop_due(ms(200)).unwrap().1, TimerTask::RemoveElement(b));
        assert_eq!(timers.now(), ms(50));
        assert_eq!(timers.pop_due(ms(200)).unwrap().1, TimerTask::EnableControl(b));
        assert_eq!(timers.pop_due(ms(200)).unwrap().1, TimerTask::RemoveElement(a));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_interval_keeps_handle_and_cadence() {
        let mut timers = Timers::new();
        let handle = timers.set_interval(ms(300), TimerTask::CarouselTick(CarouselId::new(0)));

        let mut fired = Vec::new();
        while let Some((h, _)) = timers.pop_due(ms(1000)) {
            assert_eq!(h, handle);
            fired.push(timers.now());
        }
        assert_eq!(fired, vec![ms(300), ms(600), ms(900)]);
        assert_eq!(timers.next_due(), Some(ms(1200)));

        assert!(timers.clear(handle));
        assert!(!timers.clear(handle));
        assert!(!timers.is_active(handle));
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut timers = Timers::new();
        timers.advance_clock(ms(500));
        timers.advance_clock(ms(100));
        assert_eq!(timers.now(), ms(500));

        timers.set_timeout(ms(10), TimerTask::RemoveElement(element(1)));
        assert_eq!(timers.next_due(), Some(ms(510)));
    }

    #[test]
    fn test_clearing_keeps_remaining_order() {
        let mut timers = Timers::new();
        let a = element(1);
        let first = timers.set_timeout(ms(30), TimerTask::EnableControl(a));
        timers.set_timeout(ms(20), TimerTask::RemoveElement(a));
        timers.set_timeout(ms(10), TimerTask::AddClass { element: a, class: "x".into() });
        timers.set_timeout(ms(20), TimerTask::RemoveClass { element: a, class: "x".into() });

        assert!(timers.clear(first));
        assert_eq!(timers.len(), 3);
        assert_eq!(timers.next_due(), Some(ms(10)));

        let order: Vec<TimerTask> = std::iter::from_fn(|| timers.pop_due(ms(100)).map(|(_, t)| t)).collect();
        assert_eq!(
            order,
            vec![
                TimerTask::AddClass { element: a, class: "x".into() },
                TimerTask::RemoveElement(a),
                TimerTask::RemoveClass { element: a, class: "x".into() },
            ]
        );
    }
}
