//! Motion latch shared between the edge interrupt, the periodic timer and the
//! main loop.
//!
//! ```text
//!  edge ISR ──record_edge()──► counter ──on_period()──► flag ──consume()──► main loop
//!  (writes counter)            (timer: swaps counter to 0,   (main loop: clears flag,
//!                               sets flag, LED on)            LED off, draws marker)
//! ```
//!
//! The counter has one writer (edge ISR) and one reader/resetter (timer).
//! The flag has one writer (timer) and one reader/clearer (main loop).
//! Both are atomics so the latch can live in a `static`.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::{consts, indicator::IndicatorTrait};

pub struct MotionLatch {
    edges: AtomicU32,
    triggered: AtomicBool,
    threshold: u32,
}

impl MotionLatch {
    pub const fn new() -> Self {
        Self::with_threshold(consts::MOTION_THRESHOLD)
    }

    const fn with_threshold(threshold: u32) -> Self {
        Self {
            edges: AtomicU32::new(0),
            triggered: AtomicBool::new(false),
            threshold,
        }
    }

    /// Edge interrupt context. Safe to call from an ISR.
    pub fn record_edge(&self) {
        self.edges.fetch_add(1, Ordering::Relaxed);
    }

    /// Periodic timer context. Closes the current counting window and
    /// returns whether it latched motion.
    pub fn on_period(&self, indicator: &dyn IndicatorTrait) -> bool {
        let count = self.edges.swap(0, Ordering::AcqRel);
        if count <= self.threshold {
            return false;
        }

        log::debug!("motion: {} edges in window, latching", count);
        indicator.set(true);
        self.triggered.store(true, Ordering::Release);
        true
    }

    /// Main loop context. Returns true exactly once per latched window.
    pub fn consume(&self, indicator: &dyn IndicatorTrait) -> bool {
        if !self.triggered.swap(false, Ordering::AcqRel) {
            return false;
        }

        indicator.set(false);
        true
    }

    #[cfg(test)]
    fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }

    pub fn pending_edges(&self) -> u32 {
        self.edges.load(Ordering::Relaxed)
    }
}

impl Default for MotionLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLed {
        writes: Mutex<Vec<bool>>,
    }

    impl IndicatorTrait for RecordingLed {
        fn set(&self, lit: bool) {
            self.writes.lock().unwrap().push(lit);
        }
    }

    impl RecordingLed {
        fn writes(&self) -> Vec<bool> {
            self.writes.lock().unwrap().clone()
        }
    }

    fn feed(latch: &MotionLatch, edges: u32) {
        for _ in 0..edges {
            latch.record_edge();
        }
    }

    #[test]
    fn test_below_threshold_never_latches() {
        let latch = MotionLatch::new();
        let led = RecordingLed::default();

        for edges in [0, 1] {
            feed(&latch, edges);
            assert!(!latch.on_period(&led));
            assert!(!latch.is_triggered());
            assert_eq!(latch.pending_edges(), 0);
        }
        assert!(!latch.consume(&led));
        assert!(led.writes().is_empty());
    }

    #[test]
    fn test_two_edges_latch() {
        let latch = MotionLatch::new();
        let led = RecordingLed::default();

        feed(&latch, 2);
        assert!(latch.on_period(&led));
        assert!(latch.is_triggered());
        assert_eq!(led.writes(), vec![true]);
    }

    #[test]
    fn test_three_edges_full_cycle() {
        let latch = MotionLatch::new();
        let led = RecordingLed::default();

        feed(&latch, 3);
        assert!(latch.on_period(&led));
        assert_eq!(latch.pending_edges(), 0);

        // main loop consumes once, LED goes back low
        assert!(latch.consume(&led));
        assert!(!latch.consume(&led));
        assert_eq!(led.writes(), vec![true, false]);
    }

    #[test]
    fn test_counter_resets_every_period() {
        let latch = MotionLatch::new();
        let led = RecordingLed::default();

        // one edge in each of two windows is not motion
        feed(&latch, 1);
        latch.on_period(&led);
        feed(&latch, 1);
        assert!(!latch.on_period(&led));
        assert_eq!(latch.pending_edges(), 0);
    }

    #[test]
    fn test_edges_counted_while_main_loop_blocked() {
        // the edge source and the period both run while the main loop is
        // stuck in a long ping, so three edges in one window still latch
        let latch = std::sync::Arc::new(MotionLatch::new());
        let led = std::sync::Arc::new(RecordingLed::default());

        let edges = {
            let latch = latch.clone();
            std::thread::spawn(move || {
                for _ in 0..3 {
                    latch.record_edge();
                    std::thread::sleep(std::time::Duration::from_millis(5));
                }
            })
        };
        edges.join().unwrap();

        assert!(latch.on_period(&*led));
        assert!(latch.is_triggered());
        assert!(latch.consume(&*led));
        assert_eq!(led.writes(), vec![true, false]);
    }

    #[test]
    fn test_custom_threshold() {
        let latch = MotionLatch::with_threshold(3);
        let led = RecordingLed::default();

        feed(&latch, 3);
        assert!(!latch.on_period(&led));
        feed(&latch, 4);
        assert!(latch.on_period(&led));
    }

    #[test]
    fn test_edges_from_another_thread() {
        let latch = std::sync::Arc::new(MotionLatch::new());
        let led = RecordingLed::default();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let latch = latch.clone();
                std::thread::spawn(move || feed(&latch, 250))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(latch.pending_edges(), 1000);
        assert!(latch.on_period(&led));
    }
}
