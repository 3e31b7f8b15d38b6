//! Ultrasonic trigger/echo ranging (HC-SR04 style).
//!
//! A ping is started by a >= 10 us HIGH pulse on the trigger line. The sensor
//! answers with a HIGH pulse on the echo line whose width is the round trip
//! time of the sound burst.

use core::fmt;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::consts;

/// Monotonic microsecond timestamp source.
pub trait MicrosClock {
    fn now_us(&self) -> u64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangerError<E> {
    /// Trigger or echo pin reported an error
    Pin(E),
    /// No complete echo pulse before the deadline
    Timeout,
}

impl<E> From<E> for RangerError<E> {
    fn from(e: E) -> Self {
        RangerError::Pin(e)
    }
}

impl<E: fmt::Debug> fmt::Display for RangerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangerError::Pin(e) => write!(f, "pin error: {:?}", e),
            RangerError::Timeout => write!(f, "echo timed out"),
        }
    }
}

/// Round trip echo time to centimeters: `duration / 2 / 29.1`, truncated.
pub fn echo_to_cm(duration_us: u32) -> u32 {
    ((duration_us / 2) as u64 * 10 / 291) as u32
}

pub struct EchoRanger<T, E, D, C> {
    trigger: T,
    echo: E,
    delay: D,
    clock: C,
    timeout_us: u64,
}

impl<T, E, D, C> EchoRanger<T, E, D, C>
where
    T: OutputPin,
    E: InputPin<Error = T::Error>,
    D: DelayNs,
    C: MicrosClock,
{
    pub fn new(trigger: T, echo: E, delay: D, clock: C) -> Self {
        Self {
            trigger,
            echo,
            delay,
            clock,
            timeout_us: consts::PULSE_TIMEOUT_US,
        }
    }

    #[cfg(test)]
    fn with_timeout(mut self, timeout_us: u64) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Fire one ping and return the distance in centimeters.
    pub fn measure(&mut self) -> Result<u32, RangerError<T::Error>> {
        self.trigger()?;
        let duration = self.pulse_in()?;
        Ok(echo_to_cm(duration))
    }

    fn trigger(&mut self) -> Result<(), T::Error> {
        // short LOW first so the HIGH edge is clean
        self.trigger.set_low()?;
        self.delay.delay_us(5);
        self.trigger.set_high()?;
        self.delay.delay_us(10);
        self.trigger.set_low()
    }

    /// Width of the next HIGH pulse on the echo line in microseconds.
    fn pulse_in(&mut self) -> Result<u32, RangerError<T::Error>> {
        let deadline = self.clock.now_us() + self.timeout_us;

        // a pulse may still be in progress from a previous ping
        while self.echo.is_high()? {
            self.check_deadline(deadline)?;
        }
        while self.echo.is_low()? {
            self.check_deadline(deadline)?;
        }
        let rise = self.clock.now_us();
        while self.echo.is_high()? {
            self.check_deadline(deadline)?;
        }
        let fall = self.clock.now_us();

        Ok(fall.saturating_sub(rise).min(u32::MAX as u64) as u32)
    }

    fn check_deadline(&self, deadline: u64) -> Result<(), RangerError<T::Error>> {
        if self.clock.now_us() >= deadline {
            return Err(RangerError::Timeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::{cell::Cell, cell::RefCell, rc::Rc};

    /// Simulated time. Every clock read advances it by one microsecond so
    /// busy loops make progress.
    #[derive(Clone, Default)]
    struct SimTime(Rc<Cell<u64>>);

    impl SimTime {
        fn advance(&self, us: u64) {
            self.0.set(self.0.get() + us);
        }
        fn get(&self) -> u64 {
            self.0.get()
        }
    }

    impl MicrosClock for SimTime {
        fn now_us(&self) -> u64 {
            self.advance(1);
            self.get()
        }
    }

    struct FakeDelay(SimTime);

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0.advance((ns / 1000) as u64);
        }
    }

    struct FakeTrigger {
        time: SimTime,
        edges: Rc<RefCell<Vec<(u64, bool)>>>,
    }

    impl ErrorType for FakeTrigger {
        type Error = Infallible;
    }

    impl OutputPin for FakeTrigger {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.edges.borrow_mut().push((self.time.get(), false));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.edges.borrow_mut().push((self.time.get(), true));
            Ok(())
        }
    }

    /// Echo line that is HIGH inside `[rise, fall)` of simulated time.
    struct FakeEcho {
        time: SimTime,
        pulse: Option<(u64, u64)>,
    }

    impl ErrorType for FakeEcho {
        type Error = Infallible;
    }

    impl InputPin for FakeEcho {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            let now = self.time.get();
            Ok(self.pulse.is_some_and(|(rise, fall)| now >= rise && now < fall))
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|high| !high)
        }
    }

    type TestRanger = EchoRanger<FakeTrigger, FakeEcho, FakeDelay, SimTime>;

    fn ranger(pulse: Option<(u64, u64)>) -> (TestRanger, Rc<RefCell<Vec<(u64, bool)>>>) {
        let time = SimTime::default();
        let edges = Rc::new(RefCell::new(Vec::new()));
        let ranger = EchoRanger::new(
            FakeTrigger { time: time.clone(), edges: edges.clone() },
            FakeEcho { time: time.clone(), pulse },
            FakeDelay(time.clone()),
            time,
        );
        (ranger, edges)
    }

    #[test]
    fn test_echo_to_cm() {
        assert_eq!(echo_to_cm(0), 0);
        assert_eq!(echo_to_cm(5820), 100);
        assert_eq!(echo_to_cm(23280), 400);
        // 500 / 29.1 = 17.18
        assert_eq!(echo_to_cm(1000), 17);
        assert_eq!(echo_to_cm(60), 1);
        // odd durations lose the half microsecond first
        assert_eq!(echo_to_cm(59), 0);
    }

    #[test]
    fn test_trigger_pulse_shape() {
        let (mut ranger, edges) = ranger(Some((100, 5920)));
        ranger.measure().unwrap();

        let edges = edges.borrow();
        let levels: Vec<bool> = edges.iter().map(|(_, level)| *level).collect();
        assert_eq!(levels, vec![false, true, false]);
        let high_for = edges[2].0 - edges[1].0;
        assert!(high_for >= 10, "trigger high for only {} us", high_for);
    }

    #[test]
    fn test_measures_echo_width() {
        // echo rises at 100 us and stays high for 5820 us
        let (mut ranger, _) = ranger(Some((100, 5920)));
        assert_eq!(ranger.measure(), Ok(100));
    }

    #[test]
    fn test_stuck_low_echo_times_out() {
        let (ranger, _) = ranger(None);
        let mut ranger = ranger.with_timeout(2_000);
        assert_eq!(ranger.measure(), Err(RangerError::Timeout));
    }

    #[test]
    fn test_stuck_high_echo_times_out() {
        let (ranger, _) = ranger(Some((0, u64::MAX)));
        let mut ranger = ranger.with_timeout(2_000);
        assert_eq!(ranger.measure(), Err(RangerError::Timeout));
    }
}
