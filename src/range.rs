use thiserror::Error;

use crate::geometry::{percent_of, salary_label, value_at_percent};

pub const DEFAULT_MIN: i64 = 50;
pub const DEFAULT_MAX: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("range bound must satisfy min < max (got min={min}, max={max})")]
    DegenerateBound { min: i64, max: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Low,
    High,
}

impl Handle {
    pub fn other(self) -> Self {
        match self {
            Handle::Low => Handle::High,
            Handle::High => Handle::Low,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RangeConfig {
    pub min: i64,
    pub max: i64,
    pub initial_low: Option<i64>,
    pub initial_high: Option<i64>,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            initial_low: None,
            initial_high: None,
        }
    }
}

pub type ChangeHandler = Box<dyn FnMut(i64, i64)>;

pub struct RangeSelector {
    bound: Bound,
    low: i64,
    high: i64,
    active: Handle,
    on_change: Option<ChangeHandler>,
}

impl std::fmt::Debug for RangeSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeSelector")
            .field("bound", &self.bound)
            .field("low", &self.low)
            .field("high", &self.high)
            .field("active", &self.active)
            .finish()
    }
}

impl RangeSelector {
    pub fn new(config: RangeConfig) -> Result<Self, RangeError> {
        let RangeConfig { min, max, .. } = config;
        if min >= max {
            return Err(RangeError::DegenerateBound { min, max });
        }

        let low = config.initial_low.unwrap_or(min).clamp(min, max - 1);
        let high = config.initial_high.unwrap_or(max).clamp(low + 1, max);

        Ok(Self {
            bound: Bound { min, max },
            low,
            high,
            active: Handle::Low,
            on_change: None,
        })
    }

    pub fn on_change(mut self, handler: impl FnMut(i64, i64) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    pub fn active(&self) -> Handle {
        self.active
    }

    pub fn set_low(&mut self, raw: i64) -> bool {
        let value = self.clamp_to_bound(raw).min(self.high - 1);
        if value == self.low {
            return false;
        }
        self.low = value;
        self.emit();
        true
    }

    pub fn set_high(&mut self, raw: i64) -> bool {
        let value = self.clamp_to_bound(raw).max(self.low + 1);
        if value == self.high {
            return false;
        }
        self.high = value;
        self.emit();
        true
    }

    pub fn set(&mut self, handle: Handle, raw: i64) -> bool {
        match handle {
            Handle::Low => self.set_low(raw),
            Handle::High => self.set_high(raw),
        }
    }

    pub fn position_of(&self, value: i64) -> f64 {
        percent_of(value, self.bound.min, self.bound.max)
    }

    pub fn fill(&self) -> (f64, f64) {
        let left = self.position_of(self.low);
        (left, self.position_of(self.high) - left)
    }

    pub fn value_at(&self, percent: f64) -> i64 {
        value_at_percent(percent, self.bound.min, self.bound.max)
    }

    // Outside the selection the handle on that side wins.
    pub fn nearest_handle(&self, value: i64) -> Handle {
        if value <= self.low {
            return Handle::Low;
        }
        if value >= self.high {
            return Handle::High;
        }
        let to_low = value - self.low;
        let to_high = self.high - value;
        match to_low.cmp(&to_high) {
            std::cmp::Ordering::Less => Handle::Low,
            std::cmp::Ordering::Greater => Handle::High,
            std::cmp::Ordering::Equal => {
                let midpoint = self.bound.min + (self.bound.max - self.bound.min) / 2;
                if value < midpoint { Handle::Low } else { Handle::High }
            }
        }
    }

    pub fn pointer_at(&mut self, percent: f64, dragging: Option<Handle>) -> Handle {
        let value = self.value_at(percent);
        let handle = dragging.unwrap_or_else(|| self.nearest_handle(value));
        self.active = handle;
        self.set(handle, value);
        handle
    }

    pub fn toggle_active(&mut self) {
        self.active = self.active.other();
    }

    pub fn nudge(&mut self, delta: i64) -> bool {
        match self.active {
            Handle::Low => self.set_low(self.low + delta),
            Handle::High => self.set_high(self.high + delta),
        }
    }

    pub fn spans_bound(&self) -> bool {
        self.low == self.bound.min && self.high == self.bound.max
    }

    pub fn label(&self, currency: &str) -> String {
        salary_label(self.low, self.high, currency)
    }

    fn clamp_to_bound(&self, raw: i64) -> i64 {
        raw.clamp(self.bound.min, self.bound.max)
    }

    fn emit(&mut self) {
        tracing::debug!(low = self.low, high = self.high, "range changed");
        if let Some(handler) = self.on_change.as_mut() {
            handler(self.low, self.high);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(config: RangeConfig) -> (RangeSelector, Rc<RefCell<Vec<(i64, i64)>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let selector = RangeSelector::new(config)
            .unwrap()
            .on_change(move |low, high| sink.borrow_mut().push((low, high)));
        (selector, seen)
    }

    fn assert_invariant(selector: &RangeSelector) {
        let bound = selector.bound();
        assert!(bound.min <= selector.low(), "{:?}", selector);
        assert!(selector.low() < selector.high(), "{:?}", selector);
        assert!(selector.high() <= bound.max, "{:?}", selector);
    }

    #[test]
    fn test_defaults() {
        let selector = RangeSelector::new(RangeConfig::default()).unwrap();
        assert_eq!(selector.bound(), Bound { min: 50, max: 100 });
        assert_eq!((selector.low(), selector.high()), (50, 100));
        assert!(selector.spans_bound());
    }

    #[test]
    fn test_degenerate_bound_rejected() {
        let equal = RangeSelector::new(RangeConfig { min: 10, max: 10, ..Default::default() });
        assert_eq!(equal.unwrap_err(), RangeError::DegenerateBound { min: 10, max: 10 });

        let inverted = RangeSelector::new(RangeConfig { min: 20, max: 10, ..Default::default() });
        assert!(inverted.is_err());
    }

    #[test]
    fn test_initial_values_are_clamped() {
        let selector = RangeSelector::new(RangeConfig {
            min: 0,
            max: 10,
            initial_low: Some(10),
            initial_high: Some(3),
        })
        .unwrap();
        assert_eq!((selector.low(), selector.high()), (9, 10));

        let selector = RangeSelector::new(RangeConfig {
            min: 0,
            max: 1,
            initial_low: None,
            initial_high: None,
        })
        .unwrap();
        assert_eq!((selector.low(), selector.high()), (0, 1));
    }

    #[test]
    fn test_invariant_holds_for_all_raw_values() {
        for raw in -20..=140 {
            let (mut selector, _) = recording(RangeConfig::default());
            selector.set_low(raw);
            assert_invariant(&selector);
            selector.set_high(raw);
            assert_invariant(&selector);
            selector.set_low(raw + 1);
            assert_invariant(&selector);
        }
    }

    #[test]
    fn test_clamping_scenario() {
        let (mut selector, seen) = recording(RangeConfig::default());

        selector.set_low(120);
        assert_eq!(selector.low(), 99);

        selector.set_high(10);
        assert_eq!(selector.high(), selector.low() + 1);
        assert_eq!(selector.high(), 100);

        // set_high(10) resolved to the current high, so only set_low emitted
        assert_eq!(*seen.borrow(), vec![(99, 100)]);
    }

    #[test]
    fn test_set_high_pushes_against_low() {
        let (mut selector, seen) = recording(RangeConfig {
            initial_low: Some(70),
            ..Default::default()
        });
        selector.set_high(10);
        assert_eq!(selector.high(), 71);
        assert_eq!(*seen.borrow(), vec![(70, 71)]);
    }

    #[test]
    fn test_setting_current_value_is_noop() {
        let (mut selector, seen) = recording(RangeConfig {
            initial_low: Some(60),
            initial_high: Some(90),
            ..Default::default()
        });
        assert!(!selector.set_low(60));
        assert!(!selector.set_high(90));
        assert_eq!((selector.low(), selector.high()), (60, 90));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_one_emission_per_change() {
        let (mut selector, seen) = recording(RangeConfig::default());
        selector.set_low(55);
        selector.set_low(60);
        selector.set_high(80);
        assert_eq!(*seen.borrow(), vec![(55, 100), (60, 100), (60, 80)]);
    }

    #[test]
    fn test_positions() {
        let (mut selector, _) = recording(RangeConfig::default());
        assert_eq!(selector.position_of(50), 0.0);
        assert_eq!(selector.position_of(100), 100.0);

        selector.set_low(60);
        selector.set_high(85);
        let (left, width) = selector.fill();
        assert!((left - 20.0).abs() < 1e-9);
        assert!((width - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_handle() {
        let (mut selector, _) = recording(RangeConfig::default());
        selector.set_low(60);
        selector.set_high(80);

        assert_eq!(selector.nearest_handle(50), Handle::Low);
        assert_eq!(selector.nearest_handle(60), Handle::Low);
        assert_eq!(selector.nearest_handle(65), Handle::Low);
        assert_eq!(selector.nearest_handle(77), Handle::High);
        assert_eq!(selector.nearest_handle(95), Handle::High);
        // equidistant, left half of the track
        assert_eq!(selector.nearest_handle(70), Handle::Low);
    }

    #[test]
    fn test_both_handles_reachable_when_overlapping() {
        let (mut selector, _) = recording(RangeConfig::default());
        selector.set_low(99);
        assert_eq!((selector.low(), selector.high()), (99, 100));

        // grabbing at the low thumb drags low down
        let handle = selector.pointer_at(selector.position_of(99), None);
        assert_eq!(handle, Handle::Low);
        selector.pointer_at(0.0, Some(handle));
        assert_eq!(selector.low(), 50);

        // and the high handle can still be pulled back from the right edge
        let (mut selector, _) = recording(RangeConfig::default());
        selector.set_high(51);
        let handle = selector.pointer_at(selector.position_of(51), None);
        assert_eq!(handle, Handle::High);
        selector.pointer_at(100.0, Some(handle));
        assert_eq!(selector.high(), 100);
    }

    #[test]
    fn test_keyboard_nudge() {
        let (mut selector, seen) = recording(RangeConfig::default());
        assert_eq!(selector.active(), Handle::Low);
        assert!(!selector.nudge(-1));
        assert!(selector.nudge(5));
        selector.toggle_active();
        assert_eq!(selector.active(), Handle::High);
        assert!(selector.nudge(-10));
        assert_eq!(*seen.borrow(), vec![(55, 100), (55, 90)]);
        assert_eq!(selector.label("₹"), "₹55k - ₹90k");
        assert!(!selector.spans_bound());
    }
}
