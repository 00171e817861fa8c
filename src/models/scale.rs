//! Axis scales
//!
//! Both scales interpolate linearly without clamping. A degenerate domain
//! (min == max) maps every input to the middle of the range.

use chrono::{Datelike, NaiveDate, Weekday};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_YEAR: f64 = 365.0;

fn interpolate(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let span = domain.1 - domain.0;
    let t = if span == 0.0 { 0.5 } else { (value - domain.0) / span };
    range.0 + t * (range.1 - range.0)
}

/// value -> pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        interpolate(value, self.domain, self.range)
    }

    /// Roughly `count` round-numbered ticks inside the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = ordered(self.domain);
        linear_ticks(start, stop, count as f64)
    }

    /// Fraction digits needed to label the ticks produced by `ticks(count)`
    pub fn tick_precision(&self, count: usize) -> usize {
        let (start, stop) = ordered(self.domain);
        let step = tick_step(start, stop, count as f64).abs();
        if step == 0.0 || !step.is_finite() {
            return 0;
        }
        (-step.log10().floor()).max(0.0) as usize
    }
}

/// date -> pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        TimeScale { domain, range }
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, date: NaiveDate) -> f64 {
        interpolate(
            day_number(date),
            (day_number(self.domain.0), day_number(self.domain.1)),
            self.range,
        )
    }

    /// Roughly `count` ticks aligned to calendar boundaries
    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        let (start, stop) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        match TimeInterval::for_span(start, stop, count as f64) {
            Some(interval) => interval.range(start, stop),
            None => Vec::new(),
        }
    }
}

/// Label for a time tick, coarsest calendar unit the date sits on
pub fn format_time_tick(date: NaiveDate) -> String {
    if date.ordinal() == 1 {
        date.format("%Y").to_string()
    } else if date.day() == 1 {
        date.format("%B").to_string()
    } else if date.weekday() == Weekday::Sun {
        date.format("%b %d").to_string()
    } else {
        date.format("%a %d").to_string()
    }
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn ordered(domain: (f64, f64)) -> (f64, f64) {
    if domain.0 <= domain.1 {
        domain
    } else {
        (domain.1, domain.0)
    }
}

/// Calendar interval used to place time ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    /// Every k-th day of the month
    Day(u32),
    /// Sundays
    Week,
    /// First of every month whose zero-based index is a multiple of k
    Month(u32),
    /// First of January of years that are multiples of k
    Year(i32),
}

impl TimeInterval {
    /// (interval, approximate length in days), ascending
    const CANDIDATES: [(TimeInterval, f64); 6] = [
        (TimeInterval::Day(1), 1.0),
        (TimeInterval::Day(2), 2.0),
        (TimeInterval::Week, 7.0),
        (TimeInterval::Month(1), DAYS_PER_MONTH),
        (TimeInterval::Month(3), 3.0 * DAYS_PER_MONTH),
        (TimeInterval::Year(1), DAYS_PER_YEAR),
    ];

    /// Pick the interval whose length is closest to span / count
    pub fn for_span(start: NaiveDate, stop: NaiveDate, count: f64) -> Option<Self> {
        if !(count > 0.0) {
            return None;
        }
        let span = day_number(stop) - day_number(start);
        let target = span / count;

        let i = Self::CANDIDATES
            .iter()
            .position(|(_, len)| *len > target)
            .unwrap_or(Self::CANDIDATES.len());

        if i == Self::CANDIDATES.len() {
            let step = tick_step(
                day_number(start) / DAYS_PER_YEAR,
                day_number(stop) / DAYS_PER_YEAR,
                count,
            )
            .floor();
            if !step.is_finite() || step < 1.0 {
                return None;
            }
            return Some(TimeInterval::Year(step as i32));
        }
        if i == 0 {
            return Some(TimeInterval::Day(1));
        }

        let (lower, lower_len) = Self::CANDIDATES[i - 1];
        let (upper, upper_len) = Self::CANDIDATES[i];
        if target / lower_len < upper_len / target {
            Some(lower)
        } else {
            Some(upper)
        }
    }

    fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            TimeInterval::Day(k) => date.day0() % k.max(1) == 0,
            TimeInterval::Week => date.weekday() == Weekday::Sun,
            TimeInterval::Month(k) => date.day() == 1 && date.month0() % k.max(1) == 0,
            TimeInterval::Year(k) => date.ordinal() == 1 && date.year().rem_euclid(k.max(1)) == 0,
        }
    }

    /// Boundaries in [start, stop], both inclusive
    pub fn range(&self, start: NaiveDate, stop: NaiveDate) -> Vec<NaiveDate> {
        match *self {
            TimeInterval::Day(_) | TimeInterval::Week => start
                .iter_days()
                .take_while(|d| *d <= stop)
                .filter(|d| self.matches(*d))
                .collect(),
            TimeInterval::Month(_) => {
                let mut ticks = Vec::new();
                let mut cursor = NaiveDate::from_ymd_opt(start.year(), start.month(), 1);
                while let Some(date) = cursor {
                    if date > stop {
                        break;
                    }
                    if date >= start && self.matches(date) {
                        ticks.push(date);
                    }
                    cursor = if date.month() == 12 {
                        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
                    } else {
                        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
                    };
                }
                ticks
            }
            TimeInterval::Year(_) => (start.year()..=stop.year())
                .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
                .filter(|d| *d >= start && *d <= stop && self.matches(*d))
                .collect(),
        }
    }
}

/// Nice step size (1, 2 or 5 times a power of ten) for about `count` ticks
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let step0 = (stop - start).abs() / count.max(0.0);
    let mut step1 = 10f64.powf(step0.log10().floor());
    let error = step0 / step1;
    if error >= E10 {
        step1 *= 10.0;
    } else if error >= E5 {
        step1 *= 5.0;
    } else if error >= E2 {
        step1 *= 2.0;
    }
    if stop < start {
        -step1
    } else {
        step1
    }
}

/// (first index, last index, increment). A negative increment means the
/// ticks are `i / -inc`, which keeps fractional steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn linear_ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (i1, i2, inc) = tick_spec(start, stop, count);
    if !(i2 >= i1) || !inc.is_finite() {
        return Vec::new();
    }
    let n = (i2 - i1) as i64 + 1;
    (0..n)
        .map(|k| {
            let i = i1 + k as f64;
            if inc < 0.0 {
                i / -inc
            } else {
                i * inc
            }
        })
        .collect()
}
