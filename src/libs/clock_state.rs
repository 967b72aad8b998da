use super::observable::{Observable, SubscriptionId};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

// chrono reports leap seconds as nanosecond >= 1e9
fn millis(time: &NaiveTime) -> f64 {
    (time.nanosecond() / 1_000_000).min(999) as f64
}

/// Hand angles in degrees clockwise from 12 o'clock, including the
/// sub-second fraction so the hands sweep instead of jumping.
pub fn hand_angles(time: &NaiveTime) -> HandAngles {
    let ms = millis(time);
    let s = time.second() as f64;
    let m = time.minute() as f64;
    let h = (time.hour() % 12) as f64;
    HandAngles {
        second: s * 6.0 + ms * 0.006,
        minute: m * 6.0 + s * 0.1 + ms * 0.0001,
        hour: h * 30.0 + m * 0.5 + s * (0.5 / 60.0) + ms * (0.5 / 60000.0),
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "星期一",
        Weekday::Tue => "星期二",
        Weekday::Wed => "星期三",
        Weekday::Thu => "星期四",
        Weekday::Fri => "星期五",
        Weekday::Sat => "星期六",
        Weekday::Sun => "星期日",
    }
}

pub fn format_date(date: &NaiveDate) -> String {
    format!(
        "{}年{:02}月{:02}日 {}",
        date.year(),
        date.month(),
        date.day(),
        weekday_name(date.weekday())
    )
}

pub fn format_time(time: &NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClockState {
    pub date: String,
    pub time: String,
    pub angles: HandAngles,
}

/// One field of [`ClockState`] that changed, with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Date(String),
    Time(String),
    HourAngle(f64),
    MinuteAngle(f64),
    SecondAngle(f64),
}

fn set_field<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}

pub struct ClockViewModel {
    state: RefCell<ClockState>,
    last_date: Cell<Option<NaiveDate>>,
    last_second: Cell<Option<NaiveDateTime>>,
    changes: Observable<Change>,
}

impl ClockViewModel {
    pub fn new(now: NaiveDateTime) -> Self {
        let model = Self {
            state: RefCell::new(ClockState::default()),
            last_date: Cell::new(None),
            last_second: Cell::new(None),
            changes: Observable::new(),
        };
        model.update(now);
        model
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Change) + 'static,
    {
        self.changes.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    pub fn date(&self) -> String {
        self.state.borrow().date.clone()
    }

    pub fn time(&self) -> String {
        self.state.borrow().time.clone()
    }

    pub fn angles(&self) -> HandAngles {
        self.state.borrow().angles
    }

    /// Recompute every field for `now` and notify subscribers of the ones
    /// that changed. Returns the published changes.
    pub fn update(&self, now: NaiveDateTime) -> Vec<Change> {
        let mut changes = Vec::new();
        {
            let mut state = self.state.borrow_mut();
            let date = now.date();
            if self.last_date.get() != Some(date) {
                log::debug!("date rolled over to {date}");
                if set_field(&mut state.date, format_date(&date)) {
                    changes.push(Change::Date(state.date.clone()));
                }
                self.last_date.set(Some(date));
            }

            let second = now.with_nanosecond(0).unwrap_or(now);
            if self.last_second.get() != Some(second) {
                if set_field(&mut state.time, format_time(&now.time())) {
                    changes.push(Change::Time(state.time.clone()));
                }
                self.last_second.set(Some(second));
            }

            let angles = hand_angles(&now.time());
            if set_field(&mut state.angles.second, angles.second) {
                changes.push(Change::SecondAngle(angles.second));
            }
            if set_field(&mut state.angles.minute, angles.minute) {
                changes.push(Change::MinuteAngle(angles.minute));
            }
            if set_field(&mut state.angles.hour, angles.hour) {
                changes.push(Change::HourAngle(angles.hour));
            }
        }
        for change in &changes {
            self.changes.publish(change);
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_milli_opt(h, m, s, ms)
            .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn second_hand_positions() {
        assert!(close(hand_angles(&at(12, 0, 0, 0).time()).second, 0.0));
        assert!(close(hand_angles(&at(12, 0, 30, 0).time()).second, 180.0));
        assert!(close(hand_angles(&at(12, 0, 30, 500).time()).second, 183.0));
    }

    #[test]
    fn quarter_past_twelve() {
        let angles = hand_angles(&at(12, 15, 0, 0).time());
        assert!(close(angles.minute, 90.0));
        assert!(close(angles.hour, 7.5));
    }

    #[test]
    fn hour_hand_wraps_at_noon() {
        let morning = hand_angles(&at(3, 0, 0, 0).time());
        let afternoon = hand_angles(&at(15, 0, 0, 0).time());
        assert!(close(morning.hour, 90.0));
        assert!(close(morning.hour, afternoon.hour));
    }

    #[test]
    fn angles_stay_below_a_full_turn() {
        let last = hand_angles(&at(23, 59, 59, 999).time());
        for angle in [last.hour, last.minute, last.second] {
            assert!((0.0..360.0).contains(&angle), "{angle}");
        }
    }

    #[test]
    fn leap_second_is_clamped() {
        let leap = NaiveTime::from_hms_milli_opt(23, 59, 59, 1500).unwrap();
        assert!(hand_angles(&leap).second < 360.0);
    }

    #[test]
    fn angles_advance_monotonically_modulo_turn() {
        let start = at(0, 0, 0, 0);
        let mut previous = hand_angles(&start.time());
        for step in 1..=(12 * 3600 * 10) {
            let now = start + chrono::Duration::milliseconds(step * 100);
            let angles = hand_angles(&now.time());
            for (before, after) in [
                (previous.hour, angles.hour),
                (previous.minute, angles.minute),
                (previous.second, angles.second),
            ] {
                let delta = (after - before).rem_euclid(360.0);
                assert!(delta < 180.0, "hand went backwards at step {step}");
            }
            previous = angles;
        }
    }

    #[test]
    fn date_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_date(&date), "2024年01月15日 星期一");
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
        assert_eq!(format_date(&sunday), "2024年01月21日 星期日");
    }

    #[test]
    fn time_format_is_zero_padded() {
        assert_eq!(format_time(&at(7, 5, 3, 420).time()), "07:05:03");
    }

    #[test]
    fn initial_state_is_populated() {
        let model = ClockViewModel::new(at(14, 30, 45, 0));
        assert_eq!(model.date(), "2024年01月15日 星期一");
        assert_eq!(model.time(), "14:30:45");
        assert!(close(model.angles().second, 270.0));
    }

    #[test]
    fn time_string_republished_only_when_second_changes() {
        let model = ClockViewModel::new(at(14, 30, 45, 0));
        let changes = model.update(at(14, 30, 45, 100));
        assert!(!changes.iter().any(|c| matches!(c, Change::Time(_))));
        assert!(changes.contains(&Change::SecondAngle(45.0 * 6.0 + 100.0 * 0.006)));

        let changes = model.update(at(14, 30, 46, 0));
        assert!(changes.contains(&Change::Time("14:30:46".into())));
        assert!(!changes.iter().any(|c| matches!(c, Change::Date(_))));
    }

    #[test]
    fn same_second_a_minute_later_still_updates_time() {
        let model = ClockViewModel::new(at(14, 30, 45, 0));
        let changes = model.update(at(14, 31, 45, 0));
        assert!(changes.contains(&Change::Time("14:31:45".into())));
    }

    #[test]
    fn identical_tick_publishes_nothing() {
        let model = ClockViewModel::new(at(9, 0, 0, 0));
        assert!(model.update(at(9, 0, 0, 0)).is_empty());
    }

    #[test]
    fn midnight_rolls_the_date() {
        let model = ClockViewModel::new(at(23, 59, 59, 900));
        let next_day = NaiveDate::from_ymd_opt(2024, 1, 16)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let changes = model.update(next_day);
        assert!(changes.contains(&Change::Date("2024年01月16日 星期二".into())));
        assert!(changes.contains(&Change::Time("00:00:00".into())));
    }

    #[test]
    fn subscribers_see_published_changes() {
        let model = ClockViewModel::new(at(8, 0, 0, 0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = model.subscribe({
            let seen = seen.clone();
            move |change| seen.borrow_mut().push(change.clone())
        });
        model.update(at(8, 0, 1, 0));
        assert!(seen.borrow().contains(&Change::Time("08:00:01".into())));
        assert!(model.unsubscribe(id));
        seen.borrow_mut().clear();
        model.update(at(8, 0, 2, 0));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn subscriber_may_read_the_model_during_publish() {
        let model = Rc::new(ClockViewModel::new(at(8, 0, 0, 0)));
        let read = Rc::new(RefCell::new(String::new()));
        model.subscribe({
            let weak = Rc::downgrade(&model);
            let read = read.clone();
            move |change| {
                if let (Change::Time(_), Some(model)) = (change, weak.upgrade()) {
                    *read.borrow_mut() = model.time();
                }
            }
        });
        model.update(at(8, 0, 5, 0));
        assert_eq!(*read.borrow(), "08:00:05");
    }
}
