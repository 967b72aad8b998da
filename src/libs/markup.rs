use gtk4::glib::markup_escape_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStyle {
    DateNumber,
    DateLabel,
    Weekday,
    TimeNumber,
    TimeSeparator,
}

impl RunStyle {
    fn color(self) -> &'static str {
        match self {
            RunStyle::DateNumber | RunStyle::TimeNumber => "#ffffff",
            RunStyle::DateLabel | RunStyle::TimeSeparator => "#969696",
            RunStyle::Weekday => "#64c8ff",
        }
    }

    fn weight(self) -> &'static str {
        match self {
            RunStyle::DateNumber | RunStyle::TimeNumber | RunStyle::Weekday => "bold",
            RunStyle::DateLabel | RunStyle::TimeSeparator => "normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    fn new(text: &str, style: RunStyle) -> Self {
        Self {
            text: text.to_string(),
            style,
        }
    }
}

/// Splits `"2024年01月15日 星期一"` into styled runs. Anything that does not
/// look like that yields no runs.
pub fn date_runs(date: &str) -> Vec<Run> {
    let Some((ymd, weekday)) = date.split_once(' ') else {
        return Vec::new();
    };
    let (Some(year_end), Some(month_end), Some(day_end)) =
        (ymd.find('年'), ymd.find('月'), ymd.find('日'))
    else {
        return Vec::new();
    };
    if year_end == 0 || month_end < year_end || day_end < month_end {
        return Vec::new();
    }
    let year = &ymd[..year_end];
    let month = &ymd[year_end + '年'.len_utf8()..month_end];
    let day = &ymd[month_end + '月'.len_utf8()..day_end];

    vec![
        Run::new(year, RunStyle::DateNumber),
        Run::new("年", RunStyle::DateLabel),
        Run::new(month, RunStyle::DateNumber),
        Run::new("月", RunStyle::DateLabel),
        Run::new(day, RunStyle::DateNumber),
        Run::new("日", RunStyle::DateLabel),
        Run::new(" ", RunStyle::DateLabel),
        Run::new(weekday, RunStyle::Weekday),
    ]
}

/// Splits `"HH:mm:ss"` into numbers and separators.
pub fn time_runs(time: &str) -> Vec<Run> {
    let parts: Vec<&str> = time.split(':').collect();
    let [hour, minute, second] = parts.as_slice() else {
        return Vec::new();
    };
    vec![
        Run::new(hour, RunStyle::TimeNumber),
        Run::new(":", RunStyle::TimeSeparator),
        Run::new(minute, RunStyle::TimeNumber),
        Run::new(":", RunStyle::TimeSeparator),
        Run::new(second, RunStyle::TimeNumber),
    ]
}

// thin space, roughly 4px at the readout's date size
const LABEL_PAD: char = '\u{2009}';

impl Run {
    /// 年/月/日 get a little air on both sides so they don't touch the digits.
    fn padded(&self) -> String {
        if self.style == RunStyle::DateLabel && !self.text.trim().is_empty() {
            format!("{LABEL_PAD}{}{LABEL_PAD}", self.text)
        } else {
            self.text.clone()
        }
    }
}

pub fn to_markup(runs: &[Run]) -> String {
    runs.iter()
        .map(|run| {
            format!(
                "<span foreground=\"{}\" weight=\"{}\">{}</span>",
                run.style.color(),
                run.style.weight(),
                markup_escape_text(&run.padded())
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(runs: &[Run]) -> Vec<&str> {
        runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn splits_date() {
        let runs = date_runs("2024年01月15日 星期一");
        assert_eq!(
            texts(&runs),
            ["2024", "年", "01", "月", "15", "日", " ", "星期一"]
        );
        assert_eq!(runs[0].style, RunStyle::DateNumber);
        assert_eq!(runs[1].style, RunStyle::DateLabel);
        assert_eq!(runs[7].style, RunStyle::Weekday);
    }

    #[test]
    fn splits_time() {
        let runs = time_runs("14:30:45");
        assert_eq!(texts(&runs), ["14", ":", "30", ":", "45"]);
        assert_eq!(runs[1].style, RunStyle::TimeSeparator);
        assert_eq!(runs[4].style, RunStyle::TimeNumber);
    }

    #[test]
    fn partial_input_produces_nothing() {
        for date in ["", "2024年01月15日", "年01月15日 星期一", "2024日01月15年 星期一"] {
            assert!(date_runs(date).is_empty(), "{date:?}");
        }
        for time in ["", "14:30", "14:30:45:00"] {
            assert!(time_runs(time).is_empty(), "{time:?}");
        }
        assert_eq!(to_markup(&[]), "");
    }

    #[test]
    fn markup_styles_each_run() {
        let markup = to_markup(&time_runs("01:02:03"));
        assert_eq!(markup.matches("<span").count(), 5);
        assert!(markup.starts_with("<span foreground=\"#ffffff\" weight=\"bold\">01</span>"));
        assert!(markup.contains("<span foreground=\"#969696\" weight=\"normal\">:</span>"));
    }

    #[test]
    fn date_labels_are_padded_but_the_gap_is_not() {
        let markup = to_markup(&date_runs("2024年01月15日 星期一"));
        for label in ["年", "月", "日"] {
            assert!(markup.contains(&format!(">\u{2009}{label}\u{2009}</span>")), "{label}");
        }
        assert!(markup.contains(">2024</span>"));
        assert!(markup.contains("weight=\"normal\"> </span>"));
    }

    #[test]
    fn markup_escapes_text() {
        let runs = [Run::new("<b>", RunStyle::Weekday)];
        assert!(to_markup(&runs).contains("&lt;b&gt;"));
    }
}
