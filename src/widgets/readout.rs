use crate::*;
use libs::lookup::{apply_or_retry, find_named_as, Idle};
use libs::markup::{date_runs, time_runs, to_markup};

pub const DATE_LABEL: &str = "clock-date";
pub const TIME_LABEL: &str = "clock-time";

pub fn new() -> Box {
    let widget = Box::new(Orientation::Vertical, 4);
    widget.add_css_class("readout");
    for (name, class) in [(DATE_LABEL, "date"), (TIME_LABEL, "time")] {
        let label = Label::builder().name(name).css_classes([class]).build();
        widget.append(&label);
    }
    widget
}

fn show(root: &Box, name: &'static str, markup: String) {
    apply_or_retry(
        clone!(
            #[weak] root,
            #[upgrade_or] None,
            move || find_named_as::<Label>(&root, name)
        ),
        move |label: Label| label.set_markup(&markup),
        &Idle,
    );
}

/// Renders `date` into the date label found under `root`.
pub fn show_date(root: &Box, date: &str) {
    show(root, DATE_LABEL, to_markup(&date_runs(date)));
}

pub fn show_time(root: &Box, time: &str) {
    show(root, TIME_LABEL, to_markup(&time_runs(time)));
}
