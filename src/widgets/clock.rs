use crate::*;
use libs::clock_state::{Change, ClockViewModel};
use libs::observable::SubscriptionId;
use widgets::dial::Dial;
use widgets::readout;

#[derive(Clone)]
pub struct Clock {
    widget: Box,
    dial: Dial,
    reveal_dial: Revealer,
}

impl Clock {
    pub fn widget(&self) -> Box {
        self.widget.clone()
    }

    /// Shows or hides the dial. The date and time labels stay either way.
    pub fn set_show_clock(&self, show: bool) {
        self.reveal_dial.set_reveal_child(show);
    }

    pub fn shows_clock(&self) -> bool {
        self.reveal_dial.reveals_child()
    }

    /// Stateful `show-clock` action flipping the dial's visibility.
    pub fn show_clock_action(&self) -> gio::SimpleAction {
        let action =
            gio::SimpleAction::new_stateful("show-clock", None, &self.shows_clock().to_variant());
        action.connect_activate(clone!(
            #[strong(rename_to = clock)] self,
            move |action, _| {
                let shown = action
                    .state()
                    .and_then(|state| state.get::<bool>())
                    .unwrap_or(true);
                action.set_state(&(!shown).to_variant());
                clock.set_show_clock(!shown);
            }
        ));
        action
    }

    fn apply(&self, model: &ClockViewModel, change: &Change) {
        match change {
            Change::Date(date) => readout::show_date(&self.widget, date),
            Change::Time(time) => readout::show_time(&self.widget, time),
            Change::HourAngle(_) | Change::MinuteAngle(_) | Change::SecondAngle(_) => {
                self.dial.set_angles(model.angles())
            }
        }
    }

    fn refresh(&self, model: &ClockViewModel) {
        readout::show_date(&self.widget, &model.date());
        readout::show_time(&self.widget, &model.time());
        self.dial.set_angles(model.angles());
    }
}

/// Builds the clock view and keeps it bound to `model` while it is mapped.
pub fn new(config: &Config, model: Rc<ClockViewModel>) -> Clock {
    let widget = Box::new(Orientation::Vertical, 12);
    widget.add_css_class("clock");
    let dial = Dial::new(config);
    let reveal_dial = Revealer::builder()
        .transition_type(RevealerTransitionType::Crossfade)
        .transition_duration(250)
        .child(&dial.widget())
        .build();
    let readout = readout::new();
    widget.append(&reveal_dial);
    widget.append(&readout);
    let clock = Clock {
        widget,
        dial,
        reveal_dial,
    };
    clock.set_show_clock(config.show_clock);

    let subscription: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
    clock.widget.connect_map(clone!(
        #[strong] model,
        #[strong] subscription,
        #[strong(rename_to = dial)] clock.dial,
        #[weak(rename_to = reveal_dial)] clock.reveal_dial,
        move |widget| {
            // a remap must not leave a second subscription behind
            if let Some(id) = subscription.take() {
                model.unsubscribe(id);
            }
            let clock = Clock {
                widget: widget.clone(),
                dial: dial.clone(),
                reveal_dial,
            };
            clock.refresh(&model);
            let weak_model = Rc::downgrade(&model);
            subscription.set(Some(model.subscribe(move |change| {
                if let Some(model) = weak_model.upgrade() {
                    clock.apply(&model, change);
                }
            })));
        }
    ));
    clock.widget.connect_unmap(move |_| {
        if let Some(id) = subscription.take() {
            model.unsubscribe(id);
        }
    });
    clock
}
