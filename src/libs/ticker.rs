use super::config::TickSource;
use async_channel::{bounded, TrySendError};
use chrono::{Local, NaiveDateTime};
use gtk4::glib::{self, spawn_future_local, timeout_future, MainContext};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{interval, MissedTickBehavior};

pub enum Ticker {
    Tokio {
        clock: tokio::task::JoinHandle<()>,
        sink: glib::JoinHandle<()>,
    },
    Glib(glib::JoinHandle<()>),
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn deliver<F: Fn(NaiveDateTime)>(on_tick: &F, now: NaiveDateTime) {
    // widgets may only be touched from the thread running the main loop
    debug_assert!(MainContext::ref_thread_default().is_owner());
    on_tick(now);
}

impl Ticker {
    /// Calls `on_tick` with the local time every `period`, always on the
    /// GTK main thread, until [`Ticker::stop`].
    pub fn start<F>(source: TickSource, period: Duration, on_tick: F) -> Self
    where
        F: Fn(NaiveDateTime) + 'static,
    {
        match (source, Handle::try_current()) {
            (TickSource::Tokio, Ok(runtime)) => {
                log::info!("ticking every {period:?} on the tokio runtime");
                Self::tokio(&runtime, period, on_tick)
            }
            (TickSource::Tokio, Err(err)) => {
                log::warn!("no tokio runtime ({err}), ticking on the main loop");
                Self::glib(period, on_tick)
            }
            (TickSource::Glib, _) => {
                log::info!("ticking every {period:?} on the main loop");
                Self::glib(period, on_tick)
            }
        }
    }

    fn tokio<F>(runtime: &Handle, period: Duration, on_tick: F) -> Self
    where
        F: Fn(NaiveDateTime) + 'static,
    {
        // one slot: a tick the main loop has not picked up yet is simply stale
        let (tx, rx) = bounded::<NaiveDateTime>(1);
        let clock = runtime.spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                match tx.try_send(now()) {
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => break,
                }
            }
        });
        let sink = spawn_future_local(async move {
            while let Ok(now) = rx.recv().await {
                deliver(&on_tick, now);
            }
        });
        Ticker::Tokio { clock, sink }
    }

    fn glib<F>(period: Duration, on_tick: F) -> Self
    where
        F: Fn(NaiveDateTime) + 'static,
    {
        Ticker::Glib(spawn_future_local(async move {
            loop {
                timeout_future(period).await;
                deliver(&on_tick, now());
            }
        }))
    }

    pub fn stop(self) {
        match self {
            Ticker::Tokio { clock, sink } => {
                clock.abort();
                sink.abort();
            }
            Ticker::Glib(source) => source.abort(),
        }
        log::info!("ticker stopped");
    }
}
