use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use futures_util::StreamExt;
use gloo_timers::future::IntervalStream;
use log::debug;
use pump_domain::{DisplayNameRepository, UserMaxRepository, WorkoutLogRepository};

use crate::{App, Intent};

const TICK_INTERVAL_MS: u32 = 1000;

/// Drives the rest countdown of an [`App`] by ticking it once per second.
///
/// Only the most recently started countdown is active. A countdown ends as soon
/// as the app stops resting, because the rest expired, was skipped or the
/// session was completed or cancelled.
#[derive(Debug, Default, Clone)]
pub struct RestTimer {
    generation: Generation,
}

impl RestTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a countdown for the app. `on_tick` is called after each tick, e.g.
    /// to rerender the remaining rest.
    pub fn start<R, F>(&self, app: Rc<RefCell<App<R>>>, on_tick: F)
    where
        R: UserMaxRepository + WorkoutLogRepository + DisplayNameRepository + 'static,
        F: Fn() + 'static,
    {
        let ticket = self.generation.next();
        debug!("start rest timer {}", ticket.id);
        wasm_bindgen_futures::spawn_local(async move {
            let mut interval = IntervalStream::new(TICK_INTERVAL_MS);
            while interval.next().await.is_some() {
                if !ticket.is_current() || !tick(&app) {
                    break;
                }
                on_tick();
            }
            debug!("stop rest timer {}", ticket.id);
        });
    }

    /// Stop the running countdown.
    pub fn stop(&self) {
        self.generation.next();
    }
}

fn tick<R>(app: &RefCell<App<R>>) -> bool
where
    R: UserMaxRepository + WorkoutLogRepository + DisplayNameRepository,
{
    let Ok(mut app) = app.try_borrow_mut() else {
        debug!("skipped rest timer tick, as app is borrowed");
        return true;
    };
    if !app.is_resting() {
        return false;
    }
    match app.dispatch(Intent::Tick) {
        Ok(()) => true,
        Err(err) => {
            debug!("failed to tick rest timer: {err}");
            false
        }
    }
}

#[derive(Debug, Default, Clone)]
struct Generation(Rc<Cell<u64>>);

impl Generation {
    /// Invalidate all previous tickets.
    fn next(&self) -> Ticket {
        let id = self.0.get().wrapping_add(1);
        self.0.set(id);
        Ticket {
            id,
            generation: self.clone(),
        }
    }
}

struct Ticket {
    id: u64,
    generation: Generation,
}

impl Ticket {
    fn is_current(&self) -> bool {
        self.generation.0.get() == self.id
    }
}
