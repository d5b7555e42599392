//! Reactive handle over the storefront driver.

use std::collections::VecDeque;

use leptos::prelude::*;
use leptos::task::spawn_local;
use trove_screens::{
    CartScreen, CatalogScreen, Command, DetailScreen, Event, Notice, Route, Screen, Step,
    Storefront,
};

/// The driver plus a snapshot of its current screen.
///
/// An event is applied and published straight away; its requests then run
/// on a local task. The driver is never borrowed across an await, so input
/// and carousel ticks keep flowing while a request is in flight.
#[derive(Clone, Copy)]
pub struct Shop {
    store: StoredValue<Storefront, LocalStorage>,
    screen: RwSignal<Option<Screen>>,
    in_flight: RwSignal<usize>,
}

impl Shop {
    pub fn new(store: Storefront) -> Self {
        Self {
            store: StoredValue::new_local(store),
            screen: RwSignal::new(None),
            in_flight: RwSignal::new(0),
        }
    }

    /// Mount the catalog.
    pub fn start(self) {
        let commands = self
            .store
            .try_update_value(Storefront::mount)
            .unwrap_or_default();
        self.publish();
        self.run(commands);
    }

    pub fn send(self, event: Event) {
        let Some(commands) = self
            .store
            .try_update_value(|store| store.apply(event))
            .flatten()
        else {
            return;
        };
        self.publish();
        self.run(commands);
    }

    fn run(self, commands: Vec<Command>) {
        if commands.is_empty() {
            return;
        }
        self.in_flight.update(|n| *n += 1);
        spawn_local(async move {
            let mut queue: VecDeque<Command> = commands.into();
            while let Some(command) = queue.pop_front() {
                let Some(step) = self.store.try_update_value(|store| store.step(command)) else {
                    break;
                };
                let follow_up = match step {
                    Step::Done(commands) => commands,
                    Step::Request(request) => {
                        let reply = request.send().await;
                        match self.store.try_update_value(|store| store.complete(reply)) {
                            Some(commands) => commands,
                            None => break,
                        }
                    }
                };
                self.publish();
                queue.extend(follow_up);
            }
            self.in_flight.update(|n| *n = n.saturating_sub(1));
        });
    }

    fn publish(self) {
        if let Some(screen) = self.store.try_with_value(|store| store.current().clone()) {
            self.screen.set(Some(screen));
        }
    }

    /// `None` until the catalog has been mounted.
    pub fn route(self) -> Option<Route> {
        self.screen.with(|s| s.as_ref().map(Screen::route))
    }

    /// Whether any request is still outstanding.
    pub fn busy(self) -> bool {
        self.in_flight.get() > 0
    }

    pub fn notice(self) -> Option<Notice> {
        self.screen
            .with(|s| s.as_ref().and_then(|s| s.notice().cloned()))
    }

    pub fn catalog<T>(self, f: impl FnOnce(&CatalogScreen) -> T) -> Option<T> {
        self.screen.with(|s| match s {
            Some(Screen::Catalog(screen)) => Some(f(screen)),
            _ => None,
        })
    }

    pub fn cart<T>(self, f: impl FnOnce(&CartScreen) -> T) -> Option<T> {
        self.screen.with(|s| match s {
            Some(Screen::Cart(screen)) => Some(f(screen)),
            _ => None,
        })
    }

    pub fn detail<T>(self, f: impl FnOnce(&DetailScreen) -> T) -> Option<T> {
        self.screen.with(|s| match s {
            Some(Screen::Detail(screen)) => Some(f(&**screen)),
            _ => None,
        })
    }
}
