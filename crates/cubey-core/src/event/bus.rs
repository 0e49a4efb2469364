// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::any::{type_name, Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Marker trait for payload types that can travel over the [`EventBus`].
///
/// Each implementing type gets its own channel, keyed by its [`TypeId`].
pub trait Event: 'static {}

/// A component able to receive events of type `E`.
///
/// A component implements this trait once per event type it listens to and
/// registers itself with [`EventBus::subscribe_listener`]. Handlers take
/// `&self` and may be re-entered by a broadcast they trigger, so mutable
/// state lives behind `Cell`/`RefCell` borrows that are not held across a
/// broadcast.
pub trait Listener<E: Event> {
    /// Called synchronously for every broadcast of `E` while subscribed.
    fn on_event(&self, event: &E);
}

/// Stable identifier of one registration on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback = Rc<dyn Fn(&dyn Any)>;

struct Entry {
    id: ListenerId,
    callback: Callback,
    live: Rc<Cell<bool>>,
}

#[derive(Default)]
struct Registry {
    channels: HashMap<TypeId, Vec<Entry>>,
    next_id: u64,
}

impl Registry {
    fn insert(&mut self, type_id: TypeId, callback: Callback) -> (ListenerId, Rc<Cell<bool>>) {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        let live = Rc::new(Cell::new(true));

        let entries = self.channels.entry(type_id).or_default();
        // Entries released while the registry was busy are left behind dead.
        entries.retain(|entry| entry.live.get());
        entries.push(Entry {
            id,
            callback,
            live: Rc::clone(&live),
        });
        (id, live)
    }

    /// Detaches the entry and hands it back so that the caller drops it
    /// outside of the registry borrow.
    fn remove(&mut self, id: ListenerId) -> Option<Entry> {
        for entries in self.channels.values_mut() {
            if let Some(index) = entries.iter().position(|entry| entry.id == id) {
                let entry = entries.remove(index);
                entry.live.set(false);
                return Some(entry);
            }
        }
        None
    }
}

/// A synchronous, type-indexed broadcast bus.
///
/// The bus is a cheap, clonable handle: every clone refers to the same
/// listener registry. It is deliberately single-threaded (`!Send`), since all
/// broadcasts happen on the thread that runs the frame loop.
///
/// # Delivery rules
///
/// * Listeners of a channel are invoked in registration order.
/// * The channel is snapshotted before delivery, so a listener subscribed
///   during a broadcast first hears the *next* broadcast.
/// * A listener unsubscribed during a broadcast is skipped immediately, even
///   if it comes later in the same snapshot.
/// * Broadcasts may nest. A listener that triggers a broadcast it also
///   listens to is re-entered synchronously, so every broadcast reaches
///   every listener exactly once.
/// * Subscribing the same closure or component twice yields two
///   registrations, and therefore two invocations per broadcast.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        log::debug!("EventBus initialized.");
        Self::default()
    }

    /// Registers `listener` on the channel of `E`.
    ///
    /// The listener stays registered for as long as the returned
    /// [`Subscription`] is alive.
    pub fn subscribe<E: Event>(&self, listener: impl Fn(&E) + 'static) -> Subscription {
        let callback: Callback = Rc::new(move |payload: &dyn Any| {
            if let Some(event) = payload.downcast_ref::<E>() {
                listener(event);
            }
        });
        self.register::<E>(callback)
    }

    /// Registers a shared component implementing [`Listener<E>`].
    ///
    /// The bus only keeps a weak reference: once the component is dropped,
    /// deliveries to it silently stop.
    pub fn subscribe_listener<E, L>(&self, listener: &Rc<L>) -> Subscription
    where
        E: Event,
        L: Listener<E> + 'static,
    {
        let target: Weak<L> = Rc::downgrade(listener);
        self.subscribe::<E>(move |event| {
            if let Some(component) = target.upgrade() {
                component.on_event(event);
            }
        })
    }

    /// Synchronously delivers `event` to every listener currently registered
    /// for `E`. Broadcasting on a channel without listeners does nothing.
    pub fn broadcast<E: Event>(&self, event: &E) {
        let snapshot: Vec<(Callback, Rc<Cell<bool>>)> = {
            let registry = self.registry.borrow();
            match registry.channels.get(&TypeId::of::<E>()) {
                Some(entries) if !entries.is_empty() => entries
                    .iter()
                    .map(|entry| (Rc::clone(&entry.callback), Rc::clone(&entry.live)))
                    .collect(),
                _ => {
                    log::trace!("No listener registered for {}.", type_name::<E>());
                    return;
                }
            }
        };

        log::trace!(
            "Broadcasting {} to {} listener(s).",
            type_name::<E>(),
            snapshot.len()
        );

        for (callback, live) in snapshot {
            if !live.get() {
                continue;
            }
            callback(event as &dyn Any);
        }
    }

    /// Removes the registration `id` from whichever channel holds it.
    ///
    /// Returns `false` when nothing was registered under `id`, which is not
    /// an error.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let removed = self.registry.borrow_mut().remove(id);
        let found = removed.is_some();
        drop(removed);
        if found {
            log::debug!("Listener {id:?} unsubscribed.");
        }
        found
    }

    /// Returns the number of live listeners registered for `E`.
    pub fn listener_count<E: Event>(&self) -> usize {
        self.registry
            .borrow()
            .channels
            .get(&TypeId::of::<E>())
            .map_or(0, |entries| entries.iter().filter(|e| e.live.get()).count())
    }

    fn register<E: Event>(&self, callback: Callback) -> Subscription {
        let (id, live) = self
            .registry
            .borrow_mut()
            .insert(TypeId::of::<E>(), callback);
        log::debug!("Listener {id:?} subscribed to {}.", type_name::<E>());
        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
            live,
            event_name: type_name::<E>(),
            detached: false,
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = self
            .registry
            .try_borrow()
            .map(|registry| registry.channels.len())
            .unwrap_or_default();
        f.debug_struct("EventBus")
            .field("channels", &channels)
            .finish()
    }
}

/// A disposable registration token returned by [`EventBus::subscribe`].
///
/// Dropping the token (or calling [`release`](Subscription::release))
/// unsubscribes the listener. Releasing is idempotent.
#[must_use = "dropping a Subscription unsubscribes its listener immediately"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: ListenerId,
    live: Rc<Cell<bool>>,
    event_name: &'static str,
    detached: bool,
}

impl Subscription {
    /// Returns the identifier of the registration.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Returns `true` while the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.live.get()
    }

    /// Unsubscribes the listener. Does nothing if it is already gone.
    pub fn release(&mut self) {
        if !self.live.replace(false) {
            return;
        }
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = match registry.try_borrow_mut() {
            Ok(mut guard) => guard.remove(self.id),
            // The dead entry is skipped by broadcasts and pruned on the next insert.
            Err(_) => None,
        };
        drop(removed);
        log::debug!("Listener {:?} released from {}.", self.id, self.event_name);
    }

    /// Consumes the token while keeping the listener registered for the
    /// lifetime of the bus. It can still be removed with
    /// [`EventBus::unsubscribe`].
    pub fn detach(mut self) -> ListenerId {
        self.detached = true;
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.detached {
            self.release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("event", &self.event_name)
            .field("active", &self.live.get())
            .finish()
    }
}

/// A group of subscriptions owned by one component.
///
/// Components listening to several event types keep their tokens here and
/// pop themselves from every channel at once.
#[derive(Debug, Default)]
pub struct Subscriptions {
    inner: Vec<Subscription>,
}

impl Subscriptions {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscription to the group.
    pub fn push(&mut self, subscription: Subscription) {
        self.inner.push(subscription);
    }

    /// Builder-style variant of [`push`](Subscriptions::push).
    pub fn with(mut self, subscription: Subscription) -> Self {
        self.push(subscription);
        self
    }

    /// Number of subscriptions held.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the group holds no subscription.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Releases every subscription of the group. Safe to call repeatedly.
    pub fn release_all(&mut self) {
        for subscription in &mut self.inner {
            subscription.release();
        }
        self.inner.clear();
    }
}
