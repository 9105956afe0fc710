use std::{any::Any, fmt, sync::Arc};

use bevy_ecs::{entity::Entity, message::Message, prelude::Resource};
use crossbeam_queue::SegQueue;

/// Symbolic state-change request for an attached loading widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingRequest {
    /// Enter the loading state.
    Loading,
    /// Return to the normal state.
    Reset,
}

/// Pointer/focus interaction reported by an integration layer.
///
/// Interactions are matched against each widget's configured
/// [`TriggerEvent`](crate::config::TriggerEvent) to auto-trigger loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiInteraction {
    Click,
    DoubleClick,
    Hover,
}

/// Notification that a widget entered the loading state.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLoadingEntered {
    pub entity: Entity,
}

/// Notification that a widget returned to the normal state.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLoadingReset {
    pub entity: Entity,
}

/// Type-erased inbound event addressed to a widget entity.
pub struct WidgetEvent {
    pub entity: Entity,
    pub action: Box<dyn Any + Send + Sync>,
}

impl fmt::Debug for WidgetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetEvent")
            .field("entity", &self.entity)
            .field("action", &"<type-erased>")
            .finish()
    }
}

impl WidgetEvent {
    #[must_use]
    pub fn new(entity: Entity, action: Box<dyn Any + Send + Sync>) -> Self {
        Self { entity, action }
    }

    #[must_use]
    pub fn typed<T: Any + Send + Sync>(entity: Entity, action: T) -> Self {
        Self {
            entity,
            action: Box::new(action),
        }
    }

    #[must_use]
    pub fn into_action<T: Any + Send + Sync>(self) -> Option<TypedWidgetEvent<T>> {
        match self.action.downcast::<T>() {
            Ok(action) => Some(TypedWidgetEvent {
                entity: self.entity,
                action: *action,
            }),
            Err(_) => None,
        }
    }
}

/// Typed event produced from a type-erased [`WidgetEvent`] queue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedWidgetEvent<T> {
    pub entity: Entity,
    pub action: T,
}

/// Lock-free queue carrying inbound widget traffic into the schedule.
///
/// Integration layers outside the ECS may clone [`WidgetEventQueue::shared_queue`]
/// and push from any thread; all consumption happens inside the schedule.
#[derive(Resource, Clone, Debug)]
pub struct WidgetEventQueue {
    queue: Arc<SegQueue<WidgetEvent>>,
}

impl Default for WidgetEventQueue {
    fn default() -> Self {
        Self {
            queue: Arc::new(SegQueue::new()),
        }
    }
}

impl WidgetEventQueue {
    #[must_use]
    pub fn shared_queue(&self) -> Arc<SegQueue<WidgetEvent>> {
        self.queue.clone()
    }

    pub fn push(&self, event: WidgetEvent) {
        self.queue.push(event);
    }

    pub fn push_typed<T: Any + Send + Sync>(&self, entity: Entity, action: T) {
        self.push(WidgetEvent::typed(entity, action));
    }

    #[must_use]
    pub fn drain_all(&self) -> Vec<WidgetEvent> {
        let mut drained = Vec::new();
        while let Some(event) = self.queue.pop() {
            drained.push(event);
        }
        drained
    }

    /// Drain queue entries and keep only typed actions.
    ///
    /// Note: entries with other action types are discarded.
    #[must_use]
    pub fn drain_actions<T: Any + Send + Sync>(&self) -> Vec<TypedWidgetEvent<T>> {
        let mut drained = Vec::new();
        while let Some(event) = self.queue.pop() {
            if let Some(event) = event.into_action::<T>() {
                drained.push(event);
            }
        }
        drained
    }
}
