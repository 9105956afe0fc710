use bevy_ecs::prelude::*;
use bevy_rotate::Rotation;
use bevy_time::Time;

use crate::{
    config::LoadingOverrides,
    events::{LoadingRequest, UiInteraction, WidgetEventQueue},
    widget::{self, LoadingContainer, LoadingState, SpinTask, UiLoading},
};

/// One-shot startup scan attaching a widget to every pre-marked container.
///
/// The plugin registers this in `PostStartup` so containers spawned by app
/// `Startup` systems are already in the world. Entities gaining
/// [`LoadingContainer`] after startup are not auto-attached; inserting
/// [`UiLoading`] still attaches at any time.
pub fn scan_loading_containers(world: &mut World) {
    let entities = {
        let mut query =
            world.query_filtered::<Entity, (With<LoadingContainer>, Without<LoadingState>)>();
        query.iter(world).collect::<Vec<_>>()
    };

    for entity in entities {
        if world.get_entity(entity).is_err() {
            continue;
        }
        if let Err(error) = widget::attach(world, entity, &LoadingOverrides::default()) {
            tracing::error!(entity = ?entity, %error, "skipping loading attach: invalid configuration");
        }
    }
}

/// Expand freshly inserted [`UiLoading`] controls into attached widgets.
///
/// The component's overrides act as per-call configuration; validation
/// failures are logged and the attach is skipped.
pub fn attach_added_loading(world: &mut World) {
    let entities = {
        let mut query = world.query_filtered::<Entity, Added<UiLoading>>();
        query.iter(world).collect::<Vec<_>>()
    };

    for entity in entities {
        if world.get_entity(entity).is_err() {
            continue;
        }
        let call = world
            .get::<UiLoading>(entity)
            .map(|loading| loading.overrides.clone())
            .unwrap_or_default();
        if let Err(error) = widget::attach(world, entity, &call) {
            tracing::error!(entity = ?entity, %error, "skipping loading attach: invalid configuration");
        }
    }
}

/// Consume [`WidgetEventQueue`] entries and apply the corresponding
/// transitions.
///
/// [`LoadingRequest`] entries invoke the requested transition directly;
/// [`UiInteraction`] entries invoke `enter_loading` when they match the
/// widget's configured trigger. Entries addressed to entities that were
/// never attached or no longer exist are ignored, and entries with
/// unrecognized action types are discarded.
pub fn dispatch_widget_events(world: &mut World) {
    let events = world.resource::<WidgetEventQueue>().drain_all();

    for event in events {
        let entity = event.entity;
        if world.get_entity(entity).is_err() {
            continue;
        }

        if let Some(request) = event.action.downcast_ref::<LoadingRequest>() {
            match *request {
                LoadingRequest::Loading => {
                    widget::enter_loading(world, entity);
                }
                LoadingRequest::Reset => {
                    widget::exit_loading(world, entity);
                }
            }
        } else if let Some(interaction) = event.action.downcast_ref::<UiInteraction>() {
            let triggered = world
                .get::<LoadingState>(entity)
                .is_some_and(|state| state.options.trigger.matches(*interaction));
            if triggered {
                widget::enter_loading(world, entity);
            }
        }
    }
}

/// Advance spinner animation timers and apply the accumulated rotation.
///
/// Each completed timer period adds the widget's configured step; multiple
/// completions within one frame apply multiple increments.
pub fn animate_spinners(mut spinners: Query<(&mut SpinTask, &mut Rotation)>, time: Res<Time>) {
    let delta = time.delta();

    for (mut task, mut rotation) in &mut spinners {
        task.timer.tick(delta);
        let completions = task.timer.times_finished_this_tick();
        if completions > 0 {
            rotation.rotate_by(task.step * completions as f32);
        }
    }
}
