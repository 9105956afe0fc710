use std::time::Duration;

use bevy_app::App;
use bevy_ecs::{hierarchy::Children, message::Messages, prelude::*, system::RunSystemOnce};
use bevy_rotate::Rotation;
use bevy_time::Time;

use crate::{
    AppLoadingExt, Hidden, LoadingAttrs, LoadingConfigError, LoadingContainer, LoadingOptions,
    LoadingOverrides, LoadingPlugin, LoadingRequest, LoadingSpinner, LoadingState, LoadingStatus,
    LoadingText, LoadingTextStatus, SpinTask, StyleClass, TriggerEvent, UiInteraction, UiLoading,
    UiLoadingEntered, UiLoadingReset, UiText, WidgetEventQueue, animate_spinners, attach, detach,
    enter_loading, exit_loading, find_part, visible_text,
};

fn widget_app() -> App {
    let mut app = App::new();
    app.add_plugins(LoadingPlugin::default());
    app
}

// Bare world for driving the operations directly, with the notification
// message stores the transitions write into.
fn bare_world() -> World {
    let mut world = World::new();
    world.init_resource::<Messages<UiLoadingEntered>>();
    world.init_resource::<Messages<UiLoadingReset>>();
    world
}

fn drain_entered(app: &mut App) -> Vec<UiLoadingEntered> {
    app.world_mut()
        .resource_mut::<Messages<UiLoadingEntered>>()
        .drain()
        .collect()
}

fn drain_reset(app: &mut App) -> Vec<UiLoadingReset> {
    app.world_mut()
        .resource_mut::<Messages<UiLoadingReset>>()
        .drain()
        .collect()
}

fn child_count(world: &World, entity: Entity) -> usize {
    world
        .get::<Children>(entity)
        .map(|children| children.len())
        .unwrap_or(0)
}

#[test]
fn plugin_wires_queue_time_and_messages() {
    let app = widget_app();

    assert!(app.world().contains_resource::<WidgetEventQueue>());
    assert!(app.world().contains_resource::<Time>());
    assert!(app.world().contains_resource::<Messages<UiLoadingEntered>>());
    assert!(app.world().contains_resource::<Messages<UiLoadingReset>>());
}

#[test]
#[should_panic(expected = "invalid loading defaults")]
fn plugin_rejects_zero_interval_defaults() {
    let mut app = App::new();
    app.add_plugins(LoadingPlugin::with_defaults(
        LoadingOptions::default().with_interval(0),
    ));
}

#[test]
fn attach_expands_container_into_text_and_spinner_children() {
    let mut app = widget_app();
    let container = app
        .world_mut()
        .spawn((UiText::new("Submit"), UiLoading::new()))
        .id();

    app.update();

    let world = app.world();
    assert_eq!(world.get::<UiText>(container).unwrap().text, "");
    assert_eq!(child_count(world, container), 2);
    assert_eq!(
        world.get::<LoadingStatus>(container),
        Some(&LoadingStatus::Normal)
    );

    let state = world.get::<LoadingState>(container).unwrap();
    assert_eq!(state.previous_text, "Submit");

    let text_child = find_part::<LoadingText>(world, container).unwrap();
    assert_eq!(world.get::<UiText>(text_child).unwrap().text, "Submit");
    assert_eq!(
        world.get::<LoadingTextStatus>(text_child),
        Some(&LoadingTextStatus::Prev)
    );

    let spinner = find_part::<LoadingSpinner>(world, container).unwrap();
    assert!(world.get::<Hidden>(spinner).is_some());
    assert!(world.get::<SpinTask>(spinner).is_none());
    assert_eq!(world.get::<Rotation>(spinner).unwrap().degrees, 0.0);
    assert_eq!(
        world.get::<StyleClass>(spinner).unwrap().0,
        vec!["fa".to_string(), "fa-refresh".to_string()]
    );
    assert_eq!(visible_text(world, container).as_deref(), Some("Submit"));
}

#[test]
fn attach_is_idempotent_for_already_attached_entities() {
    let mut app = widget_app();
    let container = app
        .world_mut()
        .spawn((UiText::new("Submit"), UiLoading::new()))
        .id();

    app.update();

    // Re-inserting the control must not reset captured state or duplicate
    // the structural children.
    app.world_mut().entity_mut(container).insert(UiLoading::new());
    app.update();

    let world = app.world();
    assert_eq!(child_count(world, container), 2);
    let state = world.get::<LoadingState>(container).unwrap();
    assert_eq!(state.previous_text, "Submit");

    let attached = attach(
        app.world_mut(),
        container,
        &LoadingOverrides::default(),
    )
    .unwrap();
    assert!(!attached);
}

#[test]
fn enter_loading_applies_full_effect_sequence() {
    let mut app = widget_app();
    let container = app
        .world_mut()
        .spawn((UiText::new("Submit"), UiLoading::new()))
        .id();

    app.update();
    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(container, LoadingRequest::Loading);
    app.update();

    let world = app.world();
    assert_eq!(
        world.get::<LoadingStatus>(container),
        Some(&LoadingStatus::Loading)
    );
    assert_eq!(
        visible_text(world, container).as_deref(),
        Some("loading...")
    );

    let text_child = find_part::<LoadingText>(world, container).unwrap();
    assert_eq!(
        world.get::<LoadingTextStatus>(text_child),
        Some(&LoadingTextStatus::Loading)
    );

    let spinner = find_part::<LoadingSpinner>(world, container).unwrap();
    assert!(world.get::<Hidden>(spinner).is_none());
    assert!(world.get::<SpinTask>(spinner).is_some());

    let entered = drain_entered(&mut app);
    assert_eq!(entered, vec![UiLoadingEntered { entity: container }]);
}

#[test]
fn enter_loading_while_loading_is_a_guarded_noop() {
    let mut app = widget_app();
    let container = app
        .world_mut()
        .spawn((UiText::new("Submit"), UiLoading::new()))
        .id();

    app.update();
    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(container, LoadingRequest::Loading);
    app.update();
    assert_eq!(drain_entered(&mut app).len(), 1);

    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(container, LoadingRequest::Loading);
    app.update();

    assert_eq!(
        app.world().get::<LoadingStatus>(container),
        Some(&LoadingStatus::Loading)
    );
    assert!(drain_entered(&mut app).is_empty());

    assert!(!enter_loading(app.world_mut(), container));
}

#[test]
fn exit_loading_restores_text_task_and_rotation() {
    let mut world = bare_world();
    let container = world.spawn(UiText::new("Submit")).id();
    attach(&mut world, container, &LoadingOverrides::default()).unwrap();
    assert!(enter_loading(&mut world, container));

    let spinner = find_part::<LoadingSpinner>(&world, container).unwrap();
    world.get_mut::<Rotation>(spinner).unwrap().rotate_to(135.0);

    assert!(exit_loading(&mut world, container));

    assert_eq!(
        world.get::<LoadingStatus>(container),
        Some(&LoadingStatus::Normal)
    );
    assert_eq!(visible_text(&world, container).as_deref(), Some("Submit"));

    let text_child = find_part::<LoadingText>(&world, container).unwrap();
    assert_eq!(
        world.get::<LoadingTextStatus>(text_child),
        Some(&LoadingTextStatus::Prev)
    );

    assert!(world.get::<SpinTask>(spinner).is_none());
    assert!(world.get::<Hidden>(spinner).is_some());
    assert_eq!(world.get::<Rotation>(spinner).unwrap().degrees, 0.0);

    // Direct calls notify just like the queued path does.
    let entered: Vec<UiLoadingEntered> = world
        .resource_mut::<Messages<UiLoadingEntered>>()
        .drain()
        .collect();
    let reset: Vec<UiLoadingReset> = world
        .resource_mut::<Messages<UiLoadingReset>>()
        .drain()
        .collect();
    assert_eq!(entered, vec![UiLoadingEntered { entity: container }]);
    assert_eq!(reset, vec![UiLoadingReset { entity: container }]);

    assert!(!exit_loading(&mut world, container));
}

#[test]
fn round_trip_returns_to_post_attach_shape() {
    let mut world = bare_world();
    let container = world.spawn(UiText::new("Submit")).id();
    attach(&mut world, container, &LoadingOverrides::default()).unwrap();

    let children_after_attach = child_count(&world, container);
    let text_after_attach = visible_text(&world, container);

    assert!(enter_loading(&mut world, container));
    assert!(exit_loading(&mut world, container));

    assert_eq!(child_count(&world, container), children_after_attach);
    assert_eq!(visible_text(&world, container), text_after_attach);
    assert_eq!(
        world.get::<LoadingStatus>(container),
        Some(&LoadingStatus::Normal)
    );
}

#[test]
fn spinner_rotation_accumulates_step_per_timer_completion() {
    let mut world = bare_world();
    let container = world.spawn(UiText::new("Go")).id();
    attach(&mut world, container, &LoadingOverrides::default()).unwrap();
    assert!(enter_loading(&mut world, container));
    let spinner = find_part::<LoadingSpinner>(&world, container).unwrap();

    world.init_resource::<Time>();
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_millis(150));
    world.run_system_once(animate_spinners).unwrap();
    assert_eq!(world.get::<Rotation>(spinner).unwrap().degrees, 45.0);

    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_millis(100));
    world.run_system_once(animate_spinners).unwrap();
    assert_eq!(world.get::<Rotation>(spinner).unwrap().degrees, 75.0);
}

#[test]
fn click_interactions_trigger_loading_once_while_state_permits() {
    let mut app = widget_app();
    let container = app
        .world_mut()
        .spawn((
            UiText::new("Submit"),
            UiLoading::with_overrides(LoadingOverrides {
                trigger: Some(TriggerEvent::Click),
                ..LoadingOverrides::default()
            }),
        ))
        .id();

    app.update();

    // Non-matching interactions do not trigger.
    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(container, UiInteraction::Hover);
    app.update();
    assert_eq!(
        app.world().get::<LoadingStatus>(container),
        Some(&LoadingStatus::Normal)
    );

    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(container, UiInteraction::Click);
    app.update();
    assert_eq!(
        app.world().get::<LoadingStatus>(container),
        Some(&LoadingStatus::Loading)
    );
    assert_eq!(drain_entered(&mut app).len(), 1);

    // Clicks while loading are no-ops.
    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(container, UiInteraction::Click);
    app.update();
    assert!(drain_entered(&mut app).is_empty());

    // After a reset the trigger arms again.
    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(container, LoadingRequest::Reset);
    app.update();
    assert_eq!(drain_reset(&mut app).len(), 1);

    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(container, UiInteraction::Click);
    app.update();
    assert_eq!(drain_entered(&mut app).len(), 1);
}

#[test]
fn dispatch_ignores_unattached_and_despawned_entities() {
    let mut app = widget_app();
    let plain = app.world_mut().spawn(UiText::new("plain")).id();
    let despawned = app.world_mut().spawn_empty().id();
    app.world_mut().despawn(despawned);

    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(plain, LoadingRequest::Loading);
    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(despawned, LoadingRequest::Loading);
    app.update();

    assert!(app.world().get::<LoadingStatus>(plain).is_none());
    assert!(drain_entered(&mut app).is_empty());
}

#[test]
fn invalid_raw_attrs_skip_attach_on_the_system_path() {
    let mut app = widget_app();
    let container = app
        .world_mut()
        .spawn((
            UiText::new("Submit"),
            LoadingAttrs {
                angle: Some("fast".to_string()),
                ..LoadingAttrs::default()
            },
            UiLoading::new(),
        ))
        .id();

    app.update();

    let world = app.world();
    assert!(world.get::<LoadingState>(container).is_none());
    assert_eq!(child_count(world, container), 0);
    assert_eq!(world.get::<UiText>(container).unwrap().text, "Submit");
}

#[test]
fn invalid_raw_attrs_error_on_the_direct_path() {
    let mut world = World::new();
    let container = world
        .spawn((
            UiText::new("Submit"),
            LoadingAttrs {
                interval: Some("soon".to_string()),
                ..LoadingAttrs::default()
            },
        ))
        .id();

    let result = attach(&mut world, container, &LoadingOverrides::default());
    assert_eq!(
        result,
        Err(LoadingConfigError::InvalidInteger {
            field: "interval",
            value: "soon".to_string(),
        })
    );
    assert!(world.get::<LoadingState>(container).is_none());
}

#[test]
fn inline_attrs_override_call_overrides_and_defaults() {
    let mut app = App::new();
    app.add_plugins(LoadingPlugin::with_defaults(
        LoadingOptions::default().with_tips("global"),
    ));

    let container = app
        .world_mut()
        .spawn((
            UiText::new("Submit"),
            LoadingAttrs {
                tips: Some("inline".to_string()),
                ..LoadingAttrs::default()
            },
            UiLoading::with_overrides(LoadingOverrides {
                tips: Some("call".to_string()),
                angle: Some(99),
                ..LoadingOverrides::default()
            }),
        ))
        .id();

    app.update();

    let options = &app
        .world()
        .get::<LoadingState>(container)
        .unwrap()
        .options;
    assert_eq!(options.tips, "inline");
    assert_eq!(options.angle, 99);
    assert_eq!(options.interval, 50);
}

#[test]
fn detach_restores_pre_attach_shape_mid_loading() {
    let mut world = bare_world();
    let container = world.spawn(UiText::new("Submit")).id();
    attach(&mut world, container, &LoadingOverrides::default()).unwrap();
    assert!(enter_loading(&mut world, container));

    assert!(detach(&mut world, container));

    assert_eq!(child_count(&world, container), 0);
    assert_eq!(world.get::<UiText>(container).unwrap().text, "Submit");
    assert!(world.get::<LoadingState>(container).is_none());
    assert!(world.get::<LoadingStatus>(container).is_none());

    assert!(!detach(&mut world, container));
}

#[test]
fn startup_scan_attaches_only_containers_present_at_startup() {
    let mut app = widget_app();
    let early = app
        .world_mut()
        .spawn((LoadingContainer, UiText::new("Go")))
        .id();

    app.update();
    assert!(app.world().get::<LoadingState>(early).is_some());
    assert_eq!(child_count(app.world(), early), 2);

    let late = app
        .world_mut()
        .spawn((LoadingContainer, UiText::new("Late")))
        .id();
    app.update();

    assert!(app.world().get::<LoadingState>(late).is_none());
    assert_eq!(child_count(app.world(), early), 2);
}

#[test]
fn configure_loading_merges_defaults_for_future_attachments() {
    let mut app = widget_app();
    let first = app
        .world_mut()
        .spawn((UiText::new("First"), UiLoading::new()))
        .id();
    app.update();

    app.configure_loading(LoadingOverrides {
        tips: Some("please wait".to_string()),
        ..LoadingOverrides::default()
    });

    let second = app
        .world_mut()
        .spawn((UiText::new("Second"), UiLoading::new()))
        .id();
    app.update();

    let world = app.world();
    let first_options = &world.get::<LoadingState>(first).unwrap().options;
    let second_options = &world.get::<LoadingState>(second).unwrap().options;
    assert_eq!(first_options.tips, "loading...");
    assert_eq!(second_options.tips, "please wait");
}
