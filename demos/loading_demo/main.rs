use std::{thread, time::Duration};

use bevy_ecs::{message::MessageReader, prelude::*};
use bevy_loading::{
    LoadingAttrs, LoadingContainer, LoadingOptions, LoadingPlugin, LoadingRequest, LoadingSpinner,
    UiInteraction, UiLoading, UiLoadingEntered, UiLoadingReset, UiText, WidgetEventQueue,
    bevy_app::{App, Startup, Update},
    bevy_rotate::Rotation,
    find_part, init_logging, visible_text,
};

/// Headless walkthrough of the loading widget.
///
/// Two containers demonstrate both attach paths: `submit` is attached by
/// inserting [`UiLoading`] explicitly, `search` is picked up by the startup
/// scan and configured through raw string attributes.
#[derive(Resource, Debug, Clone, Copy)]
struct DemoTargets {
    submit: Entity,
    search: Entity,
}

fn setup(mut commands: Commands) {
    let submit = commands
        .spawn((UiText::new("Submit"), UiLoading::new()))
        .id();

    let search_attrs =
        LoadingAttrs::from_ron(r#"(tips: Some("syncing..."), angle: Some("30"), trigger: Some("click"))"#)
            .expect("demo attrs should parse");
    let search = commands
        .spawn((UiText::new("Search"), LoadingContainer, search_attrs))
        .id();

    commands.insert_resource(DemoTargets { submit, search });
}

fn report_transitions(
    mut entered: MessageReader<UiLoadingEntered>,
    mut reset: MessageReader<UiLoadingReset>,
) {
    for message in entered.read() {
        tracing::info!(entity = ?message.entity, "widget entered loading");
    }
    for message in reset.read() {
        tracing::info!(entity = ?message.entity, "widget reset to normal");
    }
}

fn log_spinner_angle(app: &App, label: &str, container: Entity) {
    let world = app.world();
    if let Some(spinner) = find_part::<LoadingSpinner>(world, container)
        && let Some(rotation) = world.get::<Rotation>(spinner)
    {
        tracing::info!(widget = label, degrees = rotation.degrees, "spinner angle");
    }
}

fn main() {
    init_logging();

    let mut app = App::new();
    app.add_plugins(LoadingPlugin::with_defaults(
        LoadingOptions::default().with_tips("working..."),
    ))
    .add_systems(Startup, setup)
    .add_systems(Update, report_transitions);

    // First frame attaches both widgets.
    app.update();
    let targets = *app.world().resource::<DemoTargets>();

    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(targets.submit, LoadingRequest::Loading);
    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(targets.search, UiInteraction::Click);

    for _ in 0..10 {
        app.update();
        thread::sleep(Duration::from_millis(30));
    }

    log_spinner_angle(&app, "submit", targets.submit);
    log_spinner_angle(&app, "search", targets.search);
    tracing::info!(
        submit = ?visible_text(app.world(), targets.submit),
        search = ?visible_text(app.world(), targets.search),
        "visible text while loading"
    );

    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(targets.submit, LoadingRequest::Reset);
    app.world()
        .resource::<WidgetEventQueue>()
        .push_typed(targets.search, LoadingRequest::Reset);
    app.update();

    tracing::info!(
        submit = ?visible_text(app.world(), targets.submit),
        search = ?visible_text(app.world(), targets.search),
        "visible text after reset"
    );
}
