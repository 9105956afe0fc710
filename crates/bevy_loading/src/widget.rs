use std::time::Duration;

use bevy_ecs::{
    entity::Entity,
    hierarchy::{ChildOf, Children},
    prelude::*,
};
use bevy_rotate::Rotation;
use bevy_time::{Timer, TimerMode};

use crate::{
    config::{
        LoadingAttrs, LoadingConfigError, LoadingDefaults, LoadingOptions, LoadingOverrides,
        resolve_options,
    },
    events::{UiLoadingEntered, UiLoadingReset},
};

/// Declarative loading control on a container entity.
///
/// Insert it on any entity and the expansion system attaches the widget on
/// the next update; the carried overrides act as per-call configuration.
/// Entities that already have an attached widget are left untouched.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct UiLoading {
    pub overrides: LoadingOverrides,
}

impl UiLoading {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_overrides(overrides: LoadingOverrides) -> Self {
        Self { overrides }
    }
}

/// Plain text content of a UI entity.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct UiText {
    pub text: String,
}

impl UiText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Two-valued loading state stored on the container entity.
///
/// The component is the externally inspectable source of truth; transitions
/// only happen through [`enter_loading`] and [`exit_loading`].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingStatus {
    #[default]
    Normal,
    Loading,
}

/// Marks which text the text child currently displays.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingTextStatus {
    #[default]
    Prev,
    Loading,
}

/// Marks a container entity for the one-shot startup scan.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingContainer;

/// Role marker for the text child spawned under the container.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingText;

/// Role marker for the spinner child spawned under the container.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingSpinner;

/// Marks an entity as not currently displayed.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hidden;

/// Style class tokens attached to an entity.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleClass(pub Vec<String>);

impl StyleClass {
    /// Split a whitespace-separated token list into individual classes.
    #[must_use]
    pub fn from_tokens(tokens: &str) -> Self {
        Self(tokens.split_whitespace().map(String::from).collect())
    }
}

/// Repeating animation task driving the spinner while loading.
///
/// Present on the spinner child if and only if the widget is loading.
#[derive(Component, Debug, Clone)]
pub struct SpinTask {
    pub timer: Timer,
    /// Degrees added per completed tick.
    pub step: f32,
}

impl SpinTask {
    #[must_use]
    pub fn new(period: Duration, step: f32) -> Self {
        Self {
            timer: Timer::new(period, TimerMode::Repeating),
            step,
        }
    }

    #[must_use]
    pub fn from_options(options: &LoadingOptions) -> Self {
        Self::new(Duration::from_millis(options.interval), options.angle as f32)
    }
}

/// Internal widget state recorded at attach.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct LoadingState {
    /// Options resolved at attach; later changes to the defaults resource do
    /// not apply retroactively.
    pub options: LoadingOptions,
    /// Container text captured exactly once, at attach.
    pub previous_text: String,
    pub text_child: Entity,
    pub spinner_child: Entity,
}

/// Find the first child of `parent` tagged with marker `P`.
#[must_use]
pub fn find_part<P: Component>(world: &World, parent: Entity) -> Option<Entity> {
    let children = world.get::<Children>(parent)?;
    children
        .iter()
        .find(|child| world.get::<P>(*child).is_some())
}

/// Text currently displayed for `entity`.
///
/// Before attach this is the entity's own text; afterwards the text child
/// carries whatever is visible.
#[must_use]
pub fn visible_text(world: &World, entity: Entity) -> Option<String> {
    match world.get::<LoadingState>(entity) {
        Some(state) => world
            .get::<UiText>(state.text_child)
            .map(|text| text.text.clone()),
        None => world.get::<UiText>(entity).map(|text| text.text.clone()),
    }
}

/// Attach a loading widget to `entity`.
///
/// Configuration is resolved by overlaying inline [`LoadingAttrs`] and the
/// per-call overrides onto the global defaults (inline > call > defaults)
/// and validated before any world mutation. Returns `Ok(false)` when a
/// widget is already attached.
pub fn attach(
    world: &mut World,
    entity: Entity,
    call: &LoadingOverrides,
) -> Result<bool, LoadingConfigError> {
    if world.get_entity(entity).is_err() || world.get::<LoadingState>(entity).is_some() {
        return Ok(false);
    }

    let defaults = world
        .get_resource::<LoadingDefaults>()
        .cloned()
        .unwrap_or_default();
    let inline = match world.get::<LoadingAttrs>(entity) {
        Some(attrs) => attrs.validate()?,
        None => LoadingOverrides::default(),
    };
    let options = resolve_options(&defaults.options, call, &inline);
    options.validate()?;

    let previous_text = match world.get_mut::<UiText>(entity) {
        Some(mut text) => std::mem::take(&mut text.text),
        None => String::new(),
    };

    let text_child = world
        .spawn((
            UiText::new(previous_text.clone()),
            LoadingText,
            LoadingTextStatus::Prev,
            ChildOf(entity),
        ))
        .id();
    let spinner_child = world
        .spawn((
            LoadingSpinner,
            StyleClass::from_tokens(&options.icon),
            Rotation::default(),
            Hidden,
            ChildOf(entity),
        ))
        .id();

    world.entity_mut(entity).insert((
        LoadingStatus::Normal,
        LoadingState {
            options,
            previous_text,
            text_child,
            spinner_child,
        },
    ));

    tracing::debug!(entity = ?entity, "attached loading widget");
    Ok(true)
}

/// Transition `entity` from normal to loading.
///
/// Guarded: returns `false` without side effects when no widget is attached
/// or the widget is already loading.
pub fn enter_loading(world: &mut World, entity: Entity) -> bool {
    if world.get::<LoadingStatus>(entity) != Some(&LoadingStatus::Normal) {
        return false;
    }
    let Some(state) = world.get::<LoadingState>(entity) else {
        return false;
    };
    let tips = state.options.tips.clone();
    let spin = SpinTask::from_options(&state.options);
    let text_child = state.text_child;
    let spinner_child = state.spinner_child;

    if let Some(mut text) = world.get_mut::<UiText>(text_child) {
        text.text = tips;
    }
    if let Some(mut marker) = world.get_mut::<LoadingTextStatus>(text_child) {
        *marker = LoadingTextStatus::Loading;
    }
    if world.get_entity(spinner_child).is_ok() {
        world.entity_mut(spinner_child).insert(spin).remove::<Hidden>();
    }
    world.entity_mut(entity).insert(LoadingStatus::Loading);
    world.write_message(UiLoadingEntered { entity });

    tracing::debug!(entity = ?entity, "loading widget entered loading state");
    true
}

/// Transition `entity` from loading back to normal.
///
/// Guarded: returns `false` without side effects when no widget is attached
/// or the widget is not loading. Restores the text captured at attach and
/// resets the spinner rotation to zero.
pub fn exit_loading(world: &mut World, entity: Entity) -> bool {
    if world.get::<LoadingStatus>(entity) != Some(&LoadingStatus::Loading) {
        return false;
    }
    let Some(state) = world.get::<LoadingState>(entity) else {
        return false;
    };
    let previous_text = state.previous_text.clone();
    let text_child = state.text_child;
    let spinner_child = state.spinner_child;

    if let Some(mut text) = world.get_mut::<UiText>(text_child) {
        text.text = previous_text;
    }
    if let Some(mut marker) = world.get_mut::<LoadingTextStatus>(text_child) {
        *marker = LoadingTextStatus::Prev;
    }
    if world.get_entity(spinner_child).is_ok() {
        world.entity_mut(spinner_child).remove::<SpinTask>().insert(Hidden);
    }
    if let Some(mut rotation) = world.get_mut::<Rotation>(spinner_child) {
        rotation.rotate_to(0.0);
    }
    world.entity_mut(entity).insert(LoadingStatus::Normal);
    world.write_message(UiLoadingReset { entity });

    tracing::debug!(entity = ?entity, "loading widget reset to normal state");
    true
}

/// Tear the widget down and restore the container's pre-attach shape.
///
/// Despawns both structural children (which releases the animation timer
/// with the spinner), puts the captured text back on the container, and
/// removes all widget components. Returns `false` when no widget is
/// attached. Despawning the container entity performs the same cleanup
/// implicitly through ECS ownership.
pub fn detach(world: &mut World, entity: Entity) -> bool {
    let Some(state) = world.get::<LoadingState>(entity).cloned() else {
        return false;
    };

    for child in [state.text_child, state.spinner_child] {
        if world.get_entity(child).is_ok() {
            world.despawn(child);
        }
    }

    if let Some(mut text) = world.get_mut::<UiText>(entity) {
        text.text = state.previous_text;
    }
    world
        .entity_mut(entity)
        .remove::<(UiLoading, LoadingStatus, LoadingState)>();

    tracing::debug!(entity = ?entity, "detached loading widget");
    true
}
