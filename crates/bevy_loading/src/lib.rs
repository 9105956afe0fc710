//! Loading-state widgets for Bevy ECS UI trees.
//!
//! `bevy_loading` lets you:
//! - attach a loading widget to any container entity by inserting [`UiLoading`],
//! - drive the loading/normal state machine through queued [`LoadingRequest`]
//!   entries or configured interaction triggers,
//! - observe transitions as Bevy messages ([`UiLoadingEntered`] and
//!   [`UiLoadingReset`]).
//!
//! # Minimal setup
//!
//! ```no_run
//! use bevy_loading::{
//!     LoadingPlugin, LoadingRequest, UiLoading, UiText, WidgetEventQueue,
//!     bevy_app::{App, Startup},
//!     bevy_ecs::prelude::*,
//! };
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn((UiText::new("Submit"), UiLoading::new()));
//! }
//!
//! let mut app = App::new();
//! app.add_plugins(LoadingPlugin::default())
//!     .add_systems(Startup, setup);
//! app.update();
//!
//! // Any holder of the queue may request transitions for a widget entity.
//! fn begin_loading(world: &World, widget: Entity) {
//!     world
//!         .resource::<WidgetEventQueue>()
//!         .push_typed(widget, LoadingRequest::Loading);
//! }
//! ```
#![forbid(unsafe_code)]

pub mod app_ext;
pub mod config;
pub mod events;
pub mod logging;
pub mod plugin;
pub mod systems;
pub mod widget;

pub use bevy_app;
pub use bevy_ecs;
pub use bevy_rotate;
pub use bevy_time;

pub use app_ext::*;
pub use config::*;
pub use events::*;
pub use logging::*;
pub use plugin::*;
pub use systems::*;
pub use widget::*;

pub mod prelude {
    //! Convenience exports for building `bevy_loading` apps.

    pub use bevy_ecs::hierarchy::{ChildOf, Children};
    pub use bevy_rotate::Rotation;

    pub use crate::{
        AppLoadingExt, Hidden, LoadingAttrs, LoadingConfigError, LoadingContainer,
        LoadingDefaults, LoadingOptions, LoadingOverrides, LoadingPlugin, LoadingRequest,
        LoadingSpinner, LoadingState, LoadingStatus, LoadingText, LoadingTextStatus, SpinTask,
        StyleClass, TriggerEvent, TypedWidgetEvent, UiInteraction, UiLoading, UiLoadingEntered,
        UiLoadingReset, UiText, WidgetEvent, WidgetEventQueue, animate_spinners, attach,
        attach_added_loading, detach, dispatch_widget_events, enter_loading, exit_loading,
        find_part, init_logging, resolve_options, scan_loading_containers, visible_text,
    };

    pub use crate::{bevy_app, bevy_ecs, bevy_rotate, bevy_time};
}

#[cfg(test)]
mod tests;
