use bevy_app::{App, Plugin, PostStartup, PreUpdate, Update};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_time::TimePlugin;

use crate::{
    config::{LoadingDefaults, LoadingOptions},
    events::{UiLoadingEntered, UiLoadingReset, WidgetEventQueue},
    systems::{
        animate_spinners, attach_added_loading, dispatch_widget_events, scan_loading_containers,
    },
};

/// Bevy plugin wiring the loading widget resources and systems.
///
/// Global defaults are fixed at construction; use
/// [`AppLoadingExt::configure_loading`](crate::AppLoadingExt::configure_loading)
/// to adjust them later.
#[derive(Default)]
pub struct LoadingPlugin {
    defaults: LoadingOptions,
}

impl LoadingPlugin {
    /// Construct the plugin with explicit global defaults.
    #[must_use]
    pub fn with_defaults(defaults: LoadingOptions) -> Self {
        Self { defaults }
    }
}

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        if let Err(error) = self.defaults.validate() {
            panic!("invalid loading defaults: {error}");
        }

        if !app.is_plugin_added::<TimePlugin>() {
            app.add_plugins(TimePlugin);
        }

        app.insert_resource(LoadingDefaults::new(self.defaults.clone()))
            .init_resource::<WidgetEventQueue>()
            .add_message::<UiLoadingEntered>()
            .add_message::<UiLoadingReset>()
            .add_systems(PostStartup, scan_loading_containers)
            .add_systems(
                PreUpdate,
                (attach_added_loading, dispatch_widget_events).chain(),
            )
            .add_systems(Update, animate_spinners);
    }
}
