use bevy_app::App;

use crate::config::{LoadingDefaults, LoadingOverrides};

/// Extension methods for adjusting loading behavior on a Bevy [`App`].
///
/// # Example
///
/// ```no_run
/// use bevy_loading::{AppLoadingExt, LoadingOverrides, LoadingPlugin, bevy_app::App};
///
/// let mut app = App::new();
/// app.add_plugins(LoadingPlugin::default())
///     .configure_loading(LoadingOverrides {
///         tips: Some("please wait".to_string()),
///         ..LoadingOverrides::default()
///     });
/// ```
pub trait AppLoadingExt {
    /// Merge override values into the global loading defaults.
    ///
    /// Only future attachments observe the new defaults; widgets already
    /// attached keep the options they resolved at attach.
    fn configure_loading(&mut self, overrides: LoadingOverrides) -> &mut Self;
}

impl AppLoadingExt for App {
    fn configure_loading(&mut self, overrides: LoadingOverrides) -> &mut Self {
        self.init_resource::<LoadingDefaults>();
        self.world_mut()
            .resource_mut::<LoadingDefaults>()
            .merge(&overrides);
        self
    }
}
