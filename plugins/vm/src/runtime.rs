use std::fmt;
use std::sync::Arc;

use stratus_action::ActionError;
use stratus_cloud::{CloudApi, CloudConnector, ProviderParams};
use stratus_resilience::{Clock, TokioClock};

use crate::VmSettings;

/// Everything the VM actions share: how to reach the provider, how time
/// passes, and the plugin settings.
///
/// Cheap to clone; every action holds its own copy.
#[derive(Clone)]
pub struct VmRuntime {
    connector: Arc<dyn CloudConnector>,
    clock: Arc<dyn Clock>,
    settings: VmSettings,
}

impl VmRuntime {
    /// Runtime on the tokio clock with default settings.
    pub fn new(connector: Arc<dyn CloudConnector>) -> Self {
        Self {
            connector,
            clock: Arc::new(TokioClock),
            settings: VmSettings::default(),
        }
    }

    /// Replace the clock used by state waits.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: VmSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Current settings.
    pub fn settings(&self) -> &VmSettings {
        &self.settings
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Client for the region and credentials of one record.
    pub fn connect(&self, params: &ProviderParams) -> Result<Arc<dyn CloudApi>, ActionError> {
        self.connector.connect(params).map_err(|e| {
            tracing::error!(region = %params.region, error = %e, "cloud client creation failed");
            ActionError::from(e)
        })
    }
}

impl fmt::Debug for VmRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VmRuntime")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
