//! Console reporter adapter.
//!
//! Stands in for the cloud notification layer: alerts and parameter
//! updates are written to the log as single lines a host-side bridge can
//! pick up (`PARAM | Intruder_Status="Alerted"`).

use core::sync::atomic::{AtomicU32, Ordering};

use log::info;

use crate::app::ports::{Param, ParamValue, ReporterPort};
use crate::error::ReportError;

/// [`ReporterPort`] that writes to the logger.  `Sync`, so one static
/// instance serves both the alert task and the command context.
#[derive(Debug, Default)]
pub struct LogReporter {
    alerts: AtomicU32,
}

impl LogReporter {
    pub const fn new() -> Self {
        Self {
            alerts: AtomicU32::new(0),
        }
    }

    /// Notifications sent since boot.
    pub fn alerts_sent(&self) -> u32 {
        self.alerts.load(Ordering::Relaxed)
    }
}

impl ReporterPort for LogReporter {
    fn raise_alert(&self, message: &str) -> Result<(), ReportError> {
        let n = self.alerts.fetch_add(1, Ordering::Relaxed) + 1;
        info!("NOTIFY | #{} {}", n, message);
        Ok(())
    }

    fn report_param(&self, param: Param, value: ParamValue) -> Result<(), ReportError> {
        let json = value.to_json()?;
        info!("PARAM | {}={}", param, json);
        Ok(())
    }
}
