//! Single-run pipeline.
//!
//! Authenticates once, then walks the configured locations in the
//! caller-supplied order, strictly sequentially: the portal session is
//! bound to one bearer token and hammering an unfamiliar booking API in
//! parallel is a good way to get rate limited. A single location's failure
//! is logged and never aborts the remaining locations; only an
//! authentication failure aborts the run.

use std::sync::Arc;

use crate::alerts::{slot_message, AlertSink};
use crate::booking::types::Slot;
use crate::booking::window::DateWindow;
use crate::booking::{appointments, session};
use crate::config::Config;
use crate::error::AppError;
use crate::services::portal::PortalTransport;

/// Terminal state of one location within a run.
#[derive(Debug)]
pub enum LocationOutcome {
    /// A slot inside the window was found and the alert path ran.
    Notified(Slot),
    /// The earliest slot exists but falls outside the acceptable window.
    OutsideWindow(Slot),
    /// The portal returned no slot for the search criteria.
    NoneAvailable,
    /// Query or decode failed; the error was logged and the run moved on.
    Failed(AppError),
}

#[derive(Debug)]
pub struct LocationReport {
    pub location_id: i64,
    pub outcome: LocationOutcome,
}

/// Per-location outcomes of one completed run.
///
/// Reaching this value at all means authentication succeeded; there is no
/// whole-run failure flag beyond that.
#[derive(Debug, Default)]
pub struct RunReport {
    pub locations: Vec<LocationReport>,
}

impl RunReport {
    pub fn notified(&self) -> usize {
        self.locations
            .iter()
            .filter(|report| matches!(report.outcome, LocationOutcome::Notified(_)))
            .count()
    }
}

pub struct Orchestrator {
    transport: PortalTransport,
    config: Config,
    window: DateWindow,
    sink: Option<Arc<dyn AlertSink + Send + Sync>>,
}

impl Orchestrator {
    pub fn new(
        config: Config,
        sink: Option<Arc<dyn AlertSink + Send + Sync>>,
    ) -> Result<Self, AppError> {
        let transport = PortalTransport::new(config.portal_url.clone())?;
        let window = config.window();

        Ok(Self {
            transport,
            config,
            window,
            sink,
        })
    }

    /// Run the full pipeline once.
    pub async fn run(&self) -> Result<RunReport, AppError> {
        tracing::info!("logging into the booking portal");
        let (token, meta) =
            session::authenticate(&self.transport, &self.config.credentials()).await?;
        tracing::debug!(body = %meta.raw, "portal session established");

        let mut report = RunReport::default();
        for &location_id in &self.config.locations {
            tracing::info!(location_id, "querying free appointments");
            let criteria = self.config.criteria_for(location_id);

            let outcome = match appointments::query(&self.transport, &criteria, &token).await {
                Err(err) => {
                    tracing::error!(location_id, "appointment query failed: {}", err);
                    LocationOutcome::Failed(err)
                }
                Ok(None) => {
                    tracing::info!(location_id, "no appointments matching the search criteria");
                    LocationOutcome::NoneAvailable
                }
                Ok(Some(slot)) => {
                    if self.window.satisfies(&slot) {
                        self.notify(&slot).await;
                        LocationOutcome::Notified(slot)
                    } else {
                        tracing::info!(
                            location_id,
                            date = %slot.date,
                            "earliest slot falls outside the acceptable window"
                        );
                        LocationOutcome::OutsideWindow(slot)
                    }
                }
            };

            report.locations.push(LocationReport {
                location_id,
                outcome,
            });
        }

        Ok(report)
    }

    async fn notify(&self, slot: &Slot) {
        let message = slot_message(slot);
        tracing::info!("{}", message);

        if let Some(sink) = &self.sink {
            if let Err(err) = sink.deliver(&message).await {
                tracing::warn!("alert delivery via {} failed: {}", sink.sink_name(), err);
            }
        }
    }
}
