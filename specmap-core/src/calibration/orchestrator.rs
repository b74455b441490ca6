//! One-shot calibration request/response cycle.

use log::{info, warn};

use crate::calibration::{CalibrationEngine, CalibrationParameters, FitRequest};
use crate::error::CalibrationError;
use crate::render::RenderCommand;
use crate::session::SpectralSession;

/// Drives a calibration engine on behalf of a session.
pub struct CalibrationOrchestrator<'e, E: CalibrationEngine + ?Sized> {
    engine: &'e mut E,
}

impl<'e, E: CalibrationEngine + ?Sized> CalibrationOrchestrator<'e, E> {
    /// Borrow an engine for a calibration run.
    pub fn new(engine: &'e mut E) -> Self {
        Self { engine }
    }

    /// Run one calibration and apply it to `session`.
    ///
    /// On failure the session is left unchanged. On success the session
    /// adopts the new axis and status, and the returned commands redraw the
    /// fit-diagnostic plot and the 2D map.
    ///
    /// # Errors
    /// - [`CalibrationError::MissingReference`] without a loaded reference.
    /// - [`CalibrationError::UnsupportedParameter`] for values the engine
    ///   does not advertise.
    /// - [`CalibrationError::ChannelMismatch`] if the reference and the
    ///   loaded map differ in channel count.
    /// - [`CalibrationError::Fit`] when the engine fails.
    pub fn run(
        &mut self,
        params: &CalibrationParameters,
        session: &mut SpectralSession,
    ) -> Result<Vec<RenderCommand>, CalibrationError> {
        let reference = session
            .reference()
            .ok_or(CalibrationError::MissingReference)?;
        params.validate(&*self.engine)?;

        let channel_count = reference.channel_count();
        if let Some(map) = session.map() {
            if map.channel_count() != channel_count {
                return Err(CalibrationError::ChannelMismatch {
                    expected: map.channel_count(),
                    found: channel_count,
                });
            }
        }

        self.engine.reset();
        let initial_axis = self.engine.initial_axis(params.center, channel_count);
        let request = FitRequest {
            initial_axis: &initial_axis,
            dimension: params.dimension,
            material: &params.material,
            function: &params.function,
            search_width: params.search_width,
            easy: true,
        };

        let outcome = match self.engine.fit(reference, &request) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("calibration failed: {e}");
                return Err(e.into());
            }
        };
        if outcome.axis.len() != channel_count {
            return Err(CalibrationError::ChannelMismatch {
                expected: channel_count,
                found: outcome.axis.len(),
            });
        }
        info!("calibrated: {}", outcome.info);
        Ok(session.apply_calibration(outcome))
    }
}
