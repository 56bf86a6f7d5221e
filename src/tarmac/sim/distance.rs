use log::debug;
use thiserror::Error;

use super::aero::AeroError;
use super::aircraft_data::{AircraftState, CalculationSettings};
use super::dynamics::{self, TakeoffDynamics};
use super::integrator::Integrator;

/// Height above the runway at which the takeoff run is complete.
pub const SCREEN_HEIGHT_M: f64 = 10.7;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("takeoff run converged before the engine failure occurred")]
    ConvergedBeforeFailure,

    #[error("takeoff run did not converge after {steps} time steps")]
    DidNotConverge { steps: u32 },

    #[error(transparent)]
    Aero(#[from] AeroError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceCalculatorOutput {
    pub failure_speed_m_s: f64,
    pub distance_m: f64,
}

/// Marches a single takeoff run through time until it either clears the
/// screen height or comes to a standstill.
///
/// The run starts under the normal dynamics and switches permanently to the
/// failure dynamics on the first step whose airspeed exceeds the failure
/// speed. The switch is latched so an aborted run keeps braking once it has
/// decelerated back below the failure speed.
pub struct DistanceCalculator<'a> {
    normal: &'a dyn TakeoffDynamics,
    failure: &'a dyn TakeoffDynamics,
    integrator: &'a dyn Integrator,
    settings: &'a CalculationSettings,
}

impl<'a> DistanceCalculator<'a> {
    pub fn new(
        normal: &'a dyn TakeoffDynamics,
        failure: &'a dyn TakeoffDynamics,
        integrator: &'a dyn Integrator,
        settings: &'a CalculationSettings,
    ) -> Self {
        DistanceCalculator {
            normal,
            failure,
            integrator,
            settings,
        }
    }

    pub fn calculate(&self) -> Result<DistanceCalculatorOutput, SimulationError> {
        let mut state = AircraftState::default();
        let mut failure_occurred = false;

        for _ in 0..self.settings.max_nr_of_time_steps {
            let active = if failure_occurred {
                self.failure
            } else {
                self.normal
            };

            let accelerations = dynamics::accelerations(active, &state)?;
            state = self
                .integrator
                .integrate(&state, &accelerations, self.settings.timestep_s);

            if !failure_occurred && state.true_airspeed_m_s > self.settings.failure_speed_m_s {
                debug!(
                    "Engine failure at {:.2} m/s after {:.2} m",
                    state.true_airspeed_m_s, state.distance_m
                );
                failure_occurred = true;
            }

            if state.height_m >= SCREEN_HEIGHT_M || state.true_airspeed_m_s <= 0.0 {
                if !failure_occurred {
                    return Err(SimulationError::ConvergedBeforeFailure);
                }

                return Ok(DistanceCalculatorOutput {
                    failure_speed_m_s: self.settings.failure_speed_m_s,
                    distance_m: state.distance_m,
                });
            }
        }

        Err(SimulationError::DidNotConverge {
            steps: self.settings.max_nr_of_time_steps,
        })
    }
}
