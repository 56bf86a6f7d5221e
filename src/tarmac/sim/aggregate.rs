use serde::Serialize;

use super::aircraft_data::{AircraftData, CalculationSettings, DataError, Environment};
use super::distance::{DistanceCalculator, SimulationError};
use super::dynamics::{AbortedTakeoff, ContinuedTakeoff, NormalTakeoff};
use super::integrator::Integrator;

/// Aborted and continued takeoff distance for one failure speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregatedDistanceOutput {
    pub failure_speed_m_s: f64,
    pub aborted_distance_m: f64,
    pub continued_distance_m: f64,
}

/// Runs both failure responses for a failure speed: the takeoff aborted onto
/// the brakes and the takeoff continued on the remaining engines.
pub struct AggregatedDistanceCalculator<'a> {
    aircraft: &'a AircraftData,
    environment: &'a Environment,
    integrator: &'a dyn Integrator,
}

impl<'a> AggregatedDistanceCalculator<'a> {
    pub fn new(
        aircraft: &'a AircraftData,
        environment: &'a Environment,
        integrator: &'a dyn Integrator,
    ) -> Result<Self, DataError> {
        if environment.nr_of_failed_engines > aircraft.nr_of_engines {
            return Err(DataError::TooManyFailedEngines {
                failed: environment.nr_of_failed_engines,
                engines: aircraft.nr_of_engines,
            });
        }

        Ok(AggregatedDistanceCalculator {
            aircraft,
            environment,
            integrator,
        })
    }

    pub fn calculate(
        &self,
        settings: &CalculationSettings,
    ) -> Result<AggregatedDistanceOutput, SimulationError> {
        let normal = NormalTakeoff::new(self.aircraft, self.environment);
        let aborted = AbortedTakeoff::new(self.aircraft, self.environment);
        let continued = ContinuedTakeoff::new(self.aircraft, self.environment);

        let aborted_output =
            DistanceCalculator::new(&normal, &aborted, self.integrator, settings).calculate()?;
        let continued_output =
            DistanceCalculator::new(&normal, &continued, self.integrator, settings).calculate()?;

        Ok(AggregatedDistanceOutput {
            failure_speed_m_s: settings.failure_speed_m_s,
            aborted_distance_m: aborted_output.distance_m,
            continued_distance_m: continued_output.distance_m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tarmac::sim::aero::AerodynamicsData;
    use crate::tarmac::sim::integrator::ForwardEuler;
    use approx::assert_relative_eq;

    fn reference_aircraft() -> AircraftData {
        let aero = AerodynamicsData::new(
            100.0,
            15.0,
            0.85,
            (-3.0f64).to_radians(),
            4.85,
            1.5,
            0.0205,
            0.026,
        )
        .unwrap();

        AircraftData::new(
            2,
            75_000.0,
            500_000.0,
            3.0f64.to_radians(),
            12.0f64.to_radians(),
            0.02,
            0.2,
            aero,
        )
        .unwrap()
    }

    #[test]
    fn test_aggregated_distances_near_the_crossing() {
        let aircraft = reference_aircraft();
        let environment = Environment::new(1.225, 9.80665, 1).unwrap();
        let calculator =
            AggregatedDistanceCalculator::new(&aircraft, &environment, &ForwardEuler).unwrap();
        let settings = CalculationSettings::new(72.0, 10_000, 0.04).unwrap();

        let output = calculator.calculate(&settings).unwrap();

        assert_eq!(output.failure_speed_m_s, 72.0);
        assert_relative_eq!(
            output.aborted_distance_m,
            2341.410371157662,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            output.continued_distance_m,
            2344.0136688630787,
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_more_failed_engines_than_installed() {
        let aircraft = reference_aircraft();
        let environment = Environment::new(1.225, 9.80665, 3).unwrap();

        let result = AggregatedDistanceCalculator::new(&aircraft, &environment, &ForwardEuler);

        assert!(matches!(
            result,
            Err(DataError::TooManyFailedEngines {
                failed: 3,
                engines: 2
            })
        ));
    }

    #[test]
    fn test_simulation_errors_propagate() {
        let aircraft = reference_aircraft();
        let environment = Environment::new(1.225, 9.80665, 1).unwrap();
        let calculator =
            AggregatedDistanceCalculator::new(&aircraft, &environment, &ForwardEuler).unwrap();
        let settings = CalculationSettings::new(10.0, 5, 0.04).unwrap();

        assert_eq!(
            calculator.calculate(&settings),
            Err(SimulationError::DidNotConverge { steps: 5 })
        );
    }
}
