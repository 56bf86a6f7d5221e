use super::aero::{self, AeroError};
use super::aircraft_data::{AircraftAccelerations, AircraftData, AircraftState, Environment};

/// Rotation speed as a multiple of the stall speed.
pub const ROTATION_SPEED_FACTOR: f64 = 1.1;

/// Below this airspeed the flight path angle is held constant to keep the
/// flight path rate equation away from its singularity at zero airspeed.
pub const FLIGHT_PATH_MIN_AIRSPEED_M_S: f64 = 1.0;

/// Forces and commanded pitch rate of one takeoff scenario. The state
/// derivatives shared by all scenarios live in [`accelerations`].
pub trait TakeoffDynamics {
    fn thrust_force(&self) -> f64;

    fn friction_coefficient(&self) -> f64;

    fn drag_force(&self, state: &AircraftState) -> Result<f64, AeroError>;

    fn pitch_rate(&self, state: &AircraftState) -> f64;

    fn aircraft(&self) -> &AircraftData;

    fn environment(&self) -> &Environment;
}

/// Longitudinal point-mass state derivatives under the given scenario.
pub fn accelerations(
    calculator: &dyn TakeoffDynamics,
    state: &AircraftState,
) -> Result<AircraftAccelerations, AeroError> {
    let aircraft = calculator.aircraft();
    let environment = calculator.environment();

    let alpha_rad = state.pitch_rad - state.flight_path_rad;
    let lift = aero::lift(
        &aircraft.aero,
        alpha_rad,
        environment.density_kg_m3,
        state.true_airspeed_m_s,
    )?;
    let normal = (aircraft.weight_n - lift).max(0.0);

    let thrust = calculator.thrust_force();
    let friction = calculator.friction_coefficient();
    let drag = calculator.drag_force(state)?;
    let pitch_rate_rad_s = calculator.pitch_rate(state);

    let climb_rate_m_s = state.true_airspeed_m_s * state.flight_path_rad.sin();

    let airspeed_rate_m_s2 = environment.gravity_m_s2
        * (thrust - drag - friction * normal - aircraft.weight_n * state.flight_path_rad.sin())
        / aircraft.weight_n;

    let flight_path_rate_rad_s = if state.true_airspeed_m_s < FLIGHT_PATH_MIN_AIRSPEED_M_S {
        0.0
    } else {
        environment.gravity_m_s2
            * (lift + normal - aircraft.weight_n * state.flight_path_rad.cos())
            / (aircraft.weight_n * state.true_airspeed_m_s)
    };

    Ok(AircraftAccelerations {
        pitch_rate_rad_s,
        climb_rate_m_s,
        airspeed_rate_m_s2,
        flight_path_rate_rad_s,
    })
}

fn rotation_pitch_rate(
    aircraft: &AircraftData,
    environment: &Environment,
    state: &AircraftState,
) -> f64 {
    let rotation_speed_m_s = ROTATION_SPEED_FACTOR
        * aero::stall_speed(&aircraft.aero, aircraft.weight_n, environment.density_kg_m3);

    if state.true_airspeed_m_s >= rotation_speed_m_s && state.pitch_rad < aircraft.max_pitch_rad {
        aircraft.pitch_gradient_rad_s
    } else {
        0.0
    }
}

/// All engines running, rolling friction, clean drag polar.
pub struct NormalTakeoff<'a> {
    aircraft: &'a AircraftData,
    environment: &'a Environment,
}

impl<'a> NormalTakeoff<'a> {
    pub fn new(aircraft: &'a AircraftData, environment: &'a Environment) -> Self {
        NormalTakeoff {
            aircraft,
            environment,
        }
    }
}

impl TakeoffDynamics for NormalTakeoff<'_> {
    fn thrust_force(&self) -> f64 {
        f64::from(self.aircraft.nr_of_engines) * self.aircraft.max_thrust_per_engine_n
    }

    fn friction_coefficient(&self) -> f64 {
        self.aircraft.roll_resistance_coeff
    }

    fn drag_force(&self, state: &AircraftState) -> Result<f64, AeroError> {
        let cl = aero::lift_coefficient(
            &self.aircraft.aero,
            state.pitch_rad - state.flight_path_rad,
        )?;
        aero::drag_without_engine_failure(
            &self.aircraft.aero,
            cl,
            self.environment.density_kg_m3,
            state.true_airspeed_m_s,
        )
    }

    fn pitch_rate(&self, state: &AircraftState) -> f64 {
        rotation_pitch_rate(self.aircraft, self.environment, state)
    }

    fn aircraft(&self) -> &AircraftData {
        self.aircraft
    }

    fn environment(&self) -> &Environment {
        self.environment
    }
}

/// Takeoff continued after the engine failure: reduced thrust, rolling
/// friction, engine-out drag polar.
pub struct ContinuedTakeoff<'a> {
    aircraft: &'a AircraftData,
    environment: &'a Environment,
}

impl<'a> ContinuedTakeoff<'a> {
    pub fn new(aircraft: &'a AircraftData, environment: &'a Environment) -> Self {
        ContinuedTakeoff {
            aircraft,
            environment,
        }
    }
}

impl TakeoffDynamics for ContinuedTakeoff<'_> {
    fn thrust_force(&self) -> f64 {
        let running = self
            .aircraft
            .nr_of_engines
            .saturating_sub(self.environment.nr_of_failed_engines);
        f64::from(running) * self.aircraft.max_thrust_per_engine_n
    }

    fn friction_coefficient(&self) -> f64 {
        self.aircraft.roll_resistance_coeff
    }

    fn drag_force(&self, state: &AircraftState) -> Result<f64, AeroError> {
        let cl = aero::lift_coefficient(
            &self.aircraft.aero,
            state.pitch_rad - state.flight_path_rad,
        )?;
        aero::drag_with_engine_failure(
            &self.aircraft.aero,
            cl,
            self.environment.density_kg_m3,
            state.true_airspeed_m_s,
        )
    }

    fn pitch_rate(&self, state: &AircraftState) -> f64 {
        rotation_pitch_rate(self.aircraft, self.environment, state)
    }

    fn aircraft(&self) -> &AircraftData {
        self.aircraft
    }

    fn environment(&self) -> &Environment {
        self.environment
    }
}

/// Takeoff aborted after the engine failure: no thrust, braking friction,
/// engine-out drag polar, pitch held.
pub struct AbortedTakeoff<'a> {
    aircraft: &'a AircraftData,
    environment: &'a Environment,
}

impl<'a> AbortedTakeoff<'a> {
    pub fn new(aircraft: &'a AircraftData, environment: &'a Environment) -> Self {
        AbortedTakeoff {
            aircraft,
            environment,
        }
    }
}

impl TakeoffDynamics for AbortedTakeoff<'_> {
    fn thrust_force(&self) -> f64 {
        0.0
    }

    fn friction_coefficient(&self) -> f64 {
        self.aircraft.brake_resistance_coeff
    }

    fn drag_force(&self, state: &AircraftState) -> Result<f64, AeroError> {
        let cl = aero::lift_coefficient(
            &self.aircraft.aero,
            state.pitch_rad - state.flight_path_rad,
        )?;
        aero::drag_with_engine_failure(
            &self.aircraft.aero,
            cl,
            self.environment.density_kg_m3,
            state.true_airspeed_m_s,
        )
    }

    fn pitch_rate(&self, _state: &AircraftState) -> f64 {
        0.0
    }

    fn aircraft(&self) -> &AircraftData {
        self.aircraft
    }

    fn environment(&self) -> &Environment {
        self.environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tarmac::sim::aero::AerodynamicsData;
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

    fn reference_environment() -> Environment {
        Environment::new(1.225, 9.80665, 1).unwrap()
    }

    #[test]
    fn test_thrust_forces() {
        let aircraft = reference_aircraft();
        let environment = reference_environment();

        assert_eq!(
            NormalTakeoff::new(&aircraft, &environment).thrust_force(),
            150_000.0
        );
        assert_eq!(
            ContinuedTakeoff::new(&aircraft, &environment).thrust_force(),
            75_000.0
        );
        assert_eq!(
            AbortedTakeoff::new(&aircraft, &environment).thrust_force(),
            0.0
        );
    }

    #[test]
    fn test_friction_coefficients() {
        let aircraft = reference_aircraft();
        let environment = reference_environment();

        assert_eq!(
            NormalTakeoff::new(&aircraft, &environment).friction_coefficient(),
            0.02
        );
        assert_eq!(
            ContinuedTakeoff::new(&aircraft, &environment).friction_coefficient(),
            0.02
        );
        assert_eq!(
            AbortedTakeoff::new(&aircraft, &environment).friction_coefficient(),
            0.2
        );
    }

    #[test]
    fn test_pitch_rate_starts_at_rotation_speed() {
        let aircraft = reference_aircraft();
        let environment = reference_environment();
        let normal = NormalTakeoff::new(&aircraft, &environment);

        let rotation_speed = ROTATION_SPEED_FACTOR
            * aero::stall_speed(&aircraft.aero, aircraft.weight_n, environment.density_kg_m3);
        assert_relative_eq!(rotation_speed, 81.14822249196493, max_relative = 1e-9);

        let slow = AircraftState {
            true_airspeed_m_s: 81.0,
            ..Default::default()
        };
        let fast = AircraftState {
            true_airspeed_m_s: 81.2,
            ..Default::default()
        };

        assert_eq!(normal.pitch_rate(&slow), 0.0);
        assert_eq!(normal.pitch_rate(&fast), aircraft.pitch_gradient_rad_s);
    }

    #[test]
    fn test_pitch_rate_stops_at_max_pitch() {
        let aircraft = reference_aircraft();
        let environment = reference_environment();
        let continued = ContinuedTakeoff::new(&aircraft, &environment);

        let rotating = AircraftState {
            true_airspeed_m_s: 85.0,
            pitch_rad: 11.0f64.to_radians(),
            ..Default::default()
        };
        let at_limit = AircraftState {
            true_airspeed_m_s: 85.0,
            pitch_rad: 12.0f64.to_radians(),
            ..Default::default()
        };

        assert_eq!(continued.pitch_rate(&rotating), aircraft.pitch_gradient_rad_s);
        assert_eq!(continued.pitch_rate(&at_limit), 0.0);
    }

    #[test]
    fn test_aborted_never_pitches() {
        let aircraft = reference_aircraft();
        let environment = reference_environment();
        let aborted = AbortedTakeoff::new(&aircraft, &environment);

        let fast = AircraftState {
            true_airspeed_m_s: 85.0,
            ..Default::default()
        };

        assert_eq!(aborted.pitch_rate(&fast), 0.0);
    }

    #[test]
    fn test_standstill_accelerations() {
        let aircraft = reference_aircraft();
        let environment = reference_environment();
        let normal = NormalTakeoff::new(&aircraft, &environment);

        let accel = accelerations(&normal, &AircraftState::default()).unwrap();

        assert_relative_eq!(
            accel.airspeed_rate_m_s2,
            9.80665 * (150_000.0 - 0.02 * 500_000.0) / 500_000.0
        );
        assert_eq!(accel.climb_rate_m_s, 0.0);
        assert_eq!(accel.flight_path_rate_rad_s, 0.0);
        assert_eq!(accel.pitch_rate_rad_s, 0.0);
    }

    #[test]
    fn test_flight_path_rate_held_below_threshold() {
        let aircraft = reference_aircraft();
        let environment = reference_environment();
        let normal = NormalTakeoff::new(&aircraft, &environment);

        let creeping = AircraftState {
            true_airspeed_m_s: 0.5,
            ..Default::default()
        };

        let accel = accelerations(&normal, &creeping).unwrap();
        assert_eq!(accel.flight_path_rate_rad_s, 0.0);
    }

    #[test]
    fn test_accelerations_propagate_aero_errors() {
        let aircraft = reference_aircraft();
        let environment = reference_environment();
        let normal = NormalTakeoff::new(&aircraft, &environment);

        let overpitched = AircraftState {
            true_airspeed_m_s: 50.0,
            pitch_rad: 30.0f64.to_radians(),
            ..Default::default()
        };

        assert!(matches!(
            accelerations(&normal, &overpitched),
            Err(AeroError::ClAboveMax { .. })
        ));
    }
}
