use super::aircraft_data::{AircraftAccelerations, AircraftState};

/// Advances the aircraft state by one time step.
pub trait Integrator {
    fn integrate(
        &self,
        state: &AircraftState,
        accelerations: &AircraftAccelerations,
        timestep_s: f64,
    ) -> AircraftState;
}

/// First order explicit Euler scheme. Every field advances from the previous
/// state; in particular the distance integrates the pre-step airspeed.
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn integrate(
        &self,
        state: &AircraftState,
        accelerations: &AircraftAccelerations,
        timestep_s: f64,
    ) -> AircraftState {
        AircraftState {
            distance_m: state.distance_m + state.true_airspeed_m_s * timestep_s,
            height_m: state.height_m + accelerations.climb_rate_m_s * timestep_s,
            true_airspeed_m_s: state.true_airspeed_m_s
                + accelerations.airspeed_rate_m_s2 * timestep_s,
            pitch_rad: state.pitch_rad + accelerations.pitch_rate_rad_s * timestep_s,
            flight_path_rad: state.flight_path_rad
                + accelerations.flight_path_rate_rad_s * timestep_s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_euler_step() {
        let state = AircraftState {
            distance_m: 100.0,
            height_m: 2.0,
            true_airspeed_m_s: 10.0,
            pitch_rad: 0.1,
            flight_path_rad: 0.05,
        };
        let accelerations = AircraftAccelerations {
            pitch_rate_rad_s: 0.02,
            climb_rate_m_s: 1.5,
            airspeed_rate_m_s2: 2.0,
            flight_path_rate_rad_s: 0.01,
        };

        let next = ForwardEuler.integrate(&state, &accelerations, 0.5);

        assert_eq!(next.distance_m, 105.0);
        assert_eq!(next.height_m, 2.75);
        assert_eq!(next.true_airspeed_m_s, 11.0);
        assert_relative_eq!(next.pitch_rad, 0.11);
        assert_relative_eq!(next.flight_path_rad, 0.055);
    }

    #[test]
    fn test_distance_integrates_pre_step_airspeed() {
        let state = AircraftState {
            true_airspeed_m_s: 10.0,
            ..Default::default()
        };
        let accelerations = AircraftAccelerations {
            airspeed_rate_m_s2: 2.0,
            ..Default::default()
        };

        let next = ForwardEuler.integrate(&state, &accelerations, 0.5);

        // 10 m/s for half a second, not the updated 11 m/s.
        assert_eq!(next.distance_m, 5.0);
        assert_eq!(next.true_airspeed_m_s, 11.0);
    }
}
