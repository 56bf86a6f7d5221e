use anyhow::Result;
use thiserror::Error;

use super::aero::AerodynamicsData;
use crate::parameters::ParameterMap;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("'{name}' must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("'{name}' must be strictly positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("'{name}' must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("at least one engine is required")]
    NoEngines,

    #[error("the time step budget must be at least 1")]
    NoTimeSteps,

    #[error("{failed} failed engines exceed the {engines} installed engines")]
    TooManyFailedEngines { failed: u32, engines: u32 },
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<f64, DataError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DataError::NotFinite { name, value })
    }
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<f64, DataError> {
    let value = check_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(DataError::NotPositive { name, value })
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<f64, DataError> {
    let value = check_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(DataError::Negative { name, value })
    }
}

/// Longitudinal point-mass state during the takeoff run. Superseded, not
/// mutated, on every integration step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AircraftState {
    pub distance_m: f64,
    pub height_m: f64,
    pub true_airspeed_m_s: f64,
    pub pitch_rad: f64,
    pub flight_path_rad: f64,
}

/// Time derivatives of the state, produced by the active dynamics
/// calculator. The distance field of the state advances with the state's own
/// airspeed instead.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AircraftAccelerations {
    pub pitch_rate_rad_s: f64,
    pub climb_rate_m_s: f64,
    pub airspeed_rate_m_s2: f64,
    pub flight_path_rate_rad_s: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AircraftData {
    pub nr_of_engines: u32,
    pub max_thrust_per_engine_n: f64,
    pub weight_n: f64,
    pub pitch_gradient_rad_s: f64,
    pub max_pitch_rad: f64,
    pub roll_resistance_coeff: f64,
    pub brake_resistance_coeff: f64,
    pub aero: AerodynamicsData,
}

impl AircraftData {
    pub fn new(
        nr_of_engines: u32,
        max_thrust_per_engine_n: f64,
        weight_n: f64,
        pitch_gradient_rad_s: f64,
        max_pitch_rad: f64,
        roll_resistance_coeff: f64,
        brake_resistance_coeff: f64,
        aero: AerodynamicsData,
    ) -> Result<Self, DataError> {
        if nr_of_engines == 0 {
            return Err(DataError::NoEngines);
        }

        Ok(AircraftData {
            nr_of_engines,
            max_thrust_per_engine_n: check_positive(
                "max_thrust_per_engine",
                max_thrust_per_engine_n,
            )?,
            weight_n: check_positive("weight", weight_n)?,
            pitch_gradient_rad_s: check_non_negative("pitch_gradient", pitch_gradient_rad_s)?,
            max_pitch_rad: check_non_negative("max_pitch", max_pitch_rad)?,
            roll_resistance_coeff: check_non_negative(
                "roll_resistance_coeff",
                roll_resistance_coeff,
            )?,
            brake_resistance_coeff: check_non_negative(
                "brake_resistance_coeff",
                brake_resistance_coeff,
            )?,
            aero,
        })
    }

    pub fn from_params(params: &ParameterMap) -> Result<Self> {
        let aero = AerodynamicsData::from_params(params.get_map("aero")?)?;

        Ok(AircraftData::new(
            u32::try_from(params.get_param("nr_of_engines")?.value_int()?)?,
            params.get_param("max_thrust_per_engine")?.value_float()?,
            params.get_param("weight")?.value_float()?,
            params
                .get_param("pitch_gradient_deg_s")?
                .value_float()?
                .to_radians(),
            params.get_param("max_pitch_deg")?.value_float()?.to_radians(),
            params.get_param("roll_resistance_coeff")?.value_float()?,
            params.get_param("brake_resistance_coeff")?.value_float()?,
            aero,
        )?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub density_kg_m3: f64,
    pub gravity_m_s2: f64,
    pub nr_of_failed_engines: u32,
}

impl Environment {
    pub fn new(
        density_kg_m3: f64,
        gravity_m_s2: f64,
        nr_of_failed_engines: u32,
    ) -> Result<Self, DataError> {
        Ok(Environment {
            density_kg_m3: check_positive("density", density_kg_m3)?,
            gravity_m_s2: check_positive("gravity", gravity_m_s2)?,
            nr_of_failed_engines,
        })
    }

    pub fn from_params(params: &ParameterMap) -> Result<Self> {
        Ok(Environment::new(
            params.get_param("density")?.value_float()?,
            params.get_param("gravity")?.value_float()?,
            u32::try_from(params.get_param("nr_of_failed_engines")?.value_int()?)?,
        )?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationSettings {
    pub failure_speed_m_s: f64,
    pub max_nr_of_time_steps: u32,
    pub timestep_s: f64,
}

impl CalculationSettings {
    pub fn new(
        failure_speed_m_s: f64,
        max_nr_of_time_steps: u32,
        timestep_s: f64,
    ) -> Result<Self, DataError> {
        if max_nr_of_time_steps == 0 {
            return Err(DataError::NoTimeSteps);
        }

        Ok(CalculationSettings {
            failure_speed_m_s: check_non_negative("failure_speed", failure_speed_m_s)?,
            max_nr_of_time_steps,
            timestep_s: check_positive("timestep", timestep_s)?,
        })
    }
}
