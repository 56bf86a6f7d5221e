use std::f64::consts::PI;

use anyhow::Result;
use thiserror::Error;

use super::aircraft_data::{DataError, check_finite, check_non_negative, check_positive};
use crate::parameters::ParameterMap;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AeroError {
    #[error("angle of attack {alpha_rad} rad is below the zero-lift angle {zero_lift_alpha_rad} rad")]
    AlphaBelowZeroLift {
        alpha_rad: f64,
        zero_lift_alpha_rad: f64,
    },

    #[error("lift coefficient {cl} exceeds the maximum {cl_max}")]
    ClAboveMax { cl: f64, cl_max: f64 },

    #[error("lift coefficient {cl} outside [0, {cl_max}]")]
    ClOutOfRange { cl: f64, cl_max: f64 },

    #[error("negative velocity {velocity_m_s} m/s")]
    NegativeVelocity { velocity_m_s: f64 },

    #[error("non-positive air density {density_kg_m3} kg/m^3")]
    NonPositiveDensity { density_kg_m3: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AerodynamicsData {
    pub wing_area_m2: f64,
    pub aspect_ratio: f64,
    pub oswald_factor: f64,
    pub zero_lift_alpha_rad: f64,
    pub cl_alpha: f64,
    pub cl_max: f64,
    pub cd0: f64,
    pub cd0_engine_failed: f64,
}

impl AerodynamicsData {
    pub fn new(
        wing_area_m2: f64,
        aspect_ratio: f64,
        oswald_factor: f64,
        zero_lift_alpha_rad: f64,
        cl_alpha: f64,
        cl_max: f64,
        cd0: f64,
        cd0_engine_failed: f64,
    ) -> Result<Self, DataError> {
        Ok(AerodynamicsData {
            wing_area_m2: check_positive("wing_area", wing_area_m2)?,
            aspect_ratio: check_positive("aspect_ratio", aspect_ratio)?,
            oswald_factor: check_positive("oswald_factor", oswald_factor)?,
            zero_lift_alpha_rad: check_finite("zero_lift_alpha", zero_lift_alpha_rad)?,
            cl_alpha: check_positive("cl_alpha", cl_alpha)?,
            cl_max: check_positive("cl_max", cl_max)?,
            cd0: check_non_negative("cd0", cd0)?,
            cd0_engine_failed: check_non_negative("cd0_engine_failed", cd0_engine_failed)?,
        })
    }

    pub fn from_params(params: &ParameterMap) -> Result<Self> {
        Ok(AerodynamicsData::new(
            params.get_param("wing_area")?.value_float()?,
            params.get_param("aspect_ratio")?.value_float()?,
            params.get_param("oswald_factor")?.value_float()?,
            params
                .get_param("zero_lift_alpha_deg")?
                .value_float()?
                .to_radians(),
            params.get_param("cl_alpha")?.value_float()?,
            params.get_param("cl_max")?.value_float()?,
            params.get_param("cd0")?.value_float()?,
            params.get_param("cd0_engine_failed")?.value_float()?,
        )?)
    }
}

/// Lift coefficient on the linear lift curve, `cl_alpha * (alpha - alpha_0)`.
/// Fails below the zero-lift angle and above the maximum lift coefficient.
pub fn lift_coefficient(data: &AerodynamicsData, alpha_rad: f64) -> Result<f64, AeroError> {
    if alpha_rad < data.zero_lift_alpha_rad {
        return Err(AeroError::AlphaBelowZeroLift {
            alpha_rad,
            zero_lift_alpha_rad: data.zero_lift_alpha_rad,
        });
    }

    let cl = data.cl_alpha * (alpha_rad - data.zero_lift_alpha_rad);
    if cl > data.cl_max {
        return Err(AeroError::ClAboveMax {
            cl,
            cl_max: data.cl_max,
        });
    }

    Ok(cl)
}

pub fn lift(
    data: &AerodynamicsData,
    alpha_rad: f64,
    density_kg_m3: f64,
    velocity_m_s: f64,
) -> Result<f64, AeroError> {
    Ok(lift_coefficient(data, alpha_rad)?
        * dynamic_pressure_area(data, density_kg_m3, velocity_m_s))
}

pub fn drag_without_engine_failure(
    data: &AerodynamicsData,
    cl: f64,
    density_kg_m3: f64,
    velocity_m_s: f64,
) -> Result<f64, AeroError> {
    drag(data, cl, density_kg_m3, velocity_m_s, data.cd0)
}

pub fn drag_with_engine_failure(
    data: &AerodynamicsData,
    cl: f64,
    density_kg_m3: f64,
    velocity_m_s: f64,
) -> Result<f64, AeroError> {
    drag(data, cl, density_kg_m3, velocity_m_s, data.cd0_engine_failed)
}

/// Parabolic drag polar `cd0 + cl^2 / (pi * AR * e)` times the dynamic
/// pressure term.
fn drag(
    data: &AerodynamicsData,
    cl: f64,
    density_kg_m3: f64,
    velocity_m_s: f64,
    cd0: f64,
) -> Result<f64, AeroError> {
    if velocity_m_s < 0.0 {
        return Err(AeroError::NegativeVelocity { velocity_m_s });
    }
    if density_kg_m3 <= 0.0 {
        return Err(AeroError::NonPositiveDensity { density_kg_m3 });
    }
    if !(0.0..=data.cl_max).contains(&cl) {
        return Err(AeroError::ClOutOfRange {
            cl,
            cl_max: data.cl_max,
        });
    }

    let cd = cd0 + cl * cl / (PI * data.aspect_ratio * data.oswald_factor);
    Ok(cd * dynamic_pressure_area(data, density_kg_m3, velocity_m_s))
}

pub fn stall_speed(data: &AerodynamicsData, weight_n: f64, density_kg_m3: f64) -> f64 {
    f64::sqrt(2.0 * weight_n / (density_kg_m3 * data.wing_area_m2 * data.cl_max))
}

fn dynamic_pressure_area(data: &AerodynamicsData, density_kg_m3: f64, velocity_m_s: f64) -> f64 {
    0.5 * density_kg_m3 * velocity_m_s * velocity_m_s * data.wing_area_m2
}
