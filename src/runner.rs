use anyhow::{Result, anyhow};
use log::{debug, info};

use crate::parameters::ParameterMap;
use crate::tarmac::bfl::{self, BalancedFieldLength};
use crate::tarmac::sim::aero;
use crate::tarmac::sim::aggregate::{AggregatedDistanceCalculator, AggregatedDistanceOutput};
use crate::tarmac::sim::aircraft_data::{AircraftData, CalculationSettings, Environment};
use crate::tarmac::sim::dynamics::ROTATION_SPEED_FACTOR;
use crate::tarmac::sim::integrator::{ForwardEuler, Integrator};

pub struct SweepOutput {
    pub samples: Vec<AggregatedDistanceOutput>,
    pub solution: BalancedFieldLength,
}

/// Sweeps the engine failure speed over a configured range, collects the
/// aborted and continued distances for every speed and solves for the
/// balanced field length.
pub struct SweepRunner {
    aircraft: AircraftData,
    environment: Environment,
    integrator: Box<dyn Integrator>,
    timestep_s: f64,
    max_nr_of_time_steps: u32,
    failure_speed_start_m_s: f64,
    failure_speed_end_m_s: f64,
    failure_speed_step_m_s: f64,
}

impl SweepRunner {
    pub fn from_params(params: &ParameterMap) -> Result<Self> {
        let aircraft = AircraftData::from_params(params.get_map("aircraft")?)?;
        let environment = Environment::from_params(params.get_map("environment")?)?;

        let simulation = params.get_map("simulation")?;
        let integrator: Box<dyn Integrator> =
            match simulation.get_param("integrator")?.value_string()?.as_str() {
                "forward_euler" => Box::new(ForwardEuler),
                unknown => return Err(anyhow!("Unknown integrator '{unknown}'")),
            };
        let timestep_s = simulation.get_param("timestep")?.value_float()?;
        let max_nr_of_time_steps =
            u32::try_from(simulation.get_param("max_nr_of_time_steps")?.value_int()?)?;

        let sweep = params.get_map("sweep")?;
        let failure_speed_start_m_s = sweep.get_param("failure_speed_start")?.value_float()?;
        let failure_speed_end_m_s = sweep.get_param("failure_speed_end")?.value_float()?;
        let failure_speed_step_m_s = sweep.get_param("failure_speed_step")?.value_float()?;

        if failure_speed_step_m_s <= 0.0 {
            return Err(anyhow!(
                "The failure speed step must be strictly positive, got {failure_speed_step_m_s}"
            ));
        }
        if failure_speed_end_m_s < failure_speed_start_m_s {
            return Err(anyhow!(
                "The failure speed sweep ends at {failure_speed_end_m_s} m/s before it starts at {failure_speed_start_m_s} m/s"
            ));
        }
        let intervals =
            ((failure_speed_end_m_s - failure_speed_start_m_s) / failure_speed_step_m_s).floor();
        if intervals >= f64::from(u32::MAX) {
            return Err(anyhow!(
                "The failure speed sweep from {failure_speed_start_m_s} to {failure_speed_end_m_s} m/s by {failure_speed_step_m_s} m/s takes more samples than supported"
            ));
        }

        Ok(SweepRunner {
            aircraft,
            environment,
            integrator,
            timestep_s,
            max_nr_of_time_steps,
            failure_speed_start_m_s,
            failure_speed_end_m_s,
            failure_speed_step_m_s,
        })
    }

    pub fn run(&self) -> Result<SweepOutput> {
        let stall_speed_m_s = aero::stall_speed(
            &self.aircraft.aero,
            self.aircraft.weight_n,
            self.environment.density_kg_m3,
        );
        info!(
            "Stall speed {:.2} m/s, rotation speed {:.2} m/s",
            stall_speed_m_s,
            ROTATION_SPEED_FACTOR * stall_speed_m_s
        );

        let calculator = AggregatedDistanceCalculator::new(
            &self.aircraft,
            &self.environment,
            self.integrator.as_ref(),
        )?;

        let count = ((self.failure_speed_end_m_s - self.failure_speed_start_m_s)
            / self.failure_speed_step_m_s)
            .floor() as u32
            + 1;

        let mut samples = Vec::with_capacity(count as usize);
        for i in 0..count {
            let failure_speed_m_s =
                self.failure_speed_start_m_s + f64::from(i) * self.failure_speed_step_m_s;
            let settings = CalculationSettings::new(
                failure_speed_m_s,
                self.max_nr_of_time_steps,
                self.timestep_s,
            )?;

            let output = calculator.calculate(&settings)?;
            debug!(
                "Failure at {:.2} m/s: aborted {:.1} m, continued {:.1} m",
                output.failure_speed_m_s, output.aborted_distance_m, output.continued_distance_m
            );
            samples.push(output);
        }

        let solution = bfl::balanced_field_length(&samples)?;
        Ok(SweepOutput { samples, solution })
    }
}
