pub mod aero;
pub mod aggregate;
pub mod aircraft_data;
pub mod distance;
pub mod dynamics;
pub mod integrator;
