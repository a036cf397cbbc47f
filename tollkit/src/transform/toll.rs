//! Per-vehicle toll rates derived from long-form distances.

use serde::{Deserialize, Serialize};

use crate::models::{DistanceRow, TollRow, VehicleType};

/// Distance multiplier per vehicle type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TollRates {
    pub moto: f64,
    pub car: f64,
    pub rv: f64,
    pub bus: f64,
    pub truck: f64,
}

impl Default for TollRates {
    fn default() -> Self {
        Self {
            moto: 0.8,
            car: 1.2,
            rv: 1.5,
            bus: 2.2,
            truck: 3.6,
        }
    }
}

impl TollRates {
    pub fn coefficient(&self, vehicle: VehicleType) -> f64 {
        match vehicle {
            VehicleType::Moto => self.moto,
            VehicleType::Car => self.car,
            VehicleType::Rv => self.rv,
            VehicleType::Bus => self.bus,
            VehicleType::Truck => self.truck,
        }
    }
}

/// One toll row per input row: each vehicle column is `distance × rate`.
///
/// The distance column is dropped; a missing distance gives missing rates.
pub fn calculate_toll_rate(rows: &[DistanceRow], rates: &TollRates) -> Vec<TollRow> {
    rows.iter()
        .map(|row| {
            let rate = |vehicle| row.distance.map(|d| d * rates.coefficient(vehicle));
            TollRow {
                id_start: row.id_start,
                id_end: row.id_end,
                moto: rate(VehicleType::Moto),
                car: rate(VehicleType::Car),
                rv: rate(VehicleType::Rv),
                bus: rate(VehicleType::Bus),
                truck: rate(VehicleType::Truck),
            }
        })
        .collect()
}
