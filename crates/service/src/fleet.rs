//! Fleet-wide efficiency figures computed from stored truck readings.

use models::truck::{self, TruckStatus};
use serde::Serialize;
use uuid::Uuid;

/// Fuel percentage below which a truck is reported as low on fuel.
pub const LOW_FUEL_THRESHOLD: f64 = 25.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_trucks: usize,
    pub ready: usize,
    pub in_transit: usize,
    pub loading: usize,
    pub maintenance: usize,
    pub total_tolls_paid: f64,
    /// km
    pub total_distance: f64,
    /// litres
    pub total_fuel_consumed: f64,
    /// Total distance over total fuel, km/L. Absent until some fuel is logged.
    pub fleet_fuel_efficiency: Option<f64>,
    /// Mean of the per-truck `fuelEfficiency` readings that are set.
    pub average_fuel_efficiency: Option<f64>,
    pub low_fuel: Vec<Uuid>,
}

pub fn summarize(trucks: &[truck::Model]) -> FleetSummary {
    let mut s = FleetSummary { total_trucks: trucks.len(), ..Default::default() };
    let mut efficiency_sum = 0.0;
    let mut efficiency_count = 0usize;

    for t in trucks {
        match t.status {
            TruckStatus::Ready => s.ready += 1,
            TruckStatus::InTransit => s.in_transit += 1,
            TruckStatus::Loading => s.loading += 1,
            TruckStatus::Maintenance => s.maintenance += 1,
        }
        s.total_tolls_paid += t.tolls_paid;
        s.total_distance += t.total_distance.unwrap_or(0.0);
        s.total_fuel_consumed += t.fuel_consumed.unwrap_or(0.0);
        if let Some(e) = t.fuel_efficiency {
            efficiency_sum += e;
            efficiency_count += 1;
        }
        if t.fuel_level < LOW_FUEL_THRESHOLD {
            s.low_fuel.push(t.id);
        }
    }

    if s.total_fuel_consumed > 0.0 {
        s.fleet_fuel_efficiency = Some(s.total_distance / s.total_fuel_consumed);
    }
    if efficiency_count > 0 {
        s.average_fuel_efficiency = Some(efficiency_sum / efficiency_count as f64);
    }
    s
}
