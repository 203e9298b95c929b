use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::SpecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    #[default]
    Diesel,
    Petrol,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelProperties {
    pub name: &'static str,
    /// MJ/kg
    pub specific_energy: f32,
    /// MJ/L
    pub energy_density: f32,
}

const FUEL_TABLE: [FuelProperties; 2] = [
    FuelProperties { name: "Diesel", specific_energy: 45.6, energy_density: 38.6 },
    FuelProperties { name: "Petrol", specific_energy: 46.4, energy_density: 34.3 },
];

impl FuelType {
    pub fn properties(self) -> &'static FuelProperties {
        match self {
            FuelType::Diesel => &FUEL_TABLE[0],
            FuelType::Petrol => &FUEL_TABLE[1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelTank {
    pub capacity: f32,
    pub remaining: f32,
}

impl FuelTank {
    pub fn full(capacity: f32) -> Self {
        Self { capacity, remaining: capacity }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelGrant {
    Granted,
    /// At least one tank could not cover its share. Nothing was withdrawn.
    Denied,
}

impl FuelGrant {
    pub fn is_granted(self) -> bool {
        matches!(self, FuelGrant::Granted)
    }
}

/// Anything an engine can draw fuel from.
pub trait FuelSource {
    fn request_fuel(&mut self, amount: f32) -> FuelGrant;
}

/// A vessel's fixed set of tanks. Withdrawals are split evenly across every
/// tank and either fully succeed or leave all tanks untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelSystem {
    tanks: Vec<FuelTank>,
}

impl FuelSystem {
    pub fn new(tanks: Vec<FuelTank>) -> Result<Self, SpecError> {
        if tanks.is_empty() {
            return Err(SpecError::NoFuelTanks);
        }
        for (index, tank) in tanks.iter().enumerate() {
            let valid = tank.capacity.is_finite()
                && tank.capacity >= 0.0
                && tank.remaining.is_finite()
                && (0.0..=tank.capacity).contains(&tank.remaining);
            if !valid {
                return Err(SpecError::InvalidTankCapacity { index, capacity: tank.capacity });
            }
        }
        Ok(Self { tanks })
    }

    /// `count` identical tanks, each filled to `capacity`.
    pub fn with_full_tanks(count: usize, capacity: f32) -> Result<Self, SpecError> {
        Self::new(vec![FuelTank::full(capacity); count])
    }

    pub fn tanks(&self) -> &[FuelTank] {
        &self.tanks
    }

    pub fn total_remaining(&self) -> f32 {
        self.tanks.iter().map(|t| t.remaining).sum()
    }

    /// Withdraw `amount` split evenly over all tanks. Every tank must hold
    /// strictly more than its share, otherwise nothing is debited.
    pub fn request_fuel(&mut self, amount: f32) -> FuelGrant {
        let share = amount / self.tanks.len() as f32;
        if !share.is_finite() || share < 0.0 {
            return FuelGrant::Denied;
        }
        if !self.tanks.iter().all(|t| t.remaining > share) {
            return FuelGrant::Denied;
        }
        for tank in &mut self.tanks {
            tank.remaining -= share;
        }
        FuelGrant::Granted
    }
}

impl FuelSource for FuelSystem {
    fn request_fuel(&mut self, amount: f32) -> FuelGrant {
        FuelSystem::request_fuel(self, amount)
    }
}

/// Tanks shared between several owners (e.g. engines stepped from different
/// threads). Each request runs under one lock, so the all-or-nothing debit
/// is never observed half-applied.
#[derive(Debug, Clone)]
pub struct SharedFuelSystem(Arc<Mutex<FuelSystem>>);

impl SharedFuelSystem {
    pub fn new(system: FuelSystem) -> Self {
        Self(Arc::new(Mutex::new(system)))
    }

    pub fn request_fuel(&self, amount: f32) -> FuelGrant {
        self.0.lock().request_fuel(amount)
    }

    pub fn snapshot(&self) -> FuelSystem {
        self.0.lock().clone()
    }
}

impl FuelSource for SharedFuelSystem {
    fn request_fuel(&mut self, amount: f32) -> FuelGrant {
        SharedFuelSystem::request_fuel(self, amount)
    }
}
