//! Running shoe type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recording::types::ValidationError;
use crate::workouts::types::new_id;

/// Retirement threshold for a new shoe (km).
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 800.0;

/// A pair of running shoes and its accumulated mileage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shoe {
    /// Unique identifier
    pub id: String,
    /// Manufacturer
    #[serde(default)]
    pub brand: String,
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Photo as a data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Cumulative km, increased by every saved run wearing this shoe
    #[serde(default)]
    pub distance: f64,
    /// Retirement threshold (km)
    #[serde(default)]
    pub max_distance: f64,
    /// Whether the shoe is still in rotation
    #[serde(default)]
    pub is_active: bool,
    /// When the shoe was bought
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub purchase_date: DateTime<Utc>,
}

impl Shoe {
    /// Create an active shoe with no mileage.
    pub fn new(brand: &str, model: &str, max_distance: f64, purchase_date: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            brand: brand.to_string(),
            model: model.to_string(),
            image: None,
            distance: 0.0,
            max_distance,
            is_active: true,
            purchase_date,
        }
    }

    /// Brand and model are required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.brand.trim().is_empty() {
            return Err(ValidationError::MissingBrand);
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingModel);
        }
        Ok(())
    }

    /// Add the distance of a run.
    pub fn add_distance(&mut self, km: f64) {
        if km.is_finite() {
            self.distance += km;
        }
    }

    /// Mileage as a share of the retirement threshold, capped at 100.
    pub fn wear_percent(&self) -> f64 {
        if self.max_distance <= 0.0 {
            return 100.0;
        }
        (self.distance / self.max_distance * 100.0).min(100.0)
    }

    /// Whether the shoe has passed its retirement threshold.
    pub fn is_worn_out(&self) -> bool {
        self.distance > self.max_distance
    }

    /// Remaining km before retirement.
    pub fn remaining_km(&self) -> f64 {
        (self.max_distance - self.distance).max(0.0)
    }

    /// "Brand Model"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }
}
