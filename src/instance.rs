//! Tour instance files.
//!
//! YAML-first: an instance bundles the city coordinates with the search
//! parameters, so an experiment can be re-run or tweaked without code.
//!
//! # Example YAML
//!
//! ```yaml
//! meta:
//!   id: "SQUARE-4"
//!   description: "Corners of a 10×10 square"
//!   units: "px"
//!   optimal_known: 40.0
//!
//! cities:
//!   - { x: 0.0, y: 0.0 }
//!   - { x: 10.0, y: 0.0 }
//!   - { x: 10.0, y: 10.0 }
//!   - { x: 0.0, y: 10.0 }
//!
//! search:
//!   mutation_mode: reverse
//!   seed: 42
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::SearchConfig;
use crate::error::{GaError, GaResult};
use crate::ga::distance::City;
use crate::search::SearchController;

/// Metadata about an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceMeta {
    /// Unique instance identifier.
    pub id: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Coordinate units (e.g. "px", "km").
    #[serde(default = "default_units")]
    pub units: String,
    /// Known optimal tour length, if any.
    #[serde(default)]
    pub optimal_known: Option<f64>,
}

fn default_units() -> String {
    "px".to_string()
}

impl Default for InstanceMeta {
    fn default() -> Self {
        Self {
            id: "TOUR-UNNAMED".to_string(),
            description: String::new(),
            units: default_units(),
            optimal_known: None,
        }
    }
}

/// Complete instance: metadata, cities, and search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TourInstance {
    /// Instance metadata.
    #[serde(default)]
    pub meta: InstanceMeta,
    /// Cities in placement order; city 0 anchors every tour.
    pub cities: Vec<City>,
    /// Search parameters.
    #[serde(default)]
    pub search: SearchConfig,
}

impl TourInstance {
    /// Parse an instance from YAML and validate it.
    ///
    /// # Errors
    ///
    /// Returns `YamlParse` if the YAML is malformed, or any error from
    /// [`Self::validate`].
    pub fn from_yaml(yaml: &str) -> GaResult<Self> {
        let instance: Self = serde_yaml::from_str(yaml)?;
        instance.validate()?;
        Ok(instance)
    }

    /// Load an instance from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or the instance is invalid.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> GaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> GaResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Number of cities.
    #[must_use]
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Check the instance can be searched.
    ///
    /// # Errors
    ///
    /// - configuration errors from the `search` section
    /// - `TooFewCities` for fewer than 2 cities
    /// - `CityLimitReached` above `search.max_cities`
    /// - `NonFiniteCoordinate` or `DuplicateCity` for bad points
    pub fn validate(&self) -> GaResult<()> {
        self.search.check()?;

        let n = self.cities.len();
        if n < 2 {
            return Err(GaError::TooFewCities {
                found: n,
                required: 2,
            });
        }
        if n > self.search.max_cities {
            return Err(GaError::CityLimitReached {
                limit: self.search.max_cities,
            });
        }

        for (index, city) in self.cities.iter().enumerate() {
            if !city.is_finite() {
                return Err(GaError::NonFiniteCoordinate { index });
            }
            if self.cities[..index].contains(city) {
                return Err(GaError::DuplicateCity {
                    x: city.x,
                    y: city.y,
                });
            }
        }

        Ok(())
    }

    /// Length of a tour given as a sequence of city indices.
    ///
    /// Includes the edge from the last city back to the first, so both
    /// open (`0 1 2 3`) and closed (`0 1 2 3 0`) forms give the same value.
    /// Returns `None` if an index is out of range.
    #[must_use]
    pub fn tour_length(&self, tour: &[usize]) -> Option<f64> {
        let (Some(&first), Some(&last)) = (tour.first(), tour.last()) else {
            return Some(0.0);
        };
        let point = |i: usize| self.cities.get(i);

        let mut total = point(last)?.distance_to(point(first)?);
        for w in tour.windows(2) {
            total += point(w[0])?.distance_to(point(w[1])?);
        }
        Some(total)
    }

    /// Relative gap between `length` and the known optimum.
    #[must_use]
    pub fn optimality_gap(&self, length: f64) -> Option<f64> {
        self.meta
            .optimal_known
            .filter(|&opt| opt > 0.0)
            .map(|opt| (length - opt) / opt)
    }

    /// Create a controller, place every city, and start searching.
    ///
    /// # Errors
    ///
    /// Returns the first validation or lifecycle error.
    pub fn start_search(&self) -> GaResult<SearchController> {
        self.start_search_with(self.search.clone())
    }

    /// Like [`Self::start_search`] with an overridden configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation or lifecycle error.
    pub fn start_search_with(&self, config: SearchConfig) -> GaResult<SearchController> {
        let mut controller = SearchController::new(config);
        controller.begin_building()?;
        for &city in &self.cities {
            controller.add_city(city)?;
        }
        controller.start()?;
        Ok(controller)
    }
}
