//! Summary statistics over a set of observations
//!
//! Per-field count, sum, mean, minimum and maximum. Missing measurements are
//! left out of every aggregate.

use crate::observation::Observation;
use crate::series::FIELD_COUNT;

/// Aggregates for one measurement field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSummary {
    pub name: &'static str,
    /// Number of present (non-missing) values
    pub count: usize,
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FieldSummary {
    fn empty(name: &'static str) -> Self {
        Self {
            name,
            count: 0,
            sum: 0.0,
            min: None,
            max: None,
        }
    }

    fn record(&mut self, value: f64) {
        if Observation::is_missing(value) {
            return;
        }
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Aggregates for every measurement field, in file column order
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Observations folded in
    pub rows: usize,
    pub fields: [FieldSummary; FIELD_COUNT],
}

impl Summary {
    pub fn from_observations<'a, I>(observations: I) -> Self
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut summary = Self {
            rows: 0,
            fields: Observation::FIELD_NAMES.map(FieldSummary::empty),
        };

        for observation in observations {
            summary.rows += 1;
            for (field, value) in summary.fields.iter_mut().zip(observation.values()) {
                field.record(value);
            }
        }

        summary
    }

    /// Aggregates for a named field
    pub fn field(&self, name: &str) -> Option<&FieldSummary> {
        self.fields.iter().find(|field| field.name == name)
    }
}
