use crate::error::{Error, Result};
use crate::usage::Usage;
use serde::{Deserialize, Serialize};

pub const CHANNELS: [&str; 4] = ["cyan", "magenta", "yellow", "black"];

/// Price of full coverage for each toner channel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Costs {
    pub cyan: f64,
    pub magenta: f64,
    pub yellow: f64,
    pub black: f64,
}

impl Costs {
    pub fn new(cyan: f64, magenta: f64, yellow: f64, black: f64) -> Self {
        Costs {
            cyan,
            magenta,
            yellow,
            black,
        }
    }

    pub fn values(&self) -> [f64; 4] {
        [self.cyan, self.magenta, self.yellow, self.black]
    }

    /// Fails on the first channel whose price is NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        for (&channel, &value) in CHANNELS.iter().zip(self.values().iter()) {
            if !value.is_finite() {
                return Err(Error::InvalidCostValue { channel, value });
            }
        }

        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub total_cost: f64,
    pub usage: Usage,
}

pub fn estimate(usage: Usage, costs: &Costs) -> Result<Estimate> {
    costs.validate()?;

    let total_cost = usage
        .fractions()
        .iter()
        .zip(costs.values().iter())
        .map(|(fraction, cost)| fraction * cost)
        .sum();

    Ok(Estimate { total_cost, usage })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(cyan: f64, magenta: f64, yellow: f64, black: f64) -> Usage {
        Usage {
            cyan,
            magenta,
            yellow,
            black,
        }
    }

    #[test]
    fn dot_product() {
        let result = estimate(usage(0.0, 0.5, 0.5, 0.5), &Costs::new(1.0, 2.0, 3.0, 4.0)).unwrap();

        assert_eq!(result.total_cost, 4.5);
        assert_eq!(result.usage, usage(0.0, 0.5, 0.5, 0.5));
    }

    fn scale(costs: &Costs, factor: f64) -> Costs {
        Costs::new(
            costs.cyan * factor,
            costs.magenta * factor,
            costs.yellow * factor,
            costs.black * factor,
        )
    }

    #[test]
    fn linear_in_costs() {
        let fractions = usage(0.13, 0.57, 0.01, 0.99);
        let costs = Costs::new(12.3, 0.7, 45.0, 3.14);
        let base = estimate(fractions, &costs).unwrap().total_cost;

        for &k in &[0.0, -1.0, 0.5, 3.0, 1e6] {
            let scaled = estimate(fractions, &scale(&costs, k)).unwrap().total_cost;

            assert!((scaled - k * base).abs() <= 1e-9 * (1.0 + (k * base).abs()));
        }
    }

    #[test]
    fn negative_costs_are_accepted() {
        let result = estimate(usage(1.0, 0.0, 0.0, 0.25), &Costs::new(-2.0, 9.0, 9.0, -4.0));

        assert_eq!(result.unwrap().total_cost, -3.0);
    }

    #[test]
    fn non_finite_costs_are_rejected() {
        let fractions = usage(0.1, 0.2, 0.3, 0.4);

        assert!(matches!(
            estimate(fractions, &Costs::new(1.0, f64::NAN, 1.0, 1.0)),
            Err(Error::InvalidCostValue {
                channel: "magenta",
                ..
            })
        ));
        assert!(matches!(
            estimate(fractions, &Costs::new(1.0, 1.0, 1.0, f64::NEG_INFINITY)),
            Err(Error::InvalidCostValue {
                channel: "black",
                ..
            })
        ));
    }

    #[test]
    fn costs_from_json() {
        let costs: Costs =
            serde_json::from_str(r#"{"cyan": 1.5, "magenta": 2, "yellow": 0.25, "black": 10}"#)
                .unwrap();

        assert_eq!(costs, Costs::new(1.5, 2.0, 0.25, 10.0));
    }
}
