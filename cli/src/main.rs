use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toner::{Costs, Estimate};

#[derive(Parser)]
#[command(name = "toner", version, about = "Estimate the toner cost of printing images")]
pub struct Options {
    /// Images to estimate
    #[arg(required = true, value_name = "IMAGE")]
    inputs: Vec<PathBuf>,

    /// JSON price list with cyan, magenta, yellow and black entries
    #[arg(long, short, value_name = "FILE")]
    costs: Option<PathBuf>,

    /// Price of full cyan coverage, overrides the price list
    #[arg(long, allow_negative_numbers = true)]
    cyan: Option<f64>,

    /// Price of full magenta coverage, overrides the price list
    #[arg(long, allow_negative_numbers = true)]
    magenta: Option<f64>,

    /// Price of full yellow coverage, overrides the price list
    #[arg(long, allow_negative_numbers = true)]
    yellow: Option<f64>,

    /// Price of full black coverage, overrides the price list
    #[arg(long, allow_negative_numbers = true)]
    black: Option<f64>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Default, Deserialize)]
struct PriceList {
    cyan: Option<f64>,
    magenta: Option<f64>,
    yellow: Option<f64>,
    black: Option<f64>,
}

#[derive(Serialize)]
struct Report<'a> {
    input: &'a Path,
    #[serde(flatten)]
    estimate: Estimate,
}

fn pick(flag: Option<f64>, listed: Option<f64>, channel: &str) -> Result<f64> {
    flag.or(listed)
        .ok_or_else(|| anyhow!("No {} cost given, use --{} or --costs", channel, channel))
}

fn resolve_costs(opt: &Options, list: PriceList) -> Result<Costs> {
    Ok(Costs::new(
        pick(opt.cyan, list.cyan, "cyan")?,
        pick(opt.magenta, list.magenta, "magenta")?,
        pick(opt.yellow, list.yellow, "yellow")?,
        pick(opt.black, list.black, "black")?,
    ))
}

fn read_price_list(path: &Path) -> Result<PriceList> {
    let fh = std::fs::File::open(path)
        .with_context(|| format!("Failed to open price list {}", path.display()))?;

    serde_json::from_reader(fh)
        .with_context(|| format!("Failed to parse price list {}", path.display()))
}

fn estimate(path: &Path, costs: &Costs) -> Result<Estimate> {
    let img = toner::load_image(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    toner::compute_cost(&img, costs)
        .with_context(|| format!("Failed to estimate {}", path.display()))
}

fn print_estimate(path: &Path, estimate: &Estimate) {
    println!("{}: total cost {}", path.display(), estimate.total_cost);

    for (channel, fraction) in toner::cost::CHANNELS
        .iter()
        .zip(estimate.usage.fractions().iter())
    {
        println!("  {:<8} {:>7.2}%", channel, fraction * 100.0);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let opt = Options::parse();

    let list = match &opt.costs {
        Some(path) => read_price_list(path)?,
        None => PriceList::default(),
    };

    let costs = resolve_costs(&opt, list)?;
    costs.validate()?;

    info!("Estimate {} image(s)", opt.inputs.len());
    let estimates = opt
        .inputs
        .par_iter()
        .map(|path| estimate(path, &costs))
        .collect::<Result<Vec<_>>>()?;

    if opt.json {
        let reports = opt
            .inputs
            .iter()
            .zip(estimates)
            .map(|(input, estimate)| Report {
                input: input.as_path(),
                estimate,
            })
            .collect::<Vec<_>>();

        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (path, estimate) in opt.inputs.iter().zip(estimates.iter()) {
            print_estimate(path, estimate);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_price_list() {
        let opt = Options::parse_from(["toner", "a.png", "--cyan", "2.5", "--black", "-1"]);
        let list: PriceList =
            serde_json::from_str(r#"{"cyan": 1, "magenta": 2, "yellow": 3}"#).unwrap();

        assert_eq!(
            resolve_costs(&opt, list).unwrap(),
            Costs::new(2.5, 2.0, 3.0, -1.0)
        );
    }

    #[test]
    fn every_channel_needs_a_price() {
        let opt = Options::parse_from(["toner", "a.png", "--cyan", "1", "--magenta", "1"]);
        let err = resolve_costs(&opt, PriceList::default()).unwrap_err();

        assert!(err.to_string().contains("yellow"));
    }
}
