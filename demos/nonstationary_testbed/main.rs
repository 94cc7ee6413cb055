use std::{error::Error, fs, path::Path};

use drift_bandit::{stats::Curves, Comparison, Testbed, TestbedConfig};
use log::info;

const OUT_DIR: &str = "demos/nonstationary_testbed/out";

fn avg_reward(curves: &Curves) -> &[f64] {
    &curves.avg_reward
}

fn optimal_pct(curves: &Curves) -> &[f64] {
    &curves.optimal_pct
}

fn switch_pct(curves: &Curves) -> &[f64] {
    &curves.switch_pct
}

/// Write one metric for one epsilon as `step,<label>,<label>...`
fn write_metric(
    path: &Path,
    warmup: usize,
    group: &[&Comparison],
    series: fn(&Curves) -> &[f64],
) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["step".to_string()];
    header.extend(group.iter().map(|c| c.label()));
    wtr.write_record(&header)?;

    let len = group.first().map_or(0, |c| c.curves.len());
    for i in 0..len {
        let mut record = vec![(warmup + i).to_string()];
        record.extend(group.iter().map(|c| series(&c.curves)[i].to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let testbed = Testbed::new(TestbedConfig::default())?;
    let config = testbed.config();
    info!(
        "Sigma walk: {}, runs: {}, steps: {}, seed: {}",
        config.sigma_walk,
        config.runs,
        config.time_steps,
        testbed.seed()
    );

    let results = testbed.sweep();

    let out = Path::new(OUT_DIR);
    fs::create_dir_all(out)?;

    let metrics: [(&str, fn(&Curves) -> &[f64]); 3] = [
        ("avg_reward", avg_reward),
        ("optimal_pct", optimal_pct),
        ("switch_pct", switch_pct),
    ];

    for &epsilon in &config.epsilons {
        let group = results
            .iter()
            .filter(|c| c.epsilon == epsilon)
            .collect::<Vec<_>>();
        for (name, series) in metrics {
            let path = out.join(format!("eps_{epsilon}_{name}.csv"));
            write_metric(&path, config.warmup, &group, series)?;
            info!("Wrote {}", path.display());
        }
    }

    Ok(())
}
