use crate::types::{MACrossoverSettings, PairCorrelationSettings, VolRatioSettings, ZScoreSettings};
use crate::{
    SignalRule, ma_crossover::MACrossover, pair_correlation::PairCorrelation, vol_ratio::VolRatio,
    zscore::ZScore,
};
use anyhow::{Context, Result};
use core_types::{PriceSeries, StrategyConfig};

/// Builds every configured signal rule.
///
/// `benchmark` is only needed by `pair_correlation`; asking for that rule
/// without a benchmark series is a configuration error.
pub fn create_rules(
    rule_configs: &[StrategyConfig],
    benchmark: Option<&PriceSeries>,
) -> Result<Vec<Box<dyn SignalRule + Send + Sync>>> {
    let mut active_rules = Vec::new();

    for rule_config in rule_configs {
        let rule_instance: Box<dyn SignalRule + Send + Sync> = match rule_config.name.as_str() {
            "ma_crossover" => {
                let settings: MACrossoverSettings = parse_params(rule_config)?;
                Box::new(MACrossover::new(settings)?)
            }
            "vol_ratio" => {
                let settings: VolRatioSettings = parse_params(rule_config)?;
                Box::new(VolRatio::new(settings)?)
            }
            "zscore" => {
                let settings: ZScoreSettings = parse_params(rule_config)?;
                Box::new(ZScore::new(settings)?)
            }
            "pair_correlation" => {
                let settings: PairCorrelationSettings = parse_params(rule_config)?;
                let benchmark = benchmark
                    .context("pair_correlation needs a benchmark price series")?
                    .clone();
                Box::new(PairCorrelation::new(settings, benchmark)?)
            }
            unknown => anyhow::bail!("Attempted to create unknown signal rule: {}", unknown),
        };
        tracing::debug!(rule = rule_instance.name(), "Created signal rule.");
        active_rules.push(rule_instance);
    }

    Ok(active_rules)
}

fn parse_params<T: serde::de::DeserializeOwned>(rule_config: &StrategyConfig) -> Result<T> {
    rule_config
        .params
        .clone()
        .try_into()
        .with_context(|| format!("Invalid params for signal rule '{}'", rule_config.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(source: &str) -> StrategyConfig {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn builds_rules_from_toml_params() {
        let configs = vec![
            config("name = \"ma_crossover\"\nparams = { fast_period = 20, slow_period = 50 }"),
            config("name = \"zscore\"\nparams = { window = 20, entry = 2.0 }"),
        ];
        let rules = create_rules(&configs, None).unwrap();
        let names: Vec<_> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["ma_crossover", "zscore"]);
    }

    #[test]
    fn pair_correlation_requires_benchmark() {
        let configs = vec![config(
            "name = \"pair_correlation\"\nparams = { window = 20, threshold = 0.6 }",
        )];
        assert!(create_rules(&configs, None).is_err());

        let benchmark = PriceSeries::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(create_rules(&configs, Some(&benchmark)).unwrap().len(), 1);
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let err = create_rules(&[config("name = \"astrology\"")], None).err().unwrap();
        assert!(err.to_string().contains("astrology"));
    }

    #[test]
    fn missing_params_are_reported() {
        let err = create_rules(&[config("name = \"vol_ratio\"\nparams = { short_window = 5 }")], None)
            .err()
            .unwrap();
        assert!(err.to_string().contains("vol_ratio"));
    }
}
