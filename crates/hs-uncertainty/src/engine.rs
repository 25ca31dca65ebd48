//! Monte Carlo runs and percentile summaries.

use hs_load::{LoadModel, LoadResult};
use hs_project::BuildingRecord;
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;

use crate::perturb::{PerturbationProfile, PerturbedRecords};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonteCarloSample {
    pub t_design_c: f64,
    pub q_design_w: f64,
    pub q_min_w: f64,
    pub q_max_w: f64,
    pub e_year_kwh: f64,
}

impl From<&LoadResult> for MonteCarloSample {
    fn from(result: &LoadResult) -> Self {
        Self {
            t_design_c: result.t_design_c,
            q_design_w: result.q_design_w,
            q_min_w: result.q_min_w,
            q_max_w: result.q_max_w,
            e_year_kwh: result.e_year_kwh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonteCarloSummary {
    /// Samples sorted by design load.
    pub samples: Vec<MonteCarloSample>,
    pub p10: MonteCarloSample,
    pub p50: MonteCarloSample,
    pub p90: MonteCarloSample,
    pub mean_q_w: f64,
    pub std_q_w: f64,
    pub energy_p10_kwh: f64,
    pub energy_p50_kwh: f64,
    pub energy_p90_kwh: f64,
}

/// Index of the `p` quantile in `n` sorted values: `floor(p·n)`, capped at `n − 1`.
pub fn percentile_index(p: f64, n: usize) -> usize {
    let n = n.max(1);
    ((p * n as f64).floor() as usize).min(n - 1)
}

impl MonteCarloSummary {
    /// `samples` must not be empty.
    fn from_samples(mut samples: Vec<MonteCarloSample>) -> Self {
        samples.sort_by(|a, b| a.q_design_w.total_cmp(&b.q_design_w));
        let n = samples.len();
        let at = |p: f64| samples[percentile_index(p, n)];

        let mean_q_w = samples.iter().map(|s| s.q_design_w).sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples
                .iter()
                .map(|s| (s.q_design_w - mean_q_w).powi(2))
                .sum::<f64>()
                / (n - 1) as f64
        } else {
            0.0
        };

        let mut energy: Vec<f64> = samples.iter().map(|s| s.e_year_kwh).collect();
        energy.sort_by(f64::total_cmp);
        let energy_at = |p: f64| energy[percentile_index(p, n)];

        Self {
            p10: at(0.10),
            p50: at(0.50),
            p90: at(0.90),
            mean_q_w,
            std_q_w: variance.sqrt(),
            energy_p10_kwh: energy_at(0.10),
            energy_p50_kwh: energy_at(0.50),
            energy_p90_kwh: energy_at(0.90),
            samples,
        }
    }
}

/// Monte Carlo engine over a load model.
#[derive(Debug, Clone)]
pub struct MonteCarlo<'m> {
    model: &'m LoadModel,
    profile: PerturbationProfile,
}

impl<'m> MonteCarlo<'m> {
    pub fn new(model: &'m LoadModel, profile: PerturbationProfile) -> Self {
        Self { model, profile }
    }

    pub fn profile(&self) -> &PerturbationProfile {
        &self.profile
    }

    /// Perturbed copies of `record`, drawn from `rng` in sequence.
    pub fn perturbed_records<'a, R: Rng + ?Sized>(
        &'a self,
        record: &'a BuildingRecord,
        rng: &'a mut R,
    ) -> PerturbedRecords<'a, R> {
        PerturbedRecords::new(self.model, record, &self.profile, rng)
    }

    /// Run `sample_count` samples (at least one).
    ///
    /// Records are drawn sequentially so the outcome depends only on the
    /// generator state; the load evaluations run in parallel.
    pub fn run<R: Rng + ?Sized>(
        &self,
        record: &BuildingRecord,
        sample_count: usize,
        rng: &mut R,
    ) -> MonteCarloSummary {
        let sample_count = sample_count.max(1);
        let records: Vec<BuildingRecord> = self
            .perturbed_records(record, rng)
            .take(sample_count)
            .collect();

        let samples: Vec<MonteCarloSample> = records
            .par_iter()
            .map(|r| MonteCarloSample::from(&self.model.compute(r)))
            .collect();

        let summary = MonteCarloSummary::from_samples(samples);
        tracing::info!(
            samples = sample_count,
            p10_w = summary.p10.q_design_w,
            p50_w = summary.p50.q_design_w,
            p90_w = summary.p90.q_design_w,
            "monte carlo finished"
        );
        summary
    }
}

/// Run with the default model and perturbation profile.
pub fn run_monte_carlo<R: Rng + ?Sized>(
    record: &BuildingRecord,
    sample_count: usize,
    rng: &mut R,
) -> MonteCarloSummary {
    let model = LoadModel::default();
    MonteCarlo::new(&model, PerturbationProfile::default()).run(record, sample_count, rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(q: f64) -> MonteCarloSample {
        MonteCarloSample {
            t_design_c: -26.0,
            q_design_w: q,
            q_min_w: q,
            q_max_w: q,
            e_year_kwh: q / 10.0,
        }
    }

    #[test]
    fn percentile_indices() {
        assert_eq!(percentile_index(0.10, 100), 10);
        assert_eq!(percentile_index(0.50, 5), 2);
        assert_eq!(percentile_index(0.90, 5), 4);
        assert_eq!(percentile_index(0.90, 1), 0);
        assert_eq!(percentile_index(1.0, 10), 9);
    }

    #[test]
    fn summary_sorts_and_picks() {
        let samples = (0..10).rev().map(|i| sample(f64::from(i))).collect();
        let summary = MonteCarloSummary::from_samples(samples);
        assert_eq!(summary.samples[0].q_design_w, 0.0);
        assert_eq!(summary.p10.q_design_w, 1.0);
        assert_eq!(summary.p50.q_design_w, 5.0);
        assert_eq!(summary.p90.q_design_w, 9.0);
        assert_eq!(summary.mean_q_w, 4.5);
        assert_eq!(summary.energy_p50_kwh, 0.5);
    }

    #[test]
    fn single_sample_has_zero_spread() {
        let summary = MonteCarloSummary::from_samples(vec![sample(3.0)]);
        assert_eq!(summary.std_q_w, 0.0);
        assert_eq!(summary.p10, summary.p90);
    }
}
