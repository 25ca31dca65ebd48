use hs_load::{LoadModel, compute_load};
use hs_project::BuildingRecord;
use hs_uncertainty::{
    MonteCarlo, PerturbationProfile, multiplicative_factor, run_monte_carlo, standard_normal,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn apartment_block() -> BuildingRecord {
    BuildingRecord {
        area: Some(450.0.into()),
        floors: Some(9_u32.into()),
        height: Some(2.7.into()),
        wall_description: Some("кирпич 380мм + минвата 100мм".to_string()),
        city: Some("Москва".to_string()),
        indoor_temp: Some(22.0.into()),
        window_area: Some(45.0.into()),
        window_type: Some("std_2ch".to_string()),
        ..Default::default()
    }
}

#[test]
fn percentiles_are_ordered() {
    let mut rng = StdRng::seed_from_u64(42);
    let summary = run_monte_carlo(&apartment_block(), 300, &mut rng);

    assert_eq!(summary.samples.len(), 300);
    assert!(summary.p10.q_design_w <= summary.p50.q_design_w);
    assert!(summary.p50.q_design_w <= summary.p90.q_design_w);
    assert!(summary.p10.q_design_w < summary.p90.q_design_w);
    assert!(summary.energy_p10_kwh <= summary.energy_p90_kwh);
    assert!(summary.std_q_w > 0.0);
}

#[test]
fn median_converges_to_single_shot() {
    let record = apartment_block();
    let single = compute_load(&record).q_design_w;

    let mut rng = StdRng::seed_from_u64(2024);
    let summary = run_monte_carlo(&record, 2000, &mut rng);

    let relative = (summary.p50.q_design_w - single).abs() / single;
    assert!(relative < 0.03, "p50 off by {:.2}%", relative * 100.0);
    assert!(((summary.mean_q_w - single) / single).abs() < 0.05);
}

#[test]
fn same_seed_same_summary() {
    let record = apartment_block();
    let a = run_monte_carlo(&record, 200, &mut StdRng::seed_from_u64(9));
    let b = run_monte_carlo(&record, 200, &mut StdRng::seed_from_u64(9));
    assert_eq!(a, b);
}

#[test]
fn zero_samples_runs_once() {
    let mut rng = StdRng::seed_from_u64(1);
    let summary = run_monte_carlo(&BuildingRecord::default(), 0, &mut rng);
    assert_eq!(summary.samples.len(), 1);
    assert_eq!(summary.p10, summary.p90);
}

#[test]
fn custom_profile_without_noise_is_degenerate() {
    let model = LoadModel::default();
    let profile = PerturbationProfile {
        area: 0.0,
        height: 0.0,
        floors: 0.0,
        window_area: 0.0,
        infiltration: 0.0,
        wind: 0.0,
        band_k: 0.0,
        indoor_temp_k: 0.0,
        ..PerturbationProfile::default()
    };
    let mut rng = StdRng::seed_from_u64(77);
    let summary = MonteCarlo::new(&model, profile).run(&apartment_block(), 50, &mut rng);

    let spread = summary.p90.q_design_w - summary.p10.q_design_w;
    assert!(spread.abs() < 1e-6);
    assert!(summary.std_q_w < 1e-6);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn percentiles_ordered_for_any_seed(seed in any::<u64>(), samples in 1usize..64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let summary = run_monte_carlo(&apartment_block(), samples, &mut rng);

        prop_assert_eq!(summary.samples.len(), samples);
        prop_assert!(summary.p10.q_design_w <= summary.p50.q_design_w);
        prop_assert!(summary.p50.q_design_w <= summary.p90.q_design_w);
        prop_assert!(summary.energy_p10_kwh <= summary.energy_p50_kwh);
        prop_assert!(summary.energy_p50_kwh <= summary.energy_p90_kwh);
        prop_assert!(summary.std_q_w.is_finite() && summary.std_q_w >= 0.0);
    }

    #[test]
    fn box_muller_is_standard_normal_for_any_seed(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = 10_000;
        let draws: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

        prop_assert!(draws.iter().all(|x| x.is_finite()));
        prop_assert!(mean.abs() < 0.06, "mean {}", mean);
        prop_assert!((var - 1.0).abs() < 0.1, "variance {}", var);
    }

    #[test]
    fn factors_never_fall_below_floor(
        seed in any::<u64>(),
        sigma in 0.0f64..5.0,
        floor in 0.0f64..1.0,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..100 {
            prop_assert!(multiplicative_factor(&mut rng, sigma, floor) >= floor);
        }
    }
}
