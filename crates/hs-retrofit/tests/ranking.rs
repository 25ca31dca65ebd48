use hs_load::{LoadModel, Payback};
use hs_project::BuildingRecord;
use hs_retrofit::{TOP_N, evaluate_all, evaluate_improvements, improvement_catalog};

fn apartment_block() -> BuildingRecord {
    BuildingRecord {
        area: Some(450.0.into()),
        floors: Some(9_u32.into()),
        height: Some(2.7.into()),
        wall_description: Some("кирпич 380мм + минвата 100мм".to_string()),
        city: Some("Москва".to_string()),
        indoor_temp: Some(22.0.into()),
        window_area: Some(45.0.into()),
        window_type: Some("double-glazed".to_string()),
        ..Default::default()
    }
}

#[test]
fn ranked_list_is_short_and_sorted() {
    let ranked = evaluate_improvements(&apartment_block());

    assert!(!ranked.is_empty());
    assert!(ranked.len() <= TOP_N);
    let years: Vec<f64> = ranked.iter().filter_map(|c| c.payback.years()).collect();
    assert_eq!(years.len(), ranked.len());
    assert!(years.windows(2).all(|w| w[0] <= w[1]));
    assert!(ranked.iter().all(|c| c.saving_kwh > 0.0));
}

#[test]
fn extra_wall_insulation_pays_back() {
    let all = evaluate_all(&LoadModel::default(), &apartment_block());
    let wall = all.iter().find(|c| c.key == "wall_mw_100").unwrap();

    assert!(wall.saving_kwh > 0.0);
    assert!(wall.delta_q_w > 0.0);
    assert!(wall.payback.is_finite());
    assert!(wall.power_payback.is_finite());
}

#[test]
fn night_setback_is_free_and_first() {
    let ranked = evaluate_improvements(&apartment_block());
    assert_eq!(ranked[0].key, "night_setback");
    assert_eq!(ranked[0].payback, Payback::Years(0.0));
    assert_eq!(ranked[0].delta_q_w, 0.0);
}

#[test]
fn measure_already_in_place_saves_nothing() {
    let record = BuildingRecord {
        window_type: Some("std_3ch".to_string()),
        night_setback: true,
        ..apartment_block()
    };
    let all = evaluate_all(&LoadModel::default(), &record);
    assert_eq!(all.len(), improvement_catalog().len());

    for key in ["windows_triple", "night_setback"] {
        let candidate = all.iter().find(|c| c.key == key).unwrap();
        assert_eq!(candidate.saving_kwh, 0.0);
        assert_eq!(candidate.payback, Payback::Unbounded);
    }

    let ranked = evaluate_improvements(&record);
    assert!(ranked.iter().all(|c| c.key != "windows_triple" && c.key != "night_setback"));
}

#[test]
fn candidates_serialize() {
    let ranked = evaluate_improvements(&apartment_block());
    let json = serde_json::to_value(&ranked).unwrap();
    assert_eq!(json[0]["payback"]["years"], 0.0);
}
