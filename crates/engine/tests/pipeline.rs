use clientrank_engine::normalize::DISPLAY_COLUMNS;
use clientrank_engine::scoring::ranks;
use clientrank_engine::tier::DEFAULT_BOUNDARY_OFFSET;
use clientrank_engine::{
    normalize, score, Cell, ClientRecord, CurrentStatus, NormalizationError, RawTable, ScoringError,
    Session, Tier, TierBreaks, WeightVector,
};

fn header(labels: &[&str]) -> Vec<Cell> {
    labels.iter().map(|l| Cell::text(*l)).collect()
}

fn text_row(name: &str, current: &str, axes: [&str; 5]) -> Vec<Cell> {
    let mut cells = vec![Cell::text(name), Cell::text(current)];
    cells.extend(axes.iter().map(|a| Cell::text(*a)));
    cells
}

fn record(name: &str, current: &str, axes: [f64; 5]) -> ClientRecord {
    let [current_work, future_work, difficulty, profitability, ease_to_distribute] = axes;
    ClientRecord {
        name: name.into(),
        current_client: CurrentStatus::parse(current),
        current_work,
        future_work,
        difficulty,
        profitability,
        ease_to_distribute,
    }
}

/// Record whose weighted score equals `value` under any weights.
fn flat(name: &str, value: f64) -> ClientRecord {
    record(name, "Y", [value; 5])
}

fn sample_records() -> Vec<ClientRecord> {
    vec![
        record("Acme", "Y", [90.0, 85.0, 70.0, 80.0, 60.0]),
        record("Birch", "N", [20.0, 60.0, 40.0, 30.0, 90.0]),
        record("Cobalt", "Y", [55.0, 50.0, 65.0, 45.0, 20.0]),
        record("Dune", "N", [10.0, 15.0, 20.0, 10.0, 5.0]),
        record("Ember", "Former", [70.0, 75.0, 30.0, 85.0, 40.0]),
        record("Fjord", "Y", [35.0, 30.0, 90.0, 25.0, 70.0]),
        record("Garnet", "N", [65.0, 90.0, 55.0, 70.0, 35.0]),
    ]
}

// -------------------------------------------------------------------------
// Normalization
// -------------------------------------------------------------------------

#[test]
fn client_header_spellings_normalize_identically() {
    let mut outputs = Vec::new();
    for client_label in ["CLIENT", " client ", "Client"] {
        let mut labels = DISPLAY_COLUMNS.to_vec();
        labels[0] = client_label;
        let table = RawTable::from_delimited(vec![
            header(&labels),
            text_row("Acme", "Y", ["1", "2", "3", "4", "5"]),
        ]);
        outputs.push(normalize(&table).unwrap().records);
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);
}

#[test]
fn missing_profitability_is_the_only_missing_column() {
    let labels: Vec<&str> = DISPLAY_COLUMNS
        .iter()
        .copied()
        .filter(|l| *l != "Profitability")
        .collect();
    let table = RawTable::from_delimited(vec![header(&labels)]);
    assert_eq!(
        normalize(&table).unwrap_err(),
        NormalizationError::MissingColumns {
            missing: vec!["profitability".to_string()],
            found: labels.iter().map(|l| l.to_string()).collect(),
        }
    );
}

#[test]
fn spreadsheet_with_weight_row_normalizes_and_scores() {
    let mut grid = vec![
        vec![
            Cell::Empty,
            Cell::Empty,
            Cell::Number(30.0),
            Cell::Number(25.0),
            Cell::Number(15.0),
            Cell::Number(25.0),
            Cell::Number(5.0),
        ],
        header(&DISPLAY_COLUMNS),
    ];
    for (i, value) in [12.0, 34.0, 56.0, 78.0, 90.0].iter().enumerate() {
        let mut row = vec![Cell::text(format!("client {i}")), Cell::text("Y")];
        row.extend(std::iter::repeat(Cell::Number(*value)).take(5));
        grid.push(row);
    }

    let table = normalize(&RawTable::from_spreadsheet(grid)).unwrap();
    assert_eq!(table.row_count, 5);
    assert_eq!(table.embedded_weights, Some(WeightVector::default()));

    let result = Session::new(table).recompute().unwrap();
    assert_eq!(result.clients[0].name(), "client 4");
}

// -------------------------------------------------------------------------
// Scoring
// -------------------------------------------------------------------------

#[test]
fn scaled_weights_give_identical_scores_and_tiers() {
    let records = sample_records();
    let base = score(&records, &WeightVector::new(30.0, 25.0, 15.0, 25.0, 5.0)).unwrap();
    let doubled = score(&records, &WeightVector::new(60.0, 50.0, 30.0, 50.0, 10.0)).unwrap();

    assert_eq!(base.clients.len(), doubled.clients.len());
    for (a, b) in base.clients.iter().zip(&doubled.clients) {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.score, b.score);
        assert_eq!(a.tier, b.tier);
    }
    assert_eq!(base.weights, doubled.weights);
}

#[test]
fn ranks_are_descending_and_stable() {
    assert_eq!(ranks(&[10.0, 30.0, 30.0, 5.0]), vec![3, 1, 2, 4]);

    let records = vec![flat("a", 10.0), flat("b", 30.0), flat("c", 30.0), flat("d", 5.0), flat("e", 1.0)];
    let result = score(&records, &WeightVector::default()).unwrap();
    let names: Vec<&str> = result.clients.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["b", "c", "a", "d", "e"]);
    let ranks: Vec<usize> = result.clients.iter().map(|c| c.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
}

#[test]
fn higher_score_never_gets_a_worse_tier() {
    let result = score(&sample_records(), &WeightVector::default()).unwrap();
    for a in &result.clients {
        for b in &result.clients {
            if a.score > b.score {
                assert!(a.tier <= b.tier, "{} ({}) vs {} ({})", a.name(), a.score, b.name(), b.score);
            }
        }
    }
}

#[test]
fn boundary_offset_applied_to_raw_breaks() {
    let breaks = TierBreaks::from_raw([10.0, 20.0, 30.0], DEFAULT_BOUNDARY_OFFSET);
    let expected = [10.075, 20.075, 30.075];
    for (got, want) in breaks.effective.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }

    let result = score(&sample_records(), &WeightVector::default()).unwrap();
    for (raw, effective) in result.breaks.raw.iter().zip(result.breaks.effective) {
        assert!((effective - raw - 0.075).abs() < 1e-9);
    }
}

#[test]
fn three_records_is_insufficient() {
    let records = vec![flat("a", 1.0), flat("b", 2.0), flat("c", 4.0)];
    assert!(matches!(
        score(&records, &WeightVector::default()),
        Err(ScoringError::InsufficientData { records: 3, .. })
    ));
}

#[test]
fn four_identical_scores_are_insufficient() {
    let records = vec![flat("a", 7.0), flat("b", 7.0), flat("c", 7.0), flat("d", 7.0)];
    assert_eq!(
        score(&records, &WeightVector::default()).unwrap_err(),
        ScoringError::InsufficientData { records: 4, distinct_scores: 1 }
    );
}

#[test]
fn four_records_three_distinct_scores_is_insufficient() {
    let records = vec![flat("a", 1.0), flat("b", 2.0), flat("c", 2.0), flat("d", 4.0)];
    assert_eq!(
        score(&records, &WeightVector::default()).unwrap_err(),
        ScoringError::InsufficientData { records: 4, distinct_scores: 3 }
    );

    // One more distinct value is enough.
    let records = vec![flat("a", 1.0), flat("b", 2.0), flat("c", 4.0), flat("d", 8.0)];
    let result = score(&records, &WeightVector::default()).unwrap();
    assert!(result.tiers.iter().all(|t| t.count == 1));
}

#[test]
fn zero_weights_rejected_single_axis_accepted() {
    let records = sample_records();
    assert_eq!(
        score(&records, &WeightVector::from_array([0.0; 5])).unwrap_err(),
        ScoringError::ZeroWeight
    );

    let result = score(&records, &WeightVector::new(0.0, 0.0, 0.0, 0.0, 1.0)).unwrap();
    for client in &result.clients {
        assert_eq!(client.score, client.record.ease_to_distribute);
    }
}

#[test]
fn six_clients_split_into_four_non_empty_tiers() {
    let records: Vec<ClientRecord> = [90.0, 80.0, 60.0, 40.0, 20.0, 10.0]
        .iter()
        .enumerate()
        .map(|(i, v)| flat(&format!("client {i}"), *v))
        .collect();
    let result = score(&records, &WeightVector::default()).unwrap();

    assert!(result.breaks.effective.windows(2).all(|w| w[0] <= w[1]));
    assert!(result.tiers.iter().all(|t| t.count > 0));
    assert_eq!(result.tiers.iter().map(|t| t.count).sum::<usize>(), 6);

    let elite_min = result.tier_summary(Tier::Elite).min.unwrap();
    let priority_max = result.tier_summary(Tier::Priority).max.unwrap();
    assert!(elite_min > priority_max);
}

#[test]
fn status_split_and_descriptions() {
    let result = score(&sample_records(), &WeightVector::default()).unwrap();
    assert_eq!(result.status_split.current.count, 3);
    // "N" and the garbled "Former" both count as non-current.
    assert_eq!(result.status_split.non_current.count, 4);

    let lines = result.boundary_descriptions(2);
    assert!(lines[0].starts_with("Elite: >= "));
    assert!(lines[3].starts_with("Maintenance: < "));
}

#[test]
fn result_serializes_to_json() {
    let result = score(&sample_records(), &WeightVector::default()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["clients"][0]["rank"], 1);
    assert!(json["clients"][0]["name"].is_string());
    assert_eq!(json["tiers"].as_array().unwrap().len(), 4);
    assert_eq!(json["tiers"][0]["tier"], "elite");
    assert!(json["clients"][0]["current_client"].is_string());
}
