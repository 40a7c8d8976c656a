use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use order_fixtures::{run_batch, BatchConfig, Generator, GeneratorBuilder, Locale, OrderKind, Suite, Typeface};
use serde_json::Value;
use tempfile::TempDir;

fn clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 26)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .expect("valid clock")
}

fn generator(seed: u64) -> Generator {
    GeneratorBuilder::new()
        .with_seed(seed)
        .with_clock(clock())
        .with_typeface(Typeface::Blocks)
        .build()
}

fn read_record(path: &std::path::Path) -> Value {
    let text = fs::read_to_string(path).expect("read record");
    serde_json::from_str(&text).expect("record is valid JSON")
}

#[test]
fn retail_batch_writes_image_and_record_pairs() {
    let dir = TempDir::new().expect("temp dir");
    let config = BatchConfig::new(Suite::Retail, Locale::English)
        .with_output_dir(dir.path())
        .with_count(6);

    let written = run_batch(&mut generator(11), &config).expect("batch runs");
    assert_eq!(written.len(), 6);

    let kinds: Vec<OrderKind> = written.iter().map(|fixture| fixture.kind).collect();
    assert_eq!(
        kinds,
        [
            OrderKind::Simple,
            OrderKind::Detailed,
            OrderKind::Invoice,
            OrderKind::Condensed,
            OrderKind::Modern,
            OrderKind::Simple,
        ]
    );

    for fixture in &written {
        assert!(fixture.image_path.is_file(), "{} missing", fixture.image_path.display());
        let (width, height) = image::image_dimensions(&fixture.image_path).expect("png readable");
        assert!(width >= 700 && height >= 500);

        let record = read_record(&fixture.record_path);
        let object = record.as_object().expect("record is an object");
        assert!(
            object.values().any(|value| value == fixture.order_id.as_str()),
            "{} does not carry {}",
            fixture.record_path.display(),
            fixture.order_id
        );
    }

    assert!(dir.path().join("order_simple_ORD0001.png").is_file());
    assert!(dir.path().join("order_invoice_ORD0003.json").is_file());
    assert!(dir.path().join("order_simple_ORD0006.json").is_file());
}

#[test]
fn chinese_retail_files_carry_the_language_suffix() {
    let dir = TempDir::new().expect("temp dir");
    let config = BatchConfig::new(Suite::Retail, Locale::Chinese)
        .with_output_dir(dir.path())
        .with_count(2);

    run_batch(&mut generator(3), &config).expect("batch runs");

    assert!(dir.path().join("order_simple_zh_ORD0001.png").is_file());
    let record = read_record(&dir.path().join("order_detailed_zh_ORD0002.json"));
    let customer = record["customer_name"].as_str().expect("customer name");
    assert!(customer.starts_with("客户"), "unexpected customer {customer}");
}

#[test]
fn complex_batch_keeps_chinese_text_unescaped() {
    let dir = TempDir::new().expect("temp dir");
    let config = BatchConfig::new(Suite::Complex, Locale::Chinese)
        .with_output_dir(dir.path())
        .with_count(5);

    let written = run_batch(&mut generator(21), &config).expect("batch runs");
    let ids: Vec<&str> = written.iter().map(|fixture| fixture.order_id.as_str()).collect();
    assert_eq!(ids, ["CXORD0001", "CXORD0002", "CXORD0003", "CXORD0004", "CXORD0005"]);

    let ecommerce = dir.path().join("complex_order_ecommerce_CXORD0001.json");
    let text = fs::read_to_string(&ecommerce).expect("read record");
    assert!(!text.contains("\\u"), "non-ASCII text should be written verbatim");
    assert!(text.starts_with("{\n  \""), "records are indented with two spaces");

    let record: Value = serde_json::from_str(&text).expect("valid JSON");
    assert_eq!(record["order_id"], "CXORD0001");
    assert!(record["items"].as_array().is_some_and(|items| !items.is_empty()));

    for stem in [
        "complex_order_b2b_CXORD0002",
        "complex_order_international_CXORD0003",
        "complex_order_mixed_CXORD0004",
        "complex_order_customized_CXORD0005",
    ] {
        assert!(dir.path().join(format!("{stem}.png")).is_file(), "{stem}.png");
        assert!(dir.path().join(format!("{stem}.json")).is_file(), "{stem}.json");
    }
}

#[test]
fn sample_batch_writes_the_showcase_order() {
    let dir = TempDir::new().expect("temp dir");
    let config = BatchConfig::new(Suite::Sample, Locale::English).with_output_dir(dir.path());
    assert_eq!(config.count, 1);

    let written = run_batch(&mut generator(0), &config).expect("batch runs");
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].image_path, dir.path().join("order_image.png"));

    let record = read_record(&written[0].record_path);
    assert_eq!(record["order_no"], "ORD202601260001");
    assert_eq!(record["order_total"].as_f64(), Some(37844.0));
}

#[test]
fn written_records_match_generated_totals() {
    let dir = TempDir::new().expect("temp dir");
    let config = BatchConfig::new(Suite::Complex, Locale::Chinese)
        .with_output_dir(dir.path())
        .with_count(5);
    let written = run_batch(&mut generator(8), &config).expect("batch runs");

    let mut replay = generator(8);
    replay.set_locale(Locale::Chinese);
    for fixture in &written {
        let expected = replay.generate(fixture.kind, &fixture.order_id);
        let on_disk = read_record(&fixture.record_path);
        assert_eq!(
            on_disk,
            serde_json::to_value(&expected.record).expect("serialize"),
            "{} differs from a replayed generator",
            fixture.record_path.display()
        );
        assert!((expected.record.total() - expected.record.recomputed_total()).abs() <= 0.011);
    }
}

#[test]
fn batch_fails_when_the_output_path_is_a_file() {
    let dir = TempDir::new().expect("temp dir");
    let blocker = dir.path().join("taken");
    fs::write(&blocker, b"not a directory").expect("write blocker");

    let config = BatchConfig::new(Suite::Retail, Locale::English)
        .with_output_dir(&blocker)
        .with_count(1);
    let err = run_batch(&mut generator(1), &config).expect_err("directory cannot be created");
    assert!(err.to_string().contains("taken"), "error should name the path: {err}");
}
