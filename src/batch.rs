//! Writing fixtures to disk: order ids, file names and the batch loop.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::builder::Generator;
use crate::canvas::encode_png;
use crate::error::{FixtureError, Result};
use crate::templates::{Fixture, Locale, OrderKind, Suite};

/// Date stamp prefixed to the showcase order numbers.
const SAMPLE_ID_STAMP: &str = "20260126";

/// What a batch run generates and where it puts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub output_dir: PathBuf,
    pub count: usize,
    pub suite: Suite,
    pub locale: Locale,
}

impl BatchConfig {
    /// Defaults for `suite`: its usual count and output directory.
    pub fn new(suite: Suite, locale: Locale) -> Self {
        Self {
            output_dir: PathBuf::from(suite.default_dir(locale)),
            count: suite.default_count(),
            suite,
            locale,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Paths of one written image/record pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFixture {
    pub kind: OrderKind,
    pub order_id: String,
    pub image_path: PathBuf,
    pub record_path: PathBuf,
}

/// Sequential order id for the 1-based `index` within a batch of `suite`.
pub fn order_id(suite: Suite, index: usize) -> String {
    match suite {
        Suite::Sample => format!("{}{SAMPLE_ID_STAMP}{index:04}", suite.id_prefix()),
        Suite::Retail | Suite::Complex => format!("{}{index:04}", suite.id_prefix()),
    }
}

/// File name shared by the image and the record, without extension.
pub fn file_stem(kind: OrderKind, locale: Locale, order_id: &str) -> String {
    match (kind.suite(), locale) {
        (Suite::Retail, Locale::English) => format!("order_{}_{order_id}", kind.slug()),
        (Suite::Retail, Locale::Chinese) => format!("order_{}_zh_{order_id}", kind.slug()),
        (Suite::Complex, _) => format!("complex_order_{}_{order_id}", kind.slug()),
        (Suite::Sample, Locale::English) => "order_image".to_owned(),
        (Suite::Sample, Locale::Chinese) => "order_image_chinese".to_owned(),
    }
}

/// Writes `<stem>.png` and `<stem>.json` into `dir`.
///
/// The record is pretty-printed with two-space indentation and non-ASCII text kept as is.
pub fn write_fixture(dir: &Path, stem: &str, fixture: &Fixture) -> Result<WrittenFixture> {
    let image_path = dir.join(format!("{stem}.png"));
    let png = encode_png(&fixture.image)?;
    fs::write(&image_path, png).map_err(|err| FixtureError::io(&image_path, err))?;

    let record_path = dir.join(format!("{stem}.json"));
    let file = File::create(&record_path).map_err(|err| FixtureError::io(&record_path, err))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &fixture.record)?;
    writer
        .flush()
        .map_err(|err| FixtureError::io(&record_path, err))?;

    debug!(
        "wrote {} ({}x{}) and {}",
        image_path.display(),
        fixture.image.width(),
        fixture.image.height(),
        record_path.display()
    );

    Ok(WrittenFixture {
        kind: fixture.kind,
        order_id: fixture.record.order_id().to_owned(),
        image_path,
        record_path,
    })
}

/// Generates `config.count` fixtures, cycling through the suite's kinds, and writes them.
pub fn run_batch(generator: &mut Generator, config: &BatchConfig) -> Result<Vec<WrittenFixture>> {
    fs::create_dir_all(&config.output_dir).map_err(|err| FixtureError::io(&config.output_dir, err))?;
    generator.set_locale(config.locale);

    let kinds = config.suite.kinds();
    info!(
        "generating {} {} fixture(s) ({}) into {}",
        config.count,
        config.suite,
        config.locale,
        config.output_dir.display()
    );

    let mut written = Vec::with_capacity(config.count);
    for index in 1..=config.count {
        let kind = kinds[(index - 1) % kinds.len()];
        let id = order_id(config.suite, index);
        let fixture = generator.generate(kind, &id);
        let stem = file_stem(kind, config.locale, &id);
        written.push(write_fixture(&config.output_dir, &stem, &fixture)?);
    }

    info!(
        "finished {} batch: {} fixture(s) in {}",
        config.suite,
        written.len(),
        config.output_dir.display()
    );
    Ok(written)
}
