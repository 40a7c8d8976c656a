//! Order layouts and the random data that fills them.
//!
//! Each submodule exposes `generate(order_id, ctx)`, which draws one page and returns it with
//! the record describing exactly what was drawn.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use image::RgbImage;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::canvas::Canvas;
use crate::fonts::Typeface;
use crate::model::OrderRecord;
use crate::money::Currency;

pub mod b2b;
pub mod condensed;
pub mod customized;
pub mod detailed;
pub mod ecommerce;
pub mod international;
pub mod invoice;
pub mod mixed;
pub mod modern;
pub mod sample;
pub mod simple;

/// Language of the printed labels and of the generated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    English,
    Chinese,
}

impl Locale {
    /// Chooses between the English and Chinese variant of a value.
    pub fn select<'a, T: ?Sized>(self, english: &'a T, chinese: &'a T) -> &'a T {
        match self {
            Self::English => english,
            Self::Chinese => chinese,
        }
    }

    /// [`Locale::select`] for label strings.
    pub fn text<'a>(self, english: &'a str, chinese: &'a str) -> &'a str {
        self.select(english, chinese)
    }

    /// Currency printed in front of retail amounts.
    pub fn currency(self) -> Currency {
        match self {
            Self::English => Currency::DOLLAR,
            Self::Chinese => Currency::YUAN,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Chinese => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "zh" | "cn" | "chinese" => Ok(Self::Chinese),
            other => Err(format!("unknown locale `{other}` (expected `en` or `zh`)")),
        }
    }
}

/// Every layout the crate can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderKind {
    Simple,
    Detailed,
    Invoice,
    Condensed,
    Modern,
    Ecommerce,
    B2b,
    International,
    Mixed,
    Customized,
    Sample,
}

impl OrderKind {
    pub const ALL: [OrderKind; 11] = [
        Self::Simple,
        Self::Detailed,
        Self::Invoice,
        Self::Condensed,
        Self::Modern,
        Self::Ecommerce,
        Self::B2b,
        Self::International,
        Self::Mixed,
        Self::Customized,
        Self::Sample,
    ];

    /// Name used in output file names.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Detailed => "detailed",
            Self::Invoice => "invoice",
            Self::Condensed => "condensed",
            Self::Modern => "modern",
            Self::Ecommerce => "ecommerce",
            Self::B2b => "b2b",
            Self::International => "international",
            Self::Mixed => "mixed",
            Self::Customized => "customized",
            Self::Sample => "sample",
        }
    }

    pub fn suite(self) -> Suite {
        match self {
            Self::Simple | Self::Detailed | Self::Invoice | Self::Condensed | Self::Modern => {
                Suite::Retail
            }
            Self::Ecommerce | Self::B2b | Self::International | Self::Mixed | Self::Customized => {
                Suite::Complex
            }
            Self::Sample => Suite::Sample,
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Layouts that are generated together by one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suite {
    /// Store receipts and invoices, available in English and Chinese.
    Retail,
    /// Chinese e-commerce, B2B, cross-border and customization orders.
    Complex,
    /// The fixed showcase order.
    Sample,
}

impl Suite {
    /// Kinds in the order a batch cycles through them.
    pub fn kinds(self) -> &'static [OrderKind] {
        match self {
            Self::Retail => &[
                OrderKind::Simple,
                OrderKind::Detailed,
                OrderKind::Invoice,
                OrderKind::Condensed,
                OrderKind::Modern,
            ],
            Self::Complex => &[
                OrderKind::Ecommerce,
                OrderKind::B2b,
                OrderKind::International,
                OrderKind::Mixed,
                OrderKind::Customized,
            ],
            Self::Sample => &[OrderKind::Sample],
        }
    }

    /// Prefix of the sequential order ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Retail | Self::Sample => "ORD",
            Self::Complex => "CXORD",
        }
    }

    pub fn default_count(self) -> usize {
        match self {
            Self::Retail => 10,
            Self::Complex => 20,
            Self::Sample => 1,
        }
    }

    /// Output directory used when none is given.
    pub fn default_dir(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Retail, Locale::English) => "generated_orders",
            (Self::Retail, Locale::Chinese) => "generated_orders_zh",
            (Self::Complex, _) => "generated_complex_orders",
            (Self::Sample, _) => ".",
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Retail => "retail",
            Self::Complex => "complex",
            Self::Sample => "sample",
        })
    }
}

/// Inputs shared by every template: randomness, the clock, the face and the language.
pub struct GenerationContext {
    pub rng: StdRng,
    pub now: NaiveDateTime,
    pub typeface: Typeface,
    pub locale: Locale,
}

impl GenerationContext {
    pub fn new(seed: u64, now: NaiveDateTime, typeface: Typeface, locale: Locale) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now,
            typeface,
            locale,
        }
    }

    /// A blank page in the context's typeface.
    pub fn canvas(&self, width: u32, height: u32) -> Canvas {
        Canvas::new(width, height, self.typeface.clone())
    }
}

/// One rendered page together with its record.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub kind: OrderKind,
    pub image: RgbImage,
    pub record: OrderRecord,
}

/// Renders `kind` for `order_id`.
pub fn generate(kind: OrderKind, order_id: &str, ctx: &mut GenerationContext) -> Fixture {
    let (image, record) = match kind {
        OrderKind::Simple => simple::generate(order_id, ctx),
        OrderKind::Detailed => detailed::generate(order_id, ctx),
        OrderKind::Invoice => invoice::generate(order_id, ctx),
        OrderKind::Condensed => condensed::generate(order_id, ctx),
        OrderKind::Modern => modern::generate(order_id, ctx),
        OrderKind::Ecommerce => ecommerce::generate(order_id, ctx),
        OrderKind::B2b => b2b::generate(order_id, ctx),
        OrderKind::International => international::generate(order_id, ctx),
        OrderKind::Mixed => mixed::generate(order_id, ctx),
        OrderKind::Customized => customized::generate(order_id, ctx),
        OrderKind::Sample => sample::generate(order_id, ctx),
    };

    Fixture {
        kind,
        image,
        record,
    }
}

/// Date-time format shared by most layouts.
pub(crate) const DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";
/// Date-only format.
pub(crate) const DATE: &str = "%Y-%m-%d";

/// Chinese given-name pool shared by the complex layouts.
pub(crate) const CN_NAMES: &[&str] = &["张三", "李四", "王五", "赵六", "钱七", "孙八", "周九", "吴十"];
pub(crate) const CN_STREETS: &[&str] = &["主街", "橡树街", "松树街", "榆树街", "枫树街"];
pub(crate) const CN_CITIES: &[&str] = &["北京", "上海", "广州", "深圳", "杭州"];
pub(crate) const CN_PROVINCES: &[&str] = &["北京", "上海", "广东", "深圳", "浙江"];
/// Per-line VAT rates.
pub(crate) const VAT_RATES: &[f64] = &[0.13, 0.09, 0.06, 0.03, 0.0];

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{GenerationContext, Locale};
    use crate::fonts::Typeface;

    pub fn clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 26)
            .and_then(|date| date.and_hms_opt(10, 30, 0))
            .expect("valid clock")
    }

    pub fn context(seed: u64, locale: Locale) -> GenerationContext {
        GenerationContext::new(seed, clock(), Typeface::Blocks, locale)
    }

    pub fn assert_cents(value: f64) {
        assert!(
            (value * 100.0 - (value * 100.0).round()).abs() < 1e-6,
            "{value} is not rounded to cents"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::context;
    use super::*;

    #[test]
    fn every_kind_belongs_to_exactly_one_suite() {
        for kind in OrderKind::ALL {
            let suite = kind.suite();
            assert!(suite.kinds().contains(&kind), "{kind} missing from {suite}");
        }
        let total: usize = [Suite::Retail, Suite::Complex, Suite::Sample]
            .iter()
            .map(|suite| suite.kinds().len())
            .sum();
        assert_eq!(total, OrderKind::ALL.len());
    }

    #[test]
    fn locale_parses_codes() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::English));
        assert_eq!("ZH".parse::<Locale>(), Ok(Locale::Chinese));
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::Chinese.to_string(), "zh");
    }

    #[test]
    fn every_kind_renders_a_consistent_fixture() {
        for (index, kind) in OrderKind::ALL.into_iter().enumerate() {
            for locale in [Locale::English, Locale::Chinese] {
                let mut ctx = context(index as u64 + 1, locale);
                let fixture = generate(kind, "ORD0001", &mut ctx);
                assert_eq!(fixture.kind, kind);
                assert_eq!(fixture.record.order_id(), "ORD0001");
                assert!(
                    (fixture.record.total() - fixture.record.recomputed_total()).abs() <= 0.011,
                    "{kind}/{locale}: total {} vs recomputed {}",
                    fixture.record.total(),
                    fixture.record.recomputed_total()
                );
                assert!(fixture.image.width() > 0 && fixture.image.height() > 0);
            }
        }
    }

    #[test]
    fn same_seed_same_record() {
        for kind in OrderKind::ALL {
            let first = generate(kind, "CXORD0003", &mut context(42, Locale::Chinese));
            let second = generate(kind, "CXORD0003", &mut context(42, Locale::Chinese));
            assert_eq!(first.record, second.record);
            assert_eq!(first.image, second.image);
        }
    }
}
