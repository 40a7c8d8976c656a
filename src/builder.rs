//! Generator construction helpers for the order_fixtures crate.

use chrono::NaiveDateTime;
use log::debug;

use crate::fonts::{self, Typeface};
use crate::templates::{self, Fixture, GenerationContext, Locale, OrderKind};

/// Builder for [`Generator`] instances pre-configured with the crate defaults.
#[derive(Debug, Default)]
pub struct GeneratorBuilder {
    seed: Option<u64>,
    clock: Option<NaiveDateTime>,
    typeface: Option<Typeface>,
    locale: Locale,
}

impl GeneratorBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the random seed so repeated runs produce identical fixtures.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the moment that generated dates are relative to.
    pub fn with_clock(mut self, clock: NaiveDateTime) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Uses `typeface` instead of probing the font candidates.
    pub fn with_typeface(mut self, typeface: Typeface) -> Self {
        self.typeface = Some(typeface);
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Builds the generator, resolving every unset option.
    ///
    /// Without a seed the generator is seeded from the thread RNG; without a clock it uses the
    /// local time at this call.
    pub fn build(self) -> Generator {
        let seed = self.seed.unwrap_or_else(rand::random);
        let clock = self
            .clock
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        let typeface = self.typeface.unwrap_or_else(fonts::default_typeface);
        debug!(
            "generator seed {seed}, clock {clock}, locale {}, typeface {}",
            self.locale,
            typeface.describe()
        );

        Generator {
            ctx: GenerationContext::new(seed, clock, typeface, self.locale),
        }
    }
}

/// Produces fixtures from one random stream.
///
/// Every call advances the stream, so the n-th fixture of a seeded generator is reproducible
/// only when the preceding calls are the same.
pub struct Generator {
    ctx: GenerationContext,
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Renders one fixture of `kind` for `order_id`.
    pub fn generate(&mut self, kind: OrderKind, order_id: &str) -> Fixture {
        templates::generate(kind, order_id, &mut self.ctx)
    }

    pub fn locale(&self) -> Locale {
        self.ctx.locale
    }

    /// Switches the language for subsequent fixtures without resetting the random stream.
    pub fn set_locale(&mut self, locale: Locale) {
        self.ctx.locale = locale;
    }

    pub fn clock(&self) -> NaiveDateTime {
        self.ctx.now
    }

    pub fn typeface(&self) -> &Typeface {
        &self.ctx.typeface
    }
}
