use std::collections::BTreeMap;
use std::time::Duration;

use candles_core::{
    AggregationConfig, Candle, CandleInterval, CandlesError, Observation, PriceOrder,
    aggregate_with_order, infer_intervals, sort_candles,
};

/// Runs the full aggregation pipeline over a batch of observations.
///
/// Observations are grouped by instrument, candle intervals are inferred per
/// instrument, each (instrument, interval) pair is aggregated, and the
/// resulting candles are put in canonical order.
#[derive(Debug, Clone)]
pub struct Aggregator {
    cfg: AggregationConfig,
    catalog: Vec<CandleInterval>,
}

/// Builder for constructing an [`Aggregator`] with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct AggregatorBuilder {
    cfg: AggregationConfig,
}

impl AggregatorBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Defaults: base intervals of 1, 2 and 5 minutes, open/close in input
    /// order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cfg: AggregationConfig::default(),
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: AggregationConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the candidate base intervals probed by inference.
    ///
    /// The catalog only seeds inference; the emitted intervals are still
    /// derived from the data and may be multiples of these values.
    #[must_use]
    pub fn base_intervals(mut self, intervals: &[Duration]) -> Self {
        self.cfg.base_intervals = intervals.to_vec();
        self
    }

    /// Select which observation opens and closes a bucket.
    #[must_use]
    pub const fn price_order(mut self, order: PriceOrder) -> Self {
        self.cfg.price_order = order;
        self
    }

    /// Build the `Aggregator`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the base interval catalog is empty or holds a
    /// zero or fractional-second duration.
    pub fn build(self) -> Result<Aggregator, CandlesError> {
        let catalog = self.cfg.validate()?;
        Ok(Aggregator {
            cfg: self.cfg,
            catalog,
        })
    }
}

impl Aggregator {
    /// Start building a new `Aggregator`.
    ///
    /// ```
    /// use candles::{Aggregator, PriceOrder};
    ///
    /// let aggregator = Aggregator::builder()
    ///     .price_order(PriceOrder::InputOrder)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(aggregator.catalog().len(), 3);
    /// ```
    #[must_use]
    pub fn builder() -> AggregatorBuilder {
        AggregatorBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &AggregationConfig {
        &self.cfg
    }

    /// Validated base interval catalog.
    #[must_use]
    pub fn catalog(&self) -> &[CandleInterval] {
        &self.catalog
    }

    /// Aggregate one instrument's observations over every interval inferred
    /// from their timestamps. Candles are not sorted.
    ///
    /// # Errors
    /// Propagates aggregation errors (`InvalidArg` for an unrepresentable
    /// bucket start, `EmptyBucket`).
    pub fn run_instrument(
        &self,
        instrument_id: &str,
        observations: &[Observation],
    ) -> Result<Vec<Candle>, CandlesError> {
        let timestamps: Vec<_> = observations.iter().map(|o| o.ts).collect();
        let intervals = infer_intervals(&timestamps, &self.catalog);
        if intervals.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                instrument = instrument_id,
                observations = observations.len(),
                "no interval inferred; instrument produces no candles"
            );
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        for interval in intervals {
            out.extend(aggregate_with_order(
                instrument_id,
                observations,
                interval,
                self.cfg.price_order,
            )?);
        }
        Ok(out)
    }

    /// Aggregate a full batch of observations.
    ///
    /// The returned candles are sorted by instrument id, then interval, then
    /// bucket start. Instruments whose data supports no interval contribute
    /// nothing.
    ///
    /// # Errors
    /// Propagates the first error of [`Aggregator::run_instrument`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candles::aggregator::run",
            skip_all,
            fields(observations = observations.len()),
        )
    )]
    pub fn run(&self, observations: Vec<Observation>) -> Result<Vec<Candle>, CandlesError> {
        let grouped = group_by_instrument(observations);
        #[cfg(feature = "tracing")]
        tracing::debug!(instruments = grouped.len(), "grouped observations");

        let mut out = Vec::new();
        for (instrument_id, series) in &grouped {
            out.extend(self.run_instrument(instrument_id, series)?);
        }
        sort_candles(&mut out);

        #[cfg(feature = "tracing")]
        tracing::info!(candles = out.len(), "aggregation finished");
        Ok(out)
    }
}

/// Group observations by instrument id, preserving input order within each
/// instrument.
#[must_use]
pub fn group_by_instrument(observations: Vec<Observation>) -> BTreeMap<String, Vec<Observation>> {
    let mut grouped: BTreeMap<String, Vec<Observation>> = BTreeMap::new();
    for obs in observations {
        grouped
            .entry(obs.instrument_id.clone())
            .or_default()
            .push(obs);
    }
    grouped
}
