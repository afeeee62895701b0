//! Periodic refresh on tokio.
//!
//! [`RefreshLoop`] repeats the render pass on a fixed period. Each cycle
//! runs to completion before the next tick is awaited, so cycles never
//! overlap; a slow fetch pushes later ticks back instead of bunching them.

use crate::{
    core::map::render_pass, data::feed::FeedSource, layers::overlay::EarthquakeLayer,
    style::encoder::FeatureEncoder, MapError, Result,
};
use std::{ops::ControlFlow, time::Duration};
use tokio::time::{interval, MissedTickBehavior};

pub struct RefreshLoop {
    source: Box<dyn FeedSource>,
    encoder: FeatureEncoder,
    period: Duration,
    max_cycles: Option<u64>,
}

impl RefreshLoop {
    pub fn new(
        source: Box<dyn FeedSource>,
        encoder: FeatureEncoder,
        period: Duration,
    ) -> Result<Self> {
        if period.is_zero() {
            return Err(MapError::Config("refresh period must be positive".into()));
        }
        Ok(Self {
            source,
            encoder,
            period,
            max_cycles: None,
        })
    }

    /// Stop after `cycles` render passes
    pub fn with_max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = Some(cycles);
        self
    }

    /// Runs cycles until the cycle limit is reached or `on_cycle` breaks.
    ///
    /// The first cycle starts immediately. `on_cycle` receives the 1-based
    /// cycle number and the fresh overlay. Returns the number of cycles run.
    pub async fn run<F>(&self, mut on_cycle: F) -> u64
    where
        F: FnMut(u64, EarthquakeLayer) -> ControlFlow<()>,
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut cycles = 0;
        loop {
            if self.max_cycles.is_some_and(|max| cycles >= max) {
                break;
            }
            ticker.tick().await;
            cycles += 1;

            log::debug!("refresh cycle {} from {}", cycles, self.source.describe());
            let layer = render_pass(self.source.as_ref(), &self.encoder).await;
            if on_cycle(cycles, layer).is_break() {
                log::info!("refresh loop stopped by caller after {} cycles", cycles);
                break;
            }
        }
        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feed::StaticFeedSource;
    use std::time::Instant;

    const FEED: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"mag": 2.2, "place": "Anza, CA"},
         "geometry": {"type": "Point", "coordinates": [-116.6, 33.5, 12.0]}}
    ]}"#;

    fn refresh_loop(body: &str, period_ms: u64) -> RefreshLoop {
        RefreshLoop::new(
            Box::new(StaticFeedSource::new(body)),
            FeatureEncoder::default(),
            Duration::from_millis(period_ms),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_period_rejected() {
        let result = RefreshLoop::new(
            Box::new(StaticFeedSource::new(FEED)),
            FeatureEncoder::default(),
            Duration::ZERO,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_runs_until_cycle_limit() {
        let refresh = refresh_loop(FEED, 10).with_max_cycles(3);
        let mut seen = Vec::new();

        let start = Instant::now();
        let cycles = refresh
            .run(|cycle, layer| {
                seen.push((cycle, layer.len()));
                ControlFlow::Continue(())
            })
            .await;

        assert_eq!(cycles, 3);
        assert_eq!(seen, vec![(1, 1), (2, 1), (3, 1)]);
        // first tick is immediate, the other two wait a period each
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_callback_can_stop_loop() {
        let refresh = refresh_loop(FEED, 5);
        let cycles = refresh
            .run(|cycle, _| {
                if cycle == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .await;
        assert_eq!(cycles, 2);
    }

    #[tokio::test]
    async fn test_failed_cycles_yield_empty_layers() {
        let refresh = refresh_loop("not json", 5).with_max_cycles(2);
        let mut sizes = Vec::new();
        refresh
            .run(|_, layer| {
                sizes.push(layer.len());
                ControlFlow::Continue(())
            })
            .await;
        assert_eq!(sizes, vec![0, 0]);
    }

    #[tokio::test]
    async fn test_zero_cycle_limit_runs_nothing() {
        let refresh = refresh_loop(FEED, 5).with_max_cycles(0);
        let cycles = refresh.run(|_, _| ControlFlow::Continue(())).await;
        assert_eq!(cycles, 0);
    }
}
