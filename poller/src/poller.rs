use std::time::Duration;

use growboard_common::{day_number, render_days, render_devices, Config, MetricFile};
use tracing::{debug, info, warn};

use crate::{
    api::TelemetrySource,
    clock::{Clock, Sleeper},
    sink::MetricSink,
};

/// Delay before the next attempt after a failed poll.
pub const RETRY_DELAY: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Updated { files: usize },
    NoDevices,
    Failed,
}

pub struct Poller<S, W, C, Z> {
    config: Config,
    source: S,
    sink: W,
    clock: C,
    sleeper: Z,
}

impl<S, W, C, Z> Poller<S, W, C, Z>
where
    S: TelemetrySource,
    W: MetricSink,
    C: Clock,
    Z: Sleeper,
{
    pub fn new(config: Config, source: S, sink: W, clock: C, sleeper: Z) -> Self {
        Self {
            config,
            source,
            sink,
            clock,
            sleeper,
        }
    }

    pub async fn run(&self) {
        info!(
            "polling every {}s, retrying failures after {}s",
            self.config.update_interval.as_secs(),
            RETRY_DELAY.as_secs()
        );

        loop {
            self.cycle().await;
        }
    }

    /// One poll followed by the sleep it schedules.
    pub async fn cycle(&self) -> (CycleOutcome, Duration) {
        let outcome = self.poll_once().await;
        let delay = match outcome {
            CycleOutcome::Updated { files } => {
                info!("updated {files} metric files");
                self.config.update_interval
            }
            CycleOutcome::NoDevices => self.config.update_interval,
            CycleOutcome::Failed => RETRY_DELAY,
        };

        debug!("sleeping for {}s", delay.as_secs());
        self.sleeper.sleep(delay).await;
        (outcome, delay)
    }

    async fn poll_once(&self) -> CycleOutcome {
        let now = self.clock.now().with_timezone(&self.config.timezone);
        let day = day_number(&self.config.start_date, &now);
        debug!(
            "current date {now}, start date {}, day {day}",
            self.config.start_date
        );
        self.write(&render_days(day)).await;

        let response = match self.source.fetch().await {
            Ok(response) => response,
            Err(err) => {
                warn!("{err}, retrying in {}s", RETRY_DELAY.as_secs());
                return CycleOutcome::Failed;
            }
        };

        if response.data.is_empty() {
            info!("device list is empty, keeping previous values");
            return CycleOutcome::NoDevices;
        }

        let files = render_devices(&response);
        for file in &files {
            self.write(file).await;
        }

        debug!("rendered {} devices", response.data.len());
        CycleOutcome::Updated { files: files.len() }
    }

    async fn write(&self, file: &MetricFile) {
        if let Err(err) = self.sink.write(file).await {
            warn!("failed to write {}: {err}", file.name);
        }
    }
}
