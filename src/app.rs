//! Application lifecycle with statum state machine
//!
//! Owns the wizard session and the display and runs the fixed-rate tick loop:
//! drain devices and advance the wizard, render, present. The loop ends when the
//! wizard exits or the shutdown token is cancelled; teardown blanks the screen and
//! releases every device.

use crate::ui::{render, Blink, FrameSink, Surface, UiColors};
use crate::wizard::{WizardSession, WizardState};
use statum::{machine, state};
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Tick period of the main loop
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[state]
#[derive(Debug, Clone)]
pub enum MapperAppState {
    Starting,     // Display acquired, loop not running yet
    Running,      // Ticking
    ShuttingDown, // Loop left, screen still showing the last frame
    Stopped,      // Screen blanked, devices closed
}

#[machine]
pub struct MapperApp<S: MapperAppState> {
    session: WizardSession,
    surface: Surface,
    sink: Box<dyn FrameSink>,
    blink: Blink,
}

impl<S: MapperAppState> MapperApp<S> {
    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    fn present(&mut self) {
        if let Err(e) = self.sink.present(&self.surface) {
            warn!("Failed to present frame: {}", e);
        }
    }
}

impl MapperApp<Starting> {
    pub fn create(session: WizardSession, sink: Box<dyn FrameSink>) -> Self {
        let geometry = sink.geometry();
        info!("Creating mapper app on a {} display", geometry);

        Self::new(session, geometry.surface(), sink, Blink::new(Instant::now()))
    }

    pub fn start(self) -> MapperApp<Running> {
        info!("Starting main loop");
        self.transition()
    }
}

impl MapperApp<Running> {
    /// One loop iteration. Returns false once the wizard has exited.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.session.step(now);
        if self.session.state() == WizardState::Exit {
            return false;
        }

        let blink = self.blink.update(now);
        render(&self.session, &mut self.surface, blink);
        self.present();
        true
    }

    /// Ticks every [`FRAME_INTERVAL`] until the wizard exits or `shutdown` fires.
    ///
    /// A cancellation is only seen between ticks, so the current tick always
    /// completes.
    pub async fn run_until_shutdown(
        mut self,
        shutdown: CancellationToken,
    ) -> MapperApp<ShuttingDown> {
        let mut ticker = tokio::time::interval(FRAME_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("Shutdown signal received");
                    break;
                }

                _ = ticker.tick() => {
                    if !self.tick(Instant::now()) {
                        info!("Wizard finished");
                        break;
                    }
                }
            }
        }

        self.transition()
    }
}

impl MapperApp<ShuttingDown> {
    /// Blanks the screen and closes all devices.
    pub fn shutdown(mut self) -> MapperApp<Stopped> {
        debug!("Clearing display");
        self.surface.clear(UiColors::BLACK);
        self.present();
        self.session.release_devices();

        info!("Mapper stopped");
        self.transition()
    }
}

impl MapperApp<Stopped> {}
