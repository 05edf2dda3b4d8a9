//! Intention input and telemetry output exchange.
//!
//! The controller reads one intention and publishes one report per tick. The
//! traits here decouple it from the collaborator producing intentions, which
//! may live in the same thread ([`LoopbackBus`]) or on another one
//! ([`ChannelBus`]).

use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::command::TelemetryReport;
use crate::error::BusError;
use crate::intention::RawIntention;

/// Supplies the raw intention for the current tick.
pub trait IntentionSource {
    fn read_intention(&mut self) -> Result<RawIntention, BusError>;
}

/// Receives the telemetry report once the tick's command is final.
pub trait TelemetrySink {
    fn publish(&mut self, report: &TelemetryReport) -> Result<(), BusError>;
}

/// Same-thread bus: the caller sets the intention, reports are kept in order.
#[derive(Debug, Clone, Default)]
pub struct LoopbackBus {
    intention: RawIntention,
    reports: Vec<TelemetryReport>,
}

impl LoopbackBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_intention(&mut self, intention: RawIntention) {
        self.intention = intention;
    }

    pub fn reports(&self) -> &[TelemetryReport] {
        &self.reports
    }

    pub fn last_report(&self) -> Option<&TelemetryReport> {
        self.reports.last()
    }

    pub fn take_reports(&mut self) -> Vec<TelemetryReport> {
        std::mem::take(&mut self.reports)
    }
}

impl IntentionSource for LoopbackBus {
    fn read_intention(&mut self) -> Result<RawIntention, BusError> {
        Ok(self.intention)
    }
}

impl TelemetrySink for LoopbackBus {
    fn publish(&mut self, report: &TelemetryReport) -> Result<(), BusError> {
        self.reports.push(*report);
        Ok(())
    }
}

/// Controller side of a cross-thread bus.
///
/// Reading drains every pending intention and keeps the newest; when nothing
/// new arrived the previous intention is held, as a shared cell would.
#[derive(Debug)]
pub struct ChannelBus {
    intentions: Receiver<RawIntention>,
    reports: Sender<TelemetryReport>,
    latest: RawIntention,
}

/// Collaborator side of a cross-thread bus.
#[derive(Debug, Clone)]
pub struct BusPeer {
    intentions: Sender<RawIntention>,
    reports: Receiver<TelemetryReport>,
}

/// Create a connected controller/collaborator pair.
pub fn channel_bus() -> (ChannelBus, BusPeer) {
    let (intention_tx, intention_rx) = channel::unbounded();
    let (report_tx, report_rx) = channel::unbounded();
    (
        ChannelBus {
            intentions: intention_rx,
            reports: report_tx,
            latest: RawIntention::coast(),
        },
        BusPeer {
            intentions: intention_tx,
            reports: report_rx,
        },
    )
}

impl IntentionSource for ChannelBus {
    fn read_intention(&mut self) -> Result<RawIntention, BusError> {
        let mut received = false;
        loop {
            match self.intentions.try_recv() {
                Ok(intention) => {
                    self.latest = intention;
                    received = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) if received => break,
                Err(TryRecvError::Disconnected) => return Err(BusError::SourceDisconnected),
            }
        }
        Ok(self.latest)
    }
}

impl TelemetrySink for ChannelBus {
    fn publish(&mut self, report: &TelemetryReport) -> Result<(), BusError> {
        self.reports
            .send(*report)
            .map_err(|_closed| BusError::SinkDisconnected)
    }
}

impl BusPeer {
    pub fn send_intention(&self, intention: RawIntention) -> Result<(), BusError> {
        self.intentions
            .send(intention)
            .map_err(|_closed| BusError::ControllerDisconnected)
    }

    pub fn try_recv_report(&self) -> Option<TelemetryReport> {
        self.reports.try_recv().ok()
    }

    pub fn recv_report_timeout(&self, timeout: Duration) -> Result<Option<TelemetryReport>, BusError> {
        match self.reports.recv_timeout(timeout) {
            Ok(report) => Ok(Some(report)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(BusError::ControllerDisconnected),
        }
    }
}
