/*!
 # Sleep/wake control loop

 Polls the clock and the override button every [`POLL_PERIOD`] and keeps
 the ring-suppressor line in step with the schedule.

 Each tick, in order:

 1. detect clock jumps and request a resync,
 2. resync from the schedule when requested (always on the first tick),
 3. debounce the button and toggle on a registered press,
 4. on a minute change, force sleep at the sleep time and wake at the
    wake time,
 5. remember the time for the next tick.

 Every change of the sleeping state is written to the output right away
 and reported as an [`Event`].
*/

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use crate::{
    ButtonInput, Clock, ClockReading, Debouncer, Result, ScheduleConfig, SuppressorOutput,
    TimeOfDay,
};

/// Fixed poll period of the control loop
pub const POLL_PERIOD: Duration = Duration::from_millis(20);

/// Encoded delta of a one-minute step across an hour boundary (e.g. 0959 to 1000)
const HOUR_ROLLOVER_DELTA: u16 = 41;
/// Encoded delta of the midnight wrap (2359 to 0000)
const MIDNIGHT_WRAP_DELTA: u16 = 2359;

/// Whether moving from `previous` to `now` is more than a normal clock step
pub fn is_clock_jump(previous: TimeOfDay, now: TimeOfDay) -> bool {
    let delta = now.encoded_delta(previous);
    delta > 1 && delta != HOUR_ROLLOVER_DELTA && delta != MIDNIGHT_WRAP_DELTA
}

/// Something the control loop did during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Clock moved by more than a normal step
    ClockJump { from: TimeOfDay, to: TimeOfDay },
    /// State recomputed from the schedule
    Synced { sleeping: bool },
    /// State flipped by the override button
    Toggled { sleeping: bool },
    /// Sleep or wake time reached
    Scheduled { sleeping: bool },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = |sleeping: bool| if sleeping { "sleep" } else { "wake" };
        match self {
            Event::ClockJump { from, to } => write!(f, "time updated from {} to {}", from, to),
            Event::Synced { sleeping } => write!(f, "sync to {} state", state(*sleeping)),
            Event::Toggled { sleeping } => write!(f, "toggle to {} state", state(*sleeping)),
            Event::Scheduled { sleeping } => write!(f, "switching to {} state", state(*sleeping)),
        }
    }
}

/// Mutable state owned by the control loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    /// Mirrors the suppressor line
    pub sleeping: bool,
    /// Time seen on the previous tick
    pub previous_time: TimeOfDay,
    /// Button debounce
    pub debouncer: Debouncer,
    /// Recompute `sleeping` from the schedule on the next tick
    pub resync_pending: bool,
}

impl DeviceState {
    pub fn new(now: TimeOfDay) -> Self {
        Self {
            sleeping: false,
            previous_time: now,
            debouncer: Debouncer::new(),
            resync_pending: true,
        }
    }
}

/// Drives the suppressor line from the schedule, the button and the clock
pub struct ControlLoop<C, B, S> {
    schedule: ScheduleConfig,
    clock: C,
    button: B,
    suppressor: S,
    state: DeviceState,
}

impl<C, B, S> ControlLoop<C, B, S>
where
    C: Clock,
    B: ButtonInput,
    S: SuppressorOutput,
{
    /// Creates the loop and drives the line to the awake state.
    ///
    /// The real state is established by the resync on the first tick.
    #[instrument(skip_all)]
    pub fn new(schedule: ScheduleConfig, mut clock: C, button: B, mut suppressor: S) -> Result<Self> {
        let now = clock.now()?;
        info!(
            "Now {}, wake at {}, sleep at {}",
            now.display, schedule.wake, schedule.sleep
        );

        let state = DeviceState::new(now.time);
        suppressor.write(state.sleeping)?;

        Ok(Self {
            schedule,
            clock,
            button,
            suppressor,
            state,
        })
    }

    /// Current sleeping, debounce and resync state
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// The output driven by this loop
    pub fn suppressor(&self) -> &S {
        &self.suppressor
    }

    /// Samples the clock and the button, then processes one tick
    pub fn tick(&mut self) -> Result<Vec<Event>> {
        let now = self.clock.now()?;
        let pressed = self.button.is_pressed()?;
        let events = self.process(&now, pressed)?;
        for event in &events {
            match event {
                Event::ClockJump { .. } => warn!("At {} {}", now.display, event),
                _ => info!("At {} {}", now.display, event),
            }
        }
        Ok(events)
    }

    /// Processes one tick from an already taken sample
    pub fn process(&mut self, now: &ClockReading, pressed: bool) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        let time = now.time;
        let minute_changed = time != self.state.previous_time;

        if is_clock_jump(self.state.previous_time, time) {
            self.state.resync_pending = true;
            events.push(Event::ClockJump {
                from: self.state.previous_time,
                to: time,
            });
        }

        if self.state.resync_pending {
            let sleeping = self.schedule.is_sleep_time(time);
            self.set_sleeping(sleeping)?;
            self.state.resync_pending = false;
            events.push(Event::Synced { sleeping });
        }

        if self.state.debouncer.update(pressed) {
            let sleeping = !self.state.sleeping;
            self.set_sleeping(sleeping)?;
            events.push(Event::Toggled { sleeping });
        }

        if minute_changed {
            if time == self.schedule.sleep {
                self.set_sleeping(true)?;
                events.push(Event::Scheduled { sleeping: true });
            }
            if time == self.schedule.wake {
                self.set_sleeping(false)?;
                events.push(Event::Scheduled { sleeping: false });
            }
        }

        self.state.previous_time = time;
        Ok(events)
    }

    /// Runs until `shutdown` resolves, then drives the line to the awake state
    #[instrument(skip_all)]
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = time::interval(POLL_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        debug!("Polling every {:?}", POLL_PERIOD);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    self.tick()?;
                }
            }
        }

        info!("Shutting down, allowing ring");
        self.set_sleeping(false)
    }

    fn set_sleeping(&mut self, sleeping: bool) -> Result<()> {
        self.state.sleeping = sleeping;
        self.suppressor.write(sleeping)
    }
}
