//! Control loop runtime.
//!
//! Runs the [`SosService`] on an `edge-executor` task.  Each iteration
//! sleeps on whichever comes first: the next command from the
//! `embassy-sync` channel or the player's next timer deadline on an
//! `async-io-mini` reactor timer.  No busy-polling.
//!
//! ```text
//!  stdin thread ──AppCommand──▶ CMD_CHANNEL ──┐
//!                                             ▼
//!                        ┌──────────── or ────────────┐
//!                        │ receive()   Timer::after() │
//!                        └─────────────┬──────────────┘
//!                                      ▼
//!                     SosService::handle_command / poll
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{debug, info};

use crate::adapters::time::MonotonicClock;
use crate::app::commands::AppCommand;
use crate::app::ports::{ConfigPort, DiaryPort, EventSink, SignalOutputs};
use crate::app::service::SosService;

/// Channel depth for inbound commands.
pub const CMD_DEPTH: usize = 8;

pub type CommandChannel = Channel<CriticalSectionRawMutex, AppCommand, CMD_DEPTH>;

/// Inbound command channel: front ends → control loop.
pub static CMD_CHANNEL: CommandChannel = Channel::new();

/// Queue a command without blocking.  Returns `false` if the channel is full.
pub fn try_send_command(cmd: AppCommand) -> bool {
    CMD_CHANNEL.try_send(cmd).is_ok()
}

enum Wake {
    Command(AppCommand),
    Timer,
}

/// Everything the control loop drives, bundled for the executor task.
pub struct ControlLoop<'a, H, S, C> {
    pub service: SosService,
    pub hw: H,
    pub sink: S,
    pub storage: &'a C,
    pub clock: MonotonicClock,
}

impl<'a, H, S, C> ControlLoop<'a, H, S, C>
where
    H: SignalOutputs,
    S: EventSink,
    C: ConfigPort + DiaryPort,
{
    pub fn new(service: SosService, hw: H, sink: S, storage: &'a C) -> Self {
        Self {
            service,
            hw,
            sink,
            storage,
            clock: MonotonicClock::new(),
        }
    }

    /// Serve commands from `commands` until a `Shutdown` arrives.
    pub async fn run(&mut self, commands: &CommandChannel) {
        info!("Control loop started");
        loop {
            let wake = match self.service.next_deadline_ms() {
                Some(due) => {
                    let delay = self.clock.until(due);
                    futures_lite::future::or(
                        async { Wake::Command(commands.receive().await) },
                        async {
                            async_io_mini::Timer::after(delay).await;
                            Wake::Timer
                        },
                    )
                    .await
                }
                None => Wake::Command(commands.receive().await),
            };

            let now = self.clock.now_ms();
            match wake {
                Wake::Timer => {
                    let fired = self.service.poll(now, &mut self.hw, &mut self.sink);
                    if fired == 0 {
                        debug!("No slot due at {} ms", now);
                    }
                }
                Wake::Command(cmd) => {
                    let shutdown = cmd == AppCommand::Shutdown;
                    self.service
                        .handle_command(cmd, now, &mut self.hw, &mut self.sink);
                    self.service.force_save_if_dirty(self.storage);
                    self.service.force_save_diary_if_dirty(self.storage);
                    if shutdown {
                        break;
                    }
                }
            }
        }
        info!(
            "Control loop stopped after {} ticks",
            self.service.tick_count()
        );
    }

    pub fn into_parts(self) -> (SosService, H, S) {
        (self.service, self.hw, self.sink)
    }
}

/// Drive `control` to completion on a local executor.
pub fn run_blocking<H, S, C>(control: &mut ControlLoop<'_, H, S, C>, commands: &CommandChannel)
where
    H: SignalOutputs,
    S: EventSink,
    C: ConfigPort + DiaryPort,
{
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();
    let task = executor.spawn(control.run(commands));
    futures_lite::future::block_on(executor.run(task));
}
