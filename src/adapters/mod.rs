//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements              | Connects to               |
//! |------------|-------------------------|---------------------------|
//! | `console`  | (command source)        | stdin lines               |
//! | `hardware` | TorchPort · ScreenPort  | flash pin, screen, bell   |
//! |            | AudioPort               |                           |
//! | `log_sink` | EventSink               | `log` output              |
//! | `settings` | ConfigPort              | in-memory / JSON settings |
//! | `time`     | (clock)                 | monotonic `Instant`       |

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod settings;
pub mod time;
