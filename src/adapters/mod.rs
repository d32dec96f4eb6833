//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements       | Connects to                      |
//! |------------|------------------|----------------------------------|
//! | `hardware` | AlertOutputPort  | Alert LED GPIO, buzzer LEDC PWM  |
//! |            | LightPort        | Light GPIO                       |
//! | `log_sink` | EventSink        | Serial log output                |
//! | `reporter` | ReporterPort     | Serial log (JSON param updates)  |

pub mod hardware;
pub mod log_sink;
pub mod reporter;
