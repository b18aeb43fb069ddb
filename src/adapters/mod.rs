//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements          | Connects to                    |
//! |--------------|---------------------|--------------------------------|
//! | `memory`     | SecurityRepository  | In-process collections         |
//! |              | ConfigPort          | In-process JSON blob           |
//! | `log_sink`   | EventSink           | `log` facade                   |
//! | `scripted`   | ImageAnalyzer       | Pre-queued verdicts            |
//! | `fake_image` | ImageAnalyzer       | Random, threshold-biased stub  |

pub mod fake_image;
pub mod log_sink;
pub mod memory;
pub mod scripted;
