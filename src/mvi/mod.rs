//! Model-View-Intent (MVI) primitives for the client store.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Effect ──→ Message ──→ Reducer ──→ Slice
//!    ↑                                            │
//!    └──────────────── caller ◀───────────────────┘
//! ```
//!
//! - **Slice**: one independent region of application state
//! - **Message**: a state transition emitted by an effect handler
//! - **Reducer**: pure function folding messages into a slice

mod message;
mod reducer;
mod state;

pub use message::Message;
pub use reducer::Reducer;
pub use state::Slice;
