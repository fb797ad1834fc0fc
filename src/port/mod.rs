//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  poller · dispatch ·    ├──────────────┐
//!     │              │  search · subscription  │              │
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌──────────────┐             ┌───────────┐
//! │Provider │            │ Subscription │             │ Notifier  │
//! │ Adapter │            │    Store     │             │  Adapter  │
//! └─────────┘            └──────────────┘             └───────────┘
//! ```

pub mod outbound;
