//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   ┌──────────────┐      ┌────────────────────────┐      ┌──────────────┐
//!   │ TCP listener │ ───▶ │ application (fetch +   │ ───▶ │ StatsSource  │
//!   │  (inbound)   │      │ aggregate + score)     │      │  (outbound)  │
//!   └──────────────┘      └────────────────────────┘      └──────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`StatsSource`](outbound::stats::StatsSource) - per-account ship statistics

pub mod outbound;
