//! # Proof of Hustle
//!
//! Service and CLI behind the developer-reputation dashboard.
//!
//! Two halves cooperate:
//!
//! - an **authenticated proxy** ([`proxy`]) that forwards dashboard requests
//!   to the upstream reputation backend with a bearer credential, and
//! - a **resilient data client** ([`client`]) that reads each dashboard
//!   resource from that proxy and substitutes fallback data whenever a fetch
//!   fails, so a dashboard always renders.
//!
//! Streak calculation, chart shaping, data models, and the fallback
//! generators live in the `hustle-core` crate.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐ POST /api/* ┌────────────┐  Bearer  ┌────────────┐
//! │ HustleClient │────────────▶│   proxy    │─────────▶│  upstream  │
//! │ + fallbacks  │◀────────────│   (axum)   │◀─────────│  backend   │
//! └──────┬───────┘             └────────────┘          └────────────┘
//!        ▼
//! ┌──────────────┐
//! │  dashboard   │  streak + chart from hustle-core
//! └──────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and credential resolution |
//! | [`logging`] | tracing subscriber setup |
//! | [`error`] | Outbound failure taxonomy |
//! | [`protocol`] | Local endpoint paths and request bodies |
//! | [`upstream`] | Authenticated upstream client |
//! | [`proxy`] | Proxy HTTP server |
//! | [`client`] | Resilient data client |
//! | [`github`] | GitHub REST helper |
//! | [`dashboard`] | Concurrent dashboard aggregation |
//! | [`streak_cmd`] | Streaks from a contributions file |

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod github;
pub mod logging;
pub mod protocol;
pub mod proxy;
pub mod streak_cmd;
pub mod upstream;
