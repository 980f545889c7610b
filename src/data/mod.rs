//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  remote .csv / .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  fetch / parse → SalaryDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ SalaryDataset  │  Vec<SalaryRecord>, distinct values per filter column
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  four selection sets → filtered indices
//!   └──────────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//!   ┌──────────┐   ┌──────────┐
//!   │ summary   │   │  charts   │  scalar metrics / chart-ready tables
//!   └──────────┘   └──────────┘
//! ```

pub mod charts;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
