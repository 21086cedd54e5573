//! # art-curator
//!
//! Gallery search for a small art marketplace. A buyer describes what they
//! are looking for; the catalogue is filtered, scored lexically, and
//! re-ranked with suggestions from an LLM "curator".
//!
//! ## Architecture
//!
//! ```text
//!                  ┌──────────────────────────┐
//!                  │ Query + sidebar filters  │
//!                  └────────────┬─────────────┘
//!                               │
//!                               ▼
//!                  ┌──────────────────────────┐
//!                  │  Catalogue snapshot      │
//!                  │  filter: artist, suburb, │
//!                  │  price band              │
//!                  └────────────┬─────────────┘
//!                               │ filtered artworks
//!              ┌────────────────┴────────────────┐
//!              ▼                                 ▼
//!   ┌─────────────────────┐          ┌──────────────────────┐
//!   │  Lexical scorer     │          │  Curator oracle      │
//!   │  token overlap      │          │  one LLM call        │
//!   │  + title bonus      │          │  timeout ⇒ failure   │
//!   └──────────┬──────────┘          └──────────┬───────────┘
//!              │                                │ free text
//!              │                                ▼
//!              │                     ┌──────────────────────┐
//!              │                     │  Numbered-list parse │
//!              │                     │  ≤ 10 title hints    │
//!              │                     └──────────┬───────────┘
//!              │                                ▼
//!              │                     ┌──────────────────────┐
//!              │                     │  Fuzzy title match   │
//!              │                     │  gestalt ratio ≥ 0.4 │
//!              │                     │  one hint per item   │
//!              │                     └──────────┬───────────┘
//!              └────────────────┬───────────────┘
//!                               ▼
//!                  ┌──────────────────────────┐
//!                  │  Blend                   │
//!                  │  0.60 lexical            │
//!                  │  0.25 fuzzy to hints     │
//!                  │  0.15 rank 1.0/.66/.33   │
//!                  │  stable sort, top 3 ★    │
//!                  └────────────┬─────────────┘
//!                               ▼
//!                  ┌──────────────────────────┐
//!                  │  Ordered gallery +       │
//!                  │  curator explanation     │
//!                  └──────────────────────────┘
//! ```
//!
//! If the oracle fails the right-hand branch contributes nothing and the
//! gallery is ordered lexically. An empty query skips everything and returns
//! the filtered catalogue as-is.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, LLM and blend weights
//! - [`models`] - Shared data types: `ArtworkRecord`, `RankedResult`, request/response types
//! - [`catalogue`] - Catalogue snapshot, JSON loading with column coercion, sidebar filters
//! - [`search::lexical`] - Token-overlap scoring with a title bonus
//! - [`search::fuzzy`] - Gestalt string similarity and hint-to-title resolution
//! - [`search::blend`] - Weighted blend of lexical, fuzzy and oracle-rank signals
//! - [`search::pipeline`] - One ranking pass: oracle call, fallback, blend
//! - [`llm::oracle`] - The `Oracle` trait and the Ollama / OpenAI-compatible client
//! - [`llm::prompt`] - Curator prompt construction
//! - [`llm::parse`] - Numbered-list title extraction from free text
//! - [`llm::curator`] - Error-free wrapper producing an `OracleResponse`
//! - [`llm::vision`] - Theme / palette / emotion analysis of uploaded images
//! - [`api`] - Axum HTTP handlers for search, catalogue and analysis
//! - [`state`] - Shared application state holding the catalogue snapshot and oracle

pub mod api;
pub mod catalogue;
pub mod config;
pub mod llm;
pub mod models;
pub mod search;
pub mod state;
