//! # spectroscopy-rs: Weak spectroscopy of process equivalences
//!
//! **`spectroscopy-rs`** decides, for two states of a labelled transition system, which notions of the
//! weak linear-time--branching-time spectrum relate them, from stability-respecting branching bisimilarity
//! down to trace inclusion and enabledness.
//!
//! ## How it works
//!
//! The comparison is reduced to a two-player **energy game**. The attacker tries to exhibit a difference
//! between the processes, the defender tries to match every challenge. Each attacker strategy corresponds
//! to a distinguishing modal formula, and its price is an 8-dimensional budget counting the observations,
//! conjunctions, conjunct depths and negations the formula uses.
//!
//! A pair is related by a notion exactly when no minimal winning budget of the attacker lies below the
//! threshold of that notion.
//!
//! ## Key Features
//!
//! - **Game-Centric Architecture**: The [`Game`][crate::game::Game] owns all positions and moves. Positions are
//!   interned in a unique table, so structurally equal positions are stored once.
//! - **Backward Fixpoint**: [`Game::winning_budgets`][crate::game::Game::winning_budgets] computes Pareto-minimal
//!   budget antichains for every position at once.
//! - **Whole Spectrum**: One solved game answers the question for all 22 [`Notion`][crate::spectrum::Notion]s.
//!
//! ## Basic Usage
//!
//! ```rust
//! use spectroscopy_rs::ccs;
//! use spectroscopy_rs::config::GameConfig;
//! use spectroscopy_rs::spectroscopy::Spectroscopy;
//! use spectroscopy_rs::spectrum::Notion;
//!
//! // 1. Describe the processes
//! let lts = ccs::parse("P = a.(b.0 + c.0); Q = a.b.0 + a.c.0").unwrap();
//! let p = lts.process("P").unwrap();
//! let q = lts.process("Q").unwrap();
//!
//! // 2. Build and solve the game
//! let result = Spectroscopy::compare(&lts, p, q, &GameConfig::default()).unwrap();
//!
//! // 3. Classify the minimal budgets
//! let relations = result.classify();
//! assert!(relations.holds(Notion::Traces));
//! assert!(relations.holds(Notion::Failures));
//! assert!(!relations.holds(Notion::Readiness));
//! ```
//!
//! ## Core Components
//!
//! - **[`builder`]**: Construction of the game graph from a strong and a weak successor relation.
//! - **[`solver`]**: The winning-budget fixpoint.
//! - **[`spectrum`]**: Notion thresholds and classification.
//! - **[`ccs`]**: A small reader for process equations.

pub mod builder;
pub mod ccs;
pub mod config;
pub mod energy;
pub mod error;
pub mod game;
pub mod lts;
pub mod position;
pub mod solver;
pub mod spectroscopy;
pub mod spectrum;
pub mod successors;
pub mod table;
pub mod types;
pub mod utils;
