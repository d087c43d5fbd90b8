// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # hgpart
//! `hgpart` partitions a hypergraph of area-weighted cells into the fewest
//! blocks that fit under a per-block area cap, minimizing the quadratic cut
//! cost `Σ_n (span(n) - 1)²` across every net (hyperedge).
//!
//! ## Pipeline
//! A run wires four pieces together, each independently usable as a library:
//!
//! 1. [`io`] parses the instance format into an [`model::InputData`].
//! 2. [`starting`] builds a legal starting partition with as few blocks as
//!    the area cap allows, via randomized escalating-`k` bin-packing.
//! 3. [`sa`] refines that partition with an incremental simulated-annealing
//!    engine; this is the primary optimizer and the one every run applies.
//! 4. [`sanchis`], off by default, offers an alternative multi-level
//!    gain-table cut engine that a caller can run instead of, or in addition
//!    to, the SA pass.
//!
//! [`verify`] re-checks the final partition's legality before [`io`] writes
//! it out, and [`cost`] provides the from-scratch objective both engines are
//! built to track incrementally.
//!
//! ## Quick example
//! ```
//! use hgpart::model::{InputData, Partition};
//! use hgpart::sa::SaEngine;
//! use hgpart::starting::find_starting_partition;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use std::time::Duration;
//!
//! let inputs = InputData::new(4, vec![1, 1, 1, 1], vec![vec![0, 1], vec![2, 3]]);
//! let mut rng = ChaCha8Rng::seed_from_u64(0);
//! let mut partition = find_starting_partition(&inputs, &mut rng).unwrap();
//!
//! let mut engine = SaEngine::new(&inputs, &partition);
//! let cost = engine.run(&mut partition, &mut rng, Duration::from_millis(50));
//! assert!(cost >= 0);
//! ```

pub mod common;
pub mod config;
pub mod cost;
pub mod error;
pub mod io;
pub mod model;
pub mod sa;
pub mod sanchis;
pub mod starting;
pub mod verify;
