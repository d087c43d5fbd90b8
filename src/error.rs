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

//! The error type shared by every fallible operation in this crate: parsing,
//! feasibility checks, and invariant checks.

use std::num::ParseIntError;

/// Groups the kinds of errors that can arise while reading an instance,
/// building a starting partition, or verifying a partition.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// There was an io-related error (unreadable input, unwritable output).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The parser expected an integer token but got something else.
    #[error("parse int error: {0}")]
    ParseInt(#[from] ParseIntError),
    /// The input stream was not properly formatted.
    #[error("ill-formed instance: {0}")]
    Format(String),
    /// The instance cannot be legally partitioned under `A_max`.
    #[error("infeasible instance: {0}")]
    Infeasible(String),
    /// An internal invariant was violated; this indicates a defect.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
