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

//! The auto-tuning cooling schedule: `T` decays geometrically every pass,
//! and `α` is retuned every 10 seconds of wall-clock time so that `T` reaches
//! `T_min` exactly at the deadline, regardless of observed pass throughput.

/// Default initial temperature, `T₀`.
pub const INITIAL_TEMP: f64 = 10.0;
/// Default initial cooling factor, `α₀`, used until the first retune and
/// whenever a retune would be degenerate.
pub const DEFAULT_ALPHA: f64 = 0.99999999999999;
/// The temperature floor; the schedule never cools below this.
pub const T_MIN: f64 = 0.2;
/// The temperature ceiling; a retune never pushes `T` above this.
pub const T_MAX: f64 = 1.0;
/// How often (in seconds of wall-clock time) the schedule retunes `α`.
pub const RETUNE_INTERVAL_SECS: f64 = 10.0;

/// Tracks the current temperature and cooling factor, and knows how to
/// retune itself from observed throughput.
#[derive(Debug, Clone, Copy)]
pub struct Cooling {
    temp: f64,
    alpha: f64,
}

impl Default for Cooling {
    fn default() -> Self {
        Cooling {
            temp: INITIAL_TEMP,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl Cooling {
    pub fn temp(&self) -> f64 {
        self.temp
    }

    /// Cools by one pass: `T ← clamp(T · α, T_min, T_max)`.
    pub fn step(&mut self) {
        self.temp = (self.temp * self.alpha).clamp(T_MIN, T_MAX);
    }

    /// Retunes `α` from the number of passes committed over the last
    /// `elapsed_secs` of wall-clock time, so that `T` reaches `T_min` in
    /// exactly `remaining_secs` more seconds at the newly observed rate.
    ///
    /// Falls back to [`DEFAULT_ALPHA`] whenever the computation is
    /// degenerate: no progress was made (`passes == 0`), no time has
    /// actually elapsed, no time remains, or `T` has already reached
    /// `T_min`.
    pub fn retune(&mut self, passes: u64, elapsed_secs: f64, remaining_secs: f64) {
        let rate = if elapsed_secs > 0.0 {
            passes as f64 / elapsed_secs
        } else {
            0.0
        };

        let degenerate = self.temp <= T_MIN || rate <= 0.0 || remaining_secs <= 0.0;
        if degenerate {
            self.alpha = DEFAULT_ALPHA;
            return;
        }

        let exponent = 1.0 / (remaining_secs * rate);
        let alpha = (T_MIN / self.temp).powf(exponent);

        if alpha.is_finite() && alpha > 0.0 {
            self.alpha = alpha;
        } else {
            self.alpha = DEFAULT_ALPHA;
        }
    }
}
