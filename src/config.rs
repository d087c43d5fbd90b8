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

//! Runtime configuration read from the `PA2_*` environment variables.

use std::env;

/// Rounds of Sanchis outer passes to perform before giving up, absent
/// `PA2_PASS_ROUNDS`. Called `N_bad`: the engine stops after this many
/// consecutive non-improving passes.
const DEFAULT_PASS_ROUNDS: usize = 10;

/// Configuration built once at startup from the process environment, mirroring
/// the five `PA2_*` variables of the original tool.
#[derive(Debug, Clone)]
pub struct Config {
    /// `PA2_DEBUG_MOVES`: log each Sanchis move at `debug` level.
    pub debug_moves: bool,
    /// `PA2_DEBUG_INPUTS`: log the parsed instance at startup.
    pub debug_inputs: bool,
    /// `PA2_PASS_ROUNDS`: consecutive non-improving Sanchis passes allowed
    /// before giving up (`N_bad`).
    pub pass_rounds: usize,
    /// `PA2_VERIFY_BLOCKS`: run the verifier before writing the result.
    pub verify_blocks: bool,
    /// `PA2_ALLOW_KWAY`: permit the Sanchis engine for `K > 2`.
    pub allow_kway: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debug_moves: false,
            debug_inputs: false,
            pass_rounds: DEFAULT_PASS_ROUNDS,
            verify_blocks: false,
            allow_kway: false,
        }
    }
}

impl Config {
    /// Builds a `Config` from environment variables, logging which ones were
    /// detected (in place of the source's unconditional `fmt::print`).
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if env::var_os("PA2_DEBUG_MOVES").is_some() {
            tracing::info!("PA2_DEBUG_MOVES is set");
            config.debug_moves = true;
        }
        if env::var_os("PA2_DEBUG_INPUTS").is_some() {
            tracing::info!("PA2_DEBUG_INPUTS is set");
            config.debug_inputs = true;
        }
        if env::var_os("PA2_VERIFY_BLOCKS").is_some() {
            tracing::info!("PA2_VERIFY_BLOCKS is set");
            config.verify_blocks = true;
        }
        if env::var_os("PA2_ALLOW_KWAY").is_some() {
            tracing::info!("PA2_ALLOW_KWAY is set");
            config.allow_kway = true;
        }
        if let Ok(raw) = env::var("PA2_PASS_ROUNDS") {
            tracing::info!("PA2_PASS_ROUNDS is set");
            match raw.parse() {
                Ok(rounds) => config.pass_rounds = rounds,
                Err(e) => tracing::warn!("failed to parse PA2_PASS_ROUNDS: {e}"),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_leaves_every_debug_flag_off() {
        let config = Config::default();
        assert!(!config.debug_moves);
        assert!(!config.debug_inputs);
        assert!(!config.verify_blocks);
        assert!(!config.allow_kway);
        assert_eq!(config.pass_rounds, 10);
    }
}
