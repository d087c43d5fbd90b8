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

//! Parses the whitespace-tokenized instance format:
//!
//! ```text
//! <A_max>
//! .cell <N>
//! <i_1> <area_of_cell_i_1>
//! ...
//! .net <M>
//! <k_1> <c_1,1> ... <c_1,k_1>
//! ...
//! ```

use std::io::Read;
use std::str::SplitWhitespace;

use crate::common::Area;
use crate::error::{Error, Result};
use crate::model::InputData;

/// A cursor over the whitespace-separated tokens of an instance file. Keeping
/// our own tiny tokenizer (rather than reaching for a parser-combinator
/// crate) matches the source's preference for plain, direct iteration over
/// view-pipeline abstractions (see the crate's design notes).
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Tokens {
            inner: text.split_whitespace(),
        }
    }

    fn next_token(&mut self, context: &str) -> Result<&'a str> {
        self.inner
            .next()
            .ok_or_else(|| Error::Format(format!("unexpected end of input while reading {context}")))
    }

    fn next_keyword(&mut self, expected: &str) -> Result<()> {
        let got = self.next_token(expected)?;
        if got != expected {
            return Err(Error::Format(format!("expected keyword '{expected}', got '{got}'")));
        }
        Ok(())
    }

    fn next_usize(&mut self, context: &str) -> Result<usize> {
        Ok(self.next_token(context)?.parse()?)
    }

    fn next_area(&mut self, context: &str) -> Result<Area> {
        Ok(self.next_token(context)?.parse()?)
    }
}

/// Reads an entire `InputData` from `source`.
///
/// Errors on a missing `.cell`/`.net` keyword, a non-integer token, a
/// zero/negative `A_max`, or a truncated stream (`Error::Format`/
/// `Error::ParseInt`).
pub fn read_input<R: Read>(mut source: R) -> Result<InputData> {
    let mut text = String::new();
    source.read_to_string(&mut text)?;

    let mut tokens = Tokens::new(&text);

    let max_block_area = tokens.next_area("A_max")?;
    if max_block_area == 0 {
        return Err(Error::Format("A_max must be a positive integer".into()));
    }

    tokens.next_keyword(".cell")?;
    let ncells = tokens.next_usize("cell count")?;

    let mut cell_areas = vec![0 as Area; ncells];
    for _ in 0..ncells {
        let index = tokens.next_usize("cell index")?;
        let area = tokens.next_area("cell area")?;
        if index >= ncells {
            return Err(Error::Format(format!(
                "cell index {index} out of range for N = {ncells}"
            )));
        }
        cell_areas[index] = area;
    }

    tokens.next_keyword(".net")?;
    let nnets = tokens.next_usize("net count")?;

    let mut cells_of_net = Vec::with_capacity(nnets);
    for net_id in 0..nnets {
        let k = tokens.next_usize("net cell count")?;
        let mut net = Vec::with_capacity(k);
        for _ in 0..k {
            let cell = tokens.next_usize(&format!("cell in net {net_id}"))?;
            if cell >= ncells {
                return Err(Error::Format(format!(
                    "net {net_id} references out-of-range cell {cell}"
                )));
            }
            net.push(cell);
        }
        cells_of_net.push(net);
    }

    Ok(InputData::new(max_block_area, cell_areas, cells_of_net))
}
