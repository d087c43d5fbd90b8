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

use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hgpart::config::Config;
use hgpart::cost::cost_from_scratch;
use hgpart::io::{read_input, write_output};
use hgpart::sa::SaEngine;
use hgpart::sanchis;
use hgpart::starting::find_starting_partition;
use hgpart::verify::verify;

/// Partitions a hypergraph of area-weighted cells into the fewest blocks that
/// fit under a per-block area cap, minimizing cut cost across nets.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the instance file.
    input_path: String,
    /// Path to write the resulting partition to.
    output_path: String,
    /// Wall-clock budget for the simulated-annealing engine, in seconds.
    #[arg(long, default_value_t = 600)]
    deadline_secs: u64,
    /// Run the Sanchis multi-level cut engine instead of simulated annealing.
    #[arg(long)]
    sanchis: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = Config::from_env();

    let input_file = File::open(&args.input_path)?;
    let inputs = read_input(std::io::BufReader::new(input_file))?;
    if config.debug_inputs {
        tracing::info!(?inputs, "parsed instance");
    }

    let mut rng = ChaCha8Rng::from_entropy();
    let mut partition = find_starting_partition(&inputs, &mut rng)?;

    let cost = if args.sanchis {
        sanchis::run(&inputs, &mut partition, &config)?;
        cost_from_scratch(&partition, &inputs)
    } else {
        let mut engine = SaEngine::new(&inputs, &partition);
        engine.run(&mut partition, &mut rng, Duration::from_secs(args.deadline_secs))
    };

    if config.verify_blocks {
        verify(&partition, inputs.ncells())?;
    }

    let output_file = File::create(&args.output_path)?;
    write_output(BufWriter::new(output_file), cost, &partition)?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    run(&args)
}
