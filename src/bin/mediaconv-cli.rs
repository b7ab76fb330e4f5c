use anyhow::{Context, Result};
use clap::Parser;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use mediaconv::{Conversion, Opts, SynthOpts, convert_with};

fn main() -> Result<()> {
    mediaconv::init_logging();
    let params = get_params()?;

    let input = std::fs::read(&params.input_path)
        .with_context(|| format!("failed to read input '{}'", params.input_path.display()))?;

    let opts = Opts {
        synth: SynthOpts {
            cue_duration_secs: params.cue_duration_secs,
            start_secs: params.start_secs,
        },
    };

    let artifact = convert_with(params.conversion, &input, &opts)
        .with_context(|| format!("{} conversion failed", params.conversion))?;

    match &params.output_path {
        Some(path) => std::fs::write(path, &artifact.bytes)
            .with_context(|| format!("failed to write output '{}'", path.display()))?,
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            writer.write_all(&artifact.bytes)?;
            writer.flush()?;
        }
    }

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "mediaconv")]
#[command(about = "Convert subtitles (SRT/WebVTT/plain text) and Ogg audio")]
struct Params {
    #[arg(short = 'c', long = "conversion", value_enum)]
    pub conversion: Conversion,

    #[arg(short = 'i', long = "input")]
    pub input_path: PathBuf,

    /// Write here instead of stdout.
    #[arg(short = 'o', long = "output")]
    pub output_path: Option<PathBuf>,

    /// Seconds each line stays on screen (text_to_srt only).
    #[arg(long = "cue-duration", default_value_t = 2)]
    pub cue_duration_secs: u32,

    /// Clock value of the first cue, in seconds (text_to_srt only).
    #[arg(long = "start", default_value_t = 0)]
    pub start_secs: u32,
}

fn get_params() -> Result<Params> {
    Ok(Params::parse())
}
