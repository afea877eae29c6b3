use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cccdl",
    about = "Resolve the direct download link of a video or audio file from a media page",
    version,
    long_about = "Fetches a media page, looks up its download section and prints the direct link for the requested format. Audio links can be filtered by spoken language.\n\nExit codes: 0 link printed, 1 unsupported format or language, 2 page could not be fetched or parsed, 3 no matching link."
)]
pub struct Cli {
    /// Page to resolve the download link from
    #[arg(value_name = "URL")]
    pub url: String,

    /// Media format: mp4, webm, mp3 or opus [default: mp4]
    #[arg(short, long, env = "CCCDL_FORMAT", value_name = "FORMAT")]
    pub format: Option<String>,

    /// Audio language: auto, en, de, eng or deu [default: auto]
    #[arg(short, long, env = "CCCDL_LANG", value_name = "LANG")]
    pub lang: Option<String>,

    /// Config file (defaults to ./cccdl.yaml or the user config directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Give up on the page request after this many seconds
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
