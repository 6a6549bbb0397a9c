use kml2geojson::output::{Output, OutputFormat};
use kml2geojson::{convert_path, refresh, Error};
use log::{error, info};
use std::error::Error as StdError;
use std::io::{self, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "kml2geojson")]
struct Opt {
    /// KML document to convert
    #[structopt(parse(from_os_str), default_value = "kml/source.kml")]
    input: PathBuf,

    /// GeoJSON destination, "-" writes to stdout
    #[structopt(parse(from_os_str), default_value = "geojson/source.geojson")]
    output: PathBuf,

    /// Convert even if the output is newer than the input
    #[structopt(short, long)]
    force: bool,

    /// Write one feature per line instead of a feature collection
    #[structopt(short = "l", long)]
    json_lines: bool,
}

fn run(opt: &Opt, format: OutputFormat) -> Result<(), Error> {
    if opt.output.as_os_str() == "-" {
        let features = convert_path(&opt.input)?;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        features.write_as(format, &mut handle)?;
        handle.flush()?;
        return Ok(());
    }

    if let Some(count) = refresh(&opt.input, &opt.output, format, opt.force)? {
        info!("wrote {} features to {}", count, opt.output.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn StdError>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let opt = Opt::from_args();
    let format = if opt.json_lines {
        OutputFormat::JsonLines
    } else {
        OutputFormat::GeoJson
    };

    match run(&opt, format) {
        Err(Error::Parse(msg)) => {
            error!("skipping conversion of {}: {}", opt.input.display(), msg);
            Ok(())
        }
        result => Ok(result?),
    }
}
