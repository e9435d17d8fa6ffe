use sesim::io::{ModelInput, ModelOutput};
use sesim::StrError;
use std::path::Path;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "sesim",
    about = "Runs the analyses described in a JSON file and writes the results"
)]
struct Options {
    /// JSON file with the model and the analyses
    input: String,

    /// Output directory
    #[structopt(short, long, default_value = "/tmp/sesim")]
    out_dir: String,

    /// Shows the step data
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();

    // load data
    let mut input = ModelInput::read_json(&options.input)?;
    if options.verbose {
        input.config.control.verbose_steps = true;
    }

    // run analyses
    let mut domain = input.build()?;
    input.run(&mut domain)?;

    // write results
    let stem = Path::new(&options.input)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or("cannot get the stem of the input file")?;
    let path = format!("{}/{}-results.json", options.out_dir, stem);
    ModelOutput::new(&domain).write_json(&path)?;

    // message
    let thin_line = format!("{:─^1$}", "", path.len());
    println!("\n{}", thin_line);
    println!("results written to:");
    println!("{}", path);
    println!("{}\n", thin_line);
    Ok(())
}
