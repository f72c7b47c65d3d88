use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use xtring::RcLoader;
use xtring::cli::{self, Cli, Command};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let input = match (&cli.command, &cli.file) {
        (Command::SampleRc, _) => String::new(),
        (_, Some(path)) => fs::read_to_string(path)?,
        (_, None) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let config = cli.apply_overrides(RcLoader::load_config());
    let output = cli::execute(&cli.command, &input, &config)?;

    io::stdout().write_all(output.as_bytes())?;
    Ok(())
}
