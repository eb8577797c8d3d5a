use std::process;

use anyhow::Context;
use clap::{arg, ArgMatches, Command};

use revis::Regex;

const EXIT_ERROR: i32 = 1;

fn cli() -> Command {
    Command::new("revis")
        .about("Compile a regular expression and print its VM program")
        .arg(arg!(<PATTERN> "Regular expression to compile"))
        .arg(arg!(-t --tree "Print the concrete syntax tree before the program"))
}

fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let pattern = args
        .get_one::<String>("PATTERN")
        .map(String::as_str)
        .unwrap_or_default();

    let regex = Regex::new(pattern)
        .with_context(|| format!("can not compile {:?}", pattern))?;

    if args.get_flag("tree") {
        println!("{}", regex.tree().ascii_tree());
    }
    print!("{}", regex);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = cli().get_matches();

    if let Err(err) = exec(&args) {
        if let Some(source) = err.source() {
            eprintln!("error: {}: {}", err, source);
        } else {
            eprintln!("error: {}", err);
        }
        process::exit(EXIT_ERROR);
    }

    Ok(())
}
