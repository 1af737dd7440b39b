use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use knn_select::io::read_dataset;
use knn_select::{Dataset, SearchConfig, SearchDirection};
use knn_select_cli::search::run::{
    evaluate_subset, load_search_config, run_search, write_baseline, write_outcome_json,
};
use knn_select_cli::util::{parse_feature_list, prompt, validate_data_file};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("KNN_SELECT_LOG", "warn"))
        .init();

    let matches = Command::new("knn-select")
        .version(clap::crate_version!())
        .author("Justin Sing <justincsing@gmail.com>")
        .about("Nearest-neighbor feature selection with leave-one-out evaluation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("search")
                .about("Run forward selection or backward elimination over a dataset")
                .arg(
                    Arg::new("data")
                        .help("Path to the dataset (label in the first column). Prompted for when omitted.")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("algorithm")
                        .short('a')
                        .long("algorithm")
                        .help(
                            "Search algorithm. Overrides the direction in the configuration \
                             file; prompted for when neither is given.",
                        )
                        .value_parser(["forward", "backward"])
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a JSON search configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .help("Evaluate the candidates of each level in parallel.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Write the search outcome as JSON to this path.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("evaluate")
                .about("Report the leave-one-out accuracy of one feature subset")
                .arg(
                    Arg::new("data")
                        .help("Path to the dataset (label in the first column)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("features")
                        .short('f')
                        .long("features")
                        .help("Comma separated feature indices, e.g. 1,3,5. Defaults to all features.")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::Other),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("search", sub_m)) => handle_search(sub_m),
        Some(("evaluate", sub_m)) => handle_evaluate(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_search(matches: &ArgMatches) -> Result<()> {
    let mut input = io::stdin().lock();
    let mut out = io::stdout();

    let data_arg: Option<&PathBuf> = matches.get_one("data");
    let algorithm: Option<&String> = matches.get_one("algorithm");
    let config_path: Option<&PathBuf> = matches.get_one("config");

    if data_arg.is_none() || (algorithm.is_none() && config_path.is_none()) {
        writeln!(out, "Welcome to the knn-select Feature Selection Algorithm.")?;
    }

    let data_path = match data_arg {
        Some(path) => path.clone(),
        None => PathBuf::from(prompt(
            &mut input,
            &mut out,
            "Type in the name of the file to test: ",
        )?),
    };
    let data = load_data(&data_path)?;

    let mut config = match config_path {
        Some(path) => {
            log::info!("[knn-select::search] Using config: {:?}", path);
            load_search_config(path)?
        }
        None => SearchConfig::default(),
    };
    if matches.get_flag("parallel") {
        config.parallel = true;
    }

    if let Some(algorithm) = algorithm {
        config.direction = SearchDirection::from_str(algorithm).map_err(anyhow::Error::msg)?;
    } else if config_path.is_none() {
        writeln!(out, "Type in the number of the algorithm you want to run.")?;
        writeln!(out, "   1) Forward Selection")?;
        writeln!(out, "   2) Backward Elimination")?;
        let choice = prompt(&mut input, &mut out, "")?;
        match SearchDirection::from_str(&choice) {
            Ok(direction) => config.direction = direction,
            Err(e) => {
                writeln!(out, "Not a valid choice.")?;
                anyhow::bail!(e);
            }
        }
    }

    log::info!(
        "[knn-select::search] Running {} on {:?}",
        config.direction,
        data_path
    );

    let start = Instant::now();
    write_baseline(&data, &mut out)?;
    let outcome = run_search(&data, &config, &mut out)?;
    writeln!(out, "Runtime: {} seconds", start.elapsed().as_secs())?;

    if let Some(path) = matches.get_one::<PathBuf>("output_file") {
        write_outcome_json(path, &outcome)?;
        log::info!("[knn-select::search] Wrote outcome to {:?}", path);
    }
    Ok(())
}

fn handle_evaluate(matches: &ArgMatches) -> Result<()> {
    let data_path: &PathBuf = matches
        .get_one("data")
        .context("A dataset path is required")?;
    let data = load_data(data_path)?;

    let subset = match matches.get_one::<String>("features") {
        Some(list) => parse_feature_list(list)?,
        None => data.all_features(),
    };

    evaluate_subset(&data, &subset, &mut io::stdout())?;
    Ok(())
}

fn load_data(path: &Path) -> Result<Dataset> {
    validate_data_file(path)?;
    let data = read_dataset(path)?;
    data.log_summary();
    Ok(data)
}
