use std::fs::File;
use std::path::Path;

use clap::{crate_authors, crate_description, crate_version, Arg, Command};
use failure::Error;
use log::{error, info};
use simplelog::{
    ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

use sos_import_config::document::XmlWriter;
use sos_import_config::session::{SessionModel, WizardSession};
use sos_import_config::settings::Settings;

fn main() {
    let matches = command().get_matches();

    let settings_path = matches.value_of("settings").map(Path::new);
    let settings = match Settings::new(settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Unable to use config file: {}", e);
            return; // stop program
        }
    };

    if let Err(e) = initialize_logger(Path::new(&settings.general.log_file), &settings) {
        eprintln!("Unable to initialize logger: {}", e);
        return; // stop program
    }

    let session_path = Path::new(
        matches
            .value_of("session")
            .unwrap_or(settings.session.input_file.as_str()),
    );

    let session_model = match SessionModel::from_path(session_path) {
        Ok(model) => model,
        Err(e) => {
            error!(
                "Unable to load wizard session from {}: {}",
                session_path.display(),
                e
            );
            return; // stop program
        }
    };

    let mut session = WizardSession::from_model(&session_model);
    let document = match session.run(&session_model.assignments) {
        Ok(document) => document,
        Err(e) => {
            error!("Unable to assemble import configuration: {}", e);
            return; // stop program
        }
    };

    let output_path = Path::new(&settings.export.output_file);
    match XmlWriter::new(&settings.export).to_path(document, output_path) {
        Ok(_) => info!(
            "Import configuration written to {}",
            output_path.display()
        ),
        Err(e) => error!("Unable to write import configuration: {}", e),
    };
}

/// The command line interface.
fn command() -> Command<'static> {
    Command::new("SOS Import Configuration Assembler")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::new("settings")
                .short('s')
                .long("settings")
                .value_name("SETTINGS")
                .help("Specify the settings file")
                .takes_value(true),
        )
        .arg(
            Arg::new("session")
                .short('i')
                .long("session")
                .value_name("SESSION")
                .help("Specify the recorded wizard session (JSON)")
                .takes_value(true),
        )
}

/// Initialize the logger.
fn initialize_logger(file_path: &Path, settings: &Settings) -> Result<(), Error> {
    let log_level = if settings.general.debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    loggers.push(TermLogger::new(
        log_level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));

    if let Ok(file) = File::create(file_path) {
        loggers.push(WriteLogger::new(
            log_level,
            simplelog::Config::default(),
            file,
        ));
    }

    CombinedLogger::init(loggers)?;

    Ok(())
}
