//! CLI argument parsing module
//!
//! This module handles command-line argument parsing and application entry point.

use crate::codec;
use crate::config::{Config, JAR_ENV};
use crate::error::{CookieError, Result};
use crate::exit_code::{exit_code_for_error, NOT_FOUND};
use crate::options::{CookieOptions, Expires, SameSite};
use crate::output::OutputWriter;
use crate::service::{AllCookies, CookieService};
use crate::store::{CookieStore, FileCookieStore};
use crate::utils::{FileUtils, StringUtils};
use clap::{Arg, ArgAction, ArgMatches, Command};
use time::OffsetDateTime;

/// Main entry point for the CLI application
pub fn run() {
    let matches = create_app().get_matches();
    crate::logging::init(matches.get_flag("verbose"));

    let config = match build_config_from_args(&matches) {
        Ok(config) => config,
        Err(e) => exit_with_error(&e, false),
    };
    let silent = config.output.silent;

    match run_with_config(&matches, config) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => exit_with_error(&e, silent),
    }
}

fn exit_with_error(err: &CookieError, silent: bool) -> ! {
    if !silent {
        eprintln!("crumbs: error: {}", err);
    }
    std::process::exit(exit_code_for_error(err))
}

/// Run the selected subcommand against the configured jar
fn run_with_config(matches: &ArgMatches, config: Config) -> Result<i32> {
    let output = OutputWriter::new(config.output.clone());
    let mut store = FileCookieStore::open(&config.jar_path)?;
    output.write_verbose(&format!("Using cookie jar {:?}", store.path()))?;

    let (code, modified) = {
        let mut service = CookieService::new(&mut store);
        execute(matches, &config, &mut service, &output)?
    };

    if modified {
        store.save()?;
        output.write_verbose(&format!("Saved cookie jar {:?}", store.path()))?;
    }
    Ok(code)
}

/// Execute a subcommand; returns the exit code and whether the jar changed
fn execute<S: CookieStore>(
    matches: &ArgMatches,
    config: &Config,
    service: &mut CookieService<S>,
    output: &OutputWriter,
) -> Result<(i32, bool)> {
    match matches.subcommand() {
        Some(("set", sub)) => {
            let name = required(sub, "name")?;
            let value = required(sub, "value")?;
            let options = build_options_from_args(sub)?;
            let written = service.set_cookie(name, value, Some(&options));
            output.write(&written)?;
            Ok((0, true))
        }
        Some(("get", sub)) => {
            let name = required(sub, "name")?;
            match service.get_cookie_by_name(name, config.parse_values) {
                Some(entry) => {
                    output.write_entry(&entry)?;
                    Ok((0, false))
                }
                None => {
                    output.write_verbose(&format!("No cookie named {}", name))?;
                    Ok((NOT_FOUND, false))
                }
            }
        }
        Some(("list", sub)) => {
            match service.get_all_cookies(sub.get_flag("raw"), config.parse_values) {
                AllCookies::Raw(raw) => output.write(&raw)?,
                AllCookies::Entries(entries) => output.write_entries(&entries)?,
            }
            Ok((0, false))
        }
        Some(("patch", sub)) => {
            let name = required(sub, "name")?;
            let value = required(sub, "value")?;
            match scope_from_args(sub) {
                Some(scope) => service.patch_cookie_value_scoped(name, value, &scope),
                None => service.patch_cookie_value(name, value),
            }
            Ok((0, true))
        }
        Some(("delete", sub)) => {
            let name = required(sub, "name")?;
            match scope_from_args(sub) {
                Some(scope) => service.delete_cookie_by_name_scoped(name, &scope),
                None => service.delete_cookie_by_name(name),
            }
            Ok((0, true))
        }
        Some(("clear", _)) => {
            service.delete_all_cookies();
            Ok((0, true))
        }
        Some(("import", sub)) => {
            let file = FileUtils::expand_path(required(sub, "file")?)?;
            FileUtils::check_file_readable(&file)?;
            let raw = std::fs::read_to_string(&file)?;
            let mut imported = 0;
            for (name, value) in codec::segments(raw.trim()) {
                service.set_cookie(name, value, None);
                imported += 1;
            }
            output.write_verbose(&format!("Imported {} cookies from {:?}", imported, file))?;
            Ok((0, true))
        }
        Some((other, _)) => Err(CookieError::Config(format!("Unknown command: {}", other))),
        None => Err(CookieError::Config("No command given".to_string())),
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| CookieError::Config(format!("Missing argument: {}", id)))
}

fn name_arg() -> Arg {
    Arg::new("name")
        .help("Cookie name")
        .required(true)
        .index(1)
}

fn value_arg() -> Arg {
    Arg::new("value")
        .help("Cookie value, written as given")
        .required(true)
        .allow_hyphen_values(true)
        .index(2)
}

fn scope_args() -> [Arg; 2] {
    [
        Arg::new("domain")
            .long("domain")
            .value_name("DOMAIN")
            .help("Domain the cookie is scoped to"),
        Arg::new("path")
            .long("path")
            .value_name("PATH")
            .help("Path the cookie is scoped to"),
    ]
}

/// Create the CLI application structure
pub fn create_app() -> Command {
    Command::new("crumbs")
        .version(crate::VERSION)
        .about("Read, write and delete cookies in a cookie jar")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(Arg::new("jar")
            .long("jar")
            .value_name("FILE")
            .env(JAR_ENV)
            .global(true)
            .help("Cookie jar file"))
        .arg(Arg::new("json")
            .long("json")
            .global(true)
            .help("Print cookies as JSON")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("parse")
            .short('p')
            .long("parse")
            .global(true)
            .help("Parse cookie values as JSON where possible")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .global(true)
            .help("Verbose output")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("silent")
            .short('s')
            .long("silent")
            .global(true)
            .help("Silent mode")
            .action(ArgAction::SetTrue))
        .subcommand(Command::new("set")
            .about("Write a cookie")
            .arg(name_arg())
            .arg(value_arg())
            .arg(Arg::new("expires")
                .long("expires")
                .value_name("DATE")
                .help("Expiry as an ISO-8601 or HTTP date")
                .conflicts_with("expires-in"))
            .arg(Arg::new("expires-in")
                .long("expires-in")
                .value_name("DURATION")
                .help("Expiry relative to now, e.g. 30m or 7d"))
            .args(scope_args())
            .arg(Arg::new("secure")
                .long("secure")
                .help("Set the Secure flag")
                .action(ArgAction::SetTrue))
            .arg(Arg::new("http-only")
                .long("http-only")
                .help("Set the HttpOnly flag")
                .action(ArgAction::SetTrue))
            .arg(Arg::new("same-site")
                .long("same-site")
                .value_name("Strict|Lax|None")
                .help("SameSite attribute")))
        .subcommand(Command::new("get")
            .about("Print the value of a cookie")
            .arg(name_arg()))
        .subcommand(Command::new("list")
            .about("Print all cookies")
            .arg(Arg::new("raw")
                .long("raw")
                .help("Print the cookie string unmodified")
                .action(ArgAction::SetTrue)))
        .subcommand(Command::new("patch")
            .about("Change the value of a cookie")
            .arg(name_arg())
            .arg(value_arg())
            .args(scope_args()))
        .subcommand(Command::new("delete")
            .about("Delete a cookie")
            .arg(name_arg())
            .args(scope_args()))
        .subcommand(Command::new("clear")
            .about("Delete every cookie"))
        .subcommand(Command::new("import")
            .about("Add cookies from a file holding a `name=value; ...` string")
            .arg(Arg::new("file")
                .help("File to read")
                .required(true)
                .index(1)))
}

/// Build configuration from command line arguments
pub fn build_config_from_args(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::default();

    if let Some(jar) = matches.get_one::<String>("jar") {
        config.jar_path = FileUtils::expand_path(jar)?;
    }

    config.parse_values = matches.get_flag("parse");
    config.output.format_json = matches.get_flag("json");
    config.output.verbose = matches.get_flag("verbose");
    config.output.silent = matches.get_flag("silent");

    Ok(config)
}

/// Build cookie attributes from `set` arguments
pub fn build_options_from_args(matches: &ArgMatches) -> Result<CookieOptions> {
    let mut options = CookieOptions::default();

    if let Some(expires) = matches.get_one::<String>("expires") {
        options.expires = Some(Expires::Text(expires.clone()));
    }

    if let Some(expires_in) = matches.get_one::<String>("expires-in") {
        let duration = StringUtils::parse_duration(expires_in)?;
        let at = time::Duration::try_from(duration)
            .ok()
            .and_then(|d| OffsetDateTime::now_utc().checked_add(d))
            .ok_or_else(|| CookieError::Config(format!("Expiry out of range: {}", expires_in)))?;
        options.expires = Some(Expires::At(at));
    }

    if let Some(same_site) = matches.get_one::<String>("same-site") {
        options.same_site = Some(same_site.parse::<SameSite>().map_err(|_| {
            CookieError::Config(format!(
                "Invalid SameSite value: '{}'. Expected Strict, Lax or None",
                same_site
            ))
        })?);
    }

    if let Some(scope) = scope_from_args(matches) {
        options.domain = scope.domain;
        options.path = scope.path;
    }

    options.secure = matches.get_flag("secure");
    options.http_only = matches.get_flag("http-only");

    Ok(options)
}

fn scope_from_args(matches: &ArgMatches) -> Option<CookieOptions> {
    let domain = matches.get_one::<String>("domain").cloned();
    let path = matches.get_one::<String>("path").cloned();
    if domain.is_none() && path.is_none() {
        return None;
    }
    Some(CookieOptions::scoped(domain, path))
}
