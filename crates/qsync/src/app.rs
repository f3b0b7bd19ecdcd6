use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("qsync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sync widget state with URL query strings")
        .long_about("qsync reads typed widget values out of URL query strings, bootstraps widget manifests against a query string, and builds permalinks from session-state snapshots.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("read")
                .about("Decode the value of one key from a query string")
                .arg(
                    Arg::new("key")
                        .help("Query string key to read")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("query")
                        .long("query")
                        .short('q')
                        .help("Query string, with or without the leading '?'")
                        .default_value(""),
                )
                .arg(
                    Arg::new("list")
                        .long("list")
                        .help("Return every value for the key instead of exactly one")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("codec")
                        .long("codec")
                        .short('c')
                        .help("How to decode the raw text")
                        .value_parser(["str", "int", "float", "bool", "bytes"])
                        .default_value("str"),
                )
                .arg(
                    Arg::new("default")
                        .long("default")
                        .short('d')
                        .help("JSON value returned when the key is absent"),
                ),
        )
        .subcommand(
            Command::new("permalink")
                .about("Build a permalink query string from a session-state snapshot")
                .arg(
                    Arg::new("state")
                        .long("state")
                        .short('s')
                        .help("Session state as a JSON object")
                        .required(true),
                )
                .arg(
                    Arg::new("keys")
                        .long("keys")
                        .short('k')
                        .help("Comma-separated keys to include")
                        .value_delimiter(','),
                )
                .arg(
                    Arg::new("regex")
                        .long("regex")
                        .short('r')
                        .help("Include keys starting with a match of this pattern (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("blacklist")
                        .long("blacklist")
                        .short('b')
                        .help("Never include this key (repeatable, adds to config)")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("bootstrap")
                .about("Bootstrap every widget in a manifest against a query string")
                .arg(
                    Arg::new("manifest")
                        .help("Path to a TOML widget manifest")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("query")
                        .long("query")
                        .short('q')
                        .help("Query string the page was opened with")
                        .default_value(""),
                )
                .arg(
                    Arg::new("set")
                        .long("set")
                        .help("Simulate a user edit after bootstrap, as key=<json> (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
}
