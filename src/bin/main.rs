//! # arpsnoop
//!
//! `arpsnoop` prints a line for every ARP packet seen on a network interface.
extern crate arpsnoop;
use arpsnoop::constants::{
    ARPSNOOP_AUTHORS, ARPSNOOP_COPYRIGHT_BLOCK, ARPSNOOP_NAME, ARPSNOOP_VERSION,
};
use arpsnoop::{sniff_arp_pkts, Config};

// getopts
use getopts::Options;

// std
use std::env;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// MyError Type
#[derive(Debug)]
struct MyError(String);

impl std::fmt::Display for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Error: {}", self.0)
    }
}
impl Error for MyError {}

// print_usage() function
fn print_usage(program: &str, opts: Options) {
    let brief = format!("Usage: {} [options]", program);
    print!("{}", opts.usage(&brief));
}

// print_version() function
fn print_version() {
    println!("{} {}", ARPSNOOP_NAME, ARPSNOOP_VERSION);
    println!("{}", ARPSNOOP_COPYRIGHT_BLOCK);
    println!("\nWritten by {}.", ARPSNOOP_AUTHORS);
}

// parse_cli_opts() function
/// Returns `None` when the program should exit without capturing
fn parse_cli_opts(args: &[String]) -> Result<Option<Config>, Box<dyn Error>> {
    let program = args.first().map(|s| s.as_str()).unwrap_or(ARPSNOOP_NAME);
    let mut opts = Options::new();

    opts.optflag("h", "help", "display help information");
    opts.optflag("V", "version", "display version information");
    opts.optopt("i", "iface", "ethernet interface to listen on", "INTERFACE");
    opts.optopt("c", "conf", "path to configuration file", "FILE");
    opts.optopt(
        "d",
        "debug",
        "debugging level:\n0(none), 1(low), 2(medium), 3(high), 5(extensive)",
        "LEVEL",
    );
    opts.optflag("p", "promisc", "receive frames not addressed to this host");

    let matches = match opts.parse(args.iter().skip(1)) {
        Ok(m) => m,
        Err(f) => return Err(Box::new(MyError(f.to_string()))),
    };

    // help command-line option
    if matches.opt_present("help") {
        print_usage(program, opts);
        return Ok(None);
    }

    // version command-line option
    if matches.opt_present("version") {
        print_version();
        return Ok(None);
    }

    if !matches.free.is_empty() {
        return Err(Box::new(MyError(format!(
            "unexpected argument '{}'",
            matches.free[0]
        ))));
    }

    // debug level command-line option
    let debug = match matches.opt_str("debug") {
        Some(x) => match x.parse::<u8>() {
            Ok(v) => Some(v),
            Err(_) => {
                return Err(Box::new(MyError(format!(
                    "invalid debugging level '{}'",
                    x
                ))))
            }
        },
        None => None,
    };

    Ok(Some(Config::new(
        matches.opt_str("iface"),
        matches.opt_str("conf"),
        debug,
        matches.opt_present("promisc"),
    )))
}

// run() function
fn run(cfg: Config) -> Result<(), Box<dyn Error>> {
    // Thread safe shared variable
    let shutdown = Arc::new(AtomicBool::new(false));

    // Set up SIGINT/SIGTERM signal handler
    let shutdown_c1 = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        shutdown_c1.store(true, Ordering::Relaxed);
    })
    .map_err(|e| MyError(format!("cannot set signal handler: {}", e)))?;

    // Listen to ARP packets
    match sniff_arp_pkts(&cfg, shutdown) {
        Ok(stats) => {
            eprintln!("\n{}", stats);
            Ok(())
        }
        Err(e) => Err(Box::new(MyError(e.to_string()))),
    }
}

// main() function
fn main() {
    let args: Vec<String> = env::args().collect();

    match parse_cli_opts(&args) {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(None) => std::process::exit(0),
        Ok(Some(c)) => {
            if let Err(e) = run(c) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}
